use async_trait::async_trait;

use crate::domain::post::errors::PostError;
use crate::domain::post::models::CreatePostCommand;
use crate::domain::post::models::Post;
use crate::domain::user::models::UserId;

/// Port for post domain service operations.
#[async_trait]
pub trait PostServicePort: Send + Sync + 'static {
    /// Publish a post for an existing author.
    ///
    /// # Errors
    /// * `AuthorNotFound` - `author_id` does not name a user
    /// * `DatabaseError` - Database operation failed
    async fn create_post(&self, command: CreatePostCommand) -> Result<Post, PostError>;

    async fn list_posts(&self) -> Result<Vec<Post>, PostError>;

    /// # Errors
    /// * `NotFound` - The user has no posts (or does not exist)
    /// * `DatabaseError` - Database operation failed
    async fn list_posts_by_author(&self, author_id: &UserId) -> Result<Vec<Post>, PostError>;
}

/// Persistence operations for posts.
#[async_trait]
pub trait PostRepository: Send + Sync + 'static {
    /// # Errors
    /// * `AuthorNotFound` - Foreign key on the author was violated
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, post: Post) -> Result<Post, PostError>;

    async fn list_all(&self) -> Result<Vec<Post>, PostError>;

    async fn list_by_author(&self, author_id: &UserId) -> Result<Vec<Post>, PostError>;
}
