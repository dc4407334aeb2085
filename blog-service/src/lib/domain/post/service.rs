use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::post::errors::PostError;
use crate::domain::post::models::CreatePostCommand;
use crate::domain::post::models::Post;
use crate::domain::post::models::PostId;
use crate::domain::post::ports::PostRepository;
use crate::domain::post::ports::PostServicePort;
use crate::domain::user::models::UserId;
use crate::user::ports::UserRepository;

/// Domain service for posts.
///
/// Reads authors through the user repository so a post is never created for
/// a user that does not exist.
pub struct PostService<PR, UR>
where
    PR: PostRepository,
    UR: UserRepository,
{
    posts: Arc<PR>,
    users: Arc<UR>,
}

impl<PR, UR> PostService<PR, UR>
where
    PR: PostRepository,
    UR: UserRepository,
{
    pub fn new(posts: Arc<PR>, users: Arc<UR>) -> Self {
        Self { posts, users }
    }
}

#[async_trait]
impl<PR, UR> PostServicePort for PostService<PR, UR>
where
    PR: PostRepository,
    UR: UserRepository,
{
    async fn create_post(&self, command: CreatePostCommand) -> Result<Post, PostError> {
        let author = self
            .users
            .find_by_id(&command.author_id)
            .await?
            .ok_or_else(|| PostError::AuthorNotFound(command.author_id.to_string()))?;

        let post = Post {
            id: PostId::new(),
            title: command.title,
            body: command.body,
            author,
            created_at: Utc::now(),
        };

        let created_post = self.posts.create(post).await?;
        tracing::info!(
            post_id = %created_post.id,
            author_id = %created_post.author.id,
            "Post created"
        );

        Ok(created_post)
    }

    async fn list_posts(&self) -> Result<Vec<Post>, PostError> {
        self.posts.list_all().await
    }

    async fn list_posts_by_author(&self, author_id: &UserId) -> Result<Vec<Post>, PostError> {
        let posts = self.posts.list_by_author(author_id).await?;

        if posts.is_empty() {
            return Err(PostError::NotFound);
        }

        Ok(posts)
    }
}
