use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::SqlitePool;
use uuid::Uuid;

use super::user::UserRow;
use crate::domain::post::errors::PostError;
use crate::domain::post::models::Post;
use crate::domain::post::models::PostId;
use crate::domain::post::models::PostTitle;
use crate::domain::post::ports::PostRepository;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;

const SELECT_POSTS_WITH_AUTHOR: &str = r#"
    SELECT p.id, p.title, p.body, p.created_at,
           u.id AS author_id,
           u.name AS author_name,
           u.age AS author_age,
           u.password_hash AS author_password_hash,
           u.created_at AS author_created_at
    FROM posts p
    JOIN users u ON u.id = p.author_id
"#;

pub struct SqlitePostRepository {
    pool: SqlitePool,
}

impl SqlitePostRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct PostRow {
    id: String,
    title: String,
    body: String,
    created_at: DateTime<Utc>,
    author_id: String,
    author_name: String,
    author_age: i32,
    author_password_hash: String,
    author_created_at: DateTime<Utc>,
}

impl TryFrom<PostRow> for Post {
    type Error = PostError;

    fn try_from(row: PostRow) -> Result<Self, Self::Error> {
        let author = User::try_from(UserRow {
            id: row.author_id,
            name: row.author_name,
            age: row.author_age,
            password_hash: row.author_password_hash,
            created_at: row.author_created_at,
        })?;

        let id = Uuid::parse_str(&row.id)
            .map(PostId)
            .map_err(|e| PostError::DatabaseError(format!("corrupted post id: {}", e)))?;

        Ok(Post {
            id,
            title: PostTitle::new(row.title)?,
            body: row.body,
            author,
            created_at: row.created_at,
        })
    }
}

impl SqlitePostRepository {
    async fn fetch(&self, query: String, author_id: Option<&UserId>) -> Result<Vec<Post>, PostError> {
        let mut statement = sqlx::query_as::<_, PostRow>(&query);
        if let Some(author_id) = author_id {
            statement = statement.bind(author_id.to_string());
        }

        let rows = statement
            .fetch_all(&self.pool)
            .await
            .map_err(|e| PostError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(Post::try_from).collect()
    }
}

#[async_trait]
impl PostRepository for SqlitePostRepository {
    async fn create(&self, post: Post) -> Result<Post, PostError> {
        sqlx::query(
            r#"
            INSERT INTO posts (id, title, body, author_id, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(post.id.to_string())
        .bind(post.title.as_str())
        .bind(&post.body)
        .bind(post.author.id.to_string())
        .bind(post.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_foreign_key_violation() {
                    return PostError::AuthorNotFound(post.author.id.to_string());
                }
            }
            PostError::DatabaseError(e.to_string())
        })?;

        Ok(post)
    }

    async fn list_all(&self) -> Result<Vec<Post>, PostError> {
        let query = format!("{} ORDER BY p.created_at, p.id", SELECT_POSTS_WITH_AUTHOR);
        self.fetch(query, None).await
    }

    async fn list_by_author(&self, author_id: &UserId) -> Result<Vec<Post>, PostError> {
        let query = format!(
            "{} WHERE p.author_id = ? ORDER BY p.created_at, p.id",
            SELECT_POSTS_WITH_AUTHOR
        );
        self.fetch(query, Some(author_id)).await
    }
}
