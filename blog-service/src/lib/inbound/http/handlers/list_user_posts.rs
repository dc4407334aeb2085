use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::list_posts::PostData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::post::ports::PostServicePort;
use crate::domain::user::models::UserId;
use crate::inbound::http::router::AppState;

pub async fn list_user_posts(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<ApiSuccess<Vec<PostData>>, ApiError> {
    let user_id = UserId::from_string(&user_id).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    state
        .post_service
        .list_posts_by_author(&user_id)
        .await
        .map_err(ApiError::from)
        .map(|posts| ApiSuccess::new(StatusCode::OK, posts.iter().map(PostData::from).collect()))
}
