use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::create_post::create_post;
use super::handlers::current_user::current_user;
use super::handlers::get_user::get_user;
use super::handlers::list_posts::list_posts;
use super::handlers::list_user_posts::list_user_posts;
use super::handlers::list_users::list_users;
use super::handlers::login::login;
use super::handlers::register::register;
use super::middleware::authenticate as auth_middleware;
use crate::domain::post::service::PostService;
use crate::domain::user::service::UserService;
use crate::outbound::repositories::SqlitePostRepository;
use crate::outbound::repositories::SqliteUserRepository;

pub type BlogUserService = UserService<SqliteUserRepository>;
pub type BlogPostService = PostService<SqlitePostRepository, SqliteUserRepository>;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<BlogUserService>,
    pub post_service: Arc<BlogPostService>,
}

pub fn create_router(
    user_service: Arc<BlogUserService>,
    post_service: Arc<BlogPostService>,
) -> Router {
    let state = AppState {
        user_service,
        post_service,
    };

    let public_routes = Router::new()
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/users", get(list_users))
        .route("/api/users/:user_id", get(get_user))
        .route("/api/users/:user_id/posts", get(list_user_posts))
        .route("/api/posts", get(list_posts));

    let protected_routes = Router::new()
        .route("/api/users/me", get(current_user))
        .route("/api/posts", post(create_post))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            // Headers are left out: they carry bearer tokens.
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
