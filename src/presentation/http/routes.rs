//! Route Configuration
//!
//! Configures all HTTP routes for the API. Read endpoints are public;
//! every mutating endpoint sits behind the bearer-token middleware.

use axum::{
    middleware,
    routing::{delete, get, patch, post},
    Router,
};

use super::handlers;
use crate::presentation::middleware::auth_middleware;
use crate::startup::AppState;

/// Create the main API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/auth", auth_routes(state.clone()))
        .nest("/users", user_routes(state.clone()))
        .nest("/boardCategories", category_routes(state.clone()))
        .nest("/boards", board_routes(state.clone()))
        .nest("/threads", thread_routes(state.clone()))
        .nest("/posts", post_routes(state.clone()))
        // Health check endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/health/live", get(handlers::health::liveness))
        .route("/health/ready", get(handlers::health::readiness))
        .with_state(state)
}

/// Authentication routes
fn auth_routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/logout", get(handlers::auth::logout))
        .route(
            "/checkIsAuthenticated",
            get(handlers::auth::check_is_authenticated),
        )
        .route("/checkIsAdmin", get(handlers::auth::check_is_admin))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login))
        .merge(protected)
}

/// User routes
fn user_routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/{user_id}", patch(handlers::user::update_user))
        .route("/{user_id}", delete(handlers::user::delete_user))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    Router::new()
        .route("/", get(handlers::user::list_users))
        // Registration alias
        .route("/", post(handlers::auth::register))
        .route("/{user_id}", get(handlers::user::get_user))
        .merge(protected)
}

/// Board category routes
fn category_routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/", post(handlers::category::create_category))
        .route("/{category_id}", patch(handlers::category::update_category))
        .route("/{category_id}", delete(handlers::category::delete_category))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    Router::new()
        .route("/", get(handlers::category::list_categories))
        .route("/{category_id}", get(handlers::category::get_category))
        .merge(protected)
}

/// Board routes
fn board_routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/", post(handlers::board::create_board))
        .route("/{board_id}", patch(handlers::board::update_board))
        .route("/{board_id}", delete(handlers::board::delete_board))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    Router::new()
        .route("/", get(handlers::board::list_boards))
        .route("/{board_id}", get(handlers::board::get_board))
        .route(
            "/category/{category_id}",
            get(handlers::board::list_boards_by_category),
        )
        .merge(protected)
}

/// Thread routes
fn thread_routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/", post(handlers::thread::create_thread))
        .route("/{thread_id}", patch(handlers::thread::update_thread))
        .route("/{thread_id}", delete(handlers::thread::delete_thread))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    Router::new()
        .route("/", get(handlers::thread::list_threads))
        .route("/{thread_id}", get(handlers::thread::get_thread))
        .route(
            "/board/{board_id}",
            get(handlers::thread::list_threads_by_board),
        )
        .route(
            "/user/{user_id}",
            get(handlers::thread::list_threads_by_author),
        )
        .merge(protected)
}

/// Post routes
fn post_routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/", post(handlers::post::create_post))
        .route("/{post_id}", patch(handlers::post::update_post))
        .route("/{post_id}", delete(handlers::post::delete_post))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    Router::new()
        .route("/", get(handlers::post::list_posts))
        .route("/{post_id}", get(handlers::post::get_post))
        .route(
            "/thread/{thread_id}",
            get(handlers::post::list_posts_by_thread),
        )
        .route(
            "/user/{user_id}",
            get(handlers::post::list_posts_by_author),
        )
        .merge(protected)
}
