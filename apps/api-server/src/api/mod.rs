//! API endpoints.

pub mod info;
pub mod users;

use std::sync::Arc;

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use user_store::UserStore;

use crate::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router<S: UserStore + 'static>() -> Router<Arc<AppState<S>>> {
    Router::new()
        // User endpoints
        .route("/data", get(users::list_users))
        .route("/add-users", post(users::add_user))
        .route("/update-user/:id", put(users::update_user))
        .route("/delete-user/:id", delete(users::delete_user))
        .route("/search-users", get(users::search_users))
        // Informational endpoints
        .route("/health", get(info::health_check))
        .route("/about", get(info::about))
        .route("/stats", get(info::stats))
}
