//! User API endpoints.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use user_store::{User, UserStore};

use crate::error::{ServerError, ServerResult};
use crate::state::AppState;

/// Request body for creating or updating a user.
///
/// Both fields are optional at the deserialization layer so that a partial
/// body is reported as a validation failure, not a decode failure.
#[derive(Debug, Deserialize)]
pub struct UserPayload {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl UserPayload {
    /// Returns `(name, email)` when both are present and non-empty.
    fn validate(&self) -> ServerResult<(&str, &str)> {
        match (self.name.as_deref(), self.email.as_deref()) {
            (Some(name), Some(email)) if !name.is_empty() && !email.is_empty() => {
                Ok((name, email))
            }
            _ => Err(ServerError::InvalidRequest(
                "Name and email are required".to_string(),
            )),
        }
    }
}

/// Query parameters for user search.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

/// Response body for successful write operations.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// Lists all users. Result order is unspecified.
pub async fn list_users<S: UserStore>(
    State(state): State<Arc<AppState<S>>>,
) -> ServerResult<Json<Vec<User>>> {
    let users = state.store.list_users().await?;
    Ok(Json(users))
}

/// Adds a user.
///
/// A duplicate email is a silent no-op and still reports success, matching
/// the conflict-ignore insert.
pub async fn add_user<S: UserStore>(
    State(state): State<Arc<AppState<S>>>,
    Json(payload): Json<UserPayload>,
) -> ServerResult<(StatusCode, Json<MessageResponse>)> {
    let (name, email) = payload.validate()?;
    state.store.add_user(name, email).await?;

    tracing::info!(email = %email, "User added");

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "User added successfully",
        }),
    ))
}

/// Updates a user's name and email.
pub async fn update_user<S: UserStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<i32>,
    Json(payload): Json<UserPayload>,
) -> ServerResult<Json<MessageResponse>> {
    let (name, email) = payload.validate()?;
    state.store.update_user(id, name, email).await?;

    tracing::info!(user_id = id, "User updated");

    Ok(Json(MessageResponse {
        message: "User updated successfully",
    }))
}

/// Deletes a user by id.
pub async fn delete_user<S: UserStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<i32>,
) -> ServerResult<Json<MessageResponse>> {
    state.store.delete_user(id).await?;

    tracing::info!(user_id = id, "User deleted");

    Ok(Json(MessageResponse {
        message: "User deleted successfully",
    }))
}

/// Searches users by name or email substring, case-insensitively.
///
/// An empty or missing `q` returns an empty list without a storage round
/// trip.
pub async fn search_users<S: UserStore>(
    State(state): State<Arc<AppState<S>>>,
    Query(params): Query<SearchParams>,
) -> ServerResult<Json<Vec<User>>> {
    let query = params.q.as_deref().unwrap_or("");
    if query.is_empty() {
        return Ok(Json(Vec::new()));
    }

    let users = state.store.search_users(query).await?;
    Ok(Json(users))
}
