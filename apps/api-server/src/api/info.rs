//! Static informational and statistics endpoints.

use std::sync::Arc;

use axum::{Json, extract::State};
use serde::Serialize;
use user_store::UserStore;

use crate::error::ServerResult;
use crate::state::AppState;

/// Date reported by `/stats` as the last statistics refresh.
const STATS_LAST_UPDATED: &str = "2024-01-15";

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}

/// Static profile served by `/about`.
#[derive(Debug, Clone, Serialize)]
pub struct AboutResponse {
    pub name: &'static str,
    pub title: &'static str,
    pub focus: &'static str,
    pub skills: &'static [&'static str],
    pub interests: &'static [&'static str],
}

/// Service statistics.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub total_users: i64,
    pub active_sessions: u32,
    pub system_status: &'static str,
    pub last_updated: &'static str,
}

/// The portfolio owner's profile. Contains Vietnamese text that must
/// round-trip as UTF-8.
const ABOUT: AboutResponse = AboutResponse {
    name: "Nguyễn Minh Phúc",
    title: "Sinh viên năm thứ 4 - Khoa học Máy tính",
    focus: "DevSecOps",
    skills: &[
        "React",
        "Node.js",
        "Docker",
        "Kubernetes",
        "DevOps",
        "Security",
        "CI/CD",
        "AWS",
        "Python",
        "JavaScript",
        "MongoDB",
        "PostgreSQL",
    ],
    interests: &["DevOps", "Security", "Cloud Computing"],
};

/// Health check endpoint. Never touches storage.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "backend",
    })
}

/// Returns the fixed profile payload.
pub async fn about() -> Json<AboutResponse> {
    Json(ABOUT)
}

/// Reports service statistics from a single count query.
pub async fn stats<S: UserStore>(
    State(state): State<Arc<AppState<S>>>,
) -> ServerResult<Json<StatsResponse>> {
    let total_users = state.store.count_users().await?;

    Ok(Json(StatsResponse {
        total_users,
        active_sessions: 1,
        system_status: "healthy",
        last_updated: STATS_LAST_UPDATED,
    }))
}
