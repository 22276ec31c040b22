//! Portfolio Backend
//!
//! A small HTTP service exposing CRUD over the `users` table, plus static
//! informational and health/statistics endpoints. Storage is injected as a
//! [`UserStore`] implementation, so the router can run against PostgreSQL in
//! production and the in-memory store in tests.

pub mod api;
pub mod config;
pub mod error;
pub mod state;

use std::sync::Arc;

use axum::Router;
use axum::http::{HeaderValue, Method, header::CONTENT_TYPE};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use user_store::UserStore;

use crate::config::Config;
use crate::state::{AppState, SharedState, create_shared_state};

/// Creates the application router with all routes configured.
pub fn create_app<S: UserStore + 'static>(state: Arc<AppState<S>>) -> Router {
    let cors = cors_layer(&state.config);

    api::create_router()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Builds the CORS layer from the configured origin allow-list.
///
/// Credentialed requests rule out wildcards, so origins, methods, and
/// headers are all listed explicitly.
fn cors_layer(config: &Config) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(parse_cors_origins(&config.cors_origins)))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE])
        .allow_credentials(true)
}

/// Parses the configured origins, warning about any that are not valid
/// header values so a typo in the allow-list is visible at startup.
fn parse_cors_origins(origins: &[String]) -> Vec<HeaderValue> {
    origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect()
}

/// Creates the application state with the given configuration and store.
pub fn create_state<S: UserStore>(config: Config, store: S) -> SharedState<S> {
    create_shared_state(config, store)
}

/// Initializes tracing with the given log level.
pub fn init_tracing(log_level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_cors_origins_are_dropped() {
        let origins = vec![
            "https://localhost".to_string(),
            "https://bad\norigin".to_string(),
        ];

        let parsed = parse_cors_origins(&origins);
        assert_eq!(parsed, vec![HeaderValue::from_static("https://localhost")]);
    }
}
