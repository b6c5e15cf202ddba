//! # HTTP Server
//!
//! Builds the full router under `/api/v1` and wraps it in the boundary
//! layers: CORS, request logging, panic capture, per-request deadline, and
//! the request body cap.

use std::net::SocketAddr;

use axum::extract::DefaultBodyLimit;
use axum::{middleware, Router};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};

use super::comment_routes::comment_routes;
use super::dashboard_routes::dashboard_routes;
use super::health_routes::health_routes;
use super::layers;
use super::like_routes::like_routes;
use super::playlist_routes::playlist_routes;
use super::state::AppState;
use super::subscription_routes::subscription_routes;
use super::tweet_routes::tweet_routes;
use super::user_routes::user_routes;
use super::video_routes::video_routes;
use crate::config::AppConfig;
use crate::observability::Logger;

/// HTTP server for the vidhub API
pub struct HttpServer {
    state: AppState,
    router: Router,
}

impl HttpServer {
    /// Create a server with freshly wired state
    pub fn new(config: AppConfig) -> Self {
        let state = AppState::new(config);
        Self::with_state(state)
    }

    /// Create a server over existing state (used by tests)
    pub fn with_state(state: AppState) -> Self {
        let router = Self::build_router(state.clone());
        Self { state, router }
    }

    /// Build the combined router with all endpoints and boundary layers
    fn build_router(state: AppState) -> Router {
        // Configure CORS from config; permissive when no origins are set
        let cors = if state.config.http.cors_origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            use tower_http::cors::AllowOrigin;
            let origins: Vec<_> = state
                .config
                .http
                .cors_origins
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        let api = Router::new()
            .merge(health_routes())
            .nest("/users", user_routes())
            .nest("/videos", video_routes())
            .nest("/tweets", tweet_routes())
            .nest("/comments", comment_routes())
            .nest("/likes", like_routes())
            .nest("/playlists", playlist_routes())
            .nest("/subscriptions", subscription_routes())
            .nest("/dashboard", dashboard_routes());

        Router::new()
            .nest("/api/v1", api)
            .layer(
                ServiceBuilder::new()
                    .layer(cors)
                    .layer(middleware::from_fn(layers::request_log))
                    .layer(CatchPanicLayer::custom(layers::handle_panic))
                    .layer(middleware::from_fn_with_state(
                        state.clone(),
                        layers::request_timeout,
                    ))
                    .layer(DefaultBodyLimit::max(state.config.http.max_body_bytes)),
            )
            .with_state(state)
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.state.config.http.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Start the HTTP server
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self.socket_addr().parse().map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("Invalid socket address: {e}"),
            )
        })?;

        let listener = TcpListener::bind(addr).await?;
        Logger::info("server_started", &[("addr", &addr.to_string())]);

        axum::serve(listener, self.router).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::config::HttpServerConfig;

    #[test]
    fn test_server_creation() {
        let server = HttpServer::new(AppConfig::default());
        assert_eq!(server.socket_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_server_with_custom_port() {
        let config = AppConfig {
            http: HttpServerConfig::with_port(3000),
            ..Default::default()
        };
        let server = HttpServer::new(config);
        assert_eq!(server.socket_addr(), "0.0.0.0:3000");
    }

    #[test]
    fn test_router_builds() {
        let server = HttpServer::new(AppConfig::default());
        let _router = server.router();
        // If we get here, router construction succeeded
    }
}
