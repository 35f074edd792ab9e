//! Web layer
//!
//! HTTP interface for the RSS proxy: a thin handler over the service layer,
//! a health endpoint, and the error-to-response mapping. Handlers hold no
//! business logic; everything interesting happens in
//! [`crate::services::FeedFilterService`].

use anyhow::Result;
use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::Config;
use crate::services::FeedFilterService;

pub mod handlers;
pub mod responses;

pub use responses::ErrorBody;

/// Web server configuration and setup
pub struct WebServer {
    app: Router,
    addr: SocketAddr,
}

impl WebServer {
    pub fn new(config: &Config, service: Arc<FeedFilterService>) -> Result<Self> {
        let app = Self::create_router(AppState { service });
        let addr: SocketAddr = format!("{}:{}", config.web.host, config.web.port).parse()?;

        Ok(Self { app, addr })
    }

    /// Create the router with all routes and middleware
    pub fn create_router(state: AppState) -> Router {
        Router::new()
            .route("/rss", get(handlers::filtered_feed))
            .route("/health", get(handlers::health))
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            .with_state(state)
    }

    /// Start the web server
    pub async fn serve(self) -> Result<()> {
        let listener = tokio::net::TcpListener::bind(&self.addr).await?;
        axum::serve(listener, self.app).await?;
        Ok(())
    }

    /// Get the host address
    pub fn host(&self) -> String {
        self.addr.ip().to_string()
    }

    /// Get the port number
    pub fn port(&self) -> u16 {
        self.addr.port()
    }
}

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<FeedFilterService>,
}
