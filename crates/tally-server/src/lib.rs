//! HTTP surface of the tally service.
//!
//! Routes and the in-memory store are deliberately thin; the part that
//! matters is the fault rendering at the edge (`render`), which turns every
//! fault escaping a handler into the uniform client-facing error payload.

mod employees;
mod health;
mod render;
mod store;
mod types;
mod welcome;
mod work_times;

pub use render::{FaultResponse, fault_response};
pub use store::Store;
pub use types::{Employee, EmployeeDraft, WorkTime};

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tally_config::Config;
use tower_http::trace::TraceLayer;

/// Assembled server with all routes and middleware
pub struct Server {
    router: Router,
    listen_address: SocketAddr,
}

impl Server {
    /// Build the server from configuration
    #[must_use]
    pub fn new(config: &Config) -> Self {
        let listen_address = config
            .server
            .listen_address
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 8080)));

        let store = Arc::new(Store::new());

        let mut app = Router::new();

        // Start page
        app = app.route("/", axum::routing::get(welcome::welcome_handler));

        // Health check
        if config.server.health.enabled {
            app = app.route(&config.server.health.path, axum::routing::get(health::health_handler));
        }

        // Resource routes
        app = app.merge(employees::router().with_state(Arc::clone(&store)));
        app = app.merge(work_times::router().with_state(store));

        // Tracing
        app = app.layer(TraceLayer::new_for_http());

        Self { router: app, listen_address }
    }

    /// Get the configured listen address
    #[must_use]
    pub const fn listen_address(&self) -> SocketAddr {
        self.listen_address
    }

    /// Consume the server and return the inner router
    ///
    /// Useful for testing when the caller manages the listener
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Start serving requests
    ///
    /// Blocks until the cancellation token is triggered.
    ///
    /// # Errors
    ///
    /// Returns an error if binding the TCP listener or serving fails
    pub async fn serve(self, shutdown: tokio_util::sync::CancellationToken) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.listen_address).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!(%local_addr, "server listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.cancelled().await;
                tracing::info!("graceful shutdown initiated");
            })
            .await?;

        Ok(())
    }
}
