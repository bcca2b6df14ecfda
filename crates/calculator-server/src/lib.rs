//! # Calculator Server
//!
//! Plain-text HTTP front end for the calculator.
//!
//! ## Endpoints
//!
//! - `GET /calc/{operation}/{op1}/{op2}` for `add`, `substract` (also
//!   `subtract`), `multiply`, `divide` and `power`
//! - `POST /calc` with a JSON body of typed operands
//! - `GET /` greeting and `GET /health`
//!
//! ## Usage
//!
//! ```ignore
//! use calculator_core::Calculator;
//! use calculator_server::{Server, ServerConfig};
//!
//! let server = Server::new(ServerConfig::default(), Calculator::new());
//! server.start().await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod handlers;
pub mod routes;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use calculator_core::Calculator;

pub use config::{ConfigError, ServerConfig};

/// The calculator server.
pub struct Server {
    config: ServerConfig,
    calculator: Calculator,
}

impl Server {
    /// Create a new server.
    pub fn new(config: ServerConfig, calculator: Calculator) -> Self {
        Self { config, calculator }
    }

    /// Build the router.
    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        routes::create_router(self.calculator)
            .layer(TraceLayer::new_for_http())
            .layer(cors)
    }

    /// Start the server.
    pub async fn start(&self) -> Result<(), std::io::Error> {
        let addr = self.config.bind_address();
        let listener = TcpListener::bind(&addr).await?;

        info!("Starting calculator server on {}", listener.local_addr()?);

        axum::serve(listener, self.router()).await
    }
}
