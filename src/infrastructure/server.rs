// Infrastructure: server setup and configuration.
// The server is constructed once at startup from explicit parameters;
// there is no process-global application state.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::{header::InvalidHeaderValue, HeaderValue};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::application::rest_service;
use crate::domain::solver_service::SolverService;

pub struct ServerConfig {
    pub address: SocketAddr,
    /// Origins allowed to call the API from a browser. Empty means any
    /// origin, matching the original allow-all deployment.
    pub allowed_origins: Vec<String>,
    pub solver: Arc<dyn SolverService>,
}

impl ServerConfig {
    pub fn new(address: SocketAddr, solver: Arc<dyn SolverService>) -> Self {
        Self {
            address,
            allowed_origins: Vec::new(),
            solver,
        }
    }

    pub fn with_allowed_origins(mut self, origins: Vec<String>) -> Self {
        self.allowed_origins = origins;
        self
    }
}

pub async fn start_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let cors = cors_layer(&config.allowed_origins)?;
    let app = rest_service::router(Arc::clone(&config.solver))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    print_banner(&config.address, config.solver.name());

    let listener = tokio::net::TcpListener::bind(config.address).await?;
    info!(address = %config.address, solver = config.solver.name(), "listening");
    axum::serve(listener, app).await?;

    Ok(())
}

fn cors_layer(allowed_origins: &[String]) -> Result<CorsLayer, InvalidHeaderValue> {
    if allowed_origins.is_empty() {
        return Ok(CorsLayer::permissive());
    }
    let origins = allowed_origins
        .iter()
        .map(|origin| origin.parse::<HeaderValue>())
        .collect::<Result<Vec<_>, _>>()?;
    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any))
}

fn print_banner(address: &SocketAddr, solver_name: &str) {
    println!();
    println!("╔══════════════════════════════════════════════════╗");
    println!("║  optiserve - linear optimization over HTTP       ║");
    println!("╠══════════════════════════════════════════════════╣");
    println!("║  Solver:    {:36} ║", solver_name);
    println!("║  Address:   {:36} ║", address);
    println!("║  Endpoints: POST /optimize   GET /solvers        ║");
    println!("╚══════════════════════════════════════════════════╝");
    println!();
}
