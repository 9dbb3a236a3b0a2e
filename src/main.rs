use std::net::{IpAddr, SocketAddr};

use clap::Parser;
use optiserve::{start_server, ServerConfig, SolverFactory};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Linear optimization over HTTP: POST a problem, get a solution.
#[derive(Debug, Parser)]
#[command(name = "optiserve-server", version, about)]
struct Cli {
    /// Address to bind
    #[arg(long, default_value = "127.0.0.1")]
    host: IpAddr,

    /// Port to listen on
    #[arg(long, default_value_t = 5000)]
    port: u16,

    /// CORS origin allowed to call the API; repeatable. Any origin is
    /// allowed when none are given.
    #[arg(long = "allow-origin", value_name = "ORIGIN")]
    allow_origins: Vec<String>,

    /// Solver backend: auto, microlp or highs
    #[arg(long, default_value = "auto")]
    solver: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let solver = SolverFactory::from_name(&cli.solver)?;
    let config = ServerConfig::new(SocketAddr::new(cli.host, cli.port), solver)
        .with_allowed_origins(cli.allow_origins);

    tokio::select! {
        result = start_server(config) => {
            if let Err(e) = result {
                error!(error = %e, "server failed");
                return Err(e);
            }
        }
        _ = signal::ctrl_c() => {
            info!("shutdown signal received");
        }
    }

    Ok(())
}
