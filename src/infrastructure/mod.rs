// Infrastructure layer: server lifecycle and configuration

pub mod server;

pub use server::{start_server, ServerConfig};
