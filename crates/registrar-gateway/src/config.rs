//! Gateway configuration.

use std::path::PathBuf;

use clap::Parser;

/// Registrar web view command line arguments.
#[derive(Debug, Parser)]
#[command(name = "registrar-gateway")]
#[command(about = "Read-only web view over a Registrar database")]
pub struct Args {
    /// Address to listen on for HTTP requests.
    #[arg(short, long, default_value = "127.0.0.1:5000")]
    pub listen: String,

    /// SQLite database written by `registrar export`.
    #[arg(short, long, default_value = "registrar.db")]
    pub db: PathBuf,
}

/// Gateway configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Address to listen on for HTTP requests.
    pub listen_addr: String,
    /// Path of the SQLite database.
    pub db_path: PathBuf,
}

impl GatewayConfig {
    /// Create a configuration serving the given database.
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
            ..Self::default()
        }
    }
}

impl From<&Args> for GatewayConfig {
    fn from(args: &Args) -> Self {
        Self {
            listen_addr: args.listen.clone(),
            db_path: args.db.clone(),
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:5000".to_string(),
            db_path: PathBuf::from("registrar.db"),
        }
    }
}
