//! carstore-daemon - serve the car registry over HTTP.
//!
//! Loads the data file once, then serves the REST API until Ctrl+C.

use carstore_core::CarStore;
use carstore_http::SharedState;
use clap::Parser;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "carstore-daemon")]
#[command(about = "REST API over a file-backed car registry")]
#[command(version)]
struct Args {
    /// Address to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: IpAddr,

    /// Port to listen on
    #[arg(short, long, default_value_t = carstore_http::DEFAULT_PORT)]
    port: u16,

    /// JSON file the registry is loaded from and saved to
    #[arg(short, long, default_value = carstore_core::DEFAULT_DATA_FILE)]
    data_file: PathBuf,
}

impl Args {
    fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    log::info!("Received Ctrl+C");
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let store = match CarStore::open(&args.data_file) {
        Ok(store) => store,
        Err(e) => {
            log::error!("Error loading data: {}", e);
            std::process::exit(1);
        }
    };

    let state = Arc::new(SharedState::new(store));

    if let Err(e) = carstore_http::serve(args.addr(), state, shutdown_signal()).await {
        log::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_fixed_constants() {
        let args = Args::try_parse_from(["carstore-daemon"]).unwrap();

        assert_eq!(args.port, 8080);
        assert_eq!(args.data_file, PathBuf::from("data.json"));
        assert_eq!(args.addr(), "0.0.0.0:8080".parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn flags_override_defaults() {
        let args = Args::try_parse_from([
            "carstore-daemon",
            "--host",
            "127.0.0.1",
            "-p",
            "9000",
            "--data-file",
            "/tmp/cars.json",
        ])
        .unwrap();

        assert_eq!(args.addr(), "127.0.0.1:9000".parse::<SocketAddr>().unwrap());
        assert_eq!(args.data_file, PathBuf::from("/tmp/cars.json"));
    }

    #[test]
    fn rejects_invalid_port() {
        assert!(Args::try_parse_from(["carstore-daemon", "--port", "abc"]).is_err());
    }
}
