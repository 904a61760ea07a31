//! Terminal watcher for the live survey.
//!
//! Connects to the survey server's WebSocket endpoint and prints every survey
//! snapshot and presence update it receives.
//! Automatically reconnects on disconnection (max 5 attempts with 5 second interval).
//!
//! Run with:
//! ```not_rust
//! cargo run --bin kairan-client
//! cargo run --bin kairan-client -- --url ws://127.0.0.1:3000/ws
//! ```

use clap::Parser;

use kairan_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "kairan-client")]
#[command(about = "Terminal watcher for the live survey", long_about = None)]
struct Args {
    /// WebSocket server URL
    #[arg(short = 'u', long, env = "KAIRAN_URL", default_value = "ws://127.0.0.1:8080/ws")]
    url: String,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_PKG_NAME"), env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    // Run the watcher
    if let Err(e) = kairan_client::run_client(args.url).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
