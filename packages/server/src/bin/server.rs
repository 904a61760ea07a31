//! Live survey server.
//!
//! Loads the survey definition, restores the last saved answers and serves
//! the survey page, `/update` and the `/ws` broadcast.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin kairan-server
//! cargo run --bin kairan-server -- --host 0.0.0.0 --port 3000 --state-file survey.state
//! ```

use std::{path::PathBuf, sync::Arc, time::Duration};

use clap::Parser;
use kairan_server::{
    domain::{SurveyState, SurveyStore},
    infrastructure::{
        broadcast::{DEFAULT_QUEUE_CAPACITY, QueuedBroadcaster},
        definition::load_definition,
        message_pusher::WebSocketMessagePusher,
        repository::{FileSurveyStore, InMemorySurveyStore},
    },
    ui::{Server, ServerOptions},
    usecase::{
        ConnectClientUseCase, DisconnectClientUseCase, GetSurveyPageUseCase, Restored,
        RestoreSurveyUseCase, SnapshotSurveyUseCase, UpdateSurveyUseCase,
    },
};
use kairan_shared::{logger::setup_logger, time::SystemClock};

#[derive(Parser, Debug)]
#[command(name = "kairan-server")]
#[command(about = "Live survey server with WebSocket broadcast", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "KAIRAN_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "KAIRAN_PORT", default_value = "8080")]
    port: u16,

    /// Survey definition (TOML)
    #[arg(short = 'd', long, env = "KAIRAN_DEFINITION", default_value = "survey.toml")]
    definition: PathBuf,

    /// File the survey answers are saved to; answers are kept in memory only when omitted
    #[arg(short = 's', long, env = "KAIRAN_STATE_FILE")]
    state_file: Option<PathBuf>,

    /// Capacity of each broadcast queue
    #[arg(long, env = "KAIRAN_QUEUE_CAPACITY", default_value_t = DEFAULT_QUEUE_CAPACITY)]
    queue_capacity: usize,

    /// Interval of the per-connection liveness check in milliseconds
    #[arg(long, env = "KAIRAN_LIVENESS_INTERVAL_MS", default_value = "1000")]
    liveness_interval_ms: u64,

    /// Advertise wss:// on the survey page (TLS terminated in front of the server)
    #[arg(long, env = "KAIRAN_TLS")]
    tls: bool,

    /// Do not save a snapshot when shutting down
    #[arg(long, env = "KAIRAN_NO_SNAPSHOT_ON_SHUTDOWN")]
    no_snapshot_on_shutdown: bool,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_PKG_NAME"), env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    // Initialize dependencies in order:
    // 1. Survey state (definition + saved answers)
    // 2. MessagePusher and broadcast queues
    // 3. UseCases
    // 4. Server

    // 1. Load the definition and restore saved answers
    let survey = match load_definition(&args.definition) {
        Ok(survey) => survey,
        Err(e) => {
            tracing::error!("{} ({})", e, args.definition.display());
            std::process::exit(1);
        }
    };
    tracing::info!(
        "Loaded survey version {} with {} question(s) from {}",
        survey.version,
        survey.len(),
        args.definition.display()
    );
    let state = Arc::new(SurveyState::new(survey));

    let store: Arc<dyn SurveyStore> = match &args.state_file {
        Some(path) => {
            let store = FileSurveyStore::new(path.clone());
            tracing::info!("Answers are saved to {}", store.path().display());
            Arc::new(store)
        }
        None => {
            tracing::info!("No state file configured; answers are kept in memory only");
            Arc::new(InMemorySurveyStore::default())
        }
    };
    match RestoreSurveyUseCase::new(state.clone(), store.clone())
        .execute()
        .await
    {
        Ok(Restored::NothingSaved) => tracing::info!("No saved answers to restore"),
        Ok(Restored::Merged(outcome)) => tracing::info!(
            "Restored saved answers ({} applied, {} ignored)",
            outcome.applied.len(),
            outcome.unknown.len() + outcome.mismatched.len()
        ),
        Err(e) => tracing::error!("Failed to restore saved answers, starting fresh: {}", e),
    }

    // 2. Create MessagePusher (WebSocket implementation) and the broadcast queues
    let message_pusher = Arc::new(WebSocketMessagePusher::default());
    let (broadcaster, fan_out_workers) =
        QueuedBroadcaster::spawn(message_pusher.clone(), args.queue_capacity);
    let broadcaster = Arc::new(broadcaster);

    // 3. Create UseCases
    let connect_client_usecase = Arc::new(ConnectClientUseCase::new(
        state.clone(),
        message_pusher.clone(),
        broadcaster.clone(),
    ));
    let disconnect_client_usecase = Arc::new(DisconnectClientUseCase::new(
        message_pusher.clone(),
        broadcaster.clone(),
    ));
    let update_survey_usecase = Arc::new(UpdateSurveyUseCase::new(state.clone(), broadcaster));
    let get_survey_page_usecase = Arc::new(GetSurveyPageUseCase::new(state.clone()));
    let snapshot_survey_usecase =
        Arc::new(SnapshotSurveyUseCase::new(state, store, Arc::new(SystemClock)));

    // 4. Create and run the server
    let server = Server::new(
        connect_client_usecase,
        disconnect_client_usecase,
        update_survey_usecase,
        get_survey_page_usecase,
        snapshot_survey_usecase,
        ServerOptions {
            tls: args.tls,
            liveness_interval: Duration::from_millis(args.liveness_interval_ms.max(1)),
            snapshot_on_shutdown: !args.no_snapshot_on_shutdown,
        },
    );
    let result = server.run(args.host, args.port).await;
    fan_out_workers.shutdown().await;

    if let Err(e) = result {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
