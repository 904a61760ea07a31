//! Server execution logic.

use std::{future::Future, sync::Arc, time::Duration};

use axum::{
    Router,
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

use crate::usecase::{
    ConnectClientUseCase, DisconnectClientUseCase, GetSurveyPageUseCase, SnapshotSurveyUseCase,
    UpdateSurveyUseCase,
};

use super::{
    handler::{get_survey_page, health_check, save_snapshot, update_survey, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// Largest accepted request body.
pub const MAX_BODY_BYTES: usize = 128 * 1024;

/// Runtime switches of the server
#[derive(Debug, Clone, Copy)]
pub struct ServerOptions {
    /// Advertise `wss` on the survey page
    pub tls: bool,
    /// How often a connection checks it is still registered
    pub liveness_interval: Duration,
    /// Save a snapshot after the listener stops
    pub snapshot_on_shutdown: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            tls: false,
            liveness_interval: Duration::from_secs(1),
            snapshot_on_shutdown: true,
        }
    }
}

/// Live survey server
///
/// # Example
///
/// ```ignore
/// let server = Server::new(
///     connect_client_usecase,
///     disconnect_client_usecase,
///     update_survey_usecase,
///     get_survey_page_usecase,
///     snapshot_survey_usecase,
///     ServerOptions::default(),
/// );
/// server.run("127.0.0.1".to_string(), 8080).await?;
/// ```
pub struct Server {
    app_state: Arc<AppState>,
    snapshot_on_shutdown: bool,
}

impl Server {
    /// Create a new Server instance
    pub fn new(
        connect_client_usecase: Arc<ConnectClientUseCase>,
        disconnect_client_usecase: Arc<DisconnectClientUseCase>,
        update_survey_usecase: Arc<UpdateSurveyUseCase>,
        get_survey_page_usecase: Arc<GetSurveyPageUseCase>,
        snapshot_survey_usecase: Arc<SnapshotSurveyUseCase>,
        options: ServerOptions,
    ) -> Self {
        let app_state = Arc::new(AppState {
            connect_client_usecase,
            disconnect_client_usecase,
            update_survey_usecase,
            get_survey_page_usecase,
            snapshot_survey_usecase,
            tls: options.tls,
            liveness_interval: options.liveness_interval,
        });

        Self {
            app_state,
            snapshot_on_shutdown: options.snapshot_on_shutdown,
        }
    }

    /// Build the router with all endpoints and middleware layers.
    pub fn router(&self) -> Router {
        Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/", get(get_survey_page))
            .route("/update", post(update_survey))
            .route("/admin/snapshot", post(save_snapshot))
            .route("/api/health", get(health_check))
            .with_state(self.app_state.clone())
            .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server until Ctrl+C or SIGTERM
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 8080)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(
        self,
        host: String,
        port: u16,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr).await?;

        tracing::info!("Survey server listening on {}", listener.local_addr()?);
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        self.serve(listener, shutdown_signal()).await
    }

    /// Serve on an already bound listener until `shutdown` resolves
    ///
    /// Saves a snapshot afterwards when enabled. A failed save is logged and
    /// does not turn a clean shutdown into an error.
    pub async fn serve<F>(
        self,
        listener: TcpListener,
        shutdown: F,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let app = self.router();
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        if self.snapshot_on_shutdown {
            match self.app_state.snapshot_survey_usecase.execute().await {
                Ok(saved) => tracing::info!("Saved survey snapshot ({} bytes)", saved.bytes),
                Err(e) => tracing::error!("Failed to save survey snapshot on shutdown: {}", e),
            }
        }

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
