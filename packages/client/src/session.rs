//! WebSocket watcher session.

use futures_util::StreamExt;
use kairan_server::domain::{Frame, Survey};
use kairan_shared::time::now_millis;
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message};

use crate::{error::ClientError, formatter::SurveyFormatter};

/// Decode one binary frame and render it for the terminal
pub fn render_frame(data: &[u8], received_at: i64) -> Result<String, ClientError> {
    match Frame::decode(data)? {
        Frame::SurveyUpdate(encoded) => {
            let survey = Survey::decode(&encoded)?;
            Ok(SurveyFormatter::format_survey(&survey, received_at))
        }
        Frame::Presence(count) => Ok(SurveyFormatter::format_presence(count, received_at)),
    }
}

/// Run one watcher session
///
/// Returns `Ok(())` when the user interrupts the session and an error when
/// the connection fails or drops, so the caller can reconnect.
pub async fn run_client_session(url: &str) -> Result<(), ClientError> {
    let (ws_stream, _response) = connect_async(url).await?;
    tracing::info!("Connected to survey server!");
    println!("\nWatching the live survey. Press Ctrl+C to exit.\n");

    let (_write, mut read) = ws_stream.split();

    let read_loop = async {
        while let Some(message) = read.next().await {
            match message {
                Ok(Message::Binary(data)) => match render_frame(&data, now_millis()) {
                    Ok(formatted) => print!("{}", formatted),
                    Err(e) => tracing::warn!("Skipping frame ({} bytes): {}", data.len(), e),
                },
                Ok(Message::Close(_)) => {
                    tracing::info!("Server closed the connection");
                    break;
                }
                Err(e) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    break;
                }
                _ => {}
            }
        }
        ClientError::ConnectionLost
    };

    tokio::select! {
        e = read_loop => Err(e),
        _ = kairan_server::ui::shutdown_signal() => Ok(()),
    }
}
