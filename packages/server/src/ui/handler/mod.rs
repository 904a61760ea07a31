//! Request handlers.

mod http;
mod websocket;

pub use http::{get_survey_page, health_check, save_snapshot, update_survey};
pub use websocket::websocket_handler;
