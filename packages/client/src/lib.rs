//! Terminal watcher for the live survey.
//!
//! Subscribes to `/ws`, decodes every frame and prints the survey and the
//! number of connected clients, reconnecting when the connection drops.

pub mod error;
mod formatter;
mod runner;
mod session;

pub use formatter::SurveyFormatter;
pub use runner::run_client;
pub use session::{render_frame, run_client_session};
