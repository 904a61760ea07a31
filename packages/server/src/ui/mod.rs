//! HTTP / WebSocket layer.

mod handler;
mod server;
mod signal;
pub mod state;

pub use server::{Server, ServerOptions};
pub use signal::shutdown_signal;
