//! Live survey server: binary survey codec, shared survey state and the
//! HTTP/WebSocket surface that keeps every connected page in sync.

pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
