//! Data Transfer Objects (DTOs).
//!
//! WebSocket traffic is binary (`domain::Frame`), so only the HTTP API has
//! DTOs:
//! - `http`: HTTP API response DTOs

pub mod http;
