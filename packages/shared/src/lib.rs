//! Utilities shared by the Kairan server and the terminal watcher.

pub mod logger;
pub mod time;
