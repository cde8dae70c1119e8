//! Infrastructure adapters for config, logging, and the system clipboard.

pub mod clipboard;
pub mod config;
pub mod logging;
