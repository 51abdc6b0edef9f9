// src/models/mod.rs

//! Domain models for the watcher application.

mod config;
mod fixture;
mod state;

// Re-export all public types
pub use config::{Config, HeuristicsConfig, MailDeliveryConfig, WatcherConfig};
pub use fixture::Fixture;
pub use state::WatchState;
