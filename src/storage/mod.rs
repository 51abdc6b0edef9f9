//! Storage abstraction for the persisted watch state.
//!
//! ## Storage Layout
//!
//! ```text
//! {root}/
//! ├── config.toml           # Watcher configuration
//! └── state.json            # Seen fixture ids
//! ```

pub mod local;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::WatchState;

// Re-export for convenience
pub use local::LocalStorage;

/// Trait for watch-state storage backends.
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Load the persisted state.
    ///
    /// A missing state file is not an error; it yields the empty state.
    async fn load(&self) -> Result<WatchState>;

    /// Persist the state, replacing any previous version.
    async fn save(&self, state: &WatchState) -> Result<()>;
}
