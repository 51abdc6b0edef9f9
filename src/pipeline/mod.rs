//! Pipeline entry points for watcher operations.
//!
//! - `detect_new` / `should_notify`: change detection and notification policy
//! - `run_watch`: one full fetch → extract → diff → notify → persist cycle

pub mod diff;
pub mod watch;

pub use diff::{detect_new, should_notify};
pub use watch::{WatchOptions, run_watch};
