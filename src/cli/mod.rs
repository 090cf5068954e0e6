//! # CLI Module
//!
//! User-facing command implementations. Each command wires the provider layer
//! into the reconciliation pipeline and handles feedback, progress output and
//! the exit-code contract: precondition violations (same source and
//! destination, a named playlist missing at the source, an unreadable
//! playlist-name file, failed authentication) terminate with exit code 1;
//! a completed run exits 0 even when some tracks could not be transferred.

mod playlists;
mod sync;

pub use playlists::playlists;
pub use sync::{sync_all, sync_file, sync_playlist};
