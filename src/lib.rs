//! Tunesync Library
//!
//! This library implements a cross-platform playlist mover for Spotify, Tidal,
//! Apple Music and YouTube Music. It canonicalizes track metadata across the
//! four services, computes which tracks are missing at the destination, resolves
//! (or creates) the destination playlist, including folder structures on the
//! platforms that support them, and runs a rate-limited transfer loop that
//! fuzzy-matches catalog search results back to the source track.
//!
//! # Modules
//!
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `delta` - Set difference between source and destination contents
//! - `matching` - Fuzzy similarity check for search candidates
//! - `providers` - Platform capability trait and the four implementations
//! - `report` - Not-found accumulation and the end-of-run report
//! - `resolver` - Destination playlist/folder resolution
//! - `track` - Canonical track identities
//! - `transfer` - The per-playlist transfer loop
//! - `types` - Wire-level data structures for the platform APIs
//!
//! # Example
//!
//! ```
//! use tunesync::{config, cli};
//!
//! #[tokio::main]
//! async fn main() -> tunesync::Res<()> {
//!     config::load_env().await?;
//!     // Dispatch CLI commands...
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod delta;
pub mod matching;
pub mod providers;
pub mod report;
pub mod resolver;
pub mod track;
pub mod transfer;
pub mod types;

/// A convenient Result type alias for operations that may fail.
///
/// Provides a standard error handling pattern throughout the application
/// using a boxed dynamic error trait object. This allows for flexible
/// error handling while maintaining Send + Sync bounds for async contexts.
///
/// # Type Parameters
///
/// - `T` - The success type returned on successful operations
///
/// # Example
///
/// ```
/// use tunesync::Res;
///
/// async fn fetch_data() -> Res<String> {
///     Ok("data".to_string())
/// }
/// ```
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// Creates a formatted output line with a distinctive blue "o" indicator
/// followed by the provided message. Used for general information and
/// status updates throughout the application.
///
/// # Example
///
/// ```
/// info!("Playlist exists, adding missing songs");
/// info!("Found {} playlists", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// Creates a formatted output line with a green "✓" indicator to signify
/// successful completion of operations.
///
/// # Example
///
/// ```
/// success!("Successfully authenticated");
/// success!("Moved {} tracks", count);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Creates a formatted error output with a red "!" indicator and immediately
/// terminates the program with exit code 1. Used for unrecoverable errors:
/// authentication failures, identical source and destination platforms, a
/// named playlist that does not exist at the source, unreadable input files.
///
/// # Behavior
///
/// This macro will cause the program to exit immediately after printing
/// the error message. It should only be used for fatal errors where
/// recovery is not possible.
///
/// # Example
///
/// ```
/// error!("Authentication failed for {}", platform);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Creates a formatted output line with a yellow "!" indicator to highlight
/// potential issues that don't require program termination, such as a folder
/// attachment falling back to the root location or a playlist transfer that
/// aborted early with partial results.
///
/// # Example
///
/// ```
/// warning!("Folder operation failed, creating playlist in root: {}", e);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
