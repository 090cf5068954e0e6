//! Configuration management for Tunesync.
//!
//! This module handles loading and accessing configuration values from
//! environment variables and an optional `.env` file in the local data
//! directory. API base URLs carry defaults pointing at the public endpoints of
//! the four platforms, so a plain installation works without any environment
//! setup; every value can still be overridden for testing against a different
//! host.
//!
//! Credential files are owned by the per-platform authentication collaborators
//! and live under the same data directory; this module only computes their
//! paths.

use std::{env, path::PathBuf};

use dotenv;

use crate::providers::Platform;

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the necessary directory structure if it doesn't exist and loads
/// environment variables from a `.env` file located in the platform-specific
/// local data directory under `tunesync/.env`. A missing `.env` file is not an
/// error; all settings have defaults.
///
/// # Directory Structure
///
/// The function looks for the `.env` file in:
/// - Linux: `~/.local/share/tunesync/.env`
/// - macOS: `~/Library/Application Support/tunesync/.env`
/// - Windows: `%LOCALAPPDATA%/tunesync/.env`
///
/// # Errors
///
/// Returns an error string if the parent directory cannot be created.
pub async fn load_env() -> Result<(), String> {
    let mut path = data_dir();
    path.push(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    // Optional override file; defaults cover a plain installation.
    let _ = dotenv::from_path(path);
    Ok(())
}

/// The application's local data directory (`<data_local_dir>/tunesync`).
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("tunesync");
    path
}

/// Path of the stored credential file for a platform.
///
/// Each platform's authentication flow persists its credentials here:
/// - Spotify: an OAuth token object
/// - Tidal: an OAuth token object with expiry
/// - Apple Music: the web-player `authorization` and `media-user-token` pair
/// - YouTube Music: the browser request headers (cookie + authorization)
pub fn credentials_path(platform: Platform) -> PathBuf {
    let mut path = data_dir();
    path.push(format!("{}_credentials.json", platform.slug()));
    path
}

/// Path of the append-only not-found report.
pub fn report_path() -> PathBuf {
    match env::var("TUNESYNC_REPORT_FILE") {
        Ok(p) => PathBuf::from(p),
        Err(_) => PathBuf::from("notfound.txt"),
    }
}

pub fn spotify_apiurl() -> String {
    env::var("TUNESYNC_SPOTIFY_API_URL")
        .unwrap_or_else(|_| "https://api.spotify.com/v1".to_string())
}

pub fn tidal_apiurl() -> String {
    env::var("TUNESYNC_TIDAL_API_URL").unwrap_or_else(|_| "https://listen.tidal.com".to_string())
}

/// Country code sent with every Tidal request.
pub fn tidal_country() -> String {
    env::var("TUNESYNC_TIDAL_COUNTRY").unwrap_or_else(|_| "US".to_string())
}

pub fn apple_apiurl() -> String {
    env::var("TUNESYNC_APPLE_API_URL")
        .unwrap_or_else(|_| "https://amp-api.music.apple.com".to_string())
}

/// Apple Music catalog storefront used for search queries.
pub fn apple_storefront() -> String {
    env::var("TUNESYNC_APPLE_STOREFRONT").unwrap_or_else(|_| "us".to_string())
}

pub fn youtube_apiurl() -> String {
    env::var("TUNESYNC_YOUTUBE_API_URL")
        .unwrap_or_else(|_| "https://music.youtube.com/youtubei/v1".to_string())
}
