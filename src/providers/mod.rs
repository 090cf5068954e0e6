//! # Platform Providers
//!
//! This module defines the capability interface the reconciliation pipeline
//! consumes, plus one implementation per supported streaming platform. The
//! pipeline itself never branches on a platform name: a source provider and a
//! destination provider are selected once at startup and passed by reference
//! through container resolution and the transfer loop, so platform quirks
//! (folder support, query encoding, pagination shapes) stay behind this
//! boundary.
//!
//! ## Capability Surface
//!
//! Each provider exposes:
//! - `list_playlists` - display name → native container id, folder-qualified
//!   (`"Folder/Name"`) where the platform nests playlists
//! - `list_folders` - native folder id → folder name (empty where unsupported)
//! - `playlist_tracks` - ordered canonical tracks of one container
//! - `liked_tracks` - the favorites pseudo-playlist, where one exists
//! - `search_catalog` - ranked candidate tracks for a text query
//! - `create_playlist` / `create_folder` - container creation, optionally
//!   attached to a parent folder
//! - `add_track` - append one track to a container
//!
//! ## Implementations
//!
//! - [`spotify`] - Spotify Web API (bearer token); no folder concept
//! - [`tidal`] - Tidal web API, v1 catalog endpoints plus the v2
//!   my-collection endpoints that expose playlist folders
//! - [`apple`] - Apple Music amp-api with the web-player cookie pair;
//!   folders are modeled as parent playlists
//! - [`youtube`] - YouTube Music InnerTube endpoints; no folder concept
//!
//! Every call may fail; failures surface as boxed errors that the transfer
//! loop converts into not-found entries or a partial-result abort. Nothing in
//! this module decides recovery policy.

use std::collections::HashMap;

use async_trait::async_trait;
use clap::ValueEnum;

use crate::{Res, track::CanonicalTrack};

pub mod apple;
pub mod spotify;
pub mod tidal;
pub mod youtube;

/// Mapping from display name (folder-qualified where applicable) to
/// provider-native container id. Built fresh per run; name collisions resolve
/// last-write-wins.
pub type ContainerIndex = HashMap<String, String>;

/// Mapping from provider-native folder id to folder display name. Empty for
/// platforms without a folder concept.
pub type FolderTable = HashMap<String, String>;

/// The four supported streaming platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Platform {
    Spotify,
    Tidal,
    Apple,
    Youtube,
}

impl Platform {
    /// Lowercase identifier used in report keys and credential file names.
    pub fn slug(&self) -> &'static str {
        match self {
            Platform::Spotify => "spotify",
            Platform::Tidal => "tidal",
            Platform::Apple => "apple",
            Platform::Youtube => "youtube",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Platform::Spotify => "Spotify",
            Platform::Tidal => "Tidal",
            Platform::Apple => "Apple Music",
            Platform::Youtube => "YouTube Music",
        };
        write!(f, "{}", name)
    }
}

/// One ranked search result from a destination catalog.
#[derive(Debug, Clone)]
pub struct Candidate {
    /// Provider-native track id, as accepted by `add_track`.
    pub id: String,
    pub track: CanonicalTrack,
}

/// The black-box capability interface one platform exposes to the pipeline.
#[async_trait]
pub trait Provider: Send + Sync {
    fn platform(&self) -> Platform;

    /// Whether the platform can nest playlists inside folders.
    fn supports_folders(&self) -> bool {
        false
    }

    /// Display name of the source-only favorites pseudo-playlist, if the
    /// platform exposes one.
    fn likes_name(&self) -> Option<&'static str> {
        None
    }

    async fn list_playlists(&self) -> Res<ContainerIndex>;

    async fn list_folders(&self) -> Res<FolderTable> {
        Ok(FolderTable::new())
    }

    async fn playlist_tracks(&self, playlist_id: &str) -> Res<Vec<CanonicalTrack>>;

    async fn liked_tracks(&self) -> Res<Vec<CanonicalTrack>> {
        Err(format!("{} does not expose liked tracks", self.platform()).into())
    }

    async fn search_catalog(&self, query: &str, limit: u32) -> Res<Vec<Candidate>>;

    /// Creates a playlist, optionally inside an existing folder. Returns the
    /// new container id. Providers without folder support ignore the parent.
    async fn create_playlist(&self, name: &str, parent_folder: Option<&str>) -> Res<String>;

    async fn create_folder(&self, name: &str) -> Res<String> {
        let _ = name;
        Err(format!("{} does not support playlist folders", self.platform()).into())
    }

    async fn add_track(&self, playlist_id: &str, track_id: &str) -> Res<()>;
}

/// Authenticates against one platform from its stored credentials and returns
/// the provider behind the capability interface.
pub async fn connect(platform: Platform) -> Res<Box<dyn Provider>> {
    let provider: Box<dyn Provider> = match platform {
        Platform::Spotify => Box::new(spotify::SpotifyProvider::connect().await?),
        Platform::Tidal => Box::new(tidal::TidalProvider::connect().await?),
        Platform::Apple => Box::new(apple::AppleProvider::connect().await?),
        Platform::Youtube => Box::new(youtube::YoutubeProvider::connect().await?),
    };
    Ok(provider)
}
