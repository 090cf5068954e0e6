use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tabled::Tabled;

// --- Spotify ---

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifyCredentials {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub scope: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifyUser {
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifyPaging<T> {
    pub items: Vec<T>,
    pub next: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifyPlaylist {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifyPlaylistItem {
    pub track: Option<SpotifyTrack>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifySavedItem {
    pub track: SpotifyTrack,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifyTrack {
    pub id: Option<String>,
    pub name: String,
    pub album: SpotifyAlbumRef,
    pub artists: Vec<SpotifyArtistRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifyAlbumRef {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifyArtistRef {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifySearchResponse {
    pub tracks: SpotifyPaging<SpotifyTrack>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifyCreatePlaylistRequest {
    pub name: String,
    pub description: String,
    pub public: bool,
    pub collaborative: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifyCreatePlaylistResponse {
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifyAddTracksRequest {
    pub uris: Vec<String>,
}

// --- Tidal ---

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TidalCredentials {
    pub token_type: String,
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub user_id: u64,
    pub expiry: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TidalItems<T> {
    pub items: Vec<T>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TidalPlaylist {
    pub uuid: String,
    pub title: String,
}

// One entry of the v2 my-collection listing. Folders carry `id`/`name` in
// `data`, playlists carry `uuid`/`title`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TidalCollectionItem {
    #[serde(rename = "itemType")]
    pub item_type: String,
    pub data: TidalItemData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TidalItemData {
    pub id: Option<String>,
    pub name: Option<String>,
    pub uuid: Option<String>,
    pub title: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TidalTrack {
    pub id: u64,
    pub title: String,
    pub album: TidalAlbumRef,
    pub artists: Vec<TidalArtistRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TidalAlbumRef {
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TidalArtistRef {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TidalSearchResponse {
    pub tracks: TidalItems<TidalTrack>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TidalCreateResponse {
    pub data: TidalItemData,
}

// --- Apple Music ---

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppleCredentials {
    pub authorization: String,
    #[serde(rename = "media-user-token")]
    pub media_user_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplePage<T> {
    pub data: Vec<T>,
    pub meta: Option<AppleMeta>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppleMeta {
    pub total: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplePlaylistItem {
    pub id: String,
    pub attributes: Option<ApplePlaylistAttributes>,
    pub relationships: Option<AppleRelationships>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplePlaylistAttributes {
    pub name: String,
    #[serde(default)]
    pub folder: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppleRelationships {
    pub parent: Option<AppleParent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppleParent {
    pub data: Vec<AppleRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppleRef {
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppleSongItem {
    pub id: String,
    pub attributes: AppleSongAttributes,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppleSongAttributes {
    pub name: String,
    pub artist_name: String,
    #[serde(default)]
    pub album_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppleSearchResponse {
    pub results: AppleSearchResults,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppleSearchResults {
    #[serde(alias = "song")]
    pub songs: Option<ApplePage<AppleSongItem>>,
}

// --- YouTube Music ---
//
// InnerTube responses are navigated as serde_json::Value inside the provider;
// only the stored credentials have a fixed shape.

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YoutubeCredentials {
    pub cookie: String,
    pub authorization: String,
}

// --- CLI output ---

#[derive(Tabled)]
pub struct PlaylistTableRow {
    #[tabled(rename = "Playlist")]
    pub name: String,
}
