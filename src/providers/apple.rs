use async_trait::async_trait;
use reqwest::{
    Client, StatusCode,
    header::{HeaderMap, HeaderValue},
};
use serde_json::json;

use crate::{
    Res, config,
    providers::{Candidate, ContainerIndex, FolderTable, Platform, Provider},
    success,
    track::CanonicalTrack,
    types::{
        AppleCredentials, ApplePage, ApplePlaylistItem, AppleRef, AppleSearchResponse,
        AppleSongItem,
    },
};

/// Root of the Apple Music library playlist tree; playlists parented there
/// are not inside any user folder.
const APPLE_LIBRARY_ROOT: &str = "p.playlistsroot";

/// Apple Music provider driving the amp-api endpoints the web player uses.
/// Folders are library playlists with a `folder` attribute; membership comes
/// from the `parent` relationship.
pub struct AppleProvider {
    client: Client,
    headers: HeaderMap,
}

impl AppleProvider {
    /// Loads the stored web-player token pair and verifies it against the
    /// library songs endpoint.
    pub async fn connect() -> Res<Self> {
        let path = config::credentials_path(Platform::Apple);
        let raw = async_fs::read_to_string(&path)
            .await
            .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
        let creds: AppleCredentials = serde_json::from_str(&raw)?;

        let mut headers = HeaderMap::new();
        headers.insert("Authorization", HeaderValue::from_str(&creds.authorization)?);
        headers.insert(
            "Media-User-Token",
            HeaderValue::from_str(&creds.media_user_token)?,
        );
        headers.insert("Origin", HeaderValue::from_static("https://music.apple.com"));
        headers.insert(
            "Referer",
            HeaderValue::from_static("https://music.apple.com/"),
        );

        let client = Client::new();
        client
            .get(format!(
                "{}/v1/me/library/songs?limit=1&platform=web",
                config::apple_apiurl()
            ))
            .headers(headers.clone())
            .send()
            .await?
            .error_for_status()?;

        success!("Apple: Successfully Authenticated");
        Ok(Self { client, headers })
    }

    fn canonical(song: &AppleSongItem) -> CanonicalTrack {
        CanonicalTrack::new(
            song.attributes.album_name.clone(),
            song.attributes.name.clone(),
            vec![song.attributes.artist_name.clone()],
        )
    }

    async fn library_playlists(&self) -> Res<Vec<ApplePlaylistItem>> {
        let api_url = format!(
            "{}/v1/me/library/playlists?include=parent",
            config::apple_apiurl()
        );
        let json = self
            .client
            .get(&api_url)
            .headers(self.headers.clone())
            .send()
            .await?
            .error_for_status()?
            .json::<ApplePage<ApplePlaylistItem>>()
            .await?;
        Ok(json.data)
    }

    fn parent_id(item: &ApplePlaylistItem) -> Option<String> {
        let parent = item.relationships.as_ref()?.parent.as_ref()?;
        let id = &parent.data.first()?.id;
        if id == APPLE_LIBRARY_ROOT {
            None
        } else {
            Some(id.clone())
        }
    }

    async fn folder_name(&self, folder_id: &str) -> Res<Option<String>> {
        let api_url = format!(
            "{}/v1/me/library/playlists/{}",
            config::apple_apiurl(),
            folder_id
        );
        let json = self
            .client
            .get(&api_url)
            .headers(self.headers.clone())
            .send()
            .await?
            .error_for_status()?
            .json::<ApplePage<ApplePlaylistItem>>()
            .await?;

        Ok(json
            .data
            .first()
            .and_then(|item| item.attributes.as_ref())
            .map(|attrs| attrs.name.clone()))
    }

    /// Resolves the folder table for a set of library playlists: every parent
    /// id referenced by a non-folder playlist, mapped to its display name.
    async fn folders_of(&self, playlists: &[ApplePlaylistItem]) -> Res<FolderTable> {
        let mut folders = FolderTable::new();
        for item in playlists {
            if item.attributes.as_ref().is_some_and(|attrs| attrs.folder) {
                continue;
            }
            let Some(parent) = Self::parent_id(item) else {
                continue;
            };
            if folders.contains_key(&parent) {
                continue;
            }
            if let Some(name) = self.folder_name(&parent).await? {
                folders.insert(parent, name);
            }
        }
        Ok(folders)
    }
}

#[async_trait]
impl Provider for AppleProvider {
    fn platform(&self) -> Platform {
        Platform::Apple
    }

    fn supports_folders(&self) -> bool {
        true
    }

    async fn list_playlists(&self) -> Res<ContainerIndex> {
        let playlists = self.library_playlists().await?;
        let folders = self.folders_of(&playlists).await?;

        let mut index = ContainerIndex::new();
        for item in &playlists {
            let Some(attrs) = item.attributes.as_ref() else {
                continue;
            };
            if attrs.folder {
                continue;
            }
            let name = match Self::parent_id(item).and_then(|id| folders.get(&id).cloned()) {
                Some(folder_name) => format!("{}/{}", folder_name, attrs.name),
                None => attrs.name.clone(),
            };
            index.insert(name, item.id.clone());
        }
        Ok(index)
    }

    async fn list_folders(&self) -> Res<FolderTable> {
        let playlists = self.library_playlists().await?;
        self.folders_of(&playlists).await
    }

    async fn playlist_tracks(&self, playlist_id: &str) -> Res<Vec<CanonicalTrack>> {
        let api_url = format!(
            "{}/v1/me/library/playlists/{}/tracks?l=en-GB",
            config::apple_apiurl(),
            playlist_id
        );

        let response = self
            .client
            .get(&api_url)
            .headers(self.headers.clone())
            .send()
            .await?;
        // A playlist with no tracks yet answers 404 rather than an empty page.
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(Vec::new());
        }
        let first = response
            .error_for_status()?
            .json::<ApplePage<AppleSongItem>>()
            .await?;

        let total = first.meta.as_ref().map(|meta| meta.total).unwrap_or(0);
        let mut tracks: Vec<CanonicalTrack> = first.data.iter().map(Self::canonical).collect();

        let mut offset = 100;
        while (offset as u64) < total {
            let page = self
                .client
                .get(format!("{}&offset={}", api_url, offset))
                .headers(self.headers.clone())
                .send()
                .await?
                .error_for_status()?
                .json::<ApplePage<AppleSongItem>>()
                .await?;
            tracks.extend(page.data.iter().map(Self::canonical));
            offset += 100;
        }

        Ok(tracks)
    }

    async fn search_catalog(&self, query: &str, limit: u32) -> Res<Vec<Candidate>> {
        let api_url = format!(
            "{}/v1/catalog/{}/search",
            config::apple_apiurl(),
            config::apple_storefront()
        );

        let json = self
            .client
            .get(&api_url)
            .query(&[
                ("term", query),
                ("types", "songs"),
                ("limit", &limit.to_string()),
                ("platform", "web"),
            ])
            .headers(self.headers.clone())
            .send()
            .await?
            .error_for_status()?
            .json::<AppleSearchResponse>()
            .await?;

        let Some(songs) = json.results.songs else {
            return Ok(Vec::new());
        };

        Ok(songs
            .data
            .iter()
            .map(|song| Candidate {
                id: song.id.clone(),
                track: Self::canonical(song),
            })
            .collect())
    }

    async fn create_playlist(&self, name: &str, parent_folder: Option<&str>) -> Res<String> {
        let api_url = format!("{}/v1/me/library/playlists", config::apple_apiurl());
        let mut body = json!({ "attributes": { "name": name } });
        if let Some(folder_id) = parent_folder {
            body["relationships"] = json!({
                "parent": {
                    "data": [{ "id": folder_id, "type": "library-playlist-folders" }]
                }
            });
        }

        let json = self
            .client
            .post(&api_url)
            .headers(self.headers.clone())
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json::<ApplePage<AppleRef>>()
            .await?;

        json.data
            .first()
            .map(|item| item.id.clone())
            .ok_or_else(|| "create playlist response carried no id".into())
    }

    async fn create_folder(&self, name: &str) -> Res<String> {
        let api_url = format!("{}/v1/me/library/playlists", config::apple_apiurl());
        let body = json!({ "attributes": { "name": name, "folder": true } });

        let json = self
            .client
            .post(&api_url)
            .headers(self.headers.clone())
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json::<ApplePage<AppleRef>>()
            .await?;

        json.data
            .first()
            .map(|item| item.id.clone())
            .ok_or_else(|| "create folder response carried no id".into())
    }

    async fn add_track(&self, playlist_id: &str, track_id: &str) -> Res<()> {
        let api_url = format!(
            "{}/v1/me/library/playlists/{}/tracks",
            config::apple_apiurl(),
            playlist_id
        );
        let body = json!({ "data": [{ "id": track_id, "type": "songs" }] });

        self.client
            .post(&api_url)
            .headers(self.headers.clone())
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }
}
