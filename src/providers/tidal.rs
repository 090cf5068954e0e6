use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;

use crate::{
    Res, config,
    providers::{Candidate, ContainerIndex, FolderTable, Platform, Provider},
    success,
    track::CanonicalTrack,
    types::{
        TidalCollectionItem, TidalCreateResponse, TidalCredentials, TidalItems, TidalPlaylist,
        TidalSearchResponse, TidalTrack,
    },
};

/// Tidal web API provider. Uses the v1 catalog endpoints plus the v2
/// my-collection endpoints, which are the only ones that expose playlist
/// folders.
pub struct TidalProvider {
    client: Client,
    token: String,
    user_id: u64,
}

impl TidalProvider {
    /// Loads the stored OAuth session and rejects it if the token expired.
    pub async fn connect() -> Res<Self> {
        let path = config::credentials_path(Platform::Tidal);
        let raw = async_fs::read_to_string(&path)
            .await
            .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
        let creds: TidalCredentials = serde_json::from_str(&raw)?;

        if creds.expiry <= Utc::now() {
            return Err("stored Tidal session expired, please re-authenticate".into());
        }

        let client = Client::new();
        client
            .get(format!("{}/v1/sessions", config::tidal_apiurl()))
            .bearer_auth(&creds.access_token)
            .send()
            .await?
            .error_for_status()?;

        success!("Tidal: Successfully Authenticated");
        Ok(Self {
            client,
            token: creds.access_token,
            user_id: creds.user_id,
        })
    }

    fn canonical(track: &TidalTrack) -> CanonicalTrack {
        CanonicalTrack::new(
            track.album.title.clone(),
            track.title.clone(),
            track.artists.iter().map(|a| a.name.clone()).collect(),
        )
    }

    /// Query parameters every listen.tidal.com call wants.
    fn locale_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("countryCode", config::tidal_country()),
            ("locale", "en_US".to_string()),
            ("deviceType", "BROWSER".to_string()),
        ]
    }

    /// Lists one level of the v2 my-collection tree.
    async fn collection_items(&self, folder_id: &str) -> Res<Vec<TidalCollectionItem>> {
        let api_url = format!(
            "{}/v2/my-collection/playlists/folders",
            config::tidal_apiurl()
        );
        let mut params = self.locale_params();
        params.push(("folderId", folder_id.to_string()));

        let json = self
            .client
            .get(&api_url)
            .query(&params)
            .bearer_auth(&self.token)
            .send()
            .await?
            .error_for_status()?
            .json::<TidalItems<TidalCollectionItem>>()
            .await?;

        Ok(json.items)
    }
}

#[async_trait]
impl Provider for TidalProvider {
    fn platform(&self) -> Platform {
        Platform::Tidal
    }

    fn supports_folders(&self) -> bool {
        true
    }

    async fn list_playlists(&self) -> Res<ContainerIndex> {
        let mut index = ContainerIndex::new();

        // Flat user playlists first.
        let mut offset = 0;
        loop {
            let api_url = format!(
                "{}/v1/users/{}/playlists",
                config::tidal_apiurl(),
                self.user_id
            );
            let mut params = self.locale_params();
            params.push(("limit", "50".to_string()));
            params.push(("offset", offset.to_string()));

            let page = self
                .client
                .get(&api_url)
                .query(&params)
                .bearer_auth(&self.token)
                .send()
                .await?
                .error_for_status()?
                .json::<TidalItems<TidalPlaylist>>()
                .await?;

            let fetched = page.items.len();
            for playlist in page.items {
                index.insert(playlist.title, playlist.uuid);
            }
            if fetched < 50 {
                break;
            }
            offset += 50;
        }

        // Folder contents get folder-qualified display names.
        for item in self.collection_items("root").await? {
            if item.item_type != "FOLDER" {
                continue;
            }
            let (Some(folder_id), Some(folder_name)) = (item.data.id, item.data.name) else {
                continue;
            };
            for child in self.collection_items(&folder_id).await? {
                if child.item_type != "PLAYLIST" {
                    continue;
                }
                if let (Some(uuid), Some(title)) = (child.data.uuid, child.data.title) {
                    index.insert(format!("{}/{}", folder_name, title), uuid);
                }
            }
        }

        Ok(index)
    }

    async fn list_folders(&self) -> Res<FolderTable> {
        let mut folders = FolderTable::new();
        for item in self.collection_items("root").await? {
            if item.item_type != "FOLDER" {
                continue;
            }
            if let (Some(id), Some(name)) = (item.data.id, item.data.name) {
                folders.insert(id, name);
            }
        }
        Ok(folders)
    }

    async fn playlist_tracks(&self, playlist_id: &str) -> Res<Vec<CanonicalTrack>> {
        let mut tracks = Vec::new();
        let mut offset = 0;
        loop {
            let api_url = format!(
                "{}/v1/playlists/{}/tracks",
                config::tidal_apiurl(),
                playlist_id
            );
            let mut params = self.locale_params();
            params.push(("limit", "100".to_string()));
            params.push(("offset", offset.to_string()));

            let page = self
                .client
                .get(&api_url)
                .query(&params)
                .bearer_auth(&self.token)
                .send()
                .await?
                .error_for_status()?
                .json::<TidalItems<TidalTrack>>()
                .await?;

            let fetched = page.items.len();
            tracks.extend(page.items.iter().map(Self::canonical));
            if fetched < 100 {
                break;
            }
            offset += 100;
        }

        Ok(tracks)
    }

    async fn search_catalog(&self, query: &str, limit: u32) -> Res<Vec<Candidate>> {
        let api_url = format!("{}/v1/search/top-hits", config::tidal_apiurl());
        let mut params = self.locale_params();
        params.push(("query", query.to_string()));
        params.push(("limit", limit.to_string()));
        params.push(("offset", "0".to_string()));
        params.push(("types", "TRACKS".to_string()));
        params.push(("includeContributors", "true".to_string()));

        let json = self
            .client
            .get(&api_url)
            .query(&params)
            .bearer_auth(&self.token)
            .send()
            .await?
            .error_for_status()?
            .json::<TidalSearchResponse>()
            .await?;

        Ok(json
            .tracks
            .items
            .iter()
            .map(|track| Candidate {
                id: track.id.to_string(),
                track: Self::canonical(track),
            })
            .collect())
    }

    async fn create_playlist(&self, name: &str, parent_folder: Option<&str>) -> Res<String> {
        let api_url = format!(
            "{}/v2/my-collection/playlists/folders/create-playlist",
            config::tidal_apiurl()
        );
        let mut params = self.locale_params();
        params.push(("name", name.to_string()));
        params.push(("description", "Tunesync playlist".to_string()));
        params.push(("folderId", parent_folder.unwrap_or("root").to_string()));

        let json = self
            .client
            .put(&api_url)
            .query(&params)
            .bearer_auth(&self.token)
            .send()
            .await?
            .error_for_status()?
            .json::<TidalCreateResponse>()
            .await?;

        json.data
            .uuid
            .ok_or_else(|| "create-playlist response carried no uuid".into())
    }

    async fn create_folder(&self, name: &str) -> Res<String> {
        let api_url = format!(
            "{}/v2/my-collection/playlists/folders/create-folder",
            config::tidal_apiurl()
        );
        let mut params = self.locale_params();
        params.push(("name", name.to_string()));
        params.push(("folderId", "root".to_string()));

        let json = self
            .client
            .put(&api_url)
            .query(&params)
            .bearer_auth(&self.token)
            .send()
            .await?
            .error_for_status()?
            .json::<TidalCreateResponse>()
            .await?;

        json.data
            .id
            .ok_or_else(|| "create-folder response carried no id".into())
    }

    async fn add_track(&self, playlist_id: &str, track_id: &str) -> Res<()> {
        // The items endpoint is etag-guarded; fetch the current revision first.
        let playlist_url = format!("{}/v1/playlists/{}", config::tidal_apiurl(), playlist_id);
        let response = self
            .client
            .get(&playlist_url)
            .query(&self.locale_params())
            .bearer_auth(&self.token)
            .send()
            .await?
            .error_for_status()?;

        let etag = response
            .headers()
            .get("etag")
            .and_then(|value| value.to_str().ok())
            .ok_or("playlist response carried no etag")?
            .to_string();

        let api_url = format!(
            "{}/v1/playlists/{}/items",
            config::tidal_apiurl(),
            playlist_id
        );
        self.client
            .post(&api_url)
            .query(&self.locale_params())
            .bearer_auth(&self.token)
            .header("if-none-match", etag)
            .form(&[
                ("onArtifactNotFound", "FAIL"),
                ("onDupes", "FAIL"),
                ("trackIds", track_id),
            ])
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }
}
