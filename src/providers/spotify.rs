use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tokio::time::sleep;

use crate::{
    Res, config,
    providers::{Candidate, ContainerIndex, Platform, Provider},
    success,
    track::CanonicalTrack,
    types::{
        SpotifyAddTracksRequest, SpotifyCreatePlaylistRequest, SpotifyCreatePlaylistResponse,
        SpotifyCredentials, SpotifyPaging, SpotifyPlaylist, SpotifyPlaylistItem, SpotifySavedItem,
        SpotifySearchResponse, SpotifyTrack, SpotifyUser,
    },
    warning,
};

/// Spotify Web API provider. Playlists are flat; the liked-songs library acts
/// as a source-only pseudo-playlist.
pub struct SpotifyProvider {
    client: Client,
    token: String,
    user_id: String,
}

impl SpotifyProvider {
    /// Loads the stored OAuth token and verifies it against `/me`.
    pub async fn connect() -> Res<Self> {
        let path = config::credentials_path(Platform::Spotify);
        let raw = async_fs::read_to_string(&path)
            .await
            .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
        let creds: SpotifyCredentials = serde_json::from_str(&raw)?;

        let client = Client::new();
        let user = client
            .get(format!("{}/me", config::spotify_apiurl()))
            .bearer_auth(&creds.access_token)
            .send()
            .await?
            .error_for_status()?
            .json::<SpotifyUser>()
            .await?;

        success!("Spotify: Successfully Authenticated");
        Ok(Self {
            client,
            token: creds.access_token,
            user_id: user.id,
        })
    }

    fn canonical(track: &SpotifyTrack) -> CanonicalTrack {
        CanonicalTrack::new(
            track.album.name.clone(),
            track.name.clone(),
            track.artists.iter().map(|a| a.name.clone()).collect(),
        )
    }
}

#[async_trait]
impl Provider for SpotifyProvider {
    fn platform(&self) -> Platform {
        Platform::Spotify
    }

    fn likes_name(&self) -> Option<&'static str> {
        Some("Your Likes")
    }

    async fn list_playlists(&self) -> Res<ContainerIndex> {
        let mut index = ContainerIndex::new();
        let mut url = Some(format!("{}/me/playlists?limit=50", config::spotify_apiurl()));

        while let Some(api_url) = url {
            let page = self
                .client
                .get(&api_url)
                .bearer_auth(&self.token)
                .send()
                .await?
                .error_for_status()?
                .json::<SpotifyPaging<SpotifyPlaylist>>()
                .await?;

            for playlist in page.items {
                index.insert(playlist.name, playlist.id);
            }
            url = page.next;
        }

        Ok(index)
    }

    async fn playlist_tracks(&self, playlist_id: &str) -> Res<Vec<CanonicalTrack>> {
        let mut tracks = Vec::new();
        let mut url = Some(format!(
            "{}/playlists/{}/tracks?limit=100",
            config::spotify_apiurl(),
            playlist_id
        ));

        while let Some(api_url) = url {
            let page = self
                .client
                .get(&api_url)
                .bearer_auth(&self.token)
                .send()
                .await?
                .error_for_status()?
                .json::<SpotifyPaging<SpotifyPlaylistItem>>()
                .await?;

            // Local files come back without a track object; skip them.
            tracks.extend(
                page.items
                    .iter()
                    .filter_map(|item| item.track.as_ref())
                    .map(Self::canonical),
            );
            url = page.next;
        }

        Ok(tracks)
    }

    async fn liked_tracks(&self) -> Res<Vec<CanonicalTrack>> {
        let mut tracks = Vec::new();
        let mut url = Some(format!("{}/me/tracks?limit=50", config::spotify_apiurl()));

        while let Some(api_url) = url {
            let page = self
                .client
                .get(&api_url)
                .bearer_auth(&self.token)
                .send()
                .await?
                .error_for_status()?
                .json::<SpotifyPaging<SpotifySavedItem>>()
                .await?;

            tracks.extend(page.items.iter().map(|item| Self::canonical(&item.track)));
            url = page.next;
        }

        Ok(tracks)
    }

    async fn search_catalog(&self, query: &str, limit: u32) -> Res<Vec<Candidate>> {
        let api_url = format!("{}/search", config::spotify_apiurl());

        let response = loop {
            let response = self
                .client
                .get(&api_url)
                .query(&[
                    ("q", query),
                    ("type", "track"),
                    ("limit", &limit.to_string()),
                ])
                .bearer_auth(&self.token)
                .send()
                .await?;

            // check for retry-after header
            if response.status() == StatusCode::TOO_MANY_REQUESTS {
                if let Some(retry_after) = response.headers().get("retry-after") {
                    let retry_after = retry_after
                        .to_str()
                        .unwrap_or("0")
                        .parse::<u64>()
                        .unwrap_or(0);
                    if retry_after <= 120 {
                        sleep(Duration::from_secs(retry_after)).await;
                        continue;
                    }
                    warning!(
                        "Retry after has reached an abnormal high of {} seconds.",
                        retry_after
                    );
                }
            }

            break response;
        };

        let json = response
            .error_for_status()?
            .json::<SpotifySearchResponse>()
            .await?;

        Ok(json
            .tracks
            .items
            .iter()
            .filter_map(|track| {
                track.id.as_ref().map(|id| Candidate {
                    id: id.clone(),
                    track: Self::canonical(track),
                })
            })
            .collect())
    }

    async fn create_playlist(&self, name: &str, _parent_folder: Option<&str>) -> Res<String> {
        let api_url = format!(
            "{}/users/{}/playlists",
            config::spotify_apiurl(),
            self.user_id
        );
        let body = SpotifyCreatePlaylistRequest {
            name: name.to_string(),
            description: "Tunesync playlist".to_string(),
            public: false,
            collaborative: false,
        };

        let json = self
            .client
            .post(&api_url)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json::<SpotifyCreatePlaylistResponse>()
            .await?;

        Ok(json.id)
    }

    async fn add_track(&self, playlist_id: &str, track_id: &str) -> Res<()> {
        let api_url = format!(
            "{}/playlists/{}/tracks",
            config::spotify_apiurl(),
            playlist_id
        );
        let body = SpotifyAddTracksRequest {
            uris: vec![format!("spotify:track:{}", track_id)],
        };

        self.client
            .post(&api_url)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }
}
