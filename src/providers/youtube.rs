use async_trait::async_trait;
use reqwest::{
    Client,
    header::{HeaderMap, HeaderValue},
};
use serde_json::{Value, json};

use crate::{
    Res, config,
    providers::{Candidate, ContainerIndex, Platform, Provider},
    success,
    track::CanonicalTrack,
    types::YoutubeCredentials,
};

/// Search filter restricting InnerTube results to songs.
const SONGS_FILTER_PARAMS: &str = "EgWKAQIIAWoKEAkQBRAKEAMQBA==";

/// YouTube Music provider over the InnerTube endpoints the web player uses.
/// Responses have no stable schema, so they are navigated as JSON values
/// rather than typed structs.
pub struct YoutubeProvider {
    client: Client,
    headers: HeaderMap,
}

impl YoutubeProvider {
    /// Loads the stored browser headers and verifies them against the
    /// library playlists browse endpoint.
    pub async fn connect() -> Res<Self> {
        let path = config::credentials_path(Platform::Youtube);
        let raw = async_fs::read_to_string(&path)
            .await
            .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
        let creds: YoutubeCredentials = serde_json::from_str(&raw)?;

        let mut headers = HeaderMap::new();
        headers.insert("Cookie", HeaderValue::from_str(&creds.cookie)?);
        headers.insert("Authorization", HeaderValue::from_str(&creds.authorization)?);
        headers.insert(
            "X-Origin",
            HeaderValue::from_static("https://music.youtube.com"),
        );

        let provider = Self {
            client: Client::new(),
            headers,
        };
        provider
            .call("browse", json!({ "browseId": "FEmusic_liked_playlists" }))
            .await?;

        success!("Youtube: Successfully Authenticated");
        Ok(provider)
    }

    /// Posts one InnerTube request with the web-remix client context merged
    /// into the body.
    async fn call(&self, endpoint: &str, mut body: Value) -> Res<Value> {
        body["context"] = json!({
            "client": {
                "clientName": "WEB_REMIX",
                "clientVersion": "1.20250101.01.00",
                "hl": "en"
            }
        });

        let api_url = format!("{}/{}", config::youtube_apiurl(), endpoint);
        let json = self
            .client
            .post(&api_url)
            .query(&[("prettyPrint", "false")])
            .headers(self.headers.clone())
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json::<Value>()
            .await?;

        Ok(json)
    }

    /// Builds a canonical track plus video id from one list item renderer.
    ///
    /// The title sits in the first flex column; the remaining columns mix
    /// artist links, an optional album link and plain-text separators. Runs
    /// carrying a browse endpoint are real entities: album pages have
    /// `MPRE`-prefixed ids, everything else is an artist channel.
    fn parse_item(renderer: &Value) -> Option<(String, CanonicalTrack)> {
        let title = renderer
            .pointer("/flexColumns/0/musicResponsiveListItemFlexColumnRenderer/text/runs/0/text")?
            .as_str()?
            .to_string();

        let video_id = renderer
            .pointer("/playlistItemData/videoId")
            .and_then(Value::as_str)
            .map(str::to_string)
            .or_else(|| {
                let mut found = Vec::new();
                collect_values(renderer, "videoId", &mut found);
                found.first().and_then(|v| v.as_str()).map(str::to_string)
            })?;

        let mut artists = Vec::new();
        let mut album = String::new();
        let columns = renderer.pointer("/flexColumns")?.as_array()?;
        for column in columns.iter().skip(1) {
            let Some(runs) = column
                .pointer("/musicResponsiveListItemFlexColumnRenderer/text/runs")
                .and_then(Value::as_array)
            else {
                continue;
            };
            for run in runs {
                let Some(text) = run.pointer("/text").and_then(Value::as_str) else {
                    continue;
                };
                let Some(browse_id) = run
                    .pointer("/navigationEndpoint/browseEndpoint/browseId")
                    .and_then(Value::as_str)
                else {
                    continue;
                };
                if browse_id.starts_with("MPRE") {
                    album = text.to_string();
                } else {
                    artists.push(text.to_string());
                }
            }
        }

        Some((video_id, CanonicalTrack::new(album, title, artists)))
    }
}

#[async_trait]
impl Provider for YoutubeProvider {
    fn platform(&self) -> Platform {
        Platform::Youtube
    }

    async fn list_playlists(&self) -> Res<ContainerIndex> {
        let response = self
            .call("browse", json!({ "browseId": "FEmusic_liked_playlists" }))
            .await?;

        let mut renderers = Vec::new();
        collect_values(&response, "musicTwoRowItemRenderer", &mut renderers);

        let mut index = ContainerIndex::new();
        for renderer in renderers {
            let Some(name) = renderer
                .pointer("/title/runs/0/text")
                .and_then(Value::as_str)
            else {
                continue;
            };
            let Some(browse_id) = renderer
                .pointer("/navigationEndpoint/browseEndpoint/browseId")
                .and_then(Value::as_str)
            else {
                continue;
            };
            // Playlist cards browse to "VL<playlist id>"; skip the liked-music
            // auto playlist and the new-playlist action card.
            let Some(playlist_id) = browse_id.strip_prefix("VL") else {
                continue;
            };
            if playlist_id == "LM" {
                continue;
            }
            index.insert(name.to_string(), playlist_id.to_string());
        }

        Ok(index)
    }

    async fn playlist_tracks(&self, playlist_id: &str) -> Res<Vec<CanonicalTrack>> {
        let response = self
            .call("browse", json!({ "browseId": format!("VL{}", playlist_id) }))
            .await?;

        let mut renderers = Vec::new();
        collect_values(&response, "musicResponsiveListItemRenderer", &mut renderers);

        Ok(renderers
            .iter()
            .filter_map(|renderer| Self::parse_item(renderer))
            .map(|(_, track)| track)
            .collect())
    }

    async fn search_catalog(&self, query: &str, limit: u32) -> Res<Vec<Candidate>> {
        let response = self
            .call(
                "search",
                json!({ "query": query, "params": SONGS_FILTER_PARAMS }),
            )
            .await?;

        let mut renderers = Vec::new();
        collect_values(&response, "musicResponsiveListItemRenderer", &mut renderers);

        Ok(renderers
            .iter()
            .filter_map(|renderer| Self::parse_item(renderer))
            .take(limit as usize)
            .map(|(id, track)| Candidate { id, track })
            .collect())
    }

    async fn create_playlist(&self, name: &str, _parent_folder: Option<&str>) -> Res<String> {
        let response = self
            .call(
                "playlist/create",
                json!({ "title": name, "privacyStatus": "PRIVATE" }),
            )
            .await?;

        response
            .pointer("/playlistId")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| "playlist/create response carried no playlistId".into())
    }

    async fn add_track(&self, playlist_id: &str, track_id: &str) -> Res<()> {
        let response = self
            .call(
                "browse/edit_playlist",
                json!({
                    "playlistId": playlist_id,
                    "actions": [{ "action": "ACTION_ADD_VIDEO", "addedVideoId": track_id }]
                }),
            )
            .await?;

        match response.pointer("/status").and_then(Value::as_str) {
            Some("STATUS_SUCCEEDED") => Ok(()),
            status => Err(format!(
                "edit_playlist answered {}",
                status.unwrap_or("without a status")
            )
            .into()),
        }
    }
}

/// Depth-first collection of every value stored under `key` anywhere in an
/// InnerTube response.
fn collect_values<'a>(value: &'a Value, key: &str, out: &mut Vec<&'a Value>) {
    match value {
        Value::Object(map) => {
            if let Some(found) = map.get(key) {
                out.push(found);
            }
            for child in map.values() {
                collect_values(child, key, out);
            }
        }
        Value::Array(items) => {
            for child in items {
                collect_values(child, key, out);
            }
        }
        _ => {}
    }
}
