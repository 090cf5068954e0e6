use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use tunesync::Res;
use tunesync::delta::tracks_to_move;
use tunesync::providers::{Candidate, ContainerIndex, FolderTable, Platform, Provider};
use tunesync::resolver::DestinationResolver;
use tunesync::track::CanonicalTrack;
use tunesync::transfer;

/// In-memory destination that records every provider call it receives.
#[derive(Default)]
struct MockProvider {
    supports_folders: bool,
    fail_create_folder: bool,
    fail_add: bool,
    fail_search: bool,
    folders: FolderTable,
    results: HashMap<String, Vec<Candidate>>,
    log: Mutex<Vec<String>>,
    counter: Mutex<u32>,
}

impl MockProvider {
    fn log(&self, entry: String) {
        self.log.lock().unwrap().push(entry);
    }

    fn next_id(&self) -> u32 {
        let mut counter = self.counter.lock().unwrap();
        *counter += 1;
        *counter
    }

    fn calls(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }

    fn count_calls(&self, prefix: &str) -> usize {
        self.calls().iter().filter(|c| c.starts_with(prefix)).count()
    }
}

#[async_trait]
impl Provider for MockProvider {
    fn platform(&self) -> Platform {
        Platform::Tidal
    }

    fn supports_folders(&self) -> bool {
        self.supports_folders
    }

    async fn list_playlists(&self) -> Res<ContainerIndex> {
        Ok(ContainerIndex::new())
    }

    async fn list_folders(&self) -> Res<FolderTable> {
        Ok(self.folders.clone())
    }

    async fn playlist_tracks(&self, _playlist_id: &str) -> Res<Vec<CanonicalTrack>> {
        Ok(Vec::new())
    }

    async fn search_catalog(&self, query: &str, _limit: u32) -> Res<Vec<Candidate>> {
        self.log(format!("search:{}", query));
        if self.fail_search {
            return Err("search backend unavailable".into());
        }
        Ok(self.results.get(query).cloned().unwrap_or_default())
    }

    async fn create_playlist(&self, name: &str, parent_folder: Option<&str>) -> Res<String> {
        self.log(format!(
            "create_playlist:{}:{}",
            name,
            parent_folder.unwrap_or("root")
        ));
        Ok(format!("pl-{}", self.next_id()))
    }

    async fn create_folder(&self, name: &str) -> Res<String> {
        self.log(format!("create_folder:{}", name));
        if self.fail_create_folder {
            return Err("folder endpoint rejected the request".into());
        }
        Ok(format!("folder-{}", self.next_id()))
    }

    async fn add_track(&self, playlist_id: &str, track_id: &str) -> Res<()> {
        self.log(format!("add:{}:{}", playlist_id, track_id));
        if self.fail_add {
            return Err("add rejected".into());
        }
        Ok(())
    }
}

fn candidate(id: &str, album: &str, title: &str, artists: &[&str]) -> Candidate {
    Candidate {
        id: id.to_string(),
        track: CanonicalTrack::new(
            album,
            title,
            artists.iter().map(|a| a.to_string()).collect(),
        ),
    }
}

fn identity(album: &str, title: &str, artists: &[&str]) -> String {
    CanonicalTrack::new(
        album,
        title,
        artists.iter().map(|a| a.to_string()).collect(),
    )
    .identity()
}

// --- Destination resolution ---

#[tokio::test]
async fn test_resolver_reuses_existing_playlist() {
    let provider = MockProvider::default();
    let mut index: ContainerIndex = [("Rock".to_string(), "rock-id".to_string())].into();

    let mut resolver = DestinationResolver::new(&provider).await.unwrap();
    let id = resolver.resolve("Rock", &mut index).await.unwrap();

    assert_eq!(id, "rock-id");
    assert_eq!(provider.count_calls("create_playlist"), 0);
    assert_eq!(provider.count_calls("create_folder"), 0);
}

#[tokio::test]
async fn test_resolver_creates_playlist_inside_new_folder() {
    let provider = MockProvider {
        supports_folders: true,
        ..Default::default()
    };
    let mut index = ContainerIndex::new();

    let mut resolver = DestinationResolver::new(&provider).await.unwrap();
    let id = resolver.resolve("Jazz/New Mix", &mut index).await.unwrap();

    let calls = provider.calls();
    assert_eq!(calls[0], "create_folder:Jazz");
    assert_eq!(calls[1], "create_playlist:New Mix:folder-1");
    // New container enters the index under the full display name.
    assert_eq!(index.get("Jazz/New Mix"), Some(&id));
}

#[tokio::test]
async fn test_resolver_creates_each_folder_once_per_session() {
    let provider = MockProvider {
        supports_folders: true,
        ..Default::default()
    };
    let mut index = ContainerIndex::new();

    let mut resolver = DestinationResolver::new(&provider).await.unwrap();
    resolver.resolve("Jazz/New Mix", &mut index).await.unwrap();
    resolver.resolve("Jazz/Another Mix", &mut index).await.unwrap();

    assert_eq!(provider.count_calls("create_folder"), 1);
    assert_eq!(provider.count_calls("create_playlist"), 2);
}

#[tokio::test]
async fn test_resolver_seeds_folder_cache_from_destination() {
    let provider = MockProvider {
        supports_folders: true,
        folders: [("folder-9".to_string(), "Jazz".to_string())].into(),
        ..Default::default()
    };
    let mut index = ContainerIndex::new();

    let mut resolver = DestinationResolver::new(&provider).await.unwrap();
    resolver.resolve("Jazz/New Mix", &mut index).await.unwrap();

    assert_eq!(provider.count_calls("create_folder"), 0);
    assert_eq!(provider.calls(), vec!["create_playlist:New Mix:folder-9"]);
}

#[tokio::test]
async fn test_resolver_passes_slash_through_without_folder_support() {
    let provider = MockProvider::default();
    let mut index = ContainerIndex::new();

    let mut resolver = DestinationResolver::new(&provider).await.unwrap();
    resolver.resolve("Jazz/New Mix", &mut index).await.unwrap();

    // The display name is taken verbatim, slash included.
    assert_eq!(provider.calls(), vec!["create_playlist:Jazz/New Mix:root"]);
}

#[tokio::test]
async fn test_resolver_falls_back_to_root_when_folder_creation_fails() {
    let provider = MockProvider {
        supports_folders: true,
        fail_create_folder: true,
        ..Default::default()
    };
    let mut index = ContainerIndex::new();

    let mut resolver = DestinationResolver::new(&provider).await.unwrap();
    let id = resolver.resolve("Jazz/New Mix", &mut index).await.unwrap();

    assert!(id.starts_with("pl-"));
    assert!(provider.calls().contains(&"create_playlist:New Mix:root".to_string()));
}

// --- Transfer loop ---

#[tokio::test]
async fn test_transfer_adds_matching_candidate() {
    let provider = MockProvider {
        results: [(
            "Title2 ArtistB".to_string(),
            vec![candidate("cand-1", "Album2", "Title2", &["ArtistB"])],
        )]
        .into(),
        ..Default::default()
    };
    let delta = vec![identity("Album2", "Title2", &["ArtistB"])];

    let not_found = transfer::run(&provider, &delta, "dest-1", "My Mix").await;

    assert!(not_found.is_empty());
    assert_eq!(provider.count_calls("add"), 1);
    assert!(provider.calls().contains(&"add:dest-1:cand-1".to_string()));
}

#[tokio::test]
async fn test_transfer_records_query_when_nothing_found() {
    let provider = MockProvider::default();
    let delta = vec![identity("Album2", "Title2", &["ArtistB"])];

    let not_found = transfer::run(&provider, &delta, "dest-1", "My Mix").await;

    assert_eq!(not_found, vec!["Title2 ArtistB"]);
    // Empty first result triggers exactly one retry, then gives up.
    assert_eq!(provider.count_calls("search"), 2);
    assert_eq!(provider.count_calls("add"), 0);
}

#[tokio::test]
async fn test_transfer_retries_without_parentheticals() {
    let provider = MockProvider {
        results: [(
            "Title2  ArtistB".to_string(),
            vec![candidate("cand-2", "Album2", "Title2 (Live)", &["ArtistB"])],
        )]
        .into(),
        ..Default::default()
    };
    let delta = vec![identity("Album2", "Title2 (Live)", &["ArtistB"])];

    let not_found = transfer::run(&provider, &delta, "dest-1", "My Mix").await;

    assert!(not_found.is_empty());
    let calls = provider.calls();
    assert_eq!(calls[0], "search:Title2 (Live) ArtistB");
    assert_eq!(calls[1], "search:Title2  ArtistB");
    assert_eq!(calls[2], "add:dest-1:cand-2");
}

#[tokio::test]
async fn test_transfer_rejects_dissimilar_candidates() {
    let provider = MockProvider {
        results: [(
            "Title2 ArtistB".to_string(),
            vec![candidate(
                "cand-3",
                "Greatest Hits of the Nineties",
                "Completely Unrelated Song",
                &["Somebody Else Entirely"],
            )],
        )]
        .into(),
        ..Default::default()
    };
    let delta = vec![identity("Album2", "Title2", &["ArtistB"])];

    let not_found = transfer::run(&provider, &delta, "dest-1", "My Mix").await;

    assert_eq!(not_found, vec!["Title2 ArtistB"]);
    assert_eq!(provider.count_calls("add"), 0);
}

#[tokio::test]
async fn test_transfer_records_description_when_add_fails() {
    let provider = MockProvider {
        fail_add: true,
        results: [(
            "Title2 ArtistB".to_string(),
            vec![candidate("cand-1", "Album2", "Title2", &["ArtistB"])],
        )]
        .into(),
        ..Default::default()
    };
    let delta = vec![identity("Album2", "Title2", &["ArtistB"])];

    let not_found = transfer::run(&provider, &delta, "dest-1", "My Mix").await;

    // A failed add records the full description, not the search query.
    assert_eq!(not_found, vec!["Album2 Title2 ArtistB"]);
    assert_eq!(provider.count_calls("add"), 1);
}

#[tokio::test]
async fn test_transfer_keeps_partial_results_on_search_failure() {
    let provider = MockProvider {
        fail_search: true,
        ..Default::default()
    };
    let delta = vec![identity("Album2", "Title2", &["ArtistB"])];

    let not_found = transfer::run(&provider, &delta, "dest-1", "My Mix").await;

    assert!(not_found.is_empty());
    assert_eq!(provider.count_calls("add"), 0);
}

#[tokio::test]
async fn test_delta_feeds_transfer_end_to_end() {
    let present = identity("Album1", "Title1", &["ArtistA"]);
    let missing = identity("Album2", "Title2", &["ArtistB"]);
    let provider = MockProvider {
        results: [(
            "Title2 ArtistB".to_string(),
            vec![candidate("cand-1", "Album2", "Title2", &["ArtistB"])],
        )]
        .into(),
        ..Default::default()
    };

    let existing = vec![present.clone()];
    let source = vec![present, missing];
    let delta = tracks_to_move(&existing, &source);
    assert_eq!(delta.len(), 1);

    let not_found = transfer::run(&provider, &delta, "dest-1", "My Mix").await;

    assert!(not_found.is_empty());
    // Only the missing track produced any destination traffic.
    assert_eq!(provider.count_calls("search"), 1);
    assert_eq!(provider.count_calls("add"), 1);
}
