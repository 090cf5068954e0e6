use crate::{
    Res, delta, error,
    providers::{self, ContainerIndex, Platform, Provider},
    report::NotFoundReport,
    resolver::DestinationResolver,
    transfer, warning,
};

/// Moves one named playlist from `source` to `destination`.
pub async fn sync_playlist(source: Platform, destination: Platform, name: String) {
    let session = Session::open(source, destination).await;
    let mut run = SyncRun::new(&session).await;
    run.sync_one(&session, &name).await;
    run.finish(&session).await;
}

/// Moves every playlist named in the given file, one name per line.
pub async fn sync_file(source: Platform, destination: Platform, path: String) {
    let content = match async_fs::read_to_string(&path).await {
        Ok(content) => content,
        Err(_) => error!("{} does not exist", path),
    };
    let names: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    let session = Session::open(source, destination).await;
    let mut run = SyncRun::new(&session).await;
    for name in &names {
        run.sync_one(&session, name).await;
    }
    run.finish(&session).await;
}

/// Moves every playlist of the source account, including the favorites
/// pseudo-playlist where the source platform has one.
pub async fn sync_all(source: Platform, destination: Platform) {
    let session = Session::open(source, destination).await;
    let mut run = SyncRun::new(&session).await;

    if let Some(likes) = session.source.likes_name() {
        run.sync_one(&session, likes).await;
    }
    let mut names: Vec<String> = session.source_index.keys().cloned().collect();
    names.sort();
    for name in &names {
        run.sync_one(&session, name).await;
    }

    run.finish(&session).await;
}

/// Both authenticated providers plus their container indexes, built once per
/// invocation.
struct Session {
    source: Box<dyn Provider>,
    destination: Box<dyn Provider>,
    source_index: ContainerIndex,
}

impl Session {
    /// Connects both ends. Identical platforms and authentication failures
    /// are fatal; the same-platform check runs before any provider call.
    async fn open(source: Platform, destination: Platform) -> Session {
        if source == destination {
            error!(
                "Nice try but no, you can't move from {} to {}, they are the same platform",
                source, destination
            );
        }

        let source = match providers::connect(source).await {
            Ok(provider) => provider,
            Err(e) => error!("{}: Authentication failed: {}", source, e),
        };
        let destination = match providers::connect(destination).await {
            Ok(provider) => provider,
            Err(e) => error!("{}: Authentication failed: {}", destination, e),
        };

        let source_index = match source.list_playlists().await {
            Ok(index) => index,
            Err(e) => error!("{}: Cannot list playlists: {}", source.platform(), e),
        };

        Session {
            source,
            destination,
            source_index,
        }
    }
}

/// Per-run mutable state: the destination index and resolver (shared folder
/// cache) and the running not-found accumulation.
struct SyncRun<'a> {
    dest_index: ContainerIndex,
    resolver: DestinationResolver<'a>,
    report: NotFoundReport,
}

impl<'a> SyncRun<'a> {
    async fn new(session: &'a Session) -> SyncRun<'a> {
        let dest_index = match session.destination.list_playlists().await {
            Ok(index) => index,
            Err(e) => error!(
                "{}: Cannot list playlists: {}",
                session.destination.platform(),
                e
            ),
        };
        let resolver = match DestinationResolver::new(session.destination.as_ref()).await {
            Ok(resolver) => resolver,
            Err(e) => error!(
                "{}: Cannot list folders: {}",
                session.destination.platform(),
                e
            ),
        };
        SyncRun {
            dest_index,
            resolver,
            report: NotFoundReport::new(),
        }
    }

    /// Transfers one playlist end to end. A missing named playlist at the
    /// source is fatal; a failure while resolving or reading the destination
    /// aborts this playlist only and the batch moves on.
    async fn sync_one(&mut self, session: &Session, name: &str) {
        let not_found = match self.transfer_playlist(session, name).await {
            Ok(not_found) => not_found,
            Err(e) => {
                warning!("Skipping '{}': {}", name, e);
                return;
            }
        };
        self.report.record(
            session.source.platform(),
            session.destination.platform(),
            name,
            not_found,
        );
    }

    async fn transfer_playlist(&mut self, session: &Session, name: &str) -> Res<Vec<String>> {
        let is_likes = session
            .source
            .likes_name()
            .is_some_and(|likes| likes.eq_ignore_ascii_case(name));

        let source_tracks = if is_likes {
            session.source.liked_tracks().await?
        } else {
            let playlist_id = match self.source_playlist_id(session, name) {
                Some(id) => id,
                None => error!(
                    "{}: Selected {} Playlist does not exist",
                    session.source.platform(),
                    name
                ),
            };
            session.source.playlist_tracks(&playlist_id).await?
        };

        let container_id = self.resolver.resolve(name, &mut self.dest_index).await?;
        let existing = session.destination.playlist_tracks(&container_id).await?;

        let source_identities: Vec<String> =
            source_tracks.iter().map(|track| track.identity()).collect();
        let existing_identities: Vec<String> =
            existing.iter().map(|track| track.identity()).collect();
        let to_move = delta::tracks_to_move(&existing_identities, &source_identities);

        Ok(transfer::run(
            session.destination.as_ref(),
            &to_move,
            &container_id,
            name,
        )
        .await)
    }

    /// Exact lookup of a source playlist, tolerating a trailing-space
    /// mismatch between what the user typed and what the platform stores.
    fn source_playlist_id(&self, session: &Session, name: &str) -> Option<String> {
        let index = &session.source_index;
        index
            .get(name)
            .or_else(|| index.get(&format!("{} ", name)))
            .or_else(|| index.get(name.trim_end()))
            .cloned()
    }

    /// Flushes the report and prints the run summary.
    async fn finish(self, _session: &Session) {
        if let Err(e) = self.report.flush().await {
            warning!("Cannot write not-found report: {}", e);
        }
        self.report.print_summary();
    }
}
