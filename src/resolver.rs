//! Destination playlist resolution.
//!
//! Decides whether a transfer reuses an existing destination playlist or
//! creates one, and reconciles folder membership for slash-qualified display
//! names on platforms that nest playlists. One resolver instance lives for the
//! whole run and owns the session folder cache, so several playlists destined
//! for the same folder create it only once.

use std::collections::HashMap;

use crate::{
    Res, info,
    providers::{ContainerIndex, Provider},
    warning,
};

pub struct DestinationResolver<'a> {
    provider: &'a dyn Provider,
    /// Folder display name → folder id; seeded from the destination's
    /// existing folders, extended by folders created this run.
    folders: HashMap<String, String>,
}

impl<'a> DestinationResolver<'a> {
    /// Builds a resolver for one destination provider, seeding the folder
    /// cache from its existing folders.
    pub async fn new(provider: &'a dyn Provider) -> Res<DestinationResolver<'a>> {
        let folders = if provider.supports_folders() {
            provider
                .list_folders()
                .await?
                .into_iter()
                .map(|(id, name)| (name, id))
                .collect()
        } else {
            HashMap::new()
        };
        Ok(DestinationResolver { provider, folders })
    }

    /// Resolves a display name to a destination container id the transfer
    /// loop can append tracks to.
    ///
    /// An existing container is reused as-is (merge semantics; nothing is
    /// cleared). Otherwise a `"Folder/Name"` display name creates the playlist
    /// inside that folder when the destination supports folders, splitting on
    /// the first separator only; a failed folder operation degrades to an
    /// unattached playlist in the platform's root location. Platforms without
    /// folder support get the display name verbatim, slashes included.
    ///
    /// Created containers are entered into `index`, so a later resolve in the
    /// same run finds them by exact lookup.
    pub async fn resolve(&mut self, display_name: &str, index: &mut ContainerIndex) -> Res<String> {
        if let Some(id) = index.get(display_name) {
            info!(
                "{}: Playlist exists, adding missing songs",
                self.provider.platform()
            );
            return Ok(id.clone());
        }

        let platform = self.provider.platform();
        let playlist_id = match display_name.split_once('/') {
            Some((folder_name, leaf_name)) if self.provider.supports_folders() => {
                info!("{}: Creating new playlist: {}", platform, leaf_name);
                match self.folder_id(folder_name).await {
                    Some(folder_id) => {
                        match self.provider.create_playlist(leaf_name, Some(&folder_id)).await {
                            Ok(id) => {
                                info!("{}: Added playlist to folder: {}", platform, folder_name);
                                id
                            }
                            Err(e) => {
                                warning!(
                                    "{}: Folder operation failed, creating playlist in root: {}",
                                    platform,
                                    e
                                );
                                self.provider.create_playlist(leaf_name, None).await?
                            }
                        }
                    }
                    None => self.provider.create_playlist(leaf_name, None).await?,
                }
            }
            _ => {
                let id = self.provider.create_playlist(display_name, None).await?;
                info!("{}: Playlist created", platform);
                id
            }
        };

        index.insert(display_name.to_string(), playlist_id.clone());
        Ok(playlist_id)
    }

    /// Looks up a folder in the session cache, creating it at the destination
    /// on a miss. Returns None when creation fails; the caller degrades to an
    /// unattached playlist.
    async fn folder_id(&mut self, folder_name: &str) -> Option<String> {
        if let Some(id) = self.folders.get(folder_name) {
            return Some(id.clone());
        }

        info!(
            "{}: Creating new folder: {}",
            self.provider.platform(),
            folder_name
        );
        match self.provider.create_folder(folder_name).await {
            Ok(id) => {
                self.folders.insert(folder_name.to_string(), id.clone());
                Some(id)
            }
            Err(e) => {
                warning!(
                    "{}: Folder creation failed, playlist will go to root: {}",
                    self.provider.platform(),
                    e
                );
                None
            }
        }
    }
}
