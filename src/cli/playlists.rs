use tabled::Table;

use crate::{
    error, info,
    providers::{self, Platform},
    types::PlaylistTableRow,
};

/// Lists the user's playlists on one platform, folder-qualified names
/// included, with the favorites pseudo-playlist on top where one exists.
pub async fn playlists(platform: Platform) {
    let provider = match providers::connect(platform).await {
        Ok(provider) => provider,
        Err(e) => error!("{}: Authentication failed: {}", platform, e),
    };

    let index = match provider.list_playlists().await {
        Ok(index) => index,
        Err(e) => error!("{}: Cannot list playlists: {}", platform, e),
    };

    info!("{}: Displaying Playlists", platform);

    let mut names: Vec<String> = index.into_keys().collect();
    names.sort_by_key(|name| name.to_lowercase());
    let mut rows: Vec<PlaylistTableRow> = Vec::new();
    if let Some(likes) = provider.likes_name() {
        rows.push(PlaylistTableRow {
            name: likes.to_string(),
        });
    }
    rows.extend(names.into_iter().map(|name| PlaylistTableRow { name }));

    let table = Table::new(rows);
    println!("{}", table);
}
