//! The per-playlist transfer loop.
//!
//! Walks the delta one track at a time: search the destination catalog, pick
//! the first ranked candidate the similarity check accepts, throttle, add.
//! Tracks that cannot be found or added are accumulated and returned; a
//! provider failure during search aborts the remainder of this playlist only
//! and returns the partial accumulation. Nothing here is retried across runs —
//! the delta computation makes a re-invocation skip whatever already landed.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tokio::time::sleep;

use crate::{Res, matching, providers::Provider, track, warning};

/// Platforms cap ranked search results; five is the ceiling they all accept.
const SEARCH_LIMIT: u32 = 5;

/// Fixed pause before each add call, to stay under per-platform rate limits.
/// Applied only when a match was found; no-result tracks proceed back-to-back.
const ADD_THROTTLE: Duration = Duration::from_millis(500);

/// Moves every track of `delta` into the destination container, returning the
/// human-readable entries for tracks that could not be transferred.
pub async fn run(
    provider: &dyn Provider,
    delta: &[String],
    container_id: &str,
    label: &str,
) -> Vec<String> {
    let mut not_found = Vec::new();

    let pb = ProgressBar::new(delta.len() as u64);
    pb.set_style(
        ProgressStyle::with_template("{msg} [{wide_bar:.cyan/blue}] {pos}/{len}")
            .unwrap()
            .progress_chars("=>-"),
    );
    pb.set_message(format!("Moving {} to {}", label, provider.platform()));

    for identity in delta {
        if let Err(e) = move_track(provider, container_id, identity, &mut not_found).await {
            pb.abandon();
            warning!(
                "{}: transfer of '{}' stopped early, keeping partial results: {}",
                provider.platform(),
                label,
                e
            );
            return not_found;
        }
        pb.inc(1);
    }

    pb.finish();
    not_found
}

/// One step of the per-track state machine. Unfindable and unaddable tracks
/// land in `not_found` and return Ok; only a failing search escalates.
async fn move_track(
    provider: &dyn Provider,
    container_id: &str,
    identity: &str,
    not_found: &mut Vec<String>,
) -> Res<()> {
    let description = track::description_of(identity);
    let query = track::search_query_of(identity);

    let mut current_query = query.clone();
    let mut candidates = provider.search_catalog(&query, SEARCH_LIMIT).await?;
    if candidates.is_empty() {
        // Retry without parentheticals; "(Remix)"/"(Live)" suffixes defeat
        // many catalog indexes.
        current_query = track::strip_parentheticals(&query);
        candidates = provider.search_catalog(&current_query, SEARCH_LIMIT).await?;
        if candidates.is_empty() {
            not_found.push(query);
            return Ok(());
        }
    }

    for candidate in &candidates {
        if !matching::is_match(&candidate.track.description(), &description) {
            continue;
        }
        sleep(ADD_THROTTLE).await;
        if let Err(e) = provider.add_track(container_id, &candidate.id).await {
            warning!(
                "{}: could not add '{}': {}",
                provider.platform(),
                candidate.track.title,
                e
            );
            not_found.push(description);
        }
        return Ok(());
    }

    not_found.push(current_query);
    Ok(())
}
