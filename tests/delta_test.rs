use std::collections::HashSet;

use tunesync::delta::tracks_to_move;

fn identities(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

fn as_set(tracks: Vec<String>) -> HashSet<String> {
    tracks.into_iter().collect()
}

#[test]
fn test_delta_is_exact_set_difference() {
    let existing = identities(&["a", "b"]);
    let source = identities(&["a", "b", "c", "d"]);

    let delta = as_set(tracks_to_move(&existing, &source));
    assert_eq!(delta, as_set(identities(&["c", "d"])));
}

#[test]
fn test_identical_playlists_produce_empty_delta() {
    let tracks = identities(&["a", "b", "c"]);
    assert!(tracks_to_move(&tracks, &tracks).is_empty());
}

#[test]
fn test_empty_source_produces_empty_delta() {
    let existing = identities(&["a", "b"]);
    assert!(tracks_to_move(&existing, &[]).is_empty());
}

#[test]
fn test_fresh_destination_moves_everything() {
    let source = identities(&["a", "b", "c"]);
    let delta = as_set(tracks_to_move(&[], &source));
    assert_eq!(delta, as_set(source));
}

#[test]
fn test_duplicate_source_entries_collapse() {
    let source = identities(&["a", "a", "b", "b", "b"]);
    let delta = tracks_to_move(&[], &source);

    assert_eq!(delta.len(), 2);
    assert_eq!(as_set(delta), as_set(identities(&["a", "b"])));
}

#[test]
fn test_near_duplicates_are_distinct() {
    // Exact string equality only; whitespace drift is a different identity.
    let existing = identities(&["Album&@#72Title&@#72Artist"]);
    let source = identities(&["Album&@#72Title &@#72Artist"]);

    let delta = tracks_to_move(&existing, &source);
    assert_eq!(delta, source);
}

#[test]
fn test_destination_extras_are_ignored() {
    // Reconciliation is one-directional: destination-only tracks stay put
    // and never appear in the delta.
    let existing = identities(&["a", "b", "z"]);
    let source = identities(&["a", "c"]);

    let delta = tracks_to_move(&existing, &source);
    assert_eq!(delta, identities(&["c"]));
}
