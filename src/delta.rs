//! Set difference between source and destination playlist contents.

use std::collections::HashSet;

/// Returns the source identities not already present at the destination.
///
/// Comparison is exact string equality on identity strings; near-duplicates
/// that differ by whitespace or punctuation are treated as absent and will be
/// re-attempted. Fuzzy matching is reserved for the search-candidate step and
/// intentionally not applied here.
///
/// The result contains no duplicates even if the source listing does. Output
/// order is set iteration order and is not stable across runs; callers must
/// not rely on it.
pub fn tracks_to_move(existing: &[String], source: &[String]) -> Vec<String> {
    let existing: HashSet<&String> = existing.iter().collect();
    let mut keep: HashSet<&String> = HashSet::new();
    for identity in source {
        if !existing.contains(identity) {
            keep.insert(identity);
        }
    }
    keep.into_iter().cloned().collect()
}
