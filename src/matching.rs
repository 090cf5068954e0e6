//! Fuzzy similarity check for catalog search candidates.

use strsim::sorensen_dice;

/// Minimum similarity ratio for two descriptions to count as the same song.
///
/// Deliberately low: metadata drifts across platforms (remaster tags,
/// featuring-artist ordering, punctuation) and a missed match costs more than
/// the occasional false positive. Candidates are capped at the search limit,
/// so at most a handful of comparisons run per track.
const MATCH_THRESHOLD: f64 = 0.45;

/// Returns the matched-bigram ratio of two descriptions in `[0, 1]`.
///
/// Bigram overlap rather than edit distance: cross-platform drift is
/// insertion-heavy (featuring credits, remaster suffixes appended to one side
/// only), and an insertion-penalizing metric pushes those pairs under the
/// threshold even though every character of the shorter description is
/// present in the longer one.
pub fn similarity(first: &str, second: &str) -> f64 {
    sorensen_dice(first, second)
}

/// Whether a candidate description is close enough to the queried track's
/// description to count as the same song.
pub fn is_match(candidate: &str, query: &str) -> bool {
    similarity(candidate, query) > MATCH_THRESHOLD
}
