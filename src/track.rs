//! Canonical track identities.
//!
//! Every provider reduces its raw track records to a [`CanonicalTrack`], which
//! serializes to a single delimited identity string. The identity string is the
//! unit of comparison for "is this track already present at the destination";
//! a looser, space-joined description of the same fields feeds the fuzzy
//! matching of search candidates.

use std::sync::LazyLock;

use regex::Regex;

/// Delimiter joining the album/title/artists segments of an identity string.
///
/// Chosen as a multi-character sequence that does not occur in real-world
/// metadata; a collision would make two distinct tracks share an identity.
pub const IDENTITY_DELIMITER: &str = "&@#72";

static RE_PARENTHETICAL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\(.*?\)").unwrap());
static RE_FEATURING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(feat\. ([^)]+)\)").unwrap());

/// A platform-independent track value: album, title and the artist list in
/// the order the provider returned it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalTrack {
    pub album: String,
    pub title: String,
    pub artists: Vec<String>,
}

impl CanonicalTrack {
    /// Builds a canonical track from raw provider metadata.
    ///
    /// A `"(feat. X)"` credit embedded in the title is appended to the artist
    /// list so that identity strings and search queries carry the featured
    /// name even when the provider only lists the primary artist. The title
    /// itself is left untouched.
    pub fn new(album: impl Into<String>, title: impl Into<String>, artists: Vec<String>) -> Self {
        let title = title.into();
        let mut artists = artists;
        if let Some(caps) = RE_FEATURING.captures(&title) {
            artists.push(caps[1].to_string());
        }
        CanonicalTrack {
            album: album.into(),
            title,
            artists,
        }
    }

    /// The delimited identity string: `album`, `title`, space-joined artists.
    ///
    /// Artists keep provider order; duplicate artist names collapse into the
    /// same space-joined segment, which is accepted imprecision.
    pub fn identity(&self) -> String {
        format!(
            "{album}{d}{title}{d}{artists}",
            album = self.album,
            d = IDENTITY_DELIMITER,
            title = self.title,
            artists = self.artists.join(" ")
        )
    }

    /// The human-readable form used for fuzzy comparison against search
    /// candidates: all segments joined by single spaces.
    pub fn description(&self) -> String {
        format!(
            "{} {} {}",
            self.album,
            self.title,
            self.artists.join(" ")
        )
    }
}

/// Splits an identity string back into its segments.
pub fn split_identity(identity: &str) -> Vec<&str> {
    identity.split(IDENTITY_DELIMITER).collect()
}

/// Human-readable "album title artists" form of an identity string.
pub fn description_of(identity: &str) -> String {
    identity.replace(IDENTITY_DELIMITER, " ")
}

/// The catalog search query for an identity: title and artists only.
///
/// Album names hurt search recall across platforms (remaster tags, deluxe
/// editions), so the album segment is dropped from the query but kept in the
/// description used for candidate comparison.
pub fn search_query_of(identity: &str) -> String {
    identity
        .split(IDENTITY_DELIMITER)
        .skip(1)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Removes parenthesized groups, for the second search attempt when the full
/// query returned nothing. Handles "(Remix)", "(Live)" and similar suffixes
/// that many catalogs don't index.
pub fn strip_parentheticals(query: &str) -> String {
    RE_PARENTHETICAL.replace_all(query, "").to_string()
}
