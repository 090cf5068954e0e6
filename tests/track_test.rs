use tunesync::track::{
    CanonicalTrack, IDENTITY_DELIMITER, description_of, search_query_of, split_identity,
    strip_parentheticals,
};

// Helper function to create a test track
fn create_test_track(album: &str, title: &str, artists: &[&str]) -> CanonicalTrack {
    CanonicalTrack::new(
        album,
        title,
        artists.iter().map(|a| a.to_string()).collect(),
    )
}

#[test]
fn test_identity_round_trips_through_split() {
    let track = create_test_track("A Night at the Opera", "Bohemian Rhapsody", &["Queen"]);
    let identity = track.identity();

    let segments = split_identity(&identity);
    assert_eq!(segments.len(), 3);
    assert_eq!(segments[0], "A Night at the Opera");
    assert_eq!(segments[1], "Bohemian Rhapsody");
    assert_eq!(segments[2], "Queen");
}

#[test]
fn test_identity_joins_multiple_artists_with_spaces() {
    let track = create_test_track("Watch the Throne", "Otis", &["JAY-Z", "Kanye West"]);

    let identity = track.identity();
    assert_eq!(
        identity,
        format!(
            "Watch the Throne{d}Otis{d}JAY-Z Kanye West",
            d = IDENTITY_DELIMITER
        )
    );
}

#[test]
fn test_featured_artist_is_promoted_from_title() {
    let track = create_test_track("Good Girl Gone Bad", "Umbrella (feat. JAY-Z)", &["Rihanna"]);

    // The credit joins the artist list; the title keeps the parenthetical.
    assert_eq!(track.artists, vec!["Rihanna", "JAY-Z"]);
    assert_eq!(track.title, "Umbrella (feat. JAY-Z)");

    let segments_owned = track.identity();
    let segments = split_identity(&segments_owned);
    assert_eq!(segments[2], "Rihanna JAY-Z");
}

#[test]
fn test_title_without_featuring_leaves_artists_alone() {
    let track = create_test_track("Lemonade", "Formation", &["Beyoncé"]);
    assert_eq!(track.artists, vec!["Beyoncé"]);
}

#[test]
fn test_description_flattens_identity() {
    let identity = format!("Album1{d}Title1{d}ArtistA", d = IDENTITY_DELIMITER);
    assert_eq!(description_of(&identity), "Album1 Title1 ArtistA");
}

#[test]
fn test_description_matches_track_description() {
    let track = create_test_track("Album1", "Title1", &["ArtistA", "ArtistB"]);
    assert_eq!(description_of(&track.identity()), track.description());
}

#[test]
fn test_search_query_drops_album_segment() {
    let identity = format!(
        "Album1 (Deluxe Edition){d}Title1{d}ArtistA",
        d = IDENTITY_DELIMITER
    );

    let query = search_query_of(&identity);
    assert_eq!(query, "Title1 ArtistA");
    assert!(!query.contains("Deluxe"));
}

#[test]
fn test_strip_parentheticals_removes_suffixes() {
    assert_eq!(
        strip_parentheticals("Song Title (Live) Artist"),
        "Song Title  Artist"
    );
    assert_eq!(
        strip_parentheticals("Title (Remix) (2011 Remaster) Artist"),
        "Title   Artist"
    );
    // No parentheses: query is untouched.
    assert_eq!(strip_parentheticals("Plain Title Artist"), "Plain Title Artist");
}

#[test]
fn test_delimiter_does_not_collide_with_metadata() {
    let track = create_test_track("We're All (In) This", "A & B #72", &["C@t"]);

    // Ordinary punctuation in metadata never produces extra segments.
    assert_eq!(split_identity(&track.identity()).len(), 3);
}
