use tunesync::matching::{is_match, similarity};

#[test]
fn test_identical_descriptions_match() {
    let description = "A Night at the Opera Bohemian Rhapsody Queen";
    assert_eq!(similarity(description, description), 1.0);
    assert!(is_match(description, description));
}

#[test]
fn test_punctuation_drift_still_matches() {
    // Same song, renamed remaster on the destination catalog.
    assert!(is_match(
        "Bohemian Rhapsody - 2011 Remaster Queen",
        "Bohemian Rhapsody Queen"
    ));
    assert!(is_match(
        "Umbrella (feat. JAY-Z) Rihanna JAY-Z",
        "Umbrella Rihanna"
    ));
}

#[test]
fn test_featuring_credit_insertion_clears_threshold() {
    // The destination catalog lists the featured artist the source omits;
    // everything the shorter description says is contained in the longer one.
    let pair = (
        "Umbrella (feat. JAY-Z) Rihanna JAY-Z",
        "Umbrella Rihanna",
    );
    let ratio = similarity(pair.0, pair.1);
    assert!(ratio > 0.45, "ratio was {}", ratio);
    assert!(is_match(pair.0, pair.1));
}

#[test]
fn test_unrelated_songs_do_not_match() {
    assert!(!is_match(
        "Stairway to Heaven Led Zeppelin",
        "Bohemian Rhapsody Queen"
    ));
    assert!(!is_match("xyzzy", "Bohemian Rhapsody Queen"));
}

#[test]
fn test_similarity_is_bounded() {
    let ratio = similarity("completely different", "nothing alike at all here");
    assert!((0.0..=1.0).contains(&ratio));

    assert_eq!(similarity("", ""), 1.0);
}

#[test]
fn test_similarity_is_symmetric() {
    let a = "Bohemian Rhapsody Queen";
    let b = "Bohemian Rhapsody - Live Aid Queen";
    assert_eq!(similarity(a, b), similarity(b, a));
}
