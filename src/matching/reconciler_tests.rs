use super::*;
use std::collections::HashSet;

fn desired(title: &str, year: Option<i32>, imdb: &str) -> DesiredItem {
    DesiredItem {
        title: title.to_string(),
        year,
        external_id: imdb.to_string(),
        original_title: None,
        line: 2,
    }
}

fn entry(title: &str, year: Option<i32>, id: &str) -> LibraryEntry {
    LibraryEntry {
        title: title.to_string(),
        year,
        internal_id: id.to_string(),
        imdb_id: None,
        section_id: Some("1".to_string()),
    }
}

fn with_imdb(mut entry: LibraryEntry, imdb: &str) -> LibraryEntry {
    entry.imdb_id = Some(imdb.to_string());
    entry
}

fn no_drift(threshold: f64) -> MatchOptions {
    MatchOptions {
        max_year_drift: None,
        ..MatchOptions::with_threshold(threshold)
    }
}

// ── documented scenarios ─────────────────────────────────────────────

#[test]
fn exact_title_and_year_is_matched() {
    let items = vec![desired("The Matrix", Some(1999), "tt0133093")];
    let library = vec![entry("The Matrix", Some(1999), "7")];

    let results = reconcile(&items, &library, &MatchOptions::with_threshold(0.8));

    assert_eq!(results.len(), 1);
    match &results[0] {
        MatchResult::Matched {
            entry,
            score,
            method,
            ..
        } => {
            assert_eq!(entry.internal_id, "7");
            assert!((score - 1.0).abs() < 1e-9);
            assert_eq!(*method, MatchMethod::TitleYear);
        }
        other => panic!("expected Matched, got {other:?}"),
    }
}

#[test]
fn sequel_title_is_below_threshold() {
    let items = vec![desired("The Matrix", Some(1999), "tt0133093")];
    let library = vec![entry("The Matrix Reloaded", Some(2003), "8")];

    let results = reconcile(&items, &library, &no_drift(0.8));

    match &results[0] {
        MatchResult::Unmatched {
            reason: UnmatchedReason::BelowThreshold { best_score, best_title },
            ..
        } => {
            assert!(*best_score < 0.8);
            assert_eq!(best_title, "The Matrix Reloaded (2003)");
        }
        other => panic!("expected BelowThreshold, got {other:?}"),
    }
}

#[test]
fn sequel_outside_year_drift_has_no_candidate() {
    let items = vec![desired("The Matrix", Some(1999), "tt0133093")];
    let library = vec![entry("The Matrix Reloaded", Some(2003), "8")];

    let results = reconcile(&items, &library, &MatchOptions::with_threshold(0.8));

    assert!(matches!(
        results[0],
        MatchResult::Unmatched {
            reason: UnmatchedReason::NoCandidate,
            ..
        }
    ));
}

#[test]
fn year_boost_separates_remakes() {
    let items = vec![desired("Up", Some(2009), "tt1049413")];
    let library = vec![entry("Up", Some(2009), "1"), entry("Up", Some(1976), "2")];
    let options = MatchOptions {
        margin: 0.1,
        ..no_drift(0.5)
    };

    let results = reconcile(&items, &library, &options);

    match &results[0] {
        MatchResult::Matched { entry, method, .. } => {
            assert_eq!(entry.internal_id, "1");
            assert_eq!(*method, MatchMethod::TitleYear);
        }
        other => panic!("expected Matched, got {other:?}"),
    }
}

#[test]
fn without_year_boost_remakes_are_ambiguous() {
    let items = vec![desired("Up", Some(2009), "tt1049413")];
    let library = vec![entry("Up", Some(2009), "1"), entry("Up", Some(1976), "2")];
    let options = MatchOptions {
        margin: 0.1,
        year_weight: 0.0,
        ..no_drift(0.5)
    };

    let results = reconcile(&items, &library, &options);

    match &results[0] {
        MatchResult::Ambiguous { candidates, .. } => {
            let ids: Vec<_> = candidates.iter().map(|c| c.entry.internal_id.as_str()).collect();
            assert_eq!(ids, vec!["1", "2"]);
            assert!(candidates[0].score >= candidates[1].score);
        }
        other => panic!("expected Ambiguous, got {other:?}"),
    }
}

#[test]
fn year_guard_drops_remake_before_margin_check() {
    let items = vec![desired("Up", Some(2009), "tt1049413")];
    let library = vec![entry("Up", Some(2009), "1"), entry("Up", Some(1976), "2")];
    let options = MatchOptions {
        margin: 0.1,
        year_weight: 0.0,
        ..MatchOptions::with_threshold(0.5)
    };

    let results = reconcile(&items, &library, &options);

    match &results[0] {
        MatchResult::Matched { entry, method, .. } => {
            assert_eq!(entry.internal_id, "1");
            assert_eq!(*method, MatchMethod::TitleYear);
        }
        other => panic!("expected Matched, got {other:?}"),
    }
}

// ── properties ───────────────────────────────────────────────────────

fn sample_items() -> Vec<DesiredItem> {
    vec![
        desired("The Matrix", Some(1999), "tt0133093"),
        desired("Heat", Some(1995), "tt0113277"),
        desired("Alien", Some(1979), "tt0078748"),
        desired("Aliens", Some(1986), "tt0090605"),
        desired("Up", Some(2009), "tt1049413"),
        desired("Blade Runner", Some(1982), "tt0083658"),
        desired("Nonexistent Film", Some(2020), "tt9999999"),
    ]
}

fn sample_library() -> Vec<LibraryEntry> {
    vec![
        entry("Matrix, The", Some(1999), "10"),
        entry("Heat", Some(1995), "11"),
        entry("Alien", Some(1979), "12"),
        entry("Aliens", Some(1986), "13"),
        entry("Up", Some(2009), "14"),
        entry("Blade Runner", Some(1982), "15"),
        entry("Blade Runner 2049", Some(2017), "16"),
        entry("Heat", Some(1986), "17"),
    ]
}

#[test]
fn one_result_per_item_in_input_order() {
    let items = sample_items();
    let results = reconcile(&items, &sample_library(), &MatchOptions::default());

    assert_eq!(results.len(), items.len());
    for (item, result) in items.iter().zip(&results) {
        assert_eq!(result.item(), item);
    }
}

#[test]
fn no_entry_is_claimed_twice() {
    // three requests for the same film, one copy in the library
    let items = vec![
        desired("Heat", Some(1995), "tt0113277"),
        desired("Heat", Some(1995), "tt0113277"),
        desired("Heat", Some(1995), "tt0113277"),
    ];
    let library = vec![entry("Heat", Some(1995), "11")];

    for threshold in [0.5, 0.85, 1.0] {
        let results = reconcile(&items, &library, &MatchOptions::with_threshold(threshold));
        let claimed: Vec<_> = results
            .iter()
            .filter_map(MatchResult::matched_entry)
            .map(|e| e.internal_id.clone())
            .collect();
        let unique: HashSet<_> = claimed.iter().collect();
        assert_eq!(claimed.len(), unique.len());
        assert_eq!(claimed.len(), 1);
    }
}

#[test]
fn raising_threshold_never_adds_matches() {
    let items = sample_items();
    let library = sample_library();

    let mut previous = usize::MAX;
    for step in 0..=20 {
        let threshold = step as f64 / 20.0;
        let matched = reconcile(&items, &library, &MatchOptions::with_threshold(threshold))
            .iter()
            .filter(|r| r.is_matched())
            .count();
        assert!(
            matched <= previous,
            "threshold {threshold} produced {matched} matches, previous {previous}"
        );
        previous = matched;
    }
}

#[test]
fn reconcile_is_deterministic() {
    let items = sample_items();
    let library = sample_library();
    let options = MatchOptions::default();

    assert_eq!(
        reconcile(&items, &library, &options),
        reconcile(&items, &library, &options)
    );
}

// ── edge cases ───────────────────────────────────────────────────────

#[test]
fn empty_library_yields_all_unmatched() {
    let results = reconcile(&sample_items(), &[], &MatchOptions::default());
    assert!(results.iter().all(|r| matches!(
        r,
        MatchResult::Unmatched {
            reason: UnmatchedReason::EmptyLibrary,
            ..
        }
    )));
}

#[test]
fn empty_desired_list_yields_nothing() {
    assert!(reconcile(&[], &sample_library(), &MatchOptions::default()).is_empty());
}

#[test]
fn imdb_id_wins_over_fuzzy_title() {
    // library title differs completely, but the GUID carries the IMDB id
    let items = vec![desired("Spirited Away", Some(2001), "tt0245429")];
    let library = vec![
        entry("Spirited Away", Some(2001), "20"),
        with_imdb(entry("Sen to Chihiro no Kamikakushi", Some(2001), "21"), "tt0245429"),
    ];

    let results = reconcile(&items, &library, &MatchOptions::default());

    match &results[0] {
        MatchResult::Matched { entry, method, score, .. } => {
            assert_eq!(entry.internal_id, "21");
            assert_eq!(*method, MatchMethod::ExternalId);
            assert_eq!(*score, 1.0);
        }
        other => panic!("expected Matched, got {other:?}"),
    }
}

#[test]
fn id_pass_runs_before_fuzzy_pass() {
    // the first item would fuzzily grab entry 30 if ids were not claimed first
    let items = vec![
        desired("Heat", Some(1995), "tt0000000"),
        desired("Heat", Some(1995), "tt0113277"),
    ];
    let library = vec![with_imdb(entry("Heat", Some(1995), "30"), "tt0113277")];

    let results = reconcile(&items, &library, &MatchOptions::default());

    assert!(matches!(
        results[0],
        MatchResult::Unmatched {
            reason: UnmatchedReason::NoCandidate,
            ..
        }
    ));
    assert_eq!(results[1].matched_entry().unwrap().internal_id, "30");
}

#[test]
fn title_only_match_when_year_is_off_by_one() {
    let items = vec![desired("Heat", Some(1996), "tt0113277")];
    let library = vec![entry("Heat", Some(1995), "11")];

    let results = reconcile(&items, &library, &MatchOptions::default());

    match &results[0] {
        MatchResult::Matched { method, score, .. } => {
            assert_eq!(*method, MatchMethod::Title);
            assert!((score - 0.85).abs() < 1e-9);
        }
        other => panic!("expected Matched, got {other:?}"),
    }
}

#[test]
fn ambiguous_results_do_not_claim_entries() {
    let options = MatchOptions {
        year_weight: 0.0,
        ..no_drift(0.5)
    };
    let items = vec![
        desired("Up", None, "tt1049413"),
        desired("Up", Some(1976), "tt0075375"),
    ];
    let library = vec![entry("Up", Some(2009), "1"), entry("Up", Some(1976), "2")];

    let results = reconcile(&items, &library, &options);

    assert!(results[0].is_ambiguous());
    // second item still sees both entries, so it is ambiguous too
    assert!(results[1].is_ambiguous());
}

#[test]
fn ambiguous_candidates_are_capped() {
    let options = MatchOptions {
        max_candidates: 2,
        year_weight: 0.0,
        ..no_drift(0.5)
    };
    let items = vec![desired("Hamlet", None, "tt0116477")];
    let library = vec![
        entry("Hamlet", Some(1948), "1"),
        entry("Hamlet", Some(1990), "2"),
        entry("Hamlet", Some(1996), "3"),
    ];

    let results = reconcile(&items, &library, &options);

    match &results[0] {
        MatchResult::Ambiguous { candidates, .. } => assert_eq!(candidates.len(), 2),
        other => panic!("expected Ambiguous, got {other:?}"),
    }
}

#[test]
fn reconcile_rows_reports_invalid_rows_in_place() {
    let rows = vec![
        ParsedRow::Valid(desired("Heat", Some(1995), "tt0113277")),
        ParsedRow::Invalid(RowDiagnostic {
            line: 3,
            title: "The Matrix".to_string(),
            year: None,
            external_id: "tt0133093".to_string(),
            note: "Unparseable year 'abc'".to_string(),
        }),
    ];
    let library = vec![with_imdb(entry("The Matrix", Some(1999), "7"), "tt0133093")];

    let results = reconcile_rows(&rows, &library, &MatchOptions::default());

    assert_eq!(results.len(), 2);
    assert!(matches!(
        results[0],
        MatchResult::Unmatched {
            reason: UnmatchedReason::NoCandidate,
            ..
        }
    ));
    match &results[1] {
        MatchResult::Unmatched {
            item,
            reason: UnmatchedReason::InvalidRow(note),
        } => {
            assert_eq!(item.line, 3);
            assert_eq!(note, "Unparseable year 'abc'");
        }
        other => panic!("expected InvalidRow, got {other:?}"),
    }
}

#[test]
fn inputs_are_not_mutated() {
    let items = sample_items();
    let library = sample_library();
    let items_before = items.clone();
    let library_before = library.clone();

    let _ = reconcile(&items, &library, &MatchOptions::default());

    assert_eq!(items, items_before);
    assert_eq!(library, library_before);
}
