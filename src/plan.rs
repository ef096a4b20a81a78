//! Idempotent update plan for the target collection.
//!
//! Matched entries that are already collection members are skipped, so
//! running the same import twice adds nothing the second time.

use std::collections::HashSet;

use crate::models::{DesiredItem, LibraryEntry, MatchMethod, MatchResult};

/// One movie to tag with the collection
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedAddition {
    /// Index of the originating result
    pub index: usize,
    pub item: DesiredItem,
    pub entry: LibraryEntry,
    pub method: MatchMethod,
    pub score: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdatePlan {
    /// In input order
    pub additions: Vec<PlannedAddition>,
    /// Result indices whose entry is already in the collection
    pub already_present: Vec<usize>,
}

impl UpdatePlan {
    pub fn is_noop(&self) -> bool {
        self.additions.is_empty()
    }
}

/// Splits matched results into additions and already-present members
pub fn build_plan(results: &[MatchResult], existing_members: &[LibraryEntry]) -> UpdatePlan {
    let member_keys: HashSet<&str> = existing_members
        .iter()
        .map(|m| m.internal_id.as_str())
        .collect();
    let member_imdb: HashSet<String> = existing_members
        .iter()
        .filter_map(|m| m.imdb_id.as_deref())
        .map(str::to_ascii_lowercase)
        .collect();

    let mut plan = UpdatePlan::default();
    for (index, result) in results.iter().enumerate() {
        let MatchResult::Matched {
            item,
            entry,
            score,
            method,
        } = result
        else {
            continue;
        };

        let present = member_keys.contains(entry.internal_id.as_str())
            || member_imdb.contains(&item.external_id.to_ascii_lowercase());
        if present {
            log::info!("SKIPPED: {} already in collection", entry.label());
            plan.already_present.push(index);
        } else {
            plan.additions.push(PlannedAddition {
                index,
                item: item.clone(),
                entry: entry.clone(),
                method: *method,
                score: *score,
            });
        }
    }

    log::info!(
        "Update plan: {} to add, {} already present",
        plan.additions.len(),
        plan.already_present.len()
    );
    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UnmatchedReason;

    fn item(title: &str, imdb: &str) -> DesiredItem {
        DesiredItem {
            title: title.to_string(),
            year: Some(1999),
            external_id: imdb.to_string(),
            original_title: None,
            line: 2,
        }
    }

    fn entry(title: &str, key: &str, imdb: Option<&str>) -> LibraryEntry {
        LibraryEntry {
            title: title.to_string(),
            year: Some(1999),
            internal_id: key.to_string(),
            imdb_id: imdb.map(str::to_string),
            section_id: Some("1".to_string()),
        }
    }

    fn matched(title: &str, imdb: &str, key: &str) -> MatchResult {
        MatchResult::Matched {
            item: item(title, imdb),
            entry: entry(title, key, None),
            score: 0.95,
            method: MatchMethod::TitleYear,
        }
    }

    #[test]
    fn new_matches_become_additions_in_order() {
        let results = vec![
            matched("The Matrix", "tt0133093", "7"),
            MatchResult::Unmatched {
                item: item("Heat", "tt0113277"),
                reason: UnmatchedReason::NoCandidate,
            },
            matched("Alien", "tt0078748", "9"),
        ];

        let plan = build_plan(&results, &[]);
        let indices: Vec<_> = plan.additions.iter().map(|a| a.index).collect();
        assert_eq!(indices, vec![0, 2]);
        assert!(plan.already_present.is_empty());
    }

    #[test]
    fn members_are_skipped_by_key_or_imdb_id() {
        let results = vec![
            matched("The Matrix", "tt0133093", "7"),
            matched("Alien", "tt0078748", "9"),
            matched("Heat", "tt0113277", "11"),
        ];
        let members = vec![
            entry("The Matrix", "7", None),
            entry("Alien (Director's Cut)", "99", Some("TT0078748")),
        ];

        let plan = build_plan(&results, &members);
        assert_eq!(plan.already_present, vec![0, 1]);
        assert_eq!(plan.additions.len(), 1);
        assert_eq!(plan.additions[0].entry.internal_id, "11");
    }

    #[test]
    fn second_run_is_a_noop() {
        let results = vec![matched("The Matrix", "tt0133093", "7")];
        let first = build_plan(&results, &[]);
        let members: Vec<_> = first.additions.iter().map(|a| a.entry.clone()).collect();

        let second = build_plan(&results, &members);
        assert!(second.is_noop());
        assert_eq!(second.already_present, vec![0]);
    }
}
