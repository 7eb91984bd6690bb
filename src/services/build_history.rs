use std::collections::{BTreeMap, HashSet};

use crate::domain::models::{BranchBuildSummary, BuildHistory, RawBuildRecord};

/// Commit messages longer than this many characters are truncated.
pub const COMMIT_MESSAGE_MAX_CHARS: usize = 50;

const ELLIPSIS: &str = "...";

/// Groups raw build records per branch for the branch/build selectors.
#[derive(Debug, Clone, Default)]
pub struct BuildHistoryAggregator;

impl BuildHistoryAggregator {
    pub fn new() -> Self {
        Self
    }

    /// Aggregate `records` into distinct branches and per-branch builds.
    ///
    /// Branches keep the first-seen order of the input. Builds are sorted by
    /// build number descending *before* grouping; both the sort and the
    /// grouping are stable, so each branch's list stays descending and ties
    /// keep their input order.
    pub fn aggregate(&self, records: &[RawBuildRecord]) -> BuildHistory {
        let mut seen = HashSet::new();
        let branches: Vec<String> = records
            .iter()
            .filter(|record| seen.insert(record.branch.as_str()))
            .map(|record| record.branch.clone())
            .collect();

        let mut sorted: Vec<&RawBuildRecord> = records.iter().collect();
        sorted.sort_by(|a, b| b.build_number.cmp(&a.build_number));

        let mut branch_builds: BTreeMap<String, Vec<BranchBuildSummary>> = BTreeMap::new();
        for record in sorted {
            branch_builds
                .entry(record.branch.clone())
                .or_default()
                .push(summarize(record));
        }

        tracing::debug!(
            records = records.len(),
            branches = branches.len(),
            "aggregated build history"
        );

        BuildHistory {
            branches,
            branch_builds,
        }
    }
}

fn summarize(record: &RawBuildRecord) -> BranchBuildSummary {
    BranchBuildSummary {
        status: record.status_text.clone(),
        commit_hash: record.commit_hash.clone(),
        commit_message: record.commit_message.as_deref().map(truncate_commit_message),
        build_number: record.build_number,
        build_slug: record.slug.clone(),
    }
}

/// First line of `message`, cut to [`COMMIT_MESSAGE_MAX_CHARS`] characters
/// plus an ellipsis when longer.
pub fn truncate_commit_message(message: &str) -> String {
    let first_line = message.split('\n').next().unwrap_or_default();
    if first_line.chars().count() > COMMIT_MESSAGE_MAX_CHARS {
        let mut truncated: String = first_line.chars().take(COMMIT_MESSAGE_MAX_CHARS).collect();
        truncated.push_str(ELLIPSIS);
        truncated
    } else {
        first_line.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(branch: &str, number: i64, message: Option<&str>) -> RawBuildRecord {
        RawBuildRecord {
            branch: branch.to_string(),
            status_text: "success".to_string(),
            commit_hash: format!("hash-{number}"),
            commit_message: message.map(str::to_string),
            build_number: number,
            slug: format!("slug-{number}"),
            triggered_at: None,
            finished_at: None,
            environment: None,
        }
    }

    #[test]
    fn test_empty_input() {
        let history = BuildHistoryAggregator::new().aggregate(&[]);
        assert!(history.branches.is_empty());
        assert!(history.branch_builds.is_empty());
    }

    #[test]
    fn test_branches_keep_first_seen_order() {
        let records = vec![
            build("feature", 1, None),
            build("main", 3, None),
            build("feature", 5, None),
            build("release", 2, None),
        ];
        let history = BuildHistoryAggregator::new().aggregate(&records);
        assert_eq!(history.branches, vec!["feature", "main", "release"]);
    }

    #[test]
    fn test_branch_builds_descending() {
        let records = vec![
            build("main", 1, None),
            build("main", 7, None),
            build("feature", 4, None),
            build("main", 3, None),
        ];
        let history = BuildHistoryAggregator::new().aggregate(&records);
        let numbers: Vec<i64> = history.branch_builds["main"]
            .iter()
            .map(|b| b.build_number)
            .collect();
        assert_eq!(numbers, vec![7, 3, 1]);
        assert_eq!(history.branch_builds["feature"][0].build_slug, "slug-4");
    }

    #[test]
    fn test_equal_build_numbers_keep_input_order() {
        let mut first = build("main", 2, None);
        first.slug = "first".to_string();
        let mut second = build("main", 2, None);
        second.slug = "second".to_string();
        let history = BuildHistoryAggregator::new().aggregate(&[first, second]);
        let slugs: Vec<&str> = history.branch_builds["main"]
            .iter()
            .map(|b| b.build_slug.as_str())
            .collect();
        assert_eq!(slugs, vec!["first", "second"]);
    }

    #[test]
    fn test_summary_fields() {
        let history =
            BuildHistoryAggregator::new().aggregate(&[build("main", 9, Some("Fix\nbody"))]);
        assert_eq!(
            history.branch_builds["main"],
            vec![BranchBuildSummary {
                status: "success".to_string(),
                commit_hash: "hash-9".to_string(),
                commit_message: Some("Fix".to_string()),
                build_number: 9,
                build_slug: "slug-9".to_string(),
            }]
        );
    }

    #[test]
    fn test_truncate_multiline_message() {
        assert_eq!(truncate_commit_message("first line\nsecond line"), "first line");
    }

    #[test]
    fn test_truncate_long_message() {
        let message = "a".repeat(60);
        assert_eq!(truncate_commit_message(&message), format!("{}...", "a".repeat(50)));
    }

    #[test]
    fn test_message_of_exactly_fifty_chars_unchanged() {
        let message = "b".repeat(50);
        assert_eq!(truncate_commit_message(&message), message);
    }

    #[test]
    fn test_truncate_counts_characters_not_bytes() {
        let message = "é".repeat(51);
        assert_eq!(truncate_commit_message(&message), format!("{}...", "é".repeat(50)));
    }

    #[test]
    fn test_absent_message_stays_absent() {
        let history = BuildHistoryAggregator::new().aggregate(&[build("main", 1, None)]);
        assert_eq!(history.branch_builds["main"][0].commit_message, None);
    }
}
