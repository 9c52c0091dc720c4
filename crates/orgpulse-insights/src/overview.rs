//! Organization-wide headline numbers.

use std::collections::BTreeMap;

use orgpulse_core::{ActivityLevel, Contributor, LimitsConfig};
use serde::Serialize;
use tracing::debug;

use crate::stats::{round_to, LabelCount, Tally};

/// High-level metrics over the contributor collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverviewMetrics {
    pub total_contributors: usize,
    pub total_commits: u64,
    pub total_issues: u64,
    /// Mean `repositories_count`, 2 decimals.
    pub avg_repos_per_contributor: f64,
    pub activity_distribution: BTreeMap<ActivityLevel, usize>,
    /// Most common primary languages, descending.
    pub top_languages: Vec<LabelCount>,
    pub commits_per_contributor: f64,
    pub issues_per_contributor: f64,
}

/// Compute overview metrics. Returns `None` when there are no contributors.
///
/// # Examples
///
/// ```
/// use orgpulse_core::{Contributor, LimitsConfig};
/// use orgpulse_insights::overview::overview_metrics;
///
/// let mut alice = Contributor::new("alice");
/// alice.total_commits = 100;
/// let mut bob = Contributor::new("bob");
/// bob.total_commits = 50;
///
/// let overview = overview_metrics(&[alice, bob], &LimitsConfig::default()).unwrap();
/// assert_eq!(overview.total_commits, 150);
/// assert_eq!(overview.commits_per_contributor, 75.0);
/// ```
pub fn overview_metrics(
    contributors: &[Contributor],
    limits: &LimitsConfig,
) -> Option<OverviewMetrics> {
    if contributors.is_empty() {
        return None;
    }
    let n = contributors.len() as f64;

    let total_commits = saturating_total(contributors, |c| c.total_commits);
    let total_issues = saturating_total(contributors, |c| c.total_issues);
    let total_repos = saturating_total(contributors, |c| c.repositories_count);

    let mut activity_distribution: BTreeMap<ActivityLevel, usize> = BTreeMap::new();
    let mut languages = Tally::default();
    for contributor in contributors {
        *activity_distribution
            .entry(contributor.activity_level)
            .or_default() += 1;
        for language in &contributor.primary_languages {
            languages.add(language);
        }
    }

    debug!(
        contributors = contributors.len(),
        languages = languages.len(),
        "computed overview metrics"
    );

    Some(OverviewMetrics {
        total_contributors: contributors.len(),
        total_commits,
        total_issues,
        avg_repos_per_contributor: round_to(total_repos as f64 / n, 2),
        activity_distribution,
        top_languages: languages.most_common(limits.top_languages),
        commits_per_contributor: round_to(total_commits as f64 / n, 2),
        issues_per_contributor: round_to(total_issues as f64 / n, 2),
    })
}

/// Sum a counter, clamping at `u64::MAX`.
fn saturating_total(contributors: &[Contributor], field: impl Fn(&Contributor) -> u64) -> u64 {
    contributors
        .iter()
        .fold(0u64, |acc, c| acc.saturating_add(field(c)))
}
