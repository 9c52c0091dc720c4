//! Per-repository activity aggregation and technology diversity.

use std::collections::{BTreeMap, HashSet};

use orgpulse_core::{LimitsConfig, RepoWork, RepositoryConfig};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use tracing::debug;

use crate::grouping::{group_by_repository, RepositoryGroup};
use crate::stats::{describe, mean, round_to, ColumnSummary, LabelCount};

/// Summed activity for one repository.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepositoryActivity {
    /// Grouping key; used as the JSON object key, not repeated inside.
    #[serde(skip)]
    pub repository: String,
    pub repository_name: String,
    pub commit_count: u64,
    pub issue_count: u64,
    /// Rows for this repository. Repeated (contributor, repository) rows
    /// are counted individually unless `dedupe_rows` is set.
    pub contributor_count: usize,
}

/// Repository-level patterns across all repo-work rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepositoryInsights {
    pub total_repositories: usize,
    /// Top repositories by summed commits, keyed by repository.
    #[serde(serialize_with = "keyed_by_repository")]
    pub most_active_repositories: Vec<RepositoryActivity>,
    pub avg_contributors_per_repo: f64,
    /// Repositories ranked by distinct technology count.
    pub most_diverse_repositories: Vec<LabelCount>,
    /// Describe-style statistics per column of the per-repository table.
    pub repository_activity_distribution: BTreeMap<&'static str, ColumnSummary>,
}

impl RepositoryInsights {
    pub fn repository(&self, key: &str) -> Option<&RepositoryActivity> {
        self.most_active_repositories
            .iter()
            .find(|r| r.repository == key)
    }
}

fn keyed_by_repository<S: Serializer>(
    repos: &[RepositoryActivity],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(repos.len()))?;
    for repo in repos {
        map.serialize_entry(&repo.repository, repo)?;
    }
    map.end()
}

/// Analyze repository patterns. Returns `None` when there are no rows.
///
/// # Examples
///
/// ```
/// use orgpulse_core::{LimitsConfig, RepoWork, RepositoryConfig};
/// use orgpulse_insights::repositories::analyze_repository_patterns;
///
/// let mut a = RepoWork::new("alice", "proj1");
/// a.commit_count = 60;
/// let mut b = RepoWork::new("bob", "proj1");
/// b.commit_count = 30;
///
/// let insights = analyze_repository_patterns(
///     &[a, b],
///     &LimitsConfig::default(),
///     &RepositoryConfig::default(),
/// )
/// .unwrap();
/// let proj1 = insights.repository("proj1").unwrap();
/// assert_eq!(proj1.commit_count, 90);
/// assert_eq!(proj1.contributor_count, 2);
/// ```
pub fn analyze_repository_patterns(
    works: &[RepoWork],
    limits: &LimitsConfig,
    repositories: &RepositoryConfig,
) -> Option<RepositoryInsights> {
    if works.is_empty() {
        return None;
    }

    let groups = group_by_repository(works, repositories.key);
    let activity: Vec<RepositoryActivity> = groups
        .iter()
        .map(|group| summarize(group, repositories.dedupe_rows))
        .collect();

    let contributor_counts: Vec<f64> = activity
        .iter()
        .map(|r| r.contributor_count as f64)
        .collect();
    let avg_contributors = mean(&contributor_counts).unwrap_or(0.0);

    let mut distribution = BTreeMap::new();
    let columns: [(&'static str, Vec<f64>); 3] = [
        (
            "commit_count",
            activity.iter().map(|r| r.commit_count as f64).collect(),
        ),
        (
            "issue_count",
            activity.iter().map(|r| r.issue_count as f64).collect(),
        ),
        ("contributor_count", contributor_counts),
    ];
    for (column, values) in columns {
        if let Some(summary) = describe(&values) {
            distribution.insert(column, summary);
        }
    }

    let mut diversity: Vec<LabelCount> = groups
        .iter()
        .map(|group| LabelCount::new(group.key, group.technologies().len()))
        .collect();
    diversity.sort_by(|a, b| b.count.cmp(&a.count));
    diversity.truncate(limits.most_diverse_repositories);

    let total_repositories = activity.len();
    let mut most_active = activity;
    most_active.sort_by(|a, b| b.commit_count.cmp(&a.commit_count));
    most_active.truncate(limits.top_repositories);

    debug!(
        repositories = total_repositories,
        rows = works.len(),
        "analyzed repository patterns"
    );

    Some(RepositoryInsights {
        total_repositories,
        most_active_repositories: most_active,
        avg_contributors_per_repo: round_to(avg_contributors, 2),
        most_diverse_repositories: diversity,
        repository_activity_distribution: distribution,
    })
}

fn summarize(group: &RepositoryGroup<'_>, dedupe_rows: bool) -> RepositoryActivity {
    let contributor_count = if dedupe_rows {
        group
            .rows
            .iter()
            .map(|w| w.contributor_id.as_str())
            .collect::<HashSet<_>>()
            .len()
    } else {
        group.rows.len()
    };

    RepositoryActivity {
        repository: group.key.to_string(),
        repository_name: group.name.to_string(),
        commit_count: group
            .rows
            .iter()
            .fold(0u64, |acc, w| acc.saturating_add(w.commit_count)),
        issue_count: group
            .rows
            .iter()
            .fold(0u64, |acc, w| acc.saturating_add(w.issue_count)),
        contributor_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orgpulse_core::RepositoryKey;

    fn work(contributor: &str, repo: &str, commits: u64, techs: &[&str]) -> RepoWork {
        RepoWork {
            repository_name: format!("{repo}-name"),
            commit_count: commits,
            issue_count: commits / 5,
            technologies: techs.iter().map(|s| s.to_string()).collect(),
            ..RepoWork::new(contributor, repo)
        }
    }

    fn analyze(works: &[RepoWork], repositories: &RepositoryConfig) -> RepositoryInsights {
        analyze_repository_patterns(works, &LimitsConfig::default(), repositories).unwrap()
    }

    fn sample() -> Vec<RepoWork> {
        vec![
            work("alice", "proj1", 60, &["Python", "Flask", "PostgreSQL"]),
            work("alice", "proj2", 40, &["React", "Node.js", "MongoDB"]),
            work("bob", "proj1", 30, &["Java", "Spring", "MySQL"]),
            work("charlie", "proj3", 25, &["React", "TypeScript", "GraphQL"]),
        ]
    }

    #[test]
    fn sums_per_repository_and_ranks_by_commits() {
        let insights = analyze(&sample(), &RepositoryConfig::default());
        assert_eq!(insights.total_repositories, 3);

        let order: Vec<&str> = insights
            .most_active_repositories
            .iter()
            .map(|r| r.repository.as_str())
            .collect();
        assert_eq!(order, vec!["proj1", "proj2", "proj3"]);

        let proj1 = insights.repository("proj1").unwrap();
        assert_eq!(proj1.commit_count, 90);
        assert_eq!(proj1.issue_count, 18);
        assert_eq!(proj1.contributor_count, 2);
        assert_eq!(proj1.repository_name, "proj1-name");
        assert_eq!(insights.avg_contributors_per_repo, 1.33);
    }

    #[test]
    fn technology_diversity_uses_union_per_repository() {
        let insights = analyze(&sample(), &RepositoryConfig::default());
        assert_eq!(
            insights.most_diverse_repositories[0],
            LabelCount::new("proj1", 6)
        );
        assert_eq!(insights.most_diverse_repositories.len(), 3);
    }

    #[test]
    fn duplicate_rows_over_count_unless_deduped() {
        let works = vec![
            work("alice", "proj1", 10, &[]),
            work("alice", "proj1", 5, &[]),
            work("bob", "proj1", 1, &[]),
        ];
        let raw = analyze(&works, &RepositoryConfig::default());
        assert_eq!(raw.repository("proj1").unwrap().contributor_count, 3);

        let deduped = analyze(
            &works,
            &RepositoryConfig {
                dedupe_rows: true,
                ..RepositoryConfig::default()
            },
        );
        let proj1 = deduped.repository("proj1").unwrap();
        assert_eq!(proj1.contributor_count, 2);
        // Counters are still summed over every row.
        assert_eq!(proj1.commit_count, 16);
    }

    #[test]
    fn grouping_by_name_merges_same_display_name() {
        let mut a = work("alice", "org-a/api", 5, &[]);
        a.repository_name = "api".into();
        let mut b = work("bob", "org-b/api", 7, &[]);
        b.repository_name = "api".into();

        let by_id = analyze(&[a.clone(), b.clone()], &RepositoryConfig::default());
        assert_eq!(by_id.total_repositories, 2);

        let by_name = analyze(
            &[a, b],
            &RepositoryConfig {
                key: RepositoryKey::Name,
                ..RepositoryConfig::default()
            },
        );
        assert_eq!(by_name.total_repositories, 1);
        assert_eq!(by_name.repository("api").unwrap().commit_count, 12);
    }

    #[test]
    fn activity_distribution_describes_each_column() {
        let insights = analyze(&sample(), &RepositoryConfig::default());
        let commits = &insights.repository_activity_distribution["commit_count"];
        assert_eq!(commits.count, 3);
        assert_eq!(commits.min, 25.0);
        assert_eq!(commits.max, 90.0);
        assert_eq!(commits.p50, 40.0);
        assert!(insights
            .repository_activity_distribution
            .contains_key("contributor_count"));
    }

    #[test]
    fn most_active_serializes_as_keyed_object() {
        let insights = analyze(&sample(), &RepositoryConfig::default());
        let json = serde_json::to_value(&insights).unwrap();
        let proj1 = &json["most_active_repositories"]["proj1"];
        assert_eq!(proj1["contributor_count"], 2);
        assert_eq!(proj1["commit_count"], 90);
        assert!(proj1.get("repository").is_none());
    }

    #[test]
    fn empty_is_none() {
        assert!(analyze_repository_patterns(
            &[],
            &LimitsConfig::default(),
            &RepositoryConfig::default()
        )
        .is_none());
    }
}
