//! Technology popularity and emergence across repo-work rows.

use std::collections::BTreeMap;

use orgpulse_core::{LimitsConfig, RepoWork, RepositoryConfig, ThresholdConfig};
use serde::Serialize;
use tracing::debug;

use crate::grouping::group_by_repository;
use crate::stats::{distinct, mean, round_to, LabelCount, Tally};

/// Technology usage summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TechnologyTrends {
    pub total_technologies: usize,
    /// Most frequent technologies by row occurrence.
    pub popular_technologies: Vec<LabelCount>,
    /// Technologies seen in very few places, in first-encounter order.
    pub emerging_technologies: Vec<String>,
    pub avg_technologies_per_repo: f64,
    /// Occurrence count per technology.
    pub technology_adoption_rate: BTreeMap<String, usize>,
}

/// Analyze technology trends. Returns `None` when there are no rows.
///
/// Frequencies count rows, not repositories: a technology tagged on five
/// contributors' rows in one repository counts five times.
///
/// # Examples
///
/// ```
/// use orgpulse_core::{LimitsConfig, RepoWork, RepositoryConfig, ThresholdConfig};
/// use orgpulse_insights::technology::analyze_technology_trends;
///
/// let mut a = RepoWork::new("alice", "proj2");
/// a.technologies = vec!["React".into(), "Node.js".into()];
/// let mut b = RepoWork::new("charlie", "proj3");
/// b.technologies = vec!["React".into()];
///
/// let trends = analyze_technology_trends(
///     &[a, b],
///     &LimitsConfig::default(),
///     &ThresholdConfig::default(),
///     &RepositoryConfig::default(),
/// )
/// .unwrap();
/// assert_eq!(trends.popular_technologies[0].label, "React");
/// assert_eq!(trends.popular_technologies[0].count, 2);
/// assert_eq!(trends.emerging_technologies, vec!["Node.js".to_string()]);
/// ```
pub fn analyze_technology_trends(
    works: &[RepoWork],
    limits: &LimitsConfig,
    thresholds: &ThresholdConfig,
    repositories: &RepositoryConfig,
) -> Option<TechnologyTrends> {
    if works.is_empty() {
        return None;
    }

    let mut tally = Tally::default();
    for work in works {
        for tech in distinct(&work.technologies) {
            tally.add(tech);
        }
    }

    let groups = group_by_repository(works, repositories.key);
    let per_repo: Vec<f64> = groups
        .iter()
        .map(|g| g.technologies().len() as f64)
        .collect();

    let threshold = (groups.len() as f64 * thresholds.emerging_technology_ratio).max(1.0);
    let emerging: Vec<String> = tally
        .iter()
        .filter(|(_, count)| (*count as f64) <= threshold)
        .map(|(tech, _)| tech.to_string())
        .take(limits.emerging_technologies)
        .collect();

    debug!(
        technologies = tally.len(),
        repositories = groups.len(),
        threshold,
        "analyzed technology trends"
    );

    Some(TechnologyTrends {
        total_technologies: tally.len(),
        popular_technologies: tally.most_common(limits.popular_technologies),
        emerging_technologies: emerging,
        avg_technologies_per_repo: round_to(mean(&per_repo).unwrap_or(0.0), 2),
        technology_adoption_rate: tally.to_distribution(),
    })
}
