//! Commits-per-repository productivity ranking and percentiles.

use orgpulse_core::{Contributor, LimitsConfig};
use serde::Serialize;
use tracing::debug;

use crate::stats::{mean, percentile, round_to};

/// Productivity of a single contributor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContributorProductivity {
    pub username: String,
    /// `total_commits / repositories_count`, unrounded.
    pub commits_per_repo: f64,
    pub total_commits: u64,
    pub total_repos: u64,
}

/// Percentiles of the commits-per-repository distribution, 2 decimals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductivityPercentiles {
    #[serde(rename = "90th")]
    pub p90: f64,
    #[serde(rename = "75th")]
    pub p75: f64,
    #[serde(rename = "50th")]
    pub p50: f64,
    #[serde(rename = "25th")]
    pub p25: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductivityMetrics {
    pub top_productive_contributors: Vec<ContributorProductivity>,
    pub avg_commits_per_repo: f64,
    pub productivity_percentiles: ProductivityPercentiles,
}

/// Rank contributors by commits per repository.
///
/// Contributors with zero repositories are excluded entirely. Returns
/// `None` when there are no contributors, no repo-work rows, or nobody
/// with a repository.
///
/// # Examples
///
/// ```
/// use orgpulse_core::{Contributor, LimitsConfig};
/// use orgpulse_insights::productivity::calculate_productivity_metrics;
///
/// let mut alice = Contributor::new("alice");
/// alice.total_commits = 100;
/// alice.repositories_count = 5;
///
/// let metrics = calculate_productivity_metrics(&[alice], true, &LimitsConfig::default()).unwrap();
/// assert_eq!(metrics.top_productive_contributors[0].commits_per_repo, 20.0);
/// assert_eq!(metrics.productivity_percentiles.p50, 20.0);
/// ```
pub fn calculate_productivity_metrics(
    contributors: &[Contributor],
    has_repo_works: bool,
    limits: &LimitsConfig,
) -> Option<ProductivityMetrics> {
    if contributors.is_empty() || !has_repo_works {
        return None;
    }

    let mut ranked: Vec<ContributorProductivity> = contributors
        .iter()
        .filter(|c| c.repositories_count > 0)
        .map(|c| ContributorProductivity {
            username: c.username.clone(),
            commits_per_repo: c.total_commits as f64 / c.repositories_count as f64,
            total_commits: c.total_commits,
            total_repos: c.repositories_count,
        })
        .collect();

    let ratios: Vec<f64> = ranked.iter().map(|p| p.commits_per_repo).collect();
    let avg = mean(&ratios)?;
    let at = |p: f64| percentile(&ratios, p).map(|v| round_to(v, 2));
    let percentiles = ProductivityPercentiles {
        p90: at(90.0)?,
        p75: at(75.0)?,
        p50: at(50.0)?,
        p25: at(25.0)?,
    };

    ranked.sort_by(|a, b| {
        b.commits_per_repo
            .partial_cmp(&a.commits_per_repo)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked.truncate(limits.top_productive_contributors);

    debug!(ranked = ratios.len(), "calculated productivity metrics");

    Some(ProductivityMetrics {
        top_productive_contributors: ranked,
        avg_commits_per_repo: round_to(avg, 2),
        productivity_percentiles: percentiles,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contributor(name: &str, commits: u64, repos: u64) -> Contributor {
        Contributor {
            total_commits: commits,
            repositories_count: repos,
            ..Contributor::new(name)
        }
    }

    fn calculate(contributors: &[Contributor]) -> Option<ProductivityMetrics> {
        calculate_productivity_metrics(contributors, true, &LimitsConfig::default())
    }

    #[test]
    fn ranks_by_commits_per_repo() {
        let metrics = calculate(&[
            contributor("alice", 100, 5),
            contributor("bob", 50, 3),
            contributor("charlie", 25, 2),
        ])
        .unwrap();
        let order: Vec<&str> = metrics
            .top_productive_contributors
            .iter()
            .map(|p| p.username.as_str())
            .collect();
        assert_eq!(order, vec!["alice", "bob", "charlie"]);
        assert_eq!(metrics.top_productive_contributors[0].commits_per_repo, 20.0);
        // (20 + 16.667 + 12.5) / 3
        assert_eq!(metrics.avg_commits_per_repo, 16.39);
        assert_eq!(metrics.productivity_percentiles.p50, 16.67);
        assert_eq!(metrics.productivity_percentiles.p90, 19.33);
        assert_eq!(metrics.productivity_percentiles.p25, 14.58);
    }

    #[test]
    fn zero_repository_contributors_are_excluded() {
        let base = vec![contributor("alice", 100, 5), contributor("bob", 50, 3)];
        let mut extended = base.clone();
        extended.push(contributor("lurker", 40, 0));

        let a = calculate(&base).unwrap();
        let b = calculate(&extended).unwrap();
        assert_eq!(a.avg_commits_per_repo, b.avg_commits_per_repo);
        assert_eq!(a.productivity_percentiles, b.productivity_percentiles);
        assert!(b
            .top_productive_contributors
            .iter()
            .all(|p| p.username != "lurker"));
    }

    #[test]
    fn nobody_with_repositories_is_none() {
        assert!(calculate(&[contributor("a", 10, 0)]).is_none());
    }

    #[test]
    fn requires_repo_works() {
        let contributors = vec![contributor("a", 10, 1)];
        assert!(
            calculate_productivity_metrics(&contributors, false, &LimitsConfig::default())
                .is_none()
        );
    }

    #[test]
    fn percentile_keys_serialize_as_ordinals() {
        let metrics = calculate(&[contributor("a", 10, 1)]).unwrap();
        let json = serde_json::to_value(&metrics).unwrap();
        assert_eq!(json["productivity_percentiles"]["90th"], 10.0);
        assert_eq!(json["productivity_percentiles"]["25th"], 10.0);
    }

    #[test]
    fn top_list_is_capped() {
        let contributors: Vec<Contributor> = (1..=15)
            .map(|i| contributor(&format!("dev{i}"), i * 10, 1))
            .collect();
        let metrics = calculate(&contributors).unwrap();
        assert_eq!(metrics.top_productive_contributors.len(), 10);
        assert_eq!(metrics.top_productive_contributors[0].username, "dev15");
    }
}
