//! Per-contributor report: a read projection over one contributor and
//! their repo-work rows.

use orgpulse_core::{ActivityLevel, ContributionStyle, Contributor, RepoWork};
use serde::Serialize;

use crate::stats::round_to;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BasicInfo {
    pub username: String,
    pub activity_level: ActivityLevel,
    pub contribution_style: ContributionStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportMetrics {
    pub total_commits: u64,
    pub total_issues: u64,
    pub total_repositories: u64,
    /// 2 decimals; 0.0 when the contributor has no repositories.
    pub commits_per_repo: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSkills {
    pub technical_skills: Vec<String>,
    pub expertise_areas: Vec<String>,
    pub primary_languages: Vec<String>,
}

/// One repo-work row as seen from the contributor's side.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepositoryContribution {
    /// Repository display name.
    pub repository: String,
    pub commits: u64,
    pub issues: u64,
    pub technologies: Vec<String>,
    pub contribution_type: String,
}

impl From<&RepoWork> for RepositoryContribution {
    fn from(work: &RepoWork) -> Self {
        Self {
            repository: work.repository_name.clone(),
            commits: work.commit_count,
            issues: work.issue_count,
            technologies: work.technologies.clone(),
            contribution_type: work.contribution_type.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContributorReport {
    pub basic_info: BasicInfo,
    pub metrics: ReportMetrics,
    pub skills: ReportSkills,
    /// One entry per matching row, in input order.
    pub repository_breakdown: Vec<RepositoryContribution>,
    /// Externally generated narrative, empty when absent.
    pub ai_summary: String,
}

/// Build the report for `username`. Returns `None` if no contributor has
/// that username.
///
/// # Examples
///
/// ```
/// use orgpulse_core::{Contributor, RepoWork};
/// use orgpulse_insights::report::contributor_report;
///
/// let mut alice = Contributor::new("alice");
/// alice.total_commits = 100;
/// alice.repositories_count = 5;
/// let works = vec![RepoWork::new("alice", "proj1"), RepoWork::new("bob", "proj1")];
///
/// let report = contributor_report(&[alice], &works, "alice").unwrap();
/// assert_eq!(report.metrics.commits_per_repo, 20.0);
/// assert_eq!(report.repository_breakdown.len(), 1);
///
/// assert!(contributor_report(&[], &works, "ghost").is_none());
/// ```
pub fn contributor_report(
    contributors: &[Contributor],
    works: &[RepoWork],
    username: &str,
) -> Option<ContributorReport> {
    let contributor = contributors.iter().find(|c| c.username == username)?;

    let commits_per_repo = if contributor.repositories_count > 0 {
        round_to(
            contributor.total_commits as f64 / contributor.repositories_count as f64,
            2,
        )
    } else {
        0.0
    };

    Some(ContributorReport {
        basic_info: BasicInfo {
            username: contributor.username.clone(),
            activity_level: contributor.activity_level,
            contribution_style: contributor.contribution_style,
        },
        metrics: ReportMetrics {
            total_commits: contributor.total_commits,
            total_issues: contributor.total_issues,
            total_repositories: contributor.repositories_count,
            commits_per_repo,
        },
        skills: ReportSkills {
            technical_skills: contributor.skills.clone(),
            expertise_areas: contributor.expertise_areas.clone(),
            primary_languages: contributor.primary_languages.clone(),
        },
        repository_breakdown: works
            .iter()
            .filter(|w| w.contributor_id == username)
            .map(RepositoryContribution::from)
            .collect(),
        ai_summary: contributor.summary.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakdown_uses_display_name() {
        let works = vec![RepoWork {
            repository_name: "project1".into(),
            commit_count: 60,
            issue_count: 10,
            technologies: vec!["Python".into()],
            contribution_type: "feature".into(),
            ..RepoWork::new("alice", "proj1")
        }];
        let report = contributor_report(&[Contributor::new("alice")], &works, "alice").unwrap();
        assert_eq!(
            report.repository_breakdown,
            vec![RepositoryContribution {
                repository: "project1".into(),
                commits: 60,
                issues: 10,
                technologies: vec!["Python".into()],
                contribution_type: "feature".into(),
            }]
        );
    }

    #[test]
    fn zero_repositories_gives_zero_ratio() {
        let report = contributor_report(&[Contributor::new("x")], &[], "x").unwrap();
        assert_eq!(report.metrics.commits_per_repo, 0.0);
        assert!(report.repository_breakdown.is_empty());
        assert_eq!(report.ai_summary, "");
    }

    #[test]
    fn ratio_is_rounded() {
        let bob = Contributor {
            total_commits: 50,
            repositories_count: 3,
            summary: "Backend specialist".into(),
            ..Contributor::new("bob")
        };
        let report = contributor_report(&[bob], &[], "bob").unwrap();
        assert_eq!(report.metrics.commits_per_repo, 16.67);
        assert_eq!(report.ai_summary, "Backend specialist");
    }

    #[test]
    fn serializes_nested_sections() {
        let alice = Contributor {
            activity_level: ActivityLevel::High,
            contribution_style: ContributionStyle::Collaborative,
            ..Contributor::new("alice")
        };
        let report = contributor_report(&[alice], &[], "alice").unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["basic_info"]["activity_level"], "high");
        assert_eq!(json["basic_info"]["contribution_style"], "collaborative");
        assert_eq!(json["metrics"]["total_repositories"], 0);
        assert!(json["skills"]["technical_skills"].is_array());
    }

    #[test]
    fn unknown_user_is_none() {
        assert!(contributor_report(&[Contributor::new("alice")], &[], "nobody").is_none());
    }
}
