//! The insights engine: holds both input collections and runs the analyses.

use std::collections::HashMap;

use orgpulse_core::{Contributor, Dataset, InsightsConfig, RepoWork, UNKNOWN};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use tracing::{info_span, warn};

use crate::collaboration::{analyze_collaboration_patterns, CollaborationPatterns};
use crate::network::{network_statistics, NetworkStatistics};
use crate::overview::{overview_metrics, OverviewMetrics};
use crate::productivity::{calculate_productivity_metrics, ProductivityMetrics};
use crate::recommendations::{generate_recommendations, Recommendations};
use crate::report::{contributor_report, ContributorReport};
use crate::repositories::{analyze_repository_patterns, RepositoryInsights};
use crate::segments::{segment_contributors, ContributorSegments};
use crate::skills::{analyze_skill_distribution, SkillAnalysis};
use crate::technology::{analyze_technology_trends, TechnologyTrends};

/// Every analysis section in one report. Sections without data serialize
/// as `{}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComprehensiveInsights {
    #[serde(serialize_with = "section")]
    pub overview: Option<OverviewMetrics>,
    #[serde(serialize_with = "section")]
    pub skill_analysis: Option<SkillAnalysis>,
    #[serde(serialize_with = "section")]
    pub repository_insights: Option<RepositoryInsights>,
    #[serde(serialize_with = "section")]
    pub contributor_segments: Option<ContributorSegments>,
    #[serde(serialize_with = "section")]
    pub collaboration_patterns: Option<CollaborationPatterns>,
    #[serde(serialize_with = "section")]
    pub technology_trends: Option<TechnologyTrends>,
    #[serde(serialize_with = "section")]
    pub productivity_metrics: Option<ProductivityMetrics>,
    pub recommendations: Recommendations,
}

impl ComprehensiveInsights {
    pub fn to_json(&self) -> orgpulse_core::Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> orgpulse_core::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn section<T, S>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Serialize,
    S: Serializer,
{
    match value {
        Some(inner) => inner.serialize(serializer),
        None => serializer.serialize_map(Some(0))?.end(),
    }
}

/// Aggregation engine over one snapshot of contributors and repo-work rows.
///
/// Analyses are pure functions of the snapshot and are recomputed on every
/// call. The engine is `Send + Sync`; share it behind an `Arc` to run
/// analyses from several threads.
///
/// # Examples
///
/// ```
/// use orgpulse_core::{Contributor, RepoWork};
/// use orgpulse_insights::InsightsEngine;
///
/// let mut alice = Contributor::new("alice");
/// alice.total_commits = 100;
/// alice.repositories_count = 5;
/// let engine = InsightsEngine::new(vec![alice], vec![RepoWork::new("alice", "proj1")]);
///
/// let overview = engine.overview_metrics().unwrap();
/// assert_eq!(overview.total_commits, 100);
/// assert!(engine.contributor_report("ghost").is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct InsightsEngine {
    contributors: Vec<Contributor>,
    repo_works: Vec<RepoWork>,
    config: InsightsConfig,
}

impl InsightsEngine {
    pub fn new(contributors: Vec<Contributor>, repo_works: Vec<RepoWork>) -> Self {
        Self::with_config(contributors, repo_works, InsightsConfig::default())
    }

    /// Build an engine with explicit configuration.
    ///
    /// Contributors sharing a username are merged: the last record wins and
    /// takes the position of the first. Records without a username (read as
    /// `"unknown"`) are never merged.
    pub fn with_config(
        contributors: Vec<Contributor>,
        repo_works: Vec<RepoWork>,
        config: InsightsConfig,
    ) -> Self {
        Self {
            contributors: dedupe_usernames(contributors),
            repo_works,
            config,
        }
    }

    pub fn from_dataset(dataset: Dataset, config: InsightsConfig) -> Self {
        Self::with_config(dataset.contributors, dataset.repo_works, config)
    }

    pub fn contributors(&self) -> &[Contributor] {
        &self.contributors
    }

    pub fn repo_works(&self) -> &[RepoWork] {
        &self.repo_works
    }

    pub fn config(&self) -> &InsightsConfig {
        &self.config
    }

    pub fn overview_metrics(&self) -> Option<OverviewMetrics> {
        overview_metrics(&self.contributors, &self.config.limits)
    }

    pub fn skill_distribution(&self) -> Option<SkillAnalysis> {
        analyze_skill_distribution(
            &self.contributors,
            &self.config.limits,
            &self.config.thresholds,
        )
    }

    pub fn repository_patterns(&self) -> Option<RepositoryInsights> {
        analyze_repository_patterns(
            &self.repo_works,
            &self.config.limits,
            &self.config.repositories,
        )
    }

    pub fn segment_contributors(&self) -> Option<ContributorSegments> {
        segment_contributors(&self.contributors)
    }

    pub fn collaboration_patterns(&self) -> Option<CollaborationPatterns> {
        analyze_collaboration_patterns(
            &self.repo_works,
            &self.config.limits,
            &self.config.repositories,
        )
    }

    pub fn technology_trends(&self) -> Option<TechnologyTrends> {
        analyze_technology_trends(
            &self.repo_works,
            &self.config.limits,
            &self.config.thresholds,
            &self.config.repositories,
        )
    }

    pub fn productivity_metrics(&self) -> Option<ProductivityMetrics> {
        calculate_productivity_metrics(
            &self.contributors,
            !self.repo_works.is_empty(),
            &self.config.limits,
        )
    }

    /// Recommendations, recomputing the analyses they draw on.
    ///
    /// Every category is empty when there are no contributors.
    pub fn recommendations(&self) -> Recommendations {
        if self.contributors.is_empty() {
            return Recommendations::default();
        }
        generate_recommendations(
            self.skill_distribution().as_ref(),
            self.technology_trends().as_ref(),
            self.collaboration_patterns().as_ref(),
        )
    }

    /// Report for one contributor, `None` if the username is unknown.
    pub fn contributor_report(&self, username: &str) -> Option<ContributorReport> {
        contributor_report(&self.contributors, &self.repo_works, username)
    }

    pub fn network_statistics(&self) -> Option<NetworkStatistics> {
        network_statistics(
            &self.contributors,
            &self.repo_works,
            &self.config.network,
            &self.config.repositories,
            &self.config.limits,
        )
    }

    /// Run every analysis and assemble the combined report.
    pub fn comprehensive_insights(&self) -> ComprehensiveInsights {
        let span = info_span!(
            "comprehensive_insights",
            contributors = self.contributors.len(),
            repo_works = self.repo_works.len()
        );
        let _guard = span.enter();

        let skill_analysis = self.skill_distribution();
        let technology_trends = self.technology_trends();
        let collaboration_patterns = self.collaboration_patterns();
        let recommendations = if self.contributors.is_empty() {
            Recommendations::default()
        } else {
            generate_recommendations(
                skill_analysis.as_ref(),
                technology_trends.as_ref(),
                collaboration_patterns.as_ref(),
            )
        };

        ComprehensiveInsights {
            overview: self.overview_metrics(),
            skill_analysis,
            repository_insights: self.repository_patterns(),
            contributor_segments: self.segment_contributors(),
            collaboration_patterns,
            technology_trends,
            productivity_metrics: self.productivity_metrics(),
            recommendations,
        }
    }
}

fn dedupe_usernames(contributors: Vec<Contributor>) -> Vec<Contributor> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut unique: Vec<Contributor> = Vec::with_capacity(contributors.len());

    for contributor in contributors {
        if contributor.username == UNKNOWN {
            unique.push(contributor);
            continue;
        }
        match index.get(&contributor.username) {
            Some(&slot) => {
                warn!(
                    username = %contributor.username,
                    "duplicate contributor record; keeping the later one"
                );
                unique[slot] = contributor;
            }
            None => {
                index.insert(contributor.username.clone(), unique.len());
                unique.push(contributor);
            }
        }
    }

    unique
}
