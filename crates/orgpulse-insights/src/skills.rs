//! Skill frequency, diversity, and rarity across contributors.

use std::collections::BTreeMap;

use orgpulse_core::{Contributor, LimitsConfig, ThresholdConfig};
use serde::Serialize;
use tracing::debug;

use crate::stats::{distinct, round_to, LabelCount, Tally};

/// Skill distribution across the contributor collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillAnalysis {
    pub total_unique_skills: usize,
    pub top_skills: Vec<LabelCount>,
    pub avg_skills_per_contributor: f64,
    /// Distinct skills / total skill occurrences, 3 decimals.
    pub skill_diversity_index: f64,
    /// Skills held by fewer than `rare_skill_ratio` of contributors,
    /// in first-encounter order.
    pub rare_skills: Vec<String>,
    pub skill_distribution: BTreeMap<String, usize>,
}

/// Analyze skill distribution. Returns `None` when there are no contributors.
///
/// A contributor listing the same skill twice is counted once.
pub fn analyze_skill_distribution(
    contributors: &[Contributor],
    limits: &LimitsConfig,
    thresholds: &ThresholdConfig,
) -> Option<SkillAnalysis> {
    if contributors.is_empty() {
        return None;
    }

    let mut tally = Tally::default();
    let mut per_contributor = 0usize;
    for contributor in contributors {
        let skills = distinct(&contributor.skills);
        per_contributor += skills.len();
        for skill in skills {
            tally.add(skill);
        }
    }

    let occurrences = tally.total();
    let diversity = if occurrences == 0 {
        0.0
    } else {
        tally.len() as f64 / occurrences as f64
    };

    let rare_threshold = contributors.len() as f64 * thresholds.rare_skill_ratio;
    let rare_skills: Vec<String> = tally
        .iter()
        .filter(|(_, count)| (*count as f64) < rare_threshold)
        .map(|(skill, _)| skill.to_string())
        .take(limits.rare_skills)
        .collect();

    debug!(
        unique = tally.len(),
        occurrences,
        rare = rare_skills.len(),
        "analyzed skill distribution"
    );

    Some(SkillAnalysis {
        total_unique_skills: tally.len(),
        top_skills: tally.most_common(limits.top_skills),
        avg_skills_per_contributor: round_to(
            per_contributor as f64 / contributors.len() as f64,
            2,
        ),
        skill_diversity_index: round_to(diversity, 3),
        rare_skills,
        skill_distribution: tally.to_distribution(),
    })
}
