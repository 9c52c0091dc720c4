//! Template-driven recommendations sourced from the other analyses.

use serde::Serialize;

use crate::collaboration::CollaborationPatterns;
use crate::skills::SkillAnalysis;
use crate::stats::LabelCount;
use crate::technology::TechnologyTrends;

/// Recommendation sentences in four fixed categories.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Recommendations {
    pub team_composition: Vec<String>,
    pub skill_development: Vec<String>,
    pub process_improvement: Vec<String>,
    pub technology_adoption: Vec<String>,
}

impl Recommendations {
    pub fn is_empty(&self) -> bool {
        self.team_composition.is_empty()
            && self.skill_development.is_empty()
            && self.process_improvement.is_empty()
            && self.technology_adoption.is_empty()
    }
}

/// Build recommendations from upstream analysis results.
///
/// A category whose source analysis produced no data stays empty. A
/// sentence that would interpolate an empty list is left out; the fixed
/// sentences of that category remain.
///
/// # Examples
///
/// ```
/// use orgpulse_insights::recommendations::generate_recommendations;
///
/// let recs = generate_recommendations(None, None, None);
/// assert!(recs.is_empty());
/// ```
pub fn generate_recommendations(
    skills: Option<&SkillAnalysis>,
    technology: Option<&TechnologyTrends>,
    collaboration: Option<&CollaborationPatterns>,
) -> Recommendations {
    let mut recs = Recommendations::default();

    if let Some(skills) = skills {
        let top = leading(labels(&skills.top_skills));
        let rare = leading(skills.rare_skills.iter().map(String::as_str));
        if !top.is_empty() {
            recs.team_composition.push(format!(
                "Consider hiring developers with {top} skills for high-demand areas"
            ));
        }
        if !rare.is_empty() {
            recs.team_composition
                .push(format!("Recruit specialists in {rare} for niche expertise"));
        }
        recs.team_composition
            .push("Focus on full-stack developers to improve team versatility".into());
    }

    if let Some(tech) = technology {
        let emerging = leading(tech.emerging_technologies.iter().map(String::as_str));
        if !emerging.is_empty() {
            recs.skill_development
                .push(format!("Provide training in {emerging} for future readiness"));
        }
        recs.skill_development.extend([
            "Encourage cross-training between frontend and backend technologies".to_string(),
            "Implement mentorship programs for knowledge transfer".to_string(),
        ]);

        let popular = leading(labels(&tech.popular_technologies));
        if !popular.is_empty() {
            recs.technology_adoption
                .push(format!("Standardize on {popular} for consistency"));
        }
        recs.technology_adoption.extend([
            "Evaluate modern alternatives to legacy technologies".to_string(),
            "Implement technology decision frameworks for consistency".to_string(),
        ]);
    }

    if collaboration.is_some() {
        recs.process_improvement.extend([
            "Implement code review processes to increase collaboration".to_string(),
            "Create cross-functional teams for better knowledge sharing".to_string(),
            "Establish regular tech talks and knowledge sharing sessions".to_string(),
        ]);
    }

    recs
}

fn labels(ranked: &[LabelCount]) -> impl Iterator<Item = &str> + '_ {
    ranked.iter().map(|lc| lc.label.as_str())
}

/// First three items joined with `", "`.
fn leading<'a>(items: impl Iterator<Item = &'a str>) -> String {
    items.take(3).collect::<Vec<_>>().join(", ")
}
