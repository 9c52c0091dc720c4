//! Search, filter, and sort over the input collections.
//!
//! Each filter is a plain criteria struct: unset criteria do not filter.
//! Filters deserialize from TOML or JSON so saved views can be stored next
//! to `orgpulse.toml`.

use orgpulse_core::{ActivityLevel, ContributionStyle, Contributor, RepoWork};
use serde::{Deserialize, Serialize};

/// Ordering applied to filtered contributors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContributorSort {
    UsernameAsc,
    UsernameDesc,
    CommitsDesc,
    CommitsAsc,
    RepositoriesDesc,
    RepositoriesAsc,
    /// Most active first, by [`ActivityLevel::rank`].
    ActivityLevel,
}

/// Criteria for selecting contributors.
///
/// # Examples
///
/// ```
/// use orgpulse_core::Contributor;
/// use orgpulse_insights::filters::{ContributorFilter, ContributorSort};
///
/// let mut alice = Contributor::new("alice");
/// alice.skills = vec!["Python".into(), "React".into()];
/// alice.total_commits = 100;
/// let mut bob = Contributor::new("bob");
/// bob.skills = vec!["Java".into()];
/// bob.total_commits = 50;
///
/// let filter = ContributorFilter {
///     search_text: Some("python".into()),
///     sort_by: Some(ContributorSort::CommitsDesc),
///     ..ContributorFilter::default()
/// };
/// let contributors = [alice, bob];
/// let matched = filter.apply(&contributors);
/// assert_eq!(matched.len(), 1);
/// assert_eq!(matched[0].username, "alice");
/// assert_eq!(filter.summary(), "Active filters: Text: 'python'");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContributorFilter {
    /// Whitespace-separated terms; every term must occur somewhere in the
    /// username, summary, skills, expertise areas, or languages.
    pub search_text: Option<String>,
    pub activity_levels: Vec<ActivityLevel>,
    /// Inclusive bounds on `total_commits`.
    pub commit_range: Option<(u64, u64)>,
    /// Inclusive bounds on `repositories_count`.
    pub repo_range: Option<(u64, u64)>,
    /// Contributor must list every one of these.
    pub required_skills: Vec<String>,
    /// Contributor must list at least one of these.
    pub any_skills: Vec<String>,
    pub languages: Vec<String>,
    pub expertise_areas: Vec<String>,
    pub contribution_styles: Vec<ContributionStyle>,
    pub sort_by: Option<ContributorSort>,
}

impl ContributorFilter {
    pub fn matches(&self, contributor: &Contributor) -> bool {
        if let Some(text) = search_terms(self.search_text.as_deref()) {
            let haystack = format!(
                "{} {} {} {} {}",
                contributor.username,
                contributor.summary,
                contributor.skills.join(" "),
                contributor.expertise_areas.join(" "),
                contributor.primary_languages.join(" "),
            );
            if !all_terms_match(&haystack, text) {
                return false;
            }
        }

        if !self.activity_levels.is_empty()
            && !self.activity_levels.contains(&contributor.activity_level)
        {
            return false;
        }
        if !in_range(self.commit_range, contributor.total_commits)
            || !in_range(self.repo_range, contributor.repositories_count)
        {
            return false;
        }
        if !self
            .required_skills
            .iter()
            .all(|skill| contributor.skills.contains(skill))
        {
            return false;
        }
        if !any_of(&self.any_skills, &contributor.skills)
            || !any_of(&self.languages, &contributor.primary_languages)
            || !any_of(&self.expertise_areas, &contributor.expertise_areas)
        {
            return false;
        }

        self.contribution_styles.is_empty()
            || self
                .contribution_styles
                .contains(&contributor.contribution_style)
    }

    /// Matching contributors, sorted if `sort_by` is set. Sorting is stable.
    pub fn apply<'a>(&self, contributors: &'a [Contributor]) -> Vec<&'a Contributor> {
        let mut matched: Vec<&Contributor> =
            contributors.iter().filter(|c| self.matches(c)).collect();

        match self.sort_by {
            None => {}
            Some(ContributorSort::UsernameAsc) => {
                matched.sort_by_key(|c| c.username.to_lowercase());
            }
            Some(ContributorSort::UsernameDesc) => {
                matched.sort_by(|a, b| b.username.to_lowercase().cmp(&a.username.to_lowercase()));
            }
            Some(ContributorSort::CommitsDesc) => {
                matched.sort_by(|a, b| b.total_commits.cmp(&a.total_commits));
            }
            Some(ContributorSort::CommitsAsc) => matched.sort_by_key(|c| c.total_commits),
            Some(ContributorSort::RepositoriesDesc) => {
                matched.sort_by(|a, b| b.repositories_count.cmp(&a.repositories_count));
            }
            Some(ContributorSort::RepositoriesAsc) => {
                matched.sort_by_key(|c| c.repositories_count);
            }
            Some(ContributorSort::ActivityLevel) => {
                matched.sort_by(|a, b| b.activity_level.rank().cmp(&a.activity_level.rank()));
            }
        }
        matched
    }

    /// One-line description of the active criteria.
    pub fn summary(&self) -> String {
        let mut active = Vec::new();
        if let Some(text) = search_terms(self.search_text.as_deref()) {
            active.push(format!("Text: '{text}'"));
        }
        if !self.activity_levels.is_empty() {
            let levels: Vec<&str> = self.activity_levels.iter().map(|l| l.as_str()).collect();
            active.push(format!("Activity: {}", levels.join(", ")));
        }
        if let Some((lo, hi)) = self.commit_range {
            active.push(format!("Commits: {lo}-{hi}"));
        }
        if let Some((lo, hi)) = self.repo_range {
            active.push(format!("Repositories: {lo}-{hi}"));
        }
        push_list(&mut active, "Required Skills", &self.required_skills);
        push_list(&mut active, "Any Skills", &self.any_skills);
        push_list(&mut active, "Languages", &self.languages);
        push_list(&mut active, "Expertise", &self.expertise_areas);
        if !self.contribution_styles.is_empty() {
            let styles: Vec<&str> = self.contribution_styles.iter().map(|s| s.as_str()).collect();
            active.push(format!("Styles: {}", styles.join(", ")));
        }
        render_summary(&active)
    }
}

/// Ordering applied to filtered repo-work rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepoWorkSort {
    NameAsc,
    NameDesc,
    CommitsDesc,
    CommitsAsc,
}

/// Criteria for selecting repo-work rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepoWorkFilter {
    /// Terms matched against repository name, id, and technologies.
    pub search_text: Option<String>,
    /// Inclusive bounds on `commit_count`.
    pub commit_range: Option<(u64, u64)>,
    /// Row must carry at least one of these.
    pub technologies: Vec<String>,
    /// Case-insensitive match on `contribution_type`.
    pub contribution_types: Vec<String>,
    pub sort_by: Option<RepoWorkSort>,
}

impl RepoWorkFilter {
    pub fn matches(&self, work: &RepoWork) -> bool {
        if let Some(text) = search_terms(self.search_text.as_deref()) {
            let haystack = format!(
                "{} {} {}",
                work.repository_name,
                work.repository_id,
                work.technologies.join(" "),
            );
            if !all_terms_match(&haystack, text) {
                return false;
            }
        }

        if !in_range(self.commit_range, work.commit_count)
            || !any_of(&self.technologies, &work.technologies)
        {
            return false;
        }

        self.contribution_types.is_empty()
            || self
                .contribution_types
                .iter()
                .any(|t| t.eq_ignore_ascii_case(&work.contribution_type))
    }

    /// Matching rows, sorted if `sort_by` is set. Sorting is stable.
    ///
    /// # Examples
    ///
    /// ```
    /// use orgpulse_core::RepoWork;
    /// use orgpulse_insights::filters::{RepoWorkFilter, RepoWorkSort};
    ///
    /// let mut a = RepoWork::new("alice", "proj1");
    /// a.commit_count = 60;
    /// let mut b = RepoWork::new("bob", "proj1");
    /// b.commit_count = 30;
    ///
    /// let filter = RepoWorkFilter {
    ///     commit_range: Some((0, 40)),
    ///     sort_by: Some(RepoWorkSort::CommitsDesc),
    ///     ..RepoWorkFilter::default()
    /// };
    /// let rows = [a, b];
    /// let kept = filter.apply(&rows);
    /// assert_eq!(kept.len(), 1);
    /// assert_eq!(kept[0].contributor_id, "bob");
    /// ```
    pub fn apply<'a>(&self, works: &'a [RepoWork]) -> Vec<&'a RepoWork> {
        let mut matched: Vec<&RepoWork> = works.iter().filter(|w| self.matches(w)).collect();

        match self.sort_by {
            None => {}
            Some(RepoWorkSort::NameAsc) => {
                matched.sort_by_key(|w| w.repository_name.to_lowercase());
            }
            Some(RepoWorkSort::NameDesc) => matched.sort_by(|a, b| {
                b.repository_name
                    .to_lowercase()
                    .cmp(&a.repository_name.to_lowercase())
            }),
            Some(RepoWorkSort::CommitsDesc) => {
                matched.sort_by(|a, b| b.commit_count.cmp(&a.commit_count));
            }
            Some(RepoWorkSort::CommitsAsc) => matched.sort_by_key(|w| w.commit_count),
        }
        matched
    }

    pub fn summary(&self) -> String {
        let mut active = Vec::new();
        if let Some(text) = search_terms(self.search_text.as_deref()) {
            active.push(format!("Text: '{text}'"));
        }
        if let Some((lo, hi)) = self.commit_range {
            active.push(format!("Commits: {lo}-{hi}"));
        }
        push_list(&mut active, "Technologies", &self.technologies);
        push_list(&mut active, "Types", &self.contribution_types);
        render_summary(&active)
    }
}

/// The search text, or `None` when it is unset or blank.
fn search_terms(text: Option<&str>) -> Option<&str> {
    text.map(str::trim).filter(|t| !t.is_empty())
}

fn all_terms_match(haystack: &str, text: &str) -> bool {
    let haystack = haystack.to_lowercase();
    text.to_lowercase()
        .split_whitespace()
        .all(|term| haystack.contains(term))
}

fn in_range(range: Option<(u64, u64)>, value: u64) -> bool {
    range.map_or(true, |(lo, hi)| lo <= value && value <= hi)
}

/// True when `wanted` is empty or shares an element with `have`.
fn any_of(wanted: &[String], have: &[String]) -> bool {
    wanted.is_empty() || wanted.iter().any(|w| have.contains(w))
}

fn push_list(active: &mut Vec<String>, label: &str, values: &[String]) {
    if !values.is_empty() {
        active.push(format!("{label}: {}", values.join(", ")));
    }
}

fn render_summary(active: &[String]) -> String {
    if active.is_empty() {
        "No filters active".to_string()
    } else {
        format!("Active filters: {}", active.join(" | "))
    }
}
