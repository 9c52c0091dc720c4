use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

/// Sentinel used for absent free-text fields.
pub const UNKNOWN: &str = "unknown";

fn unknown_label() -> String {
    UNKNOWN.into()
}

/// Explicit `null` reads as the type's default.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Explicit `null` reads as `"unknown"`.
fn null_as_unknown<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(unknown_label))
}

/// One person in the organization, with aggregate counters and tags.
///
/// Every field is optional on input: absent or `null` counters default to
/// zero, tag collections to empty, labels to `"unknown"`.
///
/// # Examples
///
/// ```
/// use orgpulse_core::{ActivityLevel, Contributor};
///
/// let alice: Contributor = serde_json::from_str(
///     r#"{"username": "alice", "total_commits": 100, "activity_level": "high"}"#,
/// )
/// .unwrap();
/// assert_eq!(alice.total_commits, 100);
/// assert_eq!(alice.repositories_count, 0);
/// assert_eq!(alice.activity_level, ActivityLevel::High);
/// assert!(alice.skills.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contributor {
    /// Unique login within the organization.
    #[serde(default = "unknown_label", deserialize_with = "null_as_unknown")]
    pub username: String,
    /// Commits across all repositories.
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_commits: u64,
    /// Issues opened or handled across all repositories.
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_issues: u64,
    /// Number of distinct repositories contributed to.
    #[serde(default, deserialize_with = "null_as_default")]
    pub repositories_count: u64,
    /// Free-text skill labels. Duplicates are counted once.
    #[serde(default, deserialize_with = "null_as_default")]
    pub skills: Vec<String>,
    /// Free-text domain labels.
    #[serde(default, deserialize_with = "null_as_default")]
    pub expertise_areas: Vec<String>,
    /// Languages, most prevalent first.
    #[serde(default, deserialize_with = "null_as_default")]
    pub primary_languages: Vec<String>,
    /// Externally assigned activity classification.
    #[serde(default, deserialize_with = "null_as_default")]
    pub activity_level: ActivityLevel,
    /// Externally assigned working-style classification.
    #[serde(default, deserialize_with = "null_as_default")]
    pub contribution_style: ContributionStyle,
    /// Externally generated narrative summary.
    #[serde(default, deserialize_with = "null_as_default")]
    pub summary: String,
}

impl Contributor {
    /// Create a contributor with the given username and zeroed counters.
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            total_commits: 0,
            total_issues: 0,
            repositories_count: 0,
            skills: Vec::new(),
            expertise_areas: Vec::new(),
            primary_languages: Vec::new(),
            activity_level: ActivityLevel::default(),
            contribution_style: ContributionStyle::default(),
            summary: String::new(),
        }
    }
}

/// Aggregated activity of one contributor within one repository.
///
/// `contributor_id` is not checked against the contributor collection;
/// unknown ids are treated as anonymous collaborators.
///
/// # Examples
///
/// ```
/// use orgpulse_core::RepoWork;
///
/// let work: RepoWork = serde_json::from_str(
///     r#"{"contributor_id": "alice", "repository_id": "proj1", "commit_count": 60}"#,
/// )
/// .unwrap();
/// assert_eq!(work.repository_name, "unknown");
/// assert_eq!(work.issue_count, 0);
/// assert_eq!(work.contribution_type, "unknown");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepoWork {
    /// Username of the contributor.
    #[serde(default = "unknown_label", deserialize_with = "null_as_unknown")]
    pub contributor_id: String,
    /// Stable repository identifier.
    #[serde(default = "unknown_label", deserialize_with = "null_as_unknown")]
    pub repository_id: String,
    /// Display name of the repository.
    #[serde(default = "unknown_label", deserialize_with = "null_as_unknown")]
    pub repository_name: String,
    /// Commits by this contributor in this repository.
    #[serde(default, deserialize_with = "null_as_default")]
    pub commit_count: u64,
    /// Issues by this contributor in this repository.
    #[serde(default, deserialize_with = "null_as_default")]
    pub issue_count: u64,
    /// Technology tags observed for this contributor's work here.
    #[serde(default, deserialize_with = "null_as_default")]
    pub technologies: Vec<String>,
    /// Free-text classification, passed through untouched.
    #[serde(default = "unknown_label", deserialize_with = "null_as_unknown")]
    pub contribution_type: String,
}

impl RepoWork {
    /// Create a row with zeroed counters, using `repository` as both the
    /// id and the display name.
    pub fn new(contributor_id: impl Into<String>, repository: impl Into<String>) -> Self {
        let repository = repository.into();
        Self {
            contributor_id: contributor_id.into(),
            repository_id: repository.clone(),
            repository_name: repository,
            commit_count: 0,
            issue_count: 0,
            technologies: Vec::new(),
            contribution_type: unknown_label(),
        }
    }
}

/// Activity classification assigned by the summarization pipeline.
///
/// Parsing is case-insensitive; unrecognized labels become [`ActivityLevel::Unknown`].
///
/// # Examples
///
/// ```
/// use orgpulse_core::ActivityLevel;
///
/// let level: ActivityLevel = "High".parse().unwrap();
/// assert_eq!(level, ActivityLevel::High);
/// assert_eq!(level.to_string(), "high");
///
/// let other: ActivityLevel = "sporadic".parse().unwrap();
/// assert_eq!(other, ActivityLevel::Unknown);
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum ActivityLevel {
    High,
    Medium,
    Low,
    Active,
    ModeratelyActive,
    Inactive,
    #[default]
    Unknown,
}

impl ActivityLevel {
    /// Sort weight used when ordering contributors by activity.
    ///
    /// Only `high`, `active`, `medium` and `low` carry weight; every other
    /// level ranks below `low`.
    pub fn rank(self) -> u8 {
        match self {
            ActivityLevel::High | ActivityLevel::Active => 3,
            ActivityLevel::Medium => 2,
            ActivityLevel::Low => 1,
            ActivityLevel::ModeratelyActive
            | ActivityLevel::Inactive
            | ActivityLevel::Unknown => 0,
        }
    }

    /// The canonical lowercase label.
    pub fn as_str(self) -> &'static str {
        match self {
            ActivityLevel::High => "high",
            ActivityLevel::Medium => "medium",
            ActivityLevel::Low => "low",
            ActivityLevel::Active => "active",
            ActivityLevel::ModeratelyActive => "moderately_active",
            ActivityLevel::Inactive => "inactive",
            ActivityLevel::Unknown => UNKNOWN,
        }
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityLevel {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let level = match normalize_label(s).as_str() {
            "high" => ActivityLevel::High,
            "medium" => ActivityLevel::Medium,
            "low" => ActivityLevel::Low,
            "active" => ActivityLevel::Active,
            "moderately_active" => ActivityLevel::ModeratelyActive,
            "inactive" => ActivityLevel::Inactive,
            _ => ActivityLevel::Unknown,
        };
        Ok(level)
    }
}

impl From<String> for ActivityLevel {
    fn from(value: String) -> Self {
        match value.parse() {
            Ok(level) => level,
            Err(never) => match never {},
        }
    }
}

/// Working-style classification assigned by the summarization pipeline.
///
/// # Examples
///
/// ```
/// use orgpulse_core::ContributionStyle;
///
/// let style: ContributionStyle = "research-focused".parse().unwrap();
/// assert_eq!(style, ContributionStyle::ResearchFocused);
/// assert_eq!(style.to_string(), "research-focused");
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case", from = "String")]
pub enum ContributionStyle {
    Collaborative,
    Independent,
    ResearchFocused,
    DetailOriented,
    #[default]
    Unknown,
}

impl ContributionStyle {
    /// The canonical kebab-case label.
    pub fn as_str(self) -> &'static str {
        match self {
            ContributionStyle::Collaborative => "collaborative",
            ContributionStyle::Independent => "independent",
            ContributionStyle::ResearchFocused => "research-focused",
            ContributionStyle::DetailOriented => "detail-oriented",
            ContributionStyle::Unknown => UNKNOWN,
        }
    }
}

impl fmt::Display for ContributionStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContributionStyle {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let style = match normalize_label(s).as_str() {
            "collaborative" => ContributionStyle::Collaborative,
            "independent" => ContributionStyle::Independent,
            "research_focused" => ContributionStyle::ResearchFocused,
            "detail_oriented" => ContributionStyle::DetailOriented,
            _ => ContributionStyle::Unknown,
        };
        Ok(style)
    }
}

impl From<String> for ContributionStyle {
    fn from(value: String) -> Self {
        match value.parse() {
            Ok(style) => style,
            Err(never) => match never {},
        }
    }
}

/// Lowercase, trim, and fold `-` and spaces into `_`.
fn normalize_label(s: &str) -> String {
    s.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == '-' || c == ' ' { '_' } else { c })
        .collect()
}

/// Activity tier assigned to every contributor.
///
/// Variants are declared in precedence order; [`Segment::classify`] returns
/// the first tier whose criteria match.
///
/// # Examples
///
/// ```
/// use orgpulse_core::Segment;
///
/// assert_eq!(Segment::classify(100, 3), Segment::PowerUser);
/// assert_eq!(Segment::classify(50, 2), Segment::ActiveContributor);
/// assert_eq!(Segment::classify(0, 1), Segment::RegularContributor);
/// assert_eq!(Segment::classify(19, 0), Segment::OccasionalContributor);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Segment {
    /// 100+ commits across 3+ repositories.
    PowerUser,
    /// 50+ commits across 2+ repositories.
    ActiveContributor,
    /// 20+ commits, or any repository at all.
    RegularContributor,
    /// Everyone else.
    OccasionalContributor,
}

impl Segment {
    /// All segments in precedence order.
    pub const ALL: [Segment; 4] = [
        Segment::PowerUser,
        Segment::ActiveContributor,
        Segment::RegularContributor,
        Segment::OccasionalContributor,
    ];

    /// Assign a tier from commit and repository counts.
    pub fn classify(commits: u64, repositories: u64) -> Self {
        match (commits, repositories) {
            (c, r) if c >= 100 && r >= 3 => Segment::PowerUser,
            (c, r) if c >= 50 && r >= 2 => Segment::ActiveContributor,
            (c, r) if c >= 20 || r >= 1 => Segment::RegularContributor,
            _ => Segment::OccasionalContributor,
        }
    }

    /// Human-readable criteria, for display next to segment counts.
    pub fn criteria(self) -> &'static str {
        match self {
            Segment::PowerUser => "100+ commits, 3+ repos",
            Segment::ActiveContributor => "50+ commits, 2+ repos",
            Segment::RegularContributor => "20+ commits or 1+ repos",
            Segment::OccasionalContributor => "Less than 20 commits",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Segment::PowerUser => "power_user",
            Segment::ActiveContributor => "active_contributor",
            Segment::RegularContributor => "regular_contributor",
            Segment::OccasionalContributor => "occasional_contributor",
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
