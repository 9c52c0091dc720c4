use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::OrgPulseError;

/// Top-level configuration loaded from `orgpulse.toml`.
///
/// Every section is optional; an empty document yields the defaults.
///
/// # Examples
///
/// ```
/// use orgpulse_core::{InsightsConfig, RepositoryKey};
///
/// let config = InsightsConfig::default();
/// assert_eq!(config.limits.top_skills, 15);
/// assert_eq!(config.repositories.key, RepositoryKey::Id);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InsightsConfig {
    /// Sizes of the ranked lists in each report section.
    #[serde(default)]
    pub limits: LimitsConfig,
    /// Relative-frequency thresholds.
    #[serde(default)]
    pub thresholds: ThresholdConfig,
    /// Repository grouping behavior.
    #[serde(default)]
    pub repositories: RepositoryConfig,
    /// Collaboration network settings.
    #[serde(default)]
    pub network: NetworkConfig,
}

impl InsightsConfig {
    /// Load configuration from a TOML file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`OrgPulseError::FileNotFound`] if `path` does not exist,
    /// [`OrgPulseError::Io`] if it cannot be read, or
    /// [`OrgPulseError::Toml`] / [`OrgPulseError::Config`] if the content
    /// is invalid.
    pub fn from_file(path: &Path) -> Result<Self, OrgPulseError> {
        if !path.exists() {
            return Err(OrgPulseError::FileNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`OrgPulseError::Toml`] if parsing fails, or
    /// [`OrgPulseError::Config`] if a threshold is out of range.
    ///
    /// # Examples
    ///
    /// ```
    /// use orgpulse_core::{InsightsConfig, RepositoryKey};
    ///
    /// let toml = r#"
    /// [repositories]
    /// key = "name"
    /// "#;
    /// let config = InsightsConfig::from_toml(toml).unwrap();
    /// assert_eq!(config.repositories.key, RepositoryKey::Name);
    /// ```
    pub fn from_toml(content: &str) -> Result<Self, OrgPulseError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that thresholds are usable.
    ///
    /// # Errors
    ///
    /// Returns [`OrgPulseError::Config`] naming the offending field.
    pub fn validate(&self) -> Result<(), OrgPulseError> {
        let ratios = [
            ("rare_skill_ratio", self.thresholds.rare_skill_ratio),
            (
                "emerging_technology_ratio",
                self.thresholds.emerging_technology_ratio,
            ),
        ];
        for (name, value) in ratios {
            if !(0.0..=1.0).contains(&value) {
                return Err(OrgPulseError::Config(format!(
                    "{name} must be between 0 and 1, got {value}"
                )));
            }
        }
        if self.repositories.max_collaborators == Some(0) {
            return Err(OrgPulseError::Config(
                "max_collaborators must be at least 1 when set".into(),
            ));
        }
        Ok(())
    }
}

/// Sizes of ranked lists.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    pub top_languages: usize,
    pub top_skills: usize,
    pub rare_skills: usize,
    pub top_repositories: usize,
    pub most_diverse_repositories: usize,
    pub top_collaborations: usize,
    pub most_collaborative_repositories: usize,
    pub popular_technologies: usize,
    pub emerging_technologies: usize,
    pub top_productive_contributors: usize,
    pub central_nodes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            top_languages: 10,
            top_skills: 15,
            rare_skills: 10,
            top_repositories: 10,
            most_diverse_repositories: 10,
            top_collaborations: 10,
            most_collaborative_repositories: 5,
            popular_technologies: 15,
            emerging_technologies: 10,
            top_productive_contributors: 10,
            central_nodes: 10,
        }
    }
}

/// Relative-frequency thresholds.
///
/// # Examples
///
/// ```
/// use orgpulse_core::ThresholdConfig;
///
/// let config = ThresholdConfig::default();
/// assert_eq!(config.rare_skill_ratio, 0.2);
/// assert_eq!(config.emerging_technology_ratio, 0.1);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdConfig {
    /// A skill is rare when held by fewer than this share of contributors.
    pub rare_skill_ratio: f64,
    /// A technology is emerging when its frequency is at most this share
    /// of the repository count (and never below 1).
    pub emerging_technology_ratio: f64,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            rare_skill_ratio: 0.2,
            emerging_technology_ratio: 0.1,
        }
    }
}

/// Which repo-work field identifies a repository when grouping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepositoryKey {
    /// The stable `repository_id`.
    #[default]
    Id,
    /// The display `repository_name`. Two repositories sharing a name merge.
    Name,
}

/// Repository grouping behavior.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RepositoryConfig {
    /// Grouping key (default: `id`).
    pub key: RepositoryKey,
    /// Collapse repeated (contributor, repository) rows before counting
    /// contributors per repository (default: false).
    pub dedupe_rows: bool,
    /// Cap on distinct contributors per repository considered for pairwise
    /// collaboration. Unset means no cap.
    pub max_collaborators: Option<usize>,
}

/// Collaboration network settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Node budget; half of it goes to contributor nodes.
    pub max_nodes: usize,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self { max_nodes: 100 }
    }
}
