//! Loading contributor and repo-work collections from JSON.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::OrgPulseError;
use crate::types::{null_as_default, Contributor, RepoWork};

/// The two input collections consumed by the insights engine.
///
/// # Examples
///
/// ```
/// use orgpulse_core::Dataset;
///
/// let json = r#"{
///     "contributors": [{"username": "alice", "total_commits": 100}],
///     "repo_works": [{"contributor_id": "alice", "repository_id": "proj1"}]
/// }"#;
/// let dataset = Dataset::from_json(json).unwrap();
/// assert_eq!(dataset.contributors.len(), 1);
/// assert_eq!(dataset.repo_works[0].repository_id, "proj1");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default, deserialize_with = "null_as_default")]
    pub contributors: Vec<Contributor>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub repo_works: Vec<RepoWork>,
}

impl Dataset {
    /// Parse a dataset from a JSON document.
    ///
    /// Either collection may be absent or `null`. Individual records are
    /// parsed permissively, with `null` fields read as their defaults (see
    /// [`Contributor`] and [`RepoWork`]).
    ///
    /// # Errors
    ///
    /// Returns [`OrgPulseError::InvalidDataset`] when the document is not a
    /// JSON object, or [`OrgPulseError::Serialization`] when it is not valid
    /// JSON or a record has a field of the wrong type.
    pub fn from_json(content: &str) -> Result<Self, OrgPulseError> {
        let value: serde_json::Value = serde_json::from_str(content)?;
        if !value.is_object() {
            return Err(OrgPulseError::InvalidDataset(format!(
                "top-level value must be an object, found {}",
                json_kind(&value)
            )));
        }
        let dataset = serde_json::from_value(value)?;
        Ok(dataset)
    }

    /// Read and parse a dataset file.
    ///
    /// # Errors
    ///
    /// Returns [`OrgPulseError::FileNotFound`] if `path` does not exist,
    /// plus everything [`Dataset::from_json`] can return.
    pub fn from_file(path: &Path) -> Result<Self, OrgPulseError> {
        if !path.exists() {
            return Err(OrgPulseError::FileNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn is_empty(&self) -> bool {
        self.contributors.is_empty() && self.repo_works.is_empty()
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
