//! Collaboration detection.
//!
//! Identifies pairs of contributors who worked on the same repositories,
//! and repositories with the most potential for collaboration.
//!
//! Pair enumeration is O(k²) per repository with k distinct contributors.
//! For organizations with very large repositories, set
//! `repositories.max_collaborators` to bound k.

use std::collections::HashMap;

use orgpulse_core::{LimitsConfig, RepoWork, RepositoryConfig};
use serde::ser::{Serialize, Serializer};
use tracing::{debug, warn};

use crate::grouping::group_by_repository;
use crate::stats::{mean, round_to, LabelCount};

/// Two contributors who share at least one repository.
///
/// Serializes as `[[first, second], shared_repositories]`.
///
/// # Examples
///
/// ```
/// use orgpulse_insights::collaboration::CollaborationPair;
///
/// let pair = CollaborationPair::new("bob", "alice", 3);
/// assert_eq!(pair.first, "alice");
/// assert_eq!(pair.second, "bob");
/// assert_eq!(
///     serde_json::to_string(&pair).unwrap(),
///     r#"[["alice","bob"],3]"#
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollaborationPair {
    /// Lexicographically smaller username.
    pub first: String,
    /// Lexicographically larger username.
    pub second: String,
    /// Number of distinct repositories both worked on.
    pub shared_repositories: usize,
}

impl CollaborationPair {
    /// Build a pair, ordering the usernames canonically.
    pub fn new(a: impl Into<String>, b: impl Into<String>, shared_repositories: usize) -> Self {
        let (a, b) = (a.into(), b.into());
        let (first, second) = if a <= b { (a, b) } else { (b, a) };
        Self {
            first,
            second,
            shared_repositories,
        }
    }

    pub fn involves(&self, username: &str) -> bool {
        self.first == username || self.second == username
    }
}

impl Serialize for CollaborationPair {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        ((&self.first, &self.second), self.shared_repositories).serialize(serializer)
    }
}

/// Collaboration summary across all repositories.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct CollaborationPatterns {
    /// Distinct contributor pairs sharing at least one repository.
    pub total_collaborations: usize,
    pub top_collaborations: Vec<CollaborationPair>,
    /// Repositories ranked by C(k, 2) for k distinct contributors.
    pub most_collaborative_repositories: Vec<LabelCount>,
    /// Mean distinct contributors per repository, 2 decimals.
    pub avg_collaborators_per_repo: f64,
}

/// Count shared repositories for every contributor pair.
///
/// Returns pairs sorted by `shared_repositories` descending; ties keep the
/// order in which the pair was first seen.
///
/// # Examples
///
/// ```
/// use orgpulse_core::{RepoWork, RepositoryConfig};
/// use orgpulse_insights::collaboration::detect_collaborations;
///
/// let works = vec![
///     RepoWork::new("alice", "proj1"),
///     RepoWork::new("bob", "proj1"),
///     RepoWork::new("charlie", "proj3"),
/// ];
/// let pairs = detect_collaborations(&works, &RepositoryConfig::default());
/// assert_eq!(pairs.len(), 1);
/// assert_eq!(pairs[0].shared_repositories, 1);
/// assert!(!pairs[0].involves("charlie"));
/// ```
pub fn detect_collaborations(
    works: &[RepoWork],
    repositories: &RepositoryConfig,
) -> Vec<CollaborationPair> {
    // Normalized key (lexicographic order) -> index into `pairs`
    let mut index: HashMap<(&str, &str), usize> = HashMap::new();
    let mut pairs: Vec<CollaborationPair> = Vec::new();

    for group in group_by_repository(works, repositories.key) {
        let mut members = group.contributors();
        if let Some(cap) = repositories.max_collaborators {
            if members.len() > cap {
                warn!(
                    repository = group.key,
                    contributors = members.len(),
                    cap,
                    "capping contributors considered for collaboration pairs"
                );
                members.truncate(cap);
            }
        }

        for i in 0..members.len() {
            for j in (i + 1)..members.len() {
                let key = normalize_pair(members[i], members[j]);
                match index.get(&key) {
                    Some(&slot) => pairs[slot].shared_repositories += 1,
                    None => {
                        index.insert(key, pairs.len());
                        pairs.push(CollaborationPair::new(key.0, key.1, 1));
                    }
                }
            }
        }
    }

    pairs.sort_by(|a, b| b.shared_repositories.cmp(&a.shared_repositories));
    pairs
}

fn normalize_pair<'a>(a: &'a str, b: &'a str) -> (&'a str, &'a str) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Analyze collaboration patterns. Returns `None` when there are no rows.
pub fn analyze_collaboration_patterns(
    works: &[RepoWork],
    limits: &LimitsConfig,
    repositories: &RepositoryConfig,
) -> Option<CollaborationPatterns> {
    if works.is_empty() {
        return None;
    }

    let mut pairs = detect_collaborations(works, repositories);
    let total_collaborations = pairs.len();
    pairs.truncate(limits.top_collaborations);

    let groups = group_by_repository(works, repositories.key);
    let sizes: Vec<usize> = groups.iter().map(|g| g.contributors().len()).collect();

    let mut scores: Vec<LabelCount> = groups
        .iter()
        .zip(&sizes)
        .map(|(group, &k)| LabelCount::new(group.key, k * k.saturating_sub(1) / 2))
        .collect();
    scores.sort_by(|a, b| b.count.cmp(&a.count));
    scores.truncate(limits.most_collaborative_repositories);

    let sizes: Vec<f64> = sizes.into_iter().map(|k| k as f64).collect();

    debug!(
        pairs = total_collaborations,
        repositories = groups.len(),
        "analyzed collaboration patterns"
    );

    Some(CollaborationPatterns {
        total_collaborations,
        top_collaborations: pairs,
        most_collaborative_repositories: scores,
        avg_collaborators_per_repo: round_to(mean(&sizes).unwrap_or(0.0), 2),
    })
}
