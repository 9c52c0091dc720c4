//! Contributor segmentation into four activity tiers.

use std::collections::BTreeMap;

use orgpulse_core::{Contributor, Segment};
use serde::Serialize;
use tracing::debug;

use crate::stats::round_to;

/// Size of one segment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentStatistics {
    pub count: usize,
    /// Share of all contributors, in percent, 2 decimals.
    pub percentage: f64,
}

/// Partition of the contributor collection into [`Segment`]s.
///
/// Only occupied segments appear in `segments` and `segment_statistics`;
/// `segmentation_criteria` always lists all four.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContributorSegments {
    pub segments: BTreeMap<Segment, Vec<String>>,
    pub segment_statistics: BTreeMap<Segment, SegmentStatistics>,
    pub segmentation_criteria: BTreeMap<Segment, &'static str>,
}

impl ContributorSegments {
    /// Members of `segment`, empty if unoccupied.
    pub fn members(&self, segment: Segment) -> &[String] {
        self.segments
            .get(&segment)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn segment_of(&self, username: &str) -> Option<Segment> {
        self.segments
            .iter()
            .find(|(_, members)| members.iter().any(|m| m == username))
            .map(|(segment, _)| *segment)
    }
}

/// Assign every contributor to exactly one segment.
///
/// Returns `None` when there are no contributors.
///
/// # Examples
///
/// ```
/// use orgpulse_core::{Contributor, Segment};
/// use orgpulse_insights::segments::segment_contributors;
///
/// let mut alice = Contributor::new("alice");
/// alice.total_commits = 100;
/// alice.repositories_count = 5;
/// let newcomer = Contributor::new("newcomer");
///
/// let result = segment_contributors(&[alice, newcomer]).unwrap();
/// assert_eq!(result.members(Segment::PowerUser), ["alice".to_string()]);
/// assert_eq!(result.segment_of("newcomer"), Some(Segment::OccasionalContributor));
/// ```
pub fn segment_contributors(contributors: &[Contributor]) -> Option<ContributorSegments> {
    if contributors.is_empty() {
        return None;
    }

    let mut segments: BTreeMap<Segment, Vec<String>> = BTreeMap::new();
    for contributor in contributors {
        let segment = Segment::classify(contributor.total_commits, contributor.repositories_count);
        segments
            .entry(segment)
            .or_default()
            .push(contributor.username.clone());
    }

    let total = contributors.len() as f64;
    let segment_statistics = segments
        .iter()
        .map(|(segment, members)| {
            let stats = SegmentStatistics {
                count: members.len(),
                percentage: round_to(members.len() as f64 / total * 100.0, 2),
            };
            (*segment, stats)
        })
        .collect();

    let segmentation_criteria = Segment::ALL
        .iter()
        .map(|segment| (*segment, segment.criteria()))
        .collect();

    debug!(occupied = segments.len(), "segmented contributors");

    Some(ContributorSegments {
        segments,
        segment_statistics,
        segmentation_criteria,
    })
}
