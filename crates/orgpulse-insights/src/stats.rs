//! Numeric helpers shared by the analyses: rounding, means, linear
//! percentiles, describe-style summaries, and an insertion-ordered tally.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::ser::{Serialize, Serializer};

/// Round `value` to `places` decimal places.
///
/// # Examples
///
/// ```
/// use orgpulse_insights::stats::round_to;
///
/// assert_eq!(round_to(58.333_333, 2), 58.33);
/// assert_eq!(round_to(11.666_666, 2), 11.67);
/// ```
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Arithmetic mean, `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Percentile with linear interpolation between closest ranks.
///
/// `p` is in `[0, 100]`. The input does not need to be sorted.
/// Returns `None` for an empty slice.
///
/// # Examples
///
/// ```
/// use orgpulse_insights::stats::percentile;
///
/// let values = [1.0, 2.0, 3.0, 4.0];
/// assert_eq!(percentile(&values, 50.0), Some(2.5));
/// assert_eq!(percentile(&values, 90.0), Some(3.7));
/// assert_eq!(percentile(&[], 50.0), None);
/// ```
pub fn percentile(values: &[f64], p: f64) -> Option<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    percentile_of_sorted(&sorted, p)
}

fn percentile_of_sorted(sorted: &[f64], p: f64) -> Option<f64> {
    let last = sorted.len().checked_sub(1)?;
    let rank = (p.clamp(0.0, 100.0) / 100.0) * last as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let fraction = rank - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
}

/// Descriptive statistics over one column of values.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ColumnSummary {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation; `None` with fewer than two values.
    pub std: Option<f64>,
    pub min: f64,
    #[serde(rename = "25%")]
    pub p25: f64,
    #[serde(rename = "50%")]
    pub p50: f64,
    #[serde(rename = "75%")]
    pub p75: f64,
    pub max: f64,
}

/// Summarize a column: count, mean, sample std, min, quartiles, max.
///
/// # Examples
///
/// ```
/// use orgpulse_insights::stats::describe;
///
/// let summary = describe(&[90.0, 40.0, 25.0]).unwrap();
/// assert_eq!(summary.count, 3);
/// assert_eq!(summary.min, 25.0);
/// assert_eq!(summary.p50, 40.0);
/// assert_eq!(summary.max, 90.0);
/// ```
pub fn describe(values: &[f64]) -> Option<ColumnSummary> {
    let mean = mean(values)?;
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let std = (sorted.len() > 1).then(|| {
        let variance = sorted.iter().map(|v| (v - mean).powi(2)).sum::<f64>()
            / (sorted.len() - 1) as f64;
        variance.sqrt()
    });

    Some(ColumnSummary {
        count: sorted.len(),
        mean,
        std,
        min: sorted[0],
        p25: percentile_of_sorted(&sorted, 25.0)?,
        p50: percentile_of_sorted(&sorted, 50.0)?,
        p75: percentile_of_sorted(&sorted, 75.0)?,
        max: sorted[sorted.len() - 1],
    })
}

/// A label with its frequency. Serializes as a `[label, count]` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelCount {
    pub label: String,
    pub count: usize,
}

impl LabelCount {
    pub fn new(label: impl Into<String>, count: usize) -> Self {
        Self {
            label: label.into(),
            count,
        }
    }
}

impl Serialize for LabelCount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (&self.label, self.count).serialize(serializer)
    }
}

/// Frequency counter that remembers first-encounter order.
///
/// Ties in [`Tally::most_common`] are broken by that order.
///
/// # Examples
///
/// ```
/// use orgpulse_insights::stats::Tally;
///
/// let mut tally = Tally::default();
/// for label in ["rust", "go", "go", "python", "rust"] {
///     tally.add(label);
/// }
/// let top = tally.most_common(2);
/// assert_eq!(top[0].label, "rust");
/// assert_eq!(top[1].label, "go");
/// assert_eq!(tally.total(), 5);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Tally {
    order: Vec<String>,
    counts: HashMap<String, usize>,
}

impl Tally {
    pub fn add(&mut self, label: &str) {
        match self.counts.get_mut(label) {
            Some(count) => *count += 1,
            None => {
                self.order.push(label.to_string());
                self.counts.insert(label.to_string(), 1);
            }
        }
    }

    pub fn get(&self, label: &str) -> usize {
        self.counts.get(label).copied().unwrap_or(0)
    }

    /// Number of distinct labels.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Labels with counts, in first-encounter order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.order
            .iter()
            .map(|label| (label.as_str(), self.get(label)))
    }

    /// The `n` most frequent labels, descending, ties in encounter order.
    pub fn most_common(&self, n: usize) -> Vec<LabelCount> {
        let mut ranked: Vec<LabelCount> = self
            .iter()
            .map(|(label, count)| LabelCount::new(label, count))
            .collect();
        ranked.sort_by(|a, b| b.count.cmp(&a.count));
        ranked.truncate(n);
        ranked
    }

    pub fn to_distribution(&self) -> BTreeMap<String, usize> {
        self.counts.clone().into_iter().collect()
    }
}

/// Labels with duplicates removed, keeping the first occurrence.
pub fn distinct(labels: &[String]) -> Vec<&str> {
    let mut seen = HashSet::new();
    labels
        .iter()
        .map(String::as_str)
        .filter(|label| seen.insert(*label))
        .collect()
}
