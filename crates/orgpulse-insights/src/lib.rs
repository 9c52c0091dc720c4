//! Organization insights: aggregate statistics over contributor profiles
//! and per-repository work records.
//!
//! Each analysis lives in its own module and is a pure function of the two
//! input collections, returning `None` when there is nothing to report:
//! - [`overview`]: headline totals, activity distribution, top languages
//! - [`skills`]: skill frequencies, diversity, rare skills
//! - [`repositories`]: per-repository activity and diversity
//! - [`segments`]: four-tier contributor segmentation
//! - [`collaboration`]: contributor pairs sharing repositories
//! - [`technology`]: popular and emerging technologies
//! - [`productivity`]: commits-per-repository ranking and percentiles
//! - [`recommendations`]: templated advice built from the above
//! - [`report`]: single-contributor projection
//! - [`network`]: contributor/repository graph statistics
//! - [`filters`]: search, filter, and sort over the inputs
//!
//! [`InsightsEngine`] holds a snapshot of both collections plus an
//! [`orgpulse_core::InsightsConfig`] and exposes every analysis as a method.

pub mod collaboration;
pub mod engine;
pub mod filters;
mod grouping;
pub mod network;
pub mod overview;
pub mod productivity;
pub mod recommendations;
pub mod report;
pub mod repositories;
pub mod segments;
pub mod skills;
pub mod stats;
pub mod technology;

pub use engine::{ComprehensiveInsights, InsightsEngine};
