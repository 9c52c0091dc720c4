//! Core types, configuration, and error handling for OrgPulse.
//!
//! This crate provides the shared foundation used by the insights engine:
//! - [`OrgPulseError`]: unified error type using `thiserror` and `miette`
//! - [`InsightsConfig`]: configuration loaded from `orgpulse.toml`
//! - Input records: [`Contributor`], [`RepoWork`], and the [`Dataset`] loader
//! - Closed classifications: [`ActivityLevel`], [`ContributionStyle`], [`Segment`]

mod config;
pub mod dataset;
mod error;
mod types;

pub use config::{
    InsightsConfig, LimitsConfig, NetworkConfig, RepositoryConfig, RepositoryKey, ThresholdConfig,
};
pub use dataset::Dataset;
pub use error::OrgPulseError;
pub use types::{ActivityLevel, ContributionStyle, Contributor, RepoWork, Segment, UNKNOWN};

/// A convenience `Result` type for OrgPulse operations.
pub type Result<T> = std::result::Result<T, OrgPulseError>;
