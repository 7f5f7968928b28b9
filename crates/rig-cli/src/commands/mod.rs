//! CLI command implementations.
//!
//! Each submodule implements a specific CLI command:
//! - [`analyze`] - Sensor export analysis
//! - [`rules`] - Rule set listing

pub mod analyze;
pub mod rules;

pub use analyze::{AnalysisReport, AnalyzeCommand};
pub use rules::{RuleList, RulesCommand};
