//! # rig-cli
//!
//! rigwatch command-line interface.
//!
//! Provides commands for:
//! - Analyzing a drilling sensor CSV export
//! - Listing the alert rules and their thresholds
//!
//! # Architecture
//!
//! The `analyze` command drives one [`pipeline::Session`] through the
//! normalizer, the rule evaluator and the summary reporter, then renders the
//! result as a table or JSON.
//!
//! ```text
//! ┌────────────┐   ┌────────────┐   ┌───────────┐   ┌──────────┐
//! │ rig-series │──►│ rig-alerts │──►│ rig-stats │──►│ rig-cli  │
//! └────────────┘   └────────────┘   └───────────┘   └──────────┘
//!   normalize        evaluate         summarize       render
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod commands;
pub mod error;
pub mod output;
pub mod pipeline;

pub use cli::{AnalyzeArgs, Cli, Commands, Format};
pub use error::{CliError, Result};
pub use output::OutputFormat;
pub use pipeline::{Analysis, AnalysisOptions, Session, SessionState};
