//! Rules command implementation.
//!
//! Lists the fixed rule set with the thresholds in effect.

use std::io::Write;

use rig_alerts::{AlertConfig, Rule};
use serde::Serialize;

use crate::error::CliError;
use crate::output::{OutputFormat, TableDisplay};

/// Handler for the rules command.
#[derive(Debug, Default)]
pub struct RulesCommand {
    alerts: AlertConfig,
}

impl RulesCommand {
    /// Creates a handler using the default rule thresholds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the rule thresholds.
    #[must_use]
    pub fn with_alerts(mut self, alerts: AlertConfig) -> Self {
        self.alerts = alerts;
        self
    }

    /// Executes the rules command.
    ///
    /// # Errors
    ///
    /// Returns error if writing fails.
    pub fn execute<W: Write>(&self, out: &mut W, format: &OutputFormat) -> Result<(), CliError> {
        let list = RuleList::new(&self.alerts);
        format.write(out, &list)?;
        Ok(())
    }
}

/// One rule for display.
#[derive(Debug, Clone, Serialize)]
pub struct RuleInfo {
    /// Evaluation position, starting at 1.
    pub order: usize,
    /// Stable identifier.
    pub id: &'static str,
    /// Condition with thresholds.
    pub condition: String,
    /// Alert message.
    pub message: &'static str,
}

/// The rule set for display.
#[derive(Debug, Clone, Serialize)]
pub struct RuleList {
    /// Rules in declaration order.
    pub rules: Vec<RuleInfo>,
}

impl RuleList {
    /// Describes every rule using the thresholds in `config`.
    #[must_use]
    pub fn new(config: &AlertConfig) -> Self {
        let rules = Rule::ALL
            .iter()
            .enumerate()
            .map(|(i, rule)| RuleInfo {
                order: i + 1,
                id: rule.id(),
                condition: rule.condition(config),
                message: rule.message(),
            })
            .collect();
        Self { rules }
    }
}

impl TableDisplay for RuleList {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        writeln!(writer, "{:>2}  {:<22}  CONDITION", "#", "ID")?;
        writeln!(writer, "{}", "─".repeat(96))?;
        for rule in &self.rules {
            writeln!(writer, "{:>2}  {:<22}  {}", rule.order, rule.id, rule.condition)?;
            writeln!(writer, "    {:<22}  {}", "", rule.message)?;
        }
        writeln!(writer)?;
        writeln!(writer, "Total: {} rule(s)", self.rules.len())?;
        Ok(())
    }
}
