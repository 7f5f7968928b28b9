//! Error types for the rig-alerts crate.

use thiserror::Error;

/// Errors raised while preparing rule evaluation.
///
/// Evaluating rules over a normalized series cannot fail; only a malformed
/// [`AlertConfig`](crate::AlertConfig) is rejected.
#[derive(Debug, Error)]
pub enum AlertError {
    /// A threshold or window in the configuration is unusable.
    #[error("invalid alert configuration: {reason}")]
    InvalidConfig {
        /// Why the configuration was rejected.
        reason: String,
    },
}

/// Result type for alert operations.
pub type Result<T> = std::result::Result<T, AlertError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_invalid_config() {
        let err = AlertError::InvalidConfig {
            reason: "ROP window must be positive".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid alert configuration: ROP window must be positive"
        );
    }
}
