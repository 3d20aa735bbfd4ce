//! Common error infrastructure for battle-core.
//!
//! Domain-specific errors (e.g. [`crate::session::SessionError`],
//! [`crate::action::QueueError`]) live next to the operations they guard.
//! This module only provides the shared classification used by callers to
//! decide between retrying with corrected input and reporting a bug.
//!
//! No condition inside the core is fatal to the process: every rejected
//! operation leaves the battle session exactly as it was before the call.

/// How a caller should react to a rejected operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum ErrorSeverity {
    /// The same intent may succeed later or with a smaller queue
    /// (over budget, not enough MP, silenced, incapacitated).
    Recoverable,

    /// The request itself is wrong and will be rejected again unchanged
    /// (unknown ability, tampered costs, finished encounter).
    Validation,
}

impl ErrorSeverity {
    pub const fn is_recoverable(self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Classification shared by every error enum in this crate.
pub trait BattleError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Stable identifier for the variant, suitable for logs and clients.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_names() {
        assert!(ErrorSeverity::Recoverable.is_recoverable());
        assert!(!ErrorSeverity::Validation.is_recoverable());
        assert_eq!(ErrorSeverity::Validation.as_ref(), "validation");
        assert_eq!(ErrorSeverity::Recoverable.to_string(), "recoverable");
    }
}
