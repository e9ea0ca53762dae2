//! Shared error classification.
//!
//! Each module keeps its own `thiserror` enum (`InventoryError`, `MapError`,
//! `ShopError`); [`GameError`] lets callers treat them alike when deciding
//! whether to toast, log or abort.

/// How bad a failure is.
///
/// - `Recoverable`: retrying later may work (full backpack, short on gold)
/// - `Validation`: the request was malformed (wrong slot, bad index)
/// - `Internal`: state that should be impossible
/// - `Fatal`: unusable content
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    Recoverable,
    Validation,
    Internal,
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Bug or broken content rather than a player mistake.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Implemented by every error enum in the workspace.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Stable SCREAMING_SNAKE identifier for logs and tests.
    fn error_code(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_classification() {
        assert!(ErrorSeverity::Recoverable.is_recoverable());
        assert!(!ErrorSeverity::Validation.is_recoverable());
        assert!(ErrorSeverity::Fatal.is_internal());
        assert!(!ErrorSeverity::Validation.is_internal());
        assert_eq!(ErrorSeverity::Internal.as_str(), "internal");
    }
}
