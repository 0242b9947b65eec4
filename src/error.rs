//! Crate-level error types.

use std::fmt;

/// A caller broke the controller's sequencing contract.
///
/// These never abort a transition. The coordinator logs them and treats the
/// offending call as a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractViolation {
    /// A Change/End/Cancel sample arrived while no session was tracking.
    NotTracking,
    /// The transition context was no longer interactive when the gesture
    /// ended.
    NotInteractive,
    /// A sample arrived from a surface the controller is not bound to.
    UnboundSurface,
    /// The animator had no scrubbable animation to drive.
    NoAnimation,
}

impl fmt::Display for ContractViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotTracking => {
                write!(f, "gesture sample received while not tracking")
            }
            Self::NotInteractive => write!(
                f,
                "transition context must be interactive while handling a gesture"
            ),
            Self::UnboundSurface => {
                write!(f, "sample from a surface the controller is not bound to")
            }
            Self::NoAnimation => write!(f, "no scrubbable animation in flight"),
        }
    }
}

impl std::error::Error for ContractViolation {}

/// Errors produced by the pull-transition crate.
#[derive(Debug)]
pub enum TransitionError {
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options or script parsing/serialization failure.
    OptionsParse(String),
    /// Sequencing contract violation surfaced to the caller.
    Contract(ContractViolation),
}

impl fmt::Display for TransitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Contract(v) => write!(f, "contract violation: {v}"),
        }
    }
}

impl std::error::Error for TransitionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Contract(v) => Some(v),
            Self::OptionsParse(_) => None,
        }
    }
}

impl From<std::io::Error> for TransitionError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<ContractViolation> for TransitionError {
    fn from(v: ContractViolation) -> Self {
        Self::Contract(v)
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;

    #[test]
    fn contract_violation_is_the_source() {
        let err = TransitionError::from(ContractViolation::NotTracking);
        assert!(err.to_string().contains("not tracking"));
        assert!(err.source().is_some());
    }

    #[test]
    fn parse_error_has_no_source() {
        let err = TransitionError::OptionsParse("bad".into());
        assert_eq!(err.to_string(), "options parse error: bad");
        assert!(err.source().is_none());
    }
}
