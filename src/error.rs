//! Errors produced by key generation, renewal and recovery.
use thiserror::Error;

/// Represents an error which can happen while running the DKG or using its output.
///
/// Members are reported by a short hex fingerprint of their id.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DkgError {
    /// A share failed the Feldman check against its sender's verification vector.
    ///
    /// The contribution must be excluded or resent, the round does not abort.
    #[error("share from member {sender} failed verification")]
    InvalidShare { sender: String },

    #[error("verification vector length mismatch: expected {expected}, found {found}")]
    LengthMismatch { expected: usize, found: usize },

    #[error("insufficient shares: need {required}, got {got}")]
    InsufficientShares { required: usize, got: usize },

    #[error("duplicate member id {0}")]
    DuplicateId(String),

    /// Aggregating nothing has no defined result.
    #[error("cannot aggregate an empty set")]
    UndefinedAggregate,

    /// The underlying curve capability failed, e.g. on a malformed encoding.
    #[error("curve capability failure: {0}")]
    CapabilityFailure(String),

    #[error("bad parameters: {0}")]
    BadParameters(String),

    #[error("member {0} is not part of this group")]
    UnknownMember(String),

    #[error("member {0} already contributed to this round")]
    DuplicateContribution(String),

    /// A renewal contribution did not commit to a zero secret.
    #[error("renewal contribution from member {sender} has a non-zero constant term")]
    NonZeroContribution { sender: String },

    #[error("round incomplete: waiting on {missing} member(s)")]
    Incomplete { missing: usize },

    #[error("new group public key does not match the old group public key")]
    PublicKeyMismatch,

    #[error("assertion failed: {0}")]
    AssertionFailed(String),
}
