//! Error taxonomy for ledger operations.

use std::fmt;
use thiserror::Error;

/// Why the access gate refused a caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DenialReason {
    /// The role attribute is present but is not one the gate recognizes.
    UnrecognizedRole(String),
    /// A patient asked for a policy whose holder is someone else.
    NotPolicyHolder,
}

impl fmt::Display for DenialReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnrecognizedRole(role) => {
                write!(f, "role '{role}' may not access medical conditions")
            }
            Self::NotPolicyHolder => {
                write!(f, "caller is not the holder of this policy")
            }
        }
    }
}

/// Ledger errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Policy not found: {policy_id}")]
    PolicyNotFound { policy_id: String },

    #[error("No sensitive data available for policy {policy_id}")]
    SensitiveDataNotFound { policy_id: String },

    #[error("Policy already exists: {policy_id}")]
    PolicyExists { policy_id: String },

    #[error("Failed to decode {record} at {key}: {detail}")]
    Deserialization {
        record: &'static str,
        key: String,
        detail: String,
    },

    #[error("Store error: {0}")]
    Persistence(String),

    #[error("Transaction conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {reason}")]
    Unauthorized { reason: DenialReason },

    #[error("Caller {principal} has no '{attribute}' attribute")]
    AttributeMissing {
        principal: String,
        attribute: &'static str,
    },

    #[error(
        "Claim of {claim_amount} exceeds coverage: {claimed_total} already claimed of {sum_assured}"
    )]
    ClaimExceedsCoverage {
        claim_amount: i64,
        claimed_total: i64,
        sum_assured: i64,
    },

    #[error("Invalid claim amount {amount}: must be greater than zero")]
    InvalidClaimAmount { amount: i64 },

    #[error("Invalid {field}: {detail}")]
    Validation { field: &'static str, detail: String },
}

/// Coarse classification of [`LedgerError`], stable across message changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Deserialization,
    Persistence,
    Conflict,
    Unauthorized,
    AttributeMissing,
    ClaimExceedsCoverage,
    InvalidInput,
}

impl LedgerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::PolicyNotFound { .. } | Self::SensitiveDataNotFound { .. } => ErrorKind::NotFound,
            Self::Deserialization { .. } => ErrorKind::Deserialization,
            Self::Persistence(_) => ErrorKind::Persistence,
            Self::Conflict(_) => ErrorKind::Conflict,
            Self::Unauthorized { .. } => ErrorKind::Unauthorized,
            Self::AttributeMissing { .. } => ErrorKind::AttributeMissing,
            Self::ClaimExceedsCoverage { .. } => ErrorKind::ClaimExceedsCoverage,
            Self::PolicyExists { .. }
            | Self::InvalidClaimAmount { .. }
            | Self::Validation { .. } => ErrorKind::InvalidInput,
        }
    }

    pub(crate) fn validation(field: &'static str, detail: impl Into<String>) -> Self {
        Self::Validation {
            field,
            detail: detail.into(),
        }
    }
}

impl From<rusqlite::Error> for LedgerError {
    fn from(e: rusqlite::Error) -> Self {
        match e.sqlite_error_code() {
            Some(rusqlite::ErrorCode::DatabaseBusy) | Some(rusqlite::ErrorCode::DatabaseLocked) => {
                LedgerError::Conflict(e.to_string())
            }
            _ => LedgerError::Persistence(e.to_string()),
        }
    }
}
