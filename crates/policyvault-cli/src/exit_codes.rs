//! Process exit codes. Part of the public contract of the `policyvault` binary.

use policyvault_core::{ErrorKind, LedgerError};

pub const SUCCESS: i32 = 0;
pub const REJECTED: i32 = 1; // Business-rule rejection or record not found
pub const CONFIG_ERROR: i32 = 2; // Bad configuration, store failure, internal error
pub const UNAUTHORIZED: i32 = 3; // Access gate refused the caller
pub const CONFLICT: i32 = 4; // Competing writer held the ledger; safe to retry

pub fn for_ledger_error(err: &LedgerError) -> i32 {
    match err.kind() {
        ErrorKind::NotFound | ErrorKind::ClaimExceedsCoverage | ErrorKind::InvalidInput => REJECTED,
        ErrorKind::Unauthorized | ErrorKind::AttributeMissing => UNAUTHORIZED,
        ErrorKind::Conflict => CONFLICT,
        ErrorKind::Deserialization | ErrorKind::Persistence => CONFIG_ERROR,
    }
}

/// Exit code for a command failure. Errors that carry no [`LedgerError`] are
/// configuration or I/O problems.
pub fn for_error(err: &anyhow::Error) -> i32 {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<LedgerError>())
        .map_or(CONFIG_ERROR, for_ledger_error)
}
