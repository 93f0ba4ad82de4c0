//! Key layout.
//!
//! - public namespace: `{policyID}`
//! - medical-conditions collection: `{policyID}`
//! - claims and access-log collections: `{policyID}/{sequence:010}`
//!
//! The zero-padded sequence keeps lexical key order equal to append order.

use crate::errors::LedgerError;
use crate::store::{Namespace, Transaction};

const SEPARATOR: char = '/';

pub(crate) fn validate_policy_id(policy_id: &str) -> Result<(), LedgerError> {
    if policy_id.trim().is_empty() {
        return Err(LedgerError::validation("policyID", "must not be empty"));
    }
    if policy_id.contains(SEPARATOR) {
        return Err(LedgerError::validation(
            "policyID",
            format!("must not contain '{SEPARATOR}'"),
        ));
    }
    Ok(())
}

pub(crate) fn history_prefix(policy_id: &str) -> String {
    format!("{policy_id}{SEPARATOR}")
}

pub(crate) fn history_key(policy_id: &str, sequence: u64) -> String {
    format!("{policy_id}{SEPARATOR}{sequence:010}")
}

/// Next free sequence number for a policy's history in `namespace`.
///
/// Reads only the greatest existing key, so appends cost the same however
/// long the history is.
pub(crate) fn next_sequence(
    txn: &dyn Transaction,
    namespace: &Namespace,
    policy_id: &str,
) -> Result<u64, LedgerError> {
    let last = txn
        .last_key(namespace, &history_prefix(policy_id))?
        .as_deref()
        .and_then(|key| key.rsplit(SEPARATOR).next())
        .and_then(|seq| seq.parse::<u64>().ok())
        .unwrap_or(0);
    Ok(last + 1)
}
