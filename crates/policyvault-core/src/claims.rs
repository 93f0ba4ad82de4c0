//! Claim processing.
//!
//! A claim is accepted only if `claimedTotal + claimAmount <= sumAssured`.
//! The check, the claim record and the new running total share one
//! transaction, so a rejected or failed claim leaves no trace.

use crate::config::Collections;
use crate::errors::LedgerError;
use crate::keys;
use crate::model::{self, ClaimReceipt, ClaimRecord, SubmitClaimParams};
use crate::policy::{read_policy, write_policy};
use crate::store::TransactionalStore;

/// Owns claim records and the policy running total.
pub struct ClaimProcessor<S> {
    store: S,
    collections: Collections,
}

impl<S: TransactionalStore> ClaimProcessor<S> {
    pub fn new(store: S, collections: Collections) -> Self {
        Self { store, collections }
    }

    /// Validate and apply a claim.
    ///
    /// Flow:
    /// 1. Reject non-positive amounts
    /// 2. Load the policy
    /// 3. Check the new total against `sumAssured`
    /// 4. Append the claim record, stamped with transaction time
    /// 5. Persist the policy with the new total
    pub fn submit_claim(&self, params: &SubmitClaimParams<'_>) -> Result<ClaimReceipt, LedgerError> {
        let SubmitClaimParams {
            policy_id,
            claim_amount,
            claim_reason,
            hospital_name,
            date_of_admission,
            date_of_discharge,
            treatment_date,
            documents,
        } = *params;

        if claim_amount <= 0 {
            return Err(LedgerError::InvalidClaimAmount {
                amount: claim_amount,
            });
        }

        let claims_ns = self.collections.claims();
        let result = self.store.transact(|txn| {
            let mut policy = read_policy(txn, policy_id)?;

            let new_total = policy
                .claimed_total
                .checked_add(claim_amount)
                .filter(|total| *total <= policy.sum_assured)
                .ok_or(LedgerError::ClaimExceedsCoverage {
                    claim_amount,
                    claimed_total: policy.claimed_total,
                    sum_assured: policy.sum_assured,
                })?;

            let sequence = keys::next_sequence(txn, &claims_ns, policy_id)?;
            let record = ClaimRecord {
                policy_id: policy_id.to_string(),
                sequence,
                claim_amount,
                claim_reason: claim_reason.to_string(),
                hospital_name: hospital_name.to_string(),
                date_of_admission: date_of_admission.to_string(),
                date_of_discharge: date_of_discharge.to_string(),
                treatment_date: treatment_date.to_string(),
                documents: documents.to_string(),
                timestamp: txn.timestamp(),
            };
            txn.put(
                &claims_ns,
                &keys::history_key(policy_id, sequence),
                &model::encode("claim record", &record)?,
            )?;

            policy.claimed_total = new_total;
            write_policy(txn, &policy)?;

            Ok(ClaimReceipt {
                policy_id: policy.policy_id.clone(),
                sequence,
                claim_amount,
                claimed_total: new_total,
                remaining_cover: policy.remaining_cover(),
                recorded_at: record.timestamp,
            })
        });

        match &result {
            Ok(receipt) => tracing::info!(
                policy_id = %receipt.policy_id,
                sequence = receipt.sequence,
                claim_amount,
                claimed_total = receipt.claimed_total,
                "claim accepted"
            ),
            Err(e) if matches!(e, LedgerError::ClaimExceedsCoverage { .. }) => tracing::warn!(
                policy_id = %policy_id,
                claim_amount,
                error = %e,
                "claim rejected"
            ),
            Err(_) => {}
        }
        result
    }

    /// Claim records for a policy, oldest first.
    pub fn claim_history(&self, policy_id: &str) -> Result<Vec<ClaimRecord>, LedgerError> {
        let claims_ns = self.collections.claims();
        self.store.view(|txn| {
            read_policy(txn, policy_id)?;
            txn.scan_prefix(&claims_ns, &keys::history_prefix(policy_id))?
                .into_iter()
                .map(|(key, bytes)| model::decode("claim record", &key, &bytes))
                .collect()
        })
    }
}
