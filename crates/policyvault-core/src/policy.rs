//! Policy lifecycle: create, read, update.
//!
//! Creation writes the public policy and its medical conditions in one
//! transaction. Policies are never deleted.

use crate::config::Collections;
use crate::errors::LedgerError;
use crate::keys;
use crate::model::{self, NewPolicy, Policy, PolicyTerms, SensitiveMedicalData};
use crate::store::{Namespace, Transaction, TransactionalStore};

/// Owns the public policy records.
pub struct PolicyManager<S> {
    store: S,
    collections: Collections,
}

impl<S: TransactionalStore> PolicyManager<S> {
    pub fn new(store: S, collections: Collections) -> Self {
        Self { store, collections }
    }

    /// Store a new policy with `claimedTotal = 0` and its medical conditions.
    ///
    /// Fails with `PolicyExists` if the id is taken.
    pub fn create_policy(&self, new_policy: NewPolicy) -> Result<Policy, LedgerError> {
        let NewPolicy {
            policy_id,
            terms,
            medical_conditions,
        } = new_policy;
        keys::validate_policy_id(&policy_id)?;
        validate_terms(&terms)?;

        let policy = Policy::new(policy_id, terms);
        let sensitive = SensitiveMedicalData { medical_conditions };
        let medical_ns = self.collections.medical_conditions();

        self.store.transact(|txn| {
            if txn.get(&Namespace::Public, &policy.policy_id)?.is_some() {
                return Err(LedgerError::PolicyExists {
                    policy_id: policy.policy_id.clone(),
                });
            }
            write_policy(txn, &policy)?;
            txn.put(
                &medical_ns,
                &policy.policy_id,
                &model::encode("medical conditions", &sensitive)?,
            )
        })?;

        tracing::info!(
            policy_id = %policy.policy_id,
            sum_assured = policy.sum_assured,
            "policy created"
        );
        Ok(policy)
    }

    pub fn get_policy(&self, policy_id: &str) -> Result<Policy, LedgerError> {
        self.store.view(|txn| read_policy(txn, policy_id))
    }

    /// Replace every term of an existing policy. `claimedTotal` is preserved.
    ///
    /// No caller check happens here; callers gate updates themselves.
    pub fn update_policy(&self, policy_id: &str, terms: PolicyTerms) -> Result<Policy, LedgerError> {
        validate_terms(&terms)?;

        let policy = self.store.transact(|txn| {
            let mut policy = read_policy(txn, policy_id)?;
            if terms.sum_assured < policy.claimed_total {
                return Err(LedgerError::validation(
                    "sumAssured",
                    format!(
                        "{} is below the {} already claimed",
                        terms.sum_assured, policy.claimed_total
                    ),
                ));
            }
            policy.apply_terms(terms);
            write_policy(txn, &policy)?;
            Ok(policy)
        })?;

        tracing::info!(policy_id = %policy.policy_id, "policy updated");
        Ok(policy)
    }
}

/// Load a policy inside an open transaction.
///
/// A legacy `medicalConditions` value is dropped so it never leaves the gate.
pub(crate) fn read_policy(txn: &dyn Transaction, policy_id: &str) -> Result<Policy, LedgerError> {
    let bytes = txn
        .get(&Namespace::Public, policy_id)?
        .ok_or_else(|| LedgerError::PolicyNotFound {
            policy_id: policy_id.to_string(),
        })?;
    let mut policy: Policy = model::decode("policy", policy_id, &bytes)?;
    policy.medical_conditions = None;
    Ok(policy)
}

pub(crate) fn write_policy(txn: &mut dyn Transaction, policy: &Policy) -> Result<(), LedgerError> {
    txn.put(
        &Namespace::Public,
        &policy.policy_id,
        &model::encode("policy", policy)?,
    )
}

fn validate_terms(terms: &PolicyTerms) -> Result<(), LedgerError> {
    if terms.person_name.trim().is_empty() {
        return Err(LedgerError::validation("personName", "must not be empty"));
    }
    if terms.sum_assured < 0 {
        return Err(LedgerError::validation(
            "sumAssured",
            format!("{} is negative", terms.sum_assured),
        ));
    }
    if !(0..=100).contains(&terms.co_pay) {
        return Err(LedgerError::validation(
            "coPay",
            format!("{} is not a percentage", terms.co_pay),
        ));
    }
    Ok(())
}
