//! Access control gate for medical conditions.
//!
//! Flow for every read:
//! 1. Resolve the caller's `role` attribute (missing or unknown role fails
//!    before the store is touched)
//! 2. Patients: load the policy and require `personName == principal id`
//! 3. Append an access-log entry
//! 4. Read the restricted medical-conditions record
//!
//! Steps 2-4 run in one transaction. The audit entry commits only together
//! with the disclosure, and a denied caller leaves no entry behind.

use crate::config::Collections;
use crate::errors::LedgerError;
use crate::identity::IdentityContext;
use crate::model::AccessLogEntry;
use crate::store::TransactionalStore;

#[path = "access_gate_internal/mod.rs"]
mod access_gate_internal;

/// Gate in front of the medical-conditions collection.
pub struct AccessGate<S> {
    store: S,
    collections: Collections,
}

impl<S: TransactionalStore> AccessGate<S> {
    pub fn new(store: S, collections: Collections) -> Self {
        Self { store, collections }
    }

    /// Return the medical conditions of a policy to an authorized caller.
    ///
    /// Doctors may read any policy. Patients may read only the policies whose
    /// `personName` equals their principal id. Every successful read appends
    /// exactly one [`AccessLogEntry`].
    pub fn get_medical_conditions(
        &self,
        caller: &dyn IdentityContext,
        policy_id: &str,
    ) -> Result<String, LedgerError> {
        access_gate_internal::run::get_medical_conditions_impl(self, caller, policy_id)
    }

    /// Access-log entries for a policy, oldest first.
    pub fn access_history(&self, policy_id: &str) -> Result<Vec<AccessLogEntry>, LedgerError> {
        access_gate_internal::run::access_history_impl(self, policy_id)
    }
}
