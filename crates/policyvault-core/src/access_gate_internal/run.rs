use super::super::AccessGate;
use super::{policy, store};
use crate::errors::LedgerError;
use crate::identity::{IdentityContext, Role};
use crate::keys;
use crate::model::AccessLogEntry;
use crate::policy::read_policy;
use crate::store::TransactionalStore;

pub(crate) fn get_medical_conditions_impl<S: TransactionalStore>(
    gate: &AccessGate<S>,
    caller: &dyn IdentityContext,
    policy_id: &str,
) -> Result<String, LedgerError> {
    let role = policy::resolve_role_impl(caller).inspect_err(|e| log_denial(caller, policy_id, e))?;
    keys::validate_policy_id(policy_id)?;

    let access_log = gate.collections.access_log();
    let medical_conditions = gate.collections.medical_conditions();

    let result = gate.store.transact(|txn| {
        if role == Role::Patient {
            let policy = read_policy(txn, policy_id)?;
            policy::check_ownership_impl(role, caller, &policy)?;
        }
        let entry = store::append_access_log_impl(txn, &access_log, caller, role, policy_id)?;
        let conditions = store::read_medical_conditions_impl(txn, &medical_conditions, policy_id)?;
        Ok((entry, conditions))
    });

    match result {
        Ok((entry, conditions)) => {
            tracing::info!(
                policy_id = %entry.policy_id,
                user_id = %entry.user_id,
                role = %entry.role,
                sequence = entry.sequence,
                "medical conditions disclosed"
            );
            Ok(conditions)
        }
        Err(e) => {
            log_denial(caller, policy_id, &e);
            Err(e)
        }
    }
}

pub(crate) fn access_history_impl<S: TransactionalStore>(
    gate: &AccessGate<S>,
    policy_id: &str,
) -> Result<Vec<AccessLogEntry>, LedgerError> {
    let access_log = gate.collections.access_log();
    gate.store.view(|txn| {
        read_policy(txn, policy_id)?;
        store::list_access_log_impl(txn, &access_log, policy_id)
    })
}

fn log_denial(caller: &dyn IdentityContext, policy_id: &str, error: &LedgerError) {
    if matches!(
        error,
        LedgerError::Unauthorized { .. } | LedgerError::AttributeMissing { .. }
    ) {
        tracing::warn!(
            policy_id = %policy_id,
            user_id = %caller.principal_id(),
            error = %error,
            "medical conditions access denied"
        );
    }
}
