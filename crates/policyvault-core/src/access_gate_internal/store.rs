use crate::errors::LedgerError;
use crate::identity::{IdentityContext, Role};
use crate::keys;
use crate::model::{self, AccessLogEntry, SensitiveMedicalData, ACCESS_ACTION_MEDICAL_CONDITIONS};
use crate::store::{Namespace, Transaction};

pub(super) fn append_access_log_impl(
    txn: &mut dyn Transaction,
    access_log: &Namespace,
    caller: &dyn IdentityContext,
    role: Role,
    policy_id: &str,
) -> Result<AccessLogEntry, LedgerError> {
    let sequence = keys::next_sequence(txn, access_log, policy_id)?;
    let entry = AccessLogEntry {
        user_id: caller.principal_id().to_string(),
        role: role.as_str().to_string(),
        policy_id: policy_id.to_string(),
        action: ACCESS_ACTION_MEDICAL_CONDITIONS.to_string(),
        timestamp: txn.timestamp(),
        access_granted: "true".to_string(),
        sequence,
    };
    txn.put(
        access_log,
        &keys::history_key(policy_id, sequence),
        &model::encode("access log entry", &entry)?,
    )?;
    Ok(entry)
}

pub(super) fn read_medical_conditions_impl(
    txn: &dyn Transaction,
    medical_conditions: &Namespace,
    policy_id: &str,
) -> Result<String, LedgerError> {
    let bytes = txn.get(medical_conditions, policy_id)?.ok_or_else(|| {
        LedgerError::SensitiveDataNotFound {
            policy_id: policy_id.to_string(),
        }
    })?;
    let record: SensitiveMedicalData = model::decode("medical conditions", policy_id, &bytes)?;
    Ok(record.medical_conditions)
}

pub(super) fn list_access_log_impl(
    txn: &dyn Transaction,
    access_log: &Namespace,
    policy_id: &str,
) -> Result<Vec<AccessLogEntry>, LedgerError> {
    txn.scan_prefix(access_log, &keys::history_prefix(policy_id))?
        .into_iter()
        .map(|(key, bytes)| model::decode("access log entry", &key, &bytes))
        .collect()
}
