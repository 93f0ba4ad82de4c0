//! One handle over all ledger components.

use crate::access_gate::AccessGate;
use crate::claims::ClaimProcessor;
use crate::config::{Collections, LedgerConfig};
use crate::errors::LedgerError;
use crate::policy::PolicyManager;
use crate::store::{SqliteStore, TransactionalStore};

/// Policy manager, claim processor and access gate sharing one store.
pub struct Ledger<S = SqliteStore> {
    policies: PolicyManager<S>,
    claims: ClaimProcessor<S>,
    gate: AccessGate<S>,
}

impl<S: TransactionalStore + Clone> Ledger<S> {
    pub fn new(store: S, collections: Collections) -> Self {
        Self {
            policies: PolicyManager::new(store.clone(), collections.clone()),
            claims: ClaimProcessor::new(store.clone(), collections.clone()),
            gate: AccessGate::new(store, collections),
        }
    }

    pub fn policies(&self) -> &PolicyManager<S> {
        &self.policies
    }

    pub fn claims(&self) -> &ClaimProcessor<S> {
        &self.claims
    }

    pub fn gate(&self) -> &AccessGate<S> {
        &self.gate
    }
}

impl Ledger<SqliteStore> {
    /// Open the file-backed ledger described by `config`.
    pub fn open(config: &LedgerConfig) -> Result<Self, LedgerError> {
        config.validate()?;
        let store = SqliteStore::open(&config.database, config.busy_timeout_ms)?;
        Ok(Self::new(store, config.collections.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::CallerIdentity;
    use crate::model::{NewPolicy, PolicyTerms, SubmitClaimParams};

    #[test]
    fn test_open_creates_database_and_runs_lifecycle() {
        let dir = tempfile::tempdir().unwrap();
        let config = LedgerConfig {
            database: dir.path().join("ledger").join("ledger.db"),
            ..LedgerConfig::default()
        };
        let ledger = Ledger::open(&config).unwrap();

        ledger
            .policies()
            .create_policy(NewPolicy {
                policy_id: "P1".to_string(),
                terms: PolicyTerms {
                    sum_assured: 500,
                    person_name: "carol".to_string(),
                    ..PolicyTerms::default()
                },
                medical_conditions: "hypertension".to_string(),
            })
            .unwrap();
        ledger
            .claims()
            .submit_claim(&SubmitClaimParams {
                policy_id: "P1",
                claim_amount: 200,
                claim_reason: "checkup",
                hospital_name: "",
                date_of_admission: "",
                date_of_discharge: "",
                treatment_date: "",
                documents: "",
            })
            .unwrap();
        let carol = CallerIdentity::new("carol").with_role("patient");
        let conditions = ledger.gate().get_medical_conditions(&carol, "P1").unwrap();

        assert_eq!(conditions, "hypertension");
        assert!(config.database.exists());
        drop(ledger);

        let reopened = Ledger::open(&config).unwrap();
        assert_eq!(reopened.policies().get_policy("P1").unwrap().claimed_total, 200);
        assert_eq!(reopened.gate().access_history("P1").unwrap().len(), 1);
    }

    #[test]
    fn test_custom_collections_are_used() {
        let store = SqliteStore::memory().unwrap();
        let collections = Collections {
            medical_conditions: "mc-v2".to_string(),
            claims: "claims-v2".to_string(),
            access_log: "audit-v2".to_string(),
        };
        let ledger = Ledger::new(store.clone(), collections.clone());
        ledger
            .policies()
            .create_policy(NewPolicy {
                policy_id: "P1".to_string(),
                terms: PolicyTerms {
                    person_name: "dave".to_string(),
                    ..PolicyTerms::default()
                },
                medical_conditions: "none".to_string(),
            })
            .unwrap();

        assert_eq!(store.count_entries(&collections.medical_conditions()).unwrap(), 1);
        assert_eq!(
            store
                .count_entries(&Collections::default().medical_conditions())
                .unwrap(),
            0
        );
    }

    #[test]
    fn test_open_rejects_invalid_config() {
        let config = LedgerConfig {
            collections: Collections {
                claims: "same".to_string(),
                access_log: "same".to_string(),
                ..Collections::default()
            },
            ..LedgerConfig::default()
        };
        assert!(matches!(
            Ledger::open(&config),
            Err(LedgerError::Validation { .. })
        ));
    }
}
