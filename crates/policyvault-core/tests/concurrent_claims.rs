//! Concurrency tests for claim submission.
//!
//! Claims racing against the same policy must never push `claimedTotal` past
//! `sumAssured`, whether they share one connection or use separate
//! connections to the same file-backed database. Reads never wait on a writer.

use policyvault_core::{
    Collections, Ledger, LedgerConfig, LedgerError, NewPolicy, PolicyTerms, SqliteStore,
    SubmitClaimParams, TransactionalStore,
};
use std::path::Path;
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;

const CLAIM: i64 = 100;
const SUM_ASSURED: i64 = 500;
const RACERS: usize = 8;

fn config(dir: &TempDir, busy_timeout_ms: u64) -> LedgerConfig {
    LedgerConfig {
        database: dir.path().join("ledger.db"),
        busy_timeout_ms,
        ..LedgerConfig::default()
    }
}

fn create_policy(ledger: &Ledger) {
    ledger
        .policies()
        .create_policy(NewPolicy {
            policy_id: "P1".to_string(),
            terms: PolicyTerms {
                sum_assured: SUM_ASSURED,
                person_name: "alice".to_string(),
                ..PolicyTerms::default()
            },
            medical_conditions: "none".to_string(),
        })
        .unwrap();
}

fn claim() -> SubmitClaimParams<'static> {
    SubmitClaimParams {
        policy_id: "P1",
        claim_amount: CLAIM,
        claim_reason: "race",
        hospital_name: "General",
        date_of_admission: "",
        date_of_discharge: "",
        treatment_date: "",
        documents: "",
    }
}

fn assert_outcome(results: &[Result<i64, LedgerError>], ledger: &Ledger) {
    let accepted = results.iter().filter(|r| r.is_ok()).count();
    let rejected = results
        .iter()
        .filter(|r| matches!(r, Err(LedgerError::ClaimExceedsCoverage { .. })))
        .count();

    assert_eq!(accepted, (SUM_ASSURED / CLAIM) as usize);
    assert_eq!(rejected, RACERS - accepted);

    let policy = ledger.policies().get_policy("P1").unwrap();
    assert_eq!(policy.claimed_total, SUM_ASSURED);
    assert_eq!(ledger.claims().claim_history("P1").unwrap().len(), accepted);
}

/// Threads sharing one store handle serialize on its connection.
#[test]
fn test_shared_connection_never_overdraws() {
    let ledger = Arc::new(Ledger::new(
        SqliteStore::memory().unwrap(),
        Collections::default(),
    ));
    create_policy(&ledger);

    let handles: Vec<_> = (0..RACERS)
        .map(|_| {
            let ledger = Arc::clone(&ledger);
            thread::spawn(move || {
                ledger
                    .claims()
                    .submit_claim(&claim())
                    .map(|r| r.claimed_total)
            })
        })
        .collect();
    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_outcome(&results, &ledger);
}

/// Each thread opens its own connection; SQLite's write lock serializes them.
#[test]
fn test_separate_connections_never_overdraw() {
    let dir = TempDir::new().unwrap();
    let config = config(&dir, 10_000);
    let ledger = Ledger::open(&config).unwrap();
    create_policy(&ledger);

    let handles: Vec<_> = (0..RACERS)
        .map(|_| {
            let config = config.clone();
            thread::spawn(move || {
                let ledger = Ledger::open(&config).unwrap();
                ledger
                    .claims()
                    .submit_claim(&claim())
                    .map(|r| r.claimed_total)
            })
        })
        .collect();
    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_outcome(&results, &ledger);
}

/// A writer that cannot get the lock in time fails with Conflict and writes nothing.
#[test]
fn test_blocked_writer_reports_conflict() {
    let dir = TempDir::new().unwrap();
    let config = config(&dir, 0);
    let ledger = Ledger::open(&config).unwrap();
    create_policy(&ledger);

    let holder = SqliteStore::open(Path::new(&config.database), 0).unwrap();
    let blocked = holder
        .transact(|_txn| Ok(ledger.claims().submit_claim(&claim())))
        .unwrap();

    assert!(matches!(blocked, Err(LedgerError::Conflict(_))));
    let policy = ledger.policies().get_policy("P1").unwrap();
    assert_eq!(policy.claimed_total, 0);
    assert!(ledger.claims().claim_history("P1").unwrap().is_empty());
}

/// Reads run on a snapshot and succeed while another connection holds the write lock.
#[test]
fn test_reads_proceed_while_writer_holds_lock() {
    let dir = TempDir::new().unwrap();
    let config = config(&dir, 0);
    let ledger = Ledger::open(&config).unwrap();
    create_policy(&ledger);
    ledger.claims().submit_claim(&claim()).unwrap();

    let holder = SqliteStore::open(Path::new(&config.database), 0).unwrap();
    let (policy, claims, audit) = holder
        .transact(|_txn| {
            Ok((
                ledger.policies().get_policy("P1"),
                ledger.claims().claim_history("P1"),
                ledger.gate().access_history("P1"),
            ))
        })
        .unwrap();

    assert_eq!(policy.unwrap().claimed_total, CLAIM);
    assert_eq!(claims.unwrap().len(), 1);
    assert!(audit.unwrap().is_empty());
}
