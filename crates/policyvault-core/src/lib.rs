//! Health-insurance policy and claim ledger.
//!
//! Policies live in a public namespace. Each policy's medical conditions live
//! in a restricted collection that is only readable through the
//! [`AccessGate`]. Claims are checked against the policy's assured sum and
//! recorded in a restricted claims collection.
//!
//! # Quick Start
//!
//! ```no_run
//! use policyvault_core::{CallerIdentity, Ledger, LedgerConfig};
//!
//! # fn example() -> Result<(), policyvault_core::LedgerError> {
//! let ledger = Ledger::open(&LedgerConfig::default())?;
//! let doctor = CallerIdentity::new("dr-house").with_role("doctor");
//! let conditions = ledger.gate().get_medical_conditions(&doctor, "P1")?;
//! println!("{conditions}");
//! # Ok(())
//! # }
//! ```

pub mod access_gate;
pub mod claims;
pub mod config;
pub mod errors;
pub mod identity;
mod keys;
pub mod ledger;
pub mod model;
pub mod policy;
pub mod store;

pub use access_gate::AccessGate;
pub use claims::ClaimProcessor;
pub use config::{Collections, LedgerConfig, DEFAULT_CONFIG_FILE};
pub use errors::{DenialReason, ErrorKind, LedgerError};
pub use identity::{CallerIdentity, IdentityContext, Role, ROLE_ATTRIBUTE};
pub use ledger::Ledger;
pub use model::{
    AccessLogEntry, ClaimReceipt, ClaimRecord, NewPolicy, Policy, PolicyTerms,
    SensitiveMedicalData, SubmitClaimParams, ACCESS_ACTION_MEDICAL_CONDITIONS,
    POLICY_DOC_TYPE,
};
pub use policy::PolicyManager;
pub use store::{
    FixedClock, Namespace, SqliteStore, SystemClock, Transaction, TransactionClock,
    TransactionalStore,
};
