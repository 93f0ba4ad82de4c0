//! Ledger records and operation inputs.
//!
//! Stored records are JSON objects with camelCase field names. Field order
//! follows the struct declaration.

use crate::errors::LedgerError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Action recorded for every disclosure of medical conditions.
pub const ACCESS_ACTION_MEDICAL_CONDITIONS: &str = "accessed medical conditions";

/// `docType` carried by every public policy record.
pub const POLICY_DOC_TYPE: &str = "policy";

fn policy_doc_type() -> String {
    POLICY_DOC_TYPE.to_string()
}

/// Public projection of an insurance contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Policy {
    /// Record discriminator for queries over the public namespace.
    #[serde(default = "policy_doc_type")]
    pub doc_type: String,
    #[serde(rename = "policyID")]
    pub policy_id: String,
    pub sum_assured: i64,
    /// Doubles as the ownership key for patient reads.
    pub person_name: String,
    pub date_of_birth: String,
    pub gender: String,
    pub start_date: String,
    pub end_date: String,
    /// Co-pay percentage.
    pub co_pay: i64,
    pub coverages: String,
    pub benefits: String,
    pub exclusions: String,
    pub claimed_total: i64,
    /// Never written by this ledger. Older records that carry it decode, but
    /// reads through [`crate::PolicyManager`] clear it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medical_conditions: Option<String>,
}

impl Policy {
    /// Fresh policy with nothing claimed.
    pub fn new(policy_id: impl Into<String>, terms: PolicyTerms) -> Self {
        let mut policy = Self {
            doc_type: policy_doc_type(),
            policy_id: policy_id.into(),
            sum_assured: 0,
            person_name: String::new(),
            date_of_birth: String::new(),
            gender: String::new(),
            start_date: String::new(),
            end_date: String::new(),
            co_pay: 0,
            coverages: String::new(),
            benefits: String::new(),
            exclusions: String::new(),
            claimed_total: 0,
            medical_conditions: None,
        };
        policy.apply_terms(terms);
        policy
    }

    /// Overwrite every term. `claimed_total` is left alone.
    pub fn apply_terms(&mut self, terms: PolicyTerms) {
        let PolicyTerms {
            sum_assured,
            person_name,
            date_of_birth,
            gender,
            start_date,
            end_date,
            co_pay,
            coverages,
            benefits,
            exclusions,
        } = terms;
        self.sum_assured = sum_assured;
        self.person_name = person_name;
        self.date_of_birth = date_of_birth;
        self.gender = gender;
        self.start_date = start_date;
        self.end_date = end_date;
        self.co_pay = co_pay;
        self.coverages = coverages;
        self.benefits = benefits;
        self.exclusions = exclusions;
    }

    /// Cover still available for claims.
    pub fn remaining_cover(&self) -> i64 {
        self.sum_assured - self.claimed_total
    }
}

/// The caller-editable fields of a policy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyTerms {
    pub sum_assured: i64,
    pub person_name: String,
    pub date_of_birth: String,
    pub gender: String,
    pub start_date: String,
    pub end_date: String,
    pub co_pay: i64,
    pub coverages: String,
    pub benefits: String,
    pub exclusions: String,
}

/// Input for policy creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPolicy {
    pub policy_id: String,
    pub terms: PolicyTerms,
    /// Goes to the restricted medical-conditions collection only.
    pub medical_conditions: String,
}

/// Restricted record, one per policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensitiveMedicalData {
    pub medical_conditions: String,
}

/// One claim event against a policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimRecord {
    #[serde(rename = "policyID")]
    pub policy_id: String,
    /// Position in the policy's claim history, starting at 1.
    pub sequence: u64,
    pub claim_amount: i64,
    pub claim_reason: String,
    pub hospital_name: String,
    pub date_of_admission: String,
    pub date_of_discharge: String,
    pub treatment_date: String,
    pub documents: String,
    /// Transaction time, unix seconds.
    pub timestamp: i64,
}

/// Audit entry for one disclosure of medical conditions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessLogEntry {
    #[serde(rename = "userID")]
    pub user_id: String,
    pub role: String,
    #[serde(rename = "policyID")]
    pub policy_id: String,
    pub action: String,
    pub timestamp: i64,
    /// `"true"` for every stored entry; denials are never stored.
    pub access_granted: String,
    pub sequence: u64,
}

/// Claim submission parameters.
#[derive(Debug, Clone, Copy)]
pub struct SubmitClaimParams<'a> {
    pub policy_id: &'a str,
    pub claim_amount: i64,
    pub claim_reason: &'a str,
    pub hospital_name: &'a str,
    pub date_of_admission: &'a str,
    pub date_of_discharge: &'a str,
    pub treatment_date: &'a str,
    pub documents: &'a str,
}

/// Returned after a claim is committed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimReceipt {
    #[serde(rename = "policyID")]
    pub policy_id: String,
    pub sequence: u64,
    pub claim_amount: i64,
    pub claimed_total: i64,
    pub remaining_cover: i64,
    pub recorded_at: i64,
}

pub(crate) fn encode<T: Serialize>(record: &'static str, value: &T) -> Result<Vec<u8>, LedgerError> {
    serde_json::to_vec(value)
        .map_err(|e| LedgerError::Persistence(format!("failed to encode {record}: {e}")))
}

pub(crate) fn decode<T: DeserializeOwned>(
    record: &'static str,
    key: &str,
    bytes: &[u8],
) -> Result<T, LedgerError> {
    serde_json::from_slice(bytes).map_err(|e| LedgerError::Deserialization {
        record,
        key: key.to_string(),
        detail: e.to_string(),
    })
}
