//! `policyvault medical read` - disclose medical conditions through the access gate.

use super::super::args::{GlobalArgs, MedicalSub};
use super::super::helpers::{caller_identity, open_ledger, print_json};
use anyhow::{Context, Result};
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Disclosure<'a> {
    #[serde(rename = "policyID")]
    policy_id: &'a str,
    medical_conditions: String,
}

pub fn run(global: &GlobalArgs, cmd: MedicalSub) -> Result<()> {
    let ledger = open_ledger(global)?;
    match cmd {
        MedicalSub::Read(args) => {
            let caller = caller_identity(&args.identity);
            let medical_conditions = ledger
                .gate()
                .get_medical_conditions(&caller, &args.policy_id)
                .with_context(|| {
                    format!(
                        "medical conditions of {} not disclosed to {}",
                        args.policy_id, args.identity.principal
                    )
                })?;
            print_json(&Disclosure {
                policy_id: &args.policy_id,
                medical_conditions,
            })
        }
    }
}
