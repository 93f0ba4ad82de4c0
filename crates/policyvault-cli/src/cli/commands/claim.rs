//! `policyvault claim` - submit and list claims.

use super::super::args::{ClaimSub, GlobalArgs};
use super::super::helpers::{open_ledger, print_json};
use anyhow::{Context, Result};
use policyvault_core::SubmitClaimParams;

pub fn run(global: &GlobalArgs, cmd: ClaimSub) -> Result<()> {
    let ledger = open_ledger(global)?;
    match cmd {
        ClaimSub::Submit(args) => {
            let receipt = ledger
                .claims()
                .submit_claim(&SubmitClaimParams {
                    policy_id: &args.policy_id,
                    claim_amount: args.amount,
                    claim_reason: &args.reason,
                    hospital_name: &args.hospital,
                    date_of_admission: &args.date_of_admission,
                    date_of_discharge: &args.date_of_discharge,
                    treatment_date: &args.treatment_date,
                    documents: &args.documents,
                })
                .with_context(|| format!("claim against {} not accepted", args.policy_id))?;
            print_json(&receipt)
        }
        ClaimSub::List(args) => print_json(&ledger.claims().claim_history(&args.policy_id)?),
    }
}
