//! `policyvault policy` - create, read and update policies.

use super::super::args::{GlobalArgs, PolicySub};
use super::super::helpers::{open_ledger, policy_terms, print_json};
use anyhow::{Context, Result};
use policyvault_core::NewPolicy;

pub fn run(global: &GlobalArgs, cmd: PolicySub) -> Result<()> {
    let ledger = open_ledger(global)?;
    let policy = match cmd {
        PolicySub::Create(args) => ledger
            .policies()
            .create_policy(NewPolicy {
                policy_id: args.policy_id.clone(),
                terms: policy_terms(&args.terms),
                medical_conditions: args.medical_conditions,
            })
            .with_context(|| format!("failed to create policy {}", args.policy_id))?,
        PolicySub::Get(args) => ledger.policies().get_policy(&args.policy_id)?,
        PolicySub::Update(args) => ledger
            .policies()
            .update_policy(&args.policy_id, policy_terms(&args.terms))
            .with_context(|| format!("failed to update policy {}", args.policy_id))?,
    };
    print_json(&policy)
}
