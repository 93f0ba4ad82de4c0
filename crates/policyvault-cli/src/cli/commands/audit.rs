//! `policyvault audit list` - read the access log of a policy.

use super::super::args::{AuditSub, GlobalArgs};
use super::super::helpers::{open_ledger, print_json};
use anyhow::Result;

pub fn run(global: &GlobalArgs, cmd: AuditSub) -> Result<()> {
    let ledger = open_ledger(global)?;
    match cmd {
        AuditSub::List(args) => print_json(&ledger.gate().access_history(&args.policy_id)?),
    }
}
