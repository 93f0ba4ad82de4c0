use super::args::{GlobalArgs, IdentityArgs, PolicyTermsArgs};
use anyhow::{Context, Result};
use policyvault_core::{
    CallerIdentity, Ledger, LedgerConfig, PolicyTerms, DEFAULT_CONFIG_FILE,
};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Resolve the ledger config.
///
/// An explicit `--config` must exist. Without it, `./policyvault.yaml` is used
/// when present and defaults apply otherwise. `--database` wins over both.
pub fn resolve_config(global: &GlobalArgs) -> Result<LedgerConfig> {
    let mut config = match &global.config {
        Some(path) => load_config(path)?,
        None => {
            let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
            if default_path.exists() {
                load_config(&default_path)?
            } else {
                LedgerConfig::default()
            }
        }
    };
    if let Some(database) = &global.database {
        config.database = database.clone();
    }
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("config: {e}"))?;
    Ok(config)
}

fn load_config(path: &Path) -> Result<LedgerConfig> {
    // Config problems are reported as such, not as ledger rejections.
    LedgerConfig::load(path).map_err(|e| anyhow::anyhow!("config {}: {e}", path.display()))
}

pub fn open_ledger(global: &GlobalArgs) -> Result<Ledger> {
    let config = resolve_config(global)?;
    tracing::debug!(database = %config.database.display(), "opening ledger");
    Ledger::open(&config)
        .with_context(|| format!("failed to open ledger {}", config.database.display()))
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("failed to render output")?;
    println!("{rendered}");
    Ok(())
}

pub fn caller_identity(args: &IdentityArgs) -> CallerIdentity {
    let caller = CallerIdentity::new(args.principal.clone());
    match &args.role {
        Some(role) => caller.with_role(role.clone()),
        None => caller,
    }
}

pub fn policy_terms(args: &PolicyTermsArgs) -> PolicyTerms {
    let args = args.clone();
    PolicyTerms {
        sum_assured: args.sum_assured,
        person_name: args.person_name,
        date_of_birth: args.date_of_birth,
        gender: args.gender,
        start_date: args.start_date,
        end_date: args.end_date,
        co_pay: args.co_pay,
        coverages: args.coverages,
        benefits: args.benefits,
        exclusions: args.exclusions,
    }
}
