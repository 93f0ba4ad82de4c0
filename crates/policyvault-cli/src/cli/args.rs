use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "policyvault",
    version,
    about = "Health-insurance policy and claim ledger with role-gated medical data"
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Ledger config file (YAML). Defaults to ./policyvault.yaml when present
    #[arg(long, global = true, env = "POLICYVAULT_CONFIG")]
    pub config: Option<PathBuf>,

    /// SQLite database path, overrides the config file
    #[arg(long, global = true, env = "POLICYVAULT_DB")]
    pub database: Option<PathBuf>,

    /// Log filter (e.g. "debug", "policyvault_core=trace"). Defaults to RUST_LOG, then "info"
    #[arg(long, global = true)]
    pub log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create, read and update policies
    Policy(PolicyArgs),
    /// Submit and list claims
    Claim(ClaimArgs),
    /// Read medical conditions through the access gate
    Medical(MedicalArgs),
    /// Inspect the access log
    Audit(AuditArgs),
    /// Print the version
    Version,
}

#[derive(Args, Debug)]
pub struct PolicyArgs {
    #[command(subcommand)]
    pub cmd: PolicySub,
}

#[derive(Subcommand, Debug)]
pub enum PolicySub {
    /// Create a policy and store its medical conditions in the restricted collection
    Create(PolicyCreateArgs),
    /// Print the public policy record
    Get(PolicyIdArg),
    /// Replace the terms of a policy (claimed total is kept)
    Update(PolicyUpdateArgs),
}

#[derive(Args, Debug)]
pub struct PolicyIdArg {
    pub policy_id: String,
}

#[derive(Args, Debug)]
pub struct PolicyCreateArgs {
    pub policy_id: String,

    #[command(flatten)]
    pub terms: PolicyTermsArgs,

    #[arg(long, default_value = "")]
    pub medical_conditions: String,
}

#[derive(Args, Debug)]
pub struct PolicyUpdateArgs {
    pub policy_id: String,

    #[command(flatten)]
    pub terms: PolicyTermsArgs,
}

#[derive(Args, Debug, Clone)]
pub struct PolicyTermsArgs {
    #[arg(long)]
    pub sum_assured: i64,

    /// Policy holder; patients are matched against this value
    #[arg(long)]
    pub person_name: String,

    #[arg(long, default_value = "")]
    pub date_of_birth: String,

    #[arg(long, default_value = "")]
    pub gender: String,

    #[arg(long, default_value = "")]
    pub start_date: String,

    #[arg(long, default_value = "")]
    pub end_date: String,

    /// Co-pay percentage (0-100)
    #[arg(long, default_value_t = 0)]
    pub co_pay: i64,

    #[arg(long, default_value = "")]
    pub coverages: String,

    #[arg(long, default_value = "")]
    pub benefits: String,

    #[arg(long, default_value = "")]
    pub exclusions: String,
}

#[derive(Args, Debug)]
pub struct ClaimArgs {
    #[command(subcommand)]
    pub cmd: ClaimSub,
}

#[derive(Subcommand, Debug)]
pub enum ClaimSub {
    /// Submit a claim against a policy's assured sum
    Submit(ClaimSubmitArgs),
    /// List the claim history of a policy
    List(PolicyIdArg),
}

#[derive(Args, Debug)]
pub struct ClaimSubmitArgs {
    pub policy_id: String,

    #[arg(long, allow_negative_numbers = true)]
    pub amount: i64,

    #[arg(long, default_value = "")]
    pub reason: String,

    #[arg(long, default_value = "")]
    pub hospital: String,

    #[arg(long, default_value = "")]
    pub date_of_admission: String,

    #[arg(long, default_value = "")]
    pub date_of_discharge: String,

    #[arg(long, default_value = "")]
    pub treatment_date: String,

    /// Opaque document reference
    #[arg(long, default_value = "")]
    pub documents: String,
}

#[derive(Args, Debug)]
pub struct MedicalArgs {
    #[command(subcommand)]
    pub cmd: MedicalSub,
}

#[derive(Subcommand, Debug)]
pub enum MedicalSub {
    /// Disclose medical conditions to an authorized caller (always audited)
    Read(MedicalReadArgs),
}

#[derive(Args, Debug)]
pub struct MedicalReadArgs {
    pub policy_id: String,

    #[command(flatten)]
    pub identity: IdentityArgs,
}

/// Stand-in for the external identity provider.
#[derive(Args, Debug, Clone)]
pub struct IdentityArgs {
    /// Caller principal id
    #[arg(long, env = "POLICYVAULT_PRINCIPAL")]
    pub principal: String,

    /// Caller role attribute ("doctor" or "patient")
    #[arg(long, env = "POLICYVAULT_ROLE")]
    pub role: Option<String>,
}

#[derive(Args, Debug)]
pub struct AuditArgs {
    #[command(subcommand)]
    pub cmd: AuditSub,
}

#[derive(Subcommand, Debug)]
pub enum AuditSub {
    /// List access-log entries for a policy
    List(PolicyIdArg),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_every_subcommand_has_help_text() {
        use clap::CommandFactory;
        let cli = Cli::command();
        let undocumented: Vec<&str> = cli
            .get_subcommands()
            .filter(|sub| sub.get_about().is_none())
            .map(|sub| sub.get_name())
            .collect();
        assert!(undocumented.is_empty(), "no help text: {undocumented:?}");
    }

    #[test]
    fn test_global_flags_accepted_after_subcommand() {
        let cli = Cli::try_parse_from([
            "policyvault",
            "policy",
            "get",
            "P1",
            "--database",
            "/tmp/x.db",
        ])
        .unwrap();
        assert_eq!(cli.global.database, Some(PathBuf::from("/tmp/x.db")));
        assert!(matches!(
            cli.cmd,
            Command::Policy(PolicyArgs {
                cmd: PolicySub::Get(_)
            })
        ));
    }

    #[test]
    fn test_negative_claim_amount_parses() {
        let cli = Cli::try_parse_from([
            "policyvault",
            "claim",
            "submit",
            "P1",
            "--amount",
            "-5",
        ])
        .unwrap();
        match cli.cmd {
            Command::Claim(ClaimArgs {
                cmd: ClaimSub::Submit(args),
            }) => assert_eq!(args.amount, -5),
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
