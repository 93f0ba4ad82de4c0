use super::args::*;
use crate::exit_codes;

pub mod audit;
pub mod claim;
pub mod medical;
pub mod policy;

pub fn dispatch(cli: Cli) -> i32 {
    let Cli { global, cmd } = cli;
    let result = match cmd {
        Command::Policy(args) => policy::run(&global, args.cmd),
        Command::Claim(args) => claim::run(&global, args.cmd),
        Command::Medical(args) => medical::run(&global, args.cmd),
        Command::Audit(args) => audit::run(&global, args.cmd),
        Command::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    };
    match result {
        Ok(()) => exit_codes::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            exit_codes::for_error(&e)
        }
    }
}
