//! Process entry: help short-circuit, argument parsing, runtime setup.
use std::ffi::OsString;

use clap::{CommandFactory, FromArgMatches};

use crate::app::run_load_test;
use crate::args::{TesterArgs, normalize_args, wants_help};
use crate::error::AppResult;

/// Parses the command line and performs the run.
///
/// # Errors
///
/// Returns an error when the runtime or the HTTP client cannot be set up.
/// Argument errors are reported by clap, which exits the process.
pub fn run() -> AppResult<()> {
    let Some(args) = parse_args()? else {
        return Ok(());
    };

    crate::system::logger::init_logging(args.verbose, args.no_color);
    let config = args.to_run_config()?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime
        .block_on(run_load_test(&config, std::io::stdout()))
        .map(drop)
}

fn parse_args() -> AppResult<Option<TesterArgs>> {
    let mut cmd = TesterArgs::command();
    let raw_args: Vec<OsString> = normalize_args(std::env::args_os());

    if raw_args.len() < 2 {
        eprintln!("Error: No command line argument provided.");
        cmd.print_help()?;
        println!();
        return Ok(None);
    }

    if wants_help(&raw_args) {
        cmd.print_help()?;
        println!();
        return Ok(None);
    }

    let matches = cmd.get_matches_from(raw_args);
    let args = TesterArgs::from_arg_matches(&matches)?;

    Ok(Some(args))
}
