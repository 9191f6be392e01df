//! Bob Index CLI - one operation per invocation against the release index.
//!
//! Results go to stdout, logs to stderr. The `predir` mode exits with status 2
//! when the name is already indexed so site scripts can deny the directory.

mod command;

use anyhow::Result;
use bob_index::{BobIndex, IndexConfig};
use clap::Parser;
use command::{Args, Command};
use std::process::ExitCode;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

fn main() -> ExitCode {
    let args = Args::parse();

    let log_level = if args.debug { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_thread_ids(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    match run(&args) {
        Ok(code) => code,
        Err(err) => {
            error!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<ExitCode> {
    let config = IndexConfig::new(&args.gl_root, &args.db_path);
    let command = args.command();

    let index = BobIndex::open(config)?;

    match command {
        Command::Clean => {
            println!(
                "Cleaning up database at {}",
                index.config().database_path().display()
            );
            let report = index.reconcile()?;
            info!(
                "Removed {} of {} entries ({} kept unconfirmed)",
                report.removed,
                report.checked,
                report.uncertain
            );
        }
        Command::Predir {
            name,
            case_sensitive,
        } => {
            if index.exists(name, case_sensitive)? {
                return Ok(ExitCode::from(2));
            }
        }
        Command::Scan { scan_path } => match index.scan(scan_path) {
            Ok(report) => info!(
                "Scan finished: {} directories, {} new, {} skipped, {} unreadable",
                report.visited,
                report.inserted,
                report.pruned,
                report.errors
            ),
            Err(err) if !err.is_fatal() => {
                println!("error walking: {}", err);
            }
            Err(err) => return Err(err.into()),
        },
        Command::Search { query, limit } => {
            let outcome = index.search(query, limit)?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else {
                println!("Searching for {}...\n", outcome.query);
                for path in &outcome.paths {
                    println!("{}", path);
                }
                println!(
                    "\n{} result(s) found with a limit of {}.",
                    outcome.total_matches, outcome.limit
                );
            }
        }
        Command::Add { path, name } => {
            index.add_one(path, name)?;
        }
        Command::Delete { path, name } => {
            index.delete_one(path, name)?;
        }
    }

    Ok(ExitCode::SUCCESS)
}
