mod bump;
mod compare;
mod query;
mod validate;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "ssv")]
#[command(about = "Validate, compare and match Semantic Versioning 2.0.0 versions")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check whether versions are valid
    Validate(validate::ValidateArgs),

    /// Compare two versions by precedence
    Compare(compare::CompareArgs),

    /// Check whether a version satisfies a constraint
    Satisfies(query::SatisfiesArgs),

    /// Print the versions that satisfy a constraint
    Filter(query::FilterArgs),

    /// Sort versions, build metadata included
    Sort(query::SortArgs),

    /// Derive the next version
    Bump(bump::BumpArgs),
}

fn init_logging(verbose: u8) {
    let default_filter = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

fn run() -> Result<i32> {
    let args = Args::parse();

    init_logging(args.verbose);
    if args.no_color {
        colored::control::set_override(false);
    }

    log::debug!("Running {:?}", args.command);

    match args.command {
        Commands::Validate(args) => validate::execute(args),
        Commands::Compare(args) => compare::execute(args),
        Commands::Satisfies(args) => query::satisfies(args),
        Commands::Filter(args) => query::filter(args),
        Commands::Sort(args) => query::sort(args),
        Commands::Bump(args) => bump::execute(args),
    }
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => ExitCode::from(code as u8),
        Err(e) => {
            eprintln!("Error: {}", e);
            for cause in e.chain().skip(1) {
                eprintln!("  Caused by: {}", cause);
            }
            ExitCode::FAILURE
        }
    }
}
