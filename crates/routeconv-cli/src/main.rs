mod commands;
mod config;
mod logging;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::Config;

#[derive(Parser)]
#[command(name = "routeconv")]
#[command(version, about = "routeconv - convert URL patterns into a normalized routing IR", long_about = None)]
struct Cli {
    /// Config file (default: ./routeconv.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a pattern table into JSON lines
    Convert {
        /// Input CSV (Handler,Pattern[,Test Case,Expected]); built-in patterns when omitted
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Example-value CSV (RegEx,Name,Example) used to synthesize test cases
        #[arg(short, long)]
        examples: Option<PathBuf>,

        /// Write regexes lacking example values to this CSV
        #[arg(short, long)]
        unknown_regexes: Option<PathBuf>,

        /// Compile patterns on this many worker threads
        #[arg(short, long)]
        jobs: Option<usize>,
    },

    /// Run the built-in fixtures
    #[command(name = "self-test")]
    SelfTest,

    /// Show how patterns are tokenized and classified
    Inspect {
        /// Raw patterns
        #[arg(required = true)]
        patterns: Vec<String>,
    },
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref())?;
    logging::init(cli.verbose, &config.log.level)?;

    // Execute command
    let success = match cli.command {
        Commands::Convert {
            input,
            output,
            examples,
            unknown_regexes,
            jobs,
        } => commands::convert::execute(
            commands::convert::ConvertArgs {
                input,
                output,
                examples,
                unknown_regexes,
                jobs,
            },
            &config,
        )?,
        Commands::SelfTest => commands::self_test::execute(&config)?,
        Commands::Inspect { patterns } => commands::inspect::execute(&patterns, &config)?,
    };

    if !success {
        std::process::exit(1);
    }

    Ok(())
}
