//! C Amalgamation CLI
//!
//! Command-line tool for merging C headers and sources into single files.

use clap::error::ErrorKind;
use clap::{ArgAction, Parser, ValueEnum};
use tracing::{debug, info};

use c_amalgamate::{amalgamate, AmalgamateError, MergePlan, USAGE};

#[derive(Parser)]
#[command(name = "c-amalgamate")]
#[command(about = "Amalgamate C headers and sources into single merged files")]
#[command(version)]
#[command(disable_help_flag = true)]
#[command(after_help = USAGE)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    /// Print help
    #[arg(long, action = ArgAction::Help)]
    help: Option<bool>,

    /// Merge tokens: group flags, files, "inline literals" and destinations
    #[arg(
        value_name = "TOKENS",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    tokens: Vec<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = match cli.verbose {
        0 => "c_amalgamate=warn",
        1 => "c_amalgamate=info",
        2 => "c_amalgamate=debug",
        _ => "c_amalgamate=trace",
    };
    let env_filter = EnvFilter::new(filter);

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

fn run(cli: Cli) -> Result<(), AmalgamateError> {
    debug!(tokens = cli.tokens.len(), "Building merge plan");
    let plan = MergePlan::from_tokens(&cli.tokens)?;
    let summary = amalgamate(&plan)?;
    for artifact in &summary.artifacts {
        info!(
            kind = ?artifact.kind,
            path = %artifact.path.display(),
            bytes = artifact.bytes,
            fragments = artifact.stats.fragments,
            includes_elided = artifact.stats.includes_elided,
            "Wrote artifact"
        );
    }
    Ok(())
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit();
        }
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("{}", USAGE);
            std::process::exit(1);
        }
    };

    init_tracing(&cli);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        if e.is_usage() {
            eprintln!();
            eprintln!("{}", USAGE);
        }
        std::process::exit(1);
    }
}
