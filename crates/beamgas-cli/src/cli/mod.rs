mod commands;
mod logging;

use beamgas_core::domain::AnalysisError;
use clap::Parser;

pub fn run_from_env() -> i32 {
    let args: Vec<String> = std::env::args().skip(1).collect();

    match run(args) {
        Ok(code) => code,
        Err(error) => {
            let analysis_error = error.as_analysis_error();
            tracing::debug!(code = analysis_error.code(), "analysis aborted");
            eprintln!("{}", analysis_error.diagnostic_line());
            if let Some(summary_line) = analysis_error.fatal_exit_line() {
                eprintln!("{}", summary_line);
            }
            analysis_error.exit_code()
        }
    }
}

pub fn run<I, S>(args: I) -> Result<i32, CliError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let full_args = std::iter::once("beamgas".to_string())
        .chain(args.into_iter().map(Into::into))
        .collect::<Vec<_>>();
    parse_and_dispatch(full_args)
}

fn parse_and_dispatch(args: Vec<String>) -> Result<i32, CliError> {
    match Cli::try_parse_from(&args) {
        Ok(cli) => {
            logging::init_logging(cli.log_level.as_deref());
            dispatch_parsed(cli.command)
        }
        Err(err) => match err.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                print!("{}", err);
                Ok(0)
            }
            _ => Err(CliError::Usage(err.to_string())),
        },
    }
}

#[derive(Parser)]
#[command(
    name = "beamgas",
    version,
    about = "Interaction-process tables for BDSIM beam-gas simulation output"
)]
struct Cli {
    /// Log filter (e.g. info, debug); BEAMGAS_LOG takes precedence
    #[arg(long, global = true, value_name = "LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(clap::Subcommand)]
enum CliCommand {
    /// Tabulate interaction processes from a simulation record export
    Analyze(commands::AnalyzeArgs),
}

fn dispatch_parsed(command: CliCommand) -> Result<i32, CliError> {
    match command {
        CliCommand::Analyze(args) => commands::run_analyze_command(args),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error("{0}")]
    Analysis(AnalysisError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl CliError {
    fn as_analysis_error(&self) -> AnalysisError {
        match self {
            Self::Usage(message) => {
                AnalysisError::input_validation("INPUT.CLI_USAGE", message.trim_end().to_string())
            }
            Self::Analysis(error) => error.clone(),
            Self::Internal(error) => AnalysisError::internal("SYS.CLI", format!("{error:#}")),
        }
    }
}

impl From<AnalysisError> for CliError {
    fn from(error: AnalysisError) -> Self {
        Self::Analysis(error)
    }
}
