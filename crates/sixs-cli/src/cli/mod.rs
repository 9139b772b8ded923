mod commands;
mod engine;
mod helpers;

use clap::Parser;
use sixs_core::domain::SixsError;

const PROGRAM_NAME: &str = "sixs-rs";

pub fn run_from_env() -> i32 {
    helpers::init_logging();
    let args: Vec<String> = std::env::args().skip(1).collect();

    match run(args) {
        Ok(code) => code,
        Err(error) => {
            let sixs_error = error.as_sixs_error();
            eprintln!("{}", sixs_error.diagnostic_line());
            eprintln!("{}", sixs_error.fatal_exit_line());
            sixs_error.exit_code()
        }
    }
}

pub fn run<I, S>(args: I) -> Result<i32, CliError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let full_args = std::iter::once(PROGRAM_NAME.to_string())
        .chain(args.into_iter().map(Into::into))
        .collect::<Vec<_>>();
    parse_and_dispatch(full_args)
}

fn parse_and_dispatch(args: Vec<String>) -> Result<i32, CliError> {
    match Cli::try_parse_from(&args) {
        Ok(cli) => dispatch_parsed(cli.command),
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
    name = "sixs-rs",
    version,
    about = "Compile, decompile and run 6S radiative-transfer scenes"
)]
struct Cli {
    #[command(subcommand)]
    command: CliCommand,
}

#[derive(clap::Subcommand)]
enum CliCommand {
    /// Compile a JSON scene into an engine control file
    Compile(commands::CompileArgs),
    /// Rebuild a JSON scene from an engine control file
    Decompile(commands::DecompileArgs),
    /// Extract named values from an engine report
    ParseReport(commands::ParseReportArgs),
    /// Compile a scene, pipe it through the engine and parse the report
    Run(commands::RunArgs),
}

fn dispatch_parsed(command: CliCommand) -> Result<i32, CliError> {
    match command {
        CliCommand::Compile(args) => commands::run_compile_command(args),
        CliCommand::Decompile(args) => commands::run_decompile_command(args),
        CliCommand::ParseReport(args) => commands::run_parse_report_command(args),
        CliCommand::Run(args) => commands::run_engine_command(args),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error("{0}")]
    Compute(SixsError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<SixsError> for CliError {
    fn from(error: SixsError) -> Self {
        Self::Compute(error)
    }
}

impl CliError {
    fn as_sixs_error(&self) -> SixsError {
        match self {
            Self::Usage(message) => SixsError::input_validation("INPUT.CLI_USAGE", message.clone()),
            Self::Compute(error) => error.clone(),
            Self::Internal(error) => SixsError::io_system("IO.CLI", format!("{error:#}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CliError, run};

    #[test]
    fn unknown_subcommand_is_a_usage_error() {
        let error = run(["frobnicate"]).expect_err("unknown subcommand");
        let CliError::Usage(message) = &error else {
            panic!("expected usage error, got {error:?}");
        };
        assert!(message.contains("frobnicate"));
        assert_eq!(error.as_sixs_error().exit_code(), 2);
    }

    #[test]
    fn help_exits_cleanly() {
        assert_eq!(run(["--help"]).expect("help prints"), 0);
    }

    #[test]
    fn internal_errors_map_to_io_category() {
        let error = CliError::Internal(anyhow::anyhow!("disk unplugged"));
        let sixs_error = error.as_sixs_error();
        assert_eq!(sixs_error.placeholder(), "IO.CLI");
        assert_eq!(sixs_error.exit_code(), 3);
    }
}
