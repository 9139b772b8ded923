use super::CliError;
use super::engine::ProcessEngine;
use super::helpers::*;
use sixs_core::control::{RunConfiguration, compile, decompile};
use sixs_core::domain::SixsError;
use sixs_core::engine::Simulation;
use sixs_core::report::parse_report_requiring;
use std::path::PathBuf;
use tracing::info;

#[derive(clap::Args)]
pub(super) struct CompileArgs {
    /// JSON scene path
    #[arg(long)]
    scene: PathBuf,

    /// Control file output path (stdout when omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(clap::Args)]
pub(super) struct DecompileArgs {
    /// Engine control file path
    #[arg(long)]
    input: PathBuf,

    /// JSON scene output path (stdout when omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(clap::Args)]
pub(super) struct ParseReportArgs {
    /// Engine report path
    #[arg(long)]
    input: PathBuf,

    /// Output field that must be present, e.g. apparent_radiance
    #[arg(long = "require", value_name = "FIELD")]
    required: Vec<String>,

    /// Print a fixed-width listing instead of JSON
    #[arg(long)]
    summary: bool,
}

#[derive(clap::Args)]
pub(super) struct RunArgs {
    /// JSON scene path
    #[arg(long)]
    scene: PathBuf,

    /// Engine binary that reads the control file on stdin
    #[arg(long)]
    engine: PathBuf,

    /// Extra argument passed to the engine binary
    #[arg(long = "engine-arg", value_name = "ARG", allow_hyphen_values = true)]
    engine_args: Vec<String>,

    /// Also save the compiled control file here
    #[arg(long)]
    control_output: Option<PathBuf>,

    /// Output field that must be present, e.g. apparent_radiance
    #[arg(long = "require", value_name = "FIELD")]
    required: Vec<String>,

    /// Print a fixed-width listing instead of JSON
    #[arg(long)]
    summary: bool,
}

pub(super) fn run_compile_command(args: CompileArgs) -> Result<i32, CliError> {
    let source = read_input(&args.scene, "scene")?;
    let configuration = RunConfiguration::from_json(&source)?;
    let control_file = compile(&configuration);
    emit(args.output.as_deref(), &control_file)?;
    info!(scene = %args.scene.display(), "compiled scene");
    Ok(0)
}

pub(super) fn run_decompile_command(args: DecompileArgs) -> Result<i32, CliError> {
    let source = read_input(&args.input, "control file")?;
    let configuration = decompile(&source)?;
    emit(args.output.as_deref(), &to_json(&configuration)?)?;
    Ok(0)
}

pub(super) fn run_parse_report_command(args: ParseReportArgs) -> Result<i32, CliError> {
    let required = parse_required_fields(&args.required)?;
    let report = read_input(&args.input, "report")?;
    let outputs = parse_report_requiring(&report, &required).map_err(SixsError::from)?;

    let rendered = if args.summary {
        outputs.summary()
    } else {
        to_json(&outputs)?
    };
    emit(None, &rendered)?;
    Ok(0)
}

pub(super) fn run_engine_command(args: RunArgs) -> Result<i32, CliError> {
    let required = parse_required_fields(&args.required)?;
    let source = read_input(&args.scene, "scene")?;
    let configuration = RunConfiguration::from_json(&source)?;

    let mut simulation = Simulation::new(configuration);
    if let Some(path) = args.control_output.as_deref() {
        emit(Some(path), &simulation.control_file())?;
    }

    let engine = ProcessEngine::new(&args.engine, args.engine_args);
    let outputs = simulation.run(&engine)?;
    for field in &required {
        outputs.require(*field).map_err(SixsError::from)?;
    }

    let rendered = if args.summary {
        outputs.summary()
    } else {
        to_json(outputs)?
    };
    emit(None, &rendered)?;
    Ok(0)
}
