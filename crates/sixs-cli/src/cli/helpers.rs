use super::CliError;
use anyhow::Context;
use serde::Serialize;
use sixs_core::domain::SixsError;
use sixs_core::report::OutputField;
use std::fs;
use std::path::Path;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt};

pub(super) fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,sixs_core=info,sixs_rs=info"));

    // a second initialisation in the same process keeps the first subscriber
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

pub(super) fn read_input(path: &Path, what: &str) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| {
        CliError::Compute(SixsError::io_system(
            "IO.CLI_INPUT",
            format!("failed to read {} '{}': {}", what, path.display(), source),
        ))
    })
}

fn normalize_text_artifact(content: &str) -> String {
    let mut normalized = content.replace("\r\n", "\n").replace('\r', "\n");
    if !normalized.is_empty() && !normalized.ends_with('\n') {
        normalized.push('\n');
    }
    normalized
}

fn write_text_artifact(path: &Path, content: &str) -> std::io::Result<()> {
    fs::write(path, normalize_text_artifact(content))
}

/// Writes `content` to `output`, or to stdout when no path was given.
pub(super) fn emit(output: Option<&Path>, content: &str) -> Result<(), CliError> {
    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
                fs::create_dir_all(parent).with_context(|| {
                    format!("failed to create output directory '{}'", parent.display())
                })?;
            }
            write_text_artifact(path, content)
                .with_context(|| format!("failed to write '{}'", path.display()))?;
            debug!(path = %path.display(), bytes = content.len(), "wrote output");
        }
        None => print!("{content}"),
    }
    Ok(())
}

pub(super) fn to_json<T: Serialize>(value: &T) -> Result<String, CliError> {
    let mut json = serde_json::to_string_pretty(value).context("failed to encode JSON")?;
    json.push('\n');
    Ok(json)
}

pub(super) fn parse_required_fields(names: &[String]) -> Result<Vec<OutputField>, CliError> {
    names
        .iter()
        .map(|name| {
            OutputField::from_name(name).ok_or_else(|| {
                CliError::Usage(format!("unknown output field '{name}'"))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{
        emit, normalize_text_artifact, parse_required_fields, read_input, write_text_artifact,
    };
    use crate::cli::CliError;
    use sixs_core::report::OutputField;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn required_fields_resolve_by_name() {
        let fields = parse_required_fields(&["apparent_radiance".to_string()])
            .expect("known field");
        assert_eq!(fields, vec![OutputField::ApparentRadiance]);

        let error = parse_required_fields(&["radiance".to_string()]).expect_err("unknown field");
        assert!(matches!(error, CliError::Usage(message) if message.contains("radiance")));
    }

    #[test]
    fn emit_creates_parent_directories() {
        let temp = TempDir::new().expect("tempdir should be created");
        let path = temp.path().join("nested/out.txt");
        emit(Some(&path), "1 2 3").expect("write succeeds");
        assert_eq!(
            read_input(&path, "output").expect("read back"),
            "1 2 3\n"
        );
    }

    #[test]
    fn normalize_text_artifact_uses_canonical_line_endings() {
        let normalized = normalize_text_artifact("0 (user)\r\n40 100\r7 23");
        assert_eq!(normalized, "0 (user)\n40 100\n7 23\n");
    }

    #[test]
    fn repeated_text_writes_produce_identical_bytes() {
        let temp = TempDir::new().expect("tempdir should be created");
        let path = temp.path().join("control.inp");
        let input = "0 (user defined geometry)\r\n40 100 45 50 7 23";

        write_text_artifact(&path, input).expect("first write should succeed");
        let first = fs::read(&path).expect("artifact should be readable");

        write_text_artifact(&path, input).expect("second write should succeed");
        let second = fs::read(&path).expect("artifact should be readable");

        assert_eq!(first, second);
        assert_eq!(second, b"0 (user defined geometry)\n40 100 45 50 7 23\n");
    }

    #[test]
    fn missing_input_is_an_io_error() {
        let temp = TempDir::new().expect("tempdir should be created");
        let error = read_input(&temp.path().join("absent.json"), "scene").expect_err("missing");
        let CliError::Compute(error) = error else {
            panic!("expected compute error");
        };
        assert_eq!(error.exit_code(), 3);
    }
}
