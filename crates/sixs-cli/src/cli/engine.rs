use sixs_core::domain::{SixsError, SixsResult};
use sixs_core::engine::Engine;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use tracing::debug;

/// Runs an engine binary that reads the control file on stdin and writes the
/// report on stdout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct ProcessEngine {
    program: PathBuf,
    args: Vec<String>,
}

impl ProcessEngine {
    pub(super) fn new(program: impl Into<PathBuf>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }
}

impl Engine for ProcessEngine {
    fn execute(&self, control_file: &str) -> SixsResult<String> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| {
                SixsError::io_system(
                    "IO.ENGINE_SPAWN",
                    format!(
                        "failed to start engine '{}': {}",
                        self.program.display(),
                        source
                    ),
                )
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(control_file.as_bytes()).map_err(|source| {
                SixsError::io_system(
                    "IO.ENGINE_STDIN",
                    format!("failed to send control file to engine: {source}"),
                )
            })?;
        }

        let output = child.wait_with_output().map_err(|source| {
            SixsError::io_system(
                "IO.ENGINE_WAIT",
                format!("failed to collect engine output: {source}"),
            )
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SixsError::engine(
                "ENGINE.EXIT_STATUS",
                format!(
                    "engine '{}' exited with {}: {}",
                    self.program.display(),
                    output.status,
                    stderr.trim()
                ),
            ));
        }

        debug!(bytes = output.stdout.len(), "engine report received");
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
