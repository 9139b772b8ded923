//! Engine seam and the run lifecycle around it.

use crate::control::{RunConfiguration, compile};
use crate::domain::{OutputError, SixsError, SixsResult};
use crate::report::{Outputs, parse_report};
use tracing::info;

/// Anything that turns a control file into report text. Process and file
/// handling live with the caller.
pub trait Engine {
    fn execute(&self, control_file: &str) -> SixsResult<String>;
}

/// One scene plus the outputs of its most recent run.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Simulation {
    configuration: RunConfiguration,
    outputs: Option<Outputs>,
}

impl Simulation {
    pub fn new(configuration: RunConfiguration) -> Self {
        Self {
            configuration,
            outputs: None,
        }
    }

    pub fn configuration(&self) -> &RunConfiguration {
        &self.configuration
    }

    /// Editing the scene discards outputs from an earlier run.
    pub fn configuration_mut(&mut self) -> &mut RunConfiguration {
        self.outputs = None;
        &mut self.configuration
    }

    pub fn control_file(&self) -> String {
        compile(&self.configuration)
    }

    pub fn run(&mut self, engine: &dyn Engine) -> SixsResult<&Outputs> {
        let control_file = self.control_file();
        let report = engine.execute(&control_file)?;
        let outputs = parse_report(&report);
        if outputs.is_empty() {
            return Err(SixsError::engine(
                "ENGINE.EMPTY_REPORT",
                "engine report contained no recognised values",
            ));
        }

        info!(
            fields = outputs.values().count(),
            version = outputs.version().unwrap_or("unknown"),
            "simulation finished"
        );
        Ok(self.outputs.insert(outputs))
    }

    pub fn outputs(&self) -> Result<&Outputs, OutputError> {
        self.outputs.as_ref().ok_or(OutputError::NotYetRun)
    }
}

#[cfg(test)]
mod tests {
    use super::{Engine, Simulation};
    use crate::control::RunConfiguration;
    use crate::domain::{OutputError, SixsError, SixsResult};
    use std::cell::RefCell;

    struct CannedEngine {
        report: &'static str,
        seen: RefCell<Vec<String>>,
    }

    impl Engine for CannedEngine {
        fn execute(&self, control_file: &str) -> SixsResult<String> {
            self.seen.borrow_mut().push(control_file.to_string());
            Ok(self.report.to_string())
        }
    }

    fn canned(report: &'static str) -> CannedEngine {
        CannedEngine {
            report,
            seen: RefCell::new(Vec::new()),
        }
    }

    const REPORT: &str = "*       apparent reflectance            : 0.1234623   appar. rad.(w/m2/sr/mic) :   12.749 *\n";

    #[test]
    fn outputs_before_run_are_not_available() {
        let simulation = Simulation::default();
        assert_eq!(simulation.outputs(), Err(OutputError::NotYetRun));
    }

    #[test]
    fn run_sends_compiled_control_file_and_keeps_outputs() {
        let engine = canned(REPORT);
        let mut simulation = Simulation::new(RunConfiguration::default());
        let radiance = simulation
            .run(&engine)
            .expect("run succeeds")
            .apparent_radiance();
        assert_eq!(radiance, Some(12.749));
        assert_eq!(engine.seen.borrow().as_slice(), [simulation.control_file()]);
        assert!(simulation.outputs().is_ok());

        simulation
            .configuration_mut()
            .set_aot550(0.1)
            .expect("aot");
        assert_eq!(simulation.outputs(), Err(OutputError::NotYetRun));
    }

    #[test]
    fn empty_report_is_an_engine_error() {
        let mut simulation = Simulation::default();
        let error: SixsError = simulation
            .run(&canned("no values here\n"))
            .expect_err("nothing parsed");
        assert_eq!(error.placeholder(), "ENGINE.EMPTY_REPORT");
        assert_eq!(error.exit_code(), 4);
    }
}
