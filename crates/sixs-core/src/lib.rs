pub mod control;
pub mod domain;
pub mod engine;
pub mod params;
pub mod report;
pub mod serialization;

pub use control::{RunConfiguration, compile, decompile};
pub use domain::{OutputError, ParameterError, SixsError, SixsErrorCategory, SixsResult};
pub use engine::{Engine, Simulation};
pub use report::{Outputs, parse_report, parse_report_requiring};
