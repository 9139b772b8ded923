use std::fmt::Display;

pub type SixsResult<T> = Result<T, SixsError>;
pub type ParameterResult<T> = Result<T, ParameterError>;

/// Failure classes, each with its own process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SixsErrorCategory {
    InputValidation,
    IoSystem,
    Engine,
    Internal,
}

impl SixsErrorCategory {
    pub const fn exit_code(self) -> i32 {
        match self {
            Self::InputValidation => 2,
            Self::IoSystem => 3,
            Self::Engine => 4,
            Self::Internal => 5,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InputValidation => "input validation",
            Self::IoSystem => "io",
            Self::Engine => "engine",
            Self::Internal => "internal",
        }
    }
}

/// Crate-level error tagged with a stable placeholder such as
/// `INPUT.CONTROL_FILE`, so scripts can match on the tag.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{} error [{placeholder}] {message}", category.as_str())]
pub struct SixsError {
    category: SixsErrorCategory,
    placeholder: &'static str,
    message: String,
}

impl SixsError {
    fn with_category(
        category: SixsErrorCategory,
        placeholder: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category,
            placeholder,
            message: message.into(),
        }
    }

    pub fn input_validation(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::with_category(SixsErrorCategory::InputValidation, placeholder, message)
    }

    pub fn io_system(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::with_category(SixsErrorCategory::IoSystem, placeholder, message)
    }

    pub fn engine(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::with_category(SixsErrorCategory::Engine, placeholder, message)
    }

    pub fn internal(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::with_category(SixsErrorCategory::Internal, placeholder, message)
    }

    pub const fn category(&self) -> SixsErrorCategory {
        self.category
    }

    pub const fn placeholder(&self) -> &'static str {
        self.placeholder
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn exit_code(&self) -> i32 {
        self.category.exit_code()
    }

    /// `ERROR: [PLACEHOLDER] message`, the first line printed on failure.
    pub fn diagnostic_line(&self) -> String {
        format!("ERROR: [{}] {}", self.placeholder, self.message)
    }

    pub fn fatal_exit_line(&self) -> String {
        format!("FATAL EXIT CODE: {}", self.exit_code())
    }
}

/// The single validation failure raised by parameter constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {field} = {value}: {constraint}")]
pub struct ParameterError {
    field: String,
    value: String,
    constraint: String,
}

impl ParameterError {
    pub fn new(
        field: impl Into<String>,
        value: impl Display,
        constraint: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            value: value.to_string(),
            constraint: constraint.into(),
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn constraint(&self) -> &str {
        &self.constraint
    }
}

impl From<ParameterError> for SixsError {
    fn from(error: ParameterError) -> Self {
        SixsError::input_validation("INPUT.PARAMETER", error.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OutputError {
    #[error("outputs are not available: the simulation has not been run")]
    NotYetRun,
    #[error("report does not contain a value for '{field}'")]
    Missing { field: &'static str },
}

impl From<OutputError> for SixsError {
    fn from(error: OutputError) -> Self {
        let placeholder = match error {
            OutputError::NotYetRun => "REPORT.NOT_YET_RUN",
            OutputError::Missing { .. } => "REPORT.MISSING_OUTPUT",
        };
        SixsError::engine(placeholder, error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::{OutputError, ParameterError, SixsError, SixsErrorCategory};

    #[test]
    fn every_category_has_a_distinct_failure_exit_code() {
        let errors = [
            SixsError::input_validation("INPUT.SCENE", "bad scene"),
            SixsError::io_system("IO.CLI_INPUT", "missing file"),
            SixsError::engine("ENGINE.EXIT_STATUS", "engine failed"),
            SixsError::internal("INTERNAL.SCENE_JSON", "encode failed"),
        ];
        let codes = errors.iter().map(SixsError::exit_code).collect::<Vec<_>>();
        assert_eq!(codes, vec![2, 3, 4, 5]);
        assert_eq!(errors[2].category(), SixsErrorCategory::Engine);
        assert_eq!(
            errors[1].to_string(),
            "io error [IO.CLI_INPUT] missing file"
        );
    }

    #[test]
    fn fatal_error_renders_diagnostic_lines() {
        let error = SixsError::input_validation(
            "INPUT.CONTROL_FILE",
            "expected 6 numeric values at line 2",
        );

        assert_eq!(error.exit_code(), 2);
        assert_eq!(
            error.diagnostic_line(),
            "ERROR: [INPUT.CONTROL_FILE] expected 6 numeric values at line 2"
        );
        assert_eq!(error.fatal_exit_line(), "FATAL EXIT CODE: 2");
    }

    #[test]
    fn parameter_error_carries_field_value_and_constraint() {
        let error = ParameterError::new("solar_zenith", 95.0, "must lie in [0, 90]");

        assert_eq!(error.field(), "solar_zenith");
        assert_eq!(error.value(), "95");
        assert_eq!(error.constraint(), "must lie in [0, 90]");
        assert_eq!(
            error.to_string(),
            "invalid solar_zenith = 95: must lie in [0, 90]"
        );

        let converted = SixsError::from(error);
        assert_eq!(converted.category(), SixsErrorCategory::InputValidation);
        assert_eq!(converted.placeholder(), "INPUT.PARAMETER");
    }

    #[test]
    fn output_errors_map_to_engine_category() {
        let not_run = SixsError::from(OutputError::NotYetRun);
        assert_eq!(not_run.placeholder(), "REPORT.NOT_YET_RUN");
        assert_eq!(not_run.exit_code(), 4);

        let missing = SixsError::from(OutputError::Missing {
            field: "apparent_radiance",
        });
        assert_eq!(missing.placeholder(), "REPORT.MISSING_OUTPUT");
        assert!(missing.message().contains("apparent_radiance"));
    }
}
