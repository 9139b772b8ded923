pub mod errors;

pub use errors::{
    OutputError, ParameterError, ParameterResult, SixsError, SixsErrorCategory, SixsResult,
};
