use crate::serialization::{format_series, format_value};

/// Line-oriented builder for the engine's control file.
///
/// Trailing comments are always parenthesised so that a list-directed reader
/// never mistakes them for values.
#[derive(Debug, Default)]
pub struct ControlWriter {
    buffer: String,
}

impl ControlWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn code(&mut self, code: i32, comment: &str) {
        self.push_line(code.to_string(), comment);
    }

    pub fn record(&mut self, values: &[f64], comment: &str) {
        self.push_line(format_series(values), comment);
    }

    pub fn value(&mut self, value: f64, comment: &str) {
        self.push_line(format_value(value), comment);
    }

    pub fn series(&mut self, values: &[f64]) {
        self.push_line(format_series(values), "");
    }

    pub fn finish(self) -> String {
        self.buffer
    }

    fn push_line(&mut self, values: String, comment: &str) {
        self.buffer.push_str(&values);
        if !comment.is_empty() {
            self.buffer.push_str(" (");
            self.buffer.push_str(comment);
            self.buffer.push(')');
        }
        self.buffer.push('\n');
    }
}
