use crate::domain::{ParameterResult, SixsError, SixsResult};

pub const CONTROL_FILE_PLACEHOLDER: &str = "INPUT.CONTROL_FILE";

/// One non-blank control-file line reduced to its leading numeric tokens.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlRecord {
    pub source_line: usize,
    pub raw: String,
    pub values: Vec<f64>,
}

pub fn tokenize_control_file(source: &str) -> Vec<ControlRecord> {
    source
        .lines()
        .enumerate()
        .filter_map(|(index, line)| tokenize_line(index + 1, line))
        .collect()
}

/// Cursor with the engine's list-directed read semantics: every read starts
/// on a fresh record, takes values from its leading numeric tokens, continues
/// onto following records when it needs more, and drops whatever trails the
/// last value it consumed.
#[derive(Debug)]
pub struct ControlReader {
    records: Vec<ControlRecord>,
    cursor: usize,
    last_line: usize,
}

impl ControlReader {
    pub fn new(source: &str) -> Self {
        Self {
            records: tokenize_control_file(source),
            cursor: 0,
            last_line: 0,
        }
    }

    pub fn read_values(&mut self, count: usize, what: &str) -> SixsResult<Vec<f64>> {
        let mut values = Vec::new();
        while values.len() < count {
            let Some(record) = self.records.get(self.cursor) else {
                return Err(SixsError::input_validation(
                    CONTROL_FILE_PLACEHOLDER,
                    format!(
                        "control file ended after line {} while reading {} ({} of {} values)",
                        self.last_line,
                        what,
                        values.len(),
                        count
                    ),
                ));
            };
            self.cursor += 1;
            self.last_line = record.source_line;

            if record.values.is_empty() {
                return Err(SixsError::input_validation(
                    CONTROL_FILE_PLACEHOLDER,
                    format!(
                        "expected numeric {} at line {} but found '{}'",
                        what, record.source_line, record.raw
                    ),
                ));
            }

            let needed = count - values.len();
            values.extend(record.values.iter().take(needed).copied());
        }
        Ok(values)
    }

    pub fn read_value(&mut self, what: &str) -> SixsResult<f64> {
        Ok(self.read_values(1, what)?[0])
    }

    pub fn read_array<const N: usize>(&mut self, what: &str) -> SixsResult<[f64; N]> {
        let values = self.read_values(N, what)?;
        let mut array = [0.0; N];
        array.copy_from_slice(&values);
        Ok(array)
    }

    pub fn read_code(&mut self, what: &str) -> SixsResult<i32> {
        let value = self.read_value(what)?;
        self.integral(value, what)
    }

    pub fn read_count(&mut self, what: &str) -> SixsResult<usize> {
        let value = self.read_value(what)?;
        Ok(self.ordinal(value, what)? as usize)
    }

    pub fn integral(&self, value: f64, what: &str) -> SixsResult<i32> {
        if value.fract() == 0.0 && value.abs() <= i32::MAX as f64 {
            return Ok(value as i32);
        }
        Err(SixsError::input_validation(
            CONTROL_FILE_PLACEHOLDER,
            format!(
                "{} at line {} must be an integer, got {}",
                what, self.last_line, value
            ),
        ))
    }

    /// Calendar fields (month, day) are written as non-negative integers.
    pub fn ordinal(&self, value: f64, what: &str) -> SixsResult<u32> {
        let integral = self.integral(value, what)?;
        u32::try_from(integral).map_err(|_| {
            SixsError::input_validation(
                CONTROL_FILE_PLACEHOLDER,
                format!(
                    "{} at line {} must be non-negative, got {}",
                    what, self.last_line, integral
                ),
            )
        })
    }

    /// Attaches the current line to a constructor failure.
    pub fn at_line<T>(&self, result: ParameterResult<T>) -> SixsResult<T> {
        result.map_err(|error| {
            SixsError::input_validation(
                CONTROL_FILE_PLACEHOLDER,
                format!("line {}: {}", self.last_line, error),
            )
        })
    }

    pub fn unknown_code<T>(&self, section: &str, code: i32) -> SixsResult<T> {
        Err(SixsError::input_validation(
            CONTROL_FILE_PLACEHOLDER,
            format!(
                "unknown {} code {} at line {}",
                section, code, self.last_line
            ),
        ))
    }

    pub fn finish(self) -> SixsResult<()> {
        match self.records.get(self.cursor) {
            None => Ok(()),
            Some(record) => Err(SixsError::input_validation(
                CONTROL_FILE_PLACEHOLDER,
                format!(
                    "unexpected trailing content at line {}: '{}'",
                    record.source_line, record.raw
                ),
            )),
        }
    }
}

fn tokenize_line(source_line: usize, line: &str) -> Option<ControlRecord> {
    let normalized = line.trim();
    if normalized.is_empty() {
        return None;
    }

    let values = normalized
        .split(|ch: char| ch.is_whitespace() || ch == ',')
        .filter(|token| !token.is_empty())
        .map_while(parse_fortran_real)
        .collect();

    Some(ControlRecord {
        source_line,
        raw: normalized.to_owned(),
        values,
    })
}

fn parse_fortran_real(token: &str) -> Option<f64> {
    let normalized = token.replace(['d', 'D'], "e");
    normalized
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

#[cfg(test)]
mod tests {
    use super::{ControlReader, tokenize_control_file};
    use crate::domain::SixsErrorCategory;

    #[test]
    fn tokenizer_keeps_leading_numbers_and_drops_comments() {
        let records = tokenize_control_file("\n0 (user defined)\n40.0, 100 45 50 7 23\n");

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].source_line, 2);
        assert_eq!(records[0].values, vec![0.0]);
        assert_eq!(records[1].values, vec![40.0, 100.0, 45.0, 50.0, 7.0, 23.0]);
    }

    #[test]
    fn tokenizer_accepts_fortran_exponents() {
        let records = tokenize_control_file("1.0d-3 2.5D2 3e1\n");
        assert_eq!(records[0].values, vec![1.0e-3, 250.0, 30.0]);
    }

    #[test]
    fn reads_start_on_a_new_record_and_continue_across_lines() {
        let mut reader = ControlReader::new("8 (water and ozone)\n3.0 3.5 extra\n1 2\n3\n");

        assert_eq!(reader.read_code("atmosphere code").expect("code"), 8);
        assert_eq!(
            reader.read_values(2, "water and ozone").expect("pair"),
            vec![3.0, 3.5]
        );
        assert_eq!(
            reader.read_array::<3>("triple").expect("spans two lines"),
            [1.0, 2.0, 3.0]
        );
        reader.finish().expect("all records consumed");
    }

    #[test]
    fn text_where_a_number_is_expected_is_reported_with_its_line() {
        let mut reader = ControlReader::new("0\nuser defined\n");
        reader.read_code("geometry code").expect("first code");

        let error = reader
            .read_values(6, "user geometry")
            .expect_err("text line should fail");
        assert_eq!(error.category(), SixsErrorCategory::InputValidation);
        assert_eq!(error.placeholder(), "INPUT.CONTROL_FILE");
        assert!(error.message().contains("line 2"));
    }

    #[test]
    fn truncated_input_and_trailing_content_fail() {
        let mut reader = ControlReader::new("0\n");
        reader.read_code("geometry code").expect("code");
        assert!(reader.read_values(6, "user geometry").is_err());

        let mut reader = ControlReader::new("1\n2\n");
        reader.read_code("first").expect("code");
        assert!(reader.finish().is_err());
    }

    #[test]
    fn codes_must_be_integral() {
        let mut reader = ControlReader::new("2.5\n");
        assert!(reader.read_code("aerosol code").is_err());
    }
}
