//! Engine report parser.
//!
//! The report is free text framed in `*` borders. Values are located by the
//! label tables in [`labels`]; the first occurrence of a label wins and a
//! label that never appears leaves its field absent.

pub mod labels;

pub use labels::{ComponentProperty, OutputField, TransmittanceKind};

use crate::domain::OutputError;
use crate::serialization::format_fixed_f64;
use labels::{NEXT_LINE_RULES, SAME_LINE_RULES, VERSION_LABEL};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transmittance {
    pub downward: f64,
    pub upward: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComponentValues {
    pub rayleigh: f64,
    pub aerosol: f64,
    pub total: f64,
}

/// Values recovered from one report. Built only by the parser.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Outputs {
    version: Option<String>,
    values: BTreeMap<OutputField, f64>,
    transmittances: BTreeMap<TransmittanceKind, Transmittance>,
    properties: BTreeMap<ComponentProperty, ComponentValues>,
}

impl Outputs {
    pub fn get(&self, field: OutputField) -> Option<f64> {
        self.values.get(&field).copied()
    }

    pub fn require(&self, field: OutputField) -> Result<f64, OutputError> {
        self.get(field).ok_or(OutputError::Missing {
            field: field.as_str(),
        })
    }

    pub fn apparent_radiance(&self) -> Option<f64> {
        self.get(OutputField::ApparentRadiance)
    }

    pub fn apparent_reflectance(&self) -> Option<f64> {
        self.get(OutputField::ApparentReflectance)
    }

    pub fn background_radiance(&self) -> Option<f64> {
        self.get(OutputField::BackgroundRadiance)
    }

    pub fn pixel_radiance(&self) -> Option<f64> {
        self.get(OutputField::PixelRadiance)
    }

    pub fn transmittance(&self, kind: TransmittanceKind) -> Option<Transmittance> {
        self.transmittances.get(&kind).copied()
    }

    pub fn property(&self, property: ComponentProperty) -> Option<ComponentValues> {
        self.properties.get(&property).copied()
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn values(&self) -> impl Iterator<Item = (OutputField, f64)> + '_ {
        self.values.iter().map(|(field, value)| (*field, *value))
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.transmittances.is_empty() && self.properties.is_empty()
    }

    /// Fixed-width listing of the scalar fields, one per line.
    pub fn summary(&self) -> String {
        let mut lines = Vec::with_capacity(self.values.len() + 1);
        if let Some(version) = &self.version {
            lines.push(format!("{:<40}{:>16}", "version", version));
        }
        for (field, value) in &self.values {
            lines.push(format!(
                "{:<40}{}",
                field.as_str(),
                format_fixed_f64(*value, 16, 6)
            ));
        }
        let mut summary = lines.join("\n");
        summary.push('\n');
        summary
    }
}

pub fn parse_report(report: &str) -> Outputs {
    let lines = report.lines().map(strip_frame).collect::<Vec<_>>();
    let mut outputs = Outputs::default();

    for (index, line) in lines.iter().enumerate() {
        if outputs.version.is_none() {
            outputs.version = version_on(line);
        }

        for rule in &SAME_LINE_RULES {
            if let Some(value) = numbers_after(line, rule.label).get(rule.index) {
                outputs.values.entry(rule.field).or_insert(*value);
            }
        }

        for rule in &NEXT_LINE_RULES {
            if !line.contains(rule.label) {
                continue;
            }
            let Some(next) = lines.get(index + 1) else {
                continue;
            };
            let values = numbers(next);
            if values.len() < rule.fields.len() {
                continue;
            }
            for (field, value) in rule.fields.iter().zip(values) {
                outputs.values.entry(*field).or_insert(value);
            }
        }

        if let Some((head, [first, second, third])) = table_row(line) {
            if let Some(kind) = TransmittanceKind::from_row_head(&head) {
                outputs.transmittances.entry(kind).or_insert(Transmittance {
                    downward: first,
                    upward: second,
                    total: third,
                });
            } else if let Some(property) = ComponentProperty::from_row_head(&head) {
                outputs.properties.entry(property).or_insert(ComponentValues {
                    rayleigh: first,
                    aerosol: second,
                    total: third,
                });
            }
        }
    }

    debug!(
        values = outputs.values.len(),
        transmittances = outputs.transmittances.len(),
        properties = outputs.properties.len(),
        "parsed engine report"
    );
    outputs
}

/// Parses the report and fails on the first required field it lacks.
pub fn parse_report_requiring(
    report: &str,
    required: &[OutputField],
) -> Result<Outputs, OutputError> {
    let outputs = parse_report(report);
    for field in required {
        if let Err(error) = outputs.require(*field) {
            warn!(field = field.as_str(), "required output missing from report");
            return Err(error);
        }
    }
    Ok(outputs)
}

fn strip_frame(line: &str) -> &str {
    line.trim().trim_matches('*').trim()
}

fn numbers(text: &str) -> Vec<f64> {
    text.split(|c: char| c.is_whitespace() || c == ':')
        .filter_map(|token| token.parse::<f64>().ok())
        .filter(|value| value.is_finite())
        .collect()
}

fn numbers_after(line: &str, label: &str) -> Vec<f64> {
    match line.find(label) {
        Some(start) => numbers(&line[start + label.len()..]),
        None => Vec::new(),
    }
}

fn version_on(line: &str) -> Option<String> {
    let start = line.find(VERSION_LABEL)?;
    line[start + VERSION_LABEL.len()..]
        .split_whitespace()
        .next()
        .map(str::to_string)
}

/// `head : a b c` with the head's whitespace runs collapsed.
fn table_row(line: &str) -> Option<(String, [f64; 3])> {
    let (head, rest) = line.split_once(':')?;
    let values = numbers(rest);
    let [first, second, third] = values.get(..3)? else {
        return None;
    };
    let head = head.split_whitespace().collect::<Vec<_>>().join(" ");
    Some((head, [*first, *second, *third]))
}
