/// Shortest representation that parses back to the same `f64`.
pub fn format_value(value: f64) -> String {
    if value == 0.0 {
        // folds -0.0 so the text never depends on the sign of zero
        return "0".to_string();
    }
    value.to_string()
}

pub fn format_series(values: &[f64]) -> String {
    values
        .iter()
        .map(|value| format_value(*value))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn format_fixed_f64(value: f64, width: usize, precision: usize) -> String {
    format!(
        "{value:>width$.precision$}",
        width = width,
        precision = precision
    )
}
