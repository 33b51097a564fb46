use crate::errors::ParserError;

pub(crate) fn parse_measurement(
    reader: &'static str,
    record: usize,
    field: &str,
    value: &str,
) -> Result<f64, ParserError> {
    let trimmed = value.trim();
    let parsed = trimmed
        .parse::<f64>()
        .map_err(|err| ParserError::DataRow {
            reader,
            record,
            message: format!("failed to parse field '{field}' value '{trimmed}' as a number: {err}"),
        })?;
    ensure_finite(reader, record, field, parsed)
}

/// `f64::from_str` accepts "NaN" and "inf"; measurements must be real numbers.
pub(crate) fn ensure_finite(
    reader: &'static str,
    record: usize,
    field: &str,
    value: f64,
) -> Result<f64, ParserError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ParserError::DataRow {
            reader,
            record,
            message: format!("field '{field}' must be a finite number, got {value}"),
        })
    }
}
