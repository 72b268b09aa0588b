use crate::errors::ParserError;

pub(crate) fn parse_required_i64(
    value: &str,
    line_index: usize,
    column: &str,
) -> Result<i64, ParserError> {
    value
        .trim()
        .parse::<i64>()
        .map_err(|err| ParserError::DataRow {
            line_index,
            message: format!("failed to parse column '{column}' as integer: {err}"),
        })
}

pub(crate) fn parse_fips_code(
    value: &str,
    line_index: usize,
    column: &str,
) -> Result<u32, ParserError> {
    value
        .trim()
        .parse::<u32>()
        .map_err(|err| ParserError::RegionCode {
            line_index,
            message: format!("column '{column}' value '{}' is not a FIPS code: {err}", value.trim()),
        })
}

pub(crate) fn parse_optional_f64(
    value: &str,
    line_index: usize,
    column: &str,
) -> Result<Option<f64>, ParserError> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("nan") {
        return Ok(None);
    }

    trimmed
        .parse::<f64>()
        .map(Some)
        .map_err(|err| ParserError::DataRow {
            line_index,
            message: format!("failed to parse column '{column}' as float: {err}"),
        })
}

pub(crate) fn required_text(value: &str) -> String {
    value.trim().to_string()
}

pub(crate) fn optional_text(value: &str) -> Option<String> {
    Some(value.trim())
        .filter(|v| !v.is_empty())
        .map(|v| v.to_string())
}
