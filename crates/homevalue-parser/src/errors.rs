use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParserError {
    #[error("file did not contain a header row")]
    MissingHeader,

    #[error("required column '{column}' is missing from the header")]
    MissingColumn { column: &'static str },

    #[error("column '{column}' appears more than once in the header")]
    DuplicateColumn { column: String },

    #[error("header column {index} '{column}' is neither an identifier nor a month: {reason}")]
    UnrecognizedColumn {
        index: usize,
        column: String,
        reason: String,
    },

    #[error("CSV error: {source}")]
    Csv {
        #[source]
        source: csv::Error,
    },

    #[error("data row {line_index} invalid: {message}")]
    DataRow { line_index: usize, message: String },

    #[error("data row {line_index} has an invalid region code: {message}")]
    RegionCode { line_index: usize, message: String },
}

impl From<csv::Error> for ParserError {
    fn from(source: csv::Error) -> Self {
        ParserError::Csv { source }
    }
}
