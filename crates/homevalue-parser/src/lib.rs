pub mod errors;
pub mod extract;
pub mod formats;
pub mod model;

pub use errors::ParserError;
pub use extract::extract_regions;
pub use formats::CountyExportParser;
pub use model::{ExtractedRegion, ExtractedTable, MonthColumn, RawRecord, RawTable, RegionId};

/// Parses a wide county export and runs extraction on it.
pub fn parse_county_export(content: &str) -> Result<ExtractedTable, ParserError> {
    let raw = CountyExportParser.parse(content)?;
    extract_regions(&raw)
}

#[cfg(test)]
mod tests;
