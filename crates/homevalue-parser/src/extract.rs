//! Region extraction: derives the five character county key and keeps only
//! the columns the reshape transforms read.

use crate::errors::ParserError;
use crate::model::{ExtractedRegion, ExtractedTable, RawTable, RegionId};

pub fn extract_regions(table: &RawTable) -> Result<ExtractedTable, ParserError> {
    let regions = table
        .records
        .iter()
        .map(|record| {
            let region_id = RegionId::from_fips(record.state_code_fips, record.municipal_code_fips)
                .map_err(|message| ParserError::RegionCode {
                    line_index: record.line_index,
                    message,
                })?;
            Ok(ExtractedRegion {
                region_id,
                region_name: record.region_name.clone(),
                state_name: record.state_name.clone(),
                values: record.values.clone(),
            })
        })
        .collect::<Result<Vec<_>, ParserError>>()?;

    Ok(ExtractedTable {
        months: table.months.clone(),
        regions,
    })
}
