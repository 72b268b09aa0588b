use csv::StringRecord;

use crate::errors::ParserError;
use crate::model::{RawRecord, RawTable};

use super::{
    classify_columns, optional_text, parse_fips_code, parse_optional_f64, parse_required_i64,
    required_text, ColumnLayout, ColumnRole, IdentifierColumn,
};

/// Reads the county-level wide export: identifier columns followed by one
/// value column per month. A header with no data rows is an empty table.
pub struct CountyExportParser;

impl Default for CountyExportParser {
    fn default() -> Self {
        Self
    }
}

impl CountyExportParser {
    pub fn parse(&self, content: &str) -> Result<RawTable, ParserError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(content.as_bytes());

        let mut records = reader.records();

        let header = records.next().ok_or(ParserError::MissingHeader)??;
        let layout = classify_columns(&header)?;

        let mut rows = Vec::new();
        for (row_idx, record) in records.enumerate() {
            let record = record?;
            let line_index = record
                .position()
                .map(|pos| pos.line() as usize)
                .unwrap_or(row_idx + 2);

            if record.len() != layout.roles.len() {
                return Err(ParserError::DataRow {
                    line_index,
                    message: format!(
                        "expected {} columns but found {}",
                        layout.roles.len(),
                        record.len()
                    ),
                });
            }

            rows.push(Self::parse_record(&layout, &header, &record, line_index)?);
        }

        Ok(RawTable {
            months: layout.months(),
            records: rows,
        })
    }

    fn parse_record(
        layout: &ColumnLayout,
        header: &StringRecord,
        record: &StringRecord,
        line_index: usize,
    ) -> Result<RawRecord, ParserError> {
        let field = move |column: IdentifierColumn| record.get(layout.index_of(column)).unwrap_or("");

        let region_id = parse_required_i64(
            field(IdentifierColumn::RegionId),
            line_index,
            IdentifierColumn::RegionId.canonical_name(),
        )?;
        let size_rank = parse_required_i64(
            field(IdentifierColumn::SizeRank),
            line_index,
            IdentifierColumn::SizeRank.canonical_name(),
        )?;
        let state_code_fips = parse_fips_code(
            field(IdentifierColumn::StateCodeFips),
            line_index,
            IdentifierColumn::StateCodeFips.canonical_name(),
        )?;
        let municipal_code_fips = parse_fips_code(
            field(IdentifierColumn::MunicipalCodeFips),
            line_index,
            IdentifierColumn::MunicipalCodeFips.canonical_name(),
        )?;

        let mut values = Vec::with_capacity(layout.roles.len());
        for (idx, role) in layout.roles.iter().enumerate() {
            if let ColumnRole::Month(_) = role {
                let header_name = header.get(idx).unwrap_or("");
                let value = record.get(idx).unwrap_or("");
                values.push(parse_optional_f64(value, line_index, header_name)?);
            }
        }

        Ok(RawRecord {
            line_index,
            region_id,
            size_rank,
            region_name: required_text(field(IdentifierColumn::RegionName)),
            region_type: required_text(field(IdentifierColumn::RegionType)),
            state_name: required_text(field(IdentifierColumn::StateName)),
            state: required_text(field(IdentifierColumn::State)),
            metro: optional_text(field(IdentifierColumn::Metro)),
            state_code_fips,
            municipal_code_fips,
            values,
        })
    }
}
