use homevalue_parser::ExtractedTable;

use crate::types::{SizeLabel, TimeseriesRow, YearRange};

/// Unpivots the monthly columns into one row per region and month, keeping
/// months whose year falls inside `years`.
///
/// Rows are produced month by month (every region for the first month, then
/// the next) and then stable-sorted by date, so regions sharing a date keep
/// their input order.
pub fn format_timeseries(
    table: &ExtractedTable,
    size: SizeLabel,
    years: YearRange,
) -> Vec<TimeseriesRow> {
    let mut rows = Vec::with_capacity(table.months.len() * table.regions.len());

    for (month_idx, month) in table.months.iter().enumerate() {
        if !years.contains(month.year) {
            continue;
        }
        for region in &table.regions {
            rows.push(TimeseriesRow {
                region_id: region.region_id.clone(),
                region_name: region.region_name.clone(),
                state_name: region.state_name.clone(),
                date: month.header.clone(),
                observed_on: month.date,
                value: region.values.get(month_idx).copied().flatten(),
                size,
            });
        }
    }

    rows.sort_by_key(|row| row.observed_on);
    rows
}
