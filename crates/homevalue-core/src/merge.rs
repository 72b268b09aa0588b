use homevalue_parser::ExtractedTable;
use tracing::debug;

use crate::choropleth::aggregate_choropleth;
use crate::timeseries::format_timeseries;
use crate::types::{ChoroplethRow, SizeLabel, TimeseriesRow, YearRange};

/// Both reshaped outputs for a single bedroom-size export.
#[derive(Debug, Clone)]
pub struct SizeGroup {
    pub size: SizeLabel,
    pub choropleth: Vec<ChoroplethRow>,
    pub timeseries: Vec<TimeseriesRow>,
}

pub fn reshape_group(table: &ExtractedTable, size: SizeLabel, years: YearRange) -> SizeGroup {
    let choropleth = aggregate_choropleth(table, size, years);
    let timeseries = format_timeseries(table, size, years);
    debug!(
        size = size.as_str(),
        regions = table.region_count(),
        months = table.month_count(),
        choropleth_rows = choropleth.len(),
        timeseries_rows = timeseries.len(),
        "Reshaped size group"
    );
    SizeGroup {
        size,
        choropleth,
        timeseries,
    }
}

#[derive(Debug, Clone, Default)]
pub struct MergedTables {
    pub choropleth: Vec<ChoroplethRow>,
    pub timeseries: Vec<TimeseriesRow>,
}

/// Concatenates size groups in the order given. Rows are never deduplicated:
/// the size is part of every row's key.
pub fn merge_groups(groups: Vec<SizeGroup>) -> MergedTables {
    let choropleth_len = groups.iter().map(|g| g.choropleth.len()).sum();
    let timeseries_len = groups.iter().map(|g| g.timeseries.len()).sum();

    let mut merged = MergedTables {
        choropleth: Vec::with_capacity(choropleth_len),
        timeseries: Vec::with_capacity(timeseries_len),
    };
    for group in groups {
        merged.choropleth.extend(group.choropleth);
        merged.timeseries.extend(group.timeseries);
    }
    merged
}
