//! Reshape pipeline: read exports -> extract -> aggregate/format -> merge -> publish.

use std::fs;

use homevalue_parser::{parse_county_export, ExtractedTable};
use tracing::info;

use crate::config::PipelineConfig;
use crate::error::{PipelineError, Result};
use crate::merge::{merge_groups, reshape_group, MergedTables};
use crate::outputs::{publish_tables, WrittenOutputs};
use crate::types::{SizeLabel, YearRange};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeGroupSummary {
    pub size: SizeLabel,
    pub regions: usize,
    pub months: usize,
    pub choropleth_rows: usize,
    pub timeseries_rows: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub groups: Vec<SizeGroupSummary>,
    pub outputs: WrittenOutputs,
}

/// Parses every configured export. Any unreadable or malformed file aborts
/// before a single table is reshaped.
pub fn load_inputs(config: &PipelineConfig) -> Result<Vec<(SizeLabel, ExtractedTable)>> {
    config
        .inputs
        .iter()
        .map(|input| {
            let content = fs::read_to_string(&input.path).map_err(|source| PipelineError::Input {
                path: input.path.clone(),
                source,
            })?;
            let table = parse_county_export(&content).map_err(|source| PipelineError::Parse {
                path: input.path.clone(),
                source,
            })?;
            info!(
                size = input.size.as_str(),
                path = %input.path.display(),
                regions = table.region_count(),
                months = table.month_count(),
                "Loaded county export"
            );
            Ok((input.size, table))
        })
        .collect()
}

/// Reshapes each export and concatenates the results in input order.
pub fn reshape_all(
    inputs: &[(SizeLabel, ExtractedTable)],
    years: YearRange,
) -> (MergedTables, Vec<SizeGroupSummary>) {
    let mut summaries = Vec::with_capacity(inputs.len());
    let mut groups = Vec::with_capacity(inputs.len());

    for (size, table) in inputs {
        let group = reshape_group(table, *size, years);
        summaries.push(SizeGroupSummary {
            size: *size,
            regions: table.region_count(),
            months: table.month_count(),
            choropleth_rows: group.choropleth.len(),
            timeseries_rows: group.timeseries.len(),
        });
        groups.push(group);
    }

    (merge_groups(groups), summaries)
}

pub fn run(config: &PipelineConfig) -> Result<RunSummary> {
    config.validate()?;
    let years = config.years()?;

    let inputs = load_inputs(config)?;
    let (tables, groups) = reshape_all(&inputs, years);
    let outputs = publish_tables(&tables, &config.outputs)?;

    info!(
        choropleth_rows = outputs.choropleth.rows,
        timeseries_rows = outputs.timeseries.rows,
        start_year = years.start,
        end_year = years.end,
        "Reshape pipeline finished"
    );

    Ok(RunSummary { groups, outputs })
}
