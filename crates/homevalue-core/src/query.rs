use std::collections::HashSet;
use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use homevalue_parser::RegionId;
use polars::prelude::*;

use crate::config::{OutputPaths, PipelineConfig};
use crate::error::{PipelineError, Result};
use crate::merge::MergedTables;
use crate::tables::{
    choropleth_dataframe, choropleth_schema, timeseries_dataframe, timeseries_schema,
    REGION_COLUMN, SIZE_COLUMN, YEAR_COLUMN,
};
use crate::types::SizeLabel;

/// Read-only view over the published tables, answering the map and trend
/// chart lookups.
#[derive(Debug, Clone)]
pub struct DashboardTables {
    choropleth: DataFrame,
    timeseries: DataFrame,
    max_selection: usize,
}

impl DashboardTables {
    pub fn new(choropleth: DataFrame, timeseries: DataFrame, max_selection: usize) -> Self {
        Self {
            choropleth,
            timeseries,
            max_selection: max_selection.max(1),
        }
    }

    pub fn from_merged(tables: &MergedTables, max_selection: usize) -> Result<Self> {
        Ok(Self::new(
            choropleth_dataframe(&tables.choropleth)?,
            timeseries_dataframe(&tables.timeseries)?,
            max_selection,
        ))
    }

    pub fn load(paths: &OutputPaths, max_selection: usize) -> Result<Self> {
        let choropleth = read_table(&paths.choropleth, choropleth_schema())?;
        let timeseries = read_table(&paths.timeseries, timeseries_schema())?;
        Ok(Self::new(choropleth, timeseries, max_selection))
    }

    pub fn load_for(config: &PipelineConfig) -> Result<Self> {
        Self::load(&config.outputs, config.dashboard.max_selection)
    }

    pub fn choropleth(&self) -> &DataFrame {
        &self.choropleth
    }

    pub fn timeseries(&self) -> &DataFrame {
        &self.timeseries
    }

    pub fn max_selection(&self) -> usize {
        self.max_selection
    }

    /// Map frame: every region's averaged value for one year and size.
    pub fn choropleth_frame(&self, year: i32, size: SizeLabel) -> Result<DataFrame> {
        let years = self.choropleth.column(YEAR_COLUMN)?.i32()?;
        let sizes = self.choropleth.column(SIZE_COLUMN)?.str()?;

        let mask: BooleanChunked = years
            .into_iter()
            .zip(sizes.into_iter())
            .map(|pair| match pair {
                (Some(row_year), Some(row_size)) => row_year == year && row_size == size.as_str(),
                _ => false,
            })
            .collect();

        Ok(self.choropleth.filter(&mask)?)
    }

    /// Trend lines for the selected regions. Only the first `max_selection`
    /// entries of the selection are honoured; an empty selection yields an
    /// empty frame.
    pub fn timeseries_lines(&self, size: SizeLabel, selection: &[RegionId]) -> Result<DataFrame> {
        let selected: HashSet<&str> = selection
            .iter()
            .take(self.max_selection)
            .map(RegionId::as_str)
            .collect();

        let codes = self.timeseries.column(REGION_COLUMN)?.str()?;
        let sizes = self.timeseries.column(SIZE_COLUMN)?.str()?;

        let mask: BooleanChunked = codes
            .into_iter()
            .zip(sizes.into_iter())
            .map(|pair| match pair {
                (Some(code), Some(row_size)) => {
                    row_size == size.as_str() && selected.contains(code)
                }
                _ => false,
            })
            .collect();

        Ok(self.timeseries.filter(&mask)?)
    }
}

fn read_table(path: &Path, schema: Schema) -> Result<DataFrame> {
    let file = File::open(path).map_err(|source| PipelineError::Input {
        path: path.to_path_buf(),
        source,
    })?;
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_schema(Some(Arc::new(schema)))
        .into_reader_with_file_handle(file)
        .finish()?;
    Ok(df)
}
