use std::fs;
use std::path::{Path, PathBuf};

use polars::prelude::*;
use tracing::info;

use crate::config::OutputPaths;
use crate::error::{PipelineError, Result};
use crate::merge::MergedTables;
use crate::tables::{choropleth_dataframe, timeseries_dataframe};

/// Location and content digest of a written table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenTable {
    pub path: PathBuf,
    pub rows: usize,
    pub digest: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenOutputs {
    pub choropleth: WrittenTable,
    pub timeseries: WrittenTable,
}

pub fn render_csv(df: &DataFrame) -> PolarsResult<Vec<u8>> {
    let mut buffer = Vec::new();
    let mut clone = df.clone();
    CsvWriter::new(&mut buffer)
        .include_header(true)
        .finish(&mut clone)?;
    Ok(buffer)
}

pub fn compute_digest(contents: &[u8]) -> String {
    blake3::hash(contents).to_hex().to_string()
}

/// Serialises both tables and replaces the configured files.
///
/// Nothing is written until both tables have rendered. Each file goes to a
/// sibling temporary first and is renamed into place only once both
/// temporaries exist, so a failure leaves the previous outputs in place.
pub fn publish_tables(tables: &MergedTables, paths: &OutputPaths) -> Result<WrittenOutputs> {
    let choropleth_bytes = render_csv(&choropleth_dataframe(&tables.choropleth)?)?;
    let timeseries_bytes = render_csv(&timeseries_dataframe(&tables.timeseries)?)?;

    let choropleth_tmp = stage(&paths.choropleth, &choropleth_bytes)?;
    let timeseries_tmp = match stage(&paths.timeseries, &timeseries_bytes) {
        Ok(tmp) => tmp,
        Err(err) => {
            let _ = fs::remove_file(&choropleth_tmp);
            return Err(err);
        }
    };

    commit(&choropleth_tmp, &paths.choropleth)?;
    commit(&timeseries_tmp, &paths.timeseries)?;

    let written = WrittenOutputs {
        choropleth: WrittenTable {
            path: paths.choropleth.clone(),
            rows: tables.choropleth.len(),
            digest: compute_digest(&choropleth_bytes),
        },
        timeseries: WrittenTable {
            path: paths.timeseries.clone(),
            rows: tables.timeseries.len(),
            digest: compute_digest(&timeseries_bytes),
        },
    };

    for table in [&written.choropleth, &written.timeseries] {
        info!(
            path = %table.path.display(),
            rows = table.rows,
            digest = %table.digest,
            "Wrote output table"
        );
    }

    Ok(written)
}

fn temporary_path(target: &Path) -> PathBuf {
    let mut name = target
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    target.with_file_name(name)
}

fn stage(target: &Path, contents: &[u8]) -> Result<PathBuf> {
    if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| PipelineError::Output {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let tmp = temporary_path(target);
    fs::write(&tmp, contents).map_err(|source| PipelineError::Output {
        path: tmp.clone(),
        source,
    })?;
    Ok(tmp)
}

fn commit(tmp: &Path, target: &Path) -> Result<()> {
    fs::rename(tmp, target).map_err(|source| PipelineError::Output {
        path: target.to_path_buf(),
        source,
    })
}
