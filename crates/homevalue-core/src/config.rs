// crates/homevalue-core/src/config.rs

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, Result};
use crate::types::{SizeLabel, YearRange};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputSpec {
    pub size: SizeLabel,
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputPaths {
    pub choropleth: PathBuf,
    pub timeseries: PathBuf,
}

impl Default for OutputPaths {
    fn default() -> Self {
        Self {
            choropleth: PathBuf::from("df_choro.csv"),
            timeseries: PathBuf::from("df_line.csv"),
        }
    }
}

/// Settings the dashboard reads alongside the published tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub selected_year: i32,
    pub default_size: SizeLabel,
    pub max_selection: usize,
    pub boundaries: PathBuf,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            selected_year: 2017,
            default_size: SizeLabel::ThreeBedroom,
            max_selection: 8,
            boundaries: PathBuf::from("counties.json"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub min_year: i32,
    pub max_year: i32,
    pub inputs: Vec<InputSpec>,
    pub outputs: OutputPaths,
    pub dashboard: DashboardConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            min_year: 2010,
            max_year: 2021,
            inputs: SizeLabel::ALL
                .into_iter()
                .map(|size| InputSpec {
                    size,
                    path: PathBuf::from(format!("{}.csv", size.as_str())),
                })
                .collect(),
            outputs: OutputPaths::default(),
            dashboard: DashboardConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Reads a TOML config. Relative paths inside it are taken relative to the
    /// file's own directory.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| PipelineError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        Ok(config.resolve_paths(base))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: PipelineConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let years = self.years()?;

        if !years.contains(self.dashboard.selected_year) {
            return Err(PipelineError::Config(format!(
                "dashboard.selected_year {} is outside {}..={}",
                self.dashboard.selected_year, years.start, years.end
            )));
        }

        if self.dashboard.max_selection == 0 {
            return Err(PipelineError::Config(
                "dashboard.max_selection must be at least 1".to_string(),
            ));
        }

        if self.outputs.choropleth == self.outputs.timeseries {
            return Err(PipelineError::Config(format!(
                "outputs.choropleth and outputs.timeseries both point at {}",
                self.outputs.choropleth.display()
            )));
        }

        if self.inputs.is_empty() {
            return Err(PipelineError::Config(
                "at least one input export must be configured".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for input in &self.inputs {
            if !seen.insert(input.size) {
                return Err(PipelineError::Config(format!(
                    "size '{}' is configured more than once",
                    input.size
                )));
            }
        }

        Ok(())
    }

    pub fn years(&self) -> Result<YearRange> {
        YearRange::new(self.min_year, self.max_year).map_err(PipelineError::Config)
    }

    pub fn resolve_paths(mut self, base: &Path) -> Self {
        let resolve = |path: &mut PathBuf| {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        };
        for input in &mut self.inputs {
            resolve(&mut input.path);
        }
        resolve(&mut self.outputs.choropleth);
        resolve(&mut self.outputs.timeseries);
        resolve(&mut self.dashboard.boundaries);
        self
    }
}
