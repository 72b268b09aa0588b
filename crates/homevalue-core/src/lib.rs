pub mod choropleth;
pub mod config;
pub mod error;
pub mod geometry;
pub mod merge;
pub mod outputs;
pub mod pipeline;
pub mod query;
pub mod tables;
pub mod timeseries;
pub mod types;

pub use config::{DashboardConfig, InputSpec, OutputPaths, PipelineConfig};
pub use error::{PipelineError, Result};
pub use types::{ChoroplethRow, SizeLabel, TimeseriesRow, YearRange};
