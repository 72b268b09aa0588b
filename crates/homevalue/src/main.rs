use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use comfy_table::Table;
use homevalue_core::geometry::BoundaryIndex;
use homevalue_core::pipeline;
use homevalue_core::query::DashboardTables;
use homevalue_core::tables::REGION_COLUMN;
use homevalue_core::{PipelineConfig, SizeLabel};
use homevalue_parser::RegionId;
use polars::prelude::{AnyValue, DataFrame};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "County housing value reshaping and dashboard queries", long_about = None)]
struct Cli {
    /// Pipeline configuration (TOML); defaults apply when omitted
    #[arg(long, global = true, env = "HOMEVALUE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rebuild the choropleth and timeseries tables from the county exports
    Reshape,
    /// Print the map frame for one year and bedroom size
    Choropleth(ChoroplethArgs),
    /// Print trend rows for selected counties
    Timeseries(TimeseriesArgs),
    /// Report choropleth counties that have no boundary feature
    CheckGeometry,
}

#[derive(Args, Debug)]
struct ChoroplethArgs {
    /// Year to display; defaults to the configured selected year
    #[arg(long)]
    year: Option<i32>,
    /// Bedroom size, e.g. "2 Bedroom"; defaults to the configured size
    #[arg(long)]
    size: Option<SizeLabel>,
}

#[derive(Args, Debug)]
struct TimeseriesArgs {
    /// Five digit county code; repeat to select several
    #[arg(long = "region", required = true)]
    regions: Vec<String>,
    /// Bedroom size, e.g. "2 Bedroom"; defaults to the configured size
    #[arg(long)]
    size: Option<SizeLabel>,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;

    match cli.command {
        Command::Reshape => handle_reshape(&config),
        Command::Choropleth(args) => handle_choropleth(&config, args),
        Command::Timeseries(args) => handle_timeseries(&config, args),
        Command::CheckGeometry => handle_check_geometry(&config),
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<PipelineConfig> {
    match path {
        Some(path) => PipelineConfig::load(path)
            .with_context(|| format!("failed to load configuration from {}", path.display())),
        None => {
            let config = PipelineConfig::default();
            config.validate()?;
            Ok(config)
        }
    }
}

fn handle_reshape(config: &PipelineConfig) -> Result<()> {
    let summary = pipeline::run(config).context("reshape pipeline failed")?;

    for group in &summary.groups {
        info!(
            size = group.size.as_str(),
            regions = group.regions,
            months = group.months,
            choropleth_rows = group.choropleth_rows,
            timeseries_rows = group.timeseries_rows,
            "Size group published"
        );
    }

    println!(
        "Wrote {} choropleth rows to {} ({})",
        summary.outputs.choropleth.rows,
        summary.outputs.choropleth.path.display(),
        summary.outputs.choropleth.digest
    );
    println!(
        "Wrote {} timeseries rows to {} ({})",
        summary.outputs.timeseries.rows,
        summary.outputs.timeseries.path.display(),
        summary.outputs.timeseries.digest
    );
    Ok(())
}

fn handle_choropleth(config: &PipelineConfig, args: ChoroplethArgs) -> Result<()> {
    let year = args.year.unwrap_or(config.dashboard.selected_year);
    let size = args.size.unwrap_or(config.dashboard.default_size);
    let years = config.years()?;
    if !years.contains(year) {
        warn!(year, start = years.start, end = years.end, "Year is outside the published range");
    }

    let tables = DashboardTables::load_for(config).context("failed to load published tables")?;
    let frame = tables.choropleth_frame(year, size)?;

    println!("Average house value by county ({year} | {size})");
    println!("{}", render_frame(&frame)?);
    Ok(())
}

fn handle_timeseries(config: &PipelineConfig, args: TimeseriesArgs) -> Result<()> {
    let size = args.size.unwrap_or(config.dashboard.default_size);
    let selection = args
        .regions
        .iter()
        .map(|code| RegionId::try_from(code.as_str()).map_err(anyhow::Error::msg))
        .collect::<Result<Vec<_>>>()?;

    let tables = DashboardTables::load_for(config).context("failed to load published tables")?;
    if selection.len() > tables.max_selection() {
        warn!(
            selected = selection.len(),
            max = tables.max_selection(),
            "Selection exceeds the limit; extra counties are ignored"
        );
    }
    let frame = tables.timeseries_lines(size, &selection)?;

    println!("Average house value by month ({size})");
    if let Some((start, end)) = config.years()?.display_window() {
        println!("Axis window: {start} to {end}");
    }
    println!("{}", render_frame(&frame)?);
    Ok(())
}

fn handle_check_geometry(config: &PipelineConfig) -> Result<()> {
    let boundaries = BoundaryIndex::load(&config.dashboard.boundaries).with_context(|| {
        format!(
            "failed to load boundary file {}",
            config.dashboard.boundaries.display()
        )
    })?;
    if boundaries.unidentified() > 0 {
        warn!(
            features = boundaries.unidentified(),
            "Boundary features without a usable id"
        );
    }

    let tables = DashboardTables::load_for(config).context("failed to load published tables")?;
    let codes = tables.choropleth().column(REGION_COLUMN)?.str()?;
    let regions = codes
        .into_iter()
        .flatten()
        .map(|code| RegionId::try_from(code).map_err(anyhow::Error::msg))
        .collect::<Result<Vec<_>>>()?;

    let report = boundaries.coverage(&regions);
    println!(
        "{} of {} counties join against {} boundary features",
        report.matched,
        report.matched + report.missing.len(),
        boundaries.len()
    );

    if !report.is_complete() {
        for region in &report.missing {
            println!("  missing: {region}");
        }
        bail!("{} counties have no boundary feature", report.missing.len());
    }
    Ok(())
}

fn render_frame(frame: &DataFrame) -> Result<Table> {
    let mut table = Table::new();
    table.set_header(
        frame
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect::<Vec<_>>(),
    );

    for idx in 0..frame.height() {
        let mut cells = Vec::with_capacity(frame.width());
        for column in frame.get_columns() {
            let cell = match column.get(idx)? {
                AnyValue::Null => String::new(),
                AnyValue::String(text) => text.to_string(),
                other => other.to_string(),
            };
            cells.push(cell);
        }
        table.add_row(cells);
    }

    Ok(table)
}
