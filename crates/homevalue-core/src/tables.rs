//! Column layout of the two published tables and their polars frames.

use polars::prelude::*;

use crate::types::{ChoroplethRow, TimeseriesRow};

pub const REGION_COLUMN: &str = "CountyCode";
pub const YEAR_COLUMN: &str = "Year";
pub const DATE_COLUMN: &str = "Date";
pub const VALUE_COLUMN: &str = "Home Value";
pub const SIZE_COLUMN: &str = "Size";

pub const CHOROPLETH_COLUMNS: [&str; 6] = [
    REGION_COLUMN,
    "RegionName",
    "StateName",
    YEAR_COLUMN,
    VALUE_COLUMN,
    SIZE_COLUMN,
];

pub const TIMESERIES_COLUMNS: [&str; 6] = [
    REGION_COLUMN,
    "RegionName",
    "StateName",
    DATE_COLUMN,
    VALUE_COLUMN,
    SIZE_COLUMN,
];

pub fn choropleth_schema() -> Schema {
    Schema::from_iter([
        Field::new(CHOROPLETH_COLUMNS[0].into(), DataType::String),
        Field::new(CHOROPLETH_COLUMNS[1].into(), DataType::String),
        Field::new(CHOROPLETH_COLUMNS[2].into(), DataType::String),
        Field::new(CHOROPLETH_COLUMNS[3].into(), DataType::Int32),
        Field::new(CHOROPLETH_COLUMNS[4].into(), DataType::Int64),
        Field::new(CHOROPLETH_COLUMNS[5].into(), DataType::String),
    ])
}

pub fn timeseries_schema() -> Schema {
    Schema::from_iter([
        Field::new(TIMESERIES_COLUMNS[0].into(), DataType::String),
        Field::new(TIMESERIES_COLUMNS[1].into(), DataType::String),
        Field::new(TIMESERIES_COLUMNS[2].into(), DataType::String),
        Field::new(TIMESERIES_COLUMNS[3].into(), DataType::String),
        Field::new(TIMESERIES_COLUMNS[4].into(), DataType::Float64),
        Field::new(TIMESERIES_COLUMNS[5].into(), DataType::String),
    ])
}

pub fn choropleth_dataframe(rows: &[ChoroplethRow]) -> PolarsResult<DataFrame> {
    let codes: Vec<&str> = rows.iter().map(|r| r.region_id.as_str()).collect();
    let names: Vec<&str> = rows.iter().map(|r| r.region_name.as_str()).collect();
    let states: Vec<&str> = rows.iter().map(|r| r.state_name.as_str()).collect();
    let years: Vec<i32> = rows.iter().map(|r| r.year).collect();
    let values: Vec<Option<i64>> = rows.iter().map(|r| r.average_value).collect();
    let sizes: Vec<&str> = rows.iter().map(|r| r.size.as_str()).collect();

    DataFrame::new(vec![
        Series::new(CHOROPLETH_COLUMNS[0].into(), codes).into(),
        Series::new(CHOROPLETH_COLUMNS[1].into(), names).into(),
        Series::new(CHOROPLETH_COLUMNS[2].into(), states).into(),
        Series::new(CHOROPLETH_COLUMNS[3].into(), years).into(),
        Series::new(CHOROPLETH_COLUMNS[4].into(), values).into(),
        Series::new(CHOROPLETH_COLUMNS[5].into(), sizes).into(),
    ])
}

pub fn timeseries_dataframe(rows: &[TimeseriesRow]) -> PolarsResult<DataFrame> {
    let codes: Vec<&str> = rows.iter().map(|r| r.region_id.as_str()).collect();
    let names: Vec<&str> = rows.iter().map(|r| r.region_name.as_str()).collect();
    let states: Vec<&str> = rows.iter().map(|r| r.state_name.as_str()).collect();
    let dates: Vec<&str> = rows.iter().map(|r| r.date.as_str()).collect();
    let values: Vec<Option<f64>> = rows.iter().map(|r| r.value).collect();
    let sizes: Vec<&str> = rows.iter().map(|r| r.size.as_str()).collect();

    DataFrame::new(vec![
        Series::new(TIMESERIES_COLUMNS[0].into(), codes).into(),
        Series::new(TIMESERIES_COLUMNS[1].into(), names).into(),
        Series::new(TIMESERIES_COLUMNS[2].into(), states).into(),
        Series::new(TIMESERIES_COLUMNS[3].into(), dates).into(),
        Series::new(TIMESERIES_COLUMNS[4].into(), values).into(),
        Series::new(TIMESERIES_COLUMNS[5].into(), sizes).into(),
    ])
}
