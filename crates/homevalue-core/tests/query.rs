use std::fs;

use chrono::NaiveDate;
use homevalue_core::config::OutputPaths;
use homevalue_core::merge::MergedTables;
use homevalue_core::outputs::publish_tables;
use homevalue_core::query::DashboardTables;
use homevalue_core::{ChoroplethRow, SizeLabel, TimeseriesRow};
use homevalue_parser::RegionId;

fn region(code: &str) -> RegionId {
    RegionId::try_from(code).unwrap()
}

fn choropleth_row(code: &str, year: i32, value: i64, size: SizeLabel) -> ChoroplethRow {
    ChoroplethRow {
        region_id: region(code),
        region_name: format!("County {code}"),
        state_name: "NY".to_string(),
        year,
        average_value: Some(value),
        size,
    }
}

fn timeseries_row(code: &str, month: u32, value: f64, size: SizeLabel) -> TimeseriesRow {
    let observed_on = NaiveDate::from_ymd_opt(2015, month, 1).unwrap();
    TimeseriesRow {
        region_id: region(code),
        region_name: format!("County {code}"),
        state_name: "NY".to_string(),
        date: observed_on.format("%Y-%m-%d").to_string(),
        observed_on,
        value: Some(value),
        size,
    }
}

fn sample_tables() -> MergedTables {
    let codes: Vec<String> = (1..=10).map(|n| format!("36{:03}", n)).collect();
    let mut choropleth = Vec::new();
    let mut timeseries = Vec::new();
    for size in SizeLabel::ALL {
        for (idx, code) in codes.iter().enumerate() {
            for year in [2016, 2017] {
                choropleth.push(choropleth_row(code, year, 1000 * idx as i64 + year as i64, size));
            }
            for month in [1, 2] {
                timeseries.push(timeseries_row(code, month, idx as f64, size));
            }
        }
    }
    MergedTables {
        choropleth,
        timeseries,
    }
}

#[test]
fn choropleth_frame_selects_one_year_and_size() -> Result<(), Box<dyn std::error::Error>> {
    let tables = DashboardTables::from_merged(&sample_tables(), 8)?;

    let frame = tables.choropleth_frame(2017, SizeLabel::TwoBedroom)?;

    assert_eq!(frame.height(), 10);
    let years = frame.column("Year")?.i32()?;
    assert!(years.into_iter().all(|y| y == Some(2017)));
    let sizes = frame.column("Size")?.str()?;
    assert!(sizes.into_iter().all(|s| s == Some("2 Bedroom")));
    Ok(())
}

#[test]
fn choropleth_frame_values_follow_the_requested_year() -> Result<(), Box<dyn std::error::Error>> {
    let tables = DashboardTables::from_merged(&sample_tables(), 8)?;

    let earlier = tables.choropleth_frame(2016, SizeLabel::OneBedroom)?;
    let later = tables.choropleth_frame(2017, SizeLabel::OneBedroom)?;

    let earlier: Vec<Option<i64>> = earlier.column("Home Value")?.i64()?.into_iter().collect();
    let later: Vec<Option<i64>> = later.column("Home Value")?.i64()?.into_iter().collect();
    assert_eq!(earlier.len(), 10);
    assert_eq!(earlier[0], Some(2016));
    assert_eq!(later[0], Some(2017));
    assert_eq!(later[9], Some(9017));
    Ok(())
}

#[test]
fn choropleth_frame_for_unknown_year_is_empty() -> Result<(), Box<dyn std::error::Error>> {
    let tables = DashboardTables::from_merged(&sample_tables(), 8)?;
    let frame = tables.choropleth_frame(1999, SizeLabel::OneBedroom)?;
    assert_eq!(frame.height(), 0);
    Ok(())
}

#[test]
fn timeseries_lines_cap_the_selection() -> Result<(), Box<dyn std::error::Error>> {
    let tables = DashboardTables::from_merged(&sample_tables(), 8)?;
    let selection: Vec<RegionId> = (1..=10).map(|n| region(&format!("36{:03}", n))).collect();

    let frame = tables.timeseries_lines(SizeLabel::ThreeBedroom, &selection)?;

    // Eight regions, two months each.
    assert_eq!(frame.height(), 16);
    let codes = frame.column("CountyCode")?.str()?;
    assert!(codes
        .into_iter()
        .all(|code| code != Some("36009") && code != Some("36010")));
    let sizes = frame.column("Size")?.str()?;
    assert!(sizes.into_iter().all(|s| s == Some("3 Bedroom")));
    Ok(())
}

#[test]
fn empty_selection_returns_no_lines() -> Result<(), Box<dyn std::error::Error>> {
    let tables = DashboardTables::from_merged(&sample_tables(), 8)?;
    let frame = tables.timeseries_lines(SizeLabel::OneBedroom, &[])?;
    assert_eq!(frame.height(), 0);
    Ok(())
}

#[test]
fn persisted_tables_keep_leading_zeros() -> Result<(), Box<dyn std::error::Error>> {
    let dir = std::env::temp_dir().join(format!("homevalue-query-{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    let paths = OutputPaths {
        choropleth: dir.join("df_choro.csv"),
        timeseries: dir.join("df_line.csv"),
    };

    let mut merged = sample_tables();
    merged
        .choropleth
        .push(choropleth_row("06037", 2017, 650, SizeLabel::OneBedroom));
    merged
        .timeseries
        .push(timeseries_row("06037", 3, 650.5, SizeLabel::OneBedroom));
    publish_tables(&merged, &paths)?;

    let tables = DashboardTables::load(&paths, 8)?;

    let frame = tables.choropleth_frame(2017, SizeLabel::OneBedroom)?;
    let codes = frame.column("CountyCode")?.str()?;
    let la = codes
        .into_iter()
        .position(|code| code == Some("06037"))
        .expect("06037 is published");
    assert_eq!(frame.column("Home Value")?.i64()?.get(la), Some(650));

    let lines = tables.timeseries_lines(SizeLabel::OneBedroom, &[region("06037")])?;
    assert_eq!(lines.height(), 1);
    assert_eq!(lines.column("Home Value")?.f64()?.get(0), Some(650.5));
    assert_eq!(lines.column("Date")?.str()?.get(0), Some("2015-03-01"));
    Ok(())
}
