use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;

use crate::errors::ParserError;
use crate::formats::CountyExportParser;
use crate::model::{MonthColumn, RegionId};
use crate::{extract_regions, parse_county_export};

fn fixture(path: &str) -> String {
    let base = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let full_path = base.join("tests/data").join(path);
    fs::read_to_string(&full_path)
        .unwrap_or_else(|err| panic!("failed to read fixture {}: {}", full_path.display(), err))
}

const HEADER: &str = "RegionID,SizeRank,RegionName,RegionType,StateName,State,Metro,StateCodeFIPS,MunicipalCodeFIPS";

#[test]
fn region_id_pads_state_and_municipal_codes() {
    let id = RegionId::from_fips(6, 37).unwrap();
    assert_eq!(id.as_str(), "06037");
    assert_eq!(id.as_str().len(), RegionId::LEN);
    assert_eq!(id.state_code(), "06");
    assert_eq!(id.municipal_code(), "037");

    assert_eq!(RegionId::from_fips(0, 0).unwrap().as_str(), "00000");
    assert_eq!(RegionId::from_fips(99, 999).unwrap().as_str(), "99999");
}

#[test]
fn region_id_rejects_codes_wider_than_fixed_width() {
    assert!(RegionId::from_fips(100, 1).is_err());
    assert!(RegionId::from_fips(1, 1000).is_err());
}

#[test]
fn region_id_parses_only_five_digits() {
    assert_eq!(RegionId::try_from("01001").unwrap().as_str(), "01001");
    assert!(RegionId::try_from("1001").is_err());
    assert!(RegionId::try_from("0100A").is_err());
}

#[test]
fn month_column_accepts_dates_and_year_months() {
    let full = MonthColumn::parse("2015-03-31").unwrap();
    assert_eq!(full.year, 2015);
    assert_eq!(full.header, "2015-03-31");
    assert_eq!(full.date, NaiveDate::from_ymd_opt(2015, 3, 31).unwrap());

    let short = MonthColumn::parse("2015-03").unwrap();
    assert_eq!(short.year, 2015);
    assert_eq!(short.header, "2015-03");
    assert_eq!(short.date, NaiveDate::from_ymd_opt(2015, 3, 1).unwrap());

    assert!(MonthColumn::parse("Population").is_err());
    assert!(MonthColumn::parse("2015-13-01").is_err());
}

#[test]
fn parses_sample_export() {
    let content = fixture("county_2br_sample.csv");
    let raw = CountyExportParser.parse(&content).expect("sample parse failed");

    assert_eq!(raw.months.len(), 5);
    assert_eq!(raw.records.len(), 3);
    assert_eq!(raw.months[0].header, "2009-11-30");

    let cook = &raw.records[1];
    assert_eq!(cook.region_name, "Cook County");
    assert_eq!(cook.state_code_fips, 17);
    assert_eq!(cook.municipal_code_fips, 31);
    assert_eq!(cook.values[2], None);
    assert_eq!(cook.values[3], Some(204000.0));
    assert_eq!(cook.line_index, 3);

    let autauga = &raw.records[2];
    assert_eq!(autauga.metro, None);
}

#[test]
fn extraction_derives_region_ids_and_keeps_values() {
    let table = parse_county_export(&fixture("county_2br_sample.csv")).expect("extract failed");

    let ids: Vec<&str> = table.regions.iter().map(|r| r.region_id.as_str()).collect();
    assert_eq!(ids, vec!["06037", "17031", "01001"]);
    assert_eq!(table.month_count(), 5);
    assert_eq!(table.region_count(), 3);

    for region in &table.regions {
        assert_eq!(region.values.len(), table.month_count());
    }
    assert_eq!(table.regions[0].region_name, "Los Angeles County");
    assert_eq!(table.regions[0].state_name, "CA");
}

#[test]
fn identifier_columns_can_appear_in_any_order() {
    let content = "\
StateCodeFIPS,MunicipalCodeFIPS,RegionName,StateName,2010-01-31,RegionID,SizeRank,RegionType,State,Metro
6,37,Los Angeles County,CA,500.0,3101,0,County,CA,
";
    let table = parse_county_export(content).expect("parse failed");
    assert_eq!(table.regions[0].region_id.as_str(), "06037");
    assert_eq!(table.regions[0].values, vec![Some(500.0)]);
}

#[test]
fn missing_fips_column_is_rejected() {
    let content = "\
RegionID,SizeRank,RegionName,RegionType,StateName,State,Metro,StateCodeFIPS,2010-01-31
1,0,A County,County,CA,CA,,6,100.0
";
    let err = CountyExportParser.parse(content).unwrap_err();
    assert!(matches!(
        err,
        ParserError::MissingColumn {
            column: "MunicipalCodeFIPS"
        }
    ));
}

#[test]
fn non_month_header_is_rejected() {
    let content = format!("{HEADER},2010-01-31,Notes\n1,0,A,County,CA,CA,,6,37,100.0,x\n");
    let err = CountyExportParser.parse(&content).unwrap_err();
    match err {
        ParserError::UnrecognizedColumn { index, column, .. } => {
            assert_eq!(index, 10);
            assert_eq!(column, "Notes");
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn duplicate_month_header_is_rejected() {
    let content = format!("{HEADER},2010-01-31,2010-01-31\n1,0,A,County,CA,CA,,6,37,1.0,2.0\n");
    let err = CountyExportParser.parse(&content).unwrap_err();
    assert!(matches!(err, ParserError::DuplicateColumn { .. }));
}

#[test]
fn non_numeric_fips_code_is_rejected() {
    let content = format!("{HEADER},2010-01-31\n1,0,A,County,CA,CA,,six,37,1.0\n");
    let err = CountyExportParser.parse(&content).unwrap_err();
    assert!(matches!(err, ParserError::RegionCode { line_index: 2, .. }));
}

#[test]
fn wide_municipal_code_fails_extraction() {
    let content = format!("{HEADER},2010-01-31\n1,0,A,County,CA,CA,,6,1037,1.0\n");
    let raw = CountyExportParser.parse(&content).expect("parse should succeed");
    let err = extract_regions(&raw).unwrap_err();
    assert!(matches!(err, ParserError::RegionCode { line_index: 2, .. }));
}

#[test]
fn non_numeric_value_cell_is_rejected() {
    let content = format!("{HEADER},2010-01-31\n1,0,A,County,CA,CA,,6,37,lots\n");
    let err = CountyExportParser.parse(&content).unwrap_err();
    match err {
        ParserError::DataRow { line_index, message } => {
            assert_eq!(line_index, 2);
            assert!(message.contains("2010-01-31"), "message was {message}");
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn short_row_is_rejected() {
    let content = format!("{HEADER},2010-01-31,2010-02-28\n1,0,A,County,CA,CA,,6,37,1.0\n");
    let err = CountyExportParser.parse(&content).unwrap_err();
    assert!(matches!(err, ParserError::DataRow { line_index: 2, .. }));
}

#[test]
fn header_only_file_is_an_empty_table() {
    let content = format!("{HEADER},2010-01-31,2010-02-28\n");
    let table = parse_county_export(&content).expect("header-only export parses");
    assert_eq!(table.region_count(), 0);
    assert_eq!(table.month_count(), 2);
}

#[test]
fn empty_file_has_no_header() {
    let err = CountyExportParser.parse("").unwrap_err();
    assert!(matches!(err, ParserError::MissingHeader));
}
