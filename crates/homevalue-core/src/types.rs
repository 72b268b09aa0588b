// crates/homevalue-core/src/types.rs

use std::fmt;

use chrono::NaiveDate;
use homevalue_parser::RegionId;
use serde::{Deserialize, Serialize};

/// Bedroom-count category of a county export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SizeLabel {
    OneBedroom,
    TwoBedroom,
    ThreeBedroom,
}

impl SizeLabel {
    pub const ALL: [SizeLabel; 3] = [
        SizeLabel::OneBedroom,
        SizeLabel::TwoBedroom,
        SizeLabel::ThreeBedroom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SizeLabel::OneBedroom => "1 Bedroom",
            SizeLabel::TwoBedroom => "2 Bedroom",
            SizeLabel::ThreeBedroom => "3 Bedroom",
        }
    }
}

impl fmt::Display for SizeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for SizeLabel {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let trimmed = value.trim();
        SizeLabel::ALL
            .into_iter()
            .find(|label| label.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| {
                format!("unknown size '{trimmed}', expected one of 1 Bedroom, 2 Bedroom, 3 Bedroom")
            })
    }
}

impl TryFrom<String> for SizeLabel {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        SizeLabel::try_from(value.as_str())
    }
}

impl From<SizeLabel> for String {
    fn from(value: SizeLabel) -> Self {
        value.as_str().to_string()
    }
}

impl std::str::FromStr for SizeLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SizeLabel::try_from(s)
    }
}

/// Inclusive range of calendar years.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    pub start: i32,
    pub end: i32,
}

impl YearRange {
    pub fn new(start: i32, end: i32) -> Result<Self, String> {
        if start > end {
            return Err(format!("year range start {start} is after end {end}"));
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, year: i32) -> bool {
        year >= self.start && year <= self.end
    }

    /// Axis bounds for the trend chart: a quarter of padding before the first
    /// year and a month after the last one.
    pub fn display_window(&self) -> Option<(NaiveDate, NaiveDate)> {
        let start = NaiveDate::from_ymd_opt(self.start - 1, 10, 1)?;
        let end = NaiveDate::from_ymd_opt(self.end + 1, 2, 1)?;
        Some((start, end))
    }
}

/// One averaged value per region, year and size.
#[derive(Debug, Clone, PartialEq)]
pub struct ChoroplethRow {
    pub region_id: RegionId,
    pub region_name: String,
    pub state_name: String,
    pub year: i32,
    pub average_value: Option<i64>,
    pub size: SizeLabel,
}

/// One monthly value per region and size. `date` is the source column header.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeseriesRow {
    pub region_id: RegionId,
    pub region_name: String,
    pub state_name: String,
    pub date: String,
    pub observed_on: NaiveDate,
    pub value: Option<f64>,
    pub size: SizeLabel,
}
