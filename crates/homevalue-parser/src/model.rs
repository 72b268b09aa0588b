use std::fmt;

use chrono::NaiveDate;

/// Five character county key: two-digit state FIPS followed by three-digit
/// municipal FIPS, both zero padded.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RegionId(String);

impl RegionId {
    pub const STATE_WIDTH: usize = 2;
    pub const MUNICIPAL_WIDTH: usize = 3;
    pub const LEN: usize = Self::STATE_WIDTH + Self::MUNICIPAL_WIDTH;

    pub fn from_fips(state: u32, municipal: u32) -> Result<Self, String> {
        if state > 99 {
            return Err(format!(
                "state code {state} is wider than {} digits",
                Self::STATE_WIDTH
            ));
        }
        if municipal > 999 {
            return Err(format!(
                "municipal code {municipal} is wider than {} digits",
                Self::MUNICIPAL_WIDTH
            ));
        }
        Ok(Self(format!("{state:02}{municipal:03}")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn state_code(&self) -> &str {
        &self.0[..Self::STATE_WIDTH]
    }

    pub fn municipal_code(&self) -> &str {
        &self.0[Self::STATE_WIDTH..]
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<&str> for RegionId {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let trimmed = value.trim();
        if trimmed.len() != Self::LEN || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(format!(
                "region id must be {} ASCII digits, got '{trimmed}'",
                Self::LEN
            ));
        }
        Ok(Self(trimmed.to_string()))
    }
}

/// A month column of the wide export. `header` is kept verbatim because it is
/// what the timeseries table publishes as its date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthColumn {
    pub header: String,
    pub year: i32,
    pub date: NaiveDate,
}

impl MonthColumn {
    pub fn parse(header: &str) -> Result<Self, String> {
        let trimmed = header.trim();
        let date = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
            .or_else(|_| NaiveDate::parse_from_str(&format!("{trimmed}-01"), "%Y-%m-%d"))
            .map_err(|_| format!("'{trimmed}' is not a YYYY-MM-DD or YYYY-MM date"))?;

        let year = trimmed
            .get(0..4)
            .filter(|prefix| prefix.bytes().all(|b| b.is_ascii_digit()))
            .and_then(|prefix| prefix.parse::<i32>().ok())
            .ok_or_else(|| format!("'{trimmed}' does not start with a four digit year"))?;

        Ok(Self {
            header: trimmed.to_string(),
            year,
            date,
        })
    }
}

/// One row of a wide county export as it appears on disk.
#[derive(Debug, Clone)]
pub struct RawRecord {
    pub line_index: usize,
    pub region_id: i64,
    pub size_rank: i64,
    pub region_name: String,
    pub region_type: String,
    pub state_name: String,
    pub state: String,
    pub metro: Option<String>,
    pub state_code_fips: u32,
    pub municipal_code_fips: u32,
    pub values: Vec<Option<f64>>,
}

#[derive(Debug, Clone)]
pub struct RawTable {
    pub months: Vec<MonthColumn>,
    pub records: Vec<RawRecord>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedRegion {
    pub region_id: RegionId,
    pub region_name: String,
    pub state_name: String,
    pub values: Vec<Option<f64>>,
}

/// Wide table reduced to the columns the reshape transforms consume.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedTable {
    pub months: Vec<MonthColumn>,
    pub regions: Vec<ExtractedRegion>,
}

impl ExtractedTable {
    pub fn month_count(&self) -> usize {
        self.months.len()
    }

    pub fn region_count(&self) -> usize {
        self.regions.len()
    }
}
