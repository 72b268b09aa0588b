use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::path::Path;

use geojson::feature::Id;
use geojson::GeoJson;
use homevalue_parser::RegionId;

use crate::error::{PipelineError, Result};

/// Region codes present in the county boundary file the map joins against.
#[derive(Debug, Clone, Default)]
pub struct BoundaryIndex {
    ids: HashSet<String>,
    unidentified: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverageReport {
    pub matched: usize,
    pub missing: Vec<RegionId>,
}

impl CoverageReport {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

impl BoundaryIndex {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| PipelineError::Input {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_geojson_str(&content)
    }

    pub fn from_geojson_str(content: &str) -> Result<Self> {
        let geojson = content.parse::<GeoJson>()?;
        let GeoJson::FeatureCollection(collection) = geojson else {
            return Err(PipelineError::NotFeatureCollection);
        };

        let mut index = BoundaryIndex::default();
        for feature in &collection.features {
            match &feature.id {
                Some(Id::String(text)) => {
                    index.ids.insert(text.trim().to_string());
                }
                // Numeric ids lose their leading zeros.
                Some(Id::Number(number)) => match number.as_u64() {
                    Some(value) => {
                        index.ids.insert(format!("{value:0width$}", width = RegionId::LEN));
                    }
                    None => index.unidentified += 1,
                },
                None => index.unidentified += 1,
            }
        }
        Ok(index)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Features without a usable id; they can never be joined.
    pub fn unidentified(&self) -> usize {
        self.unidentified
    }

    pub fn contains(&self, region: &RegionId) -> bool {
        self.ids.contains(region.as_str())
    }

    pub fn coverage<'a>(&self, regions: impl IntoIterator<Item = &'a RegionId>) -> CoverageReport {
        let distinct: BTreeSet<&RegionId> = regions.into_iter().collect();
        let mut matched = 0;
        let mut missing = Vec::new();
        for region in distinct {
            if self.contains(region) {
                matched += 1;
            } else {
                missing.push(region.clone());
            }
        }
        CoverageReport { matched, missing }
    }
}
