use std::collections::BTreeMap;

use homevalue_parser::{ExtractedTable, RegionId};

use crate::types::{ChoroplethRow, SizeLabel, YearRange};

type GroupKey = (RegionId, String, String, i32);

#[derive(Debug, Default, Clone, Copy)]
struct MeanAccumulator {
    sum: f64,
    count: usize,
}

impl MeanAccumulator {
    fn push(&mut self, value: Option<f64>) {
        if let Some(value) = value {
            self.sum += value;
            self.count += 1;
        }
    }

    fn mean(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }
}

/// Averages every month of a year into one value per region.
///
/// Groups are keyed by (region, name, state, year) and emitted in that key
/// order. The year filter runs on the finished groups, so it only drops whole
/// years and never changes which months feed a kept year. Empty cells are
/// skipped when averaging; a year with no observations keeps its row with no
/// value. The mean is rounded once, half to even.
pub fn aggregate_choropleth(
    table: &ExtractedTable,
    size: SizeLabel,
    years: YearRange,
) -> Vec<ChoroplethRow> {
    let mut groups: BTreeMap<GroupKey, MeanAccumulator> = BTreeMap::new();

    for (month_idx, month) in table.months.iter().enumerate() {
        for region in &table.regions {
            let key = (
                region.region_id.clone(),
                region.region_name.clone(),
                region.state_name.clone(),
                month.year,
            );
            let value = region.values.get(month_idx).copied().flatten();
            groups.entry(key).or_default().push(value);
        }
    }

    groups
        .into_iter()
        .filter(|((_, _, _, year), _)| years.contains(*year))
        .map(
            |((region_id, region_name, state_name, year), acc)| ChoroplethRow {
                region_id,
                region_name,
                state_name,
                year,
                average_value: acc.mean().map(|mean| mean.round_ties_even() as i64),
                size,
            },
        )
        .collect()
}
