use std::collections::HashSet;

use crate::errors::ParserError;
use crate::model::MonthColumn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentifierColumn {
    RegionId,
    SizeRank,
    RegionName,
    RegionType,
    StateName,
    State,
    Metro,
    StateCodeFips,
    MunicipalCodeFips,
}

impl IdentifierColumn {
    pub const ALL: [IdentifierColumn; 9] = [
        IdentifierColumn::RegionId,
        IdentifierColumn::SizeRank,
        IdentifierColumn::RegionName,
        IdentifierColumn::RegionType,
        IdentifierColumn::StateName,
        IdentifierColumn::State,
        IdentifierColumn::Metro,
        IdentifierColumn::StateCodeFips,
        IdentifierColumn::MunicipalCodeFips,
    ];

    pub fn canonical_name(&self) -> &'static str {
        match self {
            IdentifierColumn::RegionId => "RegionID",
            IdentifierColumn::SizeRank => "SizeRank",
            IdentifierColumn::RegionName => "RegionName",
            IdentifierColumn::RegionType => "RegionType",
            IdentifierColumn::StateName => "StateName",
            IdentifierColumn::State => "State",
            IdentifierColumn::Metro => "Metro",
            IdentifierColumn::StateCodeFips => "StateCodeFIPS",
            IdentifierColumn::MunicipalCodeFips => "MunicipalCodeFIPS",
        }
    }

    fn from_header(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|column| column.canonical_name() == name)
    }
}

#[derive(Debug, Clone)]
pub enum ColumnRole {
    Identifier(IdentifierColumn),
    Month(MonthColumn),
}

/// Positions of every header column, resolved once per file.
#[derive(Debug, Clone)]
pub struct ColumnLayout {
    pub roles: Vec<ColumnRole>,
    identifiers: [usize; 9],
}

impl ColumnLayout {
    pub fn index_of(&self, column: IdentifierColumn) -> usize {
        self.identifiers[column as usize]
    }

    pub fn months(&self) -> Vec<MonthColumn> {
        self.roles
            .iter()
            .filter_map(|role| match role {
                ColumnRole::Month(month) => Some(month.clone()),
                ColumnRole::Identifier(_) => None,
            })
            .collect()
    }
}

pub fn classify_columns(header: &csv::StringRecord) -> Result<ColumnLayout, ParserError> {
    let mut roles = Vec::with_capacity(header.len());
    let mut identifiers: [Option<usize>; 9] = [None; 9];
    let mut seen_months: HashSet<&str> = HashSet::new();

    for (index, raw) in header.iter().enumerate() {
        let name = raw.trim();
        if let Some(column) = IdentifierColumn::from_header(name) {
            let slot = &mut identifiers[column as usize];
            if slot.is_some() {
                return Err(ParserError::DuplicateColumn {
                    column: name.to_string(),
                });
            }
            *slot = Some(index);
            roles.push(ColumnRole::Identifier(column));
            continue;
        }

        let month = MonthColumn::parse(name).map_err(|reason| ParserError::UnrecognizedColumn {
            index,
            column: name.to_string(),
            reason,
        })?;
        if !seen_months.insert(name) {
            return Err(ParserError::DuplicateColumn {
                column: name.to_string(),
            });
        }
        roles.push(ColumnRole::Month(month));
    }

    let mut resolved = [0usize; 9];
    for column in IdentifierColumn::ALL {
        resolved[column as usize] = identifiers[column as usize].ok_or(
            ParserError::MissingColumn {
                column: column.canonical_name(),
            },
        )?;
    }

    Ok(ColumnLayout {
        roles,
        identifiers: resolved,
    })
}
