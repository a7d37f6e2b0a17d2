//! Variable groups of a daily hydrological table.
//!
//! Each column belongs to a group determined by the first character of its
//! name. The group fixes how its columns are aggregated into periods and what
//! part they play in the training matrix.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::aggregate::Aggregation;
use super::table::DatedTable;
use crate::error::Result;

/// Part a variable group plays in the training matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GroupRole {
    /// Aggregated without lagging, forms the label
    Target,
    /// Aggregated per period then lag-expanded
    Driver,
    /// Recognized but never emitted
    Inert,
}

/// Semantic group of a daily variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum VariableGroup {
    /// Runoff / discharge (Q)
    Runoff,
    /// Temperature (T)
    Temperature,
    /// Precipitation (P)
    Precipitation,
    /// Evapotranspiration (E)
    Evapotranspiration,
    /// Snow water equivalent (S)
    Snow,
    /// Run (R), inert: classified but never emitted
    Run,
}

impl VariableGroup {
    pub const ALL: [VariableGroup; 6] = [
        VariableGroup::Runoff,
        VariableGroup::Temperature,
        VariableGroup::Precipitation,
        VariableGroup::Evapotranspiration,
        VariableGroup::Snow,
        VariableGroup::Run,
    ];

    /// Driver groups in the order their blocks appear in the training matrix
    pub const DRIVERS: [VariableGroup; 4] = [
        VariableGroup::Temperature,
        VariableGroup::Snow,
        VariableGroup::Precipitation,
        VariableGroup::Evapotranspiration,
    ];

    /// Leading character of member column names
    pub fn prefix(self) -> char {
        match self {
            VariableGroup::Runoff => 'Q',
            VariableGroup::Temperature => 'T',
            VariableGroup::Precipitation => 'P',
            VariableGroup::Evapotranspiration => 'E',
            VariableGroup::Snow => 'S',
            VariableGroup::Run => 'R',
        }
    }

    /// Statistic used to fold a period of daily values
    pub fn aggregation(self) -> Aggregation {
        match self {
            VariableGroup::Precipitation | VariableGroup::Evapotranspiration => Aggregation::Sum,
            VariableGroup::Runoff
            | VariableGroup::Temperature
            | VariableGroup::Snow
            | VariableGroup::Run => Aggregation::Mean,
        }
    }

    pub fn role(self) -> GroupRole {
        match self {
            VariableGroup::Runoff => GroupRole::Target,
            VariableGroup::Run => GroupRole::Inert,
            _ => GroupRole::Driver,
        }
    }

    /// Whether member columns are lag-expanded
    pub fn is_lagged(self) -> bool {
        self.role() == GroupRole::Driver
    }

    /// Classify a column by the first character of its name
    pub fn classify(column_name: &str) -> Option<VariableGroup> {
        let first = column_name.chars().next()?;
        Self::ALL.into_iter().find(|g| g.prefix() == first)
    }
}

impl fmt::Display for VariableGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VariableGroup::Runoff => write!(f, "runoff"),
            VariableGroup::Temperature => write!(f, "temperature"),
            VariableGroup::Precipitation => write!(f, "precipitation"),
            VariableGroup::Evapotranspiration => write!(f, "evapotranspiration"),
            VariableGroup::Snow => write!(f, "snow"),
            VariableGroup::Run => write!(f, "run"),
        }
    }
}

/// Columns of a daily table partitioned by variable group.
///
/// Groups without any member column have no entry.
#[derive(Debug, Clone, Default)]
pub struct GroupedColumns {
    groups: BTreeMap<VariableGroup, DatedTable>,
}

impl GroupedColumns {
    /// Partition the columns of `table`. Unclassified columns are dropped.
    pub fn partition(table: &DatedTable) -> Result<Self> {
        let mut members: BTreeMap<VariableGroup, Vec<&str>> = BTreeMap::new();
        for name in table.column_names() {
            if let Some(group) = VariableGroup::classify(name) {
                members.entry(group).or_default().push(name);
            }
        }

        let groups = members
            .into_iter()
            .map(|(group, names)| -> Result<(VariableGroup, DatedTable)> {
                Ok((group, table.select(&names)?))
            })
            .collect::<Result<BTreeMap<_, _>>>()?;
        Ok(Self { groups })
    }

    pub fn get(&self, group: VariableGroup) -> Option<&DatedTable> {
        self.groups.get(&group)
    }

    /// All driver columns in training-matrix order, sharing the source index.
    ///
    /// `None` when the table has no driver column at all.
    pub fn driver_table(&self) -> Result<Option<DatedTable>> {
        let drivers: Vec<&DatedTable> = VariableGroup::DRIVERS
            .iter()
            .filter_map(|g| self.get(*g))
            .collect();
        if drivers.is_empty() {
            return Ok(None);
        }
        DatedTable::concat(drivers).map(Some)
    }
}
