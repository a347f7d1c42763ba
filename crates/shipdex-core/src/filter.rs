//! Manufacturer filter over the frozen starship collection.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use crate::model::Starship;

/// Selector value meaning "no filter".
pub const ALL: &str = "All";

/// Value of the manufacturer selector.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ManufacturerSelector {
    #[default]
    All,
    /// Keep ships whose manufacturer field contains this text.
    Named(String),
}

impl FromStr for ManufacturerSelector {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(if s == ALL {
            ManufacturerSelector::All
        } else {
            ManufacturerSelector::Named(s.to_string())
        })
    }
}

impl fmt::Display for ManufacturerSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ManufacturerSelector::All => f.write_str(ALL),
            ManufacturerSelector::Named(name) => f.write_str(name),
        }
    }
}

impl ManufacturerSelector {
    pub fn matches(&self, ship: &Starship) -> bool {
        match self {
            ManufacturerSelector::All => true,
            ManufacturerSelector::Named(name) => ship.manufacturer().contains(name.as_str()),
        }
    }
}

/// Ships selected by `selector`, in input order.
///
/// Always pass the full collection: results of earlier selections are never
/// narrowed further.
pub fn filter_ships<'a>(ships: &'a [Starship], selector: &ManufacturerSelector) -> Vec<&'a Starship> {
    ships.iter().filter(|s| selector.matches(s)).collect()
}
