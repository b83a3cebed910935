use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::DomainError;

/// Closed set of swing labels, in one-hot column order.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Good,
    #[serde(alias = "over-the-top")]
    OverTheTop,
    #[serde(alias = "early-extension")]
    EarlyExtension,
    Casting,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Good,
        Category::OverTheTop,
        Category::EarlyExtension,
        Category::Casting,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Good => "good",
            Category::OverTheTop => "over_the_top",
            Category::EarlyExtension => "early_extension",
            Category::Casting => "casting",
        }
    }

    /// Hyphenated spelling used by older capture tooling, if it differs.
    pub fn legacy_name(&self) -> Option<&'static str> {
        match self {
            Category::OverTheTop => Some("over-the-top"),
            Category::EarlyExtension => Some("early-extension"),
            _ => None,
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Category::Good => 0,
            Category::OverTheTop => 1,
            Category::EarlyExtension => 2,
            Category::Casting => 3,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn one_hot(&self) -> [u8; 4] {
        let mut labels = [0; 4];
        labels[self.index()] = 1;
        labels
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == value || category.legacy_name() == Some(value))
            .ok_or_else(|| DomainError::validation(format!("unknown swing category '{}'", value)))
    }
}
