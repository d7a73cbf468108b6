use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Market {
    #[serde(rename = "KRX")]
    Krx,
    #[serde(rename = "US")]
    Us,
}

impl Market {
    pub const ALL: [Market; 2] = [Market::Krx, Market::Us];

    pub fn as_str(self) -> &'static str {
        match self {
            Market::Krx => "KRX",
            Market::Us => "US",
        }
    }
}

impl fmt::Display for Market {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMarket(pub String);

impl fmt::Display for UnknownMarket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown market {:?} (expected KRX or US)", self.0)
    }
}

impl std::error::Error for UnknownMarket {}

impl FromStr for Market {
    type Err = UnknownMarket;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Market::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownMarket(s.to_string()))
    }
}

/// Checkbox state of the market selector. Every market starts checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketSelection {
    checked: BTreeMap<Market, bool>,
}

impl Default for MarketSelection {
    fn default() -> Self {
        Self {
            checked: Market::ALL.into_iter().map(|m| (m, true)).collect(),
        }
    }
}

impl MarketSelection {
    pub fn none() -> Self {
        Self {
            checked: Market::ALL.into_iter().map(|m| (m, false)).collect(),
        }
    }

    pub fn set(&mut self, market: Market, checked: bool) {
        self.checked.insert(market, checked);
    }

    pub fn toggle(&mut self, market: Market) {
        let entry = self.checked.entry(market).or_insert(false);
        *entry = !*entry;
    }

    pub fn is_checked(&self, market: Market) -> bool {
        self.checked.get(&market).copied().unwrap_or(false)
    }

    pub fn selected(&self) -> BTreeSet<Market> {
        self.checked
            .iter()
            .filter(|(_, checked)| **checked)
            .map(|(m, _)| *m)
            .collect()
    }
}

impl FromIterator<(Market, bool)> for MarketSelection {
    fn from_iter<I: IntoIterator<Item = (Market, bool)>>(iter: I) -> Self {
        let mut out = Self::none();
        for (market, checked) in iter {
            out.set(market, checked);
        }
        out
    }
}
