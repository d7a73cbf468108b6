use crate::domain::market::Market;
use anyhow::ensure;
use serde::Serialize;
use std::collections::BTreeSet;

/// Normalized payload of the analyze call.
///
/// Only constructible through [`SearchRequest::try_new`], so `keywords` and `markets` are never
/// empty and no keyword carries surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchRequest {
    keywords: Vec<String>,
    markets: BTreeSet<Market>,
}

impl SearchRequest {
    pub fn try_new(
        keywords: impl IntoIterator<Item = String>,
        markets: impl IntoIterator<Item = Market>,
    ) -> anyhow::Result<Self> {
        let keywords: Vec<String> = keywords
            .into_iter()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .collect();
        ensure!(!keywords.is_empty(), "at least one keyword is required");

        let markets: BTreeSet<Market> = markets.into_iter().collect();
        ensure!(!markets.is_empty(), "at least one market is required");

        Ok(Self { keywords, markets })
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn markets(&self) -> &BTreeSet<Market> {
        &self.markets
    }
}
