//! Configuration types shared by the fetcher and connectors.

use paft::market::requests::history::Interval;
use serde::{Deserialize, Serialize};

/// Column layout of a multi-symbol price dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub enum GroupBy {
    /// Symbol-major: every field of the first symbol, then every field of the next.
    #[default]
    Ticker,
    /// Field-major: every symbol's `Open`, then every symbol's `High`, and so on.
    Column,
}

/// Settings applied to every fetch: the history request and the dataset columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Bar interval requested from the provider.
    pub interval: Interval,
    /// Report adjusted prices in `Close`. When off, `Close` holds the raw
    /// price and an `Adj Close` column is added.
    pub auto_adjust: bool,
    /// Add `Dividends` and `Stock Splits` columns from the provider's
    /// corporate actions.
    pub include_actions: bool,
    /// Keep rows the provider reports with missing values.
    pub keepna: bool,
    /// Column grouping of the assembled dataset.
    pub group_by: GroupBy,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            interval: Interval::D1,
            auto_adjust: true,
            include_actions: false,
            keepna: false,
            group_by: GroupBy::Ticker,
        }
    }
}
