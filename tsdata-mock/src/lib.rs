//! Deterministic history connector for tests and demos.
//!
//! Symbols with fixtures: `AAPL`, `MSFT`, `GOOG`, `TSLA`, `BHP.AX` (daily)
//! and `AAPL`, `MSFT` (hourly). Daily responses honor the request's
//! `auto_adjust` and `include_actions` flags. Special symbols:
//! - `EMPTY` returns a response with no candles;
//! - `FAIL` returns a connector error;
//! - anything else is `NotFound`.
use async_trait::async_trait;
use tsdata_core::{
    AssetKind, HistoryProvider, HistoryRequest, HistoryResponse, Instrument, Interval, TsDataError,
};

mod fixtures;

const NAME: &str = "tsdata-mock";

/// Mock connector for CI-safe examples. Provides deterministic data from static fixtures.
pub struct MockConnector;

impl Default for MockConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl MockConnector {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn not_found(what: &str) -> TsDataError {
        TsDataError::not_found(what.to_string())
    }

    fn maybe_fail(symbol: &str, capability: &'static str) -> Result<(), TsDataError> {
        match symbol {
            "FAIL" => Err(TsDataError::connector(
                NAME,
                format!("forced failure: {capability}"),
            )),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl HistoryProvider for MockConnector {
    fn name(&self) -> &'static str {
        NAME
    }

    async fn history(
        &self,
        instrument: &Instrument,
        req: HistoryRequest,
    ) -> Result<HistoryResponse, TsDataError> {
        let s = instrument.symbol_str();
        Self::maybe_fail(s, "history")?;
        let found = match req.interval() {
            Interval::D1 => {
                fixtures::history::daily(s, req.auto_adjust(), req.include_actions())
            }
            Interval::I1h => fixtures::history::hourly(s),
            other => return Err(TsDataError::unsupported(format!("history interval {other:?}"))),
        };
        found.ok_or_else(|| Self::not_found(&format!("history for {s}")))
    }

    fn supported_history_intervals(&self, _kind: AssetKind) -> &'static [Interval] {
        const MOCK_INTERVALS: &[Interval] = &[Interval::I1h, Interval::D1];
        MOCK_INTERVALS
    }
}
