use async_trait::async_trait;

use crate::TsDataError;
use paft::domain::{AssetKind, Instrument};
use paft::market::requests::history::{HistoryRequest, Interval};
use paft::market::responses::history::HistoryResponse;

/// Role trait for connectors that provide OHLCV history.
#[async_trait]
pub trait HistoryProvider: Send + Sync {
    /// Stable connector name used to tag errors (e.g. "tsdata-yfinance").
    fn name(&self) -> &'static str;

    /// Fetch OHLCV history for the given instrument and request.
    async fn history(
        &self,
        instrument: &Instrument,
        req: HistoryRequest,
    ) -> Result<HistoryResponse, TsDataError>;

    /// REQUIRED: exact intervals this connector can natively serve for history.
    ///
    /// Parameters:
    /// - `kind`: asset kind to consider (some providers vary by kind).
    ///
    /// Returns the static slice of supported `Interval`s.
    fn supported_history_intervals(&self, kind: AssetKind) -> &'static [Interval];
}
