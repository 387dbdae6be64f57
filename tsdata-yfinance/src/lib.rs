//! tsdata-yfinance
//!
//! History connector for `tsdata` built on the `yfinance-rs` client library.
//! Implements [`HistoryProvider`] by translating requests to Yahoo's chart
//! endpoint and normalizing errors into `TsDataError`.
#![warn(missing_docs)]

/// Adapter definitions and the production adapter backed by `yfinance-rs`.
pub mod adapter;

use std::sync::Arc;

#[cfg(feature = "test-adapters")]
use adapter::CloneArcAdapters;
use adapter::{RealAdapter, YfHistory};
use async_trait::async_trait;
use tsdata_core::{
    AssetKind, HistoryProvider, HistoryRequest, HistoryResponse, Instrument, Interval, TsDataError,
};

/// Name attached to every error this connector produces.
pub const CONNECTOR_NAME: &str = "tsdata-yfinance";

#[cfg(feature = "test-adapters")]
type HistoryAdapter = Arc<dyn YfHistory>;
#[cfg(not(feature = "test-adapters"))]
type HistoryAdapter = Arc<RealAdapter>;

const YF_INTERVALS: &[Interval] = &[
    Interval::I1m,
    Interval::I2m,
    Interval::I5m,
    Interval::I15m,
    Interval::I30m,
    Interval::I1h,
    Interval::I90m,
    Interval::D1,
    Interval::D5,
    Interval::W1,
    Interval::M1,
    Interval::M3,
];

/// Public connector type. Production users will construct with `YfConnector::new_default()`.
pub struct YfConnector {
    history: HistoryAdapter,
}

impl YfConnector {
    fn looks_like_not_found(msg: &str) -> bool {
        let m = msg.to_ascii_lowercase();
        m.contains("not found") || m.contains("no data") || m.contains("no matches")
    }

    fn normalize_error(e: TsDataError, what: &str) -> TsDataError {
        match e {
            TsDataError::Connector { connector: _, msg } => {
                if Self::looks_like_not_found(&msg) {
                    TsDataError::not_found(what.to_string())
                } else {
                    TsDataError::connector(CONNECTOR_NAME, msg)
                }
            }
            TsDataError::Other(msg) => TsDataError::connector(CONNECTOR_NAME, msg),
            other => other,
        }
    }

    /// Build with a fresh `yfinance_rs::YfClient` inside.
    ///
    /// # Errors
    /// Returns `TsDataError::Other` if the HTTP stack cannot be initialized.
    pub fn new_default() -> Result<Self, TsDataError> {
        let a = RealAdapter::try_new_default()?;
        Ok(Self::from_adapter(&a))
    }

    /// Build from an existing `yfinance_rs::YfClient`.
    #[must_use]
    pub fn new_with_client(client: yfinance_rs::YfClient) -> Self {
        let a = RealAdapter::new(client);
        Self::from_adapter(&a)
    }

    /// Build from a provided `reqwest::Client` by constructing a `yfinance_rs::YfClient`.
    ///
    /// Note: The provided client should enable a cookie store for yfinance auth/crumb flow.
    ///
    /// # Errors
    /// Returns an error if the internal `YfClient` cannot be constructed from the provided HTTP client.
    pub fn try_new_with_reqwest_client(http: reqwest::Client) -> Result<Self, TsDataError> {
        let a = RealAdapter::try_with_http(http)?;
        Ok(Self::from_adapter(&a))
    }

    /// For tests/injection (requires the `test-adapters` feature).
    ///
    /// Accepts a borrowed adapter to avoid unnecessary moves.
    #[cfg(feature = "test-adapters")]
    pub fn from_adapter<A: CloneArcAdapters + 'static>(adapter: &A) -> Self {
        Self {
            history: adapter.clone_arc_history(),
        }
    }

    #[cfg(not(feature = "test-adapters"))]
    /// Build from a concrete `RealAdapter` by cloning it into a shared handle.
    pub fn from_adapter(adapter: &RealAdapter) -> Self {
        Self {
            history: Arc::new(adapter.clone()),
        }
    }
}

#[async_trait]
impl HistoryProvider for YfConnector {
    fn name(&self) -> &'static str {
        CONNECTOR_NAME
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            target = "tsdata::yfinance",
            name = "tsdata_yfinance::history",
            skip(self, instrument, req),
            fields(symbol = %instrument.symbol(), interval = ?req.interval()),
        )
    )]
    async fn history(
        &self,
        instrument: &Instrument,
        req: HistoryRequest,
    ) -> Result<HistoryResponse, TsDataError> {
        let yf_req = yfinance_rs::core::services::HistoryRequest {
            range: req.range(),
            period: req.period().map(|(s, e)| (s.timestamp(), e.timestamp())),
            interval: req.interval(),
            include_prepost: req.include_prepost(),
            include_actions: req.include_actions(),
            auto_adjust: req.auto_adjust(),
            keepna: req.keepna(),
        };
        let symbol = instrument.symbol_str();
        self.history
            .fetch_full(symbol, yf_req)
            .await
            .map_err(|e| Self::normalize_error(e, &format!("history for {symbol}")))
    }

    fn supported_history_intervals(&self, _kind: AssetKind) -> &'static [Interval] {
        YF_INTERVALS
    }
}
