// Shared fixtures for facade tests: `use helpers::*;`
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tsdata::{
    AssetKind, FetchConfig, HistoryProvider, HistoryRequest, HistoryResponse, Instrument,
    Interval, TsData, TsDataError,
};
use tsdata_mock::MockConnector;

pub const AAPL: &str = "AAPL";
pub const MSFT: &str = "MSFT";
pub const TSLA: &str = "TSLA";
/// Daily bars stamped at the Sydney open, 23:00 UTC the previous day.
pub const ASX: &str = "BHP.AX";

/// Covers every daily fixture row.
pub const START: &str = "2023-01-01";
pub const END: &str = "2023-01-11";

/// `TsData` over the fixture connector with default settings.
pub fn mock_tsdata() -> TsData {
    TsData::builder()
        .with_provider(Arc::new(MockConnector::new()))
        .build()
        .unwrap()
}

/// `TsData` over the fixture connector with custom settings.
pub fn mock_tsdata_with(cfg: FetchConfig) -> TsData {
    TsData::builder()
        .with_provider(Arc::new(MockConnector::new()))
        .config(cfg)
        .build()
        .unwrap()
}

/// Provider that records every call and forwards to the fixture connector.
#[derive(Default)]
pub struct RecordingProvider {
    inner: MockConnector,
    pub calls: Mutex<Vec<(String, HistoryRequest)>>,
}

#[async_trait]
impl HistoryProvider for RecordingProvider {
    fn name(&self) -> &'static str {
        "recording"
    }

    async fn history(
        &self,
        instrument: &Instrument,
        req: HistoryRequest,
    ) -> Result<HistoryResponse, TsDataError> {
        self.calls
            .lock()
            .unwrap()
            .push((instrument.symbol_str().to_string(), req.clone()));
        self.inner.history(instrument, req).await
    }

    fn supported_history_intervals(&self, kind: AssetKind) -> &'static [Interval] {
        self.inner.supported_history_intervals(kind)
    }
}
