#![cfg(feature = "test-adapters")]

use std::sync::Arc;

use tsdata_core::{
    AssetKind, HistoryProvider, HistoryRequest, Instrument, Interval, Range, TsDataError,
};
use tsdata_yfinance::{YfConnector, adapter};

struct Combo {
    h: Arc<dyn adapter::YfHistory>,
}
impl adapter::CloneArcAdapters for Combo {
    fn clone_arc_history(&self) -> Arc<dyn adapter::YfHistory> {
        self.h.clone()
    }
}

async fn history_err(symbol: &str, err: TsDataError) -> TsDataError {
    let hist = <dyn adapter::YfHistory>::from_fn(move |_symbol, _req| Err(err.clone()));
    let yf = YfConnector::from_adapter(&Combo { h: hist });
    let inst = Instrument::from_symbol(symbol, AssetKind::Equity).expect("valid test instrument");
    let req = HistoryRequest::try_from_range(Range::D5, Interval::D1).unwrap();
    yf.history(&inst, req).await.unwrap_err()
}

#[tokio::test]
async fn connector_other_error_preserves_connector_name() {
    let err = history_err("AAPL", TsDataError::Other("some http error".to_string())).await;
    match err {
        TsDataError::Connector { connector, msg } => {
            assert_eq!(connector, "tsdata-yfinance");
            assert_eq!(msg, "some http error");
        }
        other => panic!("expected connector error, got {other:?}"),
    }
}

#[tokio::test]
async fn not_found_message_maps_to_not_found() {
    let err = history_err(
        "ZZZ",
        TsDataError::Connector {
            connector: "tsdata-yfinance".into(),
            msg: "Not Found".into(),
        },
    )
    .await;
    match err {
        TsDataError::NotFound { what } => assert_eq!(what, "history for ZZZ"),
        other => panic!("expected not found, got {other:?}"),
    }
}

#[tokio::test]
async fn no_data_message_maps_to_not_found() {
    let err = history_err(
        "DELISTED",
        TsDataError::connector("tsdata-yfinance", "No data found, symbol may be delisted"),
    )
    .await;
    assert!(matches!(err, TsDataError::NotFound { .. }));
    assert!(!err.is_actionable());
}

#[tokio::test]
async fn rate_limited_preserves_connector() {
    let err = history_err("AAPL", TsDataError::connector("upstream", "rate limit")).await;
    match err {
        TsDataError::Connector { connector, .. } => assert_eq!(connector, "tsdata-yfinance"),
        other => panic!("expected connector error, got {other:?}"),
    }
}

#[tokio::test]
async fn typed_errors_pass_through() {
    let err = history_err("AAPL", TsDataError::InvalidArg("bad period".into())).await;
    assert_eq!(err, TsDataError::InvalidArg("bad period".into()));
}
