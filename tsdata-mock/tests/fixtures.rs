use tsdata_core::{
    AssetKind, HistoryProvider, HistoryRequest, HistoryRequestBuilder, Instrument, Interval, Range, TsDataError,
};
use tsdata_mock::MockConnector;

fn inst(s: &str) -> Instrument {
    Instrument::from_symbol(s, AssetKind::Equity).expect("valid symbol")
}

fn daily() -> HistoryRequest {
    HistoryRequest::try_from_range(Range::M1, Interval::D1).unwrap()
}

#[tokio::test]
async fn known_symbol_has_sorted_daily_bars() {
    let resp = MockConnector::new()
        .history(&inst("AAPL"), daily())
        .await
        .unwrap();
    assert_eq!(resp.candles.len(), 6);
    assert!(resp.candles.windows(2).all(|w| w[0].ts < w[1].ts));
    assert_eq!(resp.candles[0].volume, Some(112_117_500));
}

#[tokio::test]
async fn hourly_bars_are_served_separately() {
    let req = HistoryRequest::try_from_range(Range::D1, Interval::I1h).unwrap();
    let resp = MockConnector::new().history(&inst("MSFT"), req).await.unwrap();
    assert_eq!(resp.candles.len(), 3);
}

#[tokio::test]
async fn special_symbols() {
    let mock = MockConnector::new();

    let empty = mock.history(&inst("EMPTY"), daily()).await.unwrap();
    assert!(empty.candles.is_empty());

    let fail = mock.history(&inst("FAIL"), daily()).await.unwrap_err();
    assert!(matches!(fail, TsDataError::Connector { ref connector, .. } if connector == "tsdata-mock"));

    let missing = mock.history(&inst("NOPE"), daily()).await.unwrap_err();
    assert!(matches!(missing, TsDataError::NotFound { .. }));
}

#[tokio::test]
async fn adjusted_msft_keeps_raw_close_and_reports_dividend() {
    let req = HistoryRequestBuilder::default()
        .range(Range::M1)
        .interval(Interval::D1)
        .auto_adjust(true)
        .include_actions(true)
        .build()
        .unwrap();
    let resp = MockConnector::new().history(&inst("MSFT"), req).await.unwrap();
    assert!(resp.adjusted);
    assert_eq!(resp.actions.len(), 1);

    let first = &resp.candles[0];
    assert_eq!(first.close.amount().to_string(), "238.90");
    assert_eq!(first.close_unadj.as_ref().unwrap().amount().to_string(), "239.58");
    let last = resp.candles.last().unwrap();
    assert_eq!(last.close.amount().to_string(), "228.85");
}

#[tokio::test]
async fn asx_fixture_carries_exchange_meta() {
    let resp = MockConnector::new()
        .history(&inst("BHP.AX"), daily())
        .await
        .unwrap();
    let meta = resp.meta.expect("exchange meta");
    assert_eq!(meta.timezone, Some(chrono_tz::Australia::Sydney));
    assert_eq!(resp.candles[0].ts.to_rfc3339(), "2023-01-02T23:00:00+00:00");
}
