use std::sync::Arc;

use tsdata::HistoryProvider;

#[must_use]
pub fn get_provider() -> Arc<dyn HistoryProvider> {
    if std::env::var("TSDATA_EXAMPLES_USE_MOCK").is_ok() {
        println!("--- (Using Mock Connector for CI) ---");
        return Arc::new(tsdata_mock::MockConnector::new());
    }
    match tsdata_yfinance::YfConnector::new_default() {
        Ok(yf) => Arc::new(yf),
        Err(e) => {
            eprintln!("yahoo connector unavailable ({e}); falling back to mock data");
            Arc::new(tsdata_mock::MockConnector::new())
        }
    }
}
