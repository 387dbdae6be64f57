#[cfg(feature = "test-adapters")]
use std::sync::Arc;

use async_trait::async_trait;

use tsdata_core::TsDataError;
use yf::core::HistoryService;
use yfinance_rs as yf;

use crate::CONNECTOR_NAME;

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36";

/// History abstraction (so we can inject mocks in tests).
#[async_trait]
pub trait YfHistory: Send + Sync {
    /// Fetch full history for a symbol using a provider-specific request.
    async fn fetch_full(
        &self,
        symbol: &str,
        req: yf::core::services::HistoryRequest,
    ) -> Result<yf::HistoryResponse, TsDataError>;
}

/// Real adapter backed by a single `YfClient` instance.
/// `YfClient` is `Clone + Send + Sync`, so no external locking is needed.
#[derive(Clone)]
pub struct RealAdapter {
    client: yf::YfClient,
}

impl RealAdapter {
    /// Build a `YfClient` on a cookie-enabled HTTP client with a browser user agent.
    ///
    /// # Errors
    /// Returns `TsDataError::Other` if the HTTP client or the `YfClient` cannot be built.
    pub fn try_new_default() -> Result<Self, TsDataError> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .no_proxy()
            .build()
            .map_err(|e| TsDataError::Other(format!("http client: {e}")))?;
        Self::try_with_http(http)
    }

    /// Build a `YfClient` on top of a caller-provided HTTP client.
    ///
    /// The client should keep a cookie store for the Yahoo auth/crumb flow.
    ///
    /// # Errors
    /// Returns `TsDataError::Other` if the `YfClient` cannot be built.
    pub fn try_with_http(http: reqwest::Client) -> Result<Self, TsDataError> {
        let client = yf::YfClient::builder()
            .custom_client(http)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| TsDataError::Other(e.to_string()))?;
        Ok(Self { client })
    }

    /// Wrap an existing `YfClient`.
    #[must_use]
    pub const fn new(client: yf::YfClient) -> Self {
        Self { client }
    }
}

fn map_yf_err(e: &yf::YfError, context: &str) -> TsDataError {
    match e {
        yf::YfError::NotFound { .. } => TsDataError::not_found(context.to_string()),
        yf::YfError::RateLimited { .. } => {
            TsDataError::connector(CONNECTOR_NAME, format!("rate limit: {context}"))
        }
        yf::YfError::ServerError { status, .. } => {
            TsDataError::connector(CONNECTOR_NAME, format!("server error {status}: {context}"))
        }
        yf::YfError::Status { status, .. } => {
            TsDataError::connector(CONNECTOR_NAME, format!("status {status}: {context}"))
        }
        other => TsDataError::connector(CONNECTOR_NAME, other.to_string()),
    }
}

#[async_trait]
impl YfHistory for RealAdapter {
    async fn fetch_full(
        &self,
        symbol: &str,
        req: yf::core::services::HistoryRequest,
    ) -> Result<yf::HistoryResponse, TsDataError> {
        self.client
            .fetch_full_history(symbol, req)
            .await
            .map_err(|e| map_yf_err(&e, &format!("history for {symbol}")))
    }
}

#[cfg(feature = "test-adapters")]
impl dyn YfHistory {
    /// Build a `YfHistory` from a closure (tests only).
    pub fn from_fn<F>(f: F) -> Arc<dyn YfHistory>
    where
        F: Send
            + Sync
            + 'static
            + Fn(
                String,
                yf::core::services::HistoryRequest,
            ) -> Result<yf::HistoryResponse, TsDataError>,
    {
        struct FnHist<F>(F);
        #[async_trait]
        impl<F> YfHistory for FnHist<F>
        where
            F: Send
                + Sync
                + 'static
                + Fn(
                    String,
                    yf::core::services::HistoryRequest,
                ) -> Result<yf::HistoryResponse, TsDataError>,
        {
            async fn fetch_full(
                &self,
                symbol: &str,
                req: yf::core::services::HistoryRequest,
            ) -> Result<yf::HistoryResponse, TsDataError> {
                (self.0)(symbol.to_string(), req)
            }
        }
        Arc::new(FnHist(f))
    }
}

/// Produces the shared adapter handles a connector is assembled from (tests only).
#[cfg(feature = "test-adapters")]
pub trait CloneArcAdapters {
    /// Clone as `Arc<dyn YfHistory>`.
    fn clone_arc_history(&self) -> Arc<dyn YfHistory> {
        <dyn YfHistory>::from_fn(|_, _| Err(TsDataError::unsupported("history")))
    }
}

#[cfg(feature = "test-adapters")]
impl CloneArcAdapters for RealAdapter {
    fn clone_arc_history(&self) -> Arc<dyn YfHistory> {
        Arc::new(self.clone()) as Arc<dyn YfHistory>
    }
}
