use std::sync::Arc;

use tsdata_core::{FetchConfig, GroupBy, HistoryProvider, Interval, TsDataError};

use crate::fetch::FetchBuilder;

/// Entry point: a history provider plus the settings every fetch starts from.
pub struct TsData {
    pub(crate) provider: Arc<dyn HistoryProvider>,
    pub(crate) cfg: FetchConfig,
}

/// Builder for constructing a [`TsData`] with custom configuration.
pub struct TsDataBuilder {
    provider: Option<Arc<dyn HistoryProvider>>,
    cfg: FetchConfig,
}

impl Default for TsDataBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TsDataBuilder {
    /// Create a new builder with default [`FetchConfig`] and no provider.
    #[must_use]
    pub fn new() -> Self {
        Self {
            provider: None,
            cfg: FetchConfig::default(),
        }
    }

    /// Set the history provider. A later call replaces an earlier one.
    #[must_use]
    pub fn with_provider(mut self, p: Arc<dyn HistoryProvider>) -> Self {
        self.provider = Some(p);
        self
    }

    /// Replace the whole fetch configuration.
    #[must_use]
    pub fn config(mut self, cfg: FetchConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Bar interval requested from the provider. Default `D1`.
    #[must_use]
    pub const fn interval(mut self, interval: Interval) -> Self {
        self.cfg.interval = interval;
        self
    }

    /// Report adjusted closes in `Close`; when off, add an `Adj Close`
    /// column next to the raw `Close`. Default `true`.
    #[must_use]
    pub const fn auto_adjust(mut self, yes: bool) -> Self {
        self.cfg.auto_adjust = yes;
        self
    }

    /// Add `Dividends` and `Stock Splits` columns. Default `false`.
    #[must_use]
    pub const fn include_actions(mut self, yes: bool) -> Self {
        self.cfg.include_actions = yes;
        self
    }

    /// Keep rows with missing values. Default `false`.
    #[must_use]
    pub const fn keepna(mut self, yes: bool) -> Self {
        self.cfg.keepna = yes;
        self
    }

    /// Column grouping of fetched datasets. Default [`GroupBy::Ticker`].
    #[must_use]
    pub const fn group_by(mut self, g: GroupBy) -> Self {
        self.cfg.group_by = g;
        self
    }

    /// Build the [`TsData`].
    ///
    /// # Errors
    /// Returns `InvalidArg` if no provider was set via [`Self::with_provider`].
    pub fn build(self) -> Result<TsData, TsDataError> {
        let provider = self.provider.ok_or_else(|| {
            TsDataError::InvalidArg(
                "no history provider registered; add one via with_provider(...)".to_string(),
            )
        })?;
        Ok(TsData {
            provider,
            cfg: self.cfg,
        })
    }
}

impl TsData {
    /// Start building a new `TsData`.
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    /// use tsdata::{TsData, GroupBy};
    /// use tsdata_mock::MockConnector;
    ///
    /// let ts = TsData::builder()
    ///     .with_provider(Arc::new(MockConnector::new()))
    ///     .group_by(GroupBy::Column)
    ///     .build()?;
    /// ```
    #[must_use]
    pub fn builder() -> TsDataBuilder {
        TsDataBuilder::new()
    }

    /// `TsData` backed by Yahoo Finance with default settings.
    ///
    /// # Errors
    /// Returns `TsDataError::Other` if the HTTP client cannot be initialized.
    #[cfg(feature = "yfinance")]
    pub fn yahoo() -> Result<Self, TsDataError> {
        let yf = tsdata_yfinance::YfConnector::new_default()?;
        Self::builder().with_provider(Arc::new(yf)).build()
    }

    /// Settings fetches start from.
    #[must_use]
    pub const fn config(&self) -> &FetchConfig {
        &self.cfg
    }

    /// Name of the underlying provider.
    #[must_use]
    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// Begin building a price download.
    ///
    /// Typical usage: chain `tickers`/`period` (and optionally `save_to`) then
    /// call `run()` or `run_blocking()`.
    #[must_use]
    pub fn fetch(&self) -> FetchBuilder<'_> {
        FetchBuilder::new(self)
    }
}
