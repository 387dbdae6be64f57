use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta, Utc};
use tsdata_core::{
    AssetKind, GroupBy, HistoryMeta, HistoryRequest, HistoryRequestBuilder, HistoryResponse,
    Instrument, Interval, TsDataError, session_day,
};

use crate::TsData;
use crate::dataset::{Event, Field, PriceDataset, SymbolHistory};
use crate::tickers::Tickers;

/// Builder for one price download over a set of tickers.
///
/// Validation of tickers and dates is deferred to `run()`, so every input
/// problem surfaces as a logged `TsDataError` rather than at the call site.
pub struct FetchBuilder<'a> {
    tsdata: &'a TsData,
    tickers: Option<Result<Tickers, TsDataError>>,
    start: Option<String>,
    end: Option<String>,
    interval: Interval,
    group_by: GroupBy,
    save_to: Option<PathBuf>,
}

impl<'a> FetchBuilder<'a> {
    /// Create a new builder bound to a `TsData` instance, seeded from its config.
    #[must_use]
    pub fn new(tsdata: &'a TsData) -> Self {
        Self {
            tsdata,
            tickers: None,
            start: None,
            end: None,
            interval: tsdata.cfg.interval,
            group_by: tsdata.cfg.group_by,
            save_to: None,
        }
    }

    /// Set the symbols: a `&str`, a list of strings, or a JSON value.
    #[must_use]
    pub fn tickers<T>(mut self, symbols: T) -> Self
    where
        T: TryInto<Tickers, Error = TsDataError>,
    {
        self.tickers = Some(symbols.try_into());
        self
    }

    /// Set already-normalized symbols.
    #[must_use]
    pub fn with_tickers(mut self, tickers: Tickers) -> Self {
        self.tickers = Some(Ok(tickers));
        self
    }

    /// Set the `[start, end)` date range as `YYYY-MM-DD` strings.
    #[must_use]
    pub fn period(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.start = Some(start.into());
        self.end = Some(end.into());
        self
    }

    /// Override the configured bar interval for this download.
    #[must_use]
    pub const fn interval(mut self, interval: Interval) -> Self {
        self.interval = interval;
        self
    }

    /// Override the configured column grouping for this download.
    #[must_use]
    pub const fn group_by(mut self, g: GroupBy) -> Self {
        self.group_by = g;
        self
    }

    /// Also write the dataset as CSV to `path`.
    #[must_use]
    pub fn save_to(mut self, path: impl Into<PathBuf>) -> Self {
        self.save_to = Some(path.into());
        self
    }

    /// Execute the download.
    ///
    /// Behavior:
    /// - Fetches every symbol concurrently over `[start, end)`. Daily bars
    ///   are matched by their exchange-local trading day.
    /// - Symbols that fail while others succeed are reported in
    ///   [`PriceDataset::warnings`].
    /// - Every error is logged at `error` level before being returned.
    ///
    /// # Errors
    /// - `EmptyInput` / `InvalidType` for bad tickers, `InvalidArg` for bad dates.
    /// - `Unsupported` if the provider cannot serve the interval.
    /// - `NoData` if nothing was returned for any symbol in the range.
    /// - `AllProvidersFailed` if every symbol failed with a provider error.
    /// - `Io` if the CSV file cannot be written.
    pub async fn run(self) -> Result<PriceDataset, TsDataError> {
        let out = self.execute().await;
        if let Err(e) = &out {
            tracing::error!(target: "tsdata::fetch", error = %e, "an error occurred during download");
        }
        out
    }

    /// Run the download to completion on a private current-thread runtime.
    ///
    /// Inside an async runtime use [`Self::run`] instead; this call refuses
    /// to block there.
    ///
    /// # Errors
    /// Same as [`Self::run`], plus `Other` if called from within a tokio
    /// runtime or if the runtime cannot be created.
    pub fn run_blocking(self) -> Result<PriceDataset, TsDataError> {
        let fail = |msg: String| {
            let err = TsDataError::Other(msg);
            tracing::error!(target: "tsdata::fetch", error = %err, "an error occurred during download");
            err
        };
        if tokio::runtime::Handle::try_current().is_ok() {
            return Err(fail(
                "run_blocking called inside an async runtime; use run().await".into(),
            ));
        }
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| fail(format!("failed to start runtime: {e}")))?;
        rt.block_on(self.run())
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "tsdata::fetch::execute",
            skip(self),
            fields(provider = self.tsdata.provider.name(), interval = ?self.interval),
        )
    )]
    async fn execute(self) -> Result<PriceDataset, TsDataError> {
        let tickers = self
            .tickers
            .unwrap_or_else(|| Err(TsDataError::empty_input("tickers")))?;
        let (start_str, end_str) = self.start.zip(self.end).ok_or_else(|| {
            TsDataError::InvalidArg("missing date range; call period(start, end)".into())
        })?;
        let start = parse_day(&start_str, "start")?;
        let end = parse_day(&end_str, "end")?;

        let provider = &self.tsdata.provider;
        if !provider
            .supported_history_intervals(AssetKind::Equity)
            .contains(&self.interval)
        {
            return Err(TsDataError::unsupported(format!(
                "history interval {:?} on {}",
                self.interval,
                provider.name()
            )));
        }

        let cfg = &self.tsdata.cfg;
        let window = Window {
            start,
            end,
            intraday: is_intraday(self.interval),
        };
        let (req_start, req_end) = window.request_period();
        // raw closes travel in `close_unadj` of adjusted candles
        let req = HistoryRequestBuilder::default()
            .period(req_start, req_end)
            .interval(self.interval)
            .include_actions(cfg.include_actions)
            .auto_adjust(true)
            .keepna(cfg.keepna)
            .build()?;
        let instruments = tickers
            .iter()
            .map(|sym| {
                Instrument::from_symbol(sym, AssetKind::Equity)
                    .map_err(|e| TsDataError::InvalidArg(format!("invalid symbol {sym}: {e}")))
            })
            .collect::<Result<Vec<_>, _>>()?;

        tracing::info!(
            target: "tsdata::fetch",
            symbols = %tickers,
            start = %start_str,
            end = %end_str,
            "downloading price data for {tickers} from {start_str} to {end_str}"
        );

        let tasks = instruments.iter().map(|inst| {
            let req: HistoryRequest = req.clone();
            async move { provider.history(inst, req).await }
        });
        let joined = futures::future::join_all(tasks).await;

        let mut series: Vec<SymbolHistory> = Vec::new();
        let mut failures: Vec<TsDataError> = Vec::new();
        for (sym, result) in tickers.iter().zip(joined) {
            match result {
                Ok(resp) => {
                    let history = window.clip(sym, resp);
                    if history.candles.is_empty() {
                        failures.push(TsDataError::NoData {
                            symbols: vec![sym.clone()],
                        });
                    } else {
                        series.push(history);
                    }
                }
                Err(e) => failures.push(tag_err(provider.name(), e)),
            }
        }

        if series.is_empty() {
            return Err(collapse_failures(&tickers, failures));
        }
        for w in &failures {
            tracing::warn!(target: "tsdata::fetch", warning = %w, "symbol skipped");
        }

        let fields = Field::selection(cfg.auto_adjust, cfg.include_actions);
        let dataset =
            PriceDataset::assemble(&series, &fields, self.group_by, window.intraday, failures)?;

        if let Some(path) = self.save_to.as_deref() {
            save(&dataset, path)?;
        }
        Ok(dataset)
    }
}

fn save(dataset: &PriceDataset, path: &Path) -> Result<(), TsDataError> {
    dataset.write_csv(path)?;
    tracing::info!(target: "tsdata::fetch", path = %path.display(), "data saved to file {}", path.display());
    Ok(())
}

/// Requested `[start, end)` range and how bars are matched against it.
#[derive(Debug, Clone, Copy)]
struct Window {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    intraday: bool,
}

impl Window {
    /// Period sent to the provider. Daily requests get a day of slack on each
    /// side because exchanges ahead of UTC stamp their sessions on the
    /// previous UTC day.
    fn request_period(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        if self.intraday {
            return (self.start, self.end);
        }
        let pad = TimeDelta::days(1);
        (
            self.start.checked_sub_signed(pad).unwrap_or(self.start),
            self.end.checked_add_signed(pad).unwrap_or(self.end),
        )
    }

    /// Row key of a bar, or `None` if it falls outside the window.
    ///
    /// Intraday bars keep their UTC timestamp. Daily bars are keyed by
    /// midnight of their exchange-local trading day.
    fn key(&self, ts: DateTime<Utc>, meta: Option<&HistoryMeta>) -> Option<DateTime<Utc>> {
        if self.intraday {
            return (ts >= self.start && ts < self.end).then_some(ts);
        }
        let day = session_day(ts, meta);
        (day >= self.start.date_naive() && day < self.end.date_naive())
            .then(|| day.and_time(NaiveTime::MIN).and_utc())
    }

    fn clip(&self, symbol: &str, resp: HistoryResponse) -> SymbolHistory {
        let meta = resp.meta.as_ref();
        let candles = resp
            .candles
            .into_iter()
            .filter_map(|mut c| {
                c.ts = self.key(c.ts, meta)?;
                Some(c)
            })
            .collect();
        let events = resp
            .actions
            .iter()
            .filter_map(Event::from_action)
            .filter_map(|(ts, ev)| Some((self.key(ts, meta)?, ev)))
            .collect();
        SymbolHistory {
            symbol: symbol.to_string(),
            candles,
            events,
            adjusted: resp.adjusted,
        }
    }
}

fn parse_day(s: &str, which: &str) -> Result<DateTime<Utc>, TsDataError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map(|d| d.and_time(NaiveTime::MIN).and_utc())
        .map_err(|e| TsDataError::InvalidArg(format!("invalid {which} date {s:?}: {e}")))
}

const fn is_intraday(interval: Interval) -> bool {
    matches!(
        interval,
        Interval::I1m
            | Interval::I2m
            | Interval::I5m
            | Interval::I15m
            | Interval::I30m
            | Interval::I1h
            | Interval::I90m
    )
}

/// Attach the provider name to errors that do not already carry one.
pub(crate) fn tag_err(connector: &str, e: TsDataError) -> TsDataError {
    match e {
        e @ (TsDataError::NotFound { .. }
        | TsDataError::Connector { .. }
        | TsDataError::NoData { .. }
        | TsDataError::AllProvidersFailed(_)) => e,
        other => TsDataError::Connector {
            connector: connector.to_string(),
            msg: other.to_string(),
        },
    }
}

/// Collapse per-symbol failures of a download that produced no data.
///
/// Rules:
/// - every failure is `NotFound` or `NoData` (or there are none) → `NoData` for all symbols;
/// - otherwise → `AllProvidersFailed(failures)`.
pub(crate) fn collapse_failures(tickers: &Tickers, failures: Vec<TsDataError>) -> TsDataError {
    if failures
        .iter()
        .all(|e| matches!(e, TsDataError::NotFound { .. } | TsDataError::NoData { .. }))
    {
        return TsDataError::NoData {
            symbols: tickers.as_slice().to_vec(),
        };
    }
    TsDataError::AllProvidersFailed(failures)
}
