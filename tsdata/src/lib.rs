//! tsdata downloads historical prices and prepares time series for analysis.
//!
//! Overview
//! - Fetches OHLCV history for one or more ticker symbols from a pluggable
//!   [`HistoryProvider`] (Yahoo Finance by default) and aligns it into a
//!   [`PriceDataset`] backed by a polars `DataFrame`.
//! - Optionally persists the dataset as CSV with a two-row column header.
//! - Re-exports the time-series helpers of `tsdata-core`: [`as_ndarray`],
//!   [`is_datetime_dtypes`], [`add_freq`] and [`infer_freq`].
//!
//! Key behaviors
//! - Symbols are normalized through [`Tickers`]; empty input is an
//!   `EmptyInput` error and non-string dynamic input an `InvalidType` error.
//! - Symbols are fetched concurrently. Partial failures become dataset
//!   warnings; a download with no data at all is `NoData`.
//! - Every fetch failure is logged through `tracing` and returned as a typed
//!   [`TsDataError`]; nothing panics.
//!
//! Examples
//! ```rust,ignore
//! use std::sync::Arc;
//! use tsdata::{GroupBy, TsData};
//!
//! let ts = TsData::yahoo()?;
//! let data = ts
//!     .fetch()
//!     .tickers(["AAPL", "MSFT"])
//!     .period("2023-01-01", "2023-02-01")
//!     .group_by(GroupBy::Column)
//!     .save_to("prices.csv")
//!     .run()
//!     .await?;
//! let closes = data.column("AAPL", tsdata::Field::Close);
//! ```
//!
//! See `tsdata/examples/` for runnable end-to-end demonstrations.
#![warn(missing_docs)]

pub(crate) mod core;
mod dataset;
mod fetch;
mod tickers;
#[cfg(feature = "yfinance")]
mod yahoo;

pub use core::{TsData, TsDataBuilder};
pub use dataset::{ColumnKey, DATE_COLUMN, Field, PriceDataset};
pub use fetch::FetchBuilder;
pub use tickers::Tickers;
#[cfg(feature = "yfinance")]
pub use yahoo::download_yahoo_finance_ticker;

pub use tsdata_core::{
    ArrayInput, AssetKind, Candle, FetchConfig, FreqUnit, Frequency, GroupBy, HasDtype,
    HistoryProvider, HistoryRequest, HistoryResponse, Instrument, Interval, TimeIndex,
    TsDataError, add_freq, as_ndarray, infer_freq, is_datetime_dtypes,
};
