//! tsdata-core
//!
//! Core types, traits, and utilities shared across the tsdata crates.
//!
//! - `types`: re-exported market data structures (candles, requests, instruments).
//! - `connector`: the `HistoryProvider` trait implemented by data connectors.
//! - `array`: coercion of polars series/tables into `ndarray` arrays.
//! - `dtype`: date/time element type detection.
//! - `timeseries`: time index, frequency parsing and inference, session days.
#![warn(missing_docs)]

/// Numeric array coercion.
pub mod array;
/// Connector role traits.
pub mod connector;
/// Element type predicates.
pub mod dtype;
/// Time index and frequency utilities.
pub mod timeseries;
pub mod types;

pub use array::{ArrayInput, as_ndarray};
pub use connector::HistoryProvider;
pub use dtype::{HasDtype, is_datetime_dtypes};
pub use timeseries::frequency::{FreqUnit, Frequency};
pub use timeseries::index::{TimeIndex, add_freq};
pub use timeseries::infer::infer_freq;
pub use timeseries::session::session_day;
pub use types::*;

/// Map a polars failure onto the workspace error type.
pub fn polars_err(e: polars::prelude::PolarsError) -> TsDataError {
    TsDataError::Data(e.to_string())
}
