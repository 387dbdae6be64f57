//! tsdata-specific error and configuration types built on top of `paft`.
#![warn(missing_docs)]

mod config;
/// Unified error type.
pub mod error;

pub use config::{FetchConfig, GroupBy};
pub use error::TsDataError;
