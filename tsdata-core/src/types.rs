//! Re-export of foundational types from `paft` and `tsdata-types`.
// Consolidated re-exports so downstream crates can depend on `tsdata-core` only

pub use tsdata_types::{FetchConfig, GroupBy, TsDataError};

pub use paft::domain::{AssetKind, Instrument, Symbol};

pub use paft::money::{Currency, IsoCurrency, Money};

pub use rust_decimal::Decimal;

pub use paft::market::action::Action;

pub use paft::market::requests::history::{HistoryRequest, HistoryRequestBuilder, Interval, Range};
pub use paft::market::responses::history::{Candle, HistoryMeta, HistoryResponse};
