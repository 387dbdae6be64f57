//! Time-index utilities.
//!
//! Modules include:
//! - `frequency`: typed sampling frequency and offset-alias parsing
//! - `index`: the `TimeIndex` type and `add_freq`
//! - `infer`: infer a frequency from timestamp spacing
//! - `session`: market-local trading day of a bar
/// Sampling frequency type and alias parsing.
pub mod frequency;
/// Time index with an optional frequency.
pub mod index;
/// Frequency inference.
pub mod infer;
/// Exchange-local day bucketing.
pub mod session;
