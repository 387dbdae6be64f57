use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the tsdata workspace.
///
/// Covers ticker validation, provider-tagged failures, empty downloads, file
/// output, array coercion and frequency normalization. Every variant is a
/// distinct reason callers can branch on.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TsDataError {
    /// A required input was empty (no symbols, blank symbol, ...).
    #[error("empty input: {what}")]
    EmptyInput {
        /// What was empty, e.g. "symbols".
        what: String,
    },

    /// A dynamic input had the wrong shape.
    #[error("invalid type: expected {expected}, got {got}")]
    InvalidType {
        /// Accepted shapes.
        expected: String,
        /// Shape that was received.
        got: String,
    },

    /// The provider answered but returned no rows for any requested symbol.
    #[error("no data downloaded for symbols: {}", symbols.join(", "))]
    NoData {
        /// Symbols that were requested.
        symbols: Vec<String>,
    },

    /// The requested capability is not served by the target provider.
    #[error("unsupported capability: {capability}")]
    Unsupported {
        /// A capability string describing what was requested (e.g. "history/1m").
        capability: String,
    },

    /// Issues with the returned or expected data (missing fields, etc.).
    #[error("data issue: {0}")]
    Data(String),

    /// Invalid input argument.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// An individual connector returned an error.
    #[error("{connector} failed: {msg}")]
    Connector {
        /// Connector name that failed.
        connector: String,
        /// Human-readable error message.
        msg: String,
    },

    /// A resource or symbol could not be found.
    #[error("not found: {what}")]
    NotFound {
        /// Description of missing resource, e.g. "history for AAPL".
        what: String,
    },

    /// Every requested symbol failed; contains the individual failures.
    #[error("all providers failed: {0:?}")]
    AllProvidersFailed(Vec<TsDataError>),

    /// Writing an output file failed.
    #[error("i/o error on {path}: {msg}")]
    Io {
        /// Path that was being written.
        path: String,
        /// Underlying error message.
        msg: String,
    },

    /// `as_ndarray` received something that is not a numeric series, table or array.
    #[error("`y` should be a numeric Series, DataFrame, or ndarray to cast to ndarray (got {got})")]
    UnsupportedArrayType {
        /// Description of the rejected input.
        got: String,
    },

    /// A frequency string could not be parsed.
    #[error("invalid frequency: {freq:?}")]
    InvalidFrequency {
        /// The rejected frequency text.
        freq: String,
    },

    /// No frequency was supplied and none could be inferred.
    #[error(
        "no discernible frequency found for `idx`; specify a frequency string with `freq`"
    )]
    NoDiscernibleFrequency,

    /// Unknown/opaque error.
    #[error("unknown error: {0}")]
    Other(String),
}

impl TsDataError {
    /// Helper: build an `EmptyInput` error.
    pub fn empty_input(what: impl Into<String>) -> Self {
        Self::EmptyInput { what: what.into() }
    }

    /// Helper: build an `Unsupported` error for a capability string.
    #[must_use]
    pub fn unsupported(cap: impl Into<String>) -> Self {
        Self::Unsupported {
            capability: cap.into(),
        }
    }

    /// Helper: build a `Connector` error with the connector name and message.
    pub fn connector(connector: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Connector {
            connector: connector.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `NotFound` error for a description of the missing resource.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    /// Helper: build an `Io` error from a path and an I/O failure.
    pub fn io(path: impl AsRef<std::path::Path>, err: &std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().display().to_string(),
            msg: err.to_string(),
        }
    }

    /// Returns true if this error should be surfaced to users as actionable.
    ///
    /// Non-actionable errors indicate capability absence, a benign not-found
    /// condition or an empty download. Aggregates are classified by their contents.
    #[must_use]
    pub fn is_actionable(&self) -> bool {
        match self {
            Self::Unsupported { .. } | Self::NotFound { .. } | Self::NoData { .. } => false,
            Self::AllProvidersFailed(inner) => inner.iter().any(Self::is_actionable),
            _ => true,
        }
    }

    /// Flatten nested `AllProvidersFailed` structures into a plain vector.
    #[must_use]
    pub fn flatten(self) -> Vec<Self> {
        match self {
            Self::AllProvidersFailed(list) => list.into_iter().flat_map(Self::flatten).collect(),
            other => vec![other],
        }
    }
}

impl From<paft::Error> for TsDataError {
    fn from(err: paft::Error) -> Self {
        use paft::Error as E;
        match err {
            E::Money(_) => Self::Data(err.to_string()),
            E::Core(_) | E::Domain(_) | E::Market(_) | E::MoneyParse(_) | E::Canonical(_) => {
                Self::InvalidArg(err.to_string())
            }
        }
    }
}

impl From<paft::market::MarketError> for TsDataError {
    fn from(e: paft::market::MarketError) -> Self {
        Self::InvalidArg(e.to_string())
    }
}

impl From<paft::domain::DomainError> for TsDataError {
    fn from(e: paft::domain::DomainError) -> Self {
        Self::InvalidArg(e.to_string())
    }
}

impl From<paft::core::PaftError> for TsDataError {
    fn from(e: paft::core::PaftError) -> Self {
        Self::InvalidArg(e.to_string())
    }
}

impl From<paft::money::MoneyError> for TsDataError {
    fn from(e: paft::money::MoneyError) -> Self {
        Self::Data(e.to_string())
    }
}
