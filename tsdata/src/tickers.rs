use std::fmt;

use serde_json::Value;
use tsdata_core::TsDataError;

/// Non-empty, ordered set of ticker symbols.
///
/// Symbols are trimmed and upper-cased; later duplicates are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tickers(Vec<String>);

impl Tickers {
    /// Normalize a collection of symbols.
    ///
    /// # Errors
    /// Returns `EmptyInput` if the collection is empty or any element is blank.
    pub fn new<I, S>(symbols: I) -> Result<Self, TsDataError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out: Vec<String> = Vec::new();
        for raw in symbols {
            let sym = raw.as_ref().trim();
            if sym.is_empty() {
                return Err(TsDataError::empty_input("ticker symbol"));
            }
            let sym = sym.to_ascii_uppercase();
            if !out.contains(&sym) {
                out.push(sym);
            }
        }
        if out.is_empty() {
            return Err(TsDataError::empty_input("tickers"));
        }
        Ok(Self(out))
    }

    /// Symbols in request order.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Iterate symbols in request order.
    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    /// Number of distinct symbols. Never zero.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Tickers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(", "))
    }
}

impl<'a> IntoIterator for &'a Tickers {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl TryFrom<&str> for Tickers {
    type Error = TsDataError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::new([s])
    }
}

impl TryFrom<String> for Tickers {
    type Error = TsDataError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new([s])
    }
}

impl TryFrom<Vec<String>> for Tickers {
    type Error = TsDataError;

    fn try_from(v: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(v)
    }
}

impl TryFrom<Vec<&str>> for Tickers {
    type Error = TsDataError;

    fn try_from(v: Vec<&str>) -> Result<Self, Self::Error> {
        Self::new(v)
    }
}

impl TryFrom<&[&str]> for Tickers {
    type Error = TsDataError;

    fn try_from(v: &[&str]) -> Result<Self, Self::Error> {
        Self::new(v)
    }
}

impl TryFrom<&[String]> for Tickers {
    type Error = TsDataError;

    fn try_from(v: &[String]) -> Result<Self, Self::Error> {
        Self::new(v)
    }
}

impl<const N: usize> TryFrom<[&str; N]> for Tickers {
    type Error = TsDataError;

    fn try_from(v: [&str; N]) -> Result<Self, Self::Error> {
        Self::new(v)
    }
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl TryFrom<&Value> for Tickers {
    type Error = TsDataError;

    /// Accepts a string or an array of strings. `null` counts as absent.
    fn try_from(v: &Value) -> Result<Self, Self::Error> {
        let invalid = |got: String| TsDataError::InvalidType {
            expected: "string or array of strings".into(),
            got,
        };
        match v {
            Value::Null => Err(TsDataError::empty_input("tickers")),
            Value::String(s) => Self::new([s]),
            Value::Array(items) => {
                let symbols = items
                    .iter()
                    .map(|item| {
                        item.as_str()
                            .ok_or_else(|| invalid(format!("array containing {}", json_kind(item))))
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Self::new(symbols)
            }
            other => Err(invalid(json_kind(other).to_string())),
        }
    }
}

impl TryFrom<Value> for Tickers {
    type Error = TsDataError;

    fn try_from(v: Value) -> Result<Self, Self::Error> {
        Self::try_from(&v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn single_string_becomes_one_symbol() {
        let t = Tickers::try_from(" aapl ").unwrap();
        assert_eq!(t.as_slice(), ["AAPL"]);
    }

    #[test]
    fn duplicates_keep_first_position() {
        let t = Tickers::try_from(["msft", "AAPL", "MSFT"]).unwrap();
        assert_eq!(t.as_slice(), ["MSFT", "AAPL"]);
        assert_eq!(t.to_string(), "MSFT, AAPL");
    }

    #[test]
    fn empty_inputs_are_rejected() {
        assert!(matches!(
            Tickers::try_from(""),
            Err(TsDataError::EmptyInput { .. })
        ));
        assert!(matches!(
            Tickers::try_from(Vec::<String>::new()),
            Err(TsDataError::EmptyInput { .. })
        ));
        assert!(matches!(
            Tickers::try_from(["AAPL", "  "]),
            Err(TsDataError::EmptyInput { .. })
        ));
        assert!(matches!(
            Tickers::try_from(&json!(null)),
            Err(TsDataError::EmptyInput { .. })
        ));
        assert!(matches!(
            Tickers::try_from(&json!([])),
            Err(TsDataError::EmptyInput { .. })
        ));
    }

    #[test]
    fn non_string_json_is_invalid_type() {
        match Tickers::try_from(&json!(123)) {
            Err(TsDataError::InvalidType { got, .. }) => assert_eq!(got, "number"),
            other => panic!("unexpected: {other:?}"),
        }
        assert!(matches!(
            Tickers::try_from(&json!(["AAPL", 7])),
            Err(TsDataError::InvalidType { .. })
        ));
        assert!(matches!(
            Tickers::try_from(&json!({"symbol": "AAPL"})),
            Err(TsDataError::InvalidType { .. })
        ));
    }

    #[test]
    fn json_string_and_array() {
        assert_eq!(Tickers::try_from(json!("tsla")).unwrap().as_slice(), ["TSLA"]);
        assert_eq!(
            Tickers::try_from(json!(["goog", "aapl"])).unwrap().as_slice(),
            ["GOOG", "AAPL"]
        );
    }
}
