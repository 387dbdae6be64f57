use ndarray::{Array1, Array2, ArrayD};
use polars::prelude::{AnyValue, DataFrame, DataType, Series};

use crate::{TsDataError, polars_err};

/// Inputs accepted by [`as_ndarray`].
#[derive(Debug, Clone)]
pub enum ArrayInput {
    /// Labeled 1-D column.
    Series(Series),
    /// Labeled 2-D table.
    Table(DataFrame),
    /// Already a flat numeric array; passed through untouched.
    Array(ArrayD<f64>),
}

impl From<Series> for ArrayInput {
    fn from(s: Series) -> Self {
        Self::Series(s)
    }
}

impl From<DataFrame> for ArrayInput {
    fn from(df: DataFrame) -> Self {
        Self::Table(df)
    }
}

impl From<ArrayD<f64>> for ArrayInput {
    fn from(a: ArrayD<f64>) -> Self {
        Self::Array(a)
    }
}

impl From<Array1<f64>> for ArrayInput {
    fn from(a: Array1<f64>) -> Self {
        Self::Array(a.into_dyn())
    }
}

impl From<Array2<f64>> for ArrayInput {
    fn from(a: Array2<f64>) -> Self {
        Self::Array(a.into_dyn())
    }
}

impl TryFrom<AnyValue<'_>> for ArrayInput {
    type Error = TsDataError;

    /// Only list values carry a series; every scalar is rejected.
    fn try_from(v: AnyValue<'_>) -> Result<Self, Self::Error> {
        match v {
            AnyValue::List(s) => Ok(Self::Series(s)),
            other => Err(TsDataError::UnsupportedArrayType {
                got: format!("scalar {}", other.dtype()),
            }),
        }
    }
}

fn is_numeric(dtype: &DataType) -> bool {
    dtype.is_primitive_numeric() || dtype.is_bool()
}

fn series_values(s: &Series) -> Result<Vec<f64>, TsDataError> {
    if !is_numeric(s.dtype()) {
        return Err(TsDataError::UnsupportedArrayType {
            got: format!("column {:?} of dtype {}", s.name().as_str(), s.dtype()),
        });
    }
    let cast = s.cast(&DataType::Float64).map_err(polars_err)?;
    let ca = cast.f64().map_err(polars_err)?;
    Ok(ca.iter().map(|v| v.unwrap_or(f64::NAN)).collect())
}

/// Coerce a series, table or array into a numeric `f64` array.
///
/// - `Series` → 1-D array of the same length and order.
/// - `Table` → 2-D `(rows, columns)` array.
/// - `Array` → returned as is (moved, not copied).
///
/// Nulls become `NaN`. Boolean columns become `0.0`/`1.0`.
///
/// # Errors
/// Returns `TsDataError::UnsupportedArrayType` if a series or table holds a
/// non-numeric column, and `TsDataError::Data` if polars fails to cast.
///
/// ```
/// use polars::prelude::*;
/// use tsdata_core::as_ndarray;
///
/// let s = Series::new("close".into(), [1.5f64, 2.5, 3.5]);
/// let a = as_ndarray(s).unwrap();
/// assert_eq!(a.shape(), &[3]);
/// assert_eq!(a.iter().copied().collect::<Vec<_>>(), vec![1.5, 2.5, 3.5]);
/// ```
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(target = "tsdata::array", level = "debug", skip(y))
)]
pub fn as_ndarray(y: impl Into<ArrayInput>) -> Result<ArrayD<f64>, TsDataError> {
    match y.into() {
        ArrayInput::Array(a) => Ok(a),
        ArrayInput::Series(s) => Ok(Array1::from_vec(series_values(&s)?).into_dyn()),
        ArrayInput::Table(df) => {
            let (rows, cols) = df.shape();
            let columns = df
                .get_columns()
                .iter()
                .map(|c| series_values(c.as_materialized_series()))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Array2::from_shape_fn((rows, cols), |(r, c)| columns[c][r]).into_dyn())
        }
    }
}
