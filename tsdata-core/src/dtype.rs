use std::borrow::Cow;

use polars::prelude::{Column, DataType, Series, TimeUnit};

use crate::timeseries::index::TimeIndex;

/// Anything that carries a polars element type.
pub trait HasDtype {
    /// Element type of the column, index or dtype itself.
    fn element_dtype(&self) -> Cow<'_, DataType>;
}

impl HasDtype for DataType {
    fn element_dtype(&self) -> Cow<'_, DataType> {
        Cow::Borrowed(self)
    }
}

impl HasDtype for Series {
    fn element_dtype(&self) -> Cow<'_, DataType> {
        Cow::Borrowed(self.dtype())
    }
}

impl HasDtype for Column {
    fn element_dtype(&self) -> Cow<'_, DataType> {
        Cow::Borrowed(self.dtype())
    }
}

impl HasDtype for TimeIndex {
    fn element_dtype(&self) -> Cow<'_, DataType> {
        Cow::Owned(DataType::Datetime(TimeUnit::Milliseconds, None))
    }
}

/// True iff `x` holds date or datetime values, naive or timezone-aware.
///
/// ```
/// use polars::prelude::*;
/// use tsdata_core::is_datetime_dtypes;
///
/// assert!(is_datetime_dtypes(&DataType::Date));
/// assert!(is_datetime_dtypes(&DataType::Datetime(TimeUnit::Microseconds, None)));
/// assert!(!is_datetime_dtypes(&Series::new("n".into(), [1i64, 2, 3])));
/// ```
#[must_use]
pub fn is_datetime_dtypes<T: HasDtype + ?Sized>(x: &T) -> bool {
    matches!(
        x.element_dtype().as_ref(),
        DataType::Date | DataType::Datetime(_, _)
    )
}
