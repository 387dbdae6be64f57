use ndarray::{Array1, Array2, ArrayD, IxDyn};
use polars::prelude::*;
use tsdata_core::{ArrayInput, TsDataError, as_ndarray};

#[test]
fn series_keeps_length_and_order() {
    let s = Series::new("x".into(), [3i64, 1, 2, 5]);
    let a = as_ndarray(s).unwrap();
    assert_eq!(a.shape(), &[4]);
    assert_eq!(a.iter().copied().collect::<Vec<_>>(), vec![3.0, 1.0, 2.0, 5.0]);
}

#[test]
fn array_passes_through() {
    let arr = Array2::from_shape_vec((2, 2), vec![1.0, 2.0, 3.0, 4.0]).unwrap();
    let out = as_ndarray(arr.clone()).unwrap();
    assert_eq!(out, arr.into_dyn());

    let flat = ArrayD::<f64>::zeros(IxDyn(&[3, 1, 2]));
    assert_eq!(as_ndarray(flat.clone()).unwrap(), flat);

    let one = Array1::from_vec(vec![9.0]);
    assert_eq!(as_ndarray(one).unwrap().shape(), &[1]);
}

#[test]
fn table_becomes_rows_by_columns() {
    let df = DataFrame::new(vec![
        Column::new("open".into(), [1.0f64, 2.0, 3.0]),
        Column::new("volume".into(), [10i32, 20, 30]),
    ])
    .unwrap();
    let a = as_ndarray(df).unwrap();
    assert_eq!(a.shape(), &[3, 2]);
    assert_eq!(a[[0, 0]], 1.0);
    assert_eq!(a[[2, 1]], 30.0);
}

#[test]
fn list_value_is_accepted() {
    let inner = Series::new("".into(), [1.0f64, 2.0]);
    let input = ArrayInput::try_from(AnyValue::List(inner)).unwrap();
    assert_eq!(as_ndarray(input).unwrap().shape(), &[2]);
}

#[test]
fn string_series_is_rejected_with_readable_message() {
    let s = Series::new("sym".into(), ["AAPL", "MSFT"]);
    let err = as_ndarray(s).unwrap_err();
    assert!(matches!(err, TsDataError::UnsupportedArrayType { .. }));
    let msg = err.to_string();
    assert!(msg.contains("should be a numeric Series, DataFrame, or ndarray"));
    assert!(msg.contains("sym"));
}

#[test]
fn mixed_table_rejects_text_column() {
    let df = DataFrame::new(vec![
        Column::new("close".into(), [1.0f64]),
        Column::new("note".into(), ["x"]),
    ])
    .unwrap();
    assert!(matches!(
        as_ndarray(df),
        Err(TsDataError::UnsupportedArrayType { .. })
    ));
}
