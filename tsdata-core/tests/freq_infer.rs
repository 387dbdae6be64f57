use chrono::{DateTime, NaiveDate, TimeDelta, Utc, Weekday};
use proptest::prelude::*;
use tsdata_core::{FreqUnit, Frequency, TimeIndex, infer_freq};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn at(sec: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(sec, 0).unwrap()
}

#[test]
fn uniform_daily_is_daily() {
    let idx = TimeIndex::from_dates((1..=10).map(|d| day(2023, 5, d)));
    assert_eq!(infer_freq(&idx), Some(Frequency::DAILY));
}

#[test]
fn uniform_multi_day_keeps_multiple() {
    let idx = TimeIndex::from_dates([day(2023, 1, 1), day(2023, 1, 4), day(2023, 1, 7)]);
    assert_eq!(infer_freq(&idx).unwrap().to_string(), "3D");
}

#[test]
fn weekly_is_anchored_on_first_weekday() {
    // 2024-01-05 is a Friday
    let idx = TimeIndex::from_dates([day(2024, 1, 5), day(2024, 1, 12), day(2024, 1, 19)]);
    let f = infer_freq(&idx).unwrap();
    assert_eq!(f.unit(), FreqUnit::Week(Weekday::Fri));
    assert_eq!(f.to_string(), "W-FRI");
}

#[test]
fn intraday_steps() {
    let hourly = TimeIndex::new((0..5).map(|i| at(i * 3600)).collect());
    assert_eq!(infer_freq(&hourly).unwrap().to_string(), "h");

    let five_min = TimeIndex::new((0..5).map(|i| at(i * 300)).collect());
    assert_eq!(infer_freq(&five_min).unwrap().to_string(), "5min");

    let odd = TimeIndex::new((0..5).map(|i| at(i * 45)).collect());
    assert_eq!(infer_freq(&odd).unwrap().to_string(), "45s");
}

#[test]
fn business_days_span_weekends() {
    // Thu 2024-01-04 .. Wed 2024-01-10, skipping Sat/Sun
    let idx = TimeIndex::from_dates([
        day(2024, 1, 4),
        day(2024, 1, 5),
        day(2024, 1, 8),
        day(2024, 1, 9),
        day(2024, 1, 10),
    ]);
    assert_eq!(infer_freq(&idx), Some(Frequency::BUSINESS_DAILY));
}

#[test]
fn month_and_quarter_boundaries() {
    let ms = TimeIndex::from_dates([day(2023, 1, 1), day(2023, 2, 1), day(2023, 3, 1)]);
    assert_eq!(infer_freq(&ms).unwrap().to_string(), "MS");

    let me = TimeIndex::from_dates([day(2023, 1, 31), day(2023, 2, 28), day(2023, 3, 31)]);
    assert_eq!(infer_freq(&me).unwrap().to_string(), "ME");

    let qe = TimeIndex::from_dates([day(2023, 3, 31), day(2023, 6, 30), day(2023, 9, 30)]);
    assert_eq!(infer_freq(&qe).unwrap().to_string(), "QE");

    let ys = TimeIndex::from_dates([day(2020, 1, 1), day(2021, 1, 1), day(2022, 1, 1)]);
    assert_eq!(infer_freq(&ys).unwrap().to_string(), "YS");
}

#[test]
fn calendar_rules_need_midnight_stamps() {
    let noon = |m| day(2024, m, 1).and_hms_opt(12, 0, 0).unwrap().and_utc();
    let idx = TimeIndex::new(vec![noon(1), noon(2), noon(3)]);
    assert_eq!(infer_freq(&idx), None);
}

#[test]
fn irregular_or_short_is_none() {
    let gappy = TimeIndex::from_dates([day(2023, 1, 2), day(2023, 1, 3), day(2023, 1, 9)]);
    assert_eq!(infer_freq(&gappy), None);

    let two = TimeIndex::from_dates([day(2023, 1, 2), day(2023, 1, 3)]);
    assert_eq!(infer_freq(&two), None);

    let unsorted = TimeIndex::from_dates([day(2023, 1, 3), day(2023, 1, 2), day(2023, 1, 1)]);
    assert_eq!(infer_freq(&unsorted), None);

    let dup = TimeIndex::from_dates([day(2023, 1, 1), day(2023, 1, 1), day(2023, 1, 2)]);
    assert_eq!(infer_freq(&dup), None);
}

proptest! {
    #[test]
    fn constant_step_round_trips_through_fixed_step(
        step_idx in 0usize..6,
        mult in 1i64..5,
        n in 3usize..60,
        origin in 0i64..1_000_000,
    ) {
        let steps = [1i64, 60, 300, 3600, 86_400, 7 * 86_400];
        let step = steps[step_idx] * mult;
        let ts: Vec<_> = (0..n as i64).map(|i| at(origin * 60 + i * step)).collect();
        let idx = TimeIndex::new(ts);

        let f = infer_freq(&idx).expect("uniform spacing always infers");
        prop_assert_eq!(f.fixed_step(), Some(TimeDelta::seconds(step)));
    }

    #[test]
    fn one_missing_day_breaks_daily_inference(n in 5usize..40, hole in 1usize..4) {
        let dates: Vec<_> = (0..n)
            .filter(|&i| i != hole)
            .map(|i| day(2021, 3, 1) + TimeDelta::days(i as i64))
            .collect();
        let idx = TimeIndex::from_dates(dates);
        let got = infer_freq(&idx);
        // A hole can still look like business days only when it lands on a weekend.
        prop_assert!(got.is_none() || got == Some(Frequency::BUSINESS_DAILY));
    }
}
