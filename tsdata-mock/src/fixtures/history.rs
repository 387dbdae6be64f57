use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use tsdata_core::{
    Action, Candle, Currency, Decimal, HistoryMeta, HistoryResponse, IsoCurrency, Money,
};

type Row = (&'static str, &'static str, &'static str, &'static str, &'static str, u64);

/// Cash dividends as `(ex-date, amount)`.
type Dividend = (&'static str, &'static str);

const SYDNEY_OFFSET: i64 = 11 * 3600;

/// Daily bars for the first two trading weeks of January 2023.
///
/// TSLA skips 2023-01-05 so multi-symbol joins see a gap. MSFT pays a
/// dividend on 2023-01-09; adjusted responses subtract it from earlier closes
/// and keep the raw value in `close_unadj`. `BHP.AX` is stamped at the Sydney
/// session open, 23:00 UTC on the previous calendar day.
pub fn daily(s: &str, adjust: bool, with_actions: bool) -> Option<HistoryResponse> {
    if s == "BHP.AX" {
        return Some(asx_daily());
    }
    let rows: &[Row] = match s {
        "AAPL" => &[
            ("2023-01-03", "130.28", "130.90", "124.17", "125.07", 112_117_500),
            ("2023-01-04", "126.89", "128.66", "125.08", "126.36", 89_113_600),
            ("2023-01-05", "127.13", "127.77", "124.76", "125.02", 80_962_700),
            ("2023-01-06", "126.01", "130.29", "124.89", "129.62", 87_754_700),
            ("2023-01-09", "130.47", "133.41", "129.89", "130.15", 70_790_800),
            ("2023-01-10", "130.26", "131.26", "128.12", "130.73", 63_896_200),
        ],
        "MSFT" => &[
            ("2023-01-03", "243.08", "245.75", "237.40", "239.58", 25_740_000),
            ("2023-01-04", "232.28", "232.87", "225.96", "229.10", 50_623_400),
            ("2023-01-05", "227.20", "227.55", "221.76", "222.31", 39_585_600),
            ("2023-01-06", "223.00", "225.76", "219.35", "224.93", 43_613_600),
            ("2023-01-09", "226.45", "231.24", "226.41", "227.12", 27_369_800),
            ("2023-01-10", "227.76", "231.31", "227.33", "228.85", 27_033_900),
        ],
        "GOOG" => &[
            ("2023-01-03", "89.83", "91.55", "89.02", "89.70", 20_738_500),
            ("2023-01-04", "91.01", "91.24", "87.80", "88.71", 27_046_500),
            ("2023-01-05", "88.07", "88.21", "86.56", "86.77", 23_136_100),
            ("2023-01-06", "87.36", "88.47", "85.57", "88.16", 26_612_600),
            ("2023-01-09", "89.20", "90.83", "88.58", "88.80", 22_996_700),
            ("2023-01-10", "88.99", "89.79", "87.86", "89.24", 22_855_600),
        ],
        "TSLA" => &[
            ("2023-01-03", "118.47", "118.80", "104.64", "108.10", 231_402_800),
            ("2023-01-04", "109.11", "114.59", "107.52", "113.64", 180_389_000),
            ("2023-01-06", "103.00", "114.39", "101.81", "113.06", 220_911_100),
            ("2023-01-09", "118.96", "123.52", "117.11", "119.77", 190_284_000),
            ("2023-01-10", "121.07", "122.76", "114.92", "118.85", 167_642_500),
        ],
        "EMPTY" => &[],
        _ => return None,
    };
    let dividends: &[Dividend] = match s {
        "MSFT" => &[("2023-01-09", "0.68")],
        _ => &[],
    };

    let mut resp = build(rows, "T00:00:00");
    if adjust {
        adjust_for_dividends(&mut resp.candles, dividends);
        resp.adjusted = true;
    }
    if with_actions {
        resp.actions = dividends
            .iter()
            .map(|&(date, amount)| Action::Dividend {
                ts: midnight(date),
                amount: usd(amount),
            })
            .collect();
    }
    Some(resp)
}

fn asx_daily() -> HistoryResponse {
    let rows: &[Row] = &[
        ("2023-01-02T23:00:00", "48.80", "49.35", "48.52", "49.21", 6_120_400),
        ("2023-01-03T23:00:00", "49.10", "49.44", "48.60", "48.75", 7_310_900),
        ("2023-01-04T23:00:00", "48.90", "49.98", "48.71", "49.86", 8_004_300),
        ("2023-01-05T23:00:00", "49.70", "50.12", "49.30", "49.55", 6_880_100),
        ("2023-01-08T23:00:00", "50.20", "50.90", "50.01", "50.77", 9_145_600),
        ("2023-01-09T23:00:00", "50.60", "50.81", "49.95", "50.10", 7_402_000),
    ];
    let mut resp = build(rows, "");
    resp.meta = Some(HistoryMeta {
        timezone: Some(chrono_tz::Australia::Sydney),
        utc_offset_seconds: Some(SYDNEY_OFFSET),
    });
    resp
}

/// Three hourly bars on 2023-01-03 for a subset of symbols.
pub fn hourly(s: &str) -> Option<HistoryResponse> {
    let rows: &[Row] = match s {
        "AAPL" => &[
            ("2023-01-03T14:30:00", "130.28", "130.90", "129.61", "129.80", 21_000_000),
            ("2023-01-03T15:30:00", "129.80", "129.95", "127.43", "127.70", 14_500_000),
            ("2023-01-03T16:30:00", "127.70", "127.88", "126.10", "126.50", 12_300_000),
        ],
        "MSFT" => &[
            ("2023-01-03T14:30:00", "243.08", "245.75", "241.20", "242.10", 5_100_000),
            ("2023-01-03T15:30:00", "242.10", "242.50", "239.90", "240.40", 3_700_000),
            ("2023-01-03T16:30:00", "240.40", "241.00", "238.30", "239.00", 3_100_000),
        ],
        "EMPTY" => &[],
        _ => return None,
    };
    Some(build(rows, ""))
}

fn usd(s: &str) -> Money {
    Money::from_canonical_str(s, Currency::Iso(IsoCurrency::USD))
        .unwrap_or_else(|e| panic!("bad fixture price {s}: {e}"))
}

fn midnight(date: &str) -> DateTime<Utc> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .unwrap_or_else(|e| panic!("bad fixture date {date}: {e}"))
        .and_time(chrono::NaiveTime::MIN)
        .and_utc()
}

/// Subtract every later dividend from each close, keeping the raw close.
fn adjust_for_dividends(candles: &mut [Candle], dividends: &[Dividend]) {
    for c in candles {
        let owed: Decimal = dividends
            .iter()
            .filter(|(date, _)| c.ts < midnight(date))
            .map(|(_, amount)| {
                amount
                    .parse::<Decimal>()
                    .unwrap_or_else(|e| panic!("bad fixture dividend {amount}: {e}"))
            })
            .sum();
        let adjusted = Money::new(c.close.amount() - owed, c.close.currency().clone())
            .unwrap_or_else(|e| panic!("bad adjusted close: {e}"));
        c.close_unadj = Some(std::mem::replace(&mut c.close, adjusted));
    }
}

fn build(rows: &[Row], time_suffix: &str) -> HistoryResponse {
    let candles = rows
        .iter()
        .map(|&(ts, o, h, l, c, v)| Candle {
            ts: NaiveDateTime::parse_from_str(&format!("{ts}{time_suffix}"), "%Y-%m-%dT%H:%M:%S")
                .unwrap_or_else(|e| panic!("bad fixture timestamp {ts}: {e}"))
                .and_utc(),
            open: usd(o),
            high: usd(h),
            low: usd(l),
            close: usd(c),
            close_unadj: None,
            volume: Some(v),
        })
        .collect();
    HistoryResponse {
        candles,
        actions: vec![],
        adjusted: false,
        meta: None,
    }
}
