use proptest::prelude::*;
use tsdata::Tickers;

proptest! {
    #[test]
    fn normalized_symbols_are_upper_unique_and_ordered(
        raw in prop::collection::vec("[a-zA-Z]{1,5}", 1..12),
        pad in 0usize..3,
    ) {
        let padded: Vec<String> = raw.iter().map(|s| format!("{}{s}{}", " ".repeat(pad), " ".repeat(pad))).collect();
        let t = Tickers::try_from(padded).unwrap();
        let got = t.as_slice();

        let mut expected: Vec<String> = Vec::new();
        for s in &raw {
            let u = s.to_ascii_uppercase();
            if !expected.contains(&u) {
                expected.push(u);
            }
        }
        prop_assert_eq!(got, expected.as_slice());
        prop_assert!(got.iter().all(|s| s.chars().all(|c| c.is_ascii_uppercase())));
    }
}
