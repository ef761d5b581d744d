use proptest::prelude::*;

use hri_ingest::parse_numeric;

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::new();
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

proptest! {
    #[test]
    fn numeric_coercion_matches_direct_parse(value in -1_000_000.0..1_000_000.0f64) {
        let rendered = format!("{value}");
        let parsed = parse_numeric(&rendered).expect("rendered float parses");
        prop_assert!((parsed - value).abs() <= f64::EPSILON * value.abs().max(1.0));
    }

    #[test]
    fn thousands_separators_do_not_change_value(whole in 0u64..100_000_000u64) {
        let grouped = group_thousands(whole);
        prop_assert_eq!(parse_numeric(&grouped), Some(whole as f64));
    }

    #[test]
    fn arbitrary_text_never_panics(raw in "\\PC*") {
        let _ = parse_numeric(&raw);
    }
}
