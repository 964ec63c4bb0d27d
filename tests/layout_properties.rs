// Properties that must hold for every dataset

use crypto_bubbles::{compute_layout, ChartConfig, ChartLayout, CurrencyRecord, YearRadiusMapper};
use proptest::prelude::*;
use std::f64::consts::PI;

const CATEGORIES: [&str; 5] = ["Payments", "Platform", "Privacy", "Meme", "Exchange"];
const NAMES: [&str; 4] = ["Coin", "Smart Cash", "Open Ledger Network", "TKN"];

fn currency() -> impl Strategy<Value = (i32, usize, usize, f64, f64)> {
    (
        2009i32..2022,
        0usize..CATEGORIES.len(),
        0usize..NAMES.len(),
        0.0f64..1e9,
        0.0f64..1e9,
    )
}

fn dataset() -> impl Strategy<Value = Vec<CurrencyRecord>> {
    (
        2005i32..2025,
        1.0f64..1e9,
        1.0f64..1e9,
        prop::collection::vec(currency(), 0..30),
    )
        .prop_map(|(btc_year, btc_cap, btc_vol, others)| {
            let mut records: Vec<CurrencyRecord> = others
                .into_iter()
                .enumerate()
                .map(|(i, (year, category, name, cap, vol))| {
                    CurrencyRecord::new(&format!("C{}", i), NAMES[name], year, CATEGORIES[category], cap, vol)
                })
                .collect();
            let at = records.len() / 2;
            records.insert(at, CurrencyRecord::new("BTC", "Bitcoin", btc_year, "", btc_cap, btc_vol));
            records
        })
}

fn layout_of(records: Vec<CurrencyRecord>) -> ChartLayout {
    compute_layout(records, &ChartConfig::default()).expect("layout")
}

proptest! {
    #[test]
    fn sectors_cover_available_sweep(records in dataset()) {
        let config = ChartConfig::default();
        let others = records.len() - 1;
        let layout = layout_of(records);

        if others > 0 {
            let total: f64 = layout.sectors.iter().map(|s| s.sweep()).sum();
            prop_assert!((total - (2.0 * PI - config.year_clearance)).abs() < 1e-9);
            prop_assert_eq!(layout.sectors[0].start_angle, config.rotation_offset());
            for pair in layout.sectors.windows(2) {
                prop_assert_eq!(pair[0].end_angle, pair[1].start_angle);
            }
            let members: usize = layout.sectors.iter().map(|s| s.len()).sum();
            prop_assert_eq!(members, others);
        } else {
            prop_assert!(layout.sectors.is_empty());
        }
    }

    #[test]
    fn scores_stay_in_unit_range(records in dataset()) {
        let layout = layout_of(records);
        for b in &layout.bubbles {
            let c = &b.currency;
            prop_assert!((0.0..=1.0).contains(&c.cap_score));
            prop_assert!((0.0..=1.0).contains(&c.vol_score));
            prop_assert!((0.0..=1.0).contains(&c.overall_score));
            prop_assert!(b.geometry.radius >= 15.0 && b.geometry.radius <= 50.0);
        }
    }

    #[test]
    fn largest_cap_has_largest_cap_score(records in dataset()) {
        let layout = layout_of(records);
        let top = layout
            .bubbles
            .iter()
            .max_by(|a, b| a.currency.record.market_cap.total_cmp(&b.currency.record.market_cap))
            .unwrap();
        for b in &layout.bubbles {
            prop_assert!(top.currency.cap_score >= b.currency.cap_score);
        }
    }

    #[test]
    fn year_radius_is_monotonic(years in prop::collection::vec(1990i32..2040, 1..20)) {
        let mapper = YearRadiusMapper::new(years.clone(), &ChartConfig::default());
        let rings = mapper.rings();
        for pair in rings.windows(2) {
            prop_assert!(pair[0].year < pair[1].year);
            prop_assert!(pair[0].radius <= pair[1].radius);
        }
        for ring in &rings {
            prop_assert!(ring.radius >= 100.0 && ring.radius <= 400.0);
        }
    }

    #[test]
    fn centered_record_pinned_to_canvas_center(records in dataset()) {
        let layout = layout_of(records);
        let btc = layout.centered().unwrap();
        prop_assert_eq!(btc.code(), "BTC");
        prop_assert_eq!(btc.geometry.center_x, 600.0);
        prop_assert_eq!(btc.geometry.center_y, 450.0);
    }

    #[test]
    fn line_count_rules(records in dataset()) {
        let layout = layout_of(records);
        for b in &layout.bubbles {
            let record = &b.currency.record;
            if record.name_is_code() || b.geometry.radius < 18.0 {
                prop_assert_eq!(b.text.line_count, 1);
            } else {
                let words = record.name_words().len();
                prop_assert_eq!(b.text.line_count, (1 + words).min(3));
            }
            prop_assert_eq!(b.text.lines.len(), b.text.line_count);
        }
    }

    #[test]
    fn layout_is_deterministic(records in dataset()) {
        let first = layout_of(records.clone());
        let second = layout_of(records);
        prop_assert_eq!(first.fingerprint(), second.fingerprint());
    }
}
