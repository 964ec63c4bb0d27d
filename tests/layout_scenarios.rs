// End-to-end layout checks on fixed datasets

use crypto_bubbles::{
    compute_layout, load_csv, render_svg, ChartConfig, CurrencyRecord, LayoutError, LineKind,
};
use std::f64::consts::PI;
use std::path::Path;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_two_currency_scenario() {
    let records = vec![
        CurrencyRecord::new("BTC", "Bitcoin", 2009, "", 100.0, 50.0),
        CurrencyRecord::new("ETH", "Ether Classic", 2015, "Platform", 50.0, 50.0),
    ];
    let config = ChartConfig::default();
    let layout = compute_layout(records, &config).unwrap();

    let btc = layout.bubble("BTC").unwrap();
    assert!(btc.centered);
    assert_eq!((btc.geometry.center_x, btc.geometry.center_y), (600.0, 450.0));

    let eth = layout.bubble("ETH").unwrap();
    let sector = &layout.sectors[0];
    assert_eq!(layout.sectors.len(), 1);
    assert!(approx(eth.geometry.angle, config.rotation_offset() + sector.sweep() / 2.0));
    assert_eq!(eth.geometry.ring_radius, 100.0);

    let expected_lines = if eth.geometry.radius >= 18.0 { 3 } else { 1 };
    assert_eq!(eth.text.line_count, expected_lines);

    // 2·0.5 + 1 = 2 is the smallest overall value, so ETH is the smallest bubble
    assert_eq!(eth.currency.overall_score, 0.0);
    assert_eq!(eth.geometry.radius, 15.0);
    assert_eq!(eth.text.line_count, 1);
}

#[test]
fn test_scenario_with_legible_bubble_has_three_lines() {
    let records = vec![
        CurrencyRecord::new("BTC", "Bitcoin", 2009, "", 100.0, 50.0),
        CurrencyRecord::new("ETC", "Ether Classic", 2016, "Platform", 90.0, 50.0),
        CurrencyRecord::new("DUST", "Dust", 2017, "Platform", 1.0, 1.0),
    ];
    let layout = compute_layout(records, &ChartConfig::default()).unwrap();

    let etc = layout.bubble("ETC").unwrap();
    assert!(etc.geometry.radius >= 18.0);
    assert_eq!(etc.text.line_count, 3);
    let kinds: Vec<LineKind> = etc.text.lines.iter().map(|l| l.kind).collect();
    assert_eq!(kinds, vec![LineKind::Code, LineKind::Name, LineKind::Name]);
    assert!(approx(etc.text.lines[1].font_size, etc.text.font_size * 0.8));
}

#[test]
fn test_centered_record_required() {
    let records = vec![CurrencyRecord::new("ETH", "Ethereum", 2015, "Platform", 50.0, 50.0)];
    let err = compute_layout(records, &ChartConfig::default()).unwrap_err();
    assert_eq!(err, LayoutError::MissingCenterRecord("BTC".to_string()));
}

#[test]
fn test_centered_only_dataset() {
    let records = vec![CurrencyRecord::new("BTC", "Bitcoin", 2009, "", 100.0, 50.0)];
    let layout = compute_layout(records, &ChartConfig::default()).unwrap();

    assert!(layout.sectors.is_empty());
    assert!(layout.rings.is_empty());
    assert_eq!(layout.bubbles.len(), 1);
    assert!(layout.bubbles[0].centered);
}

#[test]
fn test_sample_dataset() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/currencies.csv");
    let records = load_csv(&path).unwrap();
    assert_eq!(records.len(), 12);

    let config = ChartConfig::default();
    let layout = compute_layout(records, &config).unwrap();

    let names: Vec<&str> = layout.sectors.iter().map(|s| s.category.as_str()).collect();
    assert_eq!(names, vec!["Payments", "Meme", "Privacy", "Platform"]);

    let total: f64 = layout.sectors.iter().map(|s| s.sweep()).sum();
    assert!(approx(total, 2.0 * PI - config.year_clearance));

    let btc = layout.centered().unwrap();
    assert_eq!(btc.code(), "BTC");
    assert_eq!(btc.currency.cap_score, 1.0);
    assert_eq!(btc.text.line_count, 2);

    // Name equals code in uppercase
    assert_eq!(layout.bubble("DOGE").unwrap().text.line_count, 1);

    // Four-word name keeps only two words
    let bsv = layout.bubble("BSV").unwrap();
    assert!(bsv.text.line_count <= 3);
    assert!(bsv.text.lines.iter().all(|l| l.text != "Satoshi" && l.text != "Vision"));

    assert_eq!(layout.rings.first().unwrap().year, 2011);
    assert_eq!(layout.rings.first().unwrap().radius, 100.0);
    assert_eq!(layout.rings.last().unwrap().year, 2018);
    assert_eq!(layout.rings.last().unwrap().radius, 400.0);

    let svg = render_svg(&layout);
    assert_eq!(svg.matches(r#"class="c-code""#).count(), 12);
}

#[test]
fn test_layout_is_idempotent() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/currencies.csv");
    let config = ChartConfig::default();

    let first = compute_layout(load_csv(&path).unwrap(), &config).unwrap();
    let second = compute_layout(load_csv(&path).unwrap(), &config).unwrap();

    assert_eq!(first.fingerprint(), second.fingerprint());
    assert_eq!(render_svg(&first), render_svg(&second));
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}
