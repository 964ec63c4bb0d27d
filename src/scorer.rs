// 🧮 Scorer - normalizes market cap and volume into comparable [0, 1] scores
//
// Two log scales are involved:
// - overall: domain is the dataset's own min/max of 2·cap + vol, so the
//   mapping changes with the dataset
// - cap/vol: fixed domain [score_floor, 1], clamped. Raw scores below the
//   floor all collapse onto 0. Tiny currencies become indistinguishable
//   from each other on purpose so the arcs of mid-sized ones stay readable.

use crate::config::ChartConfig;
use crate::currency::{CurrencyRecord, EnrichedRecord};
use crate::error::{LayoutError, LayoutResult};
use crate::scale::LogScale;
use tracing::{debug, warn};

/// Raw ratios before any log compression
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawScores {
    pub cap: f64,
    pub vol: f64,
    pub overall: f64,
}

/// Cap weighs twice as much as volume
pub const CAP_WEIGHT: f64 = 2.0;
pub const VOL_WEIGHT: f64 = 1.0;

fn max_of(records: &[CurrencyRecord], field: impl Fn(&CurrencyRecord) -> f64) -> f64 {
    records.iter().map(field).fold(0.0, f64::max)
}

/// Oldest first. `sort_by_key` is stable, so currencies sharing an
/// inception year keep their input order.
pub fn sort_by_year(records: &mut [CurrencyRecord]) {
    records.sort_by_key(|r| r.year);
}

/// Divide by the dataset maxima and combine 2:1
pub fn raw_scores(records: &[CurrencyRecord]) -> LayoutResult<Vec<RawScores>> {
    if records.is_empty() {
        return Err(LayoutError::EmptyDataset);
    }

    let max_cap = max_of(records, |r| r.market_cap);
    let max_vol = max_of(records, |r| r.volume_30d);

    if max_cap <= 0.0 {
        return Err(LayoutError::DegenerateData("Market Cap".to_string()));
    }
    if max_vol <= 0.0 {
        return Err(LayoutError::DegenerateData("30 Day Trade Volume".to_string()));
    }

    Ok(records
        .iter()
        .map(|r| {
            let cap = r.market_cap / max_cap;
            let vol = r.volume_30d / max_vol;
            RawScores {
                cap,
                vol,
                overall: CAP_WEIGHT * cap + VOL_WEIGHT * vol,
            }
        })
        .collect())
}

/// Log scale over the dataset's own overall range. Zero overall values
/// have no logarithm and are left out of the domain; they map to 0.
pub fn overall_scale(raw: &[RawScores], base: f64) -> LogScale {
    let positive = raw.iter().map(|s| s.overall).filter(|v| *v > 0.0);
    let min = positive.clone().fold(f64::INFINITY, f64::min);
    let max = positive.fold(0.0, f64::max);

    if min == max {
        warn!(overall = max, "every currency has the same overall score, sizes collapse to the minimum");
    }

    LogScale::new(base, (min, max), (0.0, 1.0)).clamped()
}

/// Fixed-domain clamped log scale for the individual cap and vol scores
pub fn score_scale(config: &ChartConfig) -> LogScale {
    LogScale::new(config.log_base, (config.score_floor, 1.0), (0.0, 1.0)).clamped()
}

/// Sort by year, then attach cap/vol/overall scores to every record
pub fn enrich(mut records: Vec<CurrencyRecord>, config: &ChartConfig) -> LayoutResult<Vec<EnrichedRecord>> {
    sort_by_year(&mut records);

    let raw = raw_scores(&records)?;
    let overall = overall_scale(&raw, config.log_base);
    let score = score_scale(config);

    let enriched: Vec<EnrichedRecord> = records
        .into_iter()
        .zip(raw)
        .map(|(record, raw)| EnrichedRecord {
            record,
            cap_score: score.apply(raw.cap),
            vol_score: score.apply(raw.vol),
            overall_score: overall.apply(raw.overall),
        })
        .collect();

    debug!(count = enriched.len(), "scored currencies");
    Ok(enriched)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(code: &str, year: i32, cap: f64, vol: f64) -> CurrencyRecord {
        CurrencyRecord::new(code, code, year, "Test", cap, vol)
    }

    #[test]
    fn test_sort_is_stable_within_year() {
        let mut records = vec![
            record("B", 2015, 1.0, 1.0),
            record("A", 2009, 1.0, 1.0),
            record("C", 2015, 1.0, 1.0),
            record("D", 2013, 1.0, 1.0),
            record("E", 2015, 1.0, 1.0),
        ];
        sort_by_year(&mut records);

        let codes: Vec<&str> = records.iter().map(|r| r.code.as_str()).collect();
        assert_eq!(codes, vec!["A", "D", "B", "C", "E"]);
    }

    #[test]
    fn test_raw_scores() {
        let records = vec![record("BTC", 2009, 100.0, 50.0), record("ETH", 2015, 50.0, 25.0)];
        let raw = raw_scores(&records).unwrap();

        assert_eq!(raw[0], RawScores { cap: 1.0, vol: 1.0, overall: 3.0 });
        assert_eq!(raw[1], RawScores { cap: 0.5, vol: 0.5, overall: 1.5 });
    }

    #[test]
    fn test_identical_caps_score_one() {
        let records = vec![record("A", 2009, 7.0, 1.0), record("B", 2010, 7.0, 2.0)];
        let raw = raw_scores(&records).unwrap();
        assert!(raw.iter().all(|s| s.cap == 1.0));
    }

    #[test]
    fn test_degenerate_data_rejected() {
        let records = vec![record("A", 2009, 0.0, 1.0), record("B", 2010, 0.0, 2.0)];
        assert_eq!(
            raw_scores(&records),
            Err(LayoutError::DegenerateData("Market Cap".to_string()))
        );

        let records = vec![record("A", 2009, 1.0, 0.0)];
        assert!(matches!(raw_scores(&records), Err(LayoutError::DegenerateData(_))));

        assert_eq!(raw_scores(&[]), Err(LayoutError::EmptyDataset));
    }

    #[test]
    fn test_enrich_scores_in_unit_range() {
        let config = ChartConfig::default();
        let records = vec![
            record("ETH", 2015, 30.0, 40.0),
            record("BTC", 2009, 100.0, 50.0),
            record("XMR", 2014, 0.5, 0.001),
            record("NIL", 2016, 0.0, 0.0),
        ];
        let enriched = enrich(records, &config).unwrap();

        assert_eq!(enriched[0].code(), "BTC");
        assert_eq!(enriched[0].cap_score, 1.0);
        assert_eq!(enriched[0].overall_score, 1.0);
        for e in &enriched {
            assert!((0.0..=1.0).contains(&e.cap_score), "{:?}", e);
            assert!((0.0..=1.0).contains(&e.vol_score), "{:?}", e);
            assert!((0.0..=1.0).contains(&e.overall_score), "{:?}", e);
        }

        // vol ratio 0.00002 is below the 0.01 floor
        let xmr = enriched.iter().find(|e| e.code() == "XMR").unwrap();
        assert_eq!(xmr.vol_score, 0.0);
        let nil = enriched.iter().find(|e| e.code() == "NIL").unwrap();
        assert_eq!(nil.overall_score, 0.0);
    }

    #[test]
    fn test_overall_is_monotonic() {
        let config = ChartConfig::default();
        let records = vec![
            record("A", 2009, 100.0, 100.0),
            record("B", 2010, 60.0, 10.0),
            record("C", 2011, 30.0, 40.0),
            record("D", 2012, 5.0, 5.0),
        ];
        let enriched = enrich(records, &config).unwrap();
        let overall: Vec<f64> = enriched.iter().map(|e| e.overall_score).collect();

        assert_eq!(overall[0], 1.0);
        assert!(overall[1] > overall[2]);
        assert!(overall[2] > overall[3]);
        assert_eq!(overall[3], 0.0);
    }
}
