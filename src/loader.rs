// 📂 CSV Loader - turns the currency spreadsheet export into CurrencyRecords
//
// Column headers follow the published dataset; numbers may carry thousands
// separators ("1,234,567"). Every numeric fault is rejected here so the
// layout core only ever sees clean values.

use crate::currency::CurrencyRecord;
use crate::error::LayoutError;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// One CSV row exactly as written in the file
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "Code")]
    code: String,

    #[serde(rename = "Name")]
    name: String,

    #[serde(rename = "Inception")]
    inception: String,

    #[serde(rename = "Category", default)]
    category: String,

    #[serde(rename = "Type", default)]
    kind: String,

    #[serde(rename = "Market Cap")]
    market_cap: String,

    #[serde(rename = "30 Day Trade Volume")]
    volume_30d: String,

    #[serde(rename = "Hard-Fork Of", default)]
    fork_of: String,

    #[serde(rename = "Similar To", default)]
    similar_to: String,
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

impl CsvRow {
    fn into_record(self) -> Result<CurrencyRecord, LayoutError> {
        let code = self.code.trim().to_string();

        let year = self
            .inception
            .trim()
            .parse::<i32>()
            .map_err(|_| LayoutError::malformed(&code, "Inception", &self.inception))?;
        let market_cap = parse_number(&self.market_cap)
            .ok_or_else(|| LayoutError::malformed(&code, "Market Cap", &self.market_cap))?;
        let volume_30d = parse_number(&self.volume_30d).ok_or_else(|| {
            LayoutError::malformed(&code, "30 Day Trade Volume", &self.volume_30d)
        })?;

        Ok(CurrencyRecord {
            code,
            name: self.name.trim().to_string(),
            year,
            category: self.category.trim().to_string(),
            market_cap,
            volume_30d,
            kind: non_empty(self.kind),
            fork_of: non_empty(self.fork_of),
            similar_to: non_empty(self.similar_to),
        })
    }
}

/// Parse a non-negative number, ignoring surrounding whitespace and `,` separators
pub fn parse_number(raw: &str) -> Option<f64> {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        return None;
    }
    match cleaned.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Some(value),
        _ => None,
    }
}

/// Load currency records from any CSV source, preserving file order
pub fn load_csv_reader<R: Read>(reader: R) -> Result<Vec<CurrencyRecord>> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut records = Vec::new();

    for (index, result) in rdr.deserialize().enumerate() {
        // Header is line 1
        let line = index + 2;
        let row: CsvRow = result.with_context(|| format!("Failed to deserialize row at line {}", line))?;
        let record = row
            .into_record()
            .with_context(|| format!("Rejected row at line {}", line))?;
        records.push(record);
    }

    debug!(count = records.len(), "loaded currency records");
    Ok(records)
}

/// Load currency records from a CSV file
pub fn load_csv(csv_path: &Path) -> Result<Vec<CurrencyRecord>> {
    let file = std::fs::File::open(csv_path)
        .with_context(|| format!("Failed to open CSV file {:?}", csv_path))?;
    load_csv_reader(file)
}
