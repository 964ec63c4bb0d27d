//! Layout engine.
//!
//! Runs the whole pipeline in one pass: score every record, split the
//! circle into category sectors, map years to rings, then resolve bubble
//! geometry and text for each currency. The result is a plain value the
//! renderers consume; nothing here touches global state.

use crate::config::ChartConfig;
use crate::currency::{CurrencyRecord, EnrichedRecord};
use crate::error::{LayoutError, LayoutResult};
use crate::geometry::{BubbleGeometry, BubbleResolver, LayoutSubject};
use crate::partition::{partition_categories, CategorySector};
use crate::scorer::enrich;
use crate::text::{TextPlacement, TextResolver};
use crate::years::{YearRadiusMapper, YearRing};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::{HashMap, HashSet};
use tracing::{debug, info};

/// Caption drawn after the last year label
pub const YEAR_CAPTION: &str = "Inception";

/// Horizontal gap between the last year label and the caption
pub const YEAR_CAPTION_GAP: f64 = 50.0;

// ============================================================================
// OUTPUT TYPES
// ============================================================================

/// Everything a renderer needs for one currency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BubbleLayout {
    pub currency: EnrichedRecord,
    pub centered: bool,
    /// Category sector index, `None` for the centered currency
    pub sector: Option<usize>,
    pub geometry: BubbleGeometry,
    pub text: TextPlacement,
}

impl BubbleLayout {
    pub fn code(&self) -> &str {
        self.currency.code()
    }

    pub fn cap_arc_sweep(&self) -> f64 {
        self.geometry.cap_arc.sweep()
    }

    pub fn vol_arc_sweep(&self) -> f64 {
        self.geometry.vol_arc.sweep()
    }
}

/// Rectangle that interrupts the year rings behind their labels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LegendClearance {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearLabel {
    pub text: String,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartLayout {
    pub width: f64,
    pub height: f64,
    pub center_x: f64,
    pub center_y: f64,
    /// Outer radius of the sector wedges
    pub sector_radius: f64,
    pub sectors: Vec<CategorySector>,
    pub rings: Vec<YearRing>,
    pub clearance: LegendClearance,
    pub year_labels: Vec<YearLabel>,
    pub caption: YearLabel,
    /// Centered currency first, then sector by sector
    pub bubbles: Vec<BubbleLayout>,
}

impl ChartLayout {
    pub fn bubble(&self, code: &str) -> Option<&BubbleLayout> {
        self.bubbles.iter().find(|b| b.code() == code)
    }

    pub fn centered(&self) -> Option<&BubbleLayout> {
        self.bubbles.iter().find(|b| b.centered)
    }

    /// SHA-256 of the JSON encoding; equal layouts give equal fingerprints
    pub fn fingerprint(&self) -> String {
        let encoded = serde_json::to_vec(self).unwrap_or_default();
        let mut hasher = Sha256::new();
        hasher.update(&encoded);
        format!("{:x}", hasher.finalize())
    }
}

fn duplicate_code(records: &[CurrencyRecord]) -> Option<String> {
    let mut seen = HashSet::new();
    records
        .iter()
        .find(|r| !seen.insert(r.code.as_str()))
        .map(|r| r.code.clone())
}

// ============================================================================
// LAYOUT CONTEXT
// ============================================================================

/// Scales and partitions derived from one dataset
pub struct LayoutContext<'a> {
    pub config: &'a ChartConfig,
    pub records: Vec<EnrichedRecord>,
    /// Index of the centered currency in `records`
    pub centered: usize,
    pub sectors: Vec<CategorySector>,
    pub years: YearRadiusMapper,
    bubbles: BubbleResolver,
    text: TextResolver,
}

impl<'a> LayoutContext<'a> {
    /// Score the records and derive sectors and year rings
    pub fn build(records: Vec<CurrencyRecord>, config: &'a ChartConfig) -> LayoutResult<Self> {
        config.validate()?;
        if records.is_empty() {
            return Err(LayoutError::EmptyDataset);
        }

        if let Some(code) = duplicate_code(&records) {
            return Err(LayoutError::DuplicateCode(code));
        }

        let records = enrich(records, config)?;
        let centered = records
            .iter()
            .position(|r| r.code() == config.centered_code)
            .ok_or_else(|| LayoutError::MissingCenterRecord(config.centered_code.clone()))?;

        let others: Vec<&EnrichedRecord> = records
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != centered)
            .map(|(_, r)| r)
            .collect();

        let sectors = partition_categories(&others, config);
        let years = YearRadiusMapper::new(others.iter().map(|r| r.record.year), config);

        Ok(LayoutContext {
            config,
            centered,
            sectors,
            years,
            bubbles: BubbleResolver::new(config),
            text: TextResolver::new(config),
            records,
        })
    }

    /// Resolve every record to its subject once: the centered currency
    /// first, then each sector's members in slot order
    pub fn subjects(&self) -> Vec<(&EnrichedRecord, Option<usize>, LayoutSubject<'_>)> {
        let by_code: HashMap<&str, &EnrichedRecord> =
            self.records.iter().map(|r| (r.code(), r)).collect();

        let mut subjects = Vec::with_capacity(self.records.len());
        subjects.push((&self.records[self.centered], None, LayoutSubject::Centered));

        for (index, sector) in self.sectors.iter().enumerate() {
            for (slot, code) in sector.members.iter().enumerate() {
                if let Some(record) = by_code.get(code.as_str()) {
                    subjects.push((*record, Some(index), LayoutSubject::Categorized { sector, slot }));
                }
            }
        }

        subjects
    }

    pub fn clearance(&self) -> LegendClearance {
        LegendClearance {
            x: self.config.mid_x(),
            y: self.config.mid_y() - self.config.min_bubble,
            width: self.config.mid_x(),
            height: 2.0 * self.config.min_bubble,
        }
    }

    pub fn year_labels(&self) -> (Vec<YearLabel>, YearLabel) {
        let (mid_x, mid_y) = (self.config.mid_x(), self.config.mid_y());
        let labels: Vec<YearLabel> = self
            .years
            .rings()
            .iter()
            .map(|ring| YearLabel {
                text: ring.year.to_string(),
                x: mid_x + ring.radius,
                y: mid_y,
            })
            .collect();

        let last_x = labels.last().map(|l| l.x).unwrap_or(0.0);
        let caption = YearLabel {
            text: YEAR_CAPTION.to_string(),
            x: last_x + YEAR_CAPTION_GAP,
            y: mid_y,
        };
        (labels, caption)
    }

    pub fn resolve(&self) -> ChartLayout {
        let bubbles: Vec<BubbleLayout> = self
            .subjects()
            .into_iter()
            .map(|(record, sector, subject)| {
                let geometry = self.bubbles.resolve(record, subject, &self.years);
                let text = self.text.resolve(record, &geometry);
                BubbleLayout {
                    currency: record.clone(),
                    centered: subject.is_centered(),
                    sector,
                    geometry,
                    text,
                }
            })
            .collect();

        let (year_labels, caption) = self.year_labels();
        debug!(bubbles = bubbles.len(), "resolved bubble geometry");

        ChartLayout {
            width: self.config.width,
            height: self.config.height,
            center_x: self.config.mid_x(),
            center_y: self.config.mid_y(),
            sector_radius: self.config.sector_radius(),
            sectors: self.sectors.clone(),
            rings: self.years.rings(),
            clearance: self.clearance(),
            year_labels,
            caption,
            bubbles,
        }
    }
}

/// Full layout pass over a loaded dataset
pub fn compute_layout(records: Vec<CurrencyRecord>, config: &ChartConfig) -> LayoutResult<ChartLayout> {
    let context = LayoutContext::build(records, config)?;
    let layout = context.resolve();
    info!(
        currencies = layout.bubbles.len(),
        sectors = layout.sectors.len(),
        rings = layout.rings.len(),
        "chart layout complete"
    );
    Ok(layout)
}
