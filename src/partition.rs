// 🥧 Category Partitioner - one angular sector per category
//
// Every non-centered currency gets the same share of the circle, so a
// sector's sweep is proportional to its member count. Sectors are laid
// out back to back from the rotation offset; the year clearance wedge
// around angle 0 stays free for the year legend.

use crate::config::ChartConfig;
use crate::currency::EnrichedRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySector {
    pub category: String,
    /// Member codes in first-seen order
    pub members: Vec<String>,
    pub start_angle: f64,
    pub end_angle: f64,
}

impl CategorySector {
    pub fn sweep(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Placement angle of the `slot`-th member: the sweep is inset by 10%
    /// on each edge and each member sits in the middle of an equal sub-slot
    pub fn slot_angle(&self, slot: usize) -> f64 {
        let sweep = self.sweep();
        let min_angle = self.start_angle + sweep * SECTOR_INSET;
        let per_bubble = sweep * (1.0 - 2.0 * SECTOR_INSET) / self.len().max(1) as f64;
        min_angle + slot as f64 * per_bubble + 0.5 * per_bubble
    }
}

/// Fraction of a sector's sweep kept empty at each edge
pub const SECTOR_INSET: f64 = 0.1;

/// Group records by category, keeping categories and members in first-seen order
pub fn group_by_category<'a, I>(records: I) -> Vec<(String, Vec<&'a EnrichedRecord>)>
where
    I: IntoIterator<Item = &'a EnrichedRecord>,
{
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    let mut groups: Vec<(String, Vec<&'a EnrichedRecord>)> = Vec::new();

    for record in records {
        let category = record.record.category.as_str();
        match index.get(category) {
            Some(&i) => groups[i].1.push(record),
            None => {
                index.insert(category, groups.len());
                groups.push((category.to_string(), vec![record]));
            }
        }
    }

    groups
}

/// Split the available sweep among categories. `records` must already
/// exclude the centered currency.
pub fn partition_categories(records: &[&EnrichedRecord], config: &ChartConfig) -> Vec<CategorySector> {
    let total = records.len();
    if total == 0 {
        return Vec::new();
    }

    let sweep = config.sector_sweep();
    let offset = config.rotation_offset();
    let per_bubble = sweep / total as f64;

    let groups = group_by_category(records.iter().copied());
    let last = groups.len() - 1;
    let mut assigned = 0usize;
    let mut start = offset;
    let mut sectors = Vec::with_capacity(groups.len());

    for (i, (category, members)) in groups.into_iter().enumerate() {
        assigned += members.len();
        // Angles come from the cumulative count so rounding never piles up;
        // the last sector closes exactly on the clearance edge.
        let end = if i == last {
            offset + sweep
        } else {
            offset + per_bubble * assigned as f64
        };

        sectors.push(CategorySector {
            category,
            members: members.iter().map(|r| r.code().to_string()).collect(),
            start_angle: start,
            end_angle: end,
        });
        start = end;
    }

    debug!(sectors = sectors.len(), currencies = total, "partitioned categories");
    sectors
}
