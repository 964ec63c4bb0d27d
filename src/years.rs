// 📅 Year Radius Mapper - inception year → ring radius

use crate::config::ChartConfig;
use crate::scale::LinearScale;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearRing {
    pub year: i32,
    pub radius: f64,
}

/// Linear year scale between the inner and outer ring
#[derive(Debug, Clone, PartialEq)]
pub struct YearRadiusMapper {
    years: Vec<i32>,
    scale: LinearScale,
}

impl YearRadiusMapper {
    /// Build from any list of years; duplicates are removed and the rest sorted.
    /// With a single distinct year every ring sits on the inner radius.
    pub fn new(years: impl IntoIterator<Item = i32>, config: &ChartConfig) -> Self {
        let mut years: Vec<i32> = years.into_iter().collect();
        years.sort_unstable();
        years.dedup();

        let domain = match (years.first(), years.last()) {
            (Some(&first), Some(&last)) => (first as f64, last as f64),
            _ => (0.0, 0.0),
        };
        let scale = LinearScale::new(domain, (config.min_ring(), config.max_ring()));

        debug!(distinct_years = years.len(), "mapped year rings");
        YearRadiusMapper { years, scale }
    }

    pub fn radius(&self, year: i32) -> f64 {
        self.scale.apply(year as f64)
    }

    pub fn years(&self) -> &[i32] {
        &self.years
    }

    pub fn rings(&self) -> Vec<YearRing> {
        self.years
            .iter()
            .map(|&year| YearRing {
                year,
                radius: self.radius(year),
            })
            .collect()
    }
}
