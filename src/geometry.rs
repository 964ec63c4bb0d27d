// 🫧 Bubble Geometry Resolver - where each currency sits and how big it is
//
// Angles of the chart grow counter-clockwise on screen starting from the
// 3 o'clock direction. Score arcs use the arc convention instead: 0 at
// 12 o'clock, growing clockwise.

use crate::config::ChartConfig;
use crate::currency::EnrichedRecord;
use crate::partition::CategorySector;
use crate::scale::LinearScale;
use crate::years::YearRadiusMapper;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// How a currency is positioned, decided once per record
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LayoutSubject<'a> {
    /// Pinned to the canvas center, belongs to no sector
    Centered,
    /// Placed in the `slot`-th sub-slot of its category sector
    Categorized {
        sector: &'a CategorySector,
        slot: usize,
    },
}

impl LayoutSubject<'_> {
    pub fn is_centered(&self) -> bool {
        matches!(self, LayoutSubject::Centered)
    }
}

/// Which side of the bubble an arc grows towards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArcSide {
    Right,
    Left,
}

/// Partial ring drawn inside a bubble outline
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreArc {
    pub side: ArcSide,
    pub inner_radius: f64,
    pub outer_radius: f64,
    /// Arc angle of the bubble's bottom point
    pub start_angle: f64,
    /// Signed end angle; right arcs run backwards from the start
    pub end_angle: f64,
}

/// Inner edge of the score arcs, relative to the bubble radius
pub const ARC_INNER_RATIO: f64 = 0.85;

impl ScoreArc {
    /// Half a circle scaled by `score`
    pub fn new(side: ArcSide, score: f64, bubble_radius: f64) -> Self {
        let length = PI * score;
        let signed = match side {
            ArcSide::Right => -length,
            ArcSide::Left => length,
        };
        ScoreArc {
            side,
            inner_radius: ARC_INNER_RATIO * bubble_radius,
            outer_radius: bubble_radius,
            start_angle: PI,
            end_angle: PI + signed,
        }
    }

    /// Unsigned angular length
    pub fn sweep(&self) -> f64 {
        (self.end_angle - self.start_angle).abs()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BubbleGeometry {
    pub center_x: f64,
    pub center_y: f64,
    pub radius: f64,
    /// Placement angle in chart convention (0 for the centered bubble)
    pub angle: f64,
    /// Distance from the canvas center (0 for the centered bubble)
    pub ring_radius: f64,
    pub cap_arc: ScoreArc,
    pub vol_arc: ScoreArc,
}

/// Scales shared by every bubble
#[derive(Debug, Clone, Copy)]
pub struct BubbleResolver {
    mid: (f64, f64),
    size: LinearScale,
}

impl BubbleResolver {
    pub fn new(config: &ChartConfig) -> Self {
        BubbleResolver {
            mid: (config.mid_x(), config.mid_y()),
            size: LinearScale::new((0.0, 1.0), (config.min_bubble, config.max_bubble)),
        }
    }

    pub fn bubble_radius(&self, overall_score: f64) -> f64 {
        self.size.apply(overall_score)
    }

    pub fn resolve(
        &self,
        record: &EnrichedRecord,
        subject: LayoutSubject<'_>,
        years: &YearRadiusMapper,
    ) -> BubbleGeometry {
        let (angle, ring_radius) = match subject {
            LayoutSubject::Centered => (0.0, 0.0),
            LayoutSubject::Categorized { sector, slot } => {
                (sector.slot_angle(slot), years.radius(record.record.year))
            }
        };

        // Screen y grows downward, so the angle is negated
        let (center_x, center_y) = if subject.is_centered() {
            self.mid
        } else {
            (
                self.mid.0 + ring_radius * (-angle).cos(),
                self.mid.1 + ring_radius * (-angle).sin(),
            )
        };

        let radius = self.bubble_radius(record.overall_score);

        BubbleGeometry {
            center_x,
            center_y,
            radius,
            angle,
            ring_radius,
            cap_arc: ScoreArc::new(ArcSide::Right, record.cap_score, radius),
            vol_arc: ScoreArc::new(ArcSide::Left, record.vol_score, radius),
        }
    }
}
