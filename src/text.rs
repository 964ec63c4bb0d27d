// 🔤 Text Layout Resolver - code and name lines inside a bubble

use crate::config::ChartConfig;
use crate::currency::EnrichedRecord;
use crate::geometry::BubbleGeometry;
use crate::scale::LinearScale;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Vertical position of each line as a fraction of the bubble diameter
/// (0 = top, 1 = bottom), indexed by line count
pub const LINE_OFFSETS: [&[f64]; 3] = [&[0.5], &[0.35, 0.6], &[0.3, 0.55, 0.75]];

/// Most lines a bubble can hold: the code plus two name words
pub const MAX_LINES: usize = 3;

/// Name lines are smaller than the code line
pub const NAME_FONT_RATIO: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineKind {
    Code,
    Name,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextLine {
    pub text: String,
    pub kind: LineKind,
    pub y: f64,
    pub font_size: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextPlacement {
    pub line_count: usize,
    /// Font size of the code line
    pub font_size: f64,
    pub lines: Vec<TextLine>,
}

/// Offsets for `line_count` lines
pub fn line_offsets(line_count: usize) -> &'static [f64] {
    LINE_OFFSETS[line_count.clamp(1, MAX_LINES) - 1]
}

pub struct TextResolver {
    font: LinearScale,
    legibility_radius: f64,
}

impl TextResolver {
    pub fn new(config: &ChartConfig) -> Self {
        TextResolver {
            font: LinearScale::new((0.0, 1.0), (config.min_font, config.max_font)),
            legibility_radius: config.legibility_radius,
        }
    }

    pub fn font_size(&self, overall_score: f64) -> f64 {
        self.font.apply(overall_score)
    }

    /// Code only when the name adds nothing or the bubble is too small to read
    pub fn shows_name(&self, record: &EnrichedRecord, bubble_radius: f64) -> bool {
        !(record.record.name_is_code() || bubble_radius < self.legibility_radius)
    }

    pub fn resolve(&self, record: &EnrichedRecord, bubble: &BubbleGeometry) -> TextPlacement {
        let font_size = self.font_size(record.overall_score);
        let top = bubble.center_y - bubble.radius;
        let diameter = 2.0 * bubble.radius;

        let mut texts = vec![(record.code().to_string(), LineKind::Code, font_size)];
        if self.shows_name(record, bubble.radius) {
            let words = record.record.name_words();
            if words.len() > MAX_LINES - 1 {
                warn!(
                    code = record.code(),
                    dropped = words.len() - (MAX_LINES - 1),
                    "name has more words than fit in a bubble"
                );
            }
            texts.extend(
                words
                    .into_iter()
                    .take(MAX_LINES - 1)
                    .map(|w| (w.to_string(), LineKind::Name, font_size * NAME_FONT_RATIO)),
            );
        }

        let offsets = line_offsets(texts.len());
        let lines: Vec<TextLine> = texts
            .into_iter()
            .zip(offsets)
            .map(|((text, kind, font_size), offset)| TextLine {
                text,
                kind,
                y: top + offset * diameter,
                font_size,
            })
            .collect();

        TextPlacement {
            line_count: lines.len(),
            font_size,
            lines,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::currency::CurrencyRecord;
    use crate::geometry::{ArcSide, ScoreArc};

    fn enriched(code: &str, name: &str, overall: f64) -> EnrichedRecord {
        EnrichedRecord {
            record: CurrencyRecord::new(code, name, 2015, "Platform", 1.0, 1.0),
            cap_score: 1.0,
            vol_score: 1.0,
            overall_score: overall,
        }
    }

    fn bubble(center_y: f64, radius: f64) -> BubbleGeometry {
        BubbleGeometry {
            center_x: 0.0,
            center_y,
            radius,
            angle: 0.0,
            ring_radius: 0.0,
            cap_arc: ScoreArc::new(ArcSide::Right, 1.0, radius),
            vol_arc: ScoreArc::new(ArcSide::Left, 1.0, radius),
        }
    }

    #[test]
    fn test_three_lines_for_two_word_name() {
        let resolver = TextResolver::new(&ChartConfig::default());
        let placement = resolver.resolve(&enriched("ETC", "Ethereum Classic", 1.0), &bubble(100.0, 50.0));

        assert_eq!(placement.line_count, 3);
        assert_eq!(placement.font_size, 20.0);
        let texts: Vec<&str> = placement.lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["ETC", "Ethereum", "Classic"]);
        // top = 50, diameter = 100
        assert!((placement.lines[0].y - 80.0).abs() < 1e-9);
        assert!((placement.lines[1].y - 105.0).abs() < 1e-9);
        assert!((placement.lines[2].y - 125.0).abs() < 1e-9);
        assert_eq!(placement.lines[1].font_size, 16.0);
        assert_eq!(placement.lines[1].kind, LineKind::Name);
    }

    #[test]
    fn test_two_lines_for_single_word_name() {
        let resolver = TextResolver::new(&ChartConfig::default());
        let placement = resolver.resolve(&enriched("ETH", "Ethereum", 0.5), &bubble(100.0, 30.0));

        assert_eq!(placement.line_count, 2);
        assert_eq!(placement.font_size, 15.0);
        assert!((placement.lines[0].y - (70.0 + 0.35 * 60.0)).abs() < 1e-9);
    }

    #[test]
    fn test_name_equal_to_code_is_single_line() {
        let resolver = TextResolver::new(&ChartConfig::default());
        let placement = resolver.resolve(&enriched("DOGE", "Doge", 1.0), &bubble(100.0, 50.0));

        assert_eq!(placement.line_count, 1);
        assert_eq!(placement.lines[0].y, 100.0);
    }

    #[test]
    fn test_small_bubble_is_single_line() {
        let resolver = TextResolver::new(&ChartConfig::default());
        let placement = resolver.resolve(&enriched("ETC", "Ethereum Classic", 0.0), &bubble(100.0, 17.9));
        assert_eq!(placement.line_count, 1);
        assert_eq!(placement.font_size, 10.0);
    }

    #[test]
    fn test_third_name_word_dropped() {
        let resolver = TextResolver::new(&ChartConfig::default());
        let placement = resolver.resolve(&enriched("BSV", "Bitcoin SV Satoshi Vision", 1.0), &bubble(0.0, 50.0));

        assert_eq!(placement.line_count, 3);
        assert_eq!(placement.lines[2].text, "SV");
    }
}
