// Crypto Bubbles - Core Library
// Exposes the layout engine for the CLI, the API server and tests

pub mod config;
pub mod currency;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod loader;
pub mod partition;
pub mod scale;
pub mod scorer;
pub mod svg;
pub mod text;
pub mod years;

// Only compile the terminal browser when the TUI feature is enabled
#[cfg(feature = "tui")]
pub mod ui;

// Re-export commonly used types
pub use config::ChartConfig;
pub use currency::{CurrencyRecord, EnrichedRecord};
pub use error::{LayoutError, LayoutResult};
pub use geometry::{ArcSide, BubbleGeometry, BubbleResolver, LayoutSubject, ScoreArc};
pub use layout::{
    compute_layout, BubbleLayout, ChartLayout, LayoutContext, LegendClearance, YearLabel,
};
pub use loader::{load_csv, load_csv_reader, parse_number};
pub use partition::{group_by_category, partition_categories, CategorySector};
pub use scale::{LinearScale, LogScale};
pub use scorer::enrich;
pub use svg::{render_html, render_svg};
pub use text::{LineKind, TextLine, TextPlacement, TextResolver};
pub use years::{YearRadiusMapper, YearRing};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Install the `tracing` subscriber used by the binaries.
/// `RUST_LOG` overrides the default `info` level.
pub fn init_logging() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
