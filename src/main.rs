use anyhow::{bail, Context, Result};
use std::env;
use std::path::{Path, PathBuf};

use crypto_bubbles::{compute_layout, init_logging, load_csv, render_svg, ChartConfig, ChartLayout};

/// Parsed command line
struct Args {
    command: String,
    data: PathBuf,
    out: PathBuf,
    config: Option<PathBuf>,
}

fn parse_args() -> Result<Args> {
    let mut args = env::args().skip(1);
    let command = args.next().unwrap_or_else(|| "browse".to_string());

    let mut parsed = Args {
        command,
        data: PathBuf::from("data.csv"),
        out: PathBuf::from("chart.svg"),
        config: None,
    };

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--out" | "-o" => {
                parsed.out = args.next().map(PathBuf::from).context("--out needs a path")?;
            }
            "--config" | "-c" => {
                parsed.config = Some(args.next().map(PathBuf::from).context("--config needs a path")?);
            }
            flag if flag.starts_with('-') => bail!("Unknown option: {}", flag),
            path => parsed.data = PathBuf::from(path),
        }
    }

    Ok(parsed)
}

fn main() -> Result<()> {
    init_logging();
    let args = parse_args()?;

    match args.command.as_str() {
        "render" => run_render(&args)?,
        "layout" => run_layout(&args)?,
        "browse" => run_browse(&args)?,
        "help" | "--help" | "-h" => print_help(),
        other => {
            print_help();
            bail!("Unknown command: {}", other);
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<ChartConfig> {
    match path {
        Some(path) => ChartConfig::from_file(path),
        None => Ok(ChartConfig::default()),
    }
}

/// Load CSV and run the layout pass; nothing is written before this succeeds
fn build_layout(args: &Args) -> Result<ChartLayout> {
    let config = load_config(args.config.as_deref())?;
    let records = load_csv(&args.data)?;
    let layout = compute_layout(records, &config)
        .with_context(|| format!("Failed to lay out {:?}", args.data))?;
    Ok(layout)
}

fn run_render(args: &Args) -> Result<()> {
    println!("🫧 Crypto Bubbles - Render SVG");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    println!("\n📂 Loading {:?}...", args.data);
    let layout = build_layout(args)?;
    println!(
        "✓ {} currencies in {} categories across {} years",
        layout.bubbles.len(),
        layout.sectors.len(),
        layout.rings.len()
    );

    println!("\n🎨 Rendering...");
    let svg = render_svg(&layout);
    std::fs::write(&args.out, svg).with_context(|| format!("Failed to write {:?}", args.out))?;
    println!("✓ Wrote {:?}", args.out);
    println!("✓ Fingerprint {}", layout.fingerprint());

    Ok(())
}

fn run_layout(args: &Args) -> Result<()> {
    let layout = build_layout(args)?;
    let json = serde_json::to_string_pretty(&layout).context("Failed to encode layout")?;
    println!("{}", json);
    Ok(())
}

#[cfg(feature = "tui")]
fn run_browse(args: &Args) -> Result<()> {
    println!("🖥️  Loading Crypto Bubbles browser...\n");

    let layout = build_layout(args)?;
    println!("✓ Laid out {} currencies\n", layout.bubbles.len());
    println!("Starting UI... (Press 'q' to quit)\n");

    let mut app = crypto_bubbles::ui::App::new(layout);
    crypto_bubbles::ui::run_ui(&mut app)?;

    println!("\n✅ UI closed successfully");
    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_browse(_args: &Args) -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or render a file: crypto-bubbles render data.csv --out chart.svg");
    std::process::exit(1);
}

fn print_help() {
    println!("Crypto Bubbles {} - radial bubble chart of cryptocurrencies", crypto_bubbles::VERSION);
    println!();
    println!("USAGE:");
    println!("    crypto-bubbles <COMMAND> [data.csv] [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    render     Write the chart as SVG");
    println!("    layout     Print the computed layout as JSON");
    println!("    browse     Explore the layout in the terminal (default)");
    println!();
    println!("OPTIONS:");
    println!("    -o, --out <file>       SVG output path (default: chart.svg)");
    println!("    -c, --config <file>    Chart configuration TOML");
    println!();
    println!("Set RUST_LOG=debug to trace each layout stage.");
}
