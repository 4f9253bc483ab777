//! Strut CLI
//!
//! Parses an HTML document, generates the box-model constraint system for
//! it and prints every box's solved geometry.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use owo_colors::OwoColorize;
use strut_common::warning::clear_warnings;
use strut_css::layout::ResolvedAreas;
use strut_css::{ApproximateMeasurer, DocumentStyles, GeneratedLayout, ResolvedBox, generate_for};
use strut_dom::parse_html;

/// Strut: constraint-generated CSS box geometry
#[derive(Parser, Debug)]
#[command(name = "strut")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Solve a file in the default 800x600 viewport
    strut ./index.html

    # Inline HTML, wider viewport
    strut --html '<div style="width: 120px">hi</div>' --width 1024

    # Machine-readable output
    strut ./index.html --json
"#)]
struct Cli {
    /// Path to an HTML file
    #[arg(value_name = "FILE")]
    path: Option<PathBuf>,

    /// Parse HTML string directly instead of a file
    #[arg(long, value_name = "HTML")]
    html: Option<String>,

    /// Viewport width in pixels
    #[arg(long, default_value = "800")]
    width: u32,

    /// Viewport height in pixels
    #[arg(long, default_value = "600")]
    height: u32,

    /// Font size used to approximate natural text size
    #[arg(long, default_value = "16")]
    font_size: u32,

    /// Print the solved layout as JSON
    #[arg(short, long)]
    json: bool,

    /// Also print each box's reference layer and all four areas
    #[arg(short, long)]
    verbose: bool,

    /// Print layout warnings
    #[arg(short = 'W', long)]
    warnings: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let html = load_html(&cli)?;

    let dom = parse_html(&html).context("failed to parse HTML")?;
    let root = dom
        .document_element()
        .context("document has no root element")?;
    let styles = DocumentStyles::from_document(&dom);
    let measurer = ApproximateMeasurer::new(f64::from(cli.font_size));

    clear_warnings();
    let layout = generate_for(
        &dom,
        root,
        f64::from(cli.width),
        f64::from(cli.height),
        &styles,
        &measurer,
    )
    .context("constraint system has no solution")?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&layout)?);
    } else {
        print_layout(&layout, &cli);
    }
    Ok(())
}

/// Read the document named on the command line.
fn load_html(cli: &Cli) -> Result<String> {
    if let Some(ref html) = cli.html {
        Ok(html.clone())
    } else if let Some(ref path) = cli.path {
        fs::read_to_string(path).with_context(|| format!("failed to read '{}'", path.display()))
    } else {
        bail!("expected a file path or --html")
    }
}

fn print_layout(layout: &GeneratedLayout, cli: &Cli) {
    println!(
        "{} {}",
        "=== Layout".bold(),
        format!("(viewport: {}x{}) ===", cli.width, cli.height).bold()
    );
    for resolved in &layout.boxes {
        print_box(resolved, cli.verbose);
    }

    println!(
        "\n{} boxes, {} anonymous blocks, {} constraints",
        layout.boxes.len(),
        layout.anonymous_blocks,
        layout.constraints
    );

    if cli.warnings && !layout.warnings.is_empty() {
        println!("\n{}", "=== Warnings ===".yellow().bold());
        for warning in &layout.warnings {
            println!("  - {}", warning.yellow());
        }
    }
}

fn print_box(resolved: &ResolvedBox, verbose: bool) {
    let name = resolved.label.as_deref().map_or_else(
        || resolved.kind.to_string(),
        |label| {
            if resolved.kind == "Text" {
                format!("Text(\"{label}\")")
            } else {
                format!("<{label}>")
            }
        },
    );
    println!(
        "{} {} {}",
        resolved.id.dimmed(),
        name.cyan(),
        format!("{:.1}x{:.1}", resolved.width, resolved.height).green()
    );

    if verbose {
        if let Some(ref reference) = resolved.reference {
            print_areas("reference", reference);
        }
        print_areas("actual", &resolved.actual);
    } else {
        let m = resolved.actual.margin;
        println!(
            "    margin box: t={:.1} r={:.1} b={:.1} l={:.1}",
            m.top, m.right, m.bottom, m.left
        );
    }
}

fn print_areas(layer: &str, areas: &ResolvedAreas) {
    println!("    {}", layer.bold());
    for (name, edges) in [
        ("margin", areas.margin),
        ("border", areas.border),
        ("padding", areas.padding),
        ("content", areas.content),
    ] {
        println!(
            "      {name:<8} t={:.1} r={:.1} b={:.1} l={:.1}",
            edges.top, edges.right, edges.bottom, edges.left
        );
    }
}
