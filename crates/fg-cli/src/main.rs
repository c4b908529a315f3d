#![forbid(unsafe_code)]

//! FretGrid CLI - render guitar chord diagrams and query the chord catalog.
//!
//! # Commands
//!
//! - `render`: Convert diagram notation to an SVG fretboard
//! - `parse`: Output parsed positions and warnings as JSON
//! - `layout`: Output the computed geometry description as JSON
//! - `validate`: Check notation and report parser recoveries
//! - `search`: Fetch chords from the catalog and render every variation
//! - `qualities`: List the chord qualities the catalog serves
//! - `health`: Check catalog availability

use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use fg_catalog::{CatalogClient, DEFAULT_BASE_URL};
use fg_core::{Chord, StringTable};
use fg_layout::{FretboardConfig, layout_fretboard};
use fg_parser::{ParseResult, parse, parse_evidence_json};
use fg_render_svg::{SvgRenderConfig, ThemePreset, render_svg};
use serde::Serialize;
use tracing::{debug, info, warn};

/// FretGrid CLI - render guitar chord diagrams and query the chord catalog.
#[derive(Debug, Parser)]
#[command(
    name = "fg-cli",
    version,
    about = "FretGrid CLI - render guitar chord diagrams and query the chord catalog",
    long_about = "Turns compact chord position notation (e.g. \"e0,b1,g0,d2,a3,Ex\")\n\
        into fretboard diagrams, and searches a chord catalog service by root\n\
        note and quality."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable verbose logging (can be repeated for more detail: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Render diagram notation to an SVG fretboard.
    Render {
        /// Notation string, a file path, or "-" for stdin.
        #[arg(default_value = "-")]
        input: String,

        /// Number of frets in the display window
        #[arg(short, long, default_value_t = fg_layout::DEFAULT_FRETS)]
        frets: u32,

        /// Theme name (default, dark, monochrome)
        #[arg(short, long, default_value = "default")]
        theme: String,

        /// Diagram title embedded in the SVG
        #[arg(long)]
        title: Option<String>,

        /// Output file path. If omitted, writes to stdout.
        #[arg(short, long)]
        output: Option<String>,

        /// Output render metadata as JSON on stderr
        #[arg(long)]
        json: bool,
    },

    /// Parse notation and output positions plus warnings as JSON.
    Parse {
        /// Notation string, a file path, or "-" for stdin.
        #[arg(default_value = "-")]
        input: String,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Compute the geometry description and output it as JSON.
    Layout {
        /// Notation string, a file path, or "-" for stdin.
        #[arg(default_value = "-")]
        input: String,

        /// Number of frets in the display window
        #[arg(short, long, default_value_t = fg_layout::DEFAULT_FRETS)]
        frets: u32,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Validate notation and report every parser recovery.
    Validate {
        /// Notation string, a file path, or "-" for stdin.
        #[arg(default_value = "-")]
        input: String,

        /// Output structured warnings as JSON
        #[arg(long)]
        json: bool,

        /// Exit with non-zero status when any warning was collected
        #[arg(long)]
        strict: bool,
    },

    /// Fetch chords from the catalog and render every variation to SVG files.
    Search {
        /// Root note, e.g. C, F#, A#
        root: String,

        /// Chord quality, e.g. major, minor7. Omit for all qualities.
        #[arg(long)]
        quality: Option<String>,

        /// Catalog base URL
        #[arg(short, long, default_value = DEFAULT_BASE_URL)]
        url: String,

        /// Directory the SVG files are written to
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,

        /// Number of frets in the display window
        #[arg(short, long, default_value_t = fg_layout::DEFAULT_FRETS)]
        frets: u32,

        /// Theme name (default, dark, monochrome)
        #[arg(short, long, default_value = "default")]
        theme: String,
    },

    /// List the chord qualities the catalog serves.
    Qualities {
        /// Catalog base URL
        #[arg(short, long, default_value = DEFAULT_BASE_URL)]
        url: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check catalog availability.
    Health {
        /// Catalog base URL
        #[arg(short, long, default_value = DEFAULT_BASE_URL)]
        url: String,
    },
}

#[derive(Debug, Serialize)]
struct RenderReport {
    positions: usize,
    warnings: Vec<String>,
    width: f32,
    height: f32,
    output_bytes: usize,
    parse_time_ms: f64,
    layout_time_ms: f64,
    render_time_ms: f64,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match cli.command {
        Command::Render {
            input,
            frets,
            theme,
            title,
            output,
            json,
        } => cmd_render(&input, frets, &theme, title, output.as_deref(), json),

        Command::Parse { input, pretty } => cmd_parse(&input, pretty),

        Command::Layout {
            input,
            frets,
            pretty,
        } => cmd_layout(&input, frets, pretty),

        Command::Validate {
            input,
            json,
            strict,
        } => cmd_validate(&input, json, strict),

        Command::Search {
            root,
            quality,
            url,
            out_dir,
            frets,
            theme,
        } => cmd_search(&root, quality.as_deref(), &url, &out_dir, frets, &theme),

        Command::Qualities { url, json } => cmd_qualities(&url, json),

        Command::Health { url } => cmd_health(&url),
    }
}

fn init_tracing(verbose: u8, quiet: bool) {
    let filter = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .without_time()
        .try_init();
}

fn load_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read from stdin")?;
        Ok(buffer.trim().to_string())
    } else if Path::new(input).exists() {
        let content =
            std::fs::read_to_string(input).context(format!("Failed to read file: {input}"))?;
        Ok(content.trim().to_string())
    } else {
        // Treat as inline notation text
        Ok(input.to_string())
    }
}

fn write_output(output: Option<&str>, content: &str) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, content).context(format!("Failed to write to: {path}"))?;
            info!("Wrote output to: {path}");
        }
        None => {
            io::stdout()
                .write_all(content.as_bytes())
                .context("Failed to write to stdout")?;
        }
    }
    Ok(())
}

fn parse_theme(theme: &str) -> Result<ThemePreset> {
    theme
        .parse::<ThemePreset>()
        .map_err(|err| anyhow::anyhow!("{err}"))
}

fn log_warnings(parsed: &ParseResult) {
    for warning in &parsed.warnings {
        warn!("Parse warning [{}]: {}", warning.code.as_str(), warning.message);
    }
}

// =============================================================================
// Command: render
// =============================================================================

fn cmd_render(
    input: &str,
    frets: u32,
    theme: &str,
    title: Option<String>,
    output: Option<&str>,
    json_report: bool,
) -> Result<()> {
    let theme = parse_theme(theme)?;
    let notation = load_input(input)?;

    let parse_start = Instant::now();
    let parsed = parse(&notation);
    let parse_time = parse_start.elapsed();
    log_warnings(&parsed);

    let table = StringTable::standard_guitar();
    let config = FretboardConfig {
        frets,
        ..FretboardConfig::default()
    };

    let layout_start = Instant::now();
    let layout = layout_fretboard(&parsed.diagram, &table, &config);
    let layout_time = layout_start.elapsed();

    debug!(
        "Layout: bounds={}x{}, markers={}",
        layout.bounds.width,
        layout.bounds.height,
        layout.markers.len()
    );

    let render_start = Instant::now();
    let svg_config = SvgRenderConfig {
        theme,
        title,
        ..SvgRenderConfig::default()
    };
    let svg = render_svg(&layout, &svg_config);
    let render_time = render_start.elapsed();

    if json_report {
        let report = RenderReport {
            positions: parsed.diagram.len(),
            warnings: parsed.warnings.iter().map(|w| w.message.clone()).collect(),
            width: layout.bounds.width,
            height: layout.bounds.height,
            output_bytes: svg.len(),
            parse_time_ms: parse_time.as_secs_f64() * 1000.0,
            layout_time_ms: layout_time.as_secs_f64() * 1000.0,
            render_time_ms: render_time.as_secs_f64() * 1000.0,
        };
        let json_str = serde_json::to_string_pretty(&report)?;
        eprintln!("{json_str}");
    }

    write_output(output, &svg)?;

    info!(
        "Rendered {} positions in {:.2}ms",
        parsed.diagram.len(),
        (parse_time + layout_time + render_time).as_secs_f64() * 1000.0
    );
    Ok(())
}

// =============================================================================
// Command: parse
// =============================================================================

fn cmd_parse(input: &str, pretty: bool) -> Result<()> {
    let notation = load_input(input)?;
    let parsed = parse(&notation);

    debug!("Evidence: {}", parse_evidence_json(&parsed));

    let json = if pretty {
        serde_json::to_string_pretty(&parsed)?
    } else {
        serde_json::to_string(&parsed)?
    };
    println!("{json}");
    Ok(())
}

// =============================================================================
// Command: layout
// =============================================================================

fn cmd_layout(input: &str, frets: u32, pretty: bool) -> Result<()> {
    let notation = load_input(input)?;
    let parsed = parse(&notation);
    log_warnings(&parsed);

    let table = StringTable::standard_guitar();
    let config = FretboardConfig {
        frets,
        ..FretboardConfig::default()
    };
    let layout = layout_fretboard(&parsed.diagram, &table, &config);

    let json = if pretty {
        serde_json::to_string_pretty(&layout)?
    } else {
        serde_json::to_string(&layout)?
    };
    println!("{json}");
    Ok(())
}

// =============================================================================
// Command: validate
// =============================================================================

fn cmd_validate(input: &str, json: bool, strict: bool) -> Result<()> {
    let notation = load_input(input)?;
    let parsed = parse(&notation);

    if json {
        println!("{}", parse_evidence_json(&parsed));
    } else if parsed.warnings.is_empty() {
        println!(
            "OK: {} position(s), no warnings",
            parsed.diagram.len()
        );
    } else {
        println!(
            "{} position(s), {} warning(s):",
            parsed.diagram.len(),
            parsed.warnings.len()
        );
        for warning in &parsed.warnings {
            println!(
                "  [{}] token {}: {}",
                warning.code.as_str(),
                warning.token,
                warning.message
            );
        }
    }

    if strict && parsed.has_warnings() {
        bail!("notation produced {} warning(s)", parsed.warnings.len());
    }
    Ok(())
}

// =============================================================================
// Command: search / qualities / health
// =============================================================================

fn cmd_search(
    root: &str,
    quality: Option<&str>,
    url: &str,
    out_dir: &Path,
    frets: u32,
    theme: &str,
) -> Result<()> {
    let theme = parse_theme(theme)?;
    let client = CatalogClient::new(url).context("Failed to build catalog client")?;

    let chords: Vec<Chord> = match quality {
        Some(quality) => vec![
            client
                .chord(root, quality)
                .context(format!("Failed to fetch {quality} chord for {root}"))?,
        ],
        None => client
            .chords_by_root(root)
            .context(format!("Failed to fetch chords for {root}"))?,
    };

    if chords.iter().all(|c| c.variations.is_empty()) {
        println!("No chord variations found for {root}");
        return Ok(());
    }

    std::fs::create_dir_all(out_dir)
        .context(format!("Failed to create directory: {}", out_dir.display()))?;

    let table = StringTable::standard_guitar();
    let config = FretboardConfig {
        frets,
        ..FretboardConfig::default()
    };

    let mut written = 0_usize;
    for chord in &chords {
        for (index, variation) in chord.variations.iter().enumerate() {
            let parsed = parse(&variation.diagram);
            log_warnings(&parsed);

            let layout = layout_fretboard(&parsed.diagram, &table, &config);
            let svg_config = SvgRenderConfig {
                theme,
                title: Some(variation.name.clone()),
                ..SvgRenderConfig::default()
            };
            let svg = render_svg(&layout, &svg_config);

            let file_name = format!(
                "{}-{}.svg",
                sanitize_file_stem(&format!("{}-{}", chord.key, chord.quality)),
                index + 1
            );
            let path = out_dir.join(&file_name);
            std::fs::write(&path, &svg)
                .context(format!("Failed to write: {}", path.display()))?;
            println!("{} -> {}", variation.name, path.display());
            written += 1;
        }
    }

    info!("Wrote {written} diagram(s) to {}", out_dir.display());
    Ok(())
}

fn cmd_qualities(url: &str, json: bool) -> Result<()> {
    let client = CatalogClient::new(url).context("Failed to build catalog client")?;
    let qualities = client
        .qualities()
        .context("Failed to fetch chord qualities")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&qualities)?);
    } else {
        for quality in &qualities {
            println!("{}\t{}", quality.name, quality.display_name);
        }
    }
    Ok(())
}

fn cmd_health(url: &str) -> Result<()> {
    let client = CatalogClient::new(url).context("Failed to build catalog client")?;
    let health = client.health().context("Catalog is unreachable")?;
    println!(
        "{} (version {}, timestamp {})",
        health.status, health.version, health.timestamp
    );
    Ok(())
}

/// Keep file names portable: alphanumerics pass through, everything else
/// collapses to a single dash.
fn sanitize_file_stem(stem: &str) -> String {
    let mut out = String::with_capacity(stem.len());
    let mut last_dash = false;
    for c in stem.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c);
            last_dash = false;
        } else if !last_dash {
            out.push('-');
            last_dash = true;
        }
    }
    out.trim_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::sanitize_file_stem;

    #[test]
    fn sanitizes_sharp_roots_and_spaces() {
        assert_eq!(sanitize_file_stem("A#-major"), "A-major");
        assert_eq!(sanitize_file_stem("C Major (open)"), "C-Major-open");
        assert_eq!(sanitize_file_stem("--x--"), "x");
    }
}
