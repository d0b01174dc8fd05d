use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Parser;

use docscriber::capture::file::{FileSaveConfig, expand_tilde, save_capture};
use docscriber::capture::{capture_page, capture_region};
use docscriber::config::Config;
use docscriber::draw::Page;
use docscriber::geometry::DocRect;
use docscriber::session::{
    SessionSnapshot, clear_session, inspect_session, load_snapshot_from_path, options_from_config,
};

const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("DOCSCRIBER_GIT_HASH"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "docscriber")]
#[command(version = VERSION, about = "Headless exporter for docscriber annotation sessions")]
struct Cli {
    /// Session file to render (JSON, optionally gzip-compressed)
    #[arg(long, value_name = "FILE")]
    session: Option<PathBuf>,

    /// Background page raster (PNG)
    #[arg(long, value_name = "FILE")]
    background: Option<PathBuf>,

    /// Output PNG path; defaults to the configured capture directory
    #[arg(long, short = 'o', value_name = "FILE")]
    output: Option<PathBuf>,

    /// Export only this region, as X,YxWxH in document units
    #[arg(long, value_name = "X,YxWxH")]
    region: Option<String>,

    /// Page index to render (default: the session's active page)
    #[arg(long, value_name = "N")]
    page: Option<usize>,

    /// Capture supersampling factor, overriding the configured value
    #[arg(long, value_name = "FACTOR")]
    scale: Option<f64>,

    /// Explicit config file path
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print information about the stored session for a document id and exit
    #[arg(long, value_name = "DOC_ID")]
    session_info: Option<String>,

    /// Remove the stored session for a document id and exit
    #[arg(long, value_name = "DOC_ID")]
    clear_session: Option<String>,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    if let Some(document_id) = &cli.session_info {
        print_session_info(&config, document_id)?;
    } else if let Some(document_id) = &cli.clear_session {
        run_clear_session(&config, document_id)?;
    } else if cli.session.is_some() || cli.background.is_some() {
        run_export(&cli, &config)?;
    } else {
        // No flags: show usage
        println!("docscriber: headless exporter for annotation sessions");
        println!();
        println!("Usage:");
        println!("  docscriber --session FILE --background FILE [--output FILE]");
        println!("      Render a stored session over a page raster as PNG");
        println!("  docscriber --session-info DOC_ID");
        println!("      Show where the session for a document is stored and what it holds");
        println!("  docscriber --clear-session DOC_ID");
        println!("      Delete the stored session for a document");
        println!("  docscriber --help");
        println!("      Full option list, including --region, --page, and --scale");
    }

    Ok(())
}

/// Renders a session page (or a region of it) to a PNG file.
fn run_export(cli: &Cli, config: &Config) -> Result<()> {
    let (Some(session_path), Some(background_path)) = (&cli.session, &cli.background) else {
        bail!("--session and --background are required together");
    };

    let snapshot = load_snapshot_from_path(session_path)
        .with_context(|| format!("failed to load session {}", session_path.display()))?
        .unwrap_or_else(|| {
            log::warn!(
                "Session {} contained no data; exporting the bare page",
                session_path.display()
            );
            SessionSnapshot::new(0)
        });

    let page_index = cli.page.unwrap_or(snapshot.active_page);

    let mut page = Page::default();
    let file = File::open(background_path)
        .with_context(|| format!("failed to open background {}", background_path.display()))?;
    page.load_background_png(&mut BufReader::new(file))
        .with_context(|| format!("failed to decode background {}", background_path.display()))?;

    let strokes = snapshot.pages.get(&page_index).cloned().unwrap_or_default();
    log::info!(
        "Exporting page {} with {} strokes",
        page_index,
        strokes.len()
    );
    page.set_strokes(strokes);

    let factor = cli.scale.unwrap_or(config.capture.scale);
    let bytes = match &cli.region {
        Some(raw) => capture_region(&page, parse_region(raw)?, factor)?,
        None => capture_page(&page, factor)?,
    };

    let saved_path = match &cli.output {
        Some(path) => {
            std::fs::write(path, &bytes)
                .with_context(|| format!("failed to write output {}", path.display()))?;
            path.clone()
        }
        None => {
            let save_config = FileSaveConfig {
                save_directory: expand_tilde(&config.capture.save_directory),
                filename_template: config.capture.filename_template.clone(),
                format: config.capture.format.clone(),
            };
            save_capture(&bytes, &save_config)?
        }
    };

    println!("{}", saved_path.display());
    Ok(())
}

/// Parses a `X,YxWxH` document-space region argument.
fn parse_region(raw: &str) -> Result<DocRect> {
    let malformed = || format!("malformed region '{}', expected X,YxWxH", raw);

    let (x_part, rest) = raw.split_once(',').with_context(malformed)?;
    let mut dims = rest.split('x');
    let y_part = dims.next().with_context(malformed)?;
    let w_part = dims.next().with_context(malformed)?;
    let h_part = dims.next().with_context(malformed)?;
    if dims.next().is_some() {
        bail!(malformed());
    }

    let parse = |part: &str| -> Result<f64> {
        part.trim()
            .parse::<f64>()
            .with_context(|| format!("invalid number '{}' in region", part))
    };

    DocRect::new(parse(x_part)?, parse(y_part)?, parse(w_part)?, parse(h_part)?)
        .with_context(|| format!("region '{}' must have a positive area", raw))
}

fn print_session_info(config: &Config, document_id: &str) -> Result<()> {
    let options = options_from_config(&config.session, &config_dir()?, Some(document_id))?;
    let inspection = inspect_session(&options)?;

    println!("Session file: {}", inspection.session_path.display());
    if !inspection.exists {
        println!("Exists: no");
        return Ok(());
    }

    println!("Exists: yes");
    if let Some(size) = inspection.size_bytes {
        println!(
            "Size: {} bytes{}",
            size,
            if inspection.compressed {
                " (gzip)"
            } else {
                ""
            }
        );
    }
    if let Some(modified) = inspection.modified {
        let stamp: chrono::DateTime<chrono::Local> = modified.into();
        println!("Modified: {}", stamp.format("%Y-%m-%d %H:%M:%S"));
    }
    match inspection.stroke_counts {
        Some(counts) => println!("Content: {} pages, {} strokes", counts.pages, counts.strokes),
        None => println!("Content: empty"),
    }
    println!(
        "Tool state: {}",
        if inspection.tool_state_present {
            "present"
        } else {
            "absent"
        }
    );
    println!(
        "Backup: {}",
        if inspection.backup_exists { "yes" } else { "no" }
    );

    Ok(())
}

fn run_clear_session(config: &Config, document_id: &str) -> Result<()> {
    let options = options_from_config(&config.session, &config_dir()?, Some(document_id))?;
    let outcome = clear_session(&options)?;

    if outcome.removed_session || outcome.removed_backup || outcome.removed_lock {
        println!("Cleared session for '{}'", document_id);
    } else {
        println!("No stored session for '{}'", document_id);
    }

    Ok(())
}

fn config_dir() -> Result<PathBuf> {
    Ok(Config::get_config_path()?
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(".")))
}
