//! CLI binary for pdf2png.
//!
//! A thin shim over the library crate that maps CLI flags to `RunConfig`
//! and prints results.

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use pdf2png::{convert, ConversionProgressCallback, PageError, Pdf2PngError, RunConfig};
use std::cell::RefCell;
use std::io::{self, IsTerminal, Write};
use std::path::Path;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

// ── CLI progress callback ────────────────────────────────────────────────────

/// Prints the `Destination:`/`Pages:` preamble and, in text mode, each page
/// error as it happens. Optionally drives a progress bar on stderr.
struct CliProgressCallback<W: Write = io::Stdout> {
    bar: Option<ProgressBar>,
    json: bool,
    out: RefCell<W>,
}

impl CliProgressCallback {
    fn new(show_progress: bool, json: bool) -> Self {
        let bar = show_progress.then(|| {
            let bar = ProgressBar::with_draw_target(None, ProgressDrawTarget::stderr());
            bar.set_style(
                ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            bar.set_prefix("Preparing");
            bar.set_message("Opening PDF…");
            bar.enable_steady_tick(Duration::from_millis(80));
            bar
        });
        Self {
            bar,
            json,
            out: RefCell::new(io::stdout()),
        }
    }
}

impl<W: Write> CliProgressCallback<W> {
    /// Report lines only, no progress bar.
    #[cfg(test)]
    fn with_writer(out: W, json: bool) -> Self {
        Self {
            bar: None,
            json,
            out: RefCell::new(out),
        }
    }

    /// Print a report line without tearing the progress bar.
    fn println(&self, line: String) {
        let write = || {
            let mut out = self.out.borrow_mut();
            // A closed stdout must not abort the page loop.
            let _ = writeln!(out, "{line}").and_then(|()| out.flush());
        };
        match &self.bar {
            Some(bar) => bar.suspend(write),
            None => write(),
        }
    }

    /// Remove the bar if the run ends before `on_conversion_complete`.
    fn abandon(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }
}

impl<W: Write> ConversionProgressCallback for CliProgressCallback<W> {
    fn on_conversion_start(&self, destination: &Path, total_pages: usize) {
        self.println(format!("Destination: {}", destination.display()));
        self.println(format!("Pages: {total_pages}"));

        if let Some(bar) = &self.bar {
            let style = ProgressStyle::with_template(
                "{spinner:.cyan} {prefix:.bold}  \
                 [{bar:42.green/238}] {pos:>3}/{len} pages  \
                 ⏱ {elapsed_precise}  ETA {eta_precise}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▉▊▋▌▍▎▏  ");
            bar.set_length(total_pages as u64);
            bar.set_style(style);
            bar.set_prefix("Rendering");
            bar.reset_eta();
        }
    }

    fn on_page_start(&self, page_num: usize, _total_pages: usize) {
        if let Some(bar) = &self.bar {
            bar.set_message(format!("page {page_num}"));
        }
    }

    fn on_page_complete(&self, _page_num: usize, _total_pages: usize, _output: &Path) {
        if let Some(bar) = &self.bar {
            bar.inc(1);
        }
    }

    fn on_page_error(&self, _page_num: usize, _total_pages: usize, error: &PageError) {
        if !self.json {
            self.println(error.to_string());
        }
        if let Some(bar) = &self.bar {
            bar.inc(1);
        }
    }

    fn on_conversion_complete(&self, total_pages: usize, success_count: usize) {
        let Some(bar) = &self.bar else {
            return;
        };
        bar.finish_and_clear();

        let failed = total_pages.saturating_sub(success_count);
        if failed == 0 {
            eprintln!(
                "{} {} pages rendered successfully",
                green("✔"),
                bold(&success_count.to_string())
            );
        } else {
            eprintln!(
                "{} {}/{} pages rendered  ({} failed)",
                if failed == total_pages {
                    red("✘")
                } else {
                    cyan("⚠")
                },
                bold(&success_count.to_string()),
                total_pages,
                red(&failed.to_string()),
            );
        }
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Render every page at the default width (400 px) into the current folder
  pdf2png --source document.pdf

  # Render into a new folder at 1200 px wide
  pdf2png --source document.pdf --destination pages --width 1200

  # JSON report (source, pages, author, errors) on stdout
  pdf2png --source document.pdf --destination pages --json

  # Sortable file names: page_01.png … page_12.png
  pdf2png --source document.pdf --zero-pad

EXIT CODES:
  0  run completed (individual pages may still have failed; see errors)
  1  bad arguments, missing/unreadable source, unparseable PDF,
     destination cannot be created, pdfium unavailable

ENVIRONMENT VARIABLES:
  PDFIUM_LIB_PATH   Path to libpdfium — otherwise ./ and the system
                    library path are searched
  RUST_LOG          Override the log filter (logs go to stderr)
"#;

/// Rasterise every page of a PDF into PNG images.
#[derive(Parser, Debug)]
#[command(
    name = "pdf2png",
    version,
    about = "Rasterise every page of a PDF into PNG images",
    long_about = "Render each page of a PDF document to page_<N>.png in a destination folder \
using PDFium, reporting per-page failures without aborting the run.",
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Path to the source PDF document.
    #[arg(long, env = "PDF2PNG_SOURCE")]
    source: Option<String>,

    /// Folder where images will be stored (created if missing, one level).
    #[arg(long, env = "PDF2PNG_DESTINATION", default_value = ".")]
    destination: String,

    /// Width of each output image in pixels.
    #[arg(long, env = "PDF2PNG_WIDTH", default_value_t = pdf2png::DEFAULT_WIDTH,
          value_parser = clap::value_parser!(u32).range(1..=i32::MAX as i64))]
    width: u32,

    /// Print a JSON report to stdout.
    #[arg(long, env = "PDF2PNG_JSON")]
    json: bool,

    /// PDF user password for encrypted documents.
    #[arg(long, env = "PDF2PNG_PASSWORD")]
    password: Option<String>,

    /// Zero-pad page numbers in file names (page_01.png).
    #[arg(long, env = "PDF2PNG_ZERO_PAD")]
    zero_pad: bool,

    /// Disable the progress bar.
    #[arg(long, env = "PDF2PNG_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "PDF2PNG_VERBOSE")]
    verbose: bool,
}

fn main() -> Result<()> {
    // Argument errors exit with 1, like every other fatal error.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if e.use_stderr() => {
            let _ = e.print();
            std::process::exit(1);
        }
        Err(e) => e.exit(),
    };

    // ── Logging setup ────────────────────────────────────────────────────
    // The progress bar provides all the feedback that matters; keep library
    // logs quiet while it is drawn.
    let show_progress = !cli.no_progress && io::stderr().is_terminal();
    let filter = if cli.verbose {
        "debug"
    } else if show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Build config ─────────────────────────────────────────────────────
    let config = match build_config(&cli) {
        Ok(config) => config,
        Err(e @ Pdf2PngError::MissingArgument) => {
            eprintln!("{e}");
            eprintln!("{}", Cli::command().render_usage());
            std::process::exit(1);
        }
        Err(e) => return Err(e).context("Invalid configuration"),
    };

    // ── Run conversion ───────────────────────────────────────────────────
    let progress = CliProgressCallback::new(show_progress, config.json_output);
    let report = convert(&config, &progress);
    progress.abandon();
    let report = report.context("Conversion failed")?;

    if config.json_output {
        let json = serde_json::to_string_pretty(&report).context("Failed to serialise report")?;
        println!("{json}");
    }

    Ok(())
}

/// Map CLI args to `RunConfig`.
fn build_config(cli: &Cli) -> Result<RunConfig, Pdf2PngError> {
    let mut builder = RunConfig::builder()
        .source(cli.source.as_deref().unwrap_or_default())
        .destination(&cli.destination)
        .width(cli.width)
        .json_output(cli.json)
        .zero_pad(cli.zero_pad);

    if let Some(ref password) = cli.password {
        builder = builder.password(password);
    }

    builder.build()
}
