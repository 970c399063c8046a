// SPDX-License-Identifier: MIT
//
// swatch — command-line front end for the token engine.
//
// The host side of the boundary lives here: a JSON request describing the
// brand colors goes in, a JSON-lines stream of host messages comes out (one
// `update-token` per changed variable, plus the page-background, navbar,
// and font-pairing notifications). Diagnostics go to stderr through
// `tracing`, so stdout stays a clean message stream.
//
// Two subcommands:
//
//   swatch process --input request.json [--group Primary] [--mode AA-light]
//   swatch contrast '#3366CC' '#FFFFFF'

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use swatch_color::{AA_TEXT_CONTRAST, AAA_TEXT_CONTRAST, Color, contrast_ratio};
use swatch_engine::{Engine, ProcessReport, ProcessTokensParams};
use swatch_tokens::{BackgroundTheme, BackgroundThemeStore, JsonLinesSink, Mode};
use tracing_subscriber::EnvFilter;

// ─── Command line ───────────────────────────────────────────────────────────

#[derive(Debug, Parser)]
#[command(name = "swatch", version, about = "Contrast-driven design-token engine")]
struct Cli {
    /// Log at debug level (RUST_LOG overrides).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Derive tokens for every selected (mode, group) cell.
    Process(ProcessArgs),
    /// Print the WCAG contrast ratio between two colors.
    Contrast {
        foreground: Color,
        background: Color,
    },
}

#[derive(Debug, clap::Args)]
struct ProcessArgs {
    /// JSON request file (`-` for stdin).
    #[arg(short, long)]
    input: PathBuf,

    /// Where to write host messages; stdout when absent.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Restrict the run to these groups (repeatable).
    #[arg(short, long = "group")]
    groups: Vec<String>,

    /// Restrict the run to these modes (repeatable).
    #[arg(short, long = "mode", value_parser = parse_mode)]
    modes: Vec<Mode>,

    /// Process only this group and its -Light / -Dark variants.
    #[arg(long, value_name = "BASE", conflicts_with = "groups")]
    variants: Option<String>,

    /// Also dump the computed background themes as JSON.
    #[arg(long, value_name = "PATH")]
    themes: Option<PathBuf>,
}

fn parse_mode(name: &str) -> Result<Mode, String> {
    Mode::from_name(name).ok_or_else(|| {
        let known: Vec<&str> = Mode::all().iter().map(|m| m.name()).collect();
        format!("unknown mode `{name}` (expected one of {})", known.join(", "))
    })
}

// ─── Logging ────────────────────────────────────────────────────────────────

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "warn,swatch={level},swatch_engine={level},swatch_tokens={level}"
        ))
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

// ─── Process ────────────────────────────────────────────────────────────────

fn read_request(path: &Path) -> Result<ProcessTokensParams> {
    let text = if path.as_os_str() == "-" {
        io::read_to_string(io::stdin()).context("failed to read request from stdin")?
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("failed to read request {}", path.display()))?
    };
    serde_json::from_str(&text).context("request is not a valid token request")
}

fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("failed to create {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    })
}

/// Every stored theme, in group then mode order.
fn collect_themes(store: &BackgroundThemeStore) -> Vec<&BackgroundTheme> {
    store
        .group_ids()
        .flat_map(move |group| {
            store
                .modes_for_group(group)
                .into_iter()
                .filter_map(move |mode| store.get(group, mode))
        })
        .collect()
}

fn run_process(args: ProcessArgs) -> Result<ProcessReport> {
    let mut params = read_request(&args.input)?;
    if !args.modes.is_empty() {
        params.modes = Some(args.modes);
    }
    if !args.groups.is_empty() {
        params.groups = Some(args.groups);
    }

    let sink = JsonLinesSink::new(open_output(args.output.as_deref())?);
    let mut engine = Engine::new(sink);
    let report = match &args.variants {
        Some(base) => engine.process_variants(&params, base),
        None => engine.process_tokens(&params),
    };

    let (store, sink) = engine.into_parts();
    let written = sink.written();
    let mut out = sink.finish().context("failed to write host messages")?;
    out.flush().context("failed to flush host messages")?;
    tracing::debug!(messages = written, "host stream closed");

    if let Some(path) = &args.themes {
        let json = serde_json::to_string_pretty(&collect_themes(&store))?;
        fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
        tracing::info!(themes = store.len(), path = %path.display(), "wrote themes");
    }

    Ok(report)
}

// ─── Contrast ───────────────────────────────────────────────────────────────

fn verdict(ratio: f64) -> &'static str {
    if ratio >= AAA_TEXT_CONTRAST {
        "AAA"
    } else if ratio >= AA_TEXT_CONTRAST {
        "AA"
    } else {
        "fail"
    }
}

// ─── Entry point ────────────────────────────────────────────────────────────

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Process(args) => {
            let report = run_process(args)?;
            for cell in &report.failed {
                tracing::error!(
                    group = %cell.group,
                    mode = %cell.mode,
                    reason = %cell.reason,
                    "cell failed"
                );
            }
            if report.processed.is_empty() {
                bail!("no cells were processed");
            }
            if !report.failed.is_empty() {
                bail!("{} of the selected cells failed", report.failed.len());
            }
        }
        Command::Contrast { foreground, background } => {
            let ratio = contrast_ratio(foreground, background);
            println!("{ratio:.2}:1 {}", verdict(ratio));
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("swatch: {err:#}");
            ExitCode::FAILURE
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
