//! # CLI Module
//!
//! Command-line interface for the camera sorter.
//!
//! ## Usage
//! ```bash
//! # Copy into your Pictures folder
//! camera-sort ~/Downloads/card-dump
//!
//! # Move RAW files together with their JPEG/XMP siblings
//! camera-sort ~/inbox ~/Photos --mode move-with-siblings
//!
//! # Preview only, as JSON
//! camera-sort ~/inbox ~/Photos --dry-run --output json
//! ```

use camera_sorter::core::classify::YearSource;
use camera_sorter::core::layout::DEFAULT_UNKNOWN_MODEL;
use camera_sorter::core::relocate::{RelocateMode, SiblingMatch};
use camera_sorter::core::sorter::{default_destination, PhotoSorter, SortReport};
use camera_sorter::error::Result;
use camera_sorter::events::{Event, EventChannel, FileEvent, RunEvent, ScanEvent};
use clap::{Parser, ValueEnum};
use console::{style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::thread;

/// Camera Sorter - file photos under <camera>/<year>/Q<quarter>
#[derive(Parser, Debug)]
#[command(name = "camera-sort")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Folder of photos to sort (top level only)
    source: PathBuf,

    /// Root of the sorted tree [default: your Pictures folder]
    destination: Option<PathBuf>,

    /// How files get to their destination
    #[arg(short, long, default_value = "copy")]
    mode: Mode,

    /// How siblings are matched with --mode move-with-siblings
    #[arg(long, default_value = "stem")]
    sibling_match: Matching,

    /// Where the year folder comes from
    #[arg(long, default_value = "current")]
    year_from: YearFrom,

    /// Folder name for photos without a camera model
    #[arg(long, default_value = DEFAULT_UNKNOWN_MODEL)]
    unknown_model: String,

    /// Show what would happen without touching any file
    #[arg(long)]
    dry_run: bool,

    /// Output format
    #[arg(short, long, default_value = "pretty")]
    output: OutputFormat,

    /// Verbose output (debug logging)
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Mode {
    /// Copy files, keep originals (default)
    Copy,
    /// Rename files into place
    Move,
    /// Rename files along with RAW/JPEG/sidecar siblings
    MoveWithSiblings,
}

impl From<Mode> for RelocateMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Copy => RelocateMode::Copy,
            Mode::Move => RelocateMode::Move,
            Mode::MoveWithSiblings => RelocateMode::MoveWithSiblings,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Matching {
    /// Same name without extension (default)
    Stem,
    /// Name starts with the base name (also catches IMG_0010 for IMG_001)
    Prefix,
}

impl From<Matching> for SiblingMatch {
    fn from(matching: Matching) -> Self {
        match matching {
            Matching::Stem => SiblingMatch::Stem,
            Matching::Prefix => SiblingMatch::Prefix,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum YearFrom {
    /// The year the sorter runs in (default)
    Current,
    /// The year the photo was taken
    Capture,
}

impl From<YearFrom> for YearSource {
    fn from(year: YearFrom) -> Self {
        match year {
            YearFrom::Current => YearSource::Current,
            YearFrom::Capture => YearSource::Capture,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable output with colors
    Pretty,
    /// JSON report for scripting
    Json,
    /// One `source -> destination` line per file
    Minimal,
}

/// Run the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    camera_sorter::init_tracing(cli.verbose);

    let destination = cli.destination.unwrap_or_else(default_destination);
    let sorter = PhotoSorter::builder()
        .source(cli.source)
        .destination(destination)
        .mode(cli.mode.into())
        .sibling_match(cli.sibling_match.into())
        .year_source(cli.year_from.into())
        .unknown_model(cli.unknown_model)
        .dry_run(cli.dry_run)
        .build()?;

    run_sort(&sorter, cli.output, cli.verbose)
}

fn run_sort(sorter: &PhotoSorter, output: OutputFormat, verbose: bool) -> Result<()> {
    let term = Term::stderr();
    let pretty = matches!(output, OutputFormat::Pretty);

    if pretty {
        term.write_line(&format!(
            "{} {}",
            style("Camera Sorter").bold().cyan(),
            style(concat!("v", env!("CARGO_PKG_VERSION"))).dim()
        ))
        .ok();
        if sorter.config().dry_run {
            term.write_line(&format!("{}", style("Dry run: nothing will be changed").yellow()))
                .ok();
        }
        term.write_line("").ok();
    }

    let (sender, receiver) = EventChannel::new();

    let progress = if pretty {
        let pb = ProgressBar::new(0);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▓░"),
        );
        Some(pb)
    } else {
        None
    };

    let progress_clone = progress.clone();

    // Handle events in a separate thread
    let event_thread = thread::spawn(move || {
        for event in receiver.iter() {
            let Some(ref pb) = progress_clone else {
                continue;
            };
            match event {
                Event::Scan(ScanEvent::Completed { total_files, .. }) => {
                    pb.set_length(total_files as u64);
                }
                Event::File(FileEvent::Progress(p)) => {
                    pb.set_position(p.completed as u64);
                    if verbose {
                        pb.set_message(
                            p.current_path
                                .file_name()
                                .unwrap_or_default()
                                .to_string_lossy()
                                .into_owned(),
                        );
                    }
                }
                Event::Run(RunEvent::Completed { .. }) | Event::Run(RunEvent::Error { .. }) => {
                    pb.finish_and_clear();
                }
                _ => {}
            }
        }
    });

    let result = sorter.run_with_events(&sender);

    // Drop sender to signal event thread to finish
    drop(sender);
    event_thread.join().ok();

    let report = result?;

    match output {
        OutputFormat::Pretty => print_pretty_report(&term, &report),
        OutputFormat::Json => print_json_report(&report),
        OutputFormat::Minimal => print_minimal_report(&report),
    }

    Ok(())
}

fn print_pretty_report(term: &Term, report: &SortReport) {
    let verb = if report.dry_run { "would be relocated" } else { "relocated" };

    term.write_line(&format!("{} Sort Complete", style("✓").green().bold()))
        .ok();
    term.write_line("").ok();
    term.write_line(&format!(
        "  {} files found in {} ({:.1}s)",
        style(report.files_seen).cyan(),
        display_path(&report.source),
        report.duration_ms as f64 / 1000.0
    ))
    .ok();
    term.write_line(&format!(
        "  {} files {} under {}",
        style(report.relocated.len()).cyan(),
        verb,
        display_path(&report.destination)
    ))
    .ok();
    if report.directories_skipped > 0 {
        term.write_line(&format!(
            "  {} subfolders ignored",
            style(report.directories_skipped).dim()
        ))
        .ok();
    }
    if report.has_errors() {
        term.write_line(&format!(
            "  {} files skipped",
            style(report.skipped.len()).yellow()
        ))
        .ok();
    }
    term.write_line("").ok();

    if !report.relocated.is_empty() {
        for line in relocation_lines(report) {
            term.write_line(&line).ok();
        }
        term.write_line("").ok();
    }

    if report.has_errors() {
        term.write_line(&format!("{}", style("Skipped:").bold().underlined()))
            .ok();
        for skipped in &report.skipped {
            term.write_line(&format!(
                "  {} {}",
                style("✗").red(),
                style(&skipped.reason).dim()
            ))
            .ok();
        }
    }
}

/// One `source → destination` line per relocated file
fn relocation_lines(report: &SortReport) -> Vec<String> {
    report
        .relocated
        .iter()
        .map(|r| {
            format!(
                "  {} {} {}",
                display_path(&r.source),
                style("→").dim(),
                display_path(&r.destination)
            )
        })
        .collect()
}

fn print_json_report(report: &SortReport) {
    match serde_json::to_string_pretty(report) {
        Ok(json) => println!("{}", json),
        Err(e) => tracing::error!(error = %e, "failed to serialize report"),
    }
}

fn print_minimal_report(report: &SortReport) {
    for r in &report.relocated {
        println!("{} -> {}", r.source.display(), r.destination.display());
    }
}

fn display_path(path: &Path) -> String {
    let home = dirs::home_dir().unwrap_or_default();
    match path.strip_prefix(&home) {
        Ok(rest) if !home.as_os_str().is_empty() => format!("~/{}", rest.display()),
        _ => path.display().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camera_sorter::core::relocate::Relocation;

    fn report(dry_run: bool, relocated: Vec<Relocation>) -> SortReport {
        SortReport {
            source: PathBuf::from("/card"),
            destination: PathBuf::from("/photos"),
            mode: RelocateMode::Copy,
            dry_run,
            files_seen: relocated.len(),
            directories_skipped: 0,
            relocated,
            skipped: Vec::new(),
            duration_ms: 0,
        }
    }

    #[test]
    fn relocation_lines_are_listed_outside_dry_run() {
        let report = report(
            false,
            vec![Relocation {
                source: PathBuf::from("/card/IMG_01.CR2"),
                destination: PathBuf::from("/photos/Canon/2024/Q2/IMG_01.CR2"),
            }],
        );

        let lines = relocation_lines(&report);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("/card/IMG_01.CR2"));
        assert!(lines[0].contains("/photos/Canon/2024/Q2/IMG_01.CR2"));
    }

    #[test]
    fn no_relocations_means_no_lines() {
        assert!(relocation_lines(&report(true, Vec::new())).is_empty());
    }

    #[test]
    fn parses_sibling_mode_flags() {
        let cli = Cli::try_parse_from([
            "camera-sort",
            "/card",
            "/photos",
            "--mode",
            "move-with-siblings",
            "--sibling-match",
            "prefix",
        ])
        .unwrap();
        assert_eq!(RelocateMode::from(cli.mode), RelocateMode::MoveWithSiblings);
        assert_eq!(SiblingMatch::from(cli.sibling_match), SiblingMatch::Prefix);
    }
}
