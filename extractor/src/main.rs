use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use regex_extractor::{ExtractionReport, Extractor, ExtractorConfig, SAMPLE_TEXT};
use serde_json::json;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Extract emails, URLs, phone numbers and other tokens from text
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Text file to scan, `-` for stdin (default: built-in sample text)
    #[arg(index = 1)]
    input: Option<PathBuf>,

    /// Extract only these categories (comma-separated)
    #[arg(short, long, value_delimiter = ',')]
    categories: Vec<String>,

    /// Skip these categories (comma-separated)
    #[arg(short, long, value_delimiter = ',')]
    exclude: Vec<String>,

    /// Write the results as JSON to this file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Include byte offsets in the JSON output
    #[arg(long)]
    offsets: bool,

    /// Scan every line on its own, in parallel
    #[arg(long, conflicts_with = "expect")]
    per_line: bool,

    /// Check results against a JSON file of {"category": ["match", ...]}
    #[arg(long)]
    expect: Option<PathBuf>,

    /// Refuse to scan inputs larger than this many bytes
    #[arg(long)]
    max_input_bytes: Option<usize>,

    /// JSON config file; command line flags take precedence
    #[arg(long)]
    config: Option<PathBuf>,

    /// Debug logging (overridden by RUST_LOG)
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();
    init_logging(args.verbose)?;

    let config = load_config(&args)?;
    let extractor = Extractor::with_config(config.clone())?;

    let registered = extractor.registry().categories();
    for name in config.categories.iter().chain(&config.exclude) {
        extractor.registry().matcher_for(name)?;
    }
    let selected = config.selected(&registered);

    let (label, text) = read_input(args.input.as_deref())?;
    info!(source = %label, bytes = text.len(), "scanning input");

    if let Some(path) = &args.expect {
        return check_expectations(&extractor, &text, path);
    }

    if args.per_line {
        let reports = extract_lines(&extractor, &text, &selected, args.input.is_some())?;
        for (line_no, report) in &reports {
            if report.total_matches() == 0 && report.is_clean() {
                continue;
            }
            println!("\nLine {}:", line_no);
            print_matches(report);
        }

        if let Some(output) = &args.output {
            let lines: Vec<_> = reports
                .iter()
                .map(|(line_no, report)| {
                    if args.offsets {
                        json!({ "line": line_no, "matches": report.with_offsets() })
                    } else {
                        json!({ "line": line_no, "matches": report })
                    }
                })
                .collect();
            write_json(output, &lines)?;
        }
        return Ok(ExitCode::SUCCESS);
    }

    let report = extractor.extract_selected(&text, &selected)?;

    println!("=== Regex Data Extraction ===\n");
    if args.input.is_none() {
        println!("Sample text:");
        println!("{}", text);
    } else {
        println!("Processing: {}", label);
    }
    println!("\n{}\n", "=".repeat(50));
    print_report(&report);

    if let Some(output) = &args.output {
        if args.offsets {
            write_json(output, &report.with_offsets())?;
        } else {
            write_json(output, &report)?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn init_logging(verbose: bool) -> anyhow::Result<()> {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn load_config(args: &Args) -> anyhow::Result<ExtractorConfig> {
    let mut config = match &args.config {
        Some(path) => ExtractorConfig::from_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => ExtractorConfig::default(),
    };

    if !args.categories.is_empty() {
        config.categories = args.categories.clone();
    }
    if !args.exclude.is_empty() {
        config.exclude = args.exclude.clone();
    }
    if args.max_input_bytes.is_some() {
        config.max_input_bytes = args.max_input_bytes;
    }
    Ok(config)
}

fn read_input(input: Option<&Path>) -> anyhow::Result<(String, String)> {
    match input {
        None => Ok(("sample text".to_string(), SAMPLE_TEXT.to_string())),
        Some(path) if path == Path::new("-") => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            Ok(("stdin".to_string(), text))
        }
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            Ok((path.display().to_string(), text))
        }
    }
}

fn extract_lines(
    extractor: &Extractor,
    text: &str,
    selected: &[&str],
    show_progress: bool,
) -> anyhow::Result<Vec<(usize, ExtractionReport)>> {
    let lines: Vec<&str> = text.lines().collect();

    let progress_bar = if show_progress {
        let pb = ProgressBar::new(lines.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} lines ({eta})")?
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    let reports = lines
        .par_iter()
        .enumerate()
        .map(|(index, line)| {
            let report = extractor.extract_selected(line, selected);
            if let Some(pb) = &progress_bar {
                pb.inc(1);
            }
            report.map(|report| (index + 1, report))
        })
        .collect::<Result<Vec<_>, _>>()?;

    if let Some(pb) = progress_bar {
        pb.finish_and_clear();
    }
    Ok(reports)
}

fn check_expectations(extractor: &Extractor, text: &str, path: &Path) -> anyhow::Result<ExitCode> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading expectations from {}", path.display()))?;
    let expected: BTreeMap<String, BTreeSet<String>> = serde_json::from_str(&raw)
        .with_context(|| format!("parsing expectations in {}", path.display()))?;

    let results = extractor.compare(text, &expected);
    let mut all_passed = true;
    for (category, passed) in &results {
        println!("{}: {}", category, if *passed { "PASS" } else { "FAIL" });
        all_passed &= passed;
    }

    Ok(if all_passed {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn print_report(report: &ExtractionReport) {
    for entry in report.iter() {
        println!("{}:", entry.category.to_uppercase());
        if let Some(fault) = report.failure_for(&entry.category) {
            println!("  - No matches found (warning: {})", fault);
        } else if entry.matches.is_empty() {
            println!("  - No matches found");
        } else {
            for m in &entry.matches {
                println!("  - {}", m.text);
            }
        }
        println!();
    }
}

fn print_matches(report: &ExtractionReport) {
    for entry in report.iter() {
        for m in &entry.matches {
            println!("  \"{}\" => {}", m.text, entry.category);
        }
    }
    for failure in report.failures() {
        println!("  {} skipped: {}", failure.category, failure.fault);
    }
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    println!("Results written to {}", path.display());
    Ok(())
}
