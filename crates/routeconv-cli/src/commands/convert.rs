use anyhow::{Context, Result};
use colored::Colorize;
use routeconv::batch::BatchOutcome;
use routeconv::{compile_all, selftest, unknown_regexes, ExampleTable, JsonLinesRenderer, Render};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::config::Config;

pub struct ConvertArgs {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub examples: Option<PathBuf>,
    pub unknown_regexes: Option<PathBuf>,
    pub jobs: Option<usize>,
}

/// Converts every input row, reporting per-pattern errors on stderr
///
/// Returns `false` when at least one pattern failed to compile.
pub fn execute(args: ConvertArgs, config: &Config) -> Result<bool> {
    let registry = config.registry();

    let records = match &args.input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open input file: {:?}", path))?;
            routeconv::io::read_records(BufReader::new(file))
                .with_context(|| format!("Failed to read input file: {:?}", path))?
        }
        None => {
            tracing::info!("No input file given, converting the built-in patterns");
            selftest::builtin_patterns()
        }
    };

    let table = args
        .examples
        .or_else(|| config.convert.examples.clone())
        .map(|path| load_examples(&path))
        .transpose()?;

    let jobs = args.jobs.unwrap_or(config.convert.jobs);
    let results = compile_all(&records, &registry, jobs)?;

    for (record, result) in records.iter().zip(&results) {
        if let Err(e) = result {
            eprintln!("{} {}: {}", "ERROR:".red().bold(), record.pattern, e);
        }
    }
    let outcome = BatchOutcome::from_results(results);

    let mut out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("Failed to create output file: {:?}", path))?,
        )),
        None => Box::new(io::stdout().lock()),
    };

    let renderer = JsonLinesRenderer::new();
    for pattern in &outcome.patterns {
        renderer
            .render(pattern, &pattern.test_cases(table.as_ref()), &mut *out)
            .with_context(|| format!("Failed to write pattern: {}", pattern.raw()))?;
    }
    out.flush().context("Failed to flush output")?;

    if let Some(path) = args
        .unknown_regexes
        .or_else(|| config.convert.unknown_regexes.clone())
    {
        let empty = ExampleTable::new();
        let rows = unknown_regexes(&outcome.patterns, table.as_ref().unwrap_or(&empty));
        let file = File::create(&path)
            .with_context(|| format!("Failed to create unknown regex file: {:?}", path))?;
        routeconv::io::write_unknown_regexes(BufWriter::new(file), &rows)
            .with_context(|| format!("Failed to write unknown regex file: {:?}", path))?;
        eprintln!(
            "{} {} unknown regexes written to {}",
            "→".cyan(),
            rows.len(),
            path.display()
        );
    }

    if outcome.is_clean() {
        eprintln!(
            "{} Converted {} patterns",
            "✓".green().bold(),
            outcome.patterns.len()
        );
    } else {
        eprintln!(
            "{} Converted {} patterns, {} failed",
            "✗".red().bold(),
            outcome.patterns.len(),
            outcome.failures.len()
        );
    }

    Ok(outcome.is_clean())
}

fn load_examples(path: &Path) -> Result<ExampleTable> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open examples file: {:?}", path))?;
    routeconv::io::read_examples(BufReader::new(file))
        .with_context(|| format!("Failed to read examples file: {:?}", path))
}
