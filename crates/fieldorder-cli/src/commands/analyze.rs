//! Analyze command - infer field dependencies from a data file.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use clap::ValueEnum;
use colored::Colorize;
use fieldorder::{
    AnalyzerConfig, DependencyAnalyzer, DependencyReport, FieldPriority, KeepOrder, Parser,
    PromptResolver,
};
use tracing::debug;

use crate::cli::ResolveChoice;

/// Options for the analyze command.
pub struct Options {
    pub exclude: Vec<String>,
    pub repeat: usize,
    pub resolve: Option<ResolveChoice>,
    pub prefer: Vec<String>,
    pub json: bool,
    pub output: Option<PathBuf>,
}

pub fn run(file: PathBuf, options: Options, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    // Validate input file exists
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }
    let choice = resolve_choice(options.resolve, &options.prefer)?;

    if !options.json {
        println!(
            "{} {}",
            "Analyzing".cyan().bold(),
            file.display().to_string().white()
        );
    }

    debug!(excluded = ?options.exclude, repeat = options.repeat, resolve = ?choice, "analyze options");

    let config = AnalyzerConfig {
        excluded_fields: options.exclude,
        ..AnalyzerConfig::default()
    };
    let parser = Parser::with_config(config.parser.clone());
    let analyzer = DependencyAnalyzer::with_config(config);

    let (batch, source) = parser.parse_file(&file)?;
    if verbose && !options.json {
        println!(
            "  {} {} rows, {} fields, {}",
            "Read".dimmed(),
            source.row_count,
            source.field_count,
            source.format
        );
    }

    let batch = batch.repeat(options.repeat)?;
    let mut report = analyzer.analyze(&batch)?;

    resolve(&mut report, choice, options.prefer)?;

    if let Some(ref path) = options.output {
        std::fs::write(path, report.to_json()?)?;
    }

    if options.json {
        println!("{}", report.to_json()?);
    } else {
        println!();
        super::print_report(&report, verbose);

        if let Some(path) = options.output {
            println!();
            println!(
                "{} {}",
                "Saved to".green().bold(),
                path.display().to_string().white()
            );
        }
    }

    Ok(())
}

/// Pick the resolution strategy. `--prefer` on its own implies `--resolve prefer`.
fn resolve_choice(choice: Option<ResolveChoice>, prefer: &[String]) -> Result<ResolveChoice, String> {
    match (choice, prefer.is_empty()) {
        (None, true) => Ok(ResolveChoice::Keep),
        (None | Some(ResolveChoice::Prefer), false) => Ok(ResolveChoice::Prefer),
        (Some(ResolveChoice::Prefer), true) => {
            Err("--resolve prefer needs at least one --prefer field".to_string())
        }
        (Some(other), false) => Err(format!(
            "--prefer cannot be combined with --resolve {}",
            other
                .to_possible_value()
                .map(|v| v.get_name().to_string())
                .unwrap_or_default()
        )),
        (Some(other), true) => Ok(other),
    }
}

fn resolve(
    report: &mut DependencyReport,
    choice: ResolveChoice,
    prefer: Vec<String>,
) -> fieldorder::Result<()> {
    if report.equivalences.is_empty() {
        return Ok(());
    }

    match choice {
        ResolveChoice::Keep => report.resolve_with(&mut KeepOrder),
        ResolveChoice::Prefer => report.resolve_with(&mut FieldPriority::new(prefer)),
        ResolveChoice::Prompt => prompt(report, PromptResolver::stdio()),
    }
}

/// Ask for each pair. Everything the prompt writes stays on its own stream,
/// so stdout carries only the report.
fn prompt<R: BufRead, W: Write>(
    report: &mut DependencyReport,
    mut resolver: PromptResolver<R, W>,
) -> fieldorder::Result<()> {
    resolver.notice("")?;
    resolver.notice(
        &"Choose the primary field of each equivalent pair"
            .yellow()
            .bold()
            .to_string(),
    )?;
    report.resolve_with(&mut resolver)
}
