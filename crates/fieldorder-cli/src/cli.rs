//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// fieldorder: infer functional dependencies between fields
#[derive(Parser)]
#[command(name = "fieldorder")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Infer equivalent and ordered field pairs from a data file
    Analyze {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Field to leave out of the analysis (repeatable)
        #[arg(short = 'x', long, value_name = "FIELD")]
        exclude: Vec<String>,

        /// Repeat every record this many times before analysis
        #[arg(long, default_value = "1")]
        repeat: usize,

        /// How to order equivalent fields [default: keep, or prefer with --prefer]
        #[arg(short, long)]
        resolve: Option<ResolveChoice>,

        /// Preferred primary field (repeatable, highest first; implies --resolve prefer)
        #[arg(long, value_name = "FIELD")]
        prefer: Vec<String>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,

        /// Write the JSON report to a file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the number of distinct values per field
    Counts {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Analyze the built-in customer purchase dataset
    Demo {
        /// Repeat every record this many times
        #[arg(long, default_value = "100")]
        repeat: usize,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Strategy for ordering equivalent fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ResolveChoice {
    /// Keep alphabetical order
    Keep,
    /// Ask for each pair on the terminal
    Prompt,
    /// Use the --prefer list
    Prefer,
}
