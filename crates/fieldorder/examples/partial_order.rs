//! Example: infer the field partial order of a data file.
//!
//! Usage:
//!   cargo run --example partial_order -- <file_path> [excluded_field ...]
//!
//! Example:
//!   cargo run --example partial_order -- house_data_1000.csv price

use std::env;
use std::path::Path;

use fieldorder::DependencyAnalyzer;

fn main() -> fieldorder::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: cargo run --example partial_order -- <file_path> [excluded_field ...]");
        std::process::exit(1);
    }

    let path = Path::new(&args[1]);
    if !path.exists() {
        eprintln!("Error: File not found: {}", path.display());
        std::process::exit(1);
    }

    let analyzer = DependencyAnalyzer::new().with_excluded_fields(args[2..].iter().cloned());
    let (report, source) = analyzer.analyze_file(path)?;

    println!("## {} ({} rows, {})", source.file, source.row_count, source.format);
    println!();

    println!("## Distinct values seen together");
    for entry in &report.cardinalities {
        println!(
            "  {:20} -> {:20} {}",
            entry.determiner, entry.dependent, entry.cardinality
        );
    }
    println!();

    println!("## Equivalent fields");
    for pair in &report.equivalences {
        println!("  {}", pair);
    }
    println!();

    println!("## Ordered fields");
    for pair in &report.ordered {
        println!("  {} -> {}", pair.first(), pair.second());
    }

    Ok(())
}
