//! Demo command - analyze the built-in customer purchase dataset.

use colored::Colorize;
use fieldorder::{sample, DependencyAnalyzer, RecordBatch};

pub fn run(repeat: usize, json: bool, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let batch = RecordBatch::new(sample::customer_purchases())?.repeat(repeat)?;
    let report = DependencyAnalyzer::new().analyze(&batch)?;

    if json {
        println!("{}", report.to_json()?);
        return Ok(());
    }

    println!(
        "{} customer purchases x{}",
        "Analyzing".cyan().bold(),
        repeat
    );
    println!();
    super::print_report(&report, verbose);

    Ok(())
}
