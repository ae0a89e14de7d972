//! Counts command - distinct values per field.

use std::path::PathBuf;

use colored::Colorize;
use fieldorder::Parser;

pub fn run(file: PathBuf, json_output: bool, _verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let (batch, source) = Parser::new().parse_file(&file)?;
    let counts = batch.value_counts();

    if json_output {
        let status = serde_json::json!({
            "file": source.file,
            "rows": source.row_count,
            "distinct_values": counts,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!(
        "{} {} ({} rows)",
        "Distinct values in".cyan().bold(),
        source.file.white(),
        source.row_count
    );
    println!();

    for (field, count) in &counts {
        let note = if *count == 1 {
            " constant".yellow().to_string()
        } else if *count == source.row_count {
            " unique".green().to_string()
        } else {
            String::new()
        };
        println!("  {:24} {:>8}{}", field, count, note);
    }

    Ok(())
}
