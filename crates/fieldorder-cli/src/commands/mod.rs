//! CLI command implementations.

pub mod analyze;
pub mod counts;
pub mod demo;

use colored::Colorize;
use fieldorder::DependencyReport;

/// Print a report in human-readable form.
pub(crate) fn print_report(report: &DependencyReport, verbose: bool) {
    println!(
        "{} fields, {} records",
        report.fields.len().to_string().white().bold(),
        report.record_count.to_string().white().bold()
    );

    if verbose {
        println!();
        println!("{}", "Cardinalities:".yellow().bold());
        for entry in &report.cardinalities {
            let card = entry.cardinality.to_string();
            let card = if entry.cardinality == 1 { card.green() } else { card.normal() };
            println!("  {:20} -> {:20} {}", entry.determiner, entry.dependent, card);
        }
    }

    println!();
    println!("{}", "Equivalent fields:".cyan().bold());
    if report.equivalences.is_empty() {
        println!("  (none)");
    }
    for pair in &report.equivalences {
        println!("  {} <-> {}", pair.first().white(), pair.second().white());
    }

    println!();
    println!("{}", "Ordered fields (determiner first):".cyan().bold());
    if report.ordered.is_empty() {
        println!("  (none)");
    }
    for pair in &report.ordered {
        println!("  {} -> {}", pair.first().white(), pair.second().white());
    }

    if verbose {
        print_field_summary(report);
    }

    if !report.resolved.is_empty() {
        println!();
        println!("{}", "Resolved equivalences (primary first):".cyan().bold());
        for pair in &report.resolved {
            println!("  {} -> {}", pair.first().white(), pair.second().white());
        }
    }
}

/// What each field determines, one line per field that determines anything.
fn print_field_summary(report: &DependencyReport) {
    let order = report.partial_order();

    println!();
    println!("{}", "By field:".yellow().bold());
    for field in &report.fields {
        let equivalents: Vec<&str> = order.equivalents_of(field).collect();
        let dependents: Vec<&str> = order.dependents_of(field).collect();
        if equivalents.is_empty() && dependents.is_empty() {
            continue;
        }

        let mut line = format!("  {:20}", field);
        if !equivalents.is_empty() {
            line.push_str(&format!(" <-> {}", equivalents.join(", ")));
        }
        if !dependents.is_empty() {
            line.push_str(&format!(" -> {}", dependents.join(", ")));
        }
        println!("{}", line);
    }
}
