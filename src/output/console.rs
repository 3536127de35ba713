//! Colored top-N summary printed after a successful run

use crate::pipeline::RunSummary;
use colored::Colorize;

/// Prints the ranked summary table for the first `top` results.
pub fn print_summary(summary: &RunSummary, top: usize) {
    println!();
    println!("{}", "Ranked sections".bold().underline());
    println!(
        "{} documents processed, {} skipped, {} sections ranked in {:.2}s",
        summary.documents_processed,
        summary.documents_skipped,
        summary.results.len(),
        summary.elapsed.as_secs_f32()
    );
    println!("Full results: {}", summary.output_path.display());
    println!();

    for (index, result) in summary.results.iter().take(top).enumerate() {
        let rank = format!("#{}", index + 1);
        let score = format!("{:.3}", result.relevance_score);
        let score = if result.relevance_score > 0.7 {
            score.green().bold()
        } else if result.relevance_score > 0.5 {
            score.yellow().bold()
        } else {
            score.normal()
        };

        let title = if result.section_title.is_empty() {
            "(untitled)".dimmed().to_string()
        } else {
            result.section_title.cyan().bold().to_string()
        };

        println!(
            "{} {} {} {}",
            rank.cyan().bold(),
            score,
            title,
            format!("[{} p{}]", result.document_name, result.page_number).dimmed()
        );
        println!("   {}", result.reasoning.dimmed());
    }

    if summary.results.len() > top {
        println!();
        println!(
            "{}",
            format!("... and {} more in the result file", summary.results.len() - top).dimmed()
        );
    }
}
