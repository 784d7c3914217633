//! Terminal display logic for the namehunt CLI.
//!
//! Colored result lines, progress counters, category groups, and the
//! distinct terminal messages for completed, empty, cancelled, and failed
//! runs. Uses only the `console` crate.

use console::style;
use namehunt_lib::{Backend, CategoryGroup, NameHuntError};
use std::time::Duration;

/// Print a styled header at the start of a streaming run.
pub fn print_header(total: usize, batch_size: usize, backend: Backend) {
    let backend_label = match backend {
        Backend::Doh => "DNS-over-HTTPS",
        Backend::Registrar => "registrar",
    };
    println!(
        "{} {} {}",
        style("namehunt").bold(),
        style(format!("v{}", env!("CARGO_PKG_VERSION"))).dim(),
        style(format!(
            "checking {} domain{} via {}",
            total,
            if total == 1 { "" } else { "s" },
            backend_label
        ))
        .dim(),
    );
    println!("{}", style(format!("Batch size: {}", batch_size)).dim());
    println!();
}

/// Print one newly discovered available domain.
pub fn print_available(domain: &str) {
    println!(
        "  {}  {}",
        style("AVAILABLE").green().bold(),
        style(domain).white()
    );
}

/// Print a per-batch progress line.
pub fn print_progress(checked: usize, total: usize, found: usize) {
    println!(
        "{}",
        style(format!(
            "  [{}/{}] checked, {} available so far",
            checked, total, found
        ))
        .dim()
    );
}

/// Print categorized groups of available domains.
pub fn print_groups(groups: &[CategoryGroup]) {
    println!();
    for group in groups {
        println!("{}", style(&group.category).yellow().bold());
        for domain in &group.domains {
            println!("  {}", style(domain).green());
        }
    }
}

/// Final summary for a completed run with results.
pub fn print_summary(total: usize, available: usize, duration: Duration) {
    println!();
    println!(
        "{} {} of {} domains available ({:.1}s)",
        style("Done:").bold(),
        style(available).green().bold(),
        total,
        duration.as_secs_f64(),
    );
}

/// A completed run that found nothing, distinct from cancelled or failed.
pub fn print_no_results(total: usize, duration: Duration) {
    println!();
    println!(
        "{} checked all {} domains in {:.1}s, none available",
        style("Done:").bold(),
        total,
        duration.as_secs_f64(),
    );
}

/// A cancelled run; partial results printed above remain valid.
pub fn print_cancelled(found: usize, duration: Duration) {
    println!();
    println!(
        "{} run stopped after {:.1}s; {} available domain{} found before cancelling",
        style("Cancelled:").yellow().bold(),
        duration.as_secs_f64(),
        found,
        if found == 1 { "" } else { "s" },
    );
}

/// A failed run, distinct from "no results".
pub fn print_failed(error: &NameHuntError) {
    eprintln!();
    eprintln!("{} {}", style("Failed:").red().bold(), error);
}

/// The generator path ended with nothing to check; a graceful end state.
pub fn print_nothing_to_check() {
    println!("{}", style("Nothing to check.").dim());
}

/// Non-fatal warning (generation failures, cancellation notices).
pub fn print_warning(message: &str) {
    eprintln!("{} {}", style("Warning:").yellow().bold(), message);
}
