//! Console rendering of app and comparison reports

use super::{AppReport, ComponentReport};
use crate::compare::ComparisonReport;
use crate::fmt::{format_bytes, format_delta, truncate_start, CHART, PACKAGE};
use console::style;

const NAME_WIDTH: usize = 52;

fn percent_of(part: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

/// Print the app report, listing at most `top` components per section
pub fn print_app_report(report: &AppReport, top: usize) {
    println!();
    println!(
        "{}",
        style(format!("App Size Report: {}", report.name))
            .bold()
            .underlined()
    );
    println!();
    println!(
        "{}{} {} download, {} install",
        PACKAGE,
        style("Base app:").bold(),
        style(format_bytes(report.download_size)).cyan().bold(),
        format_bytes(report.install_size)
    );
    println!();

    print_components(&report.components, report.download_size, top);

    for feature in &report.dynamic_features {
        println!(
            "{}{} {} ({}) {} download, {} install",
            PACKAGE,
            style("Dynamic feature:").bold(),
            style(&feature.name).yellow().bold(),
            style(&feature.owner).dim(),
            style(format_bytes(feature.download_size)).cyan().bold(),
            format_bytes(feature.install_size)
        );
        println!();
        print_components(&feature.components, feature.download_size, top);
    }
}

fn print_components(components: &[ComponentReport], total: u64, top: usize) {
    if components.is_empty() {
        println!("  {}", style("No files attributed").dim());
        println!();
        return;
    }

    println!(
        "{}{}",
        CHART,
        style(format!("TOP COMPONENTS ({} total):", components.len())).bold()
    );
    println!("{}", style("─".repeat(90)).dim());

    let display_count = components.len().min(top);
    for (i, component) in components.iter().take(display_count).enumerate() {
        println!(
            "  {:2}. {:>10} ({:>5.1}%)  {:<width$}  {}",
            i + 1,
            style(format_bytes(component.download_size)).cyan().bold(),
            percent_of(component.download_size, total),
            truncate_start(&component.name, NAME_WIDTH),
            style(&component.owner).dim(),
            width = NAME_WIDTH
        );
    }

    if components.len() > display_count {
        println!(
            "\n      {} {} more components...",
            style("...").dim(),
            components.len() - display_count
        );
    }
    println!();
}

/// Print the comparison report, listing at most `top` changed files
pub fn print_comparison_report(report: &ComparisonReport, top: usize) {
    println!();
    println!("{}", style("Size Comparison").bold().underlined());
    println!();
    println!(
        "  {} {}",
        style("Base:").bold(),
        format_bytes(report.old_download_size)
    );
    println!(
        "  {} {}",
        style("Head:").bold(),
        format_bytes(report.new_download_size)
    );

    let delta = format!(
        "{} ({:+.2}%)",
        format_delta(report.difference),
        report.delta_percent
    );
    let delta = match report.difference.signum() {
        1 => style(delta).red().bold(),
        -1 => style(delta).green().bold(),
        _ => style(delta).dim(),
    };
    println!("  {} {}", style("Delta:").bold(), delta);
    println!();

    if report.files.is_empty() {
        println!("  {}", style("No file size changes").dim());
        println!();
        return;
    }

    println!(
        "{}{}",
        CHART,
        style(format!("CHANGED FILES ({} total):", report.files.len())).bold()
    );
    println!("{}", style("─".repeat(90)).dim());

    let display_count = report.files.len().min(top);
    for file in report.files.iter().take(display_count) {
        let change = format_delta(file.difference);
        let change = if file.difference > 0 {
            style(change).red()
        } else {
            style(change).green()
        };
        println!(
            "  {:>12}  {:>10} -> {:<10}  {}",
            change,
            format_bytes(file.old_size),
            format_bytes(file.new_size),
            truncate_start(&file.name, NAME_WIDTH)
        );
    }

    if report.files.len() > display_count {
        println!(
            "\n      {} {} more files...",
            style("...").dim(),
            report.files.len() - display_count
        );
    }
    println!();
}
