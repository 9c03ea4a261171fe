use anyhow::Result;
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::models::{CheckedExpression, Verdict};

/// Render a colored terminal report.
pub fn render(checks: &[CheckedExpression], verbose: bool, quiet: bool) -> Result<()> {
    let total = checks.len();
    let pass_count = checks.iter().filter(|c| c.verdict == Verdict::Pass).count();
    let warn_count = checks.iter().filter(|c| c.verdict == Verdict::Warn).count();
    let error_count = checks.iter().filter(|c| c.verdict == Verdict::Error).count();

    if quiet {
        println!(
            "Total: {}  Pass: {}  Warn: {}  Error: {}",
            total,
            pass_count.to_string().green(),
            warn_count.to_string().yellow(),
            error_count.to_string().red(),
        );
        return Ok(());
    }

    println!("\n {} v{}", "spdx-checkr".bold(), env!("CARGO_PKG_VERSION"));
    println!(" Checking {} expression(s)\n", total);

    let pass_licenses = summarize_licenses(checks, &Verdict::Pass);
    let warn_licenses = summarize_licenses(checks, &Verdict::Warn);
    let error_licenses = summarize_licenses(checks, &Verdict::Error);

    println!(" ┌────────────────────────────────────────────────────┐");
    println!(" │  {:<48} │", "SUMMARY".bold());
    println!(" │  {:<48} │", format!("Total expressions  : {}", total));
    println!(
        " │  {:<48} │",
        format!(
            "{}  Pass            : {:>4}  {}",
            "✓".green(),
            pass_count,
            pass_licenses
        )
    );
    println!(
        " │  {:<48} │",
        format!(
            "{}  Warn            : {:>4}  {}",
            "⚠".yellow(),
            warn_count,
            warn_licenses
        )
    );
    println!(
        " │  {:<48} │",
        format!(
            "{}  Error           : {:>4}  {}",
            "✗".red(),
            error_count,
            error_licenses
        )
    );
    println!(" └────────────────────────────────────────────────────┘\n");

    if error_count > 0 {
        println!(" {} Expressions failing the check:\n", "[ERROR]".red().bold());
        render_table(checks, &Verdict::Error);
        println!();
    }

    if warn_count > 0 {
        println!(" {} Expressions with warnings:\n", "[WARN]".yellow().bold());
        render_table(checks, &Verdict::Warn);
        println!();
    }

    if verbose && pass_count > 0 {
        println!(" {} All passing expressions:\n", "[PASS]".green().bold());
        render_table(checks, &Verdict::Pass);
        println!();
    }

    Ok(())
}

fn render_table(checks: &[CheckedExpression], verdict_filter: &Verdict) {
    // Transform columns appear only when the corresponding flag produced any
    // data at all.
    let has_normalized = checks.iter().any(|c| c.normalized.is_some());
    let has_dnf = checks.iter().any(|c| c.dnf.is_some());
    let has_licenses = checks.iter().any(|c| !c.licenses.is_empty());

    let mut header = vec![Cell::new("Expression").add_attribute(Attribute::Bold)];
    if has_normalized {
        header.push(Cell::new("Normalized").add_attribute(Attribute::Bold));
    }
    if has_dnf {
        header.push(Cell::new("DNF").add_attribute(Attribute::Bold));
    }
    if has_licenses {
        header.push(Cell::new("Licenses").add_attribute(Attribute::Bold));
    }
    header.push(Cell::new("Verdict").add_attribute(Attribute::Bold));
    header.push(Cell::new("Detail").add_attribute(Attribute::Bold));

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);

    for check in checks.iter().filter(|c| &c.verdict == verdict_filter) {
        let (verdict_str, verdict_color) = match check.verdict {
            Verdict::Pass => ("✓ pass", Color::Green),
            Verdict::Warn => ("⚠ warn", Color::Yellow),
            Verdict::Error => ("✗ error", Color::Red),
        };

        // Prefer the canonical rendering; fall back to the raw input for
        // expressions that did not parse.
        let expression = check.canonical.as_deref().unwrap_or(&check.input);

        let mut row = vec![Cell::new(expression)];
        if has_normalized {
            row.push(Cell::new(check.normalized.as_deref().unwrap_or("—")));
        }
        if has_dnf {
            row.push(Cell::new(check.dnf.as_deref().unwrap_or("—")));
        }
        if has_licenses {
            row.push(Cell::new(check.licenses.join("\n")));
        }
        row.push(
            Cell::new(verdict_str)
                .fg(verdict_color)
                .set_alignment(CellAlignment::Center),
        );
        row.push(Cell::new(check.detail.as_deref().unwrap_or("")));

        table.add_row(row);
    }

    println!("{}", table);
}

fn summarize_licenses(checks: &[CheckedExpression], verdict: &Verdict) -> String {
    let mut counts: std::collections::HashMap<&str, usize> = std::collections::HashMap::new();
    for check in checks.iter().filter(|c| &c.verdict == verdict) {
        for license in &check.licenses {
            *counts.entry(license.as_str()).or_insert(0) += 1;
        }
    }

    let mut pairs: Vec<(&str, usize)> = counts.into_iter().collect();
    pairs.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));

    let summary: Vec<String> = pairs
        .iter()
        .take(3)
        .map(|(license, count)| format!("{} ({})", license, count))
        .collect();

    if summary.is_empty() {
        String::new()
    } else {
        format!("[{}]", summary.join(", "))
    }
}
