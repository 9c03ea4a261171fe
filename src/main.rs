//! `spdx-checkr` — check, normalize, and rewrite SPDX license expressions.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]).
//! 2. Load policy config ([`config::load_config`]).
//! 3. Collect expressions from arguments and `--file`.
//! 4. Parse and validate each expression under the active strictness
//!    ([`spdx_checkr::Expr::parse`]).
//! 5. Apply the per-license policy to the normalized expression
//!    ([`config::apply_policy`]).
//! 6. Render the requested report ([`report`]).
//! 7. Exit `0` (clean) or `1` (at least one [`models::Verdict::Error`]).

mod cli;
mod config;
mod models;
mod report;

use anyhow::{Context, Result};
use clap::Parser;

use spdx_checkr::{Expr, Strictness};

use cli::{Cli, ReportFormat};
use config::{apply_policy, load_config, Config};
use models::{CheckedExpression, Verdict};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;

    // --strictness beats the config file.
    let strictness: Strictness = match &cli.strictness {
        Some(arg) => arg.into(),
        None => config.policy.strictness.into(),
    };

    let mut inputs = cli.expressions.clone();
    if let Some(path) = &cli.file {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        inputs.extend(
            content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#'))
                .map(str::to_string),
        );
    }

    if inputs.is_empty() {
        eprintln!("No expressions to check; pass them as arguments or via --file");
        std::process::exit(1);
    }

    let checks: Vec<CheckedExpression> = inputs
        .iter()
        .map(|input| check_expression(input, strictness, &config, &cli))
        .collect();

    match cli.report {
        ReportFormat::Terminal => {
            report::terminal::render(&checks, cli.verbose, cli.quiet)?;
        }
        ReportFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&checks)?);
        }
    }

    let has_errors = checks.iter().any(|c| c.verdict == Verdict::Error);
    if has_errors {
        std::process::exit(1);
    }

    Ok(())
}

/// Check one expression and build its report row.
fn check_expression(
    input: &str,
    strictness: Strictness,
    config: &Config,
    cli: &Cli,
) -> CheckedExpression {
    let expr = match Expr::parse(input, strictness) {
        Ok(expr) => expr,
        Err(err) => {
            return CheckedExpression {
                input: input.to_string(),
                verdict: Verdict::Error,
                canonical: None,
                normalized: None,
                dnf: None,
                licenses: Vec::new(),
                detail: Some(err.to_string()),
            };
        }
    };

    let normalized = expr.normalize();
    let (verdict, detail) = apply_policy(config, &normalized);

    // Derived views follow --normalize: transforms apply to the normalized
    // tree when it is requested, to the expression as written otherwise.
    let base = if cli.normalize { &normalized } else { &expr };

    CheckedExpression {
        input: input.to_string(),
        verdict,
        canonical: Some(expr.to_string()),
        normalized: cli.normalize.then(|| normalized.to_string()),
        dnf: cli.dnf.then(|| base.dnf().to_string()),
        licenses: if cli.decompose {
            base.licenses()
        } else {
            Vec::new()
        },
        detail,
    }
}
