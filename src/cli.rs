use std::path::PathBuf;

use clap::Parser;

use spdx_checkr::Strictness;

#[derive(Parser, Debug)]
#[command(
    name = "spdx-checkr",
    about = "Parse, validate, and normalize SPDX license expressions",
    version
)]
pub struct Cli {
    /// SPDX license expressions to check
    #[arg(value_name = "EXPRESSION")]
    pub expressions: Vec<String>,

    /// Read additional expressions from a file, one per line (# starts a comment)
    #[arg(long, value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Which catalog identifiers to accept [default: from config]
    #[arg(long, value_name = "LEVEL")]
    pub strictness: Option<StrictnessArg>,

    /// Show the normalized form (deprecated ids upgraded, casing corrected)
    #[arg(short, long)]
    pub normalize: bool,

    /// List the atomic licenses of each expression
    #[arg(long)]
    pub decompose: bool,

    /// Show the disjunctive normal form
    #[arg(long)]
    pub dnf: bool,

    /// Report format
    #[arg(long, default_value = "terminal", value_name = "FORMAT")]
    pub report: ReportFormat,

    /// Policy config file [default: ./.spdx-checkr/config.toml, fallback ~/.config/spdx-checkr/config.toml]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Show all expressions (not just warnings/errors)
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print summary line
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum ReportFormat {
    Terminal,
    Json,
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum StrictnessArg {
    /// Accept any identifier, known or not
    Any,
    /// Accept known identifiers, including deprecated ones
    Deprecated,
    /// Accept only current identifiers
    Current,
}

impl From<&StrictnessArg> for Strictness {
    fn from(arg: &StrictnessArg) -> Self {
        match arg {
            StrictnessArg::Any => Strictness::AllowAny,
            StrictnessArg::Deprecated => Strictness::AllowDeprecated,
            StrictnessArg::Current => Strictness::AllowCurrent,
        }
    }
}
