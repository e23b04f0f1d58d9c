// SPDX-License-Identifier: PMPL-1.0-or-later
//! a11y-auditor CLI - audit a page or an HTML file for WCAG compliance.

use a11y_auditor::catalog::RuleCatalog;
use a11y_auditor::report::{generate_report, OutputFormat};
use a11y_auditor::{AuditSource, Auditor};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Accessibility audit and scoring engine for HTML documents
#[derive(Parser)]
#[command(name = "a11y-auditor")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Audit a remote page
    Url {
        /// Address of the page (scheme defaults to https)
        address: String,

        /// Path to a JSON rule file (built-in catalog if omitted)
        #[arg(long)]
        rules: Option<PathBuf>,

        /// Output format
        #[arg(long, default_value = "text")]
        format: FormatArg,

        /// Output file (stdout if not specified)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Enable verbose logging
        #[arg(long, short)]
        verbose: bool,
    },

    /// Audit a local HTML file
    File {
        /// File to audit
        path: PathBuf,

        /// Path to a JSON rule file (built-in catalog if omitted)
        #[arg(long)]
        rules: Option<PathBuf>,

        /// Output format
        #[arg(long, default_value = "text")]
        format: FormatArg,

        /// Output file (stdout if not specified)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Enable verbose logging
        #[arg(long, short)]
        verbose: bool,
    },

    /// List the rule catalog
    Rules {
        /// Path to a JSON rule file (built-in catalog if omitted)
        #[arg(long)]
        rules: Option<PathBuf>,
    },
}

/// Output format CLI argument
#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    /// Human-readable text
    Text,
    /// Structured JSON
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("a11y_auditor=debug")
    } else {
        EnvFilter::new("a11y_auditor=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn load_catalog(rules: Option<&Path>) -> anyhow::Result<RuleCatalog> {
    Ok(match rules {
        Some(path) => RuleCatalog::from_json_file(path)?,
        None => RuleCatalog::default(),
    })
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Url { address, rules, format, output, verbose } => {
            init_logging(verbose);
            let auditor = Auditor::new(load_catalog(rules.as_deref())?);
            let report = auditor.run(&AuditSource::Url { address })?;
            write_output(&generate_report(&report, format.into()), output.as_deref())?;

            if !report.result.violations.is_empty() {
                std::process::exit(1);
            }
        }

        Commands::File { path, rules, format, output, verbose } => {
            init_logging(verbose);
            let content = std::fs::read_to_string(&path)?;
            let auditor = Auditor::new(load_catalog(rules.as_deref())?);
            let report = auditor.run(&AuditSource::Html { content })?;
            write_output(&generate_report(&report, format.into()), output.as_deref())?;

            if !report.result.violations.is_empty() {
                std::process::exit(1);
            }
        }

        Commands::Rules { rules } => {
            let catalog = load_catalog(rules.as_deref())?;
            for rule in catalog.rules() {
                println!("{} (Level {}) - {}", rule.id, rule.level, rule.name);
            }
        }
    }

    Ok(())
}

/// Write output to file or stdout
fn write_output(content: &str, path: Option<&Path>) -> anyhow::Result<()> {
    match path {
        Some(p) => {
            std::fs::write(p, content)?;
            eprintln!("Report written to {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
