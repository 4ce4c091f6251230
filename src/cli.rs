//! CLI argument parsing and command handlers

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;

use crate::models::{DEFAULT_INPUT, SplitConfig, SplitReport};
use crate::output;
use crate::splitter::Splitter;

/// certsplit: split a PEM bundle into one file per certificate
#[derive(Parser, Debug)]
#[command(
    name = "certsplit",
    version,
    about = "Split a concatenated PEM certificate bundle into individual files",
    long_about = "Reads a bundle of concatenated PEM certificates and writes each \
                  certificate to its own file named cert-NN.cer, where NN is the \
                  certificate's position in the bundle.\n\n\
                  Existing files with the same names are overwritten."
)]
pub struct Cli {
    /// Enable verbose logging (can be repeated for more verbosity)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// PEM bundle to split
    #[arg(value_name = "INPUT", default_value = DEFAULT_INPUT)]
    pub input: PathBuf,

    /// Directory to write certificate files into (must already exist)
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Print a JSON report instead of one line per file
    #[arg(long)]
    pub json: bool,

    /// Pretty-print JSON output (only with --json)
    #[arg(long)]
    pub pretty: bool,

    /// Suppress the per-file confirmation lines
    #[arg(short, long)]
    pub quiet: bool,
}

/// How the result of a run is shown on stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// `Created cert-NN.cer` after each file
    Lines,
    /// Nothing
    Quiet,
    /// Report as JSON once the run completes
    Json { pretty: bool },
}

impl Cli {
    pub fn config(&self) -> SplitConfig {
        SplitConfig {
            input: self.input.clone(),
            output_dir: self.output_dir.clone(),
        }
    }

    pub fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json { pretty: self.pretty }
        } else if self.quiet {
            OutputMode::Quiet
        } else {
            OutputMode::Lines
        }
    }

    pub fn execute(self) -> Result<()> {
        // Setup logging based on verbosity
        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
            .init();

        if self.pretty && !self.json {
            output::warn("--pretty has no effect without --json");
        }

        let stdout = io::stdout();
        let mut out = stdout.lock();
        handle_split(self.config(), self.output_mode(), &mut out)?;
        Ok(())
    }
}

/// Run one split, writing user-facing output to `out`
pub fn handle_split<W: Write>(config: SplitConfig, mode: OutputMode, out: &mut W) -> Result<SplitReport> {
    let splitter = Splitter::new(config);

    let report = splitter.run_with(|file| {
        if mode == OutputMode::Lines {
            writeln!(out, "Created {}", file.file_name).context("Failed to write to stdout")?;
        }
        Ok(())
    })?;

    if let OutputMode::Json { pretty } = mode {
        let json = if pretty {
            serde_json::to_string_pretty(&report)?
        } else {
            serde_json::to_string(&report)?
        };
        writeln!(out, "{}", json).context("Failed to write to stdout")?;
    }

    Ok(report)
}
