// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
// SPDX-License-Identifier: GPL-3.0-only

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "ghostline")]
#[command(version)]
#[command(
    about = "Persona-timed commits and NDA-safe code sanitizing",
    long_about = None
)]
pub struct Cli {
    /// Repository to commit into
    #[arg(long, global = true, env = "GHOSTLINE_REPO")]
    pub repo: Option<PathBuf>,

    /// Fixed RNG seed for reproducible timestamps
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Commit author and committer name
    #[arg(long, global = true)]
    pub author_name: Option<String>,

    /// Commit author and committer email
    #[arg(long, global = true)]
    pub author_email: Option<String>,

    /// Forbidden term to replace with a placeholder (repeatable)
    #[arg(short = 't', long = "term", global = true)]
    pub terms: Vec<String>,

    /// Auto-confirm without prompting
    #[arg(short = 'y', long, global = true)]
    pub yes: bool,

    /// Emit machine-readable JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Commit files under a persona-chosen timestamp
    Schedule {
        /// Commit message
        #[arg(short, long)]
        message: String,

        /// weekend_warrior, night_owl or standard (defaults to config)
        #[arg(short, long)]
        persona: Option<String>,

        /// Resolve the timestamp but do not commit
        #[arg(long)]
        dry_run: bool,

        /// Paths to stage, relative to the repository root
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Redact secrets and forbidden terms from a file ("-" for stdin)
    Debrand {
        file: PathBuf,

        /// Print the safety report after the text
        #[arg(long)]
        report: bool,
    },
    /// Print the logic-free shadow of a Python file
    Shadow { file: PathBuf },
    /// Print a Mermaid class diagram of a Python file
    Diagram { file: PathBuf },
    /// Sanitize many files into an output directory
    Sanitize {
        /// Files or directories to scan
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Where redacted, shadow and diagram files are written
        #[arg(short, long)]
        out_dir: PathBuf,

        /// Glob filter for files found inside directories (repeatable)
        #[arg(long = "include", default_value = "**/*.py")]
        include: Vec<String>,
    },
    /// Initialize config file
    Init,
    /// Show current configuration
    Config,
    /// Check configuration, repository and parser
    Doctor,
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
