// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0

use std::collections::HashMap;
use std::fs;
use std::io::{IsTerminal, Read};
use std::path::{Component, Path, PathBuf};

use console::style;
use dialoguer::Confirm;
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, warn};

use crate::cli::{Cli, Commands};
use crate::config::Config;
use crate::domain::{Persona, RedactedSource, SafetyReport, format_git_date};
use crate::error::{Error, Result};
use crate::services::{
    analyzer::AnalyzerService,
    git::GitService,
    safety,
    sanitizer::{
        CodeSanitizer, DIAGRAM_PARSE_ERROR, SHADOW_PARSE_ERROR, class_diagram, shadow_structure,
    },
    scheduler::CommitScheduler,
};

pub struct App {
    cli: Cli,
    config: Config,
}

/// One sanitized file in a batch run.
#[derive(Debug, Serialize)]
struct FileReport {
    path: PathBuf,
    #[serde(flatten)]
    report: SafetyReport,
}

#[derive(Debug, Serialize)]
struct BatchReport {
    files: Vec<FileReport>,
    total: SafetyReport,
}

/// A source file and where its outputs go, relative to the output directory.
#[derive(Debug)]
struct BatchInput {
    source: PathBuf,
    relative: PathBuf,
}

impl App {
    pub fn new(cli: Cli) -> Result<Self> {
        let config = Config::load(&cli)?;
        debug!(
            repo = %config.repo_path.display(),
            persona = %config.persona,
            terms = config.sanitizer.forbidden_terms.len(),
            "config loaded"
        );
        Ok(Self { cli, config })
    }

    pub fn run(&mut self) -> Result<()> {
        match &self.cli.command {
            Commands::Schedule {
                message,
                persona,
                dry_run,
                files,
            } => {
                let persona = match persona {
                    Some(p) => p.parse::<Persona>()?,
                    None => self.config.persona,
                };
                self.schedule(message, persona, *dry_run, files)
            }
            Commands::Debrand { file, report } => self.debrand(file, *report),
            Commands::Shadow { file } => {
                let source = read_input(file)?;
                let mut sanitizer = CodeSanitizer::new(&self.config.sanitizer)?;
                let shadow = sanitizer.generate_shadow_structure(&source)?;
                print!("{}", shadow.text);
                Ok(())
            }
            Commands::Diagram { file } => {
                let source = read_input(file)?;
                let mut sanitizer = CodeSanitizer::new(&self.config.sanitizer)?;
                let diagram = sanitizer.code_to_diagram(&source)?;
                println!("{}", diagram);
                Ok(())
            }
            Commands::Sanitize {
                paths,
                out_dir,
                include,
            } => self.sanitize_batch(paths, out_dir, include),
            Commands::Init => {
                let path = Config::create_default()?;
                println!("Created config: {}", path.display());
                Ok(())
            }
            Commands::Config => {
                let rendered = toml::to_string_pretty(&self.config)
                    .map_err(|e| Error::Config(e.to_string()))?;
                print!("{}", rendered);
                Ok(())
            }
            Commands::Doctor => self.run_doctor(),
            Commands::Completions { shell } => {
                let mut cmd = <Cli as clap::CommandFactory>::command();
                clap_complete::generate(*shell, &mut cmd, "ghostline", &mut std::io::stdout());
                Ok(())
            }
        }
    }

    // ─── Scheduling ───

    fn schedule(
        &self,
        message: &str,
        persona: Persona,
        dry_run: bool,
        files: &[PathBuf],
    ) -> Result<()> {
        let mut scheduler = CommitScheduler::open(&self.config.repo_path, self.config.seed)?;
        let plan = scheduler.plan(message, files, persona, &self.config.author)?;

        self.print_status(&format!(
            "{} → {} ({} file{})",
            plan.persona,
            style(plan.git_date()).bold(),
            plan.files.len(),
            if plan.files.len() == 1 { "" } else { "s" }
        ));

        if dry_run {
            if self.cli.json {
                let preview = serde_json::json!({
                    "timestamp": plan.git_date(),
                    "persona": plan.persona,
                    "files": plan.files,
                });
                println!("{}", serde_json::to_string_pretty(&preview)?);
            } else {
                self.print_info("Dry run, nothing committed");
            }
            return Ok(());
        }

        let is_interactive = std::io::stdout().is_terminal() && std::io::stdin().is_terminal();
        if is_interactive && !self.cli.yes {
            let confirmed = Confirm::new()
                .with_prompt(format!("Commit as {} at {}?", plan.author, plan.git_date()))
                .default(true)
                .interact()?;
            if !confirmed {
                return Err(Error::Cancelled);
            }
        }

        let result = scheduler.apply(&plan)?;

        if self.cli.json {
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            eprintln!(
                "{} Committed {} at {}",
                style("✓").green().bold(),
                style(&result.commit_hash[..result.commit_hash.len().min(12)]).yellow(),
                format_git_date(&result.timestamp_used)
            );
        }

        Ok(())
    }

    // ─── Sanitizing ───

    fn debrand(&self, file: &Path, with_report: bool) -> Result<()> {
        let source = read_input(file)?;
        let mut sanitizer = CodeSanitizer::new(&self.config.sanitizer)?;
        let redacted = sanitizer.debrand(&source);
        let report = CodeSanitizer::safety_report(&source, &redacted);

        if self.cli.json {
            let out = serde_json::json!({
                "sanitized_code": redacted.text,
                "report": report,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
            return Ok(());
        }

        print!("{}", redacted.text);

        if with_report {
            for found in safety::scan_for_secrets(&source) {
                self.print_warning(&format!("{} on line {}", found.pattern_name, found.line));
            }
            Self::display_report(&report);
        }

        Ok(())
    }

    fn sanitize_batch(&self, paths: &[PathBuf], out_dir: &Path, include: &[String]) -> Result<()> {
        let inputs = collect_sources(paths, include)?;
        if inputs.is_empty() {
            self.print_warning("No matching source files");
            return Ok(());
        }

        fs::create_dir_all(out_dir)?;
        self.print_status(&format!("Sanitizing {} files...", inputs.len()));

        let bar = ProgressBar::new(inputs.len() as u64 * 2);
        if let Ok(bar_style) = ProgressStyle::with_template("{bar:30} {pos}/{len} {msg}") {
            bar.set_style(bar_style);
        }

        // Debranding is sequential: one sanitizer keeps placeholder numbers
        // consistent across the whole batch.
        let mut sanitizer = CodeSanitizer::new(&self.config.sanitizer)?;
        let mut redacted_docs: Vec<RedactedSource> = Vec::with_capacity(inputs.len());
        let mut files = Vec::with_capacity(inputs.len());
        let mut total = SafetyReport::default();

        for input in &inputs {
            bar.set_message(input.relative.display().to_string());
            let original = fs::read_to_string(&input.source)?;
            let redacted = sanitizer.debrand(&original);
            let report = CodeSanitizer::safety_report(&original, &redacted);
            total.merge(&report);
            files.push(FileReport {
                path: input.relative.clone(),
                report,
            });
            redacted_docs.push(redacted);
            bar.inc(1);
        }

        // Structure is derived from the redacted text, so it can run anywhere.
        let template = sanitizer.template().clone();
        let derived: Vec<(String, String)> = redacted_docs
            .par_iter()
            .map_init(AnalyzerService::new, |analyzer, redacted| {
                let Ok(analyzer) = analyzer else {
                    return (SHADOW_PARSE_ERROR.to_string(), DIAGRAM_PARSE_ERROR.to_string());
                };
                let shadow = shadow_structure(analyzer, &redacted.text, &template)
                    .map(|s| s.text)
                    .unwrap_or_else(|e| {
                        warn!(error = %e, "shadow generation skipped");
                        SHADOW_PARSE_ERROR.to_string()
                    });
                let diagram = class_diagram(analyzer, &redacted.text)
                    .map(|d| d.text)
                    .unwrap_or_else(|e| {
                        warn!(error = %e, "diagram generation skipped");
                        DIAGRAM_PARSE_ERROR.to_string()
                    });
                bar.inc(1);
                (shadow, diagram)
            })
            .collect();

        for ((input, redacted), (shadow, diagram)) in inputs.iter().zip(&redacted_docs).zip(derived) {
            let base = out_dir.join(&input.relative);
            if let Some(parent) = base.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(base.with_extension("redacted.py"), &redacted.text)?;
            fs::write(base.with_extension("shadow.py"), shadow)?;
            fs::write(base.with_extension("mmd"), diagram)?;
        }

        bar.finish_and_clear();

        let batch = BatchReport { files, total };
        let report_path = out_dir.join("safety_report.json");
        fs::write(&report_path, serde_json::to_string_pretty(&batch)?)?;

        if self.cli.json {
            println!("{}", serde_json::to_string_pretty(&batch.total)?);
        } else {
            Self::display_report(&batch.total);
            eprintln!(
                "{} Wrote {} files to {}",
                style("✓").green().bold(),
                inputs.len() * 3 + 1,
                out_dir.display()
            );
        }

        Ok(())
    }

    fn run_doctor(&self) -> Result<()> {
        eprintln!("{} Running diagnostics...\n", style("→").cyan());

        eprintln!("{}", style("Configuration").bold().underlined());
        eprintln!("  Persona:     {}", self.config.persona);
        eprintln!("  Author:      {}", self.config.author);
        eprintln!(
            "  Terms:       {}",
            self.config.sanitizer.forbidden_terms.len()
        );
        if let Some(ref path) = Config::config_path() {
            let status = if path.exists() { "found" } else { "not found" };
            eprintln!("  Config file: {} ({})", path.display(), status);
        }
        eprintln!();

        eprintln!("{}", style("Git Repository").bold().underlined());
        match GitService::open(&self.config.repo_path) {
            Ok(git) => eprintln!(
                "  Repository: {} ({})",
                style("found").green(),
                git.work_dir().display()
            ),
            Err(e) => eprintln!("  Repository: {} ({})", style("NOT FOUND").red().bold(), e),
        }
        eprintln!();

        eprintln!("{}", style("Sanitizer").bold().underlined());
        match CodeSanitizer::new(&self.config.sanitizer) {
            Ok(_) => eprintln!("  Python parser: {}", style("OK").green()),
            Err(e) => eprintln!("  Python parser: {}: {}", style("ERROR").red().bold(), e),
        }

        eprintln!();
        eprintln!("{} Diagnostics complete.", style("✓").green().bold());

        Ok(())
    }

    // ─── Output Helpers ───

    fn display_report(report: &SafetyReport) {
        eprintln!("{}", style("Safety report").bold().underlined());
        eprintln!("  Secrets removed:  {}", report.removed_secrets);
        for (kind, count) in &report.secret_kinds {
            eprintln!("    {}: {}", kind, count);
        }
        eprintln!("  Terms renamed:    {}", report.renamed_entities);
        eprintln!(
            "  Length:           {} → {}",
            report.original_length, report.sanitized_length
        );
        eprintln!("  Status:           {}", style(&report.status).green());
    }

    fn print_status(&self, msg: &str) {
        eprintln!("{} {}", style("→").cyan(), msg);
    }

    fn print_info(&self, msg: &str) {
        eprintln!("{} {}", style("info:").cyan(), msg);
    }

    fn print_warning(&self, msg: &str) {
        eprintln!("{} {}", style("warning:").yellow().bold(), msg);
    }
}

/// Read a file, or stdin for `-`.
fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        return Ok(buf);
    }
    Ok(fs::read_to_string(path)?)
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern)
            .map_err(|e| Error::Config(format!("invalid include glob '{pattern}': {e}")))?;
        builder.add(glob);
    }
    builder
        .build()
        .map_err(|e| Error::Config(format!("invalid include globs: {e}")))
}

/// Expand the batch arguments. Files are keyed by their path as given;
/// directories are walked and filtered through `include`. Two inputs that
/// would write to the same output are rejected.
fn collect_sources(paths: &[PathBuf], include: &[String]) -> Result<Vec<BatchInput>> {
    let globs = build_globset(include)?;
    let mut inputs = Vec::new();

    for path in paths {
        if path.is_dir() {
            for source in walk_dir(path) {
                let Ok(relative) = source.strip_prefix(path).map(Path::to_path_buf) else {
                    continue;
                };
                if globs.is_match(&relative) {
                    inputs.push(BatchInput { source, relative });
                }
            }
        } else if path.is_file() {
            inputs.push(BatchInput {
                source: path.clone(),
                relative: output_key(path),
            });
        } else {
            warn!(path = %path.display(), "skipping missing path");
        }
    }

    let mut claimed: HashMap<&Path, &Path> = HashMap::new();
    for input in &inputs {
        if let Some(first) = claimed.insert(&input.relative, &input.source) {
            return Err(Error::Config(format!(
                "{} and {} would both be written as {}",
                first.display(),
                input.source.display(),
                input.relative.display()
            )));
        }
    }

    Ok(inputs)
}

/// Output location for a file named on the command line: the path itself
/// when it stays below the working directory, otherwise just its file name.
fn output_key(path: &Path) -> PathBuf {
    let below_cwd = path
        .components()
        .try_fold(PathBuf::new(), |mut acc, part| match part {
            Component::Normal(name) => {
                acc.push(name);
                Some(acc)
            }
            Component::CurDir => Some(acc),
            _ => None,
        })
        .filter(|key| !key.as_os_str().is_empty());

    below_cwd.unwrap_or_else(|| {
        path.file_name()
            .map(PathBuf::from)
            .unwrap_or_else(|| path.to_path_buf())
    })
}

/// Regular files under `dir`, sorted. Hidden entries are skipped and
/// symlinks are never followed.
fn walk_dir(dir: &Path) -> Vec<PathBuf> {
    let mut builder = WalkBuilder::new(dir);
    builder.standard_filters(false);
    builder.hidden(true);
    builder.follow_links(false);

    let mut files = Vec::new();
    for entry in builder.build() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(error = %e, "skipping unreadable entry");
                continue;
            }
        };
        if entry.file_type().is_some_and(|t| t.is_file()) {
            files.push(entry.into_path());
        }
    }

    files.sort();
    files
}
