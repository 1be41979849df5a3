// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0

// miette's Diagnostic derive generates code that triggers this false positive
#![allow(unused_assignments)]

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    #[error("Unknown persona '{0}'")]
    #[diagnostic(
        code(ghostline::schedule::invalid_persona),
        help("Use one of: weekend_warrior, night_owl, standard")
    )]
    InvalidPersona(String),

    #[error("Repository unavailable at {}: {reason}", path.display())]
    #[diagnostic(
        code(ghostline::git::unavailable),
        help("Point --repo at an initialized, non-bare git working tree")
    )]
    RepositoryUnavailable { path: PathBuf, reason: String },

    #[error("Nothing to commit")]
    #[diagnostic(
        code(ghostline::git::nothing_to_commit),
        help("Pass paths that exist inside the work tree and contain changes")
    )]
    NothingToCommit,

    #[error("Merge in progress")]
    #[diagnostic(
        code(ghostline::git::merge),
        help("Complete or abort the merge: git merge --abort")
    )]
    MergeInProgress,

    #[error("Invalid commit message: {0}")]
    #[diagnostic(code(ghostline::commit::invalid))]
    InvalidCommitMessage(String),

    #[error("Could not parse source: {reason}")]
    #[diagnostic(
        code(ghostline::sanitize::unparsable),
        help("Only syntactically valid Python can be shadowed or diagrammed")
    )]
    UnparsableSource { reason: String },

    #[error("Parser setup failed: {0}")]
    #[diagnostic(code(ghostline::sanitize::parser))]
    Parser(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(ghostline::config::error))]
    Config(String),

    #[error("Git error: {0}")]
    #[diagnostic(code(ghostline::git::error))]
    Git(String),

    #[error("Operation cancelled by user")]
    Cancelled,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("Dialog error: {0}")]
    Dialog(String),
}

impl From<dialoguer::Error> for Error {
    fn from(e: dialoguer::Error) -> Self {
        Error::Dialog(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
