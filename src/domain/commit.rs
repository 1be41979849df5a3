// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
// SPDX-License-Identifier: GPL-3.0-only

use std::path::PathBuf;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize, Serializer};

use super::Persona;

/// Format git accepts for `GIT_AUTHOR_DATE` / `GIT_COMMITTER_DATE`.
pub const GIT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn format_git_date(ts: &NaiveDateTime) -> String {
    ts.format(GIT_DATE_FORMAT).to_string()
}

fn serialize_git_date<S: Serializer>(ts: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&format_git_date(ts))
}

/// Name and email written as both author and committer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorIdentity {
    pub name: String,
    pub email: String,
}

impl Default for AuthorIdentity {
    fn default() -> Self {
        Self {
            name: "GhostWriter".into(),
            email: "ghost@ghostline.dev".into(),
        }
    }
}

impl std::fmt::Display for AuthorIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} <{}>", self.name, self.email)
    }
}

/// A validated, timestamped commit that has not been written yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledCommit {
    pub message: String,
    pub files: Vec<PathBuf>,
    pub persona: Persona,
    pub author: AuthorIdentity,
    pub timestamp: NaiveDateTime,
}

impl ScheduledCommit {
    pub fn git_date(&self) -> String {
        format_git_date(&self.timestamp)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitResult {
    pub commit_hash: String,
    #[serde(serialize_with = "serialize_git_date")]
    pub timestamp_used: NaiveDateTime,
    pub persona: Persona,
}
