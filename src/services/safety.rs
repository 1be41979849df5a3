// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Replaces every secret match.
pub const SECRET_SENTINEL: &str = "REDACTED_SECRET";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretMatch {
    pub pattern_name: String,
    pub line: usize,
}

// Order matters: `sk-ant-` must be consumed before the generic `sk-` shape.
static SECRET_PATTERNS: LazyLock<Vec<(&str, Regex)>> = LazyLock::new(|| {
    vec![
        (
            "Anthropic Key",
            Regex::new(r"sk-ant-[A-Za-z0-9_-]{20,}").unwrap(),
        ),
        ("OpenAI Key", Regex::new(r"sk-[A-Za-z0-9]{20,}").unwrap()),
        (
            "GitHub Token",
            Regex::new(r"gh[pousr]_[A-Za-z0-9]{30,}").unwrap(),
        ),
        (
            "GitHub Fine-Grained Token",
            Regex::new(r"github_pat_[A-Za-z0-9_]{30,}").unwrap(),
        ),
        ("AWS Access Key", Regex::new(r"AKIA[0-9A-Z]{16}").unwrap()),
        (
            "Slack Token",
            Regex::new(r"xox[abposr]-[A-Za-z0-9-]{10,}").unwrap(),
        ),
        (
            "JWT",
            Regex::new(r"eyJ[A-Za-z0-9_-]+\.[A-Za-z0-9_-]+\.[A-Za-z0-9_-]+").unwrap(),
        ),
    ]
});

/// Result of a redaction pass.
#[derive(Debug, Clone, Default)]
pub struct Redaction {
    pub text: String,
    pub total: usize,
    pub by_kind: BTreeMap<String, usize>,
}

// All patterns as one alternation, group `i + 1` matching pattern `i`. A
// single leftmost-first pass keeps tokens nested inside another token from
// being matched twice.
static SECRET_MATCHER: LazyLock<Regex> = LazyLock::new(|| {
    let alternation = SECRET_PATTERNS
        .iter()
        .map(|(_, pattern)| format!("({})", pattern.as_str()))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&alternation).unwrap()
});

/// Replace every secret-shaped token with [`SECRET_SENTINEL`].
pub fn redact_secrets(source: &str) -> Redaction {
    let mut total = 0;
    let mut by_kind = BTreeMap::new();

    let text = SECRET_MATCHER
        .replace_all(source, |caps: &Captures<'_>| {
            let kind = SECRET_PATTERNS
                .iter()
                .enumerate()
                .find(|(idx, _)| caps.get(idx + 1).is_some())
                .map_or("Secret", |(_, (name, _))| *name);
            total += 1;
            *by_kind.entry(kind.to_string()).or_insert(0) += 1;
            SECRET_SENTINEL
        })
        .into_owned();

    Redaction {
        text,
        total,
        by_kind,
    }
}

/// Locate secrets without rewriting anything. One match per line is enough.
pub fn scan_for_secrets(source: &str) -> Vec<SecretMatch> {
    let mut found = Vec::new();

    for (idx, line) in source.lines().enumerate() {
        for (name, pattern) in SECRET_PATTERNS.iter() {
            if pattern.is_match(line) {
                found.push(SecretMatch {
                    pattern_name: name.to_string(),
                    line: idx + 1,
                });
                break;
            }
        }
    }

    found
}
