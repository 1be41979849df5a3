// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: GPL-3.0-only

use std::collections::BTreeMap;

use serde::Serialize;

use super::Signature;

pub const SAFE_STATUS: &str = "Safe for Public Display";

/// Debranded text plus what this one call removed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RedactedSource {
    pub text: String,
    pub secrets_removed: usize,
    pub terms_renamed: usize,
    /// Secret pattern name to match count.
    pub secret_kinds: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShadowSource {
    pub text: String,
    /// Signatures of the functions whose bodies were replaced.
    pub functions: Vec<Signature>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchitectureDiagram {
    /// Class names in emission order.
    pub classes: Vec<String>,
    pub text: String,
}

impl std::fmt::Display for ArchitectureDiagram {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SafetyReport {
    pub removed_secrets: usize,
    pub renamed_entities: usize,
    pub secret_kinds: BTreeMap<String, usize>,
    pub original_length: usize,
    pub sanitized_length: usize,
    pub status: String,
}

impl SafetyReport {
    pub fn new(original: &str, redacted: &RedactedSource) -> Self {
        Self {
            removed_secrets: redacted.secrets_removed,
            renamed_entities: redacted.terms_renamed,
            secret_kinds: redacted.secret_kinds.clone(),
            original_length: original.chars().count(),
            sanitized_length: redacted.text.chars().count(),
            status: SAFE_STATUS.to_string(),
        }
    }

    /// Fold another document's report into this one.
    pub fn merge(&mut self, other: &SafetyReport) {
        self.removed_secrets += other.removed_secrets;
        self.renamed_entities += other.renamed_entities;
        for (kind, count) in &other.secret_kinds {
            *self.secret_kinds.entry(kind.clone()).or_default() += count;
        }
        self.original_length += other.original_length;
        self.sanitized_length += other.sanitized_length;
    }
}

impl Default for SafetyReport {
    fn default() -> Self {
        Self {
            removed_secrets: 0,
            renamed_entities: 0,
            secret_kinds: BTreeMap::new(),
            original_length: 0,
            sanitized_length: 0,
            status: SAFE_STATUS.to_string(),
        }
    }
}

/// All public artifacts derived from one source file.
#[derive(Debug, Clone)]
pub struct SanitizedBundle {
    pub redacted: RedactedSource,
    /// Shadow text, or the parse-error marker.
    pub shadow: String,
    /// Diagram text, or the parse-error marker.
    pub diagram: String,
    pub report: SafetyReport,
}
