// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: GPL-3.0-only

use std::collections::HashMap;

use regex::{Captures, Regex};
use tracing::debug;

use crate::error::{Error, Result};

/// Matches forbidden terms on identifier boundaries and hands out stable
/// placeholders (`GenericEntity1`, `GenericEntity2`, ...) in first-seen order.
#[derive(Debug, Clone)]
pub struct TermReplacer {
    matcher: Option<Regex>,
    prefix: String,
    assigned: HashMap<String, String>,
    order: Vec<String>,
}

/// Outcome of one replacement pass.
#[derive(Debug, Clone)]
pub struct Replacement {
    pub text: String,
    pub count: usize,
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// `\b` only makes sense on an edge that is itself a word character.
fn boundary_pattern(term: &str) -> String {
    let mut pattern = String::new();
    if term.chars().next().is_some_and(is_word_char) {
        pattern.push_str(r"\b");
    }
    pattern.push_str(&regex::escape(term));
    if term.chars().last().is_some_and(is_word_char) {
        pattern.push_str(r"\b");
    }
    pattern
}

impl TermReplacer {
    pub fn new(terms: &[String], prefix: &str) -> Result<Self> {
        let mut unique: Vec<&str> = Vec::new();
        for term in terms.iter().map(|t| t.trim()) {
            if !term.is_empty() && !unique.contains(&term) {
                unique.push(term);
            }
        }

        // Leftmost-first alternation: longer terms must come first so that
        // "Acme Corp" wins over "Acme" at the same position.
        unique.sort_by(|a, b| b.len().cmp(&a.len()));

        let matcher = if unique.is_empty() {
            None
        } else {
            let alternation = unique
                .iter()
                .map(|t| boundary_pattern(t))
                .collect::<Vec<_>>()
                .join("|");
            let regex = Regex::new(&alternation)
                .map_err(|e| Error::Config(format!("invalid forbidden terms: {e}")))?;
            Some(regex)
        };

        debug!(terms = unique.len(), "term matcher compiled");

        Ok(Self {
            matcher,
            prefix: prefix.to_string(),
            assigned: HashMap::new(),
            order: Vec::new(),
        })
    }

    pub fn replace(&mut self, text: &str) -> Replacement {
        let Some(matcher) = &self.matcher else {
            return Replacement {
                text: text.to_string(),
                count: 0,
            };
        };

        let mut count = 0;
        let assigned = &mut self.assigned;
        let order = &mut self.order;
        let prefix = &self.prefix;

        let replaced = matcher.replace_all(text, |caps: &Captures| {
            count += 1;
            let term = &caps[0];
            if let Some(existing) = assigned.get(term) {
                return existing.clone();
            }
            let placeholder = format!("{}{}", prefix, order.len() + 1);
            order.push(term.to_string());
            assigned.insert(term.to_string(), placeholder.clone());
            placeholder
        });

        Replacement {
            text: replaced.into_owned(),
            count,
        }
    }

    pub fn placeholder_for(&self, term: &str) -> Option<&str> {
        self.assigned.get(term).map(String::as_str)
    }

    /// `(term, placeholder)` pairs in assignment order.
    pub fn assignments(&self) -> Vec<(&str, &str)> {
        self.order
            .iter()
            .map(|t| (t.as_str(), self.assigned[t].as_str()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn replacer(terms: &[&str]) -> TermReplacer {
        let terms: Vec<String> = terms.iter().map(|t| t.to_string()).collect();
        TermReplacer::new(&terms, "GenericEntity").unwrap()
    }

    #[test]
    fn boundary_pattern_skips_non_word_edges() {
        assert_eq!(boundary_pattern("Acme"), r"\bAcme\b");
        assert_eq!(boundary_pattern("C++"), r"\bC\+\+");
        assert_eq!(boundary_pattern("@corp"), r"@corp\b");
    }

    #[test]
    fn placeholders_follow_first_appearance_not_list_order() {
        let mut r = replacer(&["Zeta", "Alpha"]);
        let out = r.replace("Alpha then Zeta then Alpha");
        assert_eq!(out.text, "GenericEntity1 then GenericEntity2 then GenericEntity1");
        assert_eq!(out.count, 3);
        assert_eq!(
            r.assignments(),
            vec![("Alpha", "GenericEntity1"), ("Zeta", "GenericEntity2")]
        );
    }

    #[test]
    fn longer_term_wins_at_same_position() {
        let mut r = replacer(&["Acme", "Acme Corp"]);
        let out = r.replace("Acme Corp and Acme");
        assert_eq!(out.text, "GenericEntity1 and GenericEntity2");
        assert_eq!(r.placeholder_for("Acme Corp"), Some("GenericEntity1"));
    }

    #[test]
    fn empty_and_duplicate_terms_ignored() {
        let mut r = replacer(&["", "  ", "Acme", "Acme"]);
        let out = r.replace("Acme");
        assert_eq!(out.text, "GenericEntity1");
        assert_eq!(r.assignments().len(), 1);
    }

    #[test]
    fn no_terms_is_identity() {
        let mut r = replacer(&[]);
        let out = r.replace("anything at all");
        assert_eq!(out.text, "anything at all");
        assert_eq!(out.count, 0);
    }
}
