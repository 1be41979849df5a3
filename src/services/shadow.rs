// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: GPL-3.0-only

use crate::domain::{Body, ClassDef, Definition, FunctionDef, Outline};

/// What a stubbed function body is made of.
#[derive(Debug, Clone)]
pub struct StubTemplate {
    pub hidden_notice: String,
    /// Callable that receives the audit message, e.g. `logger.info`.
    pub audit_call: String,
}

impl StubTemplate {
    fn lines_for(&self, f: &FunctionDef) -> Vec<String> {
        let mut lines = Vec::with_capacity(3);
        if let Some(doc) = &f.docstring {
            lines.push(doc.clone());
        }
        lines.push(quote(&self.hidden_notice));
        lines.push(format!(
            "{}({})",
            self.audit_call,
            quote(&format!("Executing {} logic...", f.name))
        ));
        lines
    }
}

/// Python double-quoted string literal.
fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Rewrite every function body into a stub. Returns a new outline; the input
/// is left as is.
pub fn shadow_outline(outline: &Outline, template: &StubTemplate) -> Outline {
    Outline {
        items: outline
            .items
            .iter()
            .map(|d| shadow_definition(d, template))
            .collect(),
    }
}

fn shadow_definition(def: &Definition, template: &StubTemplate) -> Definition {
    match def {
        // Nested definitions vanish with the body that held them.
        Definition::Function(f) => Definition::Function(FunctionDef {
            body: Body::Stub(template.lines_for(f)),
            ..f.clone()
        }),
        Definition::Class(c) => Definition::Class(ClassDef {
            body: c
                .body
                .iter()
                .map(|d| shadow_definition(d, template))
                .collect(),
            ..c.clone()
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_escapes_python_specials() {
        assert_eq!(quote(r#"say "hi"\n"#), r#""say \"hi\"\\n""#);
        assert_eq!(quote("tab\there"), r#""tab\there""#);
    }
}
