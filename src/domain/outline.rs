// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: GPL-3.0-only

//! Definition tree of a Python module.
//!
//! Only functions and classes are modelled. Everything else stays in the
//! original source text and is carried through untouched when an outline is
//! rendered back, so a rewrite only has to describe the spans it changes.

use std::ops::Range;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Definition {
    Function(FunctionDef),
    Class(ClassDef),
}

impl Definition {
    pub fn name(&self) -> &str {
        match self {
            Self::Function(f) => &f.name,
            Self::Class(c) => &c.name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDef {
    pub name: String,
    /// Parameter list exactly as written, parentheses included.
    pub parameters: String,
    pub return_type: Option<String>,
    pub is_async: bool,
    /// Declared directly in the enclosing block (not under `if`/`try`/...).
    pub direct: bool,
    /// Docstring literal as written, quotes and prefix included.
    pub docstring: Option<String>,
    /// From just after the header colon to the end of the body.
    pub body_span: Range<usize>,
    /// Indentation the body statements use.
    pub body_indent: String,
    pub body: Body,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    /// Original statements; only the definitions inside are modelled.
    Source { nested: Vec<Definition> },
    /// Replacement statements, one per line.
    Stub(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDef {
    pub name: String,
    pub bases: Vec<BaseClass>,
    pub body: Vec<Definition>,
}

impl ClassDef {
    /// Functions declared directly in the class body.
    pub fn methods(&self) -> impl Iterator<Item = &FunctionDef> {
        self.body.iter().filter_map(|d| match d {
            Definition::Function(f) if f.direct => Some(f),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BaseClass {
    /// A bare identifier such as `BankAccount`.
    Name(String),
    /// Anything else: dotted paths, subscripts, calls.
    Expr(String),
}

/// Signature of a function as it appears in source.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Signature {
    pub name: String,
    pub parameters: String,
    pub return_type: Option<String>,
}

impl From<&FunctionDef> for Signature {
    fn from(f: &FunctionDef) -> Self {
        Self {
            name: f.name.clone(),
            parameters: f.parameters.clone(),
            return_type: f.return_type.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Outline {
    pub items: Vec<Definition>,
}

impl Outline {
    /// Every function signature, depth-first in source order.
    pub fn signatures(&self) -> Vec<Signature> {
        fn walk(defs: &[Definition], out: &mut Vec<Signature>) {
            for def in defs {
                match def {
                    Definition::Function(f) => {
                        out.push(Signature::from(f));
                        if let Body::Source { nested } = &f.body {
                            walk(nested, out);
                        }
                    }
                    Definition::Class(c) => walk(&c.body, out),
                }
            }
        }

        let mut out = Vec::new();
        walk(&self.items, &mut out);
        out
    }

    /// Splice rewritten bodies back into `source`.
    ///
    /// `source` must be the text this outline was parsed from; spans are byte
    /// offsets into it.
    pub fn render(&self, source: &str) -> String {
        fn walk(defs: &[Definition], source: &str, cursor: &mut usize, out: &mut String) {
            for def in defs {
                match def {
                    Definition::Function(f) => match &f.body {
                        Body::Source { nested } => walk(nested, source, cursor, out),
                        Body::Stub(lines) => {
                            out.push_str(&source[*cursor..f.body_span.start]);
                            for line in lines {
                                out.push('\n');
                                out.push_str(&f.body_indent);
                                out.push_str(line);
                            }
                            *cursor = f.body_span.end;
                        }
                    },
                    Definition::Class(c) => walk(&c.body, source, cursor, out),
                }
            }
        }

        let mut out = String::with_capacity(source.len());
        let mut cursor = 0;
        walk(&self.items, source, &mut cursor, &mut out);
        out.push_str(&source[cursor..]);
        out
    }
}
