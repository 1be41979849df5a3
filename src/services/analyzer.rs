// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: GPL-3.0-only

use tree_sitter::{Language, Node, Parser, Tree};

use crate::domain::{BaseClass, Body, ClassDef, Definition, FunctionDef, Outline};
use crate::error::{Error, Result};

/// Python front end: tree-sitter parse plus outline extraction.
pub struct AnalyzerService {
    parser: Parser,
}

impl AnalyzerService {
    pub fn new() -> Result<Self> {
        let language: Language = tree_sitter_python::LANGUAGE.into();
        let mut parser = Parser::new();
        parser
            .set_language(&language)
            .map_err(|e| Error::Parser(e.to_string()))?;
        Ok(Self { parser })
    }

    /// Parse `source`, rejecting anything tree-sitter had to recover from.
    pub fn parse(&mut self, source: &str) -> Result<Tree> {
        let tree = self
            .parser
            .parse(source, None)
            .ok_or_else(|| Error::UnparsableSource {
                reason: "parser returned no tree".into(),
            })?;

        let root = tree.root_node();
        if root.has_error() {
            let reason = first_error(root)
                .map(|n| {
                    let pos = n.start_position();
                    format!("syntax error at line {}, column {}", pos.row + 1, pos.column + 1)
                })
                .unwrap_or_else(|| "syntax error".into());
            return Err(Error::UnparsableSource { reason });
        }

        Ok(tree)
    }

    pub fn outline(&mut self, source: &str) -> Result<Outline> {
        let tree = self.parse(source)?;
        let items = collect_block(tree.root_node(), source);
        Ok(Outline { items })
    }
}

fn first_error(node: Node) -> Option<Node> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    let mut cursor = node.walk();
    let children: Vec<Node> = node.children(&mut cursor).collect();
    children
        .into_iter()
        .filter(|c| c.has_error())
        .find_map(first_error)
}

fn text<'a>(node: Node, source: &'a str) -> &'a str {
    &source[node.start_byte()..node.end_byte()]
}

/// Definitions declared in a block (module, class body or function body).
fn collect_block(block: Node, source: &str) -> Vec<Definition> {
    let mut defs = Vec::new();
    let mut cursor = block.walk();
    let statements: Vec<Node> = block.named_children(&mut cursor).collect();
    for stmt in statements {
        collect_statement(stmt, source, true, &mut defs);
    }
    defs
}

fn collect_statement(node: Node, source: &str, direct: bool, out: &mut Vec<Definition>) {
    match node.kind() {
        "function_definition" => out.push(Definition::Function(function_def(node, source, direct))),
        "class_definition" => out.push(Definition::Class(class_def(node, source))),
        "decorated_definition" => {
            if let Some(inner) = node.child_by_field_name("definition") {
                collect_statement(inner, source, direct, out);
            }
        }
        _ => {
            // Compound statements (if/try/with/for/match) may hide definitions.
            let mut cursor = node.walk();
            let children: Vec<Node> = node.named_children(&mut cursor).collect();
            for child in children {
                collect_statement(child, source, false, out);
            }
        }
    }
}

fn function_def(node: Node, source: &str, direct: bool) -> FunctionDef {
    let name = node
        .child_by_field_name("name")
        .map(|n| text(n, source).to_string())
        .unwrap_or_else(|| "anonymous".into());
    let parameters = node
        .child_by_field_name("parameters")
        .map(|n| text(n, source).to_string())
        .unwrap_or_else(|| "()".into());
    let return_type = node
        .child_by_field_name("return_type")
        .map(|n| text(n, source).to_string());

    let mut cursor = node.walk();
    let children: Vec<Node> = node.children(&mut cursor).collect();
    let is_async = children.iter().any(|c| c.kind() == "async");

    let body = node.child_by_field_name("body");
    let body_end = body.map(block_end).unwrap_or_else(|| node.end_byte());

    // The header colon is the last ':' token before the body.
    let body_from = body.map(|b| b.start_byte()).unwrap_or(usize::MAX);
    let body_start = children
        .iter()
        .filter(|c| c.kind() == ":" && c.end_byte() <= body_from)
        .map(|c| c.end_byte())
        .last()
        .unwrap_or(body_end);

    let body_indent = match body {
        Some(b) if b.start_position().row > node.start_position().row => {
            leading_whitespace(source, b.start_byte()).to_string()
        }
        _ => format!("{}    ", leading_whitespace(source, node.start_byte())),
    };

    let docstring = body.and_then(|b| docstring(b, source));
    let nested = body.map(|b| collect_block(b, source)).unwrap_or_default();

    FunctionDef {
        name,
        parameters,
        return_type,
        is_async,
        direct,
        docstring,
        body_span: body_start..body_end,
        body_indent,
        body: Body::Source { nested },
    }
}

fn class_def(node: Node, source: &str) -> ClassDef {
    let name = node
        .child_by_field_name("name")
        .map(|n| text(n, source).to_string())
        .unwrap_or_else(|| "anonymous".into());

    let mut bases = Vec::new();
    if let Some(args) = node.child_by_field_name("superclasses") {
        let mut cursor = args.walk();
        let arg_nodes: Vec<Node> = args.named_children(&mut cursor).collect();
        for arg in arg_nodes {
            match arg.kind() {
                "identifier" => bases.push(BaseClass::Name(text(arg, source).to_string())),
                // `metaclass=...` and friends are not bases
                "keyword_argument" | "comment" => {}
                _ => bases.push(BaseClass::Expr(text(arg, source).to_string())),
            }
        }
    }

    let body = node
        .child_by_field_name("body")
        .map(|b| collect_block(b, source))
        .unwrap_or_default();

    ClassDef { name, bases, body }
}

/// End of the last statement in a block, never past its trailing newline.
fn block_end(block: Node) -> usize {
    let mut cursor = block.walk();
    let last = block.named_children(&mut cursor).last();
    last.map(|n| n.end_byte()).unwrap_or_else(|| block.end_byte())
}

/// Whitespace between the start of the line holding `byte` and `byte`.
fn leading_whitespace(source: &str, byte: usize) -> &str {
    let line_start = source[..byte].rfind('\n').map(|i| i + 1).unwrap_or(0);
    let prefix = &source[line_start..byte];
    let end = prefix
        .find(|c: char| !c.is_whitespace())
        .unwrap_or(prefix.len());
    &prefix[..end]
}

/// The first statement of a body, if it is a plain string literal.
fn docstring(body: Node, source: &str) -> Option<String> {
    let mut cursor = body.walk();
    let first = body
        .named_children(&mut cursor)
        .find(|n| n.kind() != "comment")?;
    if first.kind() != "expression_statement" || first.named_child_count() != 1 {
        return None;
    }

    let mut inner_cursor = first.walk();
    let literal = first.named_children(&mut inner_cursor).next()?;
    if !matches!(literal.kind(), "string" | "concatenated_string") {
        return None;
    }

    let raw = text(literal, source);
    // f-strings and bytes are not docstrings
    let prefix: String = raw
        .chars()
        .take_while(|c| c.is_ascii_alphabetic())
        .collect::<String>()
        .to_ascii_lowercase();
    if prefix.contains('f') || prefix.contains('b') {
        return None;
    }

    Some(raw.to_string())
}
