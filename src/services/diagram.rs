// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: GPL-3.0-only

use std::collections::VecDeque;

use crate::domain::{ArchitectureDiagram, BaseClass, Body, ClassDef, Definition, Outline};

pub const DIAGRAM_HEADER: &str = "classDiagram";

/// Mermaid class diagram: classes, plain-name inheritance, direct methods.
///
/// Classes are visited breadth-first, so top-level classes come before the
/// ones nested inside them.
pub fn render_class_diagram(outline: &Outline) -> ArchitectureDiagram {
    let mut lines = vec![DIAGRAM_HEADER.to_string()];
    let mut classes = Vec::new();

    let mut queue: VecDeque<&Definition> = outline.items.iter().collect();
    while let Some(def) = queue.pop_front() {
        match def {
            Definition::Class(class) => {
                emit_class(class, &mut lines);
                classes.push(class.name.clone());
                queue.extend(class.body.iter());
            }
            Definition::Function(f) => {
                if let Body::Source { nested } = &f.body {
                    queue.extend(nested.iter());
                }
            }
        }
    }

    ArchitectureDiagram {
        classes,
        text: lines.join("\n"),
    }
}

fn emit_class(class: &ClassDef, lines: &mut Vec<String>) {
    lines.push(format!("class {}", class.name));

    for base in &class.bases {
        if let BaseClass::Name(parent) = base {
            lines.push(format!("{} <|-- {}", parent, class.name));
        }
    }

    for method in class.methods() {
        lines.push(format!("{} : +{}()", class.name, method.name));
    }
}
