// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: GPL-3.0-only

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};

use crate::config::SanitizerConfig;
use crate::domain::{
    ArchitectureDiagram, RedactedSource, SafetyReport, SanitizedBundle, ShadowSource,
};
use crate::error::{Error, Result};
use crate::services::analyzer::AnalyzerService;
use crate::services::debrand::TermReplacer;
use crate::services::diagram::render_class_diagram;
use crate::services::safety::redact_secrets;
use crate::services::shadow::{StubTemplate, shadow_outline};

/// Stub out every function body in `source`.
///
/// Stateless apart from the parser, so batch callers can run it on a
/// per-thread [`AnalyzerService`].
pub fn shadow_structure(
    analyzer: &mut AnalyzerService,
    source: &str,
    template: &StubTemplate,
) -> Result<ShadowSource> {
    let outline = analyzer.outline(source)?;
    let shadow = shadow_outline(&outline, template);
    let functions = shadow.signatures();

    debug!(functions = functions.len(), "shadow generated");

    Ok(ShadowSource {
        text: shadow.render(source),
        functions,
    })
}

pub fn class_diagram(analyzer: &mut AnalyzerService, source: &str) -> Result<ArchitectureDiagram> {
    let outline = analyzer.outline(source)?;
    Ok(render_class_diagram(&outline))
}

pub const SHADOW_PARSE_ERROR: &str = "# Error: Could not parse code structure.";
pub const DIAGRAM_PARSE_ERROR: &str = "graph TD;\nError[Parse Error]";

static IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());

static DOTTED_IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)*$").unwrap()
});

/// Makes Python source safe to publish.
///
/// One instance memoizes the term → placeholder map, so every document fed
/// through it shares the same `GenericEntity<N>` numbering. Use a fresh
/// instance per unrelated batch. Counts are never kept on the instance; each
/// call reports its own.
pub struct CodeSanitizer {
    analyzer: AnalyzerService,
    replacer: TermReplacer,
    template: StubTemplate,
}

/// Placeholders and the audit call end up in Python source, so both must be
/// valid names there.
pub fn check_names(config: &SanitizerConfig) -> Result<()> {
    if !IDENTIFIER.is_match(&config.placeholder_prefix) {
        return Err(Error::Config(format!(
            "placeholder_prefix must be a Python identifier, got '{}'",
            config.placeholder_prefix
        )));
    }
    if !DOTTED_IDENTIFIER.is_match(&config.audit_call) {
        return Err(Error::Config(format!(
            "audit_call must be a dotted name like logger.info, got '{}'",
            config.audit_call
        )));
    }
    Ok(())
}

impl CodeSanitizer {
    pub fn new(config: &SanitizerConfig) -> Result<Self> {
        check_names(config)?;

        Ok(Self {
            analyzer: AnalyzerService::new()?,
            replacer: TermReplacer::new(&config.forbidden_terms, &config.placeholder_prefix)?,
            template: StubTemplate {
                hidden_notice: config.hidden_notice.clone(),
                audit_call: config.audit_call.clone(),
            },
        })
    }

    /// Shorthand for a default config with the given forbidden terms.
    pub fn with_terms<S: AsRef<str>>(terms: &[S]) -> Result<Self> {
        let config = SanitizerConfig {
            forbidden_terms: terms.iter().map(|t| t.as_ref().to_string()).collect(),
            ..SanitizerConfig::default()
        };
        Self::new(&config)
    }

    /// Redact secrets, then swap forbidden terms for placeholders.
    ///
    /// Secrets go first so a forbidden term inside a token cannot keep part
    /// of that token alive.
    pub fn debrand(&mut self, source: &str) -> RedactedSource {
        let redaction = redact_secrets(source);
        let replacement = self.replacer.replace(&redaction.text);

        debug!(
            secrets = redaction.total,
            terms = replacement.count,
            "debranded source"
        );

        RedactedSource {
            text: replacement.text,
            secrets_removed: redaction.total,
            terms_renamed: replacement.count,
            secret_kinds: redaction.by_kind,
        }
    }

    pub fn generate_shadow_structure(&mut self, source: &str) -> Result<ShadowSource> {
        shadow_structure(&mut self.analyzer, source, &self.template)
    }

    pub fn code_to_diagram(&mut self, source: &str) -> Result<ArchitectureDiagram> {
        class_diagram(&mut self.analyzer, source)
    }

    /// Like [`generate_shadow_structure`](Self::generate_shadow_structure) but
    /// degrades to a marker comment instead of failing.
    pub fn shadow_or_marker(&mut self, source: &str) -> String {
        match self.generate_shadow_structure(source) {
            Ok(shadow) => shadow.text,
            Err(e) => {
                warn!(error = %e, "shadow generation skipped");
                SHADOW_PARSE_ERROR.to_string()
            }
        }
    }

    pub fn diagram_or_marker(&mut self, source: &str) -> String {
        match self.code_to_diagram(source) {
            Ok(diagram) => diagram.text,
            Err(e) => {
                warn!(error = %e, "diagram generation skipped");
                DIAGRAM_PARSE_ERROR.to_string()
            }
        }
    }

    pub fn safety_report(original: &str, redacted: &RedactedSource) -> SafetyReport {
        SafetyReport::new(original, redacted)
    }

    /// Debrand, then derive shadow and diagram from the redacted text so
    /// neither can leak what debranding removed.
    pub fn sanitize(&mut self, source: &str) -> SanitizedBundle {
        let redacted = self.debrand(source);
        let shadow = self.shadow_or_marker(&redacted.text);
        let diagram = self.diagram_or_marker(&redacted.text);
        let report = Self::safety_report(source, &redacted);

        SanitizedBundle {
            redacted,
            shadow,
            diagram,
            report,
        }
    }

    /// Placeholders handed out so far, in assignment order.
    pub fn placeholders(&self) -> Vec<(&str, &str)> {
        self.replacer.assignments()
    }

    pub fn template(&self) -> &StubTemplate {
        &self.template
    }
}
