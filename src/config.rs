// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0

use directories::ProjectDirs;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::cli::Cli;
use crate::domain::{AuthorIdentity, Persona};
use crate::error::{Error, Result};
use crate::services::sanitizer;

/// Code sanitizer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SanitizerConfig {
    /// Proprietary names replaced with placeholders
    #[serde(default)]
    pub forbidden_terms: Vec<String>,

    /// Placeholder stem, numbered in first-seen order (default: GenericEntity)
    #[serde(default = "default_placeholder_prefix")]
    pub placeholder_prefix: String,

    /// String statement placed in every stubbed function body
    #[serde(default = "default_hidden_notice")]
    pub hidden_notice: String,

    /// Callable receiving the "Executing <name> logic..." audit message
    #[serde(default = "default_audit_call")]
    pub audit_call: String,
}

impl Default for SanitizerConfig {
    fn default() -> Self {
        Self {
            forbidden_terms: Vec::new(),
            placeholder_prefix: default_placeholder_prefix(),
            hidden_notice: default_hidden_notice(),
            audit_call: default_audit_call(),
        }
    }
}

fn default_placeholder_prefix() -> String {
    "GenericEntity".into()
}
fn default_hidden_notice() -> String {
    "Implementation hidden for NDA compliance.".into()
}
fn default_audit_call() -> String {
    "logger.info".into()
}
fn default_repo_path() -> PathBuf {
    PathBuf::from(".")
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Repository the scheduler commits into
    #[serde(default = "default_repo_path")]
    pub repo_path: PathBuf,

    #[serde(default)]
    pub persona: Persona,

    /// Fixed RNG seed for reproducible timestamps
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    #[serde(default)]
    pub author: AuthorIdentity,

    #[serde(default)]
    pub sanitizer: SanitizerConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            repo_path: default_repo_path(),
            persona: Persona::default(),
            seed: None,
            author: AuthorIdentity::default(),
            sanitizer: SanitizerConfig::default(),
        }
    }
}

impl Config {
    /// Load with priority: CLI > ENV > user config > project config > defaults
    pub fn load(cli: &Cli) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        // Project-level config (.ghostline.toml in the working directory)
        if let Ok(cwd) = std::env::current_dir() {
            let project_config = cwd.join(".ghostline.toml");
            if project_config.exists() {
                figment = figment.merge(Toml::file(&project_config));
            }
        }

        // User-level config
        if let Some(path) = Self::config_path() {
            if path.exists() {
                figment = figment.merge(Toml::file(&path));
            }
        }

        // Environment variables (GHOSTLINE_PERSONA, GHOSTLINE_SEED, etc.)
        // Use __ separator for nested keys (e.g., GHOSTLINE_AUTHOR__NAME)
        figment = figment.merge(Env::prefixed("GHOSTLINE_").split("__"));

        // A bad persona is reported as InvalidPersona, not as a config error
        if let Ok(raw) = figment.extract_inner::<String>("persona") {
            raw.parse::<Persona>()?;
        }

        let mut config: Config = figment
            .extract()
            .map_err(|e| Error::Config(e.to_string()))?;

        config.apply_cli(cli);
        config.validate()?;
        Ok(config)
    }

    pub fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("", "", "ghostline").map(|dirs| dirs.config_dir().to_path_buf())
    }

    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|d| d.join("config.toml"))
    }

    fn apply_cli(&mut self, cli: &Cli) {
        if let Some(ref repo) = cli.repo {
            self.repo_path = repo.clone();
        }
        if let Some(seed) = cli.seed {
            self.seed = Some(seed);
        }
        if let Some(ref name) = cli.author_name {
            self.author.name = name.clone();
        }
        if let Some(ref email) = cli.author_email {
            self.author.email = email.clone();
        }
        for term in &cli.terms {
            if !self.sanitizer.forbidden_terms.contains(term) {
                self.sanitizer.forbidden_terms.push(term.clone());
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.author.name.trim().is_empty() {
            return Err(Error::Config("author.name cannot be empty".into()));
        }

        if !self.author.email.contains('@') {
            return Err(Error::Config(format!(
                "author.email must contain '@', got '{}'",
                self.author.email
            )));
        }

        sanitizer::check_names(&self.sanitizer)?;

        if self.sanitizer.hidden_notice.trim().is_empty() {
            return Err(Error::Config(
                "sanitizer.hidden_notice cannot be empty".into(),
            ));
        }

        Ok(())
    }

    /// Create default config file with secure permissions
    pub fn create_default() -> Result<PathBuf> {
        let Some(dir) = Self::config_dir() else {
            return Err(Error::Config("Cannot determine config directory".into()));
        };

        fs::create_dir_all(&dir)?;

        let path = dir.join("config.toml");
        let content = r#"# ghostline configuration

# Repository the scheduler commits into
repo_path = "."

# Default persona: standard, weekend_warrior, night_owl
persona = "standard"

# Fixed RNG seed for reproducible timestamps
# seed = 42

[author]
name = "GhostWriter"
email = "ghost@ghostline.dev"

[sanitizer]
# Proprietary names replaced with GenericEntity1, GenericEntity2, ...
forbidden_terms = []

# Placeholder stem
placeholder_prefix = "GenericEntity"

# Statement placed in every stubbed function body
hidden_notice = "Implementation hidden for NDA compliance."

# Callable that receives the audit message in stubbed bodies
audit_call = "logger.info"
"#;

        fs::write(&path, content)?;

        // Set secure permissions (0600)
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(&path)?.permissions();
            perms.set_mode(0o600);
            fs::set_permissions(&path, perms)?;
        }

        Ok(path)
    }
}
