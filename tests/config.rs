// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0

use std::path::PathBuf;

use ghostline::config::{Config, SanitizerConfig};
use ghostline::domain::Persona;
use ghostline::error::Error;

// ─── Default values ──────────────────────────────────────────────────────────

#[test]
fn default_config_values() {
    let config = Config::default();
    assert_eq!(config.repo_path, PathBuf::from("."));
    assert_eq!(config.persona, Persona::Standard);
    assert!(config.seed.is_none());
    assert_eq!(config.author.name, "GhostWriter");
    assert_eq!(config.author.email, "ghost@ghostline.dev");
    assert!(config.sanitizer.forbidden_terms.is_empty());
    assert_eq!(config.sanitizer.placeholder_prefix, "GenericEntity");
    assert_eq!(
        config.sanitizer.hidden_notice,
        "Implementation hidden for NDA compliance."
    );
    assert_eq!(config.sanitizer.audit_call, "logger.info");
    assert!(config.validate().is_ok());
}

// ─── TOML deserialization ────────────────────────────────────────────────────

#[test]
fn load_from_valid_toml() {
    let toml_str = r#"
repo_path = "/srv/repo"
persona = "night_owl"
seed = 7

[author]
name = "Night Dev"
email = "night@example.com"

[sanitizer]
forbidden_terms = ["Acme", "Globex"]
placeholder_prefix = "Entity"
"#;
    let config: Config = toml::from_str(toml_str).unwrap();
    assert_eq!(config.repo_path, PathBuf::from("/srv/repo"));
    assert_eq!(config.persona, Persona::NightOwl);
    assert_eq!(config.seed, Some(7));
    assert_eq!(config.author.name, "Night Dev");
    assert_eq!(config.sanitizer.forbidden_terms, vec!["Acme", "Globex"]);
    assert_eq!(config.sanitizer.placeholder_prefix, "Entity");
    // Unset sanitizer keys keep their defaults
    assert_eq!(config.sanitizer.audit_call, "logger.info");
}

#[test]
fn empty_toml_uses_all_defaults() {
    let config: Config = toml::from_str("").unwrap();
    let default = Config::default();
    assert_eq!(config.persona, default.persona);
    assert_eq!(config.author, default.author);
    assert_eq!(
        config.sanitizer.placeholder_prefix,
        default.sanitizer.placeholder_prefix
    );
}

#[test]
fn unknown_persona_in_toml_is_rejected() {
    let result: std::result::Result<Config, _> = toml::from_str(r#"persona = "early_bird""#);
    assert!(result.is_err());
}

#[test]
fn persona_in_toml_parses_loosely() {
    let config: Config = toml::from_str(r#"persona = "Night-Owl""#).unwrap();
    assert_eq!(config.persona, Persona::NightOwl);
}

#[test]
fn invalid_toml_returns_error() {
    let result: std::result::Result<Config, _> = toml::from_str("persona = [invalid");
    assert!(result.is_err(), "invalid TOML should return an error");
}

#[test]
fn default_config_round_trips_through_toml() {
    let text = toml::to_string_pretty(&Config::default()).unwrap();
    assert!(!text.contains("seed"));
    let back: Config = toml::from_str(&text).unwrap();
    assert_eq!(back.persona, Persona::Standard);
}

// ─── Persona parsing ─────────────────────────────────────────────────────────

#[test]
fn persona_parses_loosely() {
    assert_eq!("weekend_warrior".parse::<Persona>().unwrap(), Persona::WeekendWarrior);
    assert_eq!("Night-Owl".parse::<Persona>().unwrap(), Persona::NightOwl);
    assert_eq!("STANDARD".parse::<Persona>().unwrap(), Persona::Standard);
    assert!(matches!(
        "early_bird".parse::<Persona>(),
        Err(Error::InvalidPersona(_))
    ));
}

#[test]
fn persona_display_format() {
    assert_eq!(format!("{}", Persona::WeekendWarrior), "weekend_warrior");
    assert_eq!(format!("{}", Persona::NightOwl), "night_owl");
    assert_eq!(format!("{}", Persona::Standard), "standard");
}

// ─── Validation ──────────────────────────────────────────────────────────────

#[test]
fn email_without_at_is_rejected() {
    let mut config = Config::default();
    config.author.email = "nobody".into();
    assert!(matches!(config.validate(), Err(Error::Config(_))));
}

#[test]
fn blank_author_name_is_rejected() {
    let mut config = Config::default();
    config.author.name = "  ".into();
    assert!(matches!(config.validate(), Err(Error::Config(_))));
}

#[test]
fn empty_notice_is_rejected() {
    let config = Config {
        sanitizer: SanitizerConfig {
            hidden_notice: String::new(),
            ..SanitizerConfig::default()
        },
        ..Config::default()
    };
    assert!(matches!(config.validate(), Err(Error::Config(_))));
}

#[test]
fn prefix_and_audit_call_must_be_python_names() {
    let mut config = Config::default();
    config.sanitizer.placeholder_prefix = "Generic-Entity".into();
    assert!(matches!(config.validate(), Err(Error::Config(_))));

    let mut config = Config::default();
    config.sanitizer.audit_call = "print(".into();
    assert!(matches!(config.validate(), Err(Error::Config(_))));

    let mut config = Config::default();
    config.sanitizer.audit_call = "app.log.debug".into();
    assert!(config.validate().is_ok());
}
