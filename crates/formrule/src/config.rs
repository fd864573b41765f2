// File: src/config.rs
// Purpose: Configuration parsing from formrule.toml

use crate::engine::{RulesByField, Validator};
use crate::messages::Message;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "formrule.toml";

/// Validator configuration
///
/// ```toml
/// [messages]
/// min = "Слишком коротко: минимум {0}"
///
/// [labels]
/// password = "Пароль"
///
/// [forms.registration]
/// name = "required|alpha"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorConfig {
    /// Rule name -> message template, replaces the built-in message
    #[serde(default)]
    pub messages: BTreeMap<String, String>,

    /// Field name -> display name, merged over the default labels
    #[serde(default)]
    pub labels: BTreeMap<String, String>,

    /// Form name -> rules by field, overriding a form's own rules
    #[serde(default)]
    pub forms: BTreeMap<String, RulesByField>,
}

impl ValidatorConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // Missing file means defaults
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Load configuration from default path (./formrule.toml)
    pub fn load_default() -> Result<Self> {
        Self::load(DEFAULT_CONFIG_FILE)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: ValidatorConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// Rule overrides configured for a form, if any
    pub fn form_rules(&self, form: &str) -> Option<&RulesByField> {
        self.forms.get(form)
    }

    /// Build a validator with this configuration's messages and labels applied.
    ///
    /// Configured form rules are checked against the registry so a typo in the file
    /// fails here rather than on the first submit.
    pub fn build_validator(&self) -> Result<Validator> {
        let mut validator = Validator::new();

        for (rule, template) in &self.messages {
            validator
                .registry_mut()
                .messages_mut()
                .set(rule.clone(), Message::template(template.clone()));
        }
        validator.labels_mut().extend(self.labels.clone());

        for (form, rules_by_field) in &self.forms {
            validator
                .check_rules(rules_by_field)
                .with_context(|| format!("Invalid rules for form \"{}\"", form))?;
        }

        Ok(validator)
    }
}

impl Validator {
    /// Shorthand for [`ValidatorConfig::build_validator`]
    pub fn from_config(config: &ValidatorConfig) -> Result<Self> {
        config.build_validator()
    }
}
