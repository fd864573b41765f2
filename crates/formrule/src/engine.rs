// File: src/engine.rs
// Purpose: Validation engine - evaluates per-field rule expressions against a data record

use crate::context::{RuleContext, Warning};
use crate::error::{Result, ValidatorError};
use crate::messages::{FieldLabels, Message, MessageContext};
use crate::parser::{parse, FieldRules};
use crate::registry::{Rule, RuleRegistry};
use crate::value::{ValidationData, Value};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Field name -> rule expression, e.g. `{"email": "required|email"}`
pub type RulesByField = BTreeMap<String, String>;

/// Fields that are currently invalid; a field without an entry is valid.
pub type FieldErrorMap = BTreeMap<String, FieldError>;

/// The first rule a field failed and its rendered message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub rule: String,
    pub message: String,
}

/// Outcome of one validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub errors: FieldErrorMap,
    pub warnings: Vec<Warning>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Error for a specific field, if it is invalid
    pub fn error(&self, field: &str) -> Option<&FieldError> {
        self.errors.get(field)
    }

    /// All messages joined with `". "`, in field order
    pub fn summary(&self) -> String {
        summarize(&self.errors)
    }

    pub fn into_errors(self) -> FieldErrorMap {
        self.errors
    }
}

/// Join every message of an error map with `". "`
pub fn summarize(errors: &FieldErrorMap) -> String {
    errors
        .values()
        .map(|error| error.message.as_str())
        .collect::<Vec<_>>()
        .join(". ")
}

/// Build a [`RulesByField`] map from `(field, expression)` pairs.
pub fn rules<K, V, I>(entries: I) -> RulesByField
where
    K: Into<String>,
    V: Into<String>,
    I: IntoIterator<Item = (K, V)>,
{
    entries.into_iter().map(|(k, v)| (k.into(), v.into())).collect()
}

/// The validation engine.
///
/// Holds the rule registry (with its message table) and field display names.
/// Validation never mutates the engine or the data, so repeated calls with the same
/// input produce the same report.
///
/// # Example
///
/// ```
/// use formrule::{data, rules, Validator, Value};
///
/// let validator = Validator::new();
/// let report = validator
///     .validate(
///         &data([("email", Value::from("not-an-email"))]),
///         &rules([("email", "required|email")]),
///     )
///     .unwrap();
///
/// assert!(!report.is_valid());
/// assert_eq!(report.error("email").unwrap().rule, "email");
/// ```
#[derive(Debug, Clone)]
pub struct Validator {
    registry: RuleRegistry,
    labels: FieldLabels,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator {
    /// Engine with built-in rules, built-in messages and the default display names
    pub fn new() -> Self {
        Self {
            registry: RuleRegistry::new(),
            labels: FieldLabels::defaults(),
        }
    }

    pub fn with_registry(registry: RuleRegistry) -> Self {
        Self {
            registry,
            labels: FieldLabels::defaults(),
        }
    }

    /// Override the message of a rule (built-in or custom)
    pub fn with_message(mut self, rule: impl Into<String>, message: impl Into<Message>) -> Self {
        self.registry.messages_mut().set(rule, message);
        self
    }

    /// Set the display name of a field
    pub fn with_label(mut self, field: impl Into<String>, label: impl Into<String>) -> Self {
        self.labels.insert(field, label);
        self
    }

    /// Register a custom rule; fails with [`ValidatorError::DuplicateRule`] for built-in names.
    pub fn register_rule<F>(
        &mut self,
        name: impl Into<String>,
        predicate: F,
        message: Option<Message>,
    ) -> Result<()>
    where
        F: Fn(&Value, &[String], &mut RuleContext<'_>) -> bool + Send + Sync + 'static,
    {
        self.registry.register(name, predicate, message)
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut RuleRegistry {
        &mut self.registry
    }

    pub fn labels(&self) -> &FieldLabels {
        &self.labels
    }

    pub fn labels_mut(&mut self) -> &mut FieldLabels {
        &mut self.labels
    }

    /// Validate every field of `data` that has a rule expression.
    ///
    /// Fields without an expression are skipped, as are expressions for fields absent
    /// from `data`. Within a field, rules run left to right and stop at the first
    /// failure. A configuration error aborts the whole pass.
    pub fn validate(&self, data: &ValidationData, rules_by_field: &RulesByField) -> Result<ValidationReport> {
        let _span = tracing::debug_span!("validate", fields = data.len()).entered();

        let mut report = ValidationReport::default();

        for (field, value) in data {
            let Some(expression) = rules_by_field.get(field) else {
                continue;
            };

            let field_rules = parse(expression);
            if let Some(error) =
                self.evaluate(data, field, value, expression, &field_rules, &mut report.warnings)?
            {
                tracing::trace!(field = %field, rule = %error.rule, "field failed validation");
                report.errors.insert(field.clone(), error);
            }
        }

        tracing::debug!(
            invalid = report.errors.len(),
            warnings = report.warnings.len(),
            "validation pass complete"
        );

        Ok(report)
    }

    /// Validate a single value against its own expression.
    ///
    /// The value is wrapped in a one-entry record, so cross-field rules only see
    /// this field. The report holds at most one error, plus any warnings.
    pub fn validate_field(&self, field: &str, value: &Value, expression: &str) -> Result<ValidationReport> {
        let mut data = ValidationData::new();
        data.insert(field.to_string(), value.clone());

        let mut rules_by_field = RulesByField::new();
        rules_by_field.insert(field.to_string(), expression.to_string());

        self.validate(&data, &rules_by_field)
    }

    /// Parse every expression and resolve every rule name without evaluating anything.
    ///
    /// Meant to run once at start-up so wiring mistakes surface before the first
    /// user interaction.
    pub fn check_rules(&self, rules_by_field: &RulesByField) -> Result<()> {
        for (field, expression) in rules_by_field {
            for spec in &parse(expression) {
                self.resolve(field, expression, &spec.name)?;
            }
        }
        Ok(())
    }

    fn evaluate(
        &self,
        data: &ValidationData,
        field: &str,
        value: &Value,
        expression: &str,
        field_rules: &FieldRules,
        warnings: &mut Vec<Warning>,
    ) -> Result<Option<FieldError>> {
        for spec in field_rules {
            let rule = self.resolve(field, expression, &spec.name)?;

            let passed = {
                let mut ctx = RuleContext::new(data, field, &spec.name, warnings);
                rule.check(value, &spec.args, &mut ctx)?
            };

            if !passed {
                let ctx = MessageContext::new(field, &self.labels);
                let message = self.registry.messages().render(&spec.name, value, &spec.args, &ctx);
                return Ok(Some(FieldError {
                    rule: spec.name.clone(),
                    message,
                }));
            }
        }

        Ok(None)
    }

    fn resolve(&self, field: &str, expression: &str, name: &str) -> Result<Rule> {
        if name.is_empty() {
            return Err(ValidatorError::EmptyRuleName {
                expression: expression.to_string(),
            });
        }

        self.registry.lookup(name).ok_or_else(|| ValidatorError::UnknownRule {
            field: field.to_string(),
            rule: name.to_string(),
        })
    }
}
