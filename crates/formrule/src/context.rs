// File: src/context.rs
// Purpose: Per-rule evaluation context and the non-fatal warning channel

use crate::value::{ValidationData, Value};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A non-fatal problem noticed while evaluating a rule.
///
/// Warnings never change a field's validity; they are collected in the
/// [`ValidationReport`](crate::ValidationReport) and logged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warning {
    pub field: String,
    pub rule: String,
    pub kind: WarningKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WarningKind {
    /// The rule has no meaning for this value type and was treated as passing
    UnsupportedType { type_name: String },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            WarningKind::UnsupportedType { type_name } => write!(
                f,
                "The \"{}\" rule on field \"{}\" does not support {} values",
                self.rule, self.field, type_name
            ),
        }
    }
}

/// What a predicate can see besides its own value and arguments.
pub struct RuleContext<'a> {
    data: &'a ValidationData,
    field: &'a str,
    rule: &'a str,
    warnings: &'a mut Vec<Warning>,
}

impl<'a> RuleContext<'a> {
    pub(crate) fn new(
        data: &'a ValidationData,
        field: &'a str,
        rule: &'a str,
        warnings: &'a mut Vec<Warning>,
    ) -> Self {
        Self {
            data,
            field,
            rule,
            warnings,
        }
    }

    /// The whole record being validated (for cross-field rules)
    pub fn data(&self) -> &ValidationData {
        self.data
    }

    /// Current value of another field; absent fields read as `Null`.
    pub fn field_value(&self, name: &str) -> &Value {
        static NULL: Value = Value::Null;
        self.data.get(name).unwrap_or(&NULL)
    }

    /// Name of the field being validated
    pub fn field(&self) -> &str {
        self.field
    }

    pub fn rule(&self) -> &str {
        self.rule
    }

    /// Report that the rule does not apply to `value`'s type.
    pub fn warn_unsupported(&mut self, value: &Value) {
        let type_name = value.type_name();
        tracing::warn!(
            field = self.field,
            rule = self.rule,
            value_type = type_name,
            "rule does not support this value type, treating as passed"
        );
        self.warnings.push(Warning {
            field: self.field.to_string(),
            rule: self.rule.to_string(),
            kind: WarningKind::UnsupportedType {
                type_name: type_name.to_string(),
            },
        });
    }
}
