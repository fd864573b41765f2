// File: src/registry.rs
// Purpose: Rule registry - fixed built-ins plus a custom overlay, and the message table

use crate::context::RuleContext;
use crate::error::{Result, ValidatorError};
use crate::messages::{Message, MessageTable};
use crate::rules::{self, BuiltinRule};
use crate::value::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Stored form of a custom predicate
pub type Predicate = Arc<dyn Fn(&Value, &[String], &mut RuleContext<'_>) -> Result<bool> + Send + Sync>;

/// A resolved rule, ready to call.
#[derive(Clone)]
pub enum Rule {
    Builtin(BuiltinRule),
    Custom(Predicate),
}

impl Rule {
    pub fn check(&self, value: &Value, args: &[String], ctx: &mut RuleContext<'_>) -> Result<bool> {
        match self {
            Rule::Builtin(predicate) => predicate(value, args, ctx),
            Rule::Custom(predicate) => predicate(value, args, ctx),
        }
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Builtin(_) => f.write_str("Rule::Builtin"),
            Rule::Custom(_) => f.write_str("Rule::Custom"),
        }
    }
}

/// Maps rule names to predicates and messages.
///
/// Built-in rules are fixed. Custom rules live in an overlay that may not reuse a
/// built-in name; registering the same custom name twice replaces the earlier rule.
#[derive(Clone, Default)]
pub struct RuleRegistry {
    custom: BTreeMap<String, Predicate>,
    messages: MessageTable,
}

impl RuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a custom rule with an infallible predicate.
    ///
    /// ```
    /// use formrule::{Message, RuleRegistry};
    ///
    /// let mut registry = RuleRegistry::new();
    /// registry
    ///     .register(
    ///         "strongPassword",
    ///         |value, _args, _ctx| value.as_str().is_some_and(|s| s.chars().any(|c| c.is_ascii_digit())),
    ///         Some(Message::template("Пароль должен содержать цифру")),
    ///     )
    ///     .unwrap();
    ///
    /// assert!(registry.lookup("strongPassword").is_some());
    /// assert!(registry.register("required", |_, _, _| true, None).is_err());
    /// ```
    pub fn register<F>(&mut self, name: impl Into<String>, predicate: F, message: Option<Message>) -> Result<()>
    where
        F: Fn(&Value, &[String], &mut RuleContext<'_>) -> bool + Send + Sync + 'static,
    {
        self.register_fallible(name, move |value, args, ctx| Ok(predicate(value, args, ctx)), message)
    }

    /// Register a custom rule whose predicate can report configuration errors
    /// (for instance a malformed argument).
    pub fn register_fallible<F>(
        &mut self,
        name: impl Into<String>,
        predicate: F,
        message: Option<Message>,
    ) -> Result<()>
    where
        F: Fn(&Value, &[String], &mut RuleContext<'_>) -> Result<bool> + Send + Sync + 'static,
    {
        let name = name.into();
        if rules::is_builtin(&name) {
            return Err(ValidatorError::DuplicateRule { name });
        }

        if self.custom.contains_key(&name) {
            tracing::debug!(rule = %name, "replacing previously registered custom rule");
        }

        if let Some(message) = message {
            self.messages.set(name.clone(), message);
        }
        self.custom.insert(name, Arc::new(predicate));
        Ok(())
    }

    /// Resolve a rule by name; the custom overlay is consulted first.
    pub fn lookup(&self, name: &str) -> Option<Rule> {
        self.custom
            .get(name)
            .cloned()
            .map(Rule::Custom)
            .or_else(|| rules::builtin(name).map(Rule::Builtin))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.custom.contains_key(name) || rules::is_builtin(name)
    }

    /// Names of all known rules: built-ins first, then custom rules in name order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        rules::BUILTIN_RULES
            .iter()
            .map(|(name, _)| *name)
            .chain(self.custom.keys().map(String::as_str))
    }

    pub fn messages(&self) -> &MessageTable {
        &self.messages
    }

    pub fn messages_mut(&mut self) -> &mut MessageTable {
        &mut self.messages
    }
}

impl fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleRegistry")
            .field("custom", &self.custom.keys().collect::<Vec<_>>())
            .field("messages", &self.messages)
            .finish()
    }
}
