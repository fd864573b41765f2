// File: src/messages.rs
// Purpose: Message templates per rule, display names for fields

use crate::value::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Closure form of a message: `(value, args, context) -> sentence`
pub type MessageFn = Arc<dyn Fn(&Value, &[String], &MessageContext<'_>) -> String + Send + Sync>;

/// Sentence used when a rule has no message anywhere (custom rule registered without one)
pub const FALLBACK_MESSAGE: &str = "Поле заполнено неверно";

/// How the message for one rule is produced.
#[derive(Clone)]
pub enum Message {
    /// Text with `{0}`, `{1}`… (rule arguments), `{value}`, `{field}` and `{other}`
    /// placeholders. `{field}` is the display name of the validated field, `{other}`
    /// the display name of the field named by the first argument.
    Template(String),
    Dynamic(MessageFn),
}

impl Message {
    pub fn template(text: impl Into<String>) -> Self {
        Message::Template(text.into())
    }

    pub fn dynamic<F>(f: F) -> Self
    where
        F: Fn(&Value, &[String], &MessageContext<'_>) -> String + Send + Sync + 'static,
    {
        Message::Dynamic(Arc::new(f))
    }

    pub fn render(&self, value: &Value, args: &[String], ctx: &MessageContext<'_>) -> String {
        match self {
            Message::Template(text) => interpolate(text, value, args, ctx),
            Message::Dynamic(f) => f(value, args, ctx),
        }
    }
}

impl fmt::Debug for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Message::Template(text) => f.debug_tuple("Template").field(text).finish(),
            Message::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}

impl From<&str> for Message {
    fn from(text: &str) -> Self {
        Message::template(text)
    }
}

impl From<String> for Message {
    fn from(text: String) -> Self {
        Message::Template(text)
    }
}

/// Display-name lookup for fields; unknown fields fall back to their raw name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldLabels {
    labels: BTreeMap<String, String>,
}

impl FieldLabels {
    pub fn new() -> Self {
        Self::default()
    }

    /// Labels for the fields the bundled screens use
    pub fn defaults() -> Self {
        let mut labels = Self::new();
        labels.insert("name", "Имя");
        labels.insert("email", "Email");
        labels.insert("password", "Пароль");
        labels.insert("password_confirmation", "Подтверждение пароля");
        labels
    }

    pub fn insert(&mut self, field: impl Into<String>, label: impl Into<String>) {
        self.labels.insert(field.into(), label.into());
    }

    pub fn get<'a>(&'a self, field: &'a str) -> &'a str {
        self.labels.get(field).map(String::as_str).unwrap_or(field)
    }

    pub fn extend<I, K, V>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (field, label) in entries {
            self.insert(field, label);
        }
    }
}

/// Extra information available while rendering a message.
#[derive(Debug, Clone, Copy)]
pub struct MessageContext<'a> {
    pub field: &'a str,
    pub labels: &'a FieldLabels,
}

impl<'a> MessageContext<'a> {
    pub fn new(field: &'a str, labels: &'a FieldLabels) -> Self {
        Self { field, labels }
    }

    /// Display name of any field
    pub fn label(&self, field: &'a str) -> &'a str {
        self.labels.get(field)
    }
}

/// Built-in messages plus an overlay that replaces them by name.
#[derive(Debug, Clone, Default)]
pub struct MessageTable {
    custom: BTreeMap<String, Message>,
}

impl MessageTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set (or replace) the message for a rule; built-ins can be overridden freely.
    pub fn set(&mut self, rule: impl Into<String>, message: impl Into<Message>) {
        self.custom.insert(rule.into(), message.into());
    }

    pub fn remove(&mut self, rule: &str) -> Option<Message> {
        self.custom.remove(rule)
    }

    pub fn has_custom(&self, rule: &str) -> bool {
        self.custom.contains_key(rule)
    }

    /// Render the message for `rule`: overlay first, then built-in, then the fallback.
    pub fn render(
        &self,
        rule: &str,
        value: &Value,
        args: &[String],
        ctx: &MessageContext<'_>,
    ) -> String {
        if let Some(message) = self.custom.get(rule) {
            return message.render(value, args, ctx);
        }

        builtin_message(rule, value, args, ctx).unwrap_or_else(|| FALLBACK_MESSAGE.to_string())
    }
}

fn builtin_message(
    rule: &str,
    value: &Value,
    args: &[String],
    ctx: &MessageContext<'_>,
) -> Option<String> {
    let arg = args.first().map(String::as_str).unwrap_or("");

    let message = match rule {
        "required" => "Поле должно быть заполнено".to_string(),
        "string" => "Поле должно содержать строку".to_string(),
        "email" => "Поле должно содержать адрес электронной почты".to_string(),
        "number" | "numeric" => "Поле должно содержать число".to_string(),
        "alpha" => "Поле должно содержать только буквы".to_string(),
        "min" => match value {
            Value::Number(_) => format!("Число должно быть не менее {}", arg),
            _ => format!("Строка должна быть не менее {} символов в длину", arg),
        },
        "equals" => format!("Значение должно совпадать с полем «{}»", ctx.label(arg)),
        _ => return None,
    };

    Some(message)
}

fn interpolate(template: &str, value: &Value, args: &[String], ctx: &MessageContext<'_>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];

        let Some(end) = after.find('}') else {
            out.push_str(&rest[start..]);
            return out;
        };

        let key = &after[..end];
        match resolve_placeholder(key, value, args, ctx) {
            Some(text) => out.push_str(&text),
            None => {
                out.push('{');
                out.push_str(key);
                out.push('}');
            }
        }
        rest = &after[end + 1..];
    }

    out.push_str(rest);
    out
}

fn resolve_placeholder(
    key: &str,
    value: &Value,
    args: &[String],
    ctx: &MessageContext<'_>,
) -> Option<String> {
    match key {
        "value" => Some(value.to_display_string()),
        "field" => Some(ctx.label(ctx.field).to_string()),
        "other" => args.first().map(|other| ctx.label(other).to_string()),
        index => index
            .parse::<usize>()
            .ok()
            .and_then(|i| args.get(i))
            .cloned(),
    }
}
