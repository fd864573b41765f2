// File: src/rules.rs
// Purpose: Built-in rule predicates

use crate::context::RuleContext;
use crate::error::{Result, ValidatorError};
use crate::value::Value;
use once_cell::sync::Lazy;
use regex::Regex;

/// Signature shared by every built-in predicate.
pub type BuiltinRule = fn(&Value, &[String], &mut RuleContext<'_>) -> Result<bool>;

/// The fixed built-in rule table.
pub static BUILTIN_RULES: &[(&str, BuiltinRule)] = &[
    ("required", required),
    ("string", string),
    ("number", number),
    ("numeric", numeric),
    ("alpha", alpha),
    ("email", email),
    ("min", min),
    ("equals", equals),
];

/// Look up a built-in predicate by its (case-sensitive) name
pub fn builtin(name: &str) -> Option<BuiltinRule> {
    BUILTIN_RULES
        .iter()
        .find(|(rule, _)| *rule == name)
        .map(|(_, predicate)| *predicate)
}

pub fn is_builtin(name: &str) -> bool {
    builtin(name).is_some()
}

// RFC 5322-lite: quoted or dotted local part, IPv4 literal or dotted domain with a 2+ letter TLD
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"^(([^<>()\[\]\\.,;:\s@"]+(\.[^<>()\[\]\\.,;:\s@"]+)*)|(".+"))@((\[[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\])|(([a-zA-Z\-0-9]+\.)+[a-zA-Z]{2,}))$"#,
    )
    .expect("EMAIL_REGEX: invalid regex pattern")
});

// Latin and Cyrillic letters, ё/Ё included (they sit outside the а-я range)
static ALPHA_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Zа-яА-ЯёЁ]*$").expect("ALPHA_REGEX: invalid regex pattern"));

/// Validate email format (case-insensitive)
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(&email.to_lowercase())
}

/// Only Latin or Cyrillic letters; the empty string passes
pub fn is_alpha(value: &str) -> bool {
    ALPHA_REGEX.is_match(value)
}

/// Leading integer of a string, the way a browser's `parseInt` reads it.
///
/// Leading whitespace and a sign are allowed, trailing garbage is ignored,
/// at least one digit is required.
pub fn parse_int_prefix(value: &str) -> Option<i64> {
    let trimmed = value.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }

    // Saturate instead of failing on very long digit runs; the value is still a number
    let magnitude = digits.parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

fn required(value: &Value, _args: &[String], _ctx: &mut RuleContext<'_>) -> Result<bool> {
    Ok(match value {
        Value::String(s) => !s.is_empty(),
        Value::List(items) => !items.is_empty(),
        Value::Record(map) => !map.is_empty(),
        Value::Number(_) | Value::Bool(_) => true,
        Value::Null => false,
    })
}

fn string(value: &Value, _args: &[String], _ctx: &mut RuleContext<'_>) -> Result<bool> {
    Ok(matches!(value, Value::String(_)))
}

fn number(value: &Value, _args: &[String], _ctx: &mut RuleContext<'_>) -> Result<bool> {
    Ok(matches!(value, Value::Number(_)))
}

fn numeric(value: &Value, _args: &[String], _ctx: &mut RuleContext<'_>) -> Result<bool> {
    Ok(match value {
        Value::Number(_) => true,
        Value::String(s) => parse_int_prefix(s).is_some(),
        _ => false,
    })
}

fn alpha(value: &Value, _args: &[String], _ctx: &mut RuleContext<'_>) -> Result<bool> {
    Ok(match value {
        Value::String(s) => is_alpha(s),
        _ => false,
    })
}

fn email(value: &Value, _args: &[String], _ctx: &mut RuleContext<'_>) -> Result<bool> {
    Ok(is_valid_email(&value.to_display_string()))
}

fn min(value: &Value, args: &[String], ctx: &mut RuleContext<'_>) -> Result<bool> {
    let bound = parse_bound("min", args)?;

    match value {
        Value::String(s) => Ok(s.chars().count() as f64 >= bound),
        Value::Number(n) => Ok(*n >= bound),
        other => {
            ctx.warn_unsupported(other);
            Ok(true)
        }
    }
}

fn equals(value: &Value, args: &[String], ctx: &mut RuleContext<'_>) -> Result<bool> {
    let other = args
        .first()
        .filter(|name| !name.is_empty())
        .ok_or_else(|| ValidatorError::missing_argument("equals", "the name of another field"))?;

    Ok(value == ctx.field_value(other))
}

/// Parse the numeric bound of `min`-style rules
pub(crate) fn parse_bound(rule: &str, args: &[String]) -> Result<f64> {
    let raw = args
        .first()
        .ok_or_else(|| ValidatorError::missing_argument(rule, "a numeric bound"))?;

    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|bound| !bound.is_nan())
        .ok_or_else(|| ValidatorError::invalid_argument(rule, raw, "expected a number"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Warning;
    use crate::value::{data, ValidationData};
    use rstest::rstest;
    use std::collections::BTreeMap;

    fn check(rule: &str, value: Value, args: &[&str]) -> Result<bool> {
        check_with(rule, value, args, &ValidationData::new()).map(|(ok, _)| ok)
    }

    fn check_with(
        rule: &str,
        value: Value,
        args: &[&str],
        record: &ValidationData,
    ) -> Result<(bool, Vec<Warning>)> {
        let predicate = builtin(rule).expect("builtin rule");
        let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
        let mut warnings = Vec::new();
        let ok = {
            let mut ctx = RuleContext::new(record, "field", rule, &mut warnings);
            predicate(&value, &args, &mut ctx)?
        };
        Ok((ok, warnings))
    }

    #[rstest]
    #[case(Value::from("x"), true)]
    #[case(Value::from(""), false)]
    #[case(Value::List(vec![Value::Null]), true)]
    #[case(Value::List(vec![]), false)]
    #[case(Value::Record(BTreeMap::from([("a".to_string(), Value::Null)])), true)]
    #[case(Value::Record(BTreeMap::new()), false)]
    #[case(Value::from(0), true)]
    #[case(Value::from(false), true)]
    #[case(Value::Null, false)]
    fn test_required(#[case] value: Value, #[case] expected: bool) {
        assert_eq!(check("required", value, &[]).unwrap(), expected);
    }

    #[test]
    fn test_type_tags() {
        assert!(check("string", Value::from("5"), &[]).unwrap());
        assert!(!check("string", Value::from(5), &[]).unwrap());
        assert!(check("number", Value::from(5), &[]).unwrap());
        assert!(!check("number", Value::from("5"), &[]).unwrap());
    }

    #[rstest]
    #[case(Value::from(3.5), true)]
    #[case(Value::from("42"), true)]
    #[case(Value::from("  -7"), true)]
    #[case(Value::from("12px"), true)]
    #[case(Value::from("px12"), false)]
    #[case(Value::from(""), false)]
    #[case(Value::from(true), false)]
    fn test_numeric(#[case] value: Value, #[case] expected: bool) {
        assert_eq!(check("numeric", value, &[]).unwrap(), expected);
    }

    #[rstest]
    #[case("John", true)]
    #[case("Иван", true)]
    #[case("Ёжик", true)]
    #[case("", true)]
    #[case("John1", false)]
    #[case("John Smith", false)]
    fn test_alpha(#[case] value: &str, #[case] expected: bool) {
        assert_eq!(is_alpha(value), expected);
    }

    #[test]
    fn test_valid_emails() {
        assert!(is_valid_email("john@example.com"));
        assert!(is_valid_email("John.Smith@Example.COM"));
        assert!(is_valid_email("user+tag@example.co.uk"));
        assert!(is_valid_email("\"odd name\"@example.com"));
        assert!(is_valid_email("user@[192.168.0.1]"));
    }

    #[test]
    fn test_invalid_emails() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("user@"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("user@example"));
        assert!(!is_valid_email("user@@example.com"));
        assert!(!is_valid_email("us er@example.com"));
    }

    #[rstest]
    #[case(Value::from("abcde"), false)]
    #[case(Value::from("abcdef"), true)]
    #[case(Value::from(5), false)]
    #[case(Value::from(6), true)]
    fn test_min_dual_semantics(#[case] value: Value, #[case] expected: bool) {
        assert_eq!(check("min", value, &["6"]).unwrap(), expected);
    }

    #[test]
    fn test_min_counts_characters_not_bytes() {
        assert!(check("min", Value::from("пароль"), &["6"]).unwrap());
    }

    #[test]
    fn test_min_unsupported_type_passes_with_warning() {
        let (ok, warnings) =
            check_with("min", Value::List(vec![]), &["6"], &ValidationData::new()).unwrap();
        assert!(ok);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].rule, "min");
    }

    #[test]
    fn test_min_argument_errors() {
        assert!(matches!(
            check("min", Value::from("abc"), &[]),
            Err(ValidatorError::MissingArgument { .. })
        ));
        assert!(matches!(
            check("min", Value::from("abc"), &["six"]),
            Err(ValidatorError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_equals_cross_field() {
        let record = data([("password", Value::from("a"))]);
        let (same, _) = check_with("equals", Value::from("a"), &["password"], &record).unwrap();
        let (different, _) = check_with("equals", Value::from("b"), &["password"], &record).unwrap();
        assert!(same);
        assert!(!different);
    }

    #[test]
    fn test_equals_is_strict() {
        let record = data([("count", Value::from(1))]);
        let (ok, _) = check_with("equals", Value::from("1"), &["count"], &record).unwrap();
        assert!(!ok);
    }

    #[test]
    fn test_equals_compares_lists_and_records_by_content() {
        let record = data([
            ("tags", Value::List(vec![Value::from("a"), Value::from(1)])),
            ("address", Value::Record(BTreeMap::from([("city".to_string(), Value::from("Омск"))]))),
        ]);

        let same_list = Value::List(vec![Value::from("a"), Value::from(1)]);
        let reordered = Value::List(vec![Value::from(1), Value::from("a")]);
        let same_record = Value::Record(BTreeMap::from([("city".to_string(), Value::from("Омск"))]));

        assert!(check_with("equals", same_list, &["tags"], &record).unwrap().0);
        assert!(!check_with("equals", reordered, &["tags"], &record).unwrap().0);
        assert!(check_with("equals", same_record, &["address"], &record).unwrap().0);
    }

    #[test]
    fn test_equals_requires_field_name() {
        assert!(matches!(
            check("equals", Value::from("a"), &[]),
            Err(ValidatorError::MissingArgument { .. })
        ));
    }

    #[test]
    fn test_parse_int_prefix() {
        assert_eq!(parse_int_prefix("42"), Some(42));
        assert_eq!(parse_int_prefix(" +3abc"), Some(3));
        assert_eq!(parse_int_prefix("-0"), Some(0));
        assert_eq!(parse_int_prefix("-"), None);
        assert_eq!(parse_int_prefix("abc"), None);
    }

    #[test]
    fn test_builtin_names_are_case_sensitive() {
        assert!(is_builtin("required"));
        assert!(!is_builtin("Required"));
    }
}
