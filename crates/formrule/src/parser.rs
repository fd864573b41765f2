// File: src/parser.rs
// Purpose: Rule expression parser ("required|string|min:6" -> ordered RuleSpecs)
//
// Grammar:
//   expr   := clause ('|' clause)*
//   clause := name (':' arg (',' arg)*)?
//
// There is no escaping: '|', ':' and ',' can never appear inside a name or argument.

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// One parsed clause of a rule expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RuleSpec {
    pub name: String,
    pub args: Vec<String>,
}

impl RuleSpec {
    pub fn new(name: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }

    /// First argument, if any
    pub fn arg(&self) -> Option<&str> {
        self.args.first().map(String::as_str)
    }
}

impl fmt::Display for RuleSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if !self.args.is_empty() {
            write!(f, ":{}", self.args.join(","))?;
        }
        Ok(())
    }
}

/// Rules for one field, in evaluation (textual) order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldRules(Vec<RuleSpec>);

impl FieldRules {
    pub fn iter(&self) -> std::slice::Iter<'_, RuleSpec> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[RuleSpec] {
        &self.0
    }
}

impl<'a> IntoIterator for &'a FieldRules {
    type Item = &'a RuleSpec;
    type IntoIter = std::slice::Iter<'a, RuleSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl From<Vec<RuleSpec>> for FieldRules {
    fn from(specs: Vec<RuleSpec>) -> Self {
        FieldRules(specs)
    }
}

impl FromStr for FieldRules {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(parse(s))
    }
}

impl fmt::Display for FieldRules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let clauses: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        f.write_str(&clauses.join("|"))
    }
}

/// Parse a rule expression.
///
/// Parsing never fails and never checks whether rule names exist; unknown or empty
/// names are reported when the rules are evaluated.
///
/// ```
/// use formrule::parse;
///
/// let rules = parse("required|string|min:6");
/// let names: Vec<_> = rules.iter().map(|r| r.name.as_str()).collect();
/// assert_eq!(names, ["required", "string", "min"]);
/// assert_eq!(rules.as_slice()[2].args, ["6"]);
/// ```
pub fn parse(expression: &str) -> FieldRules {
    if expression.is_empty() {
        return FieldRules::default();
    }

    expression.split('|').map(parse_clause).collect::<Vec<_>>().into()
}

fn parse_clause(clause: &str) -> RuleSpec {
    match clause.split_once(':') {
        Some((name, arg_string)) => RuleSpec {
            name: name.to_string(),
            args: arg_string.split(',').map(str::to_string).collect(),
        },
        None => RuleSpec {
            name: clause.to_string(),
            args: Vec::new(),
        },
    }
}
