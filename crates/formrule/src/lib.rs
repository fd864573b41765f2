//! formrule - rule-string form validation
//!
//! Validates a record of named field values against per-field rule expressions such
//! as `"required|string|min:6"`. Each field reports at most one error: the first
//! rule (left to right) that failed, with a rendered message.
//!
//! ```
//! use formrule::{data, rules, Validator, Value};
//!
//! let validator = Validator::new();
//! let report = validator
//!     .validate(
//!         &data([
//!             ("name", Value::from("John1")),
//!             ("email", Value::from("not-an-email")),
//!             ("password", Value::from("abc")),
//!         ]),
//!         &rules([
//!             ("name", "required|alpha"),
//!             ("email", "required|email"),
//!             ("password", "required|string|min:6"),
//!         ]),
//!     )
//!     .unwrap();
//!
//! assert!(!report.is_valid());
//! assert_eq!(report.error("password").unwrap().rule, "min");
//! ```
//!
//! Wiring mistakes (unknown rule names, registering over a built-in, bad rule
//! arguments) come back as [`ValidatorError`], never as field errors.

pub mod config;
pub mod context;
pub mod engine;
pub mod error;
pub mod messages;
pub mod parser;
pub mod registry;
pub mod rules;
pub mod value;

pub use config::ValidatorConfig;
pub use context::{RuleContext, Warning, WarningKind};
pub use engine::{rules, summarize, FieldError, FieldErrorMap, RulesByField, ValidationReport, Validator};
pub use error::{Result, ValidatorError};
pub use messages::{FieldLabels, Message, MessageContext, MessageTable};
pub use parser::{parse, FieldRules, RuleSpec};
pub use registry::{Predicate, Rule, RuleRegistry};
pub use value::{data, ValidationData, Value};
