//! formrule WASM
//!
//! WebAssembly bindings so the browser-side form glue can run the same rule
//! expressions as the Rust code: collect `{field: value}` and `{field: "rule|rule:arg"}`,
//! call `validate`, toggle hints from the returned errors.

use formrule::{
    FieldErrorMap, RulesByField, RuleSpec, ValidationData, Validator, ValidatorConfig, Value, Warning,
};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use wasm_bindgen::prelude::*;

thread_local! {
    static VALIDATOR: RefCell<Validator> = RefCell::new(Validator::new());
}

/// Set panic hook for better error messages in the browser
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Result of a full validation, as handed to JavaScript
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ValidationOutput {
    pub valid: bool,
    pub errors: FieldErrorMap,
    pub summary: String,
    pub warnings: Vec<Warning>,
}

/// Per-field result for blur handlers
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FieldOutput {
    pub error: bool,
    pub rule: Option<String>,
    pub message: Option<String>,
    pub warnings: Vec<Warning>,
}

fn validate_record(data: &ValidationData, rules: &RulesByField) -> Result<ValidationOutput, String> {
    VALIDATOR.with(|validator| {
        let report = validator
            .borrow()
            .validate(data, rules)
            .map_err(|e| e.to_string())?;

        Ok(ValidationOutput {
            valid: report.is_valid(),
            summary: report.summary(),
            errors: report.errors,
            warnings: report.warnings,
        })
    })
}

fn validate_single(field: &str, value: &Value, expression: &str) -> Result<FieldOutput, String> {
    VALIDATOR.with(|validator| {
        let report = validator
            .borrow()
            .validate_field(field, value, expression)
            .map_err(|e| e.to_string())?;

        let error = report.errors.into_values().next();
        Ok(FieldOutput {
            error: error.is_some(),
            rule: error.as_ref().map(|e| e.rule.clone()),
            message: error.map(|e| e.message),
            warnings: report.warnings,
        })
    })
}

fn apply_config(toml: &str) -> Result<(), String> {
    let config = ValidatorConfig::from_toml_str(toml).map_err(|e| format!("{:#}", e))?;
    let validator = config.build_validator().map_err(|e| format!("{:#}", e))?;
    VALIDATOR.with(|current| *current.borrow_mut() = validator);
    Ok(())
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsValue::from_str(&format!("Failed to serialize result: {}", e)))
}

/// Validate a whole form
///
/// # Example (JavaScript)
/// ```javascript
/// const result = validate(
///     { name: 'John1', email: 'john@example.com' },
///     { name: 'required|alpha', email: 'required|email' }
/// );
/// // result.valid === false, result.errors.name.rule === 'alpha'
/// ```
#[wasm_bindgen]
pub fn validate(data: JsValue, rules: JsValue) -> Result<JsValue, JsValue> {
    let data: ValidationData = serde_wasm_bindgen::from_value(data)
        .map_err(|e| JsValue::from_str(&format!("Failed to parse data: {}", e)))?;
    let rules: RulesByField = serde_wasm_bindgen::from_value(rules)
        .map_err(|e| JsValue::from_str(&format!("Failed to parse rules: {}", e)))?;

    let output = validate_record(&data, &rules).map_err(|e| JsValue::from_str(&e))?;
    to_js(&output)
}

/// Validate one field on its own (blur)
#[wasm_bindgen(js_name = validateField)]
pub fn validate_field(field: &str, value: JsValue, expression: &str) -> Result<JsValue, JsValue> {
    let value: Value = serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsValue::from_str(&format!("Failed to parse value: {}", e)))?;

    let output = validate_single(field, &value, expression).map_err(|e| JsValue::from_str(&e))?;
    to_js(&output)
}

/// Parse a rule expression into `[{name, args}]`
#[wasm_bindgen(js_name = parseRules)]
pub fn parse_rules(expression: &str) -> Result<JsValue, JsValue> {
    let specs: Vec<RuleSpec> = formrule::parse(expression).as_slice().to_vec();
    to_js(&specs)
}

/// Replace messages and labels from a TOML document (same format as formrule.toml)
#[wasm_bindgen]
pub fn configure(toml: &str) -> Result<(), JsValue> {
    apply_config(toml).map_err(|e| JsValue::from_str(&e))
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn test_parse_rules() {
        let parsed = parse_rules("required|min:6").unwrap();
        let specs: Vec<RuleSpec> = serde_wasm_bindgen::from_value(parsed).unwrap();
        assert_eq!(specs.len(), 2);
        assert_eq!(specs[1].args, vec!["6".to_string()]);
    }

    #[wasm_bindgen_test]
    fn test_validate_from_js_objects() {
        let data = to_js(&formrule::data([
            ("password", Value::from("a")),
            ("confirm", Value::from("b")),
        ]))
        .unwrap();
        let rules = to_js(&formrule::rules([("confirm", "equals:password")])).unwrap();

        let result = validate(data, rules).unwrap();
        let output: ValidationOutput = serde_wasm_bindgen::from_value(result).unwrap();
        assert!(!output.valid);
        assert_eq!(output.errors["confirm"].rule, "equals");
    }
}
