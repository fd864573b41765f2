// File: src/form.rs
// Purpose: Form aggregation - bound controls, form-level validity and the submit gate

use crate::control::{ControlView, FormControl};
use formrule::{FieldErrorMap, RulesByField, ValidationData, ValidationReport, Validator, Value};
use std::fmt;

/// What a concrete screen form provides: its rules and what to do on submit.
pub trait FormDefinition {
    /// What a successful submission hands back to the caller
    type Receipt;

    /// Stable form name, also used to look up rule overrides in configuration
    fn name(&self) -> &str;

    /// Rule expression per field, in the order the controls should be bound
    fn rules_by_field(&self) -> Vec<(&'static str, &'static str)>;

    /// Called with the form's data once every control is valid
    fn on_submit(&mut self, data: &ValidationData) -> anyhow::Result<Self::Receipt>;
}

/// Result of [`Form::submit`]
#[derive(Debug, Clone, PartialEq)]
pub enum Submission<R> {
    /// Every control was valid and the definition's `on_submit` ran
    Submitted(R),
    /// At least one control was invalid; nothing was submitted
    Rejected(FieldErrorMap),
}

impl<R> Submission<R> {
    pub fn is_submitted(&self) -> bool {
        matches!(self, Submission::Submitted(_))
    }

    pub fn receipt(self) -> Option<R> {
        match self {
            Submission::Submitted(receipt) => Some(receipt),
            Submission::Rejected(_) => None,
        }
    }
}

/// A form definition together with its bound controls.
pub struct Form<D: FormDefinition> {
    definition: D,
    controls: Vec<FormControl>,
    visible: bool,
}

impl<D: FormDefinition> Form<D> {
    /// Bind one control per rule entry of the definition, in definition order
    pub fn new(definition: D) -> Self {
        let controls = definition
            .rules_by_field()
            .into_iter()
            .map(|(field, rules)| FormControl::new(field, rules))
            .collect();

        Self {
            definition,
            controls,
            visible: true,
        }
    }

    /// Like [`Form::new`] but with rule expressions replaced per field, e.g. from
    /// configuration. Fields missing from `overrides` keep the definition's rules.
    pub fn with_overrides(definition: D, overrides: &RulesByField) -> Self {
        let mut form = Self::new(definition);
        for control in &mut form.controls {
            if let Some(rules) = overrides.get(control.name()) {
                *control = FormControl::new(control.name().to_string(), rules.clone());
            }
        }
        form
    }

    /// Attach a view to a bound field; returns false if no such field is bound.
    /// The control keeps its state and the new view is shown any current error.
    pub fn bind_view(&mut self, field: &str, view: impl ControlView + 'static) -> bool {
        match self.control_mut(field) {
            Some(control) => {
                control.set_view(view);
                true
            }
            None => false,
        }
    }

    pub fn definition(&self) -> &D {
        &self.definition
    }

    pub fn name(&self) -> &str {
        self.definition.name()
    }

    pub fn controls(&self) -> &[FormControl] {
        &self.controls
    }

    pub fn control(&self, field: &str) -> Option<&FormControl> {
        self.controls.iter().find(|c| c.name() == field)
    }

    pub fn control_mut(&mut self, field: &str) -> Option<&mut FormControl> {
        self.controls.iter_mut().find(|c| c.name() == field)
    }

    /// Store a value for a bound field; returns false if no such field is bound
    pub fn set_value(&mut self, field: &str, value: impl Into<Value>) -> bool {
        match self.control_mut(field) {
            Some(control) => {
                control.set_value(value);
                true
            }
            None => false,
        }
    }

    /// Snapshot of every control's current value
    pub fn data(&self) -> ValidationData {
        self.controls
            .iter()
            .map(|c| (c.name().to_string(), c.value().clone()))
            .collect()
    }

    /// Rule expressions of the bound controls
    pub fn rules(&self) -> RulesByField {
        self.controls
            .iter()
            .map(|c| (c.name().to_string(), c.rules().to_string()))
            .collect()
    }

    /// Blur one field, validating it alone (see [`FormControl::on_blur`])
    pub fn blur(&mut self, field: &str, validator: &Validator) -> formrule::Result<bool> {
        match self.control_mut(field) {
            Some(control) => Ok(control.on_blur(validator)?.is_valid()),
            None => Ok(true),
        }
    }

    /// Blur one field but validate it against the whole form's data, so cross-field
    /// rules such as `equals:password` see their sibling.
    pub fn blur_in_context(&mut self, field: &str, validator: &Validator) -> formrule::Result<bool> {
        let data = self.data();
        let Some(control) = self.control_mut(field) else {
            return Ok(true);
        };

        let mut rules = RulesByField::new();
        rules.insert(field.to_string(), control.rules().to_string());

        let report = validator.validate(&data, &rules)?;
        control.apply(report.error(field));
        Ok(control.state().is_valid())
    }

    /// Validate every control against the form's data and update every control.
    pub fn validate_all(&mut self, validator: &Validator) -> formrule::Result<ValidationReport> {
        let report = validator.validate(&self.data(), &self.rules())?;

        for control in &mut self.controls {
            control.apply(report.error(control.name()));
        }

        tracing::debug!(
            form = %self.definition.name(),
            invalid = report.errors.len(),
            "form validated"
        );
        Ok(report)
    }

    /// True when no control is in error; scans in bind order and stops at the first
    /// invalid control.
    pub fn is_valid(&self) -> bool {
        !self.controls.iter().any(FormControl::has_error)
    }

    /// First invalid control in bind order, e.g. to move focus to it
    pub fn first_invalid(&self) -> Option<&FormControl> {
        self.controls.iter().find(|c| c.has_error())
    }

    /// Validate everything, then submit only if the form is valid.
    pub fn submit(&mut self, validator: &Validator) -> anyhow::Result<Submission<D::Receipt>> {
        let report = self.validate_all(validator)?;

        if !self.is_valid() {
            tracing::debug!(form = %self.definition.name(), "submit rejected");
            return Ok(Submission::Rejected(report.into_errors()));
        }

        let data = self.data();
        let receipt = self.definition.on_submit(&data)?;
        Ok(Submission::Submitted(receipt))
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

impl<D: FormDefinition> fmt::Debug for Form<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Form")
            .field("name", &self.definition.name())
            .field("controls", &self.controls)
            .field("visible", &self.visible)
            .finish()
    }
}
