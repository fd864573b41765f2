// File: src/control.rs
// Purpose: One bound input control - its value, error state and hint rendering

use formrule::{FieldError, Result, Validator, Value, Warning};
use std::fmt;

/// Error state of a control. Starts `Valid`; flips on every validation of the field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ControlState {
    #[default]
    Valid,
    Invalid { rule: String, message: String },
}

impl ControlState {
    pub fn is_valid(&self) -> bool {
        matches!(self, ControlState::Valid)
    }

    /// Hint text currently shown under the control
    pub fn hint(&self) -> Option<&str> {
        match self {
            ControlState::Valid => None,
            ControlState::Invalid { message, .. } => Some(message),
        }
    }
}

impl From<Option<&FieldError>> for ControlState {
    fn from(error: Option<&FieldError>) -> Self {
        match error {
            None => ControlState::Valid,
            Some(error) => ControlState::Invalid {
                rule: error.rule.clone(),
                message: error.message.clone(),
            },
        }
    }
}

/// Rendering contract implemented by the UI glue for one on-screen control.
///
/// The binding layer only ever calls these after a validation pass for the field.
pub trait ControlView {
    /// Toggle the visual error state of the control
    fn set_error(&mut self, error: bool);

    /// Show (or replace) the hint element with `message`
    fn show_hint(&mut self, message: &str);

    /// Remove the hint element, if any
    fn clear_hint(&mut self);
}

/// View that renders nothing; used when no UI is attached (tests, server side)
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopView;

impl ControlView for NoopView {
    fn set_error(&mut self, _error: bool) {}

    fn show_hint(&mut self, _message: &str) {}

    fn clear_hint(&mut self) {}
}

/// A field bound to its rule expression and (optionally) a view.
pub struct FormControl {
    name: String,
    rules: String,
    value: Value,
    state: ControlState,
    warnings: Vec<Warning>,
    view: Box<dyn ControlView>,
}

impl FormControl {
    pub fn new(name: impl Into<String>, rules: impl Into<String>) -> Self {
        Self::with_view(name, rules, NoopView)
    }

    pub fn with_view(name: impl Into<String>, rules: impl Into<String>, view: impl ControlView + 'static) -> Self {
        Self {
            name: name.into(),
            rules: rules.into(),
            value: Value::Null,
            state: ControlState::Valid,
            warnings: Vec::new(),
            view: Box::new(view),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The control's own rule expression
    pub fn rules(&self) -> &str {
        &self.rules
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Store the current input value; does not validate
    pub fn set_value(&mut self, value: impl Into<Value>) {
        self.value = value.into();
    }

    pub fn state(&self) -> &ControlState {
        &self.state
    }

    pub fn has_error(&self) -> bool {
        !self.state.is_valid()
    }

    pub fn hint(&self) -> Option<&str> {
        self.state.hint()
    }

    /// Warnings raised by the last blur of this control
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Swap the view, keeping the current state, and bring the new view up to date.
    pub fn set_view(&mut self, view: impl ControlView + 'static) {
        self.view = Box::new(view);
        if let ControlState::Invalid { message, .. } = &self.state {
            self.view.set_error(true);
            self.view.show_hint(message);
        }
    }

    /// Validate this field alone (its value wrapped in a one-entry record) and update
    /// the control. Cross-field rules therefore cannot see sibling fields here.
    pub fn on_blur(&mut self, validator: &Validator) -> Result<&ControlState> {
        tracing::trace!(field = %self.name, "blur");
        let report = validator.validate_field(&self.name, &self.value, &self.rules)?;
        self.apply(report.error(&self.name));
        self.warnings = report.warnings;
        Ok(&self.state)
    }

    /// Apply the outcome of a validation pass for this field.
    pub fn apply(&mut self, error: Option<&FieldError>) {
        let next = ControlState::from(error);
        if next == self.state {
            return;
        }

        match &next {
            ControlState::Valid => {
                self.view.set_error(false);
                self.view.clear_hint();
            }
            ControlState::Invalid { message, .. } => {
                self.view.set_error(true);
                self.view.show_hint(message);
            }
        }

        tracing::debug!(field = %self.name, valid = next.is_valid(), "control state changed");
        self.state = next;
    }
}

impl fmt::Debug for FormControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormControl")
            .field("name", &self.name)
            .field("rules", &self.rules)
            .field("value", &self.value)
            .field("state", &self.state)
            .field("warnings", &self.warnings)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Default)]
    struct Recorded {
        error: bool,
        hint: Option<String>,
        calls: usize,
    }

    #[derive(Clone, Default)]
    struct RecordingView(Rc<RefCell<Recorded>>);

    impl ControlView for RecordingView {
        fn set_error(&mut self, error: bool) {
            let mut r = self.0.borrow_mut();
            r.error = error;
            r.calls += 1;
        }

        fn show_hint(&mut self, message: &str) {
            self.0.borrow_mut().hint = Some(message.to_string());
        }

        fn clear_hint(&mut self) {
            self.0.borrow_mut().hint = None;
        }
    }

    #[test]
    fn test_initial_state_is_valid() {
        let control = FormControl::new("email", "required|email");
        assert!(!control.has_error());
        assert_eq!(control.hint(), None);
    }

    #[test]
    fn test_blur_toggles_state_and_view() {
        let validator = Validator::new();
        let view = RecordingView::default();
        let mut control = FormControl::with_view("email", "required|email", view.clone());

        control.set_value("not-an-email");
        let state = control.on_blur(&validator).unwrap();
        assert!(!state.is_valid());
        assert!(view.0.borrow().error);
        assert_eq!(
            view.0.borrow().hint.as_deref(),
            Some("Поле должно содержать адрес электронной почты")
        );

        control.set_value("john@example.com");
        control.on_blur(&validator).unwrap();
        assert!(!control.has_error());
        assert!(!view.0.borrow().error);
        assert_eq!(view.0.borrow().hint, None);
    }

    #[test]
    fn test_unchanged_state_does_not_rerender() {
        let validator = Validator::new();
        let view = RecordingView::default();
        let mut control = FormControl::with_view("name", "required", view.clone());

        control.on_blur(&validator).unwrap();
        control.on_blur(&validator).unwrap();
        assert_eq!(view.0.borrow().calls, 1);
    }

    #[test]
    fn test_set_view_keeps_state_and_replays_hint() {
        let validator = Validator::new();
        let mut control = FormControl::new("email", "required|email");
        control.set_value("not-an-email");
        control.on_blur(&validator).unwrap();

        let view = RecordingView::default();
        control.set_view(view.clone());

        assert!(control.has_error());
        assert!(view.0.borrow().error);
        assert_eq!(
            view.0.borrow().hint.as_deref(),
            Some("Поле должно содержать адрес электронной почты")
        );
    }

    #[test]
    fn test_set_view_on_valid_control_renders_nothing() {
        let mut control = FormControl::new("email", "required|email");
        let view = RecordingView::default();
        control.set_view(view.clone());
        assert_eq!(view.0.borrow().calls, 0);
    }

    #[test]
    fn test_blur_keeps_warnings() {
        let validator = Validator::new();
        let mut control = FormControl::new("agree", "min:1");
        control.set_value(true);

        control.on_blur(&validator).unwrap();
        assert!(!control.has_error());
        assert_eq!(control.warnings().len(), 1);
        assert_eq!(control.warnings()[0].rule, "min");

        control.set_value("yes");
        control.on_blur(&validator).unwrap();
        assert!(control.warnings().is_empty());
    }

    #[test]
    fn test_blur_propagates_configuration_errors() {
        let validator = Validator::new();
        let mut control = FormControl::new("name", "required|nope");
        control.set_value("x");
        assert!(control.on_blur(&validator).is_err());
        assert!(!control.has_error());
    }
}
