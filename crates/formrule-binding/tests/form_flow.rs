/// Form flow tests: blur, full validation and the submit gate on the bundled screens

use formrule::{Validator, Value};
use formrule_binding::{
    ControlState, ControlView, Form, LoginForm, RegistrationForm, Submission, SubmitReceipt,
};
use pretty_assertions::assert_eq;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone, Default)]
struct HintLog(Rc<RefCell<Vec<String>>>);

impl ControlView for HintLog {
    fn set_error(&mut self, error: bool) {
        self.0.borrow_mut().push(format!("error={}", error));
    }

    fn show_hint(&mut self, message: &str) {
        self.0.borrow_mut().push(format!("show:{}", message));
    }

    fn clear_hint(&mut self) {
        self.0.borrow_mut().push("clear".to_string());
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn invalid_registration() -> Form<RegistrationForm> {
    let mut form = Form::new(RegistrationForm);
    form.set_value("name", "John1");
    form.set_value("email", "not-an-email");
    form.set_value("password", "abc");
    form
}

#[test]
fn test_registration_validate_all_marks_every_control() {
    let validator = Validator::new();
    let mut form = invalid_registration();

    let report = form.validate_all(&validator).unwrap();

    assert!(!form.is_valid());
    let states: Vec<(&str, Option<&str>)> = form
        .controls()
        .iter()
        .map(|c| match c.state() {
            ControlState::Valid => (c.name(), None),
            ControlState::Invalid { rule, .. } => (c.name(), Some(rule.as_str())),
        })
        .collect();
    assert_eq!(
        states,
        vec![("name", Some("alpha")), ("email", Some("email")), ("password", Some("min"))]
    );
    assert_eq!(report.errors.len(), 3);
}

#[test]
fn test_registration_submit_rejected_then_accepted() {
    init_tracing();
    let validator = Validator::new();
    let mut form = invalid_registration();

    let rejected = form.submit(&validator).unwrap();
    assert!(matches!(rejected, Submission::Rejected(ref errors) if errors.len() == 3));

    form.set_value("name", "John");
    form.set_value("email", "john@example.com");
    form.set_value("password", "secret1");

    let accepted = form.submit(&validator).unwrap();
    assert_eq!(
        accepted,
        Submission::Submitted(SubmitReceipt {
            form: "registration".to_string(),
            fields: vec!["email".to_string(), "name".to_string(), "password".to_string()],
        })
    );
    assert!(form.is_valid());
    assert!(form.controls().iter().all(|c| c.hint().is_none()));
}

#[test]
fn test_validate_all_twice_gives_same_errors() {
    let validator = Validator::new();
    let mut form = invalid_registration();

    let first = form.validate_all(&validator).unwrap();
    let second = form.validate_all(&validator).unwrap();

    assert_eq!(first.errors, second.errors);
}

#[test]
fn test_untouched_form_is_optimistically_valid() {
    let form = Form::new(LoginForm);
    assert!(form.is_valid());
    assert!(form.controls().iter().all(|c| c.state() == &ControlState::Valid));
}

#[test]
fn test_blur_renders_and_clears_hint() {
    let validator = Validator::new();
    let log = HintLog::default();
    let mut form = Form::new(LoginForm);
    assert!(form.bind_view("email", log.clone()));

    form.set_value("email", "");
    assert!(!form.blur("email", &validator).unwrap());

    form.set_value("email", "john@example.com");
    assert!(form.blur("email", &validator).unwrap());

    assert_eq!(
        log.0.borrow().as_slice(),
        &[
            "error=true".to_string(),
            "show:Поле должно быть заполнено".to_string(),
            "error=false".to_string(),
            "clear".to_string(),
        ]
    );
}

#[test]
fn test_bind_view_after_validation_keeps_error() {
    let validator = Validator::new();
    let log = HintLog::default();
    let mut form = Form::new(LoginForm);
    form.set_value("email", "not-an-email");
    form.validate_all(&validator).unwrap();

    assert!(form.bind_view("email", log.clone()));

    let email = form.control("email").unwrap();
    assert!(email.has_error());
    assert_eq!(email.hint(), Some("Поле должно содержать адрес электронной почты"));
    assert_eq!(email.value(), &Value::from("not-an-email"));
    assert_eq!(
        log.0.borrow().as_slice(),
        &[
            "error=true".to_string(),
            "show:Поле должно содержать адрес электронной почты".to_string(),
        ]
    );
}

#[test]
fn test_blur_only_touches_its_own_control() {
    let validator = Validator::new();
    let mut form = Form::new(LoginForm);

    form.blur("email", &validator).unwrap();

    assert!(form.control("email").unwrap().has_error());
    assert!(!form.control("password").unwrap().has_error());
}
