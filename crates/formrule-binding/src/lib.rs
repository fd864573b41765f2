//! formrule-binding
//!
//! Ties validation results to on-screen controls. Each [`FormControl`] keeps its own
//! error state (`Valid` / `Invalid`) and tells its [`ControlView`] when to show or
//! clear a hint; a [`Form`] aggregates controls, computes form validity and only
//! lets a submission through when every control is valid.
//!
//! ```
//! use formrule::Validator;
//! use formrule_binding::{Form, RegistrationForm, Submission};
//!
//! let validator = Validator::new();
//! let mut form = Form::new(RegistrationForm);
//! form.set_value("name", "John");
//! form.set_value("email", "john@example.com");
//! form.set_value("password", "secret1");
//!
//! let submission = form.submit(&validator).unwrap();
//! assert!(submission.is_submitted());
//! ```

pub mod control;
pub mod form;
pub mod forms;
pub mod screens;

pub use control::{ControlState, ControlView, FormControl, NoopView};
pub use form::{Form, FormDefinition, Submission};
pub use forms::{ForgotPasswordForm, LoginForm, RegistrationForm, SubmitReceipt};
pub use screens::{Link, Screen, Screens};
