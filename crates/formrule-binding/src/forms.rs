// File: src/forms.rs
// Purpose: The three screen forms - registration, login and forgot-password

use crate::form::FormDefinition;
use formrule::ValidationData;
use serde::Serialize;

/// Acknowledgment returned by the bundled forms; no request is actually sent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmitReceipt {
    pub form: String,
    pub fields: Vec<String>,
}

fn acknowledge(form: &str, data: &ValidationData) -> SubmitReceipt {
    let fields: Vec<String> = data.keys().cloned().collect();
    tracing::info!(form, fields = ?fields, "form submitted");
    SubmitReceipt {
        form: form.to_string(),
        fields,
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct RegistrationForm;

impl FormDefinition for RegistrationForm {
    type Receipt = SubmitReceipt;

    fn name(&self) -> &str {
        "registration"
    }

    fn rules_by_field(&self) -> Vec<(&'static str, &'static str)> {
        vec![
            ("name", "required|alpha"),
            ("email", "required|email"),
            ("password", "required|string|min:6"),
        ]
    }

    fn on_submit(&mut self, data: &ValidationData) -> anyhow::Result<SubmitReceipt> {
        Ok(acknowledge(self.name(), data))
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LoginForm;

impl FormDefinition for LoginForm {
    type Receipt = SubmitReceipt;

    fn name(&self) -> &str {
        "login"
    }

    fn rules_by_field(&self) -> Vec<(&'static str, &'static str)> {
        vec![("email", "required|email"), ("password", "required")]
    }

    fn on_submit(&mut self, data: &ValidationData) -> anyhow::Result<SubmitReceipt> {
        Ok(acknowledge(self.name(), data))
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ForgotPasswordForm;

impl FormDefinition for ForgotPasswordForm {
    type Receipt = SubmitReceipt;

    fn name(&self) -> &str {
        "forgot_password"
    }

    fn rules_by_field(&self) -> Vec<(&'static str, &'static str)> {
        vec![("email", "required|email")]
    }

    fn on_submit(&mut self, data: &ValidationData) -> anyhow::Result<SubmitReceipt> {
        Ok(acknowledge(self.name(), data))
    }
}
