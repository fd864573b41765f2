// File: src/screens.rs
// Purpose: Which of the three forms is on screen, and the links between them

use crate::form::Form;
use crate::forms::{ForgotPasswordForm, LoginForm, RegistrationForm};
use formrule::ValidatorConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Registration,
    ForgotPassword,
}

/// Links the user can follow between screens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Link {
    /// "Register" on the login screen
    Register,
    /// "Forgot password" on the login screen
    ForgotPassword,
    /// "Cancel" on the forgot-password screen
    Cancel,
    /// "Log in" on the registration screen
    Login,
}

/// The three forms, exactly one visible at a time. Login is shown first.
#[derive(Debug)]
pub struct Screens {
    pub login: Form<LoginForm>,
    pub registration: Form<RegistrationForm>,
    pub forgot_password: Form<ForgotPasswordForm>,
    current: Screen,
}

impl Default for Screens {
    fn default() -> Self {
        Self::new()
    }
}

impl Screens {
    pub fn new() -> Self {
        Self::from_forms(
            Form::new(LoginForm),
            Form::new(RegistrationForm),
            Form::new(ForgotPasswordForm),
        )
    }

    /// Forms built with any per-form rule overrides from configuration
    pub fn from_config(config: &ValidatorConfig) -> Self {
        fn build<D: crate::FormDefinition>(definition: D, config: &ValidatorConfig) -> Form<D> {
            match config.form_rules(definition.name()) {
                Some(overrides) => Form::with_overrides(definition, overrides),
                None => Form::new(definition),
            }
        }

        Self::from_forms(
            build(LoginForm, config),
            build(RegistrationForm, config),
            build(ForgotPasswordForm, config),
        )
    }

    fn from_forms(
        login: Form<LoginForm>,
        registration: Form<RegistrationForm>,
        forgot_password: Form<ForgotPasswordForm>,
    ) -> Self {
        let mut screens = Self {
            login,
            registration,
            forgot_password,
            current: Screen::Login,
        };
        screens.show(Screen::Login);
        screens
    }

    pub fn current(&self) -> Screen {
        self.current
    }

    /// Follow a link; links that don't exist on the current screen are ignored.
    pub fn follow(&mut self, link: Link) -> Screen {
        let next = match (self.current, link) {
            (Screen::Login, Link::Register) => Screen::Registration,
            (Screen::Login, Link::ForgotPassword) => Screen::ForgotPassword,
            (Screen::ForgotPassword, Link::Cancel) => Screen::Login,
            (Screen::Registration, Link::Login) => Screen::Login,
            (current, link) => {
                tracing::debug!(?current, ?link, "link not available on this screen");
                current
            }
        };

        self.show(next);
        next
    }

    fn show(&mut self, screen: Screen) {
        self.login.hide();
        self.registration.hide();
        self.forgot_password.hide();

        match screen {
            Screen::Login => self.login.show(),
            Screen::Registration => self.registration.show(),
            Screen::ForgotPassword => self.forgot_password.show(),
        }
        self.current = screen;
    }
}
