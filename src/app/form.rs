//! Form controller shared by the browser and terminal front ends.
//!
//! Holds the displayed status and a generation counter. Every submission
//! bumps the generation; a resolution is only applied if it belongs to the
//! latest submission, so a slow stale response can't overwrite a newer one.

use crate::app::session::perform_request;
use crate::interface::RequestApi;
use crate::model::dtos::Credentials;
use crate::model::structs::ResponseStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Email,
    Password,
}

/// What a key press in one of the inputs should do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Let the browser handle the key
    Ignore,
    /// Suppress default submission and focus the password input
    FocusPassword,
    /// Suppress default submission and click the submit control
    ActivateSubmit,
}

pub fn key_action(field: Field, key: &str) -> KeyAction {
    match (field, key) {
        (Field::Email, "Enter") => KeyAction::FocusPassword,
        (Field::Password, "Enter") => KeyAction::ActivateSubmit,
        _ => KeyAction::Ignore,
    }
}

/// Append `suffix` unless the login already ends with it
pub fn normalize_email(email: &str, suffix: &str) -> String {
    if email.ends_with(suffix) {
        email.to_string()
    } else {
        format!("{email}{suffix}")
    }
}

/// A started request, tagged with the generation it belongs to
#[derive(Debug, Clone)]
pub struct Submission {
    pub generation: u64,
    pub credentials: Credentials,
}

#[derive(Debug, Default)]
pub struct FormController {
    email_suffix: String,
    status: ResponseStatus,
    generation: u64,
}

impl FormController {
    pub fn new(email_suffix: impl Into<String>) -> Self {
        Self {
            email_suffix: email_suffix.into(),
            ..Self::default()
        }
    }

    pub fn status(&self) -> &ResponseStatus {
        &self.status
    }

    /// Start a new request: normalize the login, switch to `Loading` and
    /// invalidate whatever is still in flight.
    pub fn submit(&mut self, email: &str, password: &str) -> Submission {
        self.generation += 1;
        self.status = ResponseStatus::Loading;

        Submission {
            generation: self.generation,
            credentials: Credentials::new(normalize_email(email, &self.email_suffix), password),
        }
    }

    /// Apply a finished request. Returns false if a newer submission exists
    /// and the status was left untouched.
    pub fn resolve(&mut self, generation: u64, status: ResponseStatus) -> bool {
        if generation != self.generation {
            log::debug!(
                "Dropping response of submission {generation}, latest is {}",
                self.generation
            );
            return false;
        }

        self.status = status;
        true
    }
}

/// Submit and wait for the outcome in one go
pub async fn run_submission<C: RequestApi>(
    client: &C,
    controller: &mut FormController,
    email: &str,
    password: &str,
) -> ResponseStatus {
    let submission = controller.submit(email, password);
    let status = perform_request(client, &submission.credentials).await;
    controller.resolve(submission.generation, status);
    controller.status().clone()
}
