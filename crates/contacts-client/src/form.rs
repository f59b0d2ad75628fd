//! Create-contact form state.
//!
//! `editing → validating → rejected(field errors)` or
//! `editing → validating → submitting → succeeded | failed(message)`.
//! Submission takes `&mut self`, so at most one create request per form can
//! be in flight.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use contacts_types::{is_loose_email, Contact, NewContact};
use strum::{Display, EnumString};
use tracing::{info, warn};

use crate::api::ContactsApi;

/// How long the success notice stays visible.
pub const SUCCESS_NOTICE_TTL: Duration = Duration::from_secs(3);
pub const SUCCESS_MESSAGE: &str = "Contact added successfully!";
/// Shown when a failure carries no server-provided message.
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Field {
    Name,
    Email,
    Phone,
    Message,
}

/// Per-field validation messages; empty means the form is valid.
pub type FieldErrors = BTreeMap<Field, &'static str>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

impl FormValues {
    fn get_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Phone => &mut self.phone,
            Field::Message => &mut self.message,
        }
    }

    fn to_new_contact(&self) -> NewContact {
        NewContact {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            message: Some(self.message.clone()).filter(|m| !m.is_empty()),
        }
    }
}

/// Client-side checks, run before any network call.
pub fn validate(values: &FormValues) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if values.name.is_empty() {
        errors.insert(Field::Name, "Name is required");
    }
    if values.email.is_empty() {
        errors.insert(Field::Email, "Email is required");
    } else if !is_loose_email(&values.email) {
        errors.insert(Field::Email, "Please provide a valid email");
    }
    if values.phone.is_empty() {
        errors.insert(Field::Phone, "Phone number is required");
    }
    errors
}

/// Result of one [`ContactForm::submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed; nothing was sent.
    Rejected(FieldErrors),
    /// Stored by the server. The owner should refresh any list it shows.
    Created(Contact),
    /// The request failed; fields are kept for correction.
    Failed(String),
}

#[derive(Debug, Default)]
pub struct ContactForm {
    values: FormValues,
    errors: FieldErrors,
    server_error: Option<String>,
    success_until: Option<Instant>,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn server_error(&self) -> Option<&str> {
        self.server_error.as_deref()
    }

    /// Edit one field, clearing any error shown for it.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        *self.values.get_mut(field) = value.into();
        self.errors.remove(&field);
    }

    /// The success notice, if it has not expired by `now`.
    pub fn success_message_at(&self, now: Instant) -> Option<&'static str> {
        self.success_until
            .filter(|until| now < *until)
            .map(|_| SUCCESS_MESSAGE)
    }

    pub fn success_message(&self) -> Option<&'static str> {
        self.success_message_at(Instant::now())
    }

    pub async fn submit(&mut self, api: &ContactsApi) -> SubmitOutcome {
        let errors = validate(&self.values);
        if !errors.is_empty() {
            self.errors = errors.clone();
            return SubmitOutcome::Rejected(errors);
        }

        self.server_error = None;
        self.success_until = None;

        match api.create(&self.values.to_new_contact()).await {
            Ok(contact) => {
                info!(contact_id = %contact.id, "contact submitted");
                self.values = FormValues::default();
                self.success_until = Some(Instant::now() + SUCCESS_NOTICE_TTL);
                SubmitOutcome::Created(contact)
            }
            Err(e) => {
                warn!(error = %e, "contact submission failed");
                let message = e
                    .server_message()
                    .unwrap_or(GENERIC_FAILURE_MESSAGE)
                    .to_owned();
                self.server_error = Some(message.clone());
                SubmitOutcome::Failed(message)
            }
        }
    }
}
