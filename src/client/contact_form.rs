use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use crate::client::form_client::{Delivered, FormClient, FormValues, SubmitError};
use crate::client::notification::{NotificationKind, Notifications};
use crate::domain::form_field::FormField;

/// The form's submit control. Clones observe the same state.
#[derive(Debug, Clone, Default)]
pub struct SubmitButton {
    disabled: Arc<AtomicBool>,
}

impl SubmitButton {
    pub fn is_disabled(&self) -> bool {
        self.disabled.load(Ordering::SeqCst)
    }

    fn press(&self) -> LoadingGuard {
        self.disabled.store(true, Ordering::SeqCst);

        LoadingGuard {
            button: self.clone(),
        }
    }
}

// Re-enables the button however the request ends, including when the future is dropped
struct LoadingGuard {
    button: SubmitButton,
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.button.disabled.store(false, Ordering::SeqCst);
    }
}

/// Events the page forwards to the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    /// The user typed into a field
    Input(FormField, String),
    /// A field lost focus
    Blur(FormField),
    Submit,
}

#[derive(Debug)]
pub enum SubmitAttempt {
    /// At least one field failed validation, nothing was sent
    Invalid,
    Delivered(Delivered),
    Failed(SubmitError),
}

pub struct ContactForm {
    values: FormValues,
    errors: HashMap<FormField, &'static str>,
    submit_button: SubmitButton,
    notifications: Notifications,
    client: FormClient,
}

impl ContactForm {
    pub fn new(client: FormClient) -> ContactForm {
        ContactForm {
            values: FormValues::default(),
            errors: HashMap::new(),
            submit_button: SubmitButton::default(),
            notifications: Notifications::default(),
            client,
        }
    }

    /// Routes a page event to its handler. Only `Submit` produces an attempt.
    pub async fn handle(&mut self, event: FormEvent) -> Option<SubmitAttempt> {
        match event {
            FormEvent::Input(field, value) => {
                self.values.set(field, value);
                self.clear_error(field);
                None
            }
            FormEvent::Blur(field) => {
                self.validate_field(field);
                None
            }
            FormEvent::Submit => Some(self.submit().await),
        }
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn set_value(&mut self, field: FormField, value: impl Into<String>) {
        self.values.set(field, value.into());
    }

    /// Message currently shown in the field's error slot
    pub fn error(&self, field: FormField) -> Option<&'static str> {
        self.errors.get(&field).copied()
    }

    pub fn submit_button(&self) -> SubmitButton {
        self.submit_button.clone()
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    /// Checks one field, flagging it when invalid and clearing any stale flag otherwise.
    pub fn validate_field(&mut self, field: FormField) -> bool {
        match field.check(self.values.get(field)) {
            Ok(()) => {
                self.clear_error(field);
                true
            }
            Err(message) => {
                self.errors.insert(field, message);
                false
            }
        }
    }

    pub fn clear_error(&mut self, field: FormField) {
        self.errors.remove(&field);
    }

    #[tracing::instrument(name = "Submitting the contact form", skip(self))]
    pub async fn submit(&mut self) -> SubmitAttempt {
        // Every field is checked so each one shows its own message
        let valid_fields = FormField::ALL
            .into_iter()
            .filter(|field| self.validate_field(*field))
            .count();

        if valid_fields < FormField::ALL.len() {
            return SubmitAttempt::Invalid;
        }

        let result = {
            let _loading = self.submit_button.press();
            self.client.post(&self.values).await
        };

        match result {
            Ok(delivered) => {
                self.values.clear();
                self.notifications.show(NotificationKind::Success, Instant::now());
                SubmitAttempt::Delivered(delivered)
            }
            Err(err) => {
                tracing::error!("Error sending email: {:?}", err);
                self.notifications.show(NotificationKind::Error, Instant::now());
                SubmitAttempt::Failed(err)
            }
        }
    }
}
