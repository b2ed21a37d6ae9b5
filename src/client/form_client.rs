use reqwest::{header, Client, StatusCode};
use serde::Serialize;

use crate::domain::form_field::FormField;

/// Current content of the contact form inputs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormValues {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl FormValues {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Email => &self.email,
            FormField::Subject => &self.subject,
            FormField::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: FormField, value: String) {
        match field {
            FormField::Name => self.name = value,
            FormField::Email => self.email = value,
            FormField::Subject => self.subject = value,
            FormField::Message => self.message = value,
        }
    }

    pub fn clear(&mut self) {
        *self = FormValues::default();
    }
}

/// Ways a submission can fail once it has been sent
#[derive(thiserror::Error, Debug)]
pub enum SubmitError {
    #[error("Failed to reach the server.")]
    TransportError(#[from] reqwest::Error),
    #[error("HTTP error! status: {0}")]
    HttpStatusError(StatusCode),
    #[error("Empty response from server")]
    EmptyResponse,
    #[error("Invalid response from server")]
    InvalidResponse(#[source] serde_json::Error),
    #[error("{0}")]
    Rejected(String),
}

/// Server acknowledgement of a delivered submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivered {
    pub message: Option<String>,
}

/// Posts contact form submissions to the mail dispatcher
#[derive(Debug, Clone)]
pub struct FormClient {
    http_client: Client,
    endpoint: String,
}

impl FormClient {
    pub fn new(endpoint: String) -> Result<FormClient, reqwest::Error> {
        let http_client = Client::builder().build()?;

        Ok(FormClient {
            http_client,
            endpoint,
        })
    }

    /// Sends one form-encoded POST and interprets the reply. Never retries.
    #[tracing::instrument(name = "Posting the contact form", skip(self, values), fields(endpoint = %self.endpoint))]
    pub async fn post(&self, values: &FormValues) -> Result<Delivered, SubmitError> {
        let response = self
            .http_client
            .post(&self.endpoint)
            .header(header::ACCEPT, "application/json")
            .form(values)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SubmitError::HttpStatusError(status));
        }

        let text = response.text().await?;
        interpret_reply(&text)
    }
}

fn interpret_reply(text: &str) -> Result<Delivered, SubmitError> {
    if text.trim().is_empty() {
        return Err(SubmitError::EmptyResponse);
    }

    let reply: serde_json::Value =
        serde_json::from_str(text).map_err(SubmitError::InvalidResponse)?;
    let text_field = |key: &str| reply.get(key).and_then(|value| value.as_str()).map(String::from);

    if reply.get("success").and_then(|value| value.as_bool()) == Some(true) {
        return Ok(Delivered {
            message: text_field("message"),
        });
    }

    Err(SubmitError::Rejected(
        text_field("message")
            .or_else(|| text_field("error"))
            .unwrap_or_else(|| String::from("Form submission failed")),
    ))
}
