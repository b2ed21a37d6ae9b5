use actix_web::http::header::{self, ContentType};
use actix_web::http::StatusCode;
use actix_web::{web, HttpRequest, HttpResponse, HttpResponseBuilder, ResponseError};
use chrono::Local;
use serde::Serialize;

use crate::domain::contact_submission::{ContactFormBody, ContactSubmission};
use crate::email_client::{EmailClient, Envelope};
use crate::email_template::render_contact_email;
use crate::mail_log::{MailLog, MailLogEntry, TIMESTAMP_FORMAT};
use crate::startup::ContactRecipients;

// Static so it can be sent even when serializing the real payload went wrong
const UNEXPECTED_OUTPUT_BODY: &str = r#"{"success":false,"error":"Unexpected server output","message":"There was an unexpected error. Please try again."}"#;

#[derive(Serialize, Debug)]
pub struct SentBody {
    pub success: bool,
    pub message: &'static str,
}

#[derive(Serialize, Debug)]
pub struct ValidationFailedBody {
    pub error: &'static str,
    pub details: Vec<String>,
}

#[derive(Serialize, Debug)]
pub struct FailureBody {
    pub success: bool,
    pub error: &'static str,
    pub message: &'static str,
}

#[derive(Serialize, Debug)]
pub struct MethodNotAllowedBody {
    pub error: &'static str,
}

/// Every response of the contact endpoint goes through here, so the client always gets JSON.
pub fn json_response<T: Serialize>(mut builder: HttpResponseBuilder, payload: &T) -> HttpResponse {
    match serde_json::to_string(payload) {
        Ok(body) => builder.content_type(ContentType::json()).body(body),
        Err(err) => {
            tracing::error!("Failed to serialize the response payload: {:?}", err);
            HttpResponse::InternalServerError()
                .content_type(ContentType::json())
                .body(UNEXPECTED_OUTPUT_BODY)
        }
    }
}

#[derive(thiserror::Error)]
pub enum ContactError {
    #[error("Validation failed.")]
    ValidationError(Vec<String>),
    #[error("Failed to send the contact email.")]
    SendEmailError(#[from] reqwest::Error),
    #[error("Failed to render the contact email.")]
    RenderEmailError(#[from] tera::Error),
}

impl std::fmt::Debug for ContactError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContactError::ValidationError(details) => {
                write!(f, "Caused by:\n\t({}) {:?}", self, details)
            }
            ContactError::SendEmailError(err) => write!(f, "Caused by:\n\t({}) {:?}", self, err),
            ContactError::RenderEmailError(err) => write!(f, "Caused by:\n\t({}) {:?}", self, err),
        }
    }
}

impl ResponseError for ContactError {
    fn status_code(&self) -> StatusCode {
        match self {
            ContactError::ValidationError(_) => StatusCode::BAD_REQUEST,
            ContactError::SendEmailError(_) | ContactError::RenderEmailError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let builder = HttpResponse::build(self.status_code());

        match self {
            ContactError::ValidationError(details) => json_response(
                builder,
                &ValidationFailedBody {
                    error: "Validation failed",
                    details: details.clone(),
                },
            ),
            ContactError::SendEmailError(_) | ContactError::RenderEmailError(_) => json_response(
                builder,
                &FailureBody {
                    success: false,
                    error: "Failed to send email",
                    message: "There was an error sending your message. Please try again.",
                },
            ),
        }
    }
}

/// Turns an undecodable form body into the same JSON validation failure as a bad field
pub fn form_error_handler(
    err: actix_web::error::UrlencodedError,
    _: &HttpRequest,
) -> actix_web::Error {
    tracing::warn!("Failed to decode the contact form body: {:?}", err);

    ContactError::ValidationError(vec![String::from("Invalid form data")]).into()
}

#[tracing::instrument(
    name = "Handling a contact form submission",
    skip(body, email_client, recipients, mail_log),
    fields(
        contact_email = %body.email,
        contact_name = %body.name
    )
)]
pub async fn handle_contact_form(
    body: web::Form<ContactFormBody>,
    email_client: web::Data<EmailClient>,
    recipients: web::Data<ContactRecipients>,
    mail_log: web::Data<MailLog>,
) -> Result<HttpResponse, ContactError> {
    let submission: ContactSubmission = body.into_inner().try_into().map_err(|details| {
        tracing::warn!("Validation error: {:?}", details);
        ContactError::ValidationError(details)
    })?;

    let timestamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
    let sent = send_contact_email(&email_client, &recipients, &submission, &timestamp).await;

    let entry = match &sent {
        Ok(()) => MailLogEntry::Sent {
            timestamp,
            from: submission.email.clone(),
            name: submission.name.clone(),
            to: recipients.to.clone(),
            cc: recipients.cc.clone(),
        },
        Err(_) => MailLogEntry::Failed {
            timestamp,
            from: submission.email.clone(),
            name: submission.name.clone(),
        },
    };

    if let Err(err) = mail_log.append(&entry).await {
        tracing::error!("Failed to record the delivery attempt: {:?}", err);
    }

    sent.map_err(|err| {
        tracing::error!(
            "Failed to send an email from {}: {:?}",
            submission.email.as_ref(),
            err
        );
        err
    })?;

    Ok(json_response(
        HttpResponse::Ok(),
        &SentBody {
            success: true,
            message: "Email sent successfully to both addresses!",
        },
    ))
}

#[tracing::instrument(
    name = "Send the contact email to the site owner",
    skip(email_client, recipients, submission, timestamp)
)]
async fn send_contact_email(
    email_client: &EmailClient,
    recipients: &ContactRecipients,
    submission: &ContactSubmission,
    timestamp: &str,
) -> Result<(), ContactError> {
    let envelope = Envelope {
        to: recipients.to.clone(),
        cc: recipients.cc.clone(),
        from: submission.email.clone(),
        from_name: submission.name.as_ref().to_string(),
        reply_to: submission.email.clone(),
    };
    let html_content = render_contact_email(submission, timestamp)?;

    email_client
        .send_email(&envelope, submission.subject.as_ref(), &html_content)
        .await
        .map_err(ContactError::from)
}

#[tracing::instrument(
    name = "Rejecting a non POST contact request",
    skip(request),
    fields(method = %request.method())
)]
pub async fn method_not_allowed(request: HttpRequest) -> HttpResponse {
    let mut builder = HttpResponse::MethodNotAllowed();
    builder.insert_header((header::ALLOW, "POST"));

    json_response(
        builder,
        &MethodNotAllowedBody {
            error: "Method not allowed",
        },
    )
}
