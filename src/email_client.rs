use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use std::time;

use crate::domain::contact_email::ContactEmail;

const REQUEST_TIMEOUT: time::Duration = time::Duration::from_secs(10);

pub struct EmailClient {
    http_client: Client,
    base_url: String,
    api_key: Secret<String>,
}

/// Who an email goes to and who it claims to come from
#[derive(Debug, Clone)]
pub struct Envelope {
    pub to: ContactEmail,
    pub cc: ContactEmail,
    pub from: ContactEmail,
    pub from_name: String,
    pub reply_to: ContactEmail,
}

#[derive(serde::Serialize)]
pub struct SendEmailBody {
    personalizations: Vec<SendgridPersonalization>,
    from: SendgridEmail,
    reply_to: SendgridEmail,
    subject: String,
    content: Vec<SendgridContent>,
}

#[derive(serde::Serialize)]
struct SendgridEmail {
    email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

#[derive(serde::Serialize)]
struct SendgridPersonalization {
    to: Vec<SendgridEmail>,
    cc: Vec<SendgridEmail>,
}

#[derive(serde::Serialize)]
struct SendgridContent {
    #[serde(rename = "type")]
    content_type: String,
    value: String,
}

impl SendgridEmail {
    fn new(email: &ContactEmail) -> SendgridEmail {
        SendgridEmail {
            email: String::from(email.as_ref()),
            name: None,
        }
    }
}

impl EmailClient {
    pub fn new(
        base_url: String,
        api_key: Secret<String>,
        timeout: Option<time::Duration>,
    ) -> Result<EmailClient, reqwest::Error> {
        let http_client = Client::builder()
            .timeout(timeout.unwrap_or(REQUEST_TIMEOUT))
            .build()?;

        Ok(EmailClient {
            http_client,
            base_url,
            api_key,
        })
    }

    /// Hands one HTML email to the provider. A single attempt is made, failures are not retried.
    pub async fn send_email(
        &self,
        envelope: &Envelope,
        subject: &str,
        html_content: &str,
    ) -> Result<(), reqwest::Error> {
        let url = format!("{}/mail/send", self.base_url);
        let body = SendEmailBody {
            personalizations: vec![SendgridPersonalization {
                to: vec![SendgridEmail::new(&envelope.to)],
                cc: vec![SendgridEmail::new(&envelope.cc)],
            }],
            from: SendgridEmail {
                email: String::from(envelope.from.as_ref()),
                name: Some(envelope.from_name.clone()),
            },
            reply_to: SendgridEmail::new(&envelope.reply_to),
            subject: String::from(subject),
            content: vec![SendgridContent {
                content_type: String::from("text/html"),
                value: String::from(html_content),
            }],
        };

        self.http_client
            .post(&url)
            .header(
                "Authorization",
                format!("Bearer {}", self.api_key.expose_secret()),
            )
            .json(&body)
            .send()
            .await?
            .error_for_status()?; // return an error when server response status code is 4xx or 5xx

        Ok(())
    }
}
