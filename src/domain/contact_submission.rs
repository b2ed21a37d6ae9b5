use serde::Deserialize;

use crate::domain::contact_email::ContactEmail;
use crate::domain::contact_message::ContactMessage;
use crate::domain::contact_name::ContactName;
use crate::domain::contact_subject::ContactSubject;

/// A contact form attempt that passed server side validation
#[derive(Debug, Clone)]
pub struct ContactSubmission {
    pub name: ContactName,
    pub email: ContactEmail,
    pub subject: ContactSubject,
    pub message: ContactMessage,
}

/// Raw form body. Fields the browser did not send are read as empty strings.
#[derive(Deserialize, Debug, Default, Clone)]
pub struct ContactFormBody {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
}

impl TryFrom<ContactFormBody> for ContactSubmission {
    /// Every violated rule, in field order
    type Error = Vec<String>;

    fn try_from(body: ContactFormBody) -> Result<Self, Self::Error> {
        let mut errors = Vec::new();

        let name = ContactName::parse(body.name).map_err(|err| errors.push(err));
        let email = ContactEmail::parse(body.email).map_err(|err| errors.push(err.to_string()));
        let subject = ContactSubject::parse(body.subject).map_err(|err| errors.push(err));
        let message = ContactMessage::parse(body.message).map_err(|err| errors.push(err));

        match (name, email, subject, message) {
            (Ok(name), Ok(email), Ok(subject), Ok(message)) => Ok(ContactSubmission {
                name,
                email,
                subject,
                message,
            }),
            _ => Err(errors),
        }
    }
}
