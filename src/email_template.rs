use lazy_static::lazy_static;
use serde::Serialize;
use tera::Tera;

use crate::domain::contact_submission::ContactSubmission;

// The .html suffix turns on tera's autoescaping for every interpolated value
const CONTACT_TEMPLATE_NAME: &str = "contact_submission.html";
const CONTACT_TEMPLATE: &str = include_str!("../templates/contact_submission.html");

lazy_static! {
    static ref TEMPLATES: Tera = {
        let mut tera = Tera::default();
        tera.add_raw_template(CONTACT_TEMPLATE_NAME, CONTACT_TEMPLATE)
            .expect("contact email template is valid");
        tera
    };
}

/// Values interpolated into the contact email
#[derive(Debug, Serialize)]
pub struct ContactEmailTemplate<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub subject: &'a str,
    /// Message split on line breaks; the template joins the lines with `<br />`
    pub message_lines: Vec<&'a str>,
    pub sent_at: &'a str,
}

impl<'a> ContactEmailTemplate<'a> {
    pub fn new(submission: &'a ContactSubmission, sent_at: &'a str) -> ContactEmailTemplate<'a> {
        ContactEmailTemplate {
            name: submission.name.as_ref(),
            email: submission.email.as_ref(),
            subject: submission.subject.as_ref(),
            message_lines: submission.message.as_ref().lines().collect(),
            sent_at,
        }
    }
}

/// Builds the HTML body delivered to the site owner for one submission
#[tracing::instrument(name = "Render contact email", skip_all)]
pub fn render_contact_email(
    submission: &ContactSubmission,
    sent_at: &str,
) -> Result<String, tera::Error> {
    let context = tera::Context::from_serialize(ContactEmailTemplate::new(submission, sent_at))?;

    TEMPLATES.render(CONTACT_TEMPLATE_NAME, &context)
}
