pub mod contact_email;
pub mod contact_message;
pub mod contact_name;
pub mod contact_subject;
pub mod contact_submission;
pub mod form_field;
