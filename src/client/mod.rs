//! Browser side of the contact form: field checks, the single POST to the mail dispatcher,
//! and the UI state that follows from its reply.

pub mod contact_form;
pub mod form_client;
pub mod notification;
pub mod preferences;
