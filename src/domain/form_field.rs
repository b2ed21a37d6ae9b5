use crate::domain::contact_email::is_well_formed;

/// The inputs of the contact form, in the order they are laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Name,
    Email,
    Subject,
    Message,
}

impl FormField {
    pub const ALL: [FormField; 4] = [
        FormField::Name,
        FormField::Email,
        FormField::Subject,
        FormField::Message,
    ];

    /// Id of the element where the field's validation message is shown
    pub fn error_slot(&self) -> String {
        format!("{}Error", self.as_ref())
    }

    /// Checks a raw input value with the rules the browser applies before submitting.
    pub fn check(&self, value: &str) -> Result<(), &'static str> {
        let value = value.trim();
        // Counted like a browser's `value.length`: UTF-16 code units
        let length = value.encode_utf16().count();

        let is_valid = match self {
            FormField::Name => length >= 2,
            FormField::Email => is_well_formed(value),
            FormField::Subject => length >= 5,
            FormField::Message => length >= 10,
        };

        if is_valid {
            Ok(())
        } else {
            Err(self.invalid_message())
        }
    }

    fn invalid_message(&self) -> &'static str {
        match self {
            FormField::Name => "Name must be at least 2 characters long",
            FormField::Email => "Please enter a valid email address",
            FormField::Subject => "Subject must be at least 5 characters long",
            FormField::Message => "Message must be at least 10 characters long",
        }
    }

    pub fn parse(name: &str) -> Result<FormField, String> {
        match name {
            "name" => Ok(FormField::Name),
            "email" => Ok(FormField::Email),
            "subject" => Ok(FormField::Subject),
            "message" => Ok(FormField::Message),
            _ => Err(format!("{} is not a contact form field", name)),
        }
    }
}

impl AsRef<str> for FormField {
    fn as_ref(&self) -> &str {
        match self {
            FormField::Name => "name",
            FormField::Email => "email",
            FormField::Subject => "subject",
            FormField::Message => "message",
        }
    }
}
