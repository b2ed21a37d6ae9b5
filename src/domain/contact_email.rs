use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Same pattern the browser form checks before submitting, so both sides agree on what a
    // well formed address is.
    static ref EMAIL_PATTERN: Regex =
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex");
}

/// Returns true when `email` looks like `local-part@domain.tld`
pub fn is_well_formed(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ContactEmail(String);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContactEmailError {
    #[error("Email is required")]
    Missing,
    #[error("Invalid email format")]
    Malformed,
}

impl ContactEmail {
    pub fn parse(email: String) -> Result<ContactEmail, ContactEmailError> {
        let email = email.trim();

        if email.is_empty() {
            return Err(ContactEmailError::Missing);
        }

        if !is_well_formed(email) {
            return Err(ContactEmailError::Malformed);
        }

        Ok(Self(email.to_string()))
    }
}

impl AsRef<str> for ContactEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ContactEmail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
