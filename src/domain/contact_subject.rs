#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ContactSubject(String);

impl ContactSubject {
    pub fn parse(subject: String) -> Result<ContactSubject, String> {
        let subject = subject.trim();

        if subject.is_empty() {
            return Err(String::from("Subject is required"));
        }

        Ok(Self(subject.to_string()))
    }
}

impl AsRef<str> for ContactSubject {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
