#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ContactMessage(String);

impl ContactMessage {
    pub fn parse(message: String) -> Result<ContactMessage, String> {
        let message = message.trim();

        if message.is_empty() {
            return Err(String::from("Message is required"));
        }

        Ok(Self(message.to_string()))
    }
}

impl AsRef<str> for ContactMessage {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
