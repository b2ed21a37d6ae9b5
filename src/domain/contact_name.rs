#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ContactName(String);

impl ContactName {
    pub fn parse(name: String) -> Result<ContactName, String> {
        let name = name.trim();

        if name.is_empty() {
            return Err(String::from("Name is required"));
        }

        Ok(Self(name.to_string()))
    }
}

impl AsRef<str> for ContactName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ContactName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
