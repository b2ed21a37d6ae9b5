use config::{Config, ConfigError, File};
use secrecy::Secret;
use serde_aux::field_attributes::deserialize_number_from_string;
use std::path::PathBuf;
use std::time;

use crate::domain::contact_email::{ContactEmail, ContactEmailError};

#[derive(Debug)]
pub enum Environment {
    Development,
    Production,
}

#[derive(serde::Deserialize, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub email_client: EmailClientSettings,
    pub contact: ContactSettings,
    pub mail_log: MailLogSettings,
}

#[derive(serde::Deserialize, Clone)]
pub struct ApplicationSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub host: String,
}

#[derive(serde::Deserialize, Clone)]
pub struct EmailClientSettings {
    pub base_url: String,
    // secrecy protects secret information and prevents them to be exposed (eg: via logs)
    pub api_key: Secret<String>,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_milliseconds: u64,
}

/// Where contact form submissions are delivered
#[derive(serde::Deserialize, Clone)]
pub struct ContactSettings {
    pub recipient: String,
    pub cc: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub form_limit_bytes: usize,
}

#[derive(serde::Deserialize, Clone)]
pub struct MailLogSettings {
    pub path: PathBuf,
}

impl Settings {
    pub fn get_address(&self) -> String {
        format!(
            "{}:{}",
            self.application.get_host(),
            self.application.get_port()
        )
    }

    pub fn get_email_client_base_url(&self) -> String {
        self.email_client.base_url.clone()
    }

    pub fn get_email_client_api(&self) -> Secret<String> {
        self.email_client.api_key.clone()
    }

    pub fn get_email_client_timeout(&self) -> time::Duration {
        self.email_client.timeout()
    }

    pub fn set_email_client_base_url(&mut self, new_base_url: String) {
        self.email_client.base_url = new_base_url
    }

    pub fn get_mail_log_path(&self) -> PathBuf {
        self.mail_log.path.clone()
    }

    pub fn set_mail_log_path(&mut self, path: PathBuf) {
        self.mail_log.path = path
    }

    pub fn set_app_port(&mut self, port: u16) {
        self.application.port = port;
    }
}

impl ApplicationSettings {
    pub fn get_port(&self) -> u16 {
        self.port
    }

    pub fn get_host(&self) -> String {
        self.host.clone()
    }
}

impl EmailClientSettings {
    pub fn timeout(&self) -> time::Duration {
        time::Duration::from_millis(self.timeout_milliseconds)
    }
}

impl ContactSettings {
    pub fn get_recipient(&self) -> Result<ContactEmail, ContactEmailError> {
        ContactEmail::parse(self.recipient.clone())
    }

    pub fn get_cc(&self) -> Result<ContactEmail, ContactEmailError> {
        ContactEmail::parse(self.cc.clone())
    }

    pub fn get_form_limit(&self) -> usize {
        self.form_limit_bytes
    }
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "development" => Ok(Self::Development),
            "production" => Ok(Self::Production),
            unknown_env => Err(format!(
                "{} is not supported environment. Use either 'development' or 'production'.",
                unknown_env
            )),
        }
    }
}

pub fn get_configuration() -> Result<Settings, ConfigError> {
    let root_path = std::env::current_dir().map_err(|err| {
        ConfigError::Message(format!("Failed to determine the current directory: {}", err))
    })?;
    let config_directory = root_path.join("config");
    // Uses development environment by default
    let enviroment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "development".into())
        .try_into()
        .map_err(ConfigError::Message)?;
    let config_base_filepath = config_directory.join("base");
    let config_env_filepath = config_directory.join(enviroment.as_str());

    // It merges the base configuration file with the one from the specific environment (development or production)
    let settings = Config::builder()
        .add_source(File::from(config_base_filepath).required(true))
        .add_source(File::from(config_env_filepath).required(true))
        // Merge settings from environment variables with a prefix of APP and "__" separator
        // E.g APP_CONTACT__RECIPIENT would set Settings.contact.recipient
        .add_source(config::Environment::with_prefix("app").separator("__"))
        .build()?;

    tracing::info!("Application environment = {:?}", enviroment);

    // Try to convert the value from the configuration file into a Settings type
    settings.try_deserialize()
}
