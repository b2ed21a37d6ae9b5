pub mod client;
pub mod config;
pub mod domain;
pub mod email_client;
pub mod email_template;
pub mod mail_log;
pub mod routes;
pub mod startup;
pub mod telemetry;
