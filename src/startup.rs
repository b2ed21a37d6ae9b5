use actix_web::dev::Server;
use actix_web::middleware::DefaultHeaders;
use actix_web::{web, App, HttpServer};
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

use crate::config::Settings;
use crate::domain::contact_email::{ContactEmail, ContactEmailError};
use crate::email_client::EmailClient;
use crate::mail_log::MailLog;
use crate::routes::{form_error_handler, handle_contact_form, health_check, method_not_allowed};

/// Mailboxes every contact submission is delivered to
#[derive(Debug, Clone)]
pub struct ContactRecipients {
    pub to: ContactEmail,
    pub cc: ContactEmail,
}

#[derive(thiserror::Error, Debug)]
pub enum StartupError {
    #[error("Invalid contact recipient address: {0}")]
    RecipientError(#[from] ContactEmailError),
    #[error("Failed to build the email client.")]
    EmailClientError(#[from] reqwest::Error),
    #[error("Failed to start the HTTP server.")]
    IoError(#[from] std::io::Error),
}

pub struct Application {
    pub port: u16,
    pub server: Server,
}

impl Application {
    pub async fn build(config: Settings) -> Result<Self, StartupError> {
        let recipients = ContactRecipients {
            to: config.contact.get_recipient()?,
            cc: config.contact.get_cc()?,
        };
        let email_client = EmailClient::new(
            config.get_email_client_base_url(),
            config.get_email_client_api(),
            Some(config.get_email_client_timeout()),
        )?;
        let mail_log = MailLog::new(config.get_mail_log_path());

        let listener = TcpListener::bind(config.get_address())?;
        let port = listener.local_addr()?.port();

        tracing::info!("Server listening on {}", listener.local_addr()?);

        let server = run(
            listener,
            email_client,
            recipients,
            mail_log,
            config.contact.get_form_limit(),
        )?;

        Ok(Self { port, server })
    }

    pub fn get_port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stop(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

pub fn run(
    listener: TcpListener,
    email_client: EmailClient,
    recipients: ContactRecipients,
    mail_log: MailLog,
    form_limit: usize,
) -> Result<Server, std::io::Error> {
    let email_client = web::Data::new(email_client);
    let recipients = web::Data::new(recipients);
    let mail_log = web::Data::new(mail_log);

    let server = HttpServer::new(move || {
        // App is where your application logic lives: routing, middlewares, request handler, etc
        App::new()
            // 'wrap' method adds a middleware to the App. This specific middleware provide incoming
            // request logger
            .wrap(TracingLogger::default())
            // The form is posted from the portfolio pages, which may be served from another origin
            .wrap(
                DefaultHeaders::new()
                    .add(("Access-Control-Allow-Origin", "*"))
                    .add(("Access-Control-Allow-Methods", "POST"))
                    .add(("Access-Control-Allow-Headers", "Content-Type")),
            )
            .route("/health_check", web::get().to(health_check))
            .service(
                web::resource("/contact")
                    .app_data(
                        web::FormConfig::default()
                            .limit(form_limit)
                            .error_handler(form_error_handler),
                    )
                    .route(web::post().to(handle_contact_form))
                    .default_service(web::to(method_not_allowed)),
            )
            .app_data(email_client.clone())
            .app_data(recipients.clone())
            .app_data(mail_log.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
