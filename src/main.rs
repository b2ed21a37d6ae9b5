use contact_mailer::config::get_configuration;
use contact_mailer::startup::Application;
use contact_mailer::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let subscriber = get_subscriber(String::from("contact_mailer"), String::from("info"));

    init_subscriber(subscriber)?;

    let config = get_configuration()?;
    let application = Application::build(config).await?;

    application.run_until_stop().await?;

    Ok(())
}
