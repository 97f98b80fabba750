use welcome_mailer::{
    configuration::get_configuration,
    startup::Application,
    telemetry::{get_subscriber, init_subscriber},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = get_subscriber("welcome-mailer".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    let config = get_configuration()?;

    let outcome = Application::build(config).await?.run_until_stopped().await;
    if let Err(e) = &outcome {
        tracing::error!(
            error.cause_chain = ?e,
            error.message = %e,
            "Welcome email service failed"
        );
    }

    Ok(outcome?)
}
