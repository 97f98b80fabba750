use std::net::TcpListener;

use actix_cors::Cors;
use actix_web::dev::Server;
use actix_web::{App, HttpServer, web};
use tracing_actix_web::TracingLogger;

use crate::configuration::{Environment, Settings};
use crate::email_client::ProviderConnector;
use crate::mailer::WelcomeMailer;
use crate::routes::{health_check, json_error_handler, not_found, send_welcome_email};

pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    pub async fn build(config: Settings) -> Result<Self, anyhow::Error> {
        if !config.email_client.has_api_key() {
            tracing::warn!(
                "Email provider API key is not configured. Sending welcome emails will fail."
            );
        }

        let mailer = WelcomeMailer::new(
            config.email_client.credentials(),
            config.email_client.branding(),
            config.email_client.connector()?,
        );

        let address = format!("{}:{}", config.app.host, config.app.port);
        let listener = TcpListener::bind(address)?;
        let port = listener.local_addr()?.port();

        let allowed_origins = config.cors.allowed_origins();
        if allowed_origins.is_empty() {
            tracing::info!("CORS allows any origin");
        } else {
            tracing::info!(origins = ?allowed_origins, "CORS restricted to configured origins");
        }

        let server = run(listener, mailer, config.app.environment, allowed_origins)?;
        tracing::info!(port, "Welcome email service is listening");

        Ok(Self { port, server })
    }

    pub fn get_port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

pub fn run<C: ProviderConnector>(
    listener: TcpListener,
    mailer: WelcomeMailer<C>,
    environment: Environment,
    allowed_origins: Vec<String>,
) -> Result<Server, std::io::Error> {
    let mailer = web::Data::new(mailer);
    let environment = web::Data::new(environment);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(cors(&allowed_origins))
            .wrap(TracingLogger::default())
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .route("/health", web::get().to(health_check))
            .route("/email/welcome", web::post().to(send_welcome_email::<C>))
            .default_service(web::to(not_found))
            .app_data(mailer.clone())
            .app_data(environment.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}

fn cors(allowed_origins: &[String]) -> Cors {
    let cors = if allowed_origins.is_empty() {
        Cors::default().allow_any_origin()
    } else {
        allowed_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
    };

    cors.allow_any_method().allow_any_header()
}
