pub mod configuration;
pub mod domain;
pub mod email_client;
pub mod mailer;
pub mod routes;
pub mod startup;
pub mod telemetry;
pub mod welcome_email;
