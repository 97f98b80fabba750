use once_cell::sync::Lazy;
use secrecy::SecretString;
use welcome_mailer::{
    configuration::{Settings, get_configuration},
    startup::Application,
    telemetry::{get_subscriber, init_subscriber},
};
use wiremock::MockServer;

static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_subscriber(subscriber);
    }
});

pub const SENDER_EMAIL: &str = "noreply@celebration.test";

pub struct TestApp {
    pub address: String,
    pub email_server: MockServer,
    pub api_client: reqwest::Client,
}

impl TestApp {
    pub async fn post_welcome(&self, body: &serde_json::Value) -> reqwest::Response {
        self.api_client
            .post(format!("{}/email/welcome", &self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.api_client
            .get(format!("{}{}", &self.address, path))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    /// JSON body of the n-th request the provider received.
    pub async fn sent_email(&self, n: usize) -> serde_json::Value {
        let requests = self.email_server.received_requests().await.unwrap();
        serde_json::from_slice(&requests[n].body).unwrap()
    }
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(|_| {}).await
}

pub async fn spawn_app_with(customize: impl FnOnce(&mut Settings)) -> TestApp {
    Lazy::force(&TRACING);

    let email_server = MockServer::start().await;

    let config = {
        let mut c = get_configuration().expect("Failed to read configuration");
        c.app.port = 0;
        c.email_client.base_url = email_server.uri();
        c.email_client.api_key = Some(SecretString::from("SG.test-key".to_string()));
        c.email_client.sender_email = Some(SENDER_EMAIL.into());
        customize(&mut c);
        c
    };

    let application = Application::build(config)
        .await
        .expect("Failed to build application.");
    let port = application.get_port();
    let _ = tokio::spawn(application.run_until_stopped());

    TestApp {
        address: format!("http://127.0.0.1:{port}"),
        email_server,
        api_client: reqwest::Client::new(),
    }
}
