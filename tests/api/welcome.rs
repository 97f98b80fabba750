use welcome_mailer::configuration::Environment;
use wiremock::{
    Mock, ResponseTemplate,
    matchers::{any, header, method, path},
};

use crate::helpers::{SENDER_EMAIL, spawn_app, spawn_app_with};

fn valid_body() -> serde_json::Value {
    serde_json::json!({
        "email": "a@b.com",
        "fullName": "Jane",
        "role": "member",
        "temporaryPassword": "XZ12"
    })
}

#[tokio::test]
async fn welcome_returns_202_for_valid_payload() {
    let app = spawn_app().await;

    Mock::given(path("/v3/mail/send"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let response = app.post_welcome(&valid_body()).await;

    assert_eq!(202, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Courriel de bienvenue en file d'attente.");
    assert_eq!(body["result"], serde_json::json!({ "delivered": true }));
}

#[tokio::test]
async fn welcome_sends_the_composed_email_to_the_provider() {
    let app = spawn_app_with(|c| {
        c.email_client.company_name = "Acme".into();
        c.email_client.support_email = Some("support@acme.test".into());
    })
    .await;

    Mock::given(path("/v3/mail/send"))
        .and(method("POST"))
        .and(header("Authorization", "Bearer SG.test-key"))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&app.email_server)
        .await;

    app.post_welcome(&valid_body()).await;

    let sent = app.sent_email(0).await;
    assert_eq!(sent["personalizations"][0]["to"][0]["email"], "a@b.com");
    assert_eq!(sent["from"]["email"], SENDER_EMAIL);
    assert_eq!(sent["subject"], "Bienvenue sur Acme");

    let text = sent["content"][0]["value"].as_str().unwrap();
    let html = sent["content"][1]["value"].as_str().unwrap();
    assert!(text.contains("- Code d'accès: XZ12"));
    assert!(html.contains("a@b.com"));
    assert!(html.contains("XZ12"));
    assert!(html.contains("mailto:support@acme.test"));
}

#[tokio::test]
async fn welcome_returns_400_when_required_fields_are_missing() {
    let app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(202))
        .expect(0)
        .mount(&app.email_server)
        .await;

    let test_cases = vec![
        (serde_json::json!({ "temporaryPassword": "XZ12" }), "missing the email"),
        (serde_json::json!({ "email": "a@b.com" }), "missing the password"),
        (
            serde_json::json!({ "email": "", "temporaryPassword": "" }),
            "empty required fields",
        ),
        (serde_json::json!({}), "an empty object"),
    ];

    for (body, description) in test_cases {
        let response = app.post_welcome(&body).await;

        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not fail with 400 Bad Request when the payload was {}.",
            description
        );
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(
            body["error"],
            "Champs requis manquants : email et temporaryPassword sont obligatoires."
        );
    }
}

#[tokio::test]
async fn welcome_returns_400_for_missing_fields_even_without_api_key() {
    let app = spawn_app_with(|c| c.email_client.api_key = None).await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(202))
        .expect(0)
        .mount(&app.email_server)
        .await;

    let response = app.post_welcome(&serde_json::json!({})).await;

    assert_eq!(400, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body["error"],
        "Champs requis manquants : email et temporaryPassword sont obligatoires."
    );
}

#[tokio::test]
async fn welcome_returns_400_with_its_own_message_for_an_invalid_email() {
    let app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(202))
        .expect(0)
        .mount(&app.email_server)
        .await;

    let response = app
        .post_welcome(&serde_json::json!({
            "email": "not-an-email",
            "temporaryPassword": "XZ12"
        }))
        .await;

    assert_eq!(400, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Adresse e-mail de destination invalide.");
}

#[tokio::test]
async fn welcome_returns_400_for_a_malformed_body() {
    let app = spawn_app().await;

    let response = app
        .api_client
        .post(format!("{}/email/welcome", &app.address))
        .header("Content-Type", "application/json")
        .body("{ not json")
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(400, response.status().as_u16());
}

#[tokio::test]
async fn welcome_returns_500_with_details_when_provider_fails_locally() {
    let app = spawn_app_with(|c| c.app.environment = Environment::Local).await;

    Mock::given(path("/v3/mail/send"))
        .respond_with(ResponseTemplate::new(500).set_body_string("provider down"))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let response = app.post_welcome(&valid_body()).await;

    assert_eq!(500, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Impossible d'envoyer le courriel de bienvenue.");
    assert!(body["details"].as_str().unwrap().contains("provider down"));
}

#[tokio::test]
async fn welcome_hides_failure_details_in_production() {
    let app = spawn_app_with(|c| c.app.environment = Environment::Production).await;

    Mock::given(path("/v3/mail/send"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let response = app.post_welcome(&valid_body()).await;

    assert_eq!(500, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body.get("details").is_none());
}

#[tokio::test]
async fn welcome_fails_without_calling_the_provider_when_api_key_is_missing() {
    let app = spawn_app_with(|c| {
        c.app.environment = Environment::Local;
        c.email_client.api_key = None;
    })
    .await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(202))
        .expect(0)
        .mount(&app.email_server)
        .await;

    let response = app.post_welcome(&valid_body()).await;

    assert_eq!(500, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert!(
        body["details"]
            .as_str()
            .unwrap()
            .contains("Missing required environment configuration")
    );
}
