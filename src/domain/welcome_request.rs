use secrecy::SecretString;

/// Payload of a welcome request as received from the caller.
///
/// Every field is optional at this stage: a missing email or temporary
/// password is reported by the mailer as a validation failure, not as a
/// deserialization error.
#[derive(serde::Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct WelcomeRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub temporary_password: Option<SecretString>,
}
