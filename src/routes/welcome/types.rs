use crate::mailer::Delivery;

pub const ACCEPTED_MESSAGE: &str = "Courriel de bienvenue en file d'attente.";
pub const MISSING_FIELDS_MESSAGE: &str =
    "Champs requis manquants : email et temporaryPassword sont obligatoires.";
pub const INVALID_EMAIL_MESSAGE: &str = "Adresse e-mail de destination invalide.";
pub const SEND_FAILED_MESSAGE: &str = "Impossible d'envoyer le courriel de bienvenue.";

#[derive(serde::Serialize)]
pub struct Accepted {
    pub message: &'static str,
    pub result: Delivery,
}

#[derive(serde::Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}
