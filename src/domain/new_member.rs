use secrecy::{ExposeSecret, SecretString};

use super::{RecipientEmail, WelcomeRequest};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum NewMemberError {
    #[error("missing required recipient fields: email and temporaryPassword")]
    MissingFields,
    #[error("{0}")]
    InvalidEmail(String),
}

/// A welcome request whose required fields are present and well formed.
#[derive(Debug, Clone)]
pub struct NewMember {
    pub email: RecipientEmail,
    pub full_name: Option<String>,
    pub role: Option<String>,
    pub temporary_password: SecretString,
}

impl NewMember {
    pub fn parse(request: WelcomeRequest) -> Result<Self, NewMemberError> {
        let WelcomeRequest {
            email,
            full_name,
            role,
            temporary_password,
        } = request;

        let email = email.filter(|email| !email.trim().is_empty());
        let temporary_password =
            temporary_password.filter(|password| !password.expose_secret().trim().is_empty());

        let (Some(email), Some(temporary_password)) = (email, temporary_password) else {
            return Err(NewMemberError::MissingFields);
        };

        Ok(Self {
            email: RecipientEmail::parse(email).map_err(NewMemberError::InvalidEmail)?,
            full_name,
            role,
            temporary_password,
        })
    }
}

impl TryFrom<WelcomeRequest> for NewMember {
    type Error = NewMemberError;

    fn try_from(value: WelcomeRequest) -> Result<Self, Self::Error> {
        NewMember::parse(value)
    }
}
