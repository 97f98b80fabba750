use actix_web::{HttpResponse, web};

use super::types::{
    ACCEPTED_MESSAGE, Accepted, ErrorBody, INVALID_EMAIL_MESSAGE, MISSING_FIELDS_MESSAGE,
    SEND_FAILED_MESSAGE,
};
use crate::{
    configuration::Environment,
    domain::{NewMember, NewMemberError, WelcomeRequest},
    email_client::ProviderConnector,
    mailer::{WelcomeEmailError, WelcomeMailer},
    routes::error_chain_message,
};

#[tracing::instrument(name = "Welcome email request", skip(body, mailer, environment))]
pub async fn send_welcome_email<C: ProviderConnector + 'static>(
    body: web::Json<WelcomeRequest>,
    mailer: web::Data<WelcomeMailer<C>>,
    environment: web::Data<Environment>,
) -> HttpResponse {
    let request = body.into_inner();

    // Caller mistakes are reported as 400 whatever the server configuration.
    let validated: Result<NewMember, NewMemberError> = request.clone().try_into();
    if let Err(e) = validated {
        return bad_request(e);
    }

    match mailer.send_welcome_email(request).await {
        Ok(delivery) => HttpResponse::Accepted().json(Accepted {
            message: ACCEPTED_MESSAGE,
            result: delivery,
        }),
        Err(WelcomeEmailError::ValidationError(e)) => bad_request(e),
        Err(e) => {
            tracing::error!(
                error.cause_chain = ?e,
                error.message = %e,
                "Failed to send the welcome email"
            );
            let details = match environment.get_ref() {
                Environment::Local => Some(error_chain_message(&e)),
                Environment::Production => None,
            };
            HttpResponse::InternalServerError().json(ErrorBody {
                error: SEND_FAILED_MESSAGE,
                details,
            })
        }
    }
}

fn bad_request(e: NewMemberError) -> HttpResponse {
    let error = match e {
        NewMemberError::MissingFields => MISSING_FIELDS_MESSAGE,
        NewMemberError::InvalidEmail(_) => INVALID_EMAIL_MESSAGE,
    };
    HttpResponse::BadRequest().json(ErrorBody {
        error,
        details: Some(e.to_string()),
    })
}
