use std::error::Error;

use actix_web::{HttpRequest, HttpResponse, error::InternalError, error::JsonPayloadError};

use super::welcome::{ErrorBody, MISSING_FIELDS_MESSAGE};

pub fn error_chain_fmt(e: &impl Error, f: &mut std::fmt::Formatter) -> std::fmt::Result {
    writeln!(f, "{e}\n")?;
    let mut current = e.source();

    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{cause}")?;
        current = cause.source();
    }

    Ok(())
}

/// Display of an error followed by each of its causes, on one line.
pub fn error_chain_message(e: &impl Error) -> String {
    let mut message = e.to_string();
    let mut current = e.source();

    while let Some(cause) = current {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        current = cause.source();
    }

    message
}

/// Turns an unreadable JSON body into the same 400 payload as a missing field.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let response = HttpResponse::BadRequest().json(ErrorBody {
        error: MISSING_FIELDS_MESSAGE,
        details: Some(err.to_string()),
    });
    InternalError::from_response(err, response).into()
}
