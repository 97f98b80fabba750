mod types;
mod welcome_handler;

pub use types::{ErrorBody, MISSING_FIELDS_MESSAGE};
pub use welcome_handler::send_welcome_email;
