mod health_check;
mod helpers;
mod not_found;
mod welcome;

pub use health_check::health_check;
pub use helpers::{error_chain_fmt, error_chain_message, json_error_handler};
pub use not_found::not_found;
pub use welcome::send_welcome_email;
