mod new_member;
mod recipient_email;
mod welcome_request;

pub use new_member::{NewMember, NewMemberError};
pub use recipient_email::RecipientEmail;
pub use welcome_request::WelcomeRequest;
