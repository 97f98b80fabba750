use secrecy::ExposeSecret;

use crate::domain::NewMember;

const HTML_TEMPLATE: &str = include_str!("../views/welcome_email.html");
const TEXT_TEMPLATE: &str = include_str!("../views/welcome_email.txt");

const FALLBACK_DISPLAY_NAME: &str = "Bienvenue";
const FALLBACK_ROLE_LABEL: &str = "Membre";

/// Cosmetic, process-wide details stamped onto every welcome email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branding {
    pub company_name: String,
    pub support_email: Option<String>,
}

impl Branding {
    pub fn new(company_name: String, support_email: Option<String>) -> Self {
        Self {
            company_name,
            support_email: support_email.filter(|email| !email.trim().is_empty()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedEmail {
    pub subject: String,
    pub html: String,
    pub text: String,
}

/// Renders the subject, HTML and plain-text parts of a welcome email.
///
/// Output depends only on its arguments. Values interpolated into the HTML
/// part are escaped; the plain-text part is left as is.
pub fn build_welcome_email(
    member: &NewMember,
    branding: &Branding,
) -> Result<ComposedEmail, tera::Error> {
    let mut ctx = tera::Context::new();
    ctx.insert("company_name", &branding.company_name);
    ctx.insert("support_email", &branding.support_email);
    ctx.insert("display_name", display_name(member.full_name.as_deref()));
    ctx.insert("role_label", &role_label(member.role.as_deref()));
    ctx.insert("email", member.email.as_ref());
    ctx.insert(
        "temporary_password",
        member.temporary_password.expose_secret(),
    );

    Ok(ComposedEmail {
        subject: format!("Bienvenue sur {}", branding.company_name),
        html: tera::Tera::one_off(HTML_TEMPLATE, &ctx, true)?,
        text: tera::Tera::one_off(TEXT_TEMPLATE, &ctx, false)?,
    })
}

fn display_name(full_name: Option<&str>) -> &str {
    match full_name {
        Some(name) if !name.is_empty() => name,
        _ => FALLBACK_DISPLAY_NAME,
    }
}

/// Upper-cases the first character only: `"admin"` -> `"Admin"`, `"aDMIN"` -> `"ADMIN"`.
fn role_label(role: Option<&str>) -> String {
    let mut chars = match role {
        Some(role) if !role.is_empty() => role.chars(),
        _ => return FALLBACK_ROLE_LABEL.to_string(),
    };

    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => FALLBACK_ROLE_LABEL.to_string(),
    }
}
