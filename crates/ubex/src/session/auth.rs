use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::UserRole;

const UNIVERSITY_DOMAIN: &str = "@unec.edu.az";

/// Registered account allowed to sign in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub email: String,
    pub password: String,
    pub role: UserRole,
}

/// Sign-in attempt for a chosen role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub role: UserRole,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginError {
    #[error("email and password are both required")]
    MissingCredentials,
    #[error("sign-in requires a university (@unec.edu.az) email address")]
    UniversityDomainRequired,
    #[error("sign-in requires an assigned company (@company.unex.az) email address")]
    PartnerDomainRequired,
    #[error("email or password is incorrect")]
    InvalidCredentials,
}

fn partner_email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[a-z0-9._%+-]+@[a-z0-9.-]+\.unex\.az$").expect("partner email pattern")
    })
}

/// Check the mailbox domain for the role, then match a registered account.
pub fn authenticate(credentials: &Credentials, users: &[AuthUser]) -> Result<UserRole, LoginError> {
    let email = credentials.email.trim().to_lowercase();
    if email.is_empty() || credentials.password.is_empty() {
        return Err(LoginError::MissingCredentials);
    }

    if credentials.role.is_university_member() {
        if !email.ends_with(UNIVERSITY_DOMAIN) {
            return Err(LoginError::UniversityDomainRequired);
        }
    } else if !partner_email_pattern().is_match(&email) {
        return Err(LoginError::PartnerDomainRequired);
    }

    users
        .iter()
        .find(|user| {
            user.email.to_lowercase() == email
                && user.password == credentials.password
                && user.role == credentials.role
        })
        .map(|user| user.role)
        .ok_or(LoginError::InvalidCredentials)
}

/// First registered account for `role`, for one-click demo sign-in.
pub fn demo_credentials(role: UserRole, users: &[AuthUser]) -> Option<Credentials> {
    users
        .iter()
        .find(|user| user.role == role)
        .map(|user| Credentials {
            role,
            email: user.email.clone(),
            password: user.password.clone(),
        })
}
