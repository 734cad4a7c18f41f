use crate::config::ConfigError;
use crate::session::{LoginError, SessionError};
use crate::telemetry::TelemetryError;
use crate::workflows::certificates::CertificateError;
use crate::workflows::partners::PartnerError;
use crate::workflows::profile::ProfileError;
use crate::workflows::references::ReferenceError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Session(SessionError),
    Certificate(CertificateError),
    Profile(ProfileError),
    Partner(PartnerError),
    Reference(ReferenceError),
    NotFound(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Session(SessionError::Login(LoginError::InvalidCredentials))
            | AppError::Session(SessionError::SignedOut) => StatusCode::UNAUTHORIZED,
            AppError::Session(SessionError::ViewUnavailable { .. }) => StatusCode::FORBIDDEN,
            AppError::Session(SessionError::Login(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Certificate(CertificateError::NotFound(_))
            | AppError::Profile(ProfileError::LinkNotFound(_))
            | AppError::Partner(PartnerError::NotFound(_))
            | AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Reference(ReferenceError::QueueExhausted) => StatusCode::CONFLICT,
            AppError::Certificate(CertificateError::Io { .. }) => StatusCode::BAD_REQUEST,
            AppError::Certificate(_)
            | AppError::Profile(_)
            | AppError::Partner(_)
            | AppError::Reference(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Session(err) => write!(f, "{}", err),
            AppError::Certificate(err) => write!(f, "{}", err),
            AppError::Profile(err) => write!(f, "{}", err),
            AppError::Partner(err) => write!(f, "{}", err),
            AppError::Reference(err) => write!(f, "{}", err),
            AppError::NotFound(what) => write!(f, "{} not found", what),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Session(err) => Some(err),
            AppError::Certificate(err) => Some(err),
            AppError::Profile(err) => Some(err),
            AppError::Partner(err) => Some(err),
            AppError::Reference(err) => Some(err),
            AppError::NotFound(_) => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<SessionError> for AppError {
    fn from(value: SessionError) -> Self {
        Self::Session(value)
    }
}

impl From<CertificateError> for AppError {
    fn from(value: CertificateError) -> Self {
        Self::Certificate(value)
    }
}

impl From<ProfileError> for AppError {
    fn from(value: ProfileError) -> Self {
        Self::Profile(value)
    }
}

impl From<PartnerError> for AppError {
    fn from(value: PartnerError) -> Self {
        Self::Partner(value)
    }
}

impl From<ReferenceError> for AppError {
    fn from(value: ReferenceError) -> Self {
        Self::Reference(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserRole;
    use crate::session::View;

    #[test]
    fn workflow_errors_map_to_client_statuses() {
        let cases = [
            (AppError::from(PartnerError::MissingRequiredFields), StatusCode::UNPROCESSABLE_ENTITY),
            (AppError::from(PartnerError::NotFound("p9".into())), StatusCode::NOT_FOUND),
            (AppError::from(ProfileError::MissingUrl), StatusCode::UNPROCESSABLE_ENTITY),
            (AppError::from(ReferenceError::QueueExhausted), StatusCode::CONFLICT),
            (AppError::from(SessionError::SignedOut), StatusCode::UNAUTHORIZED),
            (
                AppError::from(SessionError::Login(LoginError::UniversityDomainRequired)),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                AppError::from(SessionError::ViewUnavailable {
                    role: UserRole::Student,
                    view: View::Partners,
                }),
                StatusCode::FORBIDDEN,
            ),
            (AppError::Io(std::io::Error::other("disk")), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (error, expected) in cases {
            assert_eq!(error.status(), expected, "{error}");
            assert_eq!(error.into_response().status(), expected);
        }
    }

    #[test]
    fn display_keeps_workflow_message() {
        let error = AppError::from(CertificateError::MissingImage);
        assert_eq!(error.to_string(), "an image is required for a new certificate");
    }
}
