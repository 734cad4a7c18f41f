//! Certificates the student uploads to their profile.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use base64::prelude::*;
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use tracing::{debug, info};

use crate::domain::{next_record_id, Certificate, StudentPatch};
use crate::session::StudentStore;

/// Form contents for creating or editing a certificate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CertificateDraft {
    pub name: String,
    pub verification_number: String,
    pub url: String,
    /// Remote URL or `data:` URL; blank keeps the stored image when editing.
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

#[derive(Debug, thiserror::Error)]
pub enum CertificateError {
    #[error("certificate name, verification number, and url are required")]
    MissingRequiredFields,
    #[error("an image is required for a new certificate")]
    MissingImage,
    #[error("certificate {0} not found")]
    NotFound(String),
    #[error("{path} is not an image ({mime})")]
    NotAnImage { path: PathBuf, mime: String },
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Certificate list operations over the session's student record.
#[derive(Debug, Clone)]
pub struct CertificateService {
    store: Arc<StudentStore>,
}

impl CertificateService {
    pub fn new(store: Arc<StudentStore>) -> Self {
        Self { store }
    }

    pub fn list(&self) -> Vec<Certificate> {
        self.store.snapshot().certificates.clone()
    }

    /// Append a new certificate, or update `editing` in place.
    pub fn save(
        &self,
        draft: CertificateDraft,
        editing: Option<&str>,
    ) -> Result<Certificate, CertificateError> {
        if draft.name.trim().is_empty()
            || draft.verification_number.trim().is_empty()
            || draft.url.trim().is_empty()
        {
            return Err(CertificateError::MissingRequiredFields);
        }
        if editing.is_none() && draft.image.trim().is_empty() {
            return Err(CertificateError::MissingImage);
        }

        let saved = self.store.update(|student| {
            let mut certificates = student.certificates.clone();
            let saved = match editing {
                Some(id) => {
                    let Some(existing) = certificates.iter_mut().find(|cert| cert.id == id) else {
                        return (
                            StudentPatch::default(),
                            Err(CertificateError::NotFound(id.to_string())),
                        );
                    };
                    let image = if draft.image.trim().is_empty() {
                        existing.image.clone()
                    } else {
                        draft.image
                    };
                    *existing = Certificate {
                        id: existing.id.clone(),
                        name: draft.name,
                        verification_number: draft.verification_number,
                        url: draft.url,
                        image,
                        date: draft.date.unwrap_or(existing.date),
                    };
                    existing.clone()
                }
                None => {
                    let certificate = Certificate {
                        id: next_record_id("cert"),
                        name: draft.name,
                        verification_number: draft.verification_number,
                        url: draft.url,
                        image: draft.image,
                        date: draft.date.unwrap_or_else(|| Local::now().date_naive()),
                    };
                    certificates.push(certificate.clone());
                    certificate
                }
            };
            (
                StudentPatch {
                    certificates: Some(certificates),
                    ..StudentPatch::default()
                },
                Ok(saved),
            )
        })?;

        info!(certificate_id = %saved.id, edited = editing.is_some(), "certificate saved");
        Ok(saved)
    }

    pub fn remove(&self, id: &str) -> Result<Certificate, CertificateError> {
        self.store.update(|student| {
            let Some(index) = student.certificates.iter().position(|cert| cert.id == id) else {
                return (
                    StudentPatch::default(),
                    Err(CertificateError::NotFound(id.to_string())),
                );
            };
            let mut certificates = student.certificates.clone();
            let removed = certificates.remove(index);
            (
                StudentPatch {
                    certificates: Some(certificates),
                    ..StudentPatch::default()
                },
                Ok(removed),
            )
        })
    }
}

/// Read an image file into a `data:<mime>;base64,<payload>` URL.
pub async fn encode_image_preview(path: impl AsRef<Path>) -> Result<String, CertificateError> {
    let path = path.as_ref();
    let guessed = mime_guess::from_path(path).first_or_octet_stream();
    if guessed.type_() != mime::IMAGE {
        return Err(CertificateError::NotAnImage {
            path: path.to_path_buf(),
            mime: guessed.to_string(),
        });
    }

    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| CertificateError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    debug!(path = %path.display(), bytes = bytes.len(), "encoded image preview");
    Ok(format!("data:{guessed};base64,{}", BASE64_STANDARD.encode(bytes)))
}
