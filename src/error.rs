use thiserror::Error;
use uuid::Uuid;

use crate::core::field_validator::Rejection;
use crate::core::reference::RefParseError;

pub type CellmapResult<T> = Result<T, CellmapError>;

#[derive(Error, Debug)]
pub enum CellmapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Reference error: {0}")]
    Reference(#[from] RefParseError),

    #[error("Field rejected: {0}")]
    Rejected(#[from] Rejection),

    #[error("Template not found: {0}")]
    TemplateNotFound(Uuid),

    #[error("Field not found: {0}")]
    FieldNotFound(Uuid),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Server error: {0}")]
    Server(String),
}
