//! Services composing several repositories under one transaction.

use courier_core::error::CoreError;

pub mod template_service;

pub use template_service::TemplateService;

/// Failure of a service operation: either a domain error or a storage error.
///
/// Either way, any transaction the operation opened has been rolled back.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
