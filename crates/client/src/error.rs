//! Controller error model.

use thiserror::Error;

use stockwatch_core::DomainError;
use stockwatch_infra::StoreError;

/// Why a controller operation was abandoned.
///
/// By the time one of these is returned the user has already been told; the
/// value is for logging and tests.
#[derive(Debug, Error)]
pub enum ControllerError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ControllerError {
    pub fn domain(&self) -> Option<&DomainError> {
        match self {
            ControllerError::Domain(e) => Some(e),
            ControllerError::Store(_) => None,
        }
    }
}
