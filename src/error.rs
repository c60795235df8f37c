//! Errors surfaced to callers of the note service.

use crate::api::Operation;

/// Failure of a note service operation.
///
/// Transport errors never cross this boundary: only the kind of operation
/// that failed is kept.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
  /// Caller-supplied data violated a precondition; no request was sent
  #[error("validation error: {0}")]
  Validation(String),

  /// The remote exchange did not complete successfully
  #[error("operation failed: {0}")]
  OperationFailed(Operation),
}

impl ApiError {
  pub(crate) fn validation(reason: impl Into<String>) -> Self {
    Self::Validation(reason.into())
  }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
