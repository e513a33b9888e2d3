//! Error types for the reporting service.

/// Domain-level errors (business rule violations).
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// Repository-level errors (data access failures).
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Conflict: {0}")]
    Conflict(String),
}

/// Application-level errors (for HTTP responses).
///
/// `NotFound` is the only kind surfaced to clients verbatim; every other
/// variant is reported as a generic failure.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Builds the NotFound fault for a missing entity looked up by id.
    pub fn entity_not_found(entity: &str, id: impl std::fmt::Display) -> Self {
        AppError::NotFound(format!("{} {} not found", entity, id))
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Database(e) => AppError::Internal(e),
            RepoError::Conflict(e) => AppError::BadRequest(e),
        }
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::ValidationError(msg) => AppError::BadRequest(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_not_found_message() {
        let err = AppError::entity_not_found("Customer", 42);
        assert!(matches!(&err, AppError::NotFound(msg) if msg == "Customer 42 not found"));
        assert_eq!(err.to_string(), "Customer 42 not found");
    }

    #[test]
    fn test_repo_error_mapping() {
        assert!(matches!(
            AppError::from(RepoError::Database("boom".into())),
            AppError::Internal(_)
        ));
        assert!(matches!(
            AppError::from(RepoError::Conflict("dup".into())),
            AppError::BadRequest(_)
        ));
        assert!(matches!(
            AppError::from(DomainError::ValidationError("x".into())),
            AppError::BadRequest(msg) if msg == "x"
        ));
    }
}
