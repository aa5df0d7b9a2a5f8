use thiserror::Error;

/// Result type for mapping repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;

/// Rejected user input. Permanent: the caller must fix the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidInput {
    #[error("the short URL can't be empty")]
    EmptyShortUrl,
    #[error("the long URL can't be empty")]
    EmptyLongUrl,
    #[error("the long URL needs to be a valid URL")]
    MalformedLongUrl,
}

/// Failures reported by the underlying store engine.
///
/// Backend messages are carried as-is so callers see exactly what the
/// engine reported.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("storage transaction failed: {0}")]
    Transaction(String),
    #[error("storage table error: {0}")]
    Table(String),
    #[error("storage commit failed: {0}")]
    Commit(String),
    #[error("key too large")]
    KeyTooLarge { size: usize, max: usize },
    #[error("storage operation failed: {0}")]
    Operation(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error(transparent)]
    InvalidInput(#[from] InvalidInput),
    /// Carries the short URL that is already taken.
    #[error("there's already an shortened URL with that URL")]
    Conflict(String),
    #[error("the shortened URL wasn't found in the DB")]
    NotFound,
    /// The named bucket is missing, i.e. the store was never initialized.
    #[error("the bucket {0} doesn't exist")]
    PreconditionFailed(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_input_messages() {
        assert_eq!(
            RepositoryError::from(InvalidInput::EmptyShortUrl).to_string(),
            "the short URL can't be empty"
        );
        assert_eq!(
            RepositoryError::from(InvalidInput::EmptyLongUrl).to_string(),
            "the long URL can't be empty"
        );
        assert_eq!(
            RepositoryError::from(InvalidInput::MalformedLongUrl).to_string(),
            "the long URL needs to be a valid URL"
        );
    }

    #[test]
    fn storage_errors_are_transparent() {
        let err = RepositoryError::from(StorageError::KeyTooLarge {
            size: 40_000,
            max: 32_768,
        });
        assert_eq!(err.to_string(), "key too large");
    }

    #[test]
    fn conflict_message_does_not_echo_the_key() {
        let err = RepositoryError::Conflict("git".to_string());
        assert_eq!(
            err.to_string(),
            "there's already an shortened URL with that URL"
        );
    }

    #[test]
    fn precondition_names_the_bucket() {
        let err = RepositoryError::PreconditionFailed("urls".to_string());
        assert_eq!(err.to_string(), "the bucket urls doesn't exist");
    }
}
