use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::{debug, error, warn};
use urlshortener_core::RepositoryError;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("request task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
    #[error("the long URL can't be used as a redirect target: {0}")]
    Location(#[from] axum::http::header::InvalidHeaderValue),
}

impl AppError {
    /// Every repository error is the client's to fix; a crashed request
    /// task or an unsendable stored URL is a server fault.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Repository(_) => StatusCode::BAD_REQUEST,
            AppError::Task(_) | AppError::Location(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Repository(RepositoryError::Storage(err)) => {
                warn!(error = %err, "storage failure while handling request")
            }
            AppError::Repository(err) => debug!(error = %err, "rejected request"),
            AppError::Task(err) => error!(error = %err, "request task failed"),
            AppError::Location(err) => error!(error = %err, "stored URL is not a valid header value"),
        }

        let body = format!("There was an error processing your request: {self}\n");
        (self.status(), body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use urlshortener_core::{InvalidInput, StorageError};

    async fn body_of(err: AppError) -> (StatusCode, String) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn repository_errors_are_bad_requests() {
        let (status, body) = body_of(RepositoryError::NotFound.into()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            "There was an error processing your request: the shortened URL wasn't found in the DB\n"
        );
    }

    #[tokio::test]
    async fn invalid_input_message_is_rendered() {
        let err = AppError::from(RepositoryError::from(InvalidInput::EmptyShortUrl));
        let (status, body) = body_of(err).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            "There was an error processing your request: the short URL can't be empty\n"
        );
    }

    #[tokio::test]
    async fn storage_errors_are_bad_requests_too() {
        let err = AppError::from(RepositoryError::from(StorageError::KeyTooLarge {
            size: 40_000,
            max: 32_768,
        }));
        let (status, body) = body_of(err).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "There was an error processing your request: key too large\n");
    }

    #[tokio::test]
    async fn invalid_redirect_targets_are_server_errors() {
        let header_err = axum::http::HeaderValue::try_from("a\u{1}b").unwrap_err();
        let (status, body) = body_of(AppError::from(header_err)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.starts_with(
            "There was an error processing your request: the long URL can't be used as a redirect target"
        ));
    }

    #[tokio::test]
    async fn panicked_tasks_are_server_errors() {
        let join_err = tokio::task::spawn_blocking(|| -> u8 { panic!("boom") })
            .await
            .unwrap_err();
        let (status, body) = body_of(AppError::from(join_err)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.starts_with("There was an error processing your request: request task failed"));
    }
}
