use axum::http::StatusCode;
use thiserror::Error;

/// Errors surfaced by request handlers and startup.
///
/// The `Display` output is what the user sees, so storage errors are shown
/// verbatim.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Auth(String),

    #[error("{0}")]
    Database(#[from] sqlx::Error),

    #[error("{0}")]
    Crypto(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Auth(_) => StatusCode::UNAUTHORIZED,
            AppError::Database(_)
            | AppError::Crypto(_)
            | AppError::Config(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<sqlx::migrate::MigrateError> for AppError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        AppError::Internal(format!("Migration failed: {}", err))
    }
}

// Raw error responses; form handlers render their own page instead.
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        if let AppError::Database(ref err) = self {
            tracing::error!("❌ Database error: {}", err);
        }
        (self.status_code(), self.to_string()).into_response()
    }
}
