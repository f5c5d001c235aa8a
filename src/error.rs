use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")] Database(#[from] sea_orm::DbErr),

    #[error("Upstream plan service unavailable: {0}")] UpstreamUnavailable(String),

    #[error("No plans found for the requested ZIP code")]
    NoPlansFound,

    #[error("Plan record {index} failed validation: {message}")] Validation {
        index: usize,
        message: String,
    },

    #[error("{0} not found")] NotFound(String),

    #[error("Email provider error: {0}")] Provider(String),

    #[error("Invalid input: {0}")] InvalidInput(String),

    #[error("Configuration error: {0}")] Config(String),

    #[error("Internal error: {0}")] Internal(String),
}

/// Wire shape for every error response: non-2xx status plus `{ "error": "..." }`.
#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl AppError {
    /// Stable code for server-side logs. Clients only see the message.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::UpstreamUnavailable(_) => "UPSTREAM_UNAVAILABLE",
            AppError::NoPlansFound => "NO_PLANS_FOUND",
            AppError::Validation { .. } => "VALIDATION_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Provider(_) => "PROVIDER_ERROR",
            AppError::InvalidInput(_) => "INVALID_INPUT",
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            AppError::NoPlansFound | AppError::NotFound(_) => axum::http::StatusCode::NOT_FOUND,
            AppError::InvalidInput(_) => axum::http::StatusCode::BAD_REQUEST,
            | AppError::UpstreamUnavailable(_)
            | AppError::Validation { .. }
            | AppError::Provider(_) => {
                axum::http::StatusCode::BAD_GATEWAY
            }
            _ => axum::http::StatusCode::INTERNAL_SERVER_ERROR,
        };

        tracing::error!(code = self.code(), "request failed: {}", self);

        let response = ErrorResponse { error: self.to_string() };
        (status, axum::Json(response)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
