use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::collections::HashMap;
use std::error::Error as StdError;

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[source] anyhow::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict error: {0}")]
    Conflict(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("External service error: {0}")]
    ExternalService(#[source] anyhow::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("An unexpected error occurred: {0}")]
    Unexpected(#[from] anyhow::Error),

    #[error("Validation errors")]
    ValidationErrors(HashMap<String, Vec<String>>),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_)
            | AppError::ValidationErrors(_)
            | AppError::Conflict(_)
            | AppError::UrlParse(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Configuration(_)
            | AppError::ExternalService(_)
            | AppError::Database(_)
            | AppError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let (error_message, errors) = match &self {
            AppError::Database(e) => (format!("Database error: {}", e), None),
            AppError::Validation(msg)
            | AppError::Conflict(msg)
            | AppError::Configuration(msg)
            | AppError::NotFound(msg) => (msg.clone(), None),
            // The outermost context is the caller-facing message
            AppError::ExternalService(e) => (format!("{}", e), None),
            AppError::UrlParse(e) => (format!("Invalid URL: {}", e), None),
            AppError::Unexpected(e) => (format!("An unexpected error occurred: {}", e), None),
            AppError::ValidationErrors(validation_errors) => (
                "Invalid request data".to_string(),
                Some(validation_errors.clone()),
            ),
        };

        tracing::error!(
            error_type = %self,
            error_message = %error_message,
            status_code = %status,
            "Request error"
        );

        if let AppError::Unexpected(e) | AppError::ExternalService(e) = &self {
            let mut source_chain = String::new();
            let mut current_err: Option<&(dyn StdError + 'static)> = e.source();
            while let Some(err) = current_err {
                source_chain.push_str(&format!("\n  Caused by: {}", err));
                current_err = err.source();
            }
            if !source_chain.is_empty() {
                tracing::error!("Error source chain:{}", source_chain);
            }
        }

        let body = match errors {
            Some(validation_errors) => Json(json!({
                "message": error_message,
                "status": status.as_u16(),
                "errors": validation_errors
            })),
            None => Json(json!({
                "message": error_message,
                "status": status.as_u16()
            })),
        };
        (status, body).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => AppError::NotFound("Database record not found".to_string()),
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                AppError::Conflict(db_err.message().to_string())
            }
            _ => AppError::Database(anyhow::Error::new(err).context("SQLx operation failed")),
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        let mut context_parts = Vec::new();

        // reqwest errors carry the request URL, which includes the API key
        if let Some(url) = err.url() {
            context_parts.push(format!("URL: {}", crate::youtube::redacted_url(url)));
        }

        if let Some(status) = err.status() {
            context_parts.push(format!(
                "HTTP {}: {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown Status")
            ));
        }

        let error_type = match &err {
            e if e.is_timeout() => "Request Timeout",
            e if e.is_connect() => "Connection Failed",
            e if e.is_decode() => "Response Decode Failed",
            e if e.is_redirect() => "Redirect Loop or Invalid Redirect",
            e if e.is_request() => "Invalid Request",
            e if e.is_body() => "Request Body Error",
            _ => "Unknown HTTP Error",
        };
        context_parts.push(format!("Type: {}", error_type));

        let context = format!("External HTTP request failed - {}", context_parts.join(", "));

        tracing::error!(
            status = ?err.status(),
            is_timeout = err.is_timeout(),
            is_connect = err.is_connect(),
            is_decode = err.is_decode(),
            "HTTP request failed: {}",
            context
        );

        AppError::ExternalService(anyhow::Error::new(err.without_url()).context(context))
    }
}
