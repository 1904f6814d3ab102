use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use folio_core::FolioError;
use tracing::{debug, error};

use crate::components::page::error_page;

/// An error from a page handler. Rendered as a small HTML page; the message
/// is only logged, never shown.
#[derive(Debug)]
pub struct ApiError {
    code: StatusCode,
    message: Option<String>,
}

pub type ApiResult<T> = Result<T, ApiError>;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Some(msg) = &self.message {
            if self.code.is_server_error() {
                error!("{}: {}", self.code, msg);
            } else {
                debug!("{}: {}", self.code, msg);
            }
        }

        (self.code, error_page(self.code)).into_response()
    }
}

impl From<FolioError> for ApiError {
    fn from(err: FolioError) -> Self {
        Self::server_error().message(err.to_string())
    }
}

impl ApiError {
    /// Sets the message on the error.
    pub fn message<S: Into<String>>(mut self, msg: S) -> Self {
        self.message = Some(msg.into());
        self
    }

    pub fn not_found() -> Self {
        Self {
            code: StatusCode::NOT_FOUND,
            message: None,
        }
    }

    pub fn server_error() -> Self {
        Self {
            code: StatusCode::INTERNAL_SERVER_ERROR,
            message: None,
        }
    }
}

/// Router fallback for unknown paths.
pub async fn not_found_handler() -> ApiError {
    ApiError::not_found()
}
