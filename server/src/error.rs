use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use error_stack::Report;
use kernel::KernelError;
use serde::Serialize;
use std::process::{ExitCode, Termination};

#[derive(Debug)]
pub struct StackTrace(Report<KernelError>);

impl From<Report<KernelError>> for StackTrace {
    fn from(e: Report<KernelError>) -> Self {
        StackTrace(e)
    }
}

impl Termination for StackTrace {
    fn report(self) -> ExitCode {
        self.0.report()
    }
}

#[derive(Debug)]
pub struct ErrorStatus(Report<KernelError>);

impl From<Report<KernelError>> for ErrorStatus {
    fn from(e: Report<KernelError>) -> Self {
        ErrorStatus(e)
    }
}

/// Malformed input rejected by an extractor.
fn invalid_input<R>(rejection: R, message: &'static str) -> ErrorStatus
where
    R: std::error::Error + Send + Sync + 'static,
{
    let detail = rejection.to_string();
    ErrorStatus(
        Report::new(rejection)
            .change_context(KernelError::Validation)
            .attach_printable(detail)
            .attach_printable(message),
    )
}

impl From<JsonRejection> for ErrorStatus {
    fn from(rejection: JsonRejection) -> Self {
        invalid_input(rejection, "request body is invalid")
    }
}

impl From<PathRejection> for ErrorStatus {
    fn from(rejection: PathRejection) -> Self {
        invalid_input(rejection, "path parameter is invalid")
    }
}

impl From<QueryRejection> for ErrorStatus {
    fn from(rejection: QueryRejection) -> Self {
        invalid_input(rejection, "query parameter is invalid")
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    message: String,
}

impl ErrorStatus {
    fn status(&self) -> StatusCode {
        match self.0.current_context() {
            KernelError::NotFound => StatusCode::NOT_FOUND,
            KernelError::Forbidden => StatusCode::FORBIDDEN,
            KernelError::Unauthenticated => StatusCode::UNAUTHORIZED,
            KernelError::Conflict => StatusCode::BAD_REQUEST,
            KernelError::Validation => StatusCode::UNPROCESSABLE_ENTITY,
            KernelError::Concurrency => StatusCode::CONFLICT,
            KernelError::Timeout => StatusCode::REQUEST_TIMEOUT,
            KernelError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Most recent client-facing attachment, or a generic text for the status.
    /// Server errors never expose their attachments.
    fn message(&self, status: StatusCode) -> String {
        let attached = match status.is_server_error() {
            true => None,
            false => self.0.downcast_ref::<&str>().copied(),
        };
        attached
            .or_else(|| status.canonical_reason())
            .unwrap_or("unexpected error")
            .to_lowercase()
    }
}

impl IntoResponse for ErrorStatus {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{:?}", self.0);
        } else {
            tracing::debug!(%status, "{}", self.0);
        }
        let body = ErrorBody {
            message: self.message(status),
        };
        (status, Json(body)).into_response()
    }
}
