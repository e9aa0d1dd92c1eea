use crate::request::Response;
use coffer_core::StoreError;
use serde::Serialize;
use thiserror::Error;

/// Terminal request failure surfaced to the caller as a status code.
///
/// Nothing here is retried; each variant maps to exactly one status. Note the
/// deliberate asymmetry for store faults: a fault during a point fetch or a
/// write is a 500, while the secrets resource collapses a fault during
/// listing into 404 before this type is ever constructed.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("forbidden")]
    Forbidden,
    #[error("not found")]
    NotFound,
    #[error("{0}")]
    Validation(String),
    #[error("method not allowed")]
    MethodNotAllowed,
    #[error("unsupported method: {0}")]
    UnknownMethod(String),
    #[error(transparent)]
    Backend(#[from] StoreError),
}

impl HandlerError {
    pub fn status(&self) -> u16 {
        match self {
            Self::Forbidden => 403,
            Self::NotFound => 404,
            Self::Validation(_) => 400,
            Self::MethodNotAllowed => 405,
            Self::UnknownMethod(_) => 400,
            Self::Backend(_) => 500,
        }
    }

    fn tag(&self) -> &'static str {
        match self {
            Self::Forbidden => "forbidden",
            Self::NotFound => "not_found",
            Self::Validation(_) => "bad_request",
            Self::MethodNotAllowed => "method_not_allowed",
            Self::UnknownMethod(_) => "bad_request",
            Self::Backend(_) => "internal",
        }
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

impl From<HandlerError> for Response {
    fn from(err: HandlerError) -> Self {
        let mut response = Response::with_status(err.status());
        let body = ErrorBody {
            error: err.tag(),
            message: err.to_string(),
        };
        // ErrorBody serialization cannot fail; fall back to the bare tag if
        // it somehow does.
        let payload =
            serde_json::to_string(&body).unwrap_or_else(|_| format!("{{\"error\":\"{}\"}}", body.error));
        response.set_header("Content-Type", "application/json");
        response.set_output(payload);
        response
    }
}
