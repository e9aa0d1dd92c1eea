use crate::error::HandlerError;
use crate::request::{Body, Request, Response};
use crate::telemetry::request_span;
use std::sync::Arc;
use tracing::warn;
use uuid::Uuid;

const DEFAULT_CTYPE: &str = "text/html; charset=utf-8";

/// The closed set of verbs a resource can handle.
///
/// Dispatch is a finite match over this enum, never a name lookup, so a
/// request can only ever reach a designated handler method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Get,
    Put,
}

impl Verb {
    /// Parse a method token; an empty token defaults to GET.
    pub fn parse(method: &str) -> Result<Self, HandlerError> {
        match method {
            "" | "GET" => Ok(Self::Get),
            "PUT" => Ok(Self::Put),
            other => Err(HandlerError::UnknownMethod(other.to_string())),
        }
    }
}

/// A request handler bound to one resource.
///
/// Handlers mutate the response record and may additionally return a body for
/// the dispatcher to attach and measure.
pub trait Resource: Send + Sync {
    fn get(&self, request: &Request, response: &mut Response)
        -> Result<Option<Body>, HandlerError>;

    fn put(&self, request: &Request, response: &mut Response)
        -> Result<Option<Body>, HandlerError>;
}

/// Maps a request's verb onto its resource handler and normalizes the
/// response headers. Never touches authorization or storage.
pub struct Dispatcher {
    resource: Arc<dyn Resource>,
}

impl Dispatcher {
    pub fn new(resource: Arc<dyn Resource>) -> Self {
        Self { resource }
    }

    /// Dispatch one request, converting any handler failure into its
    /// status-coded error response.
    pub fn handle(&self, request: &Request) -> Response {
        self.dispatch(request).unwrap_or_else(|err| {
            warn!(method = %request.method, status = err.status(), %err, "request failed");
            Response::from(err)
        })
    }

    /// Dispatch one request, leaving failures to the caller.
    pub fn dispatch(&self, request: &Request) -> Result<Response, HandlerError> {
        let correlation_id = Uuid::new_v4().to_string();
        let span = request_span(&request.method, &correlation_id);
        let _enter = span.enter();

        let verb = Verb::parse(&request.method)?;
        let mut response = Response::default();
        let output = match verb {
            Verb::Get => self.resource.get(request, &mut response)?,
            Verb::Put => self.resource.put(request, &mut response)?,
        };

        if !response.headers.contains_key("Content-Type") {
            response.set_header("Content-Type", DEFAULT_CTYPE);
        }

        if let Some(body) = output {
            if !response.headers.contains_key("Content-Length") {
                match body.len() {
                    Some(len) => response.set_header("Content-Length", len.to_string()),
                    None => warn!("stream body handed back without a Content-Length header"),
                }
            }
            response.output = Some(body);
        }

        Ok(response)
    }
}
