use std::collections::BTreeMap;
use std::fmt;
use std::io::Read;

/// Abstract request record produced by the transport collaborator.
///
/// Header keys are kept case-sensitive exactly as the transport handed them
/// over. A trail ending in an empty segment means "list this container". An
/// absent `remote_user` means the caller is unauthenticated.
#[derive(Debug, Clone, Default)]
pub struct Request {
    pub method: String,
    pub trail: Vec<String>,
    pub headers: BTreeMap<String, String>,
    pub query: BTreeMap<String, String>,
    pub body: Option<Vec<u8>>,
    pub remote_user: Option<String>,
}

impl Request {
    /// Start a request with the given verb; an empty method dispatches as GET.
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            ..Self::default()
        }
    }

    pub fn trail<S: Into<String>>(mut self, trail: impl IntoIterator<Item = S>) -> Self {
        self.trail = trail.into_iter().map(Into::into).collect();
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(name.into(), value.into());
        self
    }

    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn remote_user(mut self, user: impl Into<String>) -> Self {
        self.remote_user = Some(user.into());
        self
    }
}

/// Response body: either in-memory bytes or a caller-managed stream.
///
/// Stream bodies must set their own `Content-Length`; the dispatcher only
/// computes it for byte bodies.
pub enum Body {
    Bytes(Vec<u8>),
    Stream(Box<dyn Read + Send>),
}

impl Body {
    /// Byte length, when known up front.
    pub fn len(&self) -> Option<usize> {
        match self {
            Self::Bytes(bytes) => Some(bytes.len()),
            Self::Stream(_) => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == Some(0)
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(bytes) => Some(bytes),
            Self::Stream(_) => None,
        }
    }
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bytes(bytes) => f.debug_tuple("Bytes").field(&bytes.len()).finish(),
            Self::Stream(_) => f.debug_tuple("Stream").finish(),
        }
    }
}

impl From<Vec<u8>> for Body {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}

impl From<String> for Body {
    fn from(text: String) -> Self {
        Self::Bytes(text.into_bytes())
    }
}

impl From<&str> for Body {
    fn from(text: &str) -> Self {
        Self::Bytes(text.as_bytes().to_vec())
    }
}

/// Mutable response record built up by a resource method and handed back to
/// the transport.
#[derive(Debug)]
pub struct Response {
    pub status: u16,
    pub headers: BTreeMap<String, String>,
    pub output: Option<Body>,
}

impl Default for Response {
    fn default() -> Self {
        Self {
            status: 200,
            headers: BTreeMap::new(),
            output: None,
        }
    }
}

impl Response {
    pub fn with_status(status: u16) -> Self {
        Self {
            status,
            ..Self::default()
        }
    }

    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.insert(name.into(), value.into());
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    pub fn set_output(&mut self, body: impl Into<Body>) {
        self.output = Some(body.into());
    }

    /// Response bytes, when the body is held in memory.
    pub fn output_bytes(&self) -> Option<&[u8]> {
        self.output.as_ref().and_then(Body::as_bytes)
    }
}
