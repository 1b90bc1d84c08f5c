pub mod middleware;
pub mod next;
pub mod queue;

use http::{Method, StatusCode};
use thiserror::Error;

pub use middleware::{Handler, HandlerService, Middleware, MiddlewareService};
pub use next::Next;
pub use queue::{Chain, MiddlewareQueue, Sequence};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Cannot {method} {path}")]
    NotFound { method: Method, path: String },
    #[error("Cannot {method} {path} (Try: {})", join_methods(.allowed))]
    MethodNotAllowed {
        method: Method,
        path: String,
        allowed: Vec<Method>,
    },
    #[error("Routing context is missing from the request")]
    MissingRoutingContext,
    #[error("You cannot override the routing context of a request")]
    InvalidRoutingContextOverride,
    #[error("Parameter named {0} has not been found")]
    MissingRoutingParameter(String),
    #[error("{0}")]
    UnresolvableArgument(String),
    #[error("Could not resolve handler. Reasons: {}", .0.join(". "))]
    UnresolvableHandler(Vec<String>),
    #[error("Invalid path pattern `{pattern}`: {reason}")]
    InvalidPattern { pattern: String, reason: String },
    #[error("Route `{pattern}` must accept at least one method")]
    EmptyMethods { pattern: String },
    #[error("{0}")]
    Message(String),
    #[error("Handler returned status code {0}")]
    HttpStatus(StatusCode),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    pub fn new<S: AsRef<str>>(message: S) -> Self {
        Self::Message(message.as_ref().to_string())
    }

    pub fn status(status: StatusCode) -> Self {
        Self::HttpStatus(status)
    }

    /// Protocol status an error translation layer should answer with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            Self::HttpStatus(status) => *status,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn allowed_methods(&self) -> Option<&[Method]> {
        match self {
            Self::MethodNotAllowed { allowed, .. } => Some(allowed),
            _ => None,
        }
    }

    /// `true` for the two expected routing outcomes (404 and 405).
    pub fn is_routing_miss(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::MethodNotAllowed { .. })
    }
}

impl From<StatusCode> for Error {
    fn from(value: StatusCode) -> Self {
        Self::status(value)
    }
}

pub(crate) fn join_methods(methods: &[Method]) -> String {
    methods
        .iter()
        .map(Method::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
