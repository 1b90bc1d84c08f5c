use std::error::Error as _;

use async_trait::async_trait;
use http::header;
use tracing::{debug, error};

use super::PlainTextConfig;
use crate::{
    http::{Request, Response},
    pipeline::{join_methods, Middleware, Next},
    Error, Result,
};

/// Turns any error from the rest of the chain into a plain-text response:
/// `HTTP ERROR <code>: <message>`, optionally followed by the error's sources.
#[derive(Debug, Clone, Default)]
pub struct PlainTextErrors {
    config: PlainTextConfig,
}

impl PlainTextErrors {
    pub fn new(config: PlainTextConfig) -> Self {
        Self { config }
    }

    pub fn without_trace() -> Self {
        Self::new(PlainTextConfig { trace: false })
    }

    fn render(&self, error: &Error) -> Response {
        let status = error.status_code();
        let mut text = format!("HTTP ERROR {}: {}\n", status.as_u16(), error);
        if self.config.trace {
            let mut source = error.source();
            while let Some(cause) = source {
                text.push('\n');
                text.push_str(&cause.to_string());
                source = cause.source();
            }
        }
        let response = Response::text(status, text);
        match error.allowed_methods() {
            Some(allowed) => response.with_header(header::ALLOW, join_methods(allowed)),
            None => response,
        }
    }
}

#[async_trait]
impl Middleware for PlainTextErrors {
    async fn run(&self, request: Request, next: Next) -> Result<Response> {
        let method = request.method.clone();
        let path = request.uri_path().to_string();
        match next.run(request).await {
            Ok(response) => Ok(response),
            Err(e) => {
                if e.status_code().is_server_error() {
                    error!(%method, %path, "{}", e);
                } else {
                    debug!(%method, %path, "{}", e);
                }
                Ok(self.render(&e))
            }
        }
    }

    fn name(&self) -> &str {
        "plain-text-errors"
    }
}
