use async_trait::async_trait;
use tracing::debug;

use crate::{
    http::{Request, Response},
    pipeline::{Handler, Middleware, Next},
    Error, Result,
};

fn not_found(request: &Request) -> Error {
    Error::NotFound {
        method: request.method.clone(),
        path: request.uri_path().to_string(),
    }
}

fn method_not_allowed(request: &Request) -> Result<Option<Error>> {
    let context = request.routing_context()?;
    if !context.is_method_not_allowed() {
        return Ok(None);
    }
    Ok(Some(Error::MethodNotAllowed {
        method: request.method.clone(),
        path: request.uri_path().to_string(),
        allowed: context.allowed_methods().to_vec(),
    }))
}

/// Ends routing: 405 when some route matched the path with another method,
/// 404 otherwise. Never calls `next`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StopRouting;

#[async_trait]
impl Middleware for StopRouting {
    async fn run(&self, request: Request, _next: Next) -> Result<Response> {
        let error = method_not_allowed(&request)?.unwrap_or_else(|| not_found(&request));
        debug!(path = request.uri_path(), "{}", error);
        Err(error)
    }

    fn name(&self) -> &str {
        "stop-routing"
    }
}

/// Fails with 405 when methods were rejected so far, otherwise continues.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowedMethodsChecker;

#[async_trait]
impl Middleware for AllowedMethodsChecker {
    async fn run(&self, request: Request, next: Next) -> Result<Response> {
        match method_not_allowed(&request)? {
            Some(error) => Err(error),
            None => next.run(request).await,
        }
    }

    fn name(&self) -> &str {
        "allowed-methods"
    }
}

/// Default router fallback. Makes the same 404/405 decision as
/// [StopRouting], so a mounted router without `stop()` still reports 405.
#[derive(Debug, Clone, Copy, Default)]
pub struct NotFound;

#[async_trait]
impl Handler for NotFound {
    async fn handle(&self, request: Request) -> Result<Response> {
        if !request.has_routing_context() {
            return Err(not_found(&request));
        }
        Err(method_not_allowed(&request)?.unwrap_or_else(|| not_found(&request)))
    }

    fn name(&self) -> &str {
        "not-found"
    }
}
