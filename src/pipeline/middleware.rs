use std::{future::Future, sync::Arc};

use async_trait::async_trait;

use super::{Next, Result};
use crate::http::{Request, Response};

pub type MiddlewareService = Arc<dyn Middleware>;

pub type HandlerService = Arc<dyn Handler>;

/// Middleware is a single link of the processing chain.
/// It may inspect or modify the request, decide whether to call [Next::run]
/// and transform the response it gets back.
/// Register a middleware using [crate::RouterBuilder::middleware].
#[async_trait]
pub trait Middleware: Send + Sync + 'static {
    async fn run(&self, request: Request, next: Next) -> Result<Response>;

    /// Name used when logging chain hops.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Handler turns a request into a response without delegating any further.
#[async_trait]
pub trait Handler: Send + Sync + 'static {
    async fn handle(&self, request: Request) -> Result<Response>;

    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Uses a handler as the terminal link of a chain. `next` is never called.
pub struct HandlerMiddleware(pub HandlerService);

#[async_trait]
impl Middleware for HandlerMiddleware {
    async fn run(&self, request: Request, _next: Next) -> Result<Response> {
        self.0.handle(request).await
    }

    fn name(&self) -> &str {
        self.0.name()
    }
}

/// A middleware closed over the handler it delegates to.
pub struct MiddlewareHandler {
    middleware: MiddlewareService,
    next: HandlerService,
}

impl MiddlewareHandler {
    pub fn new(middleware: MiddlewareService, next: HandlerService) -> Self {
        Self { middleware, next }
    }
}

#[async_trait]
impl Handler for MiddlewareHandler {
    async fn handle(&self, request: Request) -> Result<Response> {
        self.middleware
            .run(request, Next::terminal(self.next.clone()))
            .await
    }

    fn name(&self) -> &str {
        self.middleware.name()
    }
}

pub struct FnHandler<F>(F);

#[async_trait]
impl<F, Fut> Handler for FnHandler<F>
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Response>> + Send + 'static,
{
    async fn handle(&self, request: Request) -> Result<Response> {
        (self.0)(request).await
    }
}

/// Creates a handler from an async closure.
pub fn handle_fn<F, Fut>(handler: F) -> FnHandler<F>
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Response>> + Send + 'static,
{
    FnHandler(handler)
}

pub struct FnMiddleware<F>(F);

#[async_trait]
impl<F, Fut> Middleware for FnMiddleware<F>
where
    F: Fn(Request, Next) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Response>> + Send + 'static,
{
    async fn run(&self, request: Request, next: Next) -> Result<Response> {
        (self.0)(request, next).await
    }
}

/// Creates a middleware from an async closure taking the request and [Next].
pub fn middleware_fn<F, Fut>(middleware: F) -> FnMiddleware<F>
where
    F: Fn(Request, Next) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Response>> + Send + 'static,
{
    FnMiddleware(middleware)
}

pub struct LazyHandler<F>(F);

#[async_trait]
impl<F> Handler for LazyHandler<F>
where
    F: Fn() -> Result<HandlerService> + Send + Sync + 'static,
{
    async fn handle(&self, request: Request) -> Result<Response> {
        let handler = (self.0)()?;
        handler.handle(request).await
    }
}

/// Creates the real handler on every request, on first use of the route.
pub fn lazy_handler<F>(factory: F) -> LazyHandler<F>
where
    F: Fn() -> Result<HandlerService> + Send + Sync + 'static,
{
    LazyHandler(factory)
}

#[cfg(test)]
mod tests {
    use http::StatusCode;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::http::HeaderMapExt;

    #[tokio::test]
    async fn handler_used_as_middleware_ignores_next() {
        let middleware = HandlerMiddleware(Arc::new(handle_fn(|_| async {
            Ok(Response::text(StatusCode::OK, "handler"))
        })));
        let next = Next::terminal(Arc::new(handle_fn(|_| async {
            Ok(Response::text(StatusCode::OK, "next"))
        })));
        let response = middleware
            .run(Request::get("/"), next)
            .await
            .unwrap();
        assert_eq!(response.body_string(), "handler");
    }

    #[tokio::test]
    async fn middleware_handler_runs_its_middleware_first() {
        let handler = MiddlewareHandler::new(
            Arc::new(middleware_fn(|request, next: Next| async move {
                let response = next.run(request).await?;
                Ok(response.with_header("x-wrapped", "yes"))
            })),
            Arc::new(handle_fn(|_| async { Ok(Response::new(StatusCode::OK)) })),
        );
        let response = handler.handle(Request::get("/")).await.unwrap();
        assert_eq!(response.header_str("x-wrapped"), Some("yes"));
    }

    #[tokio::test]
    async fn lazy_handler_propagates_factory_errors() {
        let handler = lazy_handler(|| Err(crate::Error::new("factory failed")));
        let error = handler.handle(Request::get("/")).await.unwrap_err();
        assert_eq!(error.to_string(), "factory failed");
    }
}
