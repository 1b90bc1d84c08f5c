use std::{fmt::Debug, future::Future, sync::Arc};

use crate::{
    binder::Callable,
    http::{Request, Response},
    pipeline::{
        middleware::{FnHandler, FnMiddleware, LazyHandler},
        Handler, HandlerService, Middleware, MiddlewareService, Next,
    },
    Result,
};

/// Anything that can be registered on a router before it is resolved into
/// middleware.
#[derive(Clone)]
pub enum HandlerSpec {
    Middleware(MiddlewareService),
    Handler(HandlerService),
    Callable(Callable),
    /// A container service id or a controller reference (`Class@method`).
    Name(String),
    List(Vec<HandlerSpec>),
}

impl HandlerSpec {
    pub fn middleware(middleware: impl Middleware) -> Self {
        Self::Middleware(Arc::new(middleware))
    }

    pub fn handler(handler: impl Handler) -> Self {
        Self::Handler(Arc::new(handler))
    }

    pub fn list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<HandlerSpec>,
    {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

impl Debug for HandlerSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Middleware(middleware) => write!(f, "Middleware({})", middleware.name()),
            Self::Handler(handler) => write!(f, "Handler({})", handler.name()),
            Self::Callable(callable) => write!(f, "Callable({})", callable.name()),
            Self::Name(name) => write!(f, "Name({name})"),
            Self::List(items) => f.debug_list().entries(items).finish(),
        }
    }
}

impl From<MiddlewareService> for HandlerSpec {
    fn from(value: MiddlewareService) -> Self {
        Self::Middleware(value)
    }
}

impl From<HandlerService> for HandlerSpec {
    fn from(value: HandlerService) -> Self {
        Self::Handler(value)
    }
}

impl From<Callable> for HandlerSpec {
    fn from(value: Callable) -> Self {
        Self::Callable(value)
    }
}

impl From<&str> for HandlerSpec {
    fn from(value: &str) -> Self {
        Self::Name(value.to_string())
    }
}

impl From<String> for HandlerSpec {
    fn from(value: String) -> Self {
        Self::Name(value)
    }
}

impl From<Vec<HandlerSpec>> for HandlerSpec {
    fn from(value: Vec<HandlerSpec>) -> Self {
        Self::List(value)
    }
}

impl<F, Fut> From<FnHandler<F>> for HandlerSpec
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Response>> + Send + 'static,
{
    fn from(value: FnHandler<F>) -> Self {
        Self::handler(value)
    }
}

impl<F, Fut> From<FnMiddleware<F>> for HandlerSpec
where
    F: Fn(Request, Next) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Response>> + Send + 'static,
{
    fn from(value: FnMiddleware<F>) -> Self {
        Self::middleware(value)
    }
}

impl<F> From<LazyHandler<F>> for HandlerSpec
where
    F: Fn() -> Result<HandlerService> + Send + Sync + 'static,
{
    fn from(value: LazyHandler<F>) -> Self {
        Self::handler(value)
    }
}
