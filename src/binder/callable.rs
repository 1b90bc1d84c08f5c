use std::{fmt::Debug, future::Future, sync::Arc};

use async_trait::async_trait;
use futures::{future::BoxFuture, FutureExt};

use super::{bind, Arguments, Param};
use crate::{
    container::Container,
    http::{Request, Response},
    pipeline::{Middleware, Next},
    Result,
};

type Body = Arc<dyn Fn(Arguments) -> BoxFuture<'static, Result<Response>> + Send + Sync>;

/// An async function together with the table describing its parameters.
///
/// The table is built once, when the callable is created, and drives
/// [bind] on every request.
#[derive(Clone)]
pub struct Callable {
    name: String,
    params: Arc<[Param]>,
    body: Body,
}

impl Callable {
    pub fn new<P, F, Fut>(name: impl Into<String>, params: P, body: F) -> Self
    where
        P: IntoIterator<Item = Param>,
        F: Fn(Arguments) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Response>> + Send + 'static,
    {
        Self {
            name: name.into(),
            params: params.into_iter().collect(),
            body: Arc::new(move |arguments| body(arguments).boxed()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &[Param] {
        &self.params
    }

    pub async fn call(&self, arguments: Arguments) -> Result<Response> {
        (self.body)(arguments).await
    }
}

impl Debug for Callable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Callable")
            .field("name", &self.name)
            .field("params", &self.params)
            .finish()
    }
}

/// Binds the callable's arguments on each request, then calls it.
pub struct CallableMiddleware {
    callable: Callable,
    container: Option<Arc<dyn Container>>,
}

impl CallableMiddleware {
    pub fn new(callable: Callable, container: Option<Arc<dyn Container>>) -> Self {
        Self {
            callable,
            container,
        }
    }
}

#[async_trait]
impl Middleware for CallableMiddleware {
    async fn run(&self, request: Request, next: Next) -> Result<Response> {
        let arguments = bind(&self.callable, &request, &next, self.container.as_deref())?;
        self.callable.call(arguments).await
    }

    fn name(&self) -> &str {
        self.callable.name()
    }
}
