use std::sync::Arc;

use async_trait::async_trait;

use super::{Decline, HandlerSpec, Resolve};
use crate::{
    binder::CallableMiddleware,
    container::Container,
    http::{Attribute, Request, Response},
    pipeline::{middleware::HandlerMiddleware, HandlerService, Middleware, MiddlewareService, Next},
    Error, Result,
};

type Resolved = std::result::Result<MiddlewareService, Decline>;

/// Adapts a [crate::Handler] into a terminal middleware.
#[derive(Debug, Clone, Copy, Default)]
pub struct HandlerResolver;

impl Resolve for HandlerResolver {
    fn resolve(&self, spec: &HandlerSpec) -> Resolved {
        match spec {
            HandlerSpec::Handler(handler) => Ok(Arc::new(HandlerMiddleware(handler.clone()))),
            _ => Err(Decline::new("argument is not a handler instance")),
        }
    }
}

/// Adapts a [crate::Callable], binding its arguments on every request.
#[derive(Clone, Default)]
pub struct CallableResolver {
    container: Option<Arc<dyn Container>>,
}

impl CallableResolver {
    pub fn new(container: Option<Arc<dyn Container>>) -> Self {
        Self { container }
    }
}

impl Resolve for CallableResolver {
    fn resolve(&self, spec: &HandlerSpec) -> Resolved {
        match spec {
            HandlerSpec::Callable(callable) => Ok(Arc::new(CallableMiddleware::new(
                callable.clone(),
                self.container.clone(),
            ))),
            _ => Err(Decline::new("argument is not a callable")),
        }
    }
}

/// Resolves names registered in a [Container].
pub struct ContainerResolver {
    container: Arc<dyn Container>,
    lazy: bool,
}

impl ContainerResolver {
    pub fn new(container: Arc<dyn Container>, lazy: bool) -> Self {
        Self { container, lazy }
    }
}

impl Resolve for ContainerResolver {
    fn resolve(&self, spec: &HandlerSpec) -> Resolved {
        let HandlerSpec::Name(id) = spec else {
            return Err(Decline::new("argument is not a service id"));
        };
        if !self.container.has(id) {
            return Err(Decline::new(format!(
                "service \"{id}\" does not exist in the container"
            )));
        }
        if self.lazy {
            return Ok(Arc::new(ContainerMiddleware::new(self.container.clone(), id)));
        }
        self.container
            .get(id)
            .and_then(into_middleware)
            .ok_or_else(|| Decline::new(format!("service \"{id}\" is not a valid middleware instance")))
    }
}

/// Fetches its middleware from the container on every request.
pub struct ContainerMiddleware {
    container: Arc<dyn Container>,
    id: String,
}

impl ContainerMiddleware {
    pub fn new(container: Arc<dyn Container>, id: impl Into<String>) -> Self {
        Self {
            container,
            id: id.into(),
        }
    }

    pub fn service_id(&self) -> &str {
        &self.id
    }
}

#[async_trait]
impl Middleware for ContainerMiddleware {
    async fn run(&self, request: Request, next: Next) -> Result<Response> {
        let middleware = self
            .container
            .get(&self.id)
            .and_then(into_middleware)
            .ok_or_else(|| {
                Error::new(format!("Service \"{}\" is not a valid middleware instance", self.id))
            })?;
        middleware.run(request, next).await
    }

    fn name(&self) -> &str {
        &self.id
    }
}

fn into_middleware(service: Attribute) -> Option<MiddlewareService> {
    if let Some(middleware) = service.downcast_ref::<MiddlewareService>() {
        return Some(middleware.clone());
    }
    service
        .downcast_ref::<HandlerService>()
        .map(|handler| Arc::new(HandlerMiddleware(handler.clone())) as MiddlewareService)
}
