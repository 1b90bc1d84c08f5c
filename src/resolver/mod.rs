//! Normalizes handler registrations into middleware.

pub mod adapters;
pub mod controller;
pub mod spec;

use std::{fmt::Display, sync::Arc};

use tracing::trace;

pub use adapters::{CallableResolver, ContainerMiddleware, ContainerResolver, HandlerResolver};
pub use controller::{ControllerRegistry, ControllerResolver};
pub use spec::HandlerSpec;

use crate::{
    config::RouterConfig,
    container::Container,
    pipeline::{MiddlewareQueue, MiddlewareService},
    Error, Result,
};

/// Why a resolver did not accept a handler spec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decline(pub String);

impl Decline {
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }
}

impl Display for Decline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One strategy turning a [HandlerSpec] into middleware.
pub trait Resolve: Send + Sync {
    fn resolve(&self, spec: &HandlerSpec) -> std::result::Result<MiddlewareService, Decline>;
}

/// Tries each configured [Resolve] in order.
#[derive(Clone, Default)]
pub struct CompositeResolver {
    resolvers: Vec<Arc<dyn Resolve>>,
}

impl CompositeResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard resolver list: handlers, callables, then container ids
    /// and controller references when those are available, then `custom`.
    pub fn standard(
        config: &RouterConfig,
        container: Option<Arc<dyn Container>>,
        controllers: Option<Arc<ControllerRegistry>>,
        custom: &[Arc<dyn Resolve>],
    ) -> Self {
        let mut resolver = Self::new()
            .with(HandlerResolver)
            .with(CallableResolver::new(container.clone()));
        if let Some(container) = container.clone() {
            resolver = resolver.with(ContainerResolver::new(container, config.lazy_services));
        }
        if let Some(controllers) = controllers {
            resolver = resolver.with(ControllerResolver::new(config, controllers, container));
        }
        resolver.resolvers.extend(custom.iter().cloned());
        resolver
    }

    pub fn with(mut self, resolver: impl Resolve + 'static) -> Self {
        self.resolvers.push(Arc::new(resolver));
        self
    }

    pub fn len(&self) -> usize {
        self.resolvers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }

    pub fn resolve(&self, spec: HandlerSpec) -> Result<MiddlewareService> {
        match spec {
            HandlerSpec::List(items) => self.resolve_list(items),
            HandlerSpec::Middleware(middleware) => Ok(middleware),
            other => {
                let mut reasons = vec!["Not a middleware instance".to_string()];
                for resolver in &self.resolvers {
                    match resolver.resolve(&other) {
                        Ok(middleware) => return Ok(middleware),
                        Err(Decline(reason)) => {
                            trace!(reason = %reason, "resolver declined");
                            reasons.push(reason);
                        }
                    }
                }
                Err(Error::UnresolvableHandler(reasons))
            }
        }
    }

    fn resolve_list(&self, items: Vec<HandlerSpec>) -> Result<MiddlewareService> {
        if items.len() <= 1 {
            return match items.into_iter().next() {
                Some(item) => self.resolve(item),
                None => Err(Error::UnresolvableHandler(vec![
                    "You must provide at least one element when passing a list".to_string(),
                ])),
            };
        }
        let queue = items
            .into_iter()
            .map(|item| self.resolve(item))
            .collect::<Result<MiddlewareQueue>>()?;
        Ok(Arc::new(queue.into_sequence()))
    }
}
