use std::sync::Arc;

use http::Method;
use tracing::{debug, trace};

use super::{path::Path, route::Route, stop::NotFound, Mounted, Router, StopRouting};
use crate::{
    config::RouterConfig,
    container::Container,
    pipeline::{Handler, HandlerService, MiddlewareQueue, MiddlewareService},
    resolver::{CompositeResolver, ControllerRegistry, HandlerSpec, Resolve},
    Result,
};

/// Collects middleware, routes and sub-routers in declaration order.
///
/// Every registration resolves its [HandlerSpec] immediately, so a bad
/// handler is reported here and never while serving.
pub struct RouterBuilder {
    queue: MiddlewareQueue,
    fallback: HandlerService,
    config: RouterConfig,
    container: Option<Arc<dyn Container>>,
    controllers: Option<Arc<ControllerRegistry>>,
    custom: Vec<Arc<dyn Resolve>>,
    resolver: Arc<CompositeResolver>,
}

impl Default for RouterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RouterBuilder {
    pub fn new() -> Self {
        Self {
            queue: MiddlewareQueue::new(),
            fallback: Arc::new(NotFound),
            config: RouterConfig::default(),
            container: None,
            controllers: None,
            custom: Vec::new(),
            resolver: Arc::new(CompositeResolver::standard(
                &RouterConfig::default(),
                None,
                None,
                &[],
            )),
        }
    }

    fn refresh(mut self) -> Self {
        self.resolver = Arc::new(CompositeResolver::standard(
            &self.config,
            self.container.clone(),
            self.controllers.clone(),
            &self.custom,
        ));
        self
    }

    pub fn with_config(mut self, config: RouterConfig) -> Self {
        self.config = config;
        self.refresh()
    }

    pub fn with_container<C: Container + 'static>(mut self, container: C) -> Self {
        self.container = Some(Arc::new(container));
        self.refresh()
    }

    pub fn with_controllers(mut self, controllers: ControllerRegistry) -> Self {
        self.controllers = Some(Arc::new(controllers));
        self.refresh()
    }

    /// Appends a resolver tried after the built-in ones.
    pub fn with_resolver(mut self, resolver: impl Resolve + 'static) -> Self {
        self.custom.push(Arc::new(resolver));
        self.refresh()
    }

    /// Handler reached when the whole queue delegated. Defaults to
    /// [NotFound].
    pub fn with_fallback(mut self, fallback: impl Handler) -> Self {
        self.fallback = Arc::new(fallback);
        self
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn resolve(&self, spec: impl Into<HandlerSpec>) -> Result<MiddlewareService> {
        self.resolver.resolve(spec.into())
    }

    pub fn middleware(mut self, spec: impl Into<HandlerSpec>) -> Result<Self> {
        let middleware = self.resolve(spec)?;
        trace!(middleware = middleware.name(), "registered middleware");
        self.queue.push(middleware);
        Ok(self)
    }

    pub fn route<M>(mut self, methods: M, pattern: &str, spec: impl Into<HandlerSpec>) -> Result<Self>
    where
        M: IntoIterator<Item = Method>,
    {
        let route = Route::new(methods, pattern, self.resolve(spec)?)?;
        trace!(pattern, methods = ?route.methods(), "registered route");
        self.queue.push(Arc::new(route));
        Ok(self)
    }

    pub fn get(self, pattern: &str, spec: impl Into<HandlerSpec>) -> Result<Self> {
        self.route([Method::GET], pattern, spec)
    }

    pub fn post(self, pattern: &str, spec: impl Into<HandlerSpec>) -> Result<Self> {
        self.route([Method::POST], pattern, spec)
    }

    pub fn put(self, pattern: &str, spec: impl Into<HandlerSpec>) -> Result<Self> {
        self.route([Method::PUT], pattern, spec)
    }

    pub fn patch(self, pattern: &str, spec: impl Into<HandlerSpec>) -> Result<Self> {
        self.route([Method::PATCH], pattern, spec)
    }

    pub fn delete(self, pattern: &str, spec: impl Into<HandlerSpec>) -> Result<Self> {
        self.route([Method::DELETE], pattern, spec)
    }

    pub fn options(self, pattern: &str, spec: impl Into<HandlerSpec>) -> Result<Self> {
        self.route([Method::OPTIONS], pattern, spec)
    }

    /// Runs `spec` only for requests under `pattern`, whatever their method.
    pub fn path(mut self, pattern: &str, spec: impl Into<HandlerSpec>) -> Result<Self> {
        let path = Path::new(pattern, self.resolve(spec)?)?;
        trace!(pattern, "registered path");
        self.queue.push(Arc::new(path));
        Ok(self)
    }

    /// Configures a sub-router mounted under `pattern`.
    ///
    /// The sub-router starts from a copy of this builder's queue as it is
    /// now, with the same resolvers and fallback. Registrations made on
    /// either side afterwards stay on that side.
    pub fn nest<F>(self, pattern: &str, configure: F) -> Result<Self>
    where
        F: FnOnce(RouterBuilder) -> Result<RouterBuilder>,
    {
        let child = RouterBuilder {
            queue: self.queue.copy(),
            fallback: self.fallback.clone(),
            config: self.config.clone(),
            container: self.container.clone(),
            controllers: self.controllers.clone(),
            custom: self.custom.clone(),
            resolver: self.resolver.clone(),
        };
        let router = configure(child)?.build();
        self.mount(pattern, router)
    }

    /// Mounts an already built router under `pattern`.
    pub fn mount(mut self, pattern: &str, router: Router) -> Result<Self> {
        let path = Path::new(pattern, Arc::new(Mounted(router)))?;
        trace!(pattern, "mounted router");
        self.queue.push(Arc::new(path));
        Ok(self)
    }

    /// Ends routing here: 405 if a route matched the path only, 404 otherwise.
    pub fn stop(mut self) -> Self {
        self.queue.push(Arc::new(StopRouting));
        self
    }

    pub fn build(self) -> Router {
        debug!(
            middlewares = self.queue.len(),
            fallback = self.fallback.name(),
            "router built"
        );
        Router::new(self.queue.into_chain(self.fallback))
    }
}
