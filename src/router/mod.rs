pub mod builder;
pub mod context;
pub mod path;
pub mod pattern;
pub mod route;
pub mod stop;

use async_trait::async_trait;
use tracing::debug;

pub use builder::RouterBuilder;
pub use context::{Params, RoutingContext};
pub use path::Path;
pub use pattern::{PathMatch, PathPattern};
pub use route::Route;
pub use stop::{AllowedMethodsChecker, NotFound, StopRouting};

use crate::{
    http::{Request, Response},
    pipeline::{Chain, Handler, Middleware, Next},
    Result,
};

/// A built, immutable router.
///
/// As a [Handler] it is the entry point of a request: it injects the routing
/// context and runs its queue, ending in its fallback. As a [Middleware] it
/// reuses an existing context and continues into the outer chain once its
/// queue delegated.
#[derive(Clone)]
pub struct Router {
    chain: Chain,
}

impl Router {
    pub fn builder() -> RouterBuilder {
        RouterBuilder::new()
    }

    pub(crate) fn new(chain: Chain) -> Self {
        Self { chain }
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    async fn dispatch(&self, request: Request) -> Result<Response> {
        self.chain.start().run(request).await
    }
}

#[async_trait]
impl Handler for Router {
    async fn handle(&self, request: Request) -> Result<Response> {
        let request = request.with_routing_context()?;
        debug!(method = %request.method, path = request.uri_path(), "routing");
        self.dispatch(request).await
    }

    fn name(&self) -> &str {
        "router"
    }
}

#[async_trait]
impl Middleware for Router {
    async fn run(&self, request: Request, next: Next) -> Result<Response> {
        let request = if request.has_routing_context() {
            request
        } else {
            request.with_routing_context()?
        };
        self.chain.continue_with(next).run(request).await
    }

    fn name(&self) -> &str {
        "router"
    }
}

/// A sub-router behind a [Path]. Ends in its own fallback.
pub(crate) struct Mounted(pub(crate) Router);

#[async_trait]
impl Middleware for Mounted {
    async fn run(&self, request: Request, _next: Next) -> Result<Response> {
        self.0.dispatch(request).await
    }

    fn name(&self) -> &str {
        "mounted-router"
    }
}

impl From<Router> for crate::resolver::HandlerSpec {
    fn from(value: Router) -> Self {
        Self::middleware(value)
    }
}
