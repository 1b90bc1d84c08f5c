use async_trait::async_trait;
use tracing::trace;

use super::pattern::PathPattern;
use crate::{
    http::{Request, Response},
    pipeline::{Middleware, MiddlewareService, Next},
    Result,
};

/// Mounts a middleware under a path prefix.
///
/// A match consumes the prefix from the routing context before the inner
/// middleware runs. If the inner middleware falls through to `next`, the
/// consumed prefix is restored first.
pub struct Path {
    pattern: PathPattern,
    inner: MiddlewareService,
}

impl Path {
    pub fn new(pattern: &str, inner: MiddlewareService) -> Result<Self> {
        Ok(Self {
            pattern: PathPattern::compile(pattern, false)?,
            inner,
        })
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

#[async_trait]
impl Middleware for Path {
    async fn run(&self, mut request: Request, next: Next) -> Result<Response> {
        let context = request.routing_context_mut()?;
        let Some(found) = self.pattern.matches(context.remaining_path()) else {
            trace!(pattern = self.pattern(), remaining = context.remaining_path(), "path skipped");
            return next.run(request).await;
        };
        let previous = context.consume(found);
        trace!(pattern = self.pattern(), remaining = context.remaining_path(), "path matched");
        self.inner.run(request, next.rewinding(previous)).await
    }

    fn name(&self) -> &str {
        self.pattern()
    }
}
