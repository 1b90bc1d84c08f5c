use async_trait::async_trait;
use http::Method;
use tracing::trace;

use super::pattern::PathPattern;
use crate::{
    http::{Request, Response},
    pipeline::{Middleware, MiddlewareService, Next},
    Error, Result,
};

/// A path pattern that must match the whole remaining path and one of a set
/// of methods.
///
/// When only the path matches, the route records its methods as allowed and
/// delegates without storing any captured parameter.
pub struct Route {
    methods: Vec<Method>,
    pattern: PathPattern,
    inner: MiddlewareService,
}

impl Route {
    pub fn new<M>(methods: M, pattern: &str, inner: MiddlewareService) -> Result<Self>
    where
        M: IntoIterator<Item = Method>,
    {
        let mut unique = Vec::new();
        for method in methods {
            if !unique.contains(&method) {
                unique.push(method);
            }
        }
        if unique.is_empty() {
            return Err(Error::EmptyMethods {
                pattern: pattern.to_string(),
            });
        }
        Ok(Self {
            methods: unique,
            pattern: PathPattern::compile(pattern, true)?,
            inner,
        })
    }

    pub fn methods(&self) -> &[Method] {
        &self.methods
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

#[async_trait]
impl Middleware for Route {
    async fn run(&self, mut request: Request, next: Next) -> Result<Response> {
        let accepts = self.methods.contains(&request.method);
        let context = request.routing_context_mut()?;
        let Some(found) = self.pattern.matches(context.remaining_path()) else {
            return next.run(request).await;
        };
        if !accepts {
            trace!(pattern = self.pattern(), "route rejected method");
            context.reject(&self.methods);
            return next.run(request).await;
        }
        trace!(pattern = self.pattern(), "route matched");
        let previous = context.consume(found);
        self.inner.run(request, next.rewinding(previous)).await
    }

    fn name(&self) -> &str {
        self.pattern()
    }
}
