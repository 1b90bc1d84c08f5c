use std::sync::Arc;

use async_trait::async_trait;

use super::{Handler, HandlerService, Middleware, MiddlewareService, Next, Result};
use crate::http::{Request, Response};

/// Ordered, append-only list of middleware used while a router is built.
#[derive(Clone, Default)]
pub struct MiddlewareQueue {
    items: Vec<MiddlewareService>,
}

impl MiddlewareQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, middleware: MiddlewareService) {
        self.items.push(middleware);
    }

    /// Independent snapshot of the queue. Pushing onto either side afterwards
    /// does not affect the other.
    pub fn copy(&self) -> Self {
        self.clone()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MiddlewareService> {
        self.items.iter()
    }

    /// Freezes the queue into a handler terminating in `fallback`.
    pub fn into_chain(self, fallback: HandlerService) -> Chain {
        Chain {
            middlewares: self.items.into(),
            fallback,
        }
    }

    /// Freezes the queue into a single middleware that continues with the
    /// outer `next` once every item has run.
    pub fn into_sequence(self) -> Sequence {
        Sequence(self.items.into())
    }
}

impl FromIterator<MiddlewareService> for MiddlewareQueue {
    fn from_iter<T: IntoIterator<Item = MiddlewareService>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

/// Frozen middleware list plus its terminal handler.
#[derive(Clone)]
pub struct Chain {
    middlewares: Arc<[MiddlewareService]>,
    fallback: HandlerService,
}

impl Chain {
    pub fn len(&self) -> usize {
        self.middlewares.len()
    }

    pub fn is_empty(&self) -> bool {
        self.middlewares.is_empty()
    }

    pub fn fallback(&self) -> &HandlerService {
        &self.fallback
    }

    pub(crate) fn start(&self) -> Next {
        Next::new(self.middlewares.clone(), self.fallback.clone())
    }

    /// Runs the chain, falling into `next` instead of the fallback.
    pub(crate) fn continue_with(&self, next: Next) -> Next {
        Next::new(self.middlewares.clone(), Arc::new(next))
    }
}

#[async_trait]
impl Handler for Chain {
    async fn handle(&self, request: Request) -> Result<Response> {
        self.start().run(request).await
    }

    fn name(&self) -> &str {
        "chain"
    }
}

/// Several middleware acting as one slot of an outer chain.
#[derive(Clone)]
pub struct Sequence(Arc<[MiddlewareService]>);

impl Sequence {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[async_trait]
impl Middleware for Sequence {
    async fn run(&self, request: Request, next: Next) -> Result<Response> {
        Next::new(self.0.clone(), Arc::new(next)).run(request).await
    }

    fn name(&self) -> &str {
        "sequence"
    }
}
