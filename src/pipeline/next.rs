use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::{Handler, HandlerService, MiddlewareService, Result};
use crate::{
    http::{Request, Response},
    router::context::Checkpoint,
    utils::Also,
};

/// The rest of the chain, as seen from inside a middleware.
///
/// Holds the frozen middleware slice, the position of the next link and the
/// terminal handler. Running it is equivalent to right-folding the remaining
/// middleware over the terminal handler.
#[derive(Clone)]
pub struct Next {
    chain: Arc<[MiddlewareService]>,
    index: usize,
    fallback: HandlerService,
    rewind: Option<Checkpoint>,
}

impl Next {
    pub(crate) fn new(chain: Arc<[MiddlewareService]>, fallback: HandlerService) -> Self {
        Self {
            chain,
            index: 0,
            fallback,
            rewind: None,
        }
    }

    pub(crate) fn terminal(fallback: HandlerService) -> Self {
        Self::new(Arc::from(Vec::new()), fallback)
    }

    /// Restores the routing state saved at `checkpoint` before the chain
    /// continues.
    pub(crate) fn rewinding(mut self, checkpoint: Checkpoint) -> Self {
        self.rewind = Some(checkpoint);
        self
    }

    pub async fn run(self, mut request: Request) -> Result<Response> {
        if let Some(checkpoint) = self.rewind {
            if let Ok(context) = request.routing_context_mut() {
                context.rewind(checkpoint);
            }
        }
        match self.chain.get(self.index).cloned() {
            Some(middleware) => {
                debug!(middleware = middleware.name(), path = %request.path, "-->");
                let next = Next {
                    chain: self.chain,
                    index: self.index + 1,
                    fallback: self.fallback,
                    rewind: None,
                };
                middleware
                    .run(request, next)
                    .await
                    .also(|r| debug!(middleware = middleware.name(), ok = r.is_ok(), "<--"))
            }
            None => {
                debug!(handler = self.fallback.name(), path = %request.path, "-->");
                let fallback = self.fallback;
                fallback
                    .handle(request)
                    .await
                    .also(|r| debug!(handler = fallback.name(), ok = r.is_ok(), "<--"))
            }
        }
    }

    /// Number of middleware left before the terminal handler.
    pub fn remaining(&self) -> usize {
        self.chain.len().saturating_sub(self.index)
    }
}

#[async_trait]
impl Handler for Next {
    async fn handle(&self, request: Request) -> Result<Response> {
        self.clone().run(request).await
    }

    fn name(&self) -> &str {
        "next"
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use http::StatusCode;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::pipeline::middleware::{handle_fn, middleware_fn};

    fn recorder(log: Arc<Mutex<Vec<String>>>, label: &'static str) -> MiddlewareService {
        Arc::new(middleware_fn(move |request, next: Next| {
            let log = log.clone();
            async move {
                log.lock().unwrap().push(format!("{label} in"));
                let response = next.run(request).await;
                log.lock().unwrap().push(format!("{label} out"));
                response
            }
        }))
    }

    #[tokio::test]
    async fn runs_in_declaration_order() {
        let log = Arc::new(Mutex::new(vec![]));
        let chain: Arc<[MiddlewareService]> = Arc::from(vec![
            recorder(log.clone(), "first"),
            recorder(log.clone(), "second"),
        ]);
        let terminal_log = log.clone();
        let fallback: HandlerService = Arc::new(handle_fn(move |_| {
            let log = terminal_log.clone();
            async move {
                log.lock().unwrap().push("handler".to_string());
                Ok(Response::new(StatusCode::OK))
            }
        }));
        let next = Next::new(chain, fallback);
        assert_eq!(next.remaining(), 2);
        next.run(Request::get("/")).await.unwrap();
        assert_eq!(
            *log.lock().unwrap(),
            vec!["first in", "second in", "handler", "second out", "first out"]
        );
    }

    #[tokio::test]
    async fn short_circuits_when_next_is_not_called() {
        let chain: Arc<[MiddlewareService]> = Arc::from(vec![Arc::new(middleware_fn(
            |_, _| async { Ok(Response::new(StatusCode::FORBIDDEN)) },
        )) as MiddlewareService]);
        let fallback: HandlerService =
            Arc::new(handle_fn(|_| async { panic!("fallback must not run") }));
        let response = Next::new(chain, fallback)
            .run(Request::get("/"))
            .await
            .unwrap();
        assert_eq!(response.status, StatusCode::FORBIDDEN);
    }
}
