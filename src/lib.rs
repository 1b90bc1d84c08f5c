//! Middleware-pipeline HTTP router.
//!
//! Requests flow through an ordered chain of middleware. Routes and mounted
//! sub-routers are middleware too: they match the unconsumed part of the path
//! kept in the request's routing context and either dispatch inward or hand
//! the request to the next link. When nothing matched, [StopRouting] tells a
//! missing path (404) apart from a path served under other methods (405).
//!
//! # Example usage
//!
//! ```
//! use http::StatusCode;
//! use waypoint::{handle_fn, Handler, Request, Response, Router};
//!
//! # async fn example() -> waypoint::Result<()> {
//! let router = Router::builder()
//!     .get(
//!         "/users/:id",
//!         handle_fn(|request: Request| async move {
//!             let id = request.param("id")?.to_string();
//!             Ok(Response::text(StatusCode::OK, format!("user {id}")))
//!         }),
//!     )?
//!     .stop()
//!     .build();
//!
//! let response = router.handle(Request::get("/users/22")).await?;
//! assert_eq!(response.body_string(), "user 22");
//! # Ok(())
//! # }
//! ```
pub mod binder;
pub mod config;
pub mod container;
pub mod http;
pub mod pipeline;
#[cfg(feature = "plain-text")]
pub mod plain_text;
pub mod resolver;
pub mod router;
pub(crate) mod utils;

pub use binder::{Argument, Arguments, Callable, CallableMiddleware, Param, ParamType};
pub use config::RouterConfig;
pub use container::{Container, ServiceMap};
pub use crate::http::{Attribute, Attributes, HeaderMapExt, Request, Response};
pub use pipeline::{
    middleware::{handle_fn, lazy_handler, middleware_fn, HandlerMiddleware, MiddlewareHandler},
    Chain, Error, Handler, HandlerService, Middleware, MiddlewareQueue, MiddlewareService, Next,
    Result, Sequence,
};
#[cfg(feature = "plain-text")]
pub use plain_text::{PlainTextConfig, PlainTextErrors};
pub use resolver::{CompositeResolver, ControllerRegistry, Decline, HandlerSpec, Resolve};
pub use router::{
    AllowedMethodsChecker, NotFound, Path, PathPattern, Route, Router, RouterBuilder,
    RoutingContext, StopRouting,
};
