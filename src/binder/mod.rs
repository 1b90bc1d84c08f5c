//! Binds a [Callable]'s declared parameters from the request, the routing
//! context and an optional [Container].

pub mod arguments;
pub mod callable;
pub mod param;

use std::sync::Arc;

use tracing::trace;

pub use arguments::{Argument, Arguments};
pub use callable::{Callable, CallableMiddleware};
pub use param::{Param, ParamType};

use crate::{
    container::Container,
    http::{Attribute, Request},
    pipeline::Next,
    utils::ordinal,
    Error, Result,
};

/// Resolves every parameter of `callable`, in declaration order.
///
/// For each parameter the first applicable source wins:
/// untyped parameters are looked up by name (routing params, then request
/// attributes) and fall back to their default; `Request` and `Next` are
/// injected directly; scalars are looked up by name; objects are searched
/// among the request attributes by type. Typed parameters then try the
/// container service named after the type, the default and finally `None`
/// when nullable.
pub fn bind(
    callable: &Callable,
    request: &Request,
    next: &Next,
    container: Option<&dyn Container>,
) -> Result<Arguments> {
    let mut arguments = Arguments::default();
    for (position, param) in callable.params().iter().enumerate() {
        let argument = bind_one(param, request, next, container)
            .ok_or_else(|| unresolvable(callable, position, param, container.is_some()))?;
        arguments.push(param.name(), argument);
    }
    trace!(callable = callable.name(), arguments = arguments.len(), "bound");
    Ok(arguments)
}

fn bind_one(
    param: &Param,
    request: &Request,
    next: &Next,
    container: Option<&dyn Container>,
) -> Option<Argument> {
    let kind = param.kind();
    match kind {
        ParamType::Untyped => {
            return by_name(param.name(), request)
                .or_else(|| param.default_value().cloned())
                .map(Argument::Value);
        }
        ParamType::Request => return Some(Argument::Request(request.clone())),
        ParamType::Next => return Some(Argument::Next(next.clone())),
        ParamType::Scalar(_) => {
            if let Some(value) = by_name(param.name(), request) {
                return Some(Argument::Value(value));
            }
        }
        ParamType::Object { is, .. } => {
            if let Some(value) = request.attributes().find(|attribute| is(attribute)) {
                return Some(Argument::Value(value.clone()));
            }
        }
    }
    if let (Some(container), Some(type_name)) = (container, kind.name()) {
        if container.has(type_name) {
            if let Some(service) = container.get(type_name) {
                return Some(Argument::Value(service));
            }
        }
    }
    if let Some(default) = param.default_value() {
        return Some(Argument::Value(default.clone()));
    }
    param.is_nullable().then_some(Argument::Absent)
}

fn by_name(name: &str, request: &Request) -> Option<Attribute> {
    let captured = request
        .routing_context()
        .ok()
        .and_then(|context| context.params().get(name))
        .map(|value| Arc::new(value.to_string()) as Attribute);
    captured.or_else(|| request.attribute(name).cloned())
}

fn unresolvable(callable: &Callable, position: usize, param: &Param, has_container: bool) -> Error {
    let kind = param.kind();
    let mut message = format!(
        "Could not resolve {} parameter \"{}\"",
        ordinal(position + 1),
        param.name()
    );
    if let Some(type_name) = kind.name() {
        message.push_str(&format!(" ({type_name})"));
    }
    message.push_str(&format!(" for \"{}\". Try ", callable.name()));
    if kind.name().is_none() {
        message.push_str("typing the parameter or ");
    }
    if !has_container {
        message.push_str("using a dependency injection container (adding the parameter as a service) or ");
    }
    message.push_str("adding the parameter to the request attributes.");
    Error::UnresolvableArgument(message)
}
