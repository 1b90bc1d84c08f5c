use std::{any::Any, sync::Arc};

use http::{header::IntoHeaderName, HeaderMap, HeaderValue, Method};
use tracing::warn;

use super::{headers::HeaderMapExt, Attribute, Attributes};
use crate::{router::RoutingContext, Error, Result};

#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    pub path: String,
    pub version: String,
    headers: HeaderMap,
    attributes: Attributes,
    routing: Option<RoutingContext>,
}

impl Request {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            version: "HTTP/1.1".to_string(),
            headers: HeaderMap::new(),
            attributes: Attributes::new(),
            routing: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// Path without the query string.
    pub fn uri_path(&self) -> &str {
        self.path
            .split_once('?')
            .map_or(self.path.as_str(), |(path, _)| path)
    }

    pub fn query(&self) -> Option<&str> {
        self.path.split_once('?').map(|(_, query)| query)
    }

    pub fn with_header<K: IntoHeaderName>(mut self, key: K, value: impl AsRef<str>) -> Self {
        match HeaderValue::from_str(value.as_ref()) {
            Ok(value) => {
                self.headers.insert(key, value);
            }
            Err(e) => warn!("Dropping invalid request header value: {}", e),
        }
        self
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }

    pub fn attribute_as<T: Any>(&self, name: &str) -> Option<&T> {
        self.attributes.get_as(name)
    }

    /// Returns a copy of the request carrying the attribute. The receiver's
    /// attribute bag is left untouched in any other clone.
    pub fn with_attribute<T: Any + Send + Sync>(self, name: impl Into<String>, value: T) -> Self {
        self.with_shared_attribute(name, Arc::new(value))
    }

    pub fn with_shared_attribute(mut self, name: impl Into<String>, value: Attribute) -> Self {
        self.attributes.insert(name, value);
        self
    }

    /// Injects a fresh routing context built from the request path.
    pub fn with_routing_context(mut self) -> Result<Self> {
        if self.routing.is_some() {
            return Err(Error::InvalidRoutingContextOverride);
        }
        self.routing = Some(RoutingContext::new(self.uri_path()));
        Ok(self)
    }

    pub fn has_routing_context(&self) -> bool {
        self.routing.is_some()
    }

    pub fn routing_context(&self) -> Result<&RoutingContext> {
        self.routing.as_ref().ok_or(Error::MissingRoutingContext)
    }

    pub fn routing_context_mut(&mut self) -> Result<&mut RoutingContext> {
        self.routing.as_mut().ok_or(Error::MissingRoutingContext)
    }

    /// Captured path parameter by name.
    pub fn param(&self, name: &str) -> Result<&str> {
        self.routing_context()?.param(name)
    }
}

impl HeaderMapExt for Request {
    fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn with_attribute_copies_on_write() {
        let original = Request::get("/users").with_attribute("user", "alice".to_string());
        let updated = original.clone().with_attribute("user", "bob".to_string());
        assert_eq!(
            original.attribute_as::<String>("user").map(String::as_str),
            Some("alice")
        );
        assert_eq!(
            updated.attribute_as::<String>("user").map(String::as_str),
            Some("bob")
        );
    }

    #[test]
    fn injecting_twice_fails() {
        let request = Request::get("/users/22").with_routing_context().unwrap();
        assert!(request.has_routing_context());
        assert!(matches!(
            request.with_routing_context(),
            Err(Error::InvalidRoutingContextOverride)
        ));
    }

    #[test]
    fn context_is_required_for_params() {
        let request = Request::get("/users/22");
        assert!(matches!(
            request.param("id"),
            Err(Error::MissingRoutingContext)
        ));
    }

    #[test]
    fn query_is_split_from_the_path() {
        let request = Request::get("/search?q=rust");
        assert_eq!(request.uri_path(), "/search");
        assert_eq!(request.query(), Some("q=rust"));
        let routed = request.with_routing_context().unwrap();
        assert_eq!(
            routed.routing_context().unwrap().remaining_path(),
            "/search/"
        );
    }

    #[test]
    fn headers_are_readable() {
        let request = Request::get("/").with_header("x-api-token", "secret");
        assert_eq!(request.header_str("x-api-token"), Some("secret"));
    }
}
