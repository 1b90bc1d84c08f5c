use std::{
    any::{type_name, Any},
    collections::HashMap,
    sync::Arc,
};

use crate::{
    http::Attribute,
    pipeline::{Handler, HandlerService, Middleware, MiddlewareService},
};

/// Read-only service lookup used to resolve handlers by id and to bind
/// callable parameters by declared type name.
pub trait Container: Send + Sync {
    fn has(&self, id: &str) -> bool;

    fn get(&self, id: &str) -> Option<Attribute>;
}

/// In-memory [Container].
///
/// Middleware and handlers are stored as `Arc<dyn Middleware>` and
/// `Arc<dyn Handler>` so the resolver can recover them.
#[derive(Clone, Default)]
pub struct ServiceMap {
    services: HashMap<String, Attribute>,
}

impl ServiceMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<String>, service: Attribute) {
        self.services.insert(id.into(), service);
    }

    pub fn with_service<T: Any + Send + Sync>(mut self, id: impl Into<String>, service: T) -> Self {
        self.insert(id, Arc::new(service));
        self
    }

    /// Registers the value under its type name.
    pub fn with_type<T: Any + Send + Sync>(self, service: T) -> Self {
        self.with_service(type_name::<T>(), service)
    }

    pub fn with_middleware(self, id: impl Into<String>, middleware: impl Middleware) -> Self {
        let service: MiddlewareService = Arc::new(middleware);
        self.with_service(id, service)
    }

    pub fn with_handler(self, id: impl Into<String>, handler: impl Handler) -> Self {
        let service: HandlerService = Arc::new(handler);
        self.with_service(id, service)
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

impl Container for ServiceMap {
    fn has(&self, id: &str) -> bool {
        self.services.contains_key(id)
    }

    fn get(&self, id: &str) -> Option<Attribute> {
        self.services.get(id).cloned()
    }
}

impl<C: Container + ?Sized> Container for Arc<C> {
    fn has(&self, id: &str) -> bool {
        (**self).has(id)
    }

    fn get(&self, id: &str) -> Option<Attribute> {
        (**self).get(id)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    struct Mailer(&'static str);

    #[test]
    fn services_are_found_by_id_and_type() {
        let services = ServiceMap::new()
            .with_service("greeting", "hello".to_string())
            .with_type(Mailer("smtp"));
        assert!(services.has("greeting"));
        assert!(services.has(type_name::<Mailer>()));
        assert!(!services.has("missing"));

        let mailer = services.get(type_name::<Mailer>()).unwrap();
        assert_eq!(mailer.downcast_ref::<Mailer>().unwrap().0, "smtp");
        assert_eq!(services.len(), 2);
    }
}
