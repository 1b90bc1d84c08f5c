use std::{collections::HashMap, sync::Arc};

use super::{Decline, HandlerSpec, Resolve};
use crate::{
    binder::{Callable, CallableMiddleware},
    config::RouterConfig,
    container::Container,
    pipeline::MiddlewareService,
};

/// Controller classes and their named methods.
#[derive(Clone, Debug, Default)]
pub struct ControllerRegistry {
    classes: HashMap<String, HashMap<String, Callable>>,
}

impl ControllerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        mut self,
        class: impl Into<String>,
        method: impl Into<String>,
        callable: Callable,
    ) -> Self {
        self.classes
            .entry(class.into())
            .or_default()
            .insert(method.into(), callable);
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains_key(class)
    }

    pub fn method(&self, class: &str, method: &str) -> Option<&Callable> {
        self.classes.get(class)?.get(method)
    }
}

/// Resolves `Class@method` references against a [ControllerRegistry].
pub struct ControllerResolver {
    namespace: String,
    separator: String,
    registry: Arc<ControllerRegistry>,
    container: Option<Arc<dyn Container>>,
}

impl ControllerResolver {
    pub fn new(
        config: &RouterConfig,
        registry: Arc<ControllerRegistry>,
        container: Option<Arc<dyn Container>>,
    ) -> Self {
        Self {
            namespace: config.controller_namespace.clone(),
            separator: config.controller_separator.clone(),
            registry,
            container,
        }
    }

    fn qualify(&self, class: &str) -> String {
        if self.namespace.is_empty() {
            class.to_string()
        } else {
            format!("{}::{class}", self.namespace)
        }
    }
}

impl Resolve for ControllerResolver {
    fn resolve(&self, spec: &HandlerSpec) -> Result<MiddlewareService, Decline> {
        let Some((class, method)) = (match spec {
            HandlerSpec::Name(name) if !self.separator.is_empty() => {
                name.split_once(self.separator.as_str())
            }
            _ => None,
        }) else {
            return Err(Decline::new(
                "argument is not a string that complies with the controller specification",
            ));
        };
        let class = self.qualify(class);
        if !self.registry.has_class(&class) {
            return Err(Decline::new(format!(
                "specified controller class ({class}) does not exist"
            )));
        }
        let callable = self.registry.method(&class, method).ok_or_else(|| {
            Decline::new(format!("controller class {class} has no method {method}"))
        })?;
        Ok(Arc::new(CallableMiddleware::new(
            callable.clone(),
            self.container.clone(),
        )))
    }
}
