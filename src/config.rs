#[cfg(feature = "serde")]
use serde::Deserialize;

/// Router-wide settings used while handlers are resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RouterConfig {
    /// Prefix joined to the class of a controller reference with `::`.
    pub controller_namespace: String,
    /// Splits `Class@method` references.
    pub controller_separator: String,
    /// Fetch container services on each request instead of at registration.
    pub lazy_services: bool,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            controller_namespace: String::new(),
            controller_separator: "@".to_string(),
            lazy_services: true,
        }
    }
}

impl RouterConfig {
    pub fn with_controller_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.controller_namespace = namespace.into();
        self
    }

    pub fn with_controller_separator(mut self, separator: impl Into<String>) -> Self {
        self.controller_separator = separator.into();
        self
    }

    pub fn with_lazy_services(mut self, lazy: bool) -> Self {
        self.lazy_services = lazy;
        self
    }
}
