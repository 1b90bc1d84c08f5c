use std::{
    any::{type_name, Any},
    fmt::Debug,
    sync::Arc,
};

use crate::http::Attribute;

/// Declared type of a callable parameter.
#[derive(Clone, Copy)]
pub enum ParamType {
    /// No type information: bound by name only.
    Untyped,
    /// The current request.
    Request,
    /// The rest of the chain.
    Next,
    /// A built-in value (`string`, `int`, ...) bound by name.
    Scalar(&'static str),
    /// A concrete type, bound from a request attribute holding it or from the
    /// container service registered under `name`.
    Object {
        name: &'static str,
        is: fn(&Attribute) -> bool,
    },
}

impl ParamType {
    pub fn object<T: Any + Send + Sync>() -> Self {
        Self::Object {
            name: type_name::<T>(),
            is: |attribute| attribute.is::<T>(),
        }
    }

    pub fn name(&self) -> Option<&'static str> {
        match self {
            Self::Untyped => None,
            Self::Request => Some("Request"),
            Self::Next => Some("Next"),
            Self::Scalar(name) => Some(name),
            Self::Object { name, .. } => Some(name),
        }
    }
}

impl Debug for ParamType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => f.write_str("untyped"),
        }
    }
}

/// One entry of a callable's parameter table.
#[derive(Clone, Debug)]
pub struct Param {
    name: String,
    kind: ParamType,
    default: Option<DefaultValue>,
    nullable: bool,
}

#[derive(Clone)]
struct DefaultValue(Attribute);

impl Debug for DefaultValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("<default>")
    }
}

impl Param {
    pub fn new(name: impl Into<String>, kind: ParamType) -> Self {
        Self {
            name: name.into(),
            kind,
            default: None,
            nullable: false,
        }
    }

    pub fn untyped(name: impl Into<String>) -> Self {
        Self::new(name, ParamType::Untyped)
    }

    pub fn request(name: impl Into<String>) -> Self {
        Self::new(name, ParamType::Request)
    }

    pub fn next(name: impl Into<String>) -> Self {
        Self::new(name, ParamType::Next)
    }

    pub fn scalar(name: impl Into<String>, type_name: &'static str) -> Self {
        Self::new(name, ParamType::Scalar(type_name))
    }

    pub fn string(name: impl Into<String>) -> Self {
        Self::scalar(name, "string")
    }

    pub fn object<T: Any + Send + Sync>(name: impl Into<String>) -> Self {
        Self::new(name, ParamType::object::<T>())
    }

    pub fn with_default<T: Any + Send + Sync>(mut self, value: T) -> Self {
        self.default = Some(DefaultValue(Arc::new(value)));
        self
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ParamType {
        self.kind
    }

    pub fn default_value(&self) -> Option<&Attribute> {
        self.default.as_ref().map(|default| &default.0)
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }
}
