use std::{
    any::Any,
    fmt::{Debug, Display},
    str::FromStr,
    sync::Arc,
};

use crate::{
    http::{Attribute, Request},
    pipeline::Next,
    Error, Result,
};

/// A bound parameter value.
#[derive(Clone)]
pub enum Argument {
    Request(Request),
    Next(Next),
    Value(Attribute),
    Absent,
}

impl Debug for Argument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Request(request) => write!(f, "Request({} {})", request.method, request.path),
            Self::Next(_) => f.write_str("Next"),
            Self::Value(_) => f.write_str("Value"),
            Self::Absent => f.write_str("Absent"),
        }
    }
}

/// Values bound for a callable, in parameter order.
#[derive(Clone, Default)]
pub struct Arguments(Vec<(String, Argument)>);

impl Debug for Arguments {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(self.0.iter().map(|(name, argument)| (name, argument)))
            .finish()
    }
}

impl Arguments {
    pub(crate) fn push(&mut self, name: &str, argument: Argument) {
        self.0.push((name.to_string(), argument));
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn argument(&self, index: usize) -> Option<&Argument> {
        self.0.get(index).map(|(_, argument)| argument)
    }

    pub fn request(&self, index: usize) -> Result<Request> {
        match self.entry(index)? {
            (_, Argument::Request(request)) => Ok(request.clone()),
            (name, _) => Err(mismatch(name, "the request")),
        }
    }

    pub fn next(&self, index: usize) -> Result<Next> {
        match self.entry(index)? {
            (_, Argument::Next(next)) => Ok(next.clone()),
            (name, _) => Err(mismatch(name, "the next handler")),
        }
    }

    /// String value of the argument. Accepts `String` and `&'static str`.
    pub fn string(&self, index: usize) -> Result<String> {
        let (name, argument) = self.entry(index)?;
        let Argument::Value(value) = argument else {
            return Err(mismatch(name, "a string"));
        };
        if let Some(value) = value.downcast_ref::<String>() {
            return Ok(value.clone());
        }
        value
            .downcast_ref::<&'static str>()
            .map(|value| value.to_string())
            .ok_or_else(|| mismatch(name, "a string"))
    }

    /// Parses the string value of the argument.
    pub fn parse<T>(&self, index: usize) -> Result<T>
    where
        T: FromStr,
        T::Err: Display,
    {
        let value = self.string(index)?;
        let (name, _) = self.entry(index)?;
        value.parse().map_err(|e: T::Err| {
            Error::new(format!(
                "Parameter \"{name}\" could not be parsed from \"{value}\": {e}"
            ))
        })
    }

    pub fn get<T: Any + Send + Sync>(&self, index: usize) -> Result<Arc<T>> {
        let (name, _) = self.entry(index)?;
        self.optional(index)?
            .ok_or_else(|| mismatch(name, std::any::type_name::<T>()))
    }

    /// Like [Arguments::get], mapping an absent argument to `None`.
    pub fn optional<T: Any + Send + Sync>(&self, index: usize) -> Result<Option<Arc<T>>> {
        match self.entry(index)? {
            (_, Argument::Absent) => Ok(None),
            (name, Argument::Value(value)) => value
                .clone()
                .downcast::<T>()
                .map(Some)
                .map_err(|_| mismatch(name, std::any::type_name::<T>())),
            (name, _) => Err(mismatch(name, std::any::type_name::<T>())),
        }
    }

    fn entry(&self, index: usize) -> Result<(&str, &Argument)> {
        self.0
            .get(index)
            .map(|(name, argument)| (name.as_str(), argument))
            .ok_or_else(|| Error::new(format!("No argument bound at position {index}")))
    }
}

fn mismatch(name: &str, expected: &str) -> Error {
    Error::new(format!("Parameter \"{name}\" is not {expected}"))
}
