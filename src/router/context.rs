use http::Method;

use super::pattern::PathMatch;
use crate::{Error, Result};

/// Captured path parameters in capture order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(Vec<(String, String)>);

impl Params {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Later captures overwrite earlier ones with the same name.
    pub fn insert(&mut self, name: String, value: String) {
        match self.0.iter_mut().find(|(key, _)| *key == name) {
            Some((_, slot)) => *slot = value,
            None => self.0.push((name, value)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Per-request routing state.
///
/// Tracks the part of the path no [Path](super::Path) has consumed yet, the
/// parameters captured so far and every method offered by a route whose path
/// matched but whose method did not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingContext {
    remaining: String,
    params: Params,
    rejected: Vec<Method>,
}

impl RoutingContext {
    pub(crate) fn new(path: &str) -> Self {
        Self {
            remaining: normalize(path),
            params: Params::default(),
            rejected: Vec::new(),
        }
    }

    /// Unmatched part of the path. Always starts and ends with `/`.
    pub fn remaining_path(&self) -> &str {
        &self.remaining
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn param(&self, name: &str) -> Result<&str> {
        self.params
            .get(name)
            .ok_or_else(|| Error::MissingRoutingParameter(name.to_string()))
    }

    pub fn allowed_methods(&self) -> &[Method] {
        &self.rejected
    }

    pub fn is_method_not_allowed(&self) -> bool {
        !self.rejected.is_empty()
    }

    /// Stores the captures and drops the matched prefix. Returns the state as
    /// it was before the match.
    pub(crate) fn consume(&mut self, found: PathMatch) -> Checkpoint {
        let checkpoint = Checkpoint {
            remaining: self.remaining.clone(),
            params: self.params.clone(),
        };
        let PathMatch { consumed, params } = found;
        for (name, value) in params {
            self.params.insert(name, value);
        }
        self.remaining = normalize(self.remaining.get(consumed..).unwrap_or_default());
        checkpoint
    }

    pub(crate) fn reject(&mut self, methods: &[Method]) {
        for method in methods {
            if !self.rejected.contains(method) {
                self.rejected.push(method.clone());
            }
        }
    }

    /// Restores the remaining path and params. Rejected methods are kept.
    pub(crate) fn rewind(&mut self, checkpoint: Checkpoint) {
        self.remaining = checkpoint.remaining;
        self.params = checkpoint.params;
    }
}

/// Remaining path and params saved by [RoutingContext::consume].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Checkpoint {
    remaining: String,
    params: Params,
}

#[cfg(test)]
impl Checkpoint {
    pub(crate) fn remaining_path(&self) -> &str {
        &self.remaining
    }
}

fn normalize(path: &str) -> String {
    let mut normalized = String::with_capacity(path.len() + 2);
    if !path.starts_with('/') {
        normalized.push('/');
    }
    normalized.push_str(path);
    if !normalized.ends_with('/') {
        normalized.push('/');
    }
    normalized
}
