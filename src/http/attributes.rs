use std::{any::Any, fmt::Debug, sync::Arc};

/// A type-erased value carried by a request or served by a container.
pub type Attribute = Arc<dyn Any + Send + Sync>;

/// Named request attributes in insertion order.
///
/// Cloning is cheap: entries live behind an `Arc` and are only copied when a
/// clone is written to.
#[derive(Clone, Default)]
pub struct Attributes(Arc<Vec<(String, Attribute)>>);

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Attribute> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    pub fn get_as<T: Any>(&self, name: &str) -> Option<&T> {
        self.get(name).and_then(|value| value.downcast_ref::<T>())
    }

    /// First attribute, in insertion order, accepted by `predicate`.
    pub fn find<P>(&self, predicate: P) -> Option<&Attribute>
    where
        P: Fn(&Attribute) -> bool,
    {
        self.0
            .iter()
            .map(|(_, value)| value)
            .find(|value| predicate(value))
    }

    /// First attribute holding a `T`.
    pub fn find_as<T: Any>(&self) -> Option<&T> {
        self.0
            .iter()
            .find_map(|(_, value)| value.downcast_ref::<T>())
    }

    /// Replaces an existing entry in place, or appends a new one.
    pub fn insert(&mut self, name: impl Into<String>, value: Attribute) {
        let name = name.into();
        let entries = Arc::make_mut(&mut self.0);
        match entries.iter_mut().find(|(key, _)| *key == name) {
            Some((_, slot)) => *slot = value,
            None => entries.push((name, value)),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(key, _)| key.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Debug for Attributes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn writes_do_not_leak_into_clones() {
        let mut original = Attributes::new();
        original.insert("user", Arc::new("alice".to_string()));
        let mut copy = original.clone();
        copy.insert("user", Arc::new("bob".to_string()));
        copy.insert("role", Arc::new(7_u8));

        assert_eq!(original.get_as::<String>("user").map(String::as_str), Some("alice"));
        assert_eq!(copy.get_as::<String>("user").map(String::as_str), Some("bob"));
        assert_eq!(original.len(), 1);
        assert_eq!(copy.names().collect::<Vec<_>>(), vec!["user", "role"]);
    }

    #[test]
    fn finds_by_type_in_insertion_order() {
        let mut attributes = Attributes::new();
        attributes.insert("a", Arc::new(1_u32));
        attributes.insert("b", Arc::new("text".to_string()));
        attributes.insert("c", Arc::new(2_u32));

        assert_eq!(attributes.find_as::<u32>(), Some(&1));
        assert!(attributes.find_as::<i64>().is_none());
        assert!(attributes.find(|value| value.is::<String>()).is_some());
    }
}
