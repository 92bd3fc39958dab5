//! Named vector catalogues.

use crate::value::Vector;

/// Ordered name → tuple map. Insertion order is preserved; inserting an
/// existing name replaces the tuple in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VectorCatalogue {
    entries: Vec<(String, Vector)>,
}

impl VectorCatalogue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite. Returns the previous tuple under `name`.
    pub fn insert(&mut self, name: impl Into<String>, vector: Vector) -> Option<Vector> {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => Some(std::mem::replace(slot, vector)),
            None => {
                self.entries.push((name, vector));
                None
            }
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<Vector> {
        let idx = self.entries.iter().position(|(n, _)| n == name)?;
        Some(self.entries.remove(idx).1)
    }

    pub fn get(&self, name: &str) -> Option<&Vector> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn get_index(&self, index: usize) -> Option<(&str, &Vector)> {
        self.entries.get(index).map(|(n, v)| (n.as_str(), v))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(n, _)| n.as_str()).collect()
    }

    /// Tuples in insertion order.
    pub fn vectors(&self) -> Vec<Vector> {
        self.entries.iter().map(|(_, v)| v.clone()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Vector)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector;

    #[test]
    fn overwrite_keeps_position() {
        let mut cat = VectorCatalogue::new();
        cat.insert("zero", vector![0, 0]);
        cat.insert("neg", vector![-1, 1]);
        let prev = cat.insert("zero", vector![0, 1]);
        assert_eq!(prev, Some(vector![0, 0]));
        assert_eq!(cat.names(), vec!["zero", "neg"]);
        assert_eq!(cat.get_index(0), Some(("zero", &vector![0, 1])));
    }

    #[test]
    fn remove_and_lookup() {
        let mut cat = VectorCatalogue::new();
        cat.insert("a", vector![1]);
        cat.insert("b", vector![2]);
        assert_eq!(cat.remove("a"), Some(vector![1]));
        assert_eq!(cat.remove("a"), None);
        assert!(!cat.contains("a"));
        assert_eq!(cat.vectors(), vec![vector![2]]);
        assert_eq!(cat.get_index(1), None);
    }
}
