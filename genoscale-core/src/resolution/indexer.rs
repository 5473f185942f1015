use std::collections::HashMap;

/// Assigns stable indices to categories in the order they are first seen.
/// Indices are never reassigned, so values keep their colors and positions
/// when the active domain shrinks and grows again.
#[derive(Debug, Clone, Default)]
pub struct CategoricalIndexer {
    values: Vec<String>,
    indices: HashMap<String, usize>,
}

impl CategoricalIndexer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, value: &str) -> usize {
        if let Some(&i) = self.indices.get(value) {
            return i;
        }
        let i = self.values.len();
        self.indices.insert(value.to_string(), i);
        self.values.push(value.to_string());
        i
    }

    pub fn add_all<'a>(&mut self, values: impl IntoIterator<Item = &'a String>) {
        for value in values {
            self.add(value);
        }
    }

    pub fn index(&self, value: &str) -> Option<usize> {
        self.indices.get(value).copied()
    }

    /// Everything seen so far, in index order
    pub fn domain(&self) -> &[String] {
        &self.values
    }

    /// The indexed order restricted to `active` values.
    pub fn ordered(&self, active: &[String]) -> Vec<String> {
        let mut flags = vec![false; self.values.len()];
        for value in active {
            if let Some(i) = self.index(value) {
                flags[i] = true;
            }
        }
        self.values
            .iter()
            .zip(flags)
            .filter(|(_, active)| *active)
            .map(|(value, _)| value.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_indices_are_stable() {
        let mut indexer = CategoricalIndexer::new();
        indexer.add_all(&strings(&["b", "a"]));
        indexer.add_all(&strings(&["c", "b"]));
        assert_eq!(indexer.index("b"), Some(0));
        assert_eq!(indexer.index("c"), Some(2));
        assert_eq!(indexer.domain(), strings(&["b", "a", "c"]).as_slice());
    }

    #[test]
    fn test_ordered_filters_inactive_values() {
        let mut indexer = CategoricalIndexer::new();
        indexer.add_all(&strings(&["x", "y", "z"]));
        assert_eq!(indexer.ordered(&strings(&["z", "x"])), strings(&["x", "z"]));
        assert!(indexer.ordered(&[]).is_empty());
    }
}
