use std::collections::{hash_map, HashMap};

/// Named path parameters bound by a match.
///
/// Names are stored lowercased and lookups lowercase the queried name, so
/// `get("ParaM")` finds a value registered as `:param`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Params {
    values: HashMap<String, String>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values
            .get(&name.to_lowercase())
            .map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(&name.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> hash_map::Iter<'_, String, String> {
        self.values.iter()
    }

    pub(crate) fn insert(&mut self, name: String, value: String) {
        self.values.insert(name.to_lowercase(), value);
    }
}

impl<'a> IntoIterator for &'a Params {
    type Item = (&'a String, &'a String);
    type IntoIter = hash_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}
