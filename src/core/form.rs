// src/core/form.rs
use super::html::{Input, InputKind};

/// Ordered form fields: the request body of every step.
///
/// Re-inserting a name replaces its value in place, so a field keeps the
/// position where the page first showed it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormData {
    fields: Vec<(String, String)>,
}

impl FormData {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((name, value)),
        }
    }

    /// Apply `other` on top of `self`, in `other`'s order.
    pub fn merge(&mut self, other: &FormData) {
        for (k, v) in other.iter() {
            self.insert(k, v);
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize { self.fields.len() }

    pub fn is_empty(&self) -> bool { self.fields.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Borrow as `(name, value)` pairs, the shape url-encoding wants.
    pub fn as_pairs(&self) -> &[(String, String)] {
        &self.fields
    }

    /// What a browser would submit for these inputs untouched:
    /// hidden and text fields, plus radios that are pre-checked.
    pub fn defaults_of(inputs: &[Input]) -> Self {
        let mut data = FormData::new();
        for input in inputs {
            let keep = match input.kind {
                InputKind::Hidden | InputKind::Text => true,
                InputKind::Radio => input.checked,
                InputKind::Other => false,
            };
            if keep {
                data.insert(input.name.as_str(), input.value.as_str());
            }
        }
        data
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut data = FormData::new();
        data.extend(iter);
        data
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for FormData {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}
