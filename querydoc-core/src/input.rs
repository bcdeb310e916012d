//! Single-or-many argument handling.
//!
//! Many builder operations accept either one field name (or sort URI) or a
//! sequence of them, and some route differently depending on which shape was
//! given. [`OneOrMany`] keeps that shape around instead of flattening it.

use serde::{Deserialize, Serialize};

/// Either a single value or an ordered sequence of values.
///
/// The distinction matters: `OneOrMany::Many(vec!["a"])` is still "many" even
/// though it holds one element.
///
/// # Example
///
/// ```ignore
/// use querydoc::input::Fields;
///
/// let single: Fields = "title".into();
/// let multiple: Fields = vec!["title", "body"].into();
///
/// assert!(!single.is_many());
/// assert!(multiple.is_many());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    /// A single value.
    One(T),
    /// An ordered sequence of values.
    Many(Vec<T>),
}

/// Field names, given as one name or several.
pub type Fields = OneOrMany<String>;

impl<T> OneOrMany<T> {
    /// Returns `true` if the value was given as a sequence.
    pub fn is_many(&self) -> bool {
        matches!(self, OneOrMany::Many(_))
    }

    /// Returns `true` if there is nothing to iterate over.
    pub fn is_empty(&self) -> bool {
        match self {
            OneOrMany::One(_) => false,
            OneOrMany::Many(items) => items.is_empty(),
        }
    }

    /// Iterates over the contained values in order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        match self {
            OneOrMany::One(item) => std::slice::from_ref(item).iter(),
            OneOrMany::Many(items) => items.iter(),
        }
    }

    /// Converts into a vector, normalizing a single value into a one-element list.
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::One(item) => vec![item],
            OneOrMany::Many(items) => items,
        }
    }
}

impl OneOrMany<String> {
    /// Converts into a vector, dropping empty strings.
    pub(crate) fn into_non_empty_vec(self) -> Vec<String> {
        self.into_vec().into_iter().filter(|item| !item.is_empty()).collect()
    }
}

impl From<&str> for OneOrMany<String> {
    fn from(value: &str) -> Self {
        OneOrMany::One(value.to_string())
    }
}

impl From<String> for OneOrMany<String> {
    fn from(value: String) -> Self {
        OneOrMany::One(value)
    }
}

impl From<&String> for OneOrMany<String> {
    fn from(value: &String) -> Self {
        OneOrMany::One(value.clone())
    }
}

impl From<Vec<String>> for OneOrMany<String> {
    fn from(values: Vec<String>) -> Self {
        OneOrMany::Many(values)
    }
}

impl From<Vec<&str>> for OneOrMany<String> {
    fn from(values: Vec<&str>) -> Self {
        OneOrMany::Many(values.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for OneOrMany<String> {
    fn from(values: &[&str]) -> Self {
        OneOrMany::Many(values.iter().map(|value| value.to_string()).collect())
    }
}

impl From<&[String]> for OneOrMany<String> {
    fn from(values: &[String]) -> Self {
        OneOrMany::Many(values.to_vec())
    }
}

impl<const N: usize> From<[&str; N]> for OneOrMany<String> {
    fn from(values: [&str; N]) -> Self {
        OneOrMany::Many(values.iter().map(|value| value.to_string()).collect())
    }
}
