// Copyright 2025 the Linknav Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Path and payload model: the values every navigation command carries.

use alloc::string::String;
use core::borrow::Borrow;
use core::fmt;

use hashbrown::HashMap;
use smallvec::SmallVec;

/// Identifier naming a screen kind.
///
/// Paths are opaque: two segments match only when their strings are equal.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct PathSegment(String);

impl PathSegment {
    /// Create a segment from anything string-like.
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// The segment as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` for the empty segment, which never matches a route.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for PathSegment {
    fn from(path: &str) -> Self {
        Self(path.into())
    }
}

impl From<String> for PathSegment {
    fn from(path: String) -> Self {
        Self(path)
    }
}

impl From<&String> for PathSegment {
    fn from(path: &String) -> Self {
        Self(path.clone())
    }
}

impl From<&Self> for PathSegment {
    fn from(path: &Self) -> Self {
        path.clone()
    }
}

impl AsRef<str> for PathSegment {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for PathSegment {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for PathSegment {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for PathSegment {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Flat string-keyed data passed alongside a navigation command.
///
/// A payload belongs to one call; it is never merged with the payload of an
/// earlier call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct Payload(HashMap<String, String>);

impl Payload {
    /// Create an empty payload.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert a value, returning the previous one for `key`.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    /// Look up a value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Remove a value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.remove(key)
    }

    /// Returns `true` if `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the payload has no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over entries in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Payload {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for Payload {
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

/// Value types a navigation item can carry.
///
/// `Default` is the empty value, used when a command carries only paths
/// (for example `back_to_last`). Implemented for every type that satisfies the
/// bounds; the provided shapes are [`Payload`] and `String` (an encoded item).
pub trait ItemValue: Clone + Default + fmt::Debug + 'static {}

impl<T: Clone + Default + fmt::Debug + 'static> ItemValue for T {}

/// A batch of screens to push or install in one operation.
///
/// Every path in the item is resolved in order and all resulting screens share
/// the same value.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinkItem<V = Payload> {
    paths: SmallVec<[PathSegment; 4]>,
    value: V,
}

impl<V> LinkItem<V> {
    /// Create an item from a list of paths and a value.
    pub fn new<I>(paths: I, value: V) -> Self
    where
        I: IntoIterator,
        I::Item: Into<PathSegment>,
    {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
            value,
        }
    }

    /// Split a slash-separated path into segments.
    ///
    /// Empty segments (leading, trailing or doubled slashes) are skipped. No
    /// other parsing is performed.
    ///
    /// ```
    /// use linknav_stack::{LinkItem, Payload};
    ///
    /// let item = LinkItem::from_path_str("/home//detail/", Payload::new());
    /// assert_eq!(item.paths(), ["home", "detail"]);
    /// ```
    pub fn from_path_str(path: &str, value: V) -> Self {
        Self::new(path.split('/').filter(|s| !s.is_empty()), value)
    }

    /// The paths of this item, in push order.
    pub fn paths(&self) -> &[PathSegment] {
        &self.paths
    }

    /// The first path, used by operations that address a single screen.
    pub fn first_path(&self) -> Option<&PathSegment> {
        self.paths.first()
    }

    /// The value shared by every screen of this item.
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Consume the item, returning its value.
    pub fn into_value(self) -> V {
        self.value
    }

    /// Returns `true` if the item carries no paths.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

impl<V: Default> LinkItem<V> {
    /// A single path with the empty value.
    pub fn path(path: impl Into<PathSegment>) -> Self {
        Self::new([path.into()], V::default())
    }

    /// Several paths with the empty value.
    pub fn paths_only<I>(paths: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<PathSegment>,
    {
        Self::new(paths, V::default())
    }
}
