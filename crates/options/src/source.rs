//! Read-only views over the mapping a job runner hands to the resolver.

use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

use indexmap::IndexMap;

/// A flat mapping from upper-cased option names to their raw string values.
pub trait OptionsSource {
    /// Returns the raw value published under `key`, if any.
    fn resolved_option(&self, key: &str) -> Option<&str>;
}

impl<T: OptionsSource + ?Sized> OptionsSource for &T {
    fn resolved_option(&self, key: &str) -> Option<&str> {
        (**self).resolved_option(key)
    }
}

impl<K, V, S> OptionsSource for HashMap<K, V, S>
where
    K: Borrow<str> + Hash + Eq,
    V: AsRef<str>,
    S: BuildHasher,
{
    fn resolved_option(&self, key: &str) -> Option<&str> {
        self.get(key).map(AsRef::as_ref)
    }
}

impl<K, V> OptionsSource for BTreeMap<K, V>
where
    K: Borrow<str> + Ord,
    V: AsRef<str>,
{
    fn resolved_option(&self, key: &str) -> Option<&str> {
        self.get(key).map(AsRef::as_ref)
    }
}

impl<K, V, S> OptionsSource for IndexMap<K, V, S>
where
    K: Borrow<str> + Hash + Eq,
    V: AsRef<str>,
    S: BuildHasher,
{
    fn resolved_option(&self, key: &str) -> Option<&str> {
        self.get(key).map(AsRef::as_ref)
    }
}
