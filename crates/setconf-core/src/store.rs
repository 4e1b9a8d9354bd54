//! Merged setting store and key resolution
//!
//! Keys are stored exactly as their source spelled them. Lookups reconcile the
//! requested key against the stored spellings in a fixed order:
//!
//! 1. The requested key verbatim
//! 2. The requested key, then its snake_case, kebab-case and camelCase forms
//! 3. The same candidates again, compared case-insensitively against every
//!    stored key (properties first, then flags)
//!
//! The first hit wins. A miss is not an error at this level.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use indexmap::{IndexMap, IndexSet};

use crate::case::{to_camel_case, to_kebab_case, to_snake_case};
use crate::value::SettingValue;

/// Text a flag reads as
const FLAG_VALUE: &str = "true";

/// Shared across stores so a generation identifies one store state
static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

fn next_generation() -> u64 {
    NEXT_GENERATION.fetch_add(1, Ordering::Relaxed)
}

/// Where a requested key was found
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySource {
    /// The key as the caller asked for it
    pub key: String,
    /// The physical key that satisfied the lookup
    pub matching_key: String,
    /// Source descriptor of the physical key
    pub source: String,
}

impl fmt::Display for KeySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.key == self.matching_key {
            write!(f, "Key \"{}\" was read from {}", self.key, self.source)
        } else {
            write!(
                f,
                "Key \"{}\" was read as \"{}\" from {}",
                self.key, self.matching_key, self.source
            )
        }
    }
}

/// Merged key/value store with per-key provenance
///
/// Later writes to the same physical key replace the value and its source.
/// Properties and flags never share a physical key: writing one kind removes
/// the other.
#[derive(Debug, Clone, Default)]
pub struct SettingStore {
    properties: IndexMap<String, SettingValue>,
    flags: IndexSet<String>,
    sources: HashMap<String, String>,
    generation: u64,
}

impl SettingStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a property
    pub fn add_property(
        &mut self,
        key: impl Into<String>,
        value: impl Into<SettingValue>,
        source: impl Into<String>,
    ) {
        let key = key.into();
        self.flags.shift_remove(&key);
        self.sources.insert(key.clone(), source.into());
        self.properties.insert(key, value.into());
        self.generation = next_generation();
    }

    /// Insert or replace a flag
    pub fn add_flag(&mut self, key: impl Into<String>, source: impl Into<String>) {
        let key = key.into();
        self.properties.shift_remove(&key);
        self.sources.insert(key.clone(), source.into());
        self.flags.insert(key);
        self.generation = next_generation();
    }

    /// Remove every property, flag and source
    pub fn clear(&mut self) {
        self.properties.clear();
        self.flags.clear();
        self.sources.clear();
        self.generation = next_generation();
    }

    /// Number of stored keys (properties and flags)
    pub fn len(&self) -> usize {
        self.properties.len() + self.flags.len()
    }

    /// Check if the store holds no keys
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Changes on every mutation, for invalidating memoized reads
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Resolve a requested key to the physical key that should satisfy it
    pub fn find_matching_key(&self, key: &str) -> Option<&str> {
        if let Some(exact) = self.stored_key(key) {
            return Some(exact);
        }

        let candidates = key_representations(key);

        if let Some(found) = candidates.iter().find_map(|c| self.stored_key(c)) {
            log::trace!("Key '{}' matched '{}' by naming convention", key, found);
            return Some(found);
        }

        let found = candidates
            .iter()
            .find_map(|c| self.stored_key_ignoring_case(c));
        if let Some(found) = found {
            log::trace!("Key '{}' matched '{}' ignoring case", key, found);
        }
        found
    }

    /// Look up the value for a requested key; flags read as `"true"`
    pub fn find_value(&self, key: &str) -> Option<SettingValue> {
        let matching = self.find_matching_key(key)?;
        self.value_of(matching)
    }

    /// Provenance of a requested key, if it resolves
    pub fn get_source(&self, key: &str) -> Option<KeySource> {
        let matching = self.find_matching_key(key)?;
        let source = self.sources.get(matching)?;
        Some(KeySource {
            key: key.to_string(),
            matching_key: matching.to_string(),
            source: source.clone(),
        })
    }

    /// Every stored key with its textual value, properties before flags
    pub fn get_all(&self) -> IndexMap<String, String> {
        let mut all: IndexMap<String, String> = self
            .properties
            .iter()
            .map(|(k, v)| (k.clone(), v.to_string()))
            .collect();
        all.extend(self.flags.iter().map(|f| (f.clone(), FLAG_VALUE.to_string())));
        all
    }

    /// Every stored key with its source descriptor, properties before flags
    pub fn get_all_sources(&self) -> IndexMap<String, String> {
        self.properties
            .keys()
            .chain(self.flags.iter())
            .filter_map(|k| self.sources.get(k).map(|s| (k.clone(), s.clone())))
            .collect()
    }

    fn value_of(&self, physical_key: &str) -> Option<SettingValue> {
        if let Some(value) = self.properties.get(physical_key) {
            return Some(value.clone());
        }
        self.flags
            .contains(physical_key)
            .then(|| SettingValue::simple(FLAG_VALUE))
    }

    /// The stored spelling of `key` if it is present verbatim
    fn stored_key(&self, key: &str) -> Option<&str> {
        self.properties
            .get_key_value(key)
            .map(|(k, _)| k.as_str())
            .or_else(|| self.flags.get(key).map(String::as_str))
    }

    fn stored_key_ignoring_case(&self, key: &str) -> Option<&str> {
        let lower = key.to_lowercase();
        self.properties
            .keys()
            .chain(self.flags.iter())
            .find(|k| k.to_lowercase() == lower)
            .map(String::as_str)
    }
}

/// Candidate spellings in precedence order
fn key_representations(key: &str) -> [String; 4] {
    [
        key.to_string(),
        to_snake_case(key),
        to_kebab_case(key),
        to_camel_case(key),
    ]
}
