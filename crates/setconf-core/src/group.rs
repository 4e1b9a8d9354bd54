//! Named setting groups and declared settings
//!
//! A [`Group`] is a named scope with an optional parent; its full name is the
//! dotted path from the root. A [`Setting`] binds a key, a type and an
//! optional default so it can be read repeatedly without restating them.

use std::fmt;
use std::sync::{Arc, Mutex};

use crate::error::Result;
use crate::settings::Settings;
use crate::types::SettingType;

/// Named scope for setting keys
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    name: String,
    parent: Option<Arc<Group>>,
}

impl Group {
    /// Create a top-level group
    pub fn root(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
        }
    }

    /// Create a group inside `parent`
    pub fn nested(parent: &Group, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: Some(Arc::new(parent.clone())),
        }
    }

    /// This group's own name
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<&Group> {
        self.parent.as_deref()
    }

    /// Names from the root down to this group, joined with `.`
    pub fn full_name(&self) -> String {
        let mut names = vec![self.name.as_str()];
        let mut current = self.parent();
        while let Some(group) = current {
            names.push(group.name.as_str());
            current = group.parent();
        }
        names.reverse();
        names.join(".")
    }

    /// Key of a setting declared in this group
    pub fn key(&self, name: &str) -> String {
        format!("{}.{}", self.full_name(), name)
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.full_name())
    }
}

/// A declared setting: key, type and optional default
#[derive(Debug, Clone)]
pub struct Setting<T> {
    key: String,
    setting_type: SettingType<T>,
    default: Option<T>,
}

impl<T: Clone + 'static> Setting<T> {
    pub fn new(key: impl Into<String>, setting_type: SettingType<T>) -> Self {
        Self {
            key: key.into(),
            setting_type,
            default: None,
        }
    }

    /// Declare a setting named `name` inside `group`
    pub fn in_group(group: &Group, name: &str, setting_type: SettingType<T>) -> Self {
        Self::new(group.key(name), setting_type)
    }

    /// Use `default` when the key is missing
    pub fn with_default(mut self, default: T) -> Self {
        self.default = Some(default);
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn default_value(&self) -> Option<&T> {
        self.default.as_ref()
    }

    /// Read the value, falling back to the default
    pub fn get(&self, settings: &Settings) -> Result<T> {
        settings.get(&self.setting_type, &self.key, self.default.clone())
    }

    /// Read the value if the key is present
    pub fn get_optional(&self, settings: &Settings) -> Result<Option<T>> {
        match settings.get_optional(&self.setting_type, &self.key)? {
            Some(value) => Ok(Some(value)),
            None => Ok(self.default.clone()),
        }
    }

    /// Fail now if the setting can't be read
    pub fn check(&self, settings: &Settings) -> Result<()> {
        self.get(settings).map(|_| ())
    }

    /// Wrap in a memoizing reader
    pub fn cached(self) -> Cached<T> {
        Cached::new(self)
    }
}

/// A [`Setting`] that remembers its last successful read
///
/// The memo is tied to the settings generation it was read from, so any
/// mutation of the settings (including `clear`) causes a fresh read.
#[derive(Debug)]
pub struct Cached<T> {
    setting: Setting<T>,
    memo: Mutex<Option<(u64, T)>>,
}

impl<T: Clone + 'static> Cached<T> {
    pub fn new(setting: Setting<T>) -> Self {
        Self {
            setting,
            memo: Mutex::new(None),
        }
    }

    pub fn setting(&self) -> &Setting<T> {
        &self.setting
    }

    /// Read the value, reusing the memo while the settings are unchanged
    pub fn get(&self, settings: &Settings) -> Result<T> {
        let generation = settings.generation();
        let mut memo = self.memo.lock().unwrap_or_else(|e| e.into_inner());

        if let Some((memo_generation, value)) = memo.as_ref() {
            if *memo_generation == generation {
                return Ok(value.clone());
            }
        }

        let value = self.setting.get(settings)?;
        *memo = Some((generation, value.clone()));
        Ok(value)
    }

    /// Drop the memo
    pub fn invalidate(&self) {
        *self.memo.lock().unwrap_or_else(|e| e.into_inner()) = None;
    }
}
