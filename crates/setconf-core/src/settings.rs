//! Settings facade
//!
//! [`Settings`] owns a [`SettingStore`], fills it from bulk sources and reads
//! typed values back out of it. Sources added later take precedence over
//! sources added earlier.

use std::panic::Location;
use std::path::{Path, PathBuf};
use std::sync::{OnceLock, RwLock};

use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Utc};
use indexmap::IndexMap;
use num_bigint::BigInt;

use crate::args;
use crate::error::{Error, Result};
use crate::locator::ConfigFileLocator;
use crate::store::SettingStore;
use crate::types::{self, Period, SettingType};
use crate::value::{Node, SettingValue};

/// Source descriptor for environment variables
pub const ENVIRONMENT_SOURCE: &str = "environment variables";

/// Source descriptor for command line parameters
pub const COMMAND_LINE_SOURCE: &str = "command line parameters";

static GLOBAL_SETTINGS: OnceLock<RwLock<Settings>> = OnceLock::new();

/// Process-wide settings, built on first use from environment variables and
/// config files discovered in the working directory
pub fn global() -> &'static RwLock<Settings> {
    GLOBAL_SETTINGS.get_or_init(|| {
        let mut settings = Settings::new();
        settings.with_defaults();
        RwLock::new(settings)
    })
}

/// Format of a config document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Json,
    /// `key = value` lines; also used for `.conf` files
    Properties,
}

impl ConfigFormat {
    /// Pick a format from a file extension
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_lowercase().as_str() {
            "yaml" | "yml" => Some(ConfigFormat::Yaml),
            "json" => Some(ConfigFormat::Json),
            "properties" | "conf" => Some(ConfigFormat::Properties),
            _ => None,
        }
    }

    /// Pick a format from a path's extension
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    /// Parse a document into flat `(key, value)` entries
    pub fn parse(self, text: &str) -> std::result::Result<Vec<(String, SettingValue)>, String> {
        match self {
            ConfigFormat::Yaml => {
                if text.trim().is_empty() {
                    return Ok(Vec::new());
                }
                let node: Node = serde_yaml::from_str(text).map_err(|e| e.to_string())?;
                Ok(node.flatten())
            }
            ConfigFormat::Json => {
                let node: Node = serde_json::from_str(text).map_err(|e| e.to_string())?;
                Ok(node.flatten())
            }
            ConfigFormat::Properties => Ok(parse_properties(text)
                .into_iter()
                .map(|(k, v)| (k, SettingValue::Simple(v)))
                .collect()),
        }
    }
}

/// Parse `key = value` / `key: value` lines
///
/// Blank lines and lines starting with `#` or `!` are skipped. A trailing
/// backslash continues the value on the next line. A line without a
/// separator is a key with an empty value.
fn parse_properties(text: &str) -> Vec<(String, String)> {
    let mut entries = Vec::new();
    let mut pending = String::new();

    for line in text.lines() {
        let line = line.trim_start();
        let is_comment = line.starts_with('#') || line.starts_with('!');
        if pending.is_empty() && (line.is_empty() || is_comment) {
            continue;
        }

        match line.strip_suffix('\\') {
            Some(continued) => {
                pending.push_str(continued);
                continue;
            }
            None => pending.push_str(line),
        }

        entries.push(split_property(&pending));
        pending.clear();
    }

    if !pending.is_empty() {
        entries.push(split_property(&pending));
    }

    entries
}

fn split_property(line: &str) -> (String, String) {
    match line.find(['=', ':']) {
        Some(idx) => (
            line[..idx].trim().to_string(),
            line[idx + 1..].trim().to_string(),
        ),
        None => (line.trim().to_string(), String::new()),
    }
}

fn absolute_path(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Settings read from any number of sources
#[derive(Debug, Clone, Default)]
pub struct Settings {
    store: SettingStore,
}

macro_rules! typed_getters {
    ($($get:ident, $get_optional:ident => $ty:ty = $setting_type:expr;)*) => {
        $(
            #[doc = concat!("Read `", stringify!($ty), "`, failing if the key is missing")]
            pub fn $get(&self, key: &str) -> Result<$ty> {
                self.get(&$setting_type, key, None)
            }

            #[doc = concat!("Read `", stringify!($ty), "` if the key is present")]
            pub fn $get_optional(&self, key: &str) -> Result<Option<$ty>> {
                self.get_optional(&$setting_type, key)
            }
        )*
    };
}

impl Settings {
    /// Create empty settings
    pub fn new() -> Self {
        Self::default()
    }

    /// The underlying store
    pub fn store(&self) -> &SettingStore {
        &self.store
    }

    /// Mutable access to the underlying store
    pub fn store_mut(&mut self) -> &mut SettingStore {
        &mut self.store
    }

    /// Remove all settings
    pub fn clear(&mut self) {
        self.store.clear();
    }

    /// Identifies the current contents, changing on every mutation
    pub fn generation(&self) -> u64 {
        self.store.generation()
    }

    /// Read a typed value, falling back to `default` when the key is missing
    ///
    /// A present value that fails to convert is an error even when a default
    /// is given.
    pub fn get<T: 'static>(
        &self,
        setting_type: &SettingType<T>,
        key: &str,
        default: Option<T>,
    ) -> Result<T> {
        match self.get_optional(setting_type, key)? {
            Some(value) => Ok(value),
            None => default.ok_or_else(|| Error::required_key_missing(key)),
        }
    }

    /// Read a typed value if the key is present
    pub fn get_optional<T: 'static>(
        &self,
        setting_type: &SettingType<T>,
        key: &str,
    ) -> Result<Option<T>> {
        let Some(value) = self.store.find_value(key) else {
            return Ok(None);
        };
        setting_type
            .transform(&value)
            .map(Some)
            .map_err(|e| Error::setting_parse(key, value.to_string(), e))
    }

    /// Raw stored value for a key
    pub fn get_value(&self, key: &str) -> Option<SettingValue> {
        self.store.find_value(key)
    }

    typed_getters! {
        get_string, get_optional_string => String = types::string();
        get_int, get_optional_int => i32 = types::int();
        get_long, get_optional_long => i64 = types::long();
        get_float, get_optional_float => f32 = types::float();
        get_double, get_optional_double => f64 = types::double();
        get_big_integer, get_optional_big_integer => BigInt = types::big_integer();
        get_big_decimal, get_optional_big_decimal => BigDecimal = types::big_decimal();
        get_bool, get_optional_bool => bool = types::boolean();
        get_instant, get_optional_instant => DateTime<Utc> = types::instant();
        get_local_time, get_optional_local_time => NaiveTime = types::local_time();
        get_local_date, get_optional_local_date => NaiveDate = types::local_date();
        get_local_date_time, get_optional_local_date_time => NaiveDateTime = types::local_date_time();
        get_duration, get_optional_duration => TimeDelta = types::duration();
        get_period, get_optional_period => Period = types::period();
        get_bytes, get_optional_bytes => i64 = types::bytes();
    }

    /// Read a flag; a missing flag is `false`
    pub fn get_flag(&self, key: &str) -> Result<bool> {
        self.get(&types::boolean(), key, Some(false))
    }

    /// Describe where a key was read from
    pub fn key_source(&self, key: &str) -> String {
        match self.store.get_source(key) {
            Some(source) => source.to_string(),
            None => format!("Key \"{}\" not found", key),
        }
    }

    /// Every key with its textual value, in insertion order
    pub fn get_all(&self) -> IndexMap<String, String> {
        self.store.get_all()
    }

    /// Every key with its source descriptor, in insertion order
    pub fn get_all_sources(&self) -> IndexMap<String, String> {
        self.store.get_all_sources()
    }

    /// Add entries with a caller-supplied source descriptor
    pub fn with_map<I, K, V>(&mut self, entries: I, source: &str) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<SettingValue>,
    {
        let before = self.store.len();
        let mut count = 0;
        for (key, value) in entries {
            self.store.add_property(key, value, source);
            count += 1;
        }
        log::debug!(
            "Loaded {} settings from {} ({} new keys)",
            count,
            source,
            self.store.len() - before
        );
        self
    }

    /// Add entries, described by the caller's source location
    #[track_caller]
    pub fn with_map_default<I, K, V>(&mut self, entries: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<SettingValue>,
    {
        let caller = Location::caller();
        let source = format!("a map inserted by {}:{}", caller.file(), caller.line());
        self.with_map(entries, &source)
    }

    /// Add every environment variable of the process
    ///
    /// Variables whose name or value is not valid UTF-8 are skipped.
    pub fn with_environment_variables(&mut self) -> &mut Self {
        let vars = std::env::vars_os().filter_map(|(key, value)| {
            match (key.into_string(), value.into_string()) {
                (Ok(key), Ok(value)) => Some((key, value)),
                (key, _) => {
                    log::debug!(
                        "Skipping environment variable {:?}: not valid UTF-8",
                        key.unwrap_or_else(|raw| raw.to_string_lossy().into_owned())
                    );
                    None
                }
            }
        });
        self.with_map(vars, ENVIRONMENT_SOURCE)
    }

    /// Add `--key value` pairs as properties and bare `--key` switches as flags
    pub fn with_command_line_arguments<I, S>(&mut self, args: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let parsed = args::parse(args);
        log::debug!("Loaded {} settings from {}", parsed.len(), COMMAND_LINE_SOURCE);
        for (key, value) in parsed {
            match value {
                Some(value) => self.store.add_property(key, value, COMMAND_LINE_SOURCE),
                None => self.store.add_flag(key, COMMAND_LINE_SOURCE),
            }
        }
        self
    }

    /// Add the settings of a config file, picking the format by extension
    pub fn with_config(&mut self, path: impl AsRef<Path>) -> Result<&mut Self> {
        let path = absolute_path(path.as_ref());
        let display = path.display().to_string();

        let format = ConfigFormat::from_path(&path).ok_or_else(|| {
            Error::file_read(
                &display,
                "Unsupported file extension, expected yaml, yml, json, properties or conf",
            )
        })?;
        let content =
            std::fs::read_to_string(&path).map_err(|e| Error::file_read(&display, e.to_string()))?;
        let entries = format
            .parse(&content)
            .map_err(|cause| Error::file_read(&display, cause))?;

        let source = format!("config file at \"{}\"", display);
        Ok(self.with_map(entries, &source))
    }

    /// Add the settings of an in-memory config document
    pub fn with_config_str(
        &mut self,
        text: &str,
        format: ConfigFormat,
        source: &str,
    ) -> Result<&mut Self> {
        let entries = format
            .parse(text)
            .map_err(|cause| Error::parse(source, cause))?;
        Ok(self.with_map(entries, source))
    }

    /// Add several config files; the first path takes precedence
    pub fn with_configs<I, P>(&mut self, paths: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let paths: Vec<P> = paths.into_iter().collect();
        for path in paths.iter().rev() {
            self.with_config(path)?;
        }
        Ok(self)
    }

    /// Add config files found in the working directory
    ///
    /// Each file that fails to load is logged and skipped.
    pub fn with_discovered_configs(&mut self) -> &mut Self {
        self.with_discovered_configs_in(".")
    }

    /// Add config files found in `dir`; the first file by name takes precedence
    ///
    /// Each file that fails to load is logged and skipped.
    pub fn with_discovered_configs_in(&mut self, dir: impl Into<PathBuf>) -> &mut Self {
        let files = ConfigFileLocator::new(dir).config_files();
        for file in files.iter().rev() {
            if let Err(e) = self.with_config(file) {
                log::warn!("Skipping config file: {}", e);
            }
        }
        self
    }

    /// Add environment variables, then discovered config files
    pub fn with_defaults(&mut self) -> &mut Self {
        self.with_environment_variables().with_discovered_configs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use pretty_assertions::assert_eq;
    use std::fs;

    fn settings_with(entries: &[(&str, &str)]) -> Settings {
        let mut settings = Settings::new();
        settings.with_map(entries.iter().copied(), "test");
        settings
    }

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("setconf_settings_{}", name));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_get_typed_values() {
        let settings = settings_with(&[
            ("name", "demo"),
            ("port", "8080"),
            ("ratio", "0.75"),
            ("enabled", "yes"),
            ("timeout", "30s"),
            ("retention", "2w"),
            ("buffer", "64 KiB"),
        ]);

        assert_eq!(settings.get_string("name").unwrap(), "demo");
        assert_eq!(settings.get_int("port").unwrap(), 8080);
        assert_eq!(settings.get_long("port").unwrap(), 8080);
        assert_eq!(settings.get_double("ratio").unwrap(), 0.75);
        assert!(settings.get_bool("enabled").unwrap());
        assert_eq!(settings.get_duration("timeout").unwrap(), TimeDelta::seconds(30));
        assert_eq!(settings.get_period("retention").unwrap(), Period::of_days(14));
        assert_eq!(settings.get_bytes("buffer").unwrap(), 65536);
    }

    #[test]
    fn test_required_key_missing() {
        let settings = Settings::new();
        let err = settings.get_string("missing").unwrap_err();

        assert_eq!(err.kind, ErrorKind::RequiredKeyMissing);
        assert_eq!(err.to_string(), "Required key \"missing\" is missing");
    }

    #[test]
    fn test_default_used_only_when_missing() {
        let settings = settings_with(&[("port", "abc")]);

        assert_eq!(settings.get(&types::int(), "other", Some(5)).unwrap(), 5);

        let err = settings.get(&types::int(), "port", Some(5)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to parse setting \"port\", the value is \"abc\", but must be an Int number"
        );
    }

    #[test]
    fn test_parse_error_uses_requested_key() {
        let settings = settings_with(&[("SERVER_TIMEOUT", "5 whiles")]);
        let err = settings.get_duration("serverTimeout").unwrap_err();

        assert_eq!(err.kind, ErrorKind::SettingParse);
        assert!(err
            .to_string()
            .starts_with("Failed to parse setting \"serverTimeout\", the value is \"5 whiles\", but the unit \"whiles\" must be one of ["));
    }

    #[test]
    fn test_optional_getters() {
        let settings = settings_with(&[("port", "1")]);

        assert_eq!(settings.get_optional_int("port").unwrap(), Some(1));
        assert_eq!(settings.get_optional_int("missing").unwrap(), None);
        assert_eq!(settings.get_optional_period("missing").unwrap(), None);
    }

    #[test]
    fn test_flags() {
        let mut settings = Settings::new();
        settings.with_command_line_arguments(["--verbose", "--level", "3"]);

        assert!(settings.get_flag("verbose").unwrap());
        assert!(!settings.get_flag("quiet").unwrap());
        assert_eq!(settings.get_int("level").unwrap(), 3);
        assert_eq!(
            settings.key_source("verbose"),
            "Key \"verbose\" was read from command line parameters"
        );
    }

    #[test]
    fn test_key_source() {
        let mut settings = Settings::new();
        settings.with_map([("SERVER_PORT", "2")], "file X");

        assert_eq!(
            settings.key_source("serverPort"),
            "Key \"serverPort\" was read as \"SERVER_PORT\" from file X"
        );
        assert_eq!(settings.key_source("nothing"), "Key \"nothing\" not found");
    }

    #[test]
    fn test_with_map_default_names_caller() {
        let mut settings = Settings::new();
        settings.with_map_default([("a", "1")]);

        let source = settings.key_source("a");
        assert!(source.starts_with("Key \"a\" was read from a map inserted by "));
        assert!(source.contains("settings.rs:"));
    }

    #[test]
    fn test_later_sources_take_precedence() {
        let mut settings = Settings::new();
        settings
            .with_map([("port", "1")], "first")
            .with_command_line_arguments(["--port", "2"]);

        assert_eq!(settings.get_int("port").unwrap(), 2);
        assert_eq!(
            settings.key_source("port"),
            "Key \"port\" was read from command line parameters"
        );
    }

    #[test]
    fn test_environment_variables() {
        std::env::set_var("SETCONF_TEST_ENV_VALUE", "42");

        let mut settings = Settings::new();
        settings.with_environment_variables();

        assert_eq!(settings.get_int("setconfTestEnvValue").unwrap(), 42);
        assert_eq!(
            settings.key_source("SETCONF_TEST_ENV_VALUE"),
            "Key \"SETCONF_TEST_ENV_VALUE\" was read from environment variables"
        );

        std::env::remove_var("SETCONF_TEST_ENV_VALUE");
    }

    #[cfg(unix)]
    #[test]
    fn test_environment_variables_skip_non_utf8() {
        use std::ffi::OsString;
        use std::os::unix::ffi::OsStringExt;

        std::env::set_var("SETCONF_TEST_ENV_BAD", OsString::from_vec(vec![0x66, 0xff, 0x6f]));
        std::env::set_var("SETCONF_TEST_ENV_GOOD", "ok");

        let mut settings = Settings::new();
        settings.with_environment_variables();

        assert_eq!(settings.get_optional_string("SETCONF_TEST_ENV_BAD").unwrap(), None);
        assert_eq!(settings.get_string("SETCONF_TEST_ENV_GOOD").unwrap(), "ok");

        std::env::remove_var("SETCONF_TEST_ENV_BAD");
        std::env::remove_var("SETCONF_TEST_ENV_GOOD");
    }

    #[test]
    fn test_with_config_str_yaml() {
        let mut settings = Settings::new();
        settings
            .with_config_str(
                r#"
server:
  host: localhost
  port: 8080
tags: [a, b]
"#,
                ConfigFormat::Yaml,
                "inline yaml",
            )
            .unwrap();

        assert_eq!(settings.get_string("server.host").unwrap(), "localhost");
        assert_eq!(settings.get_int("server.port").unwrap(), 8080);
        assert_eq!(
            settings.get(&types::list(types::string(), ","), "tags", None).unwrap(),
            vec!["a".to_string(), "b".to_string()]
        );
        assert_eq!(
            settings.get_string("tags").unwrap_err().to_string(),
            "Failed to parse setting \"tags\", the value is \"[a, b]\", but is unexpectedly of type \"list\""
        );
    }

    #[test]
    fn test_with_config_str_json_and_properties() {
        let mut settings = Settings::new();
        settings
            .with_config_str(r#"{"db": {"pool": 4}}"#, ConfigFormat::Json, "inline json")
            .unwrap()
            .with_config_str(
                "# comment\n! also comment\nname = demo\nurl: http://x:1\nlong = a, \\\n  b\nempty\n",
                ConfigFormat::Properties,
                "inline properties",
            )
            .unwrap();

        assert_eq!(settings.get_int("db.pool").unwrap(), 4);
        assert_eq!(settings.get_string("name").unwrap(), "demo");
        assert_eq!(settings.get_string("url").unwrap(), "http://x:1");
        assert_eq!(settings.get_string("long").unwrap(), "a, b");
        assert_eq!(settings.get_string("empty").unwrap(), "");
    }

    #[test]
    fn test_with_config_str_invalid() {
        let err = Settings::new()
            .with_config_str("{not json", ConfigFormat::Json, "inline json")
            .unwrap_err();

        assert_eq!(err.kind, ErrorKind::Parse);
        assert!(err.to_string().starts_with("Failed to parse inline json: "));
    }

    #[test]
    fn test_with_config_file() {
        let dir = temp_dir("config_file");
        let path = dir.join("app.yaml");
        fs::write(&path, "server:\n  port: 9000\n").unwrap();

        let mut settings = Settings::new();
        settings.with_config(&path).unwrap();

        assert_eq!(settings.get_int("server.port").unwrap(), 9000);
        assert_eq!(
            settings.key_source("server.port"),
            format!(
                "Key \"server.port\" was read from config file at \"{}\"",
                path.display()
            )
        );

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_with_config_missing_file() {
        let dir = temp_dir("missing_file");
        let path = dir.join("absent.yaml");

        let err = Settings::new().with_config(&path).unwrap_err();

        assert_eq!(err.kind, ErrorKind::FileRead);
        assert!(err
            .to_string()
            .starts_with(&format!("Failed to read file: {}\n", path.display())));

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_with_config_malformed_file() {
        let dir = temp_dir("malformed_file");
        let path = dir.join("config.json");
        fs::write(&path, "{\"a\": ").unwrap();

        let err = Settings::new().with_config(&path).unwrap_err();
        assert_eq!(err.kind, ErrorKind::FileRead);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_with_configs_first_path_wins() {
        let dir = temp_dir("configs_order");
        let first = dir.join("first.properties");
        let second = dir.join("second.conf");
        fs::write(&first, "port=1\nonly.first=x\n").unwrap();
        fs::write(&second, "port=2\nonly.second=y\n").unwrap();

        let mut settings = Settings::new();
        settings.with_configs([&first, &second]).unwrap();

        assert_eq!(settings.get_int("port").unwrap(), 1);
        assert_eq!(settings.get_string("only.first").unwrap(), "x");
        assert_eq!(settings.get_string("only.second").unwrap(), "y");

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_with_discovered_configs_in() {
        let dir = temp_dir("discovered");
        fs::write(dir.join("app.properties"), "port=1\n").unwrap();
        fs::write(dir.join("config.yaml"), "port: 2\nname: discovered\n").unwrap();
        fs::write(dir.join("notes.yaml"), "port: 3\n").unwrap();

        let mut settings = Settings::new();
        settings.with_discovered_configs_in(&dir);

        // app.properties sorts first and takes precedence
        assert_eq!(settings.get_int("port").unwrap(), 1);
        assert_eq!(settings.get_string("name").unwrap(), "discovered");

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_discovered_configs_skip_malformed_file() {
        let dir = temp_dir("discovered_malformed");
        fs::write(dir.join("app.properties"), "port=1\n").unwrap();
        fs::write(dir.join("config.json"), "{ 1: }").unwrap();
        fs::write(dir.join("setconf.yaml"), "name: kept\n").unwrap();

        let mut settings = Settings::new();
        settings.with_discovered_configs_in(&dir);

        assert_eq!(settings.get_optional_int("port").unwrap(), Some(1));
        assert_eq!(settings.get_string("name").unwrap(), "kept");
        assert_eq!(settings.get_all().len(), 2);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_get_all_and_clear() {
        let mut settings = Settings::new();
        settings
            .with_map([("a", "1")], "map")
            .with_command_line_arguments(["--flag"]);

        let all: Vec<(String, String)> = settings.get_all().into_iter().collect();
        assert_eq!(
            all,
            vec![
                ("a".to_string(), "1".to_string()),
                ("flag".to_string(), "true".to_string()),
            ]
        );

        settings.clear();
        assert!(settings.get_all().is_empty());
    }

    #[test]
    fn test_config_format_from_extension() {
        assert_eq!(ConfigFormat::from_extension("yml"), Some(ConfigFormat::Yaml));
        assert_eq!(ConfigFormat::from_extension("JSON"), Some(ConfigFormat::Json));
        assert_eq!(ConfigFormat::from_extension("conf"), Some(ConfigFormat::Properties));
        assert_eq!(ConfigFormat::from_extension("toml"), None);
    }

    #[test]
    fn test_empty_yaml_document() {
        let mut settings = Settings::new();
        settings
            .with_config_str("", ConfigFormat::Yaml, "empty")
            .unwrap();
        assert!(settings.get_all().is_empty());
    }

    #[test]
    fn test_global_is_shared() {
        let first = global() as *const _;
        let second = global() as *const _;
        assert_eq!(first, second);
    }
}
