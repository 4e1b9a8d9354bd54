//! setconf-core: Settings access with key provenance
//!
//! This crate merges settings from environment variables, command line
//! parameters, config files and maps into one store, finds keys regardless
//! of their naming convention and converts values to typed results.
//!
//! # Example
//!
//! ```rust
//! use setconf_core::{types, Settings};
//!
//! let mut settings = Settings::new();
//! settings
//!     .with_map([("SERVER_PORT", "8080"), ("server.timeout", "30s")], "defaults")
//!     .with_command_line_arguments(["--verbose"]);
//!
//! assert_eq!(settings.get_int("serverPort").unwrap(), 8080);
//! assert_eq!(settings.get_duration("server.timeout").unwrap().num_seconds(), 30);
//! assert!(settings.get_flag("verbose").unwrap());
//! assert_eq!(
//!     settings.key_source("serverPort"),
//!     "Key \"serverPort\" was read as \"SERVER_PORT\" from defaults"
//! );
//! assert_eq!(
//!     settings.get(&types::list(types::int(), ","), "missing", Some(vec![1])).unwrap(),
//!     vec![1]
//! );
//! ```

pub mod args;
pub mod case;
pub mod error;
pub mod group;
pub mod locator;
pub mod store;
pub mod types;
pub mod units;
pub mod value;

mod settings;

pub use error::{Error, ErrorKind, ParseError, Result};
pub use group::{Cached, Group, Setting};
pub use locator::ConfigFileLocator;
pub use settings::{global, ConfigFormat, Settings, COMMAND_LINE_SOURCE, ENVIRONMENT_SOURCE};
pub use store::{KeySource, SettingStore};
pub use types::{Period, Separator, SettingType};
pub use units::{Unit, UnitTable};
pub use value::{ComplexKind, Node, SettingValue};
