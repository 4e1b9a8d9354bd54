//! setconf CLI - Inspect settings merged from files, environment and arguments
//!
//! Usage:
//!   setconf get server.port -f app.yaml --type int
//!   setconf source serverPort -f app.yaml --env
//!   setconf dump -f base.yaml -f local.properties --format json -- --debug

use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use setconf_core::{types, Error, SettingType, SettingValue, Settings};
use std::fmt::Display;
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;

/// setconf - Settings lookup with naming-convention matching and provenance
#[derive(Parser)]
#[command(name = "setconf")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the typed value of a setting
    Get {
        /// Key to look up, in any naming convention
        key: String,

        /// Type to convert the value to
        #[arg(short = 't', long = "type", value_enum, default_value = "string")]
        value_type: ValueType,

        /// Value to use when the key is missing
        #[arg(short, long)]
        default: Option<String>,

        #[command(flatten)]
        input: SourceArgs,
    },

    /// Print where a setting was read from
    Source {
        /// Key to look up, in any naming convention
        key: String,

        #[command(flatten)]
        input: SourceArgs,
    },

    /// Print every setting
    Dump {
        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,

        /// Show sources instead of values
        #[arg(long)]
        sources: bool,

        #[command(flatten)]
        input: SourceArgs,
    },
}

/// Where settings are loaded from
#[derive(Args)]
struct SourceArgs {
    /// Config file(s) to load; later files take precedence
    #[arg(short, long = "file")]
    files: Vec<PathBuf>,

    /// Include environment variables (lowest precedence)
    #[arg(long)]
    env: bool,

    /// Command line parameters (highest precedence), after `--`
    #[arg(last = true)]
    args: Vec<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum ValueType {
    String,
    Int,
    Long,
    Float,
    Double,
    Bool,
    Duration,
    Period,
    Bytes,
}

/// Why a command failed, deciding the exit code
#[derive(Debug)]
enum Failure {
    /// Settings could not be loaded
    Load(Error),
    /// A setting was missing or could not be converted
    Lookup(String),
}

impl Failure {
    fn exit_code(&self) -> ExitCode {
        match self {
            Failure::Load(_) => ExitCode::from(2),
            Failure::Lookup(_) => ExitCode::from(1),
        }
    }

    fn message(&self) -> String {
        match self {
            Failure::Load(e) => match &e.help {
                Some(help) => format!("{}\n{}", e, help),
                None => e.to_string(),
            },
            Failure::Lookup(message) => message.clone(),
        }
    }
}

/// Run the CLI with the process arguments
pub fn run() -> ExitCode {
    run_from(std::env::args_os())
}

/// Run the CLI with the given arguments
pub fn run_from<I, T>(args: I) -> ExitCode
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = Cli::parse_from(args);

    match execute(cli.command) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(failure) => {
            eprintln!("{}", failure.message().red());
            failure.exit_code()
        }
    }
}

fn execute(command: Commands) -> Result<String, Failure> {
    match command {
        Commands::Get {
            key,
            value_type,
            default,
            input,
        } => {
            let settings = load_settings(&input)?;
            cmd_get(&settings, &key, value_type, default.as_deref())
        }

        Commands::Source { key, input } => {
            let settings = load_settings(&input)?;
            Ok(settings.key_source(&key))
        }

        Commands::Dump {
            format,
            sources,
            input,
        } => {
            let settings = load_settings(&input)?;
            cmd_dump(&settings, &format, sources)
        }
    }
}

fn load_settings(input: &SourceArgs) -> Result<Settings, Failure> {
    let mut settings = Settings::new();

    if input.env {
        settings.with_environment_variables();
    }

    for file in &input.files {
        settings.with_config(file).map_err(Failure::Load)?;
    }

    settings.with_command_line_arguments(&input.args);
    Ok(settings)
}

fn cmd_get(
    settings: &Settings,
    key: &str,
    value_type: ValueType,
    default: Option<&str>,
) -> Result<String, Failure> {
    let result = match value_type {
        ValueType::String => read(settings, types::string(), key, default),
        ValueType::Int => read(settings, types::int(), key, default),
        ValueType::Long => read(settings, types::long(), key, default),
        ValueType::Float => read(settings, types::float(), key, default),
        ValueType::Double => read(settings, types::double(), key, default),
        ValueType::Bool => read(settings, types::boolean(), key, default),
        ValueType::Duration => read(settings, types::duration(), key, default),
        ValueType::Period => read(settings, types::period(), key, default),
        ValueType::Bytes => read(settings, types::bytes(), key, default),
    };

    result.map_err(|e| Failure::Lookup(e.to_string()))
}

/// Read `key` as `T`; a textual default goes through the same conversion
fn read<T: Display + 'static>(
    settings: &Settings,
    setting_type: SettingType<T>,
    key: &str,
    default: Option<&str>,
) -> Result<String, Error> {
    let default = default
        .map(|text| {
            setting_type
                .transform(&SettingValue::simple(text))
                .map_err(|e| Error::setting_parse(key, text, e))
        })
        .transpose()?;

    settings
        .get(&setting_type, key, default)
        .map(|value| value.to_string())
}

fn cmd_dump(settings: &Settings, format: &str, sources: bool) -> Result<String, Failure> {
    let entries = if sources {
        settings.get_all_sources()
    } else {
        settings.get_all()
    };

    match format {
        "json" => serde_json::to_string_pretty(&entries)
            .map_err(|e| Failure::Lookup(format!("Failed to render JSON: {}", e))),
        "text" => Ok(entries
            .iter()
            .map(|(key, value)| format!("{}: {}", key, value))
            .collect::<Vec<_>>()
            .join("\n")),
        other => Err(Failure::Lookup(format!(
            "Unsupported format: {}. Use text or json.",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn parse(args: &[&str]) -> Commands {
        Cli::try_parse_from(std::iter::once("setconf").chain(args.iter().copied()))
            .unwrap()
            .command
    }

    fn temp_file(name: &str, content: &str) -> PathBuf {
        let dir = std::env::temp_dir().join("setconf_cli_tests");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_get_typed_value() {
        let file = temp_file("get.yaml", "server:\n  timeout: 1500\n");
        let output = execute(parse(&[
            "get",
            "server.timeout",
            "--type",
            "duration",
            "-f",
            file.to_str().unwrap(),
        ]))
        .unwrap();

        assert_eq!(output, "PT1.5S");
    }

    #[test]
    fn test_get_from_trailing_args() {
        let output = execute(parse(&["get", "maxRetries", "--type", "int", "--", "--max-retries", "3"])).unwrap();
        assert_eq!(output, "3");
    }

    #[test]
    fn test_get_default() {
        let output = execute(parse(&["get", "missing", "--type", "bytes", "--default", "2 KiB"])).unwrap();
        assert_eq!(output, "2048");
    }

    #[test]
    fn test_get_missing_is_lookup_failure() {
        let failure = execute(parse(&["get", "missing"])).unwrap_err();
        assert!(matches!(failure, Failure::Lookup(_)));
        assert_eq!(failure.message(), "Required key \"missing\" is missing");
    }

    #[test]
    fn test_get_parse_failure() {
        let failure = execute(parse(&["get", "port", "--type", "int", "--", "--port", "abc"])).unwrap_err();
        assert_eq!(
            failure.message(),
            "Failed to parse setting \"port\", the value is \"abc\", but must be an Int number"
        );
    }

    #[test]
    fn test_missing_file_is_load_failure() {
        let failure = execute(parse(&["get", "x", "-f", "/nonexistent/setconf/app.yaml"])).unwrap_err();
        assert!(matches!(failure, Failure::Load(_)));
        assert!(failure
            .message()
            .starts_with("Failed to read file: /nonexistent/setconf/app.yaml\n"));
    }

    #[test]
    fn test_later_file_wins() {
        let base = temp_file("base.properties", "port=1\n");
        let local = temp_file("local.properties", "port=2\n");
        let output = execute(parse(&[
            "get",
            "port",
            "-f",
            base.to_str().unwrap(),
            "-f",
            local.to_str().unwrap(),
        ]))
        .unwrap();

        assert_eq!(output, "2");
    }

    #[test]
    fn test_source() {
        let output = execute(parse(&["source", "serverPort", "--", "--SERVER_PORT", "2"])).unwrap();
        assert_eq!(
            output,
            "Key \"serverPort\" was read as \"SERVER_PORT\" from command line parameters"
        );

        let output = execute(parse(&["source", "other"])).unwrap();
        assert_eq!(output, "Key \"other\" not found");
    }

    #[test]
    fn test_dump_text_and_json() {
        let args = ["--", "--a", "1", "--flag"];

        let text = execute(parse(&[&["dump"][..], &args[..]].concat())).unwrap();
        assert_eq!(text, "a: 1\nflag: true");

        let json = execute(parse(&[&["dump", "--format", "json"][..], &args[..]].concat())).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["a"], "1");
        assert_eq!(parsed["flag"], "true");
    }

    #[test]
    fn test_dump_sources() {
        let output = execute(parse(&["dump", "--sources", "--", "--a", "1"])).unwrap();
        assert_eq!(output, "a: command line parameters");
    }

    #[test]
    fn test_dump_unsupported_format() {
        let failure = execute(parse(&["dump", "--format", "xml"])).unwrap_err();
        assert!(failure.message().contains("Unsupported format: xml"));
    }
}
