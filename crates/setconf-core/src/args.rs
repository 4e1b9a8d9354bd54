//! Command line parameter tokenizer
//!
//! Turns `--key value` pairs and bare `--flag` switches into an ordered map.
//! Any number of leading dashes is accepted and stripped from the key.

use indexmap::IndexMap;

/// Tokenize command line parameters into `key -> value`, `None` for flags
///
/// A token starting with `-` is a key. Its value is the next token when that
/// token does not start with `-`; otherwise the key is a flag. Further
/// non-dash tokens after a value are ignored, as are tokens before the first
/// key. A repeated key keeps its first position and its last value.
pub fn parse<I, S>(args: I) -> IndexMap<String, Option<String>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut parsed = IndexMap::new();
    let mut current: Option<String> = None;

    for arg in args {
        let arg = arg.as_ref();
        if is_key(arg) {
            let key = arg.trim_start_matches('-').to_string();
            parsed.insert(key.clone(), None);
            current = Some(key);
        } else if let Some(key) = current.take() {
            parsed.insert(key, Some(arg.to_string()));
        }
    }

    parsed
}

fn is_key(arg: &str) -> bool {
    arg.starts_with('-')
}
