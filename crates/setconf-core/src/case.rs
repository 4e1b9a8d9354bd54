//! Naming convention conversions
//!
//! Converts keys between camelCase, snake_case and kebab-case so that a
//! setting requested as `serverPort` can be found when it was stored as
//! `server_port` or `server-port`. The conversions are total functions and
//! are not exact inverses of each other.

/// Convert a key to snake_case (`fooBar` -> `foo_bar`)
pub fn to_snake_case(text: &str) -> String {
    to_separator_case(text, '_')
}

/// Convert a key to kebab-case (`fooBar` -> `foo-bar`)
pub fn to_kebab_case(text: &str) -> String {
    to_separator_case(text, '-')
}

/// Convert a key to camelCase (`foo_bar` -> `fooBar`)
///
/// `-` and `_` are word boundaries and are dropped. The character right after
/// a dropped boundary is upper-cased and always kept; every other character
/// passes through unchanged, so `ABCD` stays `ABCD`.
pub fn to_camel_case(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut after_boundary = false;

    for c in text.chars() {
        if after_boundary {
            result.extend(c.to_uppercase());
            after_boundary = false;
        } else if is_boundary(c) {
            after_boundary = true;
        } else {
            result.push(c);
        }
    }

    result
}

fn is_boundary(c: char) -> bool {
    c == '-' || c == '_'
}

/// Insert `separator` at every lower-to-upper transition, unify existing
/// boundaries to `separator`, then lowercase everything.
fn to_separator_case(text: &str, separator: char) -> String {
    let mut result = String::with_capacity(text.len() + 4);
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if is_boundary(c) {
            result.push(separator);
        } else {
            result.extend(c.to_lowercase());
        }

        if c.is_lowercase() && chars.peek().is_some_and(|next| next.is_uppercase()) {
            result.push(separator);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_snake_case() {
        let cases = [
            ("a", "a"),
            ("aB", "a_b"),
            ("aBc", "a_bc"),
            ("aBcD", "a_bc_d"),
            ("Abc", "abc"),
            ("a_b", "a_b"),
            ("a_bc_d", "a_bc_d"),
            ("a-b", "a_b"),
            ("a-bc-d", "a_bc_d"),
            ("ABCD", "abcd"),
            ("AbCD", "ab_cd"),
            ("fooBar", "foo_bar"),
            ("FOO", "foo"),
        ];
        for (from, expected) in cases {
            assert_eq!(to_snake_case(from), expected, "snake case of {}", from);
        }
    }

    #[test]
    fn test_to_kebab_case() {
        let cases = [
            ("a", "a"),
            ("aB", "a-b"),
            ("aBcD", "a-bc-d"),
            ("Abc", "abc"),
            ("a_b", "a-b"),
            ("a_bc_d", "a-bc-d"),
            ("a-bc", "a-bc"),
            ("ABCD", "abcd"),
            ("AbCD", "ab-cd"),
        ];
        for (from, expected) in cases {
            assert_eq!(to_kebab_case(from), expected, "kebab case of {}", from);
        }
    }

    #[test]
    fn test_to_camel_case() {
        let cases = [
            ("a", "a"),
            ("aB", "aB"),
            ("aBcD", "aBcD"),
            ("Abc", "Abc"),
            ("a_b", "aB"),
            ("a_bc", "aBc"),
            ("a_bc_d", "aBcD"),
            ("a-b", "aB"),
            ("a-bc-d", "aBcD"),
            ("ABCD", "ABCD"),
            ("AbCD", "AbCD"),
        ];
        for (from, expected) in cases {
            assert_eq!(to_camel_case(from), expected, "camel case of {}", from);
        }
    }

    #[test]
    fn test_dotted_keys_keep_dots() {
        assert_eq!(to_snake_case("server.maxPort"), "server.max_port");
        assert_eq!(to_camel_case("server.max-port"), "server.maxPort");
    }

    #[test]
    fn test_empty_string() {
        assert_eq!(to_snake_case(""), "");
        assert_eq!(to_kebab_case(""), "");
        assert_eq!(to_camel_case(""), "");
    }
}
