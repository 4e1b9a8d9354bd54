//! Setting types
//!
//! A [`SettingType`] turns a stored [`SettingValue`] into a typed value or a
//! [`ParseError`] reason. The accessor layer attaches the key and raw value to
//! the reason, so transforms only describe what is wrong with the text.

use std::fmt;
use std::hash::Hash;
use std::str::FromStr;
use std::sync::Arc;

use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Utc};
use indexmap::IndexSet;
use num_bigint::BigInt;
use regex::Regex;

use crate::error::ParseError;
use crate::units::UnitTable;
use crate::value::{ComplexKind, Node, SettingValue};

type Transform<T> = dyn Fn(&SettingValue) -> Result<T, ParseError> + Send + Sync;

/// Conversion from a stored value to `T`
pub struct SettingType<T> {
    transform: Arc<Transform<T>>,
}

impl<T> Clone for SettingType<T> {
    fn clone(&self) -> Self {
        Self {
            transform: Arc::clone(&self.transform),
        }
    }
}

impl<T> fmt::Debug for SettingType<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SettingType")
            .field("type", &std::any::type_name::<T>())
            .finish()
    }
}

impl<T: 'static> SettingType<T> {
    /// Create a setting type from a transform function
    pub fn new<F>(transform: F) -> Self
    where
        F: Fn(&SettingValue) -> Result<T, ParseError> + Send + Sync + 'static,
    {
        Self {
            transform: Arc::new(transform),
        }
    }

    /// Create a setting type that only needs the simple text of a value
    pub fn from_text<F>(transform: F) -> Self
    where
        F: Fn(&str) -> Result<T, ParseError> + Send + Sync + 'static,
    {
        Self::new(move |value| transform(simple_text(value)?))
    }

    /// Apply the transform
    pub fn transform(&self, value: &SettingValue) -> Result<T, ParseError> {
        (self.transform)(value)
    }

    /// Derive a setting type by mapping successful results
    pub fn map<U, F>(self, f: F) -> SettingType<U>
    where
        U: 'static,
        F: Fn(T) -> U + Send + Sync + 'static,
    {
        SettingType::new(move |value| self.transform(value).map(&f))
    }
}

/// A number of whole days
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Period {
    pub days: i32,
}

impl Period {
    pub fn of_days(days: i32) -> Self {
        Self { days }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}D", self.days)
    }
}

/// How a simple value is split into list elements
#[derive(Debug, Clone)]
pub enum Separator {
    /// Split on every occurrence of a literal string
    Literal(String),
    /// Split on every match of a regular expression
    Pattern(Regex),
}

impl Separator {
    fn split<'a>(&self, text: &'a str) -> Vec<&'a str> {
        match self {
            Separator::Literal(sep) => text.split(sep.as_str()).collect(),
            Separator::Pattern(re) => re.split(text).collect(),
        }
    }
}

impl Default for Separator {
    fn default() -> Self {
        Separator::Literal(",".to_string())
    }
}

impl From<&str> for Separator {
    fn from(sep: &str) -> Self {
        Separator::Literal(sep.to_string())
    }
}

impl From<String> for Separator {
    fn from(sep: String) -> Self {
        Separator::Literal(sep)
    }
}

impl From<Regex> for Separator {
    fn from(re: Regex) -> Self {
        Separator::Pattern(re)
    }
}

/// Simple text of a value, or a reason naming the complex kind
fn simple_text(value: &SettingValue) -> Result<&str, ParseError> {
    match value {
        SettingValue::Simple(text) => Ok(text),
        SettingValue::Complex(_, kind) => Err(ParseError::new(format!(
            "is unexpectedly of type \"{}\"",
            kind
        ))),
    }
}

fn parse_number<T: FromStr>(reason: &'static str) -> SettingType<T>
where
    T: 'static,
{
    SettingType::from_text(move |text| text.parse().map_err(|_| ParseError::new(reason)))
}

/// The simple text unchanged
pub fn string() -> SettingType<String> {
    SettingType::from_text(|text| Ok(text.to_string()))
}

/// 32-bit signed integer
pub fn int() -> SettingType<i32> {
    parse_number("must be an Int number")
}

/// 64-bit signed integer
pub fn long() -> SettingType<i64> {
    parse_number("must be a Long number")
}

/// 32-bit float
pub fn float() -> SettingType<f32> {
    parse_number("must be a Float number")
}

/// 64-bit float
pub fn double() -> SettingType<f64> {
    parse_number("must be a Double number")
}

/// Arbitrary precision integer
pub fn big_integer() -> SettingType<BigInt> {
    parse_number("must be a BigInteger number")
}

/// Arbitrary precision decimal
pub fn big_decimal() -> SettingType<BigDecimal> {
    parse_number("must be a BigDecimal number")
}

/// `true` for `true`, `yes`, `on` or `1`; anything else is `false`
pub fn boolean() -> SettingType<bool> {
    SettingType::from_text(|text| Ok(matches!(text, "true" | "yes" | "on" | "1")))
}

/// One of a closed set of named values
///
/// An exact name match wins over a case-insensitive one.
pub fn enumeration<T>(variants: &[(&str, T)]) -> SettingType<T>
where
    T: Clone + Send + Sync + 'static,
{
    let variants: Vec<(String, T)> = variants
        .iter()
        .map(|(name, value)| (name.to_string(), value.clone()))
        .collect();

    SettingType::from_text(move |text| {
        let lower = text.to_lowercase();
        variants
            .iter()
            .find(|(name, _)| name == text)
            .or_else(|| variants.iter().find(|(name, _)| name.to_lowercase() == lower))
            .map(|(_, value)| value.clone())
            .ok_or_else(|| {
                let names: Vec<&str> = variants.iter().map(|(name, _)| name.as_str()).collect();
                ParseError::new(format!("possible values are [{}]", names.join(", ")))
            })
    })
}

/// RFC 3339 timestamp, normalized to UTC
pub fn instant() -> SettingType<DateTime<Utc>> {
    SettingType::from_text(|text| {
        DateTime::parse_from_rfc3339(text)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|_| ParseError::new("must be an Instant"))
    })
}

/// `HH:MM` with optional seconds and fraction
pub fn local_time() -> SettingType<NaiveTime> {
    SettingType::from_text(|text| {
        NaiveTime::parse_from_str(text, "%H:%M:%S%.f")
            .or_else(|_| NaiveTime::parse_from_str(text, "%H:%M"))
            .map_err(|_| ParseError::new("must be a LocalTime"))
    })
}

/// `YYYY-MM-DD`
pub fn local_date() -> SettingType<NaiveDate> {
    SettingType::from_text(|text| {
        NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .map_err(|_| ParseError::new("must be a LocalDate"))
    })
}

/// `YYYY-MM-DDTHH:MM` with optional seconds and fraction
pub fn local_date_time() -> SettingType<NaiveDateTime> {
    SettingType::from_text(|text| {
        NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
            .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M"))
            .map_err(|_| ParseError::new("must be a LocalDateTime"))
    })
}

/// Time span with a unit suffix; a bare number is milliseconds
pub fn duration() -> SettingType<TimeDelta> {
    SettingType::from_text(|text| {
        UnitTable::time()
            .parse_i64(text)
            .map(TimeDelta::nanoseconds)
    })
}

/// Whole days with a unit suffix; a bare number is days
pub fn period() -> SettingType<Period> {
    SettingType::from_text(|text| UnitTable::period().parse_i32(text).map(Period::of_days))
}

/// Byte count with a unit suffix; a bare number is bytes
pub fn bytes() -> SettingType<i64> {
    SettingType::from_text(|text| UnitTable::bytes().parse_i64(text))
}

/// List of elements
///
/// A structured list is mapped element by element. Simple text is split by
/// `separator` and every trimmed piece is mapped as simple text; empty text is
/// an empty list.
pub fn list<T: 'static>(
    element: SettingType<T>,
    separator: impl Into<Separator>,
) -> SettingType<Vec<T>> {
    let separator = separator.into();
    SettingType::new(move |value| {
        list_elements(value, &separator)?
            .iter()
            .map(|elem| {
                element.transform(elem).map_err(|e| {
                    ParseError::new(format!("list element \"{}\" {}", elem, e.reason))
                })
            })
            .collect()
    })
}

/// Set of elements, keeping the first occurrence of each
pub fn set<T>(
    element: SettingType<T>,
    separator: impl Into<Separator>,
) -> SettingType<IndexSet<T>>
where
    T: Hash + Eq + 'static,
{
    list(element, separator).map(|items| items.into_iter().collect())
}

fn list_elements(
    value: &SettingValue,
    separator: &Separator,
) -> Result<Vec<SettingValue>, ParseError> {
    match value {
        SettingValue::Simple(text) if text.trim().is_empty() => Ok(Vec::new()),
        SettingValue::Simple(text) => Ok(separator
            .split(text)
            .into_iter()
            .map(|piece| SettingValue::simple(piece.trim()))
            .collect()),
        SettingValue::Complex(Node::Sequence(items), ComplexKind::List) => {
            Ok(items.iter().cloned().map(SettingValue::from_node).collect())
        }
        SettingValue::Complex(..) => Err(ParseError::new("is not a list")),
    }
}
