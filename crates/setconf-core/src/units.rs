//! Unit-suffixed numeric values
//!
//! Parses strings like `"0.5 day"`, `"512kB"` or `"25 s"` into an exact
//! integer count of a base unit. Three independent tables exist:
//!
//! - [`UnitTable::time`]: base nanoseconds, a bare number means milliseconds
//! - [`UnitTable::period`]: base days, a bare number means days
//! - [`UnitTable::bytes`]: base bytes, a bare number means bytes
//!
//! Multipliers are arbitrary-precision integers. Integer literals are scaled
//! exactly; fractional literals are scaled as decimals and floored, so
//! `"100000 days"` and `"0.5 day"` never pick up floating-point drift.

use std::str::FromStr;
use std::sync::OnceLock;

use bigdecimal::BigDecimal;
use num_bigint::BigInt;

use crate::error::ParseError;

/// Multiplier base for a family of byte units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Magnitude {
    /// Powers of 1000 (kilo, mega, ...)
    Decimal,
    /// Powers of 1024 (kibi, mebi, ...)
    Binary,
}

impl Magnitude {
    fn base(self) -> u32 {
        match self {
            Magnitude::Decimal => 1000,
            Magnitude::Binary => 1024,
        }
    }
}

/// A unit with its exact multiplier relative to the table's base unit
#[derive(Debug, Clone)]
pub struct Unit {
    name: String,
    multiplier: BigInt,
    aliases: Vec<String>,
}

impl Unit {
    fn new(name: &str, multiplier: impl Into<BigInt>, aliases: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            multiplier: multiplier.into(),
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// Canonical unit name (e.g. `"seconds"`, `"mebibytes"`)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Exact scale factor relative to the base unit
    pub fn multiplier(&self) -> &BigInt {
        &self.multiplier
    }

    /// Every accepted spelling of this unit
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }
}

/// A closed registry of unit aliases for one parsing domain
#[derive(Debug, Clone)]
pub struct UnitTable {
    units: Vec<Unit>,
}

const NANOS_PER_MICRO: i64 = 1_000;
const NANOS_PER_MILLI: i64 = 1_000_000;
const NANOS_PER_SECOND: i64 = 1_000_000_000;

/// Byte unit prefixes in table order: (prefix, magnitude, power)
const BYTE_PREFIXES: &[(&str, Magnitude, u32)] = &[
    ("", Magnitude::Binary, 0),
    ("kilo", Magnitude::Decimal, 1),
    ("mega", Magnitude::Decimal, 2),
    ("giga", Magnitude::Decimal, 3),
    ("tera", Magnitude::Decimal, 4),
    ("peta", Magnitude::Decimal, 5),
    ("exa", Magnitude::Decimal, 6),
    ("zetta", Magnitude::Decimal, 7),
    ("yotta", Magnitude::Decimal, 8),
    ("kibi", Magnitude::Binary, 1),
    ("mebi", Magnitude::Binary, 2),
    ("gibi", Magnitude::Binary, 3),
    ("tebi", Magnitude::Binary, 4),
    ("pebi", Magnitude::Binary, 5),
    ("exbi", Magnitude::Binary, 6),
    ("zebi", Magnitude::Binary, 7),
    ("yobi", Magnitude::Binary, 8),
];

impl UnitTable {
    /// Elapsed time in nanoseconds; a bare number is milliseconds
    pub fn time() -> &'static UnitTable {
        static TABLE: OnceLock<UnitTable> = OnceLock::new();
        TABLE.get_or_init(|| UnitTable {
            units: vec![
                Unit::new(
                    "milliseconds",
                    NANOS_PER_MILLI,
                    &["", "ms", "millis", "milliseconds"],
                ),
                Unit::new(
                    "microseconds",
                    NANOS_PER_MICRO,
                    &["us", "micros", "microseconds"],
                ),
                Unit::new("nanoseconds", 1, &["ns", "nanos", "nanoseconds"]),
                Unit::new("seconds", NANOS_PER_SECOND, &["s", "second", "seconds"]),
                Unit::new("minutes", 60 * NANOS_PER_SECOND, &["m", "minute", "minutes"]),
                Unit::new("hours", 3_600 * NANOS_PER_SECOND, &["h", "hour", "hours"]),
                Unit::new("days", 86_400 * NANOS_PER_SECOND, &["d", "day", "days"]),
            ],
        })
    }

    /// Calendar periods in days; months are a fixed 30 days, years 365
    pub fn period() -> &'static UnitTable {
        static TABLE: OnceLock<UnitTable> = OnceLock::new();
        TABLE.get_or_init(|| UnitTable {
            units: vec![
                Unit::new("days", 1, &["", "d", "day", "days"]),
                Unit::new("weeks", 7, &["w", "week", "weeks"]),
                Unit::new("months", 30, &["m", "month", "months"]),
                Unit::new("years", 365, &["y", "year", "years"]),
            ],
        })
    }

    /// Byte counts; decimal (1000-based) and binary (1024-based) families
    pub fn bytes() -> &'static UnitTable {
        static TABLE: OnceLock<UnitTable> = OnceLock::new();
        TABLE.get_or_init(|| UnitTable {
            units: BYTE_PREFIXES
                .iter()
                .map(|&(prefix, magnitude, power)| byte_unit(prefix, magnitude, power))
                .collect(),
        })
    }

    /// All units in table order
    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    /// Find the unit accepting `alias` (case-sensitive)
    pub fn find(&self, alias: &str) -> Option<&Unit> {
        self.units
            .iter()
            .find(|unit| unit.aliases.iter().any(|a| a == alias))
    }

    /// Every alias of every unit, in table order
    pub fn aliases(&self) -> impl Iterator<Item = &str> {
        self.units
            .iter()
            .flat_map(|unit| unit.aliases.iter().map(String::as_str))
    }

    /// Parse `text` into an exact count of the base unit
    pub fn parse(&self, text: &str) -> Result<BigInt, ParseError> {
        let (number, alias) = split_number_and_unit(text)?;

        let unit = self.find(alias).ok_or_else(|| {
            let accepted: Vec<String> = self.aliases().map(|a| format!("\"{}\"", a)).collect();
            ParseError::new(format!(
                "the unit \"{}\" must be one of [{}]",
                alias,
                accepted.join(", ")
            ))
        })?;

        scale(number, unit.multiplier())
    }

    /// Parse `text` and require the result to fit in an `i64`
    pub fn parse_i64(&self, text: &str) -> Result<i64, ParseError> {
        let value = self.parse(text)?;
        i64::try_from(&value).map_err(|_| out_of_range())
    }

    /// Parse `text` and require the result to fit in an `i32`
    pub fn parse_i32(&self, text: &str) -> Result<i32, ParseError> {
        let value = self.parse(text)?;
        i32::try_from(&value).map_err(|_| out_of_range())
    }
}

fn out_of_range() -> ParseError {
    ParseError::new("the value is out of range")
}

fn byte_unit(prefix: &str, magnitude: Magnitude, power: u32) -> Unit {
    let mut aliases = vec![format!("{}byte", prefix), format!("{}bytes", prefix)];

    match prefix.chars().next() {
        None => aliases.extend(["b", "B", ""].map(String::from)),
        Some(first) => {
            let lower = first.to_string();
            let upper = first.to_uppercase().to_string();
            match magnitude {
                Magnitude::Binary => {
                    aliases.push(lower);
                    aliases.push(upper.clone());
                    aliases.push(format!("{}i", upper));
                    aliases.push(format!("{}iB", upper));
                }
                // kB is the only decimal short form with a lowercase letter
                Magnitude::Decimal if power == 1 => aliases.push(format!("{}B", lower)),
                Magnitude::Decimal => aliases.push(format!("{}B", upper)),
            }
        }
    }

    Unit {
        name: format!("{}bytes", prefix),
        multiplier: BigInt::from(magnitude.base()).pow(power),
        aliases,
    }
}

/// Split at the first alphabetic character: `"25 s"` -> `("25", "s")`
///
/// The number part is trimmed; the unit part is taken verbatim to the end.
fn split_number_and_unit(text: &str) -> Result<(&str, &str), ParseError> {
    let (number, unit) = match text.find(char::is_alphabetic) {
        Some(index) => text.split_at(index),
        None => (text, ""),
    };

    let number = number.trim();
    if number.is_empty() {
        return Err(ParseError::new("it is missing a number"));
    }

    Ok((number, unit))
}

fn scale(number: &str, multiplier: &BigInt) -> Result<BigInt, ParseError> {
    // Digit-group underscores are not part of a number literal
    if number.contains('_') {
        return Err(not_a_number(number));
    }

    if let Ok(integer) = BigInt::from_str(number) {
        return Ok(multiplier * integer);
    }

    let decimal = BigDecimal::from_str(number).map_err(|_| not_a_number(number))?;

    let scaled = BigDecimal::from(multiplier.clone()) * decimal;
    let (mut whole, _) = scaled.with_scale(0).into_bigint_and_exponent();
    // Dropping the fraction is off by at most one from the floor
    if BigDecimal::from(whole.clone()) > scaled {
        whole -= 1u32;
    } else if BigDecimal::from(&whole + 1u32) <= scaled {
        whole += 1u32;
    }

    Ok(whole)
}

fn not_a_number(number: &str) -> ParseError {
    ParseError::new(format!("\"{}\" is not a number", number))
}
