//! Exact numeric kernel
//!
//! Every mass, position, velocity and time in the engine is a
//! [`Rational`]. Comparisons are decided on exact big-integer fractions, so
//! there is no rounding that could hide or duplicate a collision.

use crate::error::{Error, Result};
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};

/// Arbitrary-precision rational used for all physical quantities
pub type Rational = BigRational;

/// Build an exact rational from a machine integer
pub fn rational(value: i64) -> Rational {
    Rational::from_integer(BigInt::from(value))
}

/// Parse an exact rational from text.
///
/// Accepts integers (`-3`), fractions (`-3/2`) and finite decimals
/// (`-1.25`). Anything else, including a zero denominator, is rejected.
pub fn parse_rational(input: &str) -> Result<Rational> {
    let text = input.trim();
    if text.is_empty() {
        return Err(Error::invalid_rational(input));
    }

    if text.contains('.') {
        return parse_decimal(text).ok_or_else(|| Error::invalid_rational(input));
    }

    text.parse::<Rational>()
        .map_err(|_| Error::invalid_rational(input))
}

fn parse_decimal(text: &str) -> Option<Rational> {
    let (negative, body) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    let (whole, frac) = body.split_once('.')?;
    if whole.is_empty() && frac.is_empty() {
        return None;
    }
    if !whole.chars().chain(frac.chars()).all(|c| c.is_ascii_digit()) {
        return None;
    }

    let numer: BigInt = format!("{whole}{frac}").parse().ok()?;
    let denom = BigInt::from(10u32).pow(frac.len() as u32);
    let value = Rational::new(numer, denom);
    Some(if negative { -value } else { value })
}

/// Render a rational as `p` or `p/q` in lowest terms
pub fn format_rational(value: &Rational) -> String {
    if value.denom().is_one() {
        value.numer().to_string()
    } else {
        format!("{}/{}", value.numer(), value.denom())
    }
}

/// Approximate a rational as `f64` for display only.
///
/// Values too large for `f64` saturate to an infinity of the right sign.
pub fn to_f64_lossy(value: &Rational) -> f64 {
    value.to_f64().unwrap_or_else(|| {
        if value.is_negative() {
            f64::NEG_INFINITY
        } else if value.is_zero() {
            0.0
        } else {
            f64::INFINITY
        }
    })
}

/// Serde adapter writing a [`Rational`] as its exact string form.
///
/// Deserialization also accepts plain JSON integers.
pub mod serde_rational {
    use super::{format_rational, parse_rational, rational, Rational};
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawRational {
        Integer(i64),
        Text(String),
    }

    pub fn serialize<S: Serializer>(value: &Rational, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_rational(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Rational, D::Error> {
        match RawRational::deserialize(deserializer)? {
            RawRational::Integer(value) => Ok(rational(value)),
            RawRational::Text(text) => parse_rational(&text).map_err(serde::de::Error::custom),
        }
    }
}
