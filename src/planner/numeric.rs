//! Numeric coercion and rounding helpers shared by both calculators.
//!
//! User-entered values are never rejected for bad formatting: anything
//! non-numeric, non-finite or missing becomes 0.

use std::fmt;

use serde::de::{self, Deserializer, Visitor};

use crate::planner::constants::{MAX_LEVEL, MIN_LEVEL};

/// Parse loosely formatted numeric text ("1,200", " 35 ") into a finite number.
///
/// Empty, non-numeric and non-finite text all yield 0.
pub fn to_num(raw: &str) -> f64 {
    let cleaned: String = raw.trim().chars().filter(|&c| c != ',').collect();
    if cleaned.is_empty() {
        return 0.0;
    }
    cleaned.parse::<f64>().map(finite_or_zero).unwrap_or(0.0)
}

#[inline]
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

/// Round to the nearest integer, ties toward positive infinity.
pub fn round_half_up(value: f64) -> i64 {
    let value = finite_or_zero(value);
    let floor = value.floor();
    if value - floor >= 0.5 {
        (floor as i64).saturating_add(1)
    } else {
        floor as i64
    }
}

/// Clamp a level into the supported `[1, 65]` range.
#[inline]
pub fn clamp_level(level: i64) -> u32 {
    level.clamp(MIN_LEVEL as i64, MAX_LEVEL as i64) as u32
}

struct LenientNumber;

impl<'de> Visitor<'de> for LenientNumber {
    type Value = Option<f64>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a number, a numeric string or null")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Self::Value, E> {
        Ok(Some(v as f64))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Self::Value, E> {
        Ok(Some(v as f64))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<Self::Value, E> {
        Ok(Some(finite_or_zero(v)))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Self::Value, E> {
        if v.trim().is_empty() {
            Ok(None)
        } else {
            Ok(Some(to_num(v)))
        }
    }

    fn visit_bool<E: de::Error>(self, _v: bool) -> std::result::Result<Self::Value, E> {
        Ok(Some(0.0))
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_none<E: de::Error>(self) -> std::result::Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D: Deserializer<'de>>(
        self,
        deserializer: D,
    ) -> std::result::Result<Self::Value, D::Error> {
        deserializer.deserialize_any(LenientNumber)
    }
}

/// Deserialize any number-ish value as `f64`, falling back to 0.
pub fn lenient_f64<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(deserializer.deserialize_any(LenientNumber)?.unwrap_or(0.0))
}

/// Deserialize any number-ish value as `i64` (fractions truncated), falling back to 0.
pub fn lenient_i64<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_f64(deserializer)? as i64)
}

/// Like [`lenient_i64`], but blank text and null stay `None`.
pub fn lenient_opt_i64<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(deserializer
        .deserialize_any(LenientNumber)?
        .map(|v| v as i64))
}
