use std::fmt;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};

use super::error::DomainError;

/// Non-negative monetary amount, fixed-point over i64 (multiply by 10,000)
/// Represents amounts with 4 decimal places of precision
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct Amount(i64);

impl Amount {
    const SCALE: i64 = 10_000;

    /// Create from raw scaled value (for internal use)
    pub fn from_raw(raw: i64) -> Self {
        Self(raw)
    }

    /// Get raw scaled value
    pub fn raw(&self) -> i64 {
        self.0
    }

    /// Zero value
    pub fn zero() -> Self {
        Self(0)
    }

    /// Whole units, e.g. `Amount::from_units(100)` is 100.0000
    pub fn from_units(units: i64) -> Result<Self, DomainError> {
        if units < 0 {
            return Err(DomainError::NegativeAmount);
        }
        units
            .checked_mul(Self::SCALE)
            .map(Self)
            .ok_or(DomainError::Overflow)
    }

    /// Convert a JSON-style float, rounding to the nearest 1/10,000
    pub fn from_f64(value: f64) -> Result<Self, DomainError> {
        if !value.is_finite() {
            return Err(DomainError::InvalidAmount);
        }
        if value < 0.0 {
            return Err(DomainError::NegativeAmount);
        }

        let scaled = (value * Self::SCALE as f64).round();
        if scaled >= i64::MAX as f64 {
            return Err(DomainError::Overflow);
        }

        Ok(Self(scaled as i64))
    }

    /// Convert to decimal string with 4 decimal places
    pub fn to_decimal_string(&self) -> String {
        format!("{}.{:04}", self.0 / Self::SCALE, self.0 % Self::SCALE)
    }

    /// Lossy conversion for JSON output
    pub fn to_f64(&self) -> f64 {
        self.0 as f64 / Self::SCALE as f64
    }

    /// Checked addition, returns None on overflow
    pub fn checked_add(&self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_decimal_string())
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_f64())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Amount::from_f64(value).map_err(de::Error::custom)
    }
}
