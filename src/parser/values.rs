//! Scalar value types for trace event fields.
//!
//! Profilers disagree on how they write ids and timestamps: ids may be
//! numbers or strings (`"0x5"`), timestamps may be integers or floats.
//! These types keep the value exactly as written so that grouping and
//! report formatting follow the input.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::iter::Sum;
use std::ops::{Add, Sub};

/// Thread, process or correlation id
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventId {
    Int(i64),
    /// String ids, and numbers that do not fit an `i64`
    Text(String),
}

impl Default for EventId {
    fn default() -> Self {
        Self::Int(0)
    }
}

impl From<i64> for EventId {
    fn from(id: i64) -> Self {
        Self::Int(id)
    }
}

impl From<&str> for EventId {
    fn from(id: &str) -> Self {
        Self::Text(id.to_string())
    }
}

impl<'de> Deserialize<'de> for EventId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Number(n) => match n.as_i64() {
                Some(id) => Self::Int(id),
                None => Self::Text(n.to_string()),
            },
            Value::String(s) => Self::Text(s),
            other => Self::Text(other.to_string()),
        })
    }
}

/// A microsecond quantity that remembers whether it was written as an integer
///
/// Integer arithmetic stays integral; anything touching a float becomes a float.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Micros {
    Int(i64),
    Float(f64),
}

impl Micros {
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Int(v) => v as f64,
            Self::Float(v) => v,
        }
    }

    /// Smaller of the two; ties keep `self`
    pub fn min(self, other: Self) -> Self {
        if other.as_f64() < self.as_f64() {
            other
        } else {
            self
        }
    }

    /// Larger of the two; ties keep `self`
    pub fn max(self, other: Self) -> Self {
        if other.as_f64() > self.as_f64() {
            other
        } else {
            self
        }
    }
}

impl Default for Micros {
    fn default() -> Self {
        Self::Int(0)
    }
}

impl From<i64> for Micros {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Micros {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl Add for Micros {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Self::Int(a), Self::Int(b)) => Self::Int(a.saturating_add(b)),
            (a, b) => Self::Float(a.as_f64() + b.as_f64()),
        }
    }
}

impl Sub for Micros {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Self::Int(a), Self::Int(b)) => Self::Int(a.saturating_sub(b)),
            (a, b) => Self::Float(a.as_f64() - b.as_f64()),
        }
    }
}

impl Sum for Micros {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

impl<'a> Sum<&'a Micros> for Micros {
    fn sum<I: Iterator<Item = &'a Micros>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl<'de> Deserialize<'de> for Micros {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Error;

        let value = Value::deserialize(deserializer)?;
        let number = match &value {
            Value::Number(n) => Some(n.clone()),
            Value::String(s) => s.trim().parse::<serde_json::Number>().ok(),
            _ => None,
        };

        match number {
            Some(n) => match (n.as_i64(), n.as_f64()) {
                (Some(v), _) => Ok(Self::Int(v)),
                (None, Some(v)) => Ok(Self::Float(v)),
                (None, None) => Err(D::Error::custom(format!("invalid timestamp: {}", n))),
            },
            None => Err(D::Error::custom(format!("invalid timestamp: {}", value))),
        }
    }
}
