//! Value rules
//!
//! Standalone rules a validation layer can apply to document values.
//! Model verbs do not invoke them.

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RuleViolation {
    #[error("expected a number, got {0}")]
    NotANumber(Value),
    #[error("expected an integer, got {0}")]
    NotAnInteger(Value),
    #[error("expected a non-negative number, got {0}")]
    Negative(Value),
}

/// Accepts integral numbers (or numeric text) that are zero or greater.
#[derive(Debug, Clone, Copy, Default)]
pub struct NonNegativeInteger;

impl NonNegativeInteger {
    /// Validate a value, returning it as a `u64` when it passes.
    pub fn validate(&self, value: &Value) -> Result<u64, RuleViolation> {
        let number = match value {
            Value::Number(n) => n
                .as_f64()
                .ok_or_else(|| RuleViolation::NotANumber(value.clone()))?,
            Value::String(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| RuleViolation::NotANumber(value.clone()))?,
            _ => return Err(RuleViolation::NotANumber(value.clone())),
        };

        if !number.is_finite() {
            return Err(RuleViolation::NotANumber(value.clone()));
        }
        if number.fract() != 0.0 {
            return Err(RuleViolation::NotAnInteger(value.clone()));
        }
        if number < 0.0 {
            return Err(RuleViolation::Negative(value.clone()));
        }

        Ok(value.as_u64().unwrap_or(number as u64))
    }
}
