//! Error types for the collision engine

use num_bigint::BigUint;
use thiserror::Error;

/// Errors produced while configuring, running or counting a simulation
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("cannot parse '{input}' as an exact rational")]
    InvalidRational { input: String },

    #[error("precision budget of {budget_bits} bits exceeded while resolving the collision count")]
    PrecisionBudgetExceeded { budget_bits: u32 },

    #[error(
        "event enumeration for N = {digits} exceeds the safe bound of N = {max_digits}; use the fast-path counter"
    )]
    EnumerationTooLarge { digits: u32, max_digits: u32 },

    #[error("simulation cancelled after {collisions} collisions")]
    Cancelled { collisions: u64 },

    #[error("event-driven count {event_driven} disagrees with fast-path count {fast_path}")]
    CountMismatch {
        event_driven: BigUint,
        fast_path: BigUint,
    },
}

impl Error {
    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            message: message.into(),
        }
    }

    pub fn invalid_rational(input: impl Into<String>) -> Self {
        Self::InvalidRational {
            input: input.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
