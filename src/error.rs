//! The failure modes of the MOS engine.

use thiserror::Error;

/// Errors raised by the operations of this crate.
///
/// Every variant carries the values that triggered it. No operation recovers from these errors internally.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum MosError {
    /// Negative or otherwise unusable step counts or step sizes, e.g. `0L 0s` or `L = 1, s = 0`.
    #[error("Invalid step counts: {large}L {small}s")]
    InvalidInput { large: i64, small: i64 },

    /// A pattern string that does not look like `5L 2s`.
    #[error("Invalid MOS pattern: {0:?}")]
    InvalidPattern(String),

    /// A float generator ratio that is NaN or infinite.
    #[error("Generator ratio must be finite but was {0}")]
    NonFiniteRatio(f64),

    /// No modular inverse exists since the arguments are not coprime.
    #[error("{value} is not invertible modulo {modulus}")]
    NotCoprime { value: i64, modulus: i64 },

    /// The given number of generators going up and down contradict each other.
    #[error("up = {up} and down = {down} are incompatible (expected down = {expected_down})")]
    IncompatibleParameters {
        up: u32,
        down: u32,
        expected_down: i64,
    },

    /// The number of generators going down lies outside of `[0, size)` or is not a multiple of the number of periods.
    #[error("down = {down} must lie in [0, {size}) and be divisible by {num_periods}")]
    InvalidRange {
        down: i64,
        size: u32,
        num_periods: u32,
    },

    /// A size or generator count that cannot be distributed evenly over the periods.
    #[error("{value} is not divisible by the number of periods ({num_periods})")]
    IndivisibleByPeriods { value: u32, num_periods: u32 },

    /// The scale has more distinct step sizes than a ternary scale.
    #[error("Too many step sizes ({num_step_sizes})")]
    TooManyStepSizes { num_step_sizes: usize },

    #[error("EDO must have at least 2 steps but had {0}")]
    EdoTooSmall(u32),

    /// None of the candidate patterns fits into the EDO with a proper step ratio.
    #[error("Failed to find MOS pattern for {edo}-EDO")]
    NoPatternFound { edo: u32 },

    /// Search bounds violating `2 <= min_size` and `max_size <= edo`.
    #[error("Search range [{min_size}, {max_size}] is out of range for {edo}-EDO")]
    OutOfRangeSearch {
        edo: u32,
        min_size: u32,
        max_size: u32,
    },

    #[error("Unable to determine hardness of L = {large}, s = {small}")]
    UnableToClassify { large: f64, small: f64 },
}

pub type MosResult<T> = Result<T, MosError>;
