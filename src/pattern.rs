//! Abstract MOS patterns in the `5L 2s` notation.

use std::{
    fmt::{self, Display},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::{
    error::{MosError, MosResult},
    math,
};

/// The number of large and small steps of a MOS pattern, e.g. `5L 2s`.
///
/// At least one of the counts is non-zero.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(into = "String", try_from = "String")]
pub struct StepCounts {
    num_large_steps: u32,
    num_small_steps: u32,
}

impl StepCounts {
    /// Creates a new pattern from its step counts.
    ///
    /// # Examples
    ///
    /// ```
    /// # use mos::pattern::StepCounts;
    /// # use mos::MosError;
    /// let diatonic = StepCounts::new(5, 2).unwrap();
    /// assert_eq!(diatonic.size(), 7);
    ///
    /// assert_eq!(
    ///     StepCounts::new(0, 0),
    ///     Err(MosError::InvalidInput { large: 0, small: 0 })
    /// );
    /// ```
    pub fn new(num_large_steps: u32, num_small_steps: u32) -> MosResult<Self> {
        if num_large_steps == 0 && num_small_steps == 0 {
            return Err(MosError::InvalidInput { large: 0, small: 0 });
        }
        Ok(Self::from_nonzero(num_large_steps, num_small_steps))
    }

    /// Like [`StepCounts::new`] but additionally rejects negative counts.
    pub fn from_signed(num_large_steps: i64, num_small_steps: i64) -> MosResult<Self> {
        let invalid_input = MosError::InvalidInput {
            large: num_large_steps,
            small: num_small_steps,
        };
        match (
            u32::try_from(num_large_steps),
            u32::try_from(num_small_steps),
        ) {
            (Ok(num_large_steps), Ok(num_small_steps)) => {
                Self::new(num_large_steps, num_small_steps).map_err(|_| invalid_input)
            }
            _ => Err(invalid_input),
        }
    }

    pub(crate) const fn from_nonzero(num_large_steps: u32, num_small_steps: u32) -> Self {
        Self {
            num_large_steps,
            num_small_steps,
        }
    }

    pub fn num_large_steps(self) -> u32 {
        self.num_large_steps
    }

    pub fn num_small_steps(self) -> u32 {
        self.num_small_steps
    }

    pub fn size(self) -> u32 {
        self.num_large_steps + self.num_small_steps
    }

    /// The number of periods per equave, `gcd(L, s)`.
    pub fn num_periods(self) -> u32 {
        math::gcd(self.num_large_steps, self.num_small_steps)
    }

    pub fn is_single_period(self) -> bool {
        self.num_periods() == 1
    }

    /// The number of steps in a single period.
    pub fn period(self) -> u32 {
        self.size() / self.num_periods()
    }

    /// The pattern of a single period.
    ///
    /// # Examples
    ///
    /// ```
    /// # use mos::pattern::StepCounts;
    /// let lemon: StepCounts = "4L 2s".parse().unwrap();
    /// assert_eq!(lemon.primitive().to_string(), "2L 1s");
    /// ```
    pub fn primitive(self) -> Self {
        let num_periods = self.num_periods();
        Self::from_nonzero(
            self.num_large_steps / num_periods,
            self.num_small_steps / num_periods,
        )
    }

    /// The parent pattern obtained by removing the chroma, e.g. `2L 3s` for `5L 2s`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use mos::pattern::StepCounts;
    /// let diatonic: StepCounts = "5L 2s".parse().unwrap();
    /// assert_eq!(diatonic.parent().to_string(), "2L 3s");
    ///
    /// let mosh: StepCounts = "3L 4s".parse().unwrap();
    /// assert_eq!(mosh.parent().to_string(), "3L 1s");
    /// ```
    pub fn parent(self) -> Self {
        let size = self.num_large_steps.max(self.num_small_steps);
        let num_large_steps = self.num_large_steps.min(self.num_small_steps);
        Self::from_nonzero(num_large_steps, size - num_large_steps)
    }

    pub fn is_equalized(self) -> bool {
        self.num_large_steps == self.num_small_steps
    }
}

impl Display for StepCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}L {}s", self.num_large_steps, self.num_small_steps)
    }
}

/// Parses patterns like `5L 2s` or `5L2s`.
///
/// # Examples
///
/// ```
/// # use mos::pattern::StepCounts;
/// # use mos::MosError;
/// let smitonic: StepCounts = " 4L 3s ".parse().unwrap();
/// assert_eq!((smitonic.num_large_steps(), smitonic.num_small_steps()), (4, 3));
///
/// let compact: StepCounts = "4L3s".parse().unwrap();
/// assert_eq!(compact, smitonic);
///
/// assert_eq!(
///     "4s 3L".parse::<StepCounts>(),
///     Err(MosError::InvalidPattern("4s 3L".to_owned()))
/// );
/// ```
impl FromStr for StepCounts {
    type Err = MosError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid_pattern = || MosError::InvalidPattern(s.to_owned());

        let (large, small) = s.trim().split_once('L').ok_or_else(invalid_pattern)?;
        let small = small.trim().strip_suffix('s').ok_or_else(invalid_pattern)?;

        let num_large_steps = large.trim().parse().map_err(|_| invalid_pattern())?;
        let num_small_steps = small.trim().parse().map_err(|_| invalid_pattern())?;

        Self::new(num_large_steps, num_small_steps)
    }
}

impl From<StepCounts> for String {
    fn from(counts: StepCounts) -> Self {
        counts.to_string()
    }
}

impl TryFrom<String> for StepCounts {
    type Error = MosError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn period_structure() {
        let pattern = StepCounts::new(6, 4).unwrap();
        assert_eq!(pattern.num_periods(), 2);
        assert_eq!(pattern.period(), 5);
        assert_eq!(pattern.primitive(), StepCounts::new(3, 2).unwrap());
        assert!(!pattern.is_single_period());

        let single = StepCounts::new(0, 3).unwrap();
        assert_eq!(single.num_periods(), 3);
        assert_eq!(single.period(), 1);
        assert_eq!(single.primitive(), StepCounts::new(0, 1).unwrap());
    }

    #[test]
    fn negative_counts_are_invalid() {
        assert_eq!(
            StepCounts::from_signed(-1, 3),
            Err(MosError::InvalidInput {
                large: -1,
                small: 3
            })
        );
        assert_eq!(
            StepCounts::from_signed(0, 0),
            Err(MosError::InvalidInput { large: 0, small: 0 })
        );
        assert_eq!(
            StepCounts::from_signed(2, 3),
            Ok(StepCounts::new(2, 3).unwrap())
        );
    }

    #[test]
    fn parse_errors() {
        for input in ["", "L s", "5L", "5L 2", "xL 2s", "5L -2s", "0L 0s"] {
            assert!(input.parse::<StepCounts>().is_err(), "{input:?}");
        }
    }

    #[test]
    fn parents_of_equalized_and_degenerate_patterns() {
        assert_eq!(StepCounts::new(1, 1).unwrap().parent().to_string(), "1L 0s");
        assert_eq!(StepCounts::new(3, 0).unwrap().parent().to_string(), "0L 3s");
        assert_eq!(StepCounts::new(6, 2).unwrap().parent().to_string(), "2L 4s");
    }
}
