//! The bright generator of a MOS pattern expressed in large and small steps.

use serde::{Deserialize, Serialize};

use crate::{
    error::{MosError, MosResult},
    math,
    pattern::StepCounts,
    word,
};

/// An interval expressed as a number of large and small steps.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Monzo {
    pub num_large_steps: u32,
    pub num_small_steps: u32,
}

impl Monzo {
    pub const fn new(num_large_steps: u32, num_small_steps: u32) -> Self {
        Self {
            num_large_steps,
            num_small_steps,
        }
    }

    /// The size of the interval given the sizes of the steps.
    ///
    /// # Examples
    ///
    /// ```
    /// # use mos::monzo::Monzo;
    /// let perfect_fifth = Monzo::new(3, 1);
    /// assert_eq!(perfect_fifth.size(2, 1), 7);
    /// assert_eq!(perfect_fifth.size(5, 3), 18);
    /// ```
    pub fn size(self, size_of_large_step: i64, size_of_small_step: i64) -> i64 {
        i64::from(self.num_large_steps) * size_of_large_step
            + i64::from(self.num_small_steps) * size_of_small_step
    }
}

impl From<(u32, u32)> for Monzo {
    fn from((num_large_steps, num_small_steps): (u32, u32)) -> Self {
        Self::new(num_large_steps, num_small_steps)
    }
}

/// Monzos of frequently used patterns. Every entry agrees with [`general_generator_monzo`].
const PRECOMPUTED_MONZOS: [((u32, u32), Monzo); 16] = [
    ((2, 5), Monzo::new(1, 2)),
    ((5, 2), Monzo::new(3, 1)),
    ((2, 9), Monzo::new(1, 4)),
    ((3, 8), Monzo::new(2, 5)),
    ((4, 7), Monzo::new(3, 5)),
    ((7, 4), Monzo::new(2, 1)),
    ((8, 3), Monzo::new(3, 1)),
    ((9, 2), Monzo::new(5, 1)),
    ((3, 5), Monzo::new(2, 3)),
    ((5, 3), Monzo::new(2, 1)),
    ((2, 7), Monzo::new(1, 3)),
    ((7, 2), Monzo::new(4, 1)),
    ((3, 7), Monzo::new(1, 2)),
    ((7, 3), Monzo::new(5, 2)),
    ((5, 7), Monzo::new(3, 4)),
    ((7, 5), Monzo::new(3, 2)),
];

/// The bright generator of a single-period pattern.
///
/// Fails with [`MosError::NotCoprime`] if the pattern has more than one period.
///
/// # Examples
///
/// ```
/// # use mos::monzo::{self, Monzo};
/// # use mos::pattern::StepCounts;
/// let diatonic = StepCounts::new(5, 2).unwrap();
/// assert_eq!(monzo::generator_monzo(diatonic), Ok(Monzo::new(3, 1)));
///
/// let lemon = StepCounts::new(4, 2).unwrap();
/// assert!(monzo::generator_monzo(lemon).is_err());
/// ```
pub fn generator_monzo(counts: StepCounts) -> MosResult<Monzo> {
    let (l, s) = (counts.num_large_steps(), counts.num_small_steps());

    if let Some(monzo) = closed_form(l, s) {
        return Ok(monzo);
    }

    if let Some((_, monzo)) = PRECOMPUTED_MONZOS
        .iter()
        .find(|(pattern, _)| *pattern == (l, s))
    {
        log::trace!("Precomputed generator for {counts}: {monzo:?}");
        return Ok(*monzo);
    }

    general_generator_monzo(counts)
}

fn closed_form(l: u32, s: u32) -> Option<Monzo> {
    let monzo = if s == 0 || s == 1 {
        (1, 0)
    } else if l == 1 {
        (1, s - 1)
    } else if l + 1 == s {
        (1, 1)
    } else if l == s + 1 {
        (l - 1, s - 1)
    } else if l == 0 {
        (0, 1)
    } else {
        return None;
    };
    Some(monzo.into())
}

/// Finds the bright generator by scanning the trace of the brightest word at position `s⁻¹ mod (L + s)`.
///
/// # Examples
///
/// ```
/// # use mos::monzo::{self, Monzo};
/// # use mos::pattern::StepCounts;
/// let oneirotonic = StepCounts::new(5, 3).unwrap();
/// assert_eq!(monzo::general_generator_monzo(oneirotonic), Ok(Monzo::new(2, 1)));
/// ```
pub fn general_generator_monzo(counts: StepCounts) -> MosResult<Monzo> {
    let size = i64::from(counts.size());
    let num_small_steps = i64::from(counts.num_small_steps());

    if !counts.is_single_period() {
        return Err(MosError::NotCoprime {
            value: num_small_steps,
            modulus: size,
        });
    }

    // 1L 0s and 0L 1s consist of a single step
    if num_small_steps == 0 || counts.num_large_steps() == 0 {
        return Ok(Monzo::new(1, 0));
    }

    let index = math::mod_inv(num_small_steps, size)?;
    let trace = word::brightest_word(counts).trace();

    log::trace!("Derived generator for {counts} from position {index} of the brightest word");

    // index lies in [0, size) and the trace has size + 1 entries
    Ok(trace[index as usize].into())
}

/// The bright generator of any pattern after dividing out its periods.
///
/// # Examples
///
/// ```
/// # use mos::monzo::{self, Monzo};
/// # use mos::pattern::StepCounts;
/// let lemon = StepCounts::new(4, 2).unwrap();
/// assert_eq!(monzo::bright_generator_monzo(lemon), Monzo::new(1, 0));
///
/// let diatonic = StepCounts::new(5, 2).unwrap();
/// assert_eq!(monzo::bright_generator_monzo(diatonic), Monzo::new(3, 1));
/// ```
pub fn bright_generator_monzo(counts: StepCounts) -> Monzo {
    // Primitive patterns are single-period s.t. this never fails
    generator_monzo(counts.primitive()).unwrap_or(Monzo::new(1, 0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precomputed_monzos_agree_with_general_algorithm() {
        for ((l, s), monzo) in PRECOMPUTED_MONZOS {
            let counts = StepCounts::new(l, s).unwrap();
            assert_eq!(general_generator_monzo(counts), Ok(monzo), "{counts}");
        }
    }

    #[test]
    fn closed_forms_agree_with_general_algorithm() {
        for l in 0..25 {
            for s in 0..25 {
                let Ok(counts) = StepCounts::new(l, s) else {
                    continue;
                };
                if !counts.is_single_period() {
                    continue;
                }
                assert_eq!(
                    general_generator_monzo(counts),
                    generator_monzo(counts),
                    "{counts}"
                );
                if let Some(monzo) = closed_form(l, s) {
                    assert_eq!(general_generator_monzo(counts), Ok(monzo), "{counts}");
                }
            }
        }
    }

    #[test]
    fn stacking_the_generator_reaches_every_degree() {
        for l in 1..20 {
            for s in 1..20 {
                let counts = StepCounts::new(l, s).unwrap();
                if !counts.is_single_period() {
                    continue;
                }
                let monzo = generator_monzo(counts).unwrap();
                let size = i64::from(counts.size());
                let num_steps_of_generator = i64::from(monzo.num_large_steps + monzo.num_small_steps);

                let mut degrees: Vec<_> = (0..size)
                    .map(|i| (i * num_steps_of_generator).rem_euclid(size))
                    .collect();
                degrees.sort();
                degrees.dedup();
                assert_eq!(degrees.len() as i64, size, "{counts}");
            }
        }
    }

    #[test]
    fn multi_period_patterns_are_not_coprime() {
        assert_eq!(
            general_generator_monzo(StepCounts::new(4, 6).unwrap()),
            Err(MosError::NotCoprime {
                value: 6,
                modulus: 10
            })
        );
    }

    #[test]
    fn degenerate_monzos() {
        assert_eq!(
            generator_monzo(StepCounts::new(1, 0).unwrap()),
            Ok(Monzo::new(1, 0))
        );
        assert_eq!(
            generator_monzo(StepCounts::new(0, 1).unwrap()),
            Ok(Monzo::new(1, 0))
        );
        assert_eq!(
            bright_generator_monzo(StepCounts::new(0, 3).unwrap()),
            Monzo::new(1, 0)
        );
    }
}
