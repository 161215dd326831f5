//! Exact rational arithmetic for generator/period ratios.
//!
//! Fractions are always stored in lowest terms with a positive denominator s.t. repeated multiplication and reduction modulo 1 never drifts.

use std::iter;

use num_rational::Ratio;

use crate::error::{MosError, MosResult};

/// An exact fraction in lowest terms with a positive denominator.
pub type Fraction = Ratio<i128>;

const FLOAT_TOLERANCE: f64 = 1e-12;
const MAX_NUM_TERMS: usize = 64;

/// Finds the simplest continued fraction convergent within `1e-12` of `value`.
///
/// # Examples
///
/// ```
/// # use mos::fraction;
/// # use mos::fraction::Fraction;
/// assert_eq!(fraction::from_f64(0.75).unwrap(), Fraction::new(3, 4));
/// assert_eq!(fraction::from_f64(-1.5).unwrap(), Fraction::new(-3, 2));
/// assert_eq!(fraction::from_f64(7.0 / 12.0).unwrap(), Fraction::new(7, 12));
/// assert!(fraction::from_f64(f64::NAN).is_err());
/// ```
pub fn from_f64(value: f64) -> MosResult<Fraction> {
    if !value.is_finite() {
        return Err(MosError::NonFiniteRatio(value));
    }

    let integer_part = value.floor();
    let mut remainder = value - integer_part;

    let mut previous = (1i128, 0i128);
    let mut current = (integer_part as i128, 1i128);

    for _ in 0..MAX_NUM_TERMS {
        let approximation = current.0 as f64 / current.1 as f64;
        if remainder == 0.0 || (value - approximation).abs() < FLOAT_TOLERANCE {
            break;
        }

        let reciprocal = 1.0 / remainder;
        let term = reciprocal.floor();
        remainder = reciprocal - term;

        let term = term as i128;
        let next = term
            .checked_mul(current.0)
            .and_then(|numer| numer.checked_add(previous.0))
            .zip(
                term.checked_mul(current.1)
                    .and_then(|denom| denom.checked_add(previous.1)),
            );

        match next {
            Some(next) => {
                previous = current;
                current = next;
            }
            None => {
                log::trace!("Continued fraction of {value} truncated due to overflow");
                break;
            }
        }
    }

    Ok(Fraction::new(current.0, current.1))
}

/// Reduces `value` modulo 1 into the interval `[0, 1)`.
///
/// # Examples
///
/// ```
/// # use mos::fraction;
/// # use mos::fraction::Fraction;
/// assert_eq!(fraction::wrap(Fraction::new(19, 12)), Fraction::new(7, 12));
/// assert_eq!(fraction::wrap(Fraction::new(-5, 12)), Fraction::new(7, 12));
/// assert_eq!(fraction::wrap(Fraction::new(1, 1)), Fraction::new(0, 1));
/// ```
pub fn wrap(value: Fraction) -> Fraction {
    value - value.floor()
}

/// The terms `[a0; a1, a2, ...]` of the regular continued fraction of `value`.
///
/// # Examples
///
/// ```
/// # use mos::fraction;
/// # use mos::fraction::Fraction;
/// assert_eq!(fraction::continued_fraction(Fraction::new(7, 12)), [0, 1, 1, 2, 2]);
/// assert_eq!(fraction::continued_fraction(Fraction::new(-1, 2)), [-1, 2]);
/// ```
pub fn continued_fraction(value: Fraction) -> Vec<i128> {
    let mut terms = Vec::new();
    let mut numer = *value.numer();
    let mut denom = *value.denom();

    while denom != 0 {
        let term = numer.div_euclid(denom);
        terms.push(term);
        (numer, denom) = (denom, numer - term * denom);
    }

    terms
}

/// Best rational approximations of the first kind, i.e. the convergents together with all admissible semiconvergents in ascending order of their denominators.
///
/// A semiconvergent lying exactly halfway (`m == a/2`) is only admissible if it is strictly closer to `value` than the previous convergent.
/// The result stops before the first fraction whose denominator exceeds `max_denominator` or when `max_length` elements have been collected.
///
/// # Examples
///
/// ```
/// # use mos::fraction;
/// # use mos::fraction::Fraction;
/// let approximations = fraction::best_approximations(Fraction::new(7, 12), None, None);
/// assert_eq!(
///     approximations,
///     [
///         Fraction::new(0, 1),
///         Fraction::new(1, 1),
///         Fraction::new(1, 2),
///         Fraction::new(3, 5),
///         Fraction::new(4, 7),
///         Fraction::new(7, 12),
///     ]
/// );
/// ```
pub fn best_approximations(
    value: Fraction,
    max_denominator: Option<i128>,
    max_length: Option<usize>,
) -> Vec<Fraction> {
    iter_best_approximations(value)
        .take_while(|approximation| {
            max_denominator
                .map(|max_denominator| *approximation.denom() <= max_denominator)
                .unwrap_or(true)
        })
        .take(max_length.unwrap_or(usize::MAX))
        .collect()
}

/// Lazy version of [`best_approximations`] without any limits.
///
/// Long runs of semiconvergents, e.g. for values close to an integer, are only computed as far as they are consumed.
///
/// ```
/// # use mos::fraction;
/// # use mos::fraction::Fraction;
/// let mut approximations = fraction::iter_best_approximations(Fraction::new(1, 999_999_999));
/// assert_eq!(approximations.nth(1), Some(Fraction::new(1, 500_000_000)));
/// ```
pub fn iter_best_approximations(value: Fraction) -> impl Iterator<Item = Fraction> {
    // (numer, denom) of the convergents c_{k-2} and c_{k-1}
    let mut older = (0i128, 1i128);
    let mut old = (1i128, 0i128);

    continued_fraction(value)
        .into_iter()
        .enumerate()
        .flat_map(move |(index, term)| {
            let (before_previous, previous) = (older, old);
            (older, old) = (old, (term * old.0 + older.0, term * old.1 + older.1));
            let convergent = Fraction::new(old.0, old.1);

            let first_multiplier = if index > 0 { term / 2 + term % 2 } else { term };
            (first_multiplier..term)
                .map(move |multiplier| {
                    let semiconvergent = Fraction::new(
                        multiplier * previous.0 + before_previous.0,
                        multiplier * previous.1 + before_previous.1,
                    );
                    (multiplier, semiconvergent)
                })
                .filter(move |&(multiplier, semiconvergent)| {
                    multiplier != term - multiplier
                        || abs_diff(value, semiconvergent)
                            < abs_diff(value, Fraction::new(previous.0, previous.1))
                })
                .map(|(_, semiconvergent)| semiconvergent)
                .chain(iter::once(convergent))
        })
}

fn abs_diff(a: Fraction, b: Fraction) -> Fraction {
    if a > b {
        a - b
    } else {
        b - a
    }
}
