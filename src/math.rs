//! Integer helpers for period and generator arithmetic.

use crate::error::{MosError, MosResult};

/// Greatest common divisor of two non-negative integers.
///
/// # Examples
///
/// ```
/// # use mos::math;
/// assert_eq!(math::gcd(12, 18), 6);
/// assert_eq!(math::gcd(5, 0), 5);
/// assert_eq!(math::gcd(0, 5), 5);
/// assert_eq!(math::gcd(0, 0), 0);
/// ```
pub fn gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Returns `(x, y)` with `a * x + b * y == gcd(a, b)`.
///
/// # Examples
///
/// ```
/// # use mos::math;
/// let (x, y) = math::extended_gcd(240, 46);
/// assert_eq!(240 * x + 46 * y, 2);
/// ```
pub fn extended_gcd(a: i64, b: i64) -> (i64, i64) {
    let mut r = (a, b);
    let mut s = (1, 0);
    let mut t = (0, 1);

    while r.1 != 0 {
        let q = r.0 / r.1;
        r = (r.1, r.0 - q * r.1);
        s = (s.1, s.0 - q * s.1);
        t = (t.1, t.0 - q * t.1);
    }

    (s.0, t.0)
}

/// Modular inverse of `a` modulo `modulus`, normalized into `[0, modulus)`.
///
/// # Examples
///
/// ```
/// # use mos::math;
/// # use mos::MosError;
/// assert_eq!(math::mod_inv(3, 7), Ok(5));
/// assert_eq!(math::mod_inv(-3, 7), Ok(2));
/// assert_eq!(
///     math::mod_inv(4, 6),
///     Err(MosError::NotCoprime { value: 4, modulus: 6 })
/// );
/// ```
pub fn mod_inv(a: i64, modulus: i64) -> MosResult<i64> {
    let not_coprime = MosError::NotCoprime { value: a, modulus };

    if modulus < 1 {
        return Err(not_coprime);
    }

    let reduced = a.rem_euclid(modulus);
    let (x, y) = extended_gcd(reduced, modulus);

    if reduced * x + modulus * y != 1 {
        return Err(not_coprime);
    }

    Ok(x.rem_euclid(modulus))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modular_inverse_round_trip() {
        for modulus in [2, 3, 4, 5, 6, 11, 79, 100] {
            for value in 1..modulus {
                let result = mod_inv(value, modulus);
                if gcd(value as u32, modulus as u32) == 1 {
                    let inverse = result.unwrap();
                    assert!((0..modulus).contains(&inverse));
                    assert_eq!(value * inverse % modulus, 1, "{value} mod {modulus}");
                } else {
                    assert_eq!(result, Err(MosError::NotCoprime { value, modulus }));
                }
            }
        }
    }

    #[test]
    fn modulus_one_is_trivial() {
        assert_eq!(mod_inv(0, 1), Ok(0));
        assert_eq!(mod_inv(5, 1), Ok(0));
    }

    #[test]
    fn non_positive_modulus_is_rejected() {
        assert!(mod_inv(1, 0).is_err());
        assert!(mod_inv(1, -3).is_err());
    }
}
