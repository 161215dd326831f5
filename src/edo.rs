//! Searching MOS scales supported by an EDO.

use std::collections::BTreeMap;

use crate::{
    error::{MosError, MosResult},
    family::{self, MosScaleInfo},
    math,
    names::NameTable,
    pattern::StepCounts,
};

/// Patterns tried by [`any_for_edo`] in order of preference.
const PREFERRED_PATTERNS: [(u32, u32); 18] = [
    (5, 2), // diatonic
    (4, 3), // smitonic
    (3, 4), // mosh
    (2, 5), // antidiatonic
    (3, 5), // checkertonic
    (5, 3), // oneirotonic
    (6, 2), // ekic
    (2, 6), // antiekic
    (4, 2), // lemon
    (2, 4), // antilemon
    (5, 1), // machinoid
    (2, 3), // pentic
    (3, 2), // antipentic
    (1, 4), // pedal
    (1, 3), // antetric
    (1, 2), // antrial
    (2, 1), // trial
    (1, 1), // trivial
];

/// One step ratio per hardness class.
const STEP_SIZES: [(i64, i64); 15] = [
    (2, 1), // basic
    (3, 2), // soft
    (3, 1), // hard
    (4, 3), // supersoft
    (4, 1), // superhard
    (5, 3), // semisoft
    (5, 2), // semihard
    (5, 4), // ultrasoft
    (5, 1), // ultrahard
    (7, 5), // parasoft
    (7, 4), // minisoft
    (7, 3), // minihard
    (7, 2), // parahard
    (8, 5), // quasisoft
    (8, 3), // quasihard
];

/// Finds a well-known MOS scale with a proper step ratio (`3/2 <= L/s <= 3`) in the given EDO.
///
/// # Examples
///
/// ```
/// # use mos::edo;
/// # use mos::names::Tamnams;
/// let info = edo::any_for_edo(19, &Tamnams).unwrap();
/// assert_eq!(info.mos_pattern.to_string(), "5L 2s");
/// assert_eq!((info.size_of_large_step, info.size_of_small_step), (3, 2));
/// assert_eq!(info.hardness.to_string(), "soft");
///
/// assert!(edo::any_for_edo(1, &Tamnams).is_err());
/// ```
pub fn any_for_edo(edo: u32, names: &impl NameTable) -> MosResult<MosScaleInfo> {
    if edo <= 1 {
        return Err(MosError::EdoTooSmall(edo));
    }
    if edo == 2 {
        return family::mos_scale_info(StepCounts::from_nonzero(1, 1), 1, 1, names);
    }

    let total = i64::from(edo);
    for (num_large_steps, num_small_steps) in PREFERRED_PATTERNS {
        let (l, s) = (i64::from(num_large_steps), i64::from(num_small_steps));

        for size_of_large_step in 2.. {
            let small_part = total - size_of_large_step * l;
            if small_part <= 0 {
                break;
            }
            if small_part % s != 0 {
                continue;
            }

            let size_of_small_step = small_part / s;
            if size_of_large_step <= 3 * size_of_small_step
                && 3 * size_of_small_step <= 2 * size_of_large_step
            {
                log::debug!(
                    "Found {num_large_steps}L {num_small_steps}s with L = {size_of_large_step}, s = {size_of_small_step} in {edo}-EDO"
                );
                return family::mos_scale_info(
                    StepCounts::from_nonzero(num_large_steps, num_small_steps),
                    size_of_large_step,
                    size_of_small_step,
                    names,
                );
            }
        }
    }

    Err(MosError::NoPatternFound { edo })
}

/// Constraints of [`all_for_edo`].
#[derive(Clone, Debug, PartialEq)]
pub struct SearchOptions {
    /// Minimum number of notes of a pattern. Must be at least 2.
    pub min_size: u32,
    /// Maximum number of notes of a pattern. Defaults to the size of the EDO.
    pub max_size: Option<u32>,
    /// Maximum value of `L/s`. Zero or a negative value disables the limit like `None`.
    pub max_hardness: Option<f64>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            min_size: 2,
            max_size: None,
            max_hardness: None,
        }
    }
}

/// Finds all MOS scales with coprime step sizes `L > s > 0` in the given EDO.
///
/// The result is ordered by the number of large steps, then by the number of small steps and finally by ascending `s/L`.
///
/// # Examples
///
/// ```
/// # use mos::edo::{self, SearchOptions};
/// # use mos::names::Unnamed;
/// let options = SearchOptions {
///     min_size: 5,
///     max_size: Some(7),
///     max_hardness: None,
/// };
/// let scales = edo::all_for_edo(12, &options, &Unnamed).unwrap();
///
/// assert_eq!(scales.len(), 7);
/// assert!(scales
///     .iter()
///     .all(|scale| (5..=7).contains(&scale.mos_pattern.size())));
/// ```
pub fn all_for_edo(
    edo: u32,
    options: &SearchOptions,
    names: &impl NameTable,
) -> MosResult<Vec<MosScaleInfo>> {
    let max_size = options.max_size.unwrap_or(edo);
    if options.min_size < 2 || max_size > edo {
        return Err(MosError::OutOfRangeSearch {
            edo,
            min_size: options.min_size,
            max_size,
        });
    }

    let mut result = Vec::new();
    for num_large_steps in 1..max_size {
        let min_num_small_steps = options.min_size.saturating_sub(num_large_steps).max(1);
        for num_small_steps in min_num_small_steps..=max_size - num_large_steps {
            let counts = StepCounts::from_nonzero(num_large_steps, num_small_steps);
            let (l, s) = (i64::from(num_large_steps), i64::from(num_small_steps));

            for size_of_small_step in 1.. {
                let large_part = i64::from(edo) - s * size_of_small_step;
                if large_part <= l * size_of_small_step {
                    break;
                }
                if large_part % l != 0 {
                    continue;
                }

                let size_of_large_step = large_part / l;
                if math::gcd(size_of_large_step as u32, size_of_small_step as u32) != 1 {
                    continue;
                }
                if let Some(max_hardness) = options.max_hardness.filter(|&max| max > 0.0) {
                    if size_of_large_step as f64 > size_of_small_step as f64 * max_hardness {
                        continue;
                    }
                }

                result.push(family::mos_scale_info(
                    counts,
                    size_of_large_step,
                    size_of_small_step,
                    names,
                )?);
            }
        }
    }

    log::debug!("Found {} MOS scales in {edo}-EDO", result.len());

    Ok(result)
}

/// Maps EDO sizes to the MOS scales of up to `max_size` notes they support with one of 15 representative step ratios.
///
/// # Examples
///
/// ```
/// # use mos::edo;
/// # use mos::names::Tamnams;
/// let map = edo::make_edo_map(12, &Tamnams).unwrap();
///
/// let diatonic = map[&12]
///     .iter()
///     .find(|info| info.mos_pattern.to_string() == "5L 2s")
///     .unwrap();
/// assert_eq!((diatonic.size_of_large_step, diatonic.size_of_small_step), (2, 1));
/// ```
pub fn make_edo_map(
    max_size: u32,
    names: &impl NameTable,
) -> MosResult<BTreeMap<i64, Vec<MosScaleInfo>>> {
    let mut result = BTreeMap::<_, Vec<_>>::new();

    for (size_of_large_step, size_of_small_step) in STEP_SIZES {
        for size in 2..=max_size {
            for num_large_steps in 1..size {
                let counts = StepCounts::from_nonzero(num_large_steps, size - num_large_steps);
                let info =
                    family::mos_scale_info(counts, size_of_large_step, size_of_small_step, names)?;
                result.entry(info.edo).or_default().push(info);
            }
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::names::{Tamnams, Unnamed};

    use super::*;

    fn summary(info: &MosScaleInfo) -> (u32, u32, i64, i64) {
        (
            info.mos_pattern.num_large_steps(),
            info.mos_pattern.num_small_steps(),
            info.size_of_large_step,
            info.size_of_small_step,
        )
    }

    #[test]
    fn preferred_patterns() {
        let found: Vec<_> = [3, 4, 5, 7, 10, 11, 12, 13, 17, 22, 31, 53]
            .into_iter()
            .map(|edo| summary(&any_for_edo(edo, &Unnamed).unwrap()))
            .collect();
        assert_eq!(
            found,
            [
                (1, 1, 2, 1),
                (1, 2, 2, 1),
                (1, 3, 2, 1),
                (2, 3, 2, 1),
                (3, 4, 2, 1),
                (4, 3, 2, 1),
                (5, 2, 2, 1),
                (3, 4, 3, 1),
                (5, 2, 3, 1),
                (4, 3, 4, 2),
                (5, 2, 5, 3),
                (5, 2, 9, 4)
            ]
        );
    }

    #[test]
    fn every_edo_has_a_preferred_pattern() {
        for edo in 2..1000 {
            let info = any_for_edo(edo, &Unnamed).unwrap();
            assert_eq!(info.edo, i64::from(edo));
        }
    }

    #[test]
    fn trivial_edo() {
        let info = any_for_edo(2, &Tamnams).unwrap();
        assert_eq!(summary(&info), (1, 1, 1, 1));
        assert_eq!(info.hardness.to_string(), "equalized");
        assert_eq!(info.names.unwrap().name, "trivial");

        assert_eq!(any_for_edo(0, &Tamnams), Err(MosError::EdoTooSmall(0)));
    }

    #[test]
    fn all_scales_of_12edo() {
        let scales = all_for_edo(12, &SearchOptions::default(), &Unnamed).unwrap();
        assert_eq!(scales.len(), 21);
        assert_eq!(summary(&scales[0]), (1, 1, 11, 1));
        assert_eq!(summary(&scales[1]), (1, 1, 7, 5));
        assert!(scales.iter().all(|scale| scale.edo == 12));
        assert!(scales
            .iter()
            .any(|scale| summary(scale) == (5, 2, 2, 1)));
    }

    #[test]
    fn search_constraints() {
        let options = SearchOptions {
            min_size: 5,
            max_size: Some(12),
            max_hardness: Some(4.5),
        };
        let scales = all_for_edo(31, &options, &Unnamed).unwrap();
        assert_eq!(scales.len(), 29);
        for scale in &scales {
            let size = scale.mos_pattern.size();
            assert!((5..=12).contains(&size));
            assert!(scale.size_of_large_step as f64 <= 4.5 * scale.size_of_small_step as f64);
        }

        let options = SearchOptions {
            min_size: 5,
            max_size: Some(12),
            max_hardness: None,
        };
        let scales = all_for_edo(53, &options, &Tamnams).unwrap();
        assert!(scales
            .iter()
            .any(|scale| scale.mos_pattern == StepCounts::new(4, 3).unwrap()));

        let options = SearchOptions {
            max_hardness: Some(2.0),
            ..Default::default()
        };
        let scales = all_for_edo(12, &options, &Unnamed).unwrap();
        assert_eq!(scales.len(), 7);
        assert!(scales.iter().all(|scale| !scale.hardness.anti
            && scale.size_of_large_step <= 2 * scale.size_of_small_step));

        for max_hardness in [0.0, -1.0] {
            let options = SearchOptions {
                max_hardness: Some(max_hardness),
                ..Default::default()
            };
            assert_eq!(
                all_for_edo(12, &options, &Unnamed),
                all_for_edo(12, &SearchOptions::default(), &Unnamed)
            );
        }
    }

    #[test]
    fn invalid_search_ranges() {
        let options = SearchOptions {
            min_size: 1,
            max_size: Some(10),
            max_hardness: None,
        };
        assert_eq!(
            all_for_edo(9, &options, &Unnamed),
            Err(MosError::OutOfRangeSearch {
                edo: 9,
                min_size: 1,
                max_size: 10
            })
        );

        let options = SearchOptions {
            max_size: Some(13),
            ..Default::default()
        };
        assert!(all_for_edo(12, &options, &Unnamed).is_err());
    }

    #[test]
    fn edo_map() {
        let map = make_edo_map(12, &Tamnams).unwrap();

        assert_eq!(map.len(), 88);
        assert_eq!(map.keys().next(), Some(&3));
        assert_eq!(map.keys().next_back(), Some(&93));

        let scales = &map[&12];
        assert_eq!(scales.len(), 15);
        assert_eq!(summary(&scales[0]), (5, 2, 2, 1));
        assert!(scales.iter().all(|scale| scale.edo == 12));
    }
}
