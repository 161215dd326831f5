//! Analysis of generator/period ratios: the MOS patterns a generator spans and the scales it produces.

use std::{
    cmp::Ordering,
    collections::BTreeSet,
    fmt::{self, Display},
    iter,
    str::FromStr,
};

use num_rational::Ratio;
use serde::{Deserialize, Serialize};

use crate::{
    error::{MosError, MosResult},
    family::MosInfo,
    fraction::{self, Fraction},
    names::{NameTable, TamnamsInfo},
    pattern::StepCounts,
};

/// A generator divided by the period, either given as a float or as an exact fraction.
///
/// Floats are converted to the simplest fraction within `1e-12` before any analysis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GeneratorRatio {
    Float(f64),
    Exact(Fraction),
}

impl GeneratorRatio {
    /// The exact ratio reduced into `[0, 1)`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use mos::fraction::Fraction;
    /// # use mos::generator::GeneratorRatio;
    /// let fifth = GeneratorRatio::from(Fraction::new(19, 12));
    /// assert_eq!(fifth.wrapped(), Ok(Fraction::new(7, 12)));
    ///
    /// let fourth = GeneratorRatio::from(-7.0 / 12.0);
    /// assert_eq!(fourth.wrapped(), Ok(Fraction::new(5, 12)));
    /// ```
    pub fn wrapped(self) -> MosResult<Fraction> {
        let exact = match self {
            GeneratorRatio::Float(value) => fraction::from_f64(value)?,
            GeneratorRatio::Exact(value) => value,
        };
        Ok(fraction::wrap(exact))
    }
}

impl From<f64> for GeneratorRatio {
    fn from(value: f64) -> Self {
        GeneratorRatio::Float(value)
    }
}

impl From<Fraction> for GeneratorRatio {
    fn from(value: Fraction) -> Self {
        GeneratorRatio::Exact(value)
    }
}

impl Display for GeneratorRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeneratorRatio::Float(value) => write!(f, "{value}"),
            GeneratorRatio::Exact(value) => write!(f, "{value}"),
        }
    }
}

/// Parses fractions like `7/12` as exact ratios and anything else as a float.
///
/// # Examples
///
/// ```
/// # use mos::fraction::Fraction;
/// # use mos::generator::GeneratorRatio;
/// assert_eq!("7/12".parse(), Ok(GeneratorRatio::Exact(Fraction::new(7, 12))));
/// assert_eq!("0.585".parse(), Ok(GeneratorRatio::Float(0.585)));
/// assert!("seven twelfths".parse::<GeneratorRatio>().is_err());
/// ```
impl FromStr for GeneratorRatio {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.contains('/') {
            s.parse::<Ratio<i128>>()
                .map(GeneratorRatio::Exact)
                .map_err(|err| format!("Invalid fraction {s:?}: {err}"))
        } else {
            s.parse::<f64>()
                .map(GeneratorRatio::Float)
                .map_err(|err| format!("Invalid float {s:?}: {err}"))
        }
    }
}

/// Fractions `generator_steps / scale_size` of all MOS patterns the generator supports, in ascending order of their sizes.
///
/// The trivial approximations `0/1` and `1/1` are excluded. `max_size` limits the denominators and `max_length` the number of forms.
///
/// # Examples
///
/// ```
/// # use mos::fraction::Fraction;
/// # use mos::generator;
/// let forms = generator::mos_forms(Fraction::new(7, 12), None, None).unwrap();
/// assert_eq!(
///     forms,
///     [
///         Fraction::new(1, 2),
///         Fraction::new(3, 5),
///         Fraction::new(4, 7),
///         Fraction::new(7, 12)
///     ]
/// );
/// ```
pub fn mos_forms(
    ratio: impl Into<GeneratorRatio>,
    max_size: Option<u32>,
    max_length: Option<usize>,
) -> MosResult<Vec<Fraction>> {
    let generator = ratio.into().wrapped()?;

    let approximations = fraction::best_approximations(
        generator,
        max_size.map(i128::from),
        max_length.map(|max_length| max_length + 2),
    );

    Ok(approximations.into_iter().skip(2).collect())
}

/// The sizes of all MOS patterns the generator supports.
///
/// # Examples
///
/// ```
/// # use mos::generator;
/// let pythagorean = 3f64.log2();
/// assert_eq!(
///     generator::mos_sizes(pythagorean, None, Some(6)).unwrap(),
///     [2, 3, 5, 7, 12, 29]
/// );
///
/// let meantone = 5f64.log2() / 4.0;
/// assert_eq!(
///     generator::mos_sizes(meantone, None, Some(6)).unwrap(),
///     [2, 5, 7, 12, 19, 31]
/// );
/// ```
pub fn mos_sizes(
    ratio: impl Into<GeneratorRatio>,
    max_size: Option<u32>,
    max_length: Option<usize>,
) -> MosResult<Vec<i128>> {
    Ok(mos_forms(ratio, max_size, max_length)?
        .into_iter()
        .map(|form| *form.denom())
        .collect())
}

/// Stacks `generator` the given number of times for each offset and sorts the results within the period, including the top.
fn stacked_scale(generator: Fraction, offsets: impl Iterator<Item = i128>) -> Vec<Fraction> {
    let mut scale: Vec<_> = offsets
        .map(|offset| fraction::wrap(generator * offset))
        .chain(iter::once(Fraction::from_integer(1)))
        .collect();
    scale.sort();
    scale
}

/// Checks whether stacking the generator produces a brighter scale than stacking its inverse.
///
/// Generators creating the same intervals in both directions count as bright.
///
/// # Examples
///
/// ```
/// # use mos::fraction::Fraction;
/// # use mos::generator;
/// assert_eq!(generator::is_bright(Fraction::new(7, 12), 7), Ok(true));
/// assert_eq!(generator::is_bright(Fraction::new(5, 12), 7), Ok(false));
/// assert_eq!(generator::is_bright(Fraction::new(1, 2), 2), Ok(true));
/// ```
pub fn is_bright(ratio: impl Into<GeneratorRatio>, size: u32) -> MosResult<bool> {
    let generator = ratio.into().wrapped()?;
    let inverse = Fraction::from_integer(1) - generator;

    let positive = stacked_scale(generator, 0..i128::from(size));
    let negative = stacked_scale(inverse, 0..i128::from(size));

    for (positive_degree, negative_degree) in positive.iter().zip(&negative).skip(1) {
        match (positive_degree - positive[0]).cmp(&(negative_degree - negative[0])) {
            Ordering::Greater => return Ok(true),
            Ordering::Less => return Ok(false),
            Ordering::Equal => {}
        }
    }

    Ok(true)
}

/// Flips the generator to its bright counterpart if necessary. The numeric representation of `ratio` is preserved.
///
/// # Examples
///
/// ```
/// # use assert_approx_eq::assert_approx_eq;
/// # use mos::fraction::Fraction;
/// # use mos::generator::{self, GeneratorRatio};
/// assert_eq!(
///     generator::to_bright_generator_per_period(Fraction::new(5, 12), 7),
///     Ok(GeneratorRatio::Exact(Fraction::new(7, 12)))
/// );
///
/// let GeneratorRatio::Float(fifth) = generator::to_bright_generator_per_period(1.0 - 3f64.log2(), 7).unwrap() else {
///     panic!("Float expected");
/// };
/// assert_approx_eq!(fifth, 3f64.log2() - 1.0);
/// ```
pub fn to_bright_generator_per_period(
    ratio: impl Into<GeneratorRatio>,
    size: u32,
) -> MosResult<GeneratorRatio> {
    let ratio = ratio.into();
    let bright = is_bright(ratio, size)?;

    Ok(match ratio {
        GeneratorRatio::Float(value) => {
            let value = if bright { value } else { -value };
            GeneratorRatio::Float(value.rem_euclid(1.0))
        }
        GeneratorRatio::Exact(value) => {
            let generator = fraction::wrap(value);
            GeneratorRatio::Exact(if bright {
                generator
            } else {
                Fraction::from_integer(1) - generator
            })
        }
    })
}

/// Information about a scale generated by stacking a generator.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ScaleInfo {
    /// Steps of the scale: `L` = large, `M` = medium, `s` = small.
    pub step_pattern: String,
    /// Only present if the scale has exactly two step sizes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mos_pattern: Option<StepCounts>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode_name: Option<String>,
    #[serde(flatten)]
    pub names: Option<TamnamsInfo>,
}

/// Describes the scale of `size` notes obtained by stacking the generator `generators_down` times downwards and the rest upwards.
///
/// A scale with a single step size is reported as all medium steps.
///
/// # Examples
///
/// ```
/// # use mos::generator;
/// # use mos::names::Tamnams;
/// let pythagorean = 3f64.log2();
///
/// let mixolydian = generator::scale_info(pythagorean, 7, 2, 1, &Tamnams).unwrap();
/// assert_eq!(mixolydian.step_pattern, "LLsLLsL");
/// assert_eq!(mixolydian.mode_name.as_deref(), Some("Mixolydian"));
/// assert_eq!(mixolydian.mos_pattern.unwrap().to_string(), "5L 2s");
///
/// let ternary = generator::scale_info(pythagorean, 9, 2, 1, &Tamnams).unwrap();
/// assert_eq!(ternary.step_pattern, "LLsMsLsMs");
/// assert_eq!(ternary.mos_pattern, None);
/// ```
pub fn scale_info(
    ratio: impl Into<GeneratorRatio>,
    size: u32,
    generators_down: u32,
    num_periods: u32,
    names: &impl NameTable,
) -> MosResult<ScaleInfo> {
    for value in [size, generators_down] {
        if num_periods == 0 || value % num_periods != 0 {
            return Err(MosError::IndivisibleByPeriods { value, num_periods });
        }
    }
    let size = size / num_periods;
    let generators_down = i128::from(generators_down / num_periods);

    let generator = ratio.into().wrapped()?;
    let scale = stacked_scale(
        generator,
        (0..i128::from(size)).map(|index| index - generators_down),
    );

    let steps: Vec<_> = scale.windows(2).map(|pair| pair[1] - pair[0]).collect();
    let step_sizes: Vec<_> = steps.iter().collect::<BTreeSet<_>>().into_iter().collect();

    let symbol_of = |step: &Fraction| match step_sizes.iter().position(|&step_size| step_size == step) {
        Some(0) => 's',
        Some(1) if step_sizes.len() == 3 => 'M',
        _ => 'L',
    };
    let pattern: String = match step_sizes.len() {
        0 | 1 => "M".repeat(steps.len()),
        2 | 3 => steps.iter().map(symbol_of).collect(),
        num_step_sizes => return Err(MosError::TooManyStepSizes { num_step_sizes }),
    };
    let step_pattern = pattern.repeat(num_periods as usize);

    if step_sizes.len() != 2 {
        return Ok(ScaleInfo {
            step_pattern,
            mos_pattern: None,
            mode_name: None,
            names: None,
        });
    }

    let num_small_steps = step_pattern.chars().filter(|&step| step == 's').count();
    let num_large_steps = step_pattern.len() - num_small_steps;
    let counts = StepCounts::new(num_large_steps as u32, num_small_steps as u32)?;

    Ok(ScaleInfo {
        mode_name: names.mode_name(&step_pattern, false),
        names: names.mos_names(counts),
        mos_pattern: Some(counts),
        step_pattern,
    })
}

/// Information about all MOS patterns spanned by the generator.
///
/// Each pattern is derived from two consecutive MOS forms: the scale of the earlier size is built with the later, more accurate form.
/// The search stops before the first pattern exceeding `max_size` notes. Without any limit, the number of forms of a float ratio can be large.
///
/// # Examples
///
/// ```
/// # use mos::fraction::Fraction;
/// # use mos::generator;
/// # use mos::names::Tamnams;
/// let patterns = generator::mos_patterns(Fraction::new(7, 12), 1, None, None, &Tamnams).unwrap();
///
/// let patterns: Vec<_> = patterns.iter().map(|info| info.mos_pattern.to_string()).collect();
/// assert_eq!(patterns, ["1L 1s", "2L 3s", "5L 2s"]);
/// ```
pub fn mos_patterns(
    ratio: impl Into<GeneratorRatio>,
    num_periods: u32,
    max_size: Option<u32>,
    max_length: Option<usize>,
    names: &impl NameTable,
) -> MosResult<Vec<MosInfo>> {
    let generator = ratio.into().wrapped()?;
    let num_periods_i128 = i128::from(num_periods);

    // The first form exceeding max_size is still needed to build the last pattern
    let mut forms = Vec::new();
    for form in fraction::iter_best_approximations(generator)
        .skip(2)
        .take(max_length.map_or(usize::MAX, |max_length| max_length + 1))
    {
        let size = *form.denom();
        forms.push(form);

        if let Some(max_size) = max_size {
            if size * num_periods_i128 > i128::from(max_size) {
                log::debug!("Stopping at {size} notes per period (max_size = {max_size})");
                break;
            }
        }
    }

    let mut result = Vec::new();
    for pair in forms.windows(2) {
        let size = *pair[0].denom();
        let form = pair[1];

        let scale = stacked_scale(form, 0..size);
        let mut small_step = scale[1] - scale[0];
        for pair in scale.windows(2) {
            let step = pair[1] - pair[0];
            match step.cmp(&small_step) {
                Ordering::Less => {
                    small_step = step;
                    break;
                }
                Ordering::Greater => break,
                Ordering::Equal => {}
            }
        }

        let num_small_steps = scale
            .windows(2)
            .filter(|pair| pair[0] + small_step == pair[1])
            .count();
        let num_large_steps = scale.len() - 1 - num_small_steps;

        let counts = StepCounts::from_signed(
            num_large_steps as i64 * i64::from(num_periods),
            num_small_steps as i64 * i64::from(num_periods),
        )?;
        result.push(MosInfo::new(counts, names));
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;
    use pretty_assertions::assert_eq;

    use crate::names::{Tamnams, Unnamed};

    use super::*;

    fn summary(patterns: &[MosInfo]) -> Vec<(u32, u32, u32)> {
        patterns
            .iter()
            .map(|info| {
                (
                    info.size,
                    info.mos_pattern.num_large_steps(),
                    info.mos_pattern.num_small_steps(),
                )
            })
            .collect()
    }

    #[test]
    fn forms_of_exact_ratios() {
        assert_eq!(
            mos_sizes(Fraction::new(3, 16), None, None).unwrap(),
            [4, 5, 11, 16]
        );
        assert_eq!(
            mos_forms(Fraction::new(5, 11), None, None).unwrap(),
            [Fraction::new(3, 7), Fraction::new(4, 9), Fraction::new(5, 11)]
        );
        assert_eq!(
            mos_sizes(Fraction::new(-9, 16), Some(11), None).unwrap(),
            [5, 7, 9]
        );
        assert!(mos_forms(Fraction::new(1, 2), None, None).unwrap().is_empty());
        assert!(mos_forms(0.0, None, None).unwrap().is_empty());
    }

    #[test]
    fn sizes_are_best_approximations() {
        let generator = 3f64.log2() - 1.0;
        let forms = mos_forms(generator, Some(1000), None).unwrap();

        for pair in forms.windows(2) {
            assert!(pair[0].denom() < pair[1].denom());
        }
        for pair in forms.windows(2) {
            let error = (*pair[1].numer() as f64 / *pair[1].denom() as f64 - generator).abs();
            let closest_simpler = (1..*pair[1].denom())
                .map(|denom| {
                    let numer = (generator * denom as f64).round();
                    (numer / denom as f64 - generator).abs()
                })
                .fold(f64::INFINITY, f64::min);
            assert!(error < closest_simpler, "{}", pair[1]);
        }
    }

    #[test]
    fn non_finite_ratios() {
        assert_eq!(
            mos_sizes(f64::INFINITY, None, None),
            Err(MosError::NonFiniteRatio(f64::INFINITY))
        );
        assert!(is_bright(f64::NAN, 7).is_err());
    }

    #[test]
    fn brightness() {
        assert_eq!(is_bright(Fraction::new(6, 11), 7), Ok(false));
        assert_eq!(
            to_bright_generator_per_period(Fraction::new(6, 11), 7),
            Ok(GeneratorRatio::Exact(Fraction::new(5, 11)))
        );
        assert_eq!(
            to_bright_generator_per_period(Fraction::new(19, 12), 7),
            Ok(GeneratorRatio::Exact(Fraction::new(7, 12)))
        );

        let GeneratorRatio::Float(fourth) = to_bright_generator_per_period(2.0 - 3f64.log2(), 7).unwrap() else {
            panic!("Float expected");
        };
        assert_approx_eq!(fourth, 3f64.log2() - 1.0);
    }

    #[test]
    fn brightness_ties_only_occur_in_degenerate_scales() {
        for denom in 2..30 {
            for numer in 1..denom {
                let generator = Fraction::new(numer, denom);
                if *generator.denom() != denom {
                    continue;
                }
                for size in 2..denom as u32 {
                    let bright = is_bright(generator, size).unwrap();
                    let dark = is_bright(Fraction::from_integer(1) - generator, size).unwrap();
                    assert_ne!(bright, dark, "{generator} with {size} notes");
                }
            }
        }
    }

    #[test]
    fn scale_info_with_periods() {
        let info = scale_info(Fraction::new(1, 4), 8, 2, 2, &Tamnams).unwrap();
        assert_eq!(info.step_pattern, "MMMMMMMM");
        assert_eq!(info.mos_pattern, None);
        assert_eq!(info.names, None);

        let info = scale_info(Fraction::new(1, 2), 2, 0, 1, &Tamnams).unwrap();
        assert_eq!(info.step_pattern, "MM");

        assert_eq!(
            scale_info(Fraction::new(1, 4), 7, 2, 2, &Tamnams),
            Err(MosError::IndivisibleByPeriods {
                value: 7,
                num_periods: 2
            })
        );
        assert_eq!(
            scale_info(Fraction::new(1, 4), 8, 1, 2, &Tamnams),
            Err(MosError::IndivisibleByPeriods {
                value: 1,
                num_periods: 2
            })
        );
    }

    #[test]
    fn scale_info_of_brightest_mode() {
        let info = scale_info(3f64.log2(), 7, 0, 1, &Tamnams).unwrap();
        assert_eq!(info.step_pattern, "LLLsLLs");
        assert_eq!(info.mode_name.as_deref(), Some("Lydian"));
        assert_eq!(info.names.unwrap().name, "diatonic");

        let unnamed = scale_info(3f64.log2(), 7, 0, 1, &Unnamed).unwrap();
        assert_eq!(unnamed.step_pattern, "LLLsLLs");
        assert_eq!(unnamed.mode_name, None);
        assert_eq!(unnamed.names, None);
    }

    #[test]
    fn patterns_of_pythagorean_tuning() {
        let patterns = mos_patterns(3f64.log2(), 1, None, Some(5), &Unnamed).unwrap();
        assert_eq!(
            summary(&patterns),
            [(2, 1, 1), (3, 2, 1), (5, 2, 3), (7, 5, 2), (12, 5, 7)]
        );

        let patterns = mos_patterns(3f64.log2(), 1, Some(12), None, &Unnamed).unwrap();
        assert_eq!(summary(&patterns).last(), Some(&(12, 5, 7)));
    }

    #[test]
    fn patterns_of_meantone_tuning() {
        let patterns = mos_patterns(5f64.log2() / 4.0, 1, None, Some(4), &Tamnams).unwrap();
        assert_eq!(
            summary(&patterns),
            [(2, 1, 1), (5, 2, 3), (7, 5, 2), (12, 7, 5)]
        );
        assert_eq!(
            patterns[3].names.as_ref().map(|names| names.name.as_ref()),
            Some("m-chromatic")
        );
    }

    #[test]
    fn patterns_stop_early_for_tiny_generators() {
        let patterns =
            mos_patterns(Fraction::new(1, 40_000_000), 1, Some(12), None, &Unnamed).unwrap();
        assert!(patterns.is_empty());

        let patterns = mos_patterns(Fraction::new(1, 40), 1, Some(12), None, &Unnamed).unwrap();
        assert!(patterns.is_empty());

        let patterns = mos_patterns(Fraction::new(1, 40), 1, Some(25), None, &Unnamed).unwrap();
        assert_eq!(
            summary(&patterns),
            [(22, 1, 21), (23, 1, 22), (24, 1, 23), (25, 1, 24)]
        );
    }

    #[test]
    fn patterns_with_multiple_periods() {
        let patterns = mos_patterns(5.0 * 5f64.log2(), 5, None, Some(1), &Unnamed).unwrap();
        assert_eq!(summary(&patterns), [(10, 5, 5)]);
    }
}
