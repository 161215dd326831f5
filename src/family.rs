//! Parent and daughter relations between MOS patterns and the generator ranges spanning them.

use serde::{Deserialize, Serialize};

use crate::{
    error::MosResult,
    fraction::Fraction,
    hardness::Hardness,
    monzo::{self, Monzo},
    names::{NameTable, TamnamsInfo},
    pattern::StepCounts,
};

/// Information about an abstract MOS pattern.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct MosInfo {
    pub mos_pattern: StepCounts,
    pub size: u32,
    #[serde(flatten)]
    pub names: Option<TamnamsInfo>,
}

impl MosInfo {
    pub fn new(counts: StepCounts, names: &impl NameTable) -> Self {
        Self {
            mos_pattern: counts,
            size: counts.size(),
            names: names.mos_names(counts),
        }
    }
}

/// Information about a MOS pattern with concrete step sizes, i.e. a MOS scale embedded in an EDO.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct MosScaleInfo {
    pub mos_pattern: StepCounts,
    pub size_of_large_step: i64,
    pub size_of_small_step: i64,
    /// Size of the period in EDO steps.
    pub period: i64,
    pub num_periods: u32,
    pub edo: i64,
    pub bright_generator: i64,
    pub dark_generator: i64,
    pub period_monzo: Monzo,
    pub bright_generator_monzo: Monzo,
    pub hardness: Hardness,
    #[serde(flatten)]
    pub names: Option<TamnamsInfo>,
}

/// Describes the MOS scale with the given step sizes.
///
/// # Examples
///
/// ```
/// # use mos::family;
/// # use mos::monzo::Monzo;
/// # use mos::names::Tamnams;
/// # use mos::pattern::StepCounts;
/// let info = family::mos_scale_info(StepCounts::new(5, 2).unwrap(), 2, 1, &Tamnams).unwrap();
///
/// assert_eq!(info.edo, 12);
/// assert_eq!((info.bright_generator, info.dark_generator), (7, 5));
/// assert_eq!(info.bright_generator_monzo, Monzo::new(3, 1));
/// assert_eq!(info.hardness.to_string(), "basic");
/// assert_eq!(info.names.unwrap().name, "diatonic");
/// ```
pub fn mos_scale_info(
    counts: StepCounts,
    size_of_large_step: i64,
    size_of_small_step: i64,
    names: &impl NameTable,
) -> MosResult<MosScaleInfo> {
    let hardness = Hardness::of_steps(size_of_large_step, size_of_small_step)?;

    let primitive = counts.primitive();
    let period_monzo = Monzo::new(primitive.num_large_steps(), primitive.num_small_steps());
    let bright_generator_monzo = monzo::bright_generator_monzo(counts);

    let period = period_monzo.size(size_of_large_step, size_of_small_step);
    let bright_generator = bright_generator_monzo.size(size_of_large_step, size_of_small_step);
    let num_periods = counts.num_periods();

    Ok(MosScaleInfo {
        mos_pattern: counts,
        size_of_large_step,
        size_of_small_step,
        period,
        num_periods,
        edo: period * i64::from(num_periods),
        bright_generator,
        dark_generator: period - bright_generator,
        period_monzo,
        bright_generator_monzo,
        hardness,
        names: names.mos_names(counts),
    })
}

/// The parent pattern obtained by removing the chroma, e.g. `2L 3s` for `5L 2s`.
///
/// # Examples
///
/// ```
/// # use mos::family;
/// # use mos::names::Tamnams;
/// # use mos::pattern::StepCounts;
/// let parent = family::parent_mos(StepCounts::new(5, 2).unwrap(), &Tamnams);
/// assert_eq!(parent.mos_pattern.to_string(), "2L 3s");
/// assert_eq!(parent.size, 5);
/// assert_eq!(parent.names.unwrap().name, "pentic");
/// ```
pub fn parent_mos(counts: StepCounts, names: &impl NameTable) -> MosInfo {
    MosInfo::new(counts.parent(), names)
}

/// The daughter pattern obtained by splitting the large step of the given scale into a large and a small step.
///
/// If the large step is at least twice the small step, the chroma becomes the new large step. Otherwise, the old small step becomes the new large step.
///
/// # Examples
///
/// ```
/// # use mos::family;
/// # use mos::names::Tamnams;
/// # use mos::pattern::StepCounts;
/// let diatonic = StepCounts::new(5, 2).unwrap();
///
/// let chromatic = family::daughter_mos(diatonic, 3, 2, &Tamnams).unwrap();
/// assert_eq!(chromatic.mos_pattern.to_string(), "7L 5s");
/// assert_eq!((chromatic.size_of_large_step, chromatic.size_of_small_step), (2, 1));
/// assert_eq!(chromatic.names.unwrap().name, "m-chromatic");
/// ```
pub fn daughter_mos(
    counts: StepCounts,
    size_of_large_step: i64,
    size_of_small_step: i64,
    names: &impl NameTable,
) -> MosResult<MosScaleInfo> {
    let num_large_steps = counts.num_large_steps();
    let size = counts.size();

    let (daughter, size_of_large_step, size_of_small_step) =
        if size_of_large_step >= 2 * size_of_small_step {
            (
                StepCounts::new(num_large_steps, size)?,
                size_of_large_step - size_of_small_step,
                size_of_small_step,
            )
        } else {
            (
                StepCounts::new(size, num_large_steps)?,
                size_of_small_step,
                size_of_large_step - size_of_small_step,
            )
        };

    mos_scale_info(daughter, size_of_large_step, size_of_small_step, names)
}

/// A range of generators, measured in fractions of the equave, that span the same MOS pattern.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct RangeInfo {
    pub period: Fraction,
    pub lower_bound: Fraction,
    pub upper_bound: Fraction,
    pub num_large_steps: u32,
    pub num_small_steps: u32,
    /// The generators are bright inside of this range.
    pub bright: bool,
}

/// Finds the generator ranges of all patterns of the given size.
///
/// The bounds of each range are the collapsed (`s = 0`) and the equalized (`L = s`) generator. Every bright range is accompanied by its dark mirror image within the period.
/// The result is grouped by period and otherwise sorted by the lower bound.
///
/// # Examples
///
/// ```
/// # use mos::family;
/// # use mos::fraction::Fraction;
/// let ranges = family::generator_ranges(7, false);
///
/// let diatonic = ranges
///     .iter()
///     .find(|range| (range.num_large_steps, range.num_small_steps) == (5, 2) && range.bright)
///     .unwrap();
/// assert_eq!(diatonic.lower_bound, Fraction::new(4, 7));
/// assert_eq!(diatonic.upper_bound, Fraction::new(3, 5));
/// ```
pub fn generator_ranges(size: u32, include_multi_periods: bool) -> Vec<RangeInfo> {
    let mut result = Vec::new();

    for num_large_steps in 1..size {
        let num_small_steps = size - num_large_steps;
        let Ok(counts) = StepCounts::new(num_large_steps, num_small_steps) else {
            continue;
        };

        let num_periods = counts.num_periods();
        if !include_multi_periods && num_periods != 1 {
            continue;
        }

        let period = Fraction::new(1, i128::from(num_periods));
        let monzo = monzo::bright_generator_monzo(counts);

        let collapsed = Fraction::new(
            i128::from(monzo.num_large_steps),
            i128::from(num_large_steps),
        );
        let equalized = Fraction::new(
            i128::from(monzo.num_large_steps + monzo.num_small_steps),
            i128::from(size),
        );
        let (lower_bound, upper_bound) = if collapsed > equalized {
            (equalized, collapsed)
        } else {
            (collapsed, equalized)
        };

        result.push(RangeInfo {
            period,
            lower_bound,
            upper_bound,
            num_large_steps,
            num_small_steps,
            bright: true,
        });
        result.push(RangeInfo {
            period,
            lower_bound: period - upper_bound,
            upper_bound: period - lower_bound,
            num_large_steps,
            num_small_steps,
            bright: false,
        });
    }

    result.sort_by(|a, b| {
        a.period
            .cmp(&b.period)
            .then_with(|| a.lower_bound.cmp(&b.lower_bound))
    });

    result
}
