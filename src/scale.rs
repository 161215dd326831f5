//! Scales of MOS patterns as subsets of an EDO.
//!
//! All degrees are measured in EDO steps. The root (degree 0) is omitted while the top degree, the size of the EDO, is included.

use std::collections::{btree_map::Entry, BTreeMap};

use serde::{Deserialize, Serialize};

use crate::{
    error::{MosError, MosResult},
    monzo,
    pattern::StepCounts,
};

/// The side on which chromatic degrees are added to a daughter scale or on which a parent scale is aligned.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Accidentals {
    #[default]
    Sharp,
    Flat,
    Both,
}

/// The role of a degree in a scale extended by its daughter pattern.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DaughterDegree {
    /// The degree belongs to the original scale.
    Parent,
    Sharp,
    Flat,
    /// The degree is reachable as a sharp and as a flat.
    Both,
}

/// Options for building a scale.
///
/// The brightness of the scale is selected with either `down` or `up`. Without any of them, the scale is the brightest mode.
#[derive(Clone, Debug, PartialEq)]
pub struct ScaleOptions {
    /// The number of bright generators going down from the root.
    pub down: Option<u32>,
    /// The number of bright generators going up from the root.
    pub up: Option<u32>,
    pub size_of_large_step: i64,
    pub size_of_small_step: i64,
    pub accidentals: Accidentals,
}

impl Default for ScaleOptions {
    fn default() -> Self {
        Self {
            down: None,
            up: None,
            size_of_large_step: 2,
            size_of_small_step: 1,
            accidentals: Accidentals::Sharp,
        }
    }
}

impl ScaleOptions {
    pub fn with_down(mut self, down: u32) -> Self {
        self.down = Some(down);
        self
    }

    pub fn with_up(mut self, up: u32) -> Self {
        self.up = Some(up);
        self
    }

    pub fn with_step_sizes(mut self, size_of_large_step: i64, size_of_small_step: i64) -> Self {
        self.size_of_large_step = size_of_large_step;
        self.size_of_small_step = size_of_small_step;
        self
    }

    pub fn with_accidentals(mut self, accidentals: Accidentals) -> Self {
        self.accidentals = accidentals;
        self
    }

    /// Resolves the number of bright generators going down from the root.
    ///
    /// `up` and `down` always add up to `size - num_periods`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use mos::pattern::StepCounts;
    /// # use mos::scale::ScaleOptions;
    /// # use mos::MosError;
    /// let diatonic = StepCounts::new(5, 2).unwrap();
    /// assert_eq!(ScaleOptions::default().generators_down(diatonic), Ok(0));
    /// assert_eq!(ScaleOptions::default().with_up(1).generators_down(diatonic), Ok(5));
    /// assert_eq!(
    ///     ScaleOptions::default().with_up(1).with_down(2).generators_down(diatonic),
    ///     Err(MosError::IncompatibleParameters {
    ///         up: 1,
    ///         down: 2,
    ///         expected_down: 5
    ///     })
    /// );
    /// ```
    pub fn generators_down(&self, counts: StepCounts) -> MosResult<u32> {
        let size = counts.size();
        let num_periods = counts.num_periods();

        let down = match (self.up, self.down) {
            (Some(up), down) => {
                let expected_down = i64::from(size) - i64::from(num_periods) - i64::from(up);
                match down {
                    Some(down) if i64::from(down) != expected_down => {
                        return Err(MosError::IncompatibleParameters {
                            up,
                            down,
                            expected_down,
                        })
                    }
                    _ => expected_down,
                }
            }
            (None, Some(down)) => i64::from(down),
            (None, None) => 0,
        };

        let invalid_range = MosError::InvalidRange {
            down,
            size,
            num_periods,
        };
        if down < 0 || down >= i64::from(size) || down % i64::from(num_periods) != 0 {
            return Err(invalid_range);
        }

        u32::try_from(down).map_err(|_| invalid_range)
    }

    /// The number of bright generators going up from the root.
    pub fn generators_up(&self, counts: StepCounts) -> MosResult<u32> {
        let down = self.generators_down(counts)?;
        Ok(counts.size() - counts.num_periods() - down)
    }
}

/// The primitive period of a scale together with its generator, both measured in EDO steps.
struct Layout {
    num_periods: i64,
    period: i64,
    down: i64,
    period_size: i64,
    generator_size: i64,
    num_large_steps: i64,
    num_small_steps: i64,
}

impl Layout {
    fn new(counts: StepCounts, options: &ScaleOptions) -> MosResult<Self> {
        let down = options.generators_down(counts)?;

        let num_periods = counts.num_periods();
        let primitive = counts.primitive();
        let num_large_steps = i64::from(primitive.num_large_steps());
        let num_small_steps = i64::from(primitive.num_small_steps());

        if options.size_of_large_step <= 0 || options.size_of_small_step <= 0 {
            return Err(MosError::InvalidInput {
                large: options.size_of_large_step,
                small: options.size_of_small_step,
            });
        }
        let period_size = num_large_steps * options.size_of_large_step
            + num_small_steps * options.size_of_small_step;

        let generator_size = monzo::bright_generator_monzo(counts)
            .size(options.size_of_large_step, options.size_of_small_step);

        Ok(Self {
            num_periods: i64::from(num_periods),
            period: i64::from(counts.period()),
            down: i64::from(down / num_periods),
            period_size,
            generator_size,
            num_large_steps,
            num_small_steps,
        })
    }

    /// The EDO degree reached by stacking `index - down` generators, reduced into the first period.
    fn degree(&self, index: i64) -> i64 {
        ((index - self.down) * self.generator_size).rem_euclid(self.period_size)
    }

    fn equave_size(&self) -> i64 {
        self.num_periods * self.period_size
    }

    /// Copies the degrees of the first period to all periods and moves the root to the top.
    fn replicate<T: Copy>(&self, base: &BTreeMap<i64, T>) -> BTreeMap<i64, T> {
        let mut result: BTreeMap<_, _> = (0..self.num_periods)
            .flat_map(|index| {
                base.iter()
                    .map(move |(&degree, &value)| (degree + index * self.period_size, value))
            })
            .collect();

        if let Some(root) = result.remove(&0) {
            result.insert(self.equave_size(), root);
        }

        result
    }
}

/// Builds the scale of the given pattern as a subset of an EDO.
///
/// # Examples
///
/// ```
/// # use mos::pattern::StepCounts;
/// # use mos::scale::{self, ScaleOptions};
/// let lydian = scale::build_scale(StepCounts::new(5, 2).unwrap(), &ScaleOptions::default());
/// assert_eq!(lydian.unwrap(), [2, 4, 6, 7, 9, 11, 12]);
///
/// let options = ScaleOptions::default().with_down(5);
/// let phrygian = scale::build_scale(StepCounts::new(5, 2).unwrap(), &options);
/// assert_eq!(phrygian.unwrap(), [1, 3, 5, 7, 8, 10, 12]);
///
/// let options = ScaleOptions::default().with_step_sizes(3, 2);
/// let pentic = scale::build_scale(StepCounts::new(2, 3).unwrap(), &options);
/// assert_eq!(pentic.unwrap(), [3, 5, 8, 10, 12]);
/// ```
pub fn build_scale(counts: StepCounts, options: &ScaleOptions) -> MosResult<Vec<i64>> {
    let layout = Layout::new(counts, options)?;

    let mut base: Vec<_> = (0..layout.period).map(|index| layout.degree(index)).collect();
    base.sort_unstable();

    let mut degrees: Vec<_> = (0..layout.num_periods)
        .flat_map(|index| {
            base.iter()
                .map(move |degree| degree + index * layout.period_size)
        })
        .skip(1)
        .collect();
    degrees.push(layout.equave_size());

    Ok(degrees)
}

/// Builds the scale and marks the degrees belonging to its parent pattern.
///
/// With [`Accidentals::Flat`], the parent is aligned to the darkest end of the generator chain. Any other setting aligns it to the brightest end.
///
/// # Examples
///
/// ```
/// # use mos::pattern::StepCounts;
/// # use mos::scale::{self, ScaleOptions};
/// let diatonic = StepCounts::new(5, 2).unwrap();
/// let scale = scale::build_scale_with_parent(diatonic, &ScaleOptions::default()).unwrap();
///
/// let pentic: Vec<_> = scale
///     .iter()
///     .filter(|(_, &is_parent)| is_parent)
///     .map(|(&degree, _)| degree)
///     .collect();
/// assert_eq!(pentic, [2, 4, 7, 9, 12]);
/// ```
pub fn build_scale_with_parent(
    counts: StepCounts,
    options: &ScaleOptions,
) -> MosResult<BTreeMap<i64, bool>> {
    let layout = Layout::new(counts, options)?;
    let parent_period = layout.num_large_steps.max(layout.num_small_steps);

    let base: BTreeMap<_, _> = (0..layout.period)
        .map(|index| {
            let is_parent = match options.accidentals {
                Accidentals::Flat => layout.period - index <= parent_period,
                Accidentals::Sharp | Accidentals::Both => index < parent_period,
            };
            (layout.degree(index), is_parent)
        })
        .collect();

    Ok(layout.replicate(&base))
}

/// Builds the scale of the daughter pattern with the original scale as its parent.
///
/// The chromatic degrees are added on the sharp side, the flat side or both. If the large step is exactly twice the small step, sharps and flats coincide s.t. the chromatic degrees are reported as [`DaughterDegree::Both`] regardless of the accidentals.
///
/// # Examples
///
/// ```
/// # use mos::pattern::StepCounts;
/// # use mos::scale::{self, Accidentals, DaughterDegree, ScaleOptions};
/// let options = ScaleOptions::default()
///     .with_step_sizes(3, 2)
///     .with_accidentals(Accidentals::Flat);
/// let scale = scale::build_scale_with_daughter(StepCounts::new(5, 2).unwrap(), &options).unwrap();
///
/// assert_eq!(scale.len(), 12);
/// assert_eq!(scale[&2], DaughterDegree::Flat);
/// assert_eq!(scale[&3], DaughterDegree::Parent);
/// ```
pub fn build_scale_with_daughter(
    counts: StepCounts,
    options: &ScaleOptions,
) -> MosResult<BTreeMap<i64, DaughterDegree>> {
    let layout = Layout::new(counts, options)?;
    let daughter_period = 2 * layout.num_large_steps + layout.num_small_steps;
    let collapsed = options.size_of_large_step == 2 * options.size_of_small_step;

    let mut base: BTreeMap<_, _> = (0..layout.period)
        .map(|index| (layout.degree(index), DaughterDegree::Parent))
        .collect();

    let add_flats = match options.accidentals {
        Accidentals::Flat => true,
        Accidentals::Both => !collapsed,
        Accidentals::Sharp => false,
    };
    if add_flats {
        for index in layout.period - daughter_period..0 {
            base.entry(layout.degree(index)).or_insert(match collapsed {
                true => DaughterDegree::Both,
                false => DaughterDegree::Flat,
            });
        }
    }

    if options.accidentals != Accidentals::Flat {
        for index in layout.period..daughter_period {
            match base.entry(layout.degree(index)) {
                Entry::Vacant(entry) => {
                    entry.insert(match collapsed {
                        true => DaughterDegree::Both,
                        false => DaughterDegree::Sharp,
                    });
                }
                Entry::Occupied(mut entry) => {
                    if *entry.get() == DaughterDegree::Flat {
                        entry.insert(DaughterDegree::Both);
                    }
                }
            }
        }
    }

    Ok(layout.replicate(&base))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn counts(num_large_steps: u32, num_small_steps: u32) -> StepCounts {
        StepCounts::new(num_large_steps, num_small_steps).unwrap()
    }

    #[test]
    fn default_brightness() {
        let options = ScaleOptions::default();
        assert_eq!(build_scale(counts(2, 3), &options), Ok(vec![2, 3, 5, 6, 7]));
        assert_eq!(
            build_scale(counts(5, 2), &options),
            Ok(vec![2, 4, 6, 7, 9, 11, 12])
        );
    }

    #[test]
    fn brightness_shifts_degrees_upwards() {
        let scales: Vec<_> = [0, 2, 4]
            .into_iter()
            .map(|up| build_scale(counts(2, 4), &ScaleOptions::default().with_up(up)).unwrap())
            .collect();

        assert_eq!(
            scales,
            [
                vec![1, 2, 4, 5, 6, 8],
                vec![1, 3, 4, 5, 7, 8],
                vec![2, 3, 4, 6, 7, 8]
            ]
        );
        for pair in scales.windows(2) {
            assert!(pair[0].iter().zip(&pair[1]).all(|(a, b)| a <= b));
        }
    }

    #[test]
    fn invalid_brightness() {
        assert_eq!(
            build_scale(counts(2, 4), &ScaleOptions::default().with_up(6)),
            Err(MosError::InvalidRange {
                down: -2,
                size: 6,
                num_periods: 2
            })
        );
        assert_eq!(
            build_scale(counts(2, 4), &ScaleOptions::default().with_down(1)),
            Err(MosError::InvalidRange {
                down: 1,
                size: 6,
                num_periods: 2
            })
        );
        assert_eq!(
            build_scale(counts(5, 2), &ScaleOptions::default().with_down(7)),
            Err(MosError::InvalidRange {
                down: 7,
                size: 7,
                num_periods: 1
            })
        );
        assert_eq!(
            build_scale(counts(5, 2), &ScaleOptions::default().with_up(0).with_down(2)),
            Err(MosError::IncompatibleParameters {
                up: 0,
                down: 2,
                expected_down: 6
            })
        );
        assert_eq!(
            build_scale(counts(5, 2), &ScaleOptions::default().with_up(0).with_down(6)),
            Ok(vec![1, 3, 5, 6, 8, 10, 12])
        );
    }

    #[test]
    fn up_and_down_are_complementary() {
        let options = ScaleOptions::default().with_down(4);
        assert_eq!(options.generators_up(counts(4, 2)), Ok(0));
        assert_eq!(options.generators_up(counts(5, 2)), Ok(2));
    }

    #[test]
    fn empty_periods_are_rejected() {
        let options = ScaleOptions::default().with_step_sizes(0, 0);
        assert_eq!(
            build_scale(counts(5, 2), &options),
            Err(MosError::InvalidInput { large: 0, small: 0 })
        );
    }

    #[test]
    fn non_positive_step_sizes_are_rejected() {
        for (large, small) in [(1, 0), (2, -1), (0, 1), (-1, -1)] {
            let options = ScaleOptions::default().with_step_sizes(large, small);
            let error = MosError::InvalidInput { large, small };

            assert_eq!(build_scale(counts(5, 2), &options), Err(error.clone()));
            assert_eq!(
                build_scale_with_parent(counts(5, 2), &options),
                Err(error.clone())
            );
            assert_eq!(
                build_scale_with_daughter(counts(5, 2), &options),
                Err(error)
            );
        }
    }

    #[test]
    fn parent_overlay() {
        let options = ScaleOptions::default().with_step_sizes(3, 1);
        let scale = build_scale_with_parent(counts(4, 2), &options).unwrap();
        assert_eq!(
            scale,
            BTreeMap::from([
                (3, true),
                (6, false),
                (7, true),
                (10, true),
                (13, false),
                (14, true)
            ])
        );

        let options = options.with_accidentals(Accidentals::Flat);
        let scale = build_scale_with_parent(counts(4, 2), &options).unwrap();
        assert_eq!(
            scale,
            BTreeMap::from([
                (3, true),
                (6, true),
                (7, false),
                (10, true),
                (13, true),
                (14, false)
            ])
        );
    }

    #[test]
    fn overlays_agree_with_plain_scales() {
        for (l, s) in [(5, 2), (2, 5), (4, 2), (3, 3), (5, 3), (7, 5), (1, 4)] {
            for down in 0..l + s {
                let options = ScaleOptions::default().with_step_sizes(3, 1).with_down(down);
                let Ok(scale) = build_scale(counts(l, s), &options) else {
                    continue;
                };

                let parent = build_scale_with_parent(counts(l, s), &options).unwrap();
                assert_eq!(parent.keys().copied().collect::<Vec<_>>(), scale);

                let daughter = build_scale_with_daughter(counts(l, s), &options).unwrap();
                let parent_degrees: Vec<_> = daughter
                    .iter()
                    .filter(|(_, &degree)| degree == DaughterDegree::Parent)
                    .map(|(&degree, _)| degree)
                    .collect();
                assert_eq!(parent_degrees, scale, "{l}L {s}s, down = {down}");
            }
        }
    }

    #[test]
    fn collapsed_daughter_overlay() {
        let options = ScaleOptions::default()
            .with_down(1)
            .with_accidentals(Accidentals::Both);
        let scale = build_scale_with_daughter(counts(5, 2), &options).unwrap();

        assert_eq!(scale.len(), 12);
        let both: Vec<_> = scale
            .iter()
            .filter(|(_, &degree)| degree == DaughterDegree::Both)
            .map(|(&degree, _)| degree)
            .collect();
        assert_eq!(both, [1, 3, 6, 8, 10]);

        let sharps = build_scale_with_daughter(counts(5, 2), &ScaleOptions::default()).unwrap();
        assert_eq!(
            sharps
                .values()
                .filter(|&&degree| degree == DaughterDegree::Both)
                .count(),
            5
        );
    }

    #[test]
    fn collapsed_accidentals_agree() {
        let scale_with = |accidentals| {
            let options = ScaleOptions::default()
                .with_down(1)
                .with_accidentals(accidentals);
            build_scale_with_daughter(counts(5, 2), &options).unwrap()
        };

        let flats = scale_with(Accidentals::Flat);
        assert_eq!(flats, scale_with(Accidentals::Sharp));
        assert_eq!(flats, scale_with(Accidentals::Both));
        assert_eq!(flats[&1], DaughterDegree::Both);
    }

    #[test]
    fn soft_daughter_overlay() {
        let options = ScaleOptions::default()
            .with_down(1)
            .with_step_sizes(3, 2)
            .with_accidentals(Accidentals::Both);
        let scale = build_scale_with_daughter(counts(5, 2), &options).unwrap();

        assert_eq!(scale.len(), 17);
        assert_eq!(scale[&1], DaughterDegree::Sharp);
        assert_eq!(scale[&2], DaughterDegree::Flat);
        assert_eq!(scale[&3], DaughterDegree::Parent);
        assert_eq!(scale[&19], DaughterDegree::Parent);
        assert!(!scale.contains_key(&7));

        let count = |role| scale.values().filter(|&&degree| degree == role).count();
        assert_eq!(count(DaughterDegree::Parent), 7);
        assert_eq!(count(DaughterDegree::Sharp), 5);
        assert_eq!(count(DaughterDegree::Flat), 5);
    }
}
