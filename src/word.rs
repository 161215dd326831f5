//! Brightest modes of MOS patterns as words over the alphabet `{L, s}`.
//!
//! Two independent constructions are provided: a string variant of the subtractive Euclidean algorithm and a Bresenham line walk.
//! Both yield the lexicographically least rotation when `L` sorts before `s`.

use std::{
    fmt::{self, Display},
    iter,
    str::FromStr,
};

use crate::{error::MosError, math, pattern::StepCounts};

/// A single step of a MOS word. `Large` sorts before `Small`.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Step {
    Large,
    Small,
}

impl Step {
    pub fn symbol(self) -> char {
        match self {
            Step::Large => 'L',
            Step::Small => 's',
        }
    }
}

/// A sequence of [`Step`]s, e.g. `LLsLLLs`.
#[derive(Clone, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Word {
    steps: Vec<Step>,
}

impl Word {
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn num_large_steps(&self) -> usize {
        self.count(Step::Large)
    }

    pub fn num_small_steps(&self) -> usize {
        self.count(Step::Small)
    }

    fn count(&self, step: Step) -> usize {
        self.steps.iter().filter(|&&s| s == step).count()
    }

    /// The cumulative `(num_large_steps, num_small_steps)` trace of the word, starting at `(0, 0)`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use mos::word::Word;
    /// let word: Word = "LLs".parse().unwrap();
    /// assert_eq!(word.trace(), [(0, 0), (1, 0), (2, 0), (2, 1)]);
    /// ```
    pub fn trace(&self) -> Vec<(u32, u32)> {
        let mut position = (0, 0);
        iter::once(position)
            .chain(self.steps.iter().map(|step| {
                match step {
                    Step::Large => position.0 += 1,
                    Step::Small => position.1 += 1,
                }
                position
            }))
            .collect()
    }

    /// Rotates the word to the left s.t. the step at `index` becomes the first step.
    pub fn rotated(&self, index: usize) -> Word {
        let mut steps = self.steps.clone();
        if !steps.is_empty() {
            steps.rotate_left(index % self.steps.len());
        }
        Word { steps }
    }

    /// Checks whether `other` is a cyclic rotation of `self`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use mos::word::Word;
    /// let word: Word = "LssLss".parse().unwrap();
    /// assert!(word.is_rotation_of(&"sLssLs".parse().unwrap()));
    /// assert!(!word.is_rotation_of(&"LLssss".parse().unwrap()));
    /// ```
    pub fn is_rotation_of(&self, other: &Word) -> bool {
        self.len() == other.len()
            && (self.is_empty() || (0..self.len()).any(|index| &self.rotated(index) == other))
    }

    fn repeated(&self, times: usize) -> Word {
        Word {
            steps: self.steps.repeat(times),
        }
    }

    fn concat(&self, other: &Word) -> Word {
        Word {
            steps: self.steps.iter().chain(&other.steps).copied().collect(),
        }
    }
}

impl FromIterator<Step> for Word {
    fn from_iter<T: IntoIterator<Item = Step>>(iter: T) -> Self {
        Word {
            steps: iter.into_iter().collect(),
        }
    }
}

impl Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for step in &self.steps {
            write!(f, "{}", step.symbol())?;
        }
        Ok(())
    }
}

impl FromStr for Word {
    type Err = MosError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.chars()
            .map(|symbol| match symbol {
                'L' => Ok(Step::Large),
                's' => Ok(Step::Small),
                _ => Err(MosError::InvalidPattern(s.to_owned())),
            })
            .collect()
    }
}

/// The brightest mode of the given pattern.
///
/// # Examples
///
/// ```
/// # use mos::pattern::StepCounts;
/// # use mos::word;
/// let diatonic = StepCounts::new(5, 2).unwrap();
/// assert_eq!(word::brightest_word(diatonic).to_string(), "LLLsLLs");
///
/// let pentic = StepCounts::new(3, 2).unwrap();
/// assert_eq!(word::brightest_word(pentic).to_string(), "LLsLs");
///
/// let lemon = StepCounts::new(4, 2).unwrap();
/// assert_eq!(word::brightest_word(lemon).to_string(), "LLsLLs");
/// ```
pub fn brightest_word(counts: StepCounts) -> Word {
    euclid(counts.num_large_steps(), counts.num_small_steps())
}

/// Distributes the steps using a string variant of the subtractive Euclidean algorithm.
pub fn euclid(num_large_steps: u32, num_small_steps: u32) -> Word {
    with_periods(num_large_steps, num_small_steps, |num_large, num_small| {
        let mut first = Word {
            steps: vec![Step::Large],
        };
        let mut second = Word {
            steps: vec![Step::Small],
        };
        let mut count_first = num_large;
        let mut count_second = num_small;

        while count_second != 1 {
            if count_first > count_second {
                let absorbed = first.concat(&second);
                second = first;
                first = absorbed;
                (count_first, count_second) = (count_second, count_first - count_second);
            } else {
                count_second -= count_first;
                first = first.concat(&second);
            }

            if first > second {
                (first, second) = (second, first);
                (count_first, count_second) = (count_second, count_first);
            }
        }

        first.repeated(count_first as usize).concat(&second)
    })
}

/// Distributes the steps by walking along the line from `(0, 0)` to `(L, s)`.
///
/// A small step is emitted whenever doing so does not cross the line.
pub fn bresenham(num_large_steps: u32, num_small_steps: u32) -> Word {
    with_periods(num_large_steps, num_small_steps, |num_large, num_small| {
        let (num_large, num_small) = (u64::from(num_large), u64::from(num_small));
        let (mut x, mut y) = (0, 0);

        iter::from_fn(|| {
            if x == num_large && y == num_small {
                return None;
            }
            if num_large * (y + 1) <= num_small * x {
                y += 1;
                Some(Step::Small)
            } else {
                x += 1;
                Some(Step::Large)
            }
        })
        .collect()
    })
}

fn with_periods(
    num_large_steps: u32,
    num_small_steps: u32,
    primitive_word: impl Fn(u32, u32) -> Word,
) -> Word {
    if num_large_steps == 0 {
        return iter::repeat(Step::Small)
            .take(num_small_steps as usize)
            .collect();
    }
    if num_small_steps == 0 {
        return iter::repeat(Step::Large)
            .take(num_large_steps as usize)
            .collect();
    }

    let num_periods = math::gcd(num_large_steps, num_small_steps);

    primitive_word(num_large_steps / num_periods, num_small_steps / num_periods)
        .repeated(num_periods as usize)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn euclid_and_bresenham_agree() {
        for num_large_steps in 1..20 {
            for num_small_steps in 1..10 {
                assert_eq!(
                    euclid(num_large_steps, num_small_steps),
                    bresenham(num_large_steps, num_small_steps),
                    "{num_large_steps}L {num_small_steps}s"
                );
            }
        }
    }

    #[test]
    fn degenerate_words() {
        assert_eq!(euclid(0, 3).to_string(), "sss");
        assert_eq!(bresenham(0, 3).to_string(), "sss");
        assert_eq!(euclid(4, 0).to_string(), "LLLL");
        assert_eq!(bresenham(4, 0).to_string(), "LLLL");
        assert_eq!(euclid(1, 1).to_string(), "Ls");
        assert!(euclid(0, 0).is_empty());
    }

    #[test]
    fn known_words() {
        assert_eq!(euclid(5, 8).to_string(), "LsLssLsLssLss");
        assert_eq!(
            euclid(3, 2).steps(),
            [Step::Large, Step::Large, Step::Small, Step::Large, Step::Small]
        );

        let antilemon = euclid(2, 4);
        assert_eq!(antilemon.to_string(), "LssLss");
        assert!(antilemon.is_rotation_of(&"sLssLs".parse().unwrap()));
    }

    #[test]
    fn words_are_least_rotations() {
        for num_large_steps in 0..30 {
            for num_small_steps in 0..30 {
                let word = euclid(num_large_steps, num_small_steps);

                assert_eq!(word.num_large_steps(), num_large_steps as usize);
                assert_eq!(word.num_small_steps(), num_small_steps as usize);

                for index in 0..word.len() {
                    assert!(word <= word.rotated(index));
                }
            }
        }
    }

    #[test]
    fn brightest_interval_starts_at_the_root() {
        for num_large_steps in 0..20 {
            for num_small_steps in 0..20 {
                if num_large_steps + num_small_steps == 0 {
                    continue;
                }
                let counts = StepCounts::new(num_large_steps, num_small_steps).unwrap();
                let word = brightest_word(counts);
                let size = word.len();

                // Any L > s > 0 works, e.g. L = 2 and s = 1
                let trace: Vec<_> = word
                    .repeated(2)
                    .trace()
                    .into_iter()
                    .map(|(large, small)| 2 * large + small)
                    .collect();

                for i in 0..size {
                    for j in 0..size {
                        assert!(
                            trace[i] - trace[0] >= trace[i + j] - trace[j],
                            "{counts}: i = {i}, j = {j}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn parse_and_display() {
        let word: Word = "LLsLLLs".parse().unwrap();
        assert_eq!(word.to_string(), "LLsLLLs");
        assert_eq!(word.rotated(2).to_string(), "sLLLsLL");
        assert_eq!(
            "LMs".parse::<Word>(),
            Err(MosError::InvalidPattern("LMs".to_owned()))
        );
    }
}
