//! Named classes of the step ratio `L:s`.

use std::{
    fmt::{self, Display},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::error::{MosError, MosResult};

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum HardnessClass {
    Stationary,
    Equalized,
    Supersoft,
    Soft,
    Semisoft,
    Basic,
    Semihard,
    Hard,
    Superhard,
    Collapsed,
    Ultrasoft,
    Parasoft,
    Quasisoft,
    Minisoft,
    Minihard,
    Quasihard,
    Parahard,
    Ultrahard,
}

/// Classes matching an exact `L:s` ratio.
const HARDNESS_RATIOS: [(HardnessClass, f64, f64); 9] = [
    (HardnessClass::Equalized, 1.0, 1.0),
    (HardnessClass::Supersoft, 4.0, 3.0),
    (HardnessClass::Soft, 3.0, 2.0),
    (HardnessClass::Semisoft, 5.0, 3.0),
    (HardnessClass::Basic, 2.0, 1.0),
    (HardnessClass::Semihard, 5.0, 2.0),
    (HardnessClass::Hard, 3.0, 1.0),
    (HardnessClass::Superhard, 4.0, 1.0),
    (HardnessClass::Collapsed, 1.0, 0.0),
];

/// Classes covering the open interval `(low/6, high/6)` of `L/s`.
const HARDNESS_RANGES: [(HardnessClass, f64, f64); 8] = [
    (HardnessClass::Ultrasoft, 6.0, 8.0),
    (HardnessClass::Parasoft, 8.0, 9.0),
    (HardnessClass::Quasisoft, 9.0, 10.0),
    (HardnessClass::Minisoft, 10.0, 12.0),
    (HardnessClass::Minihard, 12.0, 15.0),
    (HardnessClass::Quasihard, 15.0, 18.0),
    (HardnessClass::Parahard, 18.0, 24.0),
    (HardnessClass::Ultrahard, 24.0, f64::INFINITY),
];

const ALL_CLASSES: [HardnessClass; 18] = [
    HardnessClass::Stationary,
    HardnessClass::Equalized,
    HardnessClass::Supersoft,
    HardnessClass::Soft,
    HardnessClass::Semisoft,
    HardnessClass::Basic,
    HardnessClass::Semihard,
    HardnessClass::Hard,
    HardnessClass::Superhard,
    HardnessClass::Collapsed,
    HardnessClass::Ultrasoft,
    HardnessClass::Parasoft,
    HardnessClass::Quasisoft,
    HardnessClass::Minisoft,
    HardnessClass::Minihard,
    HardnessClass::Quasihard,
    HardnessClass::Parahard,
    HardnessClass::Ultrahard,
];

impl HardnessClass {
    pub fn name(self) -> &'static str {
        match self {
            HardnessClass::Stationary => "stationary",
            HardnessClass::Equalized => "equalized",
            HardnessClass::Supersoft => "supersoft",
            HardnessClass::Soft => "soft",
            HardnessClass::Semisoft => "semisoft",
            HardnessClass::Basic => "basic",
            HardnessClass::Semihard => "semihard",
            HardnessClass::Hard => "hard",
            HardnessClass::Superhard => "superhard",
            HardnessClass::Collapsed => "collapsed",
            HardnessClass::Ultrasoft => "ultrasoft",
            HardnessClass::Parasoft => "parasoft",
            HardnessClass::Quasisoft => "quasisoft",
            HardnessClass::Minisoft => "minisoft",
            HardnessClass::Minihard => "minihard",
            HardnessClass::Quasihard => "quasihard",
            HardnessClass::Parahard => "parahard",
            HardnessClass::Ultrahard => "ultrahard",
        }
    }
}

impl Display for HardnessClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The hardness of a step ratio including the `anti-` (`|s| > |L|`) and `trans-` (`L` and `s` of opposite sign) modifiers.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(into = "String", try_from = "String")]
pub struct Hardness {
    pub class: HardnessClass,
    pub anti: bool,
    pub trans: bool,
}

impl Hardness {
    /// Classifies the step ratio `size_of_large_step : size_of_small_step`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use mos::hardness::{Hardness, HardnessClass};
    /// let basic = Hardness::classify(2.0, 1.0).unwrap();
    /// assert_eq!(basic.class, HardnessClass::Basic);
    /// assert_eq!(basic.to_string(), "basic");
    ///
    /// assert_eq!(Hardness::classify(13.0, 8.0).unwrap().to_string(), "quasisoft");
    /// assert_eq!(Hardness::classify(-1.0, 2.0).unwrap().to_string(), "trans-anti-basic");
    /// assert_eq!(Hardness::classify(0.0, 0.0).unwrap().to_string(), "stationary");
    /// assert!(Hardness::classify(f64::NAN, 1.0).is_err());
    /// ```
    pub fn classify(size_of_large_step: f64, size_of_small_step: f64) -> MosResult<Self> {
        let mut hardness = Hardness {
            class: HardnessClass::Stationary,
            anti: false,
            trans: false,
        };

        if size_of_large_step == 0.0 && size_of_small_step == 0.0 {
            return Ok(hardness);
        }

        let mut l = size_of_large_step.abs();
        let mut s = size_of_small_step.abs();
        if s > l {
            hardness.anti = true;
            (l, s) = (s, l);
        }
        hardness.trans = size_of_large_step * size_of_small_step < 0.0;

        if let Some((class, _, _)) = HARDNESS_RATIOS
            .iter()
            .find(|(_, large, small)| l * small == large * s)
        {
            hardness.class = *class;
            return Ok(hardness);
        }

        if let Some((class, _, _)) = HARDNESS_RANGES
            .iter()
            .find(|(_, low, high)| low * s < 6.0 * l && 6.0 * l < high * s)
        {
            hardness.class = *class;
            return Ok(hardness);
        }

        Err(MosError::UnableToClassify {
            large: size_of_large_step,
            small: size_of_small_step,
        })
    }

    /// Like [`Hardness::classify`] for integer step sizes.
    pub fn of_steps(size_of_large_step: i64, size_of_small_step: i64) -> MosResult<Self> {
        Self::classify(size_of_large_step as f64, size_of_small_step as f64)
    }
}

impl Display for Hardness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.trans {
            write!(f, "trans-")?;
        }
        if self.anti {
            write!(f, "anti-")?;
        }
        write!(f, "{}", self.class)
    }
}

impl FromStr for Hardness {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (trans, rest) = match s.strip_prefix("trans-") {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let (anti, rest) = match rest.strip_prefix("anti-") {
            Some(rest) => (true, rest),
            None => (false, rest),
        };
        let class = ALL_CLASSES
            .into_iter()
            .find(|class| class.name() == rest)
            .ok_or_else(|| format!("Unknown hardness: {s:?}"))?;

        Ok(Hardness { class, anti, trans })
    }
}

impl From<Hardness> for String {
    fn from(hardness: Hardness) -> Self {
        hardness.to_string()
    }
}

impl TryFrom<String> for Hardness {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
