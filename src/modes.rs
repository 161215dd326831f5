//! Modes of MOS patterns labeled in UDP notation.

use std::{
    fmt::{self, Display},
    iter,
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::{
    error::MosResult,
    names::NameTable,
    pattern::StepCounts,
    scale::{self, ScaleOptions},
    word::{Step, Word},
};

/// The brightness of a mode in `U|D(P)` notation.
///
/// `U` and `D` count the bright generators going up and down from the root, `P` is the number of periods and only shown when greater than 1.
///
/// # Examples
///
/// ```
/// # use mos::modes::Udp;
/// let udp = Udp { up: 4, down: 0, num_periods: 2 };
/// assert_eq!(udp.to_string(), "4|0(2)");
/// assert_eq!("4|0(2)".parse(), Ok(udp));
///
/// let mixolydian: Udp = "4|2".parse().unwrap();
/// assert_eq!(mixolydian.num_periods, 1);
/// ```
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(into = "String", try_from = "String")]
pub struct Udp {
    pub up: u32,
    pub down: u32,
    pub num_periods: u32,
}

impl Display for Udp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}", self.up, self.down)?;
        if self.num_periods > 1 {
            write!(f, "({})", self.num_periods)?;
        }
        Ok(())
    }
}

impl FromStr for Udp {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid_udp = || format!("Invalid UDP notation: {s:?}");

        let (up, rest) = s.split_once('|').ok_or_else(invalid_udp)?;
        let (down, num_periods) = match rest.strip_suffix(')') {
            Some(rest) => rest.split_once('(').ok_or_else(invalid_udp)?,
            None => (rest, "1"),
        };

        Ok(Udp {
            up: up.trim().parse().map_err(|_| invalid_udp())?,
            down: down.trim().parse().map_err(|_| invalid_udp())?,
            num_periods: num_periods.trim().parse().map_err(|_| invalid_udp())?,
        })
    }
}

impl From<Udp> for String {
    fn from(udp: Udp) -> Self {
        udp.to_string()
    }
}

impl TryFrom<String> for Udp {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Information about a single mode of a MOS pattern.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ModeInfo {
    /// Number of steps in a period.
    pub period: u32,
    pub num_periods: u32,
    pub udp: Udp,
    /// The mode in step pattern format, e.g. `LLsLLLs`.
    pub mode: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode_name: Option<String>,
}

/// Describes the mode selected by the `up` or `down` setting of `options`.
///
/// The step sizes of `options` are ignored. The step pattern is always derived from the basic tuning `L = 2`, `s = 1`.
///
/// # Examples
///
/// ```
/// # use mos::modes;
/// # use mos::names::Tamnams;
/// # use mos::pattern::StepCounts;
/// # use mos::scale::ScaleOptions;
/// let diatonic = StepCounts::new(5, 2).unwrap();
/// let options = ScaleOptions::default().with_down(5);
///
/// let phrygian = modes::mode_info(diatonic, &options, false, &Tamnams).unwrap();
/// assert_eq!(phrygian.mode, "sLLLsLL");
/// assert_eq!(phrygian.udp.to_string(), "1|5");
/// assert_eq!(phrygian.mode_name.as_deref(), Some("Phrygian"));
/// ```
pub fn mode_info(
    counts: StepCounts,
    options: &ScaleOptions,
    extra_names: bool,
    names: &impl NameTable,
) -> MosResult<ModeInfo> {
    let down = options.generators_down(counts)?;
    let num_periods = counts.num_periods();
    let period = counts.period();

    let basic_options = ScaleOptions::default().with_down(down);
    let degrees = scale::build_scale(counts, &basic_options)?;

    let mode = step_pattern(&degrees).to_string();
    let mode_name = names.mode_name(&mode, extra_names);

    Ok(ModeInfo {
        period,
        num_periods,
        udp: Udp {
            up: (period - 1) * num_periods - down,
            down,
            num_periods,
        },
        mode,
        mode_name,
    })
}

/// Lists all modes of the pattern in ascending order of the number of generators going up, i.e. from the darkest to the brightest mode.
///
/// # Examples
///
/// ```
/// # use mos::modes;
/// # use mos::names::Tamnams;
/// # use mos::pattern::StepCounts;
/// let diatonic = StepCounts::new(5, 2).unwrap();
/// let modes = modes::mos_modes(diatonic, true, &Tamnams).unwrap();
///
/// let names: Vec<_> = modes.iter().filter_map(|mode| mode.mode_name.as_deref()).collect();
/// assert_eq!(
///     names,
///     [
///         "Locrian",
///         "Phrygian",
///         "Aeolian (Minor)",
///         "Dorian",
///         "Mixolydian",
///         "Ionian (Major)",
///         "Lydian"
///     ]
/// );
/// ```
pub fn mos_modes(
    counts: StepCounts,
    extra_names: bool,
    names: &impl NameTable,
) -> MosResult<Vec<ModeInfo>> {
    let num_periods = counts.num_periods();

    (0..counts.period())
        .rev()
        .map(|generators_down| {
            let options = ScaleOptions::default().with_down(generators_down * num_periods);
            mode_info(counts, &options, extra_names, names)
        })
        .collect()
}

/// Steps between consecutive degrees of a basic scale with the root omitted.
fn step_pattern(degrees: &[i64]) -> Word {
    iter::once(&0)
        .chain(degrees)
        .collect::<Vec<_>>()
        .windows(2)
        .map(|pair| match pair[1] - pair[0] {
            2 => Step::Large,
            _ => Step::Small,
        })
        .collect()
}
