//! Human-readable names of MOS patterns and their modes.
//!
//! Naming is optional enrichment: every computation in this crate works with [`Unnamed`] as well.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::pattern::StepCounts;

/// TAMNAMS information about a MOS pattern.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct TamnamsInfo {
    pub name: Cow<'static, str>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<Cow<'static, str>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abbreviation: Option<Cow<'static, str>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family_prefix: Option<Cow<'static, str>>,
    /// The pattern is a subset of a larger MOS pattern.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub subset: bool,
}

impl TamnamsInfo {
    fn derived(name: String) -> Self {
        Self {
            name: name.into(),
            prefix: None,
            abbreviation: None,
            family_prefix: None,
            subset: false,
        }
    }
}

/// A source of pattern and mode names.
///
/// Implementors only provide the raw lookups. Names of patterns missing from the table are derived from their ancestors.
pub trait NameTable {
    /// Raw lookup of a pattern without any derivation.
    fn lookup_mos(&self, counts: StepCounts) -> Option<TamnamsInfo>;

    /// Raw lookup of a mode given in step pattern format, e.g. `LLsLLLs`.
    fn lookup_mode(&self, mode: &str) -> Option<&str>;

    /// Names the pattern, walking up to three ancestors if necessary.
    ///
    /// # Examples
    ///
    /// ```
    /// # use mos::names::{NameTable, Tamnams, Unnamed};
    /// # use mos::pattern::StepCounts;
    /// let smitonic = StepCounts::new(4, 3).unwrap();
    /// assert_eq!(Tamnams.mos_names(smitonic).unwrap().name, "smitonic");
    ///
    /// let wood = StepCounts::new(3, 3).unwrap();
    /// assert_eq!(Tamnams.mos_names(wood).unwrap().name, "3-wood");
    ///
    /// assert_eq!(Unnamed.mos_names(smitonic), None);
    /// ```
    fn mos_names(&self, counts: StepCounts) -> Option<TamnamsInfo> {
        let (l, s) = (counts.num_large_steps(), counts.num_small_steps());
        if l < 1 || s < 1 {
            return None;
        }

        if let Some(mut info) = self.lookup_mos(counts) {
            if info.abbreviation.is_none() {
                info.abbreviation = info.prefix.clone();
            }
            if info.family_prefix.is_none() {
                info.family_prefix = info.prefix.clone();
            }
            return Some(info);
        }

        if l == s {
            return Some(TamnamsInfo::derived(format!("{l}-wood")));
        }

        let brighter = l > s;
        let parent = counts.parent();
        let grandparent = parent.parent();
        let great_grandparent = grandparent.parent();

        if let Some(family_prefix) = self.family_prefix(parent) {
            let suffix = if brighter { "mechromic" } else { "pechromic" };
            return Some(TamnamsInfo::derived(format!("{family_prefix}{suffix}")));
        }

        let parent_brighter = parent.num_large_steps() > parent.num_small_steps();

        if let Some(family_prefix) = self.family_prefix(grandparent) {
            let suffix = match (parent_brighter, brighter) {
                (true, true) => "fenharmic",
                (true, false) => "menharmic",
                (false, true) => "penharmic",
                (false, false) => "senharmic",
            };
            return Some(TamnamsInfo::derived(format!("{family_prefix}{suffix}")));
        }

        let grandparent_brighter = grandparent.num_large_steps() > grandparent.num_small_steps();

        if let Some(family_prefix) = self.family_prefix(great_grandparent) {
            let modifier = match (grandparent_brighter, parent_brighter, brighter) {
                (true, true, true) => "quso",
                (true, true, false) => "miso",
                (true, false, true) => "paso",
                (true, false, false) => "uso",
                (false, true, true) => "quha",
                (false, true, false) => "miha",
                (false, false, true) => "paha",
                (false, false, false) => "uha",
            };
            return Some(TamnamsInfo::derived(format!(
                "{modifier}-{family_prefix}tonic"
            )));
        }

        None
    }

    /// The family prefix of an ancestor if the ancestor is small or popular enough to pass on its name.
    fn family_prefix(&self, ancestor: StepCounts) -> Option<Cow<'static, str>> {
        if !is_prefixed(ancestor) {
            return None;
        }
        self.mos_names(ancestor)?.family_prefix
    }

    /// Names the mode. With `extra` set, the Ionian and Aeolian modes are annotated as major and minor.
    ///
    /// # Examples
    ///
    /// ```
    /// # use mos::names::{NameTable, Tamnams};
    /// assert_eq!(Tamnams.mode_name("LsLLLsL", false).as_deref(), Some("Dorian"));
    /// assert_eq!(Tamnams.mode_name("LLsLLLs", true).as_deref(), Some("Ionian (Major)"));
    /// assert_eq!(Tamnams.mode_name("LLLLLLL", false), None);
    /// ```
    fn mode_name(&self, mode: &str, extra: bool) -> Option<String> {
        let name = self.lookup_mode(mode)?;
        Some(match (extra, mode) {
            (true, "LLsLLLs") => format!("{name} (Major)"),
            (true, "LsLLsLL") => format!("{name} (Minor)"),
            _ => name.to_owned(),
        })
    }
}

fn is_prefixed(counts: StepCounts) -> bool {
    let (l, s) = (counts.num_large_steps(), counts.num_small_steps());
    if l + s <= 10 {
        return true;
    }
    if l == s && l <= 10 {
        return true;
    }
    matches!(
        (l.max(s), l.min(s)),
        (7, 5) | (12, 5) | (12, 7) | (13, 1) | (15, 2) | (19, 3)
    )
}

/// A name table without any entries.
#[derive(Clone, Copy, Debug, Default)]
pub struct Unnamed;

impl NameTable for Unnamed {
    fn lookup_mos(&self, _counts: StepCounts) -> Option<TamnamsInfo> {
        None
    }

    fn lookup_mode(&self, _mode: &str) -> Option<&str> {
        None
    }
}

/// A built-in table of commonly used TAMNAMS pattern names and mode names.
#[derive(Clone, Copy, Debug, Default)]
pub struct Tamnams;

struct MosEntry {
    num_large_steps: u32,
    num_small_steps: u32,
    name: &'static str,
    prefix: &'static str,
    subset: bool,
}

const fn entry(
    num_large_steps: u32,
    num_small_steps: u32,
    name: &'static str,
    prefix: &'static str,
) -> MosEntry {
    MosEntry {
        num_large_steps,
        num_small_steps,
        name,
        prefix,
        subset: false,
    }
}

const MOS_ENTRIES: &[MosEntry] = &[
    entry(1, 1, "trivial", "triv"),
    entry(2, 1, "trial", "tri"),
    entry(1, 2, "antrial", "atri"),
    entry(3, 1, "tetric", "tetra"),
    entry(1, 3, "antetric", "atetra"),
    entry(4, 1, "manual", "manu"),
    entry(1, 4, "pedal", "ped"),
    entry(2, 3, "pentic", "pent"),
    entry(3, 2, "antipentic", "apent"),
    entry(5, 1, "machinoid", "mech"),
    entry(1, 5, "antimachinoid", "amech"),
    entry(4, 2, "lemon", "lem"),
    entry(2, 4, "antilemon", "alem"),
    entry(5, 2, "diatonic", "dia"),
    entry(2, 5, "antidiatonic", "pel"),
    entry(4, 3, "smitonic", "smi"),
    entry(3, 4, "mosh", "mosh"),
    entry(6, 1, "archaeotonic", "arch"),
    MosEntry {
        subset: true,
        ..entry(1, 6, "onyx", "on")
    },
    entry(7, 1, "pine", "pine"),
    entry(1, 7, "antipine", "apine"),
    entry(6, 2, "ekic", "ek"),
    entry(2, 6, "antiekic", "aek"),
    entry(5, 3, "oneirotonic", "oneiro"),
    entry(3, 5, "checkertonic", "check"),
    entry(8, 1, "subneutralic", "blu"),
    entry(1, 8, "antisubneutralic", "ablu"),
    entry(7, 2, "superdiatonic", "arm"),
    entry(2, 7, "balzano", "bal"),
    entry(5, 4, "semiquartal", "cthon"),
    entry(4, 5, "gramitonic", "gram"),
    entry(9, 1, "sinatonic", "sina"),
    entry(1, 9, "antisinatonic", "asina"),
    entry(8, 2, "taric", "tara"),
    entry(2, 8, "jaric", "jara"),
    entry(7, 3, "dicoid", "dico"),
    entry(3, 7, "sephiroid", "seph"),
    entry(6, 4, "citric", "cit"),
    entry(4, 6, "lime", "lime"),
    entry(7, 5, "m-chromatic", "mchro"),
    entry(5, 7, "p-chromatic", "pchro"),
];

const MODE_NAMES: &[(&str, &str)] = &[
    // 5L 2s
    ("LLLsLLs", "Lydian"),
    ("LLsLLLs", "Ionian"),
    ("LLsLLsL", "Mixolydian"),
    ("LsLLLsL", "Dorian"),
    ("LsLLsLL", "Aeolian"),
    ("sLLLsLL", "Phrygian"),
    ("sLLsLLL", "Locrian"),
    // 3L 4s
    ("LsLsLss", "Dril"),
    ("LsLssLs", "Gil"),
    ("LssLsLs", "Kleeth"),
    ("sLsLsLs", "Bish"),
    ("sLsLssL", "Fish"),
    ("sLssLsL", "Jwl"),
    ("ssLsLsL", "Led"),
    // 6L 1s
    ("LLLLLsL", "Karakalian"),
];

impl NameTable for Tamnams {
    fn lookup_mos(&self, counts: StepCounts) -> Option<TamnamsInfo> {
        MOS_ENTRIES
            .iter()
            .find(|entry| {
                (entry.num_large_steps, entry.num_small_steps)
                    == (counts.num_large_steps(), counts.num_small_steps())
            })
            .map(|entry| TamnamsInfo {
                name: entry.name.into(),
                prefix: Some(entry.prefix.into()),
                abbreviation: None,
                family_prefix: None,
                subset: entry.subset,
            })
    }

    fn lookup_mode(&self, mode: &str) -> Option<&str> {
        if let Some((_, name)) = MODE_NAMES.iter().find(|(pattern, _)| *pattern == mode) {
            return Some(*name);
        }

        // The single mode of an n-wood pattern
        let is_wood_mode = !mode.is_empty()
            && mode.len() <= 20
            && mode.len() % 2 == 0
            && mode.as_bytes().chunks(2).all(|chunk| chunk == b"Ls");
        is_wood_mode.then_some("Tonic")
    }
}
