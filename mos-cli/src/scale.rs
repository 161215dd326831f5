use std::{collections::BTreeMap, fmt::Display};

use clap::{Parser, ValueEnum};
use mos::{
    pattern::StepCounts,
    scale::{self, Accidentals, DaughterDegree, ScaleOptions},
};
use serde::Serialize;

use crate::{App, CliResult};

#[derive(Parser)]
pub(crate) struct BuildScaleOptions {
    /// MOS pattern, e.g. "5L 2s"
    mos_pattern: StepCounts,

    /// Number of bright generators going up from the root
    #[arg(long = "up")]
    up: Option<u32>,

    /// Number of bright generators going down from the root
    #[arg(long = "down")]
    down: Option<u32>,

    /// Size of the large step in EDO steps
    #[arg(long = "large", default_value = "2", allow_negative_numbers = true)]
    size_of_large_step: i64,

    /// Size of the small step in EDO steps
    #[arg(long = "small", default_value = "1", allow_negative_numbers = true)]
    size_of_small_step: i64,

    /// Mark the degrees belonging to the parent pattern
    #[arg(long = "parent", conflicts_with = "daughter")]
    parent: bool,

    /// Add the chromatic degrees of the daughter pattern
    #[arg(long = "daughter")]
    daughter: bool,

    /// Side of the accidentals. Aligns the parent pattern with the flat side if set to "flat".
    #[arg(long = "acc", value_enum, default_value = "sharp")]
    accidentals: AccidentalsArg,
}

#[derive(Clone, Copy, ValueEnum)]
enum AccidentalsArg {
    Sharp,
    Flat,
    Both,
}

impl From<AccidentalsArg> for Accidentals {
    fn from(accidentals: AccidentalsArg) -> Self {
        match accidentals {
            AccidentalsArg::Sharp => Accidentals::Sharp,
            AccidentalsArg::Flat => Accidentals::Flat,
            AccidentalsArg::Both => Accidentals::Both,
        }
    }
}

impl BuildScaleOptions {
    pub fn run(self, app: &mut App) -> CliResult {
        let options = ScaleOptions {
            down: self.down,
            up: self.up,
            size_of_large_step: self.size_of_large_step,
            size_of_small_step: self.size_of_small_step,
            accidentals: self.accidentals.into(),
        };

        if self.parent {
            let degrees = scale::build_scale_with_parent(self.mos_pattern, &options)?;
            print_degrees(app, &degrees, |&is_parent| is_parent.then_some("parent"))
        } else if self.daughter {
            let degrees = scale::build_scale_with_daughter(self.mos_pattern, &options)?;
            print_degrees(app, &degrees, |degree| {
                Some(match degree {
                    DaughterDegree::Parent => "parent",
                    DaughterDegree::Sharp => "sharp",
                    DaughterDegree::Flat => "flat",
                    DaughterDegree::Both => "both",
                })
            })
        } else {
            let degrees = scale::build_scale(self.mos_pattern, &options)?;
            if app.write_yaml(&degrees)? {
                return Ok(());
            }
            for degree in degrees {
                app.writeln(format_args!("{degree:>4}"))?;
            }
            Ok(())
        }
    }
}

fn print_degrees<T: Serialize, R: Display>(
    app: &mut App,
    degrees: &BTreeMap<i64, T>,
    role: impl Fn(&T) -> Option<R>,
) -> CliResult {
    if app.write_yaml(degrees)? {
        return Ok(());
    }

    for (degree, tag) in degrees {
        match role(tag) {
            Some(role) => app.writeln(format_args!("{degree:>4} {role}"))?,
            None => app.writeln(format_args!("{degree:>4}"))?,
        }
    }

    Ok(())
}
