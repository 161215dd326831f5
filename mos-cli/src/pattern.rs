use clap::Parser;
use mos::{
    family::{self, MosInfo, MosScaleInfo},
    hardness::Hardness,
    modes,
    monzo::{self, Monzo},
    names::{NameTable, Tamnams, TamnamsInfo},
    pattern::StepCounts,
    word,
};
use serde::Serialize;

use crate::{App, CliResult};

#[derive(Parser)]
pub(crate) struct WordOptions {
    /// MOS pattern, e.g. "5L 2s"
    mos_pattern: StepCounts,
}

#[derive(Serialize)]
struct WordDto {
    mos_pattern: StepCounts,
    brightest_word: String,
    bright_generator: Monzo,
    period: u32,
    num_periods: u32,
    #[serde(flatten)]
    names: Option<TamnamsInfo>,
}

impl WordOptions {
    pub fn run(self, app: &mut App) -> CliResult {
        let counts = self.mos_pattern;
        let (num_large_steps, num_small_steps) =
            (counts.num_large_steps(), counts.num_small_steps());

        let brightest_word = word::euclid(num_large_steps, num_small_steps);
        let bresenham_word = word::bresenham(num_large_steps, num_small_steps);
        if brightest_word != bresenham_word {
            log::warn!("Constructions disagree on {counts}: {brightest_word} vs. {bresenham_word}");
            app.errln(format_args!(
                "Warning: The Bresenham construction yields {bresenham_word}"
            ))?;
        }

        let dto = WordDto {
            mos_pattern: counts,
            brightest_word: brightest_word.to_string(),
            bright_generator: monzo::bright_generator_monzo(counts),
            period: counts.period(),
            num_periods: counts.num_periods(),
            names: Tamnams.mos_names(counts),
        };
        if app.write_yaml(&dto)? {
            return Ok(());
        }

        app.writeln(label(dto.mos_pattern, dto.names.as_ref()))?;
        app.writeln(format_args!("brightest mode: {}", dto.brightest_word))?;
        app.writeln(format_args!(
            "bright generator: {}",
            monzo_label(dto.bright_generator)
        ))?;
        app.writeln(format_args!(
            "periods: {} x {} steps",
            dto.num_periods, dto.period
        ))?;

        Ok(())
    }
}

#[derive(Parser)]
pub(crate) struct ModesOptions {
    /// MOS pattern, e.g. "5L 2s"
    mos_pattern: StepCounts,

    /// Mark the Ionian and Aeolian modes as major and minor
    #[arg(long = "extra")]
    extra_names: bool,
}

impl ModesOptions {
    pub fn run(self, app: &mut App) -> CliResult {
        let modes = modes::mos_modes(self.mos_pattern, self.extra_names, &Tamnams)?;
        if app.write_yaml(&modes)? {
            return Ok(());
        }

        for mode in modes {
            app.write(format_args!("{:<10} {}", mode.udp.to_string(), mode.mode))?;
            if let Some(mode_name) = mode.mode_name {
                app.write(format_args!(" {mode_name}"))?;
            }
            app.writeln("")?;
        }

        Ok(())
    }
}

#[derive(Parser)]
pub(crate) struct InfoOptions {
    /// MOS pattern, e.g. "5L 2s"
    mos_pattern: StepCounts,

    /// Size of the large step in EDO steps
    #[arg(allow_negative_numbers = true)]
    size_of_large_step: i64,

    /// Size of the small step in EDO steps
    #[arg(allow_negative_numbers = true)]
    size_of_small_step: i64,
}

#[derive(Serialize)]
struct InfoDto {
    scale: MosScaleInfo,
    parent: MosInfo,
    daughter: MosScaleInfo,
}

impl InfoOptions {
    pub fn run(self, app: &mut App) -> CliResult {
        let counts = self.mos_pattern;
        let (large, small) = (self.size_of_large_step, self.size_of_small_step);

        let dto = InfoDto {
            scale: family::mos_scale_info(counts, large, small, &Tamnams)?,
            parent: family::parent_mos(counts, &Tamnams),
            daughter: family::daughter_mos(counts, large, small, &Tamnams)?,
        };
        if app.write_yaml(&dto)? {
            return Ok(());
        }

        let scale = &dto.scale;
        app.writeln(scale_label(scale))?;
        app.writeln(format_args!("hardness: {}", scale.hardness))?;
        app.writeln(format_args!("edo: {}", scale.edo))?;
        app.writeln(format_args!(
            "period: {} steps, {} period(s)",
            scale.period, scale.num_periods
        ))?;
        app.writeln(format_args!(
            "bright generator: {} steps ({})",
            scale.bright_generator,
            monzo_label(scale.bright_generator_monzo)
        ))?;
        app.writeln(format_args!(
            "dark generator: {} steps",
            scale.dark_generator
        ))?;
        app.writeln(format_args!(
            "parent: {}",
            label(dto.parent.mos_pattern, dto.parent.names.as_ref())
        ))?;
        app.writeln(format_args!("daughter: {}", scale_label(&dto.daughter)))?;

        Ok(())
    }
}

#[derive(Parser)]
pub(crate) struct HardnessOptions {
    /// Size of the large step
    #[arg(allow_negative_numbers = true)]
    size_of_large_step: f64,

    /// Size of the small step
    #[arg(allow_negative_numbers = true)]
    size_of_small_step: f64,
}

impl HardnessOptions {
    pub fn run(self, app: &mut App) -> CliResult {
        let hardness = Hardness::classify(self.size_of_large_step, self.size_of_small_step)?;
        if app.write_yaml(&hardness)? {
            return Ok(());
        }
        Ok(app.writeln(hardness)?)
    }
}

/// `5L 2s (diatonic)` or `5L 2s` if the pattern has no name.
pub(crate) fn label(counts: StepCounts, names: Option<&TamnamsInfo>) -> String {
    match names {
        Some(names) => format!("{counts} ({})", names.name),
        None => counts.to_string(),
    }
}

pub(crate) fn scale_label(info: &MosScaleInfo) -> String {
    format!(
        "{} with L = {}, s = {}",
        label(info.mos_pattern, info.names.as_ref()),
        info.size_of_large_step,
        info.size_of_small_step
    )
}

fn monzo_label(monzo: Monzo) -> String {
    format!("{}L {}s", monzo.num_large_steps, monzo.num_small_steps)
}
