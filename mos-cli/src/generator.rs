use clap::Parser;
use mos::{
    family::{self, MosInfo, RangeInfo},
    fraction::Fraction,
    generator::{self, GeneratorRatio, ScaleInfo},
    names::Tamnams,
};
use serde::Serialize;

use crate::{pattern, App, CliResult};

#[derive(Parser)]
pub(crate) struct RatioOptions {
    /// Generator divided by the period, e.g. 7/12 or 0.585
    #[arg(allow_hyphen_values = true)]
    generator: GeneratorRatio,

    /// Number of periods per equave
    #[arg(long = "periods", default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
    num_periods: u32,

    /// Maximum number of notes of a pattern
    #[arg(long = "max-size")]
    max_size: Option<u32>,

    /// Maximum number of MOS forms to analyze
    #[arg(long = "max-length", default_value = "10")]
    max_length: usize,

    /// Also describe the scale with the given number of notes
    #[arg(long = "scale")]
    scale_size: Option<u32>,

    /// Number of generators going down used for --scale
    #[arg(long = "down", default_value = "0")]
    generators_down: u32,
}

#[derive(Serialize)]
struct RatioDto {
    generator: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    bright_generator: Option<String>,
    forms: Vec<Fraction>,
    patterns: Vec<MosInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    scale: Option<ScaleInfo>,
}

impl RatioOptions {
    pub fn run(self, app: &mut App) -> CliResult {
        let forms = generator::mos_forms(self.generator, self.max_size, Some(self.max_length))?;
        let patterns = generator::mos_patterns(
            self.generator,
            self.num_periods,
            self.max_size,
            Some(self.max_length),
            &Tamnams,
        )?;

        let bright_generator = match patterns.last() {
            Some(largest) => Some(
                generator::to_bright_generator_per_period(
                    self.generator,
                    largest.size / self.num_periods,
                )?
                .to_string(),
            ),
            None => None,
        };

        let scale = match self.scale_size {
            Some(scale_size) => Some(generator::scale_info(
                self.generator,
                scale_size,
                self.generators_down,
                self.num_periods,
                &Tamnams,
            )?),
            None => None,
        };

        let dto = RatioDto {
            generator: self.generator.to_string(),
            bright_generator,
            forms,
            patterns,
            scale,
        };
        if app.write_yaml(&dto)? {
            return Ok(());
        }

        app.writeln(format_args!("generator: {}", dto.generator))?;
        if let Some(bright_generator) = &dto.bright_generator {
            app.writeln(format_args!("bright generator: {bright_generator}"))?;
        }

        let forms: Vec<_> = dto.forms.iter().map(Fraction::to_string).collect();
        app.writeln(format_args!("forms: {}", forms.join(", ")))?;

        app.writeln("patterns:")?;
        for info in &dto.patterns {
            app.writeln(format_args!(
                "  {}",
                pattern::label(info.mos_pattern, info.names.as_ref())
            ))?;
        }

        if let Some(scale) = &dto.scale {
            app.write(format_args!("scale: {}", scale.step_pattern))?;
            if let Some(mode_name) = &scale.mode_name {
                app.write(format_args!(" {mode_name}"))?;
            }
            if let Some(counts) = scale.mos_pattern {
                app.write(format_args!(
                    " ({})",
                    pattern::label(counts, scale.names.as_ref())
                ))?;
            }
            app.writeln("")?;
        }

        Ok(())
    }
}

#[derive(Parser)]
pub(crate) struct RangesOptions {
    /// Number of notes of the patterns
    size: u32,

    /// Include patterns with more than one period
    #[arg(long = "multi")]
    include_multi_periods: bool,
}

impl RangesOptions {
    pub fn run(self, app: &mut App) -> CliResult {
        let ranges = family::generator_ranges(self.size, self.include_multi_periods);
        if app.write_yaml(&ranges)? {
            return Ok(());
        }

        for range in ranges {
            app.writeln(format_range(&range))?;
        }

        Ok(())
    }
}

fn format_range(range: &RangeInfo) -> String {
    format!(
        "{:<10} {:<6} {} .. {} (period {})",
        format!("{}L {}s", range.num_large_steps, range.num_small_steps),
        if range.bright { "bright" } else { "dark" },
        range.lower_bound,
        range.upper_bound,
        range.period,
    )
}
