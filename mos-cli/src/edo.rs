use clap::Parser;
use mos::{
    edo::{self, SearchOptions},
    family::MosScaleInfo,
    names::Tamnams,
};

use crate::{pattern, App, CliResult};

#[derive(Parser)]
pub(crate) struct EdoOptions {
    /// Number of steps of the EDO
    edo: u32,

    /// List all MOS scales instead of the most popular one
    #[arg(long = "all")]
    all: bool,

    /// Minimum number of notes, used with --all
    #[arg(long = "min", default_value = "2")]
    min_size: u32,

    /// Maximum number of notes, used with --all
    #[arg(long = "max")]
    max_size: Option<u32>,

    /// Maximum ratio L/s, used with --all. Zero means no limit
    #[arg(long = "hardness")]
    max_hardness: Option<f64>,
}

impl EdoOptions {
    pub fn run(self, app: &mut App) -> CliResult {
        if !self.all {
            let info = edo::any_for_edo(self.edo, &Tamnams)?;
            if app.write_yaml(&info)? {
                return Ok(());
            }
            return Ok(app.writeln(describe(&info))?);
        }

        let options = SearchOptions {
            min_size: self.min_size,
            max_size: self.max_size,
            max_hardness: self.max_hardness,
        };
        let scales = edo::all_for_edo(self.edo, &options, &Tamnams)?;
        if scales.is_empty() {
            app.errln(format_args!("No MOS scales found in {}-EDO", self.edo))?;
        }
        if app.write_yaml(&scales)? {
            return Ok(());
        }

        for info in &scales {
            app.writeln(describe(info))?;
        }

        Ok(())
    }
}

#[derive(Parser)]
pub(crate) struct MapOptions {
    /// Maximum number of notes of a pattern
    #[arg(long = "max-size", default_value = "12")]
    max_size: u32,

    /// Only print the scales of this EDO
    #[arg(long = "edo")]
    edo: Option<i64>,
}

impl MapOptions {
    pub fn run(self, app: &mut App) -> CliResult {
        let mut map = edo::make_edo_map(self.max_size, &Tamnams)?;
        if let Some(edo) = self.edo {
            map.retain(|&size, _| size == edo);
            if map.is_empty() {
                app.errln(format_args!("No MOS scales found in {edo}-EDO"))?;
            }
        }
        if app.write_yaml(&map)? {
            return Ok(());
        }

        for (edo, scales) in &map {
            app.writeln(format_args!("{edo}-EDO:"))?;
            for info in scales {
                app.writeln(format_args!("  {}", describe(info)))?;
            }
        }

        Ok(())
    }
}

/// `5L 2s (diatonic) with L = 2, s = 1, basic, bright generator 7\12`
fn describe(info: &MosScaleInfo) -> String {
    format!(
        "{}, {}, bright generator {}\\{}",
        pattern::scale_label(info),
        info.hardness,
        info.bright_generator,
        info.edo
    )
}
