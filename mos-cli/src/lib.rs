mod edo;
mod generator;
mod pattern;
mod scale;

use std::{
    fmt::{self, Debug, Display},
    fs::File,
    io::{self, Write},
    path::PathBuf,
};

use clap::Parser;
use edo::{EdoOptions, MapOptions};
use generator::{RangesOptions, RatioOptions};
use mos::MosError;
use pattern::{HardnessOptions, InfoOptions, ModesOptions, WordOptions};
use scale::BuildScaleOptions;
use serde::Serialize;

#[derive(Parser)]
#[command(name = "mos", version, about)]
struct MainOptions {
    /// Write output to a file instead of stdout
    #[arg(long = "of")]
    output_file: Option<PathBuf>,

    /// Print the results as YAML
    #[arg(long = "yaml")]
    yaml: bool,

    #[command(subcommand)]
    command: MainCommand,
}

#[derive(Parser)]
enum MainCommand {
    /// Print the brightest word and the bright generator of a MOS pattern, e.g. "5L 2s"
    #[command(name = "word")]
    Word(WordOptions),

    /// Print the degrees of a MOS scale in EDO steps
    #[command(name = "scale")]
    Scale(BuildScaleOptions),

    /// List all modes of a MOS pattern from the darkest to the brightest
    #[command(name = "modes")]
    Modes(ModesOptions),

    /// Describe a MOS scale with given step sizes together with its parent and daughter patterns
    #[command(name = "info")]
    Info(InfoOptions),

    /// Find the MOS patterns spanned by a generator/period ratio
    #[command(name = "ratio")]
    Ratio(RatioOptions),

    /// Find MOS scales supported by an EDO
    #[command(name = "edo")]
    Edo(EdoOptions),

    /// Group the MOS scales of representative step ratios by EDO
    #[command(name = "map")]
    Map(MapOptions),

    /// List the generator ranges of all MOS patterns of a given size
    #[command(name = "ranges")]
    Ranges(RangesOptions),

    /// Classify the hardness of a step ratio
    #[command(name = "hardness")]
    Hardness(HardnessOptions),
}

impl MainOptions {
    fn run(self) -> CliResult {
        let stdout = io::stdout();
        let output: Box<dyn Write> = match self.output_file {
            Some(output_file) => Box::new(File::create(output_file)?),
            None => Box::new(stdout.lock()),
        };

        let stderr = io::stderr();
        let error = Box::new(stderr.lock());

        let mut app = App {
            output,
            error,
            yaml: self.yaml,
        };

        self.command.run(&mut app)
    }
}

impl MainCommand {
    fn run(self, app: &mut App) -> CliResult {
        match self {
            MainCommand::Word(options) => options.run(app),
            MainCommand::Scale(options) => options.run(app),
            MainCommand::Modes(options) => options.run(app),
            MainCommand::Info(options) => options.run(app),
            MainCommand::Ratio(options) => options.run(app),
            MainCommand::Edo(options) => options.run(app),
            MainCommand::Map(options) => options.run(app),
            MainCommand::Ranges(options) => options.run(app),
            MainCommand::Hardness(options) => options.run(app),
        }
    }
}

pub fn run_in_shell_env(args: impl IntoIterator<Item = String>) -> CliResult {
    let options = match MainOptions::try_parse_from(args) {
        Err(err) => {
            return if err.use_stderr() {
                Err(CliError::CommandError(err.to_string()))
            } else {
                print!("{err}");
                Ok(())
            };
        }
        Ok(options) => options,
    };

    options.run()
}

struct App<'a> {
    output: Box<dyn 'a + Write>,
    error: Box<dyn 'a + Write>,
    yaml: bool,
}

impl App<'_> {
    pub fn write(&mut self, message: impl Display) -> io::Result<()> {
        write!(&mut self.output, "{message}")
    }

    pub fn writeln(&mut self, message: impl Display) -> io::Result<()> {
        writeln!(&mut self.output, "{message}")
    }

    pub fn errln(&mut self, message: impl Display) -> io::Result<()> {
        writeln!(&mut self.error, "{message}")
    }

    /// Prints `value` as YAML if requested. Returns `false` if the caller should print plain text instead.
    pub fn write_yaml(&mut self, value: &impl Serialize) -> CliResult<bool> {
        if !self.yaml {
            return Ok(false);
        }
        self.write(serde_yaml::to_string(value)?)?;
        Ok(true)
    }
}

pub type CliResult<T = ()> = Result<T, CliError>;

pub enum CliError {
    IoError(io::Error),
    CommandError(String),
}

impl Debug for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::IoError(err) => write!(f, "IO error / {err}"),
            CliError::CommandError(err) => write!(f, "The command failed / {err}"),
        }
    }
}

impl From<String> for CliError {
    fn from(v: String) -> Self {
        CliError::CommandError(v)
    }
}

impl From<MosError> for CliError {
    fn from(v: MosError) -> Self {
        CliError::CommandError(v.to_string())
    }
}

impl From<serde_yaml::Error> for CliError {
    fn from(v: serde_yaml::Error) -> Self {
        CliError::CommandError(format!("Could not serialize output ({v})"))
    }
}

impl From<io::Error> for CliError {
    fn from(v: io::Error) -> Self {
        CliError::IoError(v)
    }
}
