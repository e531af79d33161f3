use std::ffi::OsString;
use std::path::PathBuf;

use clap::{App, ArgMatches};
use thiserror::Error;

use bootstrap::{BootstrapError, ClearColor, ShaderSource, SurfaceConfig};

use crate::lessons::{Lesson, LessonConfig};

#[derive(Error, Debug)]
pub enum CliError {
    /// Also covers `--help` and `--version`, which clap reports as errors.
    #[error(transparent)]
    Clap(#[from] clap::Error),

    #[error(transparent)]
    Config(#[from] BootstrapError),
}

/// Parses the command line into the lesson to run.
pub fn parse_from<I, T>(args: I) -> Result<LessonConfig, CliError>
    where I: IntoIterator<Item = T>,
          T: Into<OsString> + Clone
{
    let yaml = load_yaml!("cli.yaml");
    let matches = App::from_yaml(yaml).get_matches_from_safe(args)?;

    let mut config = match matches.subcommand() {
        ("window", _) => LessonConfig::new(Lesson::Window),
        ("triangle", Some(sub)) => triangle_config(sub),
        _ => LessonConfig::new(Lesson::Triangle),
    };

    let mut surface = SurfaceConfig::default();
    if let Some(width) = matches.value_of("width") {
        surface.width = parse_dimension("width", width)?;
    }
    if let Some(height) = matches.value_of("height") {
        surface.height = parse_dimension("height", height)?;
    }
    if let Some(title) = matches.value_of("title") {
        surface = surface.with_title(title);
    }
    surface.validate()?;
    config.surface = surface;

    if let Some(clear) = matches.value_of("clear") {
        config.clear_color = clear.parse::<ClearColor>()?;
    }

    config.log_filter = matches.value_of("log").map(str::to_owned);

    Ok(config)
}

fn triangle_config(matches: &ArgMatches) -> LessonConfig {
    let mut config = LessonConfig::new(Lesson::Triangle);

    if let Some(path) = matches.value_of_os("vertex") {
        config.vertex = ShaderSource::File(PathBuf::from(path));
    }
    if let Some(path) = matches.value_of_os("fragment") {
        config.fragment = ShaderSource::File(PathBuf::from(path));
    }

    config
}

fn parse_dimension(name: &str, value: &str) -> Result<u32, BootstrapError> {
    value.parse::<u32>()
        .map_err(|_| BootstrapError::InvalidConfig(format!("{} '{}' is not a pixel count", name, value)))
}
