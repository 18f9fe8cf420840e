use clap::App;
use clap::{ArgMatches, load_yaml};
use log::warn;
use std::path::PathBuf;

pub const DEFAULT_MODEL: &str = "crytek-sponza/sponza.obj";
pub const DEFAULT_WINDOW_SIZE: (u32, u32) = (1280, 720);

/// Holds the result of processing the arguments to the program
#[derive(Clone, Debug, PartialEq)]
pub struct Args
{
    pub model: PathBuf,
    pub cube_texture: Option<PathBuf>,
    pub window_size: (u32, u32),
}

impl Args
{
    /// Processes the arguments passed into the program
    pub fn parse_args() -> Args
    {
        let yaml = load_yaml!("../arguments.yml");
        let matches = App::from_yaml(yaml).get_matches();
        Args::from_matches(&matches)
    }

    /// Builds the arguments from already matched command line values. Invalid window dimensions
    /// fall back to the defaults
    ///
    /// `matches` - the matches provided by the initial argument processing
    fn from_matches(matches: &ArgMatches) -> Args
    {
        Args
        {
            model: PathBuf::from(matches.value_of("model").unwrap_or(DEFAULT_MODEL)),
            cube_texture: matches.value_of("cube_texture").map(PathBuf::from),
            window_size:
                (
                    parse_dimension(matches.value_of("width"), "width", DEFAULT_WINDOW_SIZE.0),
                    parse_dimension(matches.value_of("height"), "height", DEFAULT_WINDOW_SIZE.1)
                ),
        }
    }
}

fn parse_dimension(value: Option<&str>, name: &str, default: u32) -> u32
{
    let value = match value
    {
        Some(i) => i,
        None => return default
    };

    match value.parse::<u32>()
    {
        Ok(i) if i > 0 => i,
        _ =>
            {
                warn!("Invalid window {}: {}. Using {}", name, value, default);
                default
            }
    }
}

#[cfg(test)]
mod tests
{
    use std::path::PathBuf;
    use clap::{App, load_yaml};
    use crate::args_parser::{Args, DEFAULT_MODEL, DEFAULT_WINDOW_SIZE};

    fn parse(arguments: &[&str]) -> Args
    {
        let yaml = load_yaml!("../arguments.yml");
        let matches = App::from_yaml(yaml).get_matches_from(arguments);
        Args::from_matches(&matches)
    }

    #[test]
    fn defaults_without_arguments()
    {
        let args = parse(&["solar_scene"]);

        assert_eq!(args.model, PathBuf::from(DEFAULT_MODEL));
        assert_eq!(args.cube_texture, None);
        assert_eq!(args.window_size, DEFAULT_WINDOW_SIZE);
    }

    #[test]
    fn all_arguments()
    {
        let args = parse(&["solar_scene", "-m", "cube.obj", "-t", "crate.png", "--width", "800", "--height", "600"]);

        assert_eq!(args.model, PathBuf::from("cube.obj"));
        assert_eq!(args.cube_texture, Some(PathBuf::from("crate.png")));
        assert_eq!(args.window_size, (800, 600));
    }

    #[test]
    fn invalid_dimensions_fall_back()
    {
        let args = parse(&["solar_scene", "--width", "wide", "--height", "0"]);
        assert_eq!(args.window_size, DEFAULT_WINDOW_SIZE);
    }
}
