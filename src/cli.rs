use lexopt::{Arg, Parser, ValueExt};
use std::path::PathBuf;

pub(crate) static USAGE: &str = "\
Usage: gridsnake [<options>]

Play Snake in the terminal.

Options:
  -c, --config <PATH>    Read configuration from the given file
      --log-file <PATH>  Write logs to the given file
      --seed <N>         Seed the random number generator with <N>
  -h, --help             Show this help message and exit
  -V, --version          Show the program version and exit
";

/// What the command line asked for
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum CliAction {
    Run(Arguments),
    Help,
    Version,
}

/// Command-line arguments for running the game.  Anything given here
/// overrides the configuration file.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct Arguments {
    pub(crate) config: Option<PathBuf>,
    pub(crate) log_file: Option<PathBuf>,
    pub(crate) seed: Option<u64>,
}

impl CliAction {
    pub(crate) fn from_env() -> Result<CliAction, lexopt::Error> {
        CliAction::from_parser(Parser::from_env())
    }

    #[cfg(test)]
    fn from_args<I>(args: I) -> Result<CliAction, lexopt::Error>
    where
        I: IntoIterator,
        I::Item: Into<std::ffi::OsString>,
    {
        CliAction::from_parser(Parser::from_args(args))
    }

    fn from_parser(mut parser: Parser) -> Result<CliAction, lexopt::Error> {
        let mut args = Arguments::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('c') | Arg::Long("config") => {
                    args.config = Some(PathBuf::from(parser.value()?));
                }
                Arg::Long("log-file") => {
                    args.log_file = Some(PathBuf::from(parser.value()?));
                }
                Arg::Long("seed") => {
                    args.seed = Some(parser.value()?.parse()?);
                }
                Arg::Short('h') | Arg::Long("help") => return Ok(CliAction::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(CliAction::Version),
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(CliAction::Run(args))
    }
}
