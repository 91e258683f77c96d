//! rpn15c command-line driver.
//!
//! Usage:
//!   rpn15c <file>        Press the keys listed in a file
//!   rpn15c -e <keys>     Press the keys given on the command line
//!   rpn15c               Read keys from stdin

use std::{
    env, fs,
    io::{self, Read},
    path::PathBuf,
    process::ExitCode,
};

use rpn15c::{Config, Engine, Snapshot, config::default_config_path, snapshot::default_state_path};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "\
Usage: rpn15c [OPTIONS] [FILE]

Arguments:
  [FILE]  Keystroke script: key ids or legends separated by whitespace,
          '#' starts a comment. The display is printed after each line.

Options:
  -e <KEYS>            Press KEYS
  -c, --config <PATH>  Read configuration from PATH
  -s, --state <PATH>   Load and save continuous memory at PATH
      --no-state       Start from a fresh engine and save nothing
  -v, --verbose        Log more (repeat for trace output)
  -h, --help           Print this help message

If no script is given, reads from stdin.
The RPN15C_LOG environment variable overrides the log filter.";

enum Source {
    Stdin,
    File(PathBuf),
    Keys(String),
}

struct Options {
    source: Source,
    config: Option<PathBuf>,
    state: Option<PathBuf>,
    no_state: bool,
    verbosity: u8,
}

enum Action {
    Run(Options),
    Help,
}

fn parse_args() -> Result<Action, String> {
    let mut args = env::args().skip(1);
    let mut options = Options {
        source: Source::Stdin,
        config: None,
        state: None,
        no_state: false,
        verbosity: 0,
    };

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Action::Help),
            "-e" => {
                let keys = args.next().ok_or("-e needs an argument")?;
                options.source = Source::Keys(keys);
            }
            "-c" | "--config" => {
                let path = args.next().ok_or("--config needs a path")?;
                options.config = Some(PathBuf::from(path));
            }
            "-s" | "--state" => {
                let path = args.next().ok_or("--state needs a path")?;
                options.state = Some(PathBuf::from(path));
            }
            "--no-state" => options.no_state = true,
            "-v" | "--verbose" => options.verbosity = options.verbosity.saturating_add(1),
            "-vv" => options.verbosity = options.verbosity.saturating_add(2),
            "-" => options.source = Source::Stdin,
            flag if flag.starts_with('-') => return Err(format!("unknown option {flag}\n\n{USAGE}")),
            file => options.source = Source::File(PathBuf::from(file)),
        }
    }
    Ok(Action::Run(options))
}

fn init_logging(verbosity: u8) {
    let default = match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env("RPN15C_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn read_source(source: &Source) -> Result<String, String> {
    match source {
        Source::Keys(keys) => Ok(keys.clone()),
        Source::File(path) => {
            fs::read_to_string(path).map_err(|e| format!("error reading {}: {e}", path.display()))
        }
        Source::Stdin => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| format!("error reading stdin: {e}"))?;
            Ok(buf)
        }
    }
}

fn run(options: Options) -> Result<(), String> {
    let config = match options.config.as_deref() {
        Some(path) => Config::from_file(path).map_err(|e| e.to_string())?,
        None => match default_config_path() {
            Some(path) => Config::load_or_default(&path).map_err(|e| e.to_string())?,
            None => Config::default(),
        },
    };
    let mut engine = Engine::with_config(&config);

    let state_path = if options.no_state {
        None
    } else {
        options.state.or_else(default_state_path)
    };
    if let Some(path) = state_path.as_deref()
        && path.exists()
    {
        match Snapshot::load(path) {
            Ok(snapshot) => {
                if let Err(e) = engine.restore_state(&snapshot) {
                    log::warn!("starting with fresh memory: {e}");
                }
            }
            Err(e) => log::warn!("starting with fresh memory: {e}"),
        }
    }

    let script = read_source(&options.source)?;
    for line in script.lines() {
        let keys = line.split('#').next().unwrap_or("");
        let mut pressed = false;
        for key in keys.split_whitespace() {
            engine.press(key, None);
            pressed = true;
        }
        if pressed {
            println!("{}", engine.get_display());
        }
    }

    if let Some(path) = state_path.as_deref() {
        engine.serialize_state().save(path).map_err(|e| e.to_string())?;
    }
    Ok(())
}

fn main() -> ExitCode {
    match parse_args() {
        Ok(Action::Help) => {
            println!("{USAGE}");
            ExitCode::SUCCESS
        }
        Ok(Action::Run(options)) => {
            init_logging(options.verbosity);
            match run(options) {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    eprintln!("{e}");
                    ExitCode::FAILURE
                }
            }
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
