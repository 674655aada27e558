//! The lasagna timer

#![warn(clippy::all)]
#![warn(missing_copy_implementations, missing_docs, rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn, missing_debug_implementations)]
#![cfg_attr(not(debug_assertions), deny(clippy::todo))]

use std::io::{self, BufRead, Write};

use clap::{Parser, Subcommand};
use lasagna_calculator::{
    checked_preparation_time_for, checked_remaining_bake_time, checked_total_elapsed_time,
    parse_layers, parse_minutes, Layers, Minutes, ParseError, EXPECTED_BAKE_TIME,
    PREPARATION_TIME,
};
use thiserror::Error;
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_logger(verbose: bool) {
    let default_filter = if verbose {
        "lasagna=debug"
    } else {
        "lasagna=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();
}

#[derive(Debug, Error)]
enum InputError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("the {0} is out of range")]
    OutOfRange(&'static str),
    #[error("expected exactly two arguments: {0}")]
    ArgumentCount(&'static str),
}

impl From<InputError> for io::Error {
    fn from(e: InputError) -> Self {
        io::Error::new(io::ErrorKind::InvalidInput, e)
    }
}

fn report(e: &InputError) {
    warn!(%e, "rejected input");
    eprintln!("Couldn't compute: {e}");
}

fn remaining(elapsed: Minutes) -> Result<Minutes, InputError> {
    let remaining = checked_remaining_bake_time(elapsed)
        .ok_or(InputError::OutOfRange("remaining bake time"))?;
    debug!(elapsed, remaining, "computed remaining bake time");
    Ok(remaining)
}

fn preparation(layers: Layers) -> Result<Minutes, InputError> {
    let preparation =
        checked_preparation_time_for(layers).ok_or(InputError::OutOfRange("preparation time"))?;
    debug!(layers, preparation, "computed preparation time");
    Ok(preparation)
}

fn total(layers: Layers, elapsed: Minutes) -> Result<Minutes, InputError> {
    let total = checked_total_elapsed_time(layers, elapsed)
        .ok_or(InputError::OutOfRange("total elapsed time"))?;
    debug!(layers, elapsed, total, "computed total elapsed time");
    Ok(total)
}

fn write_result(out: &mut dyn Write, result: Result<Minutes, InputError>) -> io::Result<()> {
    match result {
        Ok(minutes) => writeln!(out, "{minutes}"),
        Err(e) => {
            report(&e);
            Ok(())
        }
    }
}

trait Action {
    fn apply(&self, arguments: &str, out: &mut dyn Write) -> io::Result<()>;
    fn usage(&self) -> &'static str;
    fn summary(&self) -> &'static str;

    fn details(&self) -> &'static str {
        self.summary()
    }
}

struct Help;

impl Action for Help {
    fn apply(&self, arguments: &str, out: &mut dyn Write) -> io::Result<()> {
        if let Some(details) = find_command(arguments)
            .filter(|_| !arguments.is_empty())
            .map(|o| o.details())
        {
            return writeln!(out, "{details}");
        }
        let width = COMMANDS
            .iter()
            .map(|(_, o)| o.usage().len())
            .max()
            .unwrap_or(0);
        for &(_, action) in COMMANDS {
            writeln!(out, "{:<width$}   {}", action.usage(), action.summary())?;
        }
        Ok(())
    }

    fn usage(&self) -> &'static str {
        "help [command]"
    }

    fn summary(&self) -> &'static str {
        "List the timer commands, or explain one of them."
    }

    fn details(&self) -> &'static str {
        "With no argument, lists every timer command. `help total` explains the `total` command; prefixes such as `help t` work too."
    }
}

struct Remaining;

impl Action for Remaining {
    fn apply(&self, arguments: &str, out: &mut dyn Write) -> io::Result<()> {
        let result = parse_minutes(arguments)
            .map_err(InputError::from)
            .and_then(remaining);
        write_result(out, result)
    }

    fn usage(&self) -> &'static str {
        "remaining <elapsed>"
    }

    fn summary(&self) -> &'static str {
        "Print how many minutes the lasagna still has to bake."
    }

    fn details(&self) -> &'static str {
        concat!(
            "Print how many minutes the lasagna still has to bake after `elapsed` minutes in the oven.\n",
            "The result is negative once the lasagna has baked for too long.",
        )
    }
}

struct Prep;

impl Action for Prep {
    fn apply(&self, arguments: &str, out: &mut dyn Write) -> io::Result<()> {
        let result = parse_layers(arguments)
            .map_err(InputError::from)
            .and_then(preparation);
        write_result(out, result)
    }

    fn usage(&self) -> &'static str {
        "prep <layers>"
    }

    fn summary(&self) -> &'static str {
        "Print how many minutes it takes to prepare `layers` layers."
    }
}

struct Total;

impl Total {
    fn compute(&self, arguments: &str) -> Result<Minutes, InputError> {
        let mut words = arguments.split_whitespace();
        match (words.next(), words.next(), words.next()) {
            (Some(layers), Some(elapsed), None) => {
                total(parse_layers(layers)?, parse_minutes(elapsed)?)
            }
            _ => Err(InputError::ArgumentCount(self.usage())),
        }
    }
}

impl Action for Total {
    fn apply(&self, arguments: &str, out: &mut dyn Write) -> io::Result<()> {
        write_result(out, self.compute(arguments))
    }

    fn usage(&self) -> &'static str {
        "total <layers> <elapsed>"
    }

    fn summary(&self) -> &'static str {
        "Print the total minutes spent preparing and baking so far."
    }

    fn details(&self) -> &'static str {
        "Print the minutes spent preparing `layers` layers plus the `elapsed` minutes the lasagna has been in the oven."
    }
}

struct Constants;

impl Action for Constants {
    fn apply(&self, _arguments: &str, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "expected bake time: {EXPECTED_BAKE_TIME}")?;
        writeln!(out, "preparation time per layer: {PREPARATION_TIME}")
    }

    fn usage(&self) -> &'static str {
        "constants"
    }

    fn summary(&self) -> &'static str {
        "Print the fixed bake and per-layer preparation times."
    }
}

const COMMANDS: &[(&str, &dyn Action)] = &[
    ("constants", &Constants),
    ("help", &Help),
    ("prep", &Prep),
    ("remaining", &Remaining),
    ("total", &Total),
];

fn find_command(command: &str) -> Option<&'static dyn Action> {
    COMMANDS
        .iter()
        .find(|(c, _)| c.starts_with(command))
        .map(|&(_, o)| o)
}

fn cli(input: &mut dyn BufRead, out: &mut dyn Write) -> io::Result<()> {
    loop {
        write!(out, "$ ")?;
        out.flush()?;
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            break Ok(());
        }
        let line = line.trim();
        let (command, arguments) = match line.split_once(char::is_whitespace) {
            Some((command, arguments)) => (command, arguments.trim()),
            None if line.is_empty() => continue,
            None => (line, ""),
        };
        match find_command(command) {
            Some(action) => action.apply(arguments, out)?,
            None => Help.apply("", out)?,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Subcommand)]
enum Command {
    /// Print how many minutes the lasagna still has to bake.
    Remaining {
        /// Minutes the lasagna has already spent in the oven.
        #[arg(value_parser = parse_minutes, allow_negative_numbers = true)]
        elapsed: Minutes,
    },
    /// Print how many minutes it takes to prepare the layers.
    Prep {
        /// Number of layers.
        #[arg(value_parser = parse_layers, allow_negative_numbers = true)]
        layers: Layers,
    },
    /// Print the total minutes spent preparing and baking so far.
    Total {
        /// Number of layers.
        #[arg(value_parser = parse_layers, allow_negative_numbers = true)]
        layers: Layers,
        /// Minutes the lasagna has already spent in the oven.
        #[arg(value_parser = parse_minutes, allow_negative_numbers = true)]
        elapsed: Minutes,
    },
}

impl Command {
    fn run(self) -> Result<Minutes, InputError> {
        match self {
            Self::Remaining { elapsed } => remaining(elapsed),
            Self::Prep { layers } => preparation(layers),
            Self::Total { layers, elapsed } => total(layers, elapsed),
        }
    }
}

/// Prints the result of a single subcommand, one integer per line.
fn run_once(command: Command, out: &mut dyn Write) -> io::Result<()> {
    let minutes = command.run().map_err(|e| {
        warn!(%e, ?command, "rejected input");
        e
    })?;
    writeln!(out, "{minutes}")
}

/// Works out lasagna cooking times.
///
/// Without a subcommand, reads commands interactively from stdin.
#[derive(Parser, Debug)]
#[command(name = "lasagna", version)]
struct Args {
    /// Log computations at debug level (overridden by `RUST_LOG`).
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Option<Command>,
}

fn main() -> io::Result<()> {
    let args = Args::parse();
    init_logger(args.verbose);
    debug!(?args, "parsed arguments");
    match args.command {
        Some(command) => run_once(command, &mut io::stdout().lock()),
        None => {
            info!("starting interactive session");
            cli(&mut io::stdin().lock(), &mut io::stdout().lock())
        }
    }
}
