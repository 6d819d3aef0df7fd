use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::process::exit;
use std::{fmt::Display, fmt::Formatter};

use clap::Parser;
use log::LevelFilter;

use crate::error::{HuffError, Result};

/// Verbosity of user information
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Errors,
    Warnings,
    Info,
    Debug,
    Trace,
}

impl Verbosity {
    /// Map the numeric -v level (0-5, anything higher is Trace).
    pub fn from_level(level: u8) -> Self {
        match level {
            0 => Verbosity::Quiet,
            1 => Verbosity::Errors,
            2 => Verbosity::Warnings,
            3 => Verbosity::Info,
            4 => Verbosity::Debug,
            _ => Verbosity::Trace,
        }
    }

    pub fn level_filter(self) -> LevelFilter {
        match self {
            Verbosity::Quiet => LevelFilter::Off,
            Verbosity::Errors => LevelFilter::Error,
            Verbosity::Warnings => LevelFilter::Warn,
            Verbosity::Info => LevelFilter::Info,
            Verbosity::Debug => LevelFilter::Debug,
            Verbosity::Trace => LevelFilter::Trace,
        }
    }
}

/// Compress or decompress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Zip,
    Unzip,
}

impl Mode {
    /// Interpret the answer to the mode prompt: 1 compresses, 2 decompresses.
    pub fn from_selector(selector: &str) -> Result<Self> {
        match selector.trim() {
            "1" => Ok(Mode::Zip),
            "2" => Ok(Mode::Unzip),
            other => Err(HuffError::InvalidMode(other.to_string())),
        }
    }
}

impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Command Line Interpretation - uses external CLAP crate.
#[derive(Parser, Debug)]
#[clap(
    version,
    about = "Compress or decompress a file with huffman coding",
    long_about = "
    Reads INPUT and writes OUTPUT. After starting, the program asks whether to
    compress (1) or decompress (2).

    The compressed file holds the huffman tree, a padding count and the encoded data."
)]
pub struct Args {
    /// File to read
    #[clap()]
    input: PathBuf,

    /// File to write
    #[clap()]
    output: PathBuf,

    /// Sets verbosity. -v0 is silent, -v5 is chatty
    #[clap(short = 'v', default_value_t = 3)]
    v: u8,
}

impl Args {
    /// Combine the parsed arguments with the mode picked at the prompt.
    pub fn into_opts(self, op_mode: Mode) -> HuffOpts {
        HuffOpts {
            input: self.input,
            output: self.output,
            op_mode,
            verbose: Verbosity::from_level(self.v),
        }
    }
}

#[derive(Debug)]
pub struct HuffOpts {
    /// File to read for input
    pub input: PathBuf,
    /// File to write the result to
    pub output: PathBuf,
    /// Compress/Decompress
    pub op_mode: Mode,
    /// Verbosity of user information
    pub verbose: Verbosity,
}

const PROMPT: &str = "Please select the mode:\n 1. compress\n 2. decompress";

/// Print the mode prompt and read the answer from one line of input.
pub fn read_mode<R: BufRead, W: Write>(mut input: R, mut prompt: W) -> Result<Mode> {
    writeln!(prompt, "{}", PROMPT)?;
    prompt.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Mode::from_selector(&line)
}

/// Parse the command line and ask for the mode. A wrong argument count prints usage and exits
/// with status 1.
pub fn huffopts_init() -> Result<HuffOpts> {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            // --help and --version are not failures
            if !e.use_stderr() {
                e.exit();
            }
            eprintln!("{}", e);
            exit(1);
        }
    };

    let stdin = std::io::stdin();
    let op_mode = read_mode(stdin.lock(), std::io::stdout())?;
    Ok(args.into_opts(op_mode))
}
