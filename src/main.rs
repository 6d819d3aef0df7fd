//Enable more cargo lint tests
#![warn(rust_2018_idioms)]

use huffman::tools::cli::{huffopts_init, Mode};
use huffman::{compress_file, decompress_file, HuffError};

use log::{info, LevelFilter};
use simplelog::{Config, TermLogger, TerminalMode};

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn main() -> Result<(), HuffError> {
    // Available log levels are Error, Warn, Info, Debug, Trace
    TermLogger::init(
        LevelFilter::Trace,
        Config::default(),
        TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )
    .unwrap();

    let options = huffopts_init()?;
    log::set_max_level(options.verbose.level_filter());
    info!("Verbosity set to {:?}", options.verbose);
    info!("Operational mode set to {}", options.op_mode);

    //----- Figure how what we need to do and go do it
    match options.op_mode {
        Mode::Zip => {
            compress_file(&options.input, &options.output)?;
        }
        Mode::Unzip => {
            decompress_file(&options.input, &options.output)?;
        }
    }

    info!("Done.");
    Ok(())
}
