//Enable more cargo lint tests
#![warn(rust_2018_idioms)]
#![warn(clippy::disallowed_types)]

use std::process::exit;

use log::{error, info, LevelFilter};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

use lzwgray::compression::run;
use lzwgray::tools::cli::lzwopts_init;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn main() {
    // Available log levels are Error, Warn, Info, Debug, Trace. Logs go to stderr so that -c
    // output on stdout stays clean.
    if TermLogger::init(
        LevelFilter::Trace,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
    .is_err()
    {
        eprintln!("Could not start the terminal logger");
    }

    let options = lzwopts_init();
    if options.files.is_empty() {
        error!("No input files given. Try --help.");
        exit(1);
    }

    //----- Figure how what we need to do and go do it
    let failed = run(&options);
    if failed > 0 {
        error!("{} file(s) failed", failed);
        exit(1);
    }
    info!("Done.\n");
}
