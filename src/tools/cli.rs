use clap::Parser;
use log::{info, warn};
use std::{fmt::Display, fmt::Formatter};

/// Verbosity of user information
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    Quiet,
    Errors,
    Warnings,
    Info,
    Debug,
    Trace,
}

impl Verbosity {
    pub fn level_filter(self) -> log::LevelFilter {
        match self {
            Verbosity::Quiet => log::LevelFilter::Off,
            Verbosity::Errors => log::LevelFilter::Error,
            Verbosity::Warnings => log::LevelFilter::Warn,
            Verbosity::Info => log::LevelFilter::Info,
            Verbosity::Debug => log::LevelFilter::Debug,
            Verbosity::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Zip, Unzip, Test
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Zip,
    Unzip,
    Test,
}
impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Define the two output channels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    File,
    Stdout,
}
impl Display for Output {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Layout of compressed files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// LZWG header with the image extent, then the stream
    Container,
    /// Bare stream; the extent must be given with --rows and --cols
    Raw,
}

#[derive(Debug)]
pub struct LzwOpts {
    /// Vec of names of files to read for input
    pub files: Vec<String>,
    /// Silently overwrite existing files with the same name
    pub force_overwrite: bool,
    /// Don't remove input files after processing
    pub keep_input_files: bool,
    /// Compress/Decompress/Test
    pub op_mode: Mode,
    /// Location where output is sent
    pub output: Output,
    /// Container or headerless stream
    pub format: Format,
    /// Image rows, for raw pixel input and raw streams
    pub rows: Option<usize>,
    /// Image columns, for raw pixel input and raw streams
    pub cols: Option<usize>,
    /// Verbosity of user information
    pub verbose: Verbosity,
}

impl LzwOpts {
    pub fn new() -> Self {
        Self {
            files: vec![],
            force_overwrite: false,
            keep_input_files: false,
            op_mode: Mode::Zip,
            output: Output::File,
            format: Format::Container,
            rows: None,
            cols: None,
            verbose: Verbosity::Warnings,
        }
    }

    /// Both dimensions, when the user gave them.
    pub fn extent(&self) -> Option<(usize, usize)> {
        self.rows.zip(self.cols)
    }

    /// Copy the parsed command line into the options.
    pub fn from_args(args: Args) -> Self {
        let mut opts = Self::new();
        opts.files = args.files;
        if args.compress {
            opts.op_mode = Mode::Zip
        };
        if args.decompress {
            opts.op_mode = Mode::Unzip
        };
        if args.test {
            opts.op_mode = Mode::Test
        };
        opts.force_overwrite = args.force;
        opts.keep_input_files = args.keep;
        if args.stdout {
            opts.output = Output::Stdout
        };
        if args.raw {
            opts.format = Format::Raw
        };
        opts.rows = args.rows;
        opts.cols = args.cols;
        opts.verbose = match args.v {
            0 => Verbosity::Quiet,
            1 => Verbosity::Errors,
            2 => Verbosity::Warnings,
            3 => Verbosity::Info,
            4 => Verbosity::Debug,
            _ => Verbosity::Trace,
        };
        if args.quiet {
            opts.verbose = Verbosity::Quiet
        };
        opts
    }
}

impl Default for LzwOpts {
    fn default() -> Self {
        Self::new()
    }
}

/// Command Line Interpretation - uses external CLAP crate.
#[derive(Parser, Debug)]
#[clap(
    version,
    about = "LZW compression for 8-bit grayscale images",
    long_about = "
    Compresses binary PGM (P5) images, or raw 8-bit pixel files when --rows and --cols are
    given, with an adaptive LZW coder. Compressed files get the .lzw extension and carry a
    small header with the image size, unless --raw is used.

    Test mode compresses each file, stores and reloads the result, decompresses it, and
    reports the compression ratio and whether the image came back unchanged."
)]
pub struct Args {
    /// Files to process
    #[clap()]
    files: Vec<String>,

    /// Compress the input files (default)
    #[clap(short = 'z', long = "compress")]
    compress: bool,

    /// Decompress the input files
    #[clap(short = 'd', long = "decompress")]
    decompress: bool,

    /// Round trip each file and report the result
    #[clap(short = 't', long = "test")]
    test: bool,

    /// Force overwriting output files
    #[clap(short = 'f', long = "force")]
    force: bool,

    /// Keep input files
    #[clap(short = 'k', long = "keep")]
    keep: bool,

    /// Send output to stdout
    #[clap(short = 'c', long = "stdout")]
    stdout: bool,

    /// Write (or read) the bare stream, without the size header
    #[clap(long = "raw")]
    raw: bool,

    /// Image rows for raw input
    #[clap(long)]
    rows: Option<usize>,

    /// Image columns for raw input
    #[clap(long)]
    cols: Option<usize>,

    /// Sets verbosity. -v0 is silent, -v5 is chatty
    #[clap(short = 'v', default_value_t = 2)]
    v: u8,

    /// Suppress all messages (same as -v0)
    #[clap(short = 'q', long = "quiet")]
    quiet: bool,
}

/// Parse the command line, set the log level and report what we are about to do.
pub fn lzwopts_init() -> LzwOpts {
    let opts = LzwOpts::from_args(Args::parse());

    // Set the log level
    log::set_max_level(opts.verbose.level_filter());

    // Below we report initialization status to the user
    info!("---- lzwgray Initialization Start ----");
    info!("Verbosity set to {}", log::max_level());
    info!("Operational mode set to {}", opts.op_mode);
    info!("Output set to {}", opts.output);
    info!("Compressed format is {:?}", opts.format);
    if let Some((rows, cols)) = opts.extent() {
        info!("Raw image extent {} x {}", rows, cols)
    } else if opts.rows.is_some() || opts.cols.is_some() {
        warn!("Only one of --rows/--cols given; both are needed for raw data")
    };
    if opts.force_overwrite {
        info!("Forcing file overwriting")
    };
    if opts.keep_input_files {
        info!("Keeping input files")
    };
    info!("---- lzwgray Initialization End ----\n");
    opts
}

#[cfg(test)]
mod test {
    use super::{Args, Format, LzwOpts, Mode, Output, Verbosity};
    use clap::Parser;

    fn parse(argv: &[&str]) -> LzwOpts {
        LzwOpts::from_args(Args::try_parse_from(argv).unwrap())
    }

    #[test]
    fn defaults_test() {
        let opts = parse(&["lzwgray", "a.pgm"]);
        assert_eq!(opts.files, vec!["a.pgm".to_string()]);
        assert_eq!(opts.op_mode, Mode::Zip);
        assert_eq!(opts.output, Output::File);
        assert_eq!(opts.format, Format::Container);
        assert_eq!(opts.verbose, Verbosity::Warnings);
        assert_eq!(opts.extent(), None);
        assert!(!opts.force_overwrite);
        assert!(!opts.keep_input_files);
    }

    #[test]
    fn flags_test() {
        let opts = parse(&[
            "lzwgray", "-d", "-k", "-f", "-c", "--raw", "--rows", "16", "--cols", "32", "-v", "4",
            "x.lzw", "y.lzw",
        ]);
        assert_eq!(opts.op_mode, Mode::Unzip);
        assert_eq!(opts.output, Output::Stdout);
        assert_eq!(opts.format, Format::Raw);
        assert_eq!(opts.extent(), Some((16, 32)));
        assert_eq!(opts.verbose, Verbosity::Debug);
        assert_eq!(opts.files.len(), 2);
        assert!(opts.force_overwrite && opts.keep_input_files);
    }

    #[test]
    fn test_mode_wins_test() {
        let opts = parse(&["lzwgray", "-z", "-t", "-q", "a.pgm"]);
        assert_eq!(opts.op_mode, Mode::Test);
        assert_eq!(opts.verbose, Verbosity::Quiet);
    }

    #[test]
    fn half_extent_test() {
        let opts = parse(&["lzwgray", "--rows", "4", "a.raw"]);
        assert_eq!(opts.extent(), None);
    }
}
