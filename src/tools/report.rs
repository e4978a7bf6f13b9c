use std::fmt::{Display, Formatter};
use std::io::{self, Write};

use super::cli::Verbosity;

/// Write a line for the user when the chosen verbosity is at least `this_v`.
/// Accepts both &str and String message.
pub fn report<W: Write, S: Display>(
    out: &mut W,
    verbosity: Verbosity,
    this_v: Verbosity,
    msg: S,
) -> io::Result<()> {
    if verbosity >= this_v {
        writeln!(out, "{}", msg)?;
    }
    Ok(())
}

/// What happened to one file.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    /// File the numbers belong to
    pub name: String,
    /// Pixel bytes in the image
    pub original: usize,
    /// Bytes in the compressed file, header included
    pub compressed: usize,
    /// Result of the round trip comparison, when one was made
    pub identical: Option<bool>,
}

impl Report {
    pub fn new<S: Into<String>>(name: S, original: usize, compressed: usize) -> Self {
        Self {
            name: name.into(),
            original,
            compressed,
            identical: None,
        }
    }

    /// original / compressed, or None for an empty compressed file.
    pub fn ratio(&self) -> Option<f64> {
        if self.compressed == 0 {
            None
        } else {
            Some(self.original as f64 / self.compressed as f64)
        }
    }

    /// False only when a round trip was made and the images differ.
    pub fn is_ok(&self) -> bool {
        self.identical != Some(false)
    }

    /// Print the result line. It is the output of the tool, not a log record, so only -q hides it.
    pub fn print<W: Write>(&self, out: &mut W, verbosity: Verbosity) -> io::Result<()> {
        report(out, verbosity, Verbosity::Errors, self)
    }
}

impl Display for Report {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: original {} bytes, compressed {} bytes",
            self.name, self.original, self.compressed
        )?;
        if let Some(ratio) = self.ratio() {
            write!(f, ", ratio {:.3}", ratio)?;
        }
        match self.identical {
            Some(true) => write!(f, ", images are identical"),
            Some(false) => write!(f, ", images differ"),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod test {
    use super::{report, Report};
    use crate::tools::cli::Verbosity;

    #[test]
    fn ratio_test() {
        let r = Report::new("a.pgm", 1000, 250);
        assert_eq!(r.ratio(), Some(4.0));
        assert!(Report::new("empty.pgm", 0, 0).ratio().is_none());
    }

    #[test]
    fn display_test() {
        let mut r = Report::new("a.pgm", 300, 200);
        assert_eq!(
            r.to_string(),
            "a.pgm: original 300 bytes, compressed 200 bytes, ratio 1.500"
        );
        r.identical = Some(false);
        assert!(r.to_string().ends_with("images differ"));
        assert!(!r.is_ok());
    }

    #[test]
    fn print_test() {
        // Result lines must not depend on the log level.
        log::set_max_level(log::LevelFilter::Off);
        let mut r = Report::new("a.pgm", 300, 200);
        r.identical = Some(true);
        let mut out = Vec::new();
        r.print(&mut out, Verbosity::Warnings).unwrap();
        r.print(&mut out, Verbosity::Errors).unwrap();
        let line = "a.pgm: original 300 bytes, compressed 200 bytes, ratio 1.500, images are identical\n";
        assert_eq!(String::from_utf8(out).unwrap(), line.repeat(2));

        let mut quiet = Vec::new();
        r.print(&mut quiet, Verbosity::Quiet).unwrap();
        assert!(quiet.is_empty());
    }

    #[test]
    fn report_level_test() {
        let mut out = Vec::new();
        report(&mut out, Verbosity::Warnings, Verbosity::Info, "hidden").unwrap();
        assert!(out.is_empty());
        report(&mut out, Verbosity::Debug, Verbosity::Info, String::from("shown")).unwrap();
        assert_eq!(out, b"shown\n");
    }
}
