//! The compression module drives the codec over files for the command line tool.
//!
//! - compress: read a PGM (or raw pixels of a known extent), encode it, write `<file>.lzw`.
//! - decompress: read a `.lzw` file, decode it, write a PGM.
//! - verify: compress, store and reload the result, decompress, and compare with the source.
//!
//! Each file is handled on its own, so several files are processed in parallel. Every call
//! builds its own dictionaries; nothing is shared between them.
//!
pub mod compress;
pub mod decompress;
pub mod verify;

use std::fs::{self, OpenOptions};
use std::io::{self, Write};

use log::{error, info, warn};
use rayon::prelude::*;

use crate::error::Result;
use crate::image::{pgm::read_pgm, GrayImage};
use crate::tools::cli::{LzwOpts, Mode, Output, Verbosity};
use crate::tools::report::{report, Report};

/// Process every file named in the options. Returns the number of files that failed.
pub fn run(opts: &LzwOpts) -> usize {
    let results: Vec<(&String, Result<Report>)> = opts
        .files
        .par_iter()
        .map(|file| {
            let result = match opts.op_mode {
                Mode::Zip => compress::compress_file(file, opts),
                Mode::Unzip => decompress::decompress_file(file, opts),
                Mode::Test => verify::verify_file(file, opts),
            };
            (file, result)
        })
        .collect();

    // Results go to stderr; stdout may be carrying -c output.
    let stderr = io::stderr();
    let mut out = stderr.lock();
    let mut failed = 0;
    for (file, result) in results {
        match result {
            Ok(summary) => {
                if !summary.is_ok() {
                    error!("{}: round trip changed the image", file);
                    failed += 1;
                }
                if let Err(e) = summary.print(&mut out, opts.verbose) {
                    error!("Could not write the report for {}: {}", file, e);
                }
            }
            Err(e) => {
                error!("{}: {}", file, e);
                failed += 1;
            }
        }
    }
    let done = format!("{} of {} files done", opts.files.len() - failed, opts.files.len());
    if let Err(e) = report(&mut out, opts.verbose, Verbosity::Info, done) {
        error!("Could not write the summary: {}", e);
    }
    failed
}

/// Load the source image: raw pixels when the extent was given, a PGM otherwise.
pub(crate) fn load_image(path: &str, opts: &LzwOpts) -> Result<GrayImage> {
    match opts.extent() {
        Some((rows, cols)) => GrayImage::from_raw(path, rows, cols),
        None => read_pgm(path),
    }
}

/// Write the finished output, refusing to replace an existing file unless forced.
pub(crate) fn write_output(path: &str, data: &[u8], opts: &LzwOpts) -> Result<()> {
    match opts.output {
        Output::Stdout => {
            // One locked write per file keeps parallel outputs from interleaving.
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(data)?;
            handle.flush()?;
        }
        Output::File => {
            let mut f_out = if opts.force_overwrite {
                OpenOptions::new()
                    .write(true)
                    .create(true)
                    .truncate(true)
                    .open(path)?
            } else {
                OpenOptions::new().write(true).create_new(true).open(path)?
            };
            write_or_remove(path, &mut f_out, data)?;
            info!("Wrote {} bytes to {}", data.len(), path);
        }
    }
    Ok(())
}

/// Write everything to a freshly opened output, deleting the file if the write fails so a
/// partial file is never left behind.
fn write_or_remove<W: Write>(path: &str, f_out: &mut W, data: &[u8]) -> Result<()> {
    if let Err(e) = f_out.write_all(data).and_then(|_| f_out.flush()) {
        error!("Write to {} failed, removing it", path);
        if let Err(rm) = fs::remove_file(path) {
            warn!("Could not remove {}: {}", path, rm);
        }
        return Err(e.into());
    }
    Ok(())
}

/// Remove the input once its output is safely written, unless told to keep it.
pub(crate) fn finish_input(path: &str, opts: &LzwOpts) -> Result<()> {
    if !opts.keep_input_files && opts.output == Output::File {
        fs::remove_file(path)?;
        info!("Removed input file {}", path);
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::write_or_remove;
    use std::fs;
    use std::io::{self, Write};

    /// Takes a few bytes, then reports a full disk.
    struct FullDisk {
        room: usize,
    }

    impl Write for FullDisk {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.room == 0 {
                return Err(io::Error::new(io::ErrorKind::Other, "no space left"));
            }
            let n = buf.len().min(self.room);
            self.room -= n;
            Ok(n)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn failed_write_removes_output_test() {
        let path = std::env::temp_dir().join(format!("lzwgray-partial-{}.lzw", std::process::id()));
        fs::write(&path, b"partial").unwrap();
        let name = path.to_str().unwrap();

        let mut f_out = FullDisk { room: 4 };
        assert!(write_or_remove(name, &mut f_out, &[0; 16]).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn good_write_keeps_output_test() {
        let path = std::env::temp_dir().join(format!("lzwgray-whole-{}.lzw", std::process::id()));
        fs::write(&path, b"").unwrap();
        let name = path.to_str().unwrap();

        let mut sink = Vec::new();
        write_or_remove(name, &mut sink, &[7; 16]).unwrap();
        assert_eq!(sink, vec![7; 16]);
        assert!(path.exists());
        fs::remove_file(&path).unwrap();
    }
}
