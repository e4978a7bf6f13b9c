use log::info;

use super::{finish_input, write_output};
use crate::container;
use crate::error::{LzwError, Result};
use crate::image::{pgm::write_pgm, GrayImage};
use crate::lzw;
use crate::tools::cli::{Format, LzwOpts};
use crate::tools::report::Report;

/// Name of the decompressed file: strip `.lzw` and make sure it ends in `.pgm`.
pub fn decompressed_name(path: &str) -> String {
    let base = match path.strip_suffix(".lzw") {
        Some(base) => base.to_string(),
        None => format!("{}.out", path),
    };
    if base.ends_with(".pgm") {
        base
    } else {
        format!("{}.pgm", base)
    }
}

/// Decode bytes in the chosen on-disk format. Raw streams need the extent from the options.
pub fn unpack(bytes: &[u8], format: Format, extent: Option<(usize, usize)>) -> Result<GrayImage> {
    match format {
        Format::Container => container::unwrap(bytes),
        Format::Raw => {
            let (rows, cols) = extent.ok_or(LzwError::MissingOption("--rows and --cols"))?;
            GrayImage::new(rows, cols, lzw::decode(bytes, rows, cols)?)
        }
    }
}

/// Decompress one `.lzw` file to a PGM.
pub fn decompress_file(path: &str, opts: &LzwOpts) -> Result<Report> {
    let packed = std::fs::read(path)?;
    let img = unpack(&packed, opts.format, opts.extent())?;
    info!("Decompressed {} ({} x {})", path, img.rows(), img.cols());

    let mut pgm = Vec::with_capacity(img.len() + 20);
    write_pgm(&img, &mut pgm)?;
    write_output(&decompressed_name(path), &pgm, opts)?;
    finish_input(path, opts)?;
    Ok(Report::new(path, img.len(), packed.len()))
}

#[cfg(test)]
mod test {
    use super::decompressed_name;

    #[test]
    fn names_test() {
        assert_eq!(decompressed_name("a.pgm.lzw"), "a.pgm");
        assert_eq!(decompressed_name("scan.raw.lzw"), "scan.raw.pgm");
        assert_eq!(decompressed_name("mystery"), "mystery.out.pgm");
    }
}
