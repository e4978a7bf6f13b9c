use log::{debug, info};

use super::{finish_input, load_image, write_output};
use crate::container;
use crate::error::Result;
use crate::image::GrayImage;
use crate::lzw;
use crate::tools::cli::{Format, LzwOpts};
use crate::tools::report::Report;

/// Name of the compressed file for an input.
pub fn compressed_name(path: &str) -> String {
    format!("{}.lzw", path)
}

/// Encode an image into the chosen on-disk format.
pub fn pack(img: &GrayImage, format: Format) -> Result<Vec<u8>> {
    match format {
        Format::Container => container::wrap(img),
        Format::Raw => Ok(lzw::encode(img.data())),
    }
}

/// Compress one file to `<file>.lzw`.
pub fn compress_file(path: &str, opts: &LzwOpts) -> Result<Report> {
    let img = load_image(path, opts)?;
    info!("Compressing {} ({} x {})", path, img.rows(), img.cols());

    let packed = pack(&img, opts.format)?;
    debug!("{} packed to {} bytes", path, packed.len());

    write_output(&compressed_name(path), &packed, opts)?;
    finish_input(path, opts)?;
    Ok(Report::new(path, img.len(), packed.len()))
}
