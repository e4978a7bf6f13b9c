use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::debug;

use super::GrayImage;
use crate::error::{LzwError, Result};

const MAGIC: &[u8; 2] = b"P5";

/// Read a binary PGM file.
pub fn read_pgm<P: AsRef<Path>>(path: P) -> Result<GrayImage> {
    let bytes = std::fs::read(path.as_ref())?;
    let img = parse_pgm(&bytes)?;
    debug!(
        "Read {} x {} graymap from {}",
        img.rows(),
        img.cols(),
        path.as_ref().display()
    );
    Ok(img)
}

/// Parse a binary PGM: "P5", width, height and maxval separated by whitespace (with # comments
/// running to the end of the line), one whitespace byte, then height rows of width bytes.
pub fn parse_pgm(bytes: &[u8]) -> Result<GrayImage> {
    if bytes.len() < 2 || &bytes[..2] != MAGIC {
        return Err(LzwError::BadImage("not a binary PGM (P5) file".to_string()));
    }
    let mut pos = 2;
    let cols = header_field(bytes, &mut pos, "width")?;
    let rows = header_field(bytes, &mut pos, "height")?;
    let maxval = header_field(bytes, &mut pos, "maxval")?;
    if maxval == 0 || maxval > 255 {
        return Err(LzwError::BadImage(format!(
            "maxval {} is not supported (8-bit graymaps only)",
            maxval
        )));
    }
    // Exactly one whitespace byte separates the header from the pixels.
    match bytes.get(pos) {
        Some(b) if b.is_ascii_whitespace() => pos += 1,
        _ => return Err(LzwError::BadImage("missing whitespace after maxval".to_string())),
    }

    let size = rows
        .checked_mul(cols)
        .ok_or_else(|| LzwError::BadImage(format!("{} x {} is too large", rows, cols)))?;
    let pixels = pos.checked_add(size).and_then(|end| bytes.get(pos..end)).ok_or_else(|| {
        LzwError::BadImage(format!(
            "expected {} pixel bytes, found {}",
            size,
            bytes.len() - pos
        ))
    })?;
    GrayImage::new(rows, cols, pixels.to_vec())
}

/// Skip whitespace and comments, then read one decimal header number.
fn header_field(bytes: &[u8], pos: &mut usize, name: &str) -> Result<usize> {
    loop {
        match bytes.get(*pos) {
            Some(b'#') => {
                while let Some(&b) = bytes.get(*pos) {
                    *pos += 1;
                    if b == b'\n' || b == b'\r' {
                        break;
                    }
                }
            }
            Some(b) if b.is_ascii_whitespace() => *pos += 1,
            _ => break,
        }
    }
    let start = *pos;
    while bytes.get(*pos).map_or(false, |b| b.is_ascii_digit()) {
        *pos += 1;
    }
    std::str::from_utf8(&bytes[start..*pos])
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .ok_or_else(|| LzwError::BadImage(format!("bad or missing {} in PGM header", name)))
}

/// Write a binary PGM (maxval 255).
pub fn write_pgm<W: Write>(img: &GrayImage, writer: &mut W) -> Result<()> {
    write!(writer, "P5\n{} {}\n255\n", img.cols(), img.rows())?;
    writer.write_all(img.data())?;
    Ok(())
}

/// Write a binary PGM to a new file.
pub fn save_pgm<P: AsRef<Path>>(img: &GrayImage, path: P) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_pgm(img, &mut writer)?;
    writer.flush()?;
    Ok(())
}
