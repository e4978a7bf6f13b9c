//! Single plane 8-bit images: the buffers the codec is fed with and hands back.
//!
//! - GrayImage: rows, columns and exactly rows * cols bytes in row-major order.
//! - pgm: read and write binary portable graymaps (P5).
//!
pub mod pgm;

use std::fs;
use std::path::Path;

use crate::error::{LzwError, Result};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrayImage {
    rows: usize,
    cols: usize,
    data: Vec<u8>,
}

impl GrayImage {
    /// Wrap a row-major buffer. The buffer must hold exactly rows * cols bytes.
    pub fn new(rows: usize, cols: usize, data: Vec<u8>) -> Result<Self> {
        let expected = rows
            .checked_mul(cols)
            .ok_or_else(|| LzwError::BadImage(format!("{} x {} is too large", rows, cols)))?;
        if data.len() != expected {
            return Err(LzwError::BadImage(format!(
                "{} x {} needs {} bytes, found {}",
                rows,
                cols,
                expected,
                data.len()
            )));
        }
        Ok(Self { rows, cols, data })
    }

    /// Read a headerless file of raw pixels. The caller supplies the extent.
    pub fn from_raw<P: AsRef<Path>>(path: P, rows: usize, cols: usize) -> Result<Self> {
        Self::new(rows, cols, fs::read(path)?)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Pixel at (row, col), or None outside the image.
    #[cfg(test)]
    pub(crate) fn get(&self, row: usize, col: usize) -> Option<u8> {
        if row < self.rows && col < self.cols {
            Some(self.data[row * self.cols + col])
        } else {
            None
        }
    }
}

#[cfg(test)]
mod test {
    use super::GrayImage;
    use crate::error::LzwError;

    #[test]
    fn new_test() {
        let img = GrayImage::new(2, 3, vec![1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(img.rows(), 2);
        assert_eq!(img.cols(), 3);
        assert_eq!(img.get(1, 0), Some(4));
        assert_eq!(img.get(0, 2), Some(3));
        assert_eq!(img.get(2, 0), None);
        assert_eq!(img.get(0, 3), None);
    }

    #[test]
    fn bad_length_test() {
        assert!(matches!(
            GrayImage::new(2, 3, vec![0; 5]),
            Err(LzwError::BadImage(_))
        ));
        assert!(matches!(
            GrayImage::new(usize::MAX, 3, vec![]),
            Err(LzwError::BadImage(_))
        ));
    }

    #[test]
    fn empty_test() {
        let img = GrayImage::new(0, 7, vec![]).unwrap();
        assert!(img.is_empty());
        assert_eq!(img.get(0, 0), None);
    }
}
