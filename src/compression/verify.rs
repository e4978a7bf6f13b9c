use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use log::{debug, info};

use super::compress::pack;
use super::decompress::unpack;
use super::load_image;
use crate::error::Result;
use crate::tools::cli::LzwOpts;
use crate::tools::report::Report;

/// Tells apart the scratch files of files tested at the same time.
static SCRATCH_ID: AtomicUsize = AtomicUsize::new(0);

fn scratch_path() -> PathBuf {
    let id = SCRATCH_ID.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir().join(format!("lzwgray-{}-{}.lzw", std::process::id(), id))
}

/// Round trip one file: compress, store the result, read it back verbatim, decompress and
/// compare with the source. Nothing next to the input is written or removed.
pub fn verify_file(path: &str, opts: &LzwOpts) -> Result<Report> {
    let img = load_image(path, opts)?;
    info!("Testing {} ({} x {})", path, img.rows(), img.cols());

    let packed = pack(&img, opts.format)?;
    let scratch = scratch_path();
    fs::write(&scratch, &packed)?;
    let reloaded = fs::read(&scratch);
    fs::remove_file(&scratch)?;
    let reloaded = reloaded?;
    debug!("Stored and reloaded {} bytes via {}", reloaded.len(), scratch.display());

    let restored = unpack(&reloaded, opts.format, Some((img.rows(), img.cols())))?;

    let mut report = Report::new(path, img.len(), reloaded.len());
    report.identical = Some(restored == img);
    Ok(report)
}
