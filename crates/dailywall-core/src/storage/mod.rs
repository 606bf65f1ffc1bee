//! Image file lifecycle.
//!
//! Bytes stream into `<name>.part` inside the image directory and are
//! renamed onto the final name only after the transfer succeeded.

mod writer;

pub use writer::ImageWriter;

use std::path::{Path, PathBuf};

/// Path for the temp file: appends `.part` to the final path (e.g. `a.jpg` → `a.jpg.part`).
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(".part");
    PathBuf::from(o)
}

/// Final path of `filename` inside `image_dir`, creating the directory if absent.
pub fn prepare_destination(image_dir: &Path, filename: &str) -> std::io::Result<PathBuf> {
    std::fs::create_dir_all(image_dir)?;
    Ok(image_dir.join(filename))
}
