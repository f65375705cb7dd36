//! Disk loaders for cloudview
//!
//! Two small text-array readers: point clouds as `x y z [r g b]` lines
//! and camera poses as one row-major 4x4 matrix per line. Fields may be
//! separated by whitespace or commas; `#` starts a comment.

pub mod poses;
pub mod xyz;

pub use poses::*;
pub use xyz::*;

use cloudview_core::{Error, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Open a file for buffered reading, reporting a missing path as a
/// typed [`Error::FileNotFound`] rather than a bare I/O error.
pub(crate) fn open_reader(path: &Path) -> Result<BufReader<File>> {
    match File::open(path) {
        Ok(file) => Ok(BufReader::new(file)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(Error::FileNotFound(path.to_path_buf()))
        }
        Err(e) => Err(e.into()),
    }
}

/// Split a data line into numeric tokens, treating commas as separators
pub(crate) fn split_fields(line: &str) -> impl Iterator<Item = &str> {
    line.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
}

/// Lines that carry no data: blank or `#` comments
pub(crate) fn is_skippable(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty() || trimmed.starts_with('#')
}
