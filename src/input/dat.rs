use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::{DecodeError, Encoding, SampleBuffer};

/// Extension of raw IQ dumps
pub const DAT_EXTENSION: &str = "dat";

/// List `*.dat` files directly inside `dir`, sorted by path
/// Hidden files are skipped and subdirectories are not descended into
pub fn discover_dat_files<P: AsRef<Path>>(dir: P) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();

        let hidden = entry.file_name().to_string_lossy().starts_with('.');
        let is_dat = path.extension().is_some_and(|ext| ext == DAT_EXTENSION);
        if hidden || !is_dat || !path.is_file() {
            continue;
        }

        files.push(path);
    }

    // read_dir order is platform dependent
    files.sort();
    Ok(files)
}

/// Read a headerless IQ dump into memory as a flat element array
pub fn read_samples<P: AsRef<Path>>(path: P, encoding: Encoding) -> Result<SampleBuffer, DecodeError> {
    let bytes = fs::read(path)?;
    SampleBuffer::decode(&bytes, encoding)
}
