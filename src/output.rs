use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use serde_json::Value;

use crate::input::SampleBuffer;

pub const BIN_EXTENSION: &str = "bin";
pub const JSON_EXTENSION: &str = "json";

/// File names of the pair written for one input
///
/// Kept as paths so names that are not valid UTF-8 map 1:1 onto the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputNames {
    pub bin: PathBuf,
    pub json: PathBuf,
}

/// Derive output names by swapping the input's extension
/// Returns None when the path has no file name
pub fn output_names(input_path: &Path) -> Option<OutputNames> {
    let name = Path::new(input_path.file_name()?);
    Some(OutputNames {
        bin: name.with_extension(BIN_EXTENSION),
        json: name.with_extension(JSON_EXTENSION),
    })
}

/// Write decoded samples back out verbatim (same encoding, native byte order)
pub fn write_samples<P: AsRef<Path>>(path: P, samples: &SampleBuffer) -> io::Result<()> {
    fs::write(path, samples.to_bytes())
}

/// Pretty-print a metadata document with 4-space indentation
pub fn to_pretty_json(doc: &Value) -> Result<Vec<u8>, serde_json::Error> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = Serializer::with_formatter(&mut buf, formatter);
    doc.serialize(&mut ser)?;
    Ok(buf)
}

/// Write a serialized sidecar, replacing any existing file
pub fn write_sidecar<P: AsRef<Path>>(path: P, json: &[u8]) -> io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(json)?;
    file.flush()
}

/// `*.bin` files currently in `dir`
pub fn list_bin_files<P: AsRef<Path>>(dir: P) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == BIN_EXTENSION) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
