use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, error, info, warn};

use crate::input::{discover_dat_files, read_samples, DecodeError, Encoding};
use crate::metadata::Template;
use crate::output::{output_names, to_pretty_json, write_samples, write_sidecar};

/// Failures that abort a whole conversion run
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("Failed to create output directory {}: {source}", path.display())]
    CreateOutputDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to list input directory {}: {source}", path.display())]
    ListInputDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Failures confined to a single input file
#[derive(Debug, thiserror::Error)]
pub enum FileError {
    #[error("{0}")]
    Decode(#[from] DecodeError),

    #[error("File {} contains an odd number of samples ({count}), indicating incomplete data", path.display())]
    OddSampleCount { path: PathBuf, count: usize },

    #[error("{} has no file name", path.display())]
    NoFileName { path: PathBuf },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to serialize metadata, {0}")]
    Serialize(#[from] serde_json::Error),
}

/// One input turned into a `.bin` + `.json` pair
#[derive(Debug, Clone)]
pub struct ConvertedFile {
    pub input: PathBuf,
    pub bin: PathBuf,
    pub json: PathBuf,
    pub pair_count: usize,
}

/// One input that produced no output
#[derive(Debug, Clone)]
pub struct FailedFile {
    pub input: PathBuf,
    pub reason: String,
}

/// What a conversion pass did, file by file
#[derive(Debug, Clone)]
pub struct ConversionReport {
    pub encoding: Encoding,
    pub converted: Vec<ConvertedFile>,
    pub failed: Vec<FailedFile>,
}

impl ConversionReport {
    fn new(encoding: Encoding) -> Self {
        Self {
            encoding,
            converted: Vec::new(),
            failed: Vec::new(),
        }
    }

    /// Number of files converted successfully
    pub fn processed(&self) -> usize {
        self.converted.len()
    }

    pub fn failed_inputs(&self) -> Vec<PathBuf> {
        self.failed.iter().map(|f| f.input.clone()).collect()
    }
}

/// Convert every `*.dat` file in `input_dir` into a SigMF pair in `output_dir`
///
/// Per-file failures are logged and recorded in the report; only problems with
/// the directories themselves are returned as errors.
pub fn convert(
    input_dir: &Path,
    output_dir: &Path,
    template: &Template,
    encoding: Encoding,
) -> Result<ConversionReport, ConvertError> {
    prepare_output_dir(output_dir)?;

    let files = discover_dat_files(input_dir).map_err(|source| ConvertError::ListInputDir {
        path: input_dir.to_path_buf(),
        source,
    })?;

    if files.is_empty() {
        warn!("No .dat files found in {}", input_dir.display());
        return Ok(ConversionReport::new(encoding));
    }

    debug!("Found {} .dat file(s) in {}", files.len(), input_dir.display());
    Ok(convert_files(&files, output_dir, template, encoding))
}

/// Convert an explicit list of input files; `output_dir` must already exist
pub fn convert_files(
    files: &[PathBuf],
    output_dir: &Path,
    template: &Template,
    encoding: Encoding,
) -> ConversionReport {
    let mut report = ConversionReport::new(encoding);

    for (i, path) in files.iter().enumerate() {
        let progress = format!("[{}/{}]", i + 1, files.len());
        debug!("{} Reading {} as {}", progress, path.display(), encoding);

        match convert_file(path, output_dir, template, encoding) {
            Ok(converted) => {
                info!("{} Converted {} to SigMF format", progress, path.display());
                report.converted.push(converted);
            }
            Err(e) => {
                error!("{} Error processing {}: {}", progress, path.display(), e);
                report.failed.push(FailedFile {
                    input: path.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    report
}

/// Create the output directory if needed
pub fn prepare_output_dir(output_dir: &Path) -> Result<(), ConvertError> {
    fs::create_dir_all(output_dir).map_err(|source| ConvertError::CreateOutputDir {
        path: output_dir.to_path_buf(),
        source,
    })
}

fn convert_file(
    input_path: &Path,
    output_dir: &Path,
    template: &Template,
    encoding: Encoding,
) -> Result<ConvertedFile, FileError> {
    let samples = read_samples(input_path, encoding)?;

    if samples.len() % 2 != 0 {
        return Err(FileError::OddSampleCount {
            path: input_path.to_path_buf(),
            count: samples.len(),
        });
    }

    let names = output_names(input_path).ok_or_else(|| FileError::NoFileName {
        path: input_path.to_path_buf(),
    })?;
    let source_name = input_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let bin_path = output_dir.join(&names.bin);
    write_samples(&bin_path, &samples).map_err(|source| FileError::Write {
        path: bin_path.clone(),
        source,
    })?;

    let bin_name = names.bin.to_string_lossy();
    let doc = template.document_for(&source_name, samples.pair_count(), &bin_name);
    let json = to_pretty_json(&doc)?;

    let json_path = output_dir.join(&names.json);
    write_sidecar(&json_path, &json).map_err(|source| FileError::Write {
        path: json_path.clone(),
        source,
    })?;

    Ok(ConvertedFile {
        input: input_path.to_path_buf(),
        bin: bin_path,
        json: json_path,
        pair_count: samples.pair_count(),
    })
}
