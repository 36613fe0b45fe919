use std::fmt;
use std::path::Path;
use std::str::FromStr;

use log::{info, warn};

use crate::converter::{convert, convert_files, ConversionReport, ConvertError};
use crate::input::Encoding;
use crate::metadata::Template;
use crate::output::list_bin_files;

/// When to retry a run with the alternate encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FallbackPolicy {
    /// Rerun every file, but only if the first pass left no `.bin` in the output directory
    #[default]
    Batch,
    /// Rerun only the files that failed in the first pass
    PerFile,
    /// Never retry
    Off,
}

impl fmt::Display for FallbackPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FallbackPolicy::Batch => f.write_str("batch"),
            FallbackPolicy::PerFile => f.write_str("per-file"),
            FallbackPolicy::Off => f.write_str("off"),
        }
    }
}

impl FromStr for FallbackPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "batch" => Ok(FallbackPolicy::Batch),
            "per-file" | "perfile" | "per_file" => Ok(FallbackPolicy::PerFile),
            "off" | "none" => Ok(FallbackPolicy::Off),
            _ => Err(format!("Invalid fallback policy '{}'. Use: batch, per-file, off", s)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FallbackOutcome {
    pub primary: ConversionReport,
    pub retry: Option<ConversionReport>,
}

impl FallbackOutcome {
    pub fn processed(&self) -> usize {
        self.primary.processed() + self.retry.as_ref().map_or(0, |r| r.processed())
    }

    /// Files with no output after all passes
    pub fn failed(&self) -> usize {
        match &self.retry {
            Some(retry) => retry.failed.len(),
            None => self.primary.failed.len(),
        }
    }
}

/// Convert with `primary`, then retry with its alternate according to `policy`
///
/// Each pass writes sidecars whose `core:datatype` names the encoding that
/// pass used.
pub fn run(
    input_dir: &Path,
    output_dir: &Path,
    template: &Template,
    primary: Encoding,
    policy: FallbackPolicy,
) -> Result<FallbackOutcome, ConvertError> {
    info!("Attempting conversion with {} data type...", primary);
    let primary_template = template.with_datatype(primary.datatype_tag());
    let primary_report = convert(input_dir, output_dir, &primary_template, primary)?;

    let alternate = primary.alternate();
    let alternate_template = template.with_datatype(alternate.datatype_tag());

    let retry = match policy {
        FallbackPolicy::Off => None,
        FallbackPolicy::Batch => {
            // A listing error counts as "no output" so the retry still runs
            let produced_any = list_bin_files(output_dir).is_ok_and(|files| !files.is_empty());
            if produced_any {
                None
            } else {
                warn!("No valid output files with {}. Retrying with {}...", primary, alternate);
                Some(convert(input_dir, output_dir, &alternate_template, alternate)?)
            }
        }
        FallbackPolicy::PerFile => {
            let failed = primary_report.failed_inputs();
            if failed.is_empty() {
                None
            } else {
                warn!(
                    "{} file(s) failed with {}. Retrying them with {}...",
                    failed.len(),
                    primary,
                    alternate
                );
                Some(convert_files(&failed, output_dir, &alternate_template, alternate))
            }
        }
    };

    Ok(FallbackOutcome {
        primary: primary_report,
        retry,
    })
}
