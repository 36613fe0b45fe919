//! SigMF metadata templates and the per-file documents derived from them.

use std::fs;
use std::path::Path;

use serde_json::{json, Map, Value};

pub const GLOBAL: &str = "global";
pub const CAPTURES: &str = "captures";
pub const ANNOTATIONS: &str = "annotations";

pub const DATATYPE_KEY: &str = "core:datatype";
pub const DESCRIPTION_KEY: &str = "core:description";
pub const SAMPLE_COUNT_KEY: &str = "core:sample_count";
pub const FILE_NAME_KEY: &str = "core:file_name";

#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("Template must be a JSON object")]
    NotAnObject,

    #[error("Template is missing the '{0}' section (or it is not an object)")]
    MissingSection(&'static str),

    #[error("Failed to parse template, {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Io(#[from] std::io::Error),
}

/// Metadata shared by every sidecar of a run
///
/// Holds a JSON object with `global`, `captures` and `annotations` objects.
/// A template is never modified by conversion: each input file gets its own
/// deep copy via [`Template::document_for`].
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    root: Map<String, Value>,
}

impl Template {
    pub fn from_value(value: Value) -> Result<Self, TemplateError> {
        let Value::Object(root) = value else {
            return Err(TemplateError::NotAnObject);
        };

        for section in [GLOBAL, CAPTURES, ANNOTATIONS] {
            if !root.get(section).is_some_and(Value::is_object) {
                return Err(TemplateError::MissingSection(section));
            }
        }

        Ok(Self { root })
    }

    pub fn from_json_str(s: &str) -> Result<Self, TemplateError> {
        Self::from_value(serde_json::from_str(s)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, TemplateError> {
        Self::from_json_str(&fs::read_to_string(path)?)
    }

    /// Copy of this template declaring `tag` as `global.core:datatype`
    pub fn with_datatype(&self, tag: &str) -> Self {
        let mut template = self.clone();
        template.set(GLOBAL, DATATYPE_KEY, json!(tag));
        template
    }

    pub fn datatype(&self) -> Option<&str> {
        self.root
            .get(GLOBAL)
            .and_then(|global| global.get(DATATYPE_KEY))
            .and_then(Value::as_str)
    }

    /// Per-file sidecar document: the template with description, sample
    /// count and binary file name filled in
    pub fn document_for(&self, source_name: &str, pair_count: usize, bin_name: &str) -> Value {
        let mut doc = self.clone();
        doc.set(
            GLOBAL,
            DESCRIPTION_KEY,
            json!(format!("SigMF file generated from {}", source_name)),
        );
        doc.set(ANNOTATIONS, SAMPLE_COUNT_KEY, json!(pair_count));
        doc.set(CAPTURES, FILE_NAME_KEY, json!(bin_name));
        Value::Object(doc.root)
    }

    pub fn as_value(&self) -> Value {
        Value::Object(self.root.clone())
    }

    // Sections are checked to be objects in from_value
    fn set(&mut self, section: &str, key: &str, value: Value) {
        if let Some(section) = self.root.get_mut(section).and_then(Value::as_object_mut) {
            section.insert(key.to_string(), value);
        }
    }
}

impl Default for Template {
    fn default() -> Self {
        default_template()
    }
}

/// Metadata describing the srsRAN OTA 5G testbed recordings
pub fn default_template() -> Template {
    let mut root = Map::new();
    root.insert(
        GLOBAL.to_string(),
        json!({
            "core:datatype": "cf32_le",
            "core:sample_rate": 23.04e6,
            "core:version": "0.0.1",
            "core:author": "ZTX",
            "core:description": "IQ samples from the srsRAN OTA 5G testbed setup.",
            "hardware": {
                "usrp_model": "USRP B210",
                "frequency_range": "70 MHz to 6 GHz",
                "clock_source": "CDA-2990 external clock"
            },
            "software": {
                "srsran_version": "v24.04",
                "open5gs_version": "v2.7.0",
                "uhd_version": "Latest compatible",
                "operating_system": "Ubuntu 22.04",
                "computer_specs": {
                    "ue1": { "cpu": "AMD Ryzen 7 7745HX", "ram": "16GB" },
                    "ue2": { "cpu": "Intel Core i9-11900K", "ram": "16GB" },
                    "gnb": { "cpu": "Intel Core i9-11900K", "ram": "16GB" }
                }
            }
        }),
    );
    root.insert(
        CAPTURES.to_string(),
        json!({
            "core:sample_start": 0,
            "core:center_frequency": 3500000000u64,
            "core:file_name": "",
            "measurement_setup": {
                "distance_from_source": "1 meter",
                "environment": "Open Air Experiment",
                "source_signal": "USRP Tx using srsRAN",
                "subcarrier_spacing": "15 kHz",
                "bandwidth": "10 MHz",
                "gain_settings": {
                    "tx_gain": 60,
                    "rx_gain": 40
                }
            }
        }),
    );
    root.insert(
        ANNOTATIONS.to_string(),
        json!({
            "core:sample_start": 0,
            "core:sample_count": 0,
            "core:environment": "Laboratory setup for OTA 5G testbed testing",
            "notes": "Collected from srsRAN 5G OTA testbed using Open5GS and USRP B210."
        }),
    );
    Template { root }
}
