//! Convert raw interleaved IQ dumps into SigMF sample + metadata pairs.
//!
//! Each `*.dat` file in an input directory is read as a flat array of
//! float16 or float32 elements (I and Q interleaved, native byte order, no
//! header), copied verbatim to `<name>.bin` and described by a `<name>.json`
//! sidecar derived from a [`metadata::Template`].

pub mod converter;
pub mod fallback;
pub mod input;
pub mod metadata;
pub mod output;

pub use converter::{convert, ConversionReport, ConvertError};
pub use fallback::{FallbackOutcome, FallbackPolicy};
pub use input::{Encoding, SampleBuffer};
pub use metadata::{default_template, Template};
