pub mod dat;

use std::fmt;
use std::str::FromStr;

use half::f16;

pub use dat::{discover_dat_files, read_samples};

/// Numeric encoding of the raw sample files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Float16,
    Float32,
}

impl Encoding {
    /// Width of one element (a single I or Q value) in bytes
    pub fn bytes_per_element(&self) -> usize {
        match self {
            Encoding::Float16 => 2,
            Encoding::Float32 => 4,
        }
    }

    /// SigMF `core:datatype` tag for this encoding in host byte order
    pub fn datatype_tag(&self) -> &'static str {
        match (self, cfg!(target_endian = "little")) {
            (Encoding::Float16, true) => "cf16_le",
            (Encoding::Float16, false) => "cf16_be",
            (Encoding::Float32, true) => "cf32_le",
            (Encoding::Float32, false) => "cf32_be",
        }
    }

    /// The encoding tried when this one produced nothing
    pub fn alternate(&self) -> Encoding {
        match self {
            Encoding::Float16 => Encoding::Float32,
            Encoding::Float32 => Encoding::Float16,
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Encoding::Float16 => f.write_str("float16"),
            Encoding::Float32 => f.write_str("float32"),
        }
    }
}

impl FromStr for Encoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "float16" | "f16" | "cf16" => Ok(Encoding::Float16),
            "float32" | "f32" | "cf32" => Ok(Encoding::Float32),
            _ => Err(format!("Invalid encoding '{}'. Use: float16, float32", s)),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{len} bytes is not a whole number of {width}-byte elements")]
    TruncatedElement { len: usize, width: usize },
}

/// Flat array of decoded elements, I and Q interleaved
#[derive(Debug, Clone, PartialEq)]
pub enum SampleBuffer {
    Float16(Vec<f16>),
    Float32(Vec<f32>),
}

impl SampleBuffer {
    /// Decode a raw native-endian buffer; the whole body is sample data
    pub fn decode(bytes: &[u8], encoding: Encoding) -> Result<Self, DecodeError> {
        let width = encoding.bytes_per_element();
        if bytes.len() % width != 0 {
            return Err(DecodeError::TruncatedElement {
                len: bytes.len(),
                width,
            });
        }

        let buffer = match encoding {
            Encoding::Float16 => SampleBuffer::Float16(
                bytes
                    .chunks_exact(2)
                    .map(|chunk| f16::from_ne_bytes([chunk[0], chunk[1]]))
                    .collect(),
            ),
            Encoding::Float32 => SampleBuffer::Float32(
                bytes
                    .chunks_exact(4)
                    .map(|chunk| f32::from_ne_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
                    .collect(),
            ),
        };

        Ok(buffer)
    }

    pub fn encoding(&self) -> Encoding {
        match self {
            SampleBuffer::Float16(_) => Encoding::Float16,
            SampleBuffer::Float32(_) => Encoding::Float32,
        }
    }

    /// Number of elements (I and Q values counted separately)
    pub fn len(&self) -> usize {
        match self {
            SampleBuffer::Float16(v) => v.len(),
            SampleBuffer::Float32(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of complete I/Q pairs
    pub fn pair_count(&self) -> usize {
        self.len() / 2
    }

    /// Re-serialize in the same encoding and byte order, bit for bit
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            SampleBuffer::Float16(v) => v.iter().flat_map(|s| s.to_ne_bytes()).collect(),
            SampleBuffer::Float32(v) => v.iter().flat_map(|s| s.to_ne_bytes()).collect(),
        }
    }
}
