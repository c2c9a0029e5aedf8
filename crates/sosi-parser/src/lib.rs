// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! SOSI Parser - Native reader for SOSI vector files
//!
//! This crate reads SOSI text files into memory and exposes their groups as
//! raw records through the [`RecordSource`](sosi_model::RecordSource) trait
//! defined in `sosi-model`.
//!
//! # Features
//!
//! - **Character set handling** for UTF-8, ISO8859-1/10, DOSN8 and ND7
//! - **SIMD-accelerated group scanning** using `memchr`
//! - **Line tokenization** using `nom` combinators
//! - **Permissive value coercion** - malformed values become defaults, never errors
//!
//! # Example
//!
//! ```ignore
//! use sosi_parser::SosiReader;
//! use sosi_model::RecordSource;
//!
//! let file = SosiReader::new().read(path)?;
//! for record in file.records() {
//!     println!("{} {} ({} coordinates)", record.group, record.serial, record.coordinate_count());
//! }
//! ```

pub mod charset;
pub mod coerce;
mod decoder;
mod file;
mod header;
mod scanner;
mod tokenizer;

pub use decoder::{CoordTransform, RecordDecoder};
pub use file::SosiFile;
pub use header::{koordsys_to_epsg, parse_header};
pub use scanner::{GroupScanner, GroupSpan};
pub use tokenizer::{split_value, unquote};

use sosi_model::{Result, TextEncoding};
use std::path::Path;

/// SOSI file reader
///
/// Entry point for reading SOSI files into a [`SosiFile`].
#[derive(Clone, Debug, Default)]
pub struct SosiReader {
    /// Character set to decode with instead of the declared one
    pub encoding: Option<TextEncoding>,
}

impl SosiReader {
    /// Create a reader that honours the file's `..TEGNSETT`
    pub fn new() -> Self {
        Self::default()
    }

    /// Force a character set regardless of the file header
    pub fn with_encoding(mut self, encoding: Option<TextEncoding>) -> Self {
        self.encoding = encoding;
        self
    }

    /// Read a file from disk
    pub fn read(&self, path: &Path) -> Result<SosiFile> {
        SosiFile::open(path, self.encoding)
    }

    /// Read a file already loaded into memory
    pub fn read_bytes(&self, bytes: &[u8]) -> Result<SosiFile> {
        SosiFile::from_bytes(bytes, self.encoding)
    }
}

/// Quick parse function for simple use cases
pub fn parse(bytes: &[u8]) -> Result<SosiFile> {
    SosiReader::new().read_bytes(bytes)
}
