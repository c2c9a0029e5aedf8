// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! File-access trait for reading raw SOSI records

use crate::{FileMetadata, RawRecord, Serial};

/// Sequential and serial-indexed access to the records of one SOSI file
///
/// This trait is the boundary between the file reader and everything that
/// builds features. Implementations must provide O(1) lookup by serial so
/// that boundary references can be resolved cheaply.
///
/// # Example
///
/// ```ignore
/// use sosi_model::{RecordSource, Serial};
///
/// fn describe(source: &dyn RecordSource) {
///     for record in source.records() {
///         println!("{} {}", record.group, record.serial);
///     }
///     if let Some(curve) = source.get(Serial(12)) {
///         println!("{} coordinates", curve.coordinate_count());
///     }
/// }
/// ```
pub trait RecordSource: Send + Sync {
    /// Header metadata (spatial reference, encoding, unit)
    fn metadata(&self) -> &FileMetadata;

    /// Number of records, in file order
    fn len(&self) -> usize;

    /// Whether the file holds no records
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Record at a position in file order
    fn record_at(&self, position: usize) -> Option<&RawRecord>;

    /// Record by serial number
    fn get(&self, serial: Serial) -> Option<&RawRecord>;

    /// Iterate all records in file order
    fn records(&self) -> Box<dyn Iterator<Item = &RawRecord> + '_> {
        Box::new((0..self.len()).filter_map(move |i| self.record_at(i)))
    }
}
