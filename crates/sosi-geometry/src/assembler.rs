// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Geometry Assembler - Dynamic dispatch to geometry builders
//!
//! Routes SOSI records to the builder registered for their group kind and
//! collects the results in a [`GeometryArena`].

use crate::{Error, GeometryArena, Result};
use geo_types::{Geometry, LineString};
use rustc_hash::FxHashMap;
use sosi_model::{GroupKind, RawRecord, RecordSource};
use std::sync::Arc;

/// Geometry builder trait
///
/// Each builder handles one or more SOSI group kinds. Builders only see the
/// record itself; cross-record references are resolved later from the arena.
///
/// # Example
///
/// ```ignore
/// use sosi_geometry::{GeometryAssembler, GeometryBuilder, Result};
///
/// struct FirstCoordinate;
///
/// impl GeometryBuilder for FirstCoordinate {
///     fn build(&self, record: &RawRecord) -> Result<Geometry<f64>> {
///         Ok(Point::from(record.coordinates[0]).into())
///     }
///     fn supported_groups(&self) -> Vec<GroupKind> {
///         vec![GroupKind::Unknown("TRASE".into())]
///     }
/// }
///
/// let mut assembler = GeometryAssembler::with_default_builders();
/// assembler.register(Arc::new(FirstCoordinate));
/// ```
pub trait GeometryBuilder: Send + Sync {
    /// Build the geometry of one record
    ///
    /// # Arguments
    /// * `record` - The decoded record, coordinates already in real-world units
    ///
    /// # Returns
    /// The assembled geometry, or an error if the record cannot produce one
    fn build(&self, record: &RawRecord) -> Result<Geometry<f64>>;

    /// Get supported group kinds
    fn supported_groups(&self) -> Vec<GroupKind>;
}

/// Geometry assembler - routes records to builders
pub struct GeometryAssembler {
    /// Registered builders by group kind
    builders: FxHashMap<GroupKind, Arc<dyn GeometryBuilder>>,
}

impl Default for GeometryAssembler {
    fn default() -> Self {
        Self::with_default_builders()
    }
}

impl GeometryAssembler {
    /// Create an assembler without any builders registered
    pub fn new() -> Self {
        Self {
            builders: FxHashMap::default(),
        }
    }

    /// Create an assembler with the builders for every feature group
    ///
    /// Registers the following builders:
    /// - `PointBuilder` (PUNKT, SYMBOL)
    /// - `LineBuilder` (KURVE, LINJE)
    /// - `ArcBuilder` (BUEP)
    /// - `CircleBuilder` (SIRKELP)
    /// - `TextBuilder` (TEKST)
    pub fn with_default_builders() -> Self {
        use crate::builders::{ArcBuilder, CircleBuilder, LineBuilder, PointBuilder, TextBuilder};

        let mut assembler = Self::new();
        assembler.register(Arc::new(PointBuilder::new()));
        assembler.register(Arc::new(LineBuilder::new()));
        assembler.register(Arc::new(ArcBuilder::new()));
        assembler.register(Arc::new(CircleBuilder::new()));
        assembler.register(Arc::new(TextBuilder::new()));
        assembler
    }

    /// Register a geometry builder
    pub fn register(&mut self, builder: Arc<dyn GeometryBuilder>) {
        for group in builder.supported_groups() {
            self.builders.insert(group, Arc::clone(&builder));
        }
    }

    /// Check if a group kind has a registered builder
    pub fn has_builder(&self, group: &GroupKind) -> bool {
        self.builders.contains_key(group)
    }

    /// Build the geometry of a single record
    pub fn build_record(&self, record: &RawRecord) -> Result<Geometry<f64>> {
        let builder = self
            .builders
            .get(&record.group)
            .ok_or_else(|| Error::unsupported_group(record.group.name()))?;

        match builder.build(record) {
            Err(Error::DegenerateArc(reason)) if record.coordinate_count() >= 2 => {
                log::warn!(
                    "{} {}: {}, using the reference points as a line",
                    record.group,
                    record.serial,
                    reason
                );
                Ok(LineString::new(record.coordinates.clone()).into())
            }
            Err(Error::TooFewCoordinates { found: 2, .. })
                if matches!(record.group, GroupKind::Buep | GroupKind::Sirkelp) =>
            {
                log::warn!(
                    "{} {}: only two reference points, using a straight line",
                    record.group,
                    record.serial
                );
                Ok(LineString::new(record.coordinates.clone()).into())
            }
            other => other,
        }
    }

    /// Build the geometry of every non-polygon record
    ///
    /// Runs once over the whole source so that polygon boundaries can later
    /// reference records in any order. Records whose geometry cannot be
    /// built get no arena entry.
    pub fn assemble(&self, source: &dyn RecordSource) -> GeometryArena {
        let mut arena = GeometryArena::with_capacity(source.len());
        let mut failed = 0usize;

        for record in source.records() {
            if record.group == GroupKind::Flate || !self.has_builder(&record.group) {
                continue;
            }

            match self.build_record(record) {
                Ok(geometry) => arena.insert(record.serial, geometry),
                Err(e) => {
                    failed += 1;
                    log::warn!("{} {}: {}", record.group, record.serial, e);
                }
            }
        }

        log::debug!(
            "Assembled {} geometries ({} records without geometry)",
            arena.len(),
            failed
        );
        arena
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::{coord, Point};
    use sosi_model::{FileMetadata, RingRef, Serial};

    struct VecSource {
        metadata: FileMetadata,
        records: Vec<RawRecord>,
    }

    impl RecordSource for VecSource {
        fn metadata(&self) -> &FileMetadata {
            &self.metadata
        }
        fn len(&self) -> usize {
            self.records.len()
        }
        fn record_at(&self, position: usize) -> Option<&RawRecord> {
            self.records.get(position)
        }
        fn get(&self, serial: Serial) -> Option<&RawRecord> {
            self.records.iter().find(|r| r.serial == serial)
        }
    }

    fn record(serial: u32, group: GroupKind, coords: &[(f64, f64)]) -> RawRecord {
        let mut record = RawRecord::new(Serial(serial), group);
        record.coordinates = coords.iter().map(|&(x, y)| coord! { x: x, y: y }).collect();
        record
    }

    #[test]
    fn test_default_builders_registered() {
        let assembler = GeometryAssembler::with_default_builders();
        assert!(assembler.has_builder(&GroupKind::Punkt));
        assert!(assembler.has_builder(&GroupKind::Buep));
        assert!(!assembler.has_builder(&GroupKind::Flate));
        assert!(!assembler.has_builder(&GroupKind::Unknown("TRASE".into())));
    }

    #[test]
    fn test_unsupported_group() {
        let assembler = GeometryAssembler::new();
        let rec = record(1, GroupKind::Punkt, &[(0.0, 0.0)]);
        assert!(matches!(
            assembler.build_record(&rec),
            Err(Error::UnsupportedGroup(_))
        ));
    }

    #[test]
    fn test_degenerate_arc_falls_back_to_line() {
        let assembler = GeometryAssembler::default();
        let rec = record(1, GroupKind::Buep, &[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)]);
        let geom = assembler.build_record(&rec).unwrap();
        assert_eq!(
            geom,
            Geometry::LineString(LineString::from(vec![(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)]))
        );

        let rec = record(2, GroupKind::Buep, &[(0.0, 0.0), (1.0, 1.0)]);
        assert!(matches!(
            assembler.build_record(&rec),
            Ok(Geometry::LineString(_))
        ));
    }

    #[test]
    fn test_assemble_skips_polygons_and_failures() {
        let mut flate = record(10, GroupKind::Flate, &[(5.0, 5.0)]);
        flate.references.push(RingRef::outer(2));

        let source = VecSource {
            metadata: FileMetadata::default(),
            records: vec![
                record(1, GroupKind::Punkt, &[(1.0, 2.0)]),
                record(2, GroupKind::Kurve, &[(0.0, 0.0), (1.0, 0.0)]),
                record(3, GroupKind::Kurve, &[(0.0, 0.0)]),
                flate,
                record(4, GroupKind::Unknown("TRASE".into()), &[(0.0, 0.0)]),
            ],
        };

        let arena = GeometryAssembler::default().assemble(&source);

        assert_eq!(arena.len(), 2);
        assert_eq!(
            arena.get(Serial(1)),
            Some(&Geometry::Point(Point::new(1.0, 2.0)))
        );
        assert!(arena.contains(Serial(2)));
        assert!(!arena.contains(Serial(3)));
        assert!(!arena.contains(Serial(10)));
    }
}
