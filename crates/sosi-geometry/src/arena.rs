// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Serial-indexed store of assembled geometries

use geo_types::{Coord, Geometry};
use rustc_hash::FxHashMap;
use sosi_model::Serial;

/// Assembled geometries keyed by record serial
///
/// References between records are plain serial lookups into this table; a
/// serial with no entry is simply missing. Polygon boundaries are never
/// stored here, they are resolved from their references on demand.
#[derive(Clone, Debug, Default)]
pub struct GeometryArena {
    geometries: FxHashMap<Serial, Geometry<f64>>,
}

impl GeometryArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an arena with room for `capacity` geometries
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            geometries: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Store a geometry; an existing entry for the serial is replaced
    pub fn insert(&mut self, serial: Serial, geometry: Geometry<f64>) {
        self.geometries.insert(serial, geometry);
    }

    /// Get the geometry of a serial
    pub fn get(&self, serial: Serial) -> Option<&Geometry<f64>> {
        self.geometries.get(&serial)
    }

    pub fn contains(&self, serial: Serial) -> bool {
        self.geometries.contains_key(&serial)
    }

    pub fn len(&self) -> usize {
        self.geometries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.geometries.is_empty()
    }

    /// Coordinate sequence of a stored geometry, in order
    ///
    /// Points give one coordinate, line strings and multipoints all of
    /// theirs. Returns `None` for missing serials.
    pub fn coordinates(&self, serial: Serial) -> Option<Vec<Coord<f64>>> {
        let coords = match self.get(serial)? {
            Geometry::Point(p) => vec![p.0],
            Geometry::LineString(line) => line.0.clone(),
            Geometry::MultiPoint(points) => points.iter().map(|p| p.0).collect(),
            other => {
                log::debug!("Serial {} holds an unexpected {:?}", serial, other);
                Vec::new()
            }
        };
        Some(coords)
    }
}
