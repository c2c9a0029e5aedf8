// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Polygon ring resolution from `..REF` lists

use crate::GeometryArena;
use geo_types::{Coord, LineString, Polygon};
use sosi_model::{RawRecord, RingRef};

/// Concatenate the geometries referenced by one ring, in listed order
///
/// Reversed references contribute their coordinates backwards. Serials
/// missing from the arena contribute nothing.
pub fn resolve_ring<'a>(
    refs: impl IntoIterator<Item = &'a RingRef>,
    arena: &GeometryArena,
) -> Vec<Coord<f64>> {
    let mut ring = Vec::new();

    for r in refs {
        let Some(mut coords) = arena.coordinates(r.serial) else {
            log::warn!("Polygon boundary references missing serial {}", r.serial);
            continue;
        };
        if r.reversed {
            coords.reverse();
        }
        ring.extend(coords);
    }

    ring
}

/// Resolve a `.FLATE` record into a polygon
///
/// Ring 0 is the exterior, higher rings are islands in file order. Returns
/// `None` when the exterior resolves to no coordinates at all.
pub fn resolve_polygon(record: &RawRecord, arena: &GeometryArena) -> Option<Polygon<f64>> {
    let mut rings = (0..record.ring_count())
        .map(|ring| resolve_ring(record.references.iter().filter(|r| r.ring == ring), arena));
    let exterior = rings.next().filter(|c| !c.is_empty());
    let Some(exterior) = exterior else {
        log::warn!("{} {} has no resolvable outer boundary", record.group, record.serial);
        return None;
    };

    let interiors = rings
        .filter(|c| !c.is_empty())
        .map(LineString::new)
        .collect();

    Some(Polygon::new(LineString::new(exterior), interiors))
}
