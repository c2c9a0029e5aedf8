// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-class feature cursors
//!
//! A [`SosiLayer`] walks the records of the file in order and emits the ones
//! that belong to its geometry class. Geometries come from the arena built at
//! open time; polygon rings are resolved here, on emission.

use crate::attributes::apply_attributes;
use crate::registry::TypeRegistry;
use crate::schema::SchemaBuilder;
use geo_types::{Coord, Geometry, Rect};
use sosi_geometry::{resolve_polygon, GeometryArena, GeometryAssembler};
use sosi_model::{
    Capability, Feature, GeometryClass, Layer, LayerDefn, RawRecord, RecordSource,
};
use std::sync::Arc;

/// Everything built once at open time and shared by the four layers
pub(crate) struct SourceData {
    pub records: Box<dyn RecordSource>,
    pub arena: GeometryArena,
    pub registry: Arc<TypeRegistry>,
}

impl SourceData {
    /// Run the schema and assembly passes over `records`
    ///
    /// Returns the shared data and one layer per class, in
    /// [`GeometryClass::ALL`] order.
    pub fn build(
        records: Box<dyn RecordSource>,
        registry: Arc<TypeRegistry>,
    ) -> (Arc<SourceData>, Vec<SosiLayer>) {
        let defns = SchemaBuilder::new(&registry).build(records.as_ref());
        let arena = GeometryAssembler::with_default_builders().assemble(records.as_ref());

        let shared = Arc::new(SourceData {
            records,
            arena,
            registry,
        });
        let layers = GeometryClass::ALL
            .into_iter()
            .zip(defns)
            .map(|(class, defn)| SosiLayer::new(class, defn, Arc::clone(&shared)))
            .collect();
        (shared, layers)
    }

    /// Geometry of a record; polygons are resolved from their references
    fn geometry_of(&self, record: &RawRecord) -> Option<Geometry<f64>> {
        match record.geometry_class() {
            Some(GeometryClass::Polygon) => {
                resolve_polygon(record, &self.arena).map(Geometry::Polygon)
            }
            _ => self.arena.get(record.serial).cloned(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum CursorState {
    Unopened,
    /// Position of the next record to inspect
    Positioned(usize),
    Exhausted,
}

/// Read-only layer over the records of one geometry class
pub struct SosiLayer {
    class: GeometryClass,
    defn: Arc<LayerDefn>,
    shared: Arc<SourceData>,
    state: CursorState,
    next_fid: u64,
    filter: Option<Rect<f64>>,
}

impl SosiLayer {
    pub(crate) fn new(class: GeometryClass, defn: Arc<LayerDefn>, shared: Arc<SourceData>) -> Self {
        Self {
            class,
            defn,
            shared,
            state: CursorState::Unopened,
            next_fid: 0,
            filter: None,
        }
    }

    /// Geometry class this layer exposes
    pub fn class(&self) -> GeometryClass {
        self.class
    }

    /// Shared handle to the layer definition
    pub fn defn_arc(&self) -> Arc<LayerDefn> {
        Arc::clone(&self.defn)
    }

    fn accepts(&self, geometry: Option<&Geometry<f64>>) -> bool {
        match self.filter {
            None => true,
            Some(filter) => geometry
                .and_then(envelope)
                .is_some_and(|bbox| intersects(&bbox, &filter)),
        }
    }
}

impl Layer for SosiLayer {
    fn defn(&self) -> &LayerDefn {
        &self.defn
    }

    fn reset_reading(&mut self) {
        self.state = CursorState::Positioned(0);
        self.next_fid = 0;
    }

    fn next_feature(&mut self) -> Option<Feature> {
        let shared = Arc::clone(&self.shared);
        loop {
            let position = match self.state {
                CursorState::Unopened => 0,
                CursorState::Positioned(position) => position,
                CursorState::Exhausted => return None,
            };
            let Some(record) = shared.records.record_at(position) else {
                self.state = CursorState::Exhausted;
                return None;
            };
            self.state = CursorState::Positioned(position + 1);

            if record.geometry_class() != Some(self.class) {
                continue;
            }
            let geometry = shared.geometry_of(record);
            if !self.accepts(geometry.as_ref()) {
                continue;
            }

            let mut feature = Feature::new(Arc::clone(&self.defn), self.next_fid);
            self.next_fid += 1;
            feature.set_geometry(geometry);
            apply_attributes(&mut feature, record, &shared.registry);
            return Some(feature);
        }
    }

    fn feature_count(&self) -> u64 {
        self.shared
            .records
            .records()
            .filter(|record| record.geometry_class() == Some(self.class))
            .filter(|record| {
                self.filter.is_none() || self.accepts(self.shared.geometry_of(record).as_ref())
            })
            .count() as u64
    }

    fn set_spatial_filter(&mut self, filter: Option<Rect<f64>>) {
        self.filter = filter;
    }

    fn spatial_filter(&self) -> Option<Rect<f64>> {
        self.filter
    }

    fn test_capability(&self, _capability: Capability) -> bool {
        false
    }
}

/// Bounding box of a geometry, `None` when it has no coordinates
fn envelope(geometry: &Geometry<f64>) -> Option<Rect<f64>> {
    let coords: Box<dyn Iterator<Item = &Coord<f64>>> = match geometry {
        Geometry::Point(point) => Box::new(std::iter::once(&point.0)),
        Geometry::LineString(line) => Box::new(line.0.iter()),
        Geometry::MultiPoint(points) => Box::new(points.0.iter().map(|p| &p.0)),
        Geometry::Polygon(polygon) => Box::new(polygon.exterior().0.iter()),
        _ => return None,
    };
    coords.fold(None, |bbox, c| {
        Some(match bbox {
            None => Rect::new(*c, *c),
            Some(r) => Rect::new(
                Coord {
                    x: r.min().x.min(c.x),
                    y: r.min().y.min(c.y),
                },
                Coord {
                    x: r.max().x.max(c.x),
                    y: r.max().y.max(c.y),
                },
            ),
        })
    })
}

fn intersects(a: &Rect<f64>, b: &Rect<f64>) -> bool {
    a.min().x <= b.max().x
        && a.max().x >= b.min().x
        && a.min().y <= b.max().y
        && a.max().y >= b.min().y
}
