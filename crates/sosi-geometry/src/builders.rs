// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Geometry builders for each SOSI group kind

use crate::arc::{full_circle, interpolate_arc};
use crate::assembler::GeometryBuilder;
use crate::{Error, Result};
use geo_types::{Coord, Geometry, LineString, MultiPoint, Point};
use sosi_model::{GroupKind, RawRecord};

/// Fail unless the record has at least `required` coordinates
fn require(record: &RawRecord, required: usize) -> Result<&[Coord<f64>]> {
    let coords = record.coordinates.as_slice();
    if coords.len() < required {
        return Err(Error::too_few_coordinates(
            record.group.name(),
            required,
            coords.len(),
        ));
    }
    Ok(coords)
}

/// Start, through and end point of an arc record
///
/// With more than three coordinates the middle one is the through point.
fn arc_points(record: &RawRecord) -> Result<(Coord<f64>, Coord<f64>, Coord<f64>)> {
    let coords = require(record, 3)?;
    let last = coords.len() - 1;
    Ok((coords[0], coords[last / 2 + last % 2], coords[last]))
}

// ============================================================================
// PUNKT / SYMBOL
// ============================================================================

/// Point builder
///
/// Uses the first coordinate; further coordinates are ignored.
#[derive(Debug, Default)]
pub struct PointBuilder;

impl PointBuilder {
    pub fn new() -> Self {
        Self
    }
}

impl GeometryBuilder for PointBuilder {
    fn build(&self, record: &RawRecord) -> Result<Geometry<f64>> {
        let coords = require(record, 1)?;
        Ok(Point::from(coords[0]).into())
    }

    fn supported_groups(&self) -> Vec<GroupKind> {
        vec![GroupKind::Punkt, GroupKind::Symbol]
    }
}

// ============================================================================
// KURVE / LINJE
// ============================================================================

/// LineString builder
#[derive(Debug, Default)]
pub struct LineBuilder;

impl LineBuilder {
    pub fn new() -> Self {
        Self
    }
}

impl GeometryBuilder for LineBuilder {
    fn build(&self, record: &RawRecord) -> Result<Geometry<f64>> {
        let coords = require(record, 2)?;
        Ok(LineString::new(coords.to_vec()).into())
    }

    fn supported_groups(&self) -> Vec<GroupKind> {
        vec![GroupKind::Kurve, GroupKind::Linje]
    }
}

// ============================================================================
// BUEP
// ============================================================================

/// Circular arc builder
///
/// Interpolates the arc at [`ARC_INTERPOLATION_FULL_CIRCLE`](crate::ARC_INTERPOLATION_FULL_CIRCLE)
/// segments per full circle.
#[derive(Debug, Default)]
pub struct ArcBuilder;

impl ArcBuilder {
    pub fn new() -> Self {
        Self
    }
}

impl GeometryBuilder for ArcBuilder {
    fn build(&self, record: &RawRecord) -> Result<Geometry<f64>> {
        let (start, through, end) = arc_points(record)?;
        Ok(interpolate_arc(start, through, end)?.into())
    }

    fn supported_groups(&self) -> Vec<GroupKind> {
        vec![GroupKind::Buep]
    }
}

// ============================================================================
// SIRKELP
// ============================================================================

/// Full circle builder
#[derive(Debug, Default)]
pub struct CircleBuilder;

impl CircleBuilder {
    pub fn new() -> Self {
        Self
    }
}

impl GeometryBuilder for CircleBuilder {
    fn build(&self, record: &RawRecord) -> Result<Geometry<f64>> {
        let (a, b, c) = arc_points(record)?;
        Ok(full_circle(a, b, c)?.into())
    }

    fn supported_groups(&self) -> Vec<GroupKind> {
        vec![GroupKind::Sirkelp]
    }
}

// ============================================================================
// TEKST
// ============================================================================

/// MultiPoint builder for text placements
///
/// Every coordinate becomes one point, even when there is only one.
#[derive(Debug, Default)]
pub struct TextBuilder;

impl TextBuilder {
    pub fn new() -> Self {
        Self
    }
}

impl GeometryBuilder for TextBuilder {
    fn build(&self, record: &RawRecord) -> Result<Geometry<f64>> {
        let coords = require(record, 1)?;
        let points: Vec<Point<f64>> = coords.iter().copied().map(Point::from).collect();
        Ok(MultiPoint::new(points).into())
    }

    fn supported_groups(&self) -> Vec<GroupKind> {
        vec![GroupKind::Tekst]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::coord;
    use sosi_model::Serial;

    fn record(group: GroupKind, coords: &[(f64, f64)]) -> RawRecord {
        let mut record = RawRecord::new(Serial(1), group);
        record.coordinates = coords.iter().map(|&(x, y)| coord! { x: x, y: y }).collect();
        record
    }

    #[test]
    fn test_point_uses_first_coordinate() {
        let rec = record(GroupKind::Punkt, &[(1.0, 2.0), (3.0, 4.0)]);
        let geom = PointBuilder::new().build(&rec).unwrap();
        assert_eq!(geom, Geometry::Point(Point::new(1.0, 2.0)));
    }

    #[test]
    fn test_point_without_coordinates() {
        let rec = record(GroupKind::Punkt, &[]);
        let result = PointBuilder::new().build(&rec);
        assert!(matches!(
            result,
            Err(Error::TooFewCoordinates { required: 1, found: 0, .. })
        ));
    }

    #[test]
    fn test_line_keeps_order() {
        let rec = record(GroupKind::Kurve, &[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]);
        let geom = LineBuilder::new().build(&rec).unwrap();
        assert_eq!(
            geom,
            Geometry::LineString(LineString::from(vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]))
        );
    }

    #[test]
    fn test_line_needs_two_coordinates() {
        let rec = record(GroupKind::Kurve, &[(0.0, 0.0)]);
        assert!(LineBuilder::new().build(&rec).is_err());
    }

    #[test]
    fn test_arc_builder() {
        let rec = record(GroupKind::Buep, &[(1.0, 0.0), (0.0, 1.0), (-1.0, 0.0)]);
        let Geometry::LineString(line) = ArcBuilder::new().build(&rec).unwrap() else {
            panic!("Expected LineString");
        };
        assert_eq!(line.0.len(), 19);
    }

    #[test]
    fn test_circle_builder() {
        let rec = record(GroupKind::Sirkelp, &[(1.0, 0.0), (0.0, 1.0), (-1.0, 0.0)]);
        let Geometry::LineString(line) = CircleBuilder::new().build(&rec).unwrap() else {
            panic!("Expected LineString");
        };
        assert_eq!(line.0.len(), 37);
        assert!(line.is_closed());
    }

    #[test]
    fn test_text_single_coordinate_is_multipoint() {
        let rec = record(GroupKind::Tekst, &[(5.0, 6.0)]);
        let Geometry::MultiPoint(points) = TextBuilder::new().build(&rec).unwrap() else {
            panic!("Expected MultiPoint");
        };
        assert_eq!(points.0.len(), 1);
    }

    #[test]
    fn test_arc_points_picks_middle() {
        let rec = record(
            GroupKind::Buep,
            &[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0), (3.0, 3.0), (4.0, 4.0)],
        );
        let (a, b, c) = arc_points(&rec).unwrap();
        assert_eq!(a, coord! { x: 0.0, y: 0.0 });
        assert_eq!(b, coord! { x: 2.0, y: 2.0 });
        assert_eq!(c, coord! { x: 4.0, y: 4.0 });
    }
}
