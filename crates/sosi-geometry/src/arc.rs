// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Circular arc interpolation
//!
//! SOSI stores arcs as three points on the circle: start, a point somewhere
//! along the arc, and end. Consumers without arc support get a polyline with
//! a fixed angular resolution.

use crate::{Error, Result};
use geo_types::{coord, Coord, LineString};
use std::f64::consts::TAU;

/// Number of segments used for a full 360° circle
///
/// Partial arcs use proportionally fewer segments.
pub const ARC_INTERPOLATION_FULL_CIRCLE: usize = 36;

/// A circle in the plane
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle {
    pub center: Coord<f64>,
    pub radius: f64,
}

impl Circle {
    /// Fit the circle passing through three points
    ///
    /// Fails when two points coincide or all three are collinear.
    pub fn through(a: Coord<f64>, b: Coord<f64>, c: Coord<f64>) -> Result<Self> {
        // Work relative to `a`; map coordinates are large and would
        // otherwise lose precision in the squared terms.
        let b = b - a;
        let c = c - a;

        let b_len2 = b.x * b.x + b.y * b.y;
        let c_len2 = c.x * c.x + c.y * c.y;
        let cross = b.x * c.y - b.y * c.x;

        if b_len2 == 0.0 || c_len2 == 0.0 || cross.abs() <= 1e-12 * (b_len2 * c_len2).sqrt() {
            return Err(Error::degenerate_arc(format!(
                "points ({}, {}), ({}, {}), ({}, {}) do not define a circle",
                a.x,
                a.y,
                a.x + b.x,
                a.y + b.y,
                a.x + c.x,
                a.y + c.y
            )));
        }

        let d = 2.0 * cross;
        let u = coord! {
            x: (c.y * b_len2 - b.y * c_len2) / d,
            y: (b.x * c_len2 - c.x * b_len2) / d,
        };

        Ok(Self {
            center: a + u,
            radius: (u.x * u.x + u.y * u.y).sqrt(),
        })
    }

    /// Angle of a point as seen from the center
    #[inline]
    fn angle_of(&self, p: Coord<f64>) -> f64 {
        (p.y - self.center.y).atan2(p.x - self.center.x)
    }

    /// Point on the circle at an angle
    #[inline]
    fn point_at(&self, angle: f64) -> Coord<f64> {
        coord! {
            x: self.center.x + self.radius * angle.cos(),
            y: self.center.y + self.radius * angle.sin(),
        }
    }

    /// Signed sweep from `start` to `end` passing `through`
    ///
    /// Positive is counter-clockwise.
    fn sweep(&self, start: Coord<f64>, through: Coord<f64>, end: Coord<f64>) -> f64 {
        let a1 = self.angle_of(start);
        let d12 = (self.angle_of(through) - a1).rem_euclid(TAU);
        let d13 = (self.angle_of(end) - a1).rem_euclid(TAU);

        if d12 < d13 {
            d13
        } else {
            d13 - TAU
        }
    }
}

/// Segment count for a sweep at the fixed full-circle resolution
pub fn arc_segments(sweep: f64) -> usize {
    let fraction = sweep.abs() / TAU;
    let segments = (ARC_INTERPOLATION_FULL_CIRCLE as f64 * fraction - 1e-9).ceil() as usize;
    segments.max(2)
}

/// Interpolate the arc from `start` through `through` to `end`
///
/// The first and last coordinates are exactly `start` and `end`.
pub fn interpolate_arc(start: Coord<f64>, through: Coord<f64>, end: Coord<f64>) -> Result<LineString<f64>> {
    let circle = Circle::through(start, through, end)?;
    let sweep = circle.sweep(start, through, end);
    let segments = arc_segments(sweep);
    let a1 = circle.angle_of(start);

    let mut coords = Vec::with_capacity(segments + 1);
    coords.push(start);
    for i in 1..segments {
        let t = i as f64 / segments as f64;
        coords.push(circle.point_at(a1 + sweep * t));
    }
    coords.push(end);

    Ok(LineString::new(coords))
}

/// Interpolate the full circle through three points
///
/// Starts and ends at `a`, running in the direction `a` → `b` → `c`. The
/// result has [`ARC_INTERPOLATION_FULL_CIRCLE`] segments, so one more
/// coordinate than that.
pub fn full_circle(a: Coord<f64>, b: Coord<f64>, c: Coord<f64>) -> Result<LineString<f64>> {
    let circle = Circle::through(a, b, c)?;
    let direction = circle.sweep(a, b, c).signum();
    let a1 = circle.angle_of(a);
    let segments = ARC_INTERPOLATION_FULL_CIRCLE;

    let mut coords = Vec::with_capacity(segments + 1);
    coords.push(a);
    for i in 1..segments {
        let t = i as f64 / segments as f64;
        coords.push(circle.point_at(a1 + direction * TAU * t));
    }
    coords.push(a);

    Ok(LineString::new(coords))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn distance(a: Coord<f64>, b: Coord<f64>) -> f64 {
        ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt()
    }

    #[test]
    fn test_circle_through_three_points() {
        let circle = Circle::through(
            coord! { x: 1.0, y: 0.0 },
            coord! { x: 0.0, y: 1.0 },
            coord! { x: -1.0, y: 0.0 },
        )
        .unwrap();

        assert_relative_eq!(circle.center.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(circle.center.y, 0.0, epsilon = 1e-12);
        assert_relative_eq!(circle.radius, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_collinear_points_are_degenerate() {
        let result = Circle::through(
            coord! { x: 0.0, y: 0.0 },
            coord! { x: 1.0, y: 1.0 },
            coord! { x: 2.0, y: 2.0 },
        );
        assert!(matches!(result, Err(Error::DegenerateArc(_))));

        let result = Circle::through(
            coord! { x: 5.0, y: 5.0 },
            coord! { x: 5.0, y: 5.0 },
            coord! { x: 2.0, y: 2.0 },
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_half_circle_counter_clockwise() {
        let start = coord! { x: 1.0, y: 0.0 };
        let end = coord! { x: -1.0, y: 0.0 };
        let line = interpolate_arc(start, coord! { x: 0.0, y: 1.0 }, end).unwrap();

        // 180° at 36 segments per circle
        assert_eq!(line.0.len(), 19);
        assert_eq!(line.0[0], start);
        assert_eq!(line.0[18], end);
        // Goes over the top
        assert!(line.0[9].y > 0.99);
    }

    #[test]
    fn test_half_circle_clockwise() {
        let line = interpolate_arc(
            coord! { x: 1.0, y: 0.0 },
            coord! { x: 0.0, y: -1.0 },
            coord! { x: -1.0, y: 0.0 },
        )
        .unwrap();

        assert_eq!(line.0.len(), 19);
        assert!(line.0[9].y < -0.99);
    }

    #[test]
    fn test_arc_points_lie_on_circle() {
        let center = coord! { x: 500000.0, y: 6600000.0 };
        let r = 25.0;
        let line = interpolate_arc(
            center + coord! { x: r, y: 0.0 },
            center + coord! { x: r * 0.6, y: r * 0.8 },
            center + coord! { x: 0.0, y: r },
        )
        .unwrap();

        for c in line.coords() {
            assert_relative_eq!(distance(*c, center), r, epsilon = 1e-6);
        }
        // Quarter circle
        assert_eq!(line.0.len(), 10);
    }

    #[test]
    fn test_small_arc_keeps_minimum_segments() {
        let line = interpolate_arc(
            coord! { x: 1.0, y: 0.0 },
            coord! { x: 0.99995, y: 0.01 },
            coord! { x: 0.9998, y: 0.02 },
        )
        .unwrap();
        assert_eq!(line.0.len(), 3);
    }

    #[test]
    fn test_full_circle_has_fixed_resolution() {
        for (center, r) in [
            (coord! { x: 0.0, y: 0.0 }, 1.0),
            (coord! { x: 500000.0, y: 6600000.0 }, 1234.5),
        ] {
            let a = center + coord! { x: r, y: 0.0 };
            let b = center + coord! { x: 0.0, y: r };
            let c = center + coord! { x: -r, y: 0.0 };
            let ring = full_circle(a, b, c).unwrap();

            assert_eq!(ring.0.len(), ARC_INTERPOLATION_FULL_CIRCLE + 1);
            assert_eq!(ring.0.first(), ring.0.last());
            for p in ring.coords() {
                assert_relative_eq!(distance(*p, center), r, epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn test_arc_segments() {
        assert_eq!(arc_segments(TAU), 36);
        assert_eq!(arc_segments(-TAU / 4.0), 9);
        assert_eq!(arc_segments(0.01), 2);
    }
}
