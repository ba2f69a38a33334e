// SPDX-License-Identifier: AGPL-3.0-or-later

//! Geometric primitives consumed by the combination engine: points, paths
//! (lines, circles, circular arcs) and the measurements on them.
//!
//! All angles are in radians, counterclockwise, with the y axis growing
//! upward. Geometric equality is always relative to a caller-supplied
//! tolerance, the maximum distance at which two points are treated as
//! coincident.

mod intersect;

pub use intersect::{intersect, Intersection};

use std::f64::consts::{PI, TAU};
use std::ops::{Add, Sub};

/// A point in the drawing plane.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate. Grows upward.
    pub y: f64,
}

impl Point {
    /// Create a point from its coordinates.
    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Point halfway between `self` and `other`.
    pub fn mid(self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// Are the two points closer than `tolerance`?
    pub fn equals(self, other: Point, tolerance: f64) -> bool {
        self.distance_to(other) <= tolerance
    }

    /// Angle of `self` as seen from `origin`, normalized into `[0, 2π)`.
    pub fn angle_from(self, origin: Point) -> f64 {
        normalize_angle((self.y - origin.y).atan2(self.x - origin.x))
    }

    /// Point on the circle around `origin` with the given `radius` at `angle`.
    pub fn on_circle(origin: Point, radius: f64, angle: f64) -> Point {
        Point::new(
            origin.x + radius * angle.cos(),
            origin.y + radius * angle.sin(),
        )
    }

    /// The componentwise negation, used to undo an offset translation.
    pub fn negated(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Normalize an angle into `[0, 2π)`.
pub(crate) fn normalize_angle(a: f64) -> f64 {
    let a = a % TAU;
    if a < 0.0 {
        a + TAU
    } else {
        a
    }
}

/// Axis-aligned extents of a piece of geometry.
///
/// `left <= right` and `bottom <= top` always hold.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Extents {
    /// Smallest x coordinate.
    pub left: f64,
    /// Largest x coordinate.
    pub right: f64,
    /// Smallest y coordinate.
    pub bottom: f64,
    /// Largest y coordinate.
    pub top: f64,
}

impl Extents {
    /// Degenerate extents covering a single point.
    pub fn of_point(p: Point) -> Self {
        Extents {
            left: p.x,
            right: p.x,
            bottom: p.y,
            top: p.y,
        }
    }

    /// Grow the extents to include `p`.
    pub fn include(self, p: Point) -> Self {
        Extents {
            left: self.left.min(p.x),
            right: self.right.max(p.x),
            bottom: self.bottom.min(p.y),
            top: self.top.max(p.y),
        }
    }

    /// Smallest extents covering both operands.
    pub fn union(self, other: Extents) -> Self {
        Extents {
            left: self.left.min(other.left),
            right: self.right.max(other.right),
            bottom: self.bottom.min(other.bottom),
            top: self.top.max(other.top),
        }
    }

    /// Do the vertical ranges of the two extents intersect, inclusively?
    pub fn y_range_intersects(&self, other: &Extents, tolerance: f64) -> bool {
        self.bottom <= other.top + tolerance && other.bottom <= self.top + tolerance
    }
}

/// An atomic 2-D primitive with absolute or model-local coordinates.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Path {
    /// Straight segment between two points.
    Line {
        /// Start point.
        origin: Point,
        /// End point.
        end: Point,
    },
    /// Full circle.
    Circle {
        /// Center.
        origin: Point,
        /// Radius, positive.
        radius: f64,
    },
    /// Counterclockwise circular arc from `start_angle` to `end_angle`.
    ///
    /// `start_angle` is normalized into `[0, 2π)` and
    /// `end_angle = start_angle + sweep` with `sweep` in `(0, 2π]`.
    Arc {
        /// Center.
        origin: Point,
        /// Radius, positive.
        radius: f64,
        /// Angle of the start point.
        start_angle: f64,
        /// Angle of the end point, always greater than `start_angle`.
        end_angle: f64,
    },
}

impl Path {
    /// Straight segment between `a` and `b`.
    pub fn line(a: Point, b: Point) -> Path {
        Path::Line { origin: a, end: b }
    }

    /// Circle around `origin`.
    pub fn circle(origin: Point, radius: f64) -> Path {
        Path::Circle { origin, radius }
    }

    /// Counterclockwise arc. `end_angle` must be greater than `start_angle`;
    /// the pair is normalized so that the invariants documented on
    /// [`Path::Arc`] hold.
    pub fn arc(origin: Point, radius: f64, start_angle: f64, end_angle: f64) -> Path {
        let sweep = end_angle - start_angle;
        debug_assert!(sweep > 0.0, "arc sweep must be positive");
        debug_assert!(sweep <= TAU + 1e-9, "arc sweep must not exceed a full turn");
        let start = normalize_angle(start_angle);
        Path::Arc {
            origin,
            radius,
            start_angle: start,
            end_angle: start + sweep.min(TAU),
        }
    }

    /// The same geometry translated by `offset`.
    pub fn translated(self, offset: Point) -> Path {
        match self {
            Path::Line { origin, end } => Path::Line {
                origin: origin + offset,
                end: end + offset,
            },
            Path::Circle { origin, radius } => Path::Circle {
                origin: origin + offset,
                radius,
            },
            Path::Arc {
                origin,
                radius,
                start_angle,
                end_angle,
            } => Path::Arc {
                origin: origin + offset,
                radius,
                start_angle,
                end_angle,
            },
        }
    }

    /// Arc length of the path.
    pub fn length(&self) -> f64 {
        match *self {
            Path::Line { origin, end } => origin.distance_to(end),
            Path::Circle { radius, .. } => TAU * radius,
            Path::Arc {
                radius,
                start_angle,
                end_angle,
                ..
            } => radius * (end_angle - start_angle),
        }
    }

    /// Axis-aligned extents of the path.
    pub fn extents(&self) -> Extents {
        match *self {
            Path::Line { origin, end } => Extents::of_point(origin).include(end),
            Path::Circle { origin, radius } => Extents {
                left: origin.x - radius,
                right: origin.x + radius,
                bottom: origin.y - radius,
                top: origin.y + radius,
            },
            Path::Arc {
                origin,
                radius,
                start_angle,
                end_angle,
            } => {
                let mut e = Extents::of_point(Point::on_circle(origin, radius, start_angle))
                    .include(Point::on_circle(origin, radius, end_angle));
                // The extreme points of the carrier circle, where contained
                // in the sweep.
                let sweep = end_angle - start_angle;
                for quadrant in 0..4 {
                    let angle = quadrant as f64 * PI / 2.0;
                    if normalize_angle(angle - start_angle) <= sweep {
                        e = e.include(Point::on_circle(origin, radius, angle));
                    }
                }
                e
            }
        }
    }

    /// Point halfway along the path. For circles this is the point at angle
    /// π, which is deterministic and shared by coincident circles.
    pub fn midpoint(&self) -> Point {
        match *self {
            Path::Line { origin, end } => origin.mid(end),
            Path::Circle { origin, radius } => Point::on_circle(origin, radius, PI),
            Path::Arc {
                origin,
                radius,
                start_angle,
                end_angle,
            } => Point::on_circle(origin, radius, (start_angle + end_angle) / 2.0),
        }
    }

    /// Start and end point, or `None` for closed circles.
    pub fn endpoints(&self) -> Option<(Point, Point)> {
        match *self {
            Path::Line { origin, end } => Some((origin, end)),
            Path::Circle { .. } => None,
            Path::Arc {
                origin,
                radius,
                start_angle,
                end_angle,
            } => Some((
                Point::on_circle(origin, radius, start_angle),
                Point::on_circle(origin, radius, end_angle),
            )),
        }
    }

    /// Is the path too short to carry any geometry at the given tolerance?
    pub fn is_degenerate(&self, tolerance: f64) -> bool {
        self.length() <= tolerance
    }
}

/// Does `p` lie on `path`, no farther away than `tolerance`?
pub fn is_point_on_path(p: Point, path: &Path, tolerance: f64) -> bool {
    match *path {
        Path::Line { origin, end } => point_to_segment_distance(p, origin, end) <= tolerance,
        Path::Circle { origin, radius } => (origin.distance_to(p) - radius).abs() <= tolerance,
        Path::Arc {
            origin,
            radius,
            start_angle,
            end_angle,
        } => {
            if (origin.distance_to(p) - radius).abs() > tolerance {
                return false;
            }
            let angular_tolerance = tolerance / radius;
            let rel = normalize_angle(p.angle_from(origin) - start_angle);
            rel <= (end_angle - start_angle) + angular_tolerance
                || rel >= TAU - angular_tolerance
        }
    }
}

/// Distance from `p` to the segment `a`-`b`.
fn point_to_segment_distance(p: Point, a: Point, b: Point) -> f64 {
    let d = b - a;
    let len2 = d.x * d.x + d.y * d.y;
    if len2 == 0.0 {
        return p.distance_to(a);
    }
    let t = (((p.x - a.x) * d.x + (p.y - a.y) * d.y) / len2).clamp(0.0, 1.0);
    p.distance_to(Point::new(a.x + d.x * t, a.y + d.y * t))
}

/// Are two paths the same geometry within `tolerance`? Lines match in either
/// orientation; full-turn arcs match circles of the same carrier.
pub fn paths_equal(a: &Path, b: &Path, tolerance: f64) -> bool {
    match (*a, *b) {
        (
            Path::Line {
                origin: o1,
                end: e1,
            },
            Path::Line {
                origin: o2,
                end: e2,
            },
        ) => {
            (o1.equals(o2, tolerance) && e1.equals(e2, tolerance))
                || (o1.equals(e2, tolerance) && e1.equals(o2, tolerance))
        }
        (
            Path::Circle {
                origin: o1,
                radius: r1,
            },
            Path::Circle {
                origin: o2,
                radius: r2,
            },
        ) => o1.equals(o2, tolerance) && (r1 - r2).abs() <= tolerance,
        (Path::Arc { .. }, Path::Arc { .. }) => arcs_equal(a, b, tolerance),
        (Path::Circle { .. }, Path::Arc { .. }) => circle_matches_full_arc(a, b, tolerance),
        (Path::Arc { .. }, Path::Circle { .. }) => circle_matches_full_arc(b, a, tolerance),
        _ => false,
    }
}

fn arcs_equal(a: &Path, b: &Path, tolerance: f64) -> bool {
    let (
        Path::Arc {
            origin: o1,
            radius: r1,
            start_angle: s1,
            end_angle: e1,
        },
        Path::Arc {
            origin: o2,
            radius: r2,
            start_angle: s2,
            end_angle: e2,
        },
    ) = (*a, *b)
    else {
        return false;
    };
    if !o1.equals(o2, tolerance) || (r1 - r2).abs() > tolerance {
        return false;
    }
    let (sweep1, sweep2) = (e1 - s1, e2 - s2);
    if (sweep1 - sweep2).abs() * r1.max(r2) > tolerance {
        return false;
    }
    // Two full turns on the same carrier are the same geometry no matter
    // where they start.
    if sweep1 >= TAU - tolerance / r1.max(tolerance) {
        return true;
    }
    Point::on_circle(o1, r1, s1).equals(Point::on_circle(o2, r2, s2), tolerance)
        && Point::on_circle(o1, r1, e1).equals(Point::on_circle(o2, r2, e2), tolerance)
}

fn circle_matches_full_arc(circle: &Path, arc: &Path, tolerance: f64) -> bool {
    let (
        Path::Circle {
            origin: o1,
            radius: r1,
        },
        Path::Arc {
            origin: o2,
            radius: r2,
            start_angle,
            end_angle,
        },
    ) = (*circle, *arc)
    else {
        return false;
    };
    o1.equals(o2, tolerance)
        && (r1 - r2).abs() <= tolerance
        && end_angle - start_angle >= TAU - tolerance / r1.max(tolerance)
}

/// Result of splitting a path at a point.
#[derive(Clone, Debug, PartialEq)]
pub enum Split {
    /// The path was cut into two pieces meeting at the split point.
    Pair(Path, Path),
    /// A circle was opened into a single full-turn arc anchored at the split
    /// point. A later split divides the arc into two pieces.
    Opened(Path),
}

/// Split `path` at `p`.
///
/// Returns `None` if `p` does not lie on the path or is too close to an
/// endpoint for the cut to produce two usable pieces.
pub fn split_at(path: &Path, p: Point, tolerance: f64) -> Option<Split> {
    match *path {
        Path::Line { origin, end } => {
            if point_to_segment_distance(p, origin, end) > tolerance
                || p.equals(origin, tolerance)
                || p.equals(end, tolerance)
            {
                return None;
            }
            Some(Split::Pair(Path::line(origin, p), Path::line(p, end)))
        }
        Path::Circle { origin, radius } => {
            if (origin.distance_to(p) - radius).abs() > tolerance {
                return None;
            }
            let angle = p.angle_from(origin);
            Some(Split::Opened(Path::arc(origin, radius, angle, angle + TAU)))
        }
        Path::Arc {
            origin,
            radius,
            start_angle,
            end_angle,
        } => {
            if (origin.distance_to(p) - radius).abs() > tolerance {
                return None;
            }
            let angular_tolerance = tolerance / radius;
            let sweep = end_angle - start_angle;
            let rel = normalize_angle(p.angle_from(origin) - start_angle);
            // The cut must fall strictly inside the sweep.
            if rel <= angular_tolerance || rel >= sweep - angular_tolerance {
                return None;
            }
            Some(Split::Pair(
                Path::arc(origin, radius, start_angle, start_angle + rel),
                Path::arc(origin, radius, start_angle + rel, end_angle),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const TOL: f64 = 0.005;

    #[test]
    fn arc_extents_cover_quadrant_crossings() {
        // Arc through the top of its carrier circle.
        let arc = Path::arc(Point::new(0.0, 0.0), 2.0, PI / 4.0, 3.0 * PI / 4.0);
        let e = arc.extents();
        assert_relative_eq!(e.top, 2.0, epsilon = 1e-9);
        assert_relative_eq!(e.bottom, 2.0 * (PI / 4.0).sin(), epsilon = 1e-9);
        assert_relative_eq!(e.left, -2.0 * (PI / 4.0).cos(), epsilon = 1e-9);
        assert_relative_eq!(e.right, 2.0 * (PI / 4.0).cos(), epsilon = 1e-9);
    }

    #[test]
    fn full_turn_arc_extents_match_circle() {
        let circle = Path::circle(Point::new(1.0, -2.0), 3.0);
        let arc = Path::arc(Point::new(1.0, -2.0), 3.0, 1.0, 1.0 + TAU);
        assert_eq!(circle.extents(), arc.extents());
    }

    #[test]
    fn split_line_rejects_endpoints() {
        let line = Path::line(Point::new(0.0, 0.0), Point::new(10.0, 0.0));
        assert_eq!(split_at(&line, Point::new(0.0, 0.0), TOL), None);
        assert_eq!(split_at(&line, Point::new(10.0, 0.001), TOL), None);
        match split_at(&line, Point::new(4.0, 0.0), TOL) {
            Some(Split::Pair(first, second)) => {
                assert_relative_eq!(first.length(), 4.0, epsilon = 1e-9);
                assert_relative_eq!(second.length(), 6.0, epsilon = 1e-9);
            }
            other => panic!("unexpected split result: {:?}", other),
        }
    }

    #[test]
    fn split_circle_opens_into_full_arc() {
        let circle = Path::circle(Point::new(0.0, 0.0), 5.0);
        match split_at(&circle, Point::new(5.0, 0.0), TOL) {
            Some(Split::Opened(arc)) => {
                assert_relative_eq!(arc.length(), circle.length(), epsilon = 1e-9);
                assert!(paths_equal(&circle, &arc, TOL));
            }
            other => panic!("unexpected split result: {:?}", other),
        }
    }

    #[test]
    fn split_arc_pieces_sum_to_whole() {
        let arc = Path::arc(Point::new(0.0, 0.0), 4.0, 0.2, 2.5);
        let p = Point::on_circle(Point::new(0.0, 0.0), 4.0, 1.3);
        match split_at(&arc, p, TOL) {
            Some(Split::Pair(first, second)) => {
                assert_relative_eq!(
                    first.length() + second.length(),
                    arc.length(),
                    epsilon = 1e-9
                );
            }
            other => panic!("unexpected split result: {:?}", other),
        }
    }

    #[test]
    fn line_equality_ignores_orientation() {
        let a = Path::line(Point::new(0.0, 0.0), Point::new(1.0, 1.0));
        let b = Path::line(Point::new(1.0, 1.0), Point::new(0.0, 0.0));
        assert!(paths_equal(&a, &b, TOL));
    }

    #[test]
    fn point_on_arc_respects_sweep() {
        let arc = Path::arc(Point::new(0.0, 0.0), 1.0, 0.0, PI);
        assert!(is_point_on_path(Point::new(0.0, 1.0), &arc, TOL));
        assert!(!is_point_on_path(Point::new(0.0, -1.0), &arc, TOL));
    }
}
