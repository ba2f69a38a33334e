// SPDX-License-Identifier: AGPL-3.0-or-later

//! Pairwise intersection of path primitives.

use super::{is_point_on_path, Path, Point};

/// Result of intersecting two paths.
#[derive(Clone, Debug, PartialEq)]
pub enum Intersection {
    /// The paths do not meet.
    None,
    /// The paths cross or touch at these points.
    Points(Vec<Point>),
    /// The paths share a section of their geometry (collinear segments,
    /// coincident carrier circles).
    Overlapped,
}

/// Intersect two paths within `tolerance`.
///
/// Points are reported only where they lie on both operands, so arc sweeps
/// and segment bounds limit the crossings of the underlying carriers.
pub fn intersect(a: &Path, b: &Path, tolerance: f64) -> Intersection {
    match (a, b) {
        (Path::Line { .. }, Path::Line { .. }) => line_line(a, b, tolerance),
        (Path::Line { .. }, _) => line_circular(a, b, tolerance),
        (_, Path::Line { .. }) => line_circular(b, a, tolerance),
        _ => circular_circular(a, b, tolerance),
    }
}

fn cross(ax: f64, ay: f64, bx: f64, by: f64) -> f64 {
    ax * by - ay * bx
}

fn line_line(a: &Path, b: &Path, tolerance: f64) -> Intersection {
    let Path::Line {
        origin: p1,
        end: p2,
    } = *a
    else {
        return Intersection::None;
    };
    let Path::Line {
        origin: p3,
        end: p4,
    } = *b
    else {
        return Intersection::None;
    };
    let d1 = p2 - p1;
    let d2 = p4 - p3;
    let len1 = p1.distance_to(p2);
    let len2 = p3.distance_to(p4);
    let denom = cross(d1.x, d1.y, d2.x, d2.y);
    if denom.abs() <= 1e-10 * len1 * len2 {
        // Parallel. Collinear only if b's origin sits on a's carrier.
        let offset = p3 - p1;
        if cross(offset.x, offset.y, d1.x, d1.y).abs() / len1 > tolerance {
            return Intersection::None;
        }
        // Project b's endpoints onto a's parameter range.
        let len1_sq = len1 * len1;
        let t3 = ((p3.x - p1.x) * d1.x + (p3.y - p1.y) * d1.y) / len1_sq;
        let t4 = ((p4.x - p1.x) * d1.x + (p4.y - p1.y) * d1.y) / len1_sq;
        let (lo, hi) = (t3.min(t4), t3.max(t4));
        let slack = tolerance / len1;
        if lo <= 1.0 + slack && hi >= -slack {
            return Intersection::Overlapped;
        }
        return Intersection::None;
    }
    let offset = p3 - p1;
    let t = cross(offset.x, offset.y, d2.x, d2.y) / denom;
    let p = Point::new(p1.x + d1.x * t, p1.y + d1.y * t);
    if is_point_on_path(p, a, tolerance) && is_point_on_path(p, b, tolerance) {
        Intersection::Points(vec![p])
    } else {
        Intersection::None
    }
}

/// Intersect a line with a circle or arc.
fn line_circular(line: &Path, circular: &Path, tolerance: f64) -> Intersection {
    let Path::Line {
        origin: p1,
        end: p2,
    } = *line
    else {
        return Intersection::None;
    };
    let Some((center, radius)) = carrier(circular) else {
        return Intersection::None;
    };
    let d = p2 - p1;
    let f = p1 - center;
    let a = d.x * d.x + d.y * d.y;
    let b = 2.0 * (f.x * d.x + f.y * d.y);
    let c = f.x * f.x + f.y * f.y - radius * radius;
    let disc = b * b - 4.0 * a * c;
    if disc < 0.0 {
        return Intersection::None;
    }
    let sqrt_disc = disc.sqrt();
    let mut points: Vec<Point> = Vec::new();
    for t in [(-b - sqrt_disc) / (2.0 * a), (-b + sqrt_disc) / (2.0 * a)] {
        let p = Point::new(p1.x + d.x * t, p1.y + d.y * t);
        if !is_point_on_path(p, line, tolerance) || !is_point_on_path(p, circular, tolerance) {
            continue;
        }
        // A tangent contact yields two roots at almost the same point.
        if points.iter().any(|q| q.equals(p, tolerance)) {
            continue;
        }
        points.push(p);
    }
    if points.is_empty() {
        Intersection::None
    } else {
        Intersection::Points(points)
    }
}

/// Intersect two circular paths (circle or arc each).
fn circular_circular(a: &Path, b: &Path, tolerance: f64) -> Intersection {
    let Some((c1, r1)) = carrier(a) else {
        return Intersection::None;
    };
    let Some((c2, r2)) = carrier(b) else {
        return Intersection::None;
    };
    let d = c1.distance_to(c2);
    if d <= tolerance && (r1 - r2).abs() <= tolerance {
        return Intersection::Overlapped;
    }
    if d > r1 + r2 + tolerance {
        return Intersection::None;
    }
    if d + tolerance < (r1 - r2).abs() {
        // One carrier strictly inside the other.
        return Intersection::None;
    }
    if d == 0.0 {
        // Concentric with distinct radii.
        return Intersection::None;
    }
    let along = (d * d + r1 * r1 - r2 * r2) / (2.0 * d);
    let h = (r1 * r1 - along * along).max(0.0).sqrt();
    let ux = (c2.x - c1.x) / d;
    let uy = (c2.y - c1.y) / d;
    let base = Point::new(c1.x + ux * along, c1.y + uy * along);
    let mut points: Vec<Point> = Vec::new();
    for candidate in [
        Point::new(base.x - uy * h, base.y + ux * h),
        Point::new(base.x + uy * h, base.y - ux * h),
    ] {
        if !is_point_on_path(candidate, a, tolerance) || !is_point_on_path(candidate, b, tolerance)
        {
            continue;
        }
        // Tangent carriers produce the same point twice.
        if points.iter().any(|q| q.equals(candidate, tolerance)) {
            continue;
        }
        points.push(candidate);
    }
    if points.is_empty() {
        Intersection::None
    } else {
        Intersection::Points(points)
    }
}

/// Center and radius of a circle's or arc's carrier circle.
fn carrier(path: &Path) -> Option<(Point, f64)> {
    match *path {
        Path::Circle { origin, radius } => Some((origin, radius)),
        Path::Arc { origin, radius, .. } => Some((origin, radius)),
        Path::Line { .. } => None,
    }
}
