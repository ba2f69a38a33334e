// SPDX-License-Identifier: AGPL-3.0-or-later

//! Inside/outside classification of fragments by vertical ray casting.

use std::collections::BTreeSet;

use crate::collect::Collector;
use crate::geom::{intersect, Extents, Intersection, Path, Point};
use crate::model::Model;
use crate::sweep_path::SweepPath;

/// Classify one fragment against the other model's currently active paths.
///
/// Casts a vertical probe from the fragment midpoint to just beyond the
/// nearer global boundary and counts how often it crosses the other model.
/// An odd count means inside. Crossings are counted against each active
/// path's whole original geometry, coalesced across paths, and filtered:
/// paths vertically tangent at the probe x contribute nothing, crossings at
/// the probe origin are ignored, and a coalesced crossing where every
/// contributor merely grazes its own horizontal extreme is dropped.
pub fn classify(
    paths: &mut [SweepPath],
    owner: usize,
    fragment: usize,
    active: &BTreeSet<usize>,
    global: Extents,
    tolerance: f64,
    probe_rays: &mut Model,
) {
    {
        let target = &paths[owner].fragments[fragment];
        // Duplicates are resolved by midpoint, not by parity.
        if target.is_duplicate || target.is_deleted {
            return;
        }
    }
    let mid = paths[owner].fragments[fragment].midpoint;
    let owner_model = paths[owner].model_index;

    let foreign: Vec<usize> = active
        .iter()
        .copied()
        .filter(|&index| paths[index].model_index != owner_model)
        .collect();

    // A midpoint can only be enclosed if the other model has active
    // geometry both above and below it.
    let has_above = foreign
        .iter()
        .any(|&index| paths[index].extents.top >= mid.y - tolerance);
    let has_below = foreign
        .iter()
        .any(|&index| paths[index].extents.bottom <= mid.y + tolerance);
    if !has_above || !has_below {
        return;
    }

    // Probe toward the nearer boundary, one unit beyond it.
    let probe_end_y = if global.top - mid.y <= mid.y - global.bottom {
        global.top + 1.0
    } else {
        global.bottom - 1.0
    };
    let probe = Path::line(mid, Point::new(mid.x, probe_end_y));
    probe_rays.add_path(probe, "ray");

    let mut crossings: Collector<Point, Extents, _> =
        Collector::new(|a: &Point, b: &Point| a.equals(*b, tolerance));
    for &index in &foreign {
        let extents = paths[index].extents;
        // A path vertically tangent at the probe x touches without
        // crossing. This covers vertical lines, whose extent is a point.
        if (mid.x - extents.left).abs() <= tolerance
            || (mid.x - extents.right).abs() <= tolerance
        {
            continue;
        }
        if let Intersection::Points(points) = intersect(&probe, &paths[index].path, tolerance) {
            for point in points {
                crossings.add(point, extents);
            }
        }
    }

    let mut surviving: Vec<Point> = Vec::new();
    for bucket in crossings.buckets() {
        // The probe starts on the fragment itself.
        if bucket.key.equals(mid, tolerance) {
            continue;
        }
        // A joint where every contributor ends at its own horizontal
        // extreme is a graze, not a crossing.
        let all_grazing = bucket.values.iter().all(|extents| {
            (bucket.key.x - extents.left).abs() <= tolerance
                || (bucket.key.x - extents.right).abs() <= tolerance
        });
        if all_grazing {
            continue;
        }
        surviving.push(bucket.key);
    }

    let inside = surviving.len() % 2 == 1;
    log::trace!(
        "fragment {}/{} at ({}, {}): {} crossings, inside = {}",
        owner,
        fragment,
        mid.x,
        mid.y,
        surviving.len(),
        inside
    );
    let target = &mut paths[owner].fragments[fragment];
    target.crossings = surviving;
    target.is_inside = inside;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::init_events::gather;
    use crate::sweep::{sweep_and_break, sweep_inside};

    const TOL: f64 = 0.005;

    fn run(a: &Model, b: &Model) -> (Vec<SweepPath>, Model) {
        let mut gathered = gather(a, b, TOL);
        let outcome = sweep_and_break(&mut gathered.paths, gathered.queue, TOL);
        let global = gathered.extents.unwrap();
        let mut probe_rays = Model::default();
        sweep_inside(&mut gathered.paths, &outcome, global, TOL, &mut probe_rays);
        (gathered.paths, probe_rays)
    }

    #[test]
    fn fragment_outside_a_closed_square_stays_outside() {
        let mut a = Model::default();
        let corners = [
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(4.0, 4.0),
            Point::new(0.0, 4.0),
        ];
        for i in 0..4 {
            a.add_path(Path::line(corners[i], corners[(i + 1) % 4]), &format!("s{}", i));
        }
        let mut b = Model::default();
        b.add_path(Path::line(Point::new(1.0, 6.0), Point::new(3.0, 6.0)), "above");

        let (paths, _) = run(&a, &b);
        let above = paths.iter().find(|p| p.path_id == "above").unwrap();
        assert!(!above.fragments[0].is_inside);
    }

    #[test]
    fn fragment_inside_a_closed_square_is_inside() {
        let mut a = Model::default();
        let corners = [
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(4.0, 4.0),
            Point::new(0.0, 4.0),
        ];
        for i in 0..4 {
            a.add_path(Path::line(corners[i], corners[(i + 1) % 4]), &format!("s{}", i));
        }
        let mut b = Model::default();
        b.add_path(Path::line(Point::new(1.0, 1.0), Point::new(3.0, 1.0)), "within");

        let (paths, probe_rays) = run(&a, &b);
        let within = paths.iter().find(|p| p.path_id == "within").unwrap();
        assert!(within.fragments[0].is_inside);
        assert_eq!(within.fragments[0].crossings.len(), 1);
        assert!(!probe_rays.paths.is_empty());
    }

    #[test]
    fn tangent_contact_does_not_count_as_enclosure() {
        // The chord's midpoint probe passes exactly through the circle's
        // rightmost point.
        let mut a = Model::default();
        a.add_path(Path::circle(Point::new(0.0, 0.0), 5.0), "ring");
        let mut b = Model::default();
        b.add_path(Path::line(Point::new(5.0, -8.0), Point::new(5.0, -6.0)), "below");

        let (paths, _) = run(&a, &b);
        let below = paths.iter().find(|p| p.path_id == "below").unwrap();
        assert!(!below.fragments[0].is_inside);
    }
}
