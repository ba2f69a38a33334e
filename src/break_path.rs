// SPDX-License-Identifier: AGPL-3.0-or-later

//! Breaking a path's fragments at its intersections with another path.

use crate::geom::{intersect, paths_equal, split_at, Intersection, Path, Point, Split};
use crate::sweep_path::{Fragment, SweepPath};

/// Split the fragments of `sweep_path` wherever they meet `foreign`.
///
/// A path still whole and equal to `foreign` within `tolerance` is left
/// alone; coincident paths are resolved later by midpoint, not by cutting.
/// Overlapped results fall back to the foreign path's endpoints as cut
/// candidates (a closed circle contributes none). Splitting a circle opens
/// it into a full-turn arc anchored at the cut; further cuts divide the arc.
pub fn break_along_foreign(sweep_path: &mut SweepPath, foreign: &Path, tolerance: f64) {
    debug_assert!(!sweep_path.frozen, "frozen paths must not be split");

    if sweep_path.fragments.len() == 1
        && paths_equal(&sweep_path.fragments[0].path, foreign, tolerance)
    {
        return;
    }

    let owner = sweep_path.index;
    let mut index = 0;
    while index < sweep_path.fragments.len() {
        let fragment_path = sweep_path.fragments[index].path;
        let candidates: Vec<Point> = match intersect(&fragment_path, foreign, tolerance) {
            Intersection::None => Vec::new(),
            Intersection::Points(points) => points,
            Intersection::Overlapped => match foreign.endpoints() {
                Some((a, b)) => vec![a, b],
                None => Vec::new(),
            },
        };

        let mut split_here = false;
        for candidate in candidates {
            match split_at(&fragment_path, candidate, tolerance) {
                Some(Split::Opened(arc)) => {
                    log::trace!("opened closed path at ({}, {})", candidate.x, candidate.y);
                    sweep_path.fragments[index] = Fragment::new(arc, owner);
                    split_here = true;
                    break;
                }
                Some(Split::Pair(first, second)) => {
                    if first.length() <= tolerance || second.length() <= tolerance {
                        continue;
                    }
                    log::trace!("split fragment at ({}, {})", candidate.x, candidate.y);
                    sweep_path.fragments[index] = Fragment::new(first, owner);
                    sweep_path.fragments.push(Fragment::new(second, owner));
                    split_here = true;
                    break;
                }
                None => {}
            }
        }
        // A changed fragment is re-examined for the remaining candidates.
        if !split_here {
            index += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const TOL: f64 = 0.005;

    fn sweep_path(path: Path) -> SweepPath {
        SweepPath::new(
            0,
            0,
            Vec::new(),
            "p".to_string(),
            "paths.p".to_string(),
            Point::new(0.0, 0.0),
            path,
        )
    }

    fn fragment_length_sum(sp: &SweepPath) -> f64 {
        sp.fragments.iter().map(|f| f.path.length()).sum()
    }

    #[test]
    fn crossing_line_splits_into_two() {
        let mut sp = sweep_path(Path::line(Point::new(0.0, 0.0), Point::new(10.0, 0.0)));
        let foreign = Path::line(Point::new(5.0, -5.0), Point::new(5.0, 5.0));
        break_along_foreign(&mut sp, &foreign, TOL);
        assert_eq!(sp.fragments.len(), 2);
        assert_relative_eq!(fragment_length_sum(&sp), 10.0, epsilon = 1e-9);
    }

    #[test]
    fn circle_opens_then_divides() {
        let mut sp = sweep_path(Path::circle(Point::new(0.0, 0.0), 10.0));
        let foreign = Path::circle(Point::new(15.0, 0.0), 10.0);
        break_along_foreign(&mut sp, &foreign, TOL);
        assert_eq!(sp.fragments.len(), 2);
        assert_relative_eq!(
            fragment_length_sum(&sp),
            Path::circle(Point::new(0.0, 0.0), 10.0).length(),
            epsilon = 1e-6
        );
    }

    #[test]
    fn equal_paths_are_left_whole() {
        let mut sp = sweep_path(Path::circle(Point::new(1.0, 2.0), 5.0));
        let foreign = Path::circle(Point::new(1.0, 2.0), 5.0);
        break_along_foreign(&mut sp, &foreign, TOL);
        assert_eq!(sp.fragments.len(), 1);
    }

    #[test]
    fn breaking_is_a_fixed_point() {
        let mut sp = sweep_path(Path::line(Point::new(0.0, 0.0), Point::new(10.0, 0.0)));
        let foreign = Path::line(Point::new(5.0, -5.0), Point::new(5.0, 5.0));
        break_along_foreign(&mut sp, &foreign, TOL);
        let count = sp.fragments.len();
        break_along_foreign(&mut sp, &foreign, TOL);
        assert_eq!(sp.fragments.len(), count);
    }

    #[test]
    fn fragment_lengths_sum_to_the_original() {
        let mut rng = StdRng::seed_from_u64(0xb001);
        for _ in 0..50 {
            let original = Path::line(
                Point::new(rng.gen_range(-10.0..0.0), rng.gen_range(-10.0..10.0)),
                Point::new(rng.gen_range(1.0..10.0), rng.gen_range(-10.0..10.0)),
            );
            let mut sp = sweep_path(original);
            for _ in 0..5 {
                let x = rng.gen_range(-10.0..10.0);
                let foreign = Path::line(Point::new(x, -20.0), Point::new(x, 20.0));
                break_along_foreign(&mut sp, &foreign, TOL);
            }
            assert_relative_eq!(
                fragment_length_sum(&sp),
                original.length(),
                epsilon = 1e-6
            );
        }
    }
}
