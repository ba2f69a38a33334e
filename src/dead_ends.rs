// SPDX-License-Identifier: AGPL-3.0-or-later

//! Removal of dead-end paths.
//!
//! An open path is dangling when one of its endpoints meets no other open
//! path endpoint. Removing a dangling path can expose the next one, so the
//! trimmer iterates to a fixed point. Circles are closed and never
//! candidates.

use itertools::Itertools;

use crate::collect::Collector;
use crate::geom::{Path, Point};
use crate::model::Model;

struct OpenPath {
    route: Vec<String>,
    path_id: String,
    route_key: String,
    absolute: Path,
    ends: (Point, Point),
}

fn collect_open(model: &Model) -> Vec<OpenPath> {
    let mut open = Vec::new();
    model.walk(&mut |walked| {
        let absolute = walked.path.translated(walked.offset);
        if let Some(ends) = absolute.endpoints() {
            open.push(OpenPath {
                route: walked.route.clone(),
                path_id: walked.path_id.clone(),
                route_key: walked.route_key.clone(),
                absolute,
                ends,
            });
        }
    });
    open
}

/// Remove dead-end paths from `model` in place.
///
/// `keep` overrides the dangling test per path, addressed by route key and
/// absolute geometry: `false` removes the path outright even when it is not
/// dangling, `true` protects it from removal. Every removed path is reported
/// through `on_removed` with its route key and absolute geometry.
pub fn remove_dead_ends(
    model: &mut Model,
    tolerance: f64,
    keep: Option<&dyn Fn(&str, &Path) -> bool>,
    on_removed: &mut dyn FnMut(&str, Path),
) {
    if let Some(keep) = keep {
        // Paths the predicate rejects go first, unconditionally.
        for open in collect_open(model) {
            if !keep(&open.route_key, &open.absolute) {
                log::debug!("removing rejected path {}", open.route_key);
                if model.remove_path_at(&open.route, &open.path_id).is_some() {
                    on_removed(&open.route_key, open.absolute);
                }
            }
        }
    }

    loop {
        let open = collect_open(model);
        let mut ends =
            Collector::new(|a: &Point, b: &Point| a.equals(*b, tolerance));
        for (index, path) in open.iter().enumerate() {
            ends.add(path.ends.0, index);
            ends.add(path.ends.1, index);
        }
        let dangling: Vec<usize> = ends
            .buckets()
            .iter()
            .filter(|bucket| bucket.values.len() == 1)
            .map(|bucket| bucket.values[0])
            .sorted()
            .dedup()
            .collect();

        let mut removed_any = false;
        for index in dangling {
            let path = &open[index];
            if let Some(keep) = keep {
                if keep(&path.route_key, &path.absolute) {
                    continue;
                }
            }
            log::debug!("removing dead end {}", path.route_key);
            if model.remove_path_at(&path.route, &path.path_id).is_some() {
                on_removed(&path.route_key, path.absolute);
                removed_any = true;
            }
        }
        if !removed_any {
            break;
        }
    }
}
