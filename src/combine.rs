// SPDX-License-Identifier: AGPL-3.0-or-later

//! The public combination entry points.

use std::collections::BTreeSet;

use thiserror::Error;

use crate::assemble::{assemble, DeletedReason, DeletedRecord};
use crate::dead_ends::remove_dead_ends;
use crate::geom::Path;
use crate::init_events::gather;
use crate::model::Model;
use crate::sweep::{sweep_and_break, sweep_inside};

/// Default maximum distance at which two points count as the same point.
pub const DEFAULT_POINT_MATCHING_DISTANCE: f64 = 0.005;

/// Which fragments of one input model to keep, relative to the other model.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Inclusion {
    /// Keep fragments inside the other model.
    pub inside: bool,
    /// Keep fragments outside the other model.
    pub outside: bool,
}

/// Per-side inclusion flags of a combination.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CombineFlags {
    /// Flags for the first model.
    pub a: Inclusion,
    /// Flags for the second model.
    pub b: Inclusion,
}

impl CombineFlags {
    /// Keep only the parts of each model outside the other.
    pub fn union() -> Self {
        CombineFlags {
            a: Inclusion {
                inside: false,
                outside: true,
            },
            b: Inclusion {
                inside: false,
                outside: true,
            },
        }
    }

    /// Keep only the parts of each model inside the other.
    pub fn intersection() -> Self {
        CombineFlags {
            a: Inclusion {
                inside: true,
                outside: false,
            },
            b: Inclusion {
                inside: true,
                outside: false,
            },
        }
    }

    /// Keep the first model outside the second and the second model inside
    /// the first: `a` minus `b`.
    pub fn subtraction() -> Self {
        CombineFlags {
            a: Inclusion {
                inside: false,
                outside: true,
            },
            b: Inclusion {
                inside: true,
                outside: false,
            },
        }
    }
}

/// Tunable knobs of a combination.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CombineOptions {
    /// Remove dangling paths from the result.
    pub trim_dead_ends: bool,
    /// Maximum distance at which two points count as the same point. Must
    /// be positive.
    pub point_matching_distance: f64,
}

impl Default for CombineOptions {
    fn default() -> Self {
        CombineOptions {
            trim_dead_ends: true,
            point_matching_distance: DEFAULT_POINT_MATCHING_DISTANCE,
        }
    }
}

/// Errors rejected before any geometry is touched.
#[derive(Debug, Error)]
pub enum CombineError {
    /// The point matching distance was zero or negative.
    #[error("point matching distance must be positive, got {0}")]
    NonPositiveTolerance(f64),
}

/// Result of a combination.
#[derive(Debug)]
pub struct Combined {
    /// Wrapper model with the mutated inputs as children `"a"` and `"b"`.
    pub model: Model,
    /// Paths removed from each input, with reasons.
    pub deleted: [Vec<DeletedRecord>; 2],
    /// Every classification probe ray actually cast, for diagnostics.
    pub probe_rays: Model,
}

/// Combine two models according to `flags`.
///
/// Both inputs are consumed and mutated in place; clone first to keep the
/// originals. The returned wrapper model holds the survivors as children
/// `"a"` and `"b"`.
pub fn combine(
    mut a: Model,
    mut b: Model,
    flags: CombineFlags,
    options: &CombineOptions,
) -> Result<Combined, CombineError> {
    let tolerance = options.point_matching_distance;
    if !(tolerance > 0.0) {
        return Err(CombineError::NonPositiveTolerance(tolerance));
    }

    let mut gathered = gather(&a, &b, tolerance);
    let mut probe_rays = Model::default();
    let mut deleted: [Vec<DeletedRecord>; 2] = [Vec::new(), Vec::new()];
    let mut duplicate_route_keys: BTreeSet<String> = BTreeSet::new();

    if let Some(global) = gathered.extents {
        let outcome = sweep_and_break(&mut gathered.paths, gathered.queue, tolerance);
        sweep_inside(&mut gathered.paths, &outcome, global, tolerance, &mut probe_rays);
        let assembled = assemble(&gathered.paths, &outcome.broken, &mut a, &mut b, flags);
        deleted = assembled.deleted;
        duplicate_route_keys = assembled.duplicate_route_keys;
    }

    let mut wrapper = Model::default();
    wrapper.add_model("a", a);
    wrapper.add_model("b", b);

    if options.trim_dead_ends {
        // A union strips kept duplicates that dangle: a seam shared by both
        // inputs is interior to the united shape.
        let is_union = !flags.a.inside && !flags.b.inside;
        let refuse_duplicates =
            move |route_key: &str, _: &Path| !duplicate_route_keys.contains(route_key);
        let keep: Option<&dyn Fn(&str, &Path) -> bool> = if is_union {
            Some(&refuse_duplicates)
        } else {
            None
        };
        remove_dead_ends(&mut wrapper, tolerance, keep, &mut |route_key, path| {
            let side = if route_key.starts_with("models.a.") { 0 } else { 1 };
            deleted[side].push(DeletedRecord {
                path,
                reason: DeletedReason::DeadEnd,
                route_key: route_key.to_string(),
            });
        });
    }

    Ok(Combined {
        model: wrapper,
        deleted,
        probe_rays,
    })
}

/// Keep everything of `a` and `b` outside the other model.
pub fn combine_union(
    a: Model,
    b: Model,
    options: &CombineOptions,
) -> Result<Combined, CombineError> {
    combine(a, b, CombineFlags::union(), options)
}

/// Keep everything of `a` and `b` inside the other model.
pub fn combine_intersection(
    a: Model,
    b: Model,
    options: &CombineOptions,
) -> Result<Combined, CombineError> {
    combine(a, b, CombineFlags::intersection(), options)
}

/// Keep `a` minus `b`.
pub fn combine_subtraction(
    a: Model,
    b: Model,
    options: &CombineOptions,
) -> Result<Combined, CombineError> {
    combine(a, b, CombineFlags::subtraction(), options)
}
