// SPDX-License-Identifier: AGPL-3.0-or-later

//! Turning classified fragments back into model paths.

use std::collections::BTreeSet;

use crate::combine::CombineFlags;
use crate::geom::{Path, Point};
use crate::model::{route_key, Model};
use crate::sweep_path::SweepPath;

/// Why a path ended up in the deleted channel.
#[derive(Clone, Debug, PartialEq)]
pub enum DeletedReason {
    /// Redundant copy of a fragment the other model also produced.
    Duplicate,
    /// Classified inside the other model and excluded by the flags.
    Inside {
        /// Probe-ray crossing points that led to the classification.
        crossings: Vec<Point>,
    },
    /// Classified outside the other model and excluded by the flags.
    Outside {
        /// Probe-ray crossing points that led to the classification.
        crossings: Vec<Point>,
    },
    /// Removed by the dead-end trimmer.
    DeadEnd,
}

/// One path removed from the result, with its absolute geometry.
#[derive(Clone, Debug)]
pub struct DeletedRecord {
    /// Absolute geometry of the removed path.
    pub path: Path,
    /// Why it was removed.
    pub reason: DeletedReason,
    /// Address of the source path within the combined wrapper model.
    pub route_key: String,
}

/// Output of [`assemble`], consumed by the trimming stage.
pub struct Assembled {
    /// Deleted records per input model.
    pub deleted: [Vec<DeletedRecord>; 2],
    /// Wrapper route keys of duplicate fragments that were kept. The union
    /// trimmer refuses to protect these.
    pub duplicate_route_keys: BTreeSet<String>,
}

/// Replace each broken path in its model by its surviving fragments.
///
/// Fragments are re-added in model-local coordinates under ids derived from
/// the source path id. Duplicate-kept fragments are re-added regardless of
/// the flags; everything else passes the inclusion filter of its owning
/// side or lands in the deleted channel.
pub fn assemble(
    paths: &[SweepPath],
    broken: &[usize],
    a: &mut Model,
    b: &mut Model,
    flags: CombineFlags,
) -> Assembled {
    let mut deleted: [Vec<DeletedRecord>; 2] = [Vec::new(), Vec::new()];
    let mut duplicate_route_keys: BTreeSet<String> = BTreeSet::new();

    for &index in broken {
        let sweep_path = &paths[index];
        let (model, prefix) = match sweep_path.model_index {
            0 => (&mut *a, "models.a."),
            _ => (&mut *b, "models.b."),
        };
        let inclusion = match sweep_path.model_index {
            0 => flags.a,
            _ => flags.b,
        };
        model.remove_path_at(&sweep_path.route, &sweep_path.path_id);
        let Some(container) = model.model_at_mut(&sweep_path.route) else {
            continue;
        };
        let source_key = format!("{}{}", prefix, sweep_path.route_key);

        for fragment in &sweep_path.fragments {
            if fragment.is_deleted {
                deleted[sweep_path.model_index].push(DeletedRecord {
                    path: fragment.path,
                    reason: DeletedReason::Duplicate,
                    route_key: source_key.clone(),
                });
                continue;
            }
            let local = fragment.path.translated(sweep_path.offset.negated());
            if fragment.is_duplicate {
                let id = container.add_path(local, &sweep_path.path_id);
                duplicate_route_keys
                    .insert(format!("{}{}", prefix, route_key(&sweep_path.route, &id)));
                continue;
            }
            let include = if fragment.is_inside {
                inclusion.inside
            } else {
                inclusion.outside
            };
            if include {
                container.add_path(local, &sweep_path.path_id);
            } else {
                let reason = if fragment.is_inside {
                    DeletedReason::Inside {
                        crossings: fragment.crossings.clone(),
                    }
                } else {
                    DeletedReason::Outside {
                        crossings: fragment.crossings.clone(),
                    }
                };
                deleted[sweep_path.model_index].push(DeletedRecord {
                    path: fragment.path,
                    reason,
                    route_key: source_key.clone(),
                });
            }
        }
    }

    Assembled {
        deleted,
        duplicate_route_keys,
    }
}
