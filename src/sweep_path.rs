// SPDX-License-Identifier: AGPL-3.0-or-later

//! Per-path sweep state.
//!
//! Every leaf path of the two input models gets one [`SweepPath`] arena
//! slot carrying its absolute geometry and the fragments the breaker cuts
//! it into.

use std::collections::BTreeSet;

use crate::geom::{Extents, Path, Point};

/// One fragment of a broken path.
#[derive(Clone, Debug)]
pub struct Fragment {
    /// Absolute geometry of the fragment.
    pub path: Path,
    /// Extents of `path`.
    pub extents: Extents,
    /// Midpoint of `path`, filled in at finalization.
    pub midpoint: Point,
    /// Classified as inside the other model.
    pub is_inside: bool,
    /// Member of a duplicate bucket (kept or deleted).
    pub is_duplicate: bool,
    /// Deleted as a redundant duplicate.
    pub is_deleted: bool,
    /// Probe-ray crossing points recorded during classification.
    pub crossings: Vec<Point>,
    /// Arena index of the owning [`SweepPath`].
    pub owner: usize,
}

impl Fragment {
    /// Fresh unclassified fragment.
    pub fn new(path: Path, owner: usize) -> Self {
        Fragment {
            extents: path.extents(),
            midpoint: path.midpoint(),
            path,
            is_inside: false,
            is_duplicate: false,
            is_deleted: false,
            crossings: Vec::new(),
            owner,
        }
    }
}

/// Sweep state of one leaf path.
#[derive(Clone, Debug)]
pub struct SweepPath {
    /// Index of this slot in the arena.
    pub index: usize,
    /// Owning input model, 0 or 1.
    pub model_index: usize,
    /// Child-model route inside the owning model.
    pub route: Vec<String>,
    /// Path id within its containing model.
    pub path_id: String,
    /// Stable address of the path inside the owning model.
    pub route_key: String,
    /// Accumulated origin offset of the containing model.
    pub offset: Point,
    /// Absolute geometry of the whole original path.
    pub path: Path,
    /// Extents of `path`.
    pub extents: Extents,
    /// Pieces of the path, in absolute coordinates. Starts as one fragment
    /// covering the whole path.
    pub fragments: Vec<Fragment>,
    /// Arena indices of paths this one still owes an overlap resolution.
    pub pending: BTreeSet<usize>,
    /// Set once the exit event is processed. A frozen path is never split
    /// again.
    pub frozen: bool,
}

impl SweepPath {
    /// Build the sweep state for one walked path. `absolute` is the path
    /// already translated by its walk offset.
    pub fn new(
        index: usize,
        model_index: usize,
        route: Vec<String>,
        path_id: String,
        route_key: String,
        offset: Point,
        absolute: Path,
    ) -> Self {
        SweepPath {
            index,
            model_index,
            route,
            path_id,
            route_key,
            offset,
            extents: absolute.extents(),
            fragments: vec![Fragment::new(absolute, index)],
            path: absolute,
            pending: BTreeSet::new(),
            frozen: false,
        }
    }
}
