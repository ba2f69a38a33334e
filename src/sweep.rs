// SPDX-License-Identifier: AGPL-3.0-or-later

//! The two sweep passes.
//!
//! Pass 1 walks the enter/exit schedule left to right, records pairwise
//! overlap obligations between concurrently active paths, breaks paths at
//! their mutual intersections and resolves duplicates by fragment midpoint.
//! Pass 2 replays the schedule with the broken fragments and classifies
//! each fragment as inside or outside the other model.
//!
//! All events sharing an x key form one atomic batch. Within a batch,
//! insertion order decides; across phases, enters apply before checks and
//! checks before exits, so a path exiting at x is still active at x.

use std::collections::BTreeSet;
use std::mem;

use crate::break_path::break_along_foreign;
use crate::classify::classify;
use crate::collect::Collector;
use crate::geom::{Extents, Point};
use crate::model::Model;
use crate::sweep_event::{EventKind, EventQueue};
use crate::sweep_path::SweepPath;

/// A deferred classification request produced by pass 1.
#[derive(Clone, Debug)]
pub struct CheckRequest {
    /// Midpoint x of the fragment, the key pass 2 schedules the check at.
    pub x: f64,
    /// Arena index of the fragment's path.
    pub owner: usize,
    /// Fragment index within the owner.
    pub fragment: usize,
}

/// What pass 1 hands to pass 2.
#[derive(Debug, Default)]
pub struct SweepOutcome {
    /// Arena indices in finalization order.
    pub broken: Vec<usize>,
    /// One classification request per surviving fragment.
    pub checks: Vec<CheckRequest>,
}

/// Record mutual overlap obligations against the active set, then admit
/// `index` to it. Obligations are one-time: resolved at the end of the batch
/// that created them.
fn admit(
    paths: &mut [SweepPath],
    active: &mut BTreeSet<usize>,
    index: usize,
    tolerance: f64,
) {
    for &other in active.iter() {
        if paths[index].model_index == paths[other].model_index {
            continue;
        }
        if paths[index]
            .extents
            .y_range_intersects(&paths[other].extents, tolerance)
        {
            paths[index].pending.insert(other);
            paths[other].pending.insert(index);
        }
    }
    active.insert(index);
}

/// Pass 1: break every path at its intersections with the other model and
/// mark duplicates.
pub fn sweep_and_break(
    paths: &mut [SweepPath],
    mut queue: EventQueue,
    tolerance: f64,
) -> SweepOutcome {
    let mut active: BTreeSet<usize> = BTreeSet::new();
    let mut broken: Vec<usize> = Vec::new();
    let mut checks: Vec<CheckRequest> = Vec::new();
    let mut duplicates: Collector<Point, (usize, usize), _> =
        Collector::new(move |a: &Point, b: &Point| a.equals(*b, tolerance));

    while let Some((x, batch)) = queue.pop_batch() {
        log::trace!("pass 1 batch at x = {} with {} events", x, batch.len());
        let mut exits: Vec<usize> = Vec::new();
        for event in batch {
            match event {
                EventKind::Enter(index) => admit(paths, &mut active, index, tolerance),
                EventKind::Exit(index) => {
                    // A path with zero x extent never entered; give it its
                    // moment in the active set before it leaves.
                    if !active.contains(&index) {
                        admit(paths, &mut active, index, tolerance);
                    }
                    exits.push(index);
                }
                EventKind::CheckInside { .. } => {
                    debug_assert!(false, "no check events in pass 1");
                }
            }
        }

        // Resolve this batch's overlap obligations, each pair once, both
        // directions.
        let snapshot: Vec<usize> = active.iter().copied().collect();
        for index in snapshot {
            let pending = mem::take(&mut paths[index].pending);
            for other in pending {
                paths[other].pending.remove(&index);
                debug_assert!(!paths[index].frozen && !paths[other].frozen);
                let foreign_of_other = paths[other].path;
                let foreign_of_index = paths[index].path;
                break_along_foreign(&mut paths[index], &foreign_of_other, tolerance);
                break_along_foreign(&mut paths[other], &foreign_of_index, tolerance);
            }
        }

        // Freeze exiting paths: drop shards, resolve duplicates by midpoint
        // and schedule classification per fragment.
        for index in exits {
            paths[index]
                .fragments
                .retain(|fragment| fragment.path.length() > tolerance);
            for fragment_index in 0..paths[index].fragments.len() {
                let midpoint = paths[index].fragments[fragment_index].midpoint;
                let bucket = duplicates.add(midpoint, (index, fragment_index));
                let members = &duplicates.buckets()[bucket].values;
                if members.len() > 1 {
                    let (first_owner, first_fragment) = members[0];
                    paths[first_owner].fragments[first_fragment].is_duplicate = true;
                    let current = &mut paths[index].fragments[fragment_index];
                    current.is_duplicate = true;
                    current.is_deleted = true;
                    log::debug!(
                        "duplicate fragment of {} at ({}, {})",
                        paths[index].route_key,
                        midpoint.x,
                        midpoint.y
                    );
                }
                checks.push(CheckRequest {
                    x: midpoint.x,
                    owner: index,
                    fragment: fragment_index,
                });
            }
            active.remove(&index);
            paths[index].frozen = true;
            broken.push(index);
        }
    }

    debug_assert!(active.is_empty(), "every entered path must exit");
    SweepOutcome { broken, checks }
}

/// Pass 2: classify every surviving fragment against the other model.
///
/// `global` is the union of all path extents; probe rays run from a
/// fragment midpoint to just beyond the nearer vertical boundary. Every ray
/// actually cast is recorded in `probe_rays`.
pub fn sweep_inside(
    paths: &mut [SweepPath],
    outcome: &SweepOutcome,
    global: Extents,
    tolerance: f64,
    probe_rays: &mut Model,
) {
    let mut queue = EventQueue::new();
    for &index in &outcome.broken {
        queue.push(paths[index].extents.left, EventKind::Enter(index));
        queue.push(paths[index].extents.right, EventKind::Exit(index));
    }
    for check in &outcome.checks {
        queue.push(
            check.x,
            EventKind::CheckInside {
                owner: check.owner,
                fragment: check.fragment,
            },
        );
    }

    let mut active: BTreeSet<usize> = BTreeSet::new();
    while let Some((x, batch)) = queue.pop_batch() {
        log::trace!("pass 2 batch at x = {} with {} events", x, batch.len());
        for event in &batch {
            if let EventKind::Enter(index) = event {
                active.insert(*index);
            }
        }
        for event in &batch {
            if let EventKind::CheckInside { owner, fragment } = event {
                classify(
                    paths, *owner, *fragment, &active, global, tolerance, probe_rays,
                );
            }
        }
        for event in &batch {
            if let EventKind::Exit(index) = event {
                active.remove(index);
            }
        }
    }
}
