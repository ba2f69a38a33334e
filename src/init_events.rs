// SPDX-License-Identifier: AGPL-3.0-or-later

//! Gathering of sweep paths and initial events from the input models.

use crate::geom::Extents;
use crate::model::Model;
use crate::sweep_event::{EventKind, EventQueue};
use crate::sweep_path::SweepPath;

/// Everything the first sweep pass starts from.
pub struct Gathered {
    /// Arena of per-path sweep state, both models interleaved by walk order.
    pub paths: Vec<SweepPath>,
    /// Enter/exit schedule.
    pub queue: EventQueue,
    /// Union of all path extents, `None` when both models are empty of
    /// usable paths.
    pub extents: Option<Extents>,
}

/// Walk both models and build the arena and the event schedule.
///
/// Degenerate paths shorter than `tolerance` are skipped. Every path gets
/// an exit event at its right edge; paths with zero x extent (vertical
/// lines) get no enter event and are admitted by the scheduler when their
/// exit comes up.
pub fn gather(a: &Model, b: &Model, tolerance: f64) -> Gathered {
    let mut paths: Vec<SweepPath> = Vec::new();
    let mut queue = EventQueue::new();
    let mut extents: Option<Extents> = None;

    for (model_index, model) in [a, b].into_iter().enumerate() {
        model.walk(&mut |walked| {
            let absolute = walked.path.translated(walked.offset);
            if absolute.is_degenerate(tolerance) {
                log::debug!("skipping degenerate path {}", walked.route_key);
                return;
            }
            let index = paths.len();
            let sweep_path = SweepPath::new(
                index,
                model_index,
                walked.route.clone(),
                walked.path_id.clone(),
                walked.route_key.clone(),
                walked.offset,
                absolute,
            );
            extents = Some(match extents {
                Some(e) => e.union(sweep_path.extents),
                None => sweep_path.extents,
            });
            if sweep_path.extents.left < sweep_path.extents.right {
                queue.push(sweep_path.extents.left, EventKind::Enter(index));
            }
            queue.push(sweep_path.extents.right, EventKind::Exit(index));
            paths.push(sweep_path);
        });
    }

    log::debug!("gathered {} paths, {} events", paths.len(), queue.len());
    Gathered {
        paths,
        queue,
        extents,
    }
}
