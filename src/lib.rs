// SPDX-License-Identifier: AGPL-3.0-or-later

//! Boolean combination of 2-D vector drawing models.
//!
//! A [`model::Model`] is a tree of named paths (lines, circles, circular
//! arcs) and child models. [`combine`] merges two models by breaking their
//! paths at mutual intersections, classifying each fragment as inside or
//! outside the other model with a plane sweep and vertical ray casting,
//! and keeping or discarding fragments per the requested operation. The
//! provided presets cover union, intersection and subtraction.
//!
//! ```
//! use path_booleanop::geom::{Path, Point};
//! use path_booleanop::model::Model;
//! use path_booleanop::{combine_union, CombineOptions};
//!
//! let mut a = Model::default();
//! a.add_path(Path::circle(Point::new(0.0, 0.0), 10.0), "left");
//! let mut b = Model::default();
//! b.add_path(Path::circle(Point::new(15.0, 0.0), 10.0), "right");
//!
//! let combined = combine_union(a, b, &CombineOptions::default()).unwrap();
//! // One outer arc survives per circle; the lens in the middle is gone.
//! assert_eq!(combined.model.models["a"].paths.len(), 1);
//! assert_eq!(combined.model.models["b"].paths.len(), 1);
//! ```

#![deny(missing_docs)]

mod assemble;
mod break_path;
mod classify;
mod collect;
mod combine;
mod dead_ends;
pub mod geom;
mod init_events;
pub mod model;
mod sweep;
mod sweep_event;
mod sweep_path;

pub use assemble::{DeletedReason, DeletedRecord};
pub use combine::{
    combine, combine_intersection, combine_subtraction, combine_union, CombineError,
    CombineFlags, CombineOptions, Combined, Inclusion, DEFAULT_POINT_MATCHING_DISTANCE,
};
pub use dead_ends::remove_dead_ends;
