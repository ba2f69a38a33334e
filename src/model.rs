// SPDX-License-Identifier: AGPL-3.0-or-later

//! Drawing model tree.
//!
//! A [`Model`] holds named paths and named child models. Each model carries
//! an `origin` offset applied to everything inside it, so path coordinates
//! are local to their containing model. The [`Model::walk`] traversal
//! resolves the accumulated offsets and hands out a stable route key per
//! path, usable to address the path again later.

use std::collections::BTreeMap;

use crate::geom::{Path, Point};

/// A tree of named paths and child models.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Model {
    /// Offset applied to all paths and child models inside.
    pub origin: Point,
    /// Optional layer name, carried through combination untouched.
    pub layer: Option<String>,
    /// Paths directly inside this model, by id.
    pub paths: BTreeMap<String, Path>,
    /// Child models, by id.
    pub models: BTreeMap<String, Model>,
}

/// One path as seen during a [`Model::walk`] traversal.
#[derive(Clone, Debug)]
pub struct WalkedPath<'a> {
    /// Child-model ids from the root down to the containing model.
    pub route: Vec<String>,
    /// Stable textual address of the path, see [`route_key`].
    pub route_key: String,
    /// Id of the path within its containing model.
    pub path_id: String,
    /// Sum of all origins from the root down to the containing model.
    pub offset: Point,
    /// The path itself, in model-local coordinates.
    pub path: &'a Path,
}

/// Textual address of a path: `models.<child>.` per route segment followed
/// by `paths.<id>`.
pub fn route_key(route: &[String], path_id: &str) -> String {
    let mut key = String::new();
    for segment in route {
        key.push_str("models.");
        key.push_str(segment);
        key.push('.');
    }
    key.push_str("paths.");
    key.push_str(path_id);
    key
}

impl Model {
    /// Find an id close to `hint` that is not yet used for a path in this
    /// model. Tries `hint`, then `hint_1`, `hint_2` and so on.
    pub fn get_similar_id(&self, hint: &str) -> String {
        if !self.paths.contains_key(hint) {
            return hint.to_string();
        }
        let mut counter = 1u64;
        loop {
            let candidate = format!("{}_{}", hint, counter);
            if !self.paths.contains_key(&candidate) {
                return candidate;
            }
            counter += 1;
        }
    }

    /// Add a path under an id derived from `id_hint`, avoiding collisions.
    /// Returns the id actually used.
    pub fn add_path(&mut self, path: Path, id_hint: &str) -> String {
        let id = self.get_similar_id(id_hint);
        self.paths.insert(id.clone(), path);
        id
    }

    /// Add a child model under `id`, replacing any previous child of that id.
    pub fn add_model(&mut self, id: &str, model: Model) {
        self.models.insert(id.to_string(), model);
    }

    /// Depth-first traversal over all paths in the tree. Paths of a model
    /// are visited before its children; offsets accumulate from the root.
    pub fn walk<F: FnMut(&WalkedPath)>(&self, f: &mut F) {
        let mut route = Vec::new();
        self.walk_inner(self.origin, &mut route, f);
    }

    fn walk_inner<F: FnMut(&WalkedPath)>(
        &self,
        offset: Point,
        route: &mut Vec<String>,
        f: &mut F,
    ) {
        for (path_id, path) in &self.paths {
            f(&WalkedPath {
                route: route.clone(),
                route_key: route_key(route, path_id),
                path_id: path_id.clone(),
                offset,
                path,
            });
        }
        for (child_id, child) in &self.models {
            route.push(child_id.clone());
            child.walk_inner(offset + child.origin, route, f);
            route.pop();
        }
    }

    /// The model addressed by a walk route, if it exists.
    pub fn model_at_mut(&mut self, route: &[String]) -> Option<&mut Model> {
        let mut current = self;
        for segment in route {
            current = current.models.get_mut(segment)?;
        }
        Some(current)
    }

    /// Remove the path `id` from the model addressed by `route`.
    pub fn remove_path_at(&mut self, route: &[String], id: &str) -> Option<Path> {
        self.model_at_mut(route)?.paths.remove(id)
    }
}
