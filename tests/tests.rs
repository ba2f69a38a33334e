// SPDX-License-Identifier: AGPL-3.0-or-later

//! Tests for boolean model combination.

#[cfg(test)]
mod test {
    use approx::assert_relative_eq;
    use path_booleanop::geom::{Path, Point};
    use path_booleanop::model::Model;
    use path_booleanop::*;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn square(origin: Point, side: f64) -> Model {
        let corners = [
            origin,
            Point::new(origin.x + side, origin.y),
            Point::new(origin.x + side, origin.y + side),
            Point::new(origin.x, origin.y + side),
        ];
        let mut model = Model::default();
        for i in 0..4 {
            model.add_path(
                Path::line(corners[i], corners[(i + 1) % 4]),
                &format!("s{}", i),
            );
        }
        model
    }

    fn circle_model(center: Point, radius: f64) -> Model {
        let mut model = Model::default();
        model.add_path(Path::circle(center, radius), "ring");
        model
    }

    /// All paths of the wrapper, with absolute geometry.
    fn walked_paths(model: &Model) -> Vec<(String, Path)> {
        let mut paths = Vec::new();
        model.walk(&mut |walked| {
            paths.push((walked.route_key.clone(), walked.path.translated(walked.offset)));
        });
        paths
    }

    fn total_length(model: &Model) -> f64 {
        walked_paths(model).iter().map(|(_, p)| p.length()).sum()
    }

    #[test]
    fn disjoint_union_is_identity() {
        init_logger();
        let a = circle_model(Point::new(0.0, 0.0), 2.0);
        let b = circle_model(Point::new(10.0, 0.0), 2.0);

        let combined = combine_union(a, b, &CombineOptions::default()).unwrap();

        assert_eq!(combined.model.models["a"].paths.len(), 1);
        assert_eq!(combined.model.models["b"].paths.len(), 1);
        assert!(combined.deleted[0].is_empty());
        assert!(combined.deleted[1].is_empty());
        // Far apart shapes never even need a probe.
        assert!(combined.probe_rays.paths.is_empty());
    }

    #[test]
    fn union_of_identical_circles_keeps_one() {
        init_logger();
        let a = circle_model(Point::new(3.0, -1.0), 5.0);
        let b = circle_model(Point::new(3.0, -1.0), 5.0);

        let combined = combine_union(a, b, &CombineOptions::default()).unwrap();

        assert_eq!(combined.model.models["a"].paths.len(), 1);
        assert!(combined.model.models["b"].paths.is_empty());
        assert!(combined.deleted[0].is_empty());
        assert_eq!(combined.deleted[1].len(), 1);
        assert_eq!(combined.deleted[1][0].reason, DeletedReason::Duplicate);
    }

    #[test]
    fn intersection_of_overlapping_squares() {
        init_logger();
        // Overlap region is the square [2, 4] x [2, 4].
        let a = square(Point::new(0.0, 0.0), 4.0);
        let b = square(Point::new(2.0, 2.0), 4.0);

        let combined = combine_intersection(a, b, &CombineOptions::default()).unwrap();

        let survivors = walked_paths(&combined.model);
        assert_eq!(survivors.len(), 4);
        for (route_key, path) in &survivors {
            assert_relative_eq!(path.length(), 2.0, epsilon = 1e-9, max_relative = 1e-9);
            assert!(route_key.starts_with("models."), "{}", route_key);
        }
        assert_relative_eq!(total_length(&combined.model), 8.0, epsilon = 1e-9);
    }

    #[test]
    fn union_of_crossing_circles_keeps_outer_arcs() {
        init_logger();
        let a = circle_model(Point::new(0.0, 0.0), 10.0);
        let b = circle_model(Point::new(15.0, 0.0), 10.0);

        let combined = combine_union(a, b, &CombineOptions::default()).unwrap();

        let side_a = &combined.model.models["a"];
        let side_b = &combined.model.models["b"];
        assert_eq!(side_a.paths.len(), 1);
        assert_eq!(side_b.paths.len(), 1);
        // The survivors are the arcs facing away from the other circle.
        let arc_a = side_a.paths.values().next().unwrap();
        let arc_b = side_b.paths.values().next().unwrap();
        assert!(arc_a.midpoint().x < 0.0);
        assert!(arc_b.midpoint().x > 15.0);

        for side in 0..2 {
            assert_eq!(combined.deleted[side].len(), 1);
            assert!(matches!(
                combined.deleted[side][0].reason,
                DeletedReason::Inside { .. }
            ));
        }
    }

    #[test]
    fn subtraction_of_crossing_circles() {
        init_logger();
        let a = circle_model(Point::new(0.0, 0.0), 10.0);
        let b = circle_model(Point::new(15.0, 0.0), 10.0);

        let combined = combine_subtraction(a, b, &CombineOptions::default()).unwrap();

        let side_a = &combined.model.models["a"];
        let side_b = &combined.model.models["b"];
        assert_eq!(side_a.paths.len(), 1);
        assert_eq!(side_b.paths.len(), 1);
        // a keeps its outer arc, b keeps the arc closing the bite.
        assert!(side_a.paths.values().next().unwrap().midpoint().x < 0.0);
        assert!(side_b.paths.values().next().unwrap().midpoint().x < 15.0);
    }

    #[test]
    fn concentric_subtraction_keeps_both_circles_whole() {
        init_logger();
        let a = circle_model(Point::new(0.0, 0.0), 10.0);
        let b = circle_model(Point::new(0.0, 0.0), 5.0);

        let combined = combine_subtraction(a, b, &CombineOptions::default()).unwrap();

        let outer = &combined.model.models["a"].paths["ring"];
        let inner = &combined.model.models["b"].paths["ring"];
        assert!(matches!(outer, Path::Circle { radius, .. } if (radius - 10.0).abs() < 1e-9));
        assert!(matches!(inner, Path::Circle { radius, .. } if (radius - 5.0).abs() < 1e-9));
        assert!(combined.deleted[0].is_empty());
        assert!(combined.deleted[1].is_empty());
    }

    #[test]
    fn union_of_adjacent_squares_drops_the_shared_seam() {
        init_logger();
        // Two unit-height squares sharing the edge x = 2.
        let a = square(Point::new(0.0, 0.0), 2.0);
        let b = square(Point::new(2.0, 0.0), 2.0);

        let combined = combine_union(a, b, &CombineOptions::default()).unwrap();

        // The outline of the 4 x 2 rectangle, three sides per input.
        assert_eq!(combined.model.models["a"].paths.len(), 3);
        assert_eq!(combined.model.models["b"].paths.len(), 3);
        assert_relative_eq!(total_length(&combined.model), 12.0, epsilon = 1e-9);

        // One side lost its seam copy as a duplicate, the other as a dead
        // end once the trimmer refused to protect it.
        let reasons: Vec<&DeletedReason> = combined
            .deleted
            .iter()
            .flatten()
            .map(|record| &record.reason)
            .collect();
        assert_eq!(reasons.len(), 2);
        assert!(reasons.contains(&&DeletedReason::Duplicate));
        assert!(reasons.contains(&&DeletedReason::DeadEnd));
    }

    #[test]
    fn seam_survives_without_trimming() {
        init_logger();
        let a = square(Point::new(0.0, 0.0), 2.0);
        let b = square(Point::new(2.0, 0.0), 2.0);
        let options = CombineOptions {
            trim_dead_ends: false,
            ..CombineOptions::default()
        };

        let combined = combine_union(a, b, &options).unwrap();

        // The kept duplicate seam stays on side a.
        assert_eq!(combined.model.models["a"].paths.len(), 4);
        assert_eq!(combined.model.models["b"].paths.len(), 3);
    }

    #[test]
    fn probe_rays_are_reported() {
        init_logger();
        let a = circle_model(Point::new(0.0, 0.0), 10.0);
        let b = circle_model(Point::new(15.0, 0.0), 10.0);

        let combined = combine_union(a, b, &CombineOptions::default()).unwrap();

        assert!(!combined.probe_rays.paths.is_empty());
        for path in combined.probe_rays.paths.values() {
            assert!(matches!(path, Path::Line { origin, end } if origin.x == end.x));
        }
    }

    #[test]
    fn nested_models_keep_their_offsets() {
        init_logger();
        // The circle lives in a child model shifted by (15, 0); in absolute
        // coordinates it crosses a's circle like in the plain test.
        let mut inner = circle_model(Point::new(0.0, 0.0), 10.0);
        inner.origin = Point::new(15.0, 0.0);
        let mut b = Model::default();
        b.add_model("inner", inner);
        let a = circle_model(Point::new(0.0, 0.0), 10.0);

        let combined = combine_union(a, b, &CombineOptions::default()).unwrap();

        let inner_after = &combined.model.models["b"].models["inner"];
        assert_eq!(inner_after.paths.len(), 1);
        // Stored local, so the arc center stays at the child origin.
        let arc = inner_after.paths.values().next().unwrap();
        match arc {
            Path::Arc { origin, .. } => {
                assert_relative_eq!(origin.x, 0.0, epsilon = 1e-9);
                assert_relative_eq!(origin.y, 0.0, epsilon = 1e-9);
            }
            other => panic!("expected an arc, got {:?}", other),
        }
    }
}
