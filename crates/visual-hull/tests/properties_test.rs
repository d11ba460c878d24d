//! Property tests for projection, containment and sweep-key bucketing.

use proptest::prelude::*;
use visual_hull::*;

/// A star-shaped outline: radius varies per vertex, so the polygon is simple.
fn star(radii: &[f64]) -> Vec<DVec2> {
    let n = radii.len() as f64;
    radii
        .iter()
        .enumerate()
        .map(|(i, &r)| {
            let angle = std::f64::consts::TAU * i as f64 / n;
            DVec2::new(r * angle.cos(), r * angle.sin())
        })
        .collect()
}

fn frame_strategy() -> impl Strategy<Value = (DVec3, DVec3, DVec3, DVec3)> {
    (
        prop::array::uniform3(-10.0..10.0f64),
        prop::array::uniform3(-1.0..1.0f64),
        0.0..std::f64::consts::TAU,
    )
        .prop_filter_map("degenerate direction", |(origin, dir, spin)| {
            let vy = DVec3::from_array(dir).try_normalize()?;
            let helper = if vy.x.abs() < 0.9 { DVec3::X } else { DVec3::Y };
            let a = vy.cross(helper).normalize();
            let b = vy.cross(a);
            let vx = a * spin.cos() + b * spin.sin();
            let vz = vy.cross(vx);
            Some((DVec3::from_array(origin), vx, vy, vz))
        })
}

#[test]
fn test_projection_idempotence() {
    proptest!(|((origin, vx, vy, vz) in frame_strategy(), p in prop::array::uniform3(-20.0..20.0f64))| {
        let view = View::from_vectors("prop", origin, vx, vy, vz, star(&[1.0, 1.0, 1.0])).unwrap();
        let p = DVec3::from_array(p);
        let lifted = view.plane_to_real(view.real_to_plane(p));
        let expected = view.image_plane().project(p);
        prop_assert!((lifted - expected).length() < 1e-9);
        prop_assert!((view.real_to_plane(lifted) - view.real_to_plane(p)).length() < 1e-9);
    });
}

#[test]
fn test_batch_containment_matches_single() {
    proptest!(|(
        radii in prop::collection::vec(0.5..3.0f64, 3..12),
        (origin, vx, vy, vz) in frame_strategy(),
        points in prop::collection::vec(prop::array::uniform3(-4.0..4.0f64), 1..64),
    )| {
        let view = View::from_vectors("prop", origin, vx, vy, vz, star(&radii)).unwrap();
        let points: Vec<DVec3> = points.into_iter().map(|p| origin + DVec3::from_array(p)).collect();
        let batch = view.project_inside_batch(&points);
        for (p, inside) in points.iter().zip(&batch) {
            prop_assert_eq!(*inside, view.is_inside(view.real_to_plane(*p)));
        }
        let uvs = view.real_to_plane_batch(&points);
        prop_assert_eq!(view.is_inside_batch(&uvs), batch);
    });
}

#[test]
fn test_sweep_key_bucketing() {
    proptest!(|(key in -100.0..100.0f64, jitter in -0.99..0.99f64, step in 0.1..5.0f64)| {
        let precision = 1e-6;
        let mut buckets: SweepBuckets<Vec<f64>> = SweepBuckets::new(precision);
        buckets.get_or_insert_with(key, Vec::new).push(key);
        let near = key + jitter * precision;
        buckets.get_or_insert_with(near, Vec::new).push(near);
        let far = key + step * 1.01;
        buckets.get_or_insert_with(far, Vec::new).push(far);

        prop_assert_eq!(buckets.len(), 2);
        prop_assert_eq!(buckets.get(key).map(|(_, v)| v.len()), Some(2));
        prop_assert_eq!(buckets.get(far).map(|(_, v)| v.len()), Some(1));
    });
}
