use std::f64::consts::TAU;

use rand::SeedableRng;
use rand::rngs::StdRng;
use steller::{Error, Graph, circular_layout, random_layout, shell_layout};

fn radius(layout: &steller::Layout, v: usize) -> f64 {
    layout.x[v].hypot(layout.y[v])
}

#[test]
fn single_vertex_is_the_origin_for_every_placement() {
    let g = Graph::new(1);
    let mut rng = StdRng::seed_from_u64(0);
    for layout in [
        random_layout(&g, &mut rng).unwrap(),
        circular_layout(&g).unwrap(),
        shell_layout(&g, None).unwrap(),
        shell_layout(&g, Some(&[vec![0]])).unwrap(),
    ] {
        assert_eq!(layout.x, vec![0.0]);
        assert_eq!(layout.y, vec![0.0]);
    }
}

#[test]
fn empty_graphs_are_rejected() {
    let g = Graph::new(0);
    let mut rng = StdRng::seed_from_u64(0);
    for err in [
        random_layout(&g, &mut rng).unwrap_err(),
        circular_layout(&g).unwrap_err(),
        shell_layout(&g, None).unwrap_err(),
    ] {
        assert!(matches!(err, Error::InvalidArgument(_)), "{err}");
    }
}

#[test]
fn random_layout_samples_the_unit_square() {
    let g = Graph::new(50);
    let layout = random_layout(&g, &mut StdRng::seed_from_u64(11)).unwrap();
    assert_eq!(layout.len(), 50);
    for p in layout.points() {
        assert!((0.0..1.0).contains(&p.x), "x: {}", p.x);
        assert!((0.0..1.0).contains(&p.y), "y: {}", p.y);
    }

    let again = random_layout(&g, &mut StdRng::seed_from_u64(11)).unwrap();
    assert_eq!(layout, again);
}

#[test]
fn circular_layout_spaces_vertices_evenly_on_the_unit_circle() {
    let n = 7;
    let layout = circular_layout(&Graph::new(n)).unwrap();
    assert_eq!(layout.len(), n);

    let mut angles: Vec<f64> = (0..n)
        .map(|v| {
            assert!((radius(&layout, v) - 1.0).abs() < 1e-12);
            layout.y[v].atan2(layout.x[v]).rem_euclid(TAU)
        })
        .collect();
    angles.sort_by(f64::total_cmp);
    for w in angles.windows(2) {
        assert!((w[1] - w[0] - TAU / n as f64).abs() < 1e-9, "{w:?}");
    }
    // No duplicate point at angle 2*pi.
    assert!(angles[n - 1] < TAU - 1e-9);
}

#[test]
fn shell_layout_places_groups_on_concentric_circles() {
    let g = Graph::new(5);
    let layout = shell_layout(&g, Some(&[vec![0, 1, 2], vec![3, 4]])).unwrap();
    for v in 0..3 {
        assert!((radius(&layout, v) - 1.0).abs() < 1e-12, "vertex {v}");
    }
    for v in 3..5 {
        assert!((radius(&layout, v) - 2.0).abs() < 1e-12, "vertex {v}");
    }
    // Members of the outer shell are opposite each other.
    assert!((layout.x[3] + layout.x[4]).abs() < 1e-12);
}

#[test]
fn shell_layout_singleton_center_has_zero_radius() {
    let g = Graph::new(4);
    let layout = shell_layout(&g, Some(&[vec![2], vec![0, 1, 3]])).unwrap();
    assert_eq!((layout.x[2], layout.y[2]), (0.0, 0.0));
    for v in [0, 1, 3] {
        assert!((radius(&layout, v) - 1.0).abs() < 1e-12, "vertex {v}");
    }
}

#[test]
fn shell_layout_without_groups_matches_circular_layout() {
    let g = Graph::new(6);
    assert_eq!(
        shell_layout(&g, None).unwrap(),
        circular_layout(&g).unwrap()
    );
}

#[test]
fn shell_layout_leaves_unlisted_vertices_at_the_origin() {
    let g = Graph::new(4);
    let layout = shell_layout(&g, Some(&[vec![0, 1]])).unwrap();
    assert_eq!((layout.x[2], layout.y[2]), (0.0, 0.0));
    assert_eq!((layout.x[3], layout.y[3]), (0.0, 0.0));
}

#[test]
fn shell_layout_rejects_malformed_groups() {
    let g = Graph::new(4);
    let cases: [&[Vec<usize>]; 4] = [
        &[],
        &[vec![0, 1], vec![]],
        &[vec![0, 4]],
        &[vec![0, 1], vec![1, 2]],
    ];
    for nlist in cases {
        let err = shell_layout(&g, Some(nlist)).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)), "{nlist:?}: {err}");
    }
}
