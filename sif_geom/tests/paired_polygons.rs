use sif_geom::geometry::polygon_area;
use sif_geom::{
    build_centerlines, compute_paired_polygons, resolve_pairings, GeometryConfig,
    PairedOptions, PairingCandidate, ReferencePoint, Sample, TrackCenterline, TrackKey,
};

fn span(track: &str, pk0: f64, pk1: f64, y: f64) -> TrackCenterline {
    TrackCenterline::new(
        TrackKey::new("L1", track),
        vec![
            Sample::new(pk0, pk0 * 10.0, y),
            Sample::new(pk1, pk1 * 10.0, y),
        ],
    )
}

#[test]
fn disjoint_ranges_return_none() {
    let a = span("V1", 0.0, 10.0, 0.0);
    let b = span("V2", 20.0, 30.0, 20.0);
    assert!(compute_paired_polygons(&a, &b, 20.0, 20.0, &PairedOptions::default()).is_none());
}

#[test]
fn touching_ranges_return_none() {
    let a = span("V1", 0.0, 10.0, 0.0);
    let b = span("V2", 10.0, 30.0, 20.0);
    assert!(compute_paired_polygons(&a, &b, 20.0, 20.0, &PairedOptions::default()).is_none());
}

#[test]
fn overlapping_ranges_cover_only_the_overlap() {
    let a = span("V1", 0.0, 10.0, 0.0);
    let b = span("V2", 5.0, 15.0, 20.0);
    let out = compute_paired_polygons(&a, &b, 20.0, 20.0, &PairedOptions::default()).unwrap();
    assert_eq!(out.median.len(), 31);
    assert!((out.median[0].pk - 5.0).abs() < 1e-9);
    assert!((out.median.last().unwrap().pk - 10.0).abs() < 1e-9);
    assert_eq!(out.poly_a.len(), 62);
    assert_eq!(out.poly_b.len(), 62);
}

#[test]
fn parallel_tracks_share_a_median_halfway() {
    let points = vec![
        ReferencePoint::new("L1", "V1", 0.0, 0.0, 0.0),
        ReferencePoint::new("L1", "V1", 10.0, 100.0, 0.0),
        ReferencePoint::new("L1", "V2", 0.0, 0.0, 20.0),
        ReferencePoint::new("L1", "V2", 10.0, 100.0, 20.0),
    ];
    let config = GeometryConfig::default();
    let lines = build_centerlines(&points, config.pk_step);
    let v1 = &lines[&TrackKey::new("L1", "V1")];
    let v2 = &lines[&TrackKey::new("L1", "V2")];

    let pairings = resolve_pairings(
        &[PairingCandidate::new(v1), PairingCandidate::new(v2)],
        config.adjacency_threshold,
    );
    assert_eq!(pairings.pairs.len(), 1);
    assert!((pairings.pairs[0].distance - 20.0).abs() < 1e-9);

    let out = compute_paired_polygons(v1, v2, 20.0, 20.0, &PairedOptions::default()).unwrap();
    assert!(out.median.iter().all(|m| (m.y - 10.0).abs() < 1e-9));
}

#[test]
fn polygons_lie_on_their_own_side() {
    let a = span("V1", 0.0, 10.0, 0.0);
    let b = span("V2", 0.0, 10.0, 30.0);
    let out = compute_paired_polygons(&a, &b, 10.0, 10.0, &PairedOptions::default()).unwrap();
    assert!(out.poly_a.iter().all(|p| p.y < 15.0));
    assert!(out.poly_b.iter().all(|p| p.y > 15.0));
    // Each polygon spans from the outer border (5 beyond the track) to
    // 0.5 short of the median.
    let expected = 100.0 * (15.0 + 5.0 - 0.5);
    assert!((polygon_area(&out.poly_a) - expected).abs() < 1e-6);
    assert!((polygon_area(&out.poly_b) - expected).abs() < 1e-6);
}

#[test]
fn repeated_calls_are_identical() {
    let a = span("V1", 0.0, 10.0, 0.0);
    let b = span("V2", 2.0, 12.0, 25.0);
    let options = PairedOptions {
        samples: 40,
        zoom: 1.25,
        median_separation: 0.5,
    };
    assert_eq!(
        compute_paired_polygons(&a, &b, 14.0, 8.0, &options),
        compute_paired_polygons(&a, &b, 14.0, 8.0, &options)
    );
}

#[test]
fn non_finite_parameters_return_none() {
    let a = span("V1", 0.0, 10.0, 0.0);
    let b = span("V2", 0.0, 10.0, 20.0);
    let options = PairedOptions::default();
    assert!(compute_paired_polygons(&a, &b, f64::NAN, 20.0, &options).is_none());
    assert!(compute_paired_polygons(&a, &b, 20.0, f64::INFINITY, &options).is_none());
    let nan_zoom = PairedOptions {
        zoom: f64::NAN,
        ..Default::default()
    };
    assert!(compute_paired_polygons(&a, &b, 20.0, 20.0, &nan_zoom).is_none());
}
