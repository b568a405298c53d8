use sif_geom::geometry::{distance, midpoint, polygon_area, Point};
use sif_geom::{build_offset_borders, OffsetBorders, Sample, TrackCenterline, TrackKey};

fn curved() -> TrackCenterline {
    let samples = (0..=20)
        .map(|i| {
            let pk = i as f64 * 0.5;
            Sample::new(pk, pk * 10.0, (pk * 0.4).sin() * 25.0)
        })
        .collect();
    TrackCenterline::new(TrackKey::new("L1", "V1"), samples)
}

#[test]
fn borders_are_symmetric_around_the_centerline() {
    let c = curved();
    let (width, zoom) = (12.0, 1.5);
    let borders = build_offset_borders(&c, width, zoom, 1.0);
    assert_eq!(borders.left.len(), c.len());
    for (i, s) in c.samples.iter().enumerate() {
        let (l, r) = (borders.left[i], borders.right[i]);
        assert!((distance(l, r) - width * zoom).abs() < 1e-6);
        let m = midpoint(l, r);
        assert!((m.x - s.x * zoom).abs() < 1e-6);
        assert!((m.y - s.y * zoom).abs() < 1e-6);
    }
}

#[test]
fn multiplier_widens_the_borders() {
    let c = curved();
    let borders = build_offset_borders(&c, 10.0, 1.0, 1.5);
    assert!((distance(borders.left[3], borders.right[3]) - 15.0).abs() < 1e-6);
}

#[test]
fn left_border_is_on_the_left_of_travel() {
    let c = TrackCenterline::new(
        TrackKey::new("L1", "V1"),
        vec![Sample::new(0.0, 0.0, 0.0), Sample::new(1.0, 10.0, 0.0)],
    );
    let borders = build_offset_borders(&c, 4.0, 1.0, 1.0);
    assert_eq!(borders.left[0], Point::new(0.0, 2.0));
    assert_eq!(borders.right[1], Point::new(10.0, -2.0));
}

#[test]
fn polygon_closes_left_then_reversed_right() {
    let c = TrackCenterline::new(
        TrackKey::new("L1", "V1"),
        vec![Sample::new(0.0, 0.0, 0.0), Sample::new(1.0, 10.0, 0.0)],
    );
    let poly = build_offset_borders(&c, 4.0, 1.0, 1.0).polygon();
    assert_eq!(
        poly,
        vec![
            Point::new(0.0, 2.0),
            Point::new(10.0, 2.0),
            Point::new(10.0, -2.0),
            Point::new(0.0, -2.0),
        ]
    );
    assert!((polygon_area(&poly) - 40.0).abs() < 1e-9);
}

#[test]
fn coincident_samples_do_not_produce_nan() {
    let c = TrackCenterline::new(
        TrackKey::new("L1", "V1"),
        vec![
            Sample::new(0.0, 0.0, 0.0),
            Sample::new(1.0, 0.0, 0.0),
            Sample::new(2.0, 10.0, 0.0),
        ],
    );
    let poly = build_offset_borders(&c, 4.0, 1.0, 1.0).polygon();
    assert!(poly.iter().all(|p| p.is_finite()));
}

#[test]
fn non_finite_parameters_give_empty_borders() {
    let c = curved();
    assert_eq!(build_offset_borders(&c, f64::NAN, 1.0, 1.0), OffsetBorders::default());
    assert!(build_offset_borders(&c, 10.0, f64::INFINITY, 1.0).left.is_empty());
    assert!(build_offset_borders(&c, 10.0, 1.0, f64::NAN).polygon().is_empty());
}

#[test]
fn repeated_calls_are_identical() {
    let c = curved();
    assert_eq!(
        build_offset_borders(&c, 12.0, 1.5, 1.5),
        build_offset_borders(&c, 12.0, 1.5, 1.5)
    );
}
