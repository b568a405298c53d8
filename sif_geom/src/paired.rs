//! Polygons for two paired tracks meeting along their median line.

use crate::centerline::TrackCenterline;
use crate::geometry::{midpoint, Point, Vector};
use crate::model::Sample;

/// Sampling and display parameters of [`compute_paired_polygons`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairedOptions {
    /// Number of intervals across the PK overlap; `samples + 1` points are
    /// produced. Zero is treated as one.
    pub samples: usize,
    pub zoom: f64,
    /// Distance each polygon keeps from the median so the two inner edges
    /// never coincide.
    pub median_separation: f64,
}

impl Default for PairedOptions {
    fn default() -> Self {
        Self {
            samples: 30,
            zoom: 1.0,
            median_separation: 0.5,
        }
    }
}

/// Output of [`compute_paired_polygons`]. Polygon vertices are zoomed, the
/// median is in map coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct PairedPolygons {
    pub poly_a: Vec<Point>,
    pub poly_b: Vec<Point>,
    pub median: Vec<Sample>,
}

/// Outer border point of a track: the center moved half a width along the
/// normal, on the side facing away from the median.
fn outer_point(center: Point, normal: Vector, median: Point, half_width: f64) -> Point {
    let sign = if normal.dot(center.to(median)) > 0.0 {
        -1.0
    } else {
        1.0
    };
    center.offset(normal, half_width * sign)
}

/// Builds one polygon per track over the PK overlap of `a` and `b`.
///
/// Each polygon runs from its track's outer border to the shared median,
/// stopping `median_separation` short of it. Returns `None` when the
/// centerlines do not overlap in PK or either one is not renderable; callers
/// then draw both tracks on their own. Non-finite widths, zoom or separation
/// also yield `None`.
pub fn compute_paired_polygons(
    a: &TrackCenterline,
    b: &TrackCenterline,
    width_a: f64,
    width_b: f64,
    options: &PairedOptions,
) -> Option<PairedPolygons> {
    if !a.is_renderable() || !b.is_renderable() {
        return None;
    }
    let params = [width_a, width_b, options.zoom, options.median_separation];
    if params.iter().any(|v| !v.is_finite()) {
        log::warn!(
            "{} / {}: unusable paired parameters (widths {width_a}, {width_b}, zoom {}, separation {})",
            a.key,
            b.key,
            options.zoom,
            options.median_separation
        );
        return None;
    }
    let start_pk = a.min_pk()?.max(b.min_pk()?);
    let end_pk = a.max_pk()?.min(b.max_pk()?);
    if end_pk.is_nan() || start_pk.is_nan() || end_pk <= start_pk {
        log::debug!("no PK overlap between {} and {}", a.key, b.key);
        return None;
    }

    let samples = options.samples.max(1);
    let zoom = options.zoom;
    let separation = options.median_separation;
    let (half_a, half_b) = (width_a / 2.0, width_b / 2.0);

    let mut median = Vec::with_capacity(samples + 1);
    let mut outer_a = Vec::with_capacity(samples + 1);
    let mut outer_b = Vec::with_capacity(samples + 1);
    let mut inner_a = Vec::with_capacity(samples + 1);
    let mut inner_b = Vec::with_capacity(samples + 1);

    for s in 0..=samples {
        let pk = start_pk + (s as f64 / samples as f64) * (end_pk - start_pk);
        let ca = a.position_at(pk)?;
        let cb = b.position_at(pk)?;
        let m = midpoint(ca, cb);
        median.push(Sample::new(pk, m.x, m.y));

        let normal_a = a.normal_at(pk);
        let normal_b = b.normal_at(pk);
        outer_a.push(outer_point(ca, normal_a, m, half_a).scaled(zoom));
        outer_b.push(outer_point(cb, normal_b, m, half_b).scaled(zoom));

        // Pull each inner edge off the median toward its own track. Coincident
        // tracks fall back to A's normal and its opposite.
        let toward_a = m.to(ca).normalized().unwrap_or(normal_a);
        let toward_b = m
            .to(cb)
            .normalized()
            .unwrap_or(Vector::new(-toward_a.x, -toward_a.y));
        inner_a.push(m.offset(toward_a, separation).scaled(zoom));
        inner_b.push(m.offset(toward_b, separation).scaled(zoom));
    }

    let poly_a = outer_a.into_iter().chain(inner_a.into_iter().rev()).collect();
    let poly_b = inner_b.into_iter().chain(outer_b.into_iter().rev()).collect();
    Some(PairedPolygons {
        poly_a,
        poly_b,
        median,
    })
}
