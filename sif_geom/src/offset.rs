//! Left/right borders of a centerline at a constant half-width.

use crate::centerline::TrackCenterline;
use crate::geometry::{Point, Vector};

/// Border polylines on both sides of a centerline, already zoomed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OffsetBorders {
    pub left: Vec<Point>,
    pub right: Vec<Point>,
}

impl OffsetBorders {
    /// Closed outline: the left border followed by the reversed right border.
    pub fn polygon(&self) -> Vec<Point> {
        self.left
            .iter()
            .chain(self.right.iter().rev())
            .copied()
            .collect()
    }
}

/// Unit left-hand normals at every vertex of `points`.
///
/// The direction at a vertex is the forward difference at the first vertex,
/// the backward difference at the last and the centred difference elsewhere.
/// Vertices where that direction vanishes reuse the nearest preceding usable
/// normal (or the first following one at the start). A polyline without any
/// usable direction gets zero normals.
pub fn vertex_normals(points: &[Point]) -> Vec<Vector> {
    let n = points.len();
    let mut normals: Vec<Option<Vector>> = Vec::with_capacity(n);
    for i in 0..n {
        let dir = if n < 2 {
            Vector::default()
        } else if i == 0 {
            points[0].to(points[1])
        } else if i == n - 1 {
            points[i - 1].to(points[i])
        } else {
            let d = points[i - 1].to(points[i + 1]);
            Vector::new(d.x / 2.0, d.y / 2.0)
        };
        normals.push(dir.normalized().map(|d| d.perpendicular()));
    }

    let first_valid = normals.iter().flatten().next().copied();
    let mut previous = first_valid;
    normals
        .into_iter()
        .map(|normal| match normal {
            Some(v) => {
                previous = Some(v);
                v
            }
            None => previous.unwrap_or_default(),
        })
        .collect()
}

/// Offsets every sample of `centerline` by `width / 2 * multiplier` along its
/// normal, then applies `zoom`.
///
/// Non-finite `width`, `zoom` or `multiplier` yield empty borders.
pub fn build_offset_borders(
    centerline: &TrackCenterline,
    width: f64,
    zoom: f64,
    multiplier: f64,
) -> OffsetBorders {
    if !width.is_finite() || !zoom.is_finite() || !multiplier.is_finite() {
        log::warn!(
            "track {}: unusable offset parameters (width {width}, zoom {zoom}, multiplier {multiplier})",
            centerline.key
        );
        return OffsetBorders::default();
    }
    let points = centerline.points();
    let half_width = width / 2.0 * multiplier;
    let normals = vertex_normals(&points);
    let mut borders = OffsetBorders {
        left: Vec::with_capacity(points.len()),
        right: Vec::with_capacity(points.len()),
    };
    for (p, n) in points.iter().zip(&normals) {
        borders.left.push(p.offset(*n, half_width).scaled(zoom));
        borders.right.push(p.offset(*n, -half_width).scaled(zoom));
    }
    borders
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normals_of_a_right_angle() {
        let pts = vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
        ];
        let normals = vertex_normals(&pts);
        assert!((normals[0].y - 1.0).abs() < 1e-9);
        assert!((normals[2].x + 1.0).abs() < 1e-9);
        let diag = std::f64::consts::FRAC_1_SQRT_2;
        assert!((normals[1].x + diag).abs() < 1e-9);
        assert!((normals[1].y - diag).abs() < 1e-9);
    }

    #[test]
    fn coincident_points_reuse_previous_normal() {
        let pts = vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 0.0),
        ];
        let normals = vertex_normals(&pts);
        assert!(normals.iter().all(|n| n.x.is_finite() && n.y.is_finite()));
        assert!((normals[2].y - 1.0).abs() < 1e-9);
    }

    #[test]
    fn all_coincident_points_give_zero_normals() {
        let pts = vec![Point::new(3.0, 3.0); 3];
        assert!(vertex_normals(&pts).iter().all(|n| *n == Vector::default()));
    }
}
