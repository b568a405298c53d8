//! Densification of sparse reference samples with a uniform cubic B-spline.

use crate::model::Sample;

/// Tolerance used when deciding whether the last grid step still lands on
/// the maximum PK.
const GRID_EPSILON: f64 = 1e-9;

/// Largest grid a single call will build.
pub const MAX_GRID_POINTS: usize = 10_000_000;

/// Uniform cubic B-spline through a sequence of control values, evaluated on
/// `t` in `[0, 1]`. The missing neighbours at both ends are reflected
/// (`2 * v1 - v2`) so the curve starts and ends on the first and last values.
#[derive(Debug, Clone)]
pub struct BasisSpline<'a> {
    values: &'a [f64],
}

impl<'a> BasisSpline<'a> {
    pub fn new(values: &'a [f64]) -> Self {
        Self { values }
    }

    pub fn value_at(&self, t: f64) -> f64 {
        match self.values.len() {
            0 => return f64::NAN,
            1 => return self.values[0],
            _ => {}
        }
        let n = self.values.len() - 1;
        let (t, i) = if t <= 0.0 {
            (0.0, 0)
        } else if t >= 1.0 {
            (1.0, n - 1)
        } else {
            (t, ((t * n as f64).floor() as usize).min(n - 1))
        };
        let v1 = self.values[i];
        let v2 = self.values[i + 1];
        let v0 = if i > 0 { self.values[i - 1] } else { 2.0 * v1 - v2 };
        let v3 = if i < n - 1 {
            self.values[i + 2]
        } else {
            2.0 * v2 - v1
        };
        basis((t - i as f64 / n as f64) * n as f64, v0, v1, v2, v3)
    }
}

fn basis(t1: f64, v0: f64, v1: f64, v2: f64, v3: f64) -> f64 {
    let t2 = t1 * t1;
    let t3 = t2 * t1;
    ((1.0 - 3.0 * t1 + 3.0 * t2 - t3) * v0
        + (4.0 - 6.0 * t2 + 3.0 * t3) * v1
        + (1.0 + 3.0 * t1 + 3.0 * t2 - 3.0 * t3) * v2
        + t3 * v3)
        / 6.0
}

/// Builds the PK grid `min, min + step, ...` up to `max`.
///
/// Returns an empty grid when it would hold more than [`MAX_GRID_POINTS`].
pub fn pk_grid(min_pk: f64, max_pk: f64, step: f64) -> Vec<f64> {
    if !step.is_finite() || step <= 0.0 || !min_pk.is_finite() || !max_pk.is_finite() {
        return Vec::new();
    }
    let span = max_pk - min_pk;
    if span <= 0.0 {
        return vec![min_pk];
    }
    let intervals = (span / step + GRID_EPSILON).floor();
    let count = if intervals.is_finite() && intervals < MAX_GRID_POINTS as f64 {
        (intervals as usize).checked_add(1)
    } else {
        None
    };
    let Some(count) = count.filter(|c| *c <= MAX_GRID_POINTS) else {
        log::warn!("PK grid from {min_pk} to {max_pk} every {step} is too large, skipped");
        return Vec::new();
    };
    (0..count)
        .map(|i| (min_pk + i as f64 * step).min(max_pk))
        .collect()
}

/// Interpolates `(pk, x, y)` samples onto a regular PK grid.
///
/// The spline parameter of grid point `i` is `i / (len - 1)`, i.e. the index
/// fraction rather than the PK fraction. For unevenly spaced inputs this
/// shifts positions along the curve.
///
/// Returns an empty vector when the inputs are unusable: mismatched lengths,
/// no finite triple, or a non-positive step.
pub fn interpolate(pk_samples: &[f64], x_samples: &[f64], y_samples: &[f64], step: f64) -> Vec<Sample> {
    if pk_samples.len() != x_samples.len() || pk_samples.len() != y_samples.len() {
        log::warn!(
            "interpolate: sample arrays differ in length ({}, {}, {})",
            pk_samples.len(),
            x_samples.len(),
            y_samples.len()
        );
        return Vec::new();
    }
    let mut pks = Vec::with_capacity(pk_samples.len());
    let mut xs = Vec::with_capacity(x_samples.len());
    let mut ys = Vec::with_capacity(y_samples.len());
    for ((&pk, &x), &y) in pk_samples.iter().zip(x_samples).zip(y_samples) {
        if pk.is_finite() && x.is_finite() && y.is_finite() {
            pks.push(pk);
            xs.push(x);
            ys.push(y);
        }
    }
    if pks.is_empty() {
        return Vec::new();
    }
    if pks.len() < pk_samples.len() {
        log::warn!(
            "interpolate: dropped {} non-finite samples",
            pk_samples.len() - pks.len()
        );
    }

    let min_pk = pks.iter().copied().fold(f64::INFINITY, f64::min);
    let max_pk = pks.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let grid = pk_grid(min_pk, max_pk, step);
    if grid.is_empty() {
        log::warn!("interpolate: invalid step {step}");
        return Vec::new();
    }

    let x_spline = BasisSpline::new(&xs);
    let y_spline = BasisSpline::new(&ys);
    let last = (grid.len() - 1).max(1) as f64;
    grid.iter()
        .enumerate()
        .map(|(i, &pk)| {
            let t = i as f64 / last;
            Sample::new(pk, x_spline.value_at(t), y_spline.value_at(t))
        })
        .collect()
}
