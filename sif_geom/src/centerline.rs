//! Per-track centerlines built from sparse reference points.

use std::collections::BTreeMap;

use crate::geometry::{Point, Vector};
use crate::interpolate::interpolate;
use crate::model::{InterpolatedSample, ReferencePoint, Sample, TrackKey};

/// PK tolerance when merging boundary samples into a slice.
const PK_EPSILON: f64 = 1e-9;

/// Ordered samples of one track, strictly ascending in PK.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TrackCenterline {
    pub key: TrackKey,
    pub samples: Vec<Sample>,
}

impl TrackCenterline {
    /// Creates a centerline from samples already sorted by PK.
    pub fn new(key: TrackKey, samples: Vec<Sample>) -> Self {
        Self { key, samples }
    }

    /// Empty centerline, the result for groups with fewer than two distinct
    /// PKs.
    pub fn empty(key: TrackKey) -> Self {
        Self {
            key,
            samples: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Whether any geometry can be derived from this centerline.
    pub fn is_renderable(&self) -> bool {
        self.samples.len() >= 2
    }

    pub fn min_pk(&self) -> Option<f64> {
        self.samples.first().map(|s| s.pk)
    }

    pub fn max_pk(&self) -> Option<f64> {
        self.samples.last().map(|s| s.pk)
    }

    pub fn points(&self) -> Vec<Point> {
        self.samples.iter().map(Sample::point).collect()
    }

    /// Samples tagged with this centerline's line and track.
    pub fn interpolated_samples(&self) -> Vec<InterpolatedSample> {
        self.samples
            .iter()
            .map(|s| InterpolatedSample {
                pk: s.pk,
                x: s.x,
                y: s.y,
                line: self.key.line.clone(),
                track: self.key.track.clone(),
            })
            .collect()
    }

    /// Index of the segment `[i, i + 1]` containing `pk`, clamped to the
    /// first or last segment.
    fn segment_index(&self, pk: f64) -> Option<usize> {
        if self.samples.len() < 2 {
            return None;
        }
        let last = self.samples.len() - 2;
        let idx = self.samples.partition_point(|s| s.pk <= pk);
        Some(idx.saturating_sub(1).min(last))
    }

    /// Position at `pk` by linear interpolation between neighbouring samples.
    /// PKs outside the centerline are clamped to its ends.
    pub fn position_at(&self, pk: f64) -> Option<Point> {
        let first = self.samples.first()?;
        let last = self.samples.last()?;
        if pk <= first.pk {
            return Some(first.point());
        }
        if pk >= last.pk {
            return Some(last.point());
        }
        let i = self.segment_index(pk)?;
        let a = &self.samples[i];
        let b = &self.samples[i + 1];
        let span = b.pk - a.pk;
        let t = if span.abs() < f64::EPSILON {
            0.0
        } else {
            (pk - a.pk) / span
        };
        Some(Point::new(a.x + t * (b.x - a.x), a.y + t * (b.y - a.y)))
    }

    /// Unit left-hand normal of the segment containing `pk`. Degenerate
    /// segments borrow the direction of the nearest usable one; a centerline
    /// without any usable segment yields the zero vector.
    pub fn normal_at(&self, pk: f64) -> Vector {
        let Some(start) = self.segment_index(pk) else {
            return Vector::default();
        };
        let seg_count = self.samples.len() - 1;
        for dist in 0..seg_count {
            let candidates = [start.checked_sub(dist), Some(start + dist)];
            for i in candidates.into_iter().flatten() {
                if i >= seg_count {
                    continue;
                }
                let a = self.samples[i].point();
                let b = self.samples[i + 1].point();
                if let Some(dir) = a.to(b).normalized() {
                    return dir.perpendicular();
                }
            }
        }
        Vector::default()
    }

    /// Part of the centerline between two PKs, with interpolated samples at
    /// the bounds. The range is clipped to the centerline's own extent.
    pub fn slice(&self, pk_start: f64, pk_end: f64) -> TrackCenterline {
        let (Some(min_pk), Some(max_pk)) = (self.min_pk(), self.max_pk()) else {
            return TrackCenterline::empty(self.key.clone());
        };
        let (lo, hi) = if pk_start <= pk_end {
            (pk_start, pk_end)
        } else {
            (pk_end, pk_start)
        };
        let start = lo.max(min_pk);
        let end = hi.min(max_pk);
        if start > end {
            return TrackCenterline::empty(self.key.clone());
        }

        let mut samples = Vec::new();
        if let Some(p) = self.position_at(start) {
            samples.push(Sample::new(start, p.x, p.y));
        }
        for s in &self.samples {
            if s.pk > start + PK_EPSILON && s.pk < end - PK_EPSILON {
                samples.push(*s);
            }
        }
        if end > start + PK_EPSILON {
            if let Some(p) = self.position_at(end) {
                samples.push(Sample::new(end, p.x, p.y));
            }
        }
        TrackCenterline::new(self.key.clone(), samples)
    }
}

/// Groups reference points by `(line, track)` and densifies each group into a
/// centerline sampled every `step` PK.
///
/// Consecutive points sharing a PK are skipped. Groups left with fewer than
/// two distinct PKs produce an empty centerline.
pub fn build_centerlines(points: &[ReferencePoint], step: f64) -> BTreeMap<TrackKey, TrackCenterline> {
    let mut groups: BTreeMap<TrackKey, Vec<Sample>> = BTreeMap::new();
    let mut skipped = 0usize;
    for p in points {
        if !p.is_finite() {
            skipped += 1;
            continue;
        }
        groups
            .entry(p.key())
            .or_default()
            .push(Sample::new(p.pk, p.x, p.y));
    }
    if skipped > 0 {
        log::warn!("skipped {skipped} reference points with non-finite values");
    }

    let mut centerlines = BTreeMap::new();
    for (key, mut refs) in groups {
        refs.sort_by(|a, b| a.pk.total_cmp(&b.pk));
        let centerline = build_track(&key, &refs, step);
        if !centerline.is_renderable() {
            log::warn!("track {key} has fewer than two distinct PKs, no centerline built");
        } else {
            log::debug!(
                "track {key}: {} reference points -> {} samples",
                refs.len(),
                centerline.len()
            );
        }
        centerlines.insert(key, centerline);
    }
    centerlines
}

fn build_track(key: &TrackKey, refs: &[Sample], step: f64) -> TrackCenterline {
    let mut samples: Vec<Sample> = Vec::new();
    for pair in refs.windows(2) {
        let (p1, p2) = (pair[0], pair[1]);
        if p1.pk == p2.pk {
            continue;
        }
        let segment = interpolate(&[p1.pk, p2.pk], &[p1.x, p2.x], &[p1.y, p2.y], step);
        for s in segment {
            if samples.last().map_or(true, |last| s.pk > last.pk) {
                samples.push(s);
            }
        }
    }
    if let (Some(last_ref), Some(last)) = (refs.last(), samples.last()) {
        if last_ref.pk > last.pk + PK_EPSILON {
            samples.push(*last_ref);
        }
    }
    if samples.len() < 2 {
        return TrackCenterline::empty(key.clone());
    }
    TrackCenterline::new(key.clone(), samples)
}
