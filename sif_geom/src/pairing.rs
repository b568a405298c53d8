//! Greedy pairing of adjacent tracks that share a zone.

use crate::centerline::TrackCenterline;
use crate::geometry::{distance, Point};
use crate::model::TrackKey;

/// A track taking part in a multi-track zone.
#[derive(Debug, Clone, Copy)]
pub struct PairingCandidate<'a> {
    pub centerline: &'a TrackCenterline,
    /// Restricts the average position to this PK range when set.
    pub pk_range: Option<(f64, f64)>,
}

impl<'a> PairingCandidate<'a> {
    pub fn new(centerline: &'a TrackCenterline) -> Self {
        Self {
            centerline,
            pk_range: None,
        }
    }

    pub fn with_range(centerline: &'a TrackCenterline, pk_start: f64, pk_end: f64) -> Self {
        Self {
            centerline,
            pk_range: Some((pk_start.min(pk_end), pk_start.max(pk_end))),
        }
    }

    pub fn key(&self) -> &'a TrackKey {
        &self.centerline.key
    }
}

/// Two tracks drawn against a shared median.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct TrackPairing {
    pub a: TrackKey,
    pub b: TrackKey,
    /// Distance between the tracks' average positions.
    pub distance: f64,
}

/// Outcome of [`resolve_pairings`]. Every renderable input key appears
/// exactly once, either in a pair or in `unpaired`.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize)]
pub struct Pairings {
    pub pairs: Vec<TrackPairing>,
    pub unpaired: Vec<TrackKey>,
}

/// Mean position of the samples within `pk_range`, or of the whole
/// centerline when the range is unset or selects nothing.
pub fn average_position(centerline: &TrackCenterline, pk_range: Option<(f64, f64)>) -> Option<Point> {
    let mean = |samples: &mut dyn Iterator<Item = Point>| {
        let (mut sx, mut sy, mut count) = (0.0, 0.0, 0usize);
        for p in samples {
            sx += p.x;
            sy += p.y;
            count += 1;
        }
        (count > 0).then(|| Point::new(sx / count as f64, sy / count as f64))
    };
    if let Some((lo, hi)) = pk_range {
        let mut within = centerline
            .samples
            .iter()
            .filter(|s| s.pk >= lo && s.pk <= hi)
            .map(|s| s.point());
        if let Some(p) = mean(&mut within) {
            return Some(p);
        }
    }
    mean(&mut centerline.samples.iter().map(|s| s.point()))
}

/// Pairs tracks whose average positions are closer than `threshold`.
///
/// Candidates are visited in input order; each unprocessed track claims its
/// nearest unprocessed neighbour (ties go to the earlier candidate). A track
/// whose nearest neighbour is not strictly closer than `threshold` is left
/// unpaired. Accepted pairs are never revisited, so the result is not a
/// globally optimal matching.
///
/// Candidates without a renderable centerline are ignored.
pub fn resolve_pairings(candidates: &[PairingCandidate<'_>], threshold: f64) -> Pairings {
    let tracks: Vec<(&TrackKey, Point)> = candidates
        .iter()
        .filter_map(|c| {
            if !c.centerline.is_renderable() {
                log::debug!("pairing: ignoring track {} without centerline", c.key());
                return None;
            }
            average_position(c.centerline, c.pk_range)
                .filter(Point::is_finite)
                .map(|avg| (c.key(), avg))
        })
        .collect();

    let mut processed = vec![false; tracks.len()];
    let mut result = Pairings::default();
    for i in 0..tracks.len() {
        if processed[i] {
            continue;
        }
        processed[i] = true;
        let mut nearest: Option<(usize, f64)> = None;
        for j in 0..tracks.len() {
            if processed[j] {
                continue;
            }
            let d = distance(tracks[i].1, tracks[j].1);
            if nearest.map_or(true, |(_, best)| d < best) {
                nearest = Some((j, d));
            }
        }
        match nearest {
            Some((j, d)) if d < threshold => {
                processed[j] = true;
                log::debug!("paired {} with {} (distance {d:.2})", tracks[i].0, tracks[j].0);
                result.pairs.push(TrackPairing {
                    a: tracks[i].0.clone(),
                    b: tracks[j].0.clone(),
                    distance: d,
                });
            }
            _ => result.unpaired.push(tracks[i].0.clone()),
        }
    }
    result
}
