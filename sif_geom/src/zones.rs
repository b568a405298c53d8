//! Assembles the polygons of every zone: paired tracks meet at a median,
//! other tracks get a plain offset outline.

use std::collections::BTreeMap;

use crate::centerline::TrackCenterline;
use crate::config::GeometryConfig;
use crate::geometry::Point;
use crate::model::{TrackKey, Zone};
use crate::offset::build_offset_borders;
use crate::paired::{compute_paired_polygons, PairedOptions};
use crate::pairing::{resolve_pairings, PairingCandidate, Pairings};

/// How a zone polygon was derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolygonKind {
    Single,
    Paired,
}

/// Closed outline of one zone on one track, in display coordinates.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZonePolygon {
    pub zone_name: String,
    pub track: TrackKey,
    pub kind: PolygonKind,
    pub points: Vec<Point>,
}

/// One track's share of a named zone, duplicates merged.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneTrack {
    pub key: TrackKey,
    pub pk_start: f64,
    pub pk_end: f64,
    pub width: Option<f64>,
}

/// All tracks of one zone name, in first-seen order.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneGroup {
    pub name: String,
    pub tracks: Vec<ZoneTrack>,
}

/// Groups zone records by name. Records naming the same track twice are
/// merged into the union of their PK ranges; the first explicit width wins.
pub fn group_zones(zones: &[Zone]) -> Vec<ZoneGroup> {
    let mut groups: Vec<ZoneGroup> = Vec::new();
    for zone in zones {
        let (start, end) = zone.pk_range();
        if !start.is_finite() || !end.is_finite() {
            log::warn!("zone {} on {}: non-finite PK range, skipped", zone.name, zone.key());
            continue;
        }
        let idx = match groups.iter().position(|g| g.name == zone.name) {
            Some(idx) => idx,
            None => {
                groups.push(ZoneGroup {
                    name: zone.name.clone(),
                    tracks: Vec::new(),
                });
                groups.len() - 1
            }
        };
        let key = zone.key();
        let tracks = &mut groups[idx].tracks;
        match tracks.iter_mut().find(|t| t.key == key) {
            Some(track) => {
                track.pk_start = track.pk_start.min(start);
                track.pk_end = track.pk_end.max(end);
                if track.width.is_none() {
                    track.width = zone.width;
                }
            }
            None => tracks.push(ZoneTrack {
                key,
                pk_start: start,
                pk_end: end,
                width: zone.width,
            }),
        }
    }
    groups
}

fn find_slice<'s, 't>(slices: &'s [Slice<'t>], key: &TrackKey) -> Option<&'s Slice<'t>> {
    slices.iter().find(|s| &s.track.key == key)
}

/// Builds zone geometry against a fixed set of centerlines.
#[derive(Debug, Clone, Copy)]
pub struct ZoneLayout<'a> {
    centerlines: &'a BTreeMap<TrackKey, TrackCenterline>,
    config: &'a GeometryConfig,
}

struct Slice<'t> {
    track: &'t ZoneTrack,
    centerline: TrackCenterline,
}

impl<'a> ZoneLayout<'a> {
    pub fn new(
        centerlines: &'a BTreeMap<TrackKey, TrackCenterline>,
        config: &'a GeometryConfig,
    ) -> Self {
        Self {
            centerlines,
            config,
        }
    }

    fn slices<'t>(&self, group: &'t ZoneGroup) -> Vec<Slice<'t>> {
        let mut slices = Vec::new();
        for track in &group.tracks {
            let Some(centerline) = self.centerlines.get(&track.key) else {
                log::warn!("zone {}: no reference points for track {}", group.name, track.key);
                continue;
            };
            let slice = centerline.slice(track.pk_start, track.pk_end);
            if !slice.is_renderable() {
                log::warn!(
                    "zone {}: track {} has no centerline between PK {} and {}",
                    group.name,
                    track.key,
                    track.pk_start,
                    track.pk_end
                );
                continue;
            }
            slices.push(Slice {
                track,
                centerline: slice,
            });
        }
        slices
    }

    fn pair_slices(&self, slices: &[Slice<'_>]) -> Pairings {
        let candidates: Vec<PairingCandidate<'_>> = slices
            .iter()
            .map(|s| PairingCandidate::new(&s.centerline))
            .collect();
        resolve_pairings(&candidates, self.config.adjacency_threshold)
    }

    /// Pairing decisions for every zone name.
    pub fn pairings(&self, zones: &[Zone]) -> Vec<(String, Pairings)> {
        group_zones(zones)
            .iter()
            .map(|group| (group.name.clone(), self.pair_slices(&self.slices(group))))
            .collect()
    }

    fn single(&self, name: &str, slice: &Slice<'_>, zoom: f64) -> ZonePolygon {
        let borders = build_offset_borders(
            &slice.centerline,
            self.width_of(slice),
            zoom,
            self.config.offset_multiplier,
        );
        ZonePolygon {
            zone_name: name.to_string(),
            track: slice.track.key.clone(),
            kind: PolygonKind::Single,
            points: borders.polygon(),
        }
    }

    fn width_of(&self, slice: &Slice<'_>) -> f64 {
        slice
            .track
            .width
            .filter(|w| w.is_finite() && *w > 0.0)
            .unwrap_or(self.config.default_zone_width)
    }

    /// Polygons of every zone at the given display zoom. A zoom that is not
    /// a positive finite number, or an invalid configuration, yields no
    /// polygons.
    pub fn build(&self, zones: &[Zone], zoom: f64) -> Vec<ZonePolygon> {
        if !zoom.is_finite() || zoom <= 0.0 {
            log::warn!("zone layout: unusable zoom {zoom}");
            return Vec::new();
        }
        if let Err(e) = self.config.validate() {
            log::warn!("zone layout: {e}");
            return Vec::new();
        }
        let options = PairedOptions {
            samples: self.config.paired_samples,
            zoom,
            median_separation: self.config.median_separation,
        };
        let mut polygons = Vec::new();
        for group in group_zones(zones) {
            let slices = self.slices(&group);
            let pairings = self.pair_slices(&slices);

            for pair in &pairings.pairs {
                let a = find_slice(&slices, &pair.a);
                let b = find_slice(&slices, &pair.b);
                let (Some(a), Some(b)) = (a, b) else {
                    continue;
                };
                match compute_paired_polygons(
                    &a.centerline,
                    &b.centerline,
                    self.width_of(a),
                    self.width_of(b),
                    &options,
                ) {
                    Some(paired) => {
                        polygons.push(ZonePolygon {
                            zone_name: group.name.clone(),
                            track: a.track.key.clone(),
                            kind: PolygonKind::Paired,
                            points: paired.poly_a,
                        });
                        polygons.push(ZonePolygon {
                            zone_name: group.name.clone(),
                            track: b.track.key.clone(),
                            kind: PolygonKind::Paired,
                            points: paired.poly_b,
                        });
                    }
                    None => {
                        log::warn!(
                            "zone {}: {} and {} do not overlap, drawing them separately",
                            group.name,
                            a.track.key,
                            b.track.key
                        );
                        polygons.push(self.single(&group.name, a, zoom));
                        polygons.push(self.single(&group.name, b, zoom));
                    }
                }
            }
            for key in &pairings.unpaired {
                if let Some(slice) = find_slice(&slices, key) {
                    polygons.push(self.single(&group.name, slice, zoom));
                }
            }
        }
        log::debug!("built {} zone polygons", polygons.len());
        polygons
    }
}
