//! Records exchanged with the point and zone stores.

use std::fmt;

use crate::geometry::Point;

/// Manually placed anchor of a track at a kilometric position.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ReferencePoint {
    pub line: String,
    pub track: String,
    pub pk: f64,
    pub x: f64,
    pub y: f64,
}

impl ReferencePoint {
    pub fn new(line: impl Into<String>, track: impl Into<String>, pk: f64, x: f64, y: f64) -> Self {
        Self {
            line: line.into(),
            track: track.into(),
            pk,
            x,
            y,
        }
    }

    pub fn key(&self) -> TrackKey {
        TrackKey::new(&self.line, &self.track)
    }

    pub fn is_finite(&self) -> bool {
        self.pk.is_finite() && self.x.is_finite() && self.y.is_finite()
    }
}

/// Identifies one track of one railway line.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub struct TrackKey {
    pub line: String,
    pub track: String,
}

impl TrackKey {
    pub fn new(line: impl Into<String>, track: impl Into<String>) -> Self {
        Self {
            line: line.into(),
            track: track.into(),
        }
    }
}

impl fmt::Display for TrackKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}||{}", self.line, self.track)
    }
}

/// A position on a centerline.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Sample {
    pub pk: f64,
    pub x: f64,
    pub y: f64,
}

impl Sample {
    pub fn new(pk: f64, x: f64, y: f64) -> Self {
        Self { pk, x, y }
    }

    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// A centerline sample tagged with the track it belongs to.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct InterpolatedSample {
    pub pk: f64,
    pub x: f64,
    pub y: f64,
    pub line: String,
    pub track: String,
}

/// Named span along one track. Records sharing a `name` describe one zone
/// drawn across several tracks.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    pub name: String,
    pub line: String,
    pub track: String,
    pub pk_start: f64,
    pub pk_end: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
}

impl Zone {
    pub fn new(
        name: impl Into<String>,
        line: impl Into<String>,
        track: impl Into<String>,
        pk_start: f64,
        pk_end: f64,
    ) -> Self {
        Self {
            name: name.into(),
            line: line.into(),
            track: track.into(),
            pk_start,
            pk_end,
            width: None,
            info: None,
        }
    }

    pub fn with_width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    pub fn key(&self) -> TrackKey {
        TrackKey::new(&self.line, &self.track)
    }

    /// PK range with the bounds in ascending order.
    pub fn pk_range(&self) -> (f64, f64) {
        if self.pk_start <= self.pk_end {
            (self.pk_start, self.pk_end)
        } else {
            (self.pk_end, self.pk_start)
        }
    }

    /// Zone width, or `default` when unset or unusable.
    pub fn width_or(&self, default: f64) -> f64 {
        match self.width {
            Some(w) if w.is_finite() && w > 0.0 => w,
            _ => default,
        }
    }
}
