//! Geometry core for the SIF railway map: centerlines interpolated from
//! manually placed PK reference points, and the polygons drawn for zones
//! along one or two tracks.

pub mod centerline;
pub mod config;
pub mod error;
pub mod geometry;
pub mod interpolate;
pub mod io;
pub mod model;
pub mod offset;
pub mod paired;
pub mod pairing;
pub mod zones;

pub use centerline::{build_centerlines, TrackCenterline};
pub use config::GeometryConfig;
pub use error::GeometryError;
pub use interpolate::interpolate;
pub use model::{InterpolatedSample, ReferencePoint, Sample, TrackKey, Zone};
pub use offset::{build_offset_borders, OffsetBorders};
pub use paired::{compute_paired_polygons, PairedOptions, PairedPolygons};
pub use pairing::{resolve_pairings, PairingCandidate, Pairings, TrackPairing};
pub use zones::{PolygonKind, ZoneLayout, ZonePolygon};
