//! Reading point/zone documents exported by the map store and writing the
//! resulting geometry.
//!
//! Numeric fields are accepted either as JSON numbers or as strings, with a
//! comma allowed as decimal separator (`"12,5"`), as produced by spreadsheet
//! imports.

use std::path::Path;

use serde_json::Value;

use crate::centerline::TrackCenterline;
use crate::error::{GeometryError, Result};
use crate::model::{ReferencePoint, Zone};
use crate::zones::ZonePolygon;

/// Parses a number from a JSON number or a possibly comma-decimal string.
pub fn parse_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().replace(',', ".").parse::<f64>().ok(),
        _ => None,
    }?;
    n.is_finite().then_some(n)
}

fn text(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

#[derive(Debug, serde::Deserialize)]
struct RawPoint {
    #[serde(default)]
    line: Value,
    #[serde(default)]
    track: Value,
    #[serde(default)]
    pk: Value,
    #[serde(default)]
    x: Value,
    #[serde(default)]
    y: Value,
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawZone {
    #[serde(default)]
    name: Value,
    #[serde(default)]
    line: Value,
    #[serde(default)]
    track: Value,
    #[serde(default, alias = "pk_debut")]
    pk_start: Value,
    #[serde(default, alias = "pk_fin")]
    pk_end: Value,
    #[serde(default)]
    width: Value,
    #[serde(default)]
    info: Value,
}

/// Parses a JSON array of reference point documents. Records whose PK or
/// coordinates are missing or not numeric are skipped.
pub fn parse_points_json(text_doc: &str) -> Result<Vec<ReferencePoint>> {
    let raw: Vec<RawPoint> = serde_json::from_str(text_doc)?;
    let total = raw.len();
    let points: Vec<ReferencePoint> = raw
        .into_iter()
        .enumerate()
        .filter_map(|(idx, r)| {
            match (parse_number(&r.pk), parse_number(&r.x), parse_number(&r.y)) {
                (Some(pk), Some(x), Some(y)) => {
                    Some(ReferencePoint::new(text(&r.line), text(&r.track), pk, x, y))
                }
                _ => {
                    log::warn!("point record {idx}: unusable pk/x/y, skipped");
                    None
                }
            }
        })
        .collect();
    log::debug!("read {} of {} reference points", points.len(), total);
    Ok(points)
}

/// Parses a JSON array of zone documents.
pub fn parse_zones_json(text_doc: &str) -> Result<Vec<Zone>> {
    let raw: Vec<RawZone> = serde_json::from_str(text_doc)?;
    let mut zones = Vec::with_capacity(raw.len());
    for (index, r) in raw.into_iter().enumerate() {
        let (Some(pk_start), Some(pk_end)) = (parse_number(&r.pk_start), parse_number(&r.pk_end))
        else {
            return Err(GeometryError::InvalidRecord {
                index,
                reason: "pkStart and pkEnd must be numbers".into(),
            });
        };
        let info = text(&r.info);
        zones.push(Zone {
            name: text(&r.name),
            line: text(&r.line),
            track: text(&r.track),
            pk_start,
            pk_end,
            width: parse_number(&r.width),
            info: (!info.is_empty()).then_some(info),
        });
    }
    Ok(zones)
}

pub fn read_points_json<P: AsRef<Path>>(path: P) -> Result<Vec<ReferencePoint>> {
    parse_points_json(&std::fs::read_to_string(path)?)
}

pub fn read_zones_json<P: AsRef<Path>>(path: P) -> Result<Vec<Zone>> {
    parse_zones_json(&std::fs::read_to_string(path)?)
}

/// Converts zone polygons to a GeoJSON feature collection. Rings are closed
/// and each feature carries the zone name, line, track and kind.
pub fn zones_to_geojson(polygons: &[ZonePolygon]) -> geojson::FeatureCollection {
    let features = polygons
        .iter()
        .filter(|poly| !poly.points.is_empty())
        .map(|poly| {
            let mut ring: Vec<Vec<f64>> = poly.points.iter().map(|p| vec![p.x, p.y]).collect();
            if let Some(first) = ring.first().cloned() {
                ring.push(first);
            }
            let mut props = geojson::JsonObject::new();
            props.insert("zoneName".into(), Value::from(poly.zone_name.clone()));
            props.insert("line".into(), Value::from(poly.track.line.clone()));
            props.insert("track".into(), Value::from(poly.track.track.clone()));
            props.insert(
                "kind".into(),
                serde_json::to_value(poly.kind).unwrap_or(Value::Null),
            );
            geojson::Feature {
                bbox: None,
                geometry: Some(geojson::Geometry::new(geojson::Value::Polygon(vec![ring]))),
                id: None,
                properties: Some(props),
                foreign_members: None,
            }
        })
        .collect();
    geojson::FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

/// Writes zone polygons as GeoJSON.
pub fn write_zones_geojson<P: AsRef<Path>>(path: P, polygons: &[ZonePolygon]) -> Result<()> {
    let collection = zones_to_geojson(polygons);
    std::fs::write(path, serde_json::to_string_pretty(&collection)?)?;
    Ok(())
}

/// Writes any serialisable value as pretty JSON.
pub fn write_json<P: AsRef<Path>, T: serde::Serialize + ?Sized>(path: P, value: &T) -> Result<()> {
    std::fs::write(path, serde_json::to_string_pretty(value)?)?;
    Ok(())
}

/// Writes the samples of every renderable centerline, tagged with their
/// line and track, as one flat JSON array.
pub fn write_centerlines_json<'a, P, I>(path: P, centerlines: I) -> Result<usize>
where
    P: AsRef<Path>,
    I: IntoIterator<Item = &'a TrackCenterline>,
{
    let mut count = 0;
    let mut samples = Vec::new();
    for c in centerlines.into_iter().filter(|c| c.is_renderable()) {
        count += 1;
        samples.extend(c.interpolated_samples());
    }
    write_json(path, &samples)?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_accept_comma_decimals() {
        assert_eq!(parse_number(&Value::from("12,5")), Some(12.5));
        assert_eq!(parse_number(&Value::from(" 3.25 ")), Some(3.25));
        assert_eq!(parse_number(&Value::from(7)), Some(7.0));
        assert_eq!(parse_number(&Value::from("abc")), None);
        assert_eq!(parse_number(&Value::from("NaN")), None);
        assert_eq!(parse_number(&Value::Null), None);
    }

    #[test]
    fn points_with_bad_coordinates_are_skipped() {
        let doc = r#"[
            {"line": 830000, "track": "V1", "pk": "0,5", "x": 10, "y": "20"},
            {"line": "830000", "track": "V1", "pk": "abc", "x": 1, "y": 2},
            {"line": "830000", "track": "V1", "pk": 2}
        ]"#;
        let points = parse_points_json(doc).unwrap();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].line, "830000");
        assert_eq!(points[0].pk, 0.5);
        assert_eq!(points[0].y, 20.0);
    }

    #[test]
    fn zones_accept_aliases_and_reject_bad_pk() {
        let doc = r#"[{"name":"Z","line":"L","track":"1","pk_debut":"1,5","pk_fin":3,"width":"abc","info":"x"}]"#;
        let zones = parse_zones_json(doc).unwrap();
        assert_eq!(zones[0].pk_start, 1.5);
        assert_eq!(zones[0].width, None);
        assert_eq!(zones[0].info.as_deref(), Some("x"));

        let bad = r#"[{"name":"Z","line":"L","track":"1","pkStart":1}]"#;
        match parse_zones_json(bad) {
            Err(GeometryError::InvalidRecord { index, .. }) => assert_eq!(index, 0),
            other => panic!("unexpected {other:?}"),
        }
    }
}
