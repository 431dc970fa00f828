//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::error::{Error, Result};
use serde_json::Value;

/// Polygon vertex in degrees
#[derive(PartialEq, Clone, Copy, Debug)]
pub struct Vertex {
    pub lng: f64,
    pub lat: f64,
}

impl Vertex {
    pub fn new(lng: f64, lat: f64) -> Vertex {
        Vertex { lng, lat }
    }
}

fn geojson_type(value: &Value) -> Result<&str> {
    value
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| Error::InvalidGeoJson("missing 'type' member".to_string()))
}

fn as_array<'a>(value: &'a Value, what: &str) -> Result<&'a Vec<Value>> {
    value
        .as_array()
        .ok_or_else(|| Error::InvalidGeoJson(format!("{} is not an array", what)))
}

/// Collect the vertices of all polygon rings, holes included, in input order.
///
/// Accepts a Feature, a FeatureCollection or a bare Polygon/MultiPolygon geometry.
/// Features of a collection with other geometry types are skipped.
pub fn extract_vertices(geojson: &Value) -> Result<Vec<Vertex>> {
    let mut vertices = Vec::new();
    match geojson_type(geojson)? {
        "Feature" => {
            let geometry = geojson.get("geometry").unwrap_or(&Value::Null);
            push_geometry(geometry, &mut vertices)?;
        }
        "FeatureCollection" => {
            let features = geojson
                .get("features")
                .ok_or_else(|| Error::InvalidGeoJson("missing 'features' member".to_string()))?;
            for (idx, feature) in as_array(features, "features")?.iter().enumerate() {
                let geometry = feature.get("geometry").unwrap_or(&Value::Null);
                match geometry.get("type").and_then(Value::as_str) {
                    Some("Polygon") | Some("MultiPolygon") => {
                        push_geometry(geometry, &mut vertices)?
                    }
                    other => debug!("Skipping feature #{} with geometry type {:?}", idx, other),
                }
            }
        }
        _ => push_geometry(geojson, &mut vertices)?,
    }
    Ok(vertices)
}

fn push_geometry(geometry: &Value, vertices: &mut Vec<Vertex>) -> Result<()> {
    if geometry.is_null() {
        return Err(Error::UnsupportedGeometry("null".to_string()));
    }
    let coordinates = || {
        geometry
            .get("coordinates")
            .ok_or_else(|| Error::InvalidGeoJson("missing 'coordinates' member".to_string()))
    };
    match geojson_type(geometry)? {
        "Polygon" => push_polygon(coordinates()?, vertices),
        "MultiPolygon" => {
            for polygon in as_array(coordinates()?, "MultiPolygon coordinates")? {
                push_polygon(polygon, vertices)?;
            }
            Ok(())
        }
        other => Err(Error::UnsupportedGeometry(other.to_string())),
    }
}

fn push_polygon(polygon: &Value, vertices: &mut Vec<Vertex>) -> Result<()> {
    for ring in as_array(polygon, "Polygon coordinates")? {
        for position in as_array(ring, "linear ring")? {
            vertices.push(position_to_vertex(position)?);
        }
    }
    Ok(())
}

/// Additional ordinates (altitude) are ignored
fn position_to_vertex(position: &Value) -> Result<Vertex> {
    let ordinates = as_array(position, "position")?;
    match (
        ordinates.get(0).and_then(Value::as_f64),
        ordinates.get(1).and_then(Value::as_f64),
    ) {
        (Some(lng), Some(lat)) => Ok(Vertex::new(lng, lat)),
        _ => Err(Error::InvalidGeoJson(format!(
            "position {} needs longitude and latitude",
            position
        ))),
    }
}
