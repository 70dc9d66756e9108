//! Loaders for boundary and trade data.

mod fallback;
mod records;

pub use fallback::fallback_world;
pub use records::{load_records, read_records};

use std::fs;
use std::io;
use std::path::Path;

use geojson::{GeoJson, Geometry, Value};
use tracing::{info, warn};

use crate::error::{GlobeError, Result};
use crate::geo::{CountryCatalog, CountryFeature, LonLat, Polygon};

/// Property keys tried, in order, for a feature's country name.
const NAME_KEYS: [&str; 3] = ["name", "NAME", "ADMIN"];

/// Load country boundaries from a GeoJSON file.
///
/// A missing file falls back to the bundled simplified world. A file that
/// exists but does not hold polygon country features is a [`GlobeError::DataFormat`].
pub fn load_countries(path: &Path) -> Result<CountryCatalog> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            warn!(path = %path.display(), "boundary file not found; using bundled world");
            return Ok(fallback_world());
        }
        Err(source) => return Err(GlobeError::Io { path: path.to_path_buf(), source }),
    };

    let catalog = parse_countries(bytes)?;
    info!(path = %path.display(), countries = catalog.len(), "loaded boundaries");
    Ok(catalog)
}

/// Parse a GeoJSON FeatureCollection of named Polygon/MultiPolygon features.
pub fn parse_countries(mut bytes: Vec<u8>) -> Result<CountryCatalog> {
    let geojson: GeoJson = simd_json::serde::from_slice(&mut bytes)
        .map_err(|e| GlobeError::data_format(format!("invalid GeoJSON: {e}")))?;

    let GeoJson::FeatureCollection(collection) = geojson else {
        return Err(GlobeError::data_format("expected a FeatureCollection"));
    };

    let mut features = Vec::with_capacity(collection.features.len());
    let mut skipped = 0usize;

    for (i, feature) in collection.features.iter().enumerate() {
        let Some(geometry) = feature.geometry.as_ref() else {
            skipped += 1;
            continue;
        };
        let name = NAME_KEYS
            .iter()
            .find_map(|key| feature.property(key).and_then(|v| v.as_str()))
            .ok_or_else(|| GlobeError::data_format(format!("feature {i} has no name property")))?;

        let polygons = polygons_of(geometry)
            .ok_or_else(|| {
                GlobeError::data_format(format!("country {name:?} is not a polygon geometry"))
            })?;
        features.push(CountryFeature::new(name, polygons)?);
    }

    if features.is_empty() {
        return Err(GlobeError::data_format("no country features"));
    }
    if skipped > 0 {
        warn!(skipped, "features without geometry skipped");
    }
    Ok(CountryCatalog::from_features(features))
}

fn ring(coords: &[Vec<f64>]) -> Vec<LonLat> {
    coords.iter().filter(|c| c.len() >= 2).map(|c| (c[0], c[1])).collect()
}

fn polygon(rings: &[Vec<Vec<f64>>]) -> Option<Polygon> {
    let (exterior, holes) = rings.split_first()?;
    let exterior = ring(exterior);
    if exterior.len() < 3 {
        return None;
    }
    Some(Polygon {
        exterior,
        holes: holes.iter().map(|h| ring(h)).filter(|h| h.len() >= 3).collect(),
    })
}

/// Polygons of a geometry; `None` for anything that is not (Multi)Polygon.
fn polygons_of(geometry: &Geometry) -> Option<Vec<Polygon>> {
    match &geometry.value {
        Value::Polygon(rings) => polygon(rings).map(|p| vec![p]),
        Value::MultiPolygon(polygons) => {
            let polygons: Vec<Polygon> =
                polygons.iter().filter_map(|rings| polygon(rings)).collect();
            (!polygons.is_empty()).then_some(polygons)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<CountryCatalog> {
        parse_countries(text.as_bytes().to_vec())
    }

    const SAMPLE: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {"type": "Feature", "properties": {"name": "France"},
             "geometry": {"type": "Polygon", "coordinates": [[[-4.8,42.5],[8.2,42.5],[8.2,51.1],[-4.8,51.1],[-4.8,42.5]]]}},
            {"type": "Feature", "properties": {"name": "Fiji"},
             "geometry": {"type": "MultiPolygon", "coordinates": [
                [[[177,-18],[179.9,-18],[179.9,-16],[177,-16],[177,-18]]],
                [[[-180,-17],[-179.8,-17],[-179.8,-16],[-180,-16],[-180,-17]]]
             ]}},
            {"type": "Feature", "properties": {"name": "Lost"}, "geometry": null}
        ]
    }"#;

    #[test]
    fn test_parse_feature_collection() {
        let catalog = parse(SAMPLE).unwrap();
        assert_eq!(catalog.len(), 2);
        assert!(catalog.find_by_name("France").unwrap().contains((2.35, 48.85)));
        assert_eq!(catalog.find_by_name("Fiji").unwrap().polygons().len(), 2);
        assert!(catalog.find_by_name("Lost").is_none());
    }

    #[test]
    fn test_polygon_holes_kept() {
        let text = r#"{"type": "FeatureCollection", "features": [
            {"type": "Feature", "properties": {"name": "Donut"},
             "geometry": {"type": "Polygon", "coordinates": [
                [[0,0],[10,0],[10,10],[0,10],[0,0]],
                [[4,4],[6,4],[6,6],[4,6],[4,4]]
             ]}}]}"#;
        let catalog = parse(text).unwrap();
        let donut = catalog.find_by_name("Donut").unwrap();
        assert!(donut.contains((2.0, 2.0)));
        assert!(!donut.contains((5.0, 5.0)));
    }

    #[test]
    fn test_malformed_inputs_are_data_format_errors() {
        let cases = [
            "not json",
            r#"{"type": "Point", "coordinates": [0, 0]}"#,
            r#"{"type": "FeatureCollection", "features": []}"#,
            r#"{"type": "FeatureCollection", "features": [
                {"type": "Feature", "properties": {"name": "Line"},
                 "geometry": {"type": "LineString", "coordinates": [[0,0],[1,1]]}}]}"#,
            r#"{"type": "FeatureCollection", "features": [
                {"type": "Feature", "properties": {},
                 "geometry": {"type": "Polygon", "coordinates": [[[0,0],[1,0],[1,1],[0,0]]]}}]}"#,
        ];
        for case in cases {
            assert!(matches!(parse(case), Err(GlobeError::DataFormat(_))), "{case}");
        }
    }

    #[test]
    fn test_missing_file_uses_fallback() {
        let catalog = load_countries(Path::new("/nonexistent/countries.geojson")).unwrap();
        assert!(catalog.find_by_name("Ireland").is_some());
        assert_eq!(catalog.len(), fallback_world().len());
    }
}
