use std::collections::HashMap;

use crate::error::{GlobeError, Result};
use crate::geo::sphere::{enclosed_pole, ring_contains, spherical_centroid, LonLat};

/// Polygon with an exterior ring and optional holes, coordinates in degrees.
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    pub exterior: Vec<LonLat>,
    pub holes: Vec<Vec<LonLat>>,
}

impl Polygon {
    pub fn new(exterior: Vec<LonLat>) -> Self {
        Self { exterior, holes: Vec::new() }
    }

    pub fn contains(&self, point: LonLat) -> bool {
        ring_contains(&self.exterior, point) && !self.holes.iter().any(|h| ring_contains(h, point))
    }

    /// Exterior ring followed by holes.
    pub fn rings(&self) -> impl Iterator<Item = &[LonLat]> {
        std::iter::once(self.exterior.as_slice()).chain(self.holes.iter().map(Vec::as_slice))
    }
}

/// Longitude/latitude bounding box, unwrapped so it may extend past ±180.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Bounds {
    min_lon: f64,
    min_lat: f64,
    max_lon: f64,
    max_lat: f64,
}

impl Bounds {
    fn of(polygons: &[Polygon]) -> Self {
        let mut b = Bounds {
            min_lon: f64::MAX,
            min_lat: f64::MAX,
            max_lon: f64::MIN,
            max_lat: f64::MIN,
        };
        for &(lon, lat) in polygons.iter().flat_map(|p| p.exterior.iter()) {
            b.min_lon = b.min_lon.min(lon);
            b.max_lon = b.max_lon.max(lon);
            b.min_lat = b.min_lat.min(lat);
            b.max_lat = b.max_lat.max(lat);
        }
        // A ring around a pole covers it even when no vertex reaches it
        for pole in polygons.iter().filter_map(|p| enclosed_pole(&p.exterior)) {
            b.min_lat = b.min_lat.min(pole.latitude());
            b.max_lat = b.max_lat.max(pole.latitude());
        }
        b
    }

    /// Cheap rejection. Only latitude is tested because antimeridian-crossing
    /// shapes make longitude bounds unreliable.
    #[inline]
    fn may_contain(&self, (_, lat): LonLat) -> bool {
        lat >= self.min_lat && lat <= self.max_lat
    }
}

/// A named country region. Immutable once loaded.
#[derive(Clone, Debug)]
pub struct CountryFeature {
    name: String,
    polygons: Vec<Polygon>,
    centroid: LonLat,
    bounds: Bounds,
}

impl CountryFeature {
    /// Build a feature, deriving its centroid. Fails when the geometry has no vertices.
    pub fn new(name: impl Into<String>, polygons: Vec<Polygon>) -> Result<Self> {
        let name = name.into();
        let centroid = spherical_centroid(polygons.iter().map(|p| p.exterior.as_slice()))
            .ok_or_else(|| {
                GlobeError::data_format(format!("country {name:?} has empty geometry"))
            })?;
        let bounds = Bounds::of(&polygons);
        Ok(Self { name, polygons, centroid, bounds })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    /// Geographic centroid (lon, lat).
    pub fn centroid(&self) -> LonLat {
        self.centroid
    }

    pub fn contains(&self, point: LonLat) -> bool {
        self.bounds.may_contain(point) && self.polygons.iter().any(|p| p.contains(point))
    }
}

/// The process-wide, read-only set of country boundaries.
#[derive(Clone, Debug, Default)]
pub struct CountryCatalog {
    features: Vec<CountryFeature>,
    by_name: HashMap<String, usize>,
}

impl CountryCatalog {
    /// Index features by exact name. Later duplicates of a name are merged
    /// into the first feature's polygons.
    pub fn from_features(features: impl IntoIterator<Item = CountryFeature>) -> Self {
        let mut catalog = Self::default();
        for feature in features {
            match catalog.by_name.get(&feature.name) {
                Some(&idx) => {
                    let existing = &mut catalog.features[idx];
                    existing.polygons.extend(feature.polygons);
                    existing.bounds = Bounds::of(&existing.polygons);
                }
                None => {
                    catalog.by_name.insert(feature.name.clone(), catalog.features.len());
                    catalog.features.push(feature);
                }
            }
        }
        catalog
    }

    /// Exact-string lookup. Alias normalization happens before this call.
    pub fn find_by_name(&self, name: &str) -> Option<&CountryFeature> {
        self.by_name.get(name).map(|&idx| &self.features[idx])
    }

    /// Linear scan for the first feature containing a point.
    pub fn feature_at(&self, point: LonLat) -> Option<&CountryFeature> {
        self.features.iter().find(|f| f.contains(point))
    }

    pub fn iter(&self) -> impl Iterator<Item = &CountryFeature> {
        self.features.iter()
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn rect(lon0: f64, lat0: f64, lon1: f64, lat1: f64) -> Polygon {
        Polygon::new(vec![(lon0, lat0), (lon1, lat0), (lon1, lat1), (lon0, lat1), (lon0, lat0)])
    }

    pub(crate) fn sample_catalog() -> CountryCatalog {
        CountryCatalog::from_features([
            CountryFeature::new("Ireland", vec![rect(-10.5, 51.5, -6.0, 55.4)]).unwrap(),
            CountryFeature::new("France", vec![rect(-4.8, 42.5, 8.2, 51.1)]).unwrap(),
            CountryFeature::new("United States of America", vec![rect(-124.0, 25.0, -67.0, 49.0)])
                .unwrap(),
            CountryFeature::new("United Kingdom", vec![rect(-8.0, 50.0, 1.7, 58.6)]).unwrap(),
        ])
    }

    #[test]
    fn test_find_by_name_is_exact() {
        let catalog = sample_catalog();
        assert!(catalog.find_by_name("France").is_some());
        assert!(catalog.find_by_name("france").is_none());
        assert!(catalog.find_by_name("USA").is_none());
    }

    #[test]
    fn test_centroid_inside_feature() {
        let catalog = sample_catalog();
        let france = catalog.find_by_name("France").unwrap();
        let (lon, lat) = france.centroid();
        assert!((lon - 1.7).abs() < 0.2);
        assert!(lat > 46.0 && lat < 47.5);
        assert!(france.contains(france.centroid()));
    }

    #[test]
    fn test_feature_at() {
        let catalog = sample_catalog();
        assert_eq!(catalog.feature_at((2.35, 48.85)).map(|f| f.name()), Some("France"));
        assert!(catalog.feature_at((-30.0, 40.0)).is_none());
    }

    #[test]
    fn test_feature_at_polar_caps() {
        let mut antarctica: Vec<LonLat> =
            (0..=36).map(|i| (-180.0 + 10.0 * i as f64, -65.0)).collect();
        antarctica.extend([(180.0, -90.0), (-180.0, -90.0), (-180.0, -65.0)]);
        let arctic: Vec<LonLat> = (0..36).map(|i| (180.0 - 10.0 * i as f64, 82.0)).collect();
        let catalog = CountryCatalog::from_features([
            CountryFeature::new("Antarctica", vec![Polygon::new(antarctica)]).unwrap(),
            CountryFeature::new("Arctic", vec![Polygon::new(arctic)]).unwrap(),
        ]);

        assert_eq!(catalog.feature_at((0.0, -80.0)).map(|f| f.name()), Some("Antarctica"));
        assert_eq!(catalog.feature_at((120.0, -89.5)).map(|f| f.name()), Some("Antarctica"));
        assert_eq!(catalog.feature_at((-40.0, 89.0)).map(|f| f.name()), Some("Arctic"));
        assert!(catalog.feature_at((0.0, -50.0)).is_none());
        assert!(catalog.feature_at((0.0, 70.0)).is_none());
    }

    #[test]
    fn test_hole_excluded() {
        let mut poly = rect(0.0, 0.0, 10.0, 10.0);
        poly.holes.push(rect(4.0, 4.0, 6.0, 6.0).exterior);
        let feature = CountryFeature::new("Donut", vec![poly]).unwrap();
        assert!(feature.contains((2.0, 2.0)));
        assert!(!feature.contains((5.0, 5.0)));
    }

    #[test]
    fn test_empty_geometry_rejected() {
        let err = CountryFeature::new("Nowhere", vec![]).unwrap_err();
        assert!(matches!(err, GlobeError::DataFormat(_)));
    }

    #[test]
    fn test_duplicate_names_merge() {
        let catalog = CountryCatalog::from_features([
            CountryFeature::new("Split", vec![rect(0.0, 0.0, 1.0, 1.0)]).unwrap(),
            CountryFeature::new("Split", vec![rect(10.0, 10.0, 11.0, 11.0)]).unwrap(),
        ]);
        assert_eq!(catalog.len(), 1);
        let split = catalog.find_by_name("Split").unwrap();
        assert_eq!(split.polygons().len(), 2);
        assert!(split.contains((10.5, 10.5)));
    }
}
