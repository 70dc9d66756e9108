//! Geo Dataset Adapter: country boundaries, lookup by name, centroids and
//! spherical helpers shared by projection and hit-testing.

mod catalog;
pub mod sphere;

pub use catalog::{CountryCatalog, CountryFeature, Polygon};
pub use sphere::{wrap_lon, GreatCircle, LonLat};

#[cfg(test)]
pub(crate) use catalog::tests::{rect, sample_catalog};
