use std::path::PathBuf;

use clap::Parser;

use crate::map::{CameraSettings, Rotation};

/// Terminal globe of a country's export flows.
#[derive(Debug, Clone, Parser)]
#[command(name = "trade-globe", version, about)]
pub struct Config {
    /// GeoJSON FeatureCollection of country boundaries
    #[arg(long, env = "TRADE_GLOBE_BOUNDARIES", default_value = "data/countries.geojson")]
    pub boundaries: PathBuf,

    /// CSV export table with `Country, Year, Commodity Group, VALUE` columns
    #[arg(long, env = "TRADE_GLOBE_RECORDS", default_value = "data/exports.csv")]
    pub records: PathBuf,

    /// Boundary name of the exporting country
    #[arg(long, default_value = "Ireland")]
    pub focal: String,

    /// Initial commodity group (defaults to the first in the table)
    #[arg(long)]
    pub category: Option<String>,

    /// Initial year
    #[arg(long, default_value = "2023")]
    pub year: String,

    /// Degrees of rotation per dot of drag at zoom 1
    #[arg(long, default_value_t = 0.2)]
    pub drag_speed: f64,

    #[arg(long, default_value_t = 1.0)]
    pub min_zoom: f64,

    #[arg(long, default_value_t = 9.0)]
    pub max_zoom: f64,

    /// Write tracing output here; nothing is logged otherwise
    #[arg(long, env = "TRADE_GLOBE_LOG")]
    pub log_file: Option<PathBuf>,
}

impl Config {
    /// Camera tuning, homed on `home` when the focal country was found.
    pub fn camera_settings(&self, home: Option<Rotation>) -> CameraSettings {
        let defaults = CameraSettings::default();
        let min_zoom = if self.min_zoom > 0.0 { self.min_zoom } else { defaults.min_zoom };
        CameraSettings {
            home: home.unwrap_or(defaults.home),
            drag_speed: self.drag_speed,
            min_zoom,
            max_zoom: self.max_zoom.max(min_zoom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::parse_from(["trade-globe"]);
        assert_eq!(config.focal, "Ireland");
        assert_eq!(config.year, "2023");
        assert_eq!(config.boundaries, PathBuf::from("data/countries.geojson"));
        assert!(config.category.is_none());

        let settings = config.camera_settings(None);
        assert_eq!(settings, CameraSettings::default());
    }

    #[test]
    fn test_camera_settings_sanitized() {
        let config = Config::parse_from([
            "trade-globe",
            "--min-zoom",
            "4",
            "--max-zoom",
            "2",
            "--drag-speed",
            "0.5",
        ]);
        let home = Rotation::centered_on((2.0, 46.0));
        let settings = config.camera_settings(Some(home));
        assert_eq!(settings.home, home);
        assert_eq!(settings.drag_speed, 0.5);
        assert_eq!((settings.min_zoom, settings.max_zoom), (4.0, 4.0));
    }

    #[test]
    fn test_clap_definition() {
        use clap::CommandFactory;
        Config::command().debug_assert();
    }
}
