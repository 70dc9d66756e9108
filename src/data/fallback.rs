use crate::geo::{CountryCatalog, CountryFeature, LonLat, Polygon};

type Outline = &'static [LonLat];

/// Very coarse country outlines, used when no boundary file is available.
/// Names follow the Natural Earth admin-0 `name` field.
#[rustfmt::skip]
const COUNTRIES: &[(&str, &[Outline])] = &[
    ("Ireland", &[&[
        (-10.0, 51.6), (-6.0, 52.0), (-6.0, 53.9), (-7.3, 55.3), (-8.5, 55.2),
        (-10.2, 54.1), (-10.3, 52.2), (-10.0, 51.6),
    ]]),
    ("United Kingdom", &[
        &[
            (-5.7, 50.0), (1.4, 51.1), (1.7, 52.7), (0.2, 53.5), (-1.6, 55.6),
            (-2.0, 57.7), (-3.1, 58.6), (-5.0, 58.6), (-6.2, 56.8), (-5.0, 55.0),
            (-3.1, 54.0), (-4.6, 53.3), (-4.2, 52.0), (-5.3, 51.7), (-5.7, 50.0),
        ],
        &[(-5.4, 54.2), (-5.9, 55.2), (-7.3, 55.3), (-8.1, 54.5), (-6.5, 54.0), (-5.4, 54.2)],
    ]),
    ("France", &[&[
        (-4.8, 48.4), (-1.2, 46.2), (-1.8, 43.4), (3.2, 42.4), (7.5, 43.8),
        (6.8, 46.4), (8.2, 49.0), (4.8, 50.1), (2.5, 51.1), (-1.6, 49.6), (-4.8, 48.4),
    ]]),
    ("Spain", &[&[
        (-9.3, 43.0), (-8.9, 37.0), (-5.6, 36.0), (-2.0, 36.7), (0.2, 38.8),
        (3.2, 42.1), (-1.8, 43.4), (-9.3, 43.0),
    ]]),
    ("Portugal", &[&[
        (-9.5, 38.7), (-8.9, 37.0), (-7.4, 37.2), (-7.0, 42.0), (-8.9, 42.0),
        (-9.5, 38.7),
    ]]),
    ("Belgium", &[&[(2.5, 51.1), (4.8, 50.1), (6.1, 50.5), (5.8, 51.2), (3.4, 51.4), (2.5, 51.1)]]),
    ("Netherlands", &[&[
        (3.4, 51.4), (5.8, 51.2), (7.0, 52.2), (7.1, 53.3), (4.8, 53.0),
        (3.4, 51.4),
    ]]),
    ("Germany", &[&[
        (6.1, 50.5), (8.2, 49.0), (7.6, 47.6), (13.0, 47.5), (13.8, 48.7),
        (15.0, 51.0), (14.2, 53.9), (9.9, 54.8), (7.1, 53.3), (7.0, 52.2), (6.1, 50.5),
    ]]),
    ("Switzerland", &[&[
        (6.0, 46.2), (7.6, 47.6), (9.6, 47.5), (10.4, 46.6), (8.4, 46.0),
        (6.0, 46.2),
    ]]),
    ("Italy", &[&[
        (7.5, 43.8), (6.8, 46.4), (8.4, 46.0), (12.3, 46.8), (13.7, 45.6),
        (12.4, 44.0), (18.5, 40.1), (16.0, 38.0), (15.6, 40.1), (10.5, 42.9), (7.5, 43.8),
    ]]),
    ("Poland", &[&[
        (14.2, 53.9), (15.0, 51.0), (18.8, 49.5), (22.9, 49.0), (23.9, 50.5),
        (23.5, 53.9), (18.6, 54.8), (14.2, 53.9),
    ]]),
    ("Denmark", &[&[
        (8.1, 55.5), (9.9, 54.8), (10.9, 56.4), (10.5, 57.7), (8.6, 57.1),
        (8.1, 55.5),
    ]]),
    ("Norway", &[&[
        (5.0, 62.0), (5.5, 58.9), (8.0, 58.1), (11.0, 59.0), (12.3, 63.5),
        (18.0, 68.5), (28.0, 70.9), (20.0, 70.0), (13.0, 67.0), (5.0, 62.0),
    ]]),
    ("Sweden", &[&[
        (11.0, 59.0), (12.9, 55.4), (16.5, 56.2), (19.0, 60.0), (23.9, 65.8),
        (20.5, 69.0), (18.0, 68.5), (12.3, 63.5), (11.0, 59.0),
    ]]),
    ("Russia", &[&[
        (28.0, 70.9), (30.0, 60.0), (32.0, 52.3), (40.0, 47.0), (48.0, 41.8),
        (60.0, 51.0), (87.0, 49.1), (120.0, 52.0), (135.0, 48.0), (131.0, 43.0),
        (140.0, 53.0), (160.0, 61.0), (180.0, 66.0), (180.0, 70.0), (140.0, 73.0),
        (105.0, 77.5), (70.0, 73.0), (50.0, 68.0), (28.0, 70.9),
    ]]),
    ("Turkey", &[&[
        (26.0, 40.0), (27.0, 37.0), (36.0, 36.0), (44.8, 37.2), (44.0, 40.0),
        (41.5, 41.5), (31.0, 41.2), (26.0, 40.0),
    ]]),
    ("Egypt", &[&[
        (25.0, 31.6), (25.0, 22.0), (36.9, 22.0), (32.5, 29.9), (34.2, 31.3),
        (25.0, 31.6),
    ]]),
    ("Nigeria", &[&[
        (2.7, 6.3), (8.5, 4.5), (11.7, 7.0), (14.6, 12.9), (13.6, 13.7),
        (4.0, 13.5), (2.7, 6.3),
    ]]),
    ("South Africa", &[&[
        (16.5, -28.6), (18.4, -34.2), (22.0, -34.0), (26.0, -33.7), (32.9, -26.8),
        (31.3, -22.4), (25.0, -25.7), (20.0, -24.8), (16.5, -28.6),
    ]]),
    ("Saudi Arabia", &[&[
        (34.6, 28.1), (39.0, 22.0), (43.0, 16.9), (47.0, 16.9), (55.7, 22.7),
        (51.6, 24.5), (48.0, 29.0), (42.0, 31.1), (37.0, 31.5), (34.6, 28.1),
    ]]),
    ("India", &[&[
        (68.2, 23.7), (72.6, 21.3), (77.0, 8.1), (80.3, 13.0), (87.0, 21.5),
        (97.0, 28.0), (88.0, 27.9), (80.0, 30.5), (74.5, 34.8), (70.0, 28.0), (68.2, 23.7),
    ]]),
    ("China", &[&[
        (73.7, 39.5), (80.0, 30.5), (88.0, 27.9), (97.0, 28.0), (101.0, 21.5),
        (108.0, 21.5), (113.0, 22.5), (121.5, 31.0), (122.0, 40.0), (131.0, 43.0),
        (135.0, 48.0), (120.0, 52.0), (111.0, 43.5), (97.0, 42.8), (87.0, 49.1), (73.7, 39.5),
    ]]),
    ("South Korea", &[&[
        (126.1, 34.4), (129.3, 35.3), (129.5, 37.5), (128.3, 38.6), (126.2, 37.7),
        (126.1, 34.4),
    ]]),
    ("Japan", &[&[
        (130.0, 31.0), (131.8, 33.9), (135.0, 33.5), (140.9, 35.7), (142.0, 39.0),
        (141.4, 41.4), (139.8, 40.0), (136.0, 36.5), (130.0, 31.0),
    ]]),
    ("Indonesia", &[&[
        (95.3, 5.5), (98.0, 2.0), (106.0, -6.0), (115.0, -8.5), (114.0, -4.0),
        (109.0, 1.5), (104.0, 1.0), (99.0, 4.0), (95.3, 5.5),
    ]]),
    ("Australia", &[&[
        (114.0, -22.0), (122.0, -18.0), (130.0, -12.0), (136.7, -12.0), (142.5, -10.7),
        (146.0, -19.0), (153.6, -28.0), (150.0, -37.5), (141.0, -38.4), (135.0, -34.8),
        (124.0, -33.9), (115.0, -34.3), (114.0, -22.0),
    ]]),
    ("New Zealand", &[&[
        (172.7, -34.4), (178.5, -37.7), (174.0, -41.5), (168.0, -46.6), (166.5, -45.8),
        (172.0, -40.5), (172.7, -34.4),
    ]]),
    ("Canada", &[&[
        (-141.0, 60.0), (-141.0, 69.6), (-125.0, 70.0), (-95.0, 72.0), (-80.0, 73.0),
        (-62.0, 66.0), (-56.0, 52.0), (-59.8, 47.6), (-67.0, 45.0), (-71.0, 45.0),
        (-82.5, 41.7), (-83.0, 46.0), (-95.0, 49.0), (-123.0, 49.0), (-130.0, 54.7),
        (-137.5, 59.0), (-141.0, 60.0),
    ]]),
    ("United States of America", &[
        &[
            (-124.7, 48.4), (-123.0, 49.0), (-95.0, 49.0), (-83.0, 46.0), (-82.5, 41.7),
            (-71.0, 45.0), (-67.0, 45.0), (-70.0, 41.5), (-76.0, 37.0), (-81.0, 31.5),
            (-80.0, 25.2), (-82.7, 28.0), (-89.6, 30.2), (-97.2, 26.0), (-104.0, 29.5),
            (-111.1, 31.3), (-117.1, 32.5), (-120.6, 34.6), (-124.2, 40.4), (-124.7, 48.4),
        ],
        &[
            (-141.0, 60.0), (-156.0, 57.0), (-166.0, 60.5), (-165.0, 68.0), (-156.0, 71.3),
            (-141.0, 69.6), (-141.0, 60.0),
        ],
    ]),
    ("Mexico", &[&[
        (-117.1, 32.5), (-111.1, 31.3), (-104.0, 29.5), (-97.2, 26.0), (-97.5, 21.5),
        (-94.5, 18.2), (-87.0, 21.5), (-88.3, 18.0), (-92.2, 14.5), (-105.5, 20.0),
        (-112.0, 28.0), (-117.1, 32.5),
    ]]),
    ("Brazil", &[&[
        (-73.9, -7.5), (-69.5, 1.0), (-60.0, 5.0), (-51.6, 4.2), (-50.0, 0.0),
        (-34.8, -7.1), (-39.0, -17.7), (-48.5, -25.5), (-53.4, -33.7), (-57.6, -30.2),
        (-58.2, -20.2), (-65.3, -10.8), (-73.9, -7.5),
    ]]),
    ("Argentina", &[&[
        (-68.4, -52.3), (-65.0, -55.0), (-67.0, -46.0), (-62.0, -39.0), (-56.7, -36.5),
        (-58.4, -33.9), (-57.6, -30.2), (-53.6, -26.1), (-58.2, -20.2), (-62.8, -22.0),
        (-66.8, -22.4), (-69.6, -29.0), (-71.9, -44.0), (-68.4, -52.3),
    ]]),
];

/// Catalog built from the bundled outlines.
pub fn fallback_world() -> CountryCatalog {
    CountryCatalog::from_features(COUNTRIES.iter().filter_map(|&(name, outlines)| {
        let polygons = outlines.iter().map(|ring| Polygon::new(ring.to_vec())).collect();
        CountryFeature::new(name, polygons).ok()
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trade::AliasTable;

    #[test]
    fn test_all_outlines_closed_and_loaded() {
        for (name, outlines) in COUNTRIES {
            for ring in *outlines {
                assert_eq!(ring.first(), ring.last(), "{name} ring not closed");
                assert!(ring.len() >= 4, "{name}");
            }
        }
        assert_eq!(fallback_world().len(), COUNTRIES.len());
    }

    #[test]
    fn test_capitals_resolve() {
        let world = fallback_world();
        let cases = [
            ((-6.26, 53.35), "Ireland"),
            ((-0.13, 51.5), "United Kingdom"),
            ((2.35, 48.85), "France"),
            ((-77.0, 38.9), "United States of America"),
            ((116.4, 39.9), "China"),
            ((149.1, -35.3), "Australia"),
        ];
        for (point, expected) in cases {
            assert_eq!(world.feature_at(point).map(|f| f.name()), Some(expected), "{point:?}");
        }
    }

    #[test]
    fn test_standard_aliases_have_targets() {
        let world = fallback_world();
        let aliases = AliasTable::default();
        for trade in [
            "USA",
            "Great Britain",
            "Northern Ireland",
            "Korea, Republic of",
            "Russian Federation",
        ] {
            assert!(world.find_by_name(aliases.geo_name(trade)).is_some(), "{trade}");
        }
    }
}
