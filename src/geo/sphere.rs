use glam::DVec3;

/// Geographic position in degrees: (longitude, latitude).
pub type LonLat = (f64, f64);

/// Wrap a longitude (or any angle in degrees) into [-180, 180).
#[inline(always)]
pub fn wrap_lon(lon: f64) -> f64 {
    (lon + 180.0).rem_euclid(360.0) - 180.0
}

/// Convert lon/lat (degrees) to a unit sphere vector.
#[inline(always)]
pub fn lonlat_to_vec3(lon: f64, lat: f64) -> DVec3 {
    let lon_rad = lon.to_radians();
    let lat_rad = lat.to_radians();
    DVec3::new(
        lat_rad.cos() * lon_rad.cos(),
        lat_rad.cos() * lon_rad.sin(),
        lat_rad.sin(),
    )
}

/// Convert a (not necessarily unit) vector back to lon/lat degrees.
#[inline(always)]
pub fn vec3_to_lonlat(p: DVec3) -> LonLat {
    let p = p.normalize_or_zero();
    let lat = p.z.clamp(-1.0, 1.0).asin().to_degrees();
    let lon = p.y.atan2(p.x).to_degrees();
    (lon, lat)
}

/// Great-circle arc between two points, sampled by spherical interpolation.
#[derive(Clone, Copy, Debug)]
pub struct GreatCircle {
    a: DVec3,
    b: DVec3,
    angle: f64,
    sin_angle: f64,
}

impl GreatCircle {
    pub fn new(from: LonLat, to: LonLat) -> Self {
        let a = lonlat_to_vec3(from.0, from.1);
        let b = lonlat_to_vec3(to.0, to.1);
        let angle = a.dot(b).clamp(-1.0, 1.0).acos();
        Self { a, b, angle, sin_angle: angle.sin() }
    }

    /// Point at fraction `t` in [0, 1] along the arc.
    pub fn point(&self, t: f64) -> LonLat {
        // Nearly identical or antipodal endpoints: fall back to linear blend
        if self.sin_angle.abs() < 1e-10 {
            return vec3_to_lonlat(self.a.lerp(self.b, t));
        }
        let sa = ((1.0 - t) * self.angle).sin() / self.sin_angle;
        let sb = (t * self.angle).sin() / self.sin_angle;
        vec3_to_lonlat(self.a * sa + self.b * sb)
    }
}

/// Number of ~2° subdivisions needed to draw an edge smoothly.
#[inline]
pub fn edge_steps(from: LonLat, to: LonLat) -> usize {
    let span = (wrap_lon(to.0 - from.0)).abs().max((to.1 - from.1).abs());
    ((span / 2.0).ceil() as usize).max(1)
}

/// Area-weighted spherical centroid of a set of rings.
///
/// Each ring is fanned into triangles from its first vertex; a triangle
/// contributes its normalized vertex sum weighted by its solid-angle
/// approximation (triple product). Falls back to the vertex mean when the
/// rings enclose no area.
pub fn spherical_centroid<'a>(rings: impl IntoIterator<Item = &'a [LonLat]>) -> Option<LonLat> {
    let mut weighted = DVec3::ZERO;
    let mut vertex_sum = DVec3::ZERO;
    let mut vertices = 0usize;

    for ring in rings {
        if ring.is_empty() {
            continue;
        }
        let points: Vec<DVec3> = ring.iter().map(|&(lon, lat)| lonlat_to_vec3(lon, lat)).collect();
        for p in &points {
            vertex_sum += *p;
        }
        vertices += points.len();

        let mut ring_sum = DVec3::ZERO;
        let origin = points[0];
        for pair in points[1..].windows(2) {
            let (b, c) = (pair[0], pair[1]);
            let area = origin.dot(b.cross(c));
            ring_sum += (origin + b + c).normalize_or_zero() * area;
        }
        // Orientation differs between sources; exterior rings always add
        if ring_sum.dot(origin) < 0.0 {
            ring_sum = -ring_sum;
        }
        weighted += ring_sum;
    }

    if vertices == 0 {
        return None;
    }
    if weighted.length_squared() > 1e-18 {
        Some(vec3_to_lonlat(weighted))
    } else if vertex_sum.length_squared() > 1e-18 {
        Some(vec3_to_lonlat(vertex_sum))
    } else {
        None
    }
}

/// Even-odd containment test for a single ring.
///
/// Longitudes are unwrapped along the ring relative to the query point, so
/// rings crossing the antimeridian still work. Rings that wind a full turn
/// around a pole are handled by [`pole_cap_contains`].
pub fn ring_contains(ring: &[LonLat], point: LonLat) -> bool {
    if ring.len() < 3 {
        return false;
    }
    if let Some(pole) = enclosed_pole(ring) {
        return pole_cap_contains(ring, point, pole);
    }
    let (lon, lat) = point;

    let mut xs = Vec::with_capacity(ring.len());
    let mut x = wrap_lon(ring[0].0 - lon);
    xs.push(x);
    for edge in ring.windows(2) {
        x += wrap_lon(edge[1].0 - edge[0].0);
        xs.push(x);
    }

    // The unwrapped ring may sit a full turn away from the point
    [0.0, -360.0, 360.0].iter().any(|&px| {
        let mut inside = false;
        let mut j = ring.len() - 1;
        for i in 0..ring.len() {
            let (xi, yi) = (xs[i], ring[i].1);
            let (xj, yj) = (xs[j], ring[j].1);
            if (yi > lat) != (yj > lat) {
                let x_cross = xj + (lat - yj) * (xi - xj) / (yi - yj);
                if x_cross > px {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    })
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Pole {
    North,
    South,
}

impl Pole {
    pub(crate) fn latitude(self) -> f64 {
        match self {
            Pole::North => 90.0,
            Pole::South => -90.0,
        }
    }
}

/// The pole a ring wraps around, if its longitudes sweep a full turn.
///
/// A ring touching ±90° encloses that pole; otherwise the pole on the side of
/// its mean latitude.
pub(crate) fn enclosed_pole(ring: &[LonLat]) -> Option<Pole> {
    let closing = ring.last().zip(ring.first()).map(|(&a, &b)| [a, b]);
    let sweep: f64 = ring
        .windows(2)
        .map(|e| [e[0], e[1]])
        .chain(closing)
        .map(|[a, b]| wrap_lon(b.0 - a.0))
        .sum();
    if sweep.abs() < 180.0 {
        return None;
    }

    let max_lat = ring.iter().map(|p| p.1).fold(f64::MIN, f64::max);
    let min_lat = ring.iter().map(|p| p.1).fold(f64::MAX, f64::min);
    if min_lat <= -90.0 + 1e-9 {
        return Some(Pole::South);
    }
    if max_lat >= 90.0 - 1e-9 {
        return Some(Pole::North);
    }
    let mean_lat = ring.iter().map(|p| p.1).sum::<f64>() / ring.len() as f64;
    Some(if mean_lat < 0.0 { Pole::South } else { Pole::North })
}

/// Count ring crossings of the point's meridian between the point and the
/// enclosed pole; an even count means the point shares the pole's side.
fn pole_cap_contains(ring: &[LonLat], (lon, lat): LonLat, pole: Pole) -> bool {
    let mut crossings = 0usize;
    let mut j = ring.len() - 1;
    for i in 0..ring.len() {
        let (a, b) = (ring[j], ring[i]);
        j = i;
        let da = wrap_lon(a.0 - lon);
        let step = wrap_lon(b.0 - a.0);
        if (da > 0.0) == (da + step > 0.0) {
            continue;
        }
        let t = -da / step;
        let cross_lat = a.1 + t * (b.1 - a.1);
        let toward_pole = match pole {
            Pole::South => cross_lat < lat,
            Pole::North => cross_lat > lat,
        };
        if toward_pole {
            crossings += 1;
        }
    }
    crossings % 2 == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(lon0: f64, lat0: f64, lon1: f64, lat1: f64) -> Vec<LonLat> {
        vec![(lon0, lat0), (lon1, lat0), (lon1, lat1), (lon0, lat1), (lon0, lat0)]
    }

    #[test]
    fn test_wrap_lon() {
        assert_eq!(wrap_lon(190.0), -170.0);
        assert_eq!(wrap_lon(-190.0), 170.0);
        assert_eq!(wrap_lon(180.0), -180.0);
        assert_eq!(wrap_lon(45.0), 45.0);
    }

    #[test]
    fn test_vec3_round_trip() {
        let (lon, lat) = vec3_to_lonlat(lonlat_to_vec3(-8.24, 53.41));
        assert!((lon + 8.24).abs() < 1e-9);
        assert!((lat - 53.41).abs() < 1e-9);
    }

    #[test]
    fn test_great_circle_endpoints() {
        let gc = GreatCircle::new((-8.0, 53.0), (2.0, 46.0));
        let start = gc.point(0.0);
        let end = gc.point(1.0);
        assert!((start.0 + 8.0).abs() < 1e-9 && (start.1 - 53.0).abs() < 1e-9);
        assert!((end.0 - 2.0).abs() < 1e-9 && (end.1 - 46.0).abs() < 1e-9);
    }

    #[test]
    fn test_great_circle_bows_poleward() {
        // Transatlantic great circles bulge north of the straight lon/lat line
        let gc = GreatCircle::new((-8.0, 53.0), (-98.0, 39.0));
        let (_, mid_lat) = gc.point(0.5);
        assert!(mid_lat > (53.0 + 39.0) / 2.0);
    }

    #[test]
    fn test_centroid_of_square() {
        let ring = square(0.0, 40.0, 10.0, 50.0);
        let (lon, lat) = spherical_centroid([ring.as_slice()]).unwrap();
        assert!((lon - 5.0).abs() < 0.1);
        assert!((lat - 45.0).abs() < 0.5);
    }

    #[test]
    fn test_centroid_ignores_winding() {
        let mut ring = square(0.0, 40.0, 10.0, 50.0);
        ring.reverse();
        let (lon, lat) = spherical_centroid([ring.as_slice()]).unwrap();
        assert!((lon - 5.0).abs() < 0.1);
        assert!((lat - 45.0).abs() < 0.5);
    }

    #[test]
    fn test_centroid_empty() {
        assert!(spherical_centroid(std::iter::empty::<&[LonLat]>()).is_none());
    }

    #[test]
    fn test_ring_contains() {
        let ring = square(-5.0, 42.0, 8.0, 51.0);
        assert!(ring_contains(&ring, (2.3, 48.9)));
        assert!(!ring_contains(&ring, (12.0, 48.9)));
        assert!(!ring_contains(&ring, (2.3, 55.0)));
    }

    #[test]
    fn test_ring_contains_across_antimeridian() {
        let ring = vec![
            (170.0, -20.0),
            (-170.0, -20.0),
            (-170.0, -10.0),
            (170.0, -10.0),
            (170.0, -20.0),
        ];
        assert!(ring_contains(&ring, (179.0, -15.0)));
        assert!(ring_contains(&ring, (-179.0, -15.0)));
        assert!(!ring_contains(&ring, (160.0, -15.0)));
        assert!(!ring_contains(&ring, (0.0, -15.0)));
    }

    /// Natural Earth closes Antarctica along the south pole.
    fn antarctica() -> Vec<LonLat> {
        let mut ring: Vec<LonLat> = (0..=36).map(|i| (-180.0 + 10.0 * i as f64, -70.0)).collect();
        ring.extend([(180.0, -90.0), (-180.0, -90.0), (-180.0, -70.0)]);
        ring
    }

    #[test]
    fn test_ring_contains_south_pole_cap() {
        let ring = antarctica();
        assert!(ring_contains(&ring, (0.0, -80.0)));
        assert!(ring_contains(&ring, (90.0, -85.0)));
        assert!(ring_contains(&ring, (-175.0, -71.0)));
        assert!(!ring_contains(&ring, (0.0, -60.0)));
        assert!(!ring_contains(&ring, (45.0, 10.0)));

        let mut reversed = ring.clone();
        reversed.reverse();
        assert!(ring_contains(&reversed, (0.0, -80.0)));
        assert!(!ring_contains(&reversed, (0.0, -60.0)));
    }

    #[test]
    fn test_ring_contains_open_polar_ring() {
        // Circles the north pole without touching it
        let ring: Vec<LonLat> = (0..36).map(|i| (-180.0 + 10.0 * i as f64, 80.0)).collect();
        assert!(ring_contains(&ring, (20.0, 85.0)));
        assert!(!ring_contains(&ring, (20.0, 75.0)));
    }
}
