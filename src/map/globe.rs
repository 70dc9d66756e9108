use glam::DVec3;

use crate::geo::sphere::{lonlat_to_vec3, vec3_to_lonlat};
use crate::geo::LonLat;
use crate::map::camera::CameraState;

/// Screen position in surface pixels.
pub type ScreenPoint = (f64, f64);

/// Sphere radius at zoom 1 relative to the smaller viewport side.
const BASE_SCALE_DIVISOR: f64 = 2.2;

/// Orthographic projection of the globe for one camera state and surface
/// size. Orientation is stored as an orthonormal basis so projecting a point
/// is three dot products.
#[derive(Clone, Debug)]
pub struct GlobeProjection {
    /// Unit vector toward the viewer (center of the visible hemisphere)
    forward: DVec3,
    /// Screen +x (east at the center)
    right: DVec3,
    /// Screen -y (north at the center)
    up: DVec3,
    /// Sphere radius in pixels
    pub radius: f64,
    pub width: f64,
    pub height: f64,
}

impl GlobeProjection {
    pub fn new(camera: &CameraState, width: f64, height: f64) -> Self {
        let (lon, lat) = camera.rotation.center();
        let lon_rad = lon.to_radians();
        let lat_rad = lat.to_radians();

        let forward = lonlat_to_vec3(lon, lat);

        // Derivative of forward w.r.t. latitude; flips past the poles, which
        // is what lets the unclamped latitude roll the globe over
        let raw_up = DVec3::new(
            -lat_rad.sin() * lon_rad.cos(),
            -lat_rad.sin() * lon_rad.sin(),
            lat_rad.cos(),
        );
        let right = raw_up.cross(forward).normalize();
        let up = forward.cross(right).normalize();

        let (sin_g, cos_g) = camera.rotation.gamma.to_radians().sin_cos();
        let rolled_right = right * cos_g + up * sin_g;
        let rolled_up = up * cos_g - right * sin_g;

        let radius = width.min(height) / BASE_SCALE_DIVISOR * camera.zoom;

        Self { forward, right: rolled_right, up: rolled_up, radius, width, height }
    }

    pub fn center(&self) -> ScreenPoint {
        (self.width / 2.0, self.height / 2.0)
    }

    #[inline]
    fn to_screen(&self, sx: f64, sy: f64) -> ScreenPoint {
        (self.width / 2.0 + sx * self.radius, self.height / 2.0 - sy * self.radius)
    }

    /// Project a geographic point. `None` for points on the far hemisphere.
    pub fn project(&self, (lon, lat): LonLat) -> Option<ScreenPoint> {
        let p = lonlat_to_vec3(lon, lat);
        if p.dot(self.forward) < 0.0 {
            return None;
        }
        Some(self.to_screen(p.dot(self.right), p.dot(self.up)))
    }

    /// Project, pushing far-side points radially onto the sphere outline.
    /// Used to close polygons that cross the horizon.
    pub fn project_to_limb(&self, (lon, lat): LonLat) -> ScreenPoint {
        let p = lonlat_to_vec3(lon, lat);
        let (sx, sy) = (p.dot(self.right), p.dot(self.up));
        if p.dot(self.forward) >= 0.0 {
            return self.to_screen(sx, sy);
        }
        let len = (sx * sx + sy * sy).sqrt();
        if len < 1e-12 {
            // Antipode of the view center: any limb point will do
            return self.to_screen(1.0, 0.0);
        }
        self.to_screen(sx / len, sy / len)
    }

    /// Screen position back to lon/lat. `None` outside the sphere disk.
    pub fn invert(&self, (x, y): ScreenPoint) -> Option<LonLat> {
        let sx = (x - self.width / 2.0) / self.radius;
        let sy = -(y - self.height / 2.0) / self.radius;

        let r2 = sx * sx + sy * sy;
        if !r2.is_finite() || r2 > 1.0 {
            return None;
        }

        let sz = (1.0 - r2).sqrt();
        Some(vec3_to_lonlat(self.right * sx + self.up * sy + self.forward * sz))
    }
}
