use crate::geo::{wrap_lon, LonLat};

/// Three-axis rotation in degrees, d3-style: the view is centered on
/// (-lambda, -phi) and rolled by gamma.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rotation {
    pub lambda: f64,
    pub phi: f64,
    pub gamma: f64,
}

impl Rotation {
    /// Rotation that centers the view on a geographic point.
    pub fn centered_on((lon, lat): LonLat) -> Self {
        Self { lambda: -lon, phi: -lat, gamma: 0.0 }
    }

    pub fn center(&self) -> LonLat {
        (-self.lambda, -self.phi)
    }
}

/// Fixed camera tuning shared by every state transition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraSettings {
    /// Rotation applied on mount and on reset.
    pub home: Rotation,
    /// Degrees of rotation per pixel of drag at zoom 1.
    pub drag_speed: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            // Ireland
            home: Rotation { lambda: 8.2439, phi: -53.4129, gamma: 0.0 },
            drag_speed: 0.2,
            min_zoom: 1.0,
            max_zoom: 9.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CameraAction {
    /// Pointer drag by a pixel delta.
    Drag { dx: f64, dy: f64 },
    /// Multiply zoom by a factor, anchored at frame center.
    Zoom(f64),
    Reset,
}

/// Rotation and zoom of the globe. Mutated only through [`CameraState::reduce`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraState {
    pub rotation: Rotation,
    pub zoom: f64,
    pub settings: CameraSettings,
}

impl CameraState {
    pub fn new(settings: CameraSettings) -> Self {
        let zoom = settings.min_zoom.max(1.0).min(settings.max_zoom);
        Self { rotation: settings.home, zoom, settings }
    }

    /// Pure transition: `(state, action) -> state`.
    ///
    /// Drag speed is divided by zoom so the surface tracks the pointer at the
    /// same perceived speed at every zoom level. Longitude wraps; latitude is
    /// left unclamped, so the globe can roll over a pole.
    pub fn reduce(self, action: CameraAction) -> Self {
        match action {
            CameraAction::Drag { dx, dy } => {
                let speed = self.settings.drag_speed / self.zoom;
                let rotation = Rotation {
                    lambda: wrap_lon(self.rotation.lambda + dx * speed),
                    phi: self.rotation.phi - dy * speed,
                    gamma: self.rotation.gamma,
                };
                Self { rotation, ..self }
            }
            CameraAction::Zoom(factor) => {
                if !factor.is_finite() || factor <= 0.0 {
                    return self;
                }
                let (min, max) = (self.settings.min_zoom, self.settings.max_zoom);
                let zoom = (self.zoom * factor).clamp(min, max);
                Self { zoom, ..self }
            }
            CameraAction::Reset => Self::new(self.settings),
        }
    }
}

impl Default for CameraState {
    fn default() -> Self {
        Self::new(CameraSettings::default())
    }
}
