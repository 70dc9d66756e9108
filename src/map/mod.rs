//! Projection & Camera State: the camera reducer and the orthographic
//! projection derived from it each frame.

mod camera;
mod globe;

pub use camera::{CameraAction, CameraSettings, CameraState, Rotation};
pub use globe::{GlobeProjection, ScreenPoint};
