//! Scene Compositor: turns the current scene state into an ordered list of
//! draw commands. The host owns the actual surface and replays the commands.

mod compositor;
pub mod palette;
mod stars;

pub use compositor::{render, Compositor, Phase, RedrawTrigger, ARC_SEGMENTS};
pub use palette::Rgb;
pub use stars::{Star, Starfield, STAR_COUNT};

use crate::flow::{CubicBezier, FlowLayout};
use crate::geo::CountryCatalog;
use crate::map::{CameraState, ScreenPoint};
use crate::trade::FlowArc;

/// Overlay panel size relative to the surface.
const OVERLAY_WIDTH_FRACTION: f64 = 0.34;
const OVERLAY_HEIGHT_FRACTION: f64 = 0.45;
const OVERLAY_MARGIN: f64 = 4.0;

/// Axis-aligned rectangle in surface pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn origin(&self) -> ScreenPoint {
        (self.x, self.y)
    }
}

/// Drawing surface dimensions plus per-mount state that must not change
/// between redraws.
#[derive(Clone, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub stars: Starfield,
}

impl Viewport {
    /// Size the surface and scatter the starfield.
    pub fn mount(width: f64, height: f64, seed: u64) -> Self {
        Self { width, height, stars: Starfield::generate(width, height, seed) }
    }

    /// Screen-fixed panel hosting the flow diagram (top-left corner).
    pub fn overlay_panel(&self) -> Rect {
        Rect {
            x: OVERLAY_MARGIN,
            y: OVERLAY_MARGIN,
            width: (self.width * OVERLAY_WIDTH_FRACTION - OVERLAY_MARGIN).max(0.0),
            height: (self.height * OVERLAY_HEIGHT_FRACTION - OVERLAY_MARGIN).max(0.0),
        }
    }
}

/// Text shown next to the pointer while it hovers a country.
#[derive(Clone, Debug, PartialEq)]
pub struct Tooltip {
    pub text: String,
    pub at: ScreenPoint,
}

/// Everything one redraw pass reads. Holding only shared borrows keeps
/// [`render`] pure.
pub struct SceneState<'a> {
    pub viewport: &'a Viewport,
    pub camera: &'a CameraState,
    pub countries: &'a CountryCatalog,
    /// Geo name of the focal country.
    pub focal: &'a str,
    pub arcs: &'a [FlowArc],
    /// Flow layout in overlay-panel coordinates.
    pub flow: &'a FlowLayout,
    pub tooltip: Option<&'a Tooltip>,
}

/// One drawing instruction, in the order the surface must apply them.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear { width: f64, height: f64 },
    Background { color: Rgb },
    Star { at: ScreenPoint, radius: f64, color: Rgb },
    FlowLink { curve: CubicBezier, width: f64, from: Rgb, to: Rgb },
    FlowNode { rect: Rect, color: Rgb, label: String },
    /// Restrict subsequent drawing to the sphere outline.
    ClipSphere { center: ScreenPoint, radius: f64 },
    FillSphere { color: Rgb },
    Country {
        name: String,
        /// Closed rings for filling; far-side vertices sit on the outline.
        rings: Vec<Vec<ScreenPoint>>,
        /// Front-facing runs of the boundary.
        outline: Vec<Vec<ScreenPoint>>,
        fill: Rgb,
        stroke: Rgb,
        stroke_width: f64,
    },
    ArcSegment { from: ScreenPoint, to: ScreenPoint, color: Rgb, width: f64 },
    ReleaseClip,
    Tooltip { at: ScreenPoint, text: String },
}

/// Output of one redraw pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Frame {
    pub width: f64,
    pub height: f64,
    pub commands: Vec<DrawCommand>,
}

impl Frame {
    pub fn count(&self, pred: impl Fn(&DrawCommand) -> bool) -> usize {
        self.commands.iter().filter(|c| pred(c)).count()
    }
}
