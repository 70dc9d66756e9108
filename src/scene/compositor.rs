use tracing::trace;

use crate::geo::sphere::edge_steps;
use crate::geo::{CountryFeature, GreatCircle, LonLat};
use crate::map::{GlobeProjection, ScreenPoint};
use crate::scene::palette::{self, Rgb};
use crate::scene::{DrawCommand, Frame, Rect, SceneState};
use crate::trade::NodeKind;

/// Straight segments per arc; each gets its own colour and width.
pub const ARC_SEGMENTS: usize = 64;
const ARC_BASE_WIDTH: f64 = 1.0;
const ARC_WIDTH_GAIN: f64 = 3.0;

const STROKE_PER_ZOOM: f64 = 0.2;
const MIN_STROKE: f64 = 0.4;

const TOOLTIP_OFFSET: ScreenPoint = (2.0, 4.0);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Drawing,
}

/// Why a redraw pass ran.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RedrawTrigger {
    Mount,
    Filter,
    Camera,
    Resize,
    Hover,
}

/// Runs redraw passes. Each pass is synchronous and rebuilds the whole frame;
/// nothing carries over from the previous one.
#[derive(Debug)]
pub struct Compositor {
    phase: Phase,
    passes: u64,
}

impl Compositor {
    pub fn new() -> Self {
        Self { phase: Phase::Idle, passes: 0 }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Completed redraw passes since creation.
    pub fn passes(&self) -> u64 {
        self.passes
    }

    pub fn redraw(&mut self, trigger: RedrawTrigger, scene: &SceneState) -> Frame {
        self.phase = Phase::Drawing;
        let frame = render(scene);
        self.phase = Phase::Idle;
        self.passes += 1;
        trace!(?trigger, pass = self.passes, commands = frame.commands.len(), "redraw");
        frame
    }
}

impl Default for Compositor {
    fn default() -> Self {
        Self::new()
    }
}

/// Compose one frame. Order is fixed: clear, background and stars, flow
/// overlay, sphere clip, ocean, countries, arcs, release clip, tooltip.
pub fn render(scene: &SceneState) -> Frame {
    let viewport = scene.viewport;
    let mut commands = Vec::new();

    commands.push(DrawCommand::Clear { width: viewport.width, height: viewport.height });
    commands.push(DrawCommand::Background { color: palette::BACKGROUND });
    commands.extend(viewport.stars.stars().iter().map(|s| DrawCommand::Star {
        at: s.at,
        radius: s.radius,
        color: palette::STAR,
    }));

    push_overlay(&mut commands, scene);

    let projection = GlobeProjection::new(scene.camera, viewport.width, viewport.height);
    commands.push(DrawCommand::ClipSphere {
        center: projection.center(),
        radius: projection.radius,
    });
    commands.push(DrawCommand::FillSphere { color: palette::OCEAN });

    let stroke_width = (STROKE_PER_ZOOM * scene.camera.zoom).max(MIN_STROKE);
    commands.extend(
        scene
            .countries
            .iter()
            .filter_map(|f| country_command(f, &projection, scene.focal, stroke_width)),
    );

    push_arcs(&mut commands, scene, &projection);

    commands.push(DrawCommand::ReleaseClip);

    if let Some(tooltip) = scene.tooltip {
        commands.push(DrawCommand::Tooltip {
            at: (tooltip.at.0 + TOOLTIP_OFFSET.0, tooltip.at.1 + TOOLTIP_OFFSET.1),
            text: tooltip.text.clone(),
        });
    }

    Frame { width: viewport.width, height: viewport.height, commands }
}

fn node_color(kind: NodeKind, index: usize) -> Rgb {
    match kind {
        NodeKind::Root => palette::FOCAL_LAND,
        NodeKind::Category => palette::category(index.saturating_sub(1)),
        NodeKind::Other => palette::OTHER_NODE,
    }
}

fn push_overlay(commands: &mut Vec<DrawCommand>, scene: &SceneState) {
    let flow = scene.flow;
    if flow.is_empty() {
        return;
    }
    let panel = scene.viewport.overlay_panel();
    let color_of = |index: usize| {
        flow.nodes
            .iter()
            .find(|n| n.index == index)
            .map(|n| node_color(n.kind, n.index))
            .unwrap_or(palette::OTHER_NODE)
    };

    for link in &flow.links {
        commands.push(DrawCommand::FlowLink {
            curve: link.curve.translate(panel.origin()),
            width: link.width,
            from: color_of(link.source),
            to: color_of(link.target),
        });
    }
    for node in &flow.nodes {
        commands.push(DrawCommand::FlowNode {
            rect: Rect {
                x: panel.x + node.x0,
                y: panel.y + node.y0,
                width: node.x1 - node.x0,
                height: node.height(),
            },
            color: node_color(node.kind, node.index),
            label: node.label.clone(),
        });
    }
}

/// Densify a ring along great circles so long edges bend with the sphere.
fn densify(ring: &[LonLat]) -> Vec<LonLat> {
    let mut points = Vec::with_capacity(ring.len() + 1);
    for edge in ring.windows(2) {
        let steps = edge_steps(edge[0], edge[1]);
        if steps == 1 {
            points.push(edge[0]);
            continue;
        }
        let gc = GreatCircle::new(edge[0], edge[1]);
        points.extend((0..steps).map(|i| gc.point(i as f64 / steps as f64)));
    }
    if let (Some(&first), Some(&last)) = (ring.first(), ring.last()) {
        points.push(last);
        if first != last {
            points.push(first);
        }
    }
    points
}

fn country_command(
    feature: &CountryFeature,
    projection: &GlobeProjection,
    focal: &str,
    stroke_width: f64,
) -> Option<DrawCommand> {
    let mut rings = Vec::new();
    let mut outline = Vec::new();

    for ring in feature.polygons().iter().flat_map(|p| p.rings()) {
        let mut filled = Vec::with_capacity(ring.len());
        let mut run: Vec<ScreenPoint> = Vec::new();
        let mut visible = false;

        for point in densify(ring) {
            match projection.project(point) {
                Some(screen) => {
                    visible = true;
                    filled.push(screen);
                    run.push(screen);
                }
                None => {
                    filled.push(projection.project_to_limb(point));
                    if run.len() >= 2 {
                        outline.push(std::mem::take(&mut run));
                    } else {
                        run.clear();
                    }
                }
            }
        }
        if run.len() >= 2 {
            outline.push(run);
        }
        if visible {
            rings.push(filled);
        }
    }

    if rings.is_empty() {
        return None;
    }
    let fill = if feature.name() == focal { palette::FOCAL_LAND } else { palette::LAND };
    Some(DrawCommand::Country {
        name: feature.name().to_string(),
        rings,
        outline,
        fill,
        stroke: palette::BORDER,
        stroke_width,
    })
}

fn push_arcs(commands: &mut Vec<DrawCommand>, scene: &SceneState, projection: &GlobeProjection) {
    for arc in scene.arcs {
        let path = GreatCircle::new(arc.origin, arc.dest);
        let end_color = palette::magnitude(arc.normalized_weight);
        let mut prev = projection.project(path.point(0.0));

        for k in 1..=ARC_SEGMENTS {
            let next = projection.project(path.point(k as f64 / ARC_SEGMENTS as f64));
            if let (Some(from), Some(to)) = (prev, next) {
                let t = (k as f64 - 0.5) / ARC_SEGMENTS as f64;
                commands.push(DrawCommand::ArcSegment {
                    from,
                    to,
                    color: palette::FOCAL_LAND.lerp(end_color, t),
                    width: ARC_BASE_WIDTH + ARC_WIDTH_GAIN * arc.normalized_weight * t,
                });
            }
            prev = next;
        }
    }
}
