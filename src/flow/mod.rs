//! Flow Diagram Layout: a two-column proportional node-link layout of the
//! category tree, focal country on the left, categories on the right.

use crate::map::ScreenPoint;
use crate::trade::{CategoryTree, NodeKind};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutSettings {
    pub node_width: f64,
    /// Vertical gap between stacked nodes; shrunk when the column would not fit.
    pub node_padding: f64,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self { node_width: 20.0, node_padding: 10.0 }
    }
}

/// Cubic bezier in layout coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubicBezier {
    pub p0: ScreenPoint,
    pub p1: ScreenPoint,
    pub p2: ScreenPoint,
    pub p3: ScreenPoint,
}

impl CubicBezier {
    /// Horizontal link shape: control points share the midpoint x.
    pub fn horizontal(from: ScreenPoint, to: ScreenPoint) -> Self {
        let mid = (from.0 + to.0) / 2.0;
        Self { p0: from, p1: (mid, from.1), p2: (mid, to.1), p3: to }
    }

    pub fn point(&self, t: f64) -> ScreenPoint {
        let u = 1.0 - t;
        let (a, b, c, d) = (u * u * u, 3.0 * u * u * t, 3.0 * u * t * t, t * t * t);
        (
            a * self.p0.0 + b * self.p1.0 + c * self.p2.0 + d * self.p3.0,
            a * self.p0.1 + b * self.p1.1 + c * self.p2.1 + d * self.p3.1,
        )
    }

    pub fn translate(&self, (dx, dy): ScreenPoint) -> Self {
        let shift = |(x, y): ScreenPoint| (x + dx, y + dy);
        Self { p0: shift(self.p0), p1: shift(self.p1), p2: shift(self.p2), p3: shift(self.p3) }
    }
}

/// Placed node box.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeBox {
    pub id: String,
    pub label: String,
    pub kind: NodeKind,
    /// Index of the node in the category tree.
    pub index: usize,
    pub value: f64,
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl NodeBox {
    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }
}

/// Placed link; `width` is proportional to its value.
#[derive(Clone, Debug, PartialEq)]
pub struct LinkPath {
    pub source: usize,
    pub target: usize,
    pub value: f64,
    pub width: f64,
    pub curve: CubicBezier,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FlowLayout {
    pub nodes: Vec<NodeBox>,
    pub links: Vec<LinkPath>,
}

impl FlowLayout {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Lay out with default node width and padding.
pub fn layout(tree: &CategoryTree, width: f64, height: f64) -> FlowLayout {
    layout_with(tree, width, height, &LayoutSettings::default())
}

/// Lay out a root-to-categories tree in `width` x `height`.
///
/// Returns an empty layout for degenerate input (one node or fewer, no
/// links, no positive flow, or an area too small for two columns).
pub fn layout_with(
    tree: &CategoryTree,
    width: f64,
    height: f64,
    settings: &LayoutSettings,
) -> FlowLayout {
    if tree.nodes.len() <= 1 || tree.links.is_empty() {
        return FlowLayout::default();
    }
    if !(width > 2.0 * settings.node_width) || !(height > 0.0) {
        return FlowLayout::default();
    }

    let links: Vec<_> = tree
        .links
        .iter()
        .filter(|l| l.value > 0.0 && l.source < tree.nodes.len() && l.target < tree.nodes.len())
        .collect();
    let total: f64 = links.iter().map(|l| l.value).sum();
    if links.is_empty() || total <= 0.0 {
        return FlowLayout::default();
    }

    let n = links.len();
    let padding = if n > 1 {
        settings.node_padding.min(height / 2.0 / (n - 1) as f64)
    } else {
        0.0
    };
    let ky = (height - padding * (n - 1) as f64) / total;

    let root_index = links[0].source;
    let root = &tree.nodes[root_index];
    let root_height = total * ky;
    let root_box = NodeBox {
        id: root.id.clone(),
        label: root.label.clone(),
        kind: root.kind,
        index: root_index,
        value: total,
        x0: 0.0,
        y0: (height - root_height) / 2.0,
        x1: settings.node_width,
        y1: (height + root_height) / 2.0,
    };

    let mut layout = FlowLayout { nodes: Vec::with_capacity(n + 1), links: Vec::with_capacity(n) };
    let mut source_y = root_box.y0;
    let mut target_y = 0.0;

    for link in links {
        let node = &tree.nodes[link.target];
        let band = link.value * ky;
        let target = NodeBox {
            id: node.id.clone(),
            label: node.label.clone(),
            kind: node.kind,
            index: link.target,
            value: link.value,
            x0: width - settings.node_width,
            y0: target_y,
            x1: width,
            y1: target_y + band,
        };

        let from = (root_box.x1, source_y + band / 2.0);
        let to = (target.x0, target_y + band / 2.0);
        layout.links.push(LinkPath {
            source: root_index,
            target: link.target,
            value: link.value,
            width: band,
            curve: CubicBezier::horizontal(from, to),
        });

        source_y += band;
        target_y += band + padding;
        layout.nodes.push(target);
    }

    layout.nodes.insert(0, root_box);
    layout
}
