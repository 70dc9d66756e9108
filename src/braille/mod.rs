//! Host drawing surface: replays a [`Frame`] onto a braille canvas.

mod canvas;
pub mod raster;

pub use canvas::{BrailleCanvas, Cell};

use crate::scene::{palette, DrawCommand, Frame};

/// Label gap between a flow node and its text, in cells.
const LABEL_GAP: usize = 1;

/// Paint a frame onto a fresh canvas of `cols` x `rows` cells.
pub fn paint(frame: &Frame, cols: usize, rows: usize) -> BrailleCanvas {
    let mut canvas = BrailleCanvas::new(cols, rows);
    for command in &frame.commands {
        apply(&mut canvas, command);
    }
    canvas
}

fn cell_of(x: f64, y: f64) -> (usize, usize) {
    ((x.max(0.0) / 2.0) as usize, (y.max(0.0) / 4.0) as usize)
}

fn apply(canvas: &mut BrailleCanvas, command: &DrawCommand) {
    match command {
        DrawCommand::Clear { .. } => canvas.clear(palette::BACKGROUND),
        DrawCommand::Background { color } => {
            let (w, h) = (canvas.dot_width() as f64, canvas.dot_height() as f64);
            raster::fill_rect(canvas, 0.0, 0.0, w, h, *color);
        }
        DrawCommand::Star { at, radius, color } => {
            raster::draw_circle(canvas, *at, *radius, *color)
        }
        DrawCommand::FlowLink { curve, width, from, to } => {
            raster::fill_band(canvas, curve, *width, *from, *to)
        }
        DrawCommand::FlowNode { rect, color, label } => {
            let (w, h) = (rect.width.max(1.0), rect.height.max(1.0));
            raster::fill_rect(canvas, rect.x, rect.y, w, h, *color);
            let (col, row) = cell_of(rect.x, rect.y + rect.height / 2.0);
            let (right_col, _) = cell_of(rect.x + rect.width, 0.0);
            let len = label.chars().count();
            // Labels sit beside the node, toward the panel interior
            let start = if col >= len + LABEL_GAP {
                col - len - LABEL_GAP
            } else {
                right_col + LABEL_GAP
            };
            canvas.put_text(start, row, label, palette::LABEL, None);
        }
        DrawCommand::ClipSphere { center, radius } => canvas.set_clip(*center, *radius),
        DrawCommand::FillSphere { color } => {
            let (w, h) = (canvas.dot_width() as f64, canvas.dot_height() as f64);
            raster::fill_rect(canvas, 0.0, 0.0, w, h, *color);
        }
        DrawCommand::Country { rings, outline, fill, stroke, stroke_width, .. } => {
            raster::fill_polygon(canvas, rings, *fill);
            for run in outline {
                raster::polyline(canvas, run, *stroke_width, *stroke);
            }
        }
        DrawCommand::ArcSegment { from, to, color, width } => {
            raster::stroke(canvas, *from, *to, *width, *color)
        }
        DrawCommand::ReleaseClip => canvas.release_clip(),
        DrawCommand::Tooltip { at, text } => {
            let (col, row) = cell_of(at.0, at.1);
            let padded = format!(" {text} ");
            let len = padded.chars().count();
            // Keep the tooltip on screen near the right edge
            let col = col.min(canvas.width().saturating_sub(len));
            canvas.put_text(col, row, &padded, palette::TOOLTIP_FG, Some(palette::TOOLTIP_BG));
        }
    }
}
