use crate::braille::BrailleCanvas;
use crate::flow::CubicBezier;
use crate::map::ScreenPoint;
use crate::scene::Rgb;

/// Samples along a flow link curve.
const BEZIER_SAMPLES: usize = 48;

/// Draw a line using Bresenham's algorithm
pub fn draw_line(canvas: &mut BrailleCanvas, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgb) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    let mut x = x0;
    let mut y = y0;

    loop {
        canvas.ink_dot(x, y, color);

        if x == x1 && y == y1 {
            break;
        }

        let e2 = 2 * err;

        if e2 >= dy {
            if x == x1 {
                break;
            }
            err += dy;
            x += sx;
        }

        if e2 <= dx {
            if y == y1 {
                break;
            }
            err += dx;
            y += sy;
        }
    }
}

#[inline]
fn dot((x, y): ScreenPoint) -> (i32, i32) {
    (x.floor() as i32, y.floor() as i32)
}

/// Line of a given width in dots. Anything under two dots wide is a
/// single Bresenham line; wider strokes are offset copies.
pub fn stroke(
    canvas: &mut BrailleCanvas,
    from: ScreenPoint,
    to: ScreenPoint,
    width: f64,
    color: Rgb,
) {
    if !(from.0.is_finite() && from.1.is_finite() && to.0.is_finite() && to.1.is_finite()) {
        return;
    }
    let (x0, y0) = dot(from);
    let (x1, y1) = dot(to);
    let half = ((width - 1.0) / 2.0).round().max(0.0) as i32;
    for oy in -half..=half {
        for ox in -half..=half {
            draw_line(canvas, x0 + ox, y0 + oy, x1 + ox, y1 + oy, color);
        }
    }
}

/// Stroke consecutive points as a connected path.
pub fn polyline(canvas: &mut BrailleCanvas, points: &[ScreenPoint], width: f64, color: Rgb) {
    for pair in points.windows(2) {
        stroke(canvas, pair[0], pair[1], width, color);
    }
}

/// Ink a filled disc (stars).
pub fn draw_circle(canvas: &mut BrailleCanvas, (cx, cy): ScreenPoint, radius: f64, color: Rgb) {
    let (x, y) = dot((cx, cy));
    let r = radius.floor() as i32;
    for dy in -r..=r {
        for dx in -r..=r {
            if dx * dx + dy * dy <= r * r {
                canvas.ink_dot(x + dx, y + dy, color);
            }
        }
    }
}

/// Fill dots with centers in `[x0, x1)` on one row.
fn fill_span(canvas: &mut BrailleCanvas, y: i32, x0: f64, x1: f64, color: Rgb) {
    let start = (x0 - 0.5).ceil().max(0.0) as i32;
    let end = (x1 - 0.5).ceil().min(canvas.dot_width() as f64) as i32;
    for x in start..end {
        canvas.fill_dot(x, y, color);
    }
}

pub fn fill_rect(canvas: &mut BrailleCanvas, x: f64, y: f64, width: f64, height: f64, color: Rgb) {
    let row0 = (y - 0.5).ceil().max(0.0) as i32;
    let row1 = (y + height - 0.5).ceil().min(canvas.dot_height() as f64) as i32;
    for row in row0..row1 {
        fill_span(canvas, row, x, x + width, color);
    }
}

/// Even-odd scanline fill over a set of rings, each implicitly closed.
pub fn fill_polygon(canvas: &mut BrailleCanvas, rings: &[Vec<ScreenPoint>], color: Rgb) {
    let (mut min_y, mut max_y) = (f64::MAX, f64::MIN);
    for &(_, y) in rings.iter().flatten() {
        min_y = min_y.min(y);
        max_y = max_y.max(y);
    }
    if !(min_y.is_finite() && max_y.is_finite()) {
        return;
    }

    let row0 = (min_y - 0.5).ceil().max(0.0) as i32;
    let row1 = (max_y - 0.5).floor().min(canvas.dot_height() as f64 - 1.0) as i32;
    let mut crossings: Vec<f64> = Vec::new();

    for row in row0..=row1 {
        let sy = row as f64 + 0.5;
        crossings.clear();
        for ring in rings.iter().filter(|r| r.len() >= 3) {
            let mut j = ring.len() - 1;
            for i in 0..ring.len() {
                let ((xi, yi), (xj, yj)) = (ring[i], ring[j]);
                if (yi > sy) != (yj > sy) {
                    crossings.push(xj + (sy - yj) * (xi - xj) / (yi - yj));
                }
                j = i;
            }
        }
        crossings.sort_by(f64::total_cmp);
        for pair in crossings.chunks_exact(2) {
            fill_span(canvas, row, pair[0], pair[1], color);
        }
    }
}

/// Horizontal flow band: a vertical run of `width` dots swept along the
/// curve, colour blended from `from` to `to`.
pub fn fill_band(canvas: &mut BrailleCanvas, curve: &CubicBezier, width: f64, from: Rgb, to: Rgb) {
    let half = (width / 2.0).max(0.5);
    let mut prev = curve.point(0.0);
    for i in 1..=BEZIER_SAMPLES {
        let t = i as f64 / BEZIER_SAMPLES as f64;
        let next = curve.point(t);
        let color = from.lerp(to, t);
        let (xa, xb) = if prev.0 <= next.0 { (prev.0, next.0) } else { (next.0, prev.0) };
        let column0 = (xa - 0.5).ceil() as i32;
        let column1 = (xb - 0.5).ceil().max(column0 as f64 + 1.0) as i32;
        for x in column0..column1 {
            let u = if xb > xa { (x as f64 + 0.5 - xa) / (xb - xa) } else { 0.5 };
            let cy = prev.1 + (next.1 - prev.1) * u.clamp(0.0, 1.0);
            let row0 = (cy - half - 0.5).ceil() as i32;
            let row1 = (cy + half - 0.5).ceil() as i32;
            for y in row0..row1.max(row0 + 1) {
                canvas.fill_dot(x, y, color);
            }
        }
        prev = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgb = Rgb(255, 0, 0);

    #[test]
    fn test_horizontal_line() {
        let mut canvas = BrailleCanvas::new(5, 1);
        draw_line(&mut canvas, 0, 0, 9, 0, RED);
        // Top row of every cell lit
        assert_eq!(canvas.to_string(), "⠉⠉⠉⠉⠉");
    }

    #[test]
    fn test_vertical_line() {
        let mut canvas = BrailleCanvas::new(1, 2);
        draw_line(&mut canvas, 0, 0, 0, 7, RED);
        assert_eq!(canvas.to_string(), "⡇\n⡇");
    }

    #[test]
    fn test_wide_stroke_covers_more_dots() {
        let lit = |width: f64| {
            let mut canvas = BrailleCanvas::new(10, 5);
            stroke(&mut canvas, (2.0, 10.0), (18.0, 10.0), width, RED);
            canvas.to_string().chars().filter(|&c| c != '\u{2800}' && c != '\n').count()
        };
        assert!(lit(4.0) > lit(1.0));
    }

    #[test]
    fn test_fill_polygon_square() {
        let mut canvas = BrailleCanvas::new(4, 2);
        let square = vec![(0.0, 0.0), (4.0, 0.0), (4.0, 8.0), (0.0, 8.0)];
        fill_polygon(&mut canvas, &[square], RED);
        assert_eq!(canvas.cell(0, 0).bg, RED);
        assert_eq!(canvas.cell(1, 1).bg, RED);
        assert_eq!(canvas.cell(2, 0).bg, Rgb(0, 0, 0));
    }

    #[test]
    fn test_fill_polygon_hole() {
        let mut canvas = BrailleCanvas::new(6, 3);
        let outer = vec![(0.0, 0.0), (12.0, 0.0), (12.0, 12.0), (0.0, 12.0)];
        let hole = vec![(4.0, 4.0), (8.0, 4.0), (8.0, 8.0), (4.0, 8.0)];
        fill_polygon(&mut canvas, &[outer, hole], RED);
        assert_eq!(canvas.cell(0, 0).bg, RED);
        assert_eq!(canvas.cell(2, 1).bg, Rgb(0, 0, 0));
    }

    #[test]
    fn test_band_blends_colours() {
        let mut canvas = BrailleCanvas::new(20, 5);
        let curve = CubicBezier::horizontal((0.0, 10.0), (40.0, 10.0));
        fill_band(&mut canvas, &curve, 8.0, Rgb(0, 0, 200), RED);
        let left = canvas.cell(0, 2).bg;
        let right = canvas.cell(19, 2).bg;
        assert!(left.2 > right.2);
        assert!(right.0 > left.0);
    }
}
