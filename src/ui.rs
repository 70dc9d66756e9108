use crate::app::App;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
    Frame,
};
use trade_globe::braille::BrailleCanvas;
use trade_globe::scene::Rgb;

/// Render the UI
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Split into globe area and status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // Globe
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    render_globe(frame, app, chunks[0]);
    render_status_bar(frame, app, chunks[1]);
}

fn render_globe(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            format!(" {} exports ", app.focal()),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ));

    let inner = block.inner(area);
    frame.render_widget(block, area);
    frame.render_widget(GlobeWidget { canvas: app.canvas() }, inner);
}

fn color(Rgb(r, g, b): Rgb) -> Color {
    Color::Rgb(r, g, b)
}

/// Copies resolved braille cells into the terminal buffer.
struct GlobeWidget<'a> {
    canvas: &'a BrailleCanvas,
}

impl Widget for GlobeWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let rows = self.canvas.height().min(area.height as usize);
        let cols = self.canvas.width().min(area.width as usize);
        for row in 0..rows {
            let y = area.y + row as u16;
            for col in 0..cols {
                let x = area.x + col as u16;
                let cell = self.canvas.cell(col, row);
                buf[(x, y)].set_char(cell.ch).set_fg(color(cell.fg)).set_bg(color(cell.bg));
            }
        }
    }
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let dim = Style::default().fg(Color::DarkGray);

    let mut spans = vec![
        Span::styled(" ", dim),
        Span::styled(app.category_label().to_string(), Style::default().fg(Color::Green)),
        Span::styled(" ", dim),
        Span::styled(app.year().to_string(), Style::default().fg(Color::Yellow)),
        Span::styled(format!(" | {} destinations", app.arc_count()), dim),
        Span::styled(" | Zoom: ", dim),
        Span::styled(app.zoom_level(), Style::default().fg(Color::Yellow)),
        Span::styled(" | ", dim),
        Span::styled(app.center_coords(), Style::default().fg(Color::Cyan)),
    ];
    if let Some(status) = &app.status {
        spans.push(Span::styled(" | ", dim));
        let bold = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);
        spans.push(Span::styled(status.clone(), bold));
    }
    spans.push(Span::styled(" | ,/.:year [/]:category r:reset q:quit", dim));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
