mod app;
mod ui;

use std::fs::File;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton,
    MouseEvent, MouseEventKind,
};
use crossterm::execute;
use ratatui::DefaultTerminal;
use tracing_subscriber::EnvFilter;
use trade_globe::config::Config;
use trade_globe::data;
use trade_globe::interaction::PointerEvent;

fn main() -> Result<()> {
    let config = Config::parse();
    init_tracing(&config)?;

    // Load before touching the terminal so a bad boundary file never draws
    let countries = data::load_countries(&config.boundaries)
        .with_context(|| format!("loading boundaries from {}", config.boundaries.display()))?;
    let records = data::load_records(&config.records)
        .with_context(|| format!("loading trade records from {}", config.records.display()))?;

    // Initialize terminal
    let mut terminal = ratatui::init();
    terminal.clear()?;

    // Enable mouse capture
    execute!(std::io::stdout(), EnableMouseCapture)?;

    let size = terminal.size()?;
    let mut app = App::new(&config, countries, records, size.width as usize, size.height as usize);
    let result = run(&mut terminal, &mut app);

    // Disable mouse capture and restore terminal
    let _ = execute!(std::io::stdout(), DisableMouseCapture);
    ratatui::restore();

    result
}

/// Log to a file only; the terminal belongs to the UI.
fn init_tracing(config: &Config) -> Result<()> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };
    let file = File::create(path).with_context(|| format!("creating log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("trade_globe=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// Translate terminal mouse events into router events
fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    if !app.in_canvas(mouse.column, mouse.row) {
        app.pointer(PointerEvent::Leave);
        return;
    }
    let at = app::to_dots(mouse.column, mouse.row);

    let event = match mouse.kind {
        MouseEventKind::ScrollUp => PointerEvent::Wheel(1),
        MouseEventKind::ScrollDown => PointerEvent::Wheel(-1),
        MouseEventKind::Down(MouseButton::Left) => PointerEvent::DragStart(at),
        MouseEventKind::Drag(MouseButton::Left) => PointerEvent::DragMove(at),
        MouseEventKind::Up(MouseButton::Left) => PointerEvent::DragEnd(at),
        MouseEventKind::Moved => PointerEvent::Move(at),
        _ => return,
    };
    app.pointer(event);
}

fn run(terminal: &mut DefaultTerminal, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        // Frames are composed on events; this loop only repaints the latest one
        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => app.quit(),

                    // Year slider and category picker
                    KeyCode::Char(',') | KeyCode::Left => app.step_year(-1),
                    KeyCode::Char('.') | KeyCode::Right => app.step_year(1),
                    KeyCode::Char('[') | KeyCode::Up => app.step_category(-1),
                    KeyCode::Char(']') | KeyCode::Down => app.step_category(1),

                    KeyCode::Char('r') | KeyCode::Char('0') => app.reset_camera(),
                    _ => {}
                },
                Event::Mouse(mouse) => handle_mouse(app, mouse),
                Event::FocusLost => app.pointer(PointerEvent::Leave),
                Event::Resize(width, height) => app.resize(width as usize, height as usize),
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
