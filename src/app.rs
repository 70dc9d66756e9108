use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, info};
use trade_globe::braille::{self, BrailleCanvas};
use trade_globe::config::Config;
use trade_globe::flow::{self, FlowLayout};
use trade_globe::geo::CountryCatalog;
use trade_globe::interaction::{HitContext, InteractionRouter, PointerEvent};
use trade_globe::map::{CameraAction, CameraState, Rotation};
use trade_globe::scene::{Compositor, Frame, RedrawTrigger, SceneState, Viewport};
use trade_globe::trade::{self, Aggregator, AliasTable, Filter, FlowArc, TradeRecord};

/// Seed for the starfield; fixed so the sky is the same on every run.
const STAR_SEED: u64 = 0x5EED_57A2;

/// Terminal cells taken by the border (2 columns) and border + status bar (3 rows).
const CHROME_COLS: usize = 2;
const CHROME_ROWS: usize = 3;

/// Braille dots per terminal cell.
const DOTS_X: usize = 2;
const DOTS_Y: usize = 4;

/// Application state: the host page around the globe core.
pub struct App {
    countries: CountryCatalog,
    aliases: AliasTable,
    records: Vec<TradeRecord>,
    focal: String,
    categories: Vec<String>,
    years: Vec<String>,
    filter: Filter,
    arcs: Vec<FlowArc>,
    flow: FlowLayout,
    viewport: Viewport,
    router: InteractionRouter,
    compositor: Compositor,
    canvas: BrailleCanvas,
    selected: Rc<RefCell<Option<String>>>,
    /// Last selection summary shown in the status bar
    pub status: Option<String>,
    pub should_quit: bool,
}

/// Canvas size in cells for a terminal size.
fn inner_size(width: usize, height: usize) -> (usize, usize) {
    (width.saturating_sub(CHROME_COLS), height.saturating_sub(CHROME_ROWS))
}

/// Convert terminal coords to braille dot coords at the cell center.
/// Accounts for the border (1 cell offset).
pub fn to_dots(col: u16, row: u16) -> (f64, f64) {
    let px = col.saturating_sub(1) as usize * DOTS_X;
    let py = row.saturating_sub(1) as usize * DOTS_Y;
    (px as f64 + DOTS_X as f64 / 2.0, py as f64 + DOTS_Y as f64 / 2.0)
}

impl App {
    pub fn new(
        config: &Config,
        countries: CountryCatalog,
        records: Vec<TradeRecord>,
        width: usize,
        height: usize,
    ) -> Self {
        let (cols, rows) = inner_size(width, height);
        let (dot_w, dot_h) = ((cols * DOTS_X) as f64, (rows * DOTS_Y) as f64);

        let home = countries
            .find_by_name(&config.focal)
            .map(|f| Rotation::centered_on(f.centroid()));
        let camera = CameraState::new(config.camera_settings(home));

        let categories = trade::categories(&records);
        let years = trade::years(&records);
        let category = config
            .category
            .clone()
            .or_else(|| categories.first().cloned())
            .unwrap_or_default();
        let year = if years.is_empty() || years.contains(&config.year) {
            config.year.clone()
        } else {
            years.last().cloned().unwrap_or_default()
        };

        let selected = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&selected);
        let router = InteractionRouter::new(camera, dot_w, dot_h, move |name: &str| {
            *sink.borrow_mut() = Some(name.to_string());
        });

        info!(
            focal = %config.focal,
            countries = countries.len(),
            records = records.len(),
            categories = categories.len(),
            years = years.len(),
            "mounted"
        );

        let mut app = Self {
            countries,
            aliases: AliasTable::default(),
            records,
            focal: config.focal.clone(),
            categories,
            years,
            filter: Filter::new(category, year),
            arcs: Vec::new(),
            flow: FlowLayout::default(),
            viewport: Viewport::mount(dot_w, dot_h, STAR_SEED),
            router,
            compositor: Compositor::new(),
            canvas: BrailleCanvas::new(cols, rows),
            selected,
            status: None,
            should_quit: false,
        };
        app.aggregate();
        app.redraw(RedrawTrigger::Mount);
        app
    }

    /// Recompute arcs and the flow layout for the current filter.
    fn aggregate(&mut self) {
        let aggregator = Aggregator::new(&self.countries, &self.aliases, &self.focal);
        self.arcs = aggregator.arcs(&self.records, &self.filter);
        self.relayout();
    }

    fn relayout(&mut self) {
        let aggregator = Aggregator::new(&self.countries, &self.aliases, &self.focal);
        let panel = self.viewport.overlay_panel();
        let tree = aggregator.category_tree(&self.records, &self.filter.year);
        self.flow = flow::layout(&tree, panel.width, panel.height);
    }

    fn redraw(&mut self, trigger: RedrawTrigger) {
        let scene = SceneState {
            viewport: &self.viewport,
            camera: self.router.camera(),
            countries: &self.countries,
            focal: &self.focal,
            arcs: &self.arcs,
            flow: &self.flow,
            tooltip: self.router.tooltip(),
        };
        let frame: Frame = self.compositor.redraw(trigger, &scene);
        self.canvas = braille::paint(&frame, self.canvas.width(), self.canvas.height());
    }

    pub fn canvas(&self) -> &BrailleCanvas {
        &self.canvas
    }

    /// Route a pointer event, then redraw if it asked for one.
    pub fn pointer(&mut self, event: PointerEvent) {
        let ctx = HitContext { countries: &self.countries, aliases: &self.aliases };
        if let Some(trigger) = self.router.handle(event, ctx) {
            self.redraw(trigger);
        }
        self.take_selection();
    }

    fn take_selection(&mut self) {
        let Some(name) = self.selected.borrow_mut().take() else {
            return;
        };
        let geo_name = self.aliases.geo_name(&name);
        if geo_name == self.focal {
            debug!(country = %name, "focal country selection ignored");
            return;
        }
        let total =
            trade::destination_total(&self.records, &self.aliases, geo_name, &self.filter.year);
        self.status = Some(format!(
            "Exports to {geo_name} ({}): {}",
            self.filter.year,
            format_value(total)
        ));
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        let (cols, rows) = inner_size(width, height);
        let (dot_w, dot_h) = ((cols * DOTS_X) as f64, (rows * DOTS_Y) as f64);
        self.viewport = Viewport::mount(dot_w, dot_h, STAR_SEED);
        self.canvas = BrailleCanvas::new(cols, rows);
        self.relayout();
        let ctx = HitContext { countries: &self.countries, aliases: &self.aliases };
        let resize = PointerEvent::Resize { width: dot_w, height: dot_h };
        if let Some(trigger) = self.router.handle(resize, ctx) {
            self.redraw(trigger);
        }
    }

    /// Whether a terminal position lies inside the globe canvas.
    pub fn in_canvas(&self, col: u16, row: u16) -> bool {
        let (col, row) = (col as usize, row as usize);
        col >= 1 && row >= 1 && col <= self.canvas.width() && row <= self.canvas.height()
    }

    /// Move the year slider by `delta` steps.
    pub fn step_year(&mut self, delta: isize) {
        if let Some(year) = step(&self.years, &self.filter.year, delta) {
            self.set_filter(Filter::new(self.filter.category.clone(), year));
        }
    }

    /// Move the category picker by `delta` entries.
    pub fn step_category(&mut self, delta: isize) {
        if let Some(category) = step(&self.categories, &self.filter.category, delta) {
            self.set_filter(Filter::new(category, self.filter.year.clone()));
        }
    }

    fn set_filter(&mut self, filter: Filter) {
        if filter == self.filter {
            return;
        }
        self.filter = filter;
        self.aggregate();
        self.redraw(RedrawTrigger::Filter);
    }

    pub fn reset_camera(&mut self) {
        let trigger = self.router.apply(CameraAction::Reset);
        self.redraw(trigger);
    }

    /// Request quit
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn focal(&self) -> &str {
        &self.focal
    }

    /// Display label of the active category.
    pub fn category_label(&self) -> &str {
        trade::category_label(&self.filter.category)
    }

    pub fn year(&self) -> &str {
        &self.filter.year
    }

    pub fn arc_count(&self) -> usize {
        self.arcs.len()
    }

    /// Get current zoom level as a string
    pub fn zoom_level(&self) -> String {
        format!("{:.1}x", self.router.camera().zoom)
    }

    /// Get current center coordinates as a string
    pub fn center_coords(&self) -> String {
        let (lon, lat) = self.router.camera().rotation.center();
        let lon = trade_globe::geo::wrap_lon(lon);
        format!(
            "{:.1}°{}, {:.1}°{}",
            lat.abs(),
            if lat >= 0.0 { "N" } else { "S" },
            lon.abs(),
            if lon >= 0.0 { "E" } else { "W" }
        )
    }
}

/// Neighbour of `current` in `items`, clamped at both ends.
fn step(items: &[String], current: &str, delta: isize) -> Option<String> {
    if items.is_empty() {
        return None;
    }
    let index = items.iter().position(|i| i == current).unwrap_or(0) as isize;
    let next = (index + delta).clamp(0, items.len() as isize - 1) as usize;
    Some(items[next].clone())
}

/// Human-readable currency amount.
fn format_value(value: f64) -> String {
    const UNITS: [(f64, &str); 3] = [(1e9, "bn"), (1e6, "m"), (1e3, "k")];
    UNITS
        .iter()
        .find(|(scale, _)| value.abs() >= *scale)
        .map(|(scale, suffix)| format!("{:.1}{suffix}", value / scale))
        .unwrap_or_else(|| format!("{value:.0}"))
}
