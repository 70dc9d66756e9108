//! Interaction Router: turns pointer, wheel and resize events into camera
//! transitions, hover tooltips and click selection.

use tracing::debug;

use crate::geo::{CountryCatalog, CountryFeature};
use crate::map::{CameraAction, CameraState, GlobeProjection, ScreenPoint};
use crate::scene::{RedrawTrigger, Tooltip};
use crate::trade::AliasTable;

/// Zoom factor for one wheel notch.
pub const WHEEL_ZOOM_STEP: f64 = 1.25;

/// Notches applied per wheel event. 1.25^64 spans any sane zoom range while
/// staying finite.
const MAX_WHEEL_NOTCHES: i32 = 64;

/// Device-independent input, in surface pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    DragStart(ScreenPoint),
    DragMove(ScreenPoint),
    /// Releasing without having moved counts as a click.
    DragEnd(ScreenPoint),
    Click(ScreenPoint),
    /// Positive notches zoom in.
    Wheel(i32),
    Move(ScreenPoint),
    Leave,
    Resize { width: f64, height: f64 },
}

#[derive(Clone, Copy, Debug)]
struct Drag {
    last: ScreenPoint,
    moved: bool,
}

/// Read-only lookups the router needs to resolve a pointer position.
#[derive(Clone, Copy)]
pub struct HitContext<'a> {
    pub countries: &'a CountryCatalog,
    pub aliases: &'a AliasTable,
}

/// Single writer of [`CameraState`]. Every handled event reports the redraw
/// it needs; nothing is debounced.
pub struct InteractionRouter {
    camera: CameraState,
    width: f64,
    height: f64,
    drag: Option<Drag>,
    tooltip: Option<Tooltip>,
    on_select: Box<dyn FnMut(&str)>,
}

impl InteractionRouter {
    /// `on_select` receives the trade-record name of a clicked country.
    pub fn new(
        camera: CameraState,
        width: f64,
        height: f64,
        on_select: impl FnMut(&str) + 'static,
    ) -> Self {
        Self {
            camera,
            width,
            height,
            drag: None,
            tooltip: None,
            on_select: Box::new(on_select),
        }
    }

    pub fn camera(&self) -> &CameraState {
        &self.camera
    }

    pub fn tooltip(&self) -> Option<&Tooltip> {
        self.tooltip.as_ref()
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn projection(&self) -> GlobeProjection {
        GlobeProjection::new(&self.camera, self.width, self.height)
    }

    /// Apply a camera action directly (keyboard bindings).
    pub fn apply(&mut self, action: CameraAction) -> RedrawTrigger {
        self.camera = self.camera.reduce(action);
        RedrawTrigger::Camera
    }

    /// Country under a screen point, if the point is on the globe.
    pub fn hit_test<'c>(
        &self,
        countries: &'c CountryCatalog,
        at: ScreenPoint,
    ) -> Option<&'c CountryFeature> {
        let point = self.projection().invert(at)?;
        countries.feature_at(point)
    }

    pub fn handle(&mut self, event: PointerEvent, ctx: HitContext<'_>) -> Option<RedrawTrigger> {
        match event {
            PointerEvent::DragStart(at) => {
                self.drag = Some(Drag { last: at, moved: false });
                self.tooltip = None;
                None
            }
            PointerEvent::DragMove(at) => {
                let drag = self.drag.as_mut()?;
                let (dx, dy) = (at.0 - drag.last.0, at.1 - drag.last.1);
                if dx == 0.0 && dy == 0.0 {
                    return None;
                }
                drag.last = at;
                drag.moved = true;
                Some(self.apply(CameraAction::Drag { dx, dy }))
            }
            PointerEvent::DragEnd(at) => match self.drag.take() {
                Some(Drag { moved: false, .. }) => self.select(at, ctx),
                _ => None,
            },
            PointerEvent::Click(at) => self.select(at, ctx),
            PointerEvent::Wheel(notches) => {
                if notches == 0 {
                    return None;
                }
                let notches = notches.clamp(-MAX_WHEEL_NOTCHES, MAX_WHEEL_NOTCHES);
                Some(self.apply(CameraAction::Zoom(WHEEL_ZOOM_STEP.powi(notches))))
            }
            PointerEvent::Move(at) => {
                self.tooltip = self.hit_test(ctx.countries, at).map(|feature| Tooltip {
                    text: feature.name().to_string(),
                    at,
                });
                Some(RedrawTrigger::Hover)
            }
            PointerEvent::Leave => {
                self.drag = None;
                self.tooltip.take().map(|_| RedrawTrigger::Hover)
            }
            PointerEvent::Resize { width, height } => {
                self.width = width;
                self.height = height;
                self.tooltip = None;
                Some(RedrawTrigger::Resize)
            }
        }
    }

    fn select(&mut self, at: ScreenPoint, ctx: HitContext<'_>) -> Option<RedrawTrigger> {
        let feature = self.hit_test(ctx.countries, at)?;
        let name = ctx.aliases.trade_name(feature.name());
        debug!(geo = feature.name(), selected = name, "country selected");
        (self.on_select)(name);
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::sample_catalog;
    use std::cell::RefCell;
    use std::rc::Rc;

    const W: f64 = 240.0;
    const H: f64 = 160.0;

    fn router() -> (InteractionRouter, Rc<RefCell<Vec<String>>>) {
        let selected = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&selected);
        let router = InteractionRouter::new(CameraState::default(), W, H, move |name: &str| {
            sink.borrow_mut().push(name.to_string())
        });
        (router, selected)
    }

    fn screen_of(router: &InteractionRouter, catalog: &CountryCatalog, name: &str) -> ScreenPoint {
        let feature = catalog.find_by_name(name).unwrap();
        router.projection().project(feature.centroid()).unwrap()
    }

    #[test]
    fn test_click_selects_country_once() {
        let catalog = sample_catalog();
        let aliases = AliasTable::default();
        let ctx = HitContext { countries: &catalog, aliases: &aliases };
        let (mut router, selected) = router();

        let france = screen_of(&router, &catalog, "France");
        assert_eq!(router.handle(PointerEvent::Click(france), ctx), None);
        assert_eq!(*selected.borrow(), vec!["France".to_string()]);
    }

    #[test]
    fn test_click_reports_trade_name() {
        let catalog = sample_catalog();
        let aliases = AliasTable::default();
        let ctx = HitContext { countries: &catalog, aliases: &aliases };
        let (mut router, selected) = router();

        let usa = screen_of(&router, &catalog, "United States of America");
        router.handle(PointerEvent::DragStart(usa), ctx);
        router.handle(PointerEvent::DragEnd(usa), ctx);
        assert_eq!(*selected.borrow(), vec!["USA".to_string()]);
    }

    #[test]
    fn test_click_off_globe_or_on_ocean_is_no_hit() {
        let catalog = sample_catalog();
        let aliases = AliasTable::default();
        let ctx = HitContext { countries: &catalog, aliases: &aliases };
        let (mut router, selected) = router();

        router.handle(PointerEvent::Click((1.0, 1.0)), ctx);
        let atlantic = router.projection().project((-30.0, 45.0)).unwrap();
        router.handle(PointerEvent::Click(atlantic), ctx);
        assert!(selected.borrow().is_empty());
    }

    #[test]
    fn test_drag_rotates_without_selecting() {
        let catalog = sample_catalog();
        let aliases = AliasTable::default();
        let ctx = HitContext { countries: &catalog, aliases: &aliases };
        let (mut router, selected) = router();
        let start = router.camera().rotation;

        let france = screen_of(&router, &catalog, "France");
        router.handle(PointerEvent::DragStart(france), ctx);
        assert!(router.is_dragging());
        let trigger = router.handle(PointerEvent::DragMove((france.0 + 10.0, france.1)), ctx);
        assert_eq!(trigger, Some(RedrawTrigger::Camera));
        assert!((router.camera().rotation.lambda - start.lambda - 2.0).abs() < 1e-9);
        router.handle(PointerEvent::DragEnd((france.0 + 10.0, france.1)), ctx);

        assert!(!router.is_dragging());
        assert!(selected.borrow().is_empty());
    }

    #[test]
    fn test_move_without_drag_ignored() {
        let catalog = sample_catalog();
        let aliases = AliasTable::default();
        let ctx = HitContext { countries: &catalog, aliases: &aliases };
        let (mut router, _) = router();
        assert_eq!(router.handle(PointerEvent::DragMove((5.0, 5.0)), ctx), None);
        assert_eq!(*router.camera(), CameraState::default());
    }

    #[test]
    fn test_hover_shows_and_hides_tooltip() {
        let catalog = sample_catalog();
        let aliases = AliasTable::default();
        let ctx = HitContext { countries: &catalog, aliases: &aliases };
        let (mut router, _) = router();

        let france = screen_of(&router, &catalog, "France");
        assert_eq!(router.handle(PointerEvent::Move(france), ctx), Some(RedrawTrigger::Hover));
        assert_eq!(router.tooltip().map(|t| t.text.as_str()), Some("France"));
        assert_eq!(router.tooltip().map(|t| t.at), Some(france));

        router.handle(PointerEvent::Move((0.0, 0.0)), ctx);
        assert!(router.tooltip().is_none());

        router.handle(PointerEvent::Move(france), ctx);
        assert_eq!(router.handle(PointerEvent::Leave, ctx), Some(RedrawTrigger::Hover));
        assert!(router.tooltip().is_none());
        assert_eq!(router.handle(PointerEvent::Leave, ctx), None);
    }

    #[test]
    fn test_wheel_zoom_clamped() {
        let catalog = sample_catalog();
        let aliases = AliasTable::default();
        let ctx = HitContext { countries: &catalog, aliases: &aliases };
        let (mut router, _) = router();

        for _ in 0..40 {
            router.handle(PointerEvent::Wheel(1), ctx);
        }
        assert_eq!(router.camera().zoom, 9.0);
        router.handle(PointerEvent::Wheel(-100), ctx);
        assert_eq!(router.camera().zoom, 1.0);
        assert_eq!(router.handle(PointerEvent::Wheel(0), ctx), None);
    }

    #[test]
    fn test_huge_wheel_delta_still_clamps() {
        let catalog = sample_catalog();
        let aliases = AliasTable::default();
        let ctx = HitContext { countries: &catalog, aliases: &aliases };
        let (mut router, _) = router();

        router.handle(PointerEvent::Wheel(4000), ctx);
        assert_eq!(router.camera().zoom, 9.0);
        router.handle(PointerEvent::Wheel(i32::MIN), ctx);
        assert_eq!(router.camera().zoom, 1.0);
    }

    #[test]
    fn test_resize_changes_projection() {
        let catalog = sample_catalog();
        let aliases = AliasTable::default();
        let ctx = HitContext { countries: &catalog, aliases: &aliases };
        let (mut router, _) = router();

        let before = router.projection().radius;
        let trigger = router.handle(PointerEvent::Resize { width: 2.0 * W, height: 2.0 * H }, ctx);
        assert_eq!(trigger, Some(RedrawTrigger::Resize));
        assert_eq!(router.size(), (2.0 * W, 2.0 * H));
        assert!((router.projection().radius - 2.0 * before).abs() < 1e-9);
    }

    #[test]
    fn test_reset_restores_home() {
        let (mut router, _) = router();
        router.apply(CameraAction::Zoom(3.0));
        router.apply(CameraAction::Reset);
        assert_eq!(*router.camera(), CameraState::default());
    }
}
