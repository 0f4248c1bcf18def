use eframe::egui;
use image::Rgba;
use crate::modules::helpers::texture_sync::SurfaceTexture;
use super::pc_brush::{ToolKind, ToolSettings};
use super::pc_pointer::{GesturePhase, HostEvent, PointerTracker};
use super::pc_sizer::{ChromeAllowance, SurfaceSizer};
use super::pc_stroke::StrokeEngine;
use super::pc_surface::DrawingSurface;

/// The painting document: surface, current tool settings and the gesture in
/// progress. Every method that can change pixels returns whether it did, so
/// the owner can invalidate textures that mirror the surface.
pub struct PaintCanvas {
    pub(super) surface: DrawingSurface,
    pub(super) sizer: SurfaceSizer,
    pub(super) tracker: PointerTracker,
    pub(super) engine: StrokeEngine,
    pub settings: ToolSettings,
    pub(super) texture: SurfaceTexture,
    pub(super) bounds: egui::Rect,
    pub(super) pixels_per_point: f32,
}

impl PaintCanvas {
    pub fn new(background: Rgba<u8>, chrome: ChromeAllowance, settings: ToolSettings) -> Self {
        Self {
            surface: DrawingSurface::new(0, 0, background),
            sizer: SurfaceSizer::new(chrome),
            tracker: PointerTracker::new(),
            engine: StrokeEngine::new(),
            settings,
            texture: SurfaceTexture::new("paint_canvas_surface"),
            bounds: egui::Rect::NOTHING,
            pixels_per_point: 1.0,
        }
    }

    pub fn surface(&self) -> &DrawingSurface { &self.surface }
    #[cfg(test)]
    pub fn is_drawing(&self) -> bool { self.engine.is_active() }

    /// Layout notification: size the surface to `container` minus chrome,
    /// in physical pixels. Pointer offsets are scaled by the same factor.
    pub fn fit_to_container(&mut self, container: egui::Vec2, pixels_per_point: f32) -> bool {
        self.pixels_per_point = pixels_per_point;
        let changed: bool = self.sizer.fit(&mut self.surface, container, pixels_per_point);
        if changed { self.texture.mark_dirty(); }
        changed
    }

    /// Screen rectangle the surface currently occupies; pointer positions are
    /// taken relative to its top-left corner.
    pub fn set_bounds(&mut self, bounds: egui::Rect) { self.bounds = bounds; }

    pub fn handle_event(&mut self, event: &HostEvent) -> bool {
        let Some(pos) = self.tracker.locate(event, self.bounds, self.pixels_per_point) else { return false };
        let changed: bool = match event.phase() {
            GesturePhase::Start => {
                self.engine.begin(&self.surface, &self.settings, pos);
                false
            }
            GesturePhase::Move => self.engine.move_to(&mut self.surface, &self.settings, pos),
            GesturePhase::End => self.engine.end(&mut self.surface, &self.settings, pos),
        };
        if changed { self.texture.mark_dirty(); }
        changed
    }

    pub fn handle_events(&mut self, events: &[HostEvent]) -> bool {
        events.iter().fold(false, |acc, e| self.handle_event(e) | acc)
    }

    /// Resets every pixel to the background. A gesture in progress is
    /// abandoned so its snapshot cannot repaint the old content.
    pub fn clear(&mut self) {
        self.engine.cancel();
        self.surface.clear();
        self.texture.mark_dirty();
        tracing::info!(width = self.surface.width(), height = self.surface.height(), "surface cleared");
    }

    pub fn select_tool(&mut self, tool: ToolKind) {
        if self.settings.tool != tool {
            tracing::debug!(from = ?self.settings.tool, to = ?tool, "tool changed");
            self.settings.tool = tool;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

    fn canvas(tool: ToolKind) -> PaintCanvas {
        let settings: ToolSettings = ToolSettings { tool, color: [0, 0, 255], size: 2.0, opacity: 1.0 };
        let mut c: PaintCanvas = PaintCanvas::new(WHITE, ChromeAllowance { horizontal: 20.0, vertical: 60.0 }, settings);
        c.fit_to_container(egui::vec2(120.0, 160.0), 1.0);
        c.set_bounds(egui::Rect::from_min_size(egui::pos2(10.0, 70.0), egui::vec2(100.0, 100.0)));
        c
    }

    fn screen(x: f32, y: f32) -> egui::Pos2 { egui::pos2(x + 10.0, y + 70.0) }

    #[test]
    fn rectangle_gesture_uses_surface_coordinates() {
        let mut c: PaintCanvas = canvas(ToolKind::Rectangle);
        assert_eq!(c.surface().size(), (100, 100));
        c.handle_event(&HostEvent::PointerDown(screen(20.0, 20.0)));
        c.handle_event(&HostEvent::PointerMove(screen(70.0, 90.0)));
        c.handle_event(&HostEvent::PointerMove(screen(35.0, 35.0)));
        assert!(c.handle_event(&HostEvent::PointerUp(screen(50.0, 40.0))));

        let blue: Option<Rgba<u8>> = Some(Rgba([0, 0, 255, 255]));
        assert_eq!(c.surface().pixel(20, 20), blue);
        assert_eq!(c.surface().pixel(49, 39), blue);
        assert_eq!(c.surface().pixel(69, 60), Some(WHITE));
        assert_eq!(c.surface().pixel(34, 30), Some(WHITE));
    }

    #[test]
    fn touch_gesture_draws_freehand() {
        let mut c: PaintCanvas = canvas(ToolKind::Free);
        c.handle_event(&HostEvent::TouchStart(vec![screen(10.0, 50.0)]));
        assert!(c.handle_event(&HostEvent::TouchMove(vec![screen(90.0, 50.0)])));
        assert!(!c.handle_event(&HostEvent::TouchEnd(Vec::new())));
        assert!(!c.is_drawing());
        assert_eq!(c.surface().pixel(50, 49), Some(Rgba([0, 0, 255, 255])));
    }

    #[test]
    fn leave_commits_shape_at_exit_point() {
        let mut c: PaintCanvas = canvas(ToolKind::Line);
        c.handle_event(&HostEvent::PointerDown(screen(10.0, 10.0)));
        c.handle_event(&HostEvent::PointerLeave(screen(10.0, 95.0)));
        assert!(!c.is_drawing());
        assert_eq!(c.surface().pixel(10, 50), Some(Rgba([0, 0, 255, 255])));
    }

    #[test]
    fn clear_resets_pixels_and_texture() {
        let mut c: PaintCanvas = canvas(ToolKind::Free);
        c.handle_events(&[
            HostEvent::PointerDown(screen(5.0, 5.0)),
            HostEvent::PointerMove(screen(80.0, 80.0)),
            HostEvent::PointerUp(screen(80.0, 80.0)),
        ]);
        let ctx: egui::Context = egui::Context::default();
        c.texture.sync(&ctx, c.surface.pixels());
        assert!(!c.texture.is_dirty());

        c.clear();
        assert!(c.surface().pixels().pixels().all(|p| *p == WHITE));
        assert!(c.texture.is_dirty());
    }

    #[test]
    fn high_dpi_gesture_lands_on_physical_pixels() {
        let settings: ToolSettings = ToolSettings { tool: ToolKind::Line, color: [0, 0, 255], size: 2.0, opacity: 1.0 };
        let mut c: PaintCanvas = PaintCanvas::new(WHITE, ChromeAllowance { horizontal: 20.0, vertical: 60.0 }, settings);
        assert!(c.fit_to_container(egui::vec2(120.0, 160.0), 2.0));
        assert_eq!(c.surface().size(), (200, 200));
        c.set_bounds(egui::Rect::from_min_size(egui::pos2(10.0, 70.0), egui::vec2(100.0, 100.0)));

        c.handle_event(&HostEvent::PointerDown(screen(10.0, 50.0)));
        assert!(c.handle_event(&HostEvent::PointerUp(screen(90.0, 50.0))));
        assert_eq!(c.surface().pixel(100, 99), Some(Rgba([0, 0, 255, 255])));
        assert_eq!(c.surface().pixel(100, 49), Some(WHITE));
    }
}
