use eframe::egui;
use super::pc_brush::{resolve_brush, Brush, ToolKind, ToolSettings};
use super::pc_raster::{stroke_shape, Shape};
use super::pc_surface::{DrawingSurface, Snapshot};

/// Per-gesture state. The snapshot is taken once at gesture start and is the
/// only thing shape previews are ever drawn over.
pub enum StrokeSession {
    Idle,
    Freehand { tool: ToolKind, last_point: egui::Pos2 },
    ShapePreview { tool: ToolKind, start_point: egui::Pos2, snapshot: Snapshot },
}

impl StrokeSession {
    pub fn is_active(&self) -> bool { !matches!(self, StrokeSession::Idle) }
}

pub struct StrokeEngine { session: StrokeSession }

impl Default for StrokeEngine {
    fn default() -> Self { Self::new() }
}

impl StrokeEngine {
    pub fn new() -> Self { Self { session: StrokeSession::Idle } }

    #[cfg(test)]
    pub fn session(&self) -> &StrokeSession { &self.session }
    pub fn is_active(&self) -> bool { self.session.is_active() }

    /// Starts a gesture. A gesture already in progress is replaced; whatever
    /// it last drew stays on the surface.
    pub fn begin(&mut self, surface: &DrawingSurface, settings: &ToolSettings, at: egui::Pos2) {
        self.session = if settings.tool.is_freehand() {
            StrokeSession::Freehand { tool: settings.tool, last_point: at }
        } else {
            StrokeSession::ShapePreview { tool: settings.tool, start_point: at, snapshot: surface.snapshot() }
        };
        tracing::trace!(tool = ?settings.tool, x = at.x, y = at.y, "gesture started");
    }

    /// Returns whether the surface changed.
    pub fn move_to(&mut self, surface: &mut DrawingSurface, settings: &ToolSettings, at: egui::Pos2) -> bool {
        match &mut self.session {
            StrokeSession::Idle => false,
            StrokeSession::Freehand { tool, last_point } => {
                let brush: Brush = resolve_brush(&ToolSettings { tool: *tool, ..*settings }, surface.background());
                let segment: Shape = Shape::Segment { from: *last_point, to: at };
                *last_point = at;
                stroke_shape(surface, &segment, &brush)
            }
            StrokeSession::ShapePreview { tool, start_point, snapshot } => {
                surface.restore(snapshot);
                let brush: Brush = resolve_brush(&ToolSettings { tool: *tool, ..*settings }, surface.background());
                stroke_shape(surface, &candidate_shape(*tool, *start_point, at), &brush);
                true
            }
        }
    }

    /// Ends the gesture. Shapes get one last preview at `at`, which becomes
    /// permanent once the snapshot is dropped.
    pub fn end(&mut self, surface: &mut DrawingSurface, settings: &ToolSettings, at: egui::Pos2) -> bool {
        let changed: bool = if matches!(self.session, StrokeSession::ShapePreview { .. }) {
            self.move_to(surface, settings, at)
        } else {
            false
        };
        if self.session.is_active() { tracing::trace!(x = at.x, y = at.y, "gesture ended"); }
        self.session = StrokeSession::Idle;
        changed
    }

    /// Drops the gesture without a final draw. Used when the surface is
    /// cleared mid-gesture so a stale snapshot cannot bring old pixels back.
    pub fn cancel(&mut self) { self.session = StrokeSession::Idle; }
}

fn candidate_shape(tool: ToolKind, start: egui::Pos2, current: egui::Pos2) -> Shape {
    match tool {
        ToolKind::Rectangle => Shape::Rect { corner_a: start, corner_b: current },
        ToolKind::Circle => Shape::circle_through(start, current),
        _ => Shape::Segment { from: start, to: current },
    }
}
