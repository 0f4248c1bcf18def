use eframe::egui;
use super::pc_brush::Brush;
use super::pc_surface::DrawingSurface;

/// Outline shapes the stroke engine can draw, in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// Straight segment with round caps.
    Segment { from: egui::Pos2, to: egui::Pos2 },
    /// Axis-aligned box spanned by two opposite corners, mitered corners.
    Rect { corner_a: egui::Pos2, corner_b: egui::Pos2 },
    Circle { center: egui::Pos2, radius: f32 },
}

impl Shape {
    /// Shape for a drag from `start` to `current` with a shape tool.
    pub fn circle_through(start: egui::Pos2, current: egui::Pos2) -> Self {
        Shape::Circle { center: start, radius: start.distance(current) }
    }

    fn bounds(&self) -> egui::Rect {
        match *self {
            Shape::Segment { from, to } => egui::Rect::from_two_pos(from, to),
            Shape::Rect { corner_a, corner_b } => egui::Rect::from_two_pos(corner_a, corner_b),
            Shape::Circle { center, radius } => egui::Rect::from_center_size(center, egui::Vec2::splat(radius * 2.0)),
        }
    }

    /// Unsigned distance from `p` to the outline.
    fn distance(&self, p: egui::Pos2) -> f32 {
        match *self {
            Shape::Segment { from, to } => {
                let ab: egui::Vec2 = to - from;
                let len_sq: f32 = ab.length_sq();
                let t: f32 = if len_sq == 0.0 { 0.0 } else { ((p - from).dot(ab) / len_sq).clamp(0.0, 1.0) };
                p.distance(from + ab * t)
            }
            Shape::Rect { corner_a, corner_b } => {
                let r: egui::Rect = egui::Rect::from_two_pos(corner_a, corner_b);
                let c: egui::Pos2 = r.center();
                let qx: f32 = (p.x - c.x).abs() - r.width() / 2.0;
                let qy: f32 = (p.y - c.y).abs() - r.height() / 2.0;
                qx.max(qy).abs()
            }
            Shape::Circle { center, radius } => (p.distance(center) - radius).abs(),
        }
    }
}

/// Strokes `shape` onto the surface with `brush.size` as line width. Each
/// pixel is blended once with its coverage, so overlapping parts of one shape
/// never double up. Returns whether any pixel was touched.
pub fn stroke_shape(surface: &mut DrawingSurface, shape: &Shape, brush: &Brush) -> bool {
    if brush.size <= 0.0 || brush.color.0[3] == 0 || surface.is_empty() { return false; }
    let half: f32 = brush.size / 2.0;
    let area: egui::Rect = shape.bounds().expand(half + 1.0);

    let min_x: u32 = area.min.x.floor().max(0.0) as u32;
    let min_y: u32 = area.min.y.floor().max(0.0) as u32;
    let max_x: u32 = (area.max.x.ceil().max(0.0) as u32).min(surface.width());
    let max_y: u32 = (area.max.y.ceil().max(0.0) as u32).min(surface.height());

    let mut touched: bool = false;
    for py in min_y..max_y {
        for px in min_x..max_x {
            let center: egui::Pos2 = egui::pos2(px as f32 + 0.5, py as f32 + 0.5);
            let coverage: f32 = (half + 0.5 - shape.distance(center)).clamp(0.0, 1.0);
            if coverage > 0.0 {
                surface.blend(px, py, brush.color, coverage);
                touched = true;
            }
        }
    }
    touched
}
