use image::Rgba;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToolKind { Free, Eraser, Line, Rectangle, Circle }

impl ToolKind {
    pub const ALL: [ToolKind; 5] = [ToolKind::Free, ToolKind::Eraser, ToolKind::Line, ToolKind::Rectangle, ToolKind::Circle];

    pub fn is_freehand(self) -> bool { matches!(self, ToolKind::Free | ToolKind::Eraser) }

    pub fn label(self) -> &'static str {
        match self {
            ToolKind::Free => "Free Draw",
            ToolKind::Eraser => "Eraser",
            ToolKind::Line => "Line",
            ToolKind::Rectangle => "Rectangle",
            ToolKind::Circle => "Circle",
        }
    }

    pub fn shortcut(self) -> &'static str {
        match self {
            ToolKind::Free => "F",
            ToolKind::Eraser => "E",
            ToolKind::Line => "L",
            ToolKind::Rectangle => "R",
            ToolKind::Circle => "C",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolSettings {
    pub tool: ToolKind,
    pub color: [u8; 3],
    pub size: f32,
    pub opacity: f32,
}

impl Default for ToolSettings {
    fn default() -> Self { Self { tool: ToolKind::Free, color: [0, 0, 0], size: 5.0, opacity: 1.0 } }
}

/// Effective stroke parameters for one pointer event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Brush { pub size: f32, pub color: Rgba<u8> }

/// The eraser paints opaque background; every other tool uses the chosen color
/// with alpha taken from the opacity setting.
pub fn resolve_brush(settings: &ToolSettings, background: Rgba<u8>) -> Brush {
    let size: f32 = settings.size.max(0.0);
    if settings.tool == ToolKind::Eraser {
        let [r, g, b, _] = background.0;
        return Brush { size, color: Rgba([r, g, b, 255]) };
    }
    let [r, g, b] = settings.color;
    let alpha: u8 = (settings.opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
    Brush { size, color: Rgba([r, g, b, alpha]) }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BG: Rgba<u8> = Rgba([250, 240, 230, 255]);

    #[test]
    fn opacity_becomes_alpha() {
        let s: ToolSettings = ToolSettings { tool: ToolKind::Line, color: [12, 34, 56], size: 8.0, opacity: 0.5 };
        assert_eq!(resolve_brush(&s, BG), Brush { size: 8.0, color: Rgba([12, 34, 56, 128]) });
    }

    #[test]
    fn eraser_ignores_color_and_opacity() {
        for opacity in [0.0, 0.3, 1.0] {
            for color in [[0, 0, 0], [255, 0, 128]] {
                let s: ToolSettings = ToolSettings { tool: ToolKind::Eraser, color, size: 20.0, opacity };
                assert_eq!(resolve_brush(&s, BG).color, Rgba([250, 240, 230, 255]));
            }
        }
    }

    #[test]
    fn out_of_range_settings_are_clamped() {
        let s: ToolSettings = ToolSettings { tool: ToolKind::Free, color: [1, 2, 3], size: -4.0, opacity: 3.0 };
        let b: Brush = resolve_brush(&s, BG);
        assert_eq!(b.size, 0.0);
        assert_eq!(b.color.0[3], 255);
    }
}
