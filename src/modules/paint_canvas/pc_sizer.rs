use eframe::egui;
use serde::{Deserialize, Serialize};
use super::pc_surface::DrawingSurface;

/// Space inside the container that belongs to the control bar and padding
/// rather than to the surface.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct ChromeAllowance { pub horizontal: f32, pub vertical: f32 }

impl Default for ChromeAllowance {
    fn default() -> Self { Self { horizontal: 20.0, vertical: 60.0 } }
}

pub struct SurfaceSizer { pub chrome: ChromeAllowance }

impl SurfaceSizer {
    pub fn new(chrome: ChromeAllowance) -> Self { Self { chrome } }

    /// Physical pixel size for a container of `container` points; saturates
    /// at zero. Chrome is measured in points.
    pub fn target_size(&self, container: egui::Vec2, pixels_per_point: f32) -> (u32, u32) {
        let w: f32 = (container.x - self.chrome.horizontal).max(0.0) * pixels_per_point;
        let h: f32 = (container.y - self.chrome.vertical).max(0.0) * pixels_per_point;
        (w.floor() as u32, h.floor() as u32)
    }

    /// Returns true when the surface actually changed size.
    pub fn fit(&self, surface: &mut DrawingSurface, container: egui::Vec2, pixels_per_point: f32) -> bool {
        let (w, h) = self.target_size(container, pixels_per_point);
        if surface.size() == (w, h) { return false; }
        let (old_w, old_h) = surface.size();
        surface.resize(w, h);
        tracing::debug!(old_w, old_h, width = w, height = h, "surface resized");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn subtracts_chrome() {
        let sizer: SurfaceSizer = SurfaceSizer::new(ChromeAllowance::default());
        assert_eq!(sizer.target_size(egui::vec2(820.0, 660.0), 1.0), (800, 600));
    }

    #[test]
    fn high_dpi_sizes_in_physical_pixels() {
        let sizer: SurfaceSizer = SurfaceSizer::new(ChromeAllowance::default());
        assert_eq!(sizer.target_size(egui::vec2(820.0, 660.0), 2.0), (1600, 1200));
        assert_eq!(sizer.target_size(egui::vec2(120.5, 160.0), 1.5), (150, 150));
    }

    #[test]
    fn tiny_container_saturates_to_zero() {
        let sizer: SurfaceSizer = SurfaceSizer::new(ChromeAllowance::default());
        assert_eq!(sizer.target_size(egui::vec2(5.0, 30.0), 2.0), (0, 0));
    }

    #[test]
    fn fit_reports_only_real_changes() {
        let sizer: SurfaceSizer = SurfaceSizer::new(ChromeAllowance { horizontal: 0.0, vertical: 0.0 });
        let mut s: DrawingSurface = DrawingSurface::new(0, 0, Rgba([255, 255, 255, 255]));
        assert!(sizer.fit(&mut s, egui::vec2(40.0, 30.0), 1.0));
        assert_eq!(s.size(), (40, 30));
        assert!(!sizer.fit(&mut s, egui::vec2(40.4, 30.9), 1.0));
    }

    #[test]
    fn content_survives_layout_sequence() {
        let sizer: SurfaceSizer = SurfaceSizer::new(ChromeAllowance { horizontal: 0.0, vertical: 0.0 });
        let mut s: DrawingSurface = DrawingSurface::new(50, 50, Rgba([255, 255, 255, 255]));
        s.blend(10, 10, Rgba([0, 0, 255, 255]), 1.0);
        for size in [egui::vec2(30.0, 20.0), egui::vec2(100.0, 12.0), egui::vec2(11.0, 11.0)] {
            sizer.fit(&mut s, size, 1.0);
            assert_eq!(s.pixel(10, 10), Some(Rgba([0, 0, 255, 255])));
        }
    }
}
