use eframe::egui;
use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};
use crate::modules::helpers::texture_sync::SurfaceTexture;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct PreviewSettings {
    /// World-space width of the plane; height follows the surface aspect.
    pub plane_width: f32,
    pub plane_segments: u32,
    pub camera_distance: f32,
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub ambient_color: [u8; 3],
    pub ambient_intensity: f32,
}

impl Default for PreviewSettings {
    fn default() -> Self {
        Self {
            plane_width: 5.0,
            plane_segments: 16,
            camera_distance: 7.0,
            fov_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            ambient_color: [255, 255, 255],
            ambient_intensity: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerspectiveCamera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl PerspectiveCamera {
    pub fn view_projection(&self) -> Mat4 {
        let proj: Mat4 = Mat4::perspective_rh(self.fov_y, self.aspect.max(f32::EPSILON), self.near, self.far);
        proj * Mat4::look_at_rh(self.position, self.target, self.up)
    }

    pub fn set_viewport(&mut self, viewport: egui::Rect) {
        if viewport.height() > 0.0 { self.aspect = viewport.width() / viewport.height(); }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLight { pub color: [u8; 3], pub intensity: f32 }

impl AmbientLight {
    /// Vertex tint for an unlit textured material under this light.
    pub fn tint(&self) -> egui::Color32 {
        let scale = |c: u8| -> u8 { (c as f32 * self.intensity).clamp(0.0, 255.0).round() as u8 };
        let [r, g, b] = self.color;
        egui::Color32::from_rgb(scale(r), scale(g), scale(b))
    }
}

/// Flat plane centred on the origin in the XY plane, facing +Z.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneMesh { pub width: f32, pub height: f32, pub segments: u32 }

impl PlaneMesh {
    /// Grid vertices row by row from the top-left, as (world position, uv).
    pub fn vertices(&self) -> Vec<(Vec3, egui::Pos2)> {
        let n: u32 = self.segments.max(1);
        let mut out: Vec<(Vec3, egui::Pos2)> = Vec::with_capacity(((n + 1) * (n + 1)) as usize);
        for j in 0..=n {
            let v: f32 = j as f32 / n as f32;
            for i in 0..=n {
                let u: f32 = i as f32 / n as f32;
                let pos: Vec3 = Vec3::new((u - 0.5) * self.width, (0.5 - v) * self.height, 0.0);
                out.push((pos, egui::pos2(u, v)));
            }
        }
        out
    }

    /// Two counter-clockwise (seen from +Z) triangles per grid cell.
    pub fn triangles(&self) -> Vec<[u32; 3]> {
        let n: u32 = self.segments.max(1);
        let row: u32 = n + 1;
        let mut out: Vec<[u32; 3]> = Vec::with_capacity((n * n * 2) as usize);
        for j in 0..n {
            for i in 0..n {
                let a: u32 = j * row + i;
                let b: u32 = a + 1;
                let d: u32 = a + row;
                let c: u32 = d + 1;
                out.push([a, d, b]);
                out.push([b, d, c]);
            }
        }
        out
    }
}

/// Everything the preview draws. The texture is owned here and only ever
/// invalidated, never rebuilt.
pub struct PreviewScene {
    pub camera: PerspectiveCamera,
    pub light: AmbientLight,
    pub plane: PlaneMesh,
    pub texture: SurfaceTexture,
}

impl PreviewScene {
    pub fn new(settings: &PreviewSettings, surface_aspect: f32) -> Self {
        Self {
            camera: PerspectiveCamera {
                position: Vec3::new(0.0, 0.0, settings.camera_distance),
                target: Vec3::ZERO,
                up: Vec3::Y,
                fov_y: settings.fov_degrees.to_radians(),
                aspect: 1.0,
                near: settings.near,
                far: settings.far,
            },
            light: AmbientLight { color: settings.ambient_color, intensity: settings.ambient_intensity },
            plane: PlaneMesh {
                width: settings.plane_width,
                height: settings.plane_width * surface_aspect,
                segments: settings.plane_segments,
            },
            texture: SurfaceTexture::new("preview_plane_texture"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plane_follows_surface_aspect() {
        let scene: PreviewScene = PreviewScene::new(&PreviewSettings::default(), 600.0 / 800.0);
        assert_eq!(scene.plane.width, 5.0);
        assert!((scene.plane.height - 3.75).abs() < 1e-6);
        assert_eq!(scene.camera.position, Vec3::new(0.0, 0.0, 7.0));
    }

    #[test]
    fn grid_covers_plane_corners() {
        let plane: PlaneMesh = PlaneMesh { width: 4.0, height: 2.0, segments: 2 };
        let verts: Vec<(Vec3, egui::Pos2)> = plane.vertices();
        assert_eq!(verts.len(), 9);
        assert_eq!(verts[0], (Vec3::new(-2.0, 1.0, 0.0), egui::pos2(0.0, 0.0)));
        assert_eq!(verts[8], (Vec3::new(2.0, -1.0, 0.0), egui::pos2(1.0, 1.0)));
        assert_eq!(plane.triangles().len(), 8);
    }

    #[test]
    fn full_white_light_leaves_texture_untinted() {
        let light: AmbientLight = AmbientLight { color: [255, 255, 255], intensity: 1.0 };
        assert_eq!(light.tint(), egui::Color32::WHITE);
        let dim: AmbientLight = AmbientLight { color: [255, 255, 255], intensity: 0.5 };
        assert_eq!(dim.tint(), egui::Color32::from_rgb(128, 128, 128));
    }
}
