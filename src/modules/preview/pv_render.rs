use eframe::egui;
use glam::{Mat4, Vec3, Vec4};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use super::pv_scene::PreviewScene;

/// Cloneable stop switch for a running `RenderLoop`.
#[derive(Clone, Debug)]
pub struct RenderLoopHandle { running: Arc<AtomicBool> }

impl RenderLoopHandle {
    pub fn stop(&self) {
        if self.running.swap(false, Ordering::AcqRel) { tracing::info!("preview render loop stopped"); }
    }
    pub fn is_running(&self) -> bool { self.running.load(Ordering::Acquire) }
}

/// Per-frame callback that keeps itself scheduled by requesting a repaint
/// every time it runs, until its handle is stopped.
pub struct RenderLoop { handle: RenderLoopHandle, frames: u64 }

impl RenderLoop {
    pub fn start() -> Self {
        tracing::info!("preview render loop started");
        Self { handle: RenderLoopHandle { running: Arc::new(AtomicBool::new(true)) }, frames: 0 }
    }

    pub fn handle(&self) -> RenderLoopHandle { self.handle.clone() }
    #[cfg(test)]
    pub fn frames(&self) -> u64 { self.frames }

    /// True when this frame should be rendered. Schedules the next frame.
    pub fn tick(&mut self, ctx: &egui::Context) -> bool {
        if !self.handle.is_running() { return false; }
        self.frames += 1;
        tracing::trace!(frame = self.frames, "preview frame");
        ctx.request_repaint();
        true
    }
}

/// Projects a world point into `viewport`. None when the point is behind the
/// camera's near plane.
pub fn project(view_proj: &Mat4, point: Vec3, viewport: egui::Rect) -> Option<egui::Pos2> {
    let clip: Vec4 = *view_proj * point.extend(1.0);
    if clip.w <= f32::EPSILON || clip.z < 0.0 { return None; }
    let ndc_x: f32 = clip.x / clip.w;
    let ndc_y: f32 = clip.y / clip.w;
    Some(egui::pos2(
        viewport.min.x + (ndc_x + 1.0) * 0.5 * viewport.width(),
        viewport.min.y + (1.0 - ndc_y) * 0.5 * viewport.height(),
    ))
}

/// Screen-space mesh for the textured plane. Back faces and triangles
/// crossing the near plane are dropped.
pub fn build_plane_mesh(scene: &PreviewScene, texture: egui::TextureId, viewport: egui::Rect) -> egui::Mesh {
    let view_proj: Mat4 = scene.camera.view_projection();
    let tint: egui::Color32 = scene.light.tint();
    let projected: Vec<(Option<egui::Pos2>, egui::Pos2)> = scene.plane.vertices().into_iter()
        .map(|(world, uv)| (project(&view_proj, world, viewport), uv))
        .collect();

    let mut mesh: egui::Mesh = egui::Mesh::with_texture(texture);
    let mut remap: Vec<Option<u32>> = vec![None; projected.len()];

    for tri in scene.plane.triangles() {
        let corners: Option<[egui::Pos2; 3]> = match (projected[tri[0] as usize].0, projected[tri[1] as usize].0, projected[tri[2] as usize].0) {
            (Some(a), Some(b), Some(c)) => Some([a, b, c]),
            _ => None,
        };
        let Some([a, b, c]) = corners else { continue };
        if !is_front_facing(a, b, c) { continue; }

        for idx in tri {
            let slot: &mut Option<u32> = &mut remap[idx as usize];
            let mapped: u32 = match *slot {
                Some(m) => m,
                None => {
                    let (pos, uv) = projected[idx as usize];
                    let m: u32 = mesh.vertices.len() as u32;
                    mesh.vertices.push(egui::epaint::Vertex { pos: pos.unwrap_or_default(), uv, color: tint });
                    *slot = Some(m);
                    m
                }
            };
            mesh.indices.push(mapped);
        }
    }
    mesh
}

/// Counter-clockwise in world space reads clockwise once y points down.
fn is_front_facing(a: egui::Pos2, b: egui::Pos2, c: egui::Pos2) -> bool {
    let ab: egui::Vec2 = b - a;
    let ac: egui::Vec2 = c - a;
    ab.x * ac.y - ab.y * ac.x < 0.0
}
