use eframe::egui;
use crate::modules::paint_canvas::DrawingSurface;
use crate::style::ColorPalette;
use super::pv_orbit::OrbitControls;
use super::pv_render::{build_plane_mesh, RenderLoop, RenderLoopHandle};
use super::pv_scene::{PreviewScene, PreviewSettings};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewRequest {
    /// The scene was built by this call and the render loop started.
    Initialized,
    /// The scene already existed; its texture was marked for re-upload.
    Refreshed,
}

/// Owns the 3D preview: built lazily on the first request, then kept for the
/// lifetime of the bridge. Surface changes only ever invalidate its texture.
pub struct PreviewBridge {
    settings: PreviewSettings,
    scene: Option<PreviewScene>,
    controls: Option<OrbitControls>,
    render_loop: Option<RenderLoop>,
}

impl PreviewBridge {
    pub fn new(settings: PreviewSettings) -> Self {
        Self { settings, scene: None, controls: None, render_loop: None }
    }

    pub fn is_initialized(&self) -> bool { self.scene.is_some() }
    #[cfg(test)]
    pub fn scene(&self) -> Option<&PreviewScene> { self.scene.as_ref() }
    pub fn stop_handle(&self) -> Option<RenderLoopHandle> { self.render_loop.as_ref().map(RenderLoop::handle) }

    pub fn request_preview(&mut self, surface: &DrawingSurface) -> PreviewRequest {
        if let Some(scene) = self.scene.as_mut() {
            scene.texture.mark_dirty();
            tracing::debug!("preview texture refreshed");
            return PreviewRequest::Refreshed;
        }

        let scene: PreviewScene = PreviewScene::new(&self.settings, surface.aspect());
        tracing::info!(
            plane_width = scene.plane.width,
            plane_height = scene.plane.height,
            surface_width = surface.width(),
            surface_height = surface.height(),
            "preview scene built"
        );
        self.controls = Some(OrbitControls::from_camera(&scene.camera));
        self.scene = Some(scene);
        self.render_loop = Some(RenderLoop::start());
        PreviewRequest::Initialized
    }

    /// Invalidates the texture if the scene exists; a no-op before the first
    /// preview request.
    pub fn mark_dirty(&mut self) {
        if let Some(scene) = self.scene.as_mut() { scene.texture.mark_dirty(); }
    }

    #[cfg(test)]
    pub fn texture_dirty(&self) -> bool {
        self.scene.as_ref().is_some_and(|s| s.texture.is_dirty())
    }

    pub fn stop(&mut self) {
        if let Some(handle) = self.stop_handle() { handle.stop(); }
    }

    /// One render-loop frame: orbit input, camera aspect, texture upload,
    /// draw. Runs only while the loop has not been stopped.
    pub fn show(&mut self, ui: &mut egui::Ui, ctx: &egui::Context, surface: &DrawingSurface) {
        let (Some(scene), Some(controls), Some(render_loop)) = (self.scene.as_mut(), self.controls.as_mut(), self.render_loop.as_mut()) else {
            ui.centered_and_justified(|ui: &mut egui::Ui| { ui.label("Press \"Show 3D\" to build the preview."); });
            return;
        };

        if !render_loop.tick(ctx) {
            ui.centered_and_justified(|ui: &mut egui::Ui| { ui.label("Preview stopped."); });
            return;
        }

        let (rect, response) = ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());
        controls.handle_input(ui, &response);
        controls.update(&mut scene.camera);
        scene.camera.set_viewport(rect);
        scene.texture.sync(ctx, surface.pixels());

        let painter: egui::Painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0.0, ColorPalette::ZINC_900);
        if let Some(texture_id) = scene.texture.id() {
            painter.add(build_plane_mesh(scene, texture_id, rect));
        }
    }
}
