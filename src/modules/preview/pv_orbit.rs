use eframe::egui;
use glam::Vec3;
use std::f32::consts::{FRAC_PI_2, TAU};
use super::pv_scene::PerspectiveCamera;

const PITCH_LIMIT: f32 = FRAC_PI_2 - 0.01;
const MIN_DISTANCE: f32 = 0.5;
const MAX_DISTANCE: f32 = 100.0;
const ZOOM_SPEED: f32 = 0.002;

/// Orbit camera around a target: primary drag rotates, scroll zooms,
/// secondary drag pans. Input is accumulated between frames and applied in
/// `update`.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitControls {
    pub target: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
    pending_rotate: egui::Vec2,
    pending_pan: egui::Vec2,
    pending_zoom: f32,
    viewport_height: f32,
}

impl OrbitControls {
    pub fn from_camera(camera: &PerspectiveCamera) -> Self {
        let offset: Vec3 = camera.position - camera.target;
        let distance: f32 = offset.length().max(MIN_DISTANCE);
        Self {
            target: camera.target,
            yaw: offset.x.atan2(offset.z),
            pitch: (offset.y / distance).clamp(-1.0, 1.0).asin(),
            distance,
            pending_rotate: egui::Vec2::ZERO,
            pending_pan: egui::Vec2::ZERO,
            pending_zoom: 0.0,
            viewport_height: 1.0,
        }
    }

    pub fn handle_input(&mut self, ui: &egui::Ui, response: &egui::Response) {
        self.viewport_height = response.rect.height().max(1.0);
        if response.dragged_by(egui::PointerButton::Primary) { self.rotate(response.drag_delta()); }
        if response.dragged_by(egui::PointerButton::Secondary) { self.pan(response.drag_delta()); }
        if response.hovered() {
            let scroll: f32 = ui.input(|i| i.smooth_scroll_delta.y);
            if scroll != 0.0 { self.zoom(scroll); }
        }
    }

    pub fn rotate(&mut self, delta: egui::Vec2) { self.pending_rotate += delta; }
    pub fn pan(&mut self, delta: egui::Vec2) { self.pending_pan += delta; }
    /// Positive values (scrolling up) move the camera closer.
    pub fn zoom(&mut self, scroll: f32) { self.pending_zoom += scroll; }

    /// Applies pending input and writes the resulting pose into `camera`.
    pub fn update(&mut self, camera: &mut PerspectiveCamera) {
        let per_point: f32 = TAU / self.viewport_height;
        self.yaw -= self.pending_rotate.x * per_point;
        self.pitch = (self.pitch + self.pending_rotate.y * per_point).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.distance = (self.distance * (-self.pending_zoom * ZOOM_SPEED).exp()).clamp(MIN_DISTANCE, MAX_DISTANCE);

        if self.pending_pan != egui::Vec2::ZERO {
            let forward: Vec3 = -self.offset().normalize();
            let right: Vec3 = forward.cross(camera.up).normalize_or_zero();
            let up: Vec3 = right.cross(forward);
            let world_per_point: f32 = 2.0 * self.distance * (camera.fov_y / 2.0).tan() / self.viewport_height;
            self.target += (-right * self.pending_pan.x + up * self.pending_pan.y) * world_per_point;
        }

        self.pending_rotate = egui::Vec2::ZERO;
        self.pending_pan = egui::Vec2::ZERO;
        self.pending_zoom = 0.0;

        camera.target = self.target;
        camera.position = self.target + self.offset();
    }

    fn offset(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        Vec3::new(sy * cp, sp, cy * cp) * self.distance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::preview::pv_scene::{PreviewScene, PreviewSettings};

    fn camera() -> PerspectiveCamera { PreviewScene::new(&PreviewSettings::default(), 0.75).camera }

    #[test]
    fn idle_update_keeps_pose() {
        let mut cam: PerspectiveCamera = camera();
        let mut controls: OrbitControls = OrbitControls::from_camera(&cam);
        controls.update(&mut cam);
        assert!((cam.position - Vec3::new(0.0, 0.0, 7.0)).length() < 1e-5);
    }

    #[test]
    fn pitch_never_reaches_the_pole() {
        let mut cam: PerspectiveCamera = camera();
        let mut controls: OrbitControls = OrbitControls::from_camera(&cam);
        controls.rotate(egui::vec2(0.0, 10_000.0));
        controls.update(&mut cam);
        assert!(controls.pitch <= PITCH_LIMIT);
        assert!(cam.position.z.abs() > 0.0);
    }

    #[test]
    fn zoom_is_clamped() {
        let mut cam: PerspectiveCamera = camera();
        let mut controls: OrbitControls = OrbitControls::from_camera(&cam);
        controls.zoom(1e6);
        controls.update(&mut cam);
        assert_eq!(controls.distance, MIN_DISTANCE);
        controls.zoom(-1e6);
        controls.update(&mut cam);
        assert_eq!(controls.distance, MAX_DISTANCE);
    }

    #[test]
    fn pan_moves_target_sideways() {
        let mut cam: PerspectiveCamera = camera();
        let mut controls: OrbitControls = OrbitControls::from_camera(&cam);
        controls.pan(egui::vec2(-10.0, 0.0));
        controls.update(&mut cam);
        assert!(cam.target.x > 0.0);
        assert!(cam.target.y.abs() < 1e-5);
        assert!((cam.position - cam.target - Vec3::new(0.0, 0.0, 7.0)).length() < 1e-4);
    }
}
