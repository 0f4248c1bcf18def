mod pv_main;
mod pv_orbit;
mod pv_render;
mod pv_scene;

pub use pv_main::{PreviewBridge, PreviewRequest};
pub use pv_scene::PreviewSettings;
