mod pc_brush;
mod pc_main;
mod pc_pointer;
mod pc_raster;
mod pc_sizer;
mod pc_stroke;
mod pc_surface;
mod pc_ui;

pub use pc_brush::{ToolKind, ToolSettings};
pub use pc_main::PaintCanvas;
pub use pc_sizer::ChromeAllowance;
pub use pc_surface::DrawingSurface;
pub use pc_ui::CanvasAction;
