pub mod helpers;
pub mod paint_canvas;
pub mod preview;
