use eframe::egui;
use image::RgbaImage;

/// A GPU texture mirroring a pixel buffer. Uploads happen lazily: callers
/// mark it dirty after mutating the buffer and the next `sync` re-uploads.
pub struct SurfaceTexture {
    name: &'static str,
    id: Option<egui::TextureId>,
    dirty: bool,
    uploads: u64,
}

impl SurfaceTexture {
    pub fn new(name: &'static str) -> Self { Self { name, id: None, dirty: true, uploads: 0 } }

    pub fn mark_dirty(&mut self) { self.dirty = true; }
    #[cfg(test)]
    pub fn is_dirty(&self) -> bool { self.dirty }
    pub fn id(&self) -> Option<egui::TextureId> { self.id }
    #[cfg(test)]
    pub fn uploads(&self) -> u64 { self.uploads }

    pub fn sync(&mut self, ctx: &egui::Context, pixels: &RgbaImage) {
        if !self.dirty { return; }
        let (w, h) = (pixels.width() as usize, pixels.height() as usize);
        // Zero-area textures are rejected by the painter; keep the stale one.
        if w == 0 || h == 0 { return; }
        let color_image: egui::ColorImage = egui::ColorImage::from_rgba_unmultiplied([w, h], pixels.as_raw());

        if let Some(texture_id) = self.id {
            ctx.tex_manager().write().set(texture_id, egui::epaint::ImageDelta::full(color_image, egui::TextureOptions::LINEAR));
        } else {
            self.id = Some(ctx.tex_manager().write().alloc(self.name.into(), color_image.into(), egui::TextureOptions::LINEAR));
        }

        self.dirty = false;
        self.uploads += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn uploads_only_when_dirty() {
        let ctx: egui::Context = egui::Context::default();
        let pixels: RgbaImage = RgbaImage::from_pixel(4, 3, Rgba([1, 2, 3, 255]));
        let mut tex: SurfaceTexture = SurfaceTexture::new("test_surface");

        tex.sync(&ctx, &pixels);
        assert!(tex.id().is_some());
        tex.sync(&ctx, &pixels);
        assert_eq!(tex.uploads(), 1);

        tex.mark_dirty();
        tex.sync(&ctx, &pixels);
        assert_eq!(tex.uploads(), 2);
    }

    #[test]
    fn empty_buffer_stays_dirty() {
        let ctx: egui::Context = egui::Context::default();
        let mut tex: SurfaceTexture = SurfaceTexture::new("test_empty");
        tex.sync(&ctx, &RgbaImage::new(0, 0));
        assert!(tex.is_dirty());
        assert!(tex.id().is_none());
    }
}
