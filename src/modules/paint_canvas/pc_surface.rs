use image::{ImageBuffer, Rgba, RgbaImage};

/// A captured copy of the surface pixels.
pub type Snapshot = RgbaImage;

/// The pixel buffer the user paints on. Always fully opaque where the user has
/// not painted: new area is filled with `background`.
pub struct DrawingSurface {
    pub(super) pixels: RgbaImage,
    pub(super) background: Rgba<u8>,
}

impl DrawingSurface {
    pub fn new(width: u32, height: u32, background: Rgba<u8>) -> Self {
        Self { pixels: ImageBuffer::from_pixel(width, height, background), background }
    }

    pub fn width(&self) -> u32 { self.pixels.width() }
    pub fn height(&self) -> u32 { self.pixels.height() }
    pub fn size(&self) -> (u32, u32) { self.pixels.dimensions() }
    pub fn is_empty(&self) -> bool { self.width() == 0 || self.height() == 0 }
    pub fn background(&self) -> Rgba<u8> { self.background }
    pub fn pixels(&self) -> &RgbaImage { &self.pixels }

    #[cfg(test)]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba<u8>> {
        if x < self.width() && y < self.height() { Some(*self.pixels.get_pixel(x, y)) } else { None }
    }

    /// Height over width, or 1.0 for a degenerate surface.
    pub fn aspect(&self) -> f32 {
        if self.width() == 0 { 1.0 } else { self.height() as f32 / self.width() as f32 }
    }

    /// Resizes the buffer, refilling with background and keeping the old
    /// content anchored at the origin (cropped or padded).
    pub fn resize(&mut self, width: u32, height: u32) {
        if self.size() == (width, height) { return; }
        let previous: RgbaImage = std::mem::replace(&mut self.pixels, ImageBuffer::from_pixel(width, height, self.background));
        self.put_at_origin(&previous);
    }

    pub fn clear(&mut self) {
        let bg: Rgba<u8> = self.background;
        for p in self.pixels.pixels_mut() { *p = bg; }
    }

    pub fn snapshot(&self) -> Snapshot { self.pixels.clone() }

    /// Writes `snapshot` back at the origin. Only the overlapping region is
    /// touched, so a surface resized mid-gesture keeps its new area.
    pub fn restore(&mut self, snapshot: &Snapshot) { self.put_at_origin(snapshot); }

    fn put_at_origin(&mut self, src: &RgbaImage) {
        let w: usize = src.width().min(self.width()) as usize;
        let h: u32 = src.height().min(self.height());
        if w == 0 { return; }
        let src_stride: usize = src.width() as usize * 4;
        let dst_stride: usize = self.width() as usize * 4;
        let src_raw: &[u8] = src.as_raw();
        let dst_raw: &mut [u8] = &mut self.pixels;
        for row in 0..h as usize {
            let s: usize = row * src_stride;
            let d: usize = row * dst_stride;
            dst_raw[d..d + w * 4].copy_from_slice(&src_raw[s..s + w * 4]);
        }
    }

    /// Source-over blend of `color` at `coverage` in `[0, 1]`.
    pub(super) fn blend(&mut self, x: u32, y: u32, color: Rgba<u8>, coverage: f32) {
        let [r, g, b, a] = color.0;
        let alpha: u16 = (a as f32 * coverage.clamp(0.0, 1.0)).round() as u16;
        if alpha == 0 { return; }
        let px: &mut Rgba<u8> = self.pixels.get_pixel_mut(x, y);
        let [er, eg, eb, ea] = px.0;
        let inv: u16 = 255 - alpha;
        let mix = |src: u8, dst: u8| -> u8 { ((src as u16 * alpha + dst as u16 * inv + 127) / 255) as u8 };
        let na: u16 = (alpha + ea as u16 * inv / 255).min(255);
        *px = Rgba([mix(r, er), mix(g, eg), mix(b, eb), na as u8]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);

    fn marked(w: u32, h: u32) -> DrawingSurface {
        let mut s: DrawingSurface = DrawingSurface::new(w, h, WHITE);
        for y in 0..h {
            for x in 0..w {
                s.pixels.put_pixel(x, y, Rgba([x as u8, y as u8, 7, 255]));
            }
        }
        s
    }

    #[test]
    fn shrink_then_grow_keeps_shared_region() {
        let mut s: DrawingSurface = marked(20, 10);
        s.resize(8, 12);
        assert_eq!(s.size(), (8, 12));
        for y in 0..10 {
            for x in 0..8 {
                assert_eq!(s.pixel(x, y), Some(Rgba([x as u8, y as u8, 7, 255])));
            }
        }
        assert_eq!(s.pixel(3, 11), Some(WHITE));

        s.resize(30, 30);
        assert_eq!(s.pixel(7, 9), Some(Rgba([7, 9, 7, 255])));
        assert_eq!(s.pixel(8, 0), Some(WHITE));
        assert_eq!(s.pixel(29, 29), Some(WHITE));
    }

    #[test]
    fn zero_area_resize_is_accepted() {
        let mut s: DrawingSurface = marked(4, 4);
        s.resize(0, 0);
        assert!(s.is_empty());
        assert_eq!(s.pixel(0, 0), None);
        s.resize(2, 2);
        assert_eq!(s.pixel(1, 1), Some(WHITE));
    }

    #[test]
    fn clear_resets_to_background() {
        let mut s: DrawingSurface = marked(5, 5);
        s.clear();
        assert!(s.pixels().pixels().all(|p| *p == WHITE));
    }

    #[test]
    fn restore_undoes_blends() {
        let mut s: DrawingSurface = DrawingSurface::new(6, 6, WHITE);
        let snap: Snapshot = s.snapshot();
        s.blend(2, 2, RED, 1.0);
        assert_eq!(s.pixel(2, 2), Some(RED));
        s.restore(&snap);
        assert_eq!(s.pixels(), &snap);
    }

    #[test]
    fn half_coverage_mixes_colors() {
        let mut s: DrawingSurface = DrawingSurface::new(1, 1, WHITE);
        s.blend(0, 0, Rgba([0, 0, 0, 255]), 0.5);
        let p: Rgba<u8> = s.pixel(0, 0).unwrap();
        assert!((126..=129).contains(&p.0[0]), "got {:?}", p);
        assert_eq!(p.0[3], 255);
    }
}
