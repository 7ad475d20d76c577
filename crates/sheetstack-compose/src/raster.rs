//! RGBA8 raster buffer.
//!
//! All compositing happens on raw RGBA8 buffers so that output pixels are
//! byte-reproducible: the dedup pass compares frame regions byte-for-byte,
//! and two runs over the same inputs must produce identical rasters.

/// A 2D RGBA8 image buffer, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel data, 4 bytes per pixel, row-major.
    pub data: Vec<u8>,
}

impl Raster {
    /// Create a fully transparent raster.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; (width as usize) * (height as usize) * 4],
        }
    }

    /// Wrap an existing RGBA8 buffer. The buffer length must be
    /// `width * height * 4`.
    pub fn from_rgba8(width: u32, height: u32, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), (width as usize) * (height as usize) * 4);
        Self {
            width,
            height,
            data,
        }
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        ((y as usize) * (self.width as usize) + (x as usize)) * 4
    }

    /// Get a pixel. Coordinates must be in bounds.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> [u8; 4] {
        let i = self.index(x, y);
        [self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]]
    }

    /// Set a pixel. Coordinates must be in bounds.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, px: [u8; 4]) {
        let i = self.index(x, y);
        self.data[i..i + 4].copy_from_slice(&px);
    }

    /// Whether the rectangle lies fully inside this raster.
    pub fn contains_rect(&self, x: u32, y: u32, w: u32, h: u32) -> bool {
        (x as u64) + (w as u64) <= self.width as u64 && (y as u64) + (h as u64) <= self.height as u64
    }

    /// Copy a rectangle from `src` into this raster, overwriting destination
    /// pixels byte-for-byte. Both rectangles must be in bounds (callers
    /// validate; packing guarantees the destination side).
    pub fn copy_from(&mut self, src: &Raster, sx: u32, sy: u32, w: u32, h: u32, dx: u32, dy: u32) {
        debug_assert!(src.contains_rect(sx, sy, w, h));
        debug_assert!(self.contains_rect(dx, dy, w, h));

        for row in 0..h {
            let si = src.index(sx, sy + row);
            let di = self.index(dx, dy + row);
            let len = (w as usize) * 4;
            self.data[di..di + len].copy_from_slice(&src.data[si..si + len]);
        }
    }

    /// Blend a rectangle from `src` over this raster with straight-alpha
    /// source-over compositing, optionally mirroring the source rectangle
    /// about its own midlines. Both rectangles must be in bounds.
    #[allow(clippy::too_many_arguments)]
    pub fn blend_from(
        &mut self,
        src: &Raster,
        sx: u32,
        sy: u32,
        w: u32,
        h: u32,
        dx: u32,
        dy: u32,
        flipx: bool,
        flipy: bool,
    ) {
        debug_assert!(src.contains_rect(sx, sy, w, h));
        debug_assert!(self.contains_rect(dx, dy, w, h));

        for iy in 0..h {
            let read_y = sy + if flipy { h - 1 - iy } else { iy };
            for ix in 0..w {
                let read_x = sx + if flipx { w - 1 - ix } else { ix };
                let over = src.get(read_x, read_y);
                if over[3] == 0 {
                    continue;
                }
                if over[3] == 255 {
                    self.set(dx + ix, dy + iy, over);
                    continue;
                }
                let under = self.get(dx + ix, dy + iy);
                self.set(dx + ix, dy + iy, blend_over(over, under));
            }
        }
    }
}

/// Straight-alpha source-over blend of one pixel.
fn blend_over(over: [u8; 4], under: [u8; 4]) -> [u8; 4] {
    let sa = over[3] as f32 / 255.0;
    let da = under[3] as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);

    if out_a <= 0.0 {
        return [0, 0, 0, 0];
    }

    let mut out = [0u8; 4];
    for c in 0..3 {
        let sc = over[c] as f32 / 255.0;
        let dc = under[c] as f32 / 255.0;
        let v = (sc * sa + dc * da * (1.0 - sa)) / out_a;
        out[c] = (v * 255.0 + 0.5) as u8;
    }
    out[3] = (out_a * 255.0 + 0.5) as u8;
    out
}
