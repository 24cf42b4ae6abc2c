use image::{Rgba, RgbaImage};

pub const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
pub const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
pub const GREEN: Rgba<u8> = Rgba([0, 255, 0, 255]);
pub const GREY: Rgba<u8> = Rgba([100, 100, 100, 255]);
pub const PANEL: Rgba<u8> = Rgba([40, 40, 40, 255]);

/// Axis-aligned box in frame coordinates. It may hang off any edge of the
/// frame; every drawing call clips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Visible part as `(x0, y0, x1, y1)`, exclusive end. `None` when nothing
    /// of the region falls inside a `width` x `height` frame.
    pub fn clip(&self, width: u32, height: u32) -> Option<(u32, u32, u32, u32)> {
        let x0 = (self.x as i64).max(0);
        let y0 = (self.y as i64).max(0);
        let x1 = (self.x as i64 + self.width as i64).min(width as i64);
        let y1 = (self.y as i64 + self.height as i64).min(height as i64);

        if x0 >= x1 || y0 >= y1 {
            return None;
        }

        Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
    }
}

pub fn blend_pixel(existing: Rgba<u8>, new: Rgba<u8>, alpha: f32) -> Rgba<u8> {
    let mut buffer = [0u8; 4];
    for c in 0..3 {
        let e = existing[c] as f32;
        let n = new[c] as f32;
        buffer[c] = (e * (1.0 - alpha) + n * alpha).round() as u8;
    }
    buffer[3] = existing[3];

    Rgba(buffer)
}

pub fn fill_rect(image: &mut RgbaImage, region: Region, color: Rgba<u8>) {
    let Some((x0, y0, x1, y1)) = region.clip(image.width(), image.height()) else {
        return;
    };

    for y in y0..y1 {
        for x in x0..x1 {
            image.put_pixel(x, y, color);
        }
    }
}

/// Mix `color` into the region with weight `alpha`.
pub fn blend_rect(image: &mut RgbaImage, region: Region, color: Rgba<u8>, alpha: f32) {
    let Some((x0, y0, x1, y1)) = region.clip(image.width(), image.height()) else {
        return;
    };

    let alpha = alpha.clamp(0.0, 1.0);
    for y in y0..y1 {
        for x in x0..x1 {
            let existing = *image.get_pixel(x, y);
            image.put_pixel(x, y, blend_pixel(existing, color, alpha));
        }
    }
}

/// Outline drawn inward from the region edges.
pub fn stroke_rect(image: &mut RgbaImage, region: Region, thickness: u32, color: Rgba<u8>) {
    let t = thickness.min(region.width).min(region.height);
    if t == 0 {
        return;
    }

    let Region {
        x,
        y,
        width,
        height,
    } = region;

    fill_rect(image, Region::new(x, y, width, t), color);
    fill_rect(
        image,
        Region::new(x, y + (height - t) as i32, width, t),
        color,
    );
    fill_rect(image, Region::new(x, y, t, height), color);
    fill_rect(image, Region::new(x + (width - t) as i32, y, t, height), color);
}

/// Full-height vertical line centred on column `x`.
pub fn vline(image: &mut RgbaImage, x: i32, thickness: u32, color: Rgba<u8>) {
    let left = x - (thickness / 2) as i32;
    let height = image.height();
    fill_rect(image, Region::new(left, 0, thickness, height), color);
}
