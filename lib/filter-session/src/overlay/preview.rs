use super::{
    OverlayConfig,
    draw::{self, GREEN, GREY, PANEL, Region, WHITE},
    glyph,
};
use image::{Rgba, RgbaImage, imageops};

const LABEL_REGION_Y: i32 = 50;
const LABEL_WIDTH: u32 = 190;
const LABEL_HEIGHT: u32 = 40;
const LABEL_SCALE: u32 = 2;
const READOUT_SCALE: u32 = 3;
const READOUT_BOTTOM_MARGIN: u32 = 30;
const READOUT_PADDING: u32 = 20;
const READOUT_BORDER: u32 = 3;
const DIVIDER_THICKNESS: u32 = 2;

/// Border color of the readout box at `intensity` in `[0, 1]`.
pub fn readout_border_color(accent: Rgba<u8>, intensity: f32) -> Rgba<u8> {
    let intensity = intensity.clamp(0.0, 1.0);
    let scale = |c: u8| (c as f32 * intensity).round() as u8;

    Rgba([scale(accent[0]), scale(accent[1]), scale(accent[2]), 255])
}

/// Original on the left, filtered on the right, both squeezed into half the
/// frame width. The result keeps the input dimensions; with an odd width the
/// right half gets the extra column.
pub fn side_by_side(
    original: &RgbaImage,
    filtered: &RgbaImage,
    message: &str,
    border_intensity: f32,
    config: &OverlayConfig,
) -> RgbaImage {
    let (width, height) = original.dimensions();
    let half = width / 2;
    if half == 0 || height == 0 {
        return filtered.clone();
    }

    let left = imageops::resize(original, half, height, config.resize_filter);
    let right = imageops::resize(filtered, width - half, height, config.resize_filter);

    let mut canvas = RgbaImage::new(width, height);
    imageops::replace(&mut canvas, &left, 0, 0);
    imageops::replace(&mut canvas, &right, half as i64, 0);

    draw_label(&mut canvas, "ORIGINAL", 10, GREY, WHITE);
    draw_label(&mut canvas, "FILTERED", half as i32 + 10, GREEN, GREEN);

    draw_readout(&mut canvas, message, border_intensity, config);
    draw::vline(
        &mut canvas,
        half as i32,
        DIVIDER_THICKNESS,
        config.accent_color,
    );

    canvas
}

fn draw_label(image: &mut RgbaImage, text: &str, x: i32, border: Rgba<u8>, color: Rgba<u8>) {
    let region = Region::new(x, LABEL_REGION_Y, LABEL_WIDTH, LABEL_HEIGHT);
    draw::fill_rect(image, region, PANEL);
    draw::stroke_rect(image, region, 2, border);

    let (_, text_height) = glyph::text_size(text, LABEL_SCALE);
    glyph::draw_text(
        image,
        text,
        x + 10,
        LABEL_REGION_Y + ((LABEL_HEIGHT - text_height) / 2) as i32,
        LABEL_SCALE,
        color,
    );
}

fn draw_readout(image: &mut RgbaImage, message: &str, intensity: f32, config: &OverlayConfig) {
    let (width, height) = image.dimensions();
    let (text_width, text_height) = glyph::text_size(message, READOUT_SCALE);

    let text_x = (width as i32 - text_width as i32) / 2;
    let text_y = height as i32 - (READOUT_BOTTOM_MARGIN + text_height) as i32;

    let region = Region::new(
        text_x - READOUT_PADDING as i32,
        text_y - READOUT_PADDING as i32,
        text_width + READOUT_PADDING * 2,
        text_height + READOUT_PADDING * 2,
    );

    draw::fill_rect(image, region, PANEL);
    draw::stroke_rect(
        image,
        region,
        READOUT_BORDER,
        readout_border_color(config.accent_color, intensity),
    );
    glyph::draw_text(image, message, text_x, text_y, READOUT_SCALE, WHITE);
}
