use super::{
    draw::{self, BLACK, GREEN, Region},
    glyph,
};
use image::RgbaImage;

const STATUS_SCALE: u32 = 2;
const MARGIN: u32 = 10;

/// Active filter label in the top-right corner.
pub fn draw_status(image: &mut RgbaImage, text: &str) {
    let (text_width, text_height) = glyph::text_size(text, STATUS_SCALE);
    let right = image.width() as i32 - MARGIN as i32;

    let region = Region::new(
        right - (text_width + MARGIN) as i32,
        MARGIN as i32,
        text_width + MARGIN,
        text_height + MARGIN,
    );

    draw::fill_rect(image, region, BLACK);
    glyph::draw_text(
        image,
        text,
        region.x + (MARGIN / 2) as i32,
        region.y + (MARGIN / 2) as i32,
        STATUS_SCALE,
        GREEN,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_status_sits_top_right() {
        let mut image = RgbaImage::from_pixel(400, 100, Rgba([7, 7, 7, 255]));
        draw_status(&mut image, "Filter: NONE");

        assert_eq!(*image.get_pixel(389, 10), BLACK);
        assert_eq!(*image.get_pixel(390, 10), Rgba([7, 7, 7, 255]));
        assert_eq!(*image.get_pixel(5, 10), Rgba([7, 7, 7, 255]));
        assert!(image.pixels().any(|p| *p == GREEN));
    }

    #[test]
    fn test_status_wider_than_frame() {
        let mut image = RgbaImage::new(20, 20);
        draw_status(&mut image, "Filter: GAUSSIAN BLUR (K:51, S:10)");
        assert_eq!(image.dimensions(), (20, 20));
    }
}
