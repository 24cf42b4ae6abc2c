use crate::{
    Effect,
    convolution::{self, Kernel},
};
use derivative::Derivative;
use derive_setters::Setters;
use image::{Rgba, RgbaImage};

/// Center 9, neighbours -1. The weights sum to 1, so flat areas are untouched.
pub const SHARPEN_WEIGHTS: [f32; 9] = [-1.0, -1.0, -1.0, -1.0, 9.0, -1.0, -1.0, -1.0, -1.0];

#[derive(Debug, Clone, Copy, Default)]
#[non_exhaustive]
pub struct SharpenConfig;

impl SharpenConfig {
    pub fn new() -> Self {
        Self
    }

    pub fn kernel() -> Kernel {
        Kernel::from_3x3(SHARPEN_WEIGHTS)
    }
}

impl Effect for SharpenConfig {
    fn apply(&self, image: &RgbaImage) -> RgbaImage {
        convolution::convolve(image, &Self::kernel())
    }
}

/// Canny edge map expanded back to RGBA so it composites like a colour frame.
#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct EdgeDetectionConfig {
    #[derivative(Default(value = "100.0"))]
    low_threshold: f32,

    #[derivative(Default(value = "200.0"))]
    high_threshold: f32,
}

impl EdgeDetectionConfig {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Effect for EdgeDetectionConfig {
    fn apply(&self, image: &RgbaImage) -> RgbaImage {
        let gray = image::imageops::grayscale(image);
        let edges = imageproc::edges::canny(&gray, self.low_threshold, self.high_threshold);

        RgbaImage::from_fn(image.width(), image.height(), |x, y| {
            let value = edges.get_pixel(x, y)[0];
            Rgba([value, value, value, image.get_pixel(x, y)[3]])
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sharpen_kernel_sums_to_one() {
        assert!((SharpenConfig::kernel().sum() - 1.0).abs() < 1e-6);
        assert_eq!(SharpenConfig::kernel().size(), 3);
    }

    #[test]
    fn test_sharpen_keeps_flat_area_and_boosts_step() {
        let flat = RgbaImage::from_pixel(6, 6, Rgba([80, 80, 80, 255]));
        assert_eq!(SharpenConfig::new().apply(&flat), flat);

        let step = RgbaImage::from_fn(8, 4, |x, _| {
            if x < 4 {
                Rgba([100, 100, 100, 255])
            } else {
                Rgba([150, 150, 150, 255])
            }
        });
        let sharpened = SharpenConfig::new().apply(&step);
        assert!(sharpened.get_pixel(3, 1)[0] < 100);
        assert!(sharpened.get_pixel(4, 1)[0] > 150);
    }

    #[test]
    fn test_edge_detection_finds_vertical_edge() {
        let image = RgbaImage::from_fn(32, 32, |x, _| {
            if x < 16 {
                Rgba([0, 0, 0, 255])
            } else {
                Rgba([255, 255, 255, 255])
            }
        });

        let edges = EdgeDetectionConfig::new().apply(&image);
        assert_eq!(edges.dimensions(), (32, 32));
        assert!(edges.pixels().all(|p| p[0] == p[1] && p[1] == p[2]));
        assert!(edges.pixels().any(|p| p[0] == 255));
        assert_eq!(edges.get_pixel(2, 16)[0], 0);
        assert_eq!(edges.get_pixel(29, 16)[0], 0);
    }
}
