use crate::{
    Effect, GaussianParams,
    convolution::{self, Kernel},
    gaussian_params::auto_sigma,
};
use derivative::Derivative;
use derive_setters::Setters;
use image::RgbaImage;

pub const SIMPLE_BLUR_KERNEL_SIZE: u32 = 15;
pub const BOX_BLUR_KERNEL_SIZE: u32 = 5;

/// Gaussian smoothing with a square `kernel_size` kernel.
/// A `sigma` of `0.0` derives the deviation from the kernel size.
#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct GaussianBlurConfig {
    #[derivative(Default(value = "15"))]
    kernel_size: u32,

    #[derivative(Default(value = "0.0"))]
    sigma: f32,
}

impl GaussianBlurConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// The fixed 15x15 blur bound to the "simple blur" filter.
    pub fn simple() -> Self {
        Self::new().with_kernel_size(SIMPLE_BLUR_KERNEL_SIZE)
    }

    pub fn effective_sigma(&self) -> f32 {
        if self.sigma > 0.0 {
            self.sigma
        } else {
            auto_sigma(self.kernel_size)
        }
    }
}

impl From<&GaussianParams> for GaussianBlurConfig {
    fn from(params: &GaussianParams) -> Self {
        Self::new()
            .with_kernel_size(params.kernel_size())
            .with_sigma(params.sigma())
    }
}

impl Effect for GaussianBlurConfig {
    fn apply(&self, image: &RgbaImage) -> RgbaImage {
        let size = (self.kernel_size | 1) as usize;
        let weights = convolution::gaussian_weights(size, self.effective_sigma());
        convolution::convolve_separable(image, &weights)
    }
}

/// Uniform averaging over a fixed 5x5 window.
#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct BoxBlurConfig {
    #[derivative(Default(value = "BOX_BLUR_KERNEL_SIZE"))]
    kernel_size: u32,
}

impl BoxBlurConfig {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Effect for BoxBlurConfig {
    fn apply(&self, image: &RgbaImage) -> RgbaImage {
        let kernel = Kernel::uniform(self.kernel_size as usize);
        convolution::convolve(image, &kernel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn checkerboard(size: u32) -> RgbaImage {
        RgbaImage::from_fn(size, size, |x, y| {
            if (x + y) % 2 == 0 {
                Rgba([255, 255, 255, 255])
            } else {
                Rgba([0, 0, 0, 255])
            }
        })
    }

    fn spread(image: &RgbaImage) -> u8 {
        let (min, max) = image
            .pixels()
            .fold((255u8, 0u8), |(lo, hi), p| (lo.min(p[0]), hi.max(p[0])));
        max - min
    }

    #[test]
    fn test_gaussian_smooths_checkerboard() {
        let image = checkerboard(20);
        let blurred = GaussianBlurConfig::new().with_kernel_size(7).apply(&image);
        assert!(spread(&blurred) < spread(&image) / 2);
    }

    #[test]
    fn test_larger_sigma_blurs_more() {
        let image = checkerboard(24);
        let soft = GaussianBlurConfig::new()
            .with_kernel_size(5)
            .with_sigma(0.5)
            .apply(&image);
        let strong = GaussianBlurConfig::new()
            .with_kernel_size(5)
            .with_sigma(3.0)
            .apply(&image);
        assert!(spread(&strong) < spread(&soft));
    }

    #[test]
    fn test_config_from_params() {
        let params = GaussianParams::new(21, 3.0).unwrap();
        let config = GaussianBlurConfig::from(&params);
        assert_eq!(config.kernel_size, 21);
        assert_eq!(config.sigma, 3.0);
        assert_eq!(config.effective_sigma(), 3.0);
        assert_eq!(GaussianBlurConfig::simple().kernel_size, 15);
    }

    #[test]
    fn test_box_blur_averages_window() {
        let mut image = RgbaImage::from_pixel(9, 9, Rgba([0, 0, 0, 255]));
        image.put_pixel(4, 4, Rgba([250, 250, 250, 255]));

        let blurred = BoxBlurConfig::new().apply(&image);
        assert_eq!(blurred.get_pixel(4, 4)[0], 10);
        assert_eq!(blurred.get_pixel(2, 2)[0], 10);
        assert_eq!(blurred.get_pixel(1, 1)[0], 0);
    }
}
