//! Convolution primitives shared by the blur and sharpen filters.
//!
//! All passes work on the RGB channels of an RGBA frame, copy alpha from the
//! source, and resolve out-of-range taps with reflect-101 borders
//! (`dcb|abcd|cba`). Rows are processed in parallel; the source frame is only
//! ever borrowed.

use image::RgbaImage;
use rayon::prelude::*;

const CHANNELS: usize = 4;
const COLOR_CHANNELS: usize = 3;

/// Square convolution kernel stored row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    size: usize,
    weights: Vec<f32>,
}

impl Kernel {
    /// `None` unless `size` is odd and `weights` holds `size * size` values.
    pub fn new(size: usize, weights: Vec<f32>) -> Option<Self> {
        if size % 2 == 0 || weights.len() != size * size {
            return None;
        }

        Some(Self { size, weights })
    }

    pub fn from_3x3(weights: [f32; 9]) -> Self {
        Self {
            size: 3,
            weights: weights.to_vec(),
        }
    }

    /// Every cell equals `1 / (size * size)`.
    pub fn uniform(size: usize) -> Self {
        let size = size | 1;
        let weight = 1.0 / (size * size) as f32;

        Self {
            size,
            weights: vec![weight; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    pub fn sum(&self) -> f32 {
        self.weights.iter().sum()
    }
}

/// Normalised 1-D Gaussian weights of length `size`.
pub fn gaussian_weights(size: usize, sigma: f32) -> Vec<f32> {
    let half = (size / 2) as f32;
    let denom = 2.0 * sigma * sigma;

    let mut weights: Vec<f32> = (0..size)
        .map(|i| {
            let x = i as f32 - half;
            (-(x * x) / denom).exp()
        })
        .collect();

    let sum: f32 = weights.iter().sum();
    weights.iter_mut().for_each(|w| *w /= sum);
    weights
}

/// Map `pos` into `[0, len)` by mirroring around the edge pixels.
pub fn reflect_101(pos: isize, len: usize) -> usize {
    if len <= 1 {
        return 0;
    }

    let len = len as isize;
    let period = 2 * (len - 1);
    let mut p = pos.rem_euclid(period);
    if p >= len {
        p = period - p;
    }

    p as usize
}

fn saturate(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

/// Full 2-D convolution. Results are rounded and saturated to `u8`.
pub fn convolve(image: &RgbaImage, kernel: &Kernel) -> RgbaImage {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return image.clone();
    }

    let (w, h) = (width as usize, height as usize);
    let stride = w * CHANNELS;
    let half = (kernel.size / 2) as isize;
    let src = image.as_raw();

    let mut output = RgbaImage::new(width, height);
    let buffer: &mut [u8] = &mut output;

    buffer
        .par_chunks_mut(stride)
        .enumerate()
        .for_each(|(y, row)| {
            for x in 0..w {
                let mut acc = [0f32; COLOR_CHANNELS];

                for ky in 0..kernel.size {
                    let sy = reflect_101(y as isize + ky as isize - half, h);
                    let src_row = &src[sy * stride..(sy + 1) * stride];

                    for kx in 0..kernel.size {
                        let sx = reflect_101(x as isize + kx as isize - half, w);
                        let weight = kernel.weights[ky * kernel.size + kx];
                        let pixel = &src_row[sx * CHANNELS..sx * CHANNELS + COLOR_CHANNELS];

                        for (sum, value) in acc.iter_mut().zip(pixel) {
                            *sum += *value as f32 * weight;
                        }
                    }
                }

                let dst = &mut row[x * CHANNELS..(x + 1) * CHANNELS];
                for (c, sum) in acc.iter().enumerate() {
                    dst[c] = saturate(*sum);
                }
                dst[3] = src[y * stride + x * CHANNELS + 3];
            }
        });

    output
}

/// Convolution with the outer product of `weights` with itself, done as a
/// horizontal pass followed by a vertical pass.
pub fn convolve_separable(image: &RgbaImage, weights: &[f32]) -> RgbaImage {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return image.clone();
    }

    let (w, h) = (width as usize, height as usize);
    let stride = w * CHANNELS;
    let half = (weights.len() / 2) as isize;
    let src = image.as_raw();

    let mut horizontal = vec![0f32; w * h * COLOR_CHANNELS];
    horizontal
        .par_chunks_mut(w * COLOR_CHANNELS)
        .enumerate()
        .for_each(|(y, row)| {
            let src_row = &src[y * stride..(y + 1) * stride];

            for x in 0..w {
                let mut acc = [0f32; COLOR_CHANNELS];

                for (k, weight) in weights.iter().enumerate() {
                    let sx = reflect_101(x as isize + k as isize - half, w);
                    let pixel = &src_row[sx * CHANNELS..sx * CHANNELS + COLOR_CHANNELS];

                    for (sum, value) in acc.iter_mut().zip(pixel) {
                        *sum += *value as f32 * weight;
                    }
                }

                row[x * COLOR_CHANNELS..(x + 1) * COLOR_CHANNELS].copy_from_slice(&acc);
            }
        });

    let mut output = RgbaImage::new(width, height);
    let buffer: &mut [u8] = &mut output;

    buffer
        .par_chunks_mut(stride)
        .enumerate()
        .for_each(|(y, row)| {
            for x in 0..w {
                let mut acc = [0f32; COLOR_CHANNELS];

                for (k, weight) in weights.iter().enumerate() {
                    let sy = reflect_101(y as isize + k as isize - half, h);
                    let base = (sy * w + x) * COLOR_CHANNELS;

                    for (c, sum) in acc.iter_mut().enumerate() {
                        *sum += horizontal[base + c] * weight;
                    }
                }

                let dst = &mut row[x * CHANNELS..(x + 1) * CHANNELS];
                for (c, sum) in acc.iter().enumerate() {
                    dst[c] = saturate(*sum);
                }
                dst[3] = src[y * stride + x * CHANNELS + 3];
            }
        });

    output
}
