use crate::{FilterError, FilterResult};

pub const MIN_KERNEL_SIZE: u32 = 3;
pub const MAX_KERNEL_SIZE: u32 = 51;
pub const DEFAULT_KERNEL_SIZE: u32 = 15;
pub const KERNEL_STEP: u32 = 2;
pub const SIGMA_STEP: f32 = 1.0;

/// Tunable state of the Gaussian blur.
///
/// `kernel_size` is always odd and inside `[MIN_KERNEL_SIZE, MAX_KERNEL_SIZE]`,
/// `sigma` is never negative. A sigma of `0` means "derive it from the kernel
/// size", see [`auto_sigma`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaussianParams {
    kernel_size: u32,
    sigma: f32,
}

impl Default for GaussianParams {
    fn default() -> Self {
        Self {
            kernel_size: DEFAULT_KERNEL_SIZE,
            sigma: 0.0,
        }
    }
}

impl GaussianParams {
    pub fn new(kernel_size: u32, sigma: f32) -> FilterResult<Self> {
        if kernel_size % 2 == 0 {
            return Err(FilterError::InvalidParameter(format!(
                "kernel size must be odd, got {kernel_size}"
            )));
        }

        if !(MIN_KERNEL_SIZE..=MAX_KERNEL_SIZE).contains(&kernel_size) {
            return Err(FilterError::InvalidParameter(format!(
                "kernel size must be in [{MIN_KERNEL_SIZE}, {MAX_KERNEL_SIZE}], got {kernel_size}"
            )));
        }

        if !sigma.is_finite() || sigma < 0.0 {
            return Err(FilterError::InvalidParameter(format!(
                "sigma must be a non-negative number, got {sigma}"
            )));
        }

        Ok(Self { kernel_size, sigma })
    }

    pub fn kernel_size(&self) -> u32 {
        self.kernel_size
    }

    pub fn sigma(&self) -> f32 {
        self.sigma
    }

    /// The standard deviation actually used for the kernel.
    pub fn effective_sigma(&self) -> f32 {
        if self.sigma > 0.0 {
            self.sigma
        } else {
            auto_sigma(self.kernel_size)
        }
    }

    /// Returns `true` when the kernel size changed.
    pub fn grow_kernel(&mut self) -> bool {
        if self.kernel_size + KERNEL_STEP > MAX_KERNEL_SIZE {
            return false;
        }

        self.kernel_size += KERNEL_STEP;
        true
    }

    /// Returns `true` when the kernel size changed.
    pub fn shrink_kernel(&mut self) -> bool {
        if self.kernel_size < MIN_KERNEL_SIZE + KERNEL_STEP {
            return false;
        }

        self.kernel_size -= KERNEL_STEP;
        true
    }

    pub fn raise_sigma(&mut self) -> bool {
        self.sigma += SIGMA_STEP;
        true
    }

    /// Returns `true` when sigma changed. Sigma floors at zero.
    pub fn lower_sigma(&mut self) -> bool {
        if self.sigma <= 0.0 {
            return false;
        }

        self.sigma = (self.sigma - SIGMA_STEP).max(0.0);
        true
    }
}

/// Standard deviation derived from a kernel size: `0.3 * ((k - 1) * 0.5 - 1) + 0.8`.
///
/// This is the usual convention of convolution libraries when no explicit
/// sigma is given. It yields `0.8` for a 3x3 kernel and `2.6` for 15x15.
pub fn auto_sigma(kernel_size: u32) -> f32 {
    0.3 * ((kernel_size as f32 - 1.0) * 0.5 - 1.0) + 0.8
}
