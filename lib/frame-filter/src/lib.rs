pub mod blur_effect;
pub mod convolution;
pub mod filter_kind;
pub mod gaussian_params;
pub mod stylized_effect;

pub use filter_kind::FilterKind;
pub use gaussian_params::GaussianParams;
pub use image::{Rgba, RgbaImage};

use blur_effect::{BoxBlurConfig, GaussianBlurConfig};
use std::borrow::Cow;
use stylized_effect::{EdgeDetectionConfig, SharpenConfig};

pub type FilterResult<T> = Result<T, FilterError>;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum FilterError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

/// A filter that turns one frame into a freshly allocated one.
///
/// Implementations never touch the input buffer.
pub trait Effect {
    fn apply(&self, image: &RgbaImage) -> RgbaImage;
}

/// Apply `kind` to `frame`.
///
/// `FilterKind::None` hands the input back borrowed; every other kind returns
/// a new buffer with the same dimensions. `params` is only read by
/// `FilterKind::GaussianBlur` and is assumed to be valid already.
pub fn transform<'a>(
    frame: &'a RgbaImage,
    kind: FilterKind,
    params: &GaussianParams,
) -> Cow<'a, RgbaImage> {
    if frame.width() == 0 || frame.height() == 0 {
        log::debug!("skip {kind:?} on empty frame");
        return Cow::Borrowed(frame);
    }

    if kind.is_tunable() {
        log::trace!(
            "{kind:?}: kernel {}, sigma {}",
            params.kernel_size(),
            params.effective_sigma()
        );
    }

    match kind {
        FilterKind::None => Cow::Borrowed(frame),
        FilterKind::SimpleBlur => Cow::Owned(GaussianBlurConfig::simple().apply(frame)),
        FilterKind::GaussianBlur => Cow::Owned(GaussianBlurConfig::from(params).apply(frame)),
        FilterKind::BoxBlur => Cow::Owned(BoxBlurConfig::new().apply(frame)),
        FilterKind::Sharpen => Cow::Owned(SharpenConfig::new().apply(frame)),
        FilterKind::EdgeDetect => Cow::Owned(EdgeDetectionConfig::new().apply(frame)),
    }
}
