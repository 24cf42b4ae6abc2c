use num_enum::{IntoPrimitive, TryFromPrimitive};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum FilterKind {
    #[default]
    None = 0,
    SimpleBlur,
    GaussianBlur,
    BoxBlur,
    Sharpen,
    EdgeDetect,
}

impl FilterKind {
    pub fn name(&self) -> &'static str {
        match self {
            FilterKind::None => "No Filter",
            FilterKind::SimpleBlur => "Simple Blur",
            FilterKind::GaussianBlur => "Gaussian Blur",
            FilterKind::BoxBlur => "Box Blur",
            FilterKind::Sharpen => "Sharpen",
            FilterKind::EdgeDetect => "Edge Detection",
        }
    }

    /// Upper-case label used by the on-screen status line.
    pub fn label(&self) -> &'static str {
        match self {
            FilterKind::None => "NONE",
            FilterKind::SimpleBlur => "BLUR",
            FilterKind::GaussianBlur => "GAUSSIAN BLUR",
            FilterKind::BoxBlur => "BOX_BLUR",
            FilterKind::Sharpen => "SHARPEN",
            FilterKind::EdgeDetect => "EDGE",
        }
    }

    /// Stable identifier used in file names and config values.
    pub fn slug(&self) -> &'static str {
        match self {
            FilterKind::None => "none",
            FilterKind::SimpleBlur => "blur",
            FilterKind::GaussianBlur => "gaussian",
            FilterKind::BoxBlur => "box_blur",
            FilterKind::Sharpen => "sharpen",
            FilterKind::EdgeDetect => "edge",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::all().iter().copied().find(|kind| kind.slug() == slug)
    }

    pub fn is_tunable(&self) -> bool {
        matches!(self, FilterKind::GaussianBlur)
    }

    pub fn all() -> &'static [FilterKind] {
        &[
            FilterKind::None,
            FilterKind::SimpleBlur,
            FilterKind::GaussianBlur,
            FilterKind::BoxBlur,
            FilterKind::Sharpen,
            FilterKind::EdgeDetect,
        ]
    }
}
