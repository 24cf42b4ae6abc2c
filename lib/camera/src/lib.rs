pub mod camera_client;
pub mod camera_info;
pub mod pacing;
pub mod still_image;

pub use camera_client::{CameraClient, CameraConfig};
pub use camera_info::CameraInfo;
pub use image::{Rgba, RgbaImage};
pub use still_image::StillImageSource;

pub type CameraResult<T> = Result<T, CameraError>;

#[derive(thiserror::Error, Debug)]
pub enum CameraError {
    #[error("Frame source unavailable: {0}")]
    DeviceUnavailable(String),

    #[error("Frame stream ended")]
    StreamEnded,

    #[error("No frame available")]
    NoFrameAvailable,

    #[error("Failed to query cameras: {0}")]
    QueryError(String),

    #[error("Failed to start camera: {0}")]
    StartError(String),

    #[error("Failed to stop camera: {0}")]
    StopError(String),

    #[error("Invalid camera index: {0}")]
    InvalidCameraIndex(u32),

    #[error("Image error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Camera error: {0}")]
    NokhwaError(#[from] nokhwa::NokhwaError),
}

/// Anything that hands out RGBA frames one at a time.
pub trait FrameSource {
    /// Block until the next frame is due. `Err(CameraError::StreamEnded)`
    /// marks a normal end of stream.
    fn next_frame(&mut self) -> CameraResult<RgbaImage>;

    fn name(&self) -> String;
}

pub fn init() {
    #[cfg(target_os = "macos")]
    nokhwa::nokhwa_initialize(|granted| {
        log::info!("User said {} for nokhwa", granted);
    });
}
