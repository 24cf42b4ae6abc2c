use crate::{CameraError, CameraResult, FrameSource, pacing::FramePacer};
use image::RgbaImage;
use std::path::Path;

/// Replays one decoded image as a frame stream.
#[derive(Debug, Clone)]
pub struct StillImageSource {
    frame: RgbaImage,
    name: String,
    remaining: Option<u64>,
    pacer: FramePacer,
}

impl StillImageSource {
    /// Endless, unpaced stream of `frame`.
    pub fn new(frame: RgbaImage) -> Self {
        Self {
            frame,
            name: "still image".to_string(),
            remaining: None,
            pacer: FramePacer::new(0),
        }
    }

    pub fn open(path: impl AsRef<Path>) -> CameraResult<Self> {
        let path = path.as_ref();
        let frame = image::open(path)
            .map_err(|e| CameraError::DeviceUnavailable(format!("{}: {e}", path.display())))?
            .to_rgba8();

        if frame.width() == 0 || frame.height() == 0 {
            return Err(CameraError::DeviceUnavailable(format!(
                "{}: empty image",
                path.display()
            )));
        }

        log::info!(
            "loaded {} ({}x{})",
            path.display(),
            frame.width(),
            frame.height()
        );

        Ok(Self {
            name: path.display().to_string(),
            ..Self::new(frame)
        })
    }

    /// End the stream after `frames` frames.
    pub fn with_frame_limit(mut self, frames: u64) -> Self {
        self.remaining = Some(frames);
        self
    }

    pub fn with_fps(mut self, fps: u32) -> Self {
        self.pacer = FramePacer::new(fps);
        self
    }

    pub fn remaining(&self) -> Option<u64> {
        self.remaining
    }
}

impl FrameSource for StillImageSource {
    fn next_frame(&mut self) -> CameraResult<RgbaImage> {
        if let Some(remaining) = self.remaining.as_mut() {
            if *remaining == 0 {
                return Err(CameraError::StreamEnded);
            }
            *remaining -= 1;
        }

        self.pacer.wait();
        Ok(self.frame.clone())
    }

    fn name(&self) -> String {
        self.name.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_frame_limit_ends_stream() {
        let frame = RgbaImage::from_pixel(4, 3, Rgba([1, 2, 3, 255]));
        let mut source = StillImageSource::new(frame.clone()).with_frame_limit(2);

        assert_eq!(source.next_frame().unwrap(), frame);
        assert_eq!(source.next_frame().unwrap(), frame);
        assert!(matches!(source.next_frame(), Err(CameraError::StreamEnded)));
        assert!(matches!(source.next_frame(), Err(CameraError::StreamEnded)));
    }

    #[test]
    fn test_unbounded_stream() {
        let mut source = StillImageSource::new(RgbaImage::new(2, 2));
        for _ in 0..100 {
            assert!(source.next_frame().is_ok());
        }
        assert_eq!(source.remaining(), None);
    }

    #[test]
    fn test_open_missing_file() {
        let result = StillImageSource::open("/definitely/not/here.png");
        assert!(matches!(result, Err(CameraError::DeviceUnavailable(_))));
    }
}
