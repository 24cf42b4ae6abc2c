use crate::{CameraError, CameraResult, FrameSource, pacing::FramePacer};
use derivative::Derivative;
use derive_setters::Setters;
use image::RgbaImage;
use nokhwa::{
    CallbackCamera,
    pixel_format::RgbAFormat,
    utils::{CameraIndex, RequestedFormat, RequestedFormatType, Resolution},
};
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct CameraConfig {
    #[derivative(Default(value = "None"))]
    #[setters[strip_option]]
    pub fps: Option<u32>,

    #[derivative(Default(value = "None"))]
    #[setters[strip_option]]
    pub width: Option<u32>,

    #[derivative(Default(value = "None"))]
    #[setters[strip_option]]
    pub height: Option<u32>,

    /// Empty or failed reads tolerated while waiting for the first frame
    #[derivative(Default(value = "90"))]
    pub max_empty_frames: u32,
}

#[derive(Debug)]
enum ReadStep {
    Frame(RgbaImage),
    Retry,
    Ended,
    GaveUp,
}

/// Retries empty reads only until the first frame arrives. Afterwards a
/// missing frame means the stream is gone.
#[derive(Debug, Clone)]
struct WarmUp {
    delivered: bool,
    attempts: u32,
    max_attempts: u32,
}

impl WarmUp {
    fn new(max_attempts: u32) -> Self {
        Self {
            delivered: false,
            attempts: 0,
            max_attempts: max_attempts.max(1),
        }
    }

    fn on_read(&mut self, read: CameraResult<RgbaImage>) -> ReadStep {
        match read {
            Ok(frame) if !frame.is_empty() => {
                self.delivered = true;
                ReadStep::Frame(frame)
            }
            _ if self.delivered => ReadStep::Ended,
            _ => {
                self.attempts += 1;
                if self.attempts >= self.max_attempts {
                    ReadStep::GaveUp
                } else {
                    ReadStep::Retry
                }
            }
        }
    }
}

pub struct CameraClient {
    camera: Option<CallbackCamera>,
    name: String,
    is_running: Arc<AtomicBool>,
    pacer: FramePacer,
    warm_up: WarmUp,
}

impl CameraClient {
    pub fn new(camera_index: CameraIndex, config: CameraConfig) -> CameraResult<Self> {
        let format = RequestedFormat::new::<RgbAFormat>(RequestedFormatType::AbsoluteHighestFrameRate);
        let name = format!("camera {camera_index}");

        let mut camera = CallbackCamera::new(camera_index, format, move |_| {})
            .map_err(|e| CameraError::DeviceUnavailable(format!("{name}: {e}")))?;

        if let Some(fps) = config.fps
            && let Err(e) = camera.set_frame_rate(fps)
        {
            log::warn!("camera set frame rate ({fps}) failed: {e}");
        }

        if let Some(w) = config.width
            && let Some(h) = config.height
            && let Err(e) = camera.set_resolution(Resolution::new(w, h))
        {
            log::warn!("camera set resolution ({w} x {h}) failed: {e}");
        }

        Ok(Self {
            camera: Some(camera),
            name,
            is_running: Arc::new(AtomicBool::new(false)),
            pacer: FramePacer::new(config.fps.unwrap_or_default()),
            warm_up: WarmUp::new(config.max_empty_frames),
        })
    }

    pub fn start(&mut self) -> CameraResult<()> {
        if let Some(ref mut camera) = self.camera {
            camera
                .open_stream()
                .map_err(|e| CameraError::StartError(e.to_string()))?;
            self.is_running.store(true, Ordering::Relaxed);
            log::info!("{} stream opened", self.name);
            Ok(())
        } else {
            Err(CameraError::DeviceUnavailable(format!(
                "{} not initialized",
                self.name
            )))
        }
    }

    pub fn stop(&mut self) -> CameraResult<()> {
        if let Some(ref mut camera) = self.camera {
            camera
                .stop_stream()
                .map_err(|e| CameraError::StopError(e.to_string()))?;
            self.is_running.store(false, Ordering::Relaxed);
            Ok(())
        } else {
            Err(CameraError::StopError("Camera not initialized".to_string()))
        }
    }

    pub fn last_frame(&self) -> CameraResult<RgbaImage> {
        match self.camera {
            Some(ref c) => {
                let buffer = c.last_frame()?;
                Ok(buffer.decode_image::<RgbAFormat>()?)
            }
            None => Err(CameraError::NoFrameAvailable),
        }
    }

    pub fn is_running(&self) -> bool {
        self.is_running.load(Ordering::Relaxed)
    }
}

impl FrameSource for CameraClient {
    fn next_frame(&mut self) -> CameraResult<RgbaImage> {
        if !self.is_running() {
            return Err(CameraError::StreamEnded);
        }

        loop {
            self.pacer.wait();

            let read = self.last_frame();
            if let Err(ref e) = read {
                log::debug!("{} read failed: {e}", self.name);
            }

            match self.warm_up.on_read(read) {
                ReadStep::Frame(frame) => return Ok(frame),
                ReadStep::Retry => continue,
                ReadStep::Ended => {
                    log::warn!("{} stopped delivering frames", self.name);
                    return Err(CameraError::StreamEnded);
                }
                ReadStep::GaveUp => {
                    log::warn!(
                        "{} delivered no frame in {} attempts",
                        self.name,
                        self.warm_up.max_attempts
                    );
                    return Err(CameraError::NoFrameAvailable);
                }
            }
        }
    }

    fn name(&self) -> String {
        self.name.clone()
    }
}

impl Drop for CameraClient {
    fn drop(&mut self) {
        if self.is_running() {
            _ = self.stop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn frame() -> RgbaImage {
        RgbaImage::from_pixel(2, 2, Rgba([1, 2, 3, 255]))
    }

    #[test]
    fn test_warm_up_retries_until_first_frame() {
        let mut warm_up = WarmUp::new(3);

        assert!(matches!(warm_up.on_read(Ok(RgbaImage::new(0, 0))), ReadStep::Retry));
        assert!(matches!(
            warm_up.on_read(Err(CameraError::NoFrameAvailable)),
            ReadStep::Retry
        ));
        assert!(matches!(warm_up.on_read(Ok(frame())), ReadStep::Frame(_)));
    }

    #[test]
    fn test_warm_up_gives_up() {
        let mut warm_up = WarmUp::new(2);

        assert!(matches!(warm_up.on_read(Ok(RgbaImage::new(0, 0))), ReadStep::Retry));
        assert!(matches!(warm_up.on_read(Ok(RgbaImage::new(0, 0))), ReadStep::GaveUp));
    }

    #[test]
    fn test_lost_frame_after_delivery_ends_stream() {
        let mut warm_up = WarmUp::new(90);

        assert!(matches!(warm_up.on_read(Ok(frame())), ReadStep::Frame(_)));
        assert!(matches!(warm_up.on_read(Ok(frame())), ReadStep::Frame(_)));
        assert!(matches!(
            warm_up.on_read(Err(CameraError::NoFrameAvailable)),
            ReadStep::Ended
        ));
        assert!(matches!(warm_up.on_read(Ok(RgbaImage::new(0, 0))), ReadStep::Ended));
    }
}
