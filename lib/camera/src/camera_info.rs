use crate::{CameraError, CameraResult};
use nokhwa::{
    CallbackCamera, query,
    utils::{ApiBackend, CameraIndex, RequestedFormat, RequestedFormatType},
};
use std::fmt;

#[derive(Debug, Clone)]
pub struct CameraInfo {
    pub index: String,
    pub name: String,
    pub description: String,
}

impl fmt::Display for CameraInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} ({})", self.index, self.name, self.description)
    }
}

/// Cameras that can actually open a stream.
pub fn query_available_cameras() -> Vec<CameraInfo> {
    let cameras = match query(ApiBackend::Auto) {
        Ok(cameras) => cameras,
        Err(e) => {
            log::warn!("query cameras failed: {e}");
            return Vec::new();
        }
    };

    cameras
        .into_iter()
        .filter_map(|camera| match verify_camera(camera.index().clone()) {
            true => Some(CameraInfo {
                index: camera.index().to_string(),
                name: camera.human_name(),
                description: camera.description().to_string(),
            }),
            false => None,
        })
        .collect()
}

/// Resolve a numeric device index against the cameras the backend reports.
pub fn query_camera_index(index: u32) -> CameraResult<CameraIndex> {
    let cameras = query(ApiBackend::Auto).map_err(|e| CameraError::QueryError(e.to_string()))?;

    if cameras.is_empty() {
        return Err(CameraError::DeviceUnavailable("no camera found".to_string()));
    }

    let wanted = CameraIndex::Index(index);
    cameras
        .into_iter()
        .map(|camera| camera.index().clone())
        .find(|camera_index| *camera_index == wanted)
        .ok_or(CameraError::InvalidCameraIndex(index))
}

fn verify_camera(index: CameraIndex) -> bool {
    let format = RequestedFormat::new::<nokhwa::pixel_format::RgbAFormat>(
        RequestedFormatType::AbsoluteHighestFrameRate,
    );

    match CallbackCamera::new(index, format, |_| {}) {
        Ok(mut camera) => match camera.open_stream() {
            Ok(_) => {
                _ = camera.stop_stream();
                true
            }
            Err(_) => false,
        },
        Err(_) => false,
    }
}
