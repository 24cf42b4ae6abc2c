use anyhow::{Context, Result};
use image::RgbaImage;
use std::{fs, path::PathBuf};

/// Receives every composited frame.
pub trait FrameSink {
    fn present(&mut self, frame: &RgbaImage) -> Result<()>;
}

/// Writes every `every`-th presented frame as `frame_000042.png`.
#[derive(Debug, Clone)]
pub struct FrameDump {
    dir: PathBuf,
    every: u64,
    presented: u64,
}

impl FrameDump {
    pub fn new(dir: impl Into<PathBuf>, every: u32) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("create present dir {} failed", dir.display()))?;

        Ok(Self {
            dir,
            every: every.max(1) as u64,
            presented: 0,
        })
    }
}

impl FrameSink for FrameDump {
    fn present(&mut self, frame: &RgbaImage) -> Result<()> {
        let index = self.presented;
        self.presented += 1;

        if index % self.every != 0 {
            return Ok(());
        }

        let path = self.dir.join(format!("frame_{index:06}.png"));
        frame
            .save(&path)
            .with_context(|| format!("write {} failed", path.display()))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl FrameSink for NullSink {
    fn present(&mut self, frame: &RgbaImage) -> Result<()> {
        log::trace!("present {}x{}", frame.width(), frame.height());
        Ok(())
    }
}
