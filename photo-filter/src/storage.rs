use anyhow::{Context, Result};
use image::RgbaImage;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Saves filtered frames as PNG files under one directory.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    dir: PathBuf,
}

impl SnapshotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write `frame` as `<stem>.png`. Two saves within the same second get a
    /// numeric suffix instead of overwriting each other.
    pub fn save(&self, stem: &str, frame: &RgbaImage) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("create save dir {} failed", self.dir.display()))?;

        let mut path = self.dir.join(format!("{stem}.png"));
        let mut n = 1;
        while path.exists() {
            path = self.dir.join(format!("{stem}_{n}.png"));
            n += 1;
        }

        frame
            .save(&path)
            .with_context(|| format!("save {} failed", path.display()))?;

        Ok(path)
    }
}
