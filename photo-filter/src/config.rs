use anyhow::{Context, Result, bail};
use derivative::Derivative;
use frame_filter::FilterKind;
use platform_dirs::{AppDirs, UserDirs};
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

pub const APP_NAME: &str = "photo-filter";

#[derive(Serialize, Deserialize, Default, Debug, Clone)]
pub struct Config {
    #[serde(skip)]
    pub config_path: PathBuf,

    #[serde(skip)]
    pub is_first_run: bool,

    #[serde(default)]
    pub camera: Camera,

    #[serde(default)]
    pub output: Output,

    #[serde(default)]
    pub session: Session,
}

#[derive(Serialize, Deserialize, Debug, Clone, Derivative)]
#[derivative(Default)]
#[serde(default)]
pub struct Camera {
    pub index: u32,

    #[derivative(Default(value = "1280"))]
    pub width: u32,

    #[derivative(Default(value = "720"))]
    pub height: u32,

    #[derivative(Default(value = "30"))]
    pub fps: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone, Derivative)]
#[derivative(Default)]
#[serde(default)]
pub struct Output {
    #[derivative(Default(value = "default_save_dir()"))]
    pub save_dir: PathBuf,

    /// Where displayed frames are written. Nothing is written when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub present_dir: Option<PathBuf>,

    #[derivative(Default(value = "1"))]
    pub present_every: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone, Derivative)]
#[derivative(Default)]
#[serde(default)]
pub struct Session {
    #[derivative(Default(value = "\"none\".to_string()"))]
    pub start_filter: String,

    #[derivative(Default(value = "true"))]
    pub show_legend: bool,
}

impl Session {
    pub fn start_filter(&self) -> FilterKind {
        match FilterKind::from_slug(self.start_filter.trim()) {
            Some(kind) => kind,
            None => {
                log::warn!(
                    "unknown start filter `{}`, falling back to `none`",
                    self.start_filter
                );
                FilterKind::None
            }
        }
    }
}

fn default_save_dir() -> PathBuf {
    UserDirs::new()
        .map(|dirs| dirs.download_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

pub fn default_config_path() -> Result<PathBuf> {
    let app_dirs = AppDirs::new(Some(APP_NAME), true)
        .with_context(|| "no platform config directory")?;

    Ok(app_dirs.config_dir.join(format!("{APP_NAME}.toml")))
}

impl Config {
    /// Load `path`, or the platform default location when `None`.
    pub fn init(path: Option<PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(path) => path,
            None => default_config_path()?,
        };

        if let Some(dir) = config_path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("create config dir {} failed", dir.display()))?;
        }

        let mut config = Config {
            config_path,
            ..Default::default()
        };
        config.load().with_context(|| "load config file failed")?;
        log::debug!("{:?}", config);

        Ok(config)
    }

    /// A missing file is created from the defaults. A file that does not
    /// parse is copied to `*.bak` and replaced by the defaults.
    fn load(&mut self) -> Result<()> {
        match fs::read_to_string(&self.config_path) {
            Ok(text) => match toml::from_str::<Config>(&text) {
                Ok(mut c) => {
                    c.config_path = self.config_path.clone();
                    c.is_first_run = self.is_first_run;
                    *self = c;

                    Ok(())
                }
                Err(e) => {
                    log::warn!(
                        "parse {} failed, restoring defaults: {e}",
                        self.config_path.display()
                    );
                    self.is_first_run = true;

                    if let Some(bak_file) = self.config_path.as_os_str().to_str() {
                        _ = fs::copy(&self.config_path, format!("{bak_file}.bak"));
                    }

                    self.save()
                }
            },
            Err(_) => {
                self.is_first_run = true;
                self.save()
            }
        }
    }

    pub fn save(&self) -> Result<()> {
        match toml::to_string_pretty(self) {
            Ok(text) => Ok(fs::write(&self.config_path, text)
                .with_context(|| "save config failed".to_string())?),
            Err(e) => bail!(format!("convert config from toml format failed. {e:?}")),
        }
    }
}
