use crate::config::Config;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone, Default)]
#[command(
    name = "photo-filter",
    version,
    about = "Live camera filters with an on-frame control legend"
)]
pub struct Cli {
    /// Configuration file (default: the platform config directory)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Use a still image instead of the webcam
    #[arg(long)]
    pub image: Option<PathBuf>,

    /// Number of frames the still image is replayed for (default: endless)
    #[arg(long, requires = "image")]
    pub frames: Option<u64>,

    #[arg(long)]
    pub camera_index: Option<u32>,

    /// Whitespace separated commands, one consumed per frame, e.g. "g + + ] s q"
    #[arg(long, conflicts_with = "script_file")]
    pub script: Option<String>,

    /// File holding a command script
    #[arg(long)]
    pub script_file: Option<PathBuf>,

    /// Do not read commands from stdin
    #[arg(long)]
    pub no_stdin: bool,

    /// Write every presented frame as PNG into this directory
    #[arg(long)]
    pub present_dir: Option<PathBuf>,

    /// Only write every n-th presented frame
    #[arg(long)]
    pub present_every: Option<u32>,

    /// Directory for saved frames
    #[arg(long)]
    pub save_dir: Option<PathBuf>,

    /// Print the usable cameras and exit
    #[arg(long)]
    pub list_cameras: bool,

    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Flags given on the command line win over the config file.
    pub fn apply(&self, config: &mut Config) {
        if let Some(index) = self.camera_index {
            config.camera.index = index;
        }

        if let Some(dir) = &self.save_dir {
            config.output.save_dir = dir.clone();
        }

        if let Some(dir) = &self.present_dir {
            config.output.present_dir = Some(dir.clone());
        }

        if let Some(every) = self.present_every {
            config.output.present_every = every;
        }
    }
}
