pub mod cli;
pub mod config;
pub mod display;
pub mod host;
pub mod input;
pub mod storage;

use anyhow::{Context, Result};
use camera::{CameraClient, CameraConfig, FrameSource, StillImageSource, camera_info};
use cli::Cli;
use config::Config;
use display::{FrameDump, FrameSink, NullSink};
use filter_session::{FilterSession, OverlayCompositor};
use host::{Host, SessionSummary};
use input::{CommandSource, NoCommands, ReaderCommands, ScriptedCommands};
use std::fs;
use storage::SnapshotStore;

pub fn init_logger(verbose: bool) {
    use std::io::Write;

    let level = if verbose { "debug" } else { "info" };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .filter_module("nokhwa", log::LevelFilter::Warn)
        .format(|buf, record| {
            let style = buf.default_level_style(record.level());
            let ts = chrono::Local::now().format("%H:%M:%S");

            writeln!(
                buf,
                "[{} {style}{}{style:#} {} {}] {}",
                ts,
                record.level(),
                record
                    .file()
                    .unwrap_or("None")
                    .split('/')
                    .next_back()
                    .unwrap_or("None"),
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .init();
}

pub fn list_cameras() {
    let cameras = camera_info::query_available_cameras();
    if cameras.is_empty() {
        println!("No working cameras found");
        return;
    }

    for camera in &cameras {
        println!("{camera}");
    }
}

/// Run a full session from command line flags and the config file.
pub fn run(cli: Cli) -> Result<SessionSummary> {
    let mut config = Config::init(cli.config.clone())?;
    cli.apply(&mut config);

    let session = FilterSession::new()
        .with_filter(config.session.start_filter())
        .with_legend_visible(config.session.show_legend);

    let mut host = Host::new(
        session,
        OverlayCompositor::default(),
        open_source(&cli, &config)?,
        open_commands(&cli)?,
        open_sink(&config)?,
        SnapshotStore::new(&config.output.save_dir),
    );

    host.run()
}

fn open_source(cli: &Cli, config: &Config) -> Result<Box<dyn FrameSource>> {
    if let Some(path) = &cli.image {
        let mut source = StillImageSource::open(path)?.with_fps(config.camera.fps);
        if let Some(frames) = cli.frames {
            source = source.with_frame_limit(frames);
        }
        return Ok(Box::new(source));
    }

    camera::init();

    let index = camera_info::query_camera_index(config.camera.index)
        .with_context(|| format!("camera {} unavailable", config.camera.index))?;

    let camera_config = CameraConfig::default()
        .with_fps(config.camera.fps)
        .with_width(config.camera.width)
        .with_height(config.camera.height);

    let mut client = CameraClient::new(index, camera_config)?;
    client.start()?;

    Ok(Box::new(client))
}

fn open_commands(cli: &Cli) -> Result<Box<dyn CommandSource>> {
    if let Some(script) = &cli.script {
        return Ok(Box::new(ScriptedCommands::parse(script)));
    }

    if let Some(path) = &cli.script_file {
        let script = fs::read_to_string(path)
            .with_context(|| format!("read script {} failed", path.display()))?;
        return Ok(Box::new(ScriptedCommands::parse(&script)));
    }

    if cli.no_stdin {
        return Ok(Box::new(NoCommands));
    }

    log::info!("reading commands from stdin (e.g. `g`, `+`, `sigma-inc`, `s`, `q`)");
    Ok(Box::new(ReaderCommands::stdin()))
}

fn open_sink(config: &Config) -> Result<Box<dyn FrameSink>> {
    match &config.output.present_dir {
        Some(dir) => Ok(Box::new(FrameDump::new(
            dir.clone(),
            config.output.present_every,
        )?)),
        None => Ok(Box::new(NullSink)),
    }
}
