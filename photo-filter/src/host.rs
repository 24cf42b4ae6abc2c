use crate::{display::FrameSink, input::CommandSource, storage::SnapshotStore};
use anyhow::{Context, Result};
use camera::{CameraError, FrameSource};
use filter_session::{CommandOutcome, FilterSession, OverlayCompositor};
use std::path::PathBuf;

pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    Quit,
    StreamEnded,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    pub frames: u64,
    pub saved: Vec<PathBuf>,
    pub stop: StopReason,
}

/// Drives one session: pull a frame, render it, present it, then apply at
/// most one pending command.
///
/// A source that fails before its first frame aborts the run. Once frames
/// have flowed, losing the source ends the session like a quit.
pub struct Host {
    session: FilterSession,
    compositor: OverlayCompositor,
    source: Box<dyn FrameSource>,
    commands: Box<dyn CommandSource>,
    sink: Box<dyn FrameSink>,
    store: SnapshotStore,
}

impl Host {
    pub fn new(
        session: FilterSession,
        compositor: OverlayCompositor,
        source: Box<dyn FrameSource>,
        commands: Box<dyn CommandSource>,
        sink: Box<dyn FrameSink>,
        store: SnapshotStore,
    ) -> Self {
        Self {
            session,
            compositor,
            source,
            commands,
            sink,
            store,
        }
    }

    pub fn session(&self) -> &FilterSession {
        &self.session
    }

    pub fn run(&mut self) -> Result<SessionSummary> {
        log::info!("frame source: {}", self.source.name());

        let mut frames = 0;
        let mut saved = Vec::new();

        let stop = loop {
            let frame = match self.source.next_frame() {
                Ok(frame) => frame,
                Err(CameraError::StreamEnded) => break StopReason::StreamEnded,
                Err(e) if frames > 0 => {
                    log::warn!("{} lost after {frames} frames: {e}", self.source.name());
                    break StopReason::StreamEnded;
                }
                Err(e) => {
                    return Err(e).with_context(|| {
                        format!("read frame {frames} from {} failed", self.source.name())
                    });
                }
            };

            let rendered = self.session.render(&self.compositor, &frame);
            frames += 1;

            if let Err(e) = self.sink.present(&rendered.composited) {
                log::warn!("present frame failed: {e:?}");
            }

            let Some(command) = self.commands.poll() else {
                continue;
            };

            match self.session.handle(command) {
                CommandOutcome::Continue => {}
                CommandOutcome::Save => {
                    let timestamp = chrono::Local::now().format(TIMESTAMP_FORMAT).to_string();
                    let stem = self.session.snapshot_name(&timestamp);

                    match self.store.save(&stem, &rendered.filtered) {
                        Ok(path) => {
                            log::info!("Saved: {}", path.display());
                            saved.push(path);
                        }
                        Err(e) => log::warn!("save frame failed: {e:?}"),
                    }
                }
                CommandOutcome::Quit => break StopReason::Quit,
            }
        };

        let summary = SessionSummary {
            frames,
            saved,
            stop,
        };
        log::info!(
            "session finished after {} frames ({:?}), {} saved",
            summary.frames,
            summary.stop,
            summary.saved.len()
        );

        Ok(summary)
    }
}
