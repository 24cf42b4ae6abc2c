pub mod command;
pub mod overlay;
pub mod preview;
pub mod session;

pub use command::{Command, CommandOutcome};
pub use frame_filter::{FilterKind, GaussianParams, RgbaImage};
pub use overlay::{LegendMode, OverlayCompositor, OverlayConfig, OverlayMode, OverlayPlan};
pub use preview::PreviewState;
pub use session::{FilterSession, RenderedFrame};

pub type SessionResult<T> = Result<T, SessionError>;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SessionError {
    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    #[error("Filter error: {0}")]
    Filter(#[from] frame_filter::FilterError),
}
