/// Rendered frames a preview stays on screen after a parameter change.
pub const PREVIEW_FRAMES: u32 = 60;

/// The border fades out over the last `FADE_WINDOW` frames of a preview.
pub const FADE_WINDOW: u32 = 20;

/// Transient "parameter changed" preview.
///
/// An `Active` preview always has at least one frame left; the tick that
/// would bring it to zero moves it back to `Inactive`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PreviewState {
    #[default]
    Inactive,
    Active {
        message: String,
        frames_remaining: u32,
    },
}

impl PreviewState {
    /// Start a fresh preview. A running countdown is replaced, never extended.
    pub fn trigger(&mut self, message: impl Into<String>) {
        *self = PreviewState::Active {
            message: message.into(),
            frames_remaining: PREVIEW_FRAMES,
        };
    }

    /// Advance by one rendered frame.
    pub fn tick(&mut self) {
        if let PreviewState::Active {
            frames_remaining, ..
        } = self
        {
            *frames_remaining = frames_remaining.saturating_sub(1);
            if *frames_remaining == 0 {
                *self = PreviewState::Inactive;
            }
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, PreviewState::Active { .. })
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            PreviewState::Active { message, .. } => Some(message),
            PreviewState::Inactive => None,
        }
    }

    pub fn frames_remaining(&self) -> u32 {
        match self {
            PreviewState::Active {
                frames_remaining, ..
            } => *frames_remaining,
            PreviewState::Inactive => 0,
        }
    }

    /// Border intensity in `[0, 1]`: full until the fade window, then linear.
    pub fn fade(&self) -> f32 {
        (self.frames_remaining() as f32 / FADE_WINDOW as f32).clamp(0.0, 1.0)
    }
}
