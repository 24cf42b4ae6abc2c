use crate::{Command, CommandOutcome, OverlayCompositor, PreviewState};
use frame_filter::{FilterKind, GaussianParams, RgbaImage, transform};
use std::borrow::Cow;

/// Output of one render cycle.
#[derive(Debug, Clone)]
pub struct RenderedFrame<'a> {
    /// The filter output without any overlay. This is what gets saved.
    pub filtered: Cow<'a, RgbaImage>,

    /// The frame to show on screen.
    pub composited: RgbaImage,
}

/// Owns the filter selection, the Gaussian parameters, the preview timer and
/// the legend flag. Command handlers are the only writers.
#[derive(Debug, Clone)]
pub struct FilterSession {
    kind: FilterKind,
    params: GaussianParams,
    preview: PreviewState,
    legend_visible: bool,
}

impl Default for FilterSession {
    fn default() -> Self {
        Self {
            kind: FilterKind::None,
            params: GaussianParams::default(),
            preview: PreviewState::Inactive,
            legend_visible: true,
        }
    }
}

impl FilterSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filter(mut self, kind: FilterKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_params(mut self, params: GaussianParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_legend_visible(mut self, visible: bool) -> Self {
        self.legend_visible = visible;
        self
    }

    pub fn kind(&self) -> FilterKind {
        self.kind
    }

    pub fn params(&self) -> &GaussianParams {
        &self.params
    }

    pub fn preview(&self) -> &PreviewState {
        &self.preview
    }

    pub fn legend_visible(&self) -> bool {
        self.legend_visible
    }

    pub fn select_filter(&mut self, kind: FilterKind) {
        self.kind = kind;

        if kind == FilterKind::GaussianBlur {
            log::info!(
                "Filter: {} (Kernel: {}, Sigma: {})",
                kind.name(),
                self.params.kernel_size(),
                self.params.sigma()
            );
        } else {
            log::info!("Filter: {}", kind.name());
        }
    }

    pub fn increase_kernel_size(&mut self) -> bool {
        let changed = self.params.grow_kernel();
        if changed {
            self.kernel_changed();
        }
        changed
    }

    pub fn decrease_kernel_size(&mut self) -> bool {
        let changed = self.params.shrink_kernel();
        if changed {
            self.kernel_changed();
        }
        changed
    }

    pub fn increase_sigma(&mut self) -> bool {
        let changed = self.params.raise_sigma();
        if changed {
            self.sigma_changed();
        }
        changed
    }

    pub fn decrease_sigma(&mut self) -> bool {
        let changed = self.params.lower_sigma();
        if changed {
            self.sigma_changed();
        }
        changed
    }

    /// Flip the legend and return the new visibility.
    pub fn toggle_legend(&mut self) -> bool {
        self.legend_visible = !self.legend_visible;
        log::info!("Legend: {}", if self.legend_visible { "ON" } else { "OFF" });
        self.legend_visible
    }

    fn kernel_changed(&mut self) {
        log::info!("Gaussian kernel size: {}", self.params.kernel_size());
        self.preview
            .trigger(format!("Kernel Size: {}", self.params.kernel_size()));
    }

    fn sigma_changed(&mut self) {
        log::info!("Gaussian sigma: {}", self.params.sigma());
        self.preview.trigger(format!("Sigma: {}", self.params.sigma()));
    }

    pub fn handle(&mut self, command: Command) -> CommandOutcome {
        log::debug!("handle command: {command}");

        match command {
            Command::Select(kind) => self.select_filter(kind),
            Command::KernelInc => {
                self.increase_kernel_size();
            }
            Command::KernelDec => {
                self.decrease_kernel_size();
            }
            Command::SigmaInc => {
                self.increase_sigma();
            }
            Command::SigmaDec => {
                self.decrease_sigma();
            }
            Command::ToggleLegend => {
                self.toggle_legend();
            }
            Command::Save => return CommandOutcome::Save,
            Command::Quit => return CommandOutcome::Quit,
        }

        CommandOutcome::Continue
    }

    /// Run the active filter over `frame`.
    pub fn apply<'a>(&self, frame: &'a RgbaImage) -> Cow<'a, RgbaImage> {
        transform(frame, self.kind, &self.params)
    }

    /// One full cycle: filter, composite, then advance the preview timer.
    pub fn render<'a>(
        &mut self,
        compositor: &OverlayCompositor,
        frame: &'a RgbaImage,
    ) -> RenderedFrame<'a> {
        let filtered = self.apply(frame);
        let composited = compositor.render(frame, &filtered, self);
        self.preview.tick();

        RenderedFrame {
            filtered,
            composited,
        }
    }

    pub fn status_text(&self) -> String {
        match self.kind {
            FilterKind::GaussianBlur => format!(
                "Filter: {} (K:{}, S:{})",
                self.kind.label(),
                self.params.kernel_size(),
                self.params.sigma()
            ),
            kind => format!("Filter: {}", kind.label()),
        }
    }

    /// File stem for a saved frame, e.g. `photo_filter_gaussian_k15_s0_20250101_120000`.
    pub fn snapshot_name(&self, timestamp: &str) -> String {
        match self.kind {
            FilterKind::GaussianBlur => format!(
                "photo_filter_{}_k{}_s{}_{timestamp}",
                self.kind.slug(),
                self.params.kernel_size(),
                self.params.sigma()
            ),
            kind => format!("photo_filter_{}_{timestamp}", kind.slug()),
        }
    }
}
