use filter_session::{
    Command, CommandOutcome, FilterKind, FilterSession, GaussianParams, LegendMode,
    OverlayCompositor, OverlayMode, RgbaImage,
    overlay::{
        draw::PANEL,
        glyph,
        legend::{MENU_WIDTH, MINIMIZED_HINT},
    },
    preview::PREVIEW_FRAMES,
};
use image::Rgba;

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn gradient(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8, 255])
    })
}

#[test]
fn test_kernel_stays_odd_and_bounded() {
    init();
    let mut session = FilterSession::new();

    for _ in 0..20 {
        session.handle(Command::KernelInc);
        let k = session.params().kernel_size();
        assert_eq!(k % 2, 1);
        assert!((3..=51).contains(&k));
    }
    assert_eq!(session.params().kernel_size(), 51);

    for _ in 0..30 {
        session.handle(Command::KernelDec);
        let k = session.params().kernel_size();
        assert_eq!(k % 2, 1);
        assert!((3..=51).contains(&k));
    }
    assert_eq!(session.params().kernel_size(), 3);
}

#[test]
fn test_sigma_never_negative() {
    init();
    let mut session = FilterSession::new();

    for _ in 0..5 {
        session.handle(Command::SigmaDec);
        assert!(session.params().sigma() >= 0.0);
    }
    assert_eq!(session.params().sigma(), 0.0);

    session.handle(Command::SigmaInc);
    session.handle(Command::SigmaInc);
    session.handle(Command::SigmaDec);
    assert_eq!(session.params().sigma(), 1.0);
}

#[test]
fn test_first_sigma_step_previews() {
    init();
    let mut session = FilterSession::new();

    assert_eq!(session.handle(Command::SigmaInc), CommandOutcome::Continue);
    assert_eq!(session.params().sigma(), 1.0);
    assert_eq!(session.preview().message(), Some("Sigma: 1"));
    assert_eq!(session.preview().frames_remaining(), PREVIEW_FRAMES);
}

#[test]
fn test_preview_expires_after_sixty_renders() -> anyhow::Result<()> {
    init();
    let compositor = OverlayCompositor::default();
    let mut session = FilterSession::new().with_params(GaussianParams::new(15, 0.0)?);
    let frame = gradient(64, 48);

    session.handle(Command::KernelInc);
    for rendered in 0..PREVIEW_FRAMES {
        assert!(session.preview().is_active(), "inactive after {rendered} renders");
        session.render(&compositor, &frame);
    }
    assert!(!session.preview().is_active());

    Ok(())
}

#[test]
fn test_retrigger_resets_instead_of_extending() {
    init();
    let compositor = OverlayCompositor::default();
    let mut session = FilterSession::new();
    let frame = gradient(32, 32);

    session.handle(Command::KernelInc);
    for _ in 0..40 {
        session.render(&compositor, &frame);
    }
    assert_eq!(session.preview().frames_remaining(), PREVIEW_FRAMES - 40);

    session.handle(Command::KernelInc);
    assert_eq!(session.preview().frames_remaining(), PREVIEW_FRAMES);
    assert_eq!(session.preview().message(), Some("Kernel Size: 19"));
}

#[test]
fn test_selecting_filters_keeps_params() {
    init();
    let mut session = FilterSession::new();
    session.handle(Command::KernelInc);
    session.handle(Command::SigmaInc);
    let params = *session.params();

    for kind in FilterKind::all() {
        session.handle(Command::Select(*kind));
        assert_eq!(session.kind(), *kind);
        assert_eq!(*session.params(), params);
    }
}

#[test]
fn test_legend_only_outside_preview() {
    init();
    let compositor = OverlayCompositor::default();
    let mut session = FilterSession::new();
    let frame = RgbaImage::from_pixel(800, 600, Rgba([120, 120, 120, 255]));

    assert_eq!(
        compositor.plan(&session).mode,
        OverlayMode::Normal {
            legend: LegendMode::Expanded
        }
    );
    let normal = compositor.render(&frame, &frame, &session);
    // Menu border corner.
    assert_eq!(*normal.get_pixel(10, 300), Rgba([255, 255, 0, 255]));
    assert_eq!(*normal.get_pixel(10 + MENU_WIDTH - 1, 300), Rgba([255, 255, 0, 255]));

    session.handle(Command::SigmaInc);
    assert!(matches!(
        compositor.plan(&session).mode,
        OverlayMode::Preview { .. }
    ));
    let preview = compositor.render(&frame, &frame, &session);
    assert_ne!(*preview.get_pixel(10, 300), Rgba([255, 255, 0, 255]));
}

#[test]
fn test_minimized_tab_replaces_menu() {
    init();
    let compositor = OverlayCompositor::default();
    let mut session = FilterSession::new();
    let background = Rgba([120, 120, 120, 255]);
    let frame = RgbaImage::from_pixel(800, 600, background);
    let yellow = Rgba([255, 255, 0, 255]);

    assert!(!session.toggle_legend());
    assert!(!session.preview().is_active());
    let rendered = session.render(&compositor, &frame).composited;

    let (text_width, text_height) = glyph::text_size(MINIMIZED_HINT, 2);
    let (tab_width, tab_height) = (text_width + 20, text_height + 10);

    assert_eq!(*rendered.get_pixel(10, 10), yellow);
    assert_eq!(*rendered.get_pixel(10 + tab_width - 1, 10 + tab_height - 1), yellow);
    assert_eq!(*rendered.get_pixel(13, 13), PANEL);
    assert_eq!(*rendered.get_pixel(10 + tab_width, 10), background);
    assert_eq!(*rendered.get_pixel(10, 10 + tab_height), background);
    assert_eq!(*rendered.get_pixel(10, 300), background);
}

#[test]
fn test_readout_border_dims_during_fade() {
    init();
    let compositor = OverlayCompositor::default();
    let mut session = FilterSession::new();
    let frame = RgbaImage::from_pixel(640, 480, Rgba([120, 120, 120, 255]));

    session.handle(Command::KernelInc);
    let message = "Kernel Size: 17";

    // Readout box: text at scale 3, 30 px above the bottom, 20 px padding.
    let (text_width, text_height) = glyph::text_size(message, 3);
    let corner_x = (640 - text_width) / 2 - 20;
    let corner_y = 480 - (30 + text_height) - 20;

    let first = session.render(&compositor, &frame).composited;
    assert_eq!(*first.get_pixel(corner_x, corner_y), Rgba([255, 255, 0, 255]));

    for _ in 1..50 {
        session.render(&compositor, &frame);
    }
    assert_eq!(session.preview().frames_remaining(), 10);

    let faded = session.render(&compositor, &frame).composited;
    let border = *faded.get_pixel(corner_x + 1, corner_y + 1);
    assert!((126..=130).contains(&border[0]), "{border:?}");
    assert!((126..=130).contains(&border[1]), "{border:?}");
    assert_eq!(border[2], 0);
}

#[test]
fn test_render_does_not_touch_input() {
    init();
    let compositor = OverlayCompositor::default();
    let frame = gradient(200, 120);
    let copy = frame.clone();

    let mut session = FilterSession::new();
    for command in [
        Command::Select(FilterKind::GaussianBlur),
        Command::KernelInc,
        Command::Select(FilterKind::EdgeDetect),
        Command::ToggleLegend,
    ] {
        session.handle(command);
        let rendered = session.render(&compositor, &frame);
        assert_eq!(rendered.composited.dimensions(), frame.dimensions());
        assert_eq!(rendered.filtered.dimensions(), frame.dimensions());
    }

    assert_eq!(frame, copy);
}

#[test]
fn test_save_and_quit_are_reported() {
    init();
    let mut session = FilterSession::new();
    assert_eq!(session.handle(Command::Save), CommandOutcome::Save);
    assert_eq!(session.handle(Command::Quit), CommandOutcome::Quit);
    assert_eq!(session.handle("esc".parse().unwrap()), CommandOutcome::Quit);
}

#[test]
fn test_saved_frame_has_no_overlay() {
    init();
    let compositor = OverlayCompositor::default();
    let mut session = FilterSession::new();
    let frame = RgbaImage::from_pixel(400, 300, Rgba([10, 20, 30, 255]));

    let rendered = session.render(&compositor, &frame);
    assert_eq!(*rendered.filtered, frame);
    assert_ne!(rendered.composited, frame);
}
