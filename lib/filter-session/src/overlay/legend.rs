use super::{
    OverlayConfig,
    draw::{self, PANEL, Region, WHITE},
    glyph,
};
use crate::Command;
use frame_filter::FilterKind;
use image::{Rgba, RgbaImage};

pub const MENU_X: i32 = 10;
pub const MENU_Y: i32 = 10;
pub const MENU_WIDTH: u32 = 380;
pub const PADDING: u32 = 15;
pub const LINE_HEIGHT: u32 = 22;
pub const HEADER_HEIGHT: u32 = 35;
pub const KEY_WIDTH: u32 = 35;
pub const MINIMIZED_HINT: &str = "Press 'L' for Menu";

const SECTION_TITLE_HEIGHT: u32 = 30;
const SECTION_GAP: u32 = 10;
const KEY_HEIGHT: u32 = 18;

const MENU_FILL: Rgba<u8> = Rgba([30, 30, 30, 255]);
const HEADER_FILL: Rgba<u8> = Rgba([180, 180, 0, 255]);
const KEY_FILL: Rgba<u8> = Rgba([60, 60, 60, 255]);
const SECTION_COLOR: Rgba<u8> = Rgba([255, 200, 100, 255]);
const ITEM_COLOR: Rgba<u8> = Rgba([220, 220, 220, 255]);
const HIGHLIGHT_COLOR: Rgba<u8> = Rgba([100, 255, 100, 255]);
const TUNING_COLOR: Rgba<u8> = Rgba([100, 200, 255, 255]);

#[derive(Debug, Clone, PartialEq)]
pub struct LegendItem {
    pub key: &'static str,
    pub label: &'static str,
    pub color: Rgba<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendSection {
    pub title: &'static str,
    pub items: Vec<LegendItem>,
}

/// Menu contents. Filter rows come from the key bindings themselves.
pub fn sections() -> Vec<LegendSection> {
    let filters = FilterKind::all()
        .iter()
        .map(|kind| LegendItem {
            key: Command::Select(*kind).key_hint(),
            label: kind.name(),
            color: if kind.is_tunable() {
                HIGHLIGHT_COLOR
            } else {
                ITEM_COLOR
            },
        })
        .collect();

    vec![
        LegendSection {
            title: "FILTERS",
            items: filters,
        },
        LegendSection {
            title: "GAUSSIAN CONTROLS",
            items: vec![
                LegendItem {
                    key: "+/-",
                    label: "Kernel Size",
                    color: TUNING_COLOR,
                },
                LegendItem {
                    key: "[ ]",
                    label: "Sigma Value",
                    color: TUNING_COLOR,
                },
            ],
        },
        LegendSection {
            title: "COMMANDS",
            items: [
                (Command::ToggleLegend, "Toggle Menu"),
                (Command::Save, "Save Frame"),
                (Command::Quit, "Quit"),
            ]
            .into_iter()
            .map(|(command, label)| LegendItem {
                key: command.key_hint(),
                label,
                color: ITEM_COLOR,
            })
            .collect(),
        },
    ]
}

pub fn menu_height(sections: &[LegendSection]) -> u32 {
    sections.iter().fold(PADDING * 2, |acc, section| {
        acc + SECTION_TITLE_HEIGHT + section.items.len() as u32 * LINE_HEIGHT + SECTION_GAP
    })
}

pub fn draw_expanded(image: &mut RgbaImage, config: &OverlayConfig) {
    let sections = sections();
    let menu = Region::new(MENU_X, MENU_Y, MENU_WIDTH, menu_height(&sections));

    draw::blend_rect(image, menu, MENU_FILL, config.panel_opacity);
    draw::stroke_rect(image, menu, 2, config.accent_color);

    draw::fill_rect(
        image,
        Region::new(MENU_X, MENU_Y, MENU_WIDTH, HEADER_HEIGHT),
        HEADER_FILL,
    );
    let (_, title_height) = glyph::text_size("CONTROLS MENU", 2);
    glyph::draw_text(
        image,
        "CONTROLS MENU",
        MENU_X + PADDING as i32,
        MENU_Y + ((HEADER_HEIGHT - title_height) / 2) as i32,
        2,
        WHITE,
    );

    // `y` is the text baseline of the current row.
    let left = MENU_X + PADDING as i32;
    let mut y = MENU_Y + (HEADER_HEIGHT + PADDING) as i32;

    for section in &sections {
        glyph::draw_text(image, section.title, left, y - 14, 2, SECTION_COLOR);
        y += 25;

        for item in &section.items {
            let badge = Region::new(left, y - 15, KEY_WIDTH, KEY_HEIGHT);
            draw::fill_rect(image, badge, KEY_FILL);
            draw::stroke_rect(image, badge, 1, draw::GREY);

            let (key_width, key_height) = glyph::text_size(item.key, 1);
            glyph::draw_text(
                image,
                item.key,
                left + (KEY_WIDTH.saturating_sub(key_width) / 2) as i32,
                y - 15 + ((KEY_HEIGHT - key_height) / 2) as i32,
                1,
                WHITE,
            );

            glyph::draw_text(
                image,
                item.label,
                left + (KEY_WIDTH + 10) as i32,
                y - 13,
                2,
                item.color,
            );

            y += LINE_HEIGHT as i32;
        }

        y += SECTION_GAP as i32;
    }
}

pub fn draw_minimized(image: &mut RgbaImage, config: &OverlayConfig) {
    let (text_width, text_height) = glyph::text_size(MINIMIZED_HINT, 2);
    let tab = Region::new(MENU_X, MENU_Y, text_width + 20, text_height + 10);

    draw::fill_rect(image, tab, PANEL);
    draw::stroke_rect(image, tab, 2, config.accent_color);
    glyph::draw_text(
        image,
        MINIMIZED_HINT,
        MENU_X + 10,
        MENU_Y + 5,
        2,
        config.accent_color,
    );
}
