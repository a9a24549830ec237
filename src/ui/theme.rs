//! UI theme definitions.
//!
//! Both themes share the report's lavender accent. The light theme sits on
//! the cream page colour the dashboard has always used.

use egui::{Color32, Ui, Visuals};

use crate::storage::config::HexColor;

/// Theme configuration for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    Dark,
    #[default]
    Light,
}

/// Colours for one theme.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub page: Color32,
    pub panel: Color32,
    pub card: Color32,
    pub hovered: Color32,
    pub text: Color32,
    pub text_weak: Color32,
    pub border: Color32,
    pub accent: Color32,
    pub success: Color32,
    pub error: Color32,
}

const DARK: Palette = Palette {
    page: Color32::from_rgb(20, 20, 30),
    panel: Color32::from_rgb(30, 30, 44),
    card: Color32::from_rgb(42, 42, 60),
    hovered: Color32::from_rgb(56, 56, 80),
    text: Color32::from_rgb(236, 236, 246),
    text_weak: Color32::from_rgb(160, 160, 184),
    border: Color32::from_rgb(66, 66, 92),
    accent: Color32::from_rgb(138, 138, 196),
    success: Color32::from_rgb(92, 190, 120),
    error: Color32::from_rgb(236, 96, 84),
};

const LIGHT: Palette = Palette {
    page: Color32::from_rgb(255, 242, 224),
    panel: Color32::from_rgb(255, 248, 238),
    card: Color32::from_rgb(192, 201, 238),
    hovered: Color32::from_rgb(172, 182, 228),
    text: Color32::from_rgb(34, 30, 48),
    text_weak: Color32::from_rgb(98, 94, 116),
    border: Color32::from_rgb(214, 206, 226),
    accent: Color32::from_rgb(138, 138, 196),
    success: Color32::from_rgb(30, 122, 60),
    error: Color32::from_rgb(186, 40, 32),
};

impl Theme {
    /// The other theme.
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    /// Theme currently applied to `ui`.
    pub fn of(ui: &Ui) -> Self {
        if ui.visuals().dark_mode {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    pub fn palette(self) -> &'static Palette {
        match self {
            Theme::Dark => &DARK,
            Theme::Light => &LIGHT,
        }
    }

    /// Get the egui Visuals for this theme.
    pub fn visuals(self) -> Visuals {
        let base = match self {
            Theme::Dark => Visuals::dark(),
            Theme::Light => Visuals::light(),
        };
        apply_palette(base, self.palette())
    }
}

fn apply_palette(mut visuals: Visuals, palette: &Palette) -> Visuals {
    visuals.window_fill = palette.panel;
    visuals.panel_fill = palette.panel;
    visuals.faint_bg_color = palette.card;
    visuals.extreme_bg_color = palette.page;
    visuals.hyperlink_color = palette.accent;
    visuals.error_fg_color = palette.error;
    visuals.selection.bg_fill = palette.accent.gamma_multiply(0.35);
    visuals.selection.stroke.color = palette.accent;

    let widgets = &mut visuals.widgets;
    for state in [&mut widgets.noninteractive, &mut widgets.inactive] {
        state.bg_fill = palette.card;
        state.weak_bg_fill = palette.card;
        state.bg_stroke.color = palette.border;
    }
    widgets.noninteractive.fg_stroke.color = palette.text;
    widgets.inactive.fg_stroke.color = palette.text_weak;
    widgets.hovered.bg_fill = palette.hovered;
    widgets.hovered.weak_bg_fill = palette.hovered;
    widgets.hovered.fg_stroke.color = palette.text;
    widgets.active.bg_fill = palette.accent;
    widgets.active.weak_bg_fill = palette.accent;
    widgets.active.fg_stroke.color = Color32::WHITE;

    visuals
}

/// Convert a configured colour to an egui colour.
pub fn color32(color: HexColor) -> Color32 {
    Color32::from_rgb(color.r, color.g, color.b)
}
