use eframe::egui;
use crate::config::ThemePreference;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ThemeMode {
    Light,
    Dark,
}

impl ThemeMode {
    pub fn resolve(preference: ThemePreference, system: egui::Theme) -> Self {
        match (preference, system) {
            (ThemePreference::Light, _) => ThemeMode::Light,
            (ThemePreference::Dark, _) => ThemeMode::Dark,
            (ThemePreference::System, egui::Theme::Dark) => ThemeMode::Dark,
            (ThemePreference::System, egui::Theme::Light) => ThemeMode::Light,
        }
    }
}

#[allow(dead_code)]
pub struct ColorPalette;

impl ColorPalette {
    pub const BLUE_400: egui::Color32 = egui::Color32::from_rgb(96, 165, 250);
    pub const BLUE_500: egui::Color32 = egui::Color32::from_rgb(59, 130, 246);
    pub const BLUE_600: egui::Color32 = egui::Color32::from_rgb(37, 99, 235);

    pub const SLATE_100: egui::Color32 = egui::Color32::from_rgb(241, 245, 249);
    pub const SLATE_200: egui::Color32 = egui::Color32::from_rgb(226, 232, 240);
    pub const SLATE_300: egui::Color32 = egui::Color32::from_rgb(203, 213, 225);

    pub const GRAY_50: egui::Color32 = egui::Color32::from_rgb(249, 250, 251);
    pub const GRAY_100: egui::Color32 = egui::Color32::from_rgb(243, 244, 246);
    pub const GRAY_200: egui::Color32 = egui::Color32::from_rgb(229, 231, 235);
    pub const GRAY_300: egui::Color32 = egui::Color32::from_rgb(209, 213, 219);
    pub const GRAY_400: egui::Color32 = egui::Color32::from_rgb(156, 163, 175);
    pub const GRAY_700: egui::Color32 = egui::Color32::from_rgb(55, 65, 81);
    pub const GRAY_800: egui::Color32 = egui::Color32::from_rgb(31, 41, 55);

    pub const ZINC_200: egui::Color32 = egui::Color32::from_rgb(228, 228, 231);
    pub const ZINC_400: egui::Color32 = egui::Color32::from_rgb(161, 161, 170);
    pub const ZINC_500: egui::Color32 = egui::Color32::from_rgb(113, 113, 122);
    pub const ZINC_600: egui::Color32 = egui::Color32::from_rgb(82, 82, 91);
    pub const ZINC_700: egui::Color32 = egui::Color32::from_rgb(63, 63, 70);
    pub const ZINC_800: egui::Color32 = egui::Color32::from_rgb(39, 39, 42);
    pub const ZINC_900: egui::Color32 = egui::Color32::from_rgb(24, 24, 27);

    pub const RED_400: egui::Color32 = egui::Color32::from_rgb(248, 113, 113);
}

/// Per-theme base colors; widget states are derived from these.
struct ThemeColors { panel: egui::Color32, faint: egui::Color32, widget: egui::Color32, stroke: egui::Color32, text: egui::Color32, accent: egui::Color32 }

fn theme_colors(theme: ThemeMode) -> ThemeColors {
    match theme {
        ThemeMode::Dark => ThemeColors {
            panel: ColorPalette::ZINC_900, faint: ColorPalette::ZINC_800,
            widget: ColorPalette::ZINC_800, stroke: ColorPalette::ZINC_600,
            text: ColorPalette::SLATE_200, accent: ColorPalette::BLUE_400,
        },
        ThemeMode::Light => ThemeColors {
            panel: ColorPalette::GRAY_50, faint: ColorPalette::GRAY_100,
            widget: ColorPalette::GRAY_200, stroke: ColorPalette::GRAY_300,
            text: ColorPalette::GRAY_800, accent: ColorPalette::BLUE_600,
        },
    }
}

pub fn apply_theme(ctx: &egui::Context, theme: ThemeMode) {
    let mut style: egui::Style = (*ctx.style()).clone();
    let c: ThemeColors = theme_colors(theme);

    style.visuals = if matches!(theme, ThemeMode::Dark) { egui::Visuals::dark() } else { egui::Visuals::light() };
    style.spacing.item_spacing = egui::vec2(8.0, 8.0);
    style.spacing.button_padding = egui::vec2(10.0, 4.0);

    style.visuals.panel_fill = c.panel;
    style.visuals.window_fill = c.panel;
    style.visuals.faint_bg_color = c.faint;
    style.visuals.hyperlink_color = c.accent;
    style.visuals.selection.stroke = egui::Stroke::new(1.0, c.accent);

    let hover_fill: egui::Color32 = if matches!(theme, ThemeMode::Dark) { ColorPalette::ZINC_700 } else { ColorPalette::GRAY_300 };
    let hover_text: egui::Color32 = if matches!(theme, ThemeMode::Dark) { ColorPalette::SLATE_100 } else { ColorPalette::GRAY_700 };
    let w: &mut egui::style::Widgets = &mut style.visuals.widgets;
    for (state, fill, text) in [
        (&mut w.inactive, c.widget, c.text),
        (&mut w.hovered, hover_fill, hover_text),
        (&mut w.active, hover_fill, hover_text),
    ] {
        state.corner_radius = egui::CornerRadius::same(4);
        state.bg_fill = fill;
        state.weak_bg_fill = fill;
        state.bg_stroke = egui::Stroke::new(1.0, c.stroke);
        state.fg_stroke = egui::Stroke::new(1.0, text);
    }
    w.noninteractive.corner_radius = egui::CornerRadius::same(4);
    w.noninteractive.bg_stroke = egui::Stroke::new(1.0, if matches!(theme, ThemeMode::Dark) { ColorPalette::ZINC_700 } else { ColorPalette::GRAY_400 });
    w.noninteractive.fg_stroke = egui::Stroke::new(1.0, if matches!(theme, ThemeMode::Dark) { ColorPalette::SLATE_300 } else { ColorPalette::GRAY_700 });

    ctx.set_style(style);
}
