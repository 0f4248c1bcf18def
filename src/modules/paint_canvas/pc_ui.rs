use eframe::egui;
use crate::style::{ColorPalette, ThemeMode};
use super::pc_brush::ToolKind;
use super::pc_main::PaintCanvas;
use super::pc_pointer::HostEvent;

/// Commands from the control bar that reach beyond the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanvasAction { Clear, ShowPreview }

impl PaintCanvas {
    pub fn handle_keyboard(&mut self, ctx: &egui::Context) -> Option<CanvasAction> {
        if ctx.wants_keyboard_input() { return None; }
        let mut action: Option<CanvasAction> = None;
        ctx.input_mut(|i: &mut egui::InputState| {
            if i.consume_key(egui::Modifiers::NONE, egui::Key::F) { self.select_tool(ToolKind::Free); }
            if i.consume_key(egui::Modifiers::NONE, egui::Key::E) { self.select_tool(ToolKind::Eraser); }
            if i.consume_key(egui::Modifiers::NONE, egui::Key::L) { self.select_tool(ToolKind::Line); }
            if i.consume_key(egui::Modifiers::NONE, egui::Key::R) { self.select_tool(ToolKind::Rectangle); }
            if i.consume_key(egui::Modifiers::NONE, egui::Key::C) { self.select_tool(ToolKind::Circle); }
            if i.consume_key(egui::Modifiers::NONE, egui::Key::Delete) { action = Some(CanvasAction::Clear); }
            if i.consume_key(egui::Modifiers::NONE, egui::Key::P) { action = Some(CanvasAction::ShowPreview); }
        });
        action
    }

    pub fn render_toolbar(&mut self, ui: &mut egui::Ui, theme: ThemeMode) -> Option<CanvasAction> {
        let (bg, border, label_col) = if matches!(theme, ThemeMode::Dark) {
            (ColorPalette::ZINC_800, ColorPalette::ZINC_700, ColorPalette::ZINC_400)
        } else {
            (ColorPalette::GRAY_50, ColorPalette::GRAY_300, ColorPalette::ZINC_600)
        };
        let mut action: Option<CanvasAction> = None;

        egui::Frame::new()
            .fill(bg).stroke(egui::Stroke::new(1.0, border))
            .corner_radius(6.0)
            .inner_margin(egui::Margin { left: 8, right: 8, top: 4, bottom: 4 })
            .show(ui, |ui: &mut egui::Ui| {
                ui.spacing_mut().slider_width = 100.0;
                ui.horizontal(|ui: &mut egui::Ui| {
                    for tool in ToolKind::ALL { self.tool_btn(ui, tool, theme); }
                    ui.separator();

                    ui.label(egui::RichText::new("Color:").size(12.0).color(label_col));
                    ui.color_edit_button_srgb(&mut self.settings.color);
                    ui.label(egui::RichText::new("Size:").size(12.0).color(label_col));
                    ui.add(egui::Slider::new(&mut self.settings.size, 1.0..=100.0));
                    ui.label(egui::RichText::new("Opacity:").size(12.0).color(label_col));
                    ui.add_enabled(
                        self.settings.tool != ToolKind::Eraser,
                        egui::Slider::new(&mut self.settings.opacity, 0.0..=1.0).custom_formatter(|v, _| format!("{:.0}%", v * 100.0)),
                    );
                    ui.separator();

                    if ui.button("Clear").on_hover_text("Delete").clicked() { action = Some(CanvasAction::Clear); }
                    if ui.button("Show 3D").on_hover_text("P").clicked() { action = Some(CanvasAction::ShowPreview); }

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui: &mut egui::Ui| {
                        let (w, h) = self.surface.size();
                        ui.label(egui::RichText::new(format!("{}x{}", w, h)).size(12.0).color(label_col));
                    });
                });
            });
        action
    }

    fn tool_btn(&mut self, ui: &mut egui::Ui, tool: ToolKind, theme: ThemeMode) {
        let active: bool = self.settings.tool == tool;
        let (bg, hover, txt) = if active {
            (ColorPalette::BLUE_600, ColorPalette::BLUE_500, egui::Color32::WHITE)
        } else if matches!(theme, ThemeMode::Dark) {
            (ColorPalette::ZINC_700, ColorPalette::ZINC_600, ColorPalette::ZINC_200)
        } else {
            (ColorPalette::GRAY_200, ColorPalette::GRAY_300, ColorPalette::GRAY_800)
        };

        let response: egui::Response = ui.scope(|ui: &mut egui::Ui| {
            let s: &mut egui::Style = ui.style_mut();
            s.visuals.widgets.inactive.bg_fill = bg;
            s.visuals.widgets.inactive.bg_stroke = egui::Stroke::NONE;
            s.visuals.widgets.hovered.bg_fill = hover;
            s.visuals.widgets.hovered.bg_stroke = egui::Stroke::NONE;
            s.visuals.widgets.active.bg_fill = hover;
            ui.add(egui::Button::new(egui::RichText::new(tool.label()).size(12.0).color(txt)).min_size(egui::vec2(0.0, 24.0)))
                .on_hover_text(tool.shortcut())
        }).inner;

        if response.clicked() { self.select_tool(tool); }
    }

    /// Draws the surface at the top-left of the remaining space and feeds this
    /// frame's pointer/touch input through the stroke engine. Returns whether
    /// any pixel changed.
    pub fn render_canvas(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) -> bool {
        let (w, h) = self.surface.size();
        let origin: egui::Pos2 = ui.available_rect_before_wrap().min + egui::vec2(self.sizer.chrome.horizontal / 2.0, 0.0);
        let rect: egui::Rect = egui::Rect::from_min_size(origin, egui::vec2(w as f32, h as f32) / self.pixels_per_point);
        let response: egui::Response = ui.allocate_rect(rect, egui::Sense::click_and_drag());
        self.set_bounds(rect);

        let pressing: bool = self.engine.is_active();
        let events: Vec<HostEvent> = ctx.input(|i: &egui::InputState| self.tracker.collect(&i.events, rect, pressing));
        let changed: bool = self.handle_events(&events);

        self.texture.sync(ctx, self.surface.pixels());
        let painter: egui::Painter = ui.painter_at(rect.expand(1.0));
        if let Some(tex) = self.texture.id() {
            painter.image(tex, rect, egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)), egui::Color32::WHITE);
        }
        painter.rect_stroke(rect, 0.0, egui::Stroke::new(1.0, ColorPalette::ZINC_500), egui::StrokeKind::Outside);

        if response.hovered() {
            if let Some(mp) = ctx.pointer_hover_pos() {
                let outline: egui::Color32 = if self.settings.tool == ToolKind::Eraser { ColorPalette::RED_400 } else { ColorPalette::ZINC_500 };
                painter.circle_stroke(mp, self.settings.size / 2.0 / self.pixels_per_point, egui::Stroke::new(1.0, outline));
                ctx.set_cursor_icon(egui::CursorIcon::Crosshair);
            }
        }
        changed
    }
}
