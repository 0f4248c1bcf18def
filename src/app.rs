use eframe::egui;
use crate::config::{PaintConfig, ThemePreference};
use crate::modules::paint_canvas::{CanvasAction, PaintCanvas, ToolKind};
use crate::modules::preview::{PreviewBridge, PreviewRequest};
use crate::style::{self, ThemeMode};

pub struct PaintApp {
    config: PaintConfig,
    canvas: PaintCanvas,
    preview: PreviewBridge,
    preview_open: bool,
    theme_mode: ThemeMode,
}

impl PaintApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: PaintConfig) -> Self {
        Self::with_context(&cc.egui_ctx, config)
    }

    fn with_context(ctx: &egui::Context, config: PaintConfig) -> Self {
        let theme_mode: ThemeMode = ThemeMode::resolve(config.theme_preference, ctx.theme());
        style::apply_theme(ctx, theme_mode);

        let canvas: PaintCanvas = PaintCanvas::new(config.background_rgba(), config.chrome, config.tool_defaults);
        let preview: PreviewBridge = PreviewBridge::new(config.preview.clone());
        Self { config, canvas, preview, preview_open: false, theme_mode }
    }

    fn apply_action(&mut self, action: CanvasAction) {
        match action {
            CanvasAction::Clear => {
                self.canvas.clear();
                self.preview.mark_dirty();
            }
            CanvasAction::ShowPreview => {
                self.preview_open = true;
                match self.preview.request_preview(self.canvas.surface()) {
                    PreviewRequest::Initialized => tracing::info!("3D preview opened"),
                    PreviewRequest::Refreshed => tracing::debug!("3D preview texture refreshed on request"),
                }
            }
        }
    }

    fn set_theme_preference(&mut self, ctx: &egui::Context, preference: ThemePreference) {
        if self.config.theme_preference == preference { return; }
        self.config.theme_preference = preference;
        self.theme_mode = ThemeMode::resolve(preference, ctx.theme());
        style::apply_theme(ctx, self.theme_mode);
        if let Err(e) = self.config.save() {
            tracing::warn!(error = %e, "could not persist theme preference");
        }
    }

    fn top_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui: &mut egui::Ui| {
            egui::MenuBar::new().ui(ui, |ui: &mut egui::Ui| {
                ui.menu_button("Canvas", |ui: &mut egui::Ui| {
                    if ui.button("Clear").clicked() { self.apply_action(CanvasAction::Clear); ui.close(); }
                    if ui.button("Show 3D").clicked() { self.apply_action(CanvasAction::ShowPreview); ui.close(); }
                    ui.separator();
                    if ui.button("Exit").clicked() { ctx.send_viewport_cmd(egui::ViewportCommand::Close); }
                });
                ui.menu_button("Tools", |ui: &mut egui::Ui| {
                    for tool in ToolKind::ALL {
                        let text: String = format!("{}  ({})", tool.label(), tool.shortcut());
                        if ui.radio(self.canvas.settings.tool == tool, text).clicked() {
                            self.canvas.select_tool(tool);
                            ui.close();
                        }
                    }
                });
                ui.menu_button("View", |ui: &mut egui::Ui| {
                    let mut pref: ThemePreference = self.config.theme_preference;
                    ui.radio_value(&mut pref, ThemePreference::System, "System Theme");
                    ui.radio_value(&mut pref, ThemePreference::Light, "Light Theme");
                    ui.radio_value(&mut pref, ThemePreference::Dark, "Dark Theme");
                    self.set_theme_preference(ctx, pref);
                });
            });
        });
    }
}

impl PaintApp {
    /// One frame of UI. The preview lives in its own floating window so the
    /// canvas container, and with it the surface size, only follows the
    /// main window.
    fn draw(&mut self, ctx: &egui::Context) {
        if matches!(self.config.theme_preference, ThemePreference::System) {
            let system_theme: ThemeMode = ThemeMode::resolve(ThemePreference::System, ctx.theme());
            if self.theme_mode != system_theme {
                self.theme_mode = system_theme;
                style::apply_theme(ctx, self.theme_mode);
            }
        }

        if let Some(action) = self.canvas.handle_keyboard(ctx) { self.apply_action(action); }

        self.top_bar(ctx);

        egui::CentralPanel::default().show(ctx, |ui: &mut egui::Ui| {
            if self.canvas.fit_to_container(ui.available_size(), ctx.pixels_per_point()) { self.preview.mark_dirty(); }

            if let Some(action) = self.canvas.render_toolbar(ui, self.theme_mode) { self.apply_action(action); }
            ui.add_space(4.0);
            if self.canvas.render_canvas(ui, ctx) { self.preview.mark_dirty(); }
        });

        if self.preview.is_initialized() {
            egui::Window::new("3D Preview")
                .open(&mut self.preview_open)
                .default_size([420.0, 360.0])
                .resizable(true)
                .show(ctx, |ui: &mut egui::Ui| {
                    ui.label(egui::RichText::new("Drag to orbit, right-drag to pan, scroll to zoom").size(11.0).weak());
                    ui.separator();
                    self.preview.show(ui, ctx, self.canvas.surface());
                });
        }
    }
}

impl eframe::App for PaintApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) { self.draw(ctx); }
}

impl Drop for PaintApp {
    fn drop(&mut self) { self.preview.stop(); }
}
