//! ThemeSplitApp — the eframe application: menu bar, slot cards, preview,
//! dropped-file routing, settings and about windows.

use eframe::egui;
use egui::{Color32, Rect, RichText, Stroke, vec2};
use std::path::PathBuf;

use crate::assets::AppSettings;
use crate::clipboard;
use crate::compare;
use crate::compose::compose_split;
use crate::i18n;
use crate::io::{FileHandler, SaveFormat, encode_and_write};
use crate::slider::SplitSlider;
use crate::slots::{SlotManager, Theme};

/// Deferred action from inside a slot card (the card borrows the slot
/// while it draws, so mutations run after the UI closure returns).
enum SlotAction {
    Replace,
    Remove,
}

pub struct ThemeSplitApp {
    slots: SlotManager,
    slider: SplitSlider,
    file_handler: FileHandler,
    settings: AppSettings,

    // Windows
    settings_open: bool,
    about_open: bool,

    /// Slot-card rects from the previous frame, used to route files dropped
    /// onto the window to the zone under the pointer.
    light_zone: Option<Rect>,
    dark_zone: Option<Rect>,

    /// Transient message for the status bar (last export/copy outcome).
    status: Option<String>,
}

impl ThemeSplitApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let settings = AppSettings::load();

        // Empty language = auto-detect on first boot
        let language = if settings.language.is_empty() {
            i18n::detect_system_language()
        } else {
            settings.language.clone()
        };
        i18n::set_language(&language);

        let mut app = Self {
            slots: SlotManager::new(),
            slider: SplitSlider::new(),
            file_handler: FileHandler::new(),
            settings,
            settings_open: false,
            about_open: false,
            light_zone: None,
            dark_zone: None,
            status: None,
        };

        // Files passed on the command line (e.g. "Open with ThemeSplit"):
        // the first fills the light slot, the second the dark slot.
        for (path, theme) in startup_paths().into_iter().zip(Theme::ALL) {
            app.slots.select_image(&cc.egui_ctx, theme, &path);
        }

        app
    }

    // -----------------------------------------------------------------------
    //  Commands (menu + card buttons)
    // -----------------------------------------------------------------------

    fn open_image_dialog(&mut self, ctx: &egui::Context, theme: Theme) {
        if let Some(path) = self.file_handler.pick_image_path(&theme.label()) {
            self.slots.select_image(ctx, theme, &path);
        }
    }

    /// Compose at the dark image's resolution with the current split position.
    fn compose_current(&self) -> Option<image::RgbaImage> {
        let light = self.slots.slot(Theme::Light)?;
        let dark = self.slots.slot(Theme::Dark)?;
        Some(compose_split(
            &light.pixels,
            &dark.pixels,
            self.slider.position(),
        ))
    }

    fn export_comparison(&mut self) {
        if !self.slots.both_populated() {
            self.status = Some(t!("status.export_needs_both"));
            return;
        }
        let Some(path) = self.file_handler.pick_export_path(&t!("menu.file.export")) else {
            return;
        };
        let Some(composed) = self.compose_current() else {
            return;
        };
        let format = SaveFormat::from_path(&path);
        match encode_and_write(&composed, &path, format, 90) {
            Ok(()) => {
                log_info!("exported comparison to {}", path.display());
                self.status = Some(t!("status.exported", path = path.display()));
            }
            Err(e) => {
                log_err!("export to {} failed: {}", path.display(), e);
                self.status = Some(t!("status.export_failed", error = e));
            }
        }
    }

    fn copy_comparison(&mut self) {
        if !self.slots.both_populated() {
            self.status = Some(t!("status.copy_needs_both"));
            return;
        }
        if let Some(composed) = self.compose_current() {
            if clipboard::copy_to_system_clipboard(&composed) {
                self.status = Some(t!("status.copied"));
            }
        }
    }

    // -----------------------------------------------------------------------
    //  Drag-and-drop: route dropped image files to the zone under the pointer
    // -----------------------------------------------------------------------

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped: Vec<egui::DroppedFile> = ctx.input(|i| i.raw.dropped_files.clone());
        if dropped.is_empty() {
            return;
        }
        let pointer = ctx.input(|i| i.pointer.hover_pos().or(i.pointer.latest_pos()));

        for file in dropped {
            if let Some(path) = file.path {
                let theme = self.drop_target(pointer);
                self.slots.select_image(ctx, theme, &path);
            }
        }
    }

    /// Zone under the pointer, else the first empty slot, else light.
    fn drop_target(&self, pointer: Option<egui::Pos2>) -> Theme {
        if let Some(p) = pointer {
            if self.light_zone.is_some_and(|r| r.contains(p)) {
                return Theme::Light;
            }
            if self.dark_zone.is_some_and(|r| r.contains(p)) {
                return Theme::Dark;
            }
        }
        if self.slots.slot(Theme::Light).is_none() {
            Theme::Light
        } else if self.slots.slot(Theme::Dark).is_none() {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    // -----------------------------------------------------------------------
    //  UI sections
    // -----------------------------------------------------------------------

    fn show_menu_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button(t!("menu.file"), |ui| {
                    if ui.button(t!("menu.file.open_light")).clicked() {
                        ui.close_menu();
                        self.open_image_dialog(ctx, Theme::Light);
                    }
                    if ui.button(t!("menu.file.open_dark")).clicked() {
                        ui.close_menu();
                        self.open_image_dialog(ctx, Theme::Dark);
                    }
                    ui.separator();
                    if ui.button(t!("menu.file.export")).clicked() {
                        ui.close_menu();
                        self.export_comparison();
                    }
                    ui.separator();
                    if ui.button(t!("menu.file.quit")).clicked() {
                        ui.close_menu();
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.menu_button(t!("menu.edit"), |ui| {
                    if ui.button(t!("menu.edit.copy")).clicked() {
                        ui.close_menu();
                        self.copy_comparison();
                    }
                    ui.separator();
                    if ui.button(t!("menu.edit.remove_light")).clicked() {
                        ui.close_menu();
                        self.slots.remove_image(Theme::Light);
                    }
                    if ui.button(t!("menu.edit.remove_dark")).clicked() {
                        ui.close_menu();
                        self.slots.remove_image(Theme::Dark);
                    }
                });

                ui.menu_button(t!("menu.view"), |ui| {
                    if ui.button(t!("menu.view.settings")).clicked() {
                        ui.close_menu();
                        self.settings_open = true;
                    }
                });

                ui.menu_button(t!("menu.help"), |ui| {
                    if ui.button(t!("menu.help.about")).clicked() {
                        ui.close_menu();
                        self.about_open = true;
                    }
                });
            });
        });
    }

    fn show_status_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if self.slots.both_populated() {
                    ui.label(
                        t!("preview.split", percent = format!("{:.0}", self.slider.position())),
                    );
                }
                if let Some(status) = &self.status {
                    ui.separator();
                    ui.label(RichText::new(status).weak());
                }
            });
        });
    }

    /// One slot card: populated → thumbnail + Replace/Remove; empty →
    /// call-to-action. Either way, the per-theme error shows underneath.
    fn show_slot_card(&mut self, ui: &mut egui::Ui, theme: Theme, files_hovering: bool) {
        let ctx = ui.ctx().clone();
        let mut action: Option<SlotAction> = None;

        let mut frame = egui::Frame::group(ui.style())
            .inner_margin(egui::Margin::same(12.0))
            .rounding(egui::Rounding::same(8.0));
        if files_hovering {
            frame = frame.stroke(Stroke::new(2.0, ui.visuals().selection.bg_fill));
        }

        let response = frame
            .show(ui, |ui| {
                ui.set_min_height(220.0);
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new(theme.label()).strong().size(16.0));
                    ui.add_space(8.0);

                    if let Some(slot) = self.slots.slot(theme) {
                        let (w, h) = slot.dimensions();
                        let sized = egui::load::SizedTexture::new(
                            slot.texture_id(),
                            vec2(w as f32, h as f32),
                        );
                        let avail = vec2(ui.available_width(), 150.0);
                        let scale = (avail.x / w as f32).min(avail.y / h as f32).min(1.0);
                        let img = egui::Image::from_texture(sized)
                            .fit_to_exact_size(vec2(w as f32 * scale, h as f32 * scale));
                        ui.add(img);

                        ui.add_space(6.0);
                        ui.label(
                            RichText::new(format!("{} — {}×{}", slot.file_name, w, h)).weak(),
                        );
                        ui.add_space(6.0);
                        ui.horizontal(|ui| {
                            // Center the button pair
                            let button_span = 150.0;
                            let pad = (ui.available_width() - button_span).max(0.0) / 2.0;
                            ui.add_space(pad);
                            if ui.button(t!("slot.replace")).clicked() {
                                action = Some(SlotAction::Replace);
                            }
                            if ui.button(t!("slot.remove")).clicked() {
                                action = Some(SlotAction::Remove);
                            }
                        });
                    } else {
                        ui.add_space(40.0);
                        ui.label(RichText::new(t!("slot.browse")).weak());
                        ui.add_space(12.0);
                        if ui.button(theme.label()).clicked() {
                            action = Some(SlotAction::Replace);
                        }
                    }
                });
            })
            .response;

        // Remember the card rect for dropped-file routing
        match theme {
            Theme::Light => self.light_zone = Some(response.rect),
            Theme::Dark => self.dark_zone = Some(response.rect),
        }

        // Inline per-theme error
        if let Some(error) = self.slots.error(theme) {
            ui.add_space(4.0);
            ui.colored_label(Color32::from_rgb(220, 80, 80), error.display_message());
        }

        match action {
            Some(SlotAction::Replace) => self.open_image_dialog(&ctx, theme),
            Some(SlotAction::Remove) => self.slots.remove_image(theme),
            None => {}
        }
    }

    fn show_settings_window(&mut self, ctx: &egui::Context) {
        let mut open = self.settings_open;
        egui::Window::new(t!("settings.title"))
            .open(&mut open)
            .resizable(false)
            .collapsible(false)
            .show(ctx, |ui| {
                let mut changed = false;

                // Language picker
                ui.horizontal(|ui| {
                    ui.label(t!("settings.language"));
                    let current = i18n::current_language();
                    let current_name = i18n::LANGUAGES
                        .iter()
                        .find(|(code, _)| *code == current)
                        .map(|(_, name)| *name)
                        .unwrap_or("English");
                    egui::ComboBox::from_id_source("language_picker")
                        .selected_text(current_name)
                        .show_ui(ui, |ui| {
                            for &(code, name) in i18n::LANGUAGES {
                                if ui.selectable_label(current == code, name).clicked()
                                    && current != code
                                {
                                    i18n::set_language(code);
                                    self.settings.language = code.to_string();
                                    changed = true;
                                }
                            }
                        });
                });

                ui.add_space(4.0);
                if ui
                    .checkbox(
                        &mut self.settings.show_checkerboard,
                        t!("settings.checkerboard"),
                    )
                    .changed()
                {
                    changed = true;
                }

                if changed {
                    self.settings.save();
                }
            });
        self.settings_open = open;
    }

    fn show_about_window(&mut self, ctx: &egui::Context) {
        let mut open = self.about_open;
        egui::Window::new(t!("about.title"))
            .open(&mut open)
            .resizable(false)
            .collapsible(false)
            .show(ctx, |ui| {
                ui.label(RichText::new("ThemeSplit").strong().size(18.0));
                ui.label(t!("about.tagline"));
                ui.add_space(4.0);
                ui.label(
                    RichText::new(t!("about.version", version = env!("CARGO_PKG_VERSION"))).weak(),
                );
                if let Some(log_path) = crate::logger::log_path() {
                    ui.add_space(4.0);
                    ui.label(RichText::new(log_path.display().to_string()).weak().small());
                }
            });
        self.about_open = open;
    }
}

impl eframe::App for ThemeSplitApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_dropped_files(ctx);
        let files_hovering = ctx.input(|i| !i.raw.hovered_files.is_empty());

        self.show_menu_bar(ctx);
        self.show_status_bar(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.add_space(4.0);
                ui.heading(t!("slot.title"));
                ui.add_space(8.0);

                ui.columns(2, |cols| {
                    self.show_slot_card(&mut cols[0], Theme::Light, files_hovering);
                    self.show_slot_card(&mut cols[1], Theme::Dark, files_hovering);
                });

                // The preview section appears as soon as either image exists;
                // the full comparison needs both (see compare::preview_state).
                if self.slots.any_populated() {
                    ui.add_space(16.0);
                    ui.heading(t!("preview.title"));
                    ui.add_space(8.0);
                    compare::show_preview(
                        ui,
                        &self.slots,
                        &mut self.slider,
                        self.settings.show_checkerboard,
                    );
                    ui.add_space(8.0);
                }
            });
        });

        self.show_settings_window(ctx);
        self.show_about_window(ctx);
    }
}

/// Files passed on the command line in GUI mode (double-click association).
fn startup_paths() -> Vec<PathBuf> {
    std::env::args_os()
        .skip(1)
        .map(PathBuf::from)
        .filter(|p| p.is_file())
        .collect()
}
