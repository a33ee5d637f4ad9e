use super::state::{progress_fraction, status_text};
use super::LipSyncApp;
use crate::media::MediaKind;
use crate::task::DownloadState;
use egui::{Align, Color32, RichText};

const ACCENT: Color32 = Color32::from_rgb(79, 70, 229);
const SUCCESS: Color32 = Color32::from_rgb(22, 163, 74);
const DANGER: Color32 = Color32::from_rgb(220, 50, 50);

enum Action {
    Pick(MediaKind),
    Preview(MediaKind),
    Generate,
    Clear,
    OpenResult,
    SaveResult,
}

impl LipSyncApp {
    pub fn render(&mut self, ctx: &egui::Context) {
        let mut actions = Vec::new();

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.add_space(20.0);
                ui.vertical_centered(|ui| {
                    ui.heading("AI Lip-Sync Generator");
                    ui.add_space(5.0);
                    ui.label(
                        RichText::new("Upload your own video and audio files to generate a lip-synced video.")
                            .color(ui.visuals().text_color().gamma_multiply(0.7)),
                    );
                });

                ui.add_space(20.0);

                if let Some(message) = self.form.banner(self.controller.lifecycle()) {
                    egui::Frame::none()
                        .fill(Color32::from_rgb(254, 242, 242))
                        .inner_margin(10.0)
                        .rounding(6.0)
                        .show(ui, |ui| {
                            ui.horizontal(|ui| {
                                ui.colored_label(DANGER, "⚠");
                                ui.colored_label(DANGER, message);
                            });
                        });
                    ui.add_space(10.0);
                }

                let busy = self.controller.lifecycle().is_active();

                ui.group(|ui| {
                    ui.horizontal(|ui| {
                        ui.label("API key");
                        ui.add_space(4.0);
                        ui.label("ℹ").on_hover_text_at_pointer(
                            "Bearer key for the lip-sync API.\n\
                             Can also be set with LIPSYNC_API_KEY in the environment or a .env file.",
                        );
                    });
                    ui.add_enabled(
                        !busy,
                        egui::TextEdit::singleline(&mut self.form.api_key)
                            .password(true)
                            .desired_width(ui.available_width())
                            .hint_text("Paste your API key"),
                    );
                });

                ui.add_space(20.0);

                ui.columns(2, |columns| {
                    self.render_picker(&mut columns[0], MediaKind::Video, busy, &mut actions);
                    self.render_picker(&mut columns[1], MediaKind::Audio, busy, &mut actions);
                });

                ui.add_space(20.0);

                let lifecycle = self.controller.lifecycle();
                if busy {
                    ui.label(status_text(lifecycle));
                    let progress_bar = egui::ProgressBar::new(progress_fraction(lifecycle))
                        .show_percentage()
                        .animate(true)
                        .fill(ACCENT);
                    ui.add(progress_bar);
                    ui.add_space(10.0);
                }

                ui.vertical_centered(|ui| {
                    let can_submit = self.form.can_submit(lifecycle);
                    let label = if busy { "⏳ Processing..." } else { "📤 Generate" };
                    ui.add_enabled_ui(can_submit, |ui| {
                        let button = egui::Button::new(label).min_size(egui::vec2(200.0, 40.0));
                        if ui.add(button).clicked() {
                            actions.push(Action::Generate);
                        }
                    });

                    ui.add_space(5.0);
                    ui.add_enabled_ui(!busy, |ui| {
                        if ui.button("🗑 Clear files").clicked() {
                            actions.push(Action::Clear);
                        }
                    });
                });

                if lifecycle.result_url().is_some() {
                    ui.add_space(20.0);
                    self.render_result(ui, &mut actions);
                }

                ui.add_space(20.0);
            });
        });

        for action in actions {
            match action {
                Action::Pick(kind) => self.pick_file(kind),
                Action::Preview(kind) => self.preview_file(kind),
                Action::Generate => self.start_generation(),
                Action::Clear => self.reset_form(),
                Action::OpenResult => self.open_result(),
                Action::SaveResult => self.save_result(),
            }
        }
    }

    fn render_picker(
        &self,
        ui: &mut egui::Ui,
        kind: MediaKind,
        busy: bool,
        actions: &mut Vec<Action>,
    ) {
        ui.group(|ui| {
            ui.set_min_height(110.0);
            ui.vertical_centered(|ui| {
                let (icon, label) = match kind {
                    MediaKind::Video => ("🎬", "Select video"),
                    MediaKind::Audio => ("🎵", "Select audio"),
                };
                ui.label(RichText::new(icon).size(28.0));

                ui.add_enabled_ui(!busy, |ui| {
                    if ui.button(label).clicked() {
                        actions.push(Action::Pick(kind));
                    }
                });

                match self.form.slot(kind) {
                    Some(file) => {
                        ui.label(RichText::new(&file.name).color(ACCENT).strong());
                        ui.label(file.display_size());
                        if ui.small_button("▶ Open").clicked() {
                            actions.push(Action::Preview(kind));
                        }
                    }
                    None => {
                        ui.label(
                            RichText::new(kind.hint())
                                .small()
                                .color(ui.visuals().text_color().gamma_multiply(0.6)),
                        );
                    }
                }
            });
        });
    }

    fn render_result(&self, ui: &mut egui::Ui, actions: &mut Vec<Action>) {
        let Some(url) = self.controller.lifecycle().result_url() else {
            return;
        };

        ui.group(|ui| {
            ui.label(RichText::new("Result").heading());
            ui.add_space(5.0);
            ui.hyperlink_to(url, url);
            ui.add_space(8.0);

            ui.horizontal(|ui| {
                if ui.button("▶ Open video").clicked() {
                    actions.push(Action::OpenResult);
                }

                let downloading = *self.controller.download_state() == DownloadState::InProgress;
                ui.add_enabled_ui(!downloading, |ui| {
                    if ui.button("💾 Save video…").clicked() {
                        actions.push(Action::SaveResult);
                    }
                });
            });

            ui.with_layout(egui::Layout::top_down(Align::Min), |ui| {
                match self.controller.download_state() {
                    DownloadState::Idle => {}
                    DownloadState::InProgress => {
                        ui.horizontal(|ui| {
                            ui.spinner();
                            ui.label("Downloading...");
                        });
                    }
                    DownloadState::Saved(path) => {
                        ui.colored_label(SUCCESS, format!("✅ Saved to {}", path.display()));
                    }
                    DownloadState::Failed(reason) => {
                        ui.colored_label(DANGER, format!("❌ {}", reason));
                    }
                }
            });
        });
    }
}
