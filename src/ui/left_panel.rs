use eframe::egui;

use super::app::{DungeonMasterApp, LeftTab};
use crate::engine::protocol::EngineCommand;
use crate::ui::settings_io;

pub fn draw_left_panel(ctx: &egui::Context, app: &mut DungeonMasterApp) {
    egui::SidePanel::left("left")
        .resizable(false)
        .default_width(240.0)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.selectable_value(&mut app.ui.left_tab, LeftTab::Settings, "Settings");
                ui.selectable_value(&mut app.ui.left_tab, LeftTab::Parser, "Parser");
            });

            ui.separator();

            egui::ScrollArea::vertical().show(ui, |ui| match app.ui.left_tab {
                LeftTab::Settings => draw_settings(ui, app),
                LeftTab::Parser => draw_parser_test(ui, app),
            });

            ui.with_layout(egui::Layout::bottom_up(egui::Align::LEFT), |ui| {
                ui.separator();
                ui.label(&app.ui.status_line);
            });
        });
}

/* =========================
   Settings tab
   ========================= */

fn draw_settings(ui: &mut egui::Ui, app: &mut DungeonMasterApp) {
    ui.label("UI Scale");
    ui.add(egui::Slider::new(&mut app.settings.ui_scale, 0.75..=2.0));

    ui.separator();
    ui.heading("Backend");

    let backend = &mut app.settings.backend;

    ui.label("Base URL");
    ui.text_edit_singleline(&mut backend.base_url);

    ui.label("Model");
    ui.text_edit_singleline(&mut backend.model);

    ui.label("Temperature");
    ui.add(egui::Slider::new(&mut backend.temperature, 0.0..=2.0));

    ui.label("Max tokens");
    ui.add(egui::Slider::new(&mut backend.max_tokens, 16..=2048));

    ui.label("API key file (empty for local backends)");
    ui.text_edit_singleline(&mut backend.api_key_file);

    ui.horizontal(|ui| {
        if ui.button("Apply").clicked() {
            app.send_command(EngineCommand::UpdateBackend(app.settings.backend.clone()));
            settings_io::save_settings(&app.settings);
        }

        if ui.button("Test connection").clicked() {
            app.send_command(EngineCommand::TestConnection);
        }
    });

    ui.separator();
    ui.collapsing("Colors", |ui| {
        for key in ["Player", "DungeonMaster", "System", "Action"] {
            let mut color = app.settings.color(key);
            ui.horizontal(|ui| {
                if ui.color_edit_button_srgba(&mut color).changed() {
                    app.settings.set_color(key, color);
                }
                ui.label(key);
            });
        }

        if ui.button("Save colors").clicked() {
            settings_io::save_settings(&app.settings);
        }
    });
}

/* =========================
   Parser tab
   ========================= */

fn draw_parser_test(ui: &mut egui::Ui, app: &mut DungeonMasterApp) {
    ui.label("Feed text straight to the action parser:");

    ui.add(
        egui::TextEdit::multiline(&mut app.ui.parser_test_text)
            .hint_text("You move to the door.\n[attack orc]")
            .desired_rows(6),
    );

    if ui.button("Run parser").clicked() {
        let text = app.ui.parser_test_text.clone();
        if !text.trim().is_empty() {
            app.send_command(EngineCommand::TestParser(text));
        }
    }
}
