use eframe::egui;

use super::app::DungeonMasterApp;
use crate::model::action::ParsedAction;

pub fn draw_right_panel(ctx: &egui::Context, app: &mut DungeonMasterApp) {
    egui::SidePanel::right("right")
        .resizable(true)
        .default_width(340.0)
        .min_width(260.0)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Actions");
                if ui.small_button("Clear").clicked() {
                    app.ui.parsed_actions.clear();
                }
            });

            ui.separator();

            egui::ScrollArea::vertical().show(ui, |ui| {
                if app.ui.parsed_actions.is_empty() {
                    ui.label("No actions parsed yet.");
                    return;
                }

                let accent = app.settings.color("Action");
                for action in app.ui.parsed_actions.iter().rev() {
                    draw_action_card(ui, accent, action);
                }
            });
        });
}

fn draw_action_card(ui: &mut egui::Ui, accent: egui::Color32, action: &ParsedAction) {
    ui.add_space(6.0);

    egui::Frame::new()
        .fill(ui.visuals().extreme_bg_color)
        .corner_radius(egui::CornerRadius::same(6))
        .inner_margin(egui::Margin::same(8))
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(
                    egui::RichText::new(action.action_type.label())
                        .color(accent)
                        .strong(),
                );
                ui.label(&action.command);
            });

            if !action.target.is_empty() {
                ui.label(format!("Target: {}", action.target));
            }

            if !action.parameters.is_empty() {
                ui.label(format!("Parameters: {}", action.parameters.join(", ")));
            }
        });
}
