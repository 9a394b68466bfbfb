use std::sync::mpsc;
use std::time::Duration;

use eframe::egui;
use egui::Layout;

use crate::engine::engine::Engine;
use crate::engine::protocol::{EngineCommand, EngineResponse};
use crate::model::action::ParsedAction;
use crate::model::message::Message;
use crate::ui::center_panel::draw_center_panel;
use crate::ui::left_panel::draw_left_panel;
use crate::ui::right_panel::draw_right_panel;
use crate::ui::settings::UiSettings;
use crate::ui::settings_io;

/* =========================
   Tabs
   ========================= */

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LeftTab {
    #[default]
    Settings,
    Parser,
}

/* =========================
   UI State
   ========================= */

#[derive(Default)]
pub struct UiState {
    pub input_text: String,
    pub parser_test_text: String,

    pub rendered_messages: Vec<Message>,
    pub parsed_actions: Vec<ParsedAction>,
    pub status_line: String,

    pub should_auto_scroll: bool,
    pub awaiting_reply: bool,

    pub left_tab: LeftTab,
}

/* =========================
   App
   ========================= */

pub struct DungeonMasterApp {
    pub ui: UiState,
    pub settings: UiSettings,

    cmd_tx: mpsc::Sender<EngineCommand>,
    resp_rx: mpsc::Receiver<EngineResponse>,
}

impl DungeonMasterApp {
    pub fn new() -> Self {
        let settings = settings_io::load_settings();

        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (resp_tx, resp_rx) = mpsc::channel();

        let backend = settings.backend.clone();
        std::thread::spawn(move || {
            let mut engine = Engine::new(cmd_rx, resp_tx, backend);
            engine.run();
        });

        Self {
            ui: UiState {
                status_line: "Ready".to_string(),
                ..Default::default()
            },
            settings,
            cmd_tx,
            resp_rx,
        }
    }

    pub fn send_command(&self, cmd: EngineCommand) {
        let _ = self.cmd_tx.send(cmd);
    }

    pub fn draw_message(&self, ui: &mut egui::Ui, msg: &Message) {
        let (bg, right, text) = match msg {
            Message::Player(t) => (self.settings.color("Player"), true, format!("You: {t}")),
            Message::DungeonMaster(t) => (self.settings.color("DungeonMaster"), false, t.clone()),
            Message::System(t) => (self.settings.color("System"), false, t.clone()),
        };

        ui.add_space(6.0);

        if right {
            ui.with_layout(Layout::right_to_left(egui::Align::TOP), |ui| {
                bubble(ui, bg, &text);
            });
        } else {
            bubble(ui, bg, &text);
        }
    }
}

/* =========================
   egui App
   ========================= */

impl eframe::App for DungeonMasterApp {
    fn update(&mut self, ctx: &egui::Context, _: &mut eframe::Frame) {
        ctx.set_pixels_per_point(self.settings.ui_scale);

        while let Ok(resp) = self.resp_rx.try_recv() {
            match resp {
                EngineResponse::FullMessageHistory(msgs) => {
                    self.ui.rendered_messages = msgs;
                    self.ui.should_auto_scroll = true;
                }
                EngineResponse::ActionsParsed(actions) => {
                    self.ui.parsed_actions.extend(actions);
                    self.ui.awaiting_reply = false;
                }
                EngineResponse::Status(status) => {
                    self.ui.status_line = status;
                    self.ui.awaiting_reply = false;
                }
            }
        }

        draw_left_panel(ctx, self);
        draw_right_panel(ctx, self);
        draw_center_panel(ctx, self);

        self.ui.should_auto_scroll = false;

        // The engine replies from its own thread, so poll for them even
        // while no input events arrive.
        ctx.request_repaint_after(Duration::from_millis(200));
    }
}

/* =========================
   UI Helpers
   ========================= */

pub fn bubble(ui: &mut egui::Ui, color: egui::Color32, text: &str) {
    egui::Frame::new()
        .fill(color)
        .corner_radius(egui::CornerRadius::same(8))
        .inner_margin(egui::Margin::symmetric(10, 6))
        .show(ui, |ui| {
            ui.label(egui::RichText::new(text).color(egui::Color32::WHITE));
        });
}
