use egui::Color32;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::engine::llm_client::BackendSettings;

#[derive(Serialize, Deserialize, Clone)]
pub struct UiSettings {
    pub ui_scale: f32,

    // Speaker → color mapping (extensible)
    pub speaker_colors: HashMap<String, [u8; 4]>,

    pub backend: BackendSettings,
}

impl Default for UiSettings {
    fn default() -> Self {
        let mut speaker_colors = HashMap::new();

        speaker_colors.insert("Player".into(), [40, 70, 120, 255]);
        speaker_colors.insert("DungeonMaster".into(), [40, 90, 60, 255]);
        speaker_colors.insert("System".into(), [80, 80, 80, 255]);
        speaker_colors.insert("Action".into(), [90, 60, 120, 255]);

        Self {
            ui_scale: 1.0,
            speaker_colors,
            backend: BackendSettings::default(),
        }
    }
}

impl UiSettings {
    pub fn color(&self, key: &str) -> Color32 {
        self.speaker_colors
            .get(key)
            .map(|c| Color32::from_rgba_unmultiplied(c[0], c[1], c[2], c[3]))
            .unwrap_or(Color32::WHITE)
    }

    pub fn set_color(&mut self, key: &str, color: Color32) {
        self.speaker_colors.insert(
            key.to_string(),
            [color.r(), color.g(), color.b(), color.a()],
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_speaker_falls_back_to_white() {
        let settings = UiSettings::default();
        assert_eq!(settings.color("Ghost"), Color32::WHITE);
    }

    #[test]
    fn test_set_color_round_trips() {
        let mut settings = UiSettings::default();
        let c = Color32::from_rgba_unmultiplied(1, 2, 3, 255);
        settings.set_color("Player", c);
        assert_eq!(settings.color("Player"), c);
    }
}
