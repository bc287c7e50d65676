use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// --- CONSTANTS ---
const DEFAULT_SETTLE_MS: u64 = 10;
const DEFAULT_INPUT_WIDTH: f32 = 400.0;
const DEFAULT_INPUT_HEIGHT: f32 = 100.0;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ToolbarConfig {
    /// Delay between pointer-up and reading the finalized selection.
    #[serde(default = "default_settle_ms")]
    pub selection_settle_ms: u64,

    /// Size of the synthesized centered rect for the no-context entry point.
    #[serde(default = "default_input_width")]
    pub global_input_width: f32,
    #[serde(default = "default_input_height")]
    pub global_input_height: f32,

    /// Title shown on the ask window.
    #[serde(default = "default_ask_title")]
    pub ask_window_title: String,
}

fn default_settle_ms() -> u64 {
    DEFAULT_SETTLE_MS
}
fn default_input_width() -> f32 {
    DEFAULT_INPUT_WIDTH
}
fn default_input_height() -> f32 {
    DEFAULT_INPUT_HEIGHT
}
fn default_ask_title() -> String {
    "Ask".to_string()
}

impl Default for ToolbarConfig {
    fn default() -> Self {
        Self {
            selection_settle_ms: default_settle_ms(),
            global_input_width: default_input_width(),
            global_input_height: default_input_height(),
            ask_window_title: default_ask_title(),
        }
    }
}

pub fn get_config_path() -> PathBuf {
    let config_dir = dirs::config_dir()
        .unwrap_or_default()
        .join("selection-toolbox");
    let _ = std::fs::create_dir_all(&config_dir);
    config_dir.join("config.json")
}

pub fn load_config() -> ToolbarConfig {
    let path = get_config_path();
    if path.exists() {
        let data = std::fs::read_to_string(path).unwrap_or_default();
        match serde_json::from_str(&data) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("malformed config, falling back to defaults: {err}");
                ToolbarConfig::default()
            }
        }
    } else {
        ToolbarConfig::default()
    }
}

pub fn save_config(config: &ToolbarConfig) -> anyhow::Result<()> {
    let path = get_config_path();
    let data = serde_json::to_string_pretty(config)?;
    std::fs::write(path, data)?;
    Ok(())
}
