use std::time::Duration;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    pub game:         String,
    pub content_path: String, // empty = bundled scripts
    pub log_path:     String,
    pub log_level:    String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SequencerConfig {
    pub char_delay_ms: u64,
    pub line_break:    String,
    pub toast_ms:      u64,
}

impl SequencerConfig {
    pub fn char_delay(&self) -> Duration {
        Duration::from_millis(self.char_delay_ms)
    }

    pub fn toast(&self) -> Duration {
        Duration::from_millis(self.toast_ms)
    }

    /// Reads `[sequencer]` from the shared store, layering it over a game's own defaults.
    pub fn from_global_or(fallback: SequencerConfig) -> Self {
        if !quest_shared::config::is_initialized() {
            return fallback;
        }
        quest_shared::config::get::<Option<SequencerConfig>>("sequencer").unwrap_or(fallback)
    }
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            game:         "dosa".into(),
            content_path: String::new(),
            log_path:     "logs/".into(),
            log_level:    "info".into(),
        }
    }
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self {
            char_delay_ms: 26,
            line_break:    "\n".into(),
            toast_ms:      1800,
        }
    }
}
