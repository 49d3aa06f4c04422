use log::warn;
use serde::{Deserialize, Serialize};

pub const CONFIG_ELEMENT_ID: &str = "app-config";

const DEFAULT_SOURCE_URL: &str = "https://cataas.com/cat";
const DEFAULT_COUNT: usize = 15;
const DEFAULT_WIDTH: u32 = 400;
const DEFAULT_HEIGHT: u32 = 500;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub source_url: String,
    pub count: usize,
    pub width: u32,
    pub height: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_SOURCE_URL.to_string(),
            count: DEFAULT_COUNT,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

impl AppConfig {
    /// Parses the inline config block, keeping defaults for anything missing.
    pub fn from_json(text: &str) -> Self {
        if text.trim().is_empty() {
            return Self::default();
        }
        match serde_json::from_str::<AppConfig>(text) {
            Ok(config) if config.count == 0 => {
                warn!("Config asks for zero images, using {}", DEFAULT_COUNT);
                Self {
                    count: DEFAULT_COUNT,
                    ..config
                }
            }
            Ok(config) => config,
            Err(err) => {
                warn!("Falling back to default config: {}", err);
                Self::default()
            }
        }
    }

    pub fn load() -> Self {
        let text = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.get_element_by_id(CONFIG_ELEMENT_ID))
            .and_then(|element| element.text_content());
        match text {
            Some(text) => Self::from_json(&text),
            None => Self::default(),
        }
    }

    /// Request URL for image `index`; the index doubles as a cache buster.
    pub fn image_url(&self, index: u32) -> String {
        format!(
            "{}?{}&width={}&height={}",
            self.source_url, index, self.width, self.height
        )
    }
}
