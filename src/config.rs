use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Canvas geometry for rasterizing sketches.
///
/// Sketch files carry no dimensions of their own, so decoding and the
/// viewer window fall back to the canonical 200×200 surface unless a
/// `canvas.json` next to the working directory says otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanvasConfig {
    pub width: u32,
    pub height: u32,
    /// Grayscale value the canvas is cleared to before drawing
    #[serde(default)]
    pub background: u8,
}

impl CanvasConfig {
    /// Load config from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, String> {
        let json = fs::read_to_string(path).map_err(|e| e.to_string())?;
        serde_json::from_str(&json).map_err(|e| e.to_string())
    }
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 200,
            height: 200,
            background: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_canvas_is_canonical() {
        let config = CanvasConfig::default();
        assert_eq!((config.width, config.height), (200, 200));
        assert_eq!(config.background, 0);
    }

    #[test]
    fn test_background_defaults_when_absent() {
        let config: CanvasConfig = serde_json::from_str(r#"{"width":64,"height":32}"#).unwrap();
        assert_eq!((config.width, config.height), (64, 32));
        assert_eq!(config.background, 0);
    }
}
