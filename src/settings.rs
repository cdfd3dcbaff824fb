use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

const SETTINGS_FILE: &str = "text-recognition.toml";
const LOCAL_SETTINGS_FILE: &str = "text-recognition.local.toml";

/// Recognizer tuning. Nothing here changes the shape of a result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Tesseract language codes, `+`-separated.
    pub languages: String,
    pub page_segmentation_mode: u32,
    pub dpi: u32,
    pub upscale_small_images: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            languages: "eng".to_string(),
            page_segmentation_mode: 6,
            dpi: 300,
            upscale_small_images: true,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct SettingsFile {
    ocr: Option<OcrSettings>,
}

#[derive(Debug, Default, Deserialize)]
struct OcrSettings {
    languages: Option<String>,
    psm: Option<u32>,
    dpi: Option<u32>,
    upscale: Option<bool>,
}

/// Loads settings from the working directory, then `extra_path` on top.
pub fn load_settings(extra_path: Option<&Path>) -> Result<Settings> {
    let mut ordered_paths = vec![
        PathBuf::from(SETTINGS_FILE),
        PathBuf::from(LOCAL_SETTINGS_FILE),
    ];
    if let Some(extra) = extra_path {
        if !extra.exists() {
            return Err(anyhow!("settings file not found: {}", extra.display()));
        }
        ordered_paths.push(extra.to_path_buf());
    }

    let mut settings = Settings::default();
    for path in ordered_paths {
        if path.exists() {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("failed to read settings: {}", path.display()))?;
            settings.merge_str(&content)
                .with_context(|| format!("failed to parse settings: {}", path.display()))?;
        }
    }
    Ok(settings)
}

impl Settings {
    fn merge_str(&mut self, content: &str) -> Result<()> {
        let parsed: SettingsFile = toml::from_str(content)?;
        self.merge(parsed);
        Ok(())
    }

    fn merge(&mut self, incoming: SettingsFile) {
        let Some(ocr) = incoming.ocr else {
            return;
        };
        if let Some(languages) = ocr.languages {
            if !languages.trim().is_empty() {
                self.languages = languages.trim().to_string();
            }
        }
        if let Some(psm) = ocr.psm {
            if psm > 0 {
                self.page_segmentation_mode = psm;
            }
        }
        if let Some(dpi) = ocr.dpi {
            if dpi > 0 {
                self.dpi = dpi;
            }
        }
        if let Some(upscale) = ocr.upscale {
            self.upscale_small_images = upscale;
        }
    }
}
