mod geom;
mod parse;
mod preprocess;
mod tesseract;
mod text;

use anyhow::{Context, Result};
use image::{DynamicImage, GenericImageView};
use std::io::Write;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::ocr::{RawObservation, Recognizer};
use crate::settings::Settings;

pub use tesseract::list_tesseract_languages;

/// [`Recognizer`] backed by the `tesseract` command line tool.
#[derive(Debug, Clone)]
pub struct TesseractRecognizer {
    settings: Settings,
}

impl TesseractRecognizer {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}

impl Default for TesseractRecognizer {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl Recognizer for TesseractRecognizer {
    fn recognize(&self, image: &DynamicImage) -> Result<Vec<RawObservation>> {
        let languages = tesseract::normalize_ocr_languages(&self.settings.languages)?;
        let scale = if self.settings.upscale_small_images {
            preprocess::ocr_scale(image.width())
        } else {
            1
        };
        let ocr_image = preprocess::preprocess_for_ocr(image, scale);
        let (width, height) = ocr_image.dimensions();
        debug!(
            "tesseract: languages={} psm={} input={}x{}",
            languages, self.settings.page_segmentation_mode, width, height
        );

        let tmp = write_temp_png(&ocr_image)?;
        let tsv = tesseract::run_tesseract_tsv(
            tmp.path(),
            &languages,
            self.settings.page_segmentation_mode,
            self.settings.dpi,
        )?;
        let lines = parse::parse_tsv_lines(&tsv)?;

        Ok(lines
            .into_iter()
            .map(|line| RawObservation {
                text: line.text,
                bounding_box: geom::to_normalized(&line.bbox, width, height),
            })
            .collect())
    }
}

/// Writes the image where the tesseract binary can read it. The file is
/// removed when the handle drops.
fn write_temp_png(image: &DynamicImage) -> Result<NamedTempFile> {
    let mut tmp = tempfile::Builder::new()
        .suffix(".png")
        .tempfile()
        .with_context(|| "failed to create temp file for OCR")?;
    image
        .write_to(&mut tmp, image::ImageFormat::Png)
        .with_context(|| "failed to write temp image for OCR")?;
    tmp.flush().with_context(|| "failed to flush temp image for OCR")?;
    Ok(tmp)
}
