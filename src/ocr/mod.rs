mod engine;

use anyhow::Result;
use image::DynamicImage;
use serde::Serialize;

pub use engine::{TesseractRecognizer, list_tesseract_languages};

/// Fractional box reported by a recognizer.
///
/// Origin is the bottom-left corner of the image and `y` grows upward, all
/// values in `0.0..=1.0` of the image size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NormalizedRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl NormalizedRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}

/// One recognized text line.
///
/// `text` is `None` when the engine located a line but could not produce a
/// candidate string for it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawObservation {
    pub text: Option<String>,
    pub bounding_box: NormalizedRect,
}

impl RawObservation {
    pub fn new(text: impl Into<String>, bounding_box: NormalizedRect) -> Self {
        Self {
            text: Some(text.into()),
            bounding_box,
        }
    }

    pub fn without_candidate(bounding_box: NormalizedRect) -> Self {
        Self {
            text: None,
            bounding_box,
        }
    }
}

/// Everything the adapter hands to the layout normalizer for one image.
#[derive(Debug, Clone)]
pub struct ObservationSet {
    pub observations: Vec<RawObservation>,
    pub image_size: ImageDimensions,
}

/// A text recognition engine.
///
/// Implementations run synchronously; the pipeline calls them from a
/// blocking worker. Observations must be returned in reading order.
pub trait Recognizer: Send + Sync {
    fn recognize(&self, image: &DynamicImage) -> Result<Vec<RawObservation>>;
}
