//! Turns raw recognizer observations into the block/line/element hierarchy
//! returned to callers.
//!
//! Every observation becomes exactly one block holding exactly one line with
//! the same text and geometry, and every word of that line reuses the line's
//! box unless a different [`ElementGeometry`] is supplied.

mod coords;
mod words;

use serde::Serialize;

use crate::ocr::{ImageDimensions, RawObservation};

pub use coords::{CornerPoints, Point, corner_points};
pub use words::{ElementGeometry, InheritLineGeometry, WordSpan, split_words};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    pub text: String,
    pub corner_points: CornerPoints,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Line {
    pub text: String,
    pub elements: Vec<Element>,
    pub corner_points: CornerPoints,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub text: String,
    pub lines: Vec<Line>,
    pub corner_points: CornerPoints,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RecognitionResult {
    pub text: String,
    pub blocks: Vec<Block>,
}

pub fn normalize(observations: &[RawObservation], image_size: ImageDimensions) -> RecognitionResult {
    normalize_with(observations, image_size, &InheritLineGeometry)
}

pub fn normalize_with<G: ElementGeometry + ?Sized>(
    observations: &[RawObservation],
    image_size: ImageDimensions,
    geometry: &G,
) -> RecognitionResult {
    let blocks = observations
        .iter()
        .filter_map(|observation| {
            let text = observation.text.as_deref()?;
            let corners = corner_points(&observation.bounding_box, image_size);
            Some(build_block(text, corners, geometry))
        })
        .collect::<Vec<_>>();

    let text = blocks
        .iter()
        .map(|block| block.text.as_str())
        .collect::<Vec<_>>()
        .join("\n");

    RecognitionResult { text, blocks }
}

fn build_block<G: ElementGeometry + ?Sized>(
    text: &str,
    corners: CornerPoints,
    geometry: &G,
) -> Block {
    let elements = split_words(text)
        .iter()
        .map(|word| Element {
            text: word.text.to_string(),
            corner_points: geometry.element_corners(text, &corners, word),
        })
        .collect();

    let line = Line {
        text: text.to_string(),
        elements,
        corner_points: corners,
    };
    Block {
        text: text.to_string(),
        lines: vec![line],
        corner_points: corners,
    }
}
