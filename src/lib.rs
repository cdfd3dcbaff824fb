pub mod error;
mod ext;
pub mod layout;
pub mod logging;
pub mod ocr;
mod recognition;
pub mod settings;
pub mod source;
#[cfg(test)]
mod test_util;

pub use error::{RecognizeError, Rejection};
pub use layout::{Block, CornerPoints, Element, Line, Point, RecognitionResult};
pub use ocr::{
    ImageDimensions, NormalizedRect, ObservationSet, RawObservation, Recognizer,
    TesseractRecognizer,
};
pub use recognition::TextRecognizer;
pub use settings::Settings;

/// Recognizes the text in the image at `image_uri` with tesseract and the
/// default settings.
pub async fn recognize_text(image_uri: &str) -> Result<RecognitionResult, RecognizeError> {
    recognize_text_with_settings(image_uri, Settings::default()).await
}

pub async fn recognize_text_with_settings(
    image_uri: &str,
    settings: Settings,
) -> Result<RecognitionResult, RecognizeError> {
    TextRecognizer::new(TesseractRecognizer::new(settings))
        .recognize_text(image_uri)
        .await
}
