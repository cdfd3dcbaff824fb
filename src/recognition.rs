use anyhow::anyhow;
use std::sync::Arc;
use tracing::{debug, info};

use crate::error::RecognizeError;
use crate::layout::{self, RecognitionResult};
use crate::ocr::{ObservationSet, Recognizer};
use crate::source::{self, ImageSource};

/// Runs one image through loading, recognition and layout normalization.
///
/// Holds no per-request state; concurrent calls on the same value share
/// only the recognizer.
#[derive(Debug)]
pub struct TextRecognizer<R> {
    recognizer: Arc<R>,
}

impl<R> Clone for TextRecognizer<R> {
    fn clone(&self) -> Self {
        Self {
            recognizer: Arc::clone(&self.recognizer),
        }
    }
}

impl<R: Recognizer + 'static> TextRecognizer<R> {
    pub fn new(recognizer: R) -> Self {
        Self {
            recognizer: Arc::new(recognizer),
        }
    }

    pub fn recognizer(&self) -> &R {
        &self.recognizer
    }

    pub async fn recognize_text(&self, image_uri: &str) -> Result<RecognitionResult, RecognizeError> {
        let set = self.observe(image_uri).await?;
        let result = layout::normalize(&set.observations, set.image_size);
        info!("ocr: {} block(s) recognized", result.blocks.len());
        Ok(result)
    }

    /// Adapter half of the pipeline: URI to raw observations.
    pub async fn observe(&self, image_uri: &str) -> Result<ObservationSet, RecognizeError> {
        let source = ImageSource::parse(image_uri)?;
        let bytes = source
            .fetch()
            .await
            .map_err(|err| RecognizeError::image_load(image_uri, err))?;

        let uri = image_uri.to_string();
        let recognizer = Arc::clone(&self.recognizer);
        let set =
            tokio::task::spawn_blocking(move || decode_and_recognize(&*recognizer, &bytes, &uri))
                .await
                .map_err(|err| {
                    RecognizeError::processing(anyhow!("recognition task failed: {}", err))
                })??;

        if set.observations.is_empty() {
            return Err(RecognizeError::Processing {
                reason: "No text recognition results found".to_string(),
            });
        }
        debug!("ocr: {} observation(s)", set.observations.len());
        Ok(set)
    }
}

/// Decoding and recognition are both CPU bound and run together on the
/// blocking pool.
fn decode_and_recognize<R: Recognizer + ?Sized>(
    recognizer: &R,
    bytes: &[u8],
    image_uri: &str,
) -> Result<ObservationSet, RecognizeError> {
    let (image, image_size) =
        source::decode_image(bytes).map_err(|err| RecognizeError::image_load(image_uri, err))?;
    debug!("ocr: decoded {}x{}", image_size.width, image_size.height);

    let observations = recognizer
        .recognize(&image)
        .map_err(RecognizeError::processing)?;
    Ok(ObservationSet {
        observations,
        image_size,
    })
}
