use anyhow::{Context, Result, anyhow};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use image::{DynamicImage, GenericImageView};
use std::path::PathBuf;
use tracing::info;
use url::Url;

use crate::error::RecognizeError;
use crate::ocr::ImageDimensions;

/// Where the image bytes for a request come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    File(PathBuf),
    Remote(Url),
    Inline { mime: Option<String>, payload: String },
    Unsupported(String),
}

impl ImageSource {
    /// Parses a host-supplied URI. Bare absolute paths are taken as files.
    pub fn parse(image_uri: &str) -> Result<Self, RecognizeError> {
        let trimmed = image_uri.trim();
        if trimmed.starts_with('/') {
            return Ok(Self::File(PathBuf::from(trimmed)));
        }
        let url = Url::parse(trimmed).map_err(|_| RecognizeError::InvalidUri {
            uri: image_uri.to_string(),
        })?;

        match url.scheme() {
            "file" => match url.to_file_path() {
                Ok(path) => Ok(Self::File(path)),
                Err(()) => Err(RecognizeError::InvalidUri {
                    uri: image_uri.to_string(),
                }),
            },
            "http" | "https" => Ok(Self::Remote(url)),
            "data" => {
                let (mime, payload) = split_data_uri(url.path()).ok_or_else(|| {
                    RecognizeError::InvalidUri {
                        uri: image_uri.to_string(),
                    }
                })?;
                Ok(Self::Inline { mime, payload })
            }
            other => Ok(Self::Unsupported(other.to_string())),
        }
    }

    fn kind(&self) -> &str {
        match self {
            Self::File(_) => "file",
            Self::Remote(_) => "remote",
            Self::Inline { .. } => "data",
            Self::Unsupported(scheme) => scheme,
        }
    }

    /// Fetches the raw bytes. A single attempt, no caching.
    pub async fn fetch(&self) -> Result<Vec<u8>> {
        info!("ocr: loading image ({})", self.kind());
        match self {
            Self::File(path) => tokio::fs::read(path)
                .await
                .with_context(|| format!("failed to read image file: {}", path.display())),
            Self::Remote(url) => fetch_remote(url).await,
            Self::Inline { payload, .. } => BASE64
                .decode(payload.as_bytes())
                .with_context(|| "failed to decode base64 image data"),
            Self::Unsupported(scheme) => Err(anyhow!("unsupported URI scheme: {}", scheme)),
        }
    }
}

/// `data:[<mime>][;base64],<payload>`; only base64 payloads carry images.
fn split_data_uri(path: &str) -> Option<(Option<String>, String)> {
    let (meta, payload) = path.split_once(',')?;
    let mut parts = meta.split(';');
    let mime = parts
        .next()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string);
    if !parts.any(|part| part.trim().eq_ignore_ascii_case("base64")) {
        return None;
    }
    Some((mime, payload.trim().to_string()))
}

async fn fetch_remote(url: &Url) -> Result<Vec<u8>> {
    let response = reqwest::get(url.clone())
        .await
        .with_context(|| format!("failed to download image: {}", url))?;
    if !response.status().is_success() {
        return Err(anyhow!(
            "failed to download image: {} (status {})",
            url,
            response.status()
        ));
    }
    let bytes = response
        .bytes()
        .await
        .with_context(|| "failed to read image bytes")?;
    Ok(bytes.to_vec())
}

/// Sniffs and decodes image bytes.
pub fn decode_image(bytes: &[u8]) -> Result<(DynamicImage, ImageDimensions)> {
    if bytes.is_empty() {
        return Err(anyhow!("image data is empty"));
    }
    if let Some(kind) = infer::get(bytes) {
        if !infer::is_image(bytes) {
            return Err(anyhow!("data is not an image (detected {})", kind.mime_type()));
        }
    }
    let image = image::load_from_memory(bytes).with_context(|| "failed to decode image")?;
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(anyhow!("image has no pixels ({}x{})", width, height));
    }
    Ok((image, ImageDimensions { width, height }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{png_bytes, serve_once, write_png};
    use tempfile::tempdir;

    #[test]
    fn garbage_is_an_invalid_uri() {
        let err = ImageSource::parse("::::").expect_err("invalid");
        assert_eq!(err.code(), "INVALID_URI");
        assert!(ImageSource::parse("not a uri").is_err());
        assert!(ImageSource::parse("").is_err());
    }

    #[test]
    fn recognizes_supported_schemes() {
        assert_eq!(
            ImageSource::parse("file:///tmp/scan.png").expect("file"),
            ImageSource::File(PathBuf::from("/tmp/scan.png"))
        );
        assert_eq!(
            ImageSource::parse("/tmp/scan.png").expect("path"),
            ImageSource::File(PathBuf::from("/tmp/scan.png"))
        );
        assert!(matches!(
            ImageSource::parse("https://example.com/a.png").expect("remote"),
            ImageSource::Remote(_)
        ));
        assert_eq!(
            ImageSource::parse("content://media/external/images/1").expect("content"),
            ImageSource::Unsupported("content".to_string())
        );
    }

    #[test]
    fn data_uri_requires_base64() {
        assert_eq!(
            ImageSource::parse("data:image/png;base64,AAAA").expect("data"),
            ImageSource::Inline {
                mime: Some("image/png".to_string()),
                payload: "AAAA".to_string(),
            }
        );
        assert!(ImageSource::parse("data:text/plain,hello").is_err());
    }

    #[tokio::test]
    async fn missing_file_fails_to_load() {
        let dir = tempdir().expect("tempdir");
        let source = ImageSource::File(dir.path().join("missing.png"));
        let err = source.fetch().await.expect_err("missing");
        assert!(err.to_string().contains("missing.png"));
    }

    #[tokio::test]
    async fn unsupported_scheme_fails_to_load() {
        let source = ImageSource::Unsupported("ph".to_string());
        assert!(source.fetch().await.is_err());
    }

    #[tokio::test]
    async fn reads_file_and_inline_sources() {
        let dir = tempdir().expect("tempdir");
        let path = write_png(dir.path(), "scan.png", 8, 6);
        let from_file = ImageSource::File(path).fetch().await.expect("file bytes");

        let inline = ImageSource::Inline {
            mime: None,
            payload: BASE64.encode(png_bytes(8, 6)),
        };
        let from_data = inline.fetch().await.expect("data bytes");
        assert_eq!(from_file, from_data);
    }

    #[tokio::test]
    async fn downloads_remote_bytes() {
        let uri = serve_once("200 OK", "image/png", png_bytes(9, 4));
        let source = ImageSource::parse(&uri).expect("parse");
        assert!(matches!(source, ImageSource::Remote(_)));

        let bytes = source.fetch().await.expect("download");
        let (_, size) = decode_image(&bytes).expect("decode");
        assert_eq!(size, ImageDimensions { width: 9, height: 4 });
    }

    #[tokio::test]
    async fn remote_error_status_fails_to_load() {
        let uri = serve_once("500 Internal Server Error", "text/plain", b"boom".to_vec());
        let err = ImageSource::parse(&uri)
            .expect("parse")
            .fetch()
            .await
            .expect_err("server error");
        assert!(err.to_string().contains("500"), "{err}");
    }

    #[test]
    fn decodes_png_dimensions() {
        let (_, size) = decode_image(&png_bytes(12, 5)).expect("decode");
        assert_eq!(size, ImageDimensions { width: 12, height: 5 });
    }

    #[test]
    fn rejects_non_image_payloads() {
        let err = decode_image(b"%PDF-1.7\n%\xe2\xe3\xcf\xd3\n").expect_err("pdf");
        assert!(err.to_string().contains("not an image"));
        assert!(decode_image(b"plain text, not pixels").is_err());
        assert!(decode_image(&[]).is_err());
    }
}
