use anyhow::{Result, anyhow};
use image::{DynamicImage, GenericImageView, Rgba, RgbaImage};
use std::io::{Cursor, Read, Write};
use std::net::TcpListener;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::ocr::{ImageDimensions, RawObservation, Recognizer};

pub(crate) fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let image = RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 255]));
    let mut out = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(image)
        .write_to(&mut out, image::ImageFormat::Png)
        .expect("encode png");
    out.into_inner()
}

pub(crate) fn write_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, png_bytes(width, height)).expect("write png");
    path
}

/// Answers one HTTP request on a loopback port with a fixed response and
/// returns the URL to request.
pub(crate) fn serve_once(status: &str, content_type: &str, body: Vec<u8>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback");
    let port = listener.local_addr().expect("local addr").port();
    let head = format!(
        "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        status,
        content_type,
        body.len()
    );
    std::thread::spawn(move || {
        let Ok((mut stream, _)) = listener.accept() else {
            return;
        };
        let mut request = Vec::new();
        let mut chunk = [0u8; 1024];
        while !request.windows(4).any(|window| window == b"\r\n\r\n") {
            match stream.read(&mut chunk) {
                Ok(0) | Err(_) => break,
                Ok(read) => request.extend_from_slice(&chunk[..read]),
            }
        }
        let _ = stream.write_all(head.as_bytes());
        let _ = stream.write_all(&body);
        let _ = stream.flush();
    });
    format!("http://127.0.0.1:{}/image.png", port)
}

/// Recognizer returning a canned answer and recording the image sizes it saw.
pub(crate) struct ScriptedRecognizer {
    answer: std::result::Result<Vec<RawObservation>, String>,
    seen: Mutex<Vec<ImageDimensions>>,
}

impl ScriptedRecognizer {
    pub(crate) fn returning(observations: Vec<RawObservation>) -> Self {
        Self {
            answer: Ok(observations),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn failing(message: &str) -> Self {
        Self {
            answer: Err(message.to_string()),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn seen(&self) -> Vec<ImageDimensions> {
        self.seen.lock().expect("seen lock").clone()
    }
}

impl Recognizer for ScriptedRecognizer {
    fn recognize(&self, image: &DynamicImage) -> Result<Vec<RawObservation>> {
        let (width, height) = image.dimensions();
        self.seen
            .lock()
            .expect("seen lock")
            .push(ImageDimensions { width, height });
        self.answer.clone().map_err(|message| anyhow!(message))
    }
}
