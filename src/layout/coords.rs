use serde::Serialize;

use crate::ocr::{ImageDimensions, NormalizedRect};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

/// Pixel-space quadrilateral, top-left origin, ordered TL, TR, BR, BL.
pub type CornerPoints = [Point; 4];

/// Maps a bottom-left-origin fractional rect onto the image's pixel grid.
///
/// Edges are summed in floating point and truncated toward zero only at the
/// end, so `TR.x` is `trunc(x + w)` and not `trunc(x) + trunc(w)`.
pub fn corner_points(rect: &NormalizedRect, image_size: ImageDimensions) -> CornerPoints {
    let PixelRect { x, y, w, h } = pixel_rect(rect, image_size);
    [
        point(x, y),
        point(x + w, y),
        point(x + w, y + h),
        point(x, y + h),
    ]
}

/// Untruncated pixel rect, top-left origin.
#[derive(Debug, Clone, Copy, PartialEq)]
struct PixelRect {
    x: f64,
    y: f64,
    w: f64,
    h: f64,
}

fn pixel_rect(rect: &NormalizedRect, image_size: ImageDimensions) -> PixelRect {
    let width = image_size.width as f64;
    let height = image_size.height as f64;
    PixelRect {
        x: rect.x * width,
        y: (1.0 - rect.y - rect.height) * height,
        w: rect.width * width,
        h: rect.height * height,
    }
}

fn point(x: f64, y: f64) -> Point {
    Point {
        x: x as i32,
        y: y as i32,
    }
}
