use crate::ocr::NormalizedRect;

/// Pixel box in top-left-origin image coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct BBoxPx {
    pub(super) x: u32,
    pub(super) y: u32,
    pub(super) w: u32,
    pub(super) h: u32,
}

pub(super) fn union_bbox(a: &BBoxPx, b: &BBoxPx) -> BBoxPx {
    let x1 = a.x.min(b.x);
    let y1 = a.y.min(b.y);
    let x2 = (a.x + a.w).max(b.x + b.w);
    let y2 = (a.y + a.h).max(b.y + b.h);
    BBoxPx {
        x: x1,
        y: y1,
        w: x2 - x1,
        h: y2 - y1,
    }
}

/// Converts a tesseract pixel box into the bottom-left-origin fractional
/// space that recognizers report in.
pub(super) fn to_normalized(bbox: &BBoxPx, width: u32, height: u32) -> NormalizedRect {
    let width = width.max(1) as f64;
    let height = height.max(1) as f64;

    let x = (bbox.x as f64 / width).clamp(0.0, 1.0);
    let w = (bbox.w as f64 / width).clamp(0.0, 1.0 - x);
    let top = (bbox.y as f64 / height).clamp(0.0, 1.0);
    let h = (bbox.h as f64 / height).clamp(0.0, 1.0 - top);
    NormalizedRect {
        x,
        y: 1.0 - top - h,
        width: w,
        height: h,
    }
}
