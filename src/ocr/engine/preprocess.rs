use image::DynamicImage;

/// Grayscale copy of `image` with transparency flattened onto white,
/// optionally upscaled, and contrast-stretched for tesseract.
pub(super) fn preprocess_for_ocr(image: &DynamicImage, scale: u32) -> DynamicImage {
    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();
    let mut luma = image::GrayImage::new(width, height);

    for (x, y, pixel) in rgba.enumerate_pixels() {
        let [r, g, b, a] = pixel.0;
        let alpha = a as f32 / 255.0;
        let r = r as f32 * alpha + 255.0 * (1.0 - alpha);
        let g = g as f32 * alpha + 255.0 * (1.0 - alpha);
        let b = b as f32 * alpha + 255.0 * (1.0 - alpha);
        let value = (0.299 * r + 0.587 * g + 0.114 * b).round() as u8;
        luma.put_pixel(x, y, image::Luma([value]));
    }

    let resized = if scale > 1 {
        image::imageops::resize(
            &luma,
            width.saturating_mul(scale),
            height.saturating_mul(scale),
            image::imageops::FilterType::Lanczos3,
        )
    } else {
        luma
    };

    DynamicImage::ImageLuma8(contrast_stretch(resized))
}

/// Upscale factor for narrow images; tesseract struggles with glyphs only a
/// few pixels tall.
pub(super) fn ocr_scale(width: u32) -> u32 {
    let max_width = 6000u32;
    let mut scale = 3u32;
    while width.saturating_mul(scale) > max_width && scale > 1 {
        scale -= 1;
    }
    scale.max(1)
}

fn contrast_stretch(mut image: image::GrayImage) -> image::GrayImage {
    let (min, max) = image
        .pixels()
        .fold((255u8, 0u8), |(min, max), pixel| {
            (min.min(pixel[0]), max.max(pixel[0]))
        });
    if max <= min {
        return image;
    }

    let scale = 255.0 / (max as f32 - min as f32);
    for pixel in image.pixels_mut() {
        pixel[0] = (pixel[0].saturating_sub(min) as f32 * scale).round() as u8;
    }
    image
}
