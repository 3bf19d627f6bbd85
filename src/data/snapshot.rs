use std::path::Path;

/// Copy the pixels inside `rect` (in points) out of a full-window screenshot
/// as tightly packed RGBA. With no rect the whole screenshot is returned.
pub fn crop_rgba(
    image: &egui::ColorImage,
    rect: Option<egui::Rect>,
    pixels_per_point: f32,
) -> (Vec<u8>, usize, usize) {
    let full_w = image.width();
    let full_h = image.height();

    let Some(rect) = rect else {
        let rgba = image
            .pixels
            .iter()
            .flat_map(|c| [c.r(), c.g(), c.b(), c.a()])
            .collect();
        return (rgba, full_w, full_h);
    };

    let x0 = ((rect.left() * pixels_per_point).max(0.0) as usize).min(full_w);
    let y0 = ((rect.top() * pixels_per_point).max(0.0) as usize).min(full_h);
    let x1 = ((rect.right() * pixels_per_point).ceil().max(0.0) as usize).min(full_w);
    let y1 = ((rect.bottom() * pixels_per_point).ceil().max(0.0) as usize).min(full_h);
    let width = x1.saturating_sub(x0);
    let height = y1.saturating_sub(y0);

    let mut cropped = Vec::with_capacity(width * height * 4);
    for row in y0..y1 {
        for col in x0..x1 {
            let c = image.pixels[row * full_w + col];
            cropped.extend_from_slice(&[c.r(), c.g(), c.b(), c.a()]);
        }
    }
    (cropped, width, height)
}

pub fn save_png(path: &Path, rgba: Vec<u8>, width: usize, height: usize) -> Result<(), String> {
    let img = image::RgbaImage::from_raw(width as u32, height as u32, rgba)
        .ok_or_else(|| "Screenshot buffer has the wrong size".to_string())?;
    img.save(path)
        .map_err(|e| format!("Failed to save image: {e}"))?;
    tracing::info!("Saved plot image to {:?}", path);
    Ok(())
}

/// Ask for a destination and write the image there as PNG.
pub fn save_png_with_dialog(
    rgba: Vec<u8>,
    width: usize,
    height: usize,
    suggested_name: &str,
) -> Result<(), String> {
    let Some(path) = rfd::FileDialog::new()
        .set_file_name(suggested_name)
        .add_filter("PNG Image", &["png"])
        .save_file()
    else {
        return Ok(());
    };
    save_png(&path, rgba, width, height)
}
