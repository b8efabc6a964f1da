//! Presentation side of a fetch: decoding the payload and the surface that shows it

use crate::{MapError, Result};

/// RGBA bitmap ready for a display surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl DecodedImage {
    pub fn size(&self) -> [usize; 2] {
        [self.width as usize, self.height as usize]
    }
}

/// Decodes the encoded image returned by the provider.
///
/// Empty and corrupt payloads are reported as [`MapError::Decode`], distinct
/// from transport failures.
pub fn decode_map_image(bytes: &[u8]) -> Result<DecodedImage> {
    if bytes.is_empty() {
        return Err(MapError::Decode("image payload is empty".to_string()));
    }
    let img = image::load_from_memory(bytes)
        .map_err(|e| MapError::Decode(format!("cannot decode map image: {e}")))?;
    let rgba_img = img.to_rgba8();
    let (width, height) = rgba_img.dimensions();
    if width == 0 || height == 0 {
        return Err(MapError::Decode("image has no pixels".to_string()));
    }

    Ok(DecodedImage {
        width,
        height,
        rgba: rgba_img.into_raw(),
    })
}

/// Largest size with the image's aspect ratio that fits inside the bounds
pub fn fit_within(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (0, 0);
    }
    let scale = f64::min(
        max_width as f64 / width as f64,
        max_height as f64 / height as f64,
    );
    (
        ((width as f64 * scale).round() as u32).max(1),
        ((height as f64 * scale).round() as u32).max(1),
    )
}

/// Whatever presents the map to the user.
pub trait DisplaySurface {
    fn show_image(&mut self, image: DecodedImage);

    /// User-facing message for a recoverable error
    fn show_error(&mut self, message: &str);

    /// Busy indicator around a blocking fetch
    fn set_busy(&mut self, _busy: bool) {}
}
