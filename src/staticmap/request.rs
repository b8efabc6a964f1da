use crate::core::geo::{LatLng, ZoomLevel};

const REDACTED_KEY: &str = "REDACTED";

/// Everything needed to ask the provider for one static image.
///
/// A pure projection of the navigation state plus display and auth
/// parameters. Built fresh for every fetch.
#[derive(Clone, PartialEq)]
pub struct RequestDescriptor {
    pub center: LatLng,
    pub zoom: ZoomLevel,
    pub width: u32,
    pub height: u32,
    pub api_key: String,
}

impl RequestDescriptor {
    pub fn new(
        center: LatLng,
        zoom: ZoomLevel,
        width: u32,
        height: u32,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            center,
            zoom,
            width,
            height,
            api_key: api_key.into(),
        }
    }

    /// Same view with the key replaced by a placeholder, for messages and logs
    pub fn redacted(&self) -> Self {
        Self {
            api_key: REDACTED_KEY.to_string(),
            ..self.clone()
        }
    }
}

// Keeps the key out of logs.
impl std::fmt::Debug for RequestDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestDescriptor")
            .field("center", &self.center)
            .field("zoom", &self.zoom)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("api_key", &"<redacted>")
            .finish()
    }
}
