//! # mapview
//!
//! A small static-map viewer library. A [`NavigationModel`] owns the current
//! center and zoom, turns pan/zoom gestures into new coordinates and builds
//! the request that a [`MapFetcher`] sends to a static-map API. The returned
//! image bytes are decoded for whatever display surface presents them.

pub mod core;
pub mod display;
pub mod input;
pub mod prompt;
pub mod staticmap;
#[cfg(feature = "egui")]
pub mod ui;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    config::ViewerConfig,
    geo::{LatLng, ZoomLevel},
    navigation::NavigationModel,
    session::MapSession,
};

pub use display::{decode_map_image, DecodedImage, DisplaySurface};

pub use input::events::{KeyCode, NavAction};

pub use staticmap::{
    artifact::ImageArtifact,
    fetcher::MapFetcher,
    request::RequestDescriptor,
    source::{MapSource, StaticMapApi},
};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("Invalid coordinates: {0}")]
    InvalidCoordinate(String),

    #[error("Invalid scale: {0}")]
    InvalidScale(String),

    #[error("No map center set; enter coordinates first")]
    NoCenter,

    #[error("Failed to fetch {url}{}: {reason}", status_suffix(.status))]
    Transport {
        url: String,
        status: Option<u16>,
        reason: String,
    },

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Missing credential: {0}")]
    MissingCredential(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl MapError {
    /// HTTP status attached to a transport failure, if the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            MapError::Transport { status, .. } => *status,
            _ => None,
        }
    }

    /// Whether the session can continue after this error.
    pub fn is_fatal(&self) -> bool {
        matches!(self, MapError::MissingCredential(_))
    }
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" (HTTP {s})")).unwrap_or_default()
}

/// Error type alias for convenience
pub type Error = MapError;
