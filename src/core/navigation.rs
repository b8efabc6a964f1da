use crate::core::constants::{BASE_STEP_DEGREES, REFERENCE_ZOOM};
use crate::core::geo::{LatLng, ZoomLevel};
use crate::staticmap::request::RequestDescriptor;
use crate::{MapError, Result};
use serde::{Deserialize, Serialize};

/// Manages where the view currently is: the center coordinate and zoom level.
///
/// The center stays `None` until the first valid coordinate is accepted; pan
/// and key-driven zoom are rejected with [`MapError::NoCenter`] before that.
/// A single owner mutates the state through `&mut self`; nothing here is
/// meant to be shared across threads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NavigationModel {
    center: Option<LatLng>,
    zoom: ZoomLevel,
}

impl NavigationModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an already accepted view
    pub fn with_view(center: LatLng, zoom: ZoomLevel) -> Self {
        Self {
            center: Some(center),
            zoom,
        }
    }

    /// Checks a raw latitude/longitude pair. No side effects.
    pub fn validate_coordinate(lat: f64, lng: f64) -> Result<LatLng> {
        LatLng::try_new(lat, lng)
    }

    /// Same as [`Self::validate_coordinate`] for text input fields
    pub fn parse_coordinate(lat: &str, lng: &str) -> Result<LatLng> {
        LatLng::parse(lat, lng)
    }

    pub fn center(&self) -> Option<LatLng> {
        self.center
    }

    pub fn zoom(&self) -> ZoomLevel {
        self.zoom
    }

    pub fn has_center(&self) -> bool {
        self.center.is_some()
    }

    /// Replaces the center unconditionally; the caller validates first
    pub fn set_center(&mut self, center: LatLng) {
        log::debug!("center set to {}", center);
        self.center = Some(center);
    }

    /// Stores a raw zoom integer, clamped into the supported range
    pub fn set_zoom_direct(&mut self, zoom: i32) -> ZoomLevel {
        self.zoom = ZoomLevel::clamped(zoom);
        self.zoom
    }

    /// Legacy scale percent input: `floor(0.17 * percent)`, clamped
    pub fn percent_to_zoom(percent: f64) -> Result<ZoomLevel> {
        ZoomLevel::from_percent(percent)
    }

    /// Stores the zoom derived from a scale percent. Leaves the zoom untouched on error.
    pub fn set_zoom_from_percent(&mut self, percent: f64) -> Result<ZoomLevel> {
        self.zoom = Self::percent_to_zoom(percent)?;
        Ok(self.zoom)
    }

    /// Degrees moved by one pan unit at the given zoom
    pub fn pan_step(zoom: ZoomLevel) -> f64 {
        BASE_STEP_DEGREES / 2_f64.powi(zoom.value() as i32 - REFERENCE_ZOOM)
    }

    /// Moves the center by `dx`/`dy` pan units, saturating at the map edge.
    ///
    /// Positive `dx` moves east, positive `dy` moves north. Does not fetch.
    pub fn pan(&mut self, dx: i32, dy: i32) -> Result<LatLng> {
        let center = self.center.ok_or(MapError::NoCenter)?;
        let step = Self::pan_step(self.zoom);
        let moved = center.offset_clamped(dy as f64 * step, dx as f64 * step);
        self.center = Some(moved);
        Ok(moved)
    }

    /// No-op at the maximum zoom
    pub fn zoom_in(&mut self) -> Result<ZoomLevel> {
        self.center.ok_or(MapError::NoCenter)?;
        self.zoom = self.zoom.increment();
        Ok(self.zoom)
    }

    /// No-op at zoom zero
    pub fn zoom_out(&mut self) -> Result<ZoomLevel> {
        self.center.ok_or(MapError::NoCenter)?;
        self.zoom = self.zoom.decrement();
        Ok(self.zoom)
    }

    /// Projects the current view plus display/auth parameters into a request
    pub fn build_request(&self, api_key: &str, width: u32, height: u32) -> Result<RequestDescriptor> {
        let center = self.center.ok_or(MapError::NoCenter)?;
        Ok(RequestDescriptor::new(center, self.zoom, width, height, api_key))
    }
}
