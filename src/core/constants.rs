//! Core constants for the static-map navigation model and the provider API.
//! Keeping them in a single place makes it easier to tweak engine-wide magic numbers.

use std::time::Duration;

/// Lowest zoom level the provider serves (whole world).
pub const MIN_ZOOM: u8 = 0;

/// Highest zoom level the provider serves (street level).
pub const MAX_ZOOM: u8 = 17;

/// Zoom level a fresh navigation state starts at.
pub const DEFAULT_ZOOM: u8 = 10;

/// Pan step in degrees at [`REFERENCE_ZOOM`]. Halves with every zoom level above it.
pub const BASE_STEP_DEGREES: f64 = 0.01;

/// Zoom level at which one pan moves exactly [`BASE_STEP_DEGREES`].
pub const REFERENCE_ZOOM: i32 = 10;

/// Legacy "scale percent" to zoom conversion factor.
pub const SCALE_CONVERSION: f64 = 0.17;

/// Upper bound of the legacy scale percent input.
pub const MAX_SCALE_PERCENT: f64 = 100.0;

/// Default size of the requested image in pixels.
pub const DEFAULT_WIDTH: u32 = 600;
pub const DEFAULT_HEIGHT: u32 = 450;

/// Per-request timeout for the blocking fetch.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(15);

/// Static map endpoint used when none is configured.
pub const DEFAULT_BASE_URL: &str = "https://static-maps.yandex.ru/v1";

/// Map layer requested from the provider.
pub const DEFAULT_LAYER: &str = "map";

/// Environment variable holding the provider API key.
pub const API_KEY_ENV: &str = "API_KEY_STATIC";
