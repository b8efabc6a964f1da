use super::request::RequestDescriptor;
use crate::core::constants::{DEFAULT_BASE_URL, DEFAULT_LAYER};

/// Anything that can turn a request descriptor into a URL.
pub trait MapSource: Send + Sync {
    /// Build a URL for the requested view.
    fn url(&self, request: &RequestDescriptor) -> String;
}

/// Static map API taking `apikey`, `ll`, `z`, `size` and `l` query parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct StaticMapApi {
    base_url: String,
    layer: String,
}

impl StaticMapApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            layer: DEFAULT_LAYER.to_string(),
        }
    }

    pub fn with_layer(mut self, layer: impl Into<String>) -> Self {
        self.layer = layer.into();
        self
    }
}

impl Default for StaticMapApi {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl MapSource for StaticMapApi {
    fn url(&self, request: &RequestDescriptor) -> String {
        // The provider expects `ll` as longitude,latitude.
        format!(
            "{}?apikey={}&ll={}&z={}&size={},{}&l={}",
            self.base_url,
            urlencoding::encode(&request.api_key),
            request.center.to_lon_lat_string(),
            request.zoom,
            request.width,
            request.height,
            urlencoding::encode(&self.layer)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geo::{LatLng, ZoomLevel};

    #[test]
    fn test_url_grammar() {
        let request = RequestDescriptor::new(
            LatLng::new(55.75, 37.61),
            ZoomLevel::clamped(10),
            600,
            450,
            "KEY",
        );
        let url = StaticMapApi::new("https://maps.example/v1").url(&request);
        assert_eq!(
            url,
            "https://maps.example/v1?apikey=KEY&ll=37.61,55.75&z=10&size=600,450&l=map"
        );
    }

    #[test]
    fn test_longitude_comes_first() {
        let request = RequestDescriptor::new(
            LatLng::new(55.75, 37.61),
            ZoomLevel::default(),
            600,
            450,
            "KEY",
        );
        let url = StaticMapApi::default().url(&request);
        assert!(url.contains("ll=37.61,55.75"));
        assert!(!url.contains("ll=55.75,37.61"));
    }

    #[test]
    fn test_custom_layer() {
        let request = RequestDescriptor::new(LatLng::new(0.0, 0.0), ZoomLevel::MIN, 100, 80, "k");
        let url = StaticMapApi::default().with_layer("sat").url(&request);
        assert!(url.ends_with("&z=0&size=100,80&l=sat"));
    }

    #[test]
    fn test_key_is_percent_encoded() {
        let request = RequestDescriptor::new(LatLng::new(1.0, 2.0), ZoomLevel::MIN, 100, 80, "a&b#c d");
        let url = StaticMapApi::new("http://h/v1").url(&request);
        assert_eq!(url, "http://h/v1?apikey=a%26b%23c%20d&ll=2,1&z=0&size=100,80&l=map");
    }
}
