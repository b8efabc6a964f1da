use crate::{
    core::{config::ViewerConfig, geo::LatLng, navigation::NavigationModel},
    display::{decode_map_image, DecodedImage, DisplaySurface},
    input::events::NavAction,
    staticmap::{artifact::ImageArtifact, fetcher::MapFetcher},
    Result,
};

/// One viewing session: navigation state, fetcher and the on-disk artifact.
///
/// Every operation works on a copy of the navigation state and commits it
/// only after the image has been fetched and decoded, so a failed call leaves
/// the view where it was. Constructed and owned by the presentation layer.
pub struct MapSession {
    config: ViewerConfig,
    navigation: NavigationModel,
    fetcher: MapFetcher,
    artifact: ImageArtifact,
}

impl MapSession {
    /// Validates the config first; a missing API key fails here
    pub fn new(config: ViewerConfig) -> Result<Self> {
        config.validate()?;
        let fetcher = MapFetcher::new(&config)?;
        Ok(Self::with_parts(config, fetcher, ImageArtifact::new()))
    }

    pub fn with_parts(config: ViewerConfig, fetcher: MapFetcher, artifact: ImageArtifact) -> Self {
        Self {
            config,
            navigation: NavigationModel::new(),
            fetcher,
            artifact,
        }
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn navigation(&self) -> &NavigationModel {
        &self.navigation
    }

    pub fn artifact(&self) -> &ImageArtifact {
        &self.artifact
    }

    /// Coordinate text changed: the stored image no longer matches the view
    pub fn coordinates_edited(&mut self) {
        self.artifact.invalidate();
    }

    /// Validates text input and shows the map centered there
    pub fn load(&mut self, lat: &str, lng: &str) -> Result<DecodedImage> {
        let center = NavigationModel::parse_coordinate(lat, lng)?;
        self.load_center(center)
    }

    pub fn load_center(&mut self, center: LatLng) -> Result<DecodedImage> {
        if self.navigation.center() != Some(center) {
            self.artifact.invalidate();
        }
        let mut candidate = self.navigation.clone();
        candidate.set_center(center);
        self.show(candidate)
    }

    /// Re-fetches the current view
    pub fn refresh(&mut self) -> Result<DecodedImage> {
        self.show(self.navigation.clone())
    }

    pub fn pan(&mut self, dx: i32, dy: i32) -> Result<DecodedImage> {
        let mut candidate = self.navigation.clone();
        candidate.pan(dx, dy)?;
        self.artifact.invalidate();
        self.show(candidate)
    }

    /// Steps the zoom in. At the upper limit nothing is fetched and `Ok(None)` is returned.
    pub fn zoom_in(&mut self) -> Result<Option<DecodedImage>> {
        let mut candidate = self.navigation.clone();
        candidate.zoom_in()?;
        self.commit_step(candidate)
    }

    /// Steps the zoom out. At the lower limit nothing is fetched and `Ok(None)` is returned.
    pub fn zoom_out(&mut self) -> Result<Option<DecodedImage>> {
        let mut candidate = self.navigation.clone();
        candidate.zoom_out()?;
        self.commit_step(candidate)
    }

    pub fn apply(&mut self, action: NavAction) -> Result<Option<DecodedImage>> {
        match action {
            NavAction::Pan { dx, dy } => self.pan(dx, dy).map(Some),
            NavAction::ZoomIn => self.zoom_in(),
            NavAction::ZoomOut => self.zoom_out(),
        }
    }

    /// Stores the zoom; reloads only once a center exists
    pub fn set_zoom_direct(&mut self, zoom: i32) -> Result<Option<DecodedImage>> {
        let mut candidate = self.navigation.clone();
        candidate.set_zoom_direct(zoom);
        self.commit_zoom(candidate)
    }

    /// Legacy percent input; reloads only once a center exists
    pub fn set_zoom_from_percent(&mut self, percent: f64) -> Result<Option<DecodedImage>> {
        let mut candidate = self.navigation.clone();
        candidate.set_zoom_from_percent(percent)?;
        self.commit_zoom(candidate)
    }

    /// Runs one operation against a surface with the busy indicator around it.
    /// Returns whether the surface received a new image; `Ok(None)` leaves it as is.
    pub fn present<S, F>(&mut self, surface: &mut S, op: F) -> bool
    where
        S: DisplaySurface + ?Sized,
        F: FnOnce(&mut Self) -> Result<Option<DecodedImage>>,
    {
        surface.set_busy(true);
        let result = op(self);
        surface.set_busy(false);

        match result {
            Ok(Some(image)) => {
                surface.show_image(image);
                true
            }
            Ok(None) => false,
            Err(e) => {
                log::warn!("map update failed: {}", e);
                surface.show_error(&e.to_string());
                false
            }
        }
    }

    fn commit_zoom(&mut self, candidate: NavigationModel) -> Result<Option<DecodedImage>> {
        if candidate.has_center() {
            self.show(candidate).map(Some)
        } else {
            self.navigation = candidate;
            Ok(None)
        }
    }

    fn commit_step(&mut self, candidate: NavigationModel) -> Result<Option<DecodedImage>> {
        if candidate.zoom() == self.navigation.zoom() {
            log::debug!("zoom already at {}, nothing to fetch", candidate.zoom());
            return Ok(None);
        }
        self.show(candidate).map(Some)
    }

    fn show(&mut self, candidate: NavigationModel) -> Result<DecodedImage> {
        let request =
            candidate.build_request(&self.config.api_key, self.config.width, self.config.height)?;
        let bytes = self.fetcher.fetch(&request)?;
        let image = decode_map_image(&bytes)?;

        if let Err(e) = self.artifact.store(&bytes) {
            log::warn!("could not keep a copy of the map image: {}", e);
        }
        self.navigation = candidate;
        Ok(image)
    }
}
