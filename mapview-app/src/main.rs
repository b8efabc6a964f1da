use anyhow::Context;
use clap::Parser;
use mapview::{
    constants::{API_KEY_ENV, DEFAULT_HEIGHT, DEFAULT_WIDTH},
    prompt,
    ui::MapViewer,
    LatLng, MapSession, NavigationModel, ViewerConfig, ZoomLevel,
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

/// Static map viewer with keyboard navigation
#[derive(Debug, Parser)]
#[command(name = "mapview-app", version, about)]
struct Cli {
    /// Static map API key
    #[arg(long, env = API_KEY_ENV, hide_env_values = true)]
    api_key: Option<String>,

    /// JSON file with viewer settings; flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Static map endpoint
    #[arg(long)]
    base_url: Option<String>,

    /// Image width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Image height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Ask for the starting coordinates and scale on the console
    #[arg(long, conflicts_with_all = ["lat", "lon", "zoom", "scale"])]
    prompt: bool,

    /// Starting latitude
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    lat: Option<f64>,

    /// Starting longitude
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    lon: Option<f64>,

    /// Starting zoom level (0-17); takes precedence over --scale
    #[arg(long, allow_hyphen_values = true)]
    zoom: Option<i32>,

    /// Starting scale in percent (0-100)
    #[arg(long)]
    scale: Option<f64>,
}

impl Cli {
    fn viewer_config(&self) -> anyhow::Result<ViewerConfig> {
        let mut config = match &self.config {
            Some(path) => ViewerConfig::from_json_file(path)
                .with_context(|| format!("reading {}", path.display()))?,
            None => ViewerConfig::default(),
        };
        if let Some(api_key) = &self.api_key {
            config.api_key = api_key.clone();
        }
        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        config.width = self.width.unwrap_or(config.width);
        config.height = self.height.unwrap_or(config.height);
        if let Some(secs) = self.timeout_secs {
            config.timeout = Duration::from_secs(secs);
        }
        Ok(config)
    }

    /// Starting view from flags or the console prompt
    fn initial_view(&self) -> anyhow::Result<Option<(LatLng, ZoomLevel)>> {
        if self.prompt {
            let stdin = std::io::stdin();
            let view = prompt::read_startup(&mut stdin.lock(), &mut std::io::stdout())?;
            return Ok(Some(view));
        }

        let zoom = match (self.zoom, self.scale) {
            (Some(zoom), _) => ZoomLevel::clamped(zoom),
            (None, Some(percent)) => NavigationModel::percent_to_zoom(percent)?,
            (None, None) => ZoomLevel::default(),
        };
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Ok(Some((NavigationModel::validate_coordinate(lat, lon)?, zoom))),
            _ => Ok(None),
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    // Credentials are checked before anything else is built.
    let config = cli.viewer_config()?;
    config.validate()?;

    let initial = cli.initial_view()?;
    let session = MapSession::new(config)?;
    log::info!(
        "starting viewer against {} ({}x{})",
        session.config().base_url,
        session.config().width,
        session.config().height
    );

    let window = [
        session.config().width.max(DEFAULT_WIDTH) as f32 + 50.0,
        session.config().height.max(DEFAULT_HEIGHT) as f32 + 300.0,
    ];
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(window)
            .with_title("Map viewer"),
        ..Default::default()
    };

    eframe::run_native(
        "mapview-app",
        options,
        Box::new(move |cc| {
            let mut viewer = MapViewer::new(cc.egui_ctx.clone(), session);
            if let Some((center, zoom)) = initial {
                viewer.start_at(center, zoom);
            }
            Box::new(viewer)
        }),
    )
    .map_err(|e| anyhow::anyhow!("viewer failed: {e}"))?;

    Ok(())
}
