use crate::{
    core::{
        constants::{MAX_ZOOM, MIN_ZOOM},
        geo::{LatLng, ZoomLevel},
        session::MapSession,
    },
    display::{fit_within, DecodedImage, DisplaySurface},
    input::events::{KeyCode, NavAction},
};
use egui::{Color32, ColorImage, CursorIcon, Rect, Sense, TextureHandle, Ui};

const KEY_BINDINGS: [(egui::Key, KeyCode); 10] = [
    (egui::Key::W, KeyCode::W),
    (egui::Key::A, KeyCode::A),
    (egui::Key::S, KeyCode::S),
    (egui::Key::D, KeyCode::D),
    (egui::Key::ArrowUp, KeyCode::ArrowUp),
    (egui::Key::ArrowDown, KeyCode::ArrowDown),
    (egui::Key::ArrowLeft, KeyCode::ArrowLeft),
    (egui::Key::ArrowRight, KeyCode::ArrowRight),
    (egui::Key::PageUp, KeyCode::PageUp),
    (egui::Key::PageDown, KeyCode::PageDown),
];

#[derive(Debug, Clone, Copy, PartialEq)]
enum DialogKind {
    Info,
    Warning,
    Error,
}

impl DialogKind {
    fn title(self) -> &'static str {
        match self {
            DialogKind::Info => "Info",
            DialogKind::Warning => "Warning",
            DialogKind::Error => "Error",
        }
    }
}

struct Dialog {
    kind: DialogKind,
    message: String,
}

/// Fetch waiting for the next frame, so the busy cursor reaches the screen first
enum PendingOp {
    Load { lat: String, lng: String },
    Start(LatLng),
    Navigate(NavAction),
    Zoom(i32),
}

/// Texture, busy state and dialogs: the egui side of [`DisplaySurface`]
struct MapPanel {
    ctx: egui::Context,
    texture: Option<TextureHandle>,
    dialog: Option<Dialog>,
    busy: bool,
}

impl MapPanel {
    fn notify(&mut self, kind: DialogKind, message: impl Into<String>) {
        self.dialog = Some(Dialog {
            kind,
            message: message.into(),
        });
    }
}

impl DisplaySurface for MapPanel {
    fn show_image(&mut self, image: DecodedImage) {
        let color_image = ColorImage::from_rgba_unmultiplied(image.size(), &image.rgba);
        self.texture = Some(self.ctx.load_texture(
            "static_map",
            color_image,
            egui::TextureOptions::LINEAR,
        ));
    }

    fn show_error(&mut self, message: &str) {
        self.notify(DialogKind::Error, format!("Could not load the map:\n{message}"));
    }

    // The cursor itself is set per frame in `update`.
    fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
    }
}

/// Viewer window: coordinate fields, zoom spinner, pan/zoom buttons and the map image
pub struct MapViewer {
    session: MapSession,
    panel: MapPanel,
    lat_text: String,
    lng_text: String,
    zoom: i32,
    pending: Option<PendingOp>,
}

impl MapViewer {
    pub fn new(ctx: egui::Context, session: MapSession) -> Self {
        let zoom = session.navigation().zoom().value() as i32;
        Self {
            session,
            panel: MapPanel {
                ctx,
                texture: None,
                dialog: None,
                busy: false,
            },
            lat_text: String::new(),
            lng_text: String::new(),
            zoom,
            pending: None,
        }
    }

    /// Fills the fields and loads the first map on the first frame
    pub fn start_at(&mut self, center: LatLng, zoom: ZoomLevel) {
        if let Err(e) = self.session.set_zoom_direct(zoom.value() as i32) {
            self.panel.show_error(&e.to_string());
        }
        self.zoom = self.session.navigation().zoom().value() as i32;
        self.lat_text = format!("{:.6}", center.lat);
        self.lng_text = format!("{:.6}", center.lng);
        self.queue(PendingOp::Start(center));
    }

    fn queue(&mut self, op: PendingOp) {
        self.pending = Some(op);
        self.panel.set_busy(true);
        self.panel.ctx.request_repaint();
    }

    fn run_pending(&mut self) {
        let Some(op) = self.pending.take() else {
            return;
        };
        let shown = match op {
            PendingOp::Load { lat, lng } => self
                .session
                .present(&mut self.panel, |s| s.load(&lat, &lng).map(Some)),
            PendingOp::Start(center) => self
                .session
                .present(&mut self.panel, |s| s.load_center(center).map(Some)),
            PendingOp::Navigate(action) => self.session.present(&mut self.panel, |s| s.apply(action)),
            PendingOp::Zoom(zoom) => self
                .session
                .present(&mut self.panel, |s| s.set_zoom_direct(zoom)),
        };
        if shown {
            self.sync_fields();
        }
        self.zoom = self.session.navigation().zoom().value() as i32;
    }

    fn sync_fields(&mut self) {
        let navigation = self.session.navigation();
        if let Some(center) = navigation.center() {
            self.lat_text = format!("{:.6}", center.lat);
            self.lng_text = format!("{:.6}", center.lng);
        }
        self.zoom = navigation.zoom().value() as i32;
    }

    fn load_from_fields(&mut self) {
        if self.lat_text.trim().is_empty() || self.lng_text.trim().is_empty() {
            self.panel
                .notify(DialogKind::Warning, "Please enter both latitude and longitude");
            return;
        }
        self.queue(PendingOp::Load {
            lat: self.lat_text.clone(),
            lng: self.lng_text.clone(),
        });
    }

    fn navigate(&mut self, action: NavAction) {
        let navigation = self.session.navigation();
        let Some(center) = navigation.center() else {
            self.panel.notify(
                DialogKind::Info,
                "Load a map first by entering coordinates.",
            );
            return;
        };

        if let NavAction::Pan { dx, dy } = action {
            let mut probe = navigation.clone();
            if probe.pan(dx, dy).ok() == Some(center) {
                self.panel.notify(DialogKind::Warning, "The edge of the map has been reached!");
                return;
            }
        }

        self.queue(PendingOp::Navigate(action));
    }

    fn handle_keys(&mut self, ctx: &egui::Context) {
        if ctx.wants_keyboard_input() || self.panel.dialog.is_some() || self.panel.busy {
            return;
        }
        let pressed = ctx.input(|i| {
            KEY_BINDINGS
                .iter()
                .find(|(key, _)| i.key_pressed(*key))
                .map(|(_, code)| *code)
        });
        if let Some(action) = pressed.and_then(NavAction::from_key) {
            self.navigate(action);
        }
    }

    fn coordinates_group(&mut self, ui: &mut Ui) {
        ui.group(|ui| {
            ui.label(egui::RichText::new("Map center").strong());
            egui::Grid::new("coordinates").num_columns(2).show(ui, |ui| {
                ui.label("Latitude:");
                let lat = ui.add(
                    egui::TextEdit::singleline(&mut self.lat_text).hint_text("Latitude (e.g. 55.75)"),
                );
                ui.end_row();

                ui.label("Longitude:");
                let lng = ui.add(
                    egui::TextEdit::singleline(&mut self.lng_text).hint_text("Longitude (e.g. 37.61)"),
                );
                ui.end_row();

                if lat.changed() || lng.changed() {
                    self.session.coordinates_edited();
                }
            });
        });
    }

    fn controls_group(&mut self, ui: &mut Ui) {
        ui.group(|ui| {
            ui.label(egui::RichText::new("Map controls").strong());
            ui.horizontal(|ui| {
                ui.label("Zoom level:");
                let response = ui.add(
                    egui::DragValue::new(&mut self.zoom)
                        .clamp_range(MIN_ZOOM as i32..=MAX_ZOOM as i32)
                        .speed(0.1),
                );
                if response.changed() {
                    self.queue(PendingOp::Zoom(self.zoom));
                }

                ui.separator();
                let buttons = [
                    ("◀", NavAction::WEST),
                    ("▲", NavAction::NORTH),
                    ("▼", NavAction::SOUTH),
                    ("▶", NavAction::EAST),
                    ("+", NavAction::ZoomIn),
                    ("−", NavAction::ZoomOut),
                ];
                for (label, action) in buttons {
                    if ui.button(label).clicked() {
                        self.navigate(action);
                    }
                }
            });
        });
    }

    fn map_area(&self, ui: &mut Ui) {
        let config = self.session.config();
        let size = egui::vec2(config.width as f32, config.height as f32);
        let (rect, _) = ui.allocate_exact_size(size, Sense::hover());
        let painter = ui.painter_at(rect);

        match &self.panel.texture {
            Some(texture) => {
                let [w, h] = texture.size();
                let (fw, fh) = fit_within(w as u32, h as u32, config.width, config.height);
                let image_rect = Rect::from_center_size(rect.center(), egui::vec2(fw as f32, fh as f32));
                painter.image(
                    texture.id(),
                    image_rect,
                    Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                    Color32::WHITE,
                );
            }
            None => {
                painter.rect_filled(rect, 0.0, Color32::from_gray(240));
                painter.text(
                    rect.center(),
                    egui::Align2::CENTER_CENTER,
                    "The map will appear here\nEnter coordinates and press Load map",
                    egui::FontId::proportional(16.0),
                    Color32::from_gray(136),
                );
            }
        }
        painter.rect_stroke(rect, 0.0, egui::Stroke::new(2.0, Color32::from_gray(68)));
    }

    fn busy_cursor(&self, ctx: &egui::Context) {
        if self.panel.busy {
            ctx.output_mut(|o| o.cursor_icon = CursorIcon::Progress);
        }
    }

    fn dialog_window(&mut self, ctx: &egui::Context) {
        let Some(dialog) = &self.panel.dialog else {
            return;
        };
        let mut close = false;
        egui::Window::new(dialog.kind.title())
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(dialog.message.as_str());
                if ui.button("OK").clicked() {
                    close = true;
                }
            });
        if close {
            self.panel.dialog = None;
        }
    }
}

impl eframe::App for MapViewer {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Queued last frame, after the progress cursor was handed to the platform.
        self.run_pending();

        egui::CentralPanel::default().show(ctx, |ui| {
            self.coordinates_group(ui);
            self.controls_group(ui);

            let load = ui.add_enabled(!self.panel.busy, egui::Button::new("Load map by coordinates"));
            if load.clicked() {
                self.load_from_fields();
            }

            ui.add_space(8.0);
            self.map_area(ui);

            if let Some(center) = self.session.navigation().center() {
                ui.label(format!(
                    "Center: {} | Zoom: {}",
                    center,
                    self.session.navigation().zoom()
                ));
            }
        });

        self.handle_keys(ctx);
        self.dialog_window(ctx);
        self.busy_cursor(ctx);
    }
}
