//! Relume GUI Application
//!
//! Interactive per-region brightness editing using egui. The user draws
//! rectangular regions on the processed preview, adjusts their brightness
//! with a slider, and sees the composited result live.

mod app_state;
mod router;

use clap::Parser;
use eframe::egui;
use relume_core::{
    config, load_image, render, verbose_println, RenderSettings, BRIGHTNESS_MAX, BRIGHTNESS_MIN,
};
use std::path::PathBuf;

use app_state::AppState;
use router::{rect_from_drag, Router, RouterState, UiEvent};

#[derive(Parser)]
#[command(name = "relume")]
#[command(version, about = "Interactive per-region image brightness editor", long_about = None)]
struct Cli {
    /// Image to open at startup (overrides the config file)
    #[arg(value_name = "IMAGE")]
    image: Option<PathBuf>,

    /// Config file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print diagnostic output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), eframe::Error> {
    let cli = Cli::parse();
    config::set_verbose(cli.verbose);

    let handle = config::load_app_config(cli.config.as_deref());
    if let Some(source) = &handle.source {
        verbose_println!("[relume] Loaded config from {}", source.display());
    }
    for warning in &handle.warnings {
        verbose_println!("[relume] Config warning: {}", warning);
    }

    // A configured image that fails to load is fatal; there is nothing to
    // edit without a base image.
    let image_path = cli.image.or_else(|| handle.config.image_path.clone());
    let startup_image = match image_path {
        Some(path) => match load_image(&path) {
            Ok(base) => Some((base, path)),
            Err(e) => {
                eprintln!("relume: cannot start without a base image: {}", e);
                std::process::exit(1);
            }
        },
        None => None,
    };

    let render_settings = RenderSettings {
        dash_length: handle.config.dash_length,
        highlight: handle.config.highlight,
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_title("Relume - Region Brightness Editor"),
        ..Default::default()
    };

    eframe::run_native(
        "Relume",
        options,
        Box::new(move |_cc| {
            let mut app = RelumeApp::new(render_settings);
            if let Some((base, path)) = startup_image {
                eprintln!("[LOAD] {}: {}x{}", path.display(), base.width, base.height);
                app.state.set_image(base, Some(path));
            }
            Ok(Box::new(app))
        }),
    )
}

struct RelumeApp {
    // Image and region state, owned by the event router
    state: AppState,
    router: Router,

    // Display textures
    display_texture: Option<egui::TextureHandle>,
    original_texture: Option<egui::TextureHandle>,

    // UI state
    show_original: bool,
    needs_render: bool,
    error_message: Option<String>,

    // In-progress selection drag, in image pixel coordinates
    drag_start: Option<(i32, i32)>,
    drag_current: Option<(i32, i32)>,
}

impl RelumeApp {
    fn new(render_settings: RenderSettings) -> Self {
        Self {
            state: AppState::new(render_settings),
            router: Router::new(),
            display_texture: None,
            original_texture: None,
            show_original: true,
            needs_render: true,
            error_message: None,
            drag_start: None,
            drag_current: None,
        }
    }
}

impl eframe::App for RelumeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Recomposite before drawing when the registry or selection
        // changed on the previous pass
        if self.needs_render {
            self.rebuild_processed_texture(ctx);
            self.needs_render = false;
        }

        let mut events: Vec<UiEvent> = Vec::new();

        if self.router.state() == RouterState::Selecting
            && ctx.input(|i| i.key_pressed(egui::Key::Escape))
        {
            self.drag_start = None;
            self.drag_current = None;
            events.push(UiEvent::RegionCancelled);
        }

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open Image...").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Images", &["png", "tif", "tiff", "jpg", "jpeg", "bmp"])
                            .pick_file()
                        {
                            self.load_image(path);
                        }
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.menu_button("View", |ui| {
                    ui.checkbox(&mut self.show_original, "Original Image");
                });
            });
        });

        // Left panel: processed preview
        egui::SidePanel::left("preview_panel")
            .default_width(900.0)
            .resizable(true)
            .show(ctx, |ui| {
                ui.heading("Processed Image");
                ui.separator();

                egui::ScrollArea::both()
                    .id_salt("preview_scroll")
                    .show(ui, |ui| {
                        self.show_image_preview(ui, ctx, &mut events);
                    });
            });

        // Right panel: region controls
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Regions");
            ui.separator();

            egui::ScrollArea::vertical()
                .id_salt("controls_scroll")
                .show(ui, |ui| {
                    self.show_controls(ui, &mut events);
                });
        });

        self.show_original_window(ctx);

        let mut redraw = false;
        for event in events {
            if self.router.handle(event, &mut self.state) {
                redraw = true;
            }
        }
        if redraw {
            self.needs_render = true;
            ctx.request_repaint();
        }

        // Show error message if any
        if let Some(error) = self.error_message.clone() {
            let mut should_close = false;
            egui::Window::new("Error")
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.label(&error);
                    if ui.button("OK").clicked() {
                        should_close = true;
                    }
                });
            if should_close {
                self.error_message = None;
            }
        }
    }
}

impl RelumeApp {
    fn load_image(&mut self, path: PathBuf) {
        match load_image(&path) {
            Ok(base) => {
                eprintln!("[LOAD] {}: {}x{}", path.display(), base.width, base.height);
                self.state.set_image(base, Some(path));
                self.display_texture = None;
                self.original_texture = None;
                self.needs_render = true;
            }
            Err(e) => {
                self.error_message = Some(format!("Failed to load image: {}", e));
            }
        }
    }

    fn rebuild_processed_texture(&mut self, ctx: &egui::Context) {
        let Some(ref base) = self.state.base else {
            return;
        };

        let selected = self.state.selected_indices();
        let frame = render(
            base,
            &self.state.registry,
            &selected,
            &self.state.render_settings,
        );
        let color_image = egui::ColorImage::from_rgb(
            [frame.width as usize, frame.height as usize],
            &frame.data,
        );
        self.display_texture = Some(ctx.load_texture("processed", color_image, Default::default()));
    }

    fn show_image_preview(
        &mut self,
        ui: &mut egui::Ui,
        ctx: &egui::Context,
        events: &mut Vec<UiEvent>,
    ) {
        let Some(base_size) = self.state.base.as_ref().map(|b| (b.width, b.height)) else {
            ui.label("No image loaded. Use File > Open Image to load one.");
            return;
        };

        let Some(texture) = self.display_texture.clone() else {
            ui.label("Processing...");
            return;
        };

        let size = texture.size_vec2();
        let available = ui.available_size();

        // Scale to fit while maintaining aspect ratio
        let scale = (available.x / size.x).min(available.y / size.y).min(1.0);
        let scale = if scale.is_finite() && scale > 0.0 {
            scale
        } else {
            1.0
        };
        let display_size = size * scale;

        let selecting = self.router.state() == RouterState::Selecting;
        let sense = if selecting {
            egui::Sense::click_and_drag()
        } else {
            egui::Sense::hover()
        };
        let response = ui.add(egui::Image::new((texture.id(), display_size)).sense(sense));

        if !selecting {
            return;
        }

        ctx.set_cursor_icon(egui::CursorIcon::Crosshair);

        let origin = response.rect.min;
        let to_pixel = |pos: egui::Pos2| -> (i32, i32) {
            let relative = pos - origin;
            ((relative.x / scale) as i32, (relative.y / scale) as i32)
        };

        if response.drag_started_by(egui::PointerButton::Primary) {
            if let Some(pos) = response.interact_pointer_pos() {
                self.drag_start = Some(to_pixel(pos));
                self.drag_current = self.drag_start;
            }
        }

        if response.dragged_by(egui::PointerButton::Primary) {
            if let Some(pos) = response.interact_pointer_pos() {
                self.drag_current = Some(to_pixel(pos));
            }
        }

        if response.drag_stopped_by(egui::PointerButton::Primary) {
            let event = match (self.drag_start.take(), self.drag_current.take()) {
                (Some(start), Some(end)) => {
                    match rect_from_drag(start, end, base_size.0, base_size.1) {
                        Some(rect) => UiEvent::RegionConfirmed(rect),
                        None => UiEvent::RegionCancelled,
                    }
                }
                _ => UiEvent::RegionCancelled,
            };
            events.push(event);
        }

        // Rubber band for the in-progress drag
        if let (Some(start), Some(current)) = (self.drag_start, self.drag_current) {
            let p1 = origin + egui::vec2(start.0 as f32 * scale, start.1 as f32 * scale);
            let p2 = origin + egui::vec2(current.0 as f32 * scale, current.1 as f32 * scale);
            let highlight = self.state.render_settings.highlight;
            let color = egui::Color32::from_rgb(highlight[0], highlight[1], highlight[2]);
            ui.painter().rect_stroke(
                egui::Rect::from_two_pos(p1, p2),
                0.0,
                egui::Stroke::new(1.0, color),
                egui::StrokeKind::Outside,
            );
        }
    }

    fn show_controls(&mut self, ui: &mut egui::Ui, events: &mut Vec<UiEvent>) {
        if self.state.base.is_none() {
            ui.label("Load an image to start selecting regions");
            return;
        }

        if ui.button("Select ROI").clicked() {
            events.push(UiEvent::SelectRoiPressed);
        }
        if self.router.state() == RouterState::Selecting {
            ui.label("Drag on the preview to draw a region (Esc cancels)");
        }

        ui.separator();

        let slider = ui.add(
            egui::Slider::new(&mut self.state.slider_value, BRIGHTNESS_MIN..=BRIGHTNESS_MAX)
                .text("Brightness"),
        );
        if slider.drag_started() {
            events.push(UiEvent::SliderPressed);
        }
        if slider.changed() {
            events.push(UiEvent::SliderMoved(self.state.slider_value));
        }
        if slider.drag_stopped() {
            events.push(UiEvent::SliderReleased);
        }

        if ui.button("Blacken Selected ROI(s)").clicked() {
            events.push(UiEvent::BlackenSelected);
        }
        if ui.button("Delete Selected ROI(s)").clicked() {
            events.push(UiEvent::DeleteSelected);
        }

        ui.separator();

        for index in 0..self.state.registry.len() {
            let selected = self.state.selection.contains(&index);
            let label = self.state.registry.label(index).unwrap_or_default();
            if ui.selectable_label(selected, label).clicked() {
                if selected {
                    self.state.selection.remove(&index);
                } else {
                    self.state.selection.insert(index);
                }
                events.push(UiEvent::ListSelectionChanged);
            }
        }

        ui.separator();

        if let Some(ref base) = self.state.base {
            ui.label(format!("Image: {}x{}", base.width, base.height));
        }
        if let Some(ref path) = self.state.image_path {
            if let Some(name) = path.file_name() {
                ui.label(format!("File: {}", name.to_string_lossy()));
            }
        }
    }

    fn show_original_window(&mut self, ctx: &egui::Context) {
        if !self.show_original {
            return;
        }

        if self.original_texture.is_none() {
            if let Some(ref base) = self.state.base {
                let color_image = egui::ColorImage::from_rgb(
                    [base.width as usize, base.height as usize],
                    &base.data,
                );
                self.original_texture =
                    Some(ctx.load_texture("original", color_image, Default::default()));
            }
        }

        let Some(texture) = self.original_texture.clone() else {
            return;
        };

        let mut keep_open = true;
        ctx.show_viewport_immediate(
            egui::ViewportId::from_hash_of("original_image"),
            egui::ViewportBuilder::default()
                .with_title("Original Image")
                .with_inner_size(texture.size_vec2()),
            |ctx, _class| {
                egui::CentralPanel::default().show(ctx, |ui| {
                    egui::ScrollArea::both().show(ui, |ui| {
                        ui.image(&texture);
                    });
                });
                if ctx.input(|i| i.viewport().close_requested()) {
                    keep_open = false;
                }
            },
        );
        if !keep_open {
            self.show_original = false;
        }
    }
}
