//! Vasaro - a sphere sculpted by animated 4D noise
//!
//! The blob deforms continuously while spinning around a wandering axis.
//! Keyboard controls adjust the deformation; the window title shows them.

use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use vasaro::blob::BlobSystem;
use vasaro::camera::CameraSystem;
use vasaro::cli::Args;
use vasaro::noise::NoiseField;
use vasaro::params::{BlobControls, CameraRig, RenderConfig, Slider, PALETTE};
use vasaro::rendering::{RenderSystem, Uniforms};
use vasaro::VasaroError;

/// Pixels per wheel "line" for touchpads reporting pixel deltas
const PIXELS_PER_LINE: f32 = 40.0;

/// Main application state
struct App {
    // Window and rendering
    window: Option<Arc<Window>>,
    render_system: Option<RenderSystem>,

    // Simulation systems
    blob: BlobSystem,
    camera: CameraSystem,

    // Configuration
    controls: BlobControls,
    render_config: RenderConfig,

    // Time tracking
    last_frame: Instant,

    // First fatal error, reported after the event loop exits
    failure: Option<VasaroError>,
}

impl App {
    fn new(blob: BlobSystem, controls: BlobControls, render_config: RenderConfig) -> Self {
        Self {
            window: None,
            render_system: None,
            blob,
            camera: CameraSystem::new(CameraRig::default()),
            controls,
            render_config,
            last_frame: Instant::now(),
            failure: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: VasaroError) {
        log::error!("{}", error);
        self.failure.get_or_insert(error);
        event_loop.exit();
    }

    fn refresh_title(&self) {
        if let Some(window) = &self.window {
            window.set_title(&format!("Vasaro | {}", self.controls.summary()));
        }
    }

    fn handle_input(&mut self, keycode: KeyCode) {
        match keycode {
            KeyCode::Digit1 => self.controls.adjust(Slider::NoiseSpeed, -1.0),
            KeyCode::Digit2 => self.controls.adjust(Slider::NoiseSpeed, 1.0),
            KeyCode::Digit3 => self.controls.adjust(Slider::RotationSpeed, -1.0),
            KeyCode::Digit4 => self.controls.adjust(Slider::RotationSpeed, 1.0),
            KeyCode::Digit5 => self.controls.adjust(Slider::Strength, -1.0),
            KeyCode::Digit6 => self.controls.adjust(Slider::Strength, 1.0),
            KeyCode::Digit7 => self.controls.adjust(Slider::Details, -1.0),
            KeyCode::Digit8 => self.controls.adjust(Slider::Details, 1.0),
            KeyCode::Space => self.controls.toggle_smooth(),
            KeyCode::KeyC => self.controls.next_color(),
            _ => return,
        }
        log::debug!("Controls: {}", self.controls.summary());
        self.refresh_title();
    }

    /// Render a single frame
    fn render_frame(&mut self, event_loop: &ActiveEventLoop) {
        let frame_s = self.last_frame.elapsed().as_secs_f32();
        self.last_frame = Instant::now();

        let started = Instant::now();
        let model = match self.blob.update(frame_s, &self.controls) {
            Ok(model) => model,
            Err(e) => return self.fail(event_loop, e),
        };
        let engine_time = started.elapsed();
        if engine_time > self.render_config.frame_budget() {
            log::debug!("Blob update took {:?}, over the frame budget", engine_time);
        }

        let Some(ref mut render_system) = self.render_system else {
            return;
        };

        // Positions first, then normals
        render_system.update_positions(self.blob.soup.vertices());
        render_system.update_normals(self.blob.soup.normals());

        let (view_proj, eye) = self.camera.create_view_proj_matrix(&self.render_config);
        let color = PALETTE[self.controls.color_index % PALETTE.len()]
            .to_rgba_f32(render_system.srgb_target());
        render_system.update_uniforms(&Uniforms::new(
            view_proj,
            model,
            eye,
            &self.render_config,
            color,
        ));

        match render_system.render() {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                render_system.reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                self.fail(event_loop, VasaroError::Render("GPU out of memory".into()));
            }
            Err(e) => log::warn!("Render error: {:?}", e),
        }
    }
}

impl ApplicationHandler for App {
    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return; // Already initialized
        }

        // Create window
        let window_attributes = Window::default_attributes()
            .with_title("Vasaro")
            .with_resizable(true)
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.render_config.window_width,
                self.render_config.window_height,
            ));

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                return self.fail(
                    event_loop,
                    VasaroError::Render(format!("Failed to create window: {}", e)),
                )
            }
        };

        // Initialize rendering system
        let render_system = match pollster::block_on(RenderSystem::new(
            Arc::clone(&window),
            &self.blob.soup,
            &self.render_config,
        )) {
            Ok(render_system) => render_system,
            Err(e) => return self.fail(event_loop, e),
        };

        log::info!("Vasaro is running");
        log::info!("Controls:");
        log::info!("  1/2 - Noise speed");
        log::info!("  3/4 - Rotation speed");
        log::info!("  5/6 - Strength");
        log::info!("  7/8 - Details");
        log::info!("  Space - Toggle smooth shading");
        log::info!("  C - Next color");
        log::info!("  Mouse wheel - Zoom");
        log::info!("  Esc - Quit");

        self.window = Some(window);
        self.render_system = Some(render_system);
        self.last_frame = Instant::now();
        self.refresh_title();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => event_loop.exit(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(keycode),
                        ..
                    },
                ..
            } => self.handle_input(keycode),
            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(position) => position.y as f32 / PIXELS_PER_LINE,
                };
                self.camera.apply_scroll(lines);
            }
            WindowEvent::Resized(size) => {
                self.render_config.window_width = size.width.max(1);
                self.render_config.window_height = size.height.max(1);
                if let Some(render_system) = &mut self.render_system {
                    render_system.resize(size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => self.render_frame(event_loop),
            _ => {}
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("vasaro=info"))
        .init();

    let args = Args::parse();

    let seed = args.resolve_seed();
    let controls = args.blob_controls();
    let render_config = args.render_config();
    let soup = args.load_soup().context("Failed to load base mesh")?;

    let blob = BlobSystem::new(soup, NoiseField::new(seed), controls.shading())
        .context("Failed to prepare blob mesh")?;

    let mut app = App::new(blob, controls, render_config);
    let event_loop = EventLoop::new().context("Failed to create event loop")?;
    event_loop
        .run_app(&mut app)
        .context("Event loop terminated abnormally")?;

    match app.failure {
        Some(error) => Err(anyhow::Error::new(error)).context("Vasaro stopped"),
        None => Ok(()),
    }
}
