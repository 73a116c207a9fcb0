//! terrasonic - audio-reactive terrain and particle visualizer
//!
//! Layered noise terrain, beat-driven particles, and orbiting boxes that
//! react to a playing track or to live captured audio.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use terrasonic::audio::AudioDeck;
use terrasonic::cli::Args;
use terrasonic::params::{AnalysisConfig, RenderConfig};
use terrasonic::render::{MeshCanvas, RenderSystem};
use terrasonic::visualizer::Visualizer;

/// Main application state
struct App {
    // Window and rendering
    window: Option<Arc<Window>>,
    render_system: Option<RenderSystem>,
    canvas: MeshCanvas,

    // Audio and scene
    deck: AudioDeck,
    visualizer: Visualizer,

    // Configuration
    render_config: RenderConfig,

    // Time tracking
    start_time: Instant,

    /// Fatal error raised inside the event loop
    init_error: Option<anyhow::Error>,
}

impl App {
    fn new(deck: AudioDeck, visualizer: Visualizer, render_config: RenderConfig) -> Self {
        Self {
            window: None,
            render_system: None,
            canvas: MeshCanvas::new(),
            deck,
            visualizer,
            render_config,
            start_time: Instant::now(),
            init_error: None,
        }
    }

    fn init_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let window_attributes = Window::default_attributes()
            .with_title("terrasonic")
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.render_config.window_width,
                self.render_config.window_height,
            ));

        let window = Arc::new(
            event_loop
                .create_window(window_attributes)
                .context("Failed to create window")?,
        );

        let render_system = pollster::block_on(RenderSystem::new(
            Arc::clone(&window),
            self.render_config.fov_radians,
        ))
        .context("Failed to initialize GPU")?;

        tracing::info!("terrasonic is running");
        tracing::info!("Space: play/pause  C: capture  W: waves  O: orbs  1-5: presets  Esc: quit");

        self.window = Some(window);
        self.render_system = Some(render_system);
        self.update_title();
        Ok(())
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, key: KeyCode) {
        match key {
            KeyCode::Escape => event_loop.exit(),
            KeyCode::Space => self.deck.toggle_play(),
            KeyCode::KeyC => {
                let status = self.deck.start_capture();
                tracing::info!("{}", status.label());
            }
            KeyCode::KeyW => {
                let on = self.visualizer.toggle_waves();
                tracing::info!("Energy waves {}", if on { "on" } else { "off" });
            }
            KeyCode::KeyO => {
                let on = self.visualizer.toggle_orbs();
                tracing::info!("Orbit spheres {}", if on { "on" } else { "off" });
            }
            KeyCode::Digit1 => self.load_preset(0),
            KeyCode::Digit2 => self.load_preset(1),
            KeyCode::Digit3 => self.load_preset(2),
            KeyCode::Digit4 => self.load_preset(3),
            KeyCode::Digit5 => self.load_preset(4),
            _ => return,
        }
        self.update_title();
    }

    fn load_preset(&mut self, index: usize) {
        if let Err(e) = self.deck.load_preset(index) {
            tracing::warn!("Preset {} not loaded: {}", index + 1, e);
        }
    }

    fn load_file(&mut self, path: PathBuf) {
        if let Err(e) = self.deck.load_file(&path) {
            tracing::warn!("{} not loaded: {}", path.display(), e);
        }
        self.update_title();
    }

    /// Track, play state, and capture status in the window title
    fn update_title(&self) {
        let Some(window) = &self.window else {
            return;
        };
        let track = self
            .deck
            .track_name()
            .unwrap_or_else(|| "no track".to_string());
        let state = if self.deck.is_playing() {
            "playing"
        } else {
            "paused"
        };
        let capture = match self.deck.capture_device() {
            Some(device) => format!("{} ({})", self.deck.status().label(), device),
            None => self.deck.status().label().to_string(),
        };
        window.set_title(&format!("terrasonic - {} [{}] | {}", track, state, capture));
    }

    /// Render a single frame
    fn render_frame(&mut self) {
        let Some(render_system) = self.render_system.as_mut() else {
            return;
        };

        let (spectrum, layout) = self.deck.read();
        let now = self.start_time.elapsed();

        self.canvas.begin_frame();
        let report = self
            .visualizer
            .frame(&spectrum, layout, now, &mut self.canvas);
        if report.beat {
            tracing::trace!("Beat at {:?} (bass {:.1})", now, report.energies.bass);
        }

        match render_system.render(&self.canvas) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                tracing::debug!("Surface lost, reconfiguring");
                render_system.reconfigure();
            }
            Err(wgpu::SurfaceError::Timeout) => tracing::debug!("Surface timeout, skipping frame"),
            Err(e) => tracing::error!("Render error: {:?}", e),
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

        if let Err(e) = self.init_window(event_loop) {
            self.init_error = Some(e);
            event_loop.exit();
        }
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
                        physical_key: PhysicalKey::Code(key),
                        repeat: false,
                        ..
                    },
                ..
            } => self.handle_key(event_loop, key),
            WindowEvent::DroppedFile(path) => self.load_file(path),
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                if let Some(render_system) = self.render_system.as_mut() {
                    render_system.set_scale_factor(scale_factor);
                }
            }
            WindowEvent::Resized(size) => {
                if let Some(render_system) = self.render_system.as_mut() {
                    render_system.resize(size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => {
                self.render_frame();
            }
            _ => {}
        }
    }
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let playback = args.playback_config();
    let startup_preset = playback.startup_preset;

    let mut deck = AudioDeck::new(AnalysisConfig::default(), playback)
        .context("Failed to set up audio analysis")?;

    let loaded = match &args.file {
        Some(path) => deck.load_file(path),
        None => deck.load_preset(startup_preset),
    };
    if let Err(e) = loaded {
        tracing::warn!("Startup track not loaded: {}", e);
    }

    if args.capture {
        let status = deck.start_capture();
        tracing::info!("{}", status.label());
    }

    let visualizer = Visualizer::new(args.visualizer_config());
    let mut app = App::new(deck, visualizer, args.render_config());

    let event_loop = EventLoop::new().context("Failed to create event loop")?;
    event_loop.run_app(&mut app)?;

    match app.init_error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
