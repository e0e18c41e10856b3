use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use node_navigator::cli::Cli;
use node_navigator::core::{FrameClock, KeyboardController, MessageLog};
use node_navigator::headless::run_headless;
use node_navigator::loaders::load_scene_file;
use node_navigator::renderer::{NodeRenderer, Overlay};
use node_navigator::session::{Session, SessionConfig};

const INITIAL_WINDOW_WIDTH: u32 = 1280;
const INITIAL_WINDOW_HEIGHT: u32 = 800;

// === Application ===

struct App {
    window: Option<Arc<Window>>,
    renderer: Option<NodeRenderer>,
    session: Session,
    keyboard: KeyboardController,
    clock: FrameClock,
    show_ui: bool,
}

impl App {
    fn new(session: Session, cli: &Cli) -> Self {
        Self {
            window: None,
            renderer: None,
            session,
            keyboard: KeyboardController::new(),
            clock: FrameClock::new(cli.step_hz),
            show_ui: !cli.no_ui,
        }
    }

    /// Fixed navigation steps for the elapsed time, then one rendered frame
    fn frame(&mut self) {
        let timing = self.clock.tick();

        let (Some(renderer), Some(window)) = (&mut self.renderer, &self.window) else {
            return;
        };

        let input = self.keyboard.state().merged(renderer.overlay_input());
        self.session.run(&input, timing.steps);

        let overlay = Overlay {
            fps: self.clock.fps(),
            log: self.session.log(),
        };
        match renderer.render(window, self.session.camera(), self.session.nodes(), overlay) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => renderer.reconfigure(),
            Err(e) => log::error!("Render error: {}", e),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            self.clock.reset();
            return;
        }

        let window = match event_loop.create_window(
            Window::default_attributes()
                .with_title("Node Navigator")
                .with_inner_size(winit::dpi::LogicalSize::new(
                    INITIAL_WINDOW_WIDTH,
                    INITIAL_WINDOW_HEIGHT,
                )),
        ) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        let node_count = self.session.nodes().len();
        let renderer = match pollster::block_on(NodeRenderer::new(
            window.clone(),
            node_count,
            self.show_ui,
        )) {
            Ok(r) => r,
            Err(e) => {
                log::error!("Failed to initialize renderer: {:#}", e);
                event_loop.exit();
                return;
            }
        };

        self.session.log_mut().info("Animation loop initialized");
        self.window = Some(window);
        self.renderer = Some(renderer);
        self.clock.reset();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // Let egui handle the event first
        let consumed = match (&mut self.renderer, &self.window) {
            (Some(renderer), Some(window)) => renderer.handle_event(window, &event),
            _ => false,
        };
        if consumed {
            // Key releases must still reach navigation
            self.keyboard.process_event(&event, true);
            return;
        }

        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(size);
                }
            }
            WindowEvent::RedrawRequested => self.frame(),
            other => {
                self.keyboard.process_event(&other, false);
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut log = MessageLog::default();
    let seeds = match load_scene_file(&cli.data, cli.seed) {
        Ok(seeds) => {
            log.info(format!("{} parsed successfully", cli.data.display()));
            seeds
        }
        Err(e) => {
            log.error(format!("Error loading {}: {:#}", cli.data.display(), e));
            return Err(e);
        }
    };

    let config = SessionConfig {
        start: cli.start,
        ..SessionConfig::default()
    };
    let mut session = Session::with_log(seeds, config, log)?;

    if let Some(frames) = cli.headless {
        let report = run_headless(&mut session, &cli.hold, frames);
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("Failed to encode report")?
        );
        return Ok(());
    }

    let event_loop = EventLoop::new()?;
    let mut app = App::new(session, &cli);

    println!("Node Navigator - Controls: arrows/A/D rotate, W/S move, Escape to quit");
    event_loop.run_app(&mut app)?;

    Ok(())
}
