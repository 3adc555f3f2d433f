use std::sync::Arc;

use glam::Vec2;
use instant::Instant;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowAttributes, WindowId};

use crate::error::{FrameError, StartupError};
use crate::hud::Hud;
use crate::render::instance::RectInstance;
use crate::render::GpuState;
use crate::scene::Scene;

const WINDOW_TITLE: &str = "Pup Yard";
const INITIAL_SIZE: LogicalSize<f64> = LogicalSize::new(1280.0, 720.0);
/// Enough quads for the dog, a full toy box and a firework wave.
const INSTANCE_CAPACITY: usize = 4096;

/// Top-level application state.
struct App {
    window: Option<Arc<Window>>,
    gpu: Option<GpuState>,
    hud: Option<Hud>,

    scene: Scene,

    // Visual time base for the wobble/bob animations
    started: Instant,
    last_frame_time: Option<Instant>,

    // Last cursor position, logical pixels
    cursor: Option<Vec2>,

    // Reusable instance buffer (avoid per-frame allocation)
    instances: Vec<RectInstance>,

    // Set if startup failed; returned from run()
    fatal: Option<StartupError>,
}

impl App {
    fn new() -> Self {
        Self {
            window: None,
            gpu: None,
            hud: None,
            scene: Scene::new(),
            started: Instant::now(),
            last_frame_time: None,
            cursor: None,
            instances: Vec::with_capacity(INSTANCE_CAPACITY),
            fatal: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), StartupError> {
        let attrs = WindowAttributes::default()
            .with_title(WINDOW_TITLE)
            .with_inner_size(INITIAL_SIZE)
            .with_resizable(true);
        let window = Arc::new(event_loop.create_window(attrs)?);

        let size = window.inner_size();
        log::info!(
            "Window created: {}x{} @ {:.2}x",
            size.width,
            size.height,
            window.scale_factor()
        );

        let gpu = GpuState::new(window.clone())?;
        log::info!("wgpu + rect pipeline initialized");

        self.hud = Some(Hud::new(&window, &gpu));
        self.gpu = Some(gpu);
        self.window = Some(window);
        self.apply_size();
        Ok(())
    }

    /// Push the window's current size and scale factor down to the scene and GPU.
    fn apply_size(&mut self) {
        let (Some(window), Some(gpu)) = (&self.window, &mut self.gpu) else {
            return;
        };
        let size = window.inner_size();
        let scale = window.scale_factor();
        let logical: LogicalSize<f32> = size.to_logical(scale);

        gpu.resize(size.width, size.height);
        self.scene.resize(logical.width, logical.height, scale as f32);

        let viewport = self.scene.viewport();
        let logical = viewport.size();
        if logical.x > 0.0 && logical.y > 0.0 {
            gpu.resize_scene((logical.x, logical.y), viewport.backing_size());
        }
    }

    fn redraw(&mut self) {
        let (Some(window), Some(gpu), Some(hud)) = (&self.window, &mut self.gpu, &mut self.hud)
        else {
            return;
        };

        // --- Timing ---
        let now = Instant::now();
        if let Some(last) = self.last_frame_time {
            hud.record_frame(now.duration_since(last).as_secs_f64());
        }
        self.last_frame_time = Some(now);
        let now_ms = now.duration_since(self.started).as_secs_f64() * 1000.0;

        // --- Simulate (one step per display refresh) ---
        self.scene.update(now_ms, hud);

        // --- Build instance buffer ---
        if let Some(backdrop) = self.scene.take_backdrop() {
            gpu.upload_backdrop(backdrop);
        }
        self.instances.clear();
        self.scene.draw(&mut self.instances, now_ms);
        gpu.update_instances(&self.instances);

        // --- Render ---
        let mut frame = match gpu.begin_frame() {
            Ok(frame) => frame,
            Err(e) => {
                report_frame_error(&e);
                return;
            }
        };
        gpu.draw_scene(&mut frame.encoder, &frame.view);

        let size = window.inner_size();
        let (primitives, textures_delta, screen_desc) =
            hud.run_frame(window, &self.scene, size.width, size.height);
        let extra_bufs = hud.prepare_egui(
            &gpu.device,
            &gpu.queue,
            &mut frame.encoder,
            &primitives,
            &textures_delta,
            &screen_desc,
        );
        {
            let mut pass = GpuState::begin_egui_pass(&mut frame.encoder, &frame.view);
            hud.render_egui(&mut pass, &primitives, &screen_desc);
        }
        gpu.finish_frame(frame.encoder, frame.output, extra_bufs);
        hud.free_textures(&textures_delta);
    }
}

fn report_frame_error(e: &FrameError) {
    match e {
        FrameError::OutOfMemory => log::error!("Skipping frame: {e}"),
        e => log::warn!("Skipping frame: {e}"),
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(e) = self.init(event_loop) {
            self.fatal = Some(e);
            event_loop.exit();
            return;
        }

        // Continuous game loop
        event_loop.set_control_flow(ControlFlow::Poll);
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(w) = &self.window {
            w.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let egui_consumed = match (&self.window, &mut self.hud) {
            (Some(window), Some(hud)) => hud.on_window_event(window, &event),
            _ => false,
        };

        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, exiting");
                event_loop.exit();
            }
            WindowEvent::KeyboardInput { event, .. }
                if !egui_consumed && event.state == ElementState::Pressed && !event.repeat =>
            {
                match event.physical_key {
                    PhysicalKey::Code(KeyCode::Escape) => {
                        log::info!("ESC pressed, exiting");
                        event_loop.exit();
                    }
                    PhysicalKey::Code(KeyCode::F12) => {
                        if let Some(hud) = &mut self.hud {
                            hud.toggle_debug();
                        }
                    }
                    _ => {}
                }
            }
            WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => {
                self.apply_size();
            }
            WindowEvent::CursorMoved { position, .. } => {
                let Some(window) = &self.window else {
                    return;
                };
                let logical = position.to_logical::<f32>(window.scale_factor());
                let p = Vec2::new(logical.x, logical.y);
                self.cursor = Some(p);
                if !egui_consumed {
                    self.scene.pointer_move(p);
                }
            }
            WindowEvent::CursorLeft { .. } => {
                self.cursor = None;
                self.scene.pointer_left();
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } if !egui_consumed => {
                if let (Some(p), Some(hud)) = (self.cursor, &mut self.hud) {
                    self.scene.pointer_down(p, hud);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(),
            _ => {}
        }
    }
}

/// Entry point: create the event loop and run until the window closes.
pub fn run() -> Result<(), StartupError> {
    let event_loop = EventLoop::new()?;
    let mut app = App::new();
    event_loop.run_app(&mut app)?;
    match app.fatal.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
