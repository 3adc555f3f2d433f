//! Presentation layer: the happiness readout and the F12 debug window, both
//! drawn with egui on top of the yard. The HUD is also where the simulation's
//! score and state notifications land.

pub mod hearts;
pub mod ring;

use winit::window::Window;

use self::hearts::{BadgeHearts, FloatingHeart};
use self::ring::RingBuffer;
use crate::dog::DogState;
use crate::render::GpuState;
use crate::scene::Scene;
use crate::score::{Happiness, ScoreChange, ScoreSink, StateSink};
use crate::sprite::tables;
use crate::toy::ToyId;

/// Number of frame times to keep in the histogram.
const FRAME_HISTORY_LEN: usize = 300;
/// How often to log FPS (seconds).
const FPS_LOG_INTERVAL: f64 = 5.0;
/// One display refresh at 60Hz.
const FRAME_BUDGET: f64 = 1.0 / 60.0;

const SCORE_CAPTION: &str = "HAPPY";
const MAXED_TEXT: &str = "Forever Love!";
/// Panel hearts start this far above the panel's top edge.
const BADGE_HEART_TOP: f32 = 10.0;
const BADGE_HEART_CELL: f32 = 2.0;

/// Rolling frame timings plus a periodic FPS log line.
pub struct FrameStats {
    pub frame_times: RingBuffer<f64>,
    pub fps: f64,
    pub frame_time_avg: f64,
    pub frame_time_min: f64,
    pub frame_time_max: f64,
    frame_count: u64,
    log_timer: f64,
    log_frame_count: u32,
    log_frame_sum: f64,
}

impl FrameStats {
    pub fn new() -> Self {
        Self {
            frame_times: RingBuffer::new(FRAME_HISTORY_LEN),
            fps: 0.0,
            frame_time_avg: 0.0,
            frame_time_min: 0.0,
            frame_time_max: 0.0,
            frame_count: 0,
            log_timer: 0.0,
            log_frame_count: 0,
            log_frame_sum: 0.0,
        }
    }

    pub fn record_frame(&mut self, dt: f64) {
        self.frame_count += 1;
        self.frame_times.push(dt);

        let mut sum = 0.0;
        let mut min = f64::MAX;
        let mut max = 0.0f64;
        for t in self.frame_times.iter() {
            sum += t;
            min = min.min(t);
            max = max.max(t);
        }
        self.frame_time_avg = sum / self.frame_times.len() as f64;
        self.frame_time_min = min;
        self.frame_time_max = max;
        self.fps = if self.frame_time_avg > 0.0 {
            1.0 / self.frame_time_avg
        } else {
            0.0
        };

        self.log_frame_count += 1;
        self.log_frame_sum += dt;
        self.log_timer += dt;
        if self.log_timer >= FPS_LOG_INTERVAL {
            let avg_ms = (self.log_frame_sum / self.log_frame_count as f64) * 1000.0;
            let fps = self.log_frame_count as f64 / self.log_timer;
            log::info!(
                "FPS: {:.0} | avg: {:.2}ms | total frames: {}",
                fps,
                avg_ms,
                self.frame_count,
            );
            self.log_timer = 0.0;
            self.log_frame_count = 0;
            self.log_frame_sum = 0.0;
        }
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

impl Default for FrameStats {
    fn default() -> Self {
        Self::new()
    }
}

/// What the score panel shows under its caption.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreReadout {
    Points(u32),
    ForeverLove,
}

impl ScoreReadout {
    pub fn of(score: &Happiness) -> Self {
        if score.is_maxed() {
            ScoreReadout::ForeverLove
        } else {
            ScoreReadout::Points(score.value())
        }
    }
}

pub struct Hud {
    pub egui_ctx: egui::Context,
    pub egui_state: egui_winit::State,
    pub egui_renderer: egui_wgpu::Renderer,

    score: Happiness,
    dog_state: DogState,
    pub debug_visible: bool,
    pub stats: FrameStats,
    badge_hearts: BadgeHearts,
}

impl Hud {
    pub fn new(window: &Window, gpu: &GpuState) -> Self {
        let egui_ctx = egui::Context::default();

        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            window,
            Some(window.scale_factor() as f32),
            None,
            Some(gpu.device.limits().max_texture_dimension_2d as usize),
        );

        let egui_renderer = egui_wgpu::Renderer::new(
            &gpu.device,
            gpu.surface_config.format,
            egui_wgpu::RendererOptions {
                depth_stencil_format: None,
                msaa_samples: 1,
                dithering: true,
                predictable_texture_filtering: false,
            },
        );

        Self {
            egui_ctx,
            egui_state,
            egui_renderer,
            score: Happiness::new(),
            dog_state: DogState::Idle,
            debug_visible: false,
            stats: FrameStats::new(),
            badge_hearts: BadgeHearts::new(fastrand::Rng::new()),
        }
    }

    /// Per-frame timing: stats plus the score panel's heart animation.
    pub fn record_frame(&mut self, dt: f64) {
        self.stats.record_frame(dt);
        self.badge_hearts.tick(dt as f32);
    }

    pub fn toggle_debug(&mut self) {
        self.debug_visible = !self.debug_visible;
        log::debug!("debug window {}", if self.debug_visible { "on" } else { "off" });
    }

    /// Forward a winit event to egui. Returns true if egui consumed it.
    pub fn on_window_event(&mut self, window: &Window, event: &winit::event::WindowEvent) -> bool {
        self.egui_state.on_window_event(window, event).consumed
    }

    /// Run the egui frame and produce paint output.
    pub fn run_frame(
        &mut self,
        window: &Window,
        scene: &Scene,
        screen_w: u32,
        screen_h: u32,
    ) -> (
        Vec<egui::epaint::ClippedPrimitive>,
        egui::TexturesDelta,
        egui_wgpu::ScreenDescriptor,
    ) {
        let raw_input = self.egui_state.take_egui_input(window);

        let viewport = scene.viewport();
        let ui_state = UiSnapshot {
            readout: ScoreReadout::of(&self.score),
            badge_hearts: self.badge_hearts.hearts().to_vec(),
            debug_visible: self.debug_visible,
            fps: self.stats.fps,
            frames: self.stats.frame_count(),
            frame_time_avg: self.stats.frame_time_avg,
            frame_time_min: self.stats.frame_time_min,
            frame_time_max: self.stats.frame_time_max,
            frame_times: self.stats.frame_times.iter().collect(),
            dog_state: self.dog_state,
            zone: format!("{:?}", scene.zone()),
            holding: scene.dog().held.map(|t| format!("{:?}", t.kind)),
            hovered: scene.toys().hovered(),
            toys: scene.toys().len(),
            hearts: scene.particles().hearts().len(),
            latest_heart: scene.particles().hearts().last().map(|h| h.id),
            sparks: scene.particles().sparks().len(),
            waves_left: scene
                .particles()
                .show()
                .is_running()
                .then(|| scene.particles().show().waves_left),
            logical: (viewport.width, viewport.height),
            dpr: viewport.dpr,
        };

        let ctx = self.egui_ctx.clone();
        let full_output = ctx.run(raw_input, |ctx| draw_ui(ctx, &ui_state));

        self.egui_state
            .handle_platform_output(window, full_output.platform_output);

        let pixels_per_point = full_output.pixels_per_point;
        let clipped_primitives = self.egui_ctx.tessellate(full_output.shapes, pixels_per_point);
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [screen_w, screen_h],
            pixels_per_point,
        };
        (clipped_primitives, full_output.textures_delta, screen_descriptor)
    }

    /// Upload egui textures and buffers. Call before the egui render pass.
    pub fn prepare_egui(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        primitives: &[egui::epaint::ClippedPrimitive],
        textures_delta: &egui::TexturesDelta,
        screen_descriptor: &egui_wgpu::ScreenDescriptor,
    ) -> Vec<wgpu::CommandBuffer> {
        for (id, image_delta) in &textures_delta.set {
            self.egui_renderer
                .update_texture(device, queue, *id, image_delta);
        }
        self.egui_renderer
            .update_buffers(device, queue, encoder, primitives, screen_descriptor)
    }

    pub fn render_egui(
        &self,
        render_pass: &mut wgpu::RenderPass<'static>,
        primitives: &[egui::epaint::ClippedPrimitive],
        screen_descriptor: &egui_wgpu::ScreenDescriptor,
    ) {
        self.egui_renderer
            .render(render_pass, primitives, screen_descriptor);
    }

    /// Free textures after present.
    pub fn free_textures(&mut self, textures_delta: &egui::TexturesDelta) {
        for &id in &textures_delta.free {
            self.egui_renderer.free_texture(&id);
        }
    }
}

impl ScoreSink for Hud {
    fn add_score(&mut self, amount: u32) -> ScoreChange {
        let change = self.score.add_score(amount);
        if change.new != change.old {
            log::debug!("happiness {} -> {}", change.old, change.new);
        }
        change
    }
}

impl StateSink for Hud {
    fn set_dog_state(&mut self, state: DogState) {
        self.dog_state = state;
    }
}

// ---------------------------------------------------------------------------
// UI snapshot + free-function draw (avoids borrow conflicts with egui_ctx)
// ---------------------------------------------------------------------------

struct UiSnapshot {
    readout: ScoreReadout,
    badge_hearts: Vec<FloatingHeart>,
    debug_visible: bool,
    fps: f64,
    frames: u64,
    frame_time_avg: f64,
    frame_time_min: f64,
    frame_time_max: f64,
    frame_times: Vec<f64>,
    dog_state: DogState,
    zone: String,
    holding: Option<String>,
    hovered: Option<ToyId>,
    toys: usize,
    hearts: usize,
    latest_heart: Option<u32>,
    sparks: usize,
    waves_left: Option<u32>,
    logical: (f32, f32),
    dpr: f32,
}

fn draw_ui(ctx: &egui::Context, s: &UiSnapshot) {
    draw_score(ctx, s.readout, &s.badge_hearts);
    if s.debug_visible {
        draw_debug(ctx, s);
    }
}

fn draw_score(ctx: &egui::Context, readout: ScoreReadout, hearts: &[FloatingHeart]) {
    let panel_frame = egui::Frame::NONE
        .fill(egui::Color32::from_rgba_unmultiplied(255, 255, 255, 200))
        .corner_radius(8.0)
        .inner_margin(egui::Margin::symmetric(16, 8));

    egui::Area::new(egui::Id::new("happiness"))
        .anchor(egui::Align2::LEFT_TOP, [16.0, 16.0])
        .interactable(false)
        .show(ctx, |ui| {
            let panel = panel_frame.show(ui, |ui| {
                ui.vertical(|ui| {
                    let ink = egui::Color32::from_rgb(0x22, 0x22, 0x22);
                    ui.label(
                        egui::RichText::new(SCORE_CAPTION)
                            .size(12.0)
                            .strong()
                            .color(egui::Color32::from_rgb(0xA1, 0x62, 0x07)),
                    );
                    let value = match readout {
                        ScoreReadout::Points(score) => egui::RichText::new(score.to_string())
                            .size(28.0)
                            .strong()
                            .color(ink),
                        ScoreReadout::ForeverLove => egui::RichText::new(MAXED_TEXT)
                            .size(20.0)
                            .strong()
                            .color(egui::Color32::from_rgb(0xDB, 0x27, 0x77)),
                    };
                    ui.label(value);
                });
            });
            paint_badge_hearts(ui.painter(), panel.response.rect, hearts);
        });
}

/// Pixel hearts rising off the top edge of the score panel.
fn paint_badge_hearts(painter: &egui::Painter, panel: egui::Rect, hearts: &[FloatingHeart]) {
    let painter = painter.with_clip_rect(egui::Rect::EVERYTHING);
    for h in hearts {
        let alpha = (h.alpha() * 255.0).round() as u8;
        let color = egui::Color32::from_rgba_unmultiplied(0xEC, 0x48, 0x99, alpha);
        let cell = BADGE_HEART_CELL * h.scale();
        let origin = egui::pos2(
            panel.left() + h.left * panel.width(),
            panel.top() - BADGE_HEART_TOP - h.rise(),
        );
        for (row, cells) in tables::HEART.rows().enumerate() {
            for (col, &code) in cells.iter().enumerate() {
                if code == b' ' {
                    continue;
                }
                let min = origin + egui::vec2(col as f32 * cell, row as f32 * cell);
                painter.rect_filled(
                    egui::Rect::from_min_size(min, egui::vec2(cell, cell)),
                    0.0,
                    color,
                );
            }
        }
    }
}

fn draw_debug(ctx: &egui::Context, s: &UiSnapshot) {
    let panel_frame = egui::Frame::NONE
        .fill(egui::Color32::from_rgba_unmultiplied(20, 20, 20, 220))
        .corner_radius(6.0)
        .inner_margin(10.0);

    egui::Window::new("Debug")
        .default_pos([16.0, 110.0])
        .default_width(320.0)
        .resizable(true)
        .frame(panel_frame)
        .show(ctx, |ui| {
            ui.style_mut().visuals.override_text_color = Some(egui::Color32::from_gray(220));

            // --- Performance ---
            ui.heading("Performance");
            ui.label(format!("FPS: {:.1} | frames: {}", s.fps, s.frames));
            ui.label(format!(
                "Frame: {:.2}ms avg | {:.2} min | {:.2} max",
                s.frame_time_avg * 1000.0,
                s.frame_time_min * 1000.0,
                s.frame_time_max * 1000.0,
            ));

            ui.add_space(4.0);

            // --- Frame time histogram ---
            ui.heading("Frame Time History");
            if !s.frame_times.is_empty() {
                let max_time = s
                    .frame_times
                    .iter()
                    .copied()
                    .fold(0.0f64, f64::max)
                    .max(0.020);

                let (response, painter) =
                    ui.allocate_painter(egui::vec2(300.0, 60.0), egui::Sense::hover());
                let rect = response.rect;
                let bar_width = rect.width() / s.frame_times.len() as f32;
                let target_y = rect.bottom() - (FRAME_BUDGET / max_time) as f32 * rect.height();

                for (i, &t) in s.frame_times.iter().enumerate() {
                    let h = (t / max_time) as f32 * rect.height();
                    let x = rect.left() + i as f32 * bar_width;
                    let color = if t > FRAME_BUDGET {
                        egui::Color32::from_rgb(255, 100, 80)
                    } else {
                        egui::Color32::from_rgb(80, 200, 120)
                    };
                    painter.rect_filled(
                        egui::Rect::from_min_max(
                            egui::pos2(x, rect.bottom() - h),
                            egui::pos2(x + bar_width - 1.0, rect.bottom()),
                        ),
                        0.0,
                        color,
                    );
                }

                painter.line_segment(
                    [
                        egui::pos2(rect.left(), target_y),
                        egui::pos2(rect.right(), target_y),
                    ],
                    egui::Stroke::new(1.0, egui::Color32::from_rgb(255, 255, 100)),
                );
            }

            ui.add_space(4.0);

            // --- Yard ---
            ui.heading("Yard");
            ui.label(format!("Dog: {}", s.dog_state.label()));
            ui.label(format!("Petting: {}", s.zone));
            ui.label(format!(
                "Holding: {}",
                s.holding.as_deref().unwrap_or("nothing")
            ));
            ui.label(format!("Toys in yard: {}", s.toys));
            if let Some(id) = s.hovered {
                ui.label(format!("Hovering toy #{id}"));
            }
            ui.label(format!("Hearts: {} | Sparks: {}", s.hearts, s.sparks));
            if let Some(id) = s.latest_heart {
                ui.label(format!("Latest heart #{id}"));
            }
            if let Some(waves) = s.waves_left {
                ui.label(format!("Fireworks: {} waves left", waves));
            }
            ui.label(format!(
                "Viewport: {:.0}x{:.0} @ {:.2}x",
                s.logical.0, s.logical.1, s.dpr
            ));
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::MAX_SCORE;

    #[test]
    fn readout_switches_at_the_cap() {
        let mut score = Happiness::new();
        score.add_score(42);
        assert_eq!(ScoreReadout::of(&score), ScoreReadout::Points(42));
        score.add_score(MAX_SCORE);
        assert_eq!(ScoreReadout::of(&score), ScoreReadout::ForeverLove);
    }

    #[test]
    fn frame_stats_track_the_window() {
        let mut stats = FrameStats::new();
        for _ in 0..10 {
            stats.record_frame(0.010);
        }
        stats.record_frame(0.030);
        assert_eq!(stats.frame_count(), 11);
        assert!((stats.frame_time_min - 0.010).abs() < 1e-12);
        assert!((stats.frame_time_max - 0.030).abs() < 1e-12);
        assert!(stats.fps > 60.0 && stats.fps < 100.0);
    }

    #[test]
    fn history_is_bounded() {
        let mut stats = FrameStats::new();
        for _ in 0..(FRAME_HISTORY_LEN * 2) {
            stats.record_frame(FRAME_BUDGET);
        }
        assert_eq!(stats.frame_times.len(), FRAME_HISTORY_LEN);
    }
}
