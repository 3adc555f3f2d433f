pub mod blit;
pub mod instance;
pub mod pipeline;

use std::sync::Arc;
use winit::window::Window;

use self::blit::{BlitPipeline, BoundTexture, SCENE_FORMAT};
use self::instance::RectInstance;
use self::pipeline::RectPipeline;
use crate::error::{FrameError, StartupError};
use crate::paint::Canvas;

/// Core GPU state: device, queue, surface, and the yard's three passes.
///
/// The yard is drawn into an offscreen target sized `logical × capped dpr`,
/// then stretched onto the physical swapchain, so a 3× display still only
/// pays for a 2× backing store.
pub struct GpuState {
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub surface: wgpu::Surface<'static>,
    pub surface_config: wgpu::SurfaceConfiguration,
    rects: RectPipeline,
    backdrop_blit: BlitPipeline,
    present_blit: BlitPipeline,
    backdrop: BoundTexture,
    scene_target: BoundTexture,
}

/// Intermediate frame state returned by `begin_frame`.
pub struct FrameContext {
    pub output: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}

impl GpuState {
    /// Initialize wgpu. Fails when the window has no usable drawing surface.
    pub fn new(window: Arc<Window>) -> Result<Self, StartupError> {
        let size = window.inner_size();

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(window)?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))?;

        log::info!(
            "GPU adapter: {:?} ({:?})",
            adapter.get_info().name,
            adapter.get_info().backend
        );

        let (device, queue) = pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor {
            label: Some("pupyard_device"),
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            ..Default::default()
        }))?;

        let surface_caps = surface.get_capabilities(&adapter);

        // Linear formats so packed colours land on screen unchanged.
        let format = surface_caps
            .formats
            .iter()
            .find(|f| !f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        // Fifo paces one simulation step per display refresh.
        let present_mode = wgpu::PresentMode::Fifo;
        let alpha_mode = surface_caps.alpha_modes[0];

        log::info!(
            "Surface: format={:?}, alpha_mode={:?}, present_mode={:?}",
            format,
            alpha_mode,
            present_mode,
        );

        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &surface_config);

        let rects = RectPipeline::new(&device, SCENE_FORMAT);
        let backdrop_blit = BlitPipeline::new(&device, SCENE_FORMAT);
        let present_blit = BlitPipeline::new(&device, format);

        let backdrop = BoundTexture::new(
            &device,
            &backdrop_blit,
            "backdrop",
            (1, 1),
            wgpu::TextureUsages::COPY_DST,
        );
        let scene_target = BoundTexture::new(
            &device,
            &present_blit,
            "scene_target",
            (surface_config.width, surface_config.height),
            wgpu::TextureUsages::RENDER_ATTACHMENT,
        );

        Ok(Self {
            device,
            queue,
            surface,
            surface_config,
            rects,
            backdrop_blit,
            present_blit,
            backdrop,
            scene_target,
        })
    }

    /// Resize the swapchain (physical pixels).
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.surface_config.width = width;
        self.surface_config.height = height;
        self.surface.configure(&self.device, &self.surface_config);
    }

    /// Match the scene target to the logical viewport and its backing size.
    pub fn resize_scene(&mut self, logical: (f32, f32), backing: (u32, u32)) {
        self.rects
            .update_screen_size(&self.queue, logical.0, logical.1);
        if self.scene_target.size() == backing {
            return;
        }
        log::debug!("scene target {}x{}", backing.0, backing.1);
        self.scene_target = BoundTexture::new(
            &self.device,
            &self.present_blit,
            "scene_target",
            backing,
            wgpu::TextureUsages::RENDER_ATTACHMENT,
        );
    }

    /// Replace the cached backdrop with a freshly generated one.
    pub fn upload_backdrop(&mut self, canvas: &Canvas) {
        let size = (canvas.width(), canvas.height());
        if self.backdrop.size() != size {
            self.backdrop = BoundTexture::new(
                &self.device,
                &self.backdrop_blit,
                "backdrop",
                size,
                wgpu::TextureUsages::COPY_DST,
            );
        }
        self.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &self.backdrop.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            canvas.as_bytes(),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * size.0),
                rows_per_image: Some(size.1),
            },
            wgpu::Extent3d {
                width: size.0,
                height: size.1,
                depth_or_array_layers: 1,
            },
        );
    }

    /// Upload instance data for this frame.
    pub fn update_instances(&mut self, instances: &[RectInstance]) {
        self.rects.update_instances(&self.queue, instances);
    }

    /// Acquire the next surface texture and create a command encoder.
    /// Lost or outdated surfaces are reconfigured before the error is returned.
    pub fn begin_frame(&self) -> Result<FrameContext, FrameError> {
        let output = self
            .surface
            .get_current_texture()
            .map_err(FrameError::from)
            .inspect_err(|e| {
                if e.is_transient() {
                    self.surface.configure(&self.device, &self.surface_config);
                }
            })?;

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame_encoder"),
            });

        Ok(FrameContext {
            output,
            view,
            encoder,
        })
    }

    /// Backdrop and quads into the scene target, then the target onto `view`.
    pub fn draw_scene(&self, encoder: &mut wgpu::CommandEncoder, view: &wgpu::TextureView) {
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_render_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.scene_target.view,
                    resolve_target: None,
                    depth_slice: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            self.backdrop_blit
                .draw(&mut pass, &self.backdrop.bind_group);
            self.rects.draw(&mut pass);
        }

        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("present_render_pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                depth_slice: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        self.present_blit
            .draw(&mut pass, &self.scene_target.bind_group);
    }

    /// Create an egui render pass that preserves existing content (LoadOp::Load).
    /// Returns a 'static render pass suitable for egui_wgpu::Renderer::render().
    pub fn begin_egui_pass(
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
    ) -> wgpu::RenderPass<'static> {
        let render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("egui_render_pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                depth_slice: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        render_pass.forget_lifetime()
    }

    /// Submit the command encoder and present.
    pub fn finish_frame(
        &self,
        encoder: wgpu::CommandEncoder,
        output: wgpu::SurfaceTexture,
        extra_cmd_bufs: Vec<wgpu::CommandBuffer>,
    ) {
        self.queue.submit(
            extra_cmd_bufs
                .into_iter()
                .chain(std::iter::once(encoder.finish())),
        );
        output.present();
    }
}
