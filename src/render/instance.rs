use bytemuck::{Pod, Zeroable};

use crate::paint::{Quad, Surface};

/// One filled parallelogram, in logical pixels.
/// Stride = 28 bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct RectInstance {
    pub origin: [f32; 2],
    pub axis_x: [f32; 2],
    pub axis_y: [f32; 2],
    /// RGBA packed as `0xRRGGBBAA`.
    pub color: u32,
}

impl RectInstance {
    const ATTRIBS: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
        0 => Float32x2,
        1 => Float32x2,
        2 => Float32x2,
        3 => Uint32,
    ];

    /// Per-instance buffer layout; locations match `InstanceIn` in `rect.wgsl`.
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<RectInstance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBS,
        }
    }

    pub fn new(quad: Quad, color: u32) -> Self {
        Self {
            origin: quad.origin.into(),
            axis_x: quad.axis_x.into(),
            axis_y: quad.axis_y.into(),
            color,
        }
    }
}

/// The frame's instance list is itself a paint surface.
impl Surface for Vec<RectInstance> {
    fn fill_quad(&mut self, quad: Quad, color: u32) {
        self.push(RectInstance::new(quad, color));
    }
}
