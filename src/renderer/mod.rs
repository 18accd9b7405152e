//! Rendering subsystems for the ring visualization.
//!
//! Scene renderers (particle bands, plasma halo) draw additively into a
//! shared HDR color target; post-processing (bloom, composite) turns that
//! into the presented frame.

pub mod halo;
pub mod points;
pub mod postprocess;

/// Format of the intermediate HDR scene target all scene renderers draw to.
pub const HDR_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba16Float;

/// Additive blend state shared by every scene layer (no depth writes — the
/// layers simply accumulate light).
pub const ADDITIVE_BLEND: wgpu::BlendState = wgpu::BlendState {
    color: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::One,
        dst_factor: wgpu::BlendFactor::One,
        operation: wgpu::BlendOperation::Add,
    },
    alpha: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::One,
        dst_factor: wgpu::BlendFactor::One,
        operation: wgpu::BlendOperation::Add,
    },
};
