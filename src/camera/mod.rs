//! Fixed perspective camera and its GPU binding.
//!
//! The visualization has no camera controls: the eye sits on the +Z axis
//! looking at the origin. Only the aspect ratio ever changes, via
//! [`CameraBinding::resize`].

use glam::{Mat4, Vec3};
use wgpu::util::DeviceExt;

use crate::gpu::render_context::RenderContext;
use crate::options::CameraOptions;

/// Perspective camera defined by eye position, target, and projection
/// parameters.
pub struct Camera {
    /// Eye (camera) position in world space.
    pub eye: Vec3,
    /// Look-at target position.
    pub target: Vec3,
    /// Up direction vector.
    pub up: Vec3,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
}

impl Camera {
    /// Build a camera from options and an initial aspect ratio.
    #[must_use]
    pub fn from_options(options: &CameraOptions, aspect: f32) -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, options.distance),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect,
            fovy: options.fovy,
            znear: options.znear,
            zfar: options.zfar,
        }
    }

    /// Build the combined view-projection matrix.
    pub fn build_matrix(&self) -> Mat4 {
        let view = Mat4::look_at_rh(self.eye, self.target, self.up);
        // perspective_rh already uses [0,1] depth range (wgpu/Vulkan
        // convention)
        let proj = Mat4::perspective_rh(
            self.fovy.to_radians(),
            self.aspect,
            self.znear,
            self.zfar,
        );
        proj * view
    }

    /// Update the aspect ratio from the new viewport size. Calling again
    /// with the same dimensions is a no-op.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }
}

/// GPU uniform buffer holding the view-projection matrix plus the camera
/// basis vectors used for particle billboarding.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    /// Combined view-projection matrix.
    pub view_proj: [[f32; 4]; 4],
    /// Camera right direction in world space.
    pub right: [f32; 3],
    /// Padding for GPU alignment.
    pub _pad0: f32,
    /// Camera up direction in world space.
    pub up: [f32; 3],
    /// Padding for GPU alignment.
    pub _pad1: f32,
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraUniform {
    /// Create a new camera uniform with identity view-projection.
    pub fn new() -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            right: [1.0, 0.0, 0.0],
            _pad0: 0.0,
            up: [0.0, 1.0, 0.0],
            _pad1: 0.0,
        }
    }

    /// Update uniform fields from the given camera's current state.
    pub fn update_view_proj(&mut self, camera: &Camera) {
        self.view_proj = camera.build_matrix().to_cols_array_2d();
        let forward = (camera.target - camera.eye).normalize();
        let right = forward.cross(camera.up).normalize();
        let up = right.cross(forward);
        self.right = right.to_array();
        self.up = up.to_array();
    }
}

/// Camera plus its uniform buffer, bind group layout, and bind group.
pub struct CameraBinding {
    /// The CPU-side camera state.
    pub camera: Camera,
    /// Mirror of the GPU uniform contents.
    pub uniform: CameraUniform,
    /// Uniform buffer backing the bind group.
    pub buffer: wgpu::Buffer,
    /// Layout shared with every pipeline that consumes the camera.
    pub layout: wgpu::BindGroupLayout,
    /// The camera bind group (group 1 in the scene shaders).
    pub bind_group: wgpu::BindGroup,
}

impl CameraBinding {
    /// Create the camera binding for the given context and options.
    pub fn new(context: &RenderContext, options: &CameraOptions) -> Self {
        let aspect =
            context.config.width as f32 / context.config.height as f32;
        let camera = Camera::from_options(options, aspect);

        let mut uniform = CameraUniform::new();
        uniform.update_view_proj(&camera);

        let buffer = context.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Camera Buffer"),
                contents: bytemuck::cast_slice(&[uniform]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            },
        );

        let layout = context.device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Camera Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX
                        | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            },
        );

        let bind_group = context.device.create_bind_group(
            &wgpu::BindGroupDescriptor {
                layout: &layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: buffer.as_entire_binding(),
                }],
                label: Some("Camera Bind Group"),
            },
        );

        Self {
            camera,
            uniform,
            buffer,
            layout,
            bind_group,
        }
    }

    /// Push the current camera state to the GPU.
    pub fn update_gpu(&mut self, queue: &wgpu::Queue) {
        self.uniform.update_view_proj(&self.camera);
        queue.write_buffer(
            &self.buffer,
            0,
            bytemuck::cast_slice(&[self.uniform]),
        );
    }

    /// Update the camera aspect ratio for the new viewport size.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera.resize(width, height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_camera() -> Camera {
        Camera::from_options(&CameraOptions::default(), 16.0 / 9.0)
    }

    #[test]
    fn resize_is_idempotent() {
        let mut camera = test_camera();
        camera.resize(800, 600);
        let first = camera.aspect;
        camera.resize(800, 600);
        assert_eq!(camera.aspect, first);
        assert_eq!(camera.aspect, 800.0 / 600.0);
    }

    #[test]
    fn resize_ignores_degenerate_sizes() {
        let mut camera = test_camera();
        let before = camera.aspect;
        camera.resize(0, 600);
        camera.resize(800, 0);
        assert_eq!(camera.aspect, before);
    }

    #[test]
    fn uniform_basis_is_orthonormal() {
        let camera = test_camera();
        let mut uniform = CameraUniform::new();
        uniform.update_view_proj(&camera);
        let right = Vec3::from_array(uniform.right);
        let up = Vec3::from_array(uniform.up);
        assert!((right.length() - 1.0).abs() < 1e-6);
        assert!((up.length() - 1.0).abs() < 1e-6);
        assert!(right.dot(up).abs() < 1e-6);
    }
}
