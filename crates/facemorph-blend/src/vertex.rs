//! Packed vertex types for GPU upload

use bytemuck::{Pod, Zeroable};

/// One vertex attribute as the shader sees it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VertexAttribute {
    /// Shader input location
    pub location: u32,
    /// Number of f32 components
    pub components: u32,
    /// Byte offset within the vertex
    pub offset: usize,
}

/// Interleaved position and normal, narrowed to f32
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct GpuVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl GpuVertex {
    pub const ATTRIBUTES: [VertexAttribute; 2] = [
        VertexAttribute {
            location: 0,
            components: 3,
            offset: 0,
        },
        VertexAttribute {
            location: 1,
            components: 3,
            offset: 12,
        },
    ];

    pub fn new(position: [f32; 3], normal: [f32; 3]) -> Self {
        Self { position, normal }
    }

    /// Distance in bytes between consecutive vertices
    pub const fn stride() -> usize {
        std::mem::size_of::<Self>()
    }
}

/// Interleaved position, normal and texture coordinate for textured props
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct TexturedVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub texcoord: [f32; 2],
}

impl TexturedVertex {
    pub const ATTRIBUTES: [VertexAttribute; 3] = [
        VertexAttribute {
            location: 0,
            components: 3,
            offset: 0,
        },
        VertexAttribute {
            location: 1,
            components: 3,
            offset: 12,
        },
        VertexAttribute {
            location: 2,
            components: 2,
            offset: 24,
        },
    ];

    pub fn new(position: [f32; 3], normal: [f32; 3], texcoord: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            texcoord,
        }
    }

    pub const fn stride() -> usize {
        std::mem::size_of::<Self>()
    }
}
