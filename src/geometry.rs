//! Vertex layouts and the meshes the demos draw.

use std::mem::size_of;

use cgmath::Vector3;
use glw::VertexAttribute;

/// A position with a color.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ColorVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

impl ColorVertex {
    pub fn attributes() -> [VertexAttribute; 2] {
        [
            VertexAttribute::of::<Self>(0, 3, 0),
            VertexAttribute::of::<Self>(1, 3, size_of::<[f32; 3]>()),
        ]
    }
}

/// A position, a color and texture coordinates.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TexturedVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
    pub tex_coords: [f32; 2],
}

impl TexturedVertex {
    const fn new(position: [f32; 3], color: [f32; 3], tex_coords: [f32; 2]) -> Self {
        Self { position, color, tex_coords }
    }

    /// Untinted, for meshes that only sample textures.
    const fn plain(position: [f32; 3], tex_coords: [f32; 2]) -> Self {
        Self::new(position, [0.0; 3], tex_coords)
    }

    pub fn attributes() -> [VertexAttribute; 3] {
        [
            VertexAttribute::of::<Self>(0, 3, 0),
            VertexAttribute::of::<Self>(1, 3, size_of::<[f32; 3]>()),
            VertexAttribute::of::<Self>(2, 2, 2 * size_of::<[f32; 3]>()),
        ]
    }
}

/// Bare positions.
pub const TRIANGLE: [[f32; 3]; 3] = [[-0.5, -0.5, 0.0], [0.5, -0.5, 0.0], [0.0, 0.5, 0.0]];

pub const UPPER_TRIANGLE: [[f32; 3]; 3] = [[0.5, 0.25, 0.0], [-0.5, 0.25, 0.0], [0.0, 0.75, 0.0]];
pub const LOWER_TRIANGLE: [[f32; 3]; 3] = [[0.5, -0.25, 0.0], [-0.5, -0.25, 0.0], [0.0, -0.75, 0.0]];
pub const TRIANGLE_INDICES: [u32; 3] = [0, 1, 2];

/// Red, green and blue corners.
pub const RGB_TRIANGLE: [ColorVertex; 3] = [
    ColorVertex { position: [0.5, -0.5, 0.0], color: [1.0, 0.0, 0.0] },
    ColorVertex { position: [-0.5, -0.5, 0.0], color: [0.0, 1.0, 0.0] },
    ColorVertex { position: [0.0, 0.5, 0.0], color: [0.0, 0.0, 1.0] },
];

pub const QUAD: [TexturedVertex; 4] = [
    TexturedVertex::new([0.5, 0.5, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0]),
    TexturedVertex::new([0.5, -0.5, 0.0], [0.0, 1.0, 0.0], [1.0, 0.0]),
    TexturedVertex::new([-0.5, -0.5, 0.0], [0.0, 0.0, 1.0], [0.0, 0.0]),
    TexturedVertex::new([-0.5, 0.5, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0]),
];
pub const QUAD_INDICES: [u32; 6] = [0, 1, 3, 1, 2, 3];

/// A unit cube as 12 separate triangles, so each face gets its own texture coordinates.
pub const CUBE: [TexturedVertex; 36] = [
    TexturedVertex::plain([-0.5, -0.5, -0.5], [0.0, 0.0]),
    TexturedVertex::plain([0.5, -0.5, -0.5], [1.0, 0.0]),
    TexturedVertex::plain([0.5, 0.5, -0.5], [1.0, 1.0]),
    TexturedVertex::plain([0.5, 0.5, -0.5], [1.0, 1.0]),
    TexturedVertex::plain([-0.5, 0.5, -0.5], [0.0, 1.0]),
    TexturedVertex::plain([-0.5, -0.5, -0.5], [0.0, 0.0]),

    TexturedVertex::plain([-0.5, -0.5, 0.5], [0.0, 0.0]),
    TexturedVertex::plain([0.5, -0.5, 0.5], [1.0, 0.0]),
    TexturedVertex::plain([0.5, 0.5, 0.5], [1.0, 1.0]),
    TexturedVertex::plain([0.5, 0.5, 0.5], [1.0, 1.0]),
    TexturedVertex::plain([-0.5, 0.5, 0.5], [0.0, 1.0]),
    TexturedVertex::plain([-0.5, -0.5, 0.5], [0.0, 0.0]),

    TexturedVertex::plain([-0.5, 0.5, 0.5], [1.0, 0.0]),
    TexturedVertex::plain([-0.5, 0.5, -0.5], [1.0, 1.0]),
    TexturedVertex::plain([-0.5, -0.5, -0.5], [0.0, 1.0]),
    TexturedVertex::plain([-0.5, -0.5, -0.5], [0.0, 1.0]),
    TexturedVertex::plain([-0.5, -0.5, 0.5], [0.0, 0.0]),
    TexturedVertex::plain([-0.5, 0.5, 0.5], [1.0, 0.0]),

    TexturedVertex::plain([0.5, 0.5, 0.5], [1.0, 0.0]),
    TexturedVertex::plain([0.5, 0.5, -0.5], [1.0, 1.0]),
    TexturedVertex::plain([0.5, -0.5, -0.5], [0.0, 1.0]),
    TexturedVertex::plain([0.5, -0.5, -0.5], [0.0, 1.0]),
    TexturedVertex::plain([0.5, -0.5, 0.5], [0.0, 0.0]),
    TexturedVertex::plain([0.5, 0.5, 0.5], [1.0, 0.0]),

    TexturedVertex::plain([-0.5, -0.5, -0.5], [0.0, 1.0]),
    TexturedVertex::plain([0.5, -0.5, -0.5], [1.0, 1.0]),
    TexturedVertex::plain([0.5, -0.5, 0.5], [1.0, 0.0]),
    TexturedVertex::plain([0.5, -0.5, 0.5], [1.0, 0.0]),
    TexturedVertex::plain([-0.5, -0.5, 0.5], [0.0, 0.0]),
    TexturedVertex::plain([-0.5, -0.5, -0.5], [0.0, 1.0]),

    TexturedVertex::plain([-0.5, 0.5, -0.5], [0.0, 1.0]),
    TexturedVertex::plain([0.5, 0.5, -0.5], [1.0, 1.0]),
    TexturedVertex::plain([0.5, 0.5, 0.5], [1.0, 0.0]),
    TexturedVertex::plain([0.5, 0.5, 0.5], [1.0, 0.0]),
    TexturedVertex::plain([-0.5, 0.5, 0.5], [0.0, 0.0]),
    TexturedVertex::plain([-0.5, 0.5, -0.5], [0.0, 1.0]),
];

/// Where the cubes of the coordinate systems demo sit.
pub const CUBE_POSITIONS: [[f32; 3]; 10] = [
    [0.0, 0.0, 0.0],
    [2.0, 5.0, -15.0],
    [-1.5, -2.2, -2.5],
    [-3.8, -2.0, -12.3],
    [2.4, -0.4, -3.5],
    [-1.7, 3.0, -7.5],
    [1.3, -2.0, -2.5],
    [1.5, 2.0, -2.5],
    [1.5, 0.2, -1.5],
    [-1.3, 1.0, -1.5],
];

/// Like [`CUBE_POSITIONS`], but with one cube down each positive axis to help find your bearings.
pub const CAMERA_CUBE_POSITIONS: [[f32; 3]; 10] = [
    [0.0, 0.0, 0.0],
    [5.0, 0.0, 0.0],
    [0.0, 5.0, 0.0],
    [0.0, 0.0, 5.0],
    [2.4, -0.4, -3.5],
    [-1.7, 3.0, -7.5],
    [1.3, -2.0, -2.5],
    [1.5, 2.0, -2.5],
    [1.5, 0.2, -1.5],
    [-1.3, 1.0, -1.5],
];

pub fn positions(raw: &[[f32; 3]]) -> impl Iterator<Item = Vector3<f32>> + '_ {
    raw.iter().map(|&p| Vector3::from(p))
}
