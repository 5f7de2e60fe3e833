//! Mesh generation for VoronoiDiagram
//!
//! Generates engine-agnostic mesh data from cell hulls, generator markers,
//! and the bounding sphere.

mod colors;

pub use colors::{
    CellColor, ColorMapper, PaletteColorMapper, UniformColorMapper, BOUNDARY_COLOR, CELL_COLOR,
    MARKER_COLOR,
};

use glam::DVec3;
use std::f64::consts::PI;

use crate::diagram::VoronoiDiagram;
use crate::hull::CellHull;

/// Radius of generator marker spheres
pub const MARKER_RADIUS: f64 = 0.2;

/// Segments for generator marker spheres
pub const MARKER_SEGMENTS: u32 = 16;

/// Segments for the bounding sphere
pub const BOUNDARY_SEGMENTS: u32 = 32;

/// Engine-agnostic mesh data output
///
/// Contains raw vertex data suitable for any rendering engine:
/// - Bevy: Convert to `Mesh` with attributes
/// - three-d / kiss3d: Build a CPU mesh directly
/// - wgpu: Use directly as vertex buffers
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    /// Vertex positions (3D coordinates)
    pub positions: Vec<[f32; 3]>,
    /// Vertex normals
    pub normals: Vec<[f32; 3]>,
    /// Vertex colors (RGBA)
    pub colors: Vec<[f32; 4]>,
    /// Triangle indices
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Get the number of vertices
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Get the number of triangles
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Check if mesh is empty
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    fn push_vertex(&mut self, position: DVec3, normal: DVec3, color: CellColor) -> u32 {
        let index = self.positions.len() as u32;
        self.positions.push(position.as_vec3().to_array());
        self.normals.push(normal.as_vec3().to_array());
        self.colors.push(color);
        index
    }
}

/// Generate a mesh of all cell surfaces
///
/// Each hull triangle gets its own three vertices so that faces are
/// flat-shaded. Cells without a valid hull are skipped.
pub fn generate_mesh<C: ColorMapper>(diagram: &VoronoiDiagram, color_mapper: &C) -> MeshData {
    let mut mesh = MeshData::default();

    for hull in diagram.hulls() {
        let color = match diagram.cell_for_generator(hull.cell) {
            Ok(cell) => color_mapper.map_color(cell),
            Err(_) => CELL_COLOR,
        };
        append_hull(&mut mesh, &hull, color);
    }

    mesh
}

/// Generate cell surfaces, generator markers, and the bounding sphere in one mesh
pub fn generate_scene_mesh<C: ColorMapper>(diagram: &VoronoiDiagram, color_mapper: &C) -> MeshData {
    let mut mesh = generate_mesh(diagram, color_mapper);
    append_marker_spheres(
        &mut mesh,
        diagram.points(),
        MARKER_RADIUS,
        MARKER_SEGMENTS,
        MARKER_COLOR,
    );
    append_sphere(
        &mut mesh,
        DVec3::ZERO,
        diagram.bounding_sphere_radius(),
        BOUNDARY_SEGMENTS,
        BOUNDARY_COLOR,
    );
    mesh
}

/// Append one flat-shaded hull
pub fn append_hull(mesh: &mut MeshData, hull: &CellHull, color: CellColor) {
    for (i, triangle) in hull.triangles.iter().enumerate() {
        let normal = hull.face_normal(i);
        let [a, b, c] = triangle.map(|v| hull.vertices[v as usize]);

        // Wind counter-clockwise when seen from outside
        let (b, c) = if (b - a).cross(c - a).dot(normal) < 0.0 {
            (c, b)
        } else {
            (b, c)
        };

        for p in [a, b, c] {
            let index = mesh.push_vertex(p, normal, color);
            mesh.indices.push(index);
        }
    }
}

/// Append a small sphere at every generator
pub fn append_marker_spheres(
    mesh: &mut MeshData,
    centers: &[DVec3],
    radius: f64,
    segments: u32,
    color: CellColor,
) {
    for &center in centers {
        append_sphere(mesh, center, radius, segments, color);
    }
}

/// Build a standalone UV sphere
pub fn sphere_mesh(center: DVec3, radius: f64, segments: u32, color: CellColor) -> MeshData {
    let mut mesh = MeshData::default();
    append_sphere(&mut mesh, center, radius, segments, color);
    mesh
}

/// Append a UV sphere with `segments` longitude and `segments / 2` latitude bands
pub fn append_sphere(mesh: &mut MeshData, center: DVec3, radius: f64, segments: u32, color: CellColor) {
    let segments = segments.max(3);
    let rings = (segments / 2).max(2);
    let base = mesh.positions.len() as u32;

    for ring in 0..=rings {
        let phi = PI * ring as f64 / rings as f64;
        for seg in 0..=segments {
            let theta = 2.0 * PI * seg as f64 / segments as f64;
            let normal = DVec3::new(phi.sin() * theta.cos(), phi.cos(), phi.sin() * theta.sin());
            mesh.push_vertex(center + normal * radius, normal, color);
        }
    }

    let stride = segments + 1;
    for ring in 0..rings {
        for seg in 0..segments {
            let a = base + ring * stride + seg;
            let b = a + stride;
            // Skip the zero-area triangles at the poles
            if ring != 0 {
                mesh.indices.extend_from_slice(&[a, a + 1, b]);
            }
            if ring != rings - 1 {
                mesh.indices.extend_from_slice(&[a + 1, b + 1, b]);
            }
        }
    }
}
